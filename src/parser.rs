use pulldown_cmark::{html, Options, Parser};

/// Renders a post body to HTML for the detail view.
pub fn render_markdown(md: &str) -> String {
    let parser = Parser::new_ext(md, Options::all());
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}
