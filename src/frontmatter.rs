//! Front-matter extraction.
//!
//! A document may open with a `---` delimited block of `key: value` lines.
//! This is deliberately not YAML: every value is a flat string, and malformed
//! input degrades to an empty header instead of an error.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// A source document split into its header block and body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub header: HashMap<String, String>,
    pub body: String,
}

impl Document {
    /// Returns a header value, treating empty strings as absent.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.header
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

fn block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Opening line is exactly `---`; the block closes at the next line that is exactly `---`.
    RE.get_or_init(|| {
        Regex::new(r"(?s)\A---\r?\n(?:(.*?)\r?\n)?---(?:\r?\n|\z)")
            .expect("front-matter pattern is valid")
    })
}

/// Splits raw text into header and body. Never fails.
pub fn parse(raw: &str) -> Document {
    let Some(caps) = block_re().captures(raw) else {
        return Document {
            header: HashMap::new(),
            body: raw.to_string(),
        };
    };

    let mut header = HashMap::new();
    if let Some(block) = caps.get(1) {
        for line in block.as_str().lines() {
            if let Some((k, v)) = line.split_once(':') {
                header.insert(k.trim().to_string(), unquote(v.trim()).to_string());
            }
        }
    }

    let end = caps.get(0).map_or(0, |m| m.end());
    Document {
        header,
        body: raw[end..].trim().to_string(),
    }
}

/// Strips one pair of matching wrapping quotes. No escape processing.
fn unquote(value: &str) -> &str {
    for q in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(q) && value.ends_with(q) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_header_and_body() {
        let doc = parse("---\ntitle: Hello\ndate: Jan 2024\n---\n\n  Body text.\n\n");
        assert_eq!(doc.header.get("title").unwrap(), "Hello");
        assert_eq!(doc.header.get("date").unwrap(), "Jan 2024");
        assert_eq!(doc.body, "Body text.");
    }

    #[test]
    fn missing_header_returns_input_unchanged() {
        let raw = "  just a body\nwith: a colon\n";
        let doc = parse(raw);
        assert!(doc.header.is_empty());
        assert_eq!(doc.body, raw);
    }

    #[test]
    fn unclosed_header_is_not_a_header() {
        let raw = "---\ntitle: Dangling\nno closing line";
        let doc = parse(raw);
        assert!(doc.header.is_empty());
        assert_eq!(doc.body, raw);
    }

    #[test]
    fn header_must_start_at_first_line() {
        let raw = "\n---\ntitle: Late\n---\nbody";
        assert!(parse(raw).header.is_empty());
    }

    #[test]
    fn closing_line_must_be_exact() {
        let doc = parse("---\ntitle: A\n---- not it\nslug: b\n---\nbody");
        assert_eq!(doc.header.get("slug").unwrap(), "b");
        assert_eq!(doc.body, "body");
    }

    #[test]
    fn closing_line_with_trailing_blanks_does_not_close() {
        let raw = "---\ntitle: A\n--- \nbody";
        let doc = parse(raw);
        assert!(doc.header.is_empty());
        assert_eq!(doc.body, raw);

        let doc = parse("---\ntitle: A\n---\t\nslug: b\n---\nbody");
        assert_eq!(doc.header["slug"], "b");
        assert_eq!(doc.body, "body");
    }

    #[test]
    fn splits_on_first_colon_only() {
        let doc = parse("---\ntitle: Rust: the good parts\nurl: https://x.io/a\n---\n");
        assert_eq!(doc.header.get("title").unwrap(), "Rust: the good parts");
        assert_eq!(doc.header.get("url").unwrap(), "https://x.io/a");
        assert_eq!(doc.body, "");
    }

    #[test]
    fn strips_matching_quotes() {
        let doc = parse("---\na: 'ai'\nb: \"two words\"\nc: 'mixed\"\nd: \"\n---\n");
        assert_eq!(doc.header["a"], "ai");
        assert_eq!(doc.header["b"], "two words");
        assert_eq!(doc.header["c"], "'mixed\"");
        assert_eq!(doc.header["d"], "\"");
    }

    #[test]
    fn ignores_lines_without_colon_and_keeps_last_duplicate() {
        let doc = parse("---\njust words\ntitle: first\ntitle: second\n---\nbody");
        assert_eq!(doc.header.len(), 1);
        assert_eq!(doc.header["title"], "second");
    }

    #[test]
    fn accepts_crlf_and_empty_block() {
        let doc = parse("---\r\ntitle: Windows\r\n---\r\nbody\r\n");
        assert_eq!(doc.header["title"], "Windows");
        assert_eq!(doc.body, "body");

        let empty = parse("---\n---\nbody");
        assert!(empty.header.is_empty());
        assert_eq!(empty.body, "body");
    }

    #[test]
    fn field_treats_empty_as_absent() {
        let doc = parse("---\nslug:\ntitle: T\n---\n");
        assert_eq!(doc.field("slug"), None);
        assert_eq!(doc.field("title"), Some("T"));
    }
}
