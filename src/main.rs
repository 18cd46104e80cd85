mod build;
mod config;
mod date;
mod error;
mod frontmatter;
mod listing;
mod logging;
mod models;
mod parser;
mod rss;
mod source;
mod watch;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser as ClapParser, Subcommand};
use console::style;
use rust_embed::RustEmbed;
use std::fs;
use std::path::Path;
use std::time::Instant;

use crate::config::{Config, CONFIG_FILE};
use crate::listing::{CategoryFilter, Listing};
use crate::models::Post;
use crate::source::DirSource;

#[derive(RustEmbed)]
#[folder = "assets/default_site/"]
struct Asset;

#[derive(ClapParser)]
#[command(author, version, about = "folio - front matter in, RSS out.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Clone)]
enum Commands {
    /// Write the starter folio.toml and a welcome post
    Init,
    /// Generate the RSS feed
    Build {
        /// Keep running and rebuild when posts change
        #[arg(short, long)]
        watch: bool,
    },
    /// List posts and the category tally
    List {
        /// Show only one category (label or raw name)
        #[arg(short, long)]
        category: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Print a single post by slug
    Show {
        slug: String,
        /// Render the body as HTML
        #[arg(long)]
        html: bool,
    },
    /// Create a new post
    New {
        title: String,
        #[arg(short, long, default_value = "other")]
        category: String,
        #[arg(short, long)]
        label: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short, long, default_value = "")]
        excerpt: String,
    },
}

fn main() -> anyhow::Result<()> {
    let start = Instant::now();
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose)?;

    if let Commands::Init = cli.command {
        println!("folio init v{}", env!("CARGO_PKG_VERSION"));
        init_project()?;
        println!("{} Project initialized.", style("success").cyan());
        println!("Done in {:.2}s.", start.elapsed().as_secs_f32());
        return Ok(());
    }

    let config = Config::load(Path::new(CONFIG_FILE))?;

    match cli.command {
        Commands::Build { watch: true } => watch::watch(&config, cli.verbose)?,
        Commands::Build { watch: false } => {
            let report = build::perform_build(&config, cli.verbose)?;
            if report.posts == 0 {
                tracing::warn!(path = %report.path.display(), "feed written with no items");
            }
        }
        Commands::List { category, json } => list(&config, category.as_deref(), json)?,
        Commands::Show { slug, html } => {
            let source = DirSource::open(&config.posts_dir, &config.extension)?;
            let article = listing::find_post(&source, &slug)?;
            tracing::debug!(slug = %article.slug, "found post");
            if html {
                println!("{}", parser::render_markdown(article.body()));
            } else {
                println!("{}", article.body());
            }
        }
        Commands::New { title, category, label, date, excerpt } => {
            let category = category.to_lowercase();
            let post = Post {
                slug: slug::slugify(&title),
                label: label.unwrap_or_else(|| category.clone()),
                category,
                date: date.unwrap_or_else(|| Utc::now().format("%b %Y").to_string()),
                excerpt,
                content: format!("# {title}\n"),
                title,
                ..Post::default()
            };
            let path = create_post(&config, &post)?;
            println!("{} {}", style("created").cyan(), path.display());
        }
        Commands::Init => unreachable!(),
    }
    Ok(())
}

fn list(config: &Config, category: Option<&str>, json: bool) -> anyhow::Result<()> {
    let source = DirSource::open(&config.posts_dir, &config.extension)?;
    let Listing { posts, tally } = listing::load_listing(&source, config.listing.order, Utc::now());

    let mut filter = CategoryFilter::default();
    if let Some(name) = category {
        let raw = tally
            .resolve(name)
            .with_context(|| format!("no posts in category '{name}'"))?;
        filter.select(raw);
    }
    let shown = filter.apply(&posts);

    if json {
        let out = serde_json::json!({ "posts": shown, "categories": tally });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if let Some(active) = filter.active() {
        println!("{} {}\n", style("category").dim(), active);
    }
    for p in &shown {
        println!(
            "{}  {}  {}",
            style(format!("{:<10}", p.date)).dim(),
            p.title,
            style(format!("[{}]", p.label)).cyan()
        );
        if !p.excerpt.is_empty() {
            println!("            {}", style(&p.excerpt).dim());
        }
    }
    if !tally.is_empty() {
        let counts: Vec<String> = tally
            .iter()
            .map(|(label, entry)| format!("{label} ({})", entry.count))
            .collect();
        println!("\n{} {} ({})", style("categories").dim(), counts.join(", "), posts.len());
    }
    Ok(())
}

fn create_post(config: &Config, post: &Post) -> anyhow::Result<std::path::PathBuf> {
    anyhow::ensure!(!post.slug.is_empty(), "title produces an empty slug");
    fs::create_dir_all(&config.posts_dir)?;
    let path = config
        .posts_dir
        .join(format!("{}.{}", post.slug, config.extension));
    anyhow::ensure!(!path.exists(), "{} already exists", path.display());
    fs::write(&path, post.to_markdown())?;
    Ok(path)
}

fn init_project() -> anyhow::Result<()> {
    println!("{} Extracting default site...", style("[1/1]").dim());

    for file in Asset::iter() {
        let path = Path::new(file.as_ref());

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = Asset::get(file.as_ref())
            .with_context(|| format!("embedded asset {file} is missing"))?;

        if !path.exists() {
            fs::write(path, content.data)?;
        }
    }
    Ok(())
}
