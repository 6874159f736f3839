//! # Satzify - Simply Annotate Sentences
//!
//! Highlights parts of speech, cases and genders in a sentence, using the
//! analysis of an external NLP parser.
//!
//! ## Quick Start
//!
//! ```bash
//! # Annotate the example sentence (word tokenizer, no tags)
//! cargo run
//!
//! # Annotate with a parser analysis
//! cargo run -- --analysis analysis.json "Alles hat ein Ende, nur die Wurst hat zwei."
//!
//! # Only cases, as terminal colors, plus the token table
//! cargo run -- -a analysis.json --category cases --format ansi --table
//! ```

mod render;

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use satzify_core::{AnnotateError, Annotator, Category, Config, OutputFormat, EXAMPLE_TEXT};
use satzify_tokens::{
    AnalysisFile, CachedSource, DependencyTree, TokenSource, TokenTable, WordTokenizer,
};

/// Satzify - highlight the parts of a sentence.
///
/// Satzify helps with analysing sentences: it highlights the different parts
/// of a sentence according to the selected categories. It was created for
/// German, which is where the name comes from.
#[derive(Parser, Debug)]
#[command(name = "satzify")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Text to annotate (defaults to an example sentence)
    #[arg(value_name = "TEXT")]
    text: Option<String>,

    /// Read the text from a file instead
    #[arg(short, long, value_name = "FILE", conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Parser analysis (JSON) to take tokens from
    #[arg(short, long, value_name = "JSON")]
    analysis: Option<PathBuf>,

    /// Category to annotate: pos, cases or all
    #[arg(short, long, default_value = "all")]
    category: String,

    /// Output format: plain, markup, ansi or json
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Plain text that splits the output into groups
    #[arg(long)]
    separator: Option<String>,

    /// Print the token table
    #[arg(long)]
    table: bool,

    /// Print the dependency tree
    #[arg(long)]
    tree: bool,

    /// Config file (defaults to the user config directory)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Parses `all` or a single category name.
fn parse_categories(name: &str) -> Result<Vec<Category>, AnnotateError> {
    if name.eq_ignore_ascii_case("all") {
        Ok(Category::ALL.to_vec())
    } else {
        Ok(vec![name.parse()?])
    }
}

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    let log_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    tracing::info!("Starting satzify v{}", env!("CARGO_PKG_VERSION"));

    let config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::load(),
    };
    let format = args.format.unwrap_or(config.render.format);
    let separator = args
        .separator
        .clone()
        .unwrap_or_else(|| config.render.separator.clone());
    let categories = parse_categories(&args.category)?;

    let text = match (&args.text, &args.file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        (None, None) => EXAMPLE_TEXT.to_string(),
    };

    // Constructed once and shared by every category's pass
    let source: Box<dyn TokenSource> = match &args.analysis {
        Some(path) => {
            let analysis = AnalysisFile::load(path)
                .with_context(|| format!("Failed to load analysis {}", path.display()))?;
            analysis.ensure_language(&config.render.language)?;
            Box::new(analysis)
        }
        None => {
            tracing::warn!("No analysis given, falling back to the word tokenizer (nothing will be highlighted)");
            Box::new(WordTokenizer::new())
        }
    };
    let source = Arc::new(CachedSource::with_capacity(
        source,
        config.tokens.cache_capacity,
    ));

    let annotator = Annotator::from_config(&config);
    let mut results = Vec::with_capacity(categories.len());
    for category in categories {
        let segments = annotator
            .annotate_text(&*source, category, &text)
            .with_context(|| format!("Failed to annotate {category}"))?;
        results.push((category, satzify_core::split(segments, &separator)));
    }

    print!("{}", render::render_categories(&results, format)?);
    if format != OutputFormat::Json {
        println!();
    }

    if args.table || args.tree {
        let tokens = source.tokens(&text)?;
        if args.table {
            println!("{}", TokenTable::from_tokens(&tokens));
        }
        if args.tree {
            print!("{}", DependencyTree::from_tokens(&tokens));
        }
    }

    let (hits, misses) = source.stats();
    tracing::debug!(hits, misses, "token cache");

    Ok(())
}
