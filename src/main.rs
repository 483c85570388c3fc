//! Webdex main entry point
//!
//! This is the command-line interface for crawling a site into a JSON index
//! and querying, exporting or analyzing that index afterwards.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use webdex::config::{read_config_with_hash, validate, Config};
use webdex::crawler::Crawler;
use webdex::output::{analyze_page, build_site_structure, write_export, CrawlMetrics, ExportFormat, SiteNode};
use webdex::storage::{load_index, save_index, IndexFile};
use webdex::url::UrlFilter;

const DEFAULT_INDEX_FILE: &str = "index.json";

/// Webdex: a polite breadth-first crawler and search index
///
/// Webdex crawls a site from one or more seed URLs while respecting
/// robots.txt, stores what it finds in a JSON index, and ranks indexed pages
/// against free-text queries.
#[derive(Parser, Debug)]
#[command(name = "webdex")]
#[command(version)]
#[command(about = "A polite breadth-first crawler and search index", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl from a start URL (or the configured seeds) and save the index
    Crawl(CrawlArgs),

    /// Search a saved index
    Search {
        /// Free-text query
        query: String,

        /// Index file to search
        #[arg(long, value_name = "FILE", default_value = DEFAULT_INDEX_FILE)]
        index: PathBuf,

        /// Only show URLs matching this pattern (repeatable, `re:` for regex)
        #[arg(long, value_name = "PATTERN")]
        filter: Vec<String>,

        /// Maximum number of results to print
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Export a saved index as json, csv or xml
    Export {
        /// Output format
        format: ExportFormat,

        /// Output file (default: export.<format>)
        file: Option<PathBuf>,

        /// Index file to export
        #[arg(long, value_name = "FILE", default_value = DEFAULT_INDEX_FILE)]
        index: PathBuf,

        /// Only export URLs matching this pattern (repeatable, `re:` for regex)
        #[arg(long, value_name = "PATTERN")]
        filter: Vec<String>,
    },

    /// Print metrics, SEO checks and the site structure of a saved index
    Analyze {
        /// Index file to analyze
        #[arg(long, value_name = "FILE", default_value = DEFAULT_INDEX_FILE)]
        index: PathBuf,

        /// Number of pages to run SEO checks on
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
}

#[derive(Args, Debug)]
struct CrawlArgs {
    /// Start URL; replaces the configured seeds
    url: Option<String>,

    /// Path to TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum pages to fetch
    #[arg(long)]
    max_pages: Option<usize>,

    /// Maximum link depth from the start URL
    #[arg(long)]
    max_depth: Option<u32>,

    /// Request timeout in milliseconds
    #[arg(long)]
    timeout: Option<u64>,

    /// User agent string
    #[arg(long)]
    user_agent: Option<String>,

    /// Index file to write (default: the configured index path)
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::Crawl(args) => handle_crawl(args).await,
        Command::Search {
            query,
            index,
            filter,
            limit,
        } => handle_search(&query, &index, &filter, limit),
        Command::Export {
            format,
            file,
            index,
            filter,
        } => handle_export(format, file, &index, &filter),
        Command::Analyze { index, limit } => handle_analyze(&index, limit),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("webdex=info,warn"),
            1 => EnvFilter::new("webdex=debug,info"),
            2 => EnvFilter::new("webdex=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Builds the effective configuration: file (if any), then CLI overrides
fn resolve_config(args: &CrawlArgs) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = read_config_with_hash(path)
                .with_context(|| format!("Failed to load config file {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(url) = &args.url {
        config.crawler.start_urls = vec![url.clone()];
    }
    if let Some(max_pages) = args.max_pages {
        config.crawler.max_pages = max_pages;
    }
    if let Some(max_depth) = args.max_depth {
        config.crawler.max_depth = max_depth;
    }
    if let Some(timeout) = args.timeout {
        config.crawler.timeout = timeout;
    }
    if let Some(user_agent) = &args.user_agent {
        config.crawler.user_agent = user_agent.clone();
    }
    if let Some(output) = &args.output {
        config.output.index_path = output.display().to_string();
    }

    validate(&config)?;
    Ok(config)
}

/// Handles the crawl command: runs the crawl and saves the index
async fn handle_crawl(args: CrawlArgs) -> Result<()> {
    let config = resolve_config(&args)?;
    let index_path = PathBuf::from(&config.output.index_path);

    tracing::info!(
        "Seeds: {}, max pages: {}, max depth: {}",
        config.crawler.start_urls.join(", "),
        config.crawler.max_pages,
        config.crawler.max_depth
    );

    let mut crawler = Crawler::new(config.crawler)?;
    let report = match crawler.run().await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    let stats = report.stats.clone();
    let metrics = CrawlMetrics::from_records(&report.records).with_stats(&stats);
    let index = report.into_index();
    save_index(&index, &index_path)?;

    println!("=== Crawl Complete ===\n");
    println!("  Pages attempted: {}", stats.pages_attempted);
    println!("  Pages indexed:   {}", stats.pages_indexed);
    println!("  Blocked:         {}", stats.pages_blocked);
    println!("  Errors:          {}", stats.errors);
    println!("  Left in queue:   {}", stats.queue_remaining);
    println!(
        "  Duration:        {:.1}s",
        (stats.finished_at - stats.started_at).num_milliseconds() as f64 / 1000.0
    );
    print_metrics(&metrics);
    println!("\n✓ Index saved to: {}", index_path.display());

    Ok(())
}

fn open_index(path: &Path) -> Result<IndexFile> {
    if !path.exists() {
        bail!("Index file not found: {}", path.display());
    }
    let file = load_index(path).with_context(|| format!("Failed to load {}", path.display()))?;
    tracing::info!("Index loaded with {} pages", file.pages.len());
    Ok(file)
}

/// Handles the search command
fn handle_search(query: &str, index_path: &Path, filter: &[String], limit: usize) -> Result<()> {
    let filter = UrlFilter::parse_all(filter)?;
    let index = open_index(index_path)?.into_index();

    let results: Vec<_> = index
        .search(query)
        .into_iter()
        .filter(|r| filter.matches(&r.url))
        .collect();

    if results.is_empty() {
        println!("No results found for \"{}\"", query);
        return Ok(());
    }

    println!("Found {} results:\n", results.len());
    for (i, result) in results.iter().take(limit).enumerate() {
        println!("{}. {}", i + 1, result.title);
        println!("   URL: {}", result.url);
        println!("   Relevance: {}\n", result.relevance);
    }

    Ok(())
}

/// Handles the export command
fn handle_export(
    format: ExportFormat,
    file: Option<PathBuf>,
    index_path: &Path,
    filter: &[String],
) -> Result<()> {
    let filter = UrlFilter::parse_all(filter)?;
    let index = open_index(index_path)?;
    let output = file.unwrap_or_else(|| PathBuf::from(format!("export.{}", format.extension())));

    let selected = filter.select(&index.pages);
    let mut writer = BufWriter::new(
        File::create(&output).with_context(|| format!("Failed to create {}", output.display()))?,
    );
    write_export(selected.iter().copied(), format, &mut writer)?;

    println!(
        "✓ Exported {} pages as {} to: {}",
        selected.len(),
        format,
        output.display()
    );
    Ok(())
}

/// Handles the analyze command
fn handle_analyze(index_path: &Path, limit: usize) -> Result<()> {
    let index = open_index(index_path)?;
    if index.pages.is_empty() {
        bail!("No pages in index");
    }

    println!("Analyzing {} pages...", index.pages.len());
    print_metrics(&CrawlMetrics::from_records(&index.pages));

    println!("\nSEO Analysis (first {} pages):\n", limit);
    for (i, page) in index.pages.iter().take(limit).enumerate() {
        let seo = analyze_page(page);
        let title = if page.title.is_empty() {
            "Untitled"
        } else {
            page.title.as_str()
        };
        println!("{}. {}", i + 1, title);
        println!("   Title length: {} {}", seo.title.length, check_mark(seo.title.optimal));
        println!(
            "   Description length: {} {}",
            seo.description.length,
            check_mark(seo.description.optimal)
        );
        println!("   Headings: {}, content length: {}", seo.headings, seo.content_length);
        println!("   Images without alt: {}\n", seo.images_without_alt);
    }

    println!("Site structure:");
    print_site_node(&build_site_structure(&index.pages), "/", 1);

    Ok(())
}

fn print_metrics(metrics: &CrawlMetrics) {
    println!("\nMetrics:");
    println!("  Average page size: {:.2} KB", metrics.average_page_size_kb);
    println!("  Average links:     {:.1}", metrics.average_links);
    println!("  Average images:    {:.1}", metrics.average_images);
}

fn print_site_node(node: &SiteNode, name: &str, level: usize) {
    let indent = "  ".repeat(level);
    match &node.page {
        Some(title) => println!("{}{} ({})", indent, name, title),
        None => println!("{}{}", indent, name),
    }
    for (segment, child) in &node.children {
        print_site_node(child, segment, level + 1);
    }
}

fn check_mark(ok: bool) -> &'static str {
    if ok {
        "✓"
    } else {
        "✗"
    }
}
