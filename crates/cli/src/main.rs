// ABOUTME: CLI for one blog scrape-and-save cycle using the digests-blog library.
// ABOUTME: Reads flags/environment, initialises tracing, runs the scraper, and prints a summary report.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use digests_blog::options::{
    DEFAULT_API_BASE_URL, DEFAULT_LISTING_URL, DEFAULT_SOURCE_NAME, DEFAULT_USER_AGENT,
};
use digests_blog::{Client, JsonFileStore, SavedRun, SelectionPolicy, DEFAULT_OUTPUT_FILE};
use tracing::error;
use tracing_subscriber::EnvFilter;

const RULE_WIDTH: usize = 60;

/// Scrape the oldest articles from a blog listing page and save them as JSON.
#[derive(Parser, Debug)]
#[command(name = "digests-cli")]
#[command(about = "Scrape blog articles and save them as JSON", long_about = None)]
struct Args {
    /// Blog listing page URL.
    #[arg(long, env = "BLOG_URL", default_value = DEFAULT_LISTING_URL)]
    blog_url: String,

    /// Number of articles to keep.
    #[arg(long, env = "NUM_ARTICLES", default_value_t = 5)]
    num_articles: usize,

    /// User-Agent header sent with every request.
    #[arg(long, env = "USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Downstream API base URL (not called by this tool).
    #[arg(long, env = "API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    api_base_url: String,

    /// Output JSON file.
    #[arg(short = 'o', long, env = "SCRAPER_OUTPUT", default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Which end of the listing to keep: oldest (tail) or newest (head).
    #[arg(long, env = "SCRAPER_SELECTION", default_value = "oldest")]
    selection: SelectionPolicy,

    /// Pause between article fetches, in milliseconds.
    #[arg(long, env = "SCRAPER_DELAY_MS", default_value_t = 1000)]
    delay_ms: u64,

    /// Per-article fetch timeout, in seconds.
    #[arg(long, env = "SCRAPER_TIMEOUT_SECS", default_value_t = 15)]
    timeout_secs: u64,

    /// Maximum characters of content kept per article.
    #[arg(long, env = "SCRAPER_MAX_CONTENT", default_value_t = 15000)]
    max_content: usize,

    /// Maximum listing candidates examined.
    #[arg(long, env = "SCRAPER_CANDIDATES", default_value_t = 10)]
    candidates: usize,

    /// Source identifier stamped on every record.
    #[arg(long, env = "SCRAPER_SOURCE", default_value = DEFAULT_SOURCE_NAME)]
    source: String,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long = "log", env = "SCRAPER_LOG", default_value = "info")]
    log_filter: String,
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn build_client(args: &Args) -> Result<Client> {
    let client = Client::builder()
        .listing_url(&args.blog_url)
        .target_count(args.num_articles)
        .candidate_cap(args.candidates)
        .user_agent(&args.user_agent)
        .api_base_url(&args.api_base_url)
        .selection(args.selection)
        .request_delay(Duration::from_millis(args.delay_ms))
        .article_timeout(Duration::from_secs(args.timeout_secs))
        .max_content_len(args.max_content)
        .source_name(&args.source)
        .build()?;
    Ok(client)
}

fn print_report(run: &SavedRun, output: &Path) {
    let records = &run.records;
    println!();
    println!("Scraped {} articles", records.len());
    if run.saved {
        println!("Saved to {}", output.display());
    }
    println!();
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("Scraped Articles:");
    println!("{}", "=".repeat(RULE_WIDTH));
    for (i, record) in records.iter().enumerate() {
        println!();
        println!("{}. {}", i + 1, record.title);
        println!("   URL: {}", record.url);
        println!("   Content length: {} chars", record.content_chars());
    }
}

fn run(args: &Args) -> Result<()> {
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("Blog Scraper");
    println!("{}", "=".repeat(RULE_WIDTH));
    println!();
    println!("Fetching blog page {} ...", args.blog_url);

    let client = build_client(args)?;
    let store = JsonFileStore::new(&args.output);
    let run = client.scrape_and_save(&store);

    print_report(&run, &args.output);
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_tracing(&args.log_filter);

    if let Err(err) = run(&args) {
        error!(error = %err, "scrape failed");
        println!("Error scraping blog: {}", err);
    }
}
