//! Shelf-Crawler main entry point
//!
//! This is the command-line interface for the Shelf-Crawler product harvester.

use clap::Parser;
use shelf_crawler::config::{load_config_with_hash, Config};
use shelf_crawler::crawler::crawl;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Shelf-Crawler: a single-site product page harvester
///
/// Shelf-Crawler follows links within one website, recognises product pages,
/// and stores their title, SKU, price and attributes in SQLite. Without a
/// configuration file it crawls the built-in default site.
#[derive(Parser, Debug)]
#[command(name = "shelf-crawler")]
#[command(version)]
#[command(about = "A single-site product page harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long, conflicts_with_all = ["stats", "lookup"])]
    dry_run: bool,

    /// Show statistics from the database and exit
    #[arg(long, conflicts_with_all = ["dry_run", "lookup"])]
    stats: bool,

    /// Print the most recently stored product for a SKU and exit
    #[arg(long, value_name = "SKU", conflicts_with_all = ["dry_run", "stats"])]
    lookup: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => load_configuration(path)?,
        None => {
            tracing::info!("No configuration file given, using built-in defaults");
            Config::default()
        }
    };

    // Handle different modes
    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config)?;
    } else if let Some(sku) = &cli.lookup {
        handle_lookup(&config, sku)?;
    } else {
        handle_crawl(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("shelf_crawler=info,warn"),
            1 => EnvFilter::new("shelf_crawler=debug,info"),
            2 => EnvFilter::new("shelf_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads and validates the configuration file
fn load_configuration(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    tracing::info!("Loading configuration from: {}", path.display());
    match load_config_with_hash(path) {
        Ok((config, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Ok(config)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            Err(e.into())
        }
    }
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Shelf-Crawler Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Seed URL: {}", config.crawler.seed_url);
    println!("  Allowed domain: {}", config.crawler.allowed_domain);
    println!("  Max pages: {}", config.crawler.max_pages);
    println!("  Ceiling mode: {:?}", config.crawler.ceiling_mode);
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);

    println!("\nSkip Patterns ({}):", config.crawler.skip_patterns.len());
    for pattern in &config.crawler.skip_patterns {
        println!("  - {}", pattern);
    }

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);

    println!("\nOutput:");
    println!("  Database: {}", config.output.database_path);

    println!("\n✓ Configuration is valid");
    println!("✓ Would start crawling from {}", config.crawler.seed_url);
}

/// Handles the --stats mode: shows statistics from the database
fn handle_stats(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    use shelf_crawler::output::{load_statistics, print_statistics};
    use shelf_crawler::storage::SqliteStorage;

    println!("Database: {}\n", config.output.database_path);

    let storage = SqliteStorage::open_existing(Path::new(&config.output.database_path))?;
    let stats = load_statistics(&storage)?;
    print_statistics(&stats);

    Ok(())
}

/// Handles the --lookup mode: prints the stored product for a SKU
fn handle_lookup(config: &Config, sku: &str) -> Result<(), Box<dyn std::error::Error>> {
    use shelf_crawler::output::format_record_line;
    use shelf_crawler::storage::{GatewayError, ProductGateway, SqliteStorage};

    let storage = SqliteStorage::open_existing(Path::new(&config.output.database_path))?;
    let gateway = ProductGateway::new(storage);

    match gateway.get(sku) {
        Ok(record) => {
            println!("{}", format_record_line(&record));
            Ok(())
        }
        Err(GatewayError::NotFound(_)) => {
            println!("No product stored for SKU {}", sku);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Lookup failed: {}", e);
            Err(e.into())
        }
    }
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    use shelf_crawler::output::{print_records, print_report};

    match crawl(config).await {
        Ok(report) => {
            print_records(&report.records);
            print_report(&report);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
