// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr) and the HTTP client
// 3. Crawl the directory listing tree
// 4. Print the tree (or JSON), then write the CSV if asked to
// 5. Exit with proper code (0 = done, 1 = error)
//
// Rust concepts used:
// - async/await: reqwest is async, but we run on a single-threaded runtime
//   and only ever await one request at a time
// - Result<T, E>: For error handling (T = success type, E = error type)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;           // src/cli.rs - command-line parsing
mod crawl;         // src/crawl/ - the listing walk
mod fetch;         // src/fetch/ - HTTP access
mod listing;       // src/listing/ - parsing listing pages into entries
mod logging;       // src/logging.rs - tracing setup
mod report;        // src/report/ - tree, CSV and JSON output

use clap::Parser;  // Parser trait enables the parse() method
use cli::Cli;

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator
use anyhow::{Context, Result};
use tracing::warn;

// current_thread: one thread is all a strictly sequential crawl needs
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            // {:#} prints the whole error chain: "context: cause: cause"
            eprintln!("Error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
//
// Errors that end up here are fatal: an invalid --url, an HTTP client that
// can't be built, or a CSV file that can't be written. A listing page that
// fails to load is NOT an error at this level, it shows up in the tree.
async fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.color());

    let settings = cli.fetch_settings();
    if !settings.verify_tls {
        warn!("TLS certificate verification is disabled; pass --verify-tls to enable it");
    }

    let fetcher = fetch::Fetcher::new(&settings).context("could not set up the HTTP client")?;
    let extractor = listing::AutoIndexExtractor::new();

    let outcome = crawl::crawl(&cli.url, &fetcher, &extractor, &cli.crawl_config()).await?;

    if cli.json {
        println!("{}", report::render_json(&outcome)?);
    } else {
        print!("{}", report::render_tree(&outcome, cli.color()));
        println!();
        print!("{}", report::render_summary(&outcome));
    }

    // The tree is already on screen, so a CSV failure only loses the CSV
    if let Some(path) = cli.csv_target() {
        report::write_csv(&path, &outcome.files)?;
        if !cli.json {
            println!("💾 CSV file created: {}", path.display());
        }
    }

    Ok(())
}
