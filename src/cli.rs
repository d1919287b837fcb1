// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// The parsed Cli is turned into two plain settings structs:
// - FetchSettings: how the HTTP client behaves
// - CrawlConfig: how the walk behaves
// so the rest of the program never sees clap types.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};

use crate::crawl::CrawlConfig;
use crate::fetch::FetchSettings;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "listing-tree",
    version,
    about = "Walks web server directory listings and prints every file they contain",
    long_about = "listing-tree fetches an auto-generated directory index (Apache, nginx, \
                  lighttpd, Python http.server, ...), follows every subdirectory below it \
                  and prints the result as a tree. With --csv the files are also saved \
                  as a CSV with their URL, size and last-modified date."
)]
pub struct Cli {
    /// Directory listing URL to start from
    ///
    /// Example: --url https://example.com/pub/
    #[arg(long)]
    pub url: String,

    /// Also save the files to a CSV file
    ///
    /// The file name is derived from the URL
    /// (https://example.com/pub/ -> example.com_pub_.csv)
    #[arg(long)]
    pub csv: bool,

    /// Write the CSV here instead of the derived file name (implies --csv)
    #[arg(long, value_name = "PATH")]
    pub csv_path: Option<PathBuf>,

    /// Print the result as JSON instead of a tree
    #[arg(long)]
    pub json: bool,

    /// Validate TLS certificates
    ///
    /// Off by default so self-signed listing servers work.
    #[arg(long)]
    pub verify_tls: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10, value_name = "SECONDS")]
    pub timeout: u64,

    /// Don't fetch directories deeper than this (the root is depth 0)
    #[arg(long, value_name = "DEPTH")]
    pub max_depth: Option<usize>,

    /// List directories before files, sorted by name, instead of page order
    #[arg(long)]
    pub dirs_first: bool,

    /// HEAD each file the listing shows no size or date for
    #[arg(long)]
    pub probe: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            timeout: Duration::from_secs(self.timeout),
            verify_tls: self.verify_tls,
            ..FetchSettings::default()
        }
    }

    pub fn crawl_config(&self) -> CrawlConfig {
        CrawlConfig {
            max_depth: self.max_depth,
            dirs_first: self.dirs_first,
            probe_files: self.probe,
        }
    }

    /// Colors for the tree and the log lines on stderr
    pub fn color(&self) -> bool {
        !self.no_color
    }

    /// Where the CSV should go, or None when no CSV was asked for
    pub fn csv_target(&self) -> Option<PathBuf> {
        match &self.csv_path {
            Some(path) => Some(path.clone()),
            None if self.csv => Some(crate::report::csv_filename_for(&self.url)),
            None => None,
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why no subcommands?
//    - The tool does one thing, so flags on the top-level command are enough
//    - `--url` is a flag rather than a positional argument, so scripts
//      can pass the options in any order
//
// 2. What is ArgAction::Count?
//    - Counts how many times a flag appears
//    - `-vv` gives verbose = 2
//
// 3. Why Option<usize> for max_depth?
//    - None means "no limit"
//    - clap leaves it None when the flag isn't given
// -----------------------------------------------------------------------------
