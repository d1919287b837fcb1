// src/report/csv.rs
// =============================================================================
// Writes the flat list of files as CSV.
//
// Format:
//   Filename,URL,Size,Last Modified
//   readme.txt,https://example.com/pub/readme.txt,1.2K,2024-01-01
//   a.md,https://example.com/pub/docs/a.md,,
//
// - One row per file, in crawl order
// - Missing size/date are empty fields
// - The csv crate quotes any field containing a comma, quote or newline
// - The header is always written, even when no files were found
// =============================================================================

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::listing::Entry;

pub const CSV_HEADER: [&str; 4] = ["Filename", "URL", "Size", "Last Modified"];

/// Derives the output filename from the root URL
///
/// Example: "https://example.com/pub/" -> "example.com_pub_.csv"
///
/// Two URLs that only differ in their scheme, or in '/' vs '_', end up with
/// the same filename.
pub fn csv_filename_for(root_url: &str) -> PathBuf {
    let trimmed = root_url.trim();
    let without_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);

    let flattened: String = without_scheme
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();

    PathBuf::from(format!("{}.csv", flattened))
}

/// Writes the header and one row per file to any writer
pub fn write_csv_to<W: Write>(writer: W, files: &[Entry]) -> Result<(), ::csv::Error> {
    let mut writer = ::csv::Writer::from_writer(writer);
    writer.write_record(CSV_HEADER)?;

    for file in files {
        writer.write_record([
            file.name.as_str(),
            file.url.as_str(),
            file.size.as_deref().unwrap_or(""),
            file.last_modified.as_deref().unwrap_or(""),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Creates (or truncates) `path` and writes the CSV into it
pub fn write_csv(path: &Path, files: &[Entry]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create CSV file {}", path.display()))?;

    write_csv_to(file, files)
        .with_context(|| format!("failed to write CSV file {}", path.display()))?;

    Ok(())
}
