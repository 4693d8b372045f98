//! The compose module renders enrichment records into llms.txt and llms-full.txt and writes
//! them to disk.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::enrich::EnrichmentRecord;

static ORIGIN_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^/]+").expect("Failed to compile ORIGIN_PREFIX regex"));

/// Whether `url` points at a site root: what follows the origin is at most one character.
fn is_homepage(url: &str) -> bool {
    ORIGIN_PREFIX.replace(url, "").chars().count() <= 1
}

fn hostname(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
        .unwrap_or_else(|| url.to_string())
}

fn pathname(url: &str) -> String {
    Url::parse(url)
        .map(|url| url.path().to_string())
        .unwrap_or_else(|_| url.to_string())
}

/// Renders the llms.txt index.
///
/// The homepage is the first record whose URL has nothing (or just `/`) after the origin, or
/// the first record if none does. Its host becomes the title and its summary the block quote;
/// every other record is listed under "Main Pages" in its original order. No records render as
/// an empty document.
pub fn build_index(records: &[EnrichmentRecord]) -> String {
    let home_index = records
        .iter()
        .position(|record| is_homepage(&record.url))
        .unwrap_or(0);
    let Some(homepage) = records.get(home_index) else {
        return String::new();
    };

    let pages = records
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != home_index)
        .map(|(_, record)| {
            format!(
                "- [{}]({}): {}",
                pathname(&record.url),
                record.url,
                record.summary
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "# {}\n\n> {}\n\n## Main Pages\n\n{pages}\n",
        hostname(&homepage.url),
        homepage.summary
    )
}

/// Renders llms-full.txt: every record's URL heading and full content, separated by rules.
pub fn build_full(records: &[EnrichmentRecord]) -> String {
    records
        .iter()
        .map(|record| format!("# {}\n\n{}\n\n---\n", record.url, record.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Writes `{hostname}-llms.txt` and `{hostname}-llms-full.txt` into `output_dir`.
///
/// # Arguments
///
/// * `output_dir` - Directory the files are written to; created if missing
/// * `hostname` - Prefix for both file names
/// * `index` - Rendered llms.txt
/// * `full` - Rendered llms-full.txt
///
/// # Returns
///
/// Returns the paths of the index and full-text files
///
/// # Errors
///
/// Returns an error if the directory or either file cannot be written
pub fn compose(
    output_dir: &Path,
    hostname: &str,
    index: &str,
    full: &str,
) -> Result<(PathBuf, PathBuf)> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let index_path = output_dir.join(format!("{hostname}-llms.txt"));
    let full_path = output_dir.join(format!("{hostname}-llms-full.txt"));

    write_file(&index_path, index)?;
    write_file(&full_path, full)?;

    info!(
        "Composed {} and {}",
        index_path.display(),
        full_path.display()
    );
    Ok((index_path, full_path))
}

/// Creates or truncates `path` and writes `content` to it.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or written.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
