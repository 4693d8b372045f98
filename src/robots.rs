//! Sitemap discovery through robots.txt.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::fetch::{Fetcher, RawResponse};
use crate::normalize::RootUrl;
use crate::state::Trace;

static DIRECTIVE_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":\s+").expect("Failed to compile directive separator regex"));

/// Fetches `{origin}/robots.txt` and returns the sitemap locations it declares.
///
/// Never fails: an unreachable or non-2xx robots.txt, or one that is not recognizably a
/// robots file, yields an empty list and a trace entry.
pub async fn resolve_from_robots(
    root: &RootUrl,
    fetcher: &Fetcher,
    trace: &mut Trace,
) -> Vec<String> {
    let robots_url = match root.robots_txt() {
        Ok(robots_url) => robots_url,
        Err(error) => {
            trace.warn(format!("Failed to build robots.txt URL: {error}"));
            return Vec::new();
        }
    };
    trace.info(format!("Fetching robots.txt from: {robots_url}"));

    let body = match fetcher
        .fetch_raw(robots_url.as_str(), trace)
        .await
        .and_then(RawResponse::ensure_success)
    {
        Ok(response) => response.body,
        Err(error) => {
            trace.warn(format!("Failed to fetch robots.txt: {error}"));
            return Vec::new();
        }
    };
    trace.debug(format!("Retrieved robots.txt: {} bytes", body.len()));

    let sitemaps = extract_sitemap_urls(&body);
    if sitemaps.is_empty() && !is_robots_txt(&body) {
        trace.warn("Failed to parse robots.txt: Invalid robots.txt format");
    } else {
        trace.info(format!("Found {} sitemaps in robots.txt", sitemaps.len()));
    }
    sitemaps
}

/// Whether `body` looks like a robots.txt file at all.
pub fn is_robots_txt(body: &str) -> bool {
    body.to_lowercase().contains("user-agent")
}

/// Extracts `Sitemap:` locations from a robots.txt body, in file order.
///
/// Bodies without any `user-agent` token are rejected as a whole. The directive name is
/// matched case-insensitively, the value is whatever follows the first colon-plus-whitespace,
/// and values that are not absolute URLs are dropped.
pub fn extract_sitemap_urls(body: &str) -> Vec<String> {
    if !is_robots_txt(body) {
        return Vec::new();
    }

    body.lines()
        .filter(|line| line.trim().to_lowercase().starts_with("sitemap:"))
        .filter_map(|line| DIRECTIVE_SEPARATOR.splitn(line, 2).nth(1))
        .map(str::trim)
        .filter(|candidate| Url::parse(candidate).is_ok())
        .map(str::to_string)
        .collect()
}
