//! Sitemap parsing and recursive resolution into a flat list of page URLs.

use std::collections::HashSet;

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::constants::{MAX_SITEMAP_DEPTH, URL_BLOCKLIST_TOKEN};
use crate::error::{Error, Result};
use crate::fetch::Fetcher;
use crate::state::Trace;

/// A parsed sitemap document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SitemapDocument {
    /// `<sitemapindex>`: child sitemap locations, in document order.
    Index(Vec<String>),
    /// `<urlset>`: page locations, in document order.
    Leaf(Vec<String>),
    /// Well-formed XML of any other shape. Contributes no URLs.
    Unrecognized,
}

impl SitemapDocument {
    fn from_root(root: &str, locs: Vec<String>) -> Self {
        match root {
            "sitemapindex" => Self::Index(locs),
            "urlset" => Self::Leaf(locs),
            _ => Self::Unrecognized,
        }
    }
}

/// Parses sitemap content into a [`SitemapDocument`].
///
/// Tag names are compared lowercased. Only the first non-empty `loc` of each `sitemap`/`url`
/// entry is kept; entries with a missing or empty `loc` are skipped.
///
/// # Errors
///
/// Returns `SitemapParse` if the content does not start like XML or is not well-formed.
pub fn parse_sitemap(content: &str) -> Result<SitemapDocument> {
    let trimmed = content.trim_start_matches('\u{feff}').trim();
    if !trimmed.starts_with("<?xml") && !trimmed.starts_with('<') {
        return Err(Error::SitemapParse("Invalid XML format".to_string()));
    }

    scan(trimmed).map_err(Error::SitemapParse)
}

/// Checks that `content` is well-formed XML with a root element.
///
/// # Errors
///
/// Returns `InvalidXml` describing the first problem found.
pub fn validate_xml(content: &str) -> Result<()> {
    scan(content.trim_start_matches('\u{feff}').trim()).map(|_| ()).map_err(Error::InvalidXml)
}

fn scan(content: &str) -> std::result::Result<SitemapDocument, String> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut root: Option<String> = None;
    let mut stack: Vec<String> = Vec::new();
    let mut locs = Vec::new();
    let mut current_loc: Option<String> = None;
    let mut entry_has_loc = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let name = lowercase_name(e.name().as_ref());
                if root.is_none() {
                    root = Some(name.clone());
                }
                stack.push(name);
                if is_entry_path(&stack) {
                    entry_has_loc = false;
                } else if is_loc_path(&stack) {
                    current_loc = Some(String::new());
                }
            }
            Ok(Event::Empty(ref e)) => {
                if root.is_none() {
                    root = Some(lowercase_name(e.name().as_ref()));
                }
            }
            Ok(Event::Text(ref text)) => {
                if let Some(loc) = current_loc.as_mut() {
                    let text = text.unescape().map_err(|e| e.to_string())?;
                    loc.push_str(&text);
                }
            }
            Ok(Event::CData(ref cdata)) => {
                if let Some(loc) = current_loc.as_mut() {
                    loc.push_str(&String::from_utf8_lossy(cdata));
                }
            }
            Ok(Event::End(_)) => {
                if is_loc_path(&stack)
                    && let Some(loc) = current_loc.take()
                {
                    let loc = loc.trim();
                    if !loc.is_empty() && !entry_has_loc {
                        locs.push(loc.to_string());
                        entry_has_loc = true;
                    }
                }
                stack.pop();
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(format!(
                    "XML parsing error at position {}: {e}",
                    reader.buffer_position()
                ));
            }
        }
    }

    if let Some(open) = stack.last() {
        return Err(format!("unclosed element <{open}>"));
    }

    match root {
        Some(root) => Ok(SitemapDocument::from_root(&root, locs)),
        None => Err("no root element".to_string()),
    }
}

fn lowercase_name(name: &[u8]) -> String {
    String::from_utf8_lossy(name).to_lowercase()
}

fn is_entry(root: &str, entry: &str) -> bool {
    (root == "sitemapindex" && entry == "sitemap") || (root == "urlset" && entry == "url")
}

/// `<sitemapindex><sitemap>` or `<urlset><url>`.
fn is_entry_path(stack: &[String]) -> bool {
    matches!(stack, [root, entry] if is_entry(root, entry))
}

/// `<sitemapindex><sitemap><loc>` or `<urlset><url><loc>`.
fn is_loc_path(stack: &[String]) -> bool {
    matches!(stack, [root, entry, loc] if loc == "loc" && is_entry(root, entry))
}

/// Recursively expands sitemap `content` into a flat, deduplicated list of page URLs.
///
/// `depth` is the nesting level of `content` itself; the root sitemap is at depth 0. Child
/// sitemaps of an index are fetched in raw mode and validated as XML, then expanded depth-first
/// in document order. A child deeper than [`MAX_SITEMAP_DEPTH`] is not fetched and contributes
/// nothing, so cyclic indexes terminate. A child that fails to fetch or parse is recorded in
/// the trace and skipped without affecting its siblings. URLs containing the blocklist token
/// are dropped.
///
/// # Errors
///
/// Returns `SitemapParse` if `content` itself is malformed. Failures in child sitemaps are
/// never returned.
pub async fn resolve(
    content: &str,
    depth: usize,
    fetcher: &Fetcher,
    trace: &mut Trace,
) -> Result<Vec<String>> {
    if depth > MAX_SITEMAP_DEPTH {
        trace.warn("Maximum sitemap depth reached");
        return Ok(Vec::new());
    }

    let mut urls = Vec::new();
    let mut pending: Vec<(String, usize)> = Vec::new();
    expand(parse_sitemap(content)?, depth, &mut urls, &mut pending);

    while let Some((sitemap_url, sitemap_depth)) = pending.pop() {
        if sitemap_depth > MAX_SITEMAP_DEPTH {
            trace.warn(format!(
                "Maximum sitemap depth reached, skipping sub-sitemap {sitemap_url}"
            ));
            continue;
        }

        let document = fetcher
            .fetch_xml(&sitemap_url, trace)
            .await
            .and_then(|sub_content| parse_sitemap(&sub_content));

        match document {
            Ok(document) => expand(document, sitemap_depth, &mut urls, &mut pending),
            Err(error) => {
                trace.warn(format!("Failed to fetch sub-sitemap {sitemap_url}: {error}"));
            }
        }
    }

    Ok(retain_allowed(urls))
}

/// Leaf locations go straight to `urls`; index children are queued so that popping the stack
/// visits them in document order.
fn expand(
    document: SitemapDocument,
    depth: usize,
    urls: &mut Vec<String>,
    pending: &mut Vec<(String, usize)>,
) {
    match document {
        SitemapDocument::Index(children) => {
            pending.extend(
                children
                    .into_iter()
                    .rev()
                    .map(|child| (child, depth.saturating_add(1))),
            );
        }
        SitemapDocument::Leaf(locs) => urls.extend(locs),
        SitemapDocument::Unrecognized => {}
    }
}

/// Drops blocklisted URLs and duplicates, keeping first-seen order.
pub fn retain_allowed<I>(urls: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    urls.into_iter()
        .filter(|url| !url.is_empty() && !url.contains(URL_BLOCKLIST_TOKEN))
        .filter(|url| seen.insert(url.clone()))
        .collect()
}
