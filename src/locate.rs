//! Fallback sitemap discovery by probing conventional paths.

use crate::constants::CONVENTIONAL_SITEMAP_PATHS;
use crate::fetch::{Fetcher, RawResponse};
use crate::normalize::RootUrl;
use crate::state::Trace;

/// Conventional sitemap locations under `root`, in probe order.
pub fn conventional_sitemap_urls(root: &RootUrl) -> Vec<String> {
    CONVENTIONAL_SITEMAP_PATHS
        .iter()
        .map(|path| root.with_path(&path.replace("{hostname}", root.hostname())))
        .collect()
}

/// Cheap pre-parse check for sitemap-shaped content. Case-sensitive.
pub fn looks_like_sitemap(body: &str) -> bool {
    body.contains("<sitemapindex") || body.contains("<urlset")
}

/// Probes the conventional locations in order and returns the first one whose body looks like
/// a sitemap. Probing stops at the first hit, so at most one location is returned.
pub async fn locate_by_convention(
    root: &RootUrl,
    fetcher: &Fetcher,
    trace: &mut Trace,
) -> Vec<String> {
    for candidate in conventional_sitemap_urls(root) {
        trace.debug(format!("Trying sitemap at: {candidate}"));

        let response = fetcher
            .fetch_raw(&candidate, trace)
            .await
            .and_then(RawResponse::ensure_success);

        match response {
            Ok(response) if looks_like_sitemap(&response.body) => {
                trace.info(format!("Found valid sitemap at {candidate}"));
                return vec![candidate];
            }
            Ok(_) => trace.debug(format!("No sitemap content at {candidate}")),
            Err(error) => {
                trace.debug(format!("Failed to fetch sitemap at {candidate}: {error}"));
            }
        }
    }

    Vec::new()
}
