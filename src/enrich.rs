//! The enrich module fetches content for every resolved URL and attaches a summary to it.

use std::time::Duration;

use serde_json::{Value, json};

use crate::Provider;
use crate::error::Result;
use crate::fetch::{FetchMode, Fetcher};
use crate::state::RunState;
use crate::summarize::{SummarizeContext, summarize_page};

/// A successfully enriched page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnrichmentRecord {
    pub url: String,
    pub summary: String,
    pub content: String,
    pub provider: Provider,
}

impl EnrichmentRecord {
    pub fn to_json(&self) -> Value {
        json!({
            "url": self.url,
            "summary": self.summary,
            "fullContent": self.content,
            "provider": self.provider.as_str(),
        })
    }
}

/// Serializes records as a pretty JSON array, in order.
pub fn records_to_json(records: &[EnrichmentRecord]) -> String {
    let records: Vec<Value> = records.iter().map(EnrichmentRecord::to_json).collect();
    serde_json::to_string_pretty(&records).unwrap_or_else(|_| "[]".to_string())
}

/// Collaborators and pacing for the enrichment pass.
pub struct EnrichContext<'a> {
    pub fetcher: &'a Fetcher,
    pub summarize: &'a SummarizeContext<'a>,
    /// Pause after each enriched URL
    pub delay: Duration,
    /// Fall back to a raw fetch when the extraction provider fails, instead of skipping
    pub raw_fallback: bool,
}

/// Enriches `urls` strictly one after another, in order.
///
/// A URL whose content or summary cannot be obtained is recorded in the trace and left out;
/// it is never retried. After each success the URL is marked processed, progress advances
/// and the configured delay is awaited.
pub async fn enrich(
    urls: &[String],
    ctx: &EnrichContext<'_>,
    state: &mut RunState,
) -> Vec<EnrichmentRecord> {
    let mut records = Vec::new();

    for url in urls {
        match enrich_url(url, ctx, state).await {
            Ok(record) => {
                records.push(record);
                state.mark_processed(url, urls.len());
                state.trace.debug(format!("Summarized page: {url}"));

                if !ctx.delay.is_zero() {
                    tokio::time::sleep(ctx.delay).await;
                }
            }
            Err(error) => state
                .trace
                .warn(format!("Error processing {url}: {error}")),
        }
    }

    state.trace.info(format!(
        "Summarized {}/{} pages",
        records.len(),
        urls.len()
    ));
    records
}

async fn enrich_url(
    url: &str,
    ctx: &EnrichContext<'_>,
    state: &mut RunState,
) -> Result<EnrichmentRecord> {
    let content = if ctx.raw_fallback {
        ctx.fetcher
            .fetch(url, FetchMode::Extract, &mut state.trace)
            .await?
    } else {
        ctx.fetcher.extract(url, &mut state.trace).await?
    };

    let summary = summarize_page(url, &content, ctx.summarize).await?;

    Ok(EnrichmentRecord {
        url: url.to_string(),
        summary,
        content,
        provider: ctx.summarize.provider,
    })
}
