//! The generate module runs the whole pipeline for one root URL: discovery, resolution,
//! enrichment and rendering, keeping the run state current along the way.

use crate::Provider;
use crate::compose::{build_full, build_index};
use crate::config::ProviderConfig;
use crate::enrich::{EnrichContext, EnrichmentRecord, enrich, records_to_json};
use crate::error::{Error, Result};
use crate::fetch::Fetcher;
use crate::locate::locate_by_convention;
use crate::normalize::{RootUrl, normalize};
use crate::robots::resolve_from_robots;
use crate::sitemap::{resolve, retain_allowed};
use crate::state::{PROGRESS_LOCATED, PROGRESS_RESOLVED, PROGRESS_ROBOTS, RunState};
use crate::summarize::SummarizeContext;

/// Result of a completed run.
#[derive(Clone, Debug)]
pub struct Output {
    pub root: RootUrl,
    pub records: Vec<EnrichmentRecord>,
    /// Rendered llms.txt
    pub index: String,
    /// Rendered llms-full.txt
    pub full: String,
}

/// Options for [`generate`] that are not part of the provider configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct GenerateOptions {
    /// Let enrichment fall back to a raw fetch when extraction fails
    pub raw_fallback: bool,
}

/// Runs discovery and resolution only, leaving the resolved URLs in `state`.
///
/// # Errors
///
/// Returns `InvalidUrl`, `NoSitemapsFound` or `NoUrlsFound`; the message is also stored as the
/// run's error.
pub async fn discover(
    root_input: &str,
    fetcher: &Fetcher,
    state: &mut RunState,
) -> Result<(RootUrl, Vec<String>)> {
    state.begin();
    let discovered = discover_urls(root_input, fetcher, state).await;
    match discovered {
        Ok(discovered) => {
            state.loading = false;
            Ok(discovered)
        }
        Err(error) => {
            state.fail(error.to_string());
            Err(error)
        }
    }
}

/// Runs the whole pipeline for `root_input`.
///
/// `state` is reset first. Per-sitemap and per-URL failures are recorded in the trace and
/// skipped; a run where some pages could not be enriched still completes.
///
/// # Errors
///
/// Returns `Configuration` if no provider is usable or `summarize` does not talk to the
/// configured provider, and `InvalidUrl`, `NoSitemapsFound` or `NoUrlsFound` from discovery.
/// The message is also stored as the run's error.
pub async fn generate(
    root_input: &str,
    config: &ProviderConfig,
    options: GenerateOptions,
    fetcher: &Fetcher,
    summarize: &SummarizeContext<'_>,
    state: &mut RunState,
) -> Result<Output> {
    let (provider, _) = preflight(config, state)?;
    let output = run(root_input, provider, config, options, fetcher, summarize, state).await;
    if let Err(error) = &output {
        state.fail(error.to_string());
    }
    output
}

/// Resets `state` for a new run and checks that a summarization provider is usable.
///
/// A failure is stored as the run's error and recorded in the trace, so callers that need the
/// provider key before [`generate`] can run this first.
///
/// # Errors
///
/// Returns `Configuration` if no provider is selected or its key is blank.
pub fn preflight<'c>(
    config: &'c ProviderConfig,
    state: &mut RunState,
) -> Result<(Provider, &'c str)> {
    state.begin();
    config
        .validate()
        .inspect_err(|error| state.fail(error.to_string()))
}

async fn run(
    root_input: &str,
    provider: Provider,
    config: &ProviderConfig,
    options: GenerateOptions,
    fetcher: &Fetcher,
    summarize: &SummarizeContext<'_>,
    state: &mut RunState,
) -> Result<Output> {
    if provider != summarize.provider {
        return Err(Error::Configuration(format!(
            "{provider} is selected but the summarizer uses {}",
            summarize.provider
        )));
    }

    let (root, urls) = discover_urls(root_input, fetcher, state).await?;

    let records = enrich(
        &urls,
        &EnrichContext {
            fetcher,
            summarize,
            delay: config.delay,
            raw_fallback: options.raw_fallback,
        },
        state,
    )
    .await;

    if records.is_empty() {
        state.trace.warn("No pages could be summarized");
    }

    let output = Output {
        index: build_index(&records),
        full: build_full(&records),
        root,
        records,
    };
    state.finish(records_to_json(&output.records));
    Ok(output)
}

async fn discover_urls(
    root_input: &str,
    fetcher: &Fetcher,
    state: &mut RunState,
) -> Result<(RootUrl, Vec<String>)> {
    let root = normalize(root_input)?;
    state
        .trace
        .info(format!("Starting process for URL: {root}"));

    let mut sitemaps = resolve_from_robots(&root, fetcher, &mut state.trace).await;
    state.progress = PROGRESS_ROBOTS;

    if sitemaps.is_empty() {
        state
            .trace
            .info("No sitemaps found in robots.txt, trying common locations");
        sitemaps = locate_by_convention(&root, fetcher, &mut state.trace).await;
    }
    if sitemaps.is_empty() {
        return Err(Error::NoSitemapsFound);
    }
    state.progress = PROGRESS_LOCATED;

    let mut urls = Vec::new();
    for sitemap in &sitemaps {
        state.trace.info(format!("Processing sitemap: {sitemap}"));
        match resolve_sitemap(sitemap, fetcher, state).await {
            Ok(found) => {
                state
                    .trace
                    .info(format!("Found {} URLs in sitemap {sitemap}", found.len()));
                urls.extend(found);
            }
            Err(error) => state
                .trace
                .warn(format!("Error processing sitemap {sitemap}: {error}")),
        }
    }

    let urls = retain_allowed(urls);
    if urls.is_empty() {
        return Err(Error::NoUrlsFound);
    }

    state.urls.clone_from(&urls);
    state.progress = PROGRESS_RESOLVED;
    Ok((root, urls))
}

async fn resolve_sitemap(
    sitemap: &str,
    fetcher: &Fetcher,
    state: &mut RunState,
) -> Result<Vec<String>> {
    let content = fetcher.fetch_xml(sitemap, &mut state.trace).await?;
    resolve(&content, 0, fetcher, &mut state.trace).await
}
