//! llmstxt is a CLI tool that finds a website's sitemaps, summarizes every page with an LLM
//! and composes the results into llms.txt and llms-full.txt files for AI crawlers.
//!
//! The tool has two commands:
//! 1. `generate` - Discovers, summarizes and writes both files for a site
//! 2. `discover` - Prints the page URLs the site's sitemaps resolve to

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Builder;
use log::{LevelFilter, debug, info, warn};
use scraper::Selector as ScraperSelector;
use url::Url;

use llmstxt::compose::{compose, write_file};
use llmstxt::constants::{
    DEFAULT_EXTRACTOR_URL, EXTRACTOR_API_KEY_ENV_NAME, GROQ_API_KEY_ENV_NAME,
    HYPERBOLIC_API_KEY_ENV_NAME,
};
use llmstxt::summarize::{SummarizeContext, build_model};
use llmstxt::{
    Fetcher, FetcherConfig, GenerateOptions, Provider, ProviderConfig, RunState, TextBy, discover,
    generate, preflight,
};

/// A CLI tool to build llms.txt from a website's sitemaps
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The command to execute (generate or discover)
    #[command(subcommand)]
    command: Command,

    #[arg(long, short, action = clap::ArgAction::Count, help = "Output v(v...)erbosity: error (0), warn (1), info (2), debug (3), trace (4)", global = true, default_value_t = 2)]
    verbose: u8,

    /// Base URL of the content-extraction service
    #[arg(long, global = true, default_value = DEFAULT_EXTRACTOR_URL)]
    extractor_url: String,

    /// Path to write the timestamped debug trace to
    #[arg(long, global = true)]
    trace_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Discover, summarize and compose llms.txt and llms-full.txt for a website
    Generate {
        /// The website to process, with or without scheme
        url: String,
        /// Summarization provider: "hyperbolic" (default) or "groq"
        #[arg(long, default_value = "hyperbolic")]
        provider: Provider,
        /// Delay after each summarized page in milliseconds (rate limiting)
        #[arg(long, short, default_value_t = 1000)]
        delay: u64,
        /// Directory to write the composed files to
        #[arg(long, short, default_value = ".")]
        out_dir: PathBuf,
        /// Path to the file with a prompt template
        #[arg(long, short = 'p')]
        prompt_file: Option<String>,
        /// Fall back to fetching the page directly when content extraction fails
        #[arg(long)]
        raw_fallback: bool,
        /// Text extraction method for direct fetches: "dom_smoothie" (default) or "fast_html2md"
        #[arg(long, default_value = "dom_smoothie")]
        text_by: TextBy,
        /// CSS selector to limit the HTML subset from which content is extracted (optional)
        #[arg(long, short)]
        selector: Option<String>,
        /// Path to write the summaries as JSON to
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Print the page URLs a website's sitemaps resolve to
    Discover {
        /// The website to process, with or without scheme
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Error,
            1 => LevelFilter::Warn,
            2 => LevelFilter::Info,
            3 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .init();

    let extractor_url = Url::parse(&cli.extractor_url)
        .map_err(|e| anyhow::anyhow!("Invalid extractor URL: {}", e))?;
    let extractor_key = env_key(EXTRACTOR_API_KEY_ENV_NAME);
    let mut state = RunState::default();

    let result = match cli.command {
        Command::Generate {
            url,
            provider,
            delay,
            out_dir,
            prompt_file,
            raw_fallback,
            text_by,
            selector,
            json,
        } => {
            let fetcher = build_fetcher(extractor_url, extractor_key.clone(), text_by, selector)?;
            let run = GenerateRun {
                extractor_key,
                provider,
                delay,
                out_dir,
                prompt_file,
                raw_fallback,
                json,
            };
            handle_generate_command(&url, run, &fetcher, &mut state).await
        }
        Command::Discover { url } => {
            let fetcher = build_fetcher(extractor_url, extractor_key, TextBy::default(), None)?;
            handle_discover_command(&url, &fetcher, &mut state).await
        }
    };

    if let Some(trace_file) = cli.trace_file {
        write_file(&trace_file, &state.trace.to_string())?;
        info!("Wrote debug trace to {}", trace_file.display());
    }

    result
}

fn build_fetcher(
    extractor_url: Url,
    extractor_key: Option<String>,
    text_by: TextBy,
    selector_query: Option<String>,
) -> Result<Fetcher> {
    let selector = match selector_query {
        Some(selector_query) => Some(
            ScraperSelector::parse(&selector_query)
                .map_err(|e| anyhow::anyhow!("Invalid CSS selector: {}", e))?,
        ),
        None => None,
    };

    Ok(Fetcher::new(FetcherConfig {
        extractor_url,
        extractor_key,
        text_by,
        selector,
    })?)
}

fn env_key(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(key) if !key.trim().is_empty() => Some(key),
        Ok(_) => None,
        Err(err) => {
            debug!("{err} while reading {name}");
            None
        }
    }
}

struct GenerateRun {
    extractor_key: Option<String>,
    provider: Provider,
    delay: u64,
    out_dir: PathBuf,
    prompt_file: Option<String>,
    raw_fallback: bool,
    json: Option<PathBuf>,
}

async fn handle_generate_command(
    url: &str,
    run: GenerateRun,
    fetcher: &Fetcher,
    state: &mut RunState,
) -> Result<()> {
    let mut config = ProviderConfig::new(Duration::from_millis(run.delay));
    config.extractor_key = run.extractor_key;
    let key_env_name = match run.provider {
        Provider::Hyperbolic => HYPERBOLIC_API_KEY_ENV_NAME,
        Provider::Groq => GROQ_API_KEY_ENV_NAME,
    };
    if let Some(key) = env_key(key_env_name) {
        config.select(run.provider, key);
    }

    let (provider, api_key) = preflight(&config, state)
        .with_context(|| format!("Set {key_env_name} to use {}", run.provider))?;
    let model = build_model(provider, api_key)?;

    let prompt_template = match run.prompt_file {
        Some(file) => {
            let content =
                fs::read_to_string(&file).context(format!("Failed to read prompt file: {file}"))?;
            Some(content)
        }
        None => None,
    };

    let summarize = SummarizeContext {
        provider,
        model: model.as_ref(),
        prompt_template: prompt_template.as_deref(),
    };
    let options = GenerateOptions {
        raw_fallback: run.raw_fallback,
    };

    let output = generate(url, &config, options, fetcher, &summarize, state).await?;

    if output.records.len() < state.urls.len() {
        warn!(
            "Summarized {}/{} pages; see the debug trace for the rest",
            output.records.len(),
            state.urls.len()
        );
    }

    compose(
        &run.out_dir,
        output.root.hostname(),
        &output.index,
        &output.full,
    )?;

    if let (Some(json_path), Some(result)) = (run.json, state.result.as_deref()) {
        write_file(&json_path, result)?;
        info!("Wrote summaries to {}", json_path.display());
    }

    Ok(())
}

async fn handle_discover_command(
    url: &str,
    fetcher: &Fetcher,
    state: &mut RunState,
) -> Result<()> {
    let (root, urls) = discover(url, fetcher, state).await?;
    info!("Resolved {} URLs for {root}", urls.len());
    for url in urls {
        println!("{url}");
    }
    Ok(())
}
