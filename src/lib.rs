//! The llmstxt library discovers a website's sitemaps, resolves them into page URLs,
//! summarizes every page with an LLM provider and composes the results into llms.txt and
//! llms-full.txt files for AI crawlers.

pub mod compose;
pub mod config;
pub mod constants;
pub mod enrich;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod generate;
pub mod locate;
pub mod normalize;
pub mod robots;
pub mod sitemap;
pub mod state;
pub mod summarize;

use std::fmt;

/// Enum representing the local text extraction method.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum TextBy {
    /// Use dom_smoothie for text extraction
    #[default]
    DomSmoothie,
    /// Use fast_html2md for text extraction
    FastHtml2Md,
}

impl std::str::FromStr for TextBy {
    type Err = String;

    fn from_str(input: &str) -> std::result::Result<Self, Self::Err> {
        match input.to_lowercase().as_str() {
            "dom_smoothie" => Ok(TextBy::DomSmoothie),
            "fast_html2md" => Ok(TextBy::FastHtml2Md),
            _ => Err(format!("Invalid text extraction method: {}", input)),
        }
    }
}

/// Enum representing the summarization provider used for a run.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Provider {
    /// Hyperbolic's OpenAI-compatible chat completions API
    #[default]
    Hyperbolic,
    /// Groq chat completions API
    Groq,
}

impl Provider {
    pub fn as_str(self) -> &'static str {
        match self {
            Provider::Hyperbolic => "hyperbolic",
            Provider::Groq => "groq",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl std::str::FromStr for Provider {
    type Err = String;

    fn from_str(input: &str) -> std::result::Result<Self, Self::Err> {
        match input.to_lowercase().as_str() {
            "hyperbolic" => Ok(Provider::Hyperbolic),
            "groq" => Ok(Provider::Groq),
            _ => Err(format!("Invalid summarization provider: {}", input)),
        }
    }
}

pub use compose::{build_full, build_index};
pub use config::ProviderConfig;
pub use enrich::{EnrichmentRecord, enrich};
pub use error::{Error, Result};
pub use fetch::{FetchMode, Fetcher, FetcherConfig};
pub use generate::{GenerateOptions, Output, discover, generate, preflight};
pub use normalize::{RootUrl, normalize};
pub use state::RunState;
pub use summarize::summarize_page;
