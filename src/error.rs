//! Error taxonomy shared by every stage of a run.

use thiserror::Error;

/// Failures raised while discovering, resolving or enriching a site.
///
/// Which of these abort a run is decided by the caller: `InvalidUrl`, `Configuration`,
/// `NoSitemapsFound` and `NoUrlsFound` are always fatal, the rest are normally logged to the
/// run trace and the offending branch or URL is skipped.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid URL format: {0}")]
    InvalidUrl(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Request failed: {0}")]
    Network(String),

    #[error("Invalid XML response: {0}")]
    InvalidXml(String),

    #[error("Failed to parse sitemap XML: {0}")]
    SitemapParse(String),

    #[error(
        "No sitemaps found. Please check if the website has a sitemap or try a different URL."
    )]
    NoSitemapsFound,

    #[error("No URLs found in sitemaps")]
    NoUrlsFound,

    #[error("Content extraction failed: {0}")]
    Extraction(String),

    #[error("Summarization provider error: {0}")]
    Provider(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Self::Network(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
