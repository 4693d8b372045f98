//! The fetch module retrieves text for arbitrary URLs, either through the content-extraction
//! provider or as a raw passthrough request.

use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, AUTHORIZATION, CONTENT_TYPE};
use scraper::Selector as ScraperSelector;
use url::Url;

use crate::TextBy;
use crate::constants::{ACCEPT_LANGUAGE as ACCEPT_LANGUAGE_VALUE, MIN_EXTRACTED_LEN, USER_AGENT};
use crate::error::{Error, Result};
use crate::extract::extract_readable;
use crate::sitemap::validate_xml;
use crate::state::Trace;

/// How a URL should be fetched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchMode {
    /// Ask the extraction provider for readable text, falling back to `Raw` on any failure.
    Extract,
    /// Fetch the URL directly.
    Raw,
}

/// Settings for the content fetcher.
#[derive(Clone, Debug)]
pub struct FetcherConfig {
    /// Base URL of the content-extraction provider; the target is passed as `?url=`.
    pub extractor_url: Url,
    /// Bearer key for the extraction provider.
    pub extractor_key: Option<String>,
    /// Local extraction method used on raw HTML after a fallback.
    pub text_by: TextBy,
    /// Optional CSS selector limiting local extraction.
    pub selector: Option<ScraperSelector>,
}

/// Body of a raw passthrough fetch. The status is surfaced for the caller to inspect.
#[derive(Clone, Debug)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// # Errors
    ///
    /// Returns `Http` with the status and body if the status is not 2xx.
    pub fn ensure_success(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Error::Http {
                status: self.status,
                body: self.body,
            })
        }
    }

    fn is_html(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|content_type| content_type.contains("html"))
    }
}

/// Fetches content for the pipeline. Every attempt and fallback is recorded in the trace.
pub struct Fetcher {
    client: Client,
    config: FetcherConfig,
}

impl Fetcher {
    /// Builds a fetcher with the fixed user agent.
    ///
    /// # Errors
    ///
    /// Returns `Network` if the HTTP client cannot be built.
    pub fn new(config: FetcherConfig) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client, config })
    }

    /// Fetches `url` in the given mode and returns its text.
    ///
    /// # Errors
    ///
    /// Returns `Http` if the raw fetch answered with a non-2xx status, or `Network` if the
    /// request could not be made at all. In `Extract` mode, extraction failures are never
    /// returned; only the raw fallback's failure is.
    pub async fn fetch(&self, url: &str, mode: FetchMode, trace: &mut Trace) -> Result<String> {
        if mode == FetchMode::Extract {
            match self.extract(url, trace).await {
                Ok(text) => return Ok(text),
                Err(error) => {
                    trace.debug(format!(
                        "Extraction failed for {url}, falling back to raw fetch: {error}"
                    ));
                }
            }
        }

        let response = self.fetch_raw(url, trace).await?.ensure_success()?;
        if mode == FetchMode::Extract && response.is_html() {
            return Ok(self.readable(url, response, trace));
        }
        Ok(response.body)
    }

    /// Fetches `url` directly, returning status, content type and body whatever the status.
    ///
    /// # Errors
    ///
    /// Returns `Network` if no response was received or its body could not be read.
    pub async fn fetch_raw(&self, url: &str, trace: &mut Trace) -> Result<RawResponse> {
        trace.debug(format!("Fetching {url}"));

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "*/*")
            .header(ACCEPT_LANGUAGE, ACCEPT_LANGUAGE_VALUE)
            .send()
            .await?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;

        trace.debug(format!(
            "Fetched {url}: HTTP {status}, {} bytes",
            body.len()
        ));

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }

    /// Fetches `url` in raw mode, requiring success and well-formed XML.
    ///
    /// # Errors
    ///
    /// Returns `Http` for a non-2xx status, `Network` if no response was received, and
    /// `InvalidXml` if a successful body does not parse.
    pub async fn fetch_xml(&self, url: &str, trace: &mut Trace) -> Result<String> {
        let response = self.fetch_raw(url, trace).await?.ensure_success()?;
        validate_xml(&response.body)?;
        Ok(response.body)
    }

    /// Asks the extraction provider for the readable content of `url`, without any fallback.
    ///
    /// # Errors
    ///
    /// Returns `Extraction` if the provider answers with a non-2xx status or a body shorter than
    /// [`MIN_EXTRACTED_LEN`], and `Network` if it cannot be reached.
    pub async fn extract(&self, url: &str, trace: &mut Trace) -> Result<String> {
        let mut request_url = self.config.extractor_url.clone();
        request_url.query_pairs_mut().append_pair("url", url);
        trace.debug(format!("Requesting extracted content for {url}"));

        let mut request = self
            .client
            .get(request_url)
            .header(ACCEPT, "text/plain")
            .header(ACCEPT_LANGUAGE, ACCEPT_LANGUAGE_VALUE);
        if let Some(key) = self.config.extractor_key.as_deref() {
            request = request.header(AUTHORIZATION, format!("Bearer {key}"));
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(Error::Extraction(format!("HTTP {} {text}", status.as_u16())));
        }
        if text.chars().count() < MIN_EXTRACTED_LEN {
            return Err(Error::Extraction(
                "Empty or invalid response from extractor".to_string(),
            ));
        }
        Ok(text)
    }

    fn readable(&self, url: &str, response: RawResponse, trace: &mut Trace) -> String {
        match extract_readable(
            &response.body,
            &self.config.text_by,
            self.config.selector.as_ref(),
        ) {
            Ok(text) => text,
            Err(error) => {
                trace.debug(format!(
                    "Local extraction failed for {url}, keeping raw body: {error}"
                ));
                response.body
            }
        }
    }
}
