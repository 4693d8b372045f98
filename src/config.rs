//! Provider configuration for a run.

use std::time::Duration;

use crate::Provider;
use crate::constants::DEFAULT_DELAY_MS;
use crate::error::{Error, Result};

/// Keys and pacing for one run.
///
/// At most one summarization provider is active at a time: [`ProviderConfig::select`]
/// replaces any previous selection.
#[derive(Clone, Debug)]
pub struct ProviderConfig {
    /// Bearer key for the content-extraction provider.
    pub extractor_key: Option<String>,
    /// Fixed pause after every enriched URL.
    pub delay: Duration,
    active: Option<(Provider, String)>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            extractor_key: None,
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
            active: None,
        }
    }
}

impl ProviderConfig {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    /// Makes `provider` the active summarization provider, disabling any other.
    pub fn select(&mut self, provider: Provider, api_key: impl Into<String>) {
        self.active = Some((provider, api_key.into()));
    }

    pub fn deselect(&mut self) {
        self.active = None;
    }

    pub fn active(&self) -> Option<Provider> {
        self.active.as_ref().map(|(provider, _)| *provider)
    }

    /// Returns the active provider and its key.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if no provider is selected or its key is blank.
    pub fn validate(&self) -> Result<(Provider, &str)> {
        match &self.active {
            Some((provider, key)) if !key.trim().is_empty() => Ok((*provider, key.as_str())),
            Some((provider, _)) => Err(Error::Configuration(format!(
                "No API key provided for {provider}"
            ))),
            None => Err(Error::Configuration(
                "Please enable and provide an API key for at least one LLM provider".to_string(),
            )),
        }
    }
}
