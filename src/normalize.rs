//! Canonicalization of the user-supplied site reference.

use std::fmt;

use url::Url;

use crate::error::{Error, Result};

/// An absolute `http`/`https` site root whose canonical form has no trailing slash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RootUrl {
    url: Url,
    canonical: String,
}

impl RootUrl {
    /// The parsed URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The canonical string, without its trailing slash.
    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    /// Host name, empty if the URL has none.
    pub fn hostname(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }

    /// Appends `path` to the canonical string, keeping any path the root already had.
    pub fn with_path(&self, path: &str) -> String {
        format!("{}{path}", self.canonical)
    }

    /// Location of robots.txt, always at the origin.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUrl` if the joined URL can't be built.
    pub fn robots_txt(&self) -> Result<Url> {
        self.url
            .join("/robots.txt")
            .map_err(|e| Error::InvalidUrl(e.to_string()))
    }
}

impl fmt::Display for RootUrl {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.canonical)
    }
}

/// Normalizes a site reference into an absolute root URL.
///
/// Input lacking a scheme gets `https://` prepended. A single trailing slash is stripped from
/// the canonical form. No network access happens here.
///
/// # Errors
///
/// Returns `InvalidUrl` if the input does not parse as an `http`/`https` URL with a host.
pub fn normalize(input: &str) -> Result<RootUrl> {
    let input = input.trim();
    let candidate = if input.starts_with("http://") || input.starts_with("https://") {
        input.to_string()
    } else {
        format!("https://{input}")
    };

    let url = Url::parse(&candidate).map_err(|e| Error::InvalidUrl(format!("{input}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none_or(str::is_empty) {
        return Err(Error::InvalidUrl(input.to_string()));
    }

    let serialized = url.to_string();
    let canonical = serialized
        .strip_suffix('/')
        .unwrap_or(&serialized)
        .to_string();

    Ok(RootUrl { url, canonical })
}
