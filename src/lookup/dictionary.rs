//! Dictionary oracle backed by the Free Dictionary API.

use super::{DictionaryOracle, LookupError, http_client, parse_base_url};
use reqwest::{StatusCode, Url};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Client for `GET {base_url}/{word}` on dictionaryapi.dev.
///
/// A 200 response with a non-empty JSON array means the word exists; a 404
/// means it does not.
#[derive(Debug, Clone)]
pub struct DictionaryApiClient {
    base_url: Url,
    client: reqwest::Client,
}

impl DictionaryApiClient {
    /// Creates a client for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if the base URL does not parse or the HTTP
    /// client cannot be built.
    #[instrument(skip_all, fields(base_url = %base_url.as_ref()))]
    pub fn new(base_url: impl AsRef<str>, timeout: Duration) -> Result<Self, LookupError> {
        info!("Creating dictionary client");
        Ok(Self {
            base_url: parse_base_url(base_url.as_ref())?,
            client: http_client(timeout)?,
        })
    }

    /// Entry URL for a word: the lowercased word appended as one path segment.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if the base URL cannot carry path segments.
    pub fn entry_url(&self, word: &str) -> Result<Url, LookupError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                LookupError::new(format!("Base URL {} cannot take a path", self.base_url))
            })?
            .pop_if_empty()
            .push(&word.trim().to_lowercase());
        Ok(url)
    }

    /// Looks the word up.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] on transport failures, unexpected statuses and
    /// unparseable bodies. A 404 is a definite `Ok(false)`.
    #[instrument(skip(self))]
    pub async fn lookup(&self, word: &str) -> Result<bool, LookupError> {
        if word.trim().is_empty() {
            return Ok(false);
        }

        let url = self.entry_url(word)?;
        debug!(url = %url, "Sending dictionary request");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LookupError::new(format!("Dictionary request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("Dictionary has no entry");
            return Ok(false);
        }
        if !status.is_success() {
            return Err(LookupError::new(format!(
                "Dictionary returned status {}",
                status
            )));
        }

        let entries: Vec<serde_json::Value> = response.json().await.map_err(|e| {
            LookupError::new(format!("Failed to parse dictionary response: {}", e))
        })?;
        debug!(entries = entries.len(), "Dictionary responded");
        Ok(!entries.is_empty())
    }
}

#[async_trait::async_trait]
impl DictionaryOracle for DictionaryApiClient {
    async fn check_word_exists(&self, word: &str) -> bool {
        match self.lookup(word).await {
            Ok(exists) => exists,
            Err(e) => {
                warn!(word, error = %e, "Dictionary lookup failed, treating word as invalid");
                false
            }
        }
    }
}
