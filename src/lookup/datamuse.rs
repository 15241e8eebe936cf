//! Word source backed by the Datamuse API.

use super::{LookupError, WordSource, http_client, parse_base_url};
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Deserialize)]
struct DatamuseWord {
    word: String,
}

/// Client for `GET {base_url}?sp={letter}*&max={limit}` on datamuse.com.
#[derive(Debug, Clone)]
pub struct DatamuseClient {
    base_url: Url,
    client: reqwest::Client,
}

impl DatamuseClient {
    /// Creates a client for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if the base URL does not parse or the HTTP
    /// client cannot be built.
    #[instrument(skip_all, fields(base_url = %base_url.as_ref()))]
    pub fn new(base_url: impl AsRef<str>, timeout: Duration) -> Result<Self, LookupError> {
        info!("Creating Datamuse client");
        Ok(Self {
            base_url: parse_base_url(base_url.as_ref())?,
            client: http_client(timeout)?,
        })
    }

    /// Fetches candidates starting with `letter`, lowercased, in response order.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] on transport failures, error statuses and
    /// unparseable bodies.
    #[instrument(skip(self))]
    pub async fn search(&self, letter: char, limit: u32) -> Result<Vec<String>, LookupError> {
        let pattern = format!("{}*", letter.to_lowercase());
        debug!(url = %self.base_url, %pattern, limit, "Sending word search request");

        let response = self
            .client
            .get(self.base_url.clone())
            .query(&[("sp", pattern.as_str()), ("max", limit.to_string().as_str())])
            .send()
            .await
            .map_err(|e| LookupError::new(format!("Word search request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::new(format!(
                "Word search returned status {}",
                status
            )));
        }

        let words: Vec<DatamuseWord> = response.json().await.map_err(|e| {
            LookupError::new(format!("Failed to parse word search response: {}", e))
        })?;
        debug!(count = words.len(), "Word search responded");
        Ok(words
            .into_iter()
            .map(|entry| entry.word.to_lowercase())
            .collect())
    }
}

#[async_trait::async_trait]
impl WordSource for DatamuseClient {
    async fn find_words(&self, letter: char, limit: u32) -> Vec<String> {
        match self.search(letter, limit).await {
            Ok(words) => words,
            Err(e) => {
                warn!(%letter, error = %e, "Word search failed, no candidates");
                Vec::new()
            }
        }
    }
}
