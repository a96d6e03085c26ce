//! Remote lead sources
//!
//! [`LeadSource`] is the seam between the dashboard and wherever leads come
//! from. [`HttpLeadSource`] talks to the lead webhook; [`StaticLeadSource`]
//! serves a fixed answer for tests and offline use.

use crate::{
    error::{SourceError, SourceResult},
    wire::{self, RemoteLead},
};
use async_trait::async_trait;
use leadboard_core::SourceConfig;
use reqwest::{Client, header::ACCEPT};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

/// Anything that can produce the raw lead list
#[async_trait]
pub trait LeadSource: Send + Sync {
    /// Fetch every lead record the source knows about
    async fn fetch_leads(&self) -> SourceResult<Vec<RemoteLead>>;

    /// Short name used in logs
    fn name(&self) -> &str;
}

/// Lead webhook client
#[derive(Debug, Clone)]
pub struct HttpLeadSource {
    client: Client,
    url: String,
}

impl HttpLeadSource {
    /// Create a client for the given webhook URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    /// Create a client from the `source` configuration section
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &SourceConfig) -> SourceResult<Self> {
        let client = Client::builder().user_agent(&config.user_agent).build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    /// Webhook URL
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl LeadSource for HttpLeadSource {
    /// One `GET`, no body, no retry
    async fn fetch_leads(&self) -> SourceResult<Vec<RemoteLead>> {
        debug!(url = %self.url, "Fetching leads");

        let response = self
            .client
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        wire::decode_leads(&body)
    }

    fn name(&self) -> &str {
        "webhook"
    }
}

/// Source answering every fetch with the same records or the same failure
#[derive(Debug, Default)]
pub struct StaticLeadSource {
    records: Vec<RemoteLead>,
    failure: Option<String>,
    fetches: AtomicUsize,
}

impl StaticLeadSource {
    /// Source serving `records`
    #[must_use]
    pub fn new(records: Vec<RemoteLead>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    /// Source that always fails with [`SourceError::Unavailable`]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// How many times [`LeadSource::fetch_leads`] was called
    #[must_use]
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl LeadSource for StaticLeadSource {
    async fn fetch_leads(&self) -> SourceResult<Vec<RemoteLead>> {
        self.fetches.fetch_add(1, Ordering::Relaxed);

        match &self.failure {
            Some(message) => Err(SourceError::Unavailable {
                message: message.clone(),
            }),
            None => Ok(self.records.clone()),
        }
    }

    fn name(&self) -> &str {
        "static"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_static_source_serves_records() {
        let source = StaticLeadSource::new(vec![RemoteLead {
            name: Some("Ana".to_string()),
            ..RemoteLead::default()
        }]);

        let records = source.fetch_leads().await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(source.fetches(), 1);
    }

    #[tokio::test]
    async fn test_failing_static_source() {
        let source = StaticLeadSource::failing("maintenance");

        let error = source.fetch_leads().await.unwrap_err();

        assert_eq!(error.to_string(), "Lead source unavailable: maintenance");
    }

    #[test]
    fn test_http_source_from_config() {
        let config = SourceConfig {
            url: "http://127.0.0.1:1/leads".to_string(),
            ..SourceConfig::default()
        };

        let source = HttpLeadSource::from_config(&config).unwrap();

        assert_eq!(source.url(), "http://127.0.0.1:1/leads");
        assert_eq!(source.name(), "webhook");
    }
}
