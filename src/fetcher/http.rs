use crate::config::RulesFile;
use crate::fetcher::traits::Fetch;
use crate::model::FetchError;

use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;
use tracing::{info, warn};

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds the client once, with the configured User-Agent, any extra
    /// request headers, and a finite timeout so a stalled fetch cannot hang
    /// the scheduled job.
    pub fn new(rules: &RulesFile) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        for (name, value) in &rules.headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => warn!("Skipping malformed request header: {}", name),
            }
        }

        let client = Client::builder()
            .user_agent(rules.user_agent.clone())
            .default_headers(headers)
            .timeout(Duration::from_secs(rules.request_timeout_secs))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Http {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() && !status.is_redirection() {
            return Err(FetchError::BadStatus {
                url: url.to_string(),
                status,
            });
        }

        info!("Successfully accessed {}", url);
        response.text().await.map_err(|e| FetchError::Http {
            url: url.to_string(),
            source: e,
        })
    }
}
