// Tavily web-search client

use super::{provider_error_message, ClientError, SearchClient, SearchRecord};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Default Tavily API endpoint
pub const TAVILY_BASE_URL: &str = "https://api.tavily.com";

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    max_results: usize,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Option<Vec<SearchRecord>>,
}

/// Search client for the Tavily `/search` endpoint
pub struct TavilySearchClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TavilySearchClient {
    /// Create a client against the public Tavily API
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(TAVILY_BASE_URL, api_key)
    }

    /// Create a client against a custom endpoint (proxies, tests)
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl SearchClient for TavilySearchClient {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchRecord>, ClientError> {
        log::debug!("Tavily search: {:?} (max {})", query, max_results);

        let response = self
            .http
            .post(format!("{}/search", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&SearchRequest { query, max_results })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: provider_error_message(&text),
            });
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;

        let mut results = body.results.unwrap_or_default();
        results.truncate(max_results);
        Ok(results)
    }
}
