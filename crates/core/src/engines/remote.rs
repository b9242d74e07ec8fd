use crate::traits::SearchEngine;
use crate::{SearchCandidate, SearchError, SearchQuery};
use async_trait::async_trait;
use reqwest::Client;

pub struct RemoteSearchEngine {
    client: Client,
    endpoint: String,
}

impl RemoteSearchEngine {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl SearchEngine for RemoteSearchEngine {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchCandidate>, SearchError> {
        let payload = serde_json::to_string(query)?;

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .body(payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SearchError::BackendResponse {
                backend: "remote-search".to_string(),
                details: response.status().to_string(),
            });
        }

        let candidates: Vec<SearchCandidate> = response.json().await?;
        Ok(candidates)
    }
}
