use crate::{SearchCandidate, SearchError, SearchQuery};
use async_trait::async_trait;

#[async_trait]
pub trait SearchEngine {
    /// Candidates in relevance order, best first. Never invoked with an
    /// empty or whitespace-only query; that case is routed to the corpus
    /// listing before this seam.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchCandidate>, SearchError>;
}
