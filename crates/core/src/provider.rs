use crate::assembler::ResultAssembler;
use crate::engines::TermScanEngine;
use crate::loader::IndexLoader;
use crate::traits::SearchEngine;
use crate::{CorpusIndex, IndexError, IndexFingerprint, ResultItem, SearchError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct ProviderCapabilities {
    pub name: String,
    pub version: String,
    pub document_count: usize,
    pub index: IndexFingerprint,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemParams {
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSettings {
    pub locator: String,
}

#[async_trait]
pub trait ContextProvider {
    fn capabilities(&self) -> ProviderCapabilities;

    async fn items(&self, params: &ItemParams) -> Result<Vec<ResultItem>, SearchError>;
}

pub struct DocsLookupProvider<S>
where
    S: SearchEngine,
{
    index: CorpusIndex,
    assembler: ResultAssembler<S>,
}

impl<S> DocsLookupProvider<S>
where
    S: SearchEngine + Send + Sync,
{
    pub fn new(index: CorpusIndex, engine: S) -> Self {
        Self {
            index,
            assembler: ResultAssembler::new(engine),
        }
    }

    pub fn index(&self) -> &CorpusIndex {
        &self.index
    }
}

impl DocsLookupProvider<TermScanEngine> {
    /// Loads the corpus behind `settings.locator` and wires the bundled
    /// term-scan engine over it.
    pub async fn connect(settings: ProviderSettings) -> Result<Self, IndexError> {
        let index = IndexLoader::new().load(&settings.locator).await?;
        let engine = TermScanEngine::from_index(&index);
        Ok(Self::new(index, engine))
    }
}

#[async_trait]
impl<S> ContextProvider for DocsLookupProvider<S>
where
    S: SearchEngine + Send + Sync,
{
    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            name: "doc-context".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            document_count: self.index.len(),
            index: self.index.fingerprint().clone(),
        }
    }

    async fn items(&self, params: &ItemParams) -> Result<Vec<ResultItem>, SearchError> {
        self.assembler
            .assemble(&self.index, params.query.as_deref())
            .await
    }
}
