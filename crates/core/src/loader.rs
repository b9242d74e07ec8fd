use crate::error::{FormatError, IndexError, RetrievalError};
use crate::models::{CorpusIndex, CorpusPayload, IndexFingerprint};
use chrono::Utc;
use reqwest::Client;
use sha2::{Digest, Sha256};
use tracing::info;
use url::Url;

pub struct IndexLoader {
    client: Client,
}

impl Default for IndexLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexLoader {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub async fn load(&self, locator: &str) -> Result<CorpusIndex, IndexError> {
        let parsed = Url::parse(locator).map_err(|source| RetrievalError::Locator {
            locator: locator.to_string(),
            source,
        })?;

        let bytes = match parsed.scheme() {
            "file" => read_local(&parsed, locator)?,
            "http" | "https" => self.fetch(&parsed, locator).await?,
            other => {
                return Err(RetrievalError::UnsupportedScheme(other.to_string()).into());
            }
        };

        let payload: CorpusPayload =
            serde_json::from_slice(&bytes).map_err(FormatError::from)?;

        let fingerprint = IndexFingerprint {
            locator: locator.to_string(),
            checksum: digest_bytes(&bytes),
            loaded_at: Utc::now(),
        };

        info!(
            locator = %locator,
            documents = payload.documents.len(),
            checksum = %fingerprint.checksum,
            "corpus index loaded"
        );

        Ok(CorpusIndex::new(payload.documents, fingerprint))
    }

    async fn fetch(&self, parsed: &Url, locator: &str) -> Result<Vec<u8>, RetrievalError> {
        let response = self.client.get(parsed.clone()).send().await?;

        if !response.status().is_success() {
            return Err(RetrievalError::Status {
                locator: locator.to_string(),
                status: response.status(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

fn read_local(parsed: &Url, locator: &str) -> Result<Vec<u8>, RetrievalError> {
    let path = parsed
        .to_file_path()
        .map_err(|_| RetrievalError::FilePath(locator.to_string()))?;
    Ok(std::fs::read(path)?)
}

fn digest_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::{digest_bytes, IndexLoader};
    use crate::error::{IndexError, RetrievalError};
    use std::fs;
    use tempfile::tempdir;

    fn file_locator(path: &std::path::Path) -> String {
        format!("file://{}", path.display())
    }

    #[tokio::test]
    async fn file_scheme_round_trips_a_corpus() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let corpus_path = dir.path().join("corpus.json");
        fs::write(
            &corpus_path,
            r#"{"documents": [
                {"id": 1, "title": "Install", "url": "https://docs.example/install", "text": "Run the installer."},
                {"id": 2, "title": "Configure"}
            ]}"#,
        )?;

        let index = IndexLoader::new().load(&file_locator(&corpus_path)).await?;

        assert_eq!(index.len(), 2);
        assert_eq!(index.documents()[0].title.as_deref(), Some("Install"));
        assert_eq!(index.fingerprint().locator, file_locator(&corpus_path));
        assert!(!index.fingerprint().checksum.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn malformed_payload_is_a_format_error() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let corpus_path = dir.path().join("corpus.json");
        fs::write(&corpus_path, b"{not json")?;

        let result = IndexLoader::new().load(&file_locator(&corpus_path)).await;

        assert!(matches!(result, Err(IndexError::Format(_))));
        Ok(())
    }

    #[tokio::test]
    async fn schema_mismatch_is_a_format_error() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let corpus_path = dir.path().join("corpus.json");
        fs::write(&corpus_path, r#"{"documents": "not a list"}"#)?;

        let result = IndexLoader::new().load(&file_locator(&corpus_path)).await;

        assert!(matches!(result, Err(IndexError::Format(_))));
        Ok(())
    }

    #[tokio::test]
    async fn unsupported_scheme_is_a_retrieval_error() {
        let result = IndexLoader::new().load("ftp://docs.example/corpus.json").await;

        assert!(matches!(
            result,
            Err(IndexError::Retrieval(RetrievalError::UnsupportedScheme(_)))
        ));
    }

    #[tokio::test]
    async fn malformed_locator_is_a_retrieval_error() {
        let result = IndexLoader::new().load("not a locator").await;

        assert!(matches!(
            result,
            Err(IndexError::Retrieval(RetrievalError::Locator { .. }))
        ));
    }

    #[tokio::test]
    async fn missing_file_is_a_retrieval_error() {
        let result = IndexLoader::new()
            .load("file:///definitely/not/here/corpus.json")
            .await;

        assert!(matches!(
            result,
            Err(IndexError::Retrieval(RetrievalError::Io(_)))
        ));
    }

    #[test]
    fn checksum_is_reproducible() {
        assert_eq!(digest_bytes(b"abc"), digest_bytes(b"abc"));
        assert_ne!(digest_bytes(b"abc"), digest_bytes(b"abd"));
    }
}
