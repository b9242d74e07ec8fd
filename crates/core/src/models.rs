use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub u64);

impl fmt::Display for DocumentId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, rename = "text")]
    pub text_content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorpusPayload {
    pub documents: Vec<Document>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IndexFingerprint {
    pub locator: String,
    pub checksum: String,
    pub loaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CorpusIndex {
    documents: Vec<Document>,
    positions: HashMap<DocumentId, usize>,
    fingerprint: IndexFingerprint,
}

impl CorpusIndex {
    pub fn new(documents: Vec<Document>, fingerprint: IndexFingerprint) -> Self {
        let positions = documents
            .iter()
            .enumerate()
            .map(|(position, document)| (document.id, position))
            .collect();

        Self {
            documents,
            positions,
            fingerprint,
        }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn fingerprint(&self) -> &IndexFingerprint {
        &self.fingerprint
    }

    /// Total over every reference the search layer can emit; an unknown id
    /// is a broken collaborator invariant and panics.
    pub fn resolve(&self, reference: DocumentId) -> &Document {
        &self.documents[self.positions[&reference]]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SearchQuery {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchCandidate {
    Reference { doc: DocumentId, score: f64 },
    Resolved { document: Document },
}

impl SearchCandidate {
    pub fn resolve<'a>(&'a self, index: &'a CorpusIndex) -> &'a Document {
        match self {
            SearchCandidate::Reference { doc, .. } => index.resolve(*doc),
            SearchCandidate::Resolved { document } => document,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultItem {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fingerprint() -> IndexFingerprint {
        IndexFingerprint {
            locator: "file:///tmp/corpus.json".to_string(),
            checksum: "checksum".to_string(),
            loaded_at: Utc::now(),
        }
    }

    #[test]
    fn document_optional_fields_default_to_absent() {
        let document: Document =
            serde_json::from_str(r#"{"id": 7}"#).expect("minimal document should parse");

        assert_eq!(document.id, DocumentId(7));
        assert!(document.title.is_none());
        assert!(document.url.is_none());
        assert!(document.text_content.is_none());
    }

    #[test]
    fn candidate_wire_shapes_carry_an_explicit_discriminant() {
        let reference: SearchCandidate =
            serde_json::from_str(r#"{"kind": "reference", "doc": 3, "score": 1.5}"#)
                .expect("reference candidate should parse");
        assert_eq!(
            reference,
            SearchCandidate::Reference {
                doc: DocumentId(3),
                score: 1.5
            }
        );

        let resolved: SearchCandidate = serde_json::from_str(
            r#"{"kind": "resolved", "document": {"id": 3, "title": "Install"}}"#,
        )
        .expect("resolved candidate should parse");
        match resolved {
            SearchCandidate::Resolved { document } => {
                assert_eq!(document.title.as_deref(), Some("Install"));
            }
            other => panic!("expected resolved candidate, got {other:?}"),
        }
    }

    #[test]
    fn reference_candidates_resolve_through_the_index() {
        let documents = vec![
            Document {
                id: DocumentId(10),
                title: Some("First".to_string()),
                url: None,
                text_content: None,
            },
            Document {
                id: DocumentId(20),
                title: Some("Second".to_string()),
                url: None,
                text_content: None,
            },
        ];
        let index = CorpusIndex::new(documents, fingerprint());

        let candidate = SearchCandidate::Reference {
            doc: DocumentId(20),
            score: 0.5,
        };
        assert_eq!(candidate.resolve(&index).title.as_deref(), Some("Second"));

        let inline = SearchCandidate::Resolved {
            document: Document {
                id: DocumentId(99),
                title: Some("Inline".to_string()),
                url: None,
                text_content: None,
            },
        };
        assert_eq!(inline.resolve(&index).title.as_deref(), Some("Inline"));
    }

    #[test]
    fn result_item_serialization_omits_absent_fields() {
        let item = ResultItem {
            title: "Install".to_string(),
            url: None,
            preview: None,
            content: None,
        };

        let wire = serde_json::to_value(&item).expect("item should serialize");
        assert_eq!(wire, serde_json::json!({"title": "Install"}));
    }
}
