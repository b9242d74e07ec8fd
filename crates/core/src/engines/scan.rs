use crate::traits::SearchEngine;
use crate::{CorpusIndex, DocumentId, SearchCandidate, SearchError, SearchQuery};
use async_trait::async_trait;

const MIN_TERM_CHARS: usize = 2;
const TITLE_WEIGHT: f64 = 2.0;

struct ScanEntry {
    doc: DocumentId,
    title: String,
    haystack: String,
}

pub struct TermScanEngine {
    entries: Vec<ScanEntry>,
}

impl TermScanEngine {
    pub fn from_index(index: &CorpusIndex) -> Self {
        let entries = index
            .documents()
            .iter()
            .map(|document| {
                let title = document
                    .title
                    .as_deref()
                    .unwrap_or_default()
                    .to_lowercase();

                let mut haystack = title.clone();
                for part in [document.url.as_deref(), document.text_content.as_deref()] {
                    if let Some(part) = part {
                        haystack.push(' ');
                        haystack.push_str(&part.to_lowercase());
                    }
                }

                ScanEntry {
                    doc: document.id,
                    title,
                    haystack,
                }
            })
            .collect();

        Self { entries }
    }
}

#[async_trait]
impl SearchEngine for TermScanEngine {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchCandidate>, SearchError> {
        let terms = query_terms(&query.text);
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let mut ranked: Vec<(f64, DocumentId)> = self
            .entries
            .iter()
            .filter_map(|entry| {
                let score = score_entry(entry, &terms);
                (score > 0.0).then_some((score, entry.doc))
            })
            .collect();

        // Stable sort keeps corpus order for equal scores.
        ranked.sort_by(|left, right| right.0.total_cmp(&left.0));

        Ok(ranked
            .into_iter()
            .map(|(score, doc)| SearchCandidate::Reference { doc, score })
            .collect())
    }
}

fn query_terms(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|token| token.to_lowercase())
        .filter(|token| token.len() > MIN_TERM_CHARS)
        .collect()
}

fn score_entry(entry: &ScanEntry, terms: &[String]) -> f64 {
    terms
        .iter()
        .map(|term| {
            let body_hits = entry.haystack.matches(term.as_str()).count() as f64;
            let title_hits = entry.title.matches(term.as_str()).count() as f64;
            body_hits + TITLE_WEIGHT * title_hits
        })
        .sum()
}
