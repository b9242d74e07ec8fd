use crate::traits::SearchEngine;
use crate::{CorpusIndex, Document, DocumentId, ResultItem, SearchError, SearchQuery};
use std::collections::HashSet;
use tracing::debug;

const PREVIEW_CHARS: usize = 200;
const TITLE_MAX_CHARS: usize = 50;
const SUFFIX_TRIM_SLACK: usize = 10;
const ELLIPSIS: &str = "...";
const FALLBACK_TITLE: &str = "Untitled";

pub struct ResultAssembler<S>
where
    S: SearchEngine,
{
    engine: S,
}

impl<S> ResultAssembler<S>
where
    S: SearchEngine + Send + Sync,
{
    pub fn new(engine: S) -> Self {
        Self { engine }
    }

    pub async fn assemble(
        &self,
        index: &CorpusIndex,
        query: Option<&str>,
    ) -> Result<Vec<ResultItem>, SearchError> {
        let trimmed = query.map(str::trim).filter(|text| !text.is_empty());

        let searched;
        let resolved: Vec<&Document> = match trimmed {
            None => {
                debug!(documents = index.len(), "empty query, listing full corpus");
                index.documents().iter().collect()
            }
            Some(text) => {
                let request = SearchQuery {
                    text: text.to_string(),
                };
                searched = self.engine.search(&request).await?;
                debug!(query = text, candidates = searched.len(), "search candidates received");
                searched
                    .iter()
                    .map(|candidate| candidate.resolve(index))
                    .collect()
            }
        };

        let mut seen: HashSet<DocumentId> = HashSet::new();
        let mut items = Vec::new();

        for document in resolved {
            if !seen.insert(document.id) {
                continue;
            }
            items.push(item_from_document(document));
        }

        trim_shared_title_suffix(&mut items);
        for item in &mut items {
            item.title = clamp_chars(&item.title, TITLE_MAX_CHARS);
        }

        Ok(items)
    }
}

fn item_from_document(document: &Document) -> ResultItem {
    let title = document
        .title
        .as_deref()
        .filter(|title| !title.is_empty())
        .or(document.url.as_deref())
        .unwrap_or(FALLBACK_TITLE)
        .to_string();

    ResultItem {
        title,
        url: document.url.clone(),
        preview: document
            .text_content
            .as_deref()
            .map(|text| clamp_chars(text, PREVIEW_CHARS)),
        content: document.text_content.clone(),
    }
}

fn clamp_chars(text: &str, limit: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(limit).collect();

    if chars.next().is_some() {
        format!("{head}{ELLIPSIS}")
    } else {
        head
    }
}

// Runs before per-title truncation; clamping first would cut titles at
// different points and break suffix detection.
fn trim_shared_title_suffix(items: &mut [ResultItem]) {
    if items.len() < 2 {
        return;
    }

    let titles: Vec<Vec<char>> = items
        .iter()
        .map(|item| item.title.chars().collect())
        .collect();

    let suffix_len = shared_suffix_len(&titles);
    if suffix_len == 0 {
        return;
    }

    for (item, chars) in items.iter_mut().zip(&titles) {
        // Titles without SUFFIX_TRIM_SLACK characters beyond the suffix
        // keep it intact.
        if chars.len() >= suffix_len + SUFFIX_TRIM_SLACK {
            item.title = chars[..chars.len() - suffix_len].iter().collect();
        }
    }
}

fn shared_suffix_len(titles: &[Vec<char>]) -> usize {
    let shortest = titles.iter().map(Vec::len).min().unwrap_or(0);
    let mut length = 0;

    while length < shortest {
        let probe = titles[0][titles[0].len() - 1 - length];
        let all_agree = titles
            .iter()
            .all(|title| title[title.len() - 1 - length] == probe);

        if !all_agree {
            break;
        }
        length += 1;
    }

    length
}
