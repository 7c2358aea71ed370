//! Reading queue construction.
//!
//! Multiple reading sources are split into paragraphs and interleaved
//! layer by layer: paragraph 1 of every source (in supplied order), then
//! paragraph 2, and so on, with exhausted sources dropping out. The
//! interleave is deliberately unshuffled so the queue is a pure function
//! of its inputs.

use serde::{Deserialize, Serialize};

use crate::text;

/// Texts with no blank lines are re-chunked into paragraphs of at most
/// this many sentences.
pub const DEFAULT_FALLBACK_SENTENCES: usize = 8;

/// One reading source supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingSource {
    pub id: String,
    pub title: String,
    pub text: String,
}

/// One interleaved paragraph handed to the student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingChunk {
    pub source_id: String,
    pub source_title: String,
    /// 1-based position of this paragraph within its source.
    pub paragraph_index: usize,
    pub total_paragraphs_for_source: usize,
    pub text: String,
}

/// Build the interleaved reading queue. Sources with only whitespace are
/// skipped silently.
pub fn build_reading_queue(sources: &[ReadingSource]) -> Vec<ReadingChunk> {
    let prepared: Vec<(&ReadingSource, Vec<String>)> = sources
        .iter()
        .filter(|s| !s.text.trim().is_empty())
        .map(|s| (s, text::split_paragraphs(&s.text, DEFAULT_FALLBACK_SENTENCES)))
        .filter(|(_, paragraphs)| !paragraphs.is_empty())
        .collect();

    let deepest = prepared.iter().map(|(_, p)| p.len()).max().unwrap_or(0);

    let mut queue = Vec::new();
    for layer in 0..deepest {
        for (source, paragraphs) in &prepared {
            if let Some(paragraph) = paragraphs.get(layer) {
                queue.push(ReadingChunk {
                    source_id: source.id.clone(),
                    source_title: source.title.clone(),
                    paragraph_index: layer + 1,
                    total_paragraphs_for_source: paragraphs.len(),
                    text: paragraph.clone(),
                });
            }
        }
    }

    tracing::debug!(
        sources = prepared.len(),
        chunks = queue.len(),
        "built reading queue"
    );
    queue
}
