//! Heuristic text utilities shared by every analysis component.
//!
//! Everything here is intentionally lightweight: whitespace tokenization,
//! a small suffix-stripping cascade, and punctuation-based sentence
//! splitting. The splitter mis-handles abbreviations and decimal numbers;
//! that behavior is part of the contract and downstream checks are tuned
//! to it.

/// Words that carry no signal for keyword-overlap checks.
///
/// Articles, prepositions, auxiliary verbs, question words, plus a few
/// prompt-domain fillers that show up in every student draft. Tokens
/// shorter than three characters never reach this list.
const STOPWORDS: &[&str] = &[
    "the", "and", "but", "for", "nor", "not", "you", "your", "our", "their",
    "them", "they", "this", "that", "these", "those", "with", "from", "into",
    "onto", "upon", "over", "under", "about", "above", "below", "after",
    "before", "between", "through", "during", "within", "without", "around",
    "against", "are", "was", "were", "been", "being", "has", "have", "had",
    "does", "did", "doing", "will", "would", "shall", "should", "can",
    "could", "may", "might", "must", "what", "when", "where", "which", "who",
    "whom", "whose", "why", "how", "also", "than", "then", "there", "here",
    "very", "just", "some", "any", "all", "each", "both", "because", "while",
    "such", "same", "too", "out", "off", "again", "once", "only", "explain",
    "mean", "fragment", "section",
];

/// Count words by splitting on whitespace runs. Empty or whitespace-only
/// text yields zero.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Reduce raw text to its meaningful tokens: lowercased, stripped of
/// non-alphanumerics, lightly stemmed, with short tokens and stopwords
/// removed. Order is preserved and duplicates are kept; callers that want
/// set semantics build a set themselves.
pub fn tokenize_meaningful(text: &str) -> Vec<String> {
    text.split_whitespace()
        .filter_map(|raw| {
            let cleaned: String = raw
                .chars()
                .filter(|c| c.is_alphanumeric())
                .flat_map(char::to_lowercase)
                .collect();
            if cleaned.is_empty() {
                return None;
            }
            let stemmed = stem(&cleaned);
            if stemmed.chars().count() < 3 || STOPWORDS.contains(&stemmed.as_str()) {
                None
            } else {
                Some(stemmed)
            }
        })
        .collect()
}

/// Suffix-stripping cascade. Rules are tried in priority order and at most
/// one applies; a rule whose length guard fails falls through to the next.
fn stem(word: &str) -> String {
    let len = word.chars().count();

    if len > 4 {
        if let Some(base) = word.strip_suffix("ies") {
            return format!("{base}y");
        }
    }
    if len > 5 {
        if let Some(base) = word.strip_suffix("ing") {
            return base.to_string();
        }
    }
    if len > 4 {
        if let Some(base) = word.strip_suffix("ed") {
            return base.to_string();
        }
    }
    if len > 5 {
        if let Some(base) = word.strip_suffix("al") {
            return base.to_string();
        }
    }
    if len > 4 {
        if let Some(base) = word.strip_suffix("es") {
            return base.to_string();
        }
    }
    if len > 3 {
        if let Some(base) = word.strip_suffix('s') {
            return base.to_string();
        }
    }

    word.to_string()
}

/// Split text into sentences at whitespace that follows a sentence-ending
/// mark (`.`, `!`, `?`). Pieces are trimmed and empties dropped.
///
/// Abbreviations and decimals will mis-split; accepted limitation.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        current.push(ch);
        if matches!(ch, '.' | '!' | '?') && chars.peek().is_some_and(|c| c.is_whitespace()) {
            while chars.peek().is_some_and(|c| c.is_whitespace()) {
                chars.next();
            }
            let trimmed = current.trim();
            if !trimmed.is_empty() {
                sentences.push(trimmed.to_string());
            }
            current.clear();
        }
    }

    let trimmed = current.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
    sentences
}

/// Return the text unchanged (trimmed) if it has at most `max` sentences,
/// otherwise join the first `max` sentences with single spaces.
pub fn clamp_to_max_sentences(text: &str, max: usize) -> String {
    let sentences = split_sentences(text);
    if sentences.len() <= max {
        return text.trim().to_string();
    }
    sentences[..max].join(" ")
}

/// Split raw text into paragraphs on blank lines, normalizing CR/CRLF
/// first. A single paragraph longer than `fallback_sentences` sentences
/// (a text pasted with no blank lines) is re-chunked into groups of that
/// many sentences.
pub fn split_paragraphs(text: &str, fallback_sentences: usize) -> Vec<String> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");

    let mut paragraphs = Vec::new();
    let mut current = String::new();
    for line in normalized.lines() {
        if line.trim().is_empty() {
            if !current.trim().is_empty() {
                paragraphs.push(current.trim().to_string());
            }
            current.clear();
        } else {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
        }
    }
    if !current.trim().is_empty() {
        paragraphs.push(current.trim().to_string());
    }

    // Fallback: one very long block, chunk by sentences
    let chunk_size = fallback_sentences.max(1);
    if paragraphs.len() == 1 {
        let sentences = split_sentences(&paragraphs[0]);
        if sentences.len() > chunk_size {
            paragraphs = sentences
                .chunks(chunk_size)
                .map(|chunk| chunk.join(" "))
                .filter(|p| !p.is_empty())
                .collect();
        }
    }

    paragraphs
}
