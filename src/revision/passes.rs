//! The seven revision passes.
//!
//! Each pass is an independent scan over the supplied sections; none sees
//! another pass's output. The exact word lists, regexes, and thresholds
//! here are the behavioral contract: changing them changes what students
//! are told about their drafts, so treat any edit as a behavior change.

use regex::Regex;

use super::{Issue, Section, Severity};
use crate::text;

/// Issue codes, one per check.
pub mod codes {
    pub const THESIS_CONNECTION: &str = "thesis_connection";
    pub const MISSING_TOPIC_SENTENCE: &str = "missing_topic_sentence";
    pub const QUOTE_WITHOUT_ANALYSIS: &str = "quote_without_analysis";
    pub const MISSING_CLOSING_TRANSITION: &str = "missing_closing_transition";
    pub const CLAIM_WITHOUT_EVIDENCE: &str = "claim_without_evidence";
    pub const STACKED_QUOTES: &str = "stacked_quotes";
    pub const LONG_SENTENCE: &str = "long_sentence";
    pub const WEAK_TRANSITION: &str = "weak_transition";
    pub const FILLER_PHRASE: &str = "filler_phrase";
    pub const PASSIVE_VOICE: &str = "passive_voice";
    pub const REPEATED_WORD: &str = "repeated_word";
    pub const OVERALL_WORD_COUNT: &str = "overall_word_count";
    pub const SECTION_WORD_BALANCE: &str = "section_word_balance";
    pub const DOUBLE_SPACE: &str = "double_space";
    pub const DUPLICATE_WORD: &str = "duplicate_word";
    pub const PUNCTUATION_CONSISTENCY: &str = "punctuation_consistency";
}

/// Sentence openers that signal evidence rather than a topic claim;
/// pass 1 skips these instead of demanding thesis overlap.
const EVIDENCE_OPENERS: &[&str] = &[
    "for example",
    "for instance",
    "according to",
    "as shown in",
    "evidence shows",
    "research shows",
];

/// Substrings that count as nearby evidence for a strong claim.
const EVIDENCE_MARKERS: &[&str] = &[
    "for example",
    "for instance",
    "according to",
    "evidence",
    "data",
    "study",
    "quote",
];

const TRANSITION_MARKERS: &[&str] = &[
    "however",
    "therefore",
    "in addition",
    "thus",
    "moreover",
    "consequently",
    "meanwhile",
    "nevertheless",
];

const FILLER_PHRASES: &[&str] = &[
    "in general",
    "it should be noted",
    "actually",
    "basically",
    "very",
];

/// Sentences longer than this many words get flagged.
const LONG_SENTENCE_WORDS: usize = 35;

/// Sections with at least this many sentences are expected to use
/// transitions.
const TRANSITION_SENTENCE_MIN: usize = 4;

/// The analyzer behind [`super::build_revision_passes`]. Compiles its
/// patterns once; reusable across calls and safe to share between threads.
pub struct RevisionEngine {
    quote_pair: Regex,
    strong_claim: Regex,
    passive_voice: Regex,
    word: Regex,
}

impl RevisionEngine {
    pub fn new() -> Self {
        Self {
            // two double-quoted spans separated only by whitespace
            quote_pair: Regex::new(r#""[^"]+"\s*"[^"]+""#).unwrap(),
            strong_claim: Regex::new(
                r"(?i)\b(?:shows|proves|demonstrates|leads to|indicates|reveals)\b",
            )
            .unwrap(),
            passive_voice: Regex::new(r"(?i)\b(?:was|were|is|are|been|be)\s+\w+ed\b").unwrap(),
            word: Regex::new(r"\w+").unwrap(),
        }
    }

    /// Run every pass and return the raw per-pass issue lists in fixed
    /// pass order. `build_revision_passes` wraps these with ids/titles.
    pub(super) fn run(
        &self,
        sections: &[Section],
        target_word_count: usize,
        thesis: Option<&str>,
    ) -> [Vec<Issue>; 7] {
        tracing::debug!(
            sections = sections.len(),
            target_words = target_word_count,
            has_thesis = thesis.is_some_and(|t| !t.trim().is_empty()),
            "running revision passes"
        );

        let results = [
            self.thesis_focus(sections, thesis),
            self.structure(sections),
            self.argument_evidence(sections),
            self.flow_cohesion(sections),
            self.style_clarity(sections),
            self.word_balance(sections, target_word_count),
            self.mechanics(sections),
        ];

        tracing::debug!(
            issues = results.iter().map(Vec::len).sum::<usize>(),
            "revision passes finished"
        );
        results
    }

    /// Pass 1: does each section's first sentence connect to the thesis?
    fn thesis_focus(&self, sections: &[Section], thesis: Option<&str>) -> Vec<Issue> {
        let mut issues = Vec::new();
        let thesis = match thesis {
            Some(t) if !t.trim().is_empty() => t,
            _ => return issues,
        };
        let thesis_tokens = text::tokenize_meaningful(thesis);

        for section in sections {
            let Some(first) = text::split_sentences(&section.text).into_iter().next() else {
                continue;
            };
            let lowered = first.to_lowercase();
            if EVIDENCE_OPENERS.iter().any(|m| lowered.starts_with(m)) {
                continue;
            }
            let sentence_tokens = text::tokenize_meaningful(&first);
            let overlaps = sentence_tokens
                .iter()
                .any(|t| thesis_tokens.contains(t));
            if !overlaps {
                issues.push(
                    Issue::new(
                        codes::THESIS_CONNECTION,
                        Severity::Medium,
                        "First sentence shares no key terms with the thesis",
                    )
                    .in_section(&section.title),
                );
            }
        }
        issues
    }

    /// Pass 2: topic sentences, quote handling, and closing transitions.
    fn structure(&self, sections: &[Section]) -> Vec<Issue> {
        let mut issues = Vec::new();
        for section in sections {
            let sentences = text::split_sentences(&section.text);

            if let Some(first) = sentences.first() {
                if first.starts_with(['"', '\u{201C}', '\'']) || first.ends_with('?') {
                    issues.push(
                        Issue::new(
                            codes::MISSING_TOPIC_SENTENCE,
                            Severity::Medium,
                            "Consider opening with a clear topic sentence instead of a quote or question",
                        )
                        .in_section(&section.title),
                    );
                }
            }

            if self.quote_pair.is_match(&section.text) {
                issues.push(
                    Issue::new(
                        codes::QUOTE_WITHOUT_ANALYSIS,
                        Severity::Medium,
                        "Quotes placed back-to-back need your own analysis between them",
                    )
                    .in_section(&section.title),
                );
            }

            if sentences.len() >= TRANSITION_SENTENCE_MIN {
                if let Some(last) = sentences.last() {
                    let lowered = last.to_lowercase();
                    if !TRANSITION_MARKERS.iter().any(|m| lowered.contains(m)) {
                        issues.push(
                            Issue::new(
                                codes::MISSING_CLOSING_TRANSITION,
                                Severity::Low,
                                "Last sentence could use a transition to wrap up the paragraph",
                            )
                            .in_section(&section.title),
                        );
                    }
                }
            }
        }
        issues
    }

    /// Pass 3: strong claims without evidence, stacked quotes.
    fn argument_evidence(&self, sections: &[Section]) -> Vec<Issue> {
        let mut issues = Vec::new();
        for section in sections {
            let lowered = section.text.to_lowercase();

            let has_claim = self.strong_claim.is_match(&section.text);
            let has_evidence = EVIDENCE_MARKERS.iter().any(|m| lowered.contains(m));
            if has_claim && !has_evidence {
                issues.push(
                    Issue::new(
                        codes::CLAIM_WITHOUT_EVIDENCE,
                        Severity::Medium,
                        "Strong claim appears without nearby supporting evidence",
                    )
                    .in_section(&section.title),
                );
            }

            if self.quote_pair.is_match(&section.text) {
                issues.push(
                    Issue::new(
                        codes::STACKED_QUOTES,
                        Severity::Medium,
                        "Consecutive quotes should be separated by analysis",
                    )
                    .in_section(&section.title),
                );
            }
        }
        issues
    }

    /// Pass 4: sentence length and transition coverage.
    fn flow_cohesion(&self, sections: &[Section]) -> Vec<Issue> {
        let mut issues = Vec::new();
        for section in sections {
            let sentences = text::split_sentences(&section.text);

            let longest = sentences.iter().map(|s| text::count_words(s)).max().unwrap_or(0);
            if longest > LONG_SENTENCE_WORDS {
                issues.push(
                    Issue::new(
                        codes::LONG_SENTENCE,
                        Severity::Low,
                        format!("Longest sentence runs {} words - consider splitting it", longest),
                    )
                    .in_section(&section.title),
                );
            }

            if sentences.len() >= TRANSITION_SENTENCE_MIN {
                let lowered = section.text.to_lowercase();
                if !TRANSITION_MARKERS.iter().any(|m| lowered.contains(m)) {
                    issues.push(
                        Issue::new(
                            codes::WEAK_TRANSITION,
                            Severity::Low,
                            "No transition words found - consider connecting ideas explicitly",
                        )
                        .in_section(&section.title),
                    );
                }
            }
        }
        issues
    }

    /// Pass 5: filler phrases, passive voice, and immediate word
    /// repetition. The checks are independent; a section can trigger all
    /// three.
    fn style_clarity(&self, sections: &[Section]) -> Vec<Issue> {
        let mut issues = Vec::new();
        for section in sections {
            let lowered = section.text.to_lowercase();

            if let Some(filler) = FILLER_PHRASES.iter().find(|f| lowered.contains(*f)) {
                issues.push(
                    Issue::new(
                        codes::FILLER_PHRASE,
                        Severity::Low,
                        format!("Consider removing filler phrase: \"{}\"", filler),
                    )
                    .in_section(&section.title),
                );
            }

            if self.passive_voice.is_match(&section.text) {
                issues.push(
                    Issue::new(
                        codes::PASSIVE_VOICE,
                        Severity::Low,
                        "Passive voice detected - prefer active constructions",
                    )
                    .in_section(&section.title),
                );
            }

            if let Some(word) = self.first_immediate_repeat(&section.text) {
                issues.push(
                    Issue::new(
                        codes::REPEATED_WORD,
                        Severity::Low,
                        format!("Immediately repeated word: \"{}\"", word),
                    )
                    .in_section(&section.title),
                );
            }
        }
        issues
    }

    /// Pass 6: overall draft length against target, then per-section
    /// balance against each section's own target.
    fn word_balance(&self, sections: &[Section], target_word_count: usize) -> Vec<Issue> {
        let mut issues = Vec::new();

        let total: usize = sections.iter().map(|s| text::count_words(&s.text)).sum();
        let allowed_delta = (target_word_count as f64 * 0.1).round() as i64;
        if (total as i64 - target_word_count as i64).abs() > allowed_delta {
            issues.push(Issue::new(
                codes::OVERALL_WORD_COUNT,
                Severity::High,
                format!(
                    "Draft is {} words against a target of {}",
                    total, target_word_count
                ),
            ));
        }

        for section in sections {
            let lower = (section.target_words as f64 * 0.8).floor() as usize;
            let upper = (section.target_words as f64 * 1.2).ceil() as usize;
            let actual = text::count_words(&section.text);
            if actual < lower || actual > upper {
                issues.push(
                    Issue::new(
                        codes::SECTION_WORD_BALANCE,
                        Severity::Medium,
                        format!(
                            "Section has {} words, outside the {}-{} target range",
                            actual, lower, upper
                        ),
                    )
                    .in_section(&section.title),
                );
            }
        }
        issues
    }

    /// Pass 7: double spaces, duplicated words, and punctuation balance.
    fn mechanics(&self, sections: &[Section]) -> Vec<Issue> {
        let mut issues = Vec::new();
        for section in sections {
            if section.text.contains("  ") {
                issues.push(
                    Issue::new(codes::DOUBLE_SPACE, Severity::Low, "Found double spaces")
                        .in_section(&section.title),
                );
            }

            if let Some(word) = self.first_immediate_repeat(&section.text) {
                issues.push(
                    Issue::new(
                        codes::DUPLICATE_WORD,
                        Severity::Low,
                        format!("Repeated words found: \"{}\"", word),
                    )
                    .in_section(&section.title),
                );
            }

            if has_odd_quotes(&section.text) || has_unbalanced_parens(&section.text) {
                issues.push(
                    Issue::new(
                        codes::PUNCTUATION_CONSISTENCY,
                        Severity::Medium,
                        "Unbalanced quotation marks or parentheses",
                    )
                    .in_section(&section.title),
                );
            }
        }
        issues
    }

    /// First word immediately repeated with only whitespace between the
    /// two occurrences, case-insensitive. Equivalent to the classic
    /// `\b(\w+)\s+\1\b` check; the regex crate has no backreferences, so
    /// this walks word matches and inspects the gap between neighbors.
    fn first_immediate_repeat(&self, text: &str) -> Option<String> {
        let mut prev: Option<(String, usize)> = None;
        for m in self.word.find_iter(text) {
            let lowered = m.as_str().to_lowercase();
            if let Some((prev_word, prev_end)) = &prev {
                let between = &text[*prev_end..m.start()];
                if *prev_word == lowered
                    && !between.is_empty()
                    && between.chars().all(char::is_whitespace)
                {
                    return Some(lowered);
                }
            }
            prev = Some((lowered, m.end()));
        }
        None
    }
}

impl Default for RevisionEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn has_odd_quotes(text: &str) -> bool {
    text.matches('"').count() % 2 == 1
}

/// Single left-to-right scan; a negative running balance or a nonzero
/// final balance both count as unbalanced.
fn has_unbalanced_parens(text: &str) -> bool {
    let mut balance: i32 = 0;
    for ch in text.chars() {
        match ch {
            '(' => balance += 1,
            ')' => {
                balance -= 1;
                if balance < 0 {
                    return true;
                }
            }
            _ => {}
        }
    }
    balance != 0
}
