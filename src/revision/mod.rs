//! Rule-based revision analysis.
//!
//! Seven independent passes inspect a draft's sections and emit typed
//! issues. The engine never calls out to an AI model and never reads the
//! clock. Identical inputs always produce identical output, which is what
//! makes per-issue dispositions addressable by a stable composite key.

mod passes;

pub use passes::codes;

use passes::RevisionEngine;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Target word count assumed when the assignment carries none.
pub const DEFAULT_TARGET_WORDS: usize = 1000;

/// How urgent an issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-user disposition of an issue, persisted by the caller and merged
/// back into fresh analysis output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    #[default]
    Open,
    Postponed,
    Ignored,
    Resolved,
}

impl ActionStatus {
    /// Parse a persisted status string. Anything outside the known set is
    /// `None`; callers fall back to `Open`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "open" => Some(ActionStatus::Open),
            "postponed" => Some(ActionStatus::Postponed),
            "ignored" => Some(ActionStatus::Ignored),
            "resolved" => Some(ActionStatus::Resolved),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionStatus::Open => "open",
            ActionStatus::Postponed => "postponed",
            ActionStatus::Ignored => "ignored",
            ActionStatus::Resolved => "resolved",
        }
    }
}

/// One named section of a draft, assembled by the caller from persisted
/// writing content plus unit metadata. Ephemeral per analysis call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub text: String,
    pub target_words: usize,
}

impl Section {
    pub fn new(title: impl Into<String>, text: impl Into<String>, target_words: usize) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            target_words,
        }
    }
}

/// One flagged problem found by a pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub code: String,
    pub severity: Severity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_status: Option<ActionStatus>,
}

impl Issue {
    pub fn new(code: &str, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            severity,
            message: message.into(),
            section_title: None,
            pass_id: None,
            action_status: None,
        }
    }

    pub fn in_section(mut self, title: &str) -> Self {
        self.section_title = Some(title.to_string());
        self
    }

    fn with_pass(mut self, pass_id: &str) -> Self {
        self.pass_id = Some(pass_id.to_string());
        self
    }
}

/// Output of a single pass. Passes with no findings still appear with an
/// empty issue list so the pass order stays visible to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassResult {
    pub pass_id: String,
    pub pass_title: String,
    pub issues: Vec<Issue>,
}

/// The seven passes in their fixed order.
pub(crate) const PASSES: [(&str, &str); 7] = [
    ("pass_1_thesis_focus", "Thesis & Focus"),
    ("pass_2_structure", "Structure"),
    ("pass_3_argument_evidence", "Argument & Evidence"),
    ("pass_4_flow_cohesion", "Flow & Cohesion"),
    ("pass_5_style_clarity", "Style & Clarity"),
    ("pass_6_word_balance", "Word Count & Balance"),
    ("pass_7_mechanics", "Mechanics"),
];

/// Run all seven passes over the supplied sections.
///
/// Always returns exactly seven [`PassResult`] entries in fixed pass
/// order. A missing or blank thesis simply means pass 1 finds nothing;
/// malformed optional input never errors.
pub fn build_revision_passes(
    sections: &[Section],
    target_word_count: usize,
    thesis: Option<&str>,
) -> Vec<PassResult> {
    let engine = RevisionEngine::new();
    let per_pass = engine.run(sections, target_word_count, thesis);

    PASSES
        .iter()
        .zip(per_pass)
        .map(|((pass_id, pass_title), issues)| PassResult {
            pass_id: pass_id.to_string(),
            pass_title: pass_title.to_string(),
            issues: issues
                .into_iter()
                .map(|issue| issue.with_pass(pass_id))
                .collect(),
        })
        .collect()
}

/// Flatten pass results into the legacy flat issue shape, preserving pass
/// order then within-pass order.
pub fn build_revision_issues(
    sections: &[Section],
    target_word_count: usize,
    thesis: Option<&str>,
) -> Vec<Issue> {
    build_revision_passes(sections, target_word_count, thesis)
        .into_iter()
        .flat_map(|pass| pass.issues)
        .collect()
}

/// Stable composite key for persisting per-issue dispositions:
/// `pass_id::code::section_title`, with empty segments for absent fields.
pub fn issue_key(issue: &Issue) -> String {
    format!(
        "{}::{}::{}",
        issue.pass_id.as_deref().unwrap_or(""),
        issue.code,
        issue.section_title.as_deref().unwrap_or("")
    )
}

/// Merge persisted per-user dispositions into freshly built issues.
/// Unknown or missing status values default to `open`.
pub fn apply_action_statuses(issues: &mut [Issue], statuses: &HashMap<String, String>) {
    for issue in issues.iter_mut() {
        let status = statuses
            .get(&issue_key(issue))
            .and_then(|raw| ActionStatus::parse(raw))
            .unwrap_or_default();
        issue.action_status = Some(status);
    }
}
