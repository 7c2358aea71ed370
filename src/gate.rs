//! Completion gate: decides whether a unit's locally-held content is good
//! enough to mark the unit completed.
//!
//! The gate never throws for malformed content. Persisted JSON bags are
//! decoded into a [`UnitContent`] variant per unit type; missing or
//! mistyped keys degrade to defaults that fail the check instead of
//! erroring. A rejection is a normal control-flow outcome carried in
//! [`CompletionCheck`], not an error.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lifecycle state of a unit. Only `Active` units go through the gate;
/// completed units never transition back through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitState {
    Unread,
    Active,
    Completed,
}

impl UnitState {
    pub fn can_mark_completed(self) -> bool {
        matches!(self, UnitState::Active)
    }
}

/// The kind of unit being gated. Unknown kinds deserialize to `Unknown`
/// and are rejected rather than crashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Reading,
    Thesis,
    Outline,
    Writing,
    Revise,
    #[serde(other)]
    Unknown,
}

impl UnitKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitKind::Reading => "reading",
            UnitKind::Thesis => "thesis",
            UnitKind::Outline => "outline",
            UnitKind::Writing => "writing",
            UnitKind::Revise => "revise",
            UnitKind::Unknown => "unknown",
        }
    }
}

/// Outcome of a gate check. `ok: false` aborts the transition and the
/// reason is surfaced to the student as a validation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionCheck {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl CompletionCheck {
    fn pass() -> Self {
        Self {
            ok: true,
            reason: None,
        }
    }

    fn reject(reason: &str) -> Self {
        Self {
            ok: false,
            reason: Some(reason.to_string()),
        }
    }
}

/// Typed view of a unit's persisted content bag, one variant per unit
/// type. Built leniently: whatever the bag holds, decoding succeeds and
/// the gate logic runs on defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitContent {
    Reading,
    Thesis { thesis: String, confirmed: bool },
    Outline { section_count: usize, confirmed: bool },
    Writing { text: String, confirmed: bool },
    Revise { confirmed: bool },
    Unsupported,
}

impl UnitContent {
    /// Decode a persisted content bag for the given unit kind. Absent or
    /// null content behaves as an empty bag; `Value::get` already yields
    /// `None` for every key of a non-object.
    pub fn from_value(kind: UnitKind, content: Option<&Value>) -> Self {
        let get = |key: &str| content.and_then(|bag| bag.get(key));

        match kind {
            UnitKind::Reading => UnitContent::Reading,
            UnitKind::Thesis => UnitContent::Thesis {
                thesis: get("thesis")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                confirmed: is_truthy(get("confirmed")),
            },
            UnitKind::Outline => UnitContent::Outline {
                // anything that is not an array counts as no sections
                section_count: get("sections").and_then(Value::as_array).map_or(0, Vec::len),
                confirmed: is_truthy(get("confirmed")),
            },
            UnitKind::Writing => UnitContent::Writing {
                text: get("text")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                confirmed: is_truthy(get("confirmed")),
            },
            UnitKind::Revise => UnitContent::Revise {
                confirmed: is_truthy(get("confirmed")),
            },
            UnitKind::Unknown => UnitContent::Unsupported,
        }
    }

    /// Run the per-variant completion criteria.
    pub fn check(&self) -> CompletionCheck {
        match self {
            UnitContent::Reading => CompletionCheck::pass(),
            UnitContent::Thesis { thesis, confirmed } => {
                if thesis.trim().chars().count() < 10 {
                    CompletionCheck::reject("Thesis must be at least 10 characters long.")
                } else if !confirmed {
                    CompletionCheck::reject("Confirm your thesis before completing this step.")
                } else {
                    CompletionCheck::pass()
                }
            }
            UnitContent::Outline {
                section_count,
                confirmed,
            } => {
                if *section_count == 0 {
                    CompletionCheck::reject("Outline needs at least one section.")
                } else if !confirmed {
                    CompletionCheck::reject("Confirm your outline before completing this step.")
                } else {
                    CompletionCheck::pass()
                }
            }
            UnitContent::Writing { text, confirmed } => {
                if text.trim().is_empty() {
                    CompletionCheck::reject("Write some draft content before completing this step.")
                } else if !confirmed {
                    CompletionCheck::reject("Confirm your draft before completing this step.")
                } else {
                    CompletionCheck::pass()
                }
            }
            UnitContent::Revise { confirmed } => {
                if !confirmed {
                    CompletionCheck::reject("Confirm your revision before completing this step.")
                } else {
                    CompletionCheck::pass()
                }
            }
            UnitContent::Unsupported => CompletionCheck::reject("Unsupported unit type."),
        }
    }
}

/// Gate a unit-state transition to completed. Called with the unit's
/// persisted JSON content immediately before the transition is committed.
pub fn can_complete_unit(kind: UnitKind, content: Option<&Value>) -> CompletionCheck {
    let check = UnitContent::from_value(kind, content).check();
    if !check.ok {
        tracing::debug!(
            unit = kind.as_str(),
            reason = check.reason.as_deref().unwrap_or(""),
            "completion gate rejected unit"
        );
    }
    check
}

/// A usable thesis statement: at least 10 characters trimmed, and one or
/// two sentences.
pub fn validate_thesis_statement(thesis: &str) -> bool {
    if thesis.trim().chars().count() < 10 {
        return false;
    }
    let sentences = thesis
        .split('.')
        .filter(|s| !s.trim().is_empty())
        .count();
    (1..=2).contains(&sentences)
}

/// JavaScript-style truthiness for persisted JSON values: null, false,
/// zero, and the empty string are falsy; everything else is truthy.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reading_always_passes() {
        assert!(can_complete_unit(UnitKind::Reading, None).ok);
        assert!(can_complete_unit(UnitKind::Reading, Some(&Value::Null)).ok);
        assert!(can_complete_unit(UnitKind::Reading, Some(&json!({}))).ok);
    }

    #[test]
    fn test_thesis_too_short() {
        let content = json!({ "thesis": "short", "confirmed": true });
        let check = can_complete_unit(UnitKind::Thesis, Some(&content));
        assert!(!check.ok);
        assert!(check.reason.unwrap().contains("10 characters"));
    }

    #[test]
    fn test_thesis_long_enough() {
        let content = json!({ "thesis": "This thesis is long enough.", "confirmed": true });
        assert!(can_complete_unit(UnitKind::Thesis, Some(&content)).ok);
    }

    #[test]
    fn test_thesis_length_checked_before_confirmation() {
        let content = json!({ "thesis": "short", "confirmed": false });
        let check = can_complete_unit(UnitKind::Thesis, Some(&content));
        assert!(check.reason.unwrap().contains("10 characters"));

        let content = json!({ "thesis": "This thesis is long enough.", "confirmed": false });
        let check = can_complete_unit(UnitKind::Thesis, Some(&content));
        assert!(check.reason.unwrap().contains("Confirm"));
    }

    #[test]
    fn test_thesis_non_string_fails_like_missing() {
        let content = json!({ "thesis": 42, "confirmed": true });
        assert!(!can_complete_unit(UnitKind::Thesis, Some(&content)).ok);
    }

    #[test]
    fn test_outline_requires_nonempty_sections_array() {
        let content = json!({ "sections": [], "confirmed": true });
        assert!(!can_complete_unit(UnitKind::Outline, Some(&content)).ok);

        let content = json!({ "sections": "not-an-array", "confirmed": true });
        assert!(!can_complete_unit(UnitKind::Outline, Some(&content)).ok);

        let content = json!({ "sections": [{ "title": "Introduction" }], "confirmed": true });
        assert!(can_complete_unit(UnitKind::Outline, Some(&content)).ok);
    }

    #[test]
    fn test_outline_requires_confirmation() {
        let content = json!({ "sections": [{ "title": "Introduction" }] });
        let check = can_complete_unit(UnitKind::Outline, Some(&content));
        assert!(!check.ok);
        assert!(check.reason.unwrap().contains("Confirm"));
    }

    #[test]
    fn test_writing_requires_text_and_confirmation() {
        let content = json!({ "text": "   ", "confirmed": true });
        assert!(!can_complete_unit(UnitKind::Writing, Some(&content)).ok);

        let content = json!({ "text": "A real draft.", "confirmed": false });
        assert!(!can_complete_unit(UnitKind::Writing, Some(&content)).ok);

        let content = json!({ "text": "A real draft.", "confirmed": true });
        assert!(can_complete_unit(UnitKind::Writing, Some(&content)).ok);
    }

    #[test]
    fn test_revise_requires_confirmation_only() {
        assert!(!can_complete_unit(UnitKind::Revise, Some(&json!({}))).ok);
        assert!(can_complete_unit(UnitKind::Revise, Some(&json!({ "confirmed": true }))).ok);
    }

    #[test]
    fn test_absent_content_never_panics() {
        for kind in [
            UnitKind::Reading,
            UnitKind::Thesis,
            UnitKind::Outline,
            UnitKind::Writing,
            UnitKind::Revise,
        ] {
            let _ = can_complete_unit(kind, None);
            let _ = can_complete_unit(kind, Some(&Value::Null));
        }
    }

    #[test]
    fn test_unknown_unit_kind() {
        let check = can_complete_unit(UnitKind::Unknown, Some(&json!({ "confirmed": true })));
        assert!(!check.ok);
        assert_eq!(check.reason.as_deref(), Some("Unsupported unit type."));
    }

    #[test]
    fn test_unit_kind_deserializes_unknown_strings() {
        let kind: UnitKind = serde_json::from_str("\"quiz\"").unwrap();
        assert_eq!(kind, UnitKind::Unknown);
        let kind: UnitKind = serde_json::from_str("\"thesis\"").unwrap();
        assert_eq!(kind, UnitKind::Thesis);
    }

    #[test]
    fn test_truthiness_follows_source_semantics() {
        let content = json!({ "sections": [1], "confirmed": 0 });
        assert!(!can_complete_unit(UnitKind::Outline, Some(&content)).ok);

        let content = json!({ "sections": [1], "confirmed": "yes" });
        assert!(can_complete_unit(UnitKind::Outline, Some(&content)).ok);

        let content = json!({ "sections": [1], "confirmed": "" });
        assert!(!can_complete_unit(UnitKind::Outline, Some(&content)).ok);

        let content = json!({ "sections": [1], "confirmed": 1 });
        assert!(can_complete_unit(UnitKind::Outline, Some(&content)).ok);
    }

    #[test]
    fn test_unit_state_gate() {
        assert!(UnitState::Active.can_mark_completed());
        assert!(!UnitState::Unread.can_mark_completed());
        assert!(!UnitState::Completed.can_mark_completed());
    }

    #[test]
    fn test_validate_thesis_statement() {
        assert!(validate_thesis_statement("School uniforms improve focus."));
        assert!(validate_thesis_statement(
            "Uniforms help. They reduce distraction."
        ));
        assert!(!validate_thesis_statement("Too short"));
        assert!(!validate_thesis_statement(
            "One. Two. Three. Too many sentences here."
        ));
    }
}
