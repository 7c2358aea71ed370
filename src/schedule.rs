//! Deadline-based assignment ordering.
//!
//! The comparator is deadline-first, but inside a comparability window
//! two deadlines count as "close enough" for a per-student preference
//! score to take over. The tie-break chain makes the ordering a total
//! order, so re-sorting the output (or sorting a reversed input) yields
//! the same sequence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Deadlines closer than this are comparable and preference may reorder
/// them. 48 hours.
pub const DEFAULT_DEADLINE_WINDOW_MS: i64 = 48 * 60 * 60 * 1000;

/// Snapshot of an assignment's progress, computed externally from
/// persisted unit counts. Ordering never mutates these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentSummary {
    pub id: String,
    pub title: String,
    pub deadline: DateTime<Utc>,
    pub total_units: u32,
    pub completed_units: u32,
}

impl AssignmentSummary {
    /// Fraction of units completed; 0 when the assignment has no units.
    pub fn completion_ratio(&self) -> f64 {
        if self.total_units == 0 {
            0.0
        } else {
            f64::from(self.completed_units) / f64::from(self.total_units)
        }
    }
}

/// Tunables for [`sort_assignments_by_deadline`].
#[derive(Debug, Clone)]
pub struct SortOptions {
    pub comparable_deadline_window_ms: i64,
    /// Per-assignment preference scores keyed by id; higher sorts first
    /// inside the window. Missing entries score 0.
    pub preference_scores: Option<HashMap<String, f64>>,
}

impl Default for SortOptions {
    fn default() -> Self {
        Self {
            comparable_deadline_window_ms: DEFAULT_DEADLINE_WINDOW_MS,
            preference_scores: None,
        }
    }
}

/// Produce a priority-ordered copy of the assignment list. The input is
/// left untouched.
pub fn sort_assignments_by_deadline(
    items: &[AssignmentSummary],
    options: &SortOptions,
) -> Vec<AssignmentSummary> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| compare_assignments(a, b, options));
    sorted
}

fn compare_assignments(
    a: &AssignmentSummary,
    b: &AssignmentSummary,
    options: &SortOptions,
) -> Ordering {
    let diff_ms = a
        .deadline
        .signed_duration_since(b.deadline)
        .num_milliseconds();

    // Outside the window, preference is irrelevant: strict deadline order
    if diff_ms.abs() > options.comparable_deadline_window_ms {
        return a.deadline.cmp(&b.deadline);
    }

    let score = |item: &AssignmentSummary| -> f64 {
        options
            .preference_scores
            .as_ref()
            .and_then(|scores| scores.get(&item.id))
            .copied()
            .unwrap_or(0.0)
    };

    // Higher preference first
    let by_preference = score(b).partial_cmp(&score(a)).unwrap_or(Ordering::Equal);
    if by_preference != Ordering::Equal {
        return by_preference;
    }

    let by_deadline = a.deadline.cmp(&b.deadline);
    if by_deadline != Ordering::Equal {
        return by_deadline;
    }

    // More-complete assignments surface first
    let by_completion = b
        .completion_ratio()
        .partial_cmp(&a.completion_ratio())
        .unwrap_or(Ordering::Equal);
    if by_completion != Ordering::Equal {
        return by_completion;
    }

    a.title.cmp(&b.title)
}
