//! Stage/day allocation for an essay assignment.
//!
//! Pure function of the number of days available; the caller computes
//! that from the deadline so the planner itself never reads the clock.

use serde::{Deserialize, Serialize};

/// One planned stage with its day budget and 1-based start day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineStage {
    pub name: String,
    pub days: u32,
    pub start_day: u32,
}

/// Suggested schedule across the four essay stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    pub total_days: u32,
    pub stages: Vec<TimelineStage>,
}

/// Distribute `total_days` across ideas/organize/write/revise. Returns
/// `None` when there is not even one day to work with.
pub fn plan_timeline(total_days: u32) -> Option<Timeline> {
    if total_days < 1 {
        return None;
    }

    let (ideas, organize, write, revise) = if total_days >= 7 {
        (
            1,
            1,
            ((f64::from(total_days) * 0.6) as u32).max(2),
            ((f64::from(total_days) * 0.3) as u32).max(1),
        )
    } else {
        (1, 1, total_days.saturating_sub(2).max(1), 1)
    };

    let stages = vec![
        TimelineStage {
            name: "Pick Ideas".to_string(),
            days: ideas,
            start_day: 1,
        },
        TimelineStage {
            name: "Organize".to_string(),
            days: organize,
            start_day: 1 + ideas,
        },
        TimelineStage {
            name: "Write".to_string(),
            days: write,
            start_day: 2 + ideas,
        },
        TimelineStage {
            name: "Revise".to_string(),
            days: revise,
            start_day: 2 + ideas + write,
        },
    ];

    Some(Timeline { total_days, stages })
}
