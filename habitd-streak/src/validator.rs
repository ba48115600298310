//! Day validation rules.
//!
//! Whether a calendar day "counts" toward a streak is decided by a rule
//! set. Two rule versions have existed and they are not equivalent, so the
//! choice is an explicit, configurable [`RuleSet`] rather than something
//! buried in the arithmetic:
//!
//! - [`RuleSet::CombinedRate`] (current default): at least 60% of the
//!   day's routines-plus-tasks completed, with at least one item due.
//! - [`RuleSet::IntentionRoutine`] (legacy): a daily intention recorded
//!   and at least 40% of due routines completed; tasks are ignored.

use chrono::NaiveDate;
use serde::Serialize;

use habitd_common::Error;

use crate::facts::DayFacts;

/// The versioned day-validity rule set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RuleSet {
    /// Combined completion rate over routines and tasks, gated on a
    /// minimum item count.
    CombinedRate {
        /// Fraction of due items that must be completed
        required_rate: f64,
        /// Minimum routines-plus-tasks due for the day to be passable
        min_items: u32,
    },
    /// Legacy rule: intention marker present and routine completion rate
    /// at threshold; tasks do not participate.
    IntentionRoutine {
        /// Fraction of due routines that must be completed
        required_routine_rate: f64,
    },
}

impl Default for RuleSet {
    fn default() -> Self {
        RuleSet::CombinedRate {
            required_rate: 0.60,
            min_items: 1,
        }
    }
}

impl RuleSet {
    /// The legacy intention-plus-routines rule at its historical threshold.
    pub fn legacy() -> Self {
        RuleSet::IntentionRoutine {
            required_routine_rate: 0.40,
        }
    }
}

impl std::str::FromStr for RuleSet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.trim().to_ascii_lowercase().as_str() {
            "combined" => Ok(RuleSet::default()),
            "intention" => Ok(RuleSet::legacy()),
            other => Err(Error::Config(format!(
                "unknown rule set '{other}' (expected 'combined' or 'intention')"
            ))),
        }
    }
}

/// Everything the validator derives for one day.
///
/// Serialized as-is in the `GET /streak/day` response and embedded as
/// `today_validation` in the full streak report.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DayValidation {
    pub date: NaiveDate,
    pub has_intention: bool,
    pub total_routines: u32,
    pub completed_routines: u32,
    pub total_tasks: u32,
    pub completed_tasks: u32,
    pub routine_rate: f64,
    pub task_rate: f64,
    pub overall_rate: f64,
    pub is_valid: bool,
}

/// Apply `rules` to one day's facts. Pure and deterministic.
pub fn validate(facts: &DayFacts, rules: &RuleSet) -> DayValidation {
    let routine_rate = rate(facts.routines_completed, facts.routines_due, 1.0);
    let task_rate = rate(facts.tasks_completed, facts.tasks_total, 1.0);

    let total_items = facts.routines_due + facts.tasks_total;
    let completed_items = facts.routines_completed + facts.tasks_completed;
    let overall_rate = rate(completed_items, total_items, 0.0);

    let is_valid = match *rules {
        RuleSet::CombinedRate {
            required_rate,
            min_items,
        } => total_items >= min_items && overall_rate >= required_rate,
        RuleSet::IntentionRoutine {
            required_routine_rate,
        } => facts.has_intention && routine_rate >= required_routine_rate,
    };

    DayValidation {
        date: facts.date,
        has_intention: facts.has_intention,
        total_routines: facts.routines_due,
        completed_routines: facts.routines_completed,
        total_tasks: facts.tasks_total,
        completed_tasks: facts.tasks_completed,
        routine_rate,
        task_rate,
        overall_rate,
        is_valid,
    }
}

/// Completion rate with an explicit empty-case value.
///
/// Per-category rates treat "nothing due" as fully complete (an empty
/// category never blocks validity); the combined rate treats "nothing at
/// all" as zero (an empty day never passes).
fn rate(completed: u32, total: u32, when_empty: f64) -> f64 {
    if total == 0 {
        when_empty
    } else {
        f64::from(completed) / f64::from(total)
    }
}
