//! The backward streak walk.
//!
//! Starting at a reference date, evaluate one day at a time going
//! backward. The first invalid day breaks the chain; there is no partial
//! credit and no skipping. A hard horizon bounds the walk, so at most 366
//! dates (reference plus 365 days of lookback) are ever evaluated.

use chrono::{Days, NaiveDate};

use crate::validator::DayValidation;

/// Hard lookback horizon in days before the reference date.
///
/// An unbroken history longer than this reports the capped length; that
/// is a documented limit of the walk, not an error.
pub const LOOKBACK_DAYS: u64 = 365;

/// Result of one backward walk.
#[derive(Debug, Clone)]
pub struct StreakOutcome {
    /// Consecutive valid days ending at the reference date (0 when the
    /// reference day itself is invalid)
    pub current_streak: u32,
    /// Earliest day of the current chain
    pub streak_start: Option<NaiveDate>,
    /// Most recent valid day of the current chain
    pub last_valid_date: Option<NaiveDate>,
    /// Full validation detail for the reference day
    pub reference_day: DayValidation,
}

/// Walk backward from `reference`, evaluating each day with `validate`.
///
/// The validator is injected as a closure so the walk stays pure: callers
/// hand in a function over a preloaded fact window, and tests hand in
/// synthetic histories (and can count invocations).
pub fn walk<F>(reference: NaiveDate, mut validate: F) -> StreakOutcome
where
    F: FnMut(NaiveDate) -> DayValidation,
{
    let reference_day = validate(reference);
    if !reference_day.is_valid {
        return StreakOutcome {
            current_streak: 0,
            streak_start: None,
            last_valid_date: None,
            reference_day,
        };
    }

    let mut current_streak = 1u32;
    let mut streak_start = reference;
    for offset in 1..=LOOKBACK_DAYS {
        let date = match reference.checked_sub_days(Days::new(offset)) {
            Some(date) => date,
            None => break, // walked off the calendar
        };
        if !validate(date).is_valid {
            break;
        }
        current_streak += 1;
        streak_start = date;
    }

    StreakOutcome {
        current_streak,
        streak_start: Some(streak_start),
        last_valid_date: Some(reference),
        reference_day,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::collections::HashSet;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn validation(date: NaiveDate, is_valid: bool) -> DayValidation {
        DayValidation {
            date,
            has_intention: false,
            total_routines: 1,
            completed_routines: u32::from(is_valid),
            total_tasks: 0,
            completed_tasks: 0,
            routine_rate: f64::from(u8::from(is_valid)),
            task_rate: 1.0,
            overall_rate: f64::from(u8::from(is_valid)),
            is_valid,
        }
    }

    /// Build a validator closure from a set of valid dates.
    fn history(valid: &HashSet<NaiveDate>) -> impl FnMut(NaiveDate) -> DayValidation + '_ {
        move |date| validation(date, valid.contains(&date))
    }

    #[test]
    fn invalid_reference_day_means_zero_streak() {
        let valid: HashSet<_> = [day(2024, 1, 4), day(2024, 1, 3)].into();
        let outcome = walk(day(2024, 1, 5), history(&valid));
        assert_eq!(outcome.current_streak, 0);
        assert_eq!(outcome.streak_start, None);
        assert_eq!(outcome.last_valid_date, None);
        assert!(!outcome.reference_day.is_valid);
    }

    #[test]
    fn chain_break_stops_the_walk_immediately() {
        // Valid on T, T-1, T-2; invalid on T-3; valid again on T-4.
        // The day beyond the break must not resurrect the chain.
        let t = day(2024, 3, 10);
        let valid: HashSet<_> = [t, day(2024, 3, 9), day(2024, 3, 8), day(2024, 3, 6)].into();
        let outcome = walk(t, history(&valid));
        assert_eq!(outcome.current_streak, 3);
        assert_eq!(outcome.streak_start, Some(day(2024, 3, 8)));
        assert_eq!(outcome.last_valid_date, Some(t));
    }

    #[test]
    fn walk_never_evaluates_more_than_366_dates() {
        let calls = Cell::new(0u32);
        let outcome = walk(day(2024, 6, 1), |date| {
            calls.set(calls.get() + 1);
            validation(date, true) // everything valid, horizon must stop us
        });
        assert_eq!(calls.get(), 366);
        assert_eq!(outcome.current_streak, 366);
        assert_eq!(
            outcome.streak_start,
            day(2024, 6, 1).checked_sub_days(Days::new(LOOKBACK_DAYS))
        );
    }

    #[test]
    fn break_short_circuits_remaining_lookback() {
        let calls = Cell::new(0u32);
        let t = day(2024, 6, 1);
        walk(t, |date| {
            calls.set(calls.get() + 1);
            // Only T and T-1 valid
            validation(date, date >= day(2024, 5, 31))
        });
        // T, T-1, and the breaking T-2 evaluation
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn single_valid_day_is_its_own_start_and_end() {
        let t = day(2024, 2, 29);
        let valid: HashSet<_> = [t].into();
        let outcome = walk(t, history(&valid));
        assert_eq!(outcome.current_streak, 1);
        assert_eq!(outcome.streak_start, Some(t));
        assert_eq!(outcome.last_valid_date, Some(t));
    }
}
