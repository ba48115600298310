//! Routine recurrence rules.
//!
//! A routine carries a free-form frequency descriptor chosen when the user
//! created it. Parsing is total: anything unrecognized degrades to
//! [`Frequency::Daily`], the most inclusive rule, so a bad descriptor can
//! never stop a routine from being counted as due.

use chrono::Weekday;

/// How often a routine is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    /// Due every calendar day
    Daily,
    /// Due Monday through Friday
    Weekdays,
    /// Due Saturday and Sunday
    Weekends,
    /// Due on one specific weekday
    Weekly(Weekday),
}

impl Frequency {
    /// Parse a stored frequency descriptor. Never fails; unrecognized
    /// descriptors behave as `Daily`.
    pub fn parse(descriptor: &str) -> Self {
        match descriptor.trim().to_ascii_lowercase().as_str() {
            "weekdays" => Frequency::Weekdays,
            "weekends" => Frequency::Weekends,
            "monday" => Frequency::Weekly(Weekday::Mon),
            "tuesday" => Frequency::Weekly(Weekday::Tue),
            "wednesday" => Frequency::Weekly(Weekday::Wed),
            "thursday" => Frequency::Weekly(Weekday::Thu),
            "friday" => Frequency::Weekly(Weekday::Fri),
            "saturday" => Frequency::Weekly(Weekday::Sat),
            "sunday" => Frequency::Weekly(Weekday::Sun),
            // "daily" and anything unrecognized
            _ => Frequency::Daily,
        }
    }

    /// Whether a routine with this frequency is due on `weekday`.
    pub fn applies_on(self, weekday: Weekday) -> bool {
        match self {
            Frequency::Daily => true,
            Frequency::Weekdays => !matches!(weekday, Weekday::Sat | Weekday::Sun),
            Frequency::Weekends => matches!(weekday, Weekday::Sat | Weekday::Sun),
            Frequency::Weekly(day) => weekday == day,
        }
    }
}
