//! Flame tiers: the gamification mapping from streak length to level.
//!
//! The tier table is a compiled constant with strictly increasing levels
//! and thresholds. A tier is unlocked once the current streak reaches its
//! threshold (inclusive), and the highest unlocked tier is the current one.

use serde::Serialize;

/// (level, name, icon, days required), ordered by level.
const TIERS: [(u8, &str, &str, u32); 7] = [
    (1, "Spark", "✨", 0),
    (2, "Ember", "🕯️", 3),
    (3, "Flame", "🔥", 7),
    (4, "Blaze", "🧨", 14),
    (5, "Bonfire", "🎆", 30),
    (6, "Inferno", "🌋", 60),
    (7, "Eternal Flame", "☀️", 100),
];

/// One row of the tier table, annotated for a specific streak length.
#[derive(Debug, Clone, Serialize)]
pub struct FlameLevel {
    pub level: u8,
    pub name: &'static str,
    pub icon: &'static str,
    pub days_required: u32,
    pub is_unlocked: bool,
    pub is_current: bool,
}

/// Annotate the full tier table for a streak length.
///
/// Exactly one tier comes back `is_current`: the highest one whose
/// threshold the streak has reached.
pub fn flame_levels(current_streak: u32) -> Vec<FlameLevel> {
    let current = current_level(current_streak);
    TIERS
        .iter()
        .map(|&(level, name, icon, days_required)| FlameLevel {
            level,
            name,
            icon,
            days_required,
            is_unlocked: days_required <= current_streak,
            is_current: level == current,
        })
        .collect()
}

/// The highest unlocked level for a streak length.
pub fn current_level(current_streak: u32) -> u8 {
    TIERS
        .iter()
        .rev()
        .find(|&&(_, _, _, days_required)| days_required <= current_streak)
        .map(|&(level, ..)| level)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_boundary_is_inclusive() {
        assert_eq!(current_level(7), 3);
        assert_eq!(current_level(6), 2);
    }

    #[test]
    fn zero_streak_sits_at_the_first_tier() {
        assert_eq!(current_level(0), 1);
        let levels = flame_levels(0);
        assert!(levels[0].is_unlocked);
        assert!(levels[0].is_current);
        assert!(levels[1..].iter().all(|l| !l.is_unlocked));
    }

    #[test]
    fn top_tier_at_one_hundred_days() {
        assert_eq!(current_level(100), 7);
        assert_eq!(current_level(99), 6);
        assert_eq!(current_level(10_000), 7);
    }

    #[test]
    fn exactly_one_tier_is_current() {
        for streak in [0, 1, 3, 6, 7, 14, 29, 30, 60, 100, 365] {
            let levels = flame_levels(streak);
            assert_eq!(
                levels.iter().filter(|l| l.is_current).count(),
                1,
                "streak {streak}"
            );
        }
    }

    #[test]
    fn unlocked_tiers_form_a_prefix() {
        let levels = flame_levels(14);
        let unlocked: Vec<bool> = levels.iter().map(|l| l.is_unlocked).collect();
        assert_eq!(unlocked, [true, true, true, true, false, false, false]);
    }

    #[test]
    fn table_is_strictly_increasing() {
        for pair in TIERS.windows(2) {
            assert!(pair[0].0 < pair[1].0);
            assert!(pair[0].3 < pair[1].3);
        }
    }
}
