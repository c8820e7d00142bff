//! Achievement definitions and evaluator.
//!
//! Each definition carries a typed `Criterion` checked against a
//! `ProgressSnapshot`. Evaluation is side-effect free; the engine appends
//! the resulting `Achievement` records.

use crate::ids::record_id;
use crate::stats::{HunterStats, Stat};
use chrono::NaiveDateTime;
use rand::Rng;
use serde::{Deserialize, Serialize};

use self::AchievementCategory as Cat;

/// Achievement grouping, mostly for display.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    Workout,
    Streak,
    Level,
    Dungeon,
    Quest,
    Special,
}

/// Condition under which an achievement unlocks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Criterion {
    /// Hunter level at least this high.
    Level(u32),
    /// Current streak at least this long.
    Streak(u32),
    /// Total logged workouts.
    Workouts(u32),
    /// Total logged minutes.
    Minutes(f64),
    /// Dungeons marked completed.
    DungeonsCleared(u32),
    /// Every current daily quest is complete.
    AllDailyQuests,
    /// Days on which the full daily quest set was completed.
    PerfectDays(u32),
    /// A single stat at least this high.
    StatAtLeast(Stat, f64),
    /// Every stat at least this high.
    AllStatsAtLeast(f64),
}

impl Criterion {
    pub fn is_met(&self, snapshot: &ProgressSnapshot) -> bool {
        match *self {
            Criterion::Level(min) => snapshot.level >= min,
            Criterion::Streak(min) => snapshot.streak >= min,
            Criterion::Workouts(min) => snapshot.total_workouts >= min,
            Criterion::Minutes(min) => snapshot.total_minutes >= min,
            Criterion::DungeonsCleared(min) => snapshot.dungeons_cleared >= min,
            Criterion::AllDailyQuests => {
                snapshot.daily_quests_total > 0
                    && snapshot.daily_quests_completed == snapshot.daily_quests_total
            }
            Criterion::PerfectDays(min) => snapshot.perfect_days >= min,
            Criterion::StatAtLeast(stat, min) => snapshot.stats.get(stat) >= min,
            Criterion::AllStatsAtLeast(min) => snapshot.stats.min() >= min,
        }
    }
}

/// Static description of an achievement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AchievementDefinition {
    pub title: &'static str,
    pub description: &'static str,
    pub category: AchievementCategory,
    pub criterion: Criterion,
}

const fn def(
    title: &'static str,
    description: &'static str,
    category: AchievementCategory,
    criterion: Criterion,
) -> AchievementDefinition {
    AchievementDefinition {
        title,
        description,
        category,
        criterion,
    }
}

/// Every achievement the engine knows about.
pub const ACHIEVEMENT_DEFINITIONS: &[AchievementDefinition] = &[
    def("First Steps", "Complete your first workout", Cat::Workout, Criterion::Workouts(1)),
    def("Solo Player", "Maintain a 7-day streak", Cat::Streak, Criterion::Streak(7)),
    def("Disciplined Hunter", "Maintain a 14-day streak", Cat::Streak, Criterion::Streak(14)),
    def("No Zero Day", "30 active days without missing", Cat::Streak, Criterion::Streak(30)),
    def("Unbreakable", "100-day streak", Cat::Streak, Criterion::Streak(100)),
    def("Awakened", "Reach Level 5", Cat::Level, Criterion::Level(5)),
    def("Rising Star", "Reach Level 10", Cat::Level, Criterion::Level(10)),
    def("Elite Hunter", "Reach Level 25", Cat::Level, Criterion::Level(25)),
    def("High-Rank", "Reach Level 50", Cat::Level, Criterion::Level(50)),
    def("Shadow Monarch", "Reach Level 100", Cat::Level, Criterion::Level(100)),
    def("First Dungeon Clear", "Complete your first dungeon", Cat::Dungeon, Criterion::DungeonsCleared(1)),
    def("Dungeon Master", "Complete 10 dungeons", Cat::Dungeon, Criterion::DungeonsCleared(10)),
    def("Centurion", "Complete 100 workouts", Cat::Workout, Criterion::Workouts(100)),
    def("Time Warrior", "Log 1000 total minutes", Cat::Workout, Criterion::Minutes(1000.0)),
    def("Quest Complete", "Complete all daily quests in a day", Cat::Quest, Criterion::AllDailyQuests),
    def("Perfect Week", "Complete all daily quests for 7 days", Cat::Quest, Criterion::PerfectDays(7)),
    def("Balanced", "Reach 50 in all stats", Cat::Special, Criterion::AllStatsAtLeast(50.0)),
    def("Powerhouse", "Reach 100 STR", Cat::Special, Criterion::StatAtLeast(Stat::Str, 100.0)),
    def("Endurance King", "Reach 100 VIT", Cat::Special, Criterion::StatAtLeast(Stat::Vit, 100.0)),
];

/// An unlocked achievement. Titles are unique within a hunter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: AchievementCategory,
    pub unlocked_at: NaiveDateTime,
}

impl Achievement {
    /// Stamp `definition` as unlocked at `now`.
    pub fn unlock<R: Rng + ?Sized>(
        definition: &AchievementDefinition,
        now: NaiveDateTime,
        rng: &mut R,
    ) -> Self {
        Self {
            id: record_id("achievement", rng),
            title: definition.title.to_string(),
            description: definition.description.to_string(),
            category: definition.category,
            unlocked_at: now,
        }
    }
}

/// The numbers achievements are judged on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressSnapshot {
    pub level: u32,
    pub streak: u32,
    pub total_workouts: u32,
    pub total_minutes: f64,
    pub stats: HunterStats,
    pub dungeons_cleared: u32,
    pub perfect_days: u32,
    pub daily_quests_total: usize,
    pub daily_quests_completed: usize,
}

/// Definitions that should unlock now: not yet held (by title) and whose
/// criterion is met.
///
/// # Examples
///
/// ```rust
/// use shadow_regimen::achievement::{evaluate, ProgressSnapshot, ACHIEVEMENT_DEFINITIONS};
///
/// let snapshot = ProgressSnapshot { level: 5, total_workouts: 1, ..Default::default() };
/// let titles: Vec<&str> = evaluate(ACHIEVEMENT_DEFINITIONS, &snapshot, &[])
///     .iter()
///     .map(|d| d.title)
///     .collect();
///
/// assert_eq!(titles, vec!["First Steps", "Awakened"]);
/// ```
pub fn evaluate<'a>(
    definitions: &'a [AchievementDefinition],
    snapshot: &ProgressSnapshot,
    unlocked: &[Achievement],
) -> Vec<&'a AchievementDefinition> {
    definitions
        .iter()
        .filter(|d| !unlocked.iter().any(|a| a.title == d.title))
        .filter(|d| d.criterion.is_met(snapshot))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 8, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn titles(defs: Vec<&AchievementDefinition>) -> Vec<&'static str> {
        defs.into_iter().map(|d| d.title).collect()
    }

    #[test]
    fn test_titles_unique() {
        let mut titles: Vec<&str> = ACHIEVEMENT_DEFINITIONS.iter().map(|d| d.title).collect();
        titles.sort();
        titles.dedup();
        assert_eq!(titles.len(), ACHIEVEMENT_DEFINITIONS.len());
    }

    #[test]
    fn test_nothing_for_fresh_hunter() {
        let snapshot = ProgressSnapshot {
            level: 1,
            stats: HunterStats::uniform(10.0),
            daily_quests_total: 4,
            ..Default::default()
        };
        assert!(evaluate(ACHIEVEMENT_DEFINITIONS, &snapshot, &[]).is_empty());
    }

    #[test]
    fn test_already_unlocked_is_skipped() {
        let snapshot = ProgressSnapshot {
            level: 1,
            total_workouts: 1,
            ..Default::default()
        };
        let first = evaluate(ACHIEVEMENT_DEFINITIONS, &snapshot, &[]);
        assert_eq!(titles(first.clone()), vec!["First Steps"]);

        let held = vec![Achievement::unlock(first[0], now(), &mut ChaCha8Rng::seed_from_u64(1))];
        assert!(evaluate(ACHIEVEMENT_DEFINITIONS, &snapshot, &held).is_empty());
    }

    #[test]
    fn test_stat_criteria() {
        let snapshot = ProgressSnapshot {
            stats: HunterStats::new(120.0, 55.0, 50.0, 50.0),
            ..Default::default()
        };
        assert_eq!(
            titles(evaluate(ACHIEVEMENT_DEFINITIONS, &snapshot, &[])),
            vec!["Balanced", "Powerhouse"]
        );
    }

    #[test]
    fn test_quest_criteria() {
        let snapshot = ProgressSnapshot {
            daily_quests_total: 5,
            daily_quests_completed: 5,
            perfect_days: 7,
            ..Default::default()
        };
        assert_eq!(
            titles(evaluate(ACHIEVEMENT_DEFINITIONS, &snapshot, &[])),
            vec!["Quest Complete", "Perfect Week"]
        );

        let empty = ProgressSnapshot::default();
        assert!(!Criterion::AllDailyQuests.is_met(&empty));
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let snapshot = ProgressSnapshot {
            level: 30,
            streak: 15,
            total_minutes: 1200.0,
            dungeons_cleared: 2,
            ..Default::default()
        };
        let a = evaluate(ACHIEVEMENT_DEFINITIONS, &snapshot, &[]);
        let b = evaluate(ACHIEVEMENT_DEFINITIONS, &snapshot, &[]);
        assert_eq!(a, b);
        assert_eq!(a.len(), 3 + 2 + 1 + 1);
    }
}
