//! The Hunter aggregate.
//!
//! One `Hunter` per installation owns every piece of progression state:
//! stats, level, EXP, quests, penalties, workout history, dungeons and
//! achievements. Nothing in here mutates on its own; all state
//! transitions go through `ProgressionEngine`.

use crate::achievement::{Achievement, ProgressSnapshot};
use crate::calc::{exp_for_level, rank_for_level, Rank};
use crate::config::ProgressionConfig;
use crate::dungeon::{generate_dungeons, Dungeon};
use crate::ids::hunter_id;
use crate::penalty::PenaltyQuest;
use crate::quest::{generate_daily_quests, DailyQuest};
use crate::rewards::WorkoutType;
use crate::stats::HunterStats;
use chrono::{NaiveDate, NaiveDateTime};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// What the hunter wants out of training.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FitnessGoal {
    Balanced,
    MuscleGain,
    FatLoss,
    Mobility,
}

/// Preferred training difficulty.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyPreference {
    Easy,
    Normal,
    Hard,
}

/// Choices made once during onboarding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingProfile {
    pub goal: FitnessGoal,
    pub difficulty: DifficultyPreference,
    pub completed_at: NaiveDateTime,
}

/// A logged training session. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: String,
    #[serde(rename = "type")]
    pub workout_type: WorkoutType,
    /// Minutes trained.
    pub duration: f64,
    /// Clamped 1..=5.
    pub intensity: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub stat_gains: HunterStats,
    pub exp_gained: u64,
}

/// The player profile.
///
/// Invariants kept by the engine:
/// - `level >= 1`
/// - `exp < exp_to_next_level == level² × 100`
/// - `rank == rank_for_level(level)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hunter {
    pub id: String,
    pub name: String,
    pub level: u32,
    pub exp: u64,
    pub exp_to_next_level: u64,
    pub stats: HunterStats,
    pub rank: Rank,
    #[serde(default)]
    pub daily_quests: Vec<DailyQuest>,
    #[serde(default)]
    pub penalty_quests: Vec<PenaltyQuest>,
    #[serde(default)]
    pub workouts: Vec<Workout>,
    #[serde(default)]
    pub dungeons: Vec<Dungeon>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub last_activity_date: Option<NaiveDate>,
    #[serde(default)]
    pub total_workouts: u32,
    #[serde(default)]
    pub total_minutes: f64,
    /// Days on which every daily quest was completed.
    #[serde(default)]
    pub perfect_days: u32,
    #[serde(default)]
    pub onboarding: Option<OnboardingProfile>,
}

impl Hunter {
    /// Create a level-1 hunter with starting stats, today's quests and the
    /// full dungeon list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chrono::NaiveDate;
    /// use rand::SeedableRng;
    /// use rand_chacha::ChaCha8Rng;
    /// use shadow_regimen::{Hunter, ProgressionConfig, Rank};
    ///
    /// let now = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
    /// let hunter = Hunter::new(None, &ProgressionConfig::default(), now, &mut ChaCha8Rng::seed_from_u64(1));
    ///
    /// assert_eq!(hunter.name, "Hunter");
    /// assert_eq!((hunter.level, hunter.exp, hunter.exp_to_next_level), (1, 0, 100));
    /// assert_eq!(hunter.rank, Rank::E);
    /// assert_eq!(hunter.stats.str, 10.0);
    /// ```
    pub fn new<R: Rng + ?Sized>(
        name: Option<&str>,
        config: &ProgressionConfig,
        now: NaiveDateTime,
        rng: &mut R,
    ) -> Self {
        let level = 1;
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(config.default_name.as_str())
            .to_string();

        Self {
            id: hunter_id(rng),
            name,
            level,
            exp: 0,
            exp_to_next_level: exp_for_level(level),
            stats: HunterStats::uniform(config.initial_stat),
            rank: rank_for_level(level),
            daily_quests: generate_daily_quests(now, rng),
            penalty_quests: Vec::new(),
            workouts: Vec::new(),
            dungeons: generate_dungeons(),
            achievements: Vec::new(),
            streak: 0,
            last_activity_date: None,
            total_workouts: 0,
            total_minutes: 0.0,
            perfect_days: 0,
            onboarding: None,
        }
    }

    /// Sum of the penalties of all incomplete penalty quests.
    pub fn active_penalty(&self) -> u64 {
        self.penalty_quests.iter().map(PenaltyQuest::active_penalty).sum()
    }

    /// Dungeons this hunter's level gives access to.
    pub fn available_dungeons(&self) -> Vec<&Dungeon> {
        crate::dungeon::available_dungeons(self.level, &self.dungeons)
    }

    pub fn dungeons_cleared(&self) -> u32 {
        self.dungeons.iter().filter(|d| d.completed).count() as u32
    }

    /// Creation time of the current daily quest set.
    pub fn quests_issued_at(&self) -> Option<NaiveDateTime> {
        self.daily_quests.first().map(|q| q.created_at)
    }

    /// Whether the hunter has finished onboarding.
    pub fn is_onboarded(&self) -> bool {
        self.onboarding.is_some()
    }

    /// The figures achievements are judged on.
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            level: self.level,
            streak: self.streak,
            total_workouts: self.total_workouts,
            total_minutes: self.total_minutes,
            stats: self.stats,
            dungeons_cleared: self.dungeons_cleared(),
            perfect_days: self.perfect_days,
            daily_quests_total: self.daily_quests.len(),
            daily_quests_completed: self.daily_quests.iter().filter(|q| q.completed).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn hunter(name: Option<&str>) -> Hunter {
        Hunter::new(name, &ProgressionConfig::default(), now(), &mut ChaCha8Rng::seed_from_u64(11))
    }

    #[test]
    fn test_new_hunter_defaults() {
        let hunter = hunter(Some("Jinwoo"));
        assert_eq!(hunter.name, "Jinwoo");
        assert!(hunter.id.starts_with("USER-"));
        assert!((4..=6).contains(&hunter.daily_quests.len()));
        assert_eq!(hunter.dungeons.len(), 6);
        assert_eq!(hunter.streak, 0);
        assert!(hunter.last_activity_date.is_none());
        assert!(!hunter.is_onboarded());
    }

    #[test]
    fn test_blank_name_falls_back() {
        assert_eq!(hunter(Some("   ")).name, "Hunter");
    }

    #[test]
    fn test_active_penalty_ignores_completed() {
        let mut hunter = hunter(None);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        hunter
            .penalty_quests
            .push(crate::penalty::generate_penalty_quest(2, now(), &mut rng));
        let mut done = crate::penalty::generate_penalty_quest(3, now(), &mut rng);
        done.completed = true;
        hunter.penalty_quests.push(done);
        assert_eq!(hunter.active_penalty(), 20);
    }

    #[test]
    fn test_snapshot_counts_quests() {
        let mut hunter = hunter(None);
        hunter.daily_quests[0].completed = true;
        let snapshot = hunter.snapshot();
        assert_eq!(snapshot.daily_quests_completed, 1);
        assert_eq!(snapshot.daily_quests_total, hunter.daily_quests.len());
        assert_eq!(snapshot.level, 1);
    }

    #[test]
    fn test_workout_serializes_type_field() {
        let workout = Workout {
            id: "workout-1".into(),
            workout_type: WorkoutType::Cardio,
            duration: 20.0,
            intensity: 2,
            notes: None,
            created_at: now(),
            stat_gains: HunterStats::default(),
            exp_gained: 0,
        };
        let value = serde_json::to_value(&workout).unwrap();
        assert_eq!(value["type"], "cardio");
        assert!(value.get("notes").is_none());
    }
}
