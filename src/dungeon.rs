//! Dungeons: structured workout plans with a fixed EXP reward.
//!
//! A dungeon's reward is not hand-tuned; it is derived from its steps with
//! the workout reward calculator at vigorous intensity, plus a bonus for
//! finishing a structured session.

use crate::numeric::sanitize_minutes;
use crate::rewards::WorkoutType::{Cardio, Mobility, Strength};
use crate::rewards::{compute_rewards, WorkoutType};
use serde::{Deserialize, Serialize};

/// Intensity assumed for every dungeon step.
const DUNGEON_INTENSITY: f64 = 3.0;

/// Estimated minutes per repetition for sets×reps steps.
const MINUTES_PER_REP: f64 = 0.5;

/// Bonus multiplier for completing a whole dungeon.
const STRUCTURED_BONUS: f64 = 1.2;

/// Difficulty tier of a dungeon.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DungeonDifficulty {
    Instant,
    Easy,
    Normal,
    HighRank,
}

impl DungeonDifficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            DungeonDifficulty::Instant => "instant",
            DungeonDifficulty::Easy => "easy",
            DungeonDifficulty::Normal => "normal",
            DungeonDifficulty::HighRank => "high-rank",
        }
    }
}

/// How much work one dungeon step asks for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum StepVolume {
    /// A timed block, in minutes.
    Timed { minutes: f64 },
    /// Repetition work.
    Sets { sets: u32, reps: u32 },
}

impl StepVolume {
    /// Minutes this step counts for when computing rewards.
    pub fn estimated_minutes(&self) -> f64 {
        match *self {
            StepVolume::Timed { minutes } => sanitize_minutes(minutes),
            StepVolume::Sets { sets, reps } => f64::from(sets) * f64::from(reps) * MINUTES_PER_REP,
        }
    }
}

/// One exercise block inside a dungeon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DungeonStep {
    pub workout_type: WorkoutType,
    pub volume: StepVolume,
    pub instructions: String,
}

/// A structured workout template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dungeon {
    pub id: String,
    pub name: String,
    pub description: String,
    pub difficulty: DungeonDifficulty,
    /// Nominal session length in minutes.
    pub duration: u32,
    pub steps: Vec<DungeonStep>,
    pub exp_reward: u64,
    /// Minimum hunter level required.
    pub unlocked_at: u32,
    pub completed: bool,
}

impl Dungeon {
    /// Whether a hunter at `level` may enter.
    pub fn is_unlocked_for(&self, level: u32) -> bool {
        self.unlocked_at <= level
    }
}

/// EXP for clearing a dungeon made of `steps`.
///
/// # Examples
///
/// ```rust
/// use shadow_regimen::dungeon::{dungeon_exp, DungeonStep, StepVolume};
/// use shadow_regimen::rewards::WorkoutType;
///
/// let steps = vec![DungeonStep {
///     workout_type: WorkoutType::Cardio,
///     volume: StepVolume::Timed { minutes: 10.0 },
///     instructions: "Jog".into(),
/// }];
/// // 10 min at intensity 3: base 7.5 → gains 0.8 + 7.5 + 1.5 + 2.3 = 12.1 → 24 EXP
/// assert_eq!(dungeon_exp(&steps), 29); // round(24 × 1.2)
/// ```
pub fn dungeon_exp(steps: &[DungeonStep]) -> u64 {
    let total: u64 = steps
        .iter()
        .map(|step| {
            compute_rewards(step.workout_type, step.volume.estimated_minutes(), DUNGEON_INTENSITY)
                .exp_gained
        })
        .sum();
    (total as f64 * STRUCTURED_BONUS).round() as u64
}

struct StepSpec(WorkoutType, StepVolume, &'static str);

struct DungeonTemplate {
    name: &'static str,
    description: &'static str,
    difficulty: DungeonDifficulty,
    duration: u32,
    unlocked_at: u32,
    steps: &'static [StepSpec],
}

const fn sets(sets: u32, reps: u32) -> StepVolume {
    StepVolume::Sets { sets, reps }
}

const fn timed(minutes: f64) -> StepVolume {
    StepVolume::Timed { minutes }
}

const DUNGEON_TEMPLATES: &[DungeonTemplate] = &[
    DungeonTemplate {
        name: "Quick Burst",
        description: "A rapid 10-minute bodyweight circuit",
        difficulty: DungeonDifficulty::Instant,
        duration: 10,
        unlocked_at: 1,
        steps: &[
            StepSpec(Strength, sets(3, 10), "Push-ups: 3 sets of 10"),
            StepSpec(Strength, sets(3, 15), "Bodyweight squats: 3 sets of 15"),
            StepSpec(Mobility, timed(2.0), "Stretch: 2 minutes full body"),
        ],
    },
    DungeonTemplate {
        name: "Foundation Gate",
        description: "A beginner-friendly 20-minute session",
        difficulty: DungeonDifficulty::Easy,
        duration: 20,
        unlocked_at: 1,
        steps: &[
            StepSpec(Strength, sets(3, 12), "Push-ups: 3 sets of 12"),
            StepSpec(Strength, sets(3, 15), "Bodyweight squats: 3 sets of 15"),
            StepSpec(Cardio, timed(5.0), "Light jogging in place: 5 minutes"),
            StepSpec(Mobility, timed(5.0), "Full body stretching: 5 minutes"),
        ],
    },
    DungeonTemplate {
        name: "Endurance Path",
        description: "Build cardiovascular foundation",
        difficulty: DungeonDifficulty::Easy,
        duration: 20,
        unlocked_at: 1,
        steps: &[
            StepSpec(Cardio, timed(15.0), "Steady-state cardio: 15 minutes (walk, jog, or bike)"),
            StepSpec(Mobility, timed(5.0), "Cool-down stretching: 5 minutes"),
        ],
    },
    DungeonTemplate {
        name: "Strength Chamber",
        description: "A focused 35-minute strength session",
        difficulty: DungeonDifficulty::Normal,
        duration: 35,
        unlocked_at: 5,
        steps: &[
            StepSpec(Strength, sets(4, 10), "Push-ups: 4 sets of 10"),
            StepSpec(Strength, sets(4, 12), "Bodyweight squats: 4 sets of 12"),
            StepSpec(Strength, sets(3, 8), "Plank: 3 sets, hold for 30-60 seconds"),
            StepSpec(Cardio, timed(10.0), "High-intensity intervals: 10 minutes"),
            StepSpec(Mobility, timed(5.0), "Recovery stretching: 5 minutes"),
        ],
    },
    DungeonTemplate {
        name: "Cardio Arena",
        description: "Intense 40-minute cardiovascular challenge",
        difficulty: DungeonDifficulty::Normal,
        duration: 40,
        unlocked_at: 5,
        steps: &[
            StepSpec(Cardio, timed(30.0), "Sustained cardio: 30 minutes (run, bike, or row)"),
            StepSpec(Mobility, timed(10.0), "Full body mobility: 10 minutes"),
        ],
    },
    DungeonTemplate {
        name: "Elite Trial",
        description: "A comprehensive 50-minute high-intensity session",
        difficulty: DungeonDifficulty::HighRank,
        duration: 50,
        unlocked_at: 15,
        steps: &[
            StepSpec(Strength, sets(5, 15), "Push-ups: 5 sets of 15"),
            StepSpec(Strength, sets(5, 20), "Bodyweight squats: 5 sets of 20"),
            StepSpec(Strength, sets(4, 12), "Lunges: 4 sets of 12 per leg"),
            StepSpec(Cardio, timed(20.0), "High-intensity intervals: 20 minutes"),
            StepSpec(Mobility, timed(10.0), "Deep stretching and recovery: 10 minutes"),
        ],
    },
];

/// Build every dungeon, with ids of the form `dungeon-<difficulty>-<n>`
/// where `n` counts within the difficulty tier.
pub fn generate_dungeons() -> Vec<Dungeon> {
    let mut per_tier = std::collections::HashMap::<DungeonDifficulty, usize>::new();

    DUNGEON_TEMPLATES
        .iter()
        .map(|template| {
            let index = per_tier.entry(template.difficulty).or_insert(0);
            let id = format!("dungeon-{}-{}", template.difficulty.as_str(), index);
            *index += 1;

            let steps: Vec<DungeonStep> = template
                .steps
                .iter()
                .map(|StepSpec(workout_type, volume, instructions)| DungeonStep {
                    workout_type: *workout_type,
                    volume: *volume,
                    instructions: instructions.to_string(),
                })
                .collect();

            Dungeon {
                id,
                name: template.name.to_string(),
                description: template.description.to_string(),
                difficulty: template.difficulty,
                duration: template.duration,
                exp_reward: dungeon_exp(&steps),
                steps,
                unlocked_at: template.unlocked_at,
                completed: false,
            }
        })
        .collect()
}

/// Dungeons a hunter at `level` may enter.
pub fn available_dungeons(level: u32, dungeons: &[Dungeon]) -> Vec<&Dungeon> {
    dungeons.iter().filter(|d| d.is_unlocked_for(level)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_dungeons_ids() {
        let dungeons = generate_dungeons();
        let ids: Vec<&str> = dungeons.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "dungeon-instant-0",
                "dungeon-easy-0",
                "dungeon-easy-1",
                "dungeon-normal-0",
                "dungeon-normal-1",
                "dungeon-high-rank-0",
            ]
        );
        assert!(dungeons.iter().all(|d| !d.completed && d.exp_reward > 0));
    }

    #[test]
    fn test_sets_estimate() {
        assert_eq!(sets(3, 10).estimated_minutes(), 15.0);
        assert_eq!(timed(-4.0).estimated_minutes(), 0.0);
    }

    #[test]
    fn test_harder_dungeons_pay_more() {
        let dungeons = generate_dungeons();
        let quick = dungeons.iter().find(|d| d.name == "Quick Burst").unwrap();
        let elite = dungeons.iter().find(|d| d.name == "Elite Trial").unwrap();
        assert!(elite.exp_reward > quick.exp_reward);
    }

    #[test]
    fn test_level_gating() {
        let dungeons = generate_dungeons();
        assert_eq!(available_dungeons(1, &dungeons).len(), 3);
        assert_eq!(available_dungeons(5, &dungeons).len(), 5);
        assert_eq!(available_dungeons(15, &dungeons).len(), 6);
    }
}
