//! Bodyweight exercise catalog and the completed-exercise log.
//!
//! The log is kept apart from the hunter's workout history and persisted
//! under its own key.

use crate::rewards::WorkoutType;
use crate::rewards::WorkoutType::{Cardio, Mobility, Strength};
use crate::stats::HunterStats;
use chrono::{NaiveDate, NaiveDateTime};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use self::ExerciseDifficulty::{Advanced, Beginner, Intermediate};

/// Experience band an exercise is aimed at.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseDifficulty {
    Beginner,
    Intermediate,
    Advanced,
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: &'static str,
    pub name: &'static str,
    pub workout_type: WorkoutType,
    pub minutes: Option<f64>,
    pub reps: Option<u32>,
    pub sets: Option<u32>,
    pub intensity: u8,
    pub exp_reward: u64,
    pub stat_gains: HunterStats,
    pub description: &'static str,
    pub difficulty: ExerciseDifficulty,
    pub muscle_groups: &'static [&'static str],
}

/// The fixed exercise catalog.
pub const EXERCISES: &[Exercise] = &[
    Exercise {
        id: "push-ups",
        name: "Push-Ups",
        workout_type: Strength,
        minutes: None,
        reps: Some(10),
        sets: Some(3),
        intensity: 3,
        exp_reward: 50,
        stat_gains: HunterStats { str: 2.0, vit: 0.5, dex: 0.3, int: 0.5 },
        description: "Classic upper body strength exercise",
        difficulty: Beginner,
        muscle_groups: &["Chest", "Shoulders", "Triceps"],
    },
    Exercise {
        id: "squats",
        name: "Bodyweight Squats",
        workout_type: Strength,
        minutes: None,
        reps: Some(15),
        sets: Some(3),
        intensity: 2,
        exp_reward: 45,
        stat_gains: HunterStats { str: 1.8, vit: 0.8, dex: 0.5, int: 0.4 },
        description: "Fundamental lower body exercise",
        difficulty: Beginner,
        muscle_groups: &["Quadriceps", "Glutes", "Calves"],
    },
    Exercise {
        id: "plank",
        name: "Plank Hold",
        workout_type: Strength,
        minutes: Some(1.0),
        reps: None,
        sets: Some(3),
        intensity: 3,
        exp_reward: 40,
        stat_gains: HunterStats { str: 1.5, vit: 0.5, dex: 0.8, int: 0.6 },
        description: "Core stability and strength",
        difficulty: Beginner,
        muscle_groups: &["Core", "Shoulders"],
    },
    Exercise {
        id: "lunges",
        name: "Walking Lunges",
        workout_type: Strength,
        minutes: None,
        reps: Some(12),
        sets: Some(3),
        intensity: 3,
        exp_reward: 55,
        stat_gains: HunterStats { str: 2.2, vit: 0.6, dex: 0.7, int: 0.5 },
        description: "Unilateral leg strength and balance",
        difficulty: Intermediate,
        muscle_groups: &["Quadriceps", "Glutes", "Hamstrings"],
    },
    Exercise {
        id: "burpees",
        name: "Burpees",
        workout_type: Cardio,
        minutes: None,
        reps: Some(10),
        sets: Some(3),
        intensity: 5,
        exp_reward: 80,
        stat_gains: HunterStats { str: 1.5, vit: 3.0, dex: 1.0, int: 1.0 },
        description: "Full-body high-intensity exercise",
        difficulty: Advanced,
        muscle_groups: &["Full Body"],
    },
    Exercise {
        id: "jumping-jacks",
        name: "Jumping Jacks",
        workout_type: Cardio,
        minutes: Some(2.0),
        reps: None,
        sets: None,
        intensity: 2,
        exp_reward: 30,
        stat_gains: HunterStats { str: 0.3, vit: 2.0, dex: 0.8, int: 0.4 },
        description: "Cardiovascular warm-up exercise",
        difficulty: Beginner,
        muscle_groups: &["Full Body"],
    },
    Exercise {
        id: "mountain-climbers",
        name: "Mountain Climbers",
        workout_type: Cardio,
        minutes: Some(1.0),
        reps: None,
        sets: Some(3),
        intensity: 4,
        exp_reward: 60,
        stat_gains: HunterStats { str: 1.0, vit: 2.5, dex: 1.2, int: 0.8 },
        description: "Dynamic core and cardio exercise",
        difficulty: Intermediate,
        muscle_groups: &["Core", "Shoulders", "Legs"],
    },
    Exercise {
        id: "stretching",
        name: "Full Body Stretch",
        workout_type: Mobility,
        minutes: Some(10.0),
        reps: None,
        sets: None,
        intensity: 1,
        exp_reward: 25,
        stat_gains: HunterStats { str: 0.2, vit: 0.3, dex: 2.5, int: 0.8 },
        description: "Improve flexibility and range of motion",
        difficulty: Beginner,
        muscle_groups: &["Full Body"],
    },
    Exercise {
        id: "yoga-flow",
        name: "Yoga Flow",
        workout_type: Mobility,
        minutes: Some(15.0),
        reps: None,
        sets: None,
        intensity: 2,
        exp_reward: 40,
        stat_gains: HunterStats { str: 0.5, vit: 0.8, dex: 3.0, int: 1.2 },
        description: "Yoga sequence for mobility and mindfulness",
        difficulty: Beginner,
        muscle_groups: &["Full Body"],
    },
    Exercise {
        id: "pull-ups",
        name: "Pull-Ups (or Inverted Rows)",
        workout_type: Strength,
        minutes: None,
        reps: Some(8),
        sets: Some(3),
        intensity: 4,
        exp_reward: 70,
        stat_gains: HunterStats { str: 2.5, vit: 0.5, dex: 0.8, int: 0.6 },
        description: "Upper body pulling strength",
        difficulty: Intermediate,
        muscle_groups: &["Back", "Biceps", "Shoulders"],
    },
];

/// Look up a catalog entry.
pub fn exercise_by_id(id: &str) -> Option<&'static Exercise> {
    EXERCISES.iter().find(|e| e.id == id)
}

/// One finished exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedExercise {
    pub exercise_id: String,
    pub completed_at: NaiveDateTime,
    pub exp_gained: u64,
}

/// Append-only log of completed exercises.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseLog {
    #[serde(default)]
    pub completed_exercises: Vec<CompletedExercise>,
}

impl ExerciseLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `exercise_id` as done at `now`.
    ///
    /// Returns the catalog entry, or `None` (and records nothing) when the
    /// id is unknown.
    pub fn complete(&mut self, exercise_id: &str, now: NaiveDateTime) -> Option<&'static Exercise> {
        let exercise = exercise_by_id(exercise_id)?;
        self.completed_exercises.push(CompletedExercise {
            exercise_id: exercise.id.to_string(),
            completed_at: now,
            exp_gained: exercise.exp_reward,
        });
        Some(exercise)
    }

    /// Entries completed on `day`.
    pub fn completed_on(&self, day: NaiveDate) -> Vec<&CompletedExercise> {
        self.completed_exercises
            .iter()
            .filter(|c| c.completed_at.date() == day)
            .collect()
    }

    /// Suggest an exercise not yet done on `today`.
    ///
    /// Below level 5 a beginner exercise is preferred; below level 15 an
    /// intermediate one, then a beginner one; from level 15 the pick is
    /// uniformly random. Falls back to the first remaining exercise, and
    /// returns `None` once everything has been done today.
    pub fn recommend<R: Rng + ?Sized>(
        &self,
        level: u32,
        today: NaiveDate,
        rng: &mut R,
    ) -> Option<&'static Exercise> {
        let done: HashSet<&str> = self
            .completed_on(today)
            .into_iter()
            .map(|c| c.exercise_id.as_str())
            .collect();
        let available: Vec<&'static Exercise> =
            EXERCISES.iter().filter(|e| !done.contains(e.id)).collect();

        let with = |difficulty: ExerciseDifficulty| {
            available.iter().copied().find(|e| e.difficulty == difficulty)
        };

        if level < 5 {
            with(Beginner).or_else(|| available.first().copied())
        } else if level < 15 {
            with(Intermediate)
                .or_else(|| with(Beginner))
                .or_else(|| available.first().copied())
        } else {
            available.choose(rng).copied()
        }
    }
}
