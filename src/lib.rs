//! # shadow-regimen - Progression Engine for Gamified Fitness Tracking
//!
//! Turns logged workouts into RPG-style progression for a single player,
//! the *hunter*:
//! - **Rewards**: workouts (type, minutes, intensity) become stat gains and EXP
//! - **Levels and ranks**: quadratic EXP thresholds, multi-level jumps, E→S ranks
//! - **Daily quests**: a fresh randomized set every calendar day
//! - **Penalties**: missed days withhold EXP until a penalty quest is done
//! - **Streaks, dungeons, exercises and achievements**
//!
//! ## Core Concepts
//!
//! ### Progression Pipeline
//!
//! ```text
//! workout → [rewards] → stat gains + EXP → [engine] → level / rank / streak → events
//! ```
//!
//! 1. **Rewards** are pure functions of the workout
//! 2. **The engine** applies them to the `Hunter`, the single source of truth
//! 3. **Events** describe what changed; observers persist the result
//!
//! Time and randomness are injected (`Clock`, `rand::RngCore`), so every
//! run can be reproduced from a seed and a start date.
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use shadow_regimen::clock::ManualClock;
//! use shadow_regimen::rewards::WorkoutType;
//! use shadow_regimen::*;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(6, 0, 0).unwrap();
//! let mut engine = ProgressionEngine::new(
//!     ProgressionConfig::default(),
//!     ManualClock::new(start),
//!     ChaCha8Rng::seed_from_u64(7),
//! );
//!
//! engine.initialize_hunter(Some("Jinwoo"));
//! let events = engine.add_exp(250);
//!
//! assert!(events.iter().any(|e| matches!(e, Event::LevelUp { to: 2, .. })));
//!
//! let hunter = engine.hunter().unwrap();
//! assert_eq!((hunter.level, hunter.exp), (2, 150));
//! assert_eq!(hunter.rank, Rank::E);
//! ```
//!
//! ## Modules
//!
//! - [`stats`] - The four hunter stats
//! - [`calc`] - Level thresholds, ranks, level-up bonuses
//! - [`rewards`] - Workout rewards
//! - [`quest`] - Daily quest templates and generator
//! - [`penalty`] - Missed-day detection and penalty quests
//! - [`achievement`] - Achievement definitions and evaluator
//! - [`dungeon`] - Structured multi-step workouts
//! - [`exercise`] - Exercise catalog and completion log
//! - [`hunter`] - The hunter aggregate
//! - [`engine`] - The progression state machine
//! - [`events`] - Change-log events and notifications
//! - [`storage`] - Key-value stores
//! - [`persistence`] - Saving and rehydrating engine state
//! - [`config`] - Engine configuration
//! - [`clock`] - Time source and calendar helpers
//! - [`error`] - Error types

pub mod achievement;
pub mod calc;
pub mod clock;
pub mod config;
pub mod dungeon;
pub mod engine;
pub mod error;
pub mod events;
pub mod exercise;
pub mod hunter;
pub mod ids;
pub mod numeric;
pub mod penalty;
pub mod persistence;
pub mod quest;
pub mod rewards;
pub mod stats;
pub mod storage;

// Re-export main types for convenience
pub use calc::Rank;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{LevelUpStatPolicy, ProgressionConfig};
pub use engine::{CommitSnapshot, Phase, ProgressionEngine, StateObserver};
pub use error::RegimenError;
pub use events::{Event, Notification, NotificationKind};
pub use hunter::{DifficultyPreference, FitnessGoal, Hunter, Workout};
pub use stats::{HunterStats, Stat};

// Re-export persistence types
pub use persistence::{PersistenceAdapter, STATE_KEY, WORKOUTS_KEY};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
