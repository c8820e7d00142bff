//! Progression engine.
//!
//! `ProgressionEngine` owns the hunter, the boot flag, the level-up flag
//! and the exercise log, and exposes the only operations that mutate
//! them. Every mutator runs to completion, returns the `Event`s it
//! produced and, when something changed, hands a `CommitSnapshot` to the
//! registered observers.
//!
//! Unknown ids are never an error: the mutator does nothing and returns
//! no events.

use crate::achievement::{evaluate, Achievement, ACHIEVEMENT_DEFINITIONS};
use crate::calc::{exp_for_level, rank_for_level, stat_increase_on_level_up};
use crate::clock::{days_between, Clock, SystemClock};
use crate::config::{LevelUpStatPolicy, ProgressionConfig};
use crate::dungeon::Dungeon;
use crate::events::Event;
use crate::exercise::{Exercise, ExerciseLog};
use crate::hunter::{DifficultyPreference, FitnessGoal, Hunter, OnboardingProfile, Workout};
use crate::ids::record_id;
use crate::numeric::sanitize_minutes;
use crate::penalty::{check_for_missed_quests, generate_penalty_quest};
use crate::persistence::{HunterSlot, PersistenceAdapter};
use crate::quest::generate_daily_quests;
use crate::rewards::{compute_rewards, WorkoutType};
use crate::stats::HunterStats;
use crate::storage::KeyValueStore;
use chrono::{NaiveDate, NaiveDateTime};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Lifecycle phase derived from engine state.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Phase {
    /// No hunter exists yet.
    Uninitialized,
    /// A hunter exists but has not finished onboarding.
    Onboarding,
    /// Normal operation.
    Active,
}

/// Read-only view of the persisted state, passed to observers.
#[derive(Debug, Clone, Copy)]
pub struct CommitSnapshot<'a> {
    pub hunter: Option<&'a Hunter>,
    pub has_booted: bool,
    pub exercise_log: &'a ExerciseLog,
}

/// Receives the engine state after every mutation that changed it.
pub trait StateObserver {
    fn on_commit(&mut self, snapshot: &CommitSnapshot<'_>);
}

/// The progression state machine.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use shadow_regimen::clock::ManualClock;
/// use shadow_regimen::rewards::WorkoutType;
/// use shadow_regimen::{ProgressionConfig, ProgressionEngine};
///
/// let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(7, 30, 0).unwrap();
/// let mut engine = ProgressionEngine::new(
///     ProgressionConfig::default(),
///     ManualClock::new(start),
///     ChaCha8Rng::seed_from_u64(42),
/// );
///
/// engine.initialize_hunter(Some("Jinwoo"));
/// engine.log_workout(WorkoutType::Strength, 30.0, 3.0, None);
///
/// let hunter = engine.hunter().unwrap();
/// assert_eq!(hunter.exp, 72);
/// assert_eq!(hunter.stats.str, 32.5);
/// assert_eq!(hunter.streak, 1);
/// ```
pub struct ProgressionEngine<C = SystemClock, R = StdRng> {
    hunter: Option<Hunter>,
    has_booted: bool,
    level_up_flag: bool,
    exercise_log: ExerciseLog,
    config: ProgressionConfig,
    clock: C,
    rng: R,
    observers: Vec<Box<dyn StateObserver + Send>>,
}

impl ProgressionEngine<SystemClock, StdRng> {
    /// Engine on the system clock with an entropy-seeded RNG.
    pub fn with_system_clock(config: ProgressionConfig) -> Self {
        Self::new(config, SystemClock, StdRng::from_entropy())
    }
}

impl<C: Clock, R: RngCore> ProgressionEngine<C, R> {
    /// Engine with no hunter and an empty exercise log.
    pub fn new(config: ProgressionConfig, clock: C, rng: R) -> Self {
        Self {
            hunter: None,
            has_booted: false,
            level_up_flag: false,
            exercise_log: ExerciseLog::new(),
            config,
            clock,
            rng,
            observers: Vec::new(),
        }
    }

    /// Load state through `adapter`, then keep it registered as an
    /// observer so every later mutation is written back.
    ///
    /// A corrupted stored hunter is replaced with a fresh one (the boot
    /// flag survives) and the replacement is saved immediately.
    pub fn restore<S>(adapter: PersistenceAdapter<S>, config: ProgressionConfig, clock: C, rng: R) -> Self
    where
        S: KeyValueStore + Send + 'static,
    {
        let now = clock.now();
        let loaded = adapter.load_state(now);
        let exercise_log = adapter.load_exercise_log();

        let mut engine = Self::new(config, clock, rng);
        engine.has_booted = loaded.has_booted;
        engine.exercise_log = exercise_log;
        engine.add_observer(Box::new(adapter));

        match loaded.hunter {
            HunterSlot::Missing => {}
            HunterSlot::Restored(hunter) => engine.hunter = Some(*hunter),
            HunterSlot::Corrupted => {
                tracing::warn!("stored hunter was unusable, starting over with a fresh one");
                let hunter = Hunter::new(None, &engine.config, now, &mut engine.rng);
                engine.hunter = Some(hunter);
                engine.commit();
            }
        }

        engine
    }

    pub fn add_observer(&mut self, observer: Box<dyn StateObserver + Send>) {
        self.observers.push(observer);
    }

    pub fn hunter(&self) -> Option<&Hunter> {
        self.hunter.as_ref()
    }

    pub fn has_booted(&self) -> bool {
        self.has_booted
    }

    /// Set when an EXP award crossed at least one level; stays set until
    /// `clear_level_up_flag`.
    pub fn level_up_flag(&self) -> bool {
        self.level_up_flag
    }

    pub fn exercise_log(&self) -> &ExerciseLog {
        &self.exercise_log
    }

    pub fn config(&self) -> &ProgressionConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn phase(&self) -> Phase {
        match &self.hunter {
            None => Phase::Uninitialized,
            Some(hunter) if !hunter.is_onboarded() => Phase::Onboarding,
            Some(_) => Phase::Active,
        }
    }

    /// Dungeons the hunter's level gives access to.
    pub fn available_dungeons(&self) -> Vec<&Dungeon> {
        self.hunter
            .as_ref()
            .map(Hunter::available_dungeons)
            .unwrap_or_default()
    }

    /// Suggest a catalog exercise not yet completed today.
    pub fn recommend_exercise(&mut self) -> Option<&'static Exercise> {
        let level = self.hunter.as_ref().map_or(1, |h| h.level);
        let today = self.clock.today();
        self.exercise_log.recommend(level, today, &mut self.rng)
    }

    /// Create the hunter if none exists; otherwise bring it up to date.
    ///
    /// For an existing hunter the penalty check runs first, against the
    /// quests as they were left. Then, if the daily quests were issued on
    /// an earlier day (or there are none), a fresh set replaces them.
    pub fn initialize_hunter(&mut self, name: Option<&str>) -> Vec<Event> {
        let now = self.clock.now();
        let mut events = Vec::new();

        match self.hunter.as_mut() {
            None => {
                let hunter = Hunter::new(name, &self.config, now, &mut self.rng);
                tracing::info!(id = %hunter.id, name = %hunter.name, "hunter created");
                events.push(Event::HunterCreated {
                    id: hunter.id.clone(),
                    name: hunter.name.clone(),
                });
                self.hunter = Some(hunter);
            }
            Some(hunter) => {
                issue_penalty(hunter, now, &mut self.rng, &mut events);

                let stale = hunter
                    .quests_issued_at()
                    .map_or(true, |issued| issued.date() < now.date());
                if stale {
                    reset_quests(hunter, now, &mut self.rng, &mut events);
                }
            }
        }

        self.finish(events)
    }

    /// One-time onboarding → active transition.
    ///
    /// A blank name keeps the current one. Does nothing without a hunter
    /// or when onboarding already happened.
    pub fn complete_onboarding(
        &mut self,
        name: &str,
        goal: FitnessGoal,
        difficulty: DifficultyPreference,
    ) -> Vec<Event> {
        let now = self.clock.now();
        let Some(hunter) = self.hunter.as_mut().filter(|h| !h.is_onboarded()) else {
            return Vec::new();
        };

        let name = name.trim();
        if !name.is_empty() {
            hunter.name = name.to_string();
        }
        hunter.onboarding = Some(OnboardingProfile {
            goal,
            difficulty,
            completed_at: now,
        });

        self.finish(vec![Event::OnboardingCompleted])
    }

    pub fn set_has_booted(&mut self, has_booted: bool) {
        if self.has_booted != has_booted {
            self.has_booted = has_booted;
            self.commit();
        }
    }

    pub fn clear_level_up_flag(&mut self) {
        self.level_up_flag = false;
    }

    /// Award EXP, applying active penalties, level-ups and the streak.
    pub fn add_exp(&mut self, amount: u64) -> Vec<Event> {
        let now = self.clock.now();
        let policy = self.config.level_up_stats;
        let Some(hunter) = self.hunter.as_mut() else {
            return Vec::new();
        };

        let mut events = Vec::new();
        if grant_exp(hunter, amount, policy, now.date(), &mut events) {
            self.level_up_flag = true;
        }
        unlock_achievements(hunter, now, &mut self.rng, &mut events);

        self.finish(events)
    }

    /// Record a workout, apply its stat gains and award its EXP.
    ///
    /// Negative or NaN durations count as zero minutes and anything past
    /// one day counts as a day; intensity is clamped to 1..=5.
    pub fn log_workout(
        &mut self,
        workout_type: WorkoutType,
        duration: f64,
        intensity: f64,
        notes: Option<&str>,
    ) -> Vec<Event> {
        let now = self.clock.now();
        let policy = self.config.level_up_stats;
        let Some(hunter) = self.hunter.as_mut() else {
            return Vec::new();
        };

        let minutes = sanitize_minutes(duration);
        let rewards = compute_rewards(workout_type, minutes, intensity);
        let workout = Workout {
            id: record_id("workout", &mut self.rng),
            workout_type,
            duration: minutes,
            intensity: rewards.intensity,
            notes: notes.map(str::to_string),
            created_at: now,
            stat_gains: rewards.stat_gains,
            exp_gained: rewards.exp_gained,
        };

        let mut events = vec![Event::WorkoutLogged {
            id: workout.id.clone(),
            exp_gained: workout.exp_gained,
        }];

        hunter.stats += rewards.stat_gains;
        hunter.total_workouts += 1;
        hunter.total_minutes += minutes;
        hunter.workouts.push(workout);

        if grant_exp(hunter, rewards.exp_gained, policy, now.date(), &mut events) {
            self.level_up_flag = true;
        }
        unlock_achievements(hunter, now, &mut self.rng, &mut events);

        self.finish(events)
    }

    /// Complete a daily quest and award its EXP. Idempotent.
    pub fn complete_quest(&mut self, quest_id: &str) -> Vec<Event> {
        let now = self.clock.now();
        let policy = self.config.level_up_stats;
        let Some(hunter) = self.hunter.as_mut() else {
            return Vec::new();
        };
        let Some(quest) = hunter
            .daily_quests
            .iter_mut()
            .find(|q| q.id == quest_id && !q.completed)
        else {
            return Vec::new();
        };

        quest.completed = true;
        let reward = quest.exp_reward;
        let mut events = vec![Event::QuestCompleted {
            id: quest.id.clone(),
            title: quest.title.clone(),
            exp_reward: reward,
        }];

        if hunter.daily_quests.iter().all(|q| q.completed) {
            hunter.perfect_days += 1;
            events.push(Event::DailyQuestsCleared);
        }

        if grant_exp(hunter, reward, policy, now.date(), &mut events) {
            self.level_up_flag = true;
        }
        unlock_achievements(hunter, now, &mut self.rng, &mut events);

        self.finish(events)
    }

    /// Complete a penalty quest, lifting its penalty. Awards nothing.
    pub fn complete_penalty_quest(&mut self, penalty_id: &str) -> Vec<Event> {
        let Some(penalty) = self
            .hunter
            .as_mut()
            .and_then(|h| h.penalty_quests.iter_mut().find(|p| p.id == penalty_id && !p.completed))
        else {
            return Vec::new();
        };

        penalty.completed = true;
        tracing::info!(id = %penalty.id, "penalty quest completed");
        let events = vec![Event::PenaltyCleared {
            id: penalty.id.clone(),
        }];

        self.finish(events)
    }

    /// Recompute the streak against today's date.
    pub fn update_streak(&mut self) -> Vec<Event> {
        let today = self.clock.today();
        let Some(hunter) = self.hunter.as_mut() else {
            return Vec::new();
        };

        let mut events = Vec::new();
        refresh_streak(hunter, today, &mut events);
        self.commit();
        events
    }

    /// Issue a penalty quest if days were missed and none was issued today.
    pub fn check_and_generate_penalty_quests(&mut self) -> Vec<Event> {
        let now = self.clock.now();
        let Some(hunter) = self.hunter.as_mut() else {
            return Vec::new();
        };

        let mut events = Vec::new();
        issue_penalty(hunter, now, &mut self.rng, &mut events);
        self.finish(events)
    }

    /// Clear a dungeon and award its EXP. Idempotent.
    pub fn complete_dungeon(&mut self, dungeon_id: &str) -> Vec<Event> {
        let now = self.clock.now();
        let policy = self.config.level_up_stats;
        let Some(hunter) = self.hunter.as_mut() else {
            return Vec::new();
        };
        let Some(dungeon) = hunter
            .dungeons
            .iter_mut()
            .find(|d| d.id == dungeon_id && !d.completed)
        else {
            return Vec::new();
        };

        dungeon.completed = true;
        let reward = dungeon.exp_reward;
        tracing::info!(id = %dungeon.id, reward, "dungeon cleared");
        let mut events = vec![Event::DungeonCleared {
            id: dungeon.id.clone(),
            name: dungeon.name.clone(),
            exp_reward: reward,
        }];

        if grant_exp(hunter, reward, policy, now.date(), &mut events) {
            self.level_up_flag = true;
        }
        unlock_achievements(hunter, now, &mut self.rng, &mut events);

        self.finish(events)
    }

    /// Record a catalog exercise and award its EXP.
    ///
    /// The completion is logged even without a hunter; the EXP is not.
    pub fn complete_exercise(&mut self, exercise_id: &str) -> Vec<Event> {
        let now = self.clock.now();
        let policy = self.config.level_up_stats;
        let Some(exercise) = self.exercise_log.complete(exercise_id, now) else {
            return Vec::new();
        };

        let mut events = vec![Event::ExerciseCompleted {
            id: exercise.id.to_string(),
            name: exercise.name.to_string(),
            exp_reward: exercise.exp_reward,
        }];

        if let Some(hunter) = self.hunter.as_mut() {
            if grant_exp(hunter, exercise.exp_reward, policy, now.date(), &mut events) {
                self.level_up_flag = true;
            }
            unlock_achievements(hunter, now, &mut self.rng, &mut events);
        }

        self.finish(events)
    }

    /// Replace the daily quests with a fresh set, whatever the date.
    pub fn reset_daily_quests(&mut self) -> Vec<Event> {
        let now = self.clock.now();
        let Some(hunter) = self.hunter.as_mut() else {
            return Vec::new();
        };

        let mut events = Vec::new();
        reset_quests(hunter, now, &mut self.rng, &mut events);
        self.finish(events)
    }

    /// Unlock every achievement whose criterion is now met.
    pub fn check_achievements(&mut self) -> Vec<Event> {
        let now = self.clock.now();
        let Some(hunter) = self.hunter.as_mut() else {
            return Vec::new();
        };

        let mut events = Vec::new();
        unlock_achievements(hunter, now, &mut self.rng, &mut events);
        self.finish(events)
    }

    /// Commit when `events` is non-empty, then hand them back.
    fn finish(&mut self, events: Vec<Event>) -> Vec<Event> {
        if !events.is_empty() {
            self.commit();
        }
        events
    }

    fn commit(&mut self) {
        let snapshot = CommitSnapshot {
            hunter: self.hunter.as_ref(),
            has_booted: self.has_booted,
            exercise_log: &self.exercise_log,
        };
        for observer in self.observers.iter_mut() {
            observer.on_commit(&snapshot);
        }
    }
}

/// Apply an EXP award. Returns whether at least one level was gained.
fn grant_exp(
    hunter: &mut Hunter,
    amount: u64,
    policy: LevelUpStatPolicy,
    today: NaiveDate,
    events: &mut Vec<Event>,
) -> bool {
    let penalty = hunter.active_penalty().min(amount);
    let applied = amount - penalty;
    tracing::debug!(requested = amount, penalty, applied, "exp awarded");
    events.push(Event::ExpGained {
        requested: amount,
        penalty,
        applied,
    });

    let start_level = hunter.level;
    let start_rank = hunter.rank;

    hunter.exp = hunter.exp.saturating_add(applied);
    hunter.exp_to_next_level = exp_for_level(hunter.level);
    while hunter.exp >= hunter.exp_to_next_level {
        hunter.exp -= hunter.exp_to_next_level;
        hunter.level += 1;
        hunter.exp_to_next_level = exp_for_level(hunter.level);

        if policy == LevelUpStatPolicy::PerLevel {
            let bonus = stat_increase_on_level_up(hunter.level);
            hunter.stats += bonus;
            push_level_up(events, hunter.level - 1, hunter.level, bonus);
        }
    }

    let leveled = hunter.level > start_level;
    if leveled && policy == LevelUpStatPolicy::FinalLevelOnce {
        let bonus = stat_increase_on_level_up(hunter.level);
        hunter.stats += bonus;
        push_level_up(events, start_level, hunter.level, bonus);
    }

    hunter.rank = rank_for_level(hunter.level);
    if hunter.rank != start_rank {
        tracing::info!(from = %start_rank, to = %hunter.rank, "rank changed");
        events.push(Event::RankUp {
            from: start_rank,
            to: hunter.rank,
        });
    }

    refresh_streak(hunter, today, events);
    leveled
}

fn push_level_up(events: &mut Vec<Event>, from: u32, to: u32, stat_bonus: HunterStats) {
    tracing::info!(from, to, "level up");
    events.push(Event::LevelUp { from, to, stat_bonus });
}

/// Streak rule: first activity starts at 1, the same day (or a recorded
/// date in the future) keeps it, the next day extends it, any longer gap
/// restarts it at 1.
fn refresh_streak(hunter: &mut Hunter, today: NaiveDate, events: &mut Vec<Event>) {
    let streak = match hunter.last_activity_date {
        None => 1,
        Some(last) => match days_between(last, today) {
            1 => hunter.streak + 1,
            gap if gap <= 0 => hunter.streak,
            _ => 1,
        },
    };

    hunter.last_activity_date = Some(today);
    if streak != hunter.streak {
        hunter.streak = streak;
        events.push(Event::StreakUpdated { streak });
    }
}

/// At most one penalty quest is issued per calendar day.
fn issue_penalty<R: Rng + ?Sized>(
    hunter: &mut Hunter,
    now: NaiveDateTime,
    rng: &mut R,
    events: &mut Vec<Event>,
) {
    let today = now.date();
    let missed_days = check_for_missed_quests(hunter.last_activity_date, &hunter.daily_quests, today);
    if missed_days == 0 {
        return;
    }
    if hunter.penalty_quests.iter().any(|p| p.created_at.date() == today) {
        tracing::debug!(missed_days, "penalty already issued today");
        return;
    }

    let penalty = generate_penalty_quest(missed_days, now, rng);
    tracing::info!(id = %penalty.id, missed_days, exp_penalty = penalty.exp_penalty, "penalty quest issued");
    events.push(Event::PenaltyIssued {
        id: penalty.id.clone(),
        missed_days,
        exp_penalty: penalty.exp_penalty,
    });
    hunter.penalty_quests.push(penalty);
}

fn reset_quests<R: Rng + ?Sized>(
    hunter: &mut Hunter,
    now: NaiveDateTime,
    rng: &mut R,
    events: &mut Vec<Event>,
) {
    hunter.daily_quests = generate_daily_quests(now, rng);
    tracing::info!(count = hunter.daily_quests.len(), "daily quests reset");
    events.push(Event::DailyQuestsReset {
        count: hunter.daily_quests.len(),
    });
}

fn unlock_achievements<R: Rng + ?Sized>(
    hunter: &mut Hunter,
    now: NaiveDateTime,
    rng: &mut R,
    events: &mut Vec<Event>,
) {
    let snapshot = hunter.snapshot();
    let unlocked: Vec<Achievement> = evaluate(ACHIEVEMENT_DEFINITIONS, &snapshot, &hunter.achievements)
        .into_iter()
        .map(|definition| Achievement::unlock(definition, now, rng))
        .collect();

    for achievement in unlocked {
        tracing::info!(title = %achievement.title, "achievement unlocked");
        events.push(Event::AchievementUnlocked {
            title: achievement.title.clone(),
        });
        hunter.achievements.push(achievement);
    }
}
