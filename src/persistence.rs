//! Persistence adapter.
//!
//! Serializes engine state into a `KeyValueStore` under two keys:
//!
//! ```text
//! "shadow-regimen-storage"  → { "hunter": Hunter | null, "hasBooted": bool }
//! "shadow-regimen-workouts" → { "completedExercises": [...] }
//! ```
//!
//! Writes never fail from the caller's point of view: storage errors are
//! logged and dropped, and the in-memory state stays authoritative. Loads
//! re-validate the snapshot and report a corrupted hunter instead of
//! trying to repair it.

use crate::calc::{exp_for_level, rank_for_level};
use crate::engine::{CommitSnapshot, StateObserver};
use crate::error::RegimenError;
use crate::exercise::ExerciseLog;
use crate::hunter::Hunter;
use crate::storage::KeyValueStore;
use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;

/// Key holding the hunter and boot flag.
pub const STATE_KEY: &str = "shadow-regimen-storage";

/// Key holding the completed-exercise log.
pub const WORKOUTS_KEY: &str = "shadow-regimen-workouts";

/// Outcome of rehydrating the stored hunter.
#[derive(Debug, Clone, PartialEq)]
pub enum HunterSlot {
    /// Nothing stored.
    Missing,
    /// A valid hunter was restored.
    Restored(Box<Hunter>),
    /// A hunter was stored but is unusable and must be replaced.
    Corrupted,
}

/// State read back from storage.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedState {
    pub hunter: HunterSlot,
    pub has_booted: bool,
}

impl LoadedState {
    fn empty() -> Self {
        Self {
            hunter: HunterSlot::Missing,
            has_booted: false,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StoredState<'a> {
    hunter: Option<&'a Hunter>,
    has_booted: bool,
}

/// Rehydrate the JSON stored under `STATE_KEY`.
///
/// A hunter without a non-empty `id` and `name`, or one that does not
/// decode, is reported as `HunterSlot::Corrupted`. Daily quests missing a
/// `createdAt` are stamped with `now`. Unparseable JSON counts as empty
/// storage.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use shadow_regimen::persistence::{rehydrate, HunterSlot};
///
/// let now = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let loaded = rehydrate(r#"{ "hunter": { "level": 3 }, "hasBooted": true }"#, now);
///
/// assert_eq!(loaded.hunter, HunterSlot::Corrupted);
/// assert!(loaded.has_booted);
/// ```
pub fn rehydrate(json: &str, now: NaiveDateTime) -> LoadedState {
    let mut root: Value = match serde_json::from_str(json) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(error = %err, "stored state is not valid JSON, starting fresh");
            return LoadedState::empty();
        }
    };

    let has_booted = root
        .get("hasBooted")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let hunter = match root.get_mut("hunter") {
        None | Some(Value::Null) => HunterSlot::Missing,
        Some(value) => rehydrate_hunter(value, now),
    };

    LoadedState { hunter, has_booted }
}

fn has_text(value: &Value, field: &str) -> bool {
    value
        .get(field)
        .and_then(Value::as_str)
        .is_some_and(|s| !s.trim().is_empty())
}

fn rehydrate_hunter(value: &mut Value, now: NaiveDateTime) -> HunterSlot {
    if !has_text(value, "id") || !has_text(value, "name") {
        tracing::warn!("stored hunter is missing its id or name");
        return HunterSlot::Corrupted;
    }

    if let Some(Value::Array(quests)) = value.get_mut("dailyQuests") {
        let stamp = Value::String(now.format("%Y-%m-%dT%H:%M:%S").to_string());
        for quest in quests.iter_mut().filter_map(Value::as_object_mut) {
            if quest.get("createdAt").map_or(true, Value::is_null) {
                quest.insert("createdAt".to_string(), stamp.clone());
            }
        }
    }

    match serde_json::from_value::<Hunter>(value.take()) {
        Ok(mut hunter) => {
            repair_derived(&mut hunter);
            HunterSlot::Restored(Box::new(hunter))
        }
        Err(err) => {
            tracing::warn!(error = %err, "stored hunter could not be decoded");
            HunterSlot::Corrupted
        }
    }
}

/// Recompute the fields that are pure functions of `level`.
///
/// Stored EXP at or above the threshold rolls over into levels, without
/// stat bonuses, so the loaded hunter satisfies `exp < exp_to_next_level`.
fn repair_derived(hunter: &mut Hunter) {
    hunter.level = hunter.level.max(1);
    hunter.exp_to_next_level = exp_for_level(hunter.level);
    while hunter.exp >= hunter.exp_to_next_level {
        hunter.exp -= hunter.exp_to_next_level;
        hunter.level += 1;
        hunter.exp_to_next_level = exp_for_level(hunter.level);
    }
    hunter.rank = rank_for_level(hunter.level);
}

/// Bridges engine state and a `KeyValueStore`.
pub struct PersistenceAdapter<S> {
    store: S,
}

impl<S: KeyValueStore> PersistenceAdapter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read and rehydrate the hunter state. Storage errors read as empty.
    pub fn load_state(&self, now: NaiveDateTime) -> LoadedState {
        match self.read(STATE_KEY) {
            Some(json) => rehydrate(&json, now),
            None => LoadedState::empty(),
        }
    }

    /// Read the completed-exercise log. Anything unreadable reads as empty.
    pub fn load_exercise_log(&self) -> ExerciseLog {
        let Some(json) = self.read(WORKOUTS_KEY) else {
            return ExerciseLog::default();
        };
        serde_json::from_str(&json).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "stored exercise log could not be decoded");
            ExerciseLog::default()
        })
    }

    /// Write both keys. Failures are logged and swallowed.
    pub fn save(&mut self, snapshot: &CommitSnapshot<'_>) {
        let state = StoredState {
            hunter: snapshot.hunter,
            has_booted: snapshot.has_booted,
        };
        self.write(STATE_KEY, &state);
        self.write(WORKOUTS_KEY, snapshot.exercise_log);
    }

    /// Remove everything this adapter wrote.
    pub fn clear(&mut self) {
        for key in [STATE_KEY, WORKOUTS_KEY] {
            if let Err(err) = self.store.remove(key) {
                tracing::warn!(key, error = %err, "failed to remove stored state");
            }
        }
    }

    fn read(&self, key: &str) -> Option<String> {
        self.store.get(key).unwrap_or_else(|err| {
            tracing::warn!(key, error = %err, "failed to read stored state");
            None
        })
    }

    fn write<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        let result = serde_json::to_string(value)
            .map_err(RegimenError::from)
            .and_then(|json| self.store.set(key, &json));
        if let Err(err) = result {
            tracing::warn!(key, error = %err, "failed to persist state");
        }
    }
}

impl<S: KeyValueStore> StateObserver for PersistenceAdapter<S> {
    fn on_commit(&mut self, snapshot: &CommitSnapshot<'_>) {
        self.save(snapshot);
    }
}
