use chrono::{NaiveDate, NaiveDateTime};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use shadow_regimen::clock::ManualClock;
use shadow_regimen::rewards::WorkoutType;
use shadow_regimen::*;
use std::sync::{Arc, Mutex};

fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 9, 15)
        .unwrap()
        .and_hms_opt(18, 0, 0)
        .unwrap()
}

/// A store whose contents stay inspectable after the engine takes it.
#[derive(Clone, Default)]
struct SharedStore(Arc<Mutex<MemoryStore>>);

impl SharedStore {
    fn raw(&self, key: &str) -> Option<String> {
        self.0.lock().unwrap().get(key).unwrap()
    }
}

impl KeyValueStore for SharedStore {
    fn get(&self, key: &str) -> Result<Option<String>, RegimenError> {
        self.0.lock().unwrap().get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), RegimenError> {
        self.0.lock().unwrap().set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), RegimenError> {
        self.0.lock().unwrap().remove(key)
    }
}

/// Every operation fails, as a full or unavailable disk would.
struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn get(&self, key: &str) -> Result<Option<String>, RegimenError> {
        Err(RegimenError::StorageRead {
            key: key.to_string(),
            reason: "unavailable".to_string(),
        })
    }

    fn set(&mut self, key: &str, _value: &str) -> Result<(), RegimenError> {
        Err(RegimenError::StorageWrite {
            key: key.to_string(),
            reason: "quota exceeded".to_string(),
        })
    }

    fn remove(&mut self, key: &str) -> Result<(), RegimenError> {
        Err(RegimenError::StorageWrite {
            key: key.to_string(),
            reason: "unavailable".to_string(),
        })
    }
}

fn restore<S>(store: S, now: NaiveDateTime) -> ProgressionEngine<ManualClock, ChaCha8Rng>
where
    S: KeyValueStore + Send + 'static,
{
    ProgressionEngine::restore(
        PersistenceAdapter::new(store),
        ProgressionConfig::default(),
        ManualClock::new(now),
        ChaCha8Rng::seed_from_u64(21),
    )
}

fn play(engine: &mut ProgressionEngine<ManualClock, ChaCha8Rng>) {
    engine.initialize_hunter(Some("Cha Hae-In"));
    engine.set_has_booted(true);
    engine.complete_onboarding("Cha Hae-In", FitnessGoal::Balanced, DifficultyPreference::Normal);
    engine.log_workout(WorkoutType::Strength, 45.0, 4.0, Some("legs"));
    engine.complete_exercise("plank");
    engine.add_exp(500);
}

#[test]
fn test_state_survives_reload_through_memory() {
    let store = SharedStore::default();
    let mut first = restore(store.clone(), start());
    assert_eq!(first.phase(), Phase::Uninitialized);
    play(&mut first);

    let second = restore(store.clone(), start());
    assert_eq!(second.hunter(), first.hunter());
    assert!(second.has_booted());
    assert_eq!(second.exercise_log(), first.exercise_log());
    assert_eq!(second.phase(), Phase::Active);
    assert!(!second.level_up_flag());
}

#[test]
fn test_state_survives_reload_through_files() {
    let dir = tempfile::tempdir().unwrap();

    let mut first = restore(FileStore::new(dir.path()), start());
    play(&mut first);

    assert!(dir.path().join("shadow-regimen-storage.json").exists());
    assert!(dir.path().join("shadow-regimen-workouts.json").exists());

    let second = restore(FileStore::new(dir.path()), start());
    assert_eq!(second.hunter(), first.hunter());
    assert_eq!(second.exercise_log(), first.exercise_log());
}

#[test]
fn test_stored_layout() {
    let store = SharedStore::default();
    let mut engine = restore(store.clone(), start());
    play(&mut engine);

    let state: serde_json::Value = serde_json::from_str(&store.raw(STATE_KEY).unwrap()).unwrap();
    assert_eq!(state["hasBooted"], true);
    assert_eq!(state["hunter"]["name"], "Cha Hae-In");
    assert_eq!(state["hunter"]["workouts"][0]["type"], "strength");
    assert_eq!(state["hunter"]["lastActivityDate"], "2024-09-15");

    let log: serde_json::Value = serde_json::from_str(&store.raw(WORKOUTS_KEY).unwrap()).unwrap();
    assert_eq!(log["completedExercises"][0]["exerciseId"], "plank");
}

#[test]
fn test_hunter_without_name_is_replaced() {
    let store = SharedStore::default();
    store
        .clone()
        .set(STATE_KEY, r#"{ "hunter": { "id": "USER-00000001", "level": 12 }, "hasBooted": true }"#)
        .unwrap();

    let engine = restore(store.clone(), start());
    let hunter = engine.hunter().unwrap();
    assert_eq!(hunter.name, "Hunter");
    assert_eq!(hunter.level, 1);
    assert_ne!(hunter.id, "USER-00000001");
    assert!(engine.has_booted());

    // The replacement is written back straight away.
    let state: serde_json::Value = serde_json::from_str(&store.raw(STATE_KEY).unwrap()).unwrap();
    assert_eq!(state["hunter"]["id"], hunter.id.as_str());
}

#[test]
fn test_undecodable_hunter_is_replaced() {
    let store = SharedStore::default();
    store
        .clone()
        .set(STATE_KEY, r#"{ "hunter": { "id": "USER-1", "name": "Kim", "level": "high" } }"#)
        .unwrap();

    let engine = restore(store, start());
    assert_eq!(engine.hunter().unwrap().level, 1);
    assert_eq!(engine.phase(), Phase::Onboarding);
}

#[test]
fn test_garbage_is_treated_as_empty() {
    let store = SharedStore::default();
    store.clone().set(STATE_KEY, "{{{ not json").unwrap();
    store.clone().set(WORKOUTS_KEY, "[1, 2").unwrap();

    let mut engine = restore(store.clone(), start());
    assert!(engine.hunter().is_none());
    assert!(!engine.has_booted());
    assert!(engine.exercise_log().completed_exercises.is_empty());

    engine.initialize_hunter(None);
    assert!(store.raw(STATE_KEY).unwrap().contains("\"hunter\":{"));
}

#[test]
fn test_storage_failures_are_swallowed() {
    let mut engine = restore(BrokenStore, start());
    assert!(engine.hunter().is_none());

    play(&mut engine);
    let hunter = engine.hunter().unwrap();
    assert_eq!(hunter.total_workouts, 1);
    assert_eq!(engine.exercise_log().completed_exercises.len(), 1);
}

#[test]
fn test_reload_next_day_refreshes_quests() {
    let store = SharedStore::default();
    let mut first = restore(store.clone(), start());
    play(&mut first);
    let old_quests = first.hunter().unwrap().daily_quests.clone();

    let tomorrow = start() + chrono::Duration::days(1);
    let mut second = restore(store.clone(), tomorrow);
    let events = second.initialize_hunter(None);

    assert!(events.iter().any(|e| matches!(e, Event::PenaltyIssued { missed_days: 1, .. })));
    let hunter = second.hunter().unwrap();
    assert_ne!(hunter.daily_quests, old_quests);
    assert!(hunter.daily_quests.iter().all(|q| q.created_at.date() == tomorrow.date()));

    let third = restore(store, tomorrow);
    assert_eq!(third.hunter(), second.hunter());
}

#[test]
fn test_extreme_workout_survives_reload() {
    let store = SharedStore::default();
    let mut first = restore(store.clone(), start());
    first.initialize_hunter(Some("Jinwoo"));
    first.log_workout(WorkoutType::Strength, 1e308, 5.0, None);
    first.log_workout(WorkoutType::Cardio, f64::INFINITY, 5.0, None);

    let state: serde_json::Value = serde_json::from_str(&store.raw(STATE_KEY).unwrap()).unwrap();
    for stat in ["str", "vit", "dex", "int"] {
        assert!(state["hunter"]["stats"][stat].is_f64(), "{stat} was not stored as a number");
    }

    let second = restore(store, start());
    let hunter = second.hunter().unwrap();
    assert_eq!(hunter.name, "Jinwoo");
    assert_eq!(hunter.total_workouts, 2);
    assert_eq!(second.hunter(), first.hunter());
}
