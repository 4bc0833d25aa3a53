//! Integration tests for persistence layer using in-memory SQLite databases
//!
//! These tests verify the stores the bot wires into its services.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use application::ports::{ClientStore, TrainerStore, WorkoutStore};
use chrono::{NaiveDate, NaiveDateTime, Utc};
use domain::{
    ChatUserId, ClientId, FitnessGoal, Gender, Height, NewClient, NewTrainer, NewWorkout,
    PersonName, SearchQuery, TrainerId, Weight, WorkoutDuration, WorkoutStatus, WorkoutType,
};
use infrastructure::persistence::{
    AsyncDatabase, SqliteClientStore, SqliteTrainerStore, SqliteWorkoutStore,
};

// ============================================================================
// Test Helpers
// ============================================================================

struct Stores {
    trainers: SqliteTrainerStore,
    clients: SqliteClientStore,
    workouts: SqliteWorkoutStore,
}

async fn create_test_stores() -> Stores {
    let db = AsyncDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Failed to run migrations");
    let pool = db.pool().clone();
    Stores {
        trainers: SqliteTrainerStore::new(pool.clone()),
        clients: SqliteClientStore::new(pool.clone()),
        workouts: SqliteWorkoutStore::new(pool),
    }
}

async fn register(stores: &Stores, telegram_id: i64) -> TrainerId {
    stores
        .trainers
        .create(&NewTrainer::new(ChatUserId::new(telegram_id)))
        .await
        .expect("Failed to create trainer")
        .id
}

async fn add_client(stores: &Stores, trainer: TrainerId, first: &str, last: Option<&str>) -> ClientId {
    let mut client = NewClient::new(PersonName::new(first).unwrap());
    client.last_name = last.map(|l| PersonName::new(l).unwrap());
    stores
        .clients
        .create(trainer, &client)
        .await
        .expect("Failed to create client")
        .id
}

fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

async fn schedule(stores: &Stores, trainer: TrainerId, client: ClientId, when: NaiveDateTime) -> domain::Workout {
    stores
        .workouts
        .create(&NewWorkout::new(trainer, client, when))
        .await
        .expect("Failed to create workout")
}

// ============================================================================
// Trainer store
// ============================================================================

mod trainer_store_tests {
    use super::*;

    #[tokio::test]
    async fn create_and_find_by_telegram_id() {
        let stores = create_test_stores().await;
        let mut new = NewTrainer::new(ChatUserId::new(42));
        new.username = Some("coach_anna".to_string());
        new.first_name = Some("Анна".to_string());

        let created = stores.trainers.create(&new).await.unwrap();
        let found = stores
            .trainers
            .find_by_telegram_id(ChatUserId::new(42))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found.id, created.id);
        assert_eq!(found.username.as_deref(), Some("coach_anna"));
        assert_eq!(found.first_name.as_deref(), Some("Анна"));
        assert_eq!(stores.trainers.get(created.id).await.unwrap(), Some(found));
    }

    #[tokio::test]
    async fn unknown_telegram_id_is_none() {
        let stores = create_test_stores().await;
        assert!(
            stores
                .trainers
                .find_by_telegram_id(ChatUserId::new(7))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn telegram_id_is_unique() {
        let stores = create_test_stores().await;
        register(&stores, 42).await;
        assert!(
            stores
                .trainers
                .create(&NewTrainer::new(ChatUserId::new(42)))
                .await
                .is_err()
        );
    }
}

// ============================================================================
// Client store
// ============================================================================

mod client_store_tests {
    use super::*;

    #[tokio::test]
    async fn full_profile_round_trips() {
        let stores = create_test_stores().await;
        let trainer = register(&stores, 1).await;

        let mut new = NewClient::new(PersonName::new("Иван").unwrap());
        new.last_name = Some(PersonName::new("Петров").unwrap());
        new.phone = Some("+7 900 123-45-67".to_string());
        new.gender = Some(Gender::Male);
        new.height = Some(Height::new(182.5).unwrap());
        new.weight = Some(Weight::new(80.0).unwrap());
        new.primary_goal = Some(FitnessGoal::MuscleGain);
        new.medical_conditions = Some("Колено".to_string());

        let created = stores.clients.create(trainer, &new).await.unwrap();
        let loaded = stores.clients.get(trainer, created.id).await.unwrap().unwrap();

        assert_eq!(loaded.full_name(), "Иван Петров");
        assert_eq!(loaded.gender, Some(Gender::Male));
        assert_eq!(loaded.height.map(|h| h.cm()), Some(182.5));
        assert_eq!(loaded.weight.map(|w| w.kg()), Some(80.0));
        assert_eq!(loaded.primary_goal, Some(FitnessGoal::MuscleGain));
        assert!(loaded.activity_level.is_none());
        assert!(loaded.email.is_none());
        assert!(loaded.is_active);
    }

    #[tokio::test]
    async fn clients_are_scoped_to_their_trainer() {
        let stores = create_test_stores().await;
        let anna = register(&stores, 1).await;
        let oleg = register(&stores, 2).await;
        let client = add_client(&stores, anna, "Мария", None).await;

        assert!(stores.clients.get(oleg, client).await.unwrap().is_none());
        assert!(stores.clients.list(oleg).await.unwrap().is_empty());
        assert_eq!(stores.clients.count(anna).await.unwrap(), 1);
        assert_eq!(stores.clients.count(oleg).await.unwrap(), 0);
        assert!(!stores.clients.delete(oleg, client).await.unwrap());
        assert!(stores.clients.get(anna, client).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let stores = create_test_stores().await;
        let trainer = register(&stores, 1).await;
        add_client(&stores, trainer, "Первый", None).await;
        add_client(&stores, trainer, "Второй", None).await;

        let names: Vec<_> = stores
            .clients
            .list(trainer)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.first_name)
            .collect();
        assert_eq!(names, ["Второй", "Первый"]);
    }

    #[tokio::test]
    async fn search_is_case_insensitive_for_cyrillic() {
        let stores = create_test_stores().await;
        let trainer = register(&stores, 1).await;
        add_client(&stores, trainer, "Ольга", Some("Смирнова")).await;
        add_client(&stores, trainer, "Андрей", Some("Смирнов")).await;
        add_client(&stores, trainer, "Борис", Some("Иванов")).await;

        let found = stores
            .clients
            .search(trainer, &SearchQuery::new("СМИРН").unwrap())
            .await
            .unwrap();
        let names: Vec<_> = found.iter().map(|c| c.first_name.as_str()).collect();
        assert_eq!(names, ["Андрей", "Ольга"]);

        let by_first = stores
            .clients
            .search(trainer, &SearchQuery::new("бор").unwrap())
            .await
            .unwrap();
        assert_eq!(by_first.len(), 1);
    }

    #[tokio::test]
    async fn search_ignores_other_trainers() {
        let stores = create_test_stores().await;
        let anna = register(&stores, 1).await;
        let oleg = register(&stores, 2).await;
        add_client(&stores, anna, "Ольга", None).await;

        let found = stores
            .clients
            .search(oleg, &SearchQuery::new("оль").unwrap())
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn deleting_client_removes_its_workouts() {
        let stores = create_test_stores().await;
        let trainer = register(&stores, 1).await;
        let client = add_client(&stores, trainer, "Иван", None).await;
        schedule(&stores, trainer, client, at(28, 10, 0)).await;
        schedule(&stores, trainer, client, at(29, 10, 0)).await;

        assert!(stores.clients.delete(trainer, client).await.unwrap());
        assert!(stores.clients.get(trainer, client).await.unwrap().is_none());
        assert_eq!(stores.workouts.count(trainer).await.unwrap(), 0);
        assert_eq!(stores.clients.count(trainer).await.unwrap(), 0);
    }
}

// ============================================================================
// Workout store
// ============================================================================

mod workout_store_tests {
    use super::*;

    #[tokio::test]
    async fn create_keeps_details_and_defaults_to_planned() {
        let stores = create_test_stores().await;
        let trainer = register(&stores, 1).await;
        let client = add_client(&stores, trainer, "Иван", None).await;

        let mut new = NewWorkout::new(trainer, client, at(28, 15, 0));
        new.workout_type = Some(WorkoutType::Cardio);
        new.duration = WorkoutDuration::new(45).unwrap();
        new.location = Some("Зал на Ленина".to_string());

        let created = stores.workouts.create(&new).await.unwrap();
        let loaded = stores.workouts.get(trainer, created.id).await.unwrap().unwrap();

        assert_eq!(loaded.scheduled_date, at(28, 15, 0));
        assert_eq!(loaded.workout_type, Some(WorkoutType::Cardio));
        assert_eq!(loaded.duration.minutes(), 45);
        assert_eq!(loaded.location.as_deref(), Some("Зал на Ленина"));
        assert!(loaded.trainer_notes.is_none());
        assert_eq!(loaded.status, WorkoutStatus::Planned);
        assert!(loaded.completed_at.is_none());
    }

    #[tokio::test]
    async fn list_between_is_half_open_and_named() {
        let stores = create_test_stores().await;
        let trainer = register(&stores, 1).await;
        let client = add_client(&stores, trainer, "Иван", Some("Петров")).await;
        schedule(&stores, trainer, client, at(28, 0, 0)).await;
        schedule(&stores, trainer, client, at(28, 18, 30)).await;
        schedule(&stores, trainer, client, at(28, 9, 0)).await;
        schedule(&stores, trainer, client, at(29, 0, 0)).await;
        schedule(&stores, trainer, client, at(27, 23, 59)).await;

        let today = stores
            .workouts
            .list_between(trainer, at(28, 0, 0), at(29, 0, 0))
            .await
            .unwrap();
        let times: Vec<_> = today.iter().map(|w| w.workout.scheduled_date).collect();
        assert_eq!(times, [at(28, 0, 0), at(28, 9, 0), at(28, 18, 30)]);
        assert!(today.iter().all(|w| w.client_name == "Иван Петров"));
    }

    #[tokio::test]
    async fn upcoming_skips_past_and_closed_workouts() {
        let stores = create_test_stores().await;
        let trainer = register(&stores, 1).await;
        let client = add_client(&stores, trainer, "Иван", None).await;
        schedule(&stores, trainer, client, at(27, 10, 0)).await;
        let done = schedule(&stores, trainer, client, at(29, 10, 0)).await;
        schedule(&stores, trainer, client, at(30, 10, 0)).await;
        schedule(&stores, trainer, client, at(28, 12, 0)).await;
        stores
            .workouts
            .update_status(trainer, done.id, WorkoutStatus::Cancelled, None)
            .await
            .unwrap();

        let upcoming = stores
            .workouts
            .list_upcoming(trainer, at(28, 12, 0), 10)
            .await
            .unwrap();
        let times: Vec<_> = upcoming.iter().map(|w| w.workout.scheduled_date).collect();
        assert_eq!(times, [at(28, 12, 0), at(30, 10, 0)]);

        let limited = stores
            .workouts
            .list_upcoming(trainer, at(28, 12, 0), 1)
            .await
            .unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[tokio::test]
    async fn client_history_is_newest_first_and_limited() {
        let stores = create_test_stores().await;
        let trainer = register(&stores, 1).await;
        let ivan = add_client(&stores, trainer, "Иван", None).await;
        let olga = add_client(&stores, trainer, "Ольга", None).await;
        for day in 20..25 {
            schedule(&stores, trainer, ivan, at(day, 10, 0)).await;
        }
        schedule(&stores, trainer, olga, at(26, 10, 0)).await;

        let history = stores
            .workouts
            .list_for_client(trainer, ivan, 3)
            .await
            .unwrap();
        let times: Vec<_> = history.iter().map(|w| w.scheduled_date).collect();
        assert_eq!(times, [at(24, 10, 0), at(23, 10, 0), at(22, 10, 0)]);
    }

    #[tokio::test]
    async fn completion_records_timestamp() {
        let stores = create_test_stores().await;
        let trainer = register(&stores, 1).await;
        let client = add_client(&stores, trainer, "Иван", None).await;
        let workout = schedule(&stores, trainer, client, at(28, 10, 0)).await;
        let now = Utc::now();

        assert!(
            stores
                .workouts
                .update_status(trainer, workout.id, WorkoutStatus::Completed, Some(now))
                .await
                .unwrap()
        );
        let loaded = stores.workouts.get(trainer, workout.id).await.unwrap().unwrap();
        assert_eq!(loaded.status, WorkoutStatus::Completed);
        assert_eq!(
            loaded.completed_at.map(|t| t.timestamp()),
            Some(now.timestamp())
        );
    }

    #[tokio::test]
    async fn other_trainers_cannot_touch_workouts() {
        let stores = create_test_stores().await;
        let anna = register(&stores, 1).await;
        let oleg = register(&stores, 2).await;
        let client = add_client(&stores, anna, "Иван", None).await;
        let workout = schedule(&stores, anna, client, at(28, 10, 0)).await;

        assert!(stores.workouts.get(oleg, workout.id).await.unwrap().is_none());
        assert!(
            !stores
                .workouts
                .update_status(oleg, workout.id, WorkoutStatus::Completed, None)
                .await
                .unwrap()
        );
        assert!(!stores.workouts.delete(oleg, workout.id).await.unwrap());
        assert!(stores.workouts.delete(anna, workout.id).await.unwrap());
        assert!(stores.workouts.get(anna, workout.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_and_count_cover_all_statuses() {
        let stores = create_test_stores().await;
        let trainer = register(&stores, 1).await;
        let client = add_client(&stores, trainer, "Иван", None).await;
        let first = schedule(&stores, trainer, client, at(20, 10, 0)).await;
        schedule(&stores, trainer, client, at(21, 10, 0)).await;
        stores
            .workouts
            .update_status(trainer, first.id, WorkoutStatus::Missed, None)
            .await
            .unwrap();

        assert_eq!(stores.workouts.count(trainer).await.unwrap(), 2);
        let all = stores.workouts.list(trainer).await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().any(|w| w.status == WorkoutStatus::Missed));
    }
}
