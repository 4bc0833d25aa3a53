//! Workouts in SQLite
//!
//! `scheduled_date` is stored as local wall-clock text so range queries on
//! it compare lexicographically.

use application::{error::ApplicationError, ports::WorkoutStore};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use domain::{
    ClientId, NewWorkout, TrainerId, Workout, WorkoutDuration, WorkoutId, WorkoutStatus,
    WorkoutWithClient,
};
use sqlx::SqlitePool;
use tracing::{debug, instrument};

use super::error::{corrupt, format_local, map_sqlx_error, parse_datetime, parse_local};

/// Workout store backed by the `workouts` table
#[derive(Debug, Clone)]
pub struct SqliteWorkoutStore {
    pool: SqlitePool,
}

impl SqliteWorkoutStore {
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct WorkoutRow {
    id: i64,
    trainer_id: i64,
    client_id: i64,
    scheduled_date: String,
    workout_type: Option<String>,
    duration_minutes: i64,
    location: Option<String>,
    trainer_notes: Option<String>,
    status: String,
    completed_at: Option<String>,
    client_feedback: Option<String>,
    perceived_exertion: Option<i64>,
    created_at: String,
}

impl TryFrom<WorkoutRow> for Workout {
    type Error = ApplicationError;

    fn try_from(row: WorkoutRow) -> Result<Self, Self::Error> {
        let minutes =
            u32::try_from(row.duration_minutes).map_err(|e| corrupt("duration_minutes", e))?;
        Ok(Self {
            id: WorkoutId::new(row.id),
            trainer_id: TrainerId::new(row.trainer_id),
            client_id: ClientId::new(row.client_id),
            scheduled_date: parse_local(&row.scheduled_date)?,
            workout_type: row
                .workout_type
                .map(|code| code.parse().map_err(|e: String| corrupt("workout_type", e)))
                .transpose()?,
            duration: WorkoutDuration::new(minutes).map_err(|e| corrupt("duration_minutes", e))?,
            location: row.location,
            trainer_notes: row.trainer_notes,
            status: row
                .status
                .parse()
                .map_err(|e: String| corrupt("status", e))?,
            completed_at: row.completed_at.as_deref().map(parse_datetime).transpose()?,
            client_feedback: row.client_feedback,
            perceived_exertion: row
                .perceived_exertion
                .map(|rpe| u8::try_from(rpe).map_err(|e| corrupt("perceived_exertion", e)))
                .transpose()?,
            created_at: parse_datetime(&row.created_at)?,
        })
    }
}

/// Workout joined with its client's names
#[derive(sqlx::FromRow)]
struct WorkoutClientRow {
    #[sqlx(flatten)]
    workout: WorkoutRow,
    client_first_name: String,
    client_last_name: Option<String>,
}

impl TryFrom<WorkoutClientRow> for WorkoutWithClient {
    type Error = ApplicationError;

    fn try_from(row: WorkoutClientRow) -> Result<Self, Self::Error> {
        let client_name = match row.client_last_name {
            Some(last) => format!("{} {last}", row.client_first_name),
            None => row.client_first_name,
        };
        Ok(Self {
            workout: Workout::try_from(row.workout)?,
            client_name,
        })
    }
}

const WORKOUT_COLUMNS: &str = r"
    w.id, w.trainer_id, w.client_id, w.scheduled_date, w.workout_type, w.duration_minutes,
    w.location, w.trainer_notes, w.status, w.completed_at, w.client_feedback,
    w.perceived_exertion, w.created_at
";

fn select_with_client(filter: &str) -> String {
    format!(
        "SELECT {WORKOUT_COLUMNS}, c.first_name AS client_first_name, \
         c.last_name AS client_last_name \
         FROM workouts w JOIN clients c ON c.id = w.client_id \
         WHERE w.trainer_id = $1 {filter}"
    )
}

fn into_workouts(rows: Vec<WorkoutRow>) -> Result<Vec<Workout>, ApplicationError> {
    rows.into_iter().map(Workout::try_from).collect()
}

fn into_listing(rows: Vec<WorkoutClientRow>) -> Result<Vec<WorkoutWithClient>, ApplicationError> {
    rows.into_iter().map(WorkoutWithClient::try_from).collect()
}

#[async_trait]
impl WorkoutStore for SqliteWorkoutStore {
    #[instrument(skip(self, workout), fields(client_id = %workout.client_id))]
    async fn create(&self, workout: &NewWorkout) -> Result<Workout, ApplicationError> {
        let created_at = Utc::now();
        let status = WorkoutStatus::default();
        let id: i64 = sqlx::query_scalar(
            r"
            INSERT INTO workouts (trainer_id, client_id, scheduled_date, workout_type,
                                  duration_minutes, location, trainer_notes, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            ",
        )
        .bind(workout.trainer_id.as_i64())
        .bind(workout.client_id.as_i64())
        .bind(format_local(workout.scheduled_date))
        .bind(workout.workout_type.map(|t| t.as_str()))
        .bind(i64::from(workout.duration.minutes()))
        .bind(&workout.location)
        .bind(&workout.trainer_notes)
        .bind(status.as_str())
        .bind(created_at.to_rfc3339())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        debug!(workout_id = id, "Workout row inserted");
        Ok(Workout {
            id: WorkoutId::new(id),
            trainer_id: workout.trainer_id,
            client_id: workout.client_id,
            scheduled_date: workout.scheduled_date,
            workout_type: workout.workout_type,
            duration: workout.duration,
            location: workout.location.clone(),
            trainer_notes: workout.trainer_notes.clone(),
            status,
            completed_at: None,
            client_feedback: None,
            perceived_exertion: None,
            created_at,
        })
    }

    #[instrument(skip(self))]
    async fn get(
        &self,
        trainer_id: TrainerId,
        workout_id: WorkoutId,
    ) -> Result<Option<Workout>, ApplicationError> {
        let row: Option<WorkoutRow> = sqlx::query_as(&format!(
            "SELECT {WORKOUT_COLUMNS} FROM workouts w WHERE w.trainer_id = $1 AND w.id = $2"
        ))
        .bind(trainer_id.as_i64())
        .bind(workout_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        row.map(Workout::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self, trainer_id: TrainerId) -> Result<Vec<Workout>, ApplicationError> {
        let rows: Vec<WorkoutRow> = sqlx::query_as(&format!(
            "SELECT {WORKOUT_COLUMNS} FROM workouts w WHERE w.trainer_id = $1 \
             ORDER BY w.scheduled_date, w.id"
        ))
        .bind(trainer_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        into_workouts(rows)
    }

    #[instrument(skip(self))]
    async fn list_between(
        &self,
        trainer_id: TrainerId,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<WorkoutWithClient>, ApplicationError> {
        let rows: Vec<WorkoutClientRow> = sqlx::query_as(&select_with_client(
            "AND w.scheduled_date >= $2 AND w.scheduled_date < $3 ORDER BY w.scheduled_date, w.id",
        ))
        .bind(trainer_id.as_i64())
        .bind(format_local(from))
        .bind(format_local(to))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        into_listing(rows)
    }

    #[instrument(skip(self))]
    async fn list_upcoming(
        &self,
        trainer_id: TrainerId,
        now: NaiveDateTime,
        limit: u32,
    ) -> Result<Vec<WorkoutWithClient>, ApplicationError> {
        let rows: Vec<WorkoutClientRow> = sqlx::query_as(&select_with_client(
            "AND w.scheduled_date >= $2 AND w.status = $3 \
             ORDER BY w.scheduled_date, w.id LIMIT $4",
        ))
        .bind(trainer_id.as_i64())
        .bind(format_local(now))
        .bind(WorkoutStatus::Planned.as_str())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        into_listing(rows)
    }

    #[instrument(skip(self))]
    async fn list_for_client(
        &self,
        trainer_id: TrainerId,
        client_id: ClientId,
        limit: u32,
    ) -> Result<Vec<Workout>, ApplicationError> {
        let rows: Vec<WorkoutRow> = sqlx::query_as(&format!(
            "SELECT {WORKOUT_COLUMNS} FROM workouts w \
             WHERE w.trainer_id = $1 AND w.client_id = $2 \
             ORDER BY w.scheduled_date DESC, w.id DESC LIMIT $3"
        ))
        .bind(trainer_id.as_i64())
        .bind(client_id.as_i64())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        into_workouts(rows)
    }

    #[instrument(skip(self))]
    async fn update_status(
        &self,
        trainer_id: TrainerId,
        workout_id: WorkoutId,
        status: WorkoutStatus,
        completed_at: Option<DateTime<Utc>>,
    ) -> Result<bool, ApplicationError> {
        let result = sqlx::query(
            "UPDATE workouts SET status = $1, completed_at = $2 WHERE id = $3 AND trainer_id = $4",
        )
        .bind(status.as_str())
        .bind(completed_at.map(|at| at.to_rfc3339()))
        .bind(workout_id.as_i64())
        .bind(trainer_id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete(
        &self,
        trainer_id: TrainerId,
        workout_id: WorkoutId,
    ) -> Result<bool, ApplicationError> {
        let result = sqlx::query("DELETE FROM workouts WHERE id = $1 AND trainer_id = $2")
            .bind(workout_id.as_i64())
            .bind(trainer_id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn count(&self, trainer_id: TrainerId) -> Result<u32, ApplicationError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM workouts WHERE trainer_id = $1")
            .bind(trainer_id.as_i64())
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }
}
