//! Workout storage port

#[cfg(test)]
use mockall::automock;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use domain::{
    ClientId, NewWorkout, TrainerId, Workout, WorkoutId, WorkoutStatus, WorkoutWithClient,
};

use crate::error::ApplicationError;

/// Port for workout persistence
///
/// Scheduled times are local wall-clock values; ranges are half-open
/// `[from, to)`.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WorkoutStore: Send + Sync {
    /// Insert a planned workout
    async fn create(&self, workout: &NewWorkout) -> Result<Workout, ApplicationError>;

    /// Get a workout if it belongs to the trainer
    async fn get(
        &self,
        trainer_id: TrainerId,
        workout_id: WorkoutId,
    ) -> Result<Option<Workout>, ApplicationError>;

    /// Every workout of the trainer, most recently scheduled first
    async fn list(&self, trainer_id: TrainerId) -> Result<Vec<Workout>, ApplicationError>;

    /// Workouts scheduled in `[from, to)`, ascending, with client names
    async fn list_between(
        &self,
        trainer_id: TrainerId,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<WorkoutWithClient>, ApplicationError>;

    /// Planned workouts at or after `now`, ascending
    async fn list_upcoming(
        &self,
        trainer_id: TrainerId,
        now: NaiveDateTime,
        limit: u32,
    ) -> Result<Vec<WorkoutWithClient>, ApplicationError>;

    /// A client's workouts, most recently scheduled first
    async fn list_for_client(
        &self,
        trainer_id: TrainerId,
        client_id: ClientId,
        limit: u32,
    ) -> Result<Vec<Workout>, ApplicationError>;

    /// Change the status; `completed_at` is stored alongside
    ///
    /// Returns false if nothing matched.
    async fn update_status(
        &self,
        trainer_id: TrainerId,
        workout_id: WorkoutId,
        status: WorkoutStatus,
        completed_at: Option<DateTime<Utc>>,
    ) -> Result<bool, ApplicationError>;

    /// Delete a workout; returns false if nothing matched
    async fn delete(
        &self,
        trainer_id: TrainerId,
        workout_id: WorkoutId,
    ) -> Result<bool, ApplicationError>;

    /// Number of workouts of the trainer
    async fn count(&self, trainer_id: TrainerId) -> Result<u32, ApplicationError>;
}
