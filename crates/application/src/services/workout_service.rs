//! Workout scheduling and status tracking

use std::{fmt, sync::Arc};

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use domain::{
    ClientId, DomainError, NewWorkout, TrainerId, Workout, WorkoutId, WorkoutStatus,
    WorkoutWithClient,
};
use tracing::{info, instrument};

use crate::{
    error::ApplicationError,
    ports::{ClientStore, WorkoutStore},
};

/// Service for a trainer's workouts
#[derive(Clone)]
pub struct WorkoutService {
    workouts: Arc<dyn WorkoutStore>,
    clients: Arc<dyn ClientStore>,
}

impl fmt::Debug for WorkoutService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkoutService").finish_non_exhaustive()
    }
}

impl WorkoutService {
    #[must_use]
    pub fn new(workouts: Arc<dyn WorkoutStore>, clients: Arc<dyn ClientStore>) -> Self {
        Self { workouts, clients }
    }

    /// Schedule a workout for one of the trainer's clients
    #[instrument(skip(self, workout), fields(client_id = %workout.client_id))]
    pub async fn create(&self, workout: &NewWorkout) -> Result<Workout, ApplicationError> {
        if self
            .clients
            .get(workout.trainer_id, workout.client_id)
            .await?
            .is_none()
        {
            return Err(DomainError::not_found("Client", workout.client_id).into());
        }
        let created = self.workouts.create(workout).await?;
        info!(workout_id = %created.id, scheduled = %created.scheduled_date, "Workout scheduled");
        Ok(created)
    }

    /// Get one of the trainer's workouts
    pub async fn get(
        &self,
        trainer_id: TrainerId,
        workout_id: WorkoutId,
    ) -> Result<Workout, ApplicationError> {
        self.workouts
            .get(trainer_id, workout_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Workout", workout_id).into())
    }

    /// Workouts on `day`, from local midnight to the next
    pub async fn on_day(
        &self,
        trainer_id: TrainerId,
        day: NaiveDate,
    ) -> Result<Vec<WorkoutWithClient>, ApplicationError> {
        let from = day.and_time(chrono::NaiveTime::MIN);
        let to = from + Duration::days(1);
        self.workouts.list_between(trainer_id, from, to).await
    }

    /// Planned workouts from `now` on
    pub async fn upcoming(
        &self,
        trainer_id: TrainerId,
        now: NaiveDateTime,
        limit: u32,
    ) -> Result<Vec<WorkoutWithClient>, ApplicationError> {
        self.workouts.list_upcoming(trainer_id, now, limit).await
    }

    /// A client's workouts, newest first
    pub async fn history(
        &self,
        trainer_id: TrainerId,
        client_id: ClientId,
        limit: u32,
    ) -> Result<Vec<Workout>, ApplicationError> {
        self.workouts
            .list_for_client(trainer_id, client_id, limit)
            .await
    }

    pub async fn count(&self, trainer_id: TrainerId) -> Result<u32, ApplicationError> {
        self.workouts.count(trainer_id).await
    }

    /// Mark a planned workout as held
    #[instrument(skip(self))]
    pub async fn complete(
        &self,
        trainer_id: TrainerId,
        workout_id: WorkoutId,
        now: DateTime<Utc>,
    ) -> Result<Workout, ApplicationError> {
        self.transition(trainer_id, workout_id, WorkoutStatus::Completed, Some(now))
            .await
    }

    /// Call off a planned workout
    #[instrument(skip(self))]
    pub async fn cancel(
        &self,
        trainer_id: TrainerId,
        workout_id: WorkoutId,
    ) -> Result<Workout, ApplicationError> {
        self.transition(trainer_id, workout_id, WorkoutStatus::Cancelled, None)
            .await
    }

    async fn transition(
        &self,
        trainer_id: TrainerId,
        workout_id: WorkoutId,
        status: WorkoutStatus,
        completed_at: Option<DateTime<Utc>>,
    ) -> Result<Workout, ApplicationError> {
        let mut workout = self.get(trainer_id, workout_id).await?;
        if !workout.is_open() {
            return Err(DomainError::ValidationError(format!(
                "workout {workout_id} is already {}",
                workout.status.as_str()
            ))
            .into());
        }
        if !self
            .workouts
            .update_status(trainer_id, workout_id, status, completed_at)
            .await?
        {
            return Err(DomainError::not_found("Workout", workout_id).into());
        }
        info!(workout_id = %workout_id, status = status.as_str(), "Workout status changed");
        workout.status = status;
        workout.completed_at = completed_at;
        Ok(workout)
    }

    /// Delete one of the trainer's workouts
    #[instrument(skip(self))]
    pub async fn delete(
        &self,
        trainer_id: TrainerId,
        workout_id: WorkoutId,
    ) -> Result<(), ApplicationError> {
        if self.workouts.delete(trainer_id, workout_id).await? {
            info!(workout_id = %workout_id, "Workout deleted");
            Ok(())
        } else {
            Err(DomainError::not_found("Workout", workout_id).into())
        }
    }
}
