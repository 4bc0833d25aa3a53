//! Workout entity - a scheduled training session

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{
    ClientId, TrainerId, WorkoutDuration, WorkoutId, WorkoutStatus, WorkoutType,
};

/// A training session between a trainer and one client
///
/// `scheduled_date` is local wall-clock time in the configured timezone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workout {
    pub id: WorkoutId,
    pub trainer_id: TrainerId,
    pub client_id: ClientId,
    pub scheduled_date: NaiveDateTime,
    pub workout_type: Option<WorkoutType>,
    pub duration: WorkoutDuration,
    pub location: Option<String>,
    pub trainer_notes: Option<String>,
    pub status: WorkoutStatus,
    pub completed_at: Option<DateTime<Utc>>,
    pub client_feedback: Option<String>,
    /// Rate of perceived exertion, 1-10
    pub perceived_exertion: Option<u8>,
    pub created_at: DateTime<Utc>,
}

impl Workout {
    /// Whether the workout can still be completed or cancelled
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.status.is_open()
    }
}

/// Workout record produced by the scheduling dialogue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWorkout {
    pub trainer_id: TrainerId,
    pub client_id: ClientId,
    pub scheduled_date: NaiveDateTime,
    pub workout_type: Option<WorkoutType>,
    pub duration: WorkoutDuration,
    pub location: Option<String>,
    pub trainer_notes: Option<String>,
}

impl NewWorkout {
    #[must_use]
    pub fn new(trainer_id: TrainerId, client_id: ClientId, scheduled_date: NaiveDateTime) -> Self {
        Self {
            trainer_id,
            client_id,
            scheduled_date,
            workout_type: None,
            duration: WorkoutDuration::DEFAULT,
            location: None,
            trainer_notes: None,
        }
    }

    #[must_use]
    pub const fn with_type(mut self, workout_type: WorkoutType) -> Self {
        self.workout_type = Some(workout_type);
        self
    }

    #[must_use]
    pub const fn with_duration(mut self, duration: WorkoutDuration) -> Self {
        self.duration = duration;
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// A workout joined with its client's display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutWithClient {
    pub workout: Workout,
    pub client_name: String,
}

/// Aggregate counters shown by `/stats`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainerStatistics {
    pub total_clients: u32,
    pub active_clients: u32,
    pub new_clients_this_month: u32,
    pub total_workouts: u32,
    pub workouts_this_month: u32,
    pub completed_workouts: u32,
    pub today_workouts: u32,
}

/// Attendance summary for a single client
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendance {
    pub total: u32,
    pub completed: u32,
}

impl Attendance {
    /// Completed share in whole percent, 0 when nothing was scheduled
    #[must_use]
    pub fn rate_percent(&self) -> u32 {
        if self.total == 0 {
            0
        } else {
            self.completed * 100 / self.total
        }
    }

    /// Tally a list of workouts
    #[must_use]
    pub fn from_workouts(workouts: &[Workout]) -> Self {
        let completed = workouts
            .iter()
            .filter(|w| w.status == WorkoutStatus::Completed)
            .count();
        Self {
            total: u32::try_from(workouts.len()).unwrap_or(u32::MAX),
            completed: u32::try_from(completed).unwrap_or(u32::MAX),
        }
    }
}
