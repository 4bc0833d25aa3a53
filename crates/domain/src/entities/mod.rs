//! Domain entities - Objects with identity and lifecycle

mod client;
mod trainer;
mod workout;

pub use client::{Client, NewClient};
pub use trainer::{NewTrainer, Trainer};
pub use workout::{Attendance, NewWorkout, TrainerStatistics, Workout, WorkoutWithClient};
