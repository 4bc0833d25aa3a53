//! Value Objects - Immutable, identity-less domain primitives

mod activity_level;
mod body_metrics;
mod chat_user_id;
mod choice;
mod client_id;
mod fitness_goal;
mod gender;
mod person_name;
mod search_query;
mod trainer_id;
mod workout_duration;
mod workout_id;
mod workout_status;
mod workout_type;

pub use activity_level::ActivityLevel;
pub use body_metrics::{Height, InvalidMeasurement, Weight};
pub use chat_user_id::ChatUserId;
pub use choice::Choice;
pub use client_id::ClientId;
pub use fitness_goal::FitnessGoal;
pub use gender::Gender;
pub use person_name::{InvalidPersonName, PersonName};
pub use search_query::{InvalidSearchQuery, SearchQuery};
pub use trainer_id::TrainerId;
pub use workout_duration::{InvalidDuration, WorkoutDuration};
pub use workout_id::WorkoutId;
pub use workout_status::WorkoutStatus;
pub use workout_type::WorkoutType;
