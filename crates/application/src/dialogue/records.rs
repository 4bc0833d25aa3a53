//! Typed records built from completed dialogues

use chrono::NaiveDateTime;
use domain::{
    ClientId, NewClient, NewWorkout, PersonName, SearchQuery, WorkoutDuration, WorkoutType,
};

use super::field::{FieldName, FieldValue};
use super::flows::FlowId;
use super::session::{CompletedDialogue, DialogueError};

impl CompletedDialogue {
    fn expect_flow(&self, expected: FlowId) -> Result<(), DialogueError> {
        if self.flow == expected {
            Ok(())
        } else {
            Err(DialogueError::WrongFlow {
                expected,
                actual: self.flow,
            })
        }
    }

    fn missing(&self, field: FieldName) -> DialogueError {
        DialogueError::Incomplete {
            flow: self.flow,
            field,
        }
    }

    fn name(&self, field: FieldName) -> Option<PersonName> {
        match self.fields.get(field) {
            Some(FieldValue::Name(name)) => Some(name.clone()),
            _ => None,
        }
    }

    fn text(&self, field: FieldName) -> Option<String> {
        match self.fields.get(field) {
            Some(FieldValue::Text(text)) => Some(text.clone()),
            _ => None,
        }
    }

    /// Client to create from a finished intake
    pub fn new_client(&self) -> Result<NewClient, DialogueError> {
        self.expect_flow(FlowId::ClientIntake)?;
        let first_name = self
            .name(FieldName::FirstName)
            .ok_or_else(|| self.missing(FieldName::FirstName))?;

        Ok(NewClient {
            first_name,
            last_name: self.name(FieldName::LastName),
            phone: self.text(FieldName::Phone),
            email: self.text(FieldName::Email),
            gender: match self.fields.get(FieldName::Gender) {
                Some(FieldValue::Gender(gender)) => Some(*gender),
                _ => None,
            },
            height: match self.fields.get(FieldName::Height) {
                Some(FieldValue::Height(height)) => Some(*height),
                _ => None,
            },
            weight: match self.fields.get(FieldName::Weight) {
                Some(FieldValue::Weight(weight)) => Some(*weight),
                _ => None,
            },
            primary_goal: match self.fields.get(FieldName::PrimaryGoal) {
                Some(FieldValue::Goal(goal)) => Some(*goal),
                _ => None,
            },
            activity_level: match self.fields.get(FieldName::ActivityLevel) {
                Some(FieldValue::Activity(level)) => Some(*level),
                _ => None,
            },
            medical_conditions: self.text(FieldName::MedicalConditions),
        })
    }

    /// Workout to create from a finished scheduling dialogue
    pub fn new_workout(&self) -> Result<NewWorkout, DialogueError> {
        self.expect_flow(FlowId::WorkoutScheduling)?;
        let client_id: ClientId = match self.fields.get(FieldName::ClientId) {
            Some(FieldValue::Client(id)) => *id,
            _ => return Err(self.missing(FieldName::ClientId)),
        };
        let scheduled_date: NaiveDateTime = match self.fields.get(FieldName::ScheduledDate) {
            Some(FieldValue::DateTime(at)) => *at,
            _ => return Err(self.missing(FieldName::ScheduledDate)),
        };
        let workout_type: Option<WorkoutType> = match self.fields.get(FieldName::WorkoutType) {
            Some(FieldValue::WorkoutType(kind)) => Some(*kind),
            _ => None,
        };
        let duration = match self.fields.get(FieldName::DurationMinutes) {
            Some(FieldValue::Duration(duration)) => *duration,
            _ => WorkoutDuration::DEFAULT,
        };

        Ok(NewWorkout {
            trainer_id: self.context.trainer_id,
            client_id,
            scheduled_date,
            workout_type,
            duration,
            location: self.text(FieldName::Location),
            trainer_notes: self.text(FieldName::TrainerNotes),
        })
    }

    /// Query from a finished client search
    pub fn search_query(&self) -> Result<SearchQuery, DialogueError> {
        self.expect_flow(FlowId::ClientSearch)?;
        match self.fields.get(FieldName::SearchQuery) {
            Some(FieldValue::Query(query)) => Ok(query.clone()),
            _ => Err(self.missing(FieldName::SearchQuery)),
        }
    }
}
