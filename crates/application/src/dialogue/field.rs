//! Field specifications and per-field validation

use std::fmt;

use chrono::NaiveDateTime;
use domain::{
    ActivityLevel, Choice, ClientId, FitnessGoal, Gender, Height, PersonName, SearchQuery,
    Weight, WorkoutDuration, WorkoutType,
};
use serde_json::{Value, json};

use super::session::SessionContext;
use crate::date_parser::{self, DateResolveError};

/// Callback prefix of the client picker shown for the first scheduling step
pub const CLIENT_SELECTION_PREFIX: &str = "workout_select_client_";

/// Names of collected fields, as they appear in completed records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldName {
    FirstName,
    LastName,
    Phone,
    Email,
    Gender,
    Height,
    Weight,
    PrimaryGoal,
    ActivityLevel,
    MedicalConditions,
    ClientId,
    ScheduledDate,
    WorkoutType,
    DurationMinutes,
    Location,
    TrainerNotes,
    SearchQuery,
}

impl FieldName {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Gender => "gender",
            Self::Height => "height",
            Self::Weight => "weight",
            Self::PrimaryGoal => "primary_goal",
            Self::ActivityLevel => "activity_level",
            Self::MedicalConditions => "medical_conditions",
            Self::ClientId => "client_id",
            Self::ScheduledDate => "scheduled_date",
            Self::WorkoutType => "workout_type",
            Self::DurationMinutes => "duration_minutes",
            Self::Location => "location",
            Self::TrainerNotes => "trainer_notes",
            Self::SearchQuery => "search_query",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How raw input for a step is parsed and validated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Trimmed, at least two characters
    PersonName,
    /// Any text, stored trimmed
    FreeText,
    Gender,
    FitnessGoal,
    ActivityLevel,
    WorkoutType,
    Height,
    Weight,
    /// One of the trainer's clients
    ClientRef,
    /// Resolved date/time that is not in the past
    ScheduledDate,
    Duration,
    SearchQuery,
}

/// Static description of one dialogue step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: FieldName,
    pub prompt: &'static str,
    pub kind: FieldKind,
    pub skippable: bool,
}

impl FieldSpec {
    pub(crate) const fn required(name: FieldName, kind: FieldKind, prompt: &'static str) -> Self {
        Self {
            name,
            prompt,
            kind,
            skippable: false,
        }
    }

    pub(crate) const fn optional(name: FieldName, kind: FieldKind, prompt: &'static str) -> Self {
        Self {
            name,
            prompt,
            kind,
            skippable: true,
        }
    }

    /// Value recorded when the step is skipped; `None` means absent
    #[must_use]
    pub fn skip_value(&self) -> Option<FieldValue> {
        match self.kind {
            FieldKind::Duration => Some(FieldValue::Duration(WorkoutDuration::DEFAULT)),
            _ => None,
        }
    }

    /// Parse and validate raw input for this step
    ///
    /// The error is the message shown to the trainer before re-prompting.
    pub fn parse(
        &self,
        raw: &str,
        context: &SessionContext,
        now: NaiveDateTime,
    ) -> Result<Option<FieldValue>, String> {
        let input = raw.trim();
        let value = match self.kind {
            FieldKind::PersonName => PersonName::new(input)
                .map(FieldValue::Name)
                .map_err(|_| MSG_NAME_TOO_SHORT.to_string())?,
            FieldKind::FreeText => {
                if input.is_empty() {
                    return Ok(None);
                }
                FieldValue::Text(input.to_string())
            },
            FieldKind::Gender => FieldValue::Gender(choose(input)?),
            FieldKind::FitnessGoal => FieldValue::Goal(choose(input)?),
            FieldKind::ActivityLevel => FieldValue::Activity(choose(input)?),
            FieldKind::WorkoutType => FieldValue::WorkoutType(choose(input)?),
            FieldKind::Height => {
                let cm = parse_decimal(input).ok_or_else(|| MSG_HEIGHT_NOT_A_NUMBER.to_string())?;
                FieldValue::Height(Height::new(cm).map_err(|_| MSG_HEIGHT_RANGE.to_string())?)
            },
            FieldKind::Weight => {
                let kg = parse_decimal(input).ok_or_else(|| MSG_WEIGHT_NOT_A_NUMBER.to_string())?;
                FieldValue::Weight(Weight::new(kg).map_err(|_| MSG_WEIGHT_RANGE.to_string())?)
            },
            FieldKind::ClientRef => {
                let id: ClientId = input
                    .strip_prefix(CLIENT_SELECTION_PREFIX)
                    .unwrap_or(input)
                    .parse()
                    .map_err(|_| MSG_CLIENT_UNKNOWN.to_string())?;
                if !context.allows_client(id) {
                    return Err(MSG_CLIENT_UNKNOWN.to_string());
                }
                FieldValue::Client(id)
            },
            FieldKind::ScheduledDate => {
                let resolved = date_parser::resolve(input, now).map_err(|err: DateResolveError| {
                    tracing::debug!(input = %input, error = %err, "Date/time not recognised");
                    MSG_DATE_UNRECOGNISED.to_string()
                })?;
                if resolved < now {
                    return Err(MSG_DATE_IN_PAST.to_string());
                }
                FieldValue::DateTime(resolved)
            },
            FieldKind::Duration => {
                let minutes: u32 = input
                    .parse()
                    .map_err(|_| MSG_DURATION_NOT_A_NUMBER.to_string())?;
                FieldValue::Duration(
                    WorkoutDuration::new(minutes).map_err(|_| MSG_DURATION_RANGE.to_string())?,
                )
            },
            FieldKind::SearchQuery => SearchQuery::new(input)
                .map(FieldValue::Query)
                .map_err(|_| MSG_QUERY_TOO_SHORT.to_string())?,
        };
        Ok(Some(value))
    }
}

pub const MSG_NAME_TOO_SHORT: &str = "❌ Имя должно содержать минимум 2 символа. Попробуйте еще раз:";
pub const MSG_HEIGHT_RANGE: &str = "❌ Рост должен быть от 100 до 250 см. Попробуйте еще раз:";
pub const MSG_HEIGHT_NOT_A_NUMBER: &str = "❌ Введите корректный рост в см:";
pub const MSG_WEIGHT_RANGE: &str = "❌ Вес должен быть от 30 до 300 кг. Попробуйте еще раз:";
pub const MSG_WEIGHT_NOT_A_NUMBER: &str = "❌ Введите корректный вес в кг:";
pub const MSG_DURATION_RANGE: &str =
    "❌ Длительность должна быть от 15 до 300 минут. Попробуйте еще раз:";
pub const MSG_DURATION_NOT_A_NUMBER: &str = "❌ Введите число (количество минут):";
pub const MSG_DATE_IN_PAST: &str = "❌ Нельзя планировать тренировку в прошлом. Введите будущую дату:";
pub const MSG_DATE_UNRECOGNISED: &str = "❌ Не удалось распознать дату и время.\n\n\
     Попробуйте еще раз, например:\n\
     • сегодня 18:00\n\
     • завтра 15:30\n\
     • 30.05.2024 10:00";
pub const MSG_QUERY_TOO_SHORT: &str =
    "❌ Запрос должен содержать минимум 2 символа. Попробуйте еще раз:";
pub const MSG_CLIENT_UNKNOWN: &str = "❌ Клиент не найден. Выберите клиента из списка:";
pub const MSG_CHOOSE_FROM_MENU: &str = "❌ Пожалуйста, выберите вариант с помощью кнопок:";

fn choose<C: Choice>(token: &str) -> Result<C, String> {
    C::from_token(token).ok_or_else(|| MSG_CHOOSE_FROM_MENU.to_string())
}

/// Decimal number with either `.` or `,` as separator
fn parse_decimal(input: &str) -> Option<f64> {
    input
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// A validated value collected by a step
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Name(PersonName),
    Text(String),
    Gender(Gender),
    Goal(FitnessGoal),
    Activity(ActivityLevel),
    WorkoutType(WorkoutType),
    Height(Height),
    Weight(Weight),
    Client(ClientId),
    DateTime(NaiveDateTime),
    Duration(WorkoutDuration),
    Query(SearchQuery),
}

impl FieldValue {
    /// JSON form used in the outbound field map
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Name(name) => json!(name.as_str()),
            Self::Text(text) => json!(text),
            Self::Gender(gender) => json!(gender.as_str()),
            Self::Goal(goal) => json!(goal.as_str()),
            Self::Activity(level) => json!(level.as_str()),
            Self::WorkoutType(kind) => json!(kind.as_str()),
            Self::Height(height) => json!(height.cm()),
            Self::Weight(weight) => json!(weight.kg()),
            Self::Client(id) => json!(id.as_i64()),
            Self::DateTime(at) => json!(at.format("%Y-%m-%d %H:%M:%S").to_string()),
            Self::Duration(duration) => json!(duration.minutes()),
            Self::Query(query) => json!(query.as_str()),
        }
    }
}
