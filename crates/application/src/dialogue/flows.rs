//! Dialogue flows: ordered step lists

use std::fmt;

use super::field::{FieldKind, FieldName, FieldSpec};

/// A multi-step conversation that ends in one record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowId {
    ClientIntake,
    WorkoutScheduling,
    ClientSearch,
}

const CLIENT_INTAKE: &[FieldSpec] = &[
    FieldSpec::required(FieldName::FirstName, FieldKind::PersonName, "Введите имя клиента:"),
    FieldSpec::optional(
        FieldName::LastName,
        FieldKind::PersonName,
        "Введите фамилию клиента (или нажмите /skip для пропуска):",
    ),
    FieldSpec::optional(
        FieldName::Phone,
        FieldKind::FreeText,
        "Введите номер телефона клиента (или /skip):",
    ),
    FieldSpec::optional(FieldName::Email, FieldKind::FreeText, "Введите email клиента (или /skip):"),
    FieldSpec::required(FieldName::Gender, FieldKind::Gender, "Выберите пол клиента:"),
    FieldSpec::optional(
        FieldName::Height,
        FieldKind::Height,
        "Введите рост клиента в см (или /skip):",
    ),
    FieldSpec::optional(FieldName::Weight, FieldKind::Weight, "Введите вес клиента в кг (или /skip):"),
    FieldSpec::required(
        FieldName::PrimaryGoal,
        FieldKind::FitnessGoal,
        "Выберите основную цель клиента:",
    ),
    FieldSpec::required(
        FieldName::ActivityLevel,
        FieldKind::ActivityLevel,
        "Выберите уровень активности клиента:",
    ),
    FieldSpec::optional(
        FieldName::MedicalConditions,
        FieldKind::FreeText,
        "Введите медицинские противопоказания или особенности (или /skip):",
    ),
];

const WORKOUT_SCHEDULING: &[FieldSpec] = &[
    FieldSpec::required(
        FieldName::ClientId,
        FieldKind::ClientRef,
        "👥 <b>Выберите клиента для тренировки:</b>",
    ),
    FieldSpec::required(
        FieldName::ScheduledDate,
        FieldKind::ScheduledDate,
        "Введите дату и время тренировки.\n\n\
         <b>Примеры:</b>\n\
         • <code>сегодня 18:00</code>\n\
         • <code>завтра 10:30</code>\n\
         • <code>28.05.2024 15:00</code>\n\
         • <code>понедельник 09:00</code>",
    ),
    FieldSpec::required(
        FieldName::WorkoutType,
        FieldKind::WorkoutType,
        "Выберите тип тренировки:",
    ),
    FieldSpec::optional(
        FieldName::DurationMinutes,
        FieldKind::Duration,
        "Введите длительность тренировки в минутах (или нажмите /skip для 60 минут):",
    ),
    FieldSpec::optional(
        FieldName::Location,
        FieldKind::FreeText,
        "Введите место проведения тренировки (или /skip):",
    ),
    FieldSpec::optional(
        FieldName::TrainerNotes,
        FieldKind::FreeText,
        "📝 Введите заметки к тренировке (или /skip):",
    ),
];

const CLIENT_SEARCH: &[FieldSpec] = &[FieldSpec::required(
    FieldName::SearchQuery,
    FieldKind::SearchQuery,
    "🔍 Введите имя или фамилию клиента для поиска:",
)];

impl FlowId {
    /// Steps in the order they are asked
    #[must_use]
    pub const fn steps(&self) -> &'static [FieldSpec] {
        match self {
            Self::ClientIntake => CLIENT_INTAKE,
            Self::WorkoutScheduling => WORKOUT_SCHEDULING,
            Self::ClientSearch => CLIENT_SEARCH,
        }
    }

    /// Heading shown above the first prompt
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::ClientIntake => "📝 <b>Добавление нового клиента</b>",
            Self::WorkoutScheduling => "💪 <b>Новая тренировка</b>",
            Self::ClientSearch => "🔍 <b>Поиск клиентов</b>",
        }
    }
}

impl fmt::Display for FlowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ClientIntake => "client_intake",
            Self::WorkoutScheduling => "workout_scheduling",
            Self::ClientSearch => "client_search",
        };
        f.write_str(name)
    }
}
