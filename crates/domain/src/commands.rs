//! Bot commands and callback actions - Strongly typed representations of
//! what a trainer asked for
//!
//! Slash commands arrive as message text, callback actions as the opaque
//! data attached to inline keyboard buttons.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value_objects::{ClientId, WorkoutId};

/// Token submitted to a dialogue to skip an optional step
pub const SKIP_TOKEN: &str = "/skip";

/// Slash commands understood by the bot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BotCommand {
    /// Register (first contact) and show the main menu
    Start,
    /// Command reference
    Help,
    /// Trainer profile with counters
    Profile,
    /// Client roster
    Clients,
    /// Workout menu
    Workouts,
    /// Aggregate statistics
    Stats,
    /// Abort the active dialogue
    Cancel,
    /// Skip the current optional dialogue step
    Skip,
    /// Anything else starting with a slash
    Unknown { name: String },
}

impl BotCommand {
    /// Parse message text into a command
    ///
    /// Accepts `/name`, `/name@botname` and trailing arguments. Returns
    /// `None` when the text is not a command at all.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let first = text.split_whitespace().next()?;
        let name = first.strip_prefix('/')?;
        let name = name.split_once('@').map_or(name, |(name, _bot)| name);
        let command = match name.to_lowercase().as_str() {
            "start" => Self::Start,
            "help" => Self::Help,
            "profile" => Self::Profile,
            "clients" => Self::Clients,
            "workouts" => Self::Workouts,
            "stats" => Self::Stats,
            "cancel" => Self::Cancel,
            "skip" => Self::Skip,
            _ => Self::Unknown {
                name: name.to_string(),
            },
        };
        Some(command)
    }

    /// Name as typed, without the slash
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Start => "start",
            Self::Help => "help",
            Self::Profile => "profile",
            Self::Clients => "clients",
            Self::Workouts => "workouts",
            Self::Stats => "stats",
            Self::Cancel => "cancel",
            Self::Skip => "skip",
            Self::Unknown { name } => name,
        }
    }

    /// Commands advertised in the client's command menu, in display order
    pub const MENU: [Self; 6] = [
        Self::Start,
        Self::Help,
        Self::Profile,
        Self::Clients,
        Self::Workouts,
        Self::Stats,
    ];

    /// Menu description, `None` for commands kept out of the menu
    #[must_use]
    pub const fn description(&self) -> Option<&'static str> {
        match self {
            Self::Start => Some("🏠 Главное меню"),
            Self::Help => Some("❓ Помощь"),
            Self::Profile => Some("👤 Профиль тренера"),
            Self::Clients => Some("👥 Клиенты"),
            Self::Workouts => Some("💪 Тренировки"),
            Self::Stats => Some("📊 Статистика"),
            Self::Cancel | Self::Skip | Self::Unknown { .. } => None,
        }
    }
}

/// Button presses on inline keyboards
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    MainProfile,
    MainClients,
    MainWorkouts,
    MainStats,
    ClientList,
    ClientAdd,
    ClientSearch,
    ClientView(ClientId),
    ClientDelete(ClientId),
    ConfirmDeleteClient(ClientId),
    CancelDeleteClient(ClientId),
    ClientWorkoutHistory(ClientId),
    WorkoutCreateFor(ClientId),
    WorkoutMenu,
    WorkoutAdd,
    WorkoutToday,
    WorkoutUpcoming,
    WorkoutView(WorkoutId),
    WorkoutComplete(WorkoutId),
    WorkoutCancel(WorkoutId),
    WorkoutDeleteConfirm(WorkoutId),
    ConfirmDeleteWorkout(WorkoutId),
    CancelDeleteWorkout(WorkoutId),
    /// Menu choice meant for the active dialogue
    Selection(String),
}

const FIXED_ACTIONS: &[(&str, CallbackAction)] = &[
    ("profile", CallbackAction::MainProfile),
    ("clients", CallbackAction::MainClients),
    ("workouts", CallbackAction::MainWorkouts),
    ("stats", CallbackAction::MainStats),
    ("client_list", CallbackAction::ClientList),
    ("client_add", CallbackAction::ClientAdd),
    ("client_search", CallbackAction::ClientSearch),
    ("workout_menu", CallbackAction::WorkoutMenu),
    ("workout_add", CallbackAction::WorkoutAdd),
    ("workout_today", CallbackAction::WorkoutToday),
    ("workout_all", CallbackAction::WorkoutUpcoming),
];

type ClientCtor = fn(ClientId) -> CallbackAction;
type WorkoutCtor = fn(WorkoutId) -> CallbackAction;

const CLIENT_ACTIONS: &[(&str, ClientCtor)] = &[
    ("client_view_", CallbackAction::ClientView),
    ("client_delete_", CallbackAction::ClientDelete),
    ("confirm_delete_client_", CallbackAction::ConfirmDeleteClient),
    ("cancel_delete_client_", CallbackAction::CancelDeleteClient),
    ("client_workout_history_", CallbackAction::ClientWorkoutHistory),
    ("workout_create_for_", CallbackAction::WorkoutCreateFor),
];

const WORKOUT_ACTIONS: &[(&str, WorkoutCtor)] = &[
    ("workout_view_", CallbackAction::WorkoutView),
    ("workout_complete_", CallbackAction::WorkoutComplete),
    ("workout_cancel_", CallbackAction::WorkoutCancel),
    ("workout_delete_confirm_", CallbackAction::WorkoutDeleteConfirm),
    ("confirm_delete_workout_", CallbackAction::ConfirmDeleteWorkout),
    ("cancel_delete_workout_", CallbackAction::CancelDeleteWorkout),
];

impl CallbackAction {
    /// Parse callback data
    ///
    /// Unknown tokens, and id-carrying tokens whose suffix is not a number,
    /// become a [`CallbackAction::Selection`].
    #[must_use]
    pub fn parse(data: &str) -> Self {
        if let Some((_, action)) = FIXED_ACTIONS.iter().find(|(token, _)| *token == data) {
            return action.clone();
        }
        for (prefix, ctor) in CLIENT_ACTIONS {
            if let Some(id) = data.strip_prefix(prefix).and_then(|s| s.parse().ok()) {
                return ctor(id);
            }
        }
        for (prefix, ctor) in WORKOUT_ACTIONS {
            if let Some(id) = data.strip_prefix(prefix).and_then(|s| s.parse().ok()) {
                return ctor(id);
            }
        }
        Self::Selection(data.to_string())
    }

    /// Callback data for a button carrying this action
    #[must_use]
    pub fn token(&self) -> String {
        match self {
            Self::MainProfile => "profile".to_string(),
            Self::MainClients => "clients".to_string(),
            Self::MainWorkouts => "workouts".to_string(),
            Self::MainStats => "stats".to_string(),
            Self::ClientList => "client_list".to_string(),
            Self::ClientAdd => "client_add".to_string(),
            Self::ClientSearch => "client_search".to_string(),
            Self::ClientView(id) => format!("client_view_{id}"),
            Self::ClientDelete(id) => format!("client_delete_{id}"),
            Self::ConfirmDeleteClient(id) => format!("confirm_delete_client_{id}"),
            Self::CancelDeleteClient(id) => format!("cancel_delete_client_{id}"),
            Self::ClientWorkoutHistory(id) => format!("client_workout_history_{id}"),
            Self::WorkoutCreateFor(id) => format!("workout_create_for_{id}"),
            Self::WorkoutMenu => "workout_menu".to_string(),
            Self::WorkoutAdd => "workout_add".to_string(),
            Self::WorkoutToday => "workout_today".to_string(),
            Self::WorkoutUpcoming => "workout_all".to_string(),
            Self::WorkoutView(id) => format!("workout_view_{id}"),
            Self::WorkoutComplete(id) => format!("workout_complete_{id}"),
            Self::WorkoutCancel(id) => format!("workout_cancel_{id}"),
            Self::WorkoutDeleteConfirm(id) => format!("workout_delete_confirm_{id}"),
            Self::ConfirmDeleteWorkout(id) => format!("confirm_delete_workout_{id}"),
            Self::CancelDeleteWorkout(id) => format!("cancel_delete_workout_{id}"),
            Self::Selection(token) => token.clone(),
        }
    }
}

impl fmt::Display for CallbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_command() {
        assert_eq!(BotCommand::parse("/start"), Some(BotCommand::Start));
        assert_eq!(BotCommand::parse("  /stats  "), Some(BotCommand::Stats));
    }

    #[test]
    fn strips_bot_mention_and_arguments() {
        assert_eq!(
            BotCommand::parse("/clients@fit_coach_bot extra words"),
            Some(BotCommand::Clients)
        );
    }

    #[test]
    fn plain_text_is_not_a_command() {
        assert_eq!(BotCommand::parse("завтра 10:30"), None);
        assert_eq!(BotCommand::parse(""), None);
    }

    #[test]
    fn unknown_command_keeps_name() {
        let command = BotCommand::parse("/dance").unwrap();
        assert_eq!(command, BotCommand::Unknown { name: "dance".to_string() });
        assert_eq!(command.name(), "dance");
    }

    #[test]
    fn menu_commands_are_described() {
        assert!(BotCommand::MENU.iter().all(|c| c.description().is_some()));
        assert_eq!(BotCommand::Cancel.description(), None);
    }

    #[test]
    fn skip_token_parses_as_skip() {
        assert_eq!(BotCommand::parse(SKIP_TOKEN), Some(BotCommand::Skip));
    }

    #[test]
    fn parses_id_actions() {
        assert_eq!(
            CallbackAction::parse("client_view_42"),
            CallbackAction::ClientView(ClientId::new(42))
        );
        assert_eq!(
            CallbackAction::parse("confirm_delete_workout_7"),
            CallbackAction::ConfirmDeleteWorkout(WorkoutId::new(7))
        );
        assert_eq!(
            CallbackAction::parse("workout_delete_confirm_3"),
            CallbackAction::WorkoutDeleteConfirm(WorkoutId::new(3))
        );
    }

    #[test]
    fn menu_tokens_are_selections() {
        assert_eq!(
            CallbackAction::parse("workout_type_cardio"),
            CallbackAction::Selection("workout_type_cardio".to_string())
        );
        assert_eq!(
            CallbackAction::parse("gender_female"),
            CallbackAction::Selection("gender_female".to_string())
        );
    }

    #[test]
    fn non_numeric_suffix_is_a_selection() {
        assert_eq!(
            CallbackAction::parse("client_view_abc"),
            CallbackAction::Selection("client_view_abc".to_string())
        );
    }

    #[test]
    fn token_roundtrip_for_every_action() {
        let actions = [
            CallbackAction::MainStats,
            CallbackAction::ClientSearch,
            CallbackAction::ClientWorkoutHistory(ClientId::new(5)),
            CallbackAction::WorkoutCreateFor(ClientId::new(6)),
            CallbackAction::WorkoutUpcoming,
            CallbackAction::WorkoutCancel(WorkoutId::new(8)),
            CallbackAction::CancelDeleteClient(ClientId::new(9)),
        ];
        for action in actions {
            assert_eq!(CallbackAction::parse(&action.token()), action);
        }
    }
}
