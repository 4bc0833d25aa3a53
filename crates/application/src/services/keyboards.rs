//! Inline keyboards attached to replies

use domain::{
    ActivityLevel, CallbackAction, Choice, Client, FitnessGoal, Gender, SKIP_TOKEN, Workout,
    WorkoutType,
};

use crate::dialogue::{CLIENT_SELECTION_PREFIX, FieldKind, FieldSpec};
use crate::ports::{InlineButton, InlineKeyboard};

fn button(text: &str, action: &CallbackAction) -> InlineButton {
    InlineButton::new(text, action.token())
}

pub fn main_menu() -> InlineKeyboard {
    InlineKeyboard::new()
        .row(vec![
            button("👤 Профиль", &CallbackAction::MainProfile),
            button("👥 Клиенты", &CallbackAction::MainClients),
        ])
        .row(vec![
            button("💪 Тренировки", &CallbackAction::MainWorkouts),
            button("📊 Статистика", &CallbackAction::MainStats),
        ])
}

/// One button per variant, two per row
pub fn choice_keyboard<C: Choice>() -> InlineKeyboard {
    let buttons: Vec<InlineButton> = C::variants()
        .map(|choice| InlineButton::new(choice.label(), choice.token()))
        .collect();
    buttons
        .chunks(2)
        .fold(InlineKeyboard::new(), |keyboard, row| keyboard.row(row.to_vec()))
}

/// Keyboard for the client step of workout scheduling
pub fn client_picker(clients: &[Client]) -> InlineKeyboard {
    clients.iter().fold(InlineKeyboard::new(), |keyboard, client| {
        keyboard.button(
            format!("👤 {}", client.full_name()),
            format!("{CLIENT_SELECTION_PREFIX}{}", client.id),
        )
    })
}

/// Keyboard for a dialogue prompt, if its step takes a menu choice
///
/// Skippable steps get a skip button carrying the skip token.
pub fn prompt_keyboard(spec: &FieldSpec, clients: &[Client]) -> InlineKeyboard {
    let keyboard = match spec.kind {
        FieldKind::Gender => choice_keyboard::<Gender>(),
        FieldKind::FitnessGoal => choice_keyboard::<FitnessGoal>(),
        FieldKind::ActivityLevel => choice_keyboard::<ActivityLevel>(),
        FieldKind::WorkoutType => choice_keyboard::<WorkoutType>(),
        FieldKind::ClientRef => client_picker(clients),
        _ => InlineKeyboard::new(),
    };
    if spec.skippable {
        keyboard.button("⏭ Пропустить", SKIP_TOKEN)
    } else {
        keyboard
    }
}

pub fn client_roster(clients: &[Client], shown: usize) -> InlineKeyboard {
    let keyboard = clients.iter().take(shown).fold(InlineKeyboard::new(), |keyboard, client| {
        keyboard.button(
            format!("👤 {}", client.full_name()),
            CallbackAction::ClientView(client.id).token(),
        )
    });
    keyboard
        .row(vec![
            button("➕ Добавить клиента", &CallbackAction::ClientAdd),
            button("🔍 Поиск", &CallbackAction::ClientSearch),
        ])
}

pub fn client_actions(client: &Client) -> InlineKeyboard {
    InlineKeyboard::new()
        .row(vec![
            button("💪 Новая тренировка", &CallbackAction::WorkoutCreateFor(client.id)),
            button("📅 История", &CallbackAction::ClientWorkoutHistory(client.id)),
        ])
        .row(vec![
            button("🗑 Удалить", &CallbackAction::ClientDelete(client.id)),
            button("◀️ К списку", &CallbackAction::ClientList),
        ])
}

pub fn back_to_client(client: &Client) -> InlineKeyboard {
    InlineKeyboard::new().button("◀️ Назад", CallbackAction::ClientView(client.id).token())
}

pub fn confirm_client_deletion(client: &Client) -> InlineKeyboard {
    InlineKeyboard::new().row(vec![
        button("✅ Да, удалить", &CallbackAction::ConfirmDeleteClient(client.id)),
        button("❌ Отмена", &CallbackAction::CancelDeleteClient(client.id)),
    ])
}

pub fn back_to_clients() -> InlineKeyboard {
    InlineKeyboard::new().button("◀️ К списку клиентов", CallbackAction::ClientList.token())
}

pub fn workout_menu() -> InlineKeyboard {
    InlineKeyboard::new()
        .row(vec![
            button("➕ Новая тренировка", &CallbackAction::WorkoutAdd),
            button("📅 Сегодня", &CallbackAction::WorkoutToday),
        ])
        .row(vec![
            button("📋 Ближайшие", &CallbackAction::WorkoutUpcoming),
            button("📊 Статистика", &CallbackAction::MainStats),
        ])
}

/// Buttons for each listed workout plus a way back
pub fn workout_list<'a>(workouts: impl IntoIterator<Item = &'a Workout>) -> InlineKeyboard {
    workouts
        .into_iter()
        .fold(InlineKeyboard::new(), |keyboard, workout| {
            keyboard.button(
                format!(
                    "{} {}",
                    workout.status.emoji(),
                    workout.scheduled_date.format("%d.%m %H:%M")
                ),
                CallbackAction::WorkoutView(workout.id).token(),
            )
        })
        .button("◀️ Назад", CallbackAction::WorkoutMenu.token())
}

/// Status changes are offered only while the workout is planned
pub fn workout_actions(workout: &Workout) -> InlineKeyboard {
    let mut keyboard = InlineKeyboard::new();
    if workout.is_open() {
        keyboard = keyboard.row(vec![
            button("✅ Завершить", &CallbackAction::WorkoutComplete(workout.id)),
            button("🚫 Отменить", &CallbackAction::WorkoutCancel(workout.id)),
        ]);
    }
    keyboard
        .button("🗑 Удалить", CallbackAction::WorkoutDeleteConfirm(workout.id).token())
        .button("◀️ Назад", CallbackAction::WorkoutMenu.token())
}

pub fn confirm_workout_deletion(workout: &Workout) -> InlineKeyboard {
    InlineKeyboard::new().row(vec![
        button("✅ Да, удалить", &CallbackAction::ConfirmDeleteWorkout(workout.id)),
        button("❌ Отмена", &CallbackAction::CancelDeleteWorkout(workout.id)),
    ])
}

pub fn back_to_workouts() -> InlineKeyboard {
    InlineKeyboard::new().button("◀️ К тренировкам", CallbackAction::WorkoutMenu.token())
}
