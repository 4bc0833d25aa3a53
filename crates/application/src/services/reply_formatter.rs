//! Reply formatting
//!
//! Pure functions that render entities into HTML messages for the chat
//! platform. Anything a user typed goes through [`escape_html`].

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use domain::{Choice, Client, Trainer, TrainerStatistics, Workout, WorkoutWithClient};

use super::client_service::ClientOverview;

const DATE_TIME_FORMAT: &str = "%d.%m.%Y %H:%M";
const DATE_FORMAT: &str = "%d.%m.%Y";
const NOT_SET: &str = "Не указан";

/// Escape the characters that are markup in Telegram HTML
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn or_not_set(value: Option<&str>) -> String {
    value.map_or_else(|| NOT_SET.to_string(), escape_html)
}

fn format_local(at: NaiveDateTime) -> String {
    at.format(DATE_TIME_FORMAT).to_string()
}

fn format_utc_in(at: DateTime<Utc>, tz: Tz, format: &str) -> String {
    at.with_timezone(&tz).format(format).to_string()
}

fn workout_type_label(workout: &Workout) -> &'static str {
    workout.workout_type.map_or("Тренировка", Choice::label)
}

pub fn welcome(first_name: Option<&str>) -> String {
    let greeting = first_name.map_or_else(|| "Привет!".to_string(), |name| {
        format!("Привет, {}!", escape_html(name))
    });
    format!(
        "🏋️‍♂️ <b>Добро пожаловать в фитнес-помощник!</b>\n\n\
         {greeting}\n\
         Я помогу вам эффективно управлять тренировками и клиентами.\n\n\
         🚀 <b>Возможности:</b>\n\
         • 👥 Управление клиентами\n\
         • 💪 Планирование тренировок\n\
         • 📊 Статистика\n\n\
         Для начала работы используйте кнопки ниже или нажмите /help"
    )
}

pub fn help() -> String {
    "<b>🤖 Команды бота:</b>\n\n\
     /start - Главное меню\n\
     /help - Эта справка\n\
     /profile - Профиль тренера\n\
     /clients - Управление клиентами\n\
     /workouts - Тренировки\n\
     /stats - Статистика\n\
     /cancel - Прервать текущий ввод\n\
     /skip - Пропустить необязательный шаг\n\n\
     <b>💡 Совет:</b> Используйте кнопки меню для быстрого доступа!"
        .to_string()
}

pub fn not_registered() -> String {
    "❌ Тренер не найден. Выполните /start для регистрации.".to_string()
}

pub fn profile(trainer: &Trainer, clients: u32, workouts: u32, tz: Tz) -> String {
    format!(
        "👤 <b>Профиль тренера</b>\n\n\
         <b>Основная информация:</b>\n\
         • Имя: {}\n\
         • Username: @{}\n\
         • ID: {}\n\n\
         <b>📊 Статистика:</b>\n\
         • Клиентов: {clients}\n\
         • Тренировок: {workouts}\n\
         • Дата регистрации: {}",
        trainer
            .full_name()
            .map_or_else(|| NOT_SET.to_string(), |name| escape_html(&name)),
        trainer
            .username
            .as_deref()
            .map_or_else(|| "не указан".to_string(), escape_html),
        trainer.telegram_id,
        format_utc_in(trainer.created_at, tz, DATE_FORMAT),
    )
}

/// Roster listing; only the first `shown` clients are rendered
pub fn client_roster(clients: &[Client], shown: usize) -> String {
    if clients.is_empty() {
        return "👥 <b>Ваши клиенты</b>\n\n\
                У вас пока нет клиентов.\n\
                Нажмите «➕ Добавить клиента», чтобы начать."
            .to_string();
    }

    let mut text = format!("👥 <b>Ваши клиенты ({})</b>\n\n", clients.len());
    for (i, client) in clients.iter().take(shown).enumerate() {
        let status = if client.is_active { "✅" } else { "❌" };
        text.push_str(&format!(
            "{}. {status} <b>{}</b>\n",
            i + 1,
            escape_html(&client.full_name())
        ));
        match client.primary_goal {
            Some(goal) => text.push_str(&format!("   {} {}\n", goal.emoji(), goal.label())),
            None => text.push_str("   🎯 Цель не указана\n"),
        }
        if let Some(phone) = &client.phone {
            text.push_str(&format!("   📱 {}\n", escape_html(phone)));
        }
        text.push('\n');
    }
    if clients.len() > shown {
        text.push_str(&format!("… и еще {}\n", clients.len() - shown));
    }
    text
}

pub fn search_results(query: &str, clients: &[Client]) -> String {
    let query = escape_html(query);
    if clients.is_empty() {
        return format!("🔍 По запросу «{query}» ничего не найдено.");
    }
    let mut text = format!("🔍 <b>Результаты поиска «{query}» ({})</b>\n\n", clients.len());
    for client in clients {
        let status = if client.is_active { "✅" } else { "❌" };
        text.push_str(&format!("{status} {}\n", escape_html(&client.full_name())));
    }
    text
}

pub fn client_card(overview: &ClientOverview, tz: Tz) -> String {
    let client = &overview.client;
    let mut text = format!(
        "👤 <b>{}</b>\n\n\
         📱 <b>Контакты:</b>\n\
         • Телефон: {}\n\
         • Email: {}\n\n\
         🔍 <b>Параметры:</b>\n\
         • Пол: {}\n\
         • Рост: {}\n\
         • Вес: {}\n\n\
         🎯 <b>Цели:</b>\n\
         • Основная цель: {}\n\
         • Уровень активности: {}\n\n\
         💪 <b>Статистика тренировок:</b>\n\
         • Всего: {}\n\
         • Завершено: {}\n\
         • Посещаемость: {}%\n",
        escape_html(&client.full_name()),
        or_not_set(client.phone.as_deref()),
        or_not_set(client.email.as_deref()),
        client.gender.map_or(NOT_SET, Choice::label),
        client.height.map_or_else(|| NOT_SET.to_string(), |h| h.to_string()),
        client.weight.map_or_else(|| NOT_SET.to_string(), |w| w.to_string()),
        client.primary_goal.map_or("Не указана", Choice::label),
        client.activity_level.map_or(NOT_SET, Choice::label),
        overview.attendance.total,
        overview.attendance.completed,
        overview.attendance.rate_percent(),
    );

    if !overview.recent_workouts.is_empty() {
        text.push_str("\n📅 <b>Последние тренировки:</b>\n");
        for workout in &overview.recent_workouts {
            text.push_str(&format!(
                "{} {} - {}\n",
                workout.status.emoji(),
                format_local(workout.scheduled_date),
                workout_type_label(workout)
            ));
        }
    }

    if let Some(medical) = &client.medical_conditions {
        text.push_str(&format!(
            "\n🏥 <b>Медицинские особенности:</b>\n{}\n",
            escape_html(medical)
        ));
    }

    text.push_str(&format!(
        "\n📅 <b>Регистрация:</b> {}",
        format_utc_in(client.created_at, tz, DATE_FORMAT)
    ));
    text
}

pub fn client_created(client: &Client) -> String {
    format!(
        "✅ <b>Клиент успешно добавлен!</b>\n\n\
         👤 <b>{}</b>\n\
         📱 {}\n\
         📧 {}\n\n\
         📊 <b>Параметры:</b>\n\
         • Рост: {}\n\
         • Вес: {}\n\
         • Цель: {}\n\
         • Активность: {}\n\n\
         🆔 <b>ID клиента:</b> {}",
        escape_html(&client.full_name()),
        or_not_set(client.phone.as_deref()),
        or_not_set(client.email.as_deref()),
        client.height.map_or_else(|| NOT_SET.to_string(), |h| h.to_string()),
        client.weight.map_or_else(|| NOT_SET.to_string(), |w| w.to_string()),
        client.primary_goal.map_or("Не указана", Choice::label),
        client.activity_level.map_or("Не указана", Choice::label),
        client.id,
    )
}

pub fn client_limit_reached(max: u32) -> String {
    format!("❌ Достигнут лимит клиентов ({max}). Удалите неактивных клиентов, чтобы добавить новых.")
}

pub fn confirm_client_deletion(client: &Client) -> String {
    format!(
        "⚠️ <b>Подтверждение удаления</b>\n\n\
         Вы действительно хотите удалить клиента?\n\
         <b>{}</b>\n\n\
         ⚠️ Все тренировки клиента также будут удалены. Это действие нельзя отменить!",
        escape_html(&client.full_name())
    )
}

pub fn client_deleted(client: &Client) -> String {
    format!(
        "✅ <b>Клиент удален</b>\n\n{} успешно удален.",
        escape_html(&client.full_name())
    )
}

pub fn workout_history(client: &Client, workouts: &[Workout]) -> String {
    let name = escape_html(&client.full_name());
    if workouts.is_empty() {
        return format!("📅 <b>История тренировок: {name}</b>\n\nТренировок пока нет.");
    }
    let mut text = format!("📅 <b>История тренировок: {name}</b>\n\n");
    for workout in workouts {
        text.push_str(&format!(
            "{} {} - {} ({} мин)\n",
            workout.status.emoji(),
            format_local(workout.scheduled_date),
            workout_type_label(workout),
            workout.duration.minutes()
        ));
    }
    text
}

pub fn workout_menu(
    total: u32,
    today: &[WorkoutWithClient],
    upcoming: &[WorkoutWithClient],
) -> String {
    let mut text = format!(
        "💪 <b>Тренировки</b>\n\n\
         <b>📊 Статистика:</b>\n\
         • Всего тренировок: {total}\n\
         • Сегодня: {}\n\
         • Ближайших: {}\n\n\
         <b>📅 На сегодня:</b>\n",
        today.len(),
        upcoming.len()
    );
    if today.is_empty() {
        text.push_str("Нет запланированных тренировок\n");
    } else {
        for entry in today {
            text.push_str(&format!(
                "• {} - {}\n",
                entry.workout.scheduled_date.format("%H:%M"),
                escape_html(&entry.client_name)
            ));
        }
    }
    text
}

pub fn today_workouts(workouts: &[WorkoutWithClient]) -> String {
    if workouts.is_empty() {
        return "📅 <b>Тренировки на сегодня</b>\n\nСегодня нет запланированных тренировок."
            .to_string();
    }
    let mut text = format!("📅 <b>Тренировки на сегодня ({})</b>\n\n", workouts.len());
    for entry in workouts {
        let workout = &entry.workout;
        text.push_str(&format!(
            "{} <b>{}</b> - {}\n   🏋️ {} ({} мин)\n",
            workout.status.emoji(),
            workout.scheduled_date.format("%H:%M"),
            escape_html(&entry.client_name),
            workout_type_label(workout),
            workout.duration.minutes()
        ));
        if let Some(location) = &workout.location {
            text.push_str(&format!("   📍 {}\n", escape_html(location)));
        }
        text.push('\n');
    }
    text
}

pub fn upcoming_workouts(workouts: &[WorkoutWithClient]) -> String {
    if workouts.is_empty() {
        return "📋 <b>Ближайшие тренировки</b>\n\nНет запланированных тренировок.".to_string();
    }
    let mut text = format!("📋 <b>Ближайшие тренировки ({})</b>\n\n", workouts.len());
    for entry in workouts {
        text.push_str(&format!(
            "⏳ <b>{}</b> - {}\n   🏋️ {}\n",
            format_local(entry.workout.scheduled_date),
            escape_html(&entry.client_name),
            workout_type_label(&entry.workout)
        ));
    }
    text
}

pub fn workout_card(workout: &Workout, client_name: &str, tz: Tz) -> String {
    let mut text = format!(
        "💪 <b>Детали тренировки</b>\n\n\
         👤 <b>Клиент:</b> {}\n\
         📅 <b>Дата:</b> {}\n\
         🏋️ <b>Тип:</b> {}\n\
         🕐 <b>Длительность:</b> {} минут\n\
         📍 <b>Место:</b> {}\n\
         🎯 <b>Статус:</b> {}\n",
        escape_html(client_name),
        format_local(workout.scheduled_date),
        workout_type_label(workout),
        workout.duration.minutes(),
        workout
            .location
            .as_deref()
            .map_or_else(|| "Не указано".to_string(), escape_html),
        workout.status,
    );
    if let Some(completed_at) = workout.completed_at {
        text.push_str(&format!(
            "✅ <b>Завершена:</b> {}\n",
            format_utc_in(completed_at, tz, DATE_TIME_FORMAT)
        ));
    }
    if let Some(notes) = &workout.trainer_notes {
        text.push_str(&format!("\n📝 <b>Заметки тренера:</b>\n{}\n", escape_html(notes)));
    }
    if let Some(feedback) = &workout.client_feedback {
        text.push_str(&format!("\n💬 <b>Отзыв клиента:</b>\n{}\n", escape_html(feedback)));
    }
    if let Some(rpe) = workout.perceived_exertion {
        text.push_str(&format!("\n💪 <b>Усилие (1-10):</b> {rpe}/10\n"));
    }
    text
}

pub fn workout_created(workout: &Workout, client_name: &str) -> String {
    format!(
        "✅ <b>Тренировка создана!</b>\n\n\
         👤 <b>Клиент:</b> {}\n\
         📅 <b>Дата:</b> {}\n\
         🏋️ <b>Тип:</b> {}\n\
         ⏱️ <b>Длительность:</b> {} минут\n\
         📍 <b>Место:</b> {}\n\n\
         🆔 <b>ID тренировки:</b> {}\n\
         📊 <b>Статус:</b> {}",
        escape_html(client_name),
        format_local(workout.scheduled_date),
        workout_type_label(workout),
        workout.duration.minutes(),
        workout
            .location
            .as_deref()
            .map_or_else(|| "Не указано".to_string(), escape_html),
        workout.id,
        workout.status,
    )
}

pub fn workout_completed() -> String {
    "✅ <b>Тренировка отмечена как завершенная!</b>".to_string()
}

pub fn workout_cancelled() -> String {
    "🚫 <b>Тренировка отменена.</b>".to_string()
}

pub fn confirm_workout_deletion(workout: &Workout, client_name: &str) -> String {
    format!(
        "⚠️ <b>Подтверждение удаления</b>\n\n\
         Удалить тренировку?\n\n\
         📅 <b>Дата:</b> {}\n\
         👤 <b>Клиент:</b> {}\n\n\
         ⚠️ Это действие нельзя отменить!",
        format_local(workout.scheduled_date),
        escape_html(client_name)
    )
}

pub fn workout_deleted() -> String {
    "✅ <b>Тренировка удалена</b>".to_string()
}

pub fn no_clients_for_workout() -> String {
    "❌ <b>У вас нет клиентов</b>\n\n\
     Сначала добавьте клиентов для планирования тренировок.\n\n\
     Используйте команду /clients"
        .to_string()
}

pub fn statistics(stats: &TrainerStatistics) -> String {
    format!(
        "📊 <b>Статистика</b>\n\n\
         <b>👥 Клиенты:</b>\n\
         • Всего: {}\n\
         • Активных: {}\n\
         • Новых за месяц: {}\n\n\
         <b>💪 Тренировки:</b>\n\
         • Всего: {}\n\
         • В этом месяце: {}\n\
         • Завершено: {}\n\
         • Сегодня: {}",
        stats.total_clients,
        stats.active_clients,
        stats.new_clients_this_month,
        stats.total_workouts,
        stats.workouts_this_month,
        stats.completed_workouts,
        stats.today_workouts,
    )
}

pub fn not_found(entity: &str) -> String {
    format!("❌ {entity} не найден(а).")
}

pub fn dialogue_cancelled() -> String {
    "❌ Действие отменено.".to_string()
}

pub fn nothing_to_cancel() -> String {
    "Нет активного действия для отмены.".to_string()
}

pub fn nothing_to_skip() -> String {
    "Сейчас нечего пропускать.".to_string()
}

pub fn workout_not_open() -> String {
    "❌ Тренировка уже завершена или отменена.".to_string()
}

pub fn stale_selection() -> String {
    "⌛ Эта кнопка устарела. Откройте меню заново: /start".to_string()
}

pub fn free_text_hint() -> String {
    "🤔 Не понимаю сообщение. Используйте кнопки меню или /help.".to_string()
}

pub fn unknown_command(name: &str) -> String {
    format!("❓ Неизвестная команда /{}. Список команд: /help", escape_html(name))
}

pub fn internal_error() -> String {
    "❌ Произошла ошибка. Попробуйте еще раз позже.".to_string()
}
