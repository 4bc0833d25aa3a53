//! Bot dispatcher
//!
//! Turns one inbound update into one reply. Commands and navigation buttons
//! are answered directly; typed text and menu selections go to the sender's
//! active dialogue, and a completed dialogue creates its record exactly once.

use std::{fmt, sync::Arc};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use domain::{
    BotCommand, CallbackAction, ChatUserId, Client, ClientId, DomainError, SKIP_TOKEN, Trainer,
    WorkoutId,
};
use tracing::{debug, error, info, instrument, warn};

use super::{
    ClientService, StatisticsService, TrainerService, WorkoutService, keyboards,
    reply_formatter as text,
};
use crate::{
    dialogue::{
        CompletedDialogue, DialogueError, DialogueRegistry, FieldKind, FieldSpec, FlowId,
        SessionContext, SubmitOutcome,
    },
    error::ApplicationError,
    ports::{ChatUser, IncomingUpdate, InlineKeyboard, MessengerPort, OutgoingReply, UpdateKind},
};

/// Default number of upcoming workouts listed
pub const DEFAULT_UPCOMING_LIMIT: u32 = 10;

/// Default number of clients rendered in the roster
pub const DEFAULT_ROSTER_SIZE: usize = 10;

/// Configuration for the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotServiceConfig {
    /// Timezone in which "today" and typed dates are interpreted
    pub timezone: Tz,
    pub upcoming_limit: u32,
    pub roster_size: usize,
    /// Workouts shown in a client's history
    pub history_limit: u32,
}

impl Default for BotServiceConfig {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::Europe::Moscow,
            upcoming_limit: DEFAULT_UPCOMING_LIMIT,
            roster_size: DEFAULT_ROSTER_SIZE,
            history_limit: 10,
        }
    }
}

/// Text and keyboard of a reply before it is addressed
#[derive(Debug)]
struct Reply {
    text: String,
    keyboard: InlineKeyboard,
}

impl Reply {
    fn text(text: impl Into<String>) -> Self {
        Self::with(text, InlineKeyboard::new())
    }

    fn with(text: impl Into<String>, keyboard: InlineKeyboard) -> Self {
        Self {
            text: text.into(),
            keyboard,
        }
    }
}

fn dialogue_failure(err: &DialogueError) -> ApplicationError {
    ApplicationError::Internal(format!("dialogue produced no record: {err}"))
}

/// Routes updates to the services and the dialogue registry
pub struct BotService {
    trainers: TrainerService,
    clients: ClientService,
    workouts: WorkoutService,
    statistics: StatisticsService,
    dialogues: DialogueRegistry,
    messenger: Arc<dyn MessengerPort>,
    config: BotServiceConfig,
}

impl fmt::Debug for BotService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotService")
            .field("config", &self.config)
            .field("active_dialogues", &self.dialogues.len())
            .finish_non_exhaustive()
    }
}

impl BotService {
    #[must_use]
    pub fn new(
        trainers: TrainerService,
        clients: ClientService,
        workouts: WorkoutService,
        statistics: StatisticsService,
        messenger: Arc<dyn MessengerPort>,
        config: BotServiceConfig,
    ) -> Self {
        Self {
            trainers,
            clients,
            workouts,
            statistics,
            dialogues: DialogueRegistry::new(),
            messenger,
            config,
        }
    }

    /// Sessions of users currently inside a dialogue
    #[must_use]
    pub const fn dialogues(&self) -> &DialogueRegistry {
        &self.dialogues
    }

    /// Process one update end to end: acknowledge, respond, deliver
    #[instrument(skip(self, update), fields(update_id = update.update_id, user = %update.user.id))]
    pub async fn handle(&self, update: IncomingUpdate) -> Result<(), ApplicationError> {
        if let UpdateKind::Callback { callback_id, .. } = &update.kind {
            if let Err(e) = self.messenger.acknowledge_callback(callback_id, None).await {
                warn!(error = %e, "Failed to acknowledge callback");
            }
        }

        if !self.messenger.is_allowed(update.user.id) {
            warn!("Ignoring update from user outside the whitelist");
            return Ok(());
        }

        let now = Utc::now().with_timezone(&self.config.timezone);
        let reply = self.respond(&update, now).await;
        self.messenger.send(&reply).await
    }

    /// Build the reply for an update as of `now`
    ///
    /// Failures are rendered into the reply; replies to button presses edit
    /// the message that carried the button.
    pub async fn respond(&self, update: &IncomingUpdate, now: DateTime<Tz>) -> OutgoingReply {
        let (result, edit) = match &update.kind {
            UpdateKind::Text { text, .. } => (self.on_text(&update.user, text, now).await, None),
            UpdateKind::Callback {
                data, message_id, ..
            } => {
                let action = CallbackAction::parse(data);
                debug!(action = %action, "Callback received");
                (self.on_callback(&update.user, action, now).await, *message_id)
            },
        };
        let reply = result.unwrap_or_else(|err| self.error_reply(&err));
        OutgoingReply::new(update.chat_id, reply.text)
            .with_keyboard(reply.keyboard)
            .editing(edit)
    }

    fn error_reply(&self, err: &ApplicationError) -> Reply {
        match err {
            ApplicationError::NotAuthorized(_) => Reply::text(text::not_registered()),
            ApplicationError::LimitExceeded(_) => Reply::with(
                text::client_limit_reached(self.clients.max_clients()),
                keyboards::back_to_clients(),
            ),
            ApplicationError::Domain(DomainError::NotFound { entity_type, .. }) => {
                let entity = match entity_type.as_str() {
                    "Client" => "Клиент",
                    "Workout" => "Тренировка",
                    other => other,
                };
                Reply::with(text::not_found(entity), keyboards::main_menu())
            },
            ApplicationError::NotFound(what) => Reply::text(text::not_found(what)),
            ApplicationError::Domain(DomainError::ValidationError(_)) => {
                Reply::with(text::workout_not_open(), keyboards::back_to_workouts())
            },
            _ => {
                error!(error = %err, "Failed to handle update");
                Reply::text(text::internal_error())
            },
        }
    }

    async fn on_text(
        &self,
        user: &ChatUser,
        input: &str,
        now: DateTime<Tz>,
    ) -> Result<Reply, ApplicationError> {
        if let Some(command) = BotCommand::parse(input) {
            return self.on_command(user, command, now).await;
        }
        if self.dialogues.is_active(user.id) {
            return self.submit(user.id, input, now).await;
        }
        Ok(Reply::text(text::free_text_hint()))
    }

    async fn on_command(
        &self,
        user: &ChatUser,
        command: BotCommand,
        now: DateTime<Tz>,
    ) -> Result<Reply, ApplicationError> {
        match command {
            BotCommand::Start => {
                let (trainer, created) = self.trainers.register(user).await?;
                if created {
                    info!(trainer_id = %trainer.id, "Trainer registered via /start");
                }
                Ok(Reply::with(
                    text::welcome(user.first_name.as_deref()),
                    keyboards::main_menu(),
                ))
            },
            BotCommand::Help => Ok(Reply::with(text::help(), keyboards::main_menu())),
            BotCommand::Profile => self.profile(user.id).await,
            BotCommand::Clients => self.roster(user.id).await,
            BotCommand::Workouts => self.workout_menu(user.id, now).await,
            BotCommand::Stats => self.stats(user.id, now).await,
            BotCommand::Cancel => {
                if self.dialogues.cancel(user.id) {
                    Ok(Reply::with(text::dialogue_cancelled(), keyboards::main_menu()))
                } else {
                    Ok(Reply::text(text::nothing_to_cancel()))
                }
            },
            BotCommand::Skip => {
                if self.dialogues.is_active(user.id) {
                    self.submit(user.id, SKIP_TOKEN, now).await
                } else {
                    Ok(Reply::text(text::nothing_to_skip()))
                }
            },
            BotCommand::Unknown { name } => Ok(Reply::text(text::unknown_command(&name))),
        }
    }

    async fn on_callback(
        &self,
        user: &ChatUser,
        action: CallbackAction,
        now: DateTime<Tz>,
    ) -> Result<Reply, ApplicationError> {
        let user = user.id;
        match action {
            CallbackAction::MainProfile => self.profile(user).await,
            CallbackAction::MainClients | CallbackAction::ClientList => self.roster(user).await,
            CallbackAction::MainWorkouts | CallbackAction::WorkoutMenu => {
                self.workout_menu(user, now).await
            },
            CallbackAction::MainStats => self.stats(user, now).await,
            CallbackAction::ClientAdd => {
                let trainer = self.trainers.require(user).await?;
                self.clients.ensure_capacity(trainer.id).await?;
                Ok(self.start_flow(user, FlowId::ClientIntake, SessionContext::new(trainer.id), &[]))
            },
            CallbackAction::ClientSearch => {
                let trainer = self.trainers.require(user).await?;
                Ok(self.start_flow(user, FlowId::ClientSearch, SessionContext::new(trainer.id), &[]))
            },
            CallbackAction::ClientView(id) | CallbackAction::CancelDeleteClient(id) => {
                self.client_card(user, id).await
            },
            CallbackAction::ClientDelete(id) => {
                let trainer = self.trainers.require(user).await?;
                let client = self.clients.get(trainer.id, id).await?;
                Ok(Reply::with(
                    text::confirm_client_deletion(&client),
                    keyboards::confirm_client_deletion(&client),
                ))
            },
            CallbackAction::ConfirmDeleteClient(id) => {
                let trainer = self.trainers.require(user).await?;
                let client = self.clients.delete(trainer.id, id).await?;
                Ok(Reply::with(text::client_deleted(&client), keyboards::back_to_clients()))
            },
            CallbackAction::ClientWorkoutHistory(id) => {
                let trainer = self.trainers.require(user).await?;
                let client = self.clients.get(trainer.id, id).await?;
                let history = self
                    .workouts
                    .history(trainer.id, id, self.config.history_limit)
                    .await?;
                Ok(Reply::with(
                    text::workout_history(&client, &history),
                    keyboards::back_to_client(&client),
                ))
            },
            CallbackAction::WorkoutAdd => self.start_scheduling(user, None, now).await,
            CallbackAction::WorkoutCreateFor(id) => self.start_scheduling(user, Some(id), now).await,
            CallbackAction::WorkoutToday => {
                let trainer = self.trainers.require(user).await?;
                let today = self.workouts.on_day(trainer.id, now.date_naive()).await?;
                Ok(Reply::with(
                    text::today_workouts(&today),
                    keyboards::workout_list(today.iter().map(|entry| &entry.workout)),
                ))
            },
            CallbackAction::WorkoutUpcoming => {
                let trainer = self.trainers.require(user).await?;
                let upcoming = self
                    .workouts
                    .upcoming(trainer.id, now.naive_local(), self.config.upcoming_limit)
                    .await?;
                Ok(Reply::with(
                    text::upcoming_workouts(&upcoming),
                    keyboards::workout_list(upcoming.iter().map(|entry| &entry.workout)),
                ))
            },
            CallbackAction::WorkoutView(id) | CallbackAction::CancelDeleteWorkout(id) => {
                let trainer = self.trainers.require(user).await?;
                self.workout_card(&trainer, id, None).await
            },
            CallbackAction::WorkoutComplete(id) => {
                let trainer = self.trainers.require(user).await?;
                self.workouts
                    .complete(trainer.id, id, now.with_timezone(&Utc))
                    .await?;
                self.workout_card(&trainer, id, Some(text::workout_completed()))
                    .await
            },
            CallbackAction::WorkoutCancel(id) => {
                let trainer = self.trainers.require(user).await?;
                self.workouts.cancel(trainer.id, id).await?;
                self.workout_card(&trainer, id, Some(text::workout_cancelled()))
                    .await
            },
            CallbackAction::WorkoutDeleteConfirm(id) => {
                let trainer = self.trainers.require(user).await?;
                let workout = self.workouts.get(trainer.id, id).await?;
                let client = self.clients.get(trainer.id, workout.client_id).await?;
                Ok(Reply::with(
                    text::confirm_workout_deletion(&workout, &client.full_name()),
                    keyboards::confirm_workout_deletion(&workout),
                ))
            },
            CallbackAction::ConfirmDeleteWorkout(id) => {
                let trainer = self.trainers.require(user).await?;
                self.workouts.delete(trainer.id, id).await?;
                Ok(Reply::with(text::workout_deleted(), keyboards::back_to_workouts()))
            },
            CallbackAction::Selection(token) => {
                if self.dialogues.is_active(user) {
                    self.submit(user, &token, now).await
                } else {
                    debug!(token = %token, "Selection without an active dialogue");
                    Ok(Reply::text(text::stale_selection()))
                }
            },
        }
    }

    async fn profile(&self, user: ChatUserId) -> Result<Reply, ApplicationError> {
        let trainer = self.trainers.require(user).await?;
        let clients = self.clients.count(trainer.id).await?;
        let workouts = self.workouts.count(trainer.id).await?;
        Ok(Reply::with(
            text::profile(&trainer, clients, workouts, self.config.timezone),
            keyboards::main_menu(),
        ))
    }

    async fn roster(&self, user: ChatUserId) -> Result<Reply, ApplicationError> {
        let trainer = self.trainers.require(user).await?;
        let clients = self.clients.list(trainer.id).await?;
        Ok(Reply::with(
            text::client_roster(&clients, self.config.roster_size),
            keyboards::client_roster(&clients, self.config.roster_size),
        ))
    }

    async fn client_card(&self, user: ChatUserId, id: ClientId) -> Result<Reply, ApplicationError> {
        let trainer = self.trainers.require(user).await?;
        let overview = self.clients.overview(trainer.id, id).await?;
        Ok(Reply::with(
            text::client_card(&overview, self.config.timezone),
            keyboards::client_actions(&overview.client),
        ))
    }

    async fn workout_menu(
        &self,
        user: ChatUserId,
        now: DateTime<Tz>,
    ) -> Result<Reply, ApplicationError> {
        let trainer = self.trainers.require(user).await?;
        let total = self.workouts.count(trainer.id).await?;
        let today = self.workouts.on_day(trainer.id, now.date_naive()).await?;
        let upcoming = self
            .workouts
            .upcoming(trainer.id, now.naive_local(), self.config.upcoming_limit)
            .await?;
        Ok(Reply::with(
            text::workout_menu(total, &today, &upcoming),
            keyboards::workout_menu(),
        ))
    }

    async fn workout_card(
        &self,
        trainer: &Trainer,
        id: WorkoutId,
        notice: Option<String>,
    ) -> Result<Reply, ApplicationError> {
        let workout = self.workouts.get(trainer.id, id).await?;
        let client = self.clients.get(trainer.id, workout.client_id).await?;
        let card = text::workout_card(&workout, &client.full_name(), self.config.timezone);
        let body = match notice {
            Some(notice) => format!("{notice}\n\n{card}"),
            None => card,
        };
        Ok(Reply::with(body, keyboards::workout_actions(&workout)))
    }

    async fn stats(&self, user: ChatUserId, now: DateTime<Tz>) -> Result<Reply, ApplicationError> {
        let trainer = self.trainers.require(user).await?;
        let stats = self.statistics.collect(trainer.id, now).await?;
        Ok(Reply::with(text::statistics(&stats), keyboards::main_menu()))
    }

    fn start_flow(
        &self,
        user: ChatUserId,
        flow: FlowId,
        context: SessionContext,
        clients: &[Client],
    ) -> Reply {
        match self.dialogues.start(user, flow, context) {
            Some(first) => Reply::with(
                format!("{}\n\n{}", flow.title(), first.prompt),
                keyboards::prompt_keyboard(first, clients),
            ),
            None => Reply::text(flow.title()),
        }
    }

    /// Open the scheduling dialogue, optionally answering the client step
    async fn start_scheduling(
        &self,
        user: ChatUserId,
        client: Option<ClientId>,
        now: DateTime<Tz>,
    ) -> Result<Reply, ApplicationError> {
        let trainer = self.trainers.require(user).await?;
        let clients = self.clients.list(trainer.id).await?;
        if clients.is_empty() {
            return Ok(Reply::with(
                text::no_clients_for_workout(),
                keyboards::back_to_clients(),
            ));
        }

        let context = SessionContext::new(trainer.id)
            .with_clients(clients.iter().map(|c| c.id).collect());
        let opened = self.start_flow(user, FlowId::WorkoutScheduling, context, &clients);
        let Some(client) = client else {
            return Ok(opened);
        };

        let next = self.submit(user, &client.to_string(), now).await?;
        Ok(Reply::with(
            format!("{}\n\n{}", FlowId::WorkoutScheduling.title(), next.text),
            next.keyboard,
        ))
    }

    async fn step_keyboard(
        &self,
        trainer: &Trainer,
        spec: &FieldSpec,
    ) -> Result<InlineKeyboard, ApplicationError> {
        let clients = if spec.kind == FieldKind::ClientRef {
            self.clients.list(trainer.id).await?
        } else {
            Vec::new()
        };
        Ok(keyboards::prompt_keyboard(spec, &clients))
    }

    /// Feed one input to the user's active dialogue
    async fn submit(
        &self,
        user: ChatUserId,
        input: &str,
        now: DateTime<Tz>,
    ) -> Result<Reply, ApplicationError> {
        let trainer = self.trainers.require(user).await?;
        match self.dialogues.submit(user, input, now.naive_local()) {
            Ok(SubmitOutcome::Next(spec)) => Ok(Reply::with(
                spec.prompt,
                self.step_keyboard(&trainer, spec).await?,
            )),
            Ok(SubmitOutcome::Completed(done)) => self.complete(&trainer, &done).await,
            Err(DialogueError::Invalid { message, .. }) => {
                let keyboard = match self.dialogues.current(user) {
                    Some((_, spec)) => self.step_keyboard(&trainer, spec).await?,
                    None => InlineKeyboard::new(),
                };
                Ok(Reply::with(message, keyboard))
            },
            Err(DialogueError::NoSession | DialogueError::Closed) => {
                Ok(Reply::text(text::stale_selection()))
            },
            Err(err) => Err(dialogue_failure(&err)),
        }
    }

    /// Create the record a finished dialogue describes
    #[instrument(skip(self, trainer, done), fields(trainer_id = %trainer.id, flow = %done.flow))]
    async fn complete(
        &self,
        trainer: &Trainer,
        done: &CompletedDialogue,
    ) -> Result<Reply, ApplicationError> {
        match done.flow {
            FlowId::ClientIntake => {
                let new_client = done.new_client().map_err(|e| dialogue_failure(&e))?;
                let client = self.clients.create(trainer.id, &new_client).await?;
                Ok(Reply::with(
                    text::client_created(&client),
                    keyboards::client_actions(&client),
                ))
            },
            FlowId::WorkoutScheduling => {
                let new_workout = done.new_workout().map_err(|e| dialogue_failure(&e))?;
                let workout = self.workouts.create(&new_workout).await?;
                let client = self.clients.get(trainer.id, workout.client_id).await?;
                Ok(Reply::with(
                    text::workout_created(&workout, &client.full_name()),
                    keyboards::workout_actions(&workout),
                ))
            },
            FlowId::ClientSearch => {
                let query = done.search_query().map_err(|e| dialogue_failure(&e))?;
                let found = self.clients.search(trainer.id, &query).await?;
                debug!(results = found.len(), "Client search finished");
                Ok(Reply::with(
                    text::search_results(query.as_str(), &found),
                    keyboards::client_roster(&found, self.config.roster_size),
                ))
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{MockClientStore, MockMessengerPort, MockTrainerStore, MockWorkoutStore};
    use crate::services::ClientServiceConfig;
    use chrono::{NaiveDate, TimeZone};
    use chrono_tz::Europe::Moscow;
    use domain::{
        FitnessGoal, Gender, TrainerId, Workout, WorkoutDuration, WorkoutStatus, WorkoutType,
    };

    const USER: i64 = 100;
    const CHAT: i64 = 7;

    fn now() -> DateTime<Tz> {
        Moscow.with_ymd_and_hms(2024, 5, 22, 12, 0, 0).unwrap()
    }

    fn trainer() -> Trainer {
        Trainer {
            id: TrainerId::new(1),
            telegram_id: ChatUserId::new(USER),
            username: Some("coach".to_string()),
            first_name: Some("Олег".to_string()),
            last_name: None,
            created_at: Utc::now(),
        }
    }

    fn client(id: i64, first_name: &str) -> Client {
        Client {
            id: ClientId::new(id),
            first_name: first_name.to_string(),
            last_name: None,
            phone: None,
            email: None,
            gender: None,
            height: None,
            weight: None,
            primary_goal: None,
            activity_level: None,
            medical_conditions: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn workout(id: i64, status: WorkoutStatus) -> Workout {
        Workout {
            id: WorkoutId::new(id),
            trainer_id: TrainerId::new(1),
            client_id: ClientId::new(15),
            scheduled_date: NaiveDate::from_ymd_opt(2024, 5, 23)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap(),
            workout_type: Some(WorkoutType::Cardio),
            duration: WorkoutDuration::new(20).unwrap(),
            location: None,
            trainer_notes: None,
            status,
            completed_at: None,
            client_feedback: None,
            perceived_exertion: None,
            created_at: Utc::now(),
        }
    }

    fn registered() -> MockTrainerStore {
        let mut trainers = MockTrainerStore::new();
        trainers
            .expect_find_by_telegram_id()
            .returning(|_| Ok(Some(trainer())));
        trainers
    }

    fn service(
        trainers: MockTrainerStore,
        clients: MockClientStore,
        workouts: MockWorkoutStore,
    ) -> BotService {
        service_with(trainers, clients, workouts, MockMessengerPort::new())
    }

    fn service_with(
        trainers: MockTrainerStore,
        clients: MockClientStore,
        workouts: MockWorkoutStore,
        messenger: MockMessengerPort,
    ) -> BotService {
        let clients: Arc<dyn crate::ports::ClientStore> = Arc::new(clients);
        let workouts: Arc<dyn crate::ports::WorkoutStore> = Arc::new(workouts);
        BotService::new(
            TrainerService::new(Arc::new(trainers)),
            ClientService::new(
                Arc::clone(&clients),
                Arc::clone(&workouts),
                ClientServiceConfig::default(),
            ),
            WorkoutService::new(Arc::clone(&workouts), Arc::clone(&clients)),
            StatisticsService::new(clients, workouts),
            Arc::new(messenger),
            BotServiceConfig::default(),
        )
    }

    fn text_update(text: &str) -> IncomingUpdate {
        let mut user = ChatUser::new(ChatUserId::new(USER));
        user.first_name = Some("Олег".to_string());
        IncomingUpdate {
            update_id: 1,
            chat_id: CHAT,
            user,
            kind: UpdateKind::Text {
                message_id: 10,
                text: text.to_string(),
            },
        }
    }

    fn callback_update(data: &str) -> IncomingUpdate {
        IncomingUpdate {
            update_id: 2,
            chat_id: CHAT,
            user: ChatUser::new(ChatUserId::new(USER)),
            kind: UpdateKind::Callback {
                callback_id: "cb-1".to_string(),
                message_id: Some(42),
                data: data.to_string(),
            },
        }
    }

    async fn say(bot: &BotService, text: &str) -> OutgoingReply {
        bot.respond(&text_update(text), now()).await
    }

    async fn press(bot: &BotService, data: &str) -> OutgoingReply {
        bot.respond(&callback_update(data), now()).await
    }

    #[tokio::test]
    async fn start_registers_new_trainer() {
        let mut trainers = MockTrainerStore::new();
        trainers
            .expect_find_by_telegram_id()
            .times(1)
            .returning(|_| Ok(None));
        trainers
            .expect_create()
            .withf(|new| new.telegram_id == ChatUserId::new(USER))
            .times(1)
            .returning(|_| Ok(trainer()));
        let bot = service(trainers, MockClientStore::new(), MockWorkoutStore::new());

        let reply = say(&bot, "/start").await;

        assert_eq!(reply.chat_id, CHAT);
        assert!(reply.text.contains("Привет, Олег!"));
        assert!(reply.edit_message_id.is_none());
        let keyboard = reply.keyboard.unwrap();
        assert!(keyboard.callback_data().any(|d| d == "clients"));
    }

    #[tokio::test]
    async fn unregistered_trainer_is_sent_to_start() {
        let mut trainers = MockTrainerStore::new();
        trainers.expect_find_by_telegram_id().returning(|_| Ok(None));
        let bot = service(trainers, MockClientStore::new(), MockWorkoutStore::new());

        let reply = say(&bot, "/clients").await;

        assert!(reply.text.contains("/start"));
    }

    #[tokio::test]
    async fn free_text_without_dialogue_gets_hint() {
        let bot = service(MockTrainerStore::new(), MockClientStore::new(), MockWorkoutStore::new());
        let reply = say(&bot, "привет").await;
        assert_eq!(reply.text, text::free_text_hint());
    }

    #[tokio::test]
    async fn selection_without_dialogue_is_stale() {
        let bot = service(MockTrainerStore::new(), MockClientStore::new(), MockWorkoutStore::new());
        let reply = press(&bot, "gender_female").await;
        assert_eq!(reply.text, text::stale_selection());
        assert_eq!(reply.edit_message_id, Some(42));
    }

    #[tokio::test]
    async fn client_intake_creates_client_once() {
        let mut clients = MockClientStore::new();
        clients.expect_count().returning(|_| Ok(0));
        clients
            .expect_create()
            .withf(|trainer_id, new| {
                *trainer_id == TrainerId::new(1)
                    && new.first_name.as_str() == "Анна"
                    && new.last_name.is_none()
                    && new.gender == Some(Gender::Female)
                    && new.weight.is_none()
                    && new.primary_goal == Some(FitnessGoal::WeightLoss)
            })
            .times(1)
            .returning(|_, _| Ok(client(15, "Анна")));
        let bot = service(registered(), clients, MockWorkoutStore::new());

        let opened = press(&bot, "client_add").await;
        assert!(opened.text.contains("Введите имя клиента"));

        say(&bot, "Анна").await;
        say(&bot, "/skip").await;
        say(&bot, "/skip").await;
        let gender = say(&bot, "/skip").await;
        assert_eq!(gender.keyboard.unwrap().callback_data().count(), 3);
        press(&bot, "gender_female").await;
        say(&bot, "/skip").await;

        let rejected = say(&bot, "400").await;
        assert!(rejected.text.contains("от 30 до 300 кг"));
        assert_eq!(
            bot.dialogues().current(ChatUserId::new(USER)).map(|(_, s)| s.prompt),
            Some("Введите вес клиента в кг (или /skip):")
        );

        say(&bot, "/skip").await;
        press(&bot, "goal_weight_loss").await;
        press(&bot, "activity_moderate").await;
        let done = say(&bot, "/skip").await;

        assert!(done.text.contains("Клиент успешно добавлен"));
        assert!(!bot.dialogues().is_active(ChatUserId::new(USER)));
    }

    #[tokio::test]
    async fn client_add_refused_at_limit() {
        let mut clients = MockClientStore::new();
        clients.expect_count().returning(|_| Ok(1000));
        let bot = service(registered(), clients, MockWorkoutStore::new());

        let reply = press(&bot, "client_add").await;

        assert!(reply.text.contains("лимит клиентов (1000)"));
        assert!(!bot.dialogues().is_active(ChatUserId::new(USER)));
    }

    #[tokio::test]
    async fn workout_add_requires_a_client() {
        let mut clients = MockClientStore::new();
        clients.expect_list().returning(|_| Ok(vec![]));
        let bot = service(registered(), clients, MockWorkoutStore::new());

        let reply = press(&bot, "workout_add").await;

        assert!(reply.text.contains("нет клиентов"));
        assert!(!bot.dialogues().is_active(ChatUserId::new(USER)));
    }

    #[tokio::test]
    async fn workout_scheduling_end_to_end() {
        let mut clients = MockClientStore::new();
        clients
            .expect_list()
            .returning(|_| Ok(vec![client(15, "Анна")]));
        clients
            .expect_get()
            .returning(|_, id| Ok(Some(client(id.as_i64(), "Анна"))));
        let mut workouts = MockWorkoutStore::new();
        workouts
            .expect_create()
            .withf(|new| {
                new.trainer_id == TrainerId::new(1)
                    && new.client_id == ClientId::new(15)
                    && new.scheduled_date
                        == NaiveDate::from_ymd_opt(2024, 5, 23)
                            .unwrap()
                            .and_hms_opt(10, 30, 0)
                            .unwrap()
                    && new.workout_type == Some(WorkoutType::Cardio)
                    && new.duration.minutes() == 20
                    && new.location.is_none()
                    && new.trainer_notes.is_none()
            })
            .times(1)
            .returning(|_| Ok(workout(3, WorkoutStatus::Planned)));
        let bot = service(registered(), clients, workouts);

        let picker = press(&bot, "workout_add").await;
        let data: Vec<_> = picker
            .keyboard
            .as_ref()
            .unwrap()
            .callback_data()
            .map(str::to_string)
            .collect();
        assert_eq!(data, ["workout_select_client_15"]);

        press(&bot, "workout_select_client_15").await;
        say(&bot, "завтра 10:30").await;
        press(&bot, "workout_type_cardio").await;
        say(&bot, "20").await;
        say(&bot, "/skip").await;
        let done = say(&bot, "/skip").await;

        assert!(done.text.contains("Тренировка создана"));
        assert!(done.text.contains("23.05.2024 10:30"));
    }

    #[tokio::test]
    async fn create_for_client_skips_the_picker() {
        let mut clients = MockClientStore::new();
        clients
            .expect_list()
            .returning(|_| Ok(vec![client(15, "Анна")]));
        let bot = service(registered(), clients, MockWorkoutStore::new());

        let reply = press(&bot, "workout_create_for_15").await;

        assert!(reply.text.contains("Введите дату и время"));
        assert_eq!(
            bot.dialogues().current(ChatUserId::new(USER)).map(|(_, s)| s.kind),
            Some(FieldKind::ScheduledDate)
        );
    }

    #[tokio::test]
    async fn past_date_keeps_dialogue_on_date_step() {
        let mut clients = MockClientStore::new();
        clients
            .expect_list()
            .returning(|_| Ok(vec![client(15, "Анна")]));
        let bot = service(registered(), clients, MockWorkoutStore::new());

        press(&bot, "workout_create_for_15").await;
        let reply = say(&bot, "сегодня 09:00").await;

        assert!(reply.text.contains("в прошлом"));
        assert_eq!(
            bot.dialogues().current(ChatUserId::new(USER)).map(|(_, s)| s.kind),
            Some(FieldKind::ScheduledDate)
        );
    }

    #[tokio::test]
    async fn cancel_ends_dialogue() {
        let mut clients = MockClientStore::new();
        clients.expect_count().returning(|_| Ok(0));
        let bot = service(registered(), clients, MockWorkoutStore::new());

        press(&bot, "client_add").await;
        let cancelled = say(&bot, "/cancel").await;
        let again = say(&bot, "/cancel").await;

        assert_eq!(cancelled.text, text::dialogue_cancelled());
        assert_eq!(again.text, text::nothing_to_cancel());
    }

    #[tokio::test]
    async fn foreign_client_is_not_found() {
        let mut clients = MockClientStore::new();
        clients.expect_get().returning(|_, _| Ok(None));
        let bot = service(registered(), clients, MockWorkoutStore::new());

        let reply = press(&bot, "client_view_99").await;

        assert!(reply.text.contains("Клиент не найден"));
    }

    #[tokio::test]
    async fn completed_workout_cannot_be_completed_again() {
        let mut workouts = MockWorkoutStore::new();
        workouts
            .expect_get()
            .returning(|_, id| Ok(Some(workout(id.as_i64(), WorkoutStatus::Completed))));
        workouts.expect_update_status().never();
        let bot = service(registered(), MockClientStore::new(), workouts);

        let reply = press(&bot, "workout_complete_3").await;

        assert_eq!(reply.text, text::workout_not_open());
    }

    #[tokio::test]
    async fn completing_workout_records_time() {
        let mut workouts = MockWorkoutStore::new();
        workouts
            .expect_get()
            .returning(|_, id| Ok(Some(workout(id.as_i64(), WorkoutStatus::Planned))));
        workouts
            .expect_update_status()
            .withf(|_, id, status, at| {
                *id == WorkoutId::new(3)
                    && *status == WorkoutStatus::Completed
                    && *at == Some(now().with_timezone(&Utc))
            })
            .times(1)
            .returning(|_, _, _, _| Ok(true));
        let mut clients = MockClientStore::new();
        clients
            .expect_get()
            .returning(|_, id| Ok(Some(client(id.as_i64(), "Анна"))));
        let bot = service(registered(), clients, workouts);

        let reply = press(&bot, "workout_complete_3").await;

        assert!(reply.text.starts_with(&text::workout_completed()));
        assert_eq!(reply.edit_message_id, Some(42));
    }

    #[tokio::test]
    async fn deletion_goes_through_confirmation() {
        let mut clients = MockClientStore::new();
        clients
            .expect_get()
            .returning(|_, id| Ok(Some(client(id.as_i64(), "Анна"))));
        clients.expect_delete().times(1).returning(|_, _| Ok(true));
        let bot = service(registered(), clients, MockWorkoutStore::new());

        let confirm = press(&bot, "client_delete_15").await;
        assert!(confirm.text.contains("Подтверждение удаления"));
        assert!(
            confirm
                .keyboard
                .unwrap()
                .callback_data()
                .any(|d| d == "confirm_delete_client_15")
        );

        let deleted = press(&bot, "confirm_delete_client_15").await;
        assert!(deleted.text.contains("Клиент удален"));
    }

    #[tokio::test]
    async fn handle_ignores_users_outside_whitelist() {
        let mut messenger = MockMessengerPort::new();
        messenger.expect_is_allowed().returning(|_| false);
        messenger.expect_send().never();
        let bot = service_with(
            MockTrainerStore::new(),
            MockClientStore::new(),
            MockWorkoutStore::new(),
            messenger,
        );

        bot.handle(text_update("/help")).await.unwrap();
    }

    #[tokio::test]
    async fn handle_acknowledges_and_sends() {
        let mut messenger = MockMessengerPort::new();
        messenger.expect_is_allowed().returning(|_| true);
        messenger
            .expect_acknowledge_callback()
            .withf(|id, notice| id == "cb-1" && notice.is_none())
            .times(1)
            .returning(|_, _| Ok(()));
        messenger
            .expect_send()
            .withf(|reply| reply.edit_message_id == Some(42) && reply.chat_id == CHAT)
            .times(1)
            .returning(|_| Ok(()));
        let bot = service_with(
            MockTrainerStore::new(),
            MockClientStore::new(),
            MockWorkoutStore::new(),
            messenger,
        );

        bot.handle(callback_update("gender_male")).await.unwrap();
    }
}
