//! Trainer accounts in SQLite

use application::{error::ApplicationError, ports::TrainerStore};
use async_trait::async_trait;
use chrono::Utc;
use domain::{ChatUserId, NewTrainer, Trainer, TrainerId};
use sqlx::SqlitePool;
use tracing::{debug, instrument};

use super::error::{map_sqlx_error, parse_datetime};

/// Trainer store backed by the `trainers` table
#[derive(Debug, Clone)]
pub struct SqliteTrainerStore {
    pool: SqlitePool,
}

impl SqliteTrainerStore {
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct TrainerRow {
    id: i64,
    telegram_id: i64,
    username: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    created_at: String,
}

impl TryFrom<TrainerRow> for Trainer {
    type Error = ApplicationError;

    fn try_from(row: TrainerRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: TrainerId::new(row.id),
            telegram_id: ChatUserId::new(row.telegram_id),
            username: row.username,
            first_name: row.first_name,
            last_name: row.last_name,
            created_at: parse_datetime(&row.created_at)?,
        })
    }
}

const SELECT_TRAINER: &str =
    "SELECT id, telegram_id, username, first_name, last_name, created_at FROM trainers";

#[async_trait]
impl TrainerStore for SqliteTrainerStore {
    #[instrument(skip(self))]
    async fn find_by_telegram_id(
        &self,
        telegram_id: ChatUserId,
    ) -> Result<Option<Trainer>, ApplicationError> {
        let row: Option<TrainerRow> =
            sqlx::query_as(&format!("{SELECT_TRAINER} WHERE telegram_id = $1"))
                .bind(telegram_id.as_i64())
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx_error)?;
        row.map(Trainer::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn get(&self, id: TrainerId) -> Result<Option<Trainer>, ApplicationError> {
        let row: Option<TrainerRow> = sqlx::query_as(&format!("{SELECT_TRAINER} WHERE id = $1"))
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        row.map(Trainer::try_from).transpose()
    }

    #[instrument(skip(self, trainer), fields(telegram_id = %trainer.telegram_id))]
    async fn create(&self, trainer: &NewTrainer) -> Result<Trainer, ApplicationError> {
        let created_at = Utc::now();
        let id: i64 = sqlx::query_scalar(
            r"
            INSERT INTO trainers (telegram_id, username, first_name, last_name, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            ",
        )
        .bind(trainer.telegram_id.as_i64())
        .bind(&trainer.username)
        .bind(&trainer.first_name)
        .bind(&trainer.last_name)
        .bind(created_at.to_rfc3339())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        debug!(trainer_id = id, "Trainer row inserted");
        Ok(Trainer {
            id: TrainerId::new(id),
            telegram_id: trainer.telegram_id,
            username: trainer.username.clone(),
            first_name: trainer.first_name.clone(),
            last_name: trainer.last_name.clone(),
            created_at,
        })
    }
}
