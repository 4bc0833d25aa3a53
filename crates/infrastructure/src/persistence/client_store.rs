//! Clients in SQLite
//!
//! Ownership lives in `trainer_clients`; every query joins through it so a
//! trainer never sees another trainer's clients.

use std::str::FromStr;

use application::{error::ApplicationError, ports::ClientStore};
use async_trait::async_trait;
use chrono::Utc;
use domain::{Client, ClientId, Height, NewClient, PersonName, SearchQuery, TrainerId, Weight};
use sqlx::SqlitePool;
use tracing::{debug, instrument};

use super::error::{corrupt, map_sqlx_error, parse_datetime};

/// Client store backed by the `clients` and `trainer_clients` tables
#[derive(Debug, Clone)]
pub struct SqliteClientStore {
    pool: SqlitePool,
}

impl SqliteClientStore {
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ClientRow {
    id: i64,
    first_name: String,
    last_name: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    gender: Option<String>,
    height_cm: Option<f64>,
    weight_kg: Option<f64>,
    primary_goal: Option<String>,
    activity_level: Option<String>,
    medical_conditions: Option<String>,
    is_active: bool,
    created_at: String,
}

fn parse_code<T: FromStr<Err = String>>(
    column: &str,
    value: Option<String>,
) -> Result<Option<T>, ApplicationError> {
    value
        .map(|code| T::from_str(&code).map_err(|e| corrupt(column, e)))
        .transpose()
}

impl TryFrom<ClientRow> for Client {
    type Error = ApplicationError;

    fn try_from(row: ClientRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ClientId::new(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            phone: row.phone,
            email: row.email,
            gender: parse_code("gender", row.gender)?,
            height: row
                .height_cm
                .map(|cm| Height::new(cm).map_err(|e| corrupt("height_cm", e)))
                .transpose()?,
            weight: row
                .weight_kg
                .map(|kg| Weight::new(kg).map_err(|e| corrupt("weight_kg", e)))
                .transpose()?,
            primary_goal: parse_code("primary_goal", row.primary_goal)?,
            activity_level: parse_code("activity_level", row.activity_level)?,
            medical_conditions: row.medical_conditions,
            is_active: row.is_active,
            created_at: parse_datetime(&row.created_at)?,
        })
    }
}

const SELECT_OWNED: &str = r"
    SELECT c.id, c.first_name, c.last_name, c.phone, c.email, c.gender, c.height_cm,
           c.weight_kg, c.primary_goal, c.activity_level, c.medical_conditions,
           c.is_active, c.created_at
    FROM clients c
    JOIN trainer_clients tc ON tc.client_id = c.id
    WHERE tc.trainer_id = $1
";

fn rows_to_clients(rows: Vec<ClientRow>) -> Result<Vec<Client>, ApplicationError> {
    rows.into_iter().map(Client::try_from).collect()
}

#[async_trait]
impl ClientStore for SqliteClientStore {
    #[instrument(skip(self, client), fields(first_name = %client.first_name))]
    async fn create(
        &self,
        trainer_id: TrainerId,
        client: &NewClient,
    ) -> Result<Client, ApplicationError> {
        let created_at = Utc::now();
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let id: i64 = sqlx::query_scalar(
            r"
            INSERT INTO clients (first_name, last_name, phone, email, gender, height_cm,
                                 weight_kg, primary_goal, activity_level, medical_conditions,
                                 is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 1, $11)
            RETURNING id
            ",
        )
        .bind(client.first_name.as_str())
        .bind(client.last_name.as_ref().map(PersonName::as_str))
        .bind(&client.phone)
        .bind(&client.email)
        .bind(client.gender.map(|g| g.as_str()))
        .bind(client.height.map(Height::cm))
        .bind(client.weight.map(Weight::kg))
        .bind(client.primary_goal.map(|g| g.as_str()))
        .bind(client.activity_level.map(|a| a.as_str()))
        .bind(&client.medical_conditions)
        .bind(created_at.to_rfc3339())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        sqlx::query("INSERT INTO trainer_clients (trainer_id, client_id) VALUES ($1, $2)")
            .bind(trainer_id.as_i64())
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;
        debug!(client_id = id, "Client row inserted");

        Ok(Client {
            id: ClientId::new(id),
            first_name: client.first_name.as_str().to_string(),
            last_name: client.last_name.as_ref().map(|n| n.as_str().to_string()),
            phone: client.phone.clone(),
            email: client.email.clone(),
            gender: client.gender,
            height: client.height,
            weight: client.weight,
            primary_goal: client.primary_goal,
            activity_level: client.activity_level,
            medical_conditions: client.medical_conditions.clone(),
            is_active: true,
            created_at,
        })
    }

    #[instrument(skip(self))]
    async fn get(
        &self,
        trainer_id: TrainerId,
        client_id: ClientId,
    ) -> Result<Option<Client>, ApplicationError> {
        let row: Option<ClientRow> = sqlx::query_as(&format!("{SELECT_OWNED} AND c.id = $2"))
            .bind(trainer_id.as_i64())
            .bind(client_id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        row.map(Client::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self, trainer_id: TrainerId) -> Result<Vec<Client>, ApplicationError> {
        let rows: Vec<ClientRow> =
            sqlx::query_as(&format!("{SELECT_OWNED} ORDER BY c.created_at DESC, c.id DESC"))
                .bind(trainer_id.as_i64())
                .fetch_all(&self.pool)
                .await
                .map_err(map_sqlx_error)?;
        rows_to_clients(rows)
    }

    #[instrument(skip(self, query), fields(query = %query.as_str()))]
    async fn search(
        &self,
        trainer_id: TrainerId,
        query: &SearchQuery,
    ) -> Result<Vec<Client>, ApplicationError> {
        // SQLite LIKE folds ASCII only, so Cyrillic matching happens here
        let rows: Vec<ClientRow> =
            sqlx::query_as(&format!("{SELECT_OWNED} ORDER BY c.first_name, c.id"))
                .bind(trainer_id.as_i64())
                .fetch_all(&self.pool)
                .await
                .map_err(map_sqlx_error)?;
        let found: Vec<Client> = rows_to_clients(rows)?
            .into_iter()
            .filter(|client| {
                query.matches(&client.first_name)
                    || client.last_name.as_deref().is_some_and(|last| query.matches(last))
            })
            .collect();
        debug!(count = found.len(), "Client search completed");
        Ok(found)
    }

    #[instrument(skip(self))]
    async fn count(&self, trainer_id: TrainerId) -> Result<u32, ApplicationError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM trainer_clients WHERE trainer_id = $1")
                .bind(trainer_id.as_i64())
                .fetch_one(&self.pool)
                .await
                .map_err(map_sqlx_error)?;
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }

    #[instrument(skip(self))]
    async fn delete(
        &self,
        trainer_id: TrainerId,
        client_id: ClientId,
    ) -> Result<bool, ApplicationError> {
        // Workouts and the ownership link go with the client via ON DELETE CASCADE
        let result = sqlx::query(
            r"
            DELETE FROM clients
            WHERE id = $1
              AND id IN (SELECT client_id FROM trainer_clients WHERE trainer_id = $2)
            ",
        )
        .bind(client_id.as_i64())
        .bind(trainer_id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(result.rows_affected() > 0)
    }
}
