// SPDX-FileCopyrightText: 2026 Entrig <hello@entrig.dev>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::path::Path;

use chrono::{DateTime, Utc};
use entrigcommon::identifiers::RegistrationId;
use sqlx::{
    SqliteExecutor, SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

pub(crate) const REGISTRATION_DB_NAME: &str = "entrig.db";

/// Opens the database that holds the registration record, creating it and
/// its schema if missing.
pub async fn open_registration_db(db_dir: impl AsRef<Path>) -> sqlx::Result<SqlitePool> {
    let db_file = db_dir.as_ref().join(REGISTRATION_DB_NAME);
    let options = SqliteConnectOptions::new()
        .filename(db_file)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;
    RegistrationRecord::create_table(&pool).await?;
    Ok(pool)
}

/// The currently active device registration.
///
/// At most one record exists at a time: it is written on successful
/// registration and deleted on successful unregistration.
#[derive(Debug, Clone)]
pub struct RegistrationRecord {
    pub registration_id: RegistrationId,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct SqlRegistrationRecord {
    registration_id: String,
    user_id: String,
    created_at: DateTime<Utc>,
}

impl From<SqlRegistrationRecord> for RegistrationRecord {
    fn from(record: SqlRegistrationRecord) -> Self {
        Self {
            registration_id: RegistrationId::new(record.registration_id),
            user_id: record.user_id,
            created_at: record.created_at,
        }
    }
}

impl RegistrationRecord {
    pub fn new(registration_id: RegistrationId, user_id: impl Into<String>) -> Self {
        Self {
            registration_id,
            user_id: user_id.into(),
            created_at: Utc::now(),
        }
    }

    pub(crate) async fn create_table(executor: impl SqliteExecutor<'_>) -> sqlx::Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS registration_record (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                registration_id TEXT NOT NULL,
                user_id TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
        )
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn load(executor: impl SqliteExecutor<'_>) -> sqlx::Result<Option<Self>> {
        let record = sqlx::query_as::<_, SqlRegistrationRecord>(
            "SELECT registration_id, user_id, created_at
            FROM registration_record WHERE id = 1",
        )
        .fetch_optional(executor)
        .await?;
        Ok(record.map(From::from))
    }

    pub(crate) async fn store(&self, executor: impl SqliteExecutor<'_>) -> sqlx::Result<()> {
        sqlx::query(
            "INSERT OR REPLACE INTO registration_record
                (id, registration_id, user_id, created_at)
            VALUES (1, ?, ?, ?)",
        )
        .bind(self.registration_id.as_str())
        .bind(&self.user_id)
        .bind(self.created_at)
        .execute(executor)
        .await?;
        Ok(())
    }

    pub(crate) async fn delete(executor: impl SqliteExecutor<'_>) -> sqlx::Result<()> {
        sqlx::query("DELETE FROM registration_record")
            .execute(executor)
            .await?;
        Ok(())
    }
}
