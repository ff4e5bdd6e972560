//! PostgreSQL implementation of UserRepository.
//!
//! One statement per operation against the `users` table. Stay time is kept
//! in an `INTERVAL` column; queries render it as `"<N> minutes"` text so it
//! can be parsed by [`StayTime::from_interval`], and writes cast the same
//! text form back with `::interval`. `registered_at` is cast to
//! `timestamptz` so both `TIMESTAMP` and `TIMESTAMPTZ` columns decode.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::user::{EntryCountChange, NewUser, StayTime, User};
use crate::ports::UserRepository;

/// PostgreSQL implementation of the UserRepository port.
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a new PostgresUserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i32,
    name: String,
    description: String,
    barcode: String,
    contact: String,
    remaining_entries: i32,
    registered_at: DateTime<Utc>,
    total_entries: i32,
    total_stay_time: Option<String>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: UserId::new(row.id),
            name: row.name,
            description: row.description,
            barcode: row.barcode,
            contact: row.contact,
            remaining_entries: row.remaining_entries,
            registered_at: Timestamp::from_datetime(row.registered_at),
            total_entries: row.total_entries,
            total_stay_time: StayTime::from_interval(row.total_stay_time.as_deref()),
        }
    }
}

fn statement_failed(operation: &'static str, err: sqlx::Error) -> DomainError {
    tracing::warn!(operation, error = %err, "user store statement failed");
    DomainError::from(err)
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<User, DomainError> {
        tracing::debug!(user_id = %id, "fetching user by id");

        let row: UserRow = sqlx::query_as(
            r#"
            SELECT id, name, description, barcode, contact, remaining_entries,
                   registered_at::timestamptz AS registered_at, total_entries,
                   FLOOR(EXTRACT(EPOCH FROM total_stay_time) / 60)::BIGINT || ' minutes'
                       AS total_stay_time
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_i32())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| statement_failed("find_by_id", e))?;

        Ok(row.into())
    }

    async fn find_by_barcode(&self, barcode: &str) -> Result<User, DomainError> {
        tracing::debug!(barcode, "fetching user by barcode");

        let row: UserRow = sqlx::query_as(
            r#"
            SELECT id, name, description, barcode, contact, remaining_entries,
                   registered_at::timestamptz AS registered_at, total_entries,
                   FLOOR(EXTRACT(EPOCH FROM total_stay_time) / 60)::BIGINT || ' minutes'
                       AS total_stay_time
            FROM users
            WHERE barcode = $1
            "#,
        )
        .bind(barcode)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| statement_failed("find_by_barcode", e))?;

        Ok(row.into())
    }

    async fn create(&self, new_user: &NewUser) -> Result<User, DomainError> {
        let row: UserRow = sqlx::query_as(
            r#"
            INSERT INTO users (
                name, description, barcode, contact, remaining_entries, total_entries
            ) VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, description, barcode, contact, remaining_entries,
                      registered_at::timestamptz AS registered_at, total_entries,
                      FLOOR(EXTRACT(EPOCH FROM total_stay_time) / 60)::BIGINT || ' minutes'
                          AS total_stay_time
            "#,
        )
        .bind(&new_user.name)
        .bind(&new_user.description)
        .bind(&new_user.barcode)
        .bind(&new_user.contact)
        .bind(new_user.remaining_entries)
        .bind(new_user.total_entries)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| statement_failed("create", e))?;

        tracing::debug!(user_id = row.id, barcode = %row.barcode, "registered user");
        Ok(row.into())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        tracing::debug!(user_id = %user.id, "updating user");

        sqlx::query(
            r#"
            UPDATE users SET
                name = $1,
                description = $2,
                barcode = $3,
                contact = $4,
                remaining_entries = $5,
                total_entries = $6
            WHERE id = $7
            "#,
        )
        .bind(&user.name)
        .bind(&user.description)
        .bind(&user.barcode)
        .bind(&user.contact)
        .bind(user.remaining_entries)
        .bind(user.total_entries)
        .bind(user.id.as_i32())
        .execute(&self.pool)
        .await
        .map_err(|e| statement_failed("update", e))?;

        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<(), DomainError> {
        tracing::debug!(user_id = %id, "deleting user");

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_i32())
            .execute(&self.pool)
            .await
            .map_err(|e| statement_failed("delete", e))?;

        Ok(())
    }

    async fn decrease_remaining_entries(
        &self,
        id: UserId,
        count: i32,
    ) -> Result<EntryCountChange, DomainError> {
        let (before, after): (i32, i32) = sqlx::query_as(
            r#"
            UPDATE users
            SET remaining_entries = remaining_entries - $1
            WHERE id = $2
            RETURNING remaining_entries + $1, remaining_entries
            "#,
        )
        .bind(count)
        .bind(id.as_i32())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| statement_failed("decrease_remaining_entries", e))?;

        tracing::debug!(user_id = %id, count, before, after, "decreased remaining entries");
        Ok(EntryCountChange::new(before, after))
    }

    async fn increase_remaining_entries(
        &self,
        id: UserId,
        count: i32,
    ) -> Result<EntryCountChange, DomainError> {
        let (before, after): (i32, i32) = sqlx::query_as(
            r#"
            UPDATE users
            SET remaining_entries = remaining_entries + $1
            WHERE id = $2
            RETURNING remaining_entries - $1, remaining_entries
            "#,
        )
        .bind(count)
        .bind(id.as_i32())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| statement_failed("increase_remaining_entries", e))?;

        tracing::debug!(user_id = %id, count, before, after, "increased remaining entries");
        Ok(EntryCountChange::new(before, after))
    }

    async fn increase_total_entries(&self, id: UserId) -> Result<(), DomainError> {
        tracing::debug!(user_id = %id, "increasing total entries");

        sqlx::query("UPDATE users SET total_entries = total_entries + 1 WHERE id = $1")
            .bind(id.as_i32())
            .execute(&self.pool)
            .await
            .map_err(|e| statement_failed("increase_total_entries", e))?;

        Ok(())
    }

    async fn add_total_stay_time(&self, id: UserId, stay: Duration) -> Result<(), DomainError> {
        let interval = StayTime::from_duration(stay).to_interval();
        tracing::debug!(user_id = %id, %interval, "adding stay time");

        sqlx::query(
            r#"
            UPDATE users
            SET total_stay_time = COALESCE(total_stay_time, INTERVAL '0 minutes') + $1::interval
            WHERE id = $2
            "#,
        )
        .bind(interval)
        .bind(id.as_i32())
        .execute(&self.pool)
        .await
        .map_err(|e| statement_failed("add_total_stay_time", e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    fn test_row(total_stay_time: Option<&str>) -> UserRow {
        UserRow {
            id: 12,
            name: "Hanako".to_string(),
            description: "weekday member".to_string(),
            barcode: "JH-0012".to_string(),
            contact: "hanako@example.com".to_string(),
            remaining_entries: -1,
            registered_at: DateTime::parse_from_rfc3339("2024-04-01T09:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            total_entries: 31,
            total_stay_time: total_stay_time.map(str::to_string),
        }
    }

    #[test]
    fn row_converts_to_user() {
        let user = User::from(test_row(Some("125 minutes")));

        assert_eq!(user.id, UserId::new(12));
        assert_eq!(user.barcode, "JH-0012");
        assert_eq!(user.remaining_entries, -1);
        assert_eq!(user.total_entries, 31);
        assert_eq!(user.total_stay_time, StayTime::from_minutes(125));
        assert_eq!(user.registered_at.to_string(), "2024-04-01T09:00:00+00:00");
    }

    #[test]
    fn null_stay_time_converts_to_zero() {
        let user = User::from(test_row(None));
        assert_eq!(user.total_stay_time, StayTime::ZERO);
    }

    #[test]
    fn statement_failure_keeps_driver_message() {
        let err = statement_failed("find_by_id", sqlx::Error::RowNotFound);
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.message, sqlx::Error::RowNotFound.to_string());
    }
}
