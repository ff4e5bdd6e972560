//! In-Memory User Repository Adapter
//!
//! Keeps users in a map behind a lock. Behaves like the PostgreSQL adapter
//! where callers can observe it: reads and remaining-entries updates of an
//! unknown id fail with the driver's "no rows" error, plain writes to an
//! unknown id succeed, and stay time is stored after the same minute rounding.
//! Useful for testing and development.

use async_trait::async_trait;
use chrono::Duration;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::user::{EntryCountChange, NewUser, StayTime, User};
use crate::ports::UserRepository;

#[derive(Debug, Default)]
struct Table {
    users: HashMap<UserId, User>,
    last_id: i32,
}

/// In-memory storage for registered users
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    table: Arc<RwLock<Table>>,
}

impl InMemoryUserRepository {
    /// Create a new, empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored users
    pub async fn user_count(&self) -> usize {
        self.table.read().await.users.len()
    }
}

fn row_not_found() -> DomainError {
    DomainError::from(sqlx::Error::RowNotFound)
}

fn out_of_range(what: &str) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{} out of range", what))
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<User, DomainError> {
        let table = self.table.read().await;
        table.users.get(&id).cloned().ok_or_else(row_not_found)
    }

    async fn find_by_barcode(&self, barcode: &str) -> Result<User, DomainError> {
        let table = self.table.read().await;
        table
            .users
            .values()
            .filter(|u| u.barcode == barcode)
            .min_by_key(|u| u.id)
            .cloned()
            .ok_or_else(row_not_found)
    }

    async fn create(&self, new_user: &NewUser) -> Result<User, DomainError> {
        let mut table = self.table.write().await;
        let next = table
            .last_id
            .checked_add(1)
            .ok_or_else(|| out_of_range("integer"))?;
        table.last_id = next;

        let user = User::registered(UserId::new(next), new_user.clone(), Timestamp::now());
        table.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let mut table = self.table.write().await;
        if let Some(stored) = table.users.get_mut(&user.id) {
            stored.name = user.name.clone();
            stored.description = user.description.clone();
            stored.barcode = user.barcode.clone();
            stored.contact = user.contact.clone();
            stored.remaining_entries = user.remaining_entries;
            stored.total_entries = user.total_entries;
        }
        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<(), DomainError> {
        self.table.write().await.users.remove(&id);
        Ok(())
    }

    async fn decrease_remaining_entries(
        &self,
        id: UserId,
        count: i32,
    ) -> Result<EntryCountChange, DomainError> {
        let mut table = self.table.write().await;
        let user = table.users.get_mut(&id).ok_or_else(row_not_found)?;
        let change = EntryCountChange::decreased(user.remaining_entries, count)
            .ok_or_else(|| out_of_range("integer"))?;
        user.remaining_entries = change.after;
        Ok(change)
    }

    async fn increase_remaining_entries(
        &self,
        id: UserId,
        count: i32,
    ) -> Result<EntryCountChange, DomainError> {
        let mut table = self.table.write().await;
        let user = table.users.get_mut(&id).ok_or_else(row_not_found)?;
        let change = EntryCountChange::increased(user.remaining_entries, count)
            .ok_or_else(|| out_of_range("integer"))?;
        user.remaining_entries = change.after;
        Ok(change)
    }

    async fn increase_total_entries(&self, id: UserId) -> Result<(), DomainError> {
        let mut table = self.table.write().await;
        if let Some(user) = table.users.get_mut(&id) {
            user.total_entries = user
                .total_entries
                .checked_add(1)
                .ok_or_else(|| out_of_range("integer"))?;
        }
        Ok(())
    }

    async fn add_total_stay_time(&self, id: UserId, stay: Duration) -> Result<(), DomainError> {
        let interval = StayTime::from_duration(stay).to_interval();
        let added = StayTime::from_interval(Some(&interval));

        let mut table = self.table.write().await;
        if let Some(user) = table.users.get_mut(&id) {
            user.total_stay_time = user
                .total_stay_time
                .checked_add(&added)
                .ok_or_else(|| out_of_range("interval"))?;
        }
        Ok(())
    }
}
