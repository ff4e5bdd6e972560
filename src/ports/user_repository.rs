//! User repository port.
//!
//! Defines the contract for persisting registered users and moving their
//! usage counters. Every method maps to exactly one statement against the
//! store; nothing spans a transaction and nothing is retried.
//!
//! # Missing users
//!
//! Reads and remaining-entries updates fail when the id is unknown, with the
//! store's own error. Plain writes (`update`, `delete`, `increase_total_entries`,
//! `add_total_stay_time`) affect zero rows and succeed.
//!
//! # Example
//!
//! ```ignore
//! async fn admit(repo: &dyn UserRepository, barcode: &str) -> Result<EntryCountChange, DomainError> {
//!     let user = repo.find_by_barcode(barcode).await?;
//!     let change = repo.decrease_remaining_entries(user.id, 1).await?;
//!     repo.increase_total_entries(user.id).await?;
//!     Ok(change)
//! }
//! ```

use async_trait::async_trait;
use chrono::Duration;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::{EntryCountChange, NewUser, User};

/// Repository port for registered users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by id.
    ///
    /// # Errors
    ///
    /// `DatabaseError` on any failure, including an unknown id.
    async fn find_by_id(&self, id: UserId) -> Result<User, DomainError>;

    /// Find a user by card barcode.
    ///
    /// # Errors
    ///
    /// `DatabaseError` on any failure, including an unknown barcode.
    async fn find_by_barcode(&self, barcode: &str) -> Result<User, DomainError>;

    /// Insert a registration and return the stored user with its new id.
    async fn create(&self, new_user: &NewUser) -> Result<User, DomainError>;

    /// Overwrite the descriptive fields and entry counters of a user.
    ///
    /// `registered_at` and `total_stay_time` are never written.
    async fn update(&self, user: &User) -> Result<(), DomainError>;

    /// Remove a user.
    async fn delete(&self, id: UserId) -> Result<(), DomainError>;

    /// Subtract `count` from the remaining entries in one statement.
    ///
    /// The counter is not floored; it may become negative.
    async fn decrease_remaining_entries(
        &self,
        id: UserId,
        count: i32,
    ) -> Result<EntryCountChange, DomainError>;

    /// Add `count` to the remaining entries in one statement.
    async fn increase_remaining_entries(
        &self,
        id: UserId,
        count: i32,
    ) -> Result<EntryCountChange, DomainError>;

    /// Add one to the total entries.
    async fn increase_total_entries(&self, id: UserId) -> Result<(), DomainError>;

    /// Add a measured stay to the total stay time, rounded up to whole minutes.
    async fn add_total_stay_time(&self, id: UserId, stay: Duration) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn user_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn UserRepository) {}
    }
}
