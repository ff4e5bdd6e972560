//! The registered user record.

use crate::domain::foundation::{Timestamp, UserId};

use super::StayTime;

/// A registered user as stored in the `users` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub description: String,
    pub barcode: String,
    pub contact: String,
    /// Entries still available. Not floored at zero.
    pub remaining_entries: i32,
    pub registered_at: Timestamp,
    pub total_entries: i32,
    pub total_stay_time: StayTime,
}

impl User {
    /// Builds the stored record for a freshly inserted registration.
    pub fn registered(id: UserId, new_user: NewUser, registered_at: Timestamp) -> Self {
        Self {
            id,
            name: new_user.name,
            description: new_user.description,
            barcode: new_user.barcode,
            contact: new_user.contact,
            remaining_entries: new_user.remaining_entries,
            registered_at,
            total_entries: new_user.total_entries,
            total_stay_time: StayTime::ZERO,
        }
    }
}

/// Registration payload: the columns written on insert.
///
/// `id`, `registered_at` and `total_stay_time` come from column defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub description: String,
    pub barcode: String,
    pub contact: String,
    pub remaining_entries: i32,
    pub total_entries: i32,
}

impl NewUser {
    /// Starts a registration with empty descriptive fields and zeroed counters.
    pub fn new(name: impl Into<String>, barcode: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            barcode: barcode.into(),
            contact: String::new(),
            remaining_entries: 0,
            total_entries: 0,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = contact.into();
        self
    }

    pub fn with_remaining_entries(mut self, remaining_entries: i32) -> Self {
        self.remaining_entries = remaining_entries;
        self
    }

    pub fn with_total_entries(mut self, total_entries: i32) -> Self {
        self.total_entries = total_entries;
        self
    }
}
