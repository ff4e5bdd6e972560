//! Before/after pair reported by remaining-entries updates.

use serde::{Deserialize, Serialize};

/// Remaining-entries value immediately before and after a single update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryCountChange {
    pub before: i32,
    pub after: i32,
}

impl EntryCountChange {
    pub fn new(before: i32, after: i32) -> Self {
        Self { before, after }
    }

    /// Change from subtracting `count`, or `None` on integer overflow.
    pub fn decreased(before: i32, count: i32) -> Option<Self> {
        before.checked_sub(count).map(|after| Self { before, after })
    }

    /// Change from adding `count`, or `None` on integer overflow.
    pub fn increased(before: i32, count: i32) -> Option<Self> {
        before.checked_add(count).map(|after| Self { before, after })
    }

    /// Signed difference `after - before`.
    pub fn delta(&self) -> i64 {
        i64::from(self.after) - i64::from(self.before)
    }

    /// True when the update left the counter below zero.
    pub fn is_overdrawn(&self) -> bool {
        self.after < 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decrease_reports_before_and_after() {
        let change = EntryCountChange::decreased(5, 2).unwrap();
        assert_eq!(change, EntryCountChange::new(5, 3));
        assert_eq!(change.delta(), -2);
    }

    #[test]
    fn increase_reports_before_and_after() {
        let change = EntryCountChange::increased(3, 10).unwrap();
        assert_eq!(change, EntryCountChange::new(3, 13));
        assert_eq!(change.delta(), 10);
    }

    #[test]
    fn decrease_can_go_negative() {
        let change = EntryCountChange::decreased(1, 3).unwrap();
        assert_eq!(change.after, -2);
        assert!(change.is_overdrawn());
    }

    #[test]
    fn overflow_is_reported() {
        assert!(EntryCountChange::decreased(i32::MIN, 1).is_none());
        assert!(EntryCountChange::increased(i32::MAX, 1).is_none());
    }
}
