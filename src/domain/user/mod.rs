//! User module - registered members of the entrance system.
//!
//! A user is identified by a store-assigned id and by the barcode on their
//! card. Each visit moves three counters:
//!
//! - **remaining entries** - decremented on entry, topped up on purchase;
//!   nothing stops it from going negative
//! - **total entries** - incremented once per entry
//! - **total stay time** - grows by the visit length, in whole minutes

mod entry_count;
mod record;
mod stay_time;

pub use entry_count::EntryCountChange;
pub use stay_time::StayTime;
pub use record::{NewUser, User};
