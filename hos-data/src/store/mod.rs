//! Durable [`hos_core::ScheduleStore`] implementations.

mod sqlite;

pub use sqlite::{ScheduleStoreError, SqliteScheduleStore};
