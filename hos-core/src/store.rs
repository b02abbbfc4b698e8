//! Persistence of planned trips and their daily logs.
//!
//! Logs are keyed by trip and calendar date; saving a log for a key that
//! already exists replaces it.

use chrono::NaiveDate;

use crate::{DailyLog, PlannedTrip, TripId};

/// Durable storage for trips and day-ordered daily logs.
pub trait ScheduleStore {
    /// Error raised by the backing store.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Store `trip` and its `logs`, replacing any earlier records with the
    /// same trip id and dates.
    ///
    /// # Errors
    ///
    /// Returns the store's error when the write fails; no partial write is
    /// left behind.
    fn save_plan(&mut self, trip: &PlannedTrip, logs: &[DailyLog]) -> Result<(), Self::Error>;

    /// Load one trip.
    ///
    /// # Errors
    ///
    /// Returns the store's error when the read fails.
    fn trip(&self, id: TripId) -> Result<Option<PlannedTrip>, Self::Error>;

    /// All trips, newest first.
    ///
    /// # Errors
    ///
    /// Returns the store's error when the read fails.
    fn trips(&self) -> Result<Vec<PlannedTrip>, Self::Error>;

    /// Logs of one trip in date order.
    ///
    /// # Errors
    ///
    /// Returns the store's error when the read fails.
    fn daily_logs(&self, id: TripId) -> Result<Vec<DailyLog>, Self::Error>;

    /// The log for `date` of trip `id`, if any.
    ///
    /// # Errors
    ///
    /// Returns the store's error when the read fails.
    fn daily_log(&self, id: TripId, date: NaiveDate) -> Result<Option<DailyLog>, Self::Error> {
        Ok(self
            .daily_logs(id)?
            .into_iter()
            .find(|log| log.date == date))
    }
}
