//! Trip identity and the immutable input to a scheduling run.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::ScheduleError;
use crate::rules::{as_hours, checked_hours, hours};

/// Totals for a single trip, validated before simulation.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use hos_core::TripInput;
///
/// let input = TripInput::new(1_100.0, 20.0, 12.5)?;
/// assert_eq!(input.total_drive_time(), Duration::from_secs(20 * 3600));
/// assert!(TripInput::new(-1.0, 0.0, 0.0).is_err());
/// # Ok::<(), hos_core::ScheduleError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TripInput {
    total_distance: f64,
    total_drive_time: Duration,
    cycle_hours_used: Duration,
}

impl TripInput {
    /// Validate raw figures: miles, driving hours, and hours already used in
    /// the current 8-day cycle.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidInput`] when any figure is negative
    /// or not finite, and [`ScheduleError::OutOfRange`] when an hours figure
    /// is too large to represent.
    pub fn new(
        total_distance: f64,
        total_drive_hours: f64,
        cycle_hours_used: f64,
    ) -> Result<Self, ScheduleError> {
        let total_drive_time = checked_hours("total_drive_time", total_drive_hours)?;
        let cycle_used = checked_hours("cycle_hours_used", cycle_hours_used)?;
        Self::from_durations(total_distance, total_drive_time, cycle_used)
    }

    /// Build an input from routed durations, validating only the distance.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidInput`] when `total_distance` is
    /// negative or not finite.
    pub fn from_durations(
        total_distance: f64,
        total_drive_time: Duration,
        cycle_hours_used: Duration,
    ) -> Result<Self, ScheduleError> {
        if !(total_distance.is_finite() && total_distance >= 0.0) {
            return Err(ScheduleError::InvalidInput {
                field: "total_distance",
                value: total_distance,
            });
        }
        Ok(Self {
            total_distance,
            total_drive_time,
            cycle_hours_used,
        })
    }

    /// Total trip distance in miles.
    #[must_use]
    pub const fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Total driving time.
    #[must_use]
    pub const fn total_drive_time(&self) -> Duration {
        self.total_drive_time
    }

    /// Duty hours already consumed in the current cycle.
    #[must_use]
    pub const fn cycle_hours_used(&self) -> Duration {
        self.cycle_hours_used
    }
}

/// Identifier for a planned trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TripId(Uuid);

impl TripId {
    /// Generate a random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TripId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Persistent description of a planned trip.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlannedTrip {
    /// Trip identity.
    pub id: TripId,
    /// Where the driver starts.
    pub current_location: String,
    /// Where the load is collected.
    pub pickup_location: String,
    /// Where the load is delivered.
    pub dropoff_location: String,
    /// Hours already used in the current cycle when the trip was planned.
    pub current_cycle_used: f64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Routed distance in miles.
    pub total_distance: f64,
    /// Routed driving time in hours.
    pub estimated_drive_time: f64,
}

impl PlannedTrip {
    /// Estimated driving time as a [`Duration`], clamped to zero on bad data.
    #[must_use]
    pub fn drive_time(&self) -> Duration {
        hours(self.estimated_drive_time).unwrap_or_default()
    }
}

impl fmt::Display for PlannedTrip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Trip from {} to {} ({:.1} mi, {:.1} h)",
            self.pickup_location,
            self.dropoff_location,
            self.total_distance,
            as_hours(self.drive_time())
        )
    }
}
