//! Daily log records: duty-status intervals and per-day totals.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::NaiveDate;
use thiserror::Error;

use crate::rules::{as_hours, format_clock};

/// One of the four duty statuses recorded on a driver's log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DutyStatus {
    /// Off duty.
    OffDuty,
    /// Resting in the sleeper berth.
    SleeperBerth,
    /// Driving.
    Driving,
    /// On duty, not driving.
    OnDutyNotDriving,
}

impl DutyStatus {
    /// All statuses in log-grid row order.
    pub const ALL: [Self; 4] = [
        Self::OffDuty,
        Self::SleeperBerth,
        Self::Driving,
        Self::OnDutyNotDriving,
    ];

    /// Stable identifier used for storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OffDuty => "off_duty",
            Self::SleeperBerth => "sleeper_berth",
            Self::Driving => "driving",
            Self::OnDutyNotDriving => "on_duty_not_driving",
        }
    }

    /// Label printed on the log grid.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::OffDuty => "Off Duty",
            Self::SleeperBerth => "Sleeper Berth",
            Self::Driving => "Driving",
            Self::OnDutyNotDriving => "On Duty (Not Driving)",
        }
    }
}

impl fmt::Display for DutyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown duty status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown duty status {0:?}")]
pub struct ParseDutyStatusError(pub String);

impl FromStr for DutyStatus {
    type Err = ParseDutyStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseDutyStatusError(s.to_owned()))
    }
}

/// A span of the day spent in a single duty status.
///
/// `start` and `end` are offsets from midnight; `end` may equal 24 hours.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DutyInterval {
    /// Status held for the whole span.
    pub duty_status: DutyStatus,
    /// Offset from midnight at which the span starts.
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_hours"))]
    pub start: Duration,
    /// Offset from midnight at which the span ends.
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_hours"))]
    pub end: Duration,
    /// Where the driver was.
    pub location: String,
    /// Free-text remarks.
    pub remarks: String,
}

impl DutyInterval {
    /// Length of the span.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.end.saturating_sub(self.start)
    }

    /// Start time formatted as `HH:MM`.
    #[must_use]
    pub fn start_time(&self) -> String {
        format_clock(self.start)
    }

    /// End time formatted as `HH:MM`.
    #[must_use]
    pub fn end_time(&self) -> String {
        format_clock(self.end)
    }
}

/// Hours per duty status and miles driven on one day.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DailyTotals {
    /// Time off duty.
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_hours"))]
    pub off_duty: Duration,
    /// Time in the sleeper berth.
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_hours"))]
    pub sleeper_berth: Duration,
    /// Time driving.
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_hours"))]
    pub driving: Duration,
    /// Time on duty, not driving.
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_hours"))]
    pub on_duty_not_driving: Duration,
    /// Miles driven.
    pub total_miles: f64,
}

impl DailyTotals {
    /// Sum the intervals of a day by status.
    #[must_use]
    pub fn from_intervals(intervals: &[DutyInterval], total_miles: f64) -> Self {
        intervals.iter().fold(
            Self {
                total_miles,
                ..Self::default()
            },
            |mut totals, interval| {
                *totals.slot_mut(interval.duty_status) += interval.duration();
                totals
            },
        )
    }

    /// Time recorded against `status`.
    #[must_use]
    pub const fn for_status(&self, status: DutyStatus) -> Duration {
        match status {
            DutyStatus::OffDuty => self.off_duty,
            DutyStatus::SleeperBerth => self.sleeper_berth,
            DutyStatus::Driving => self.driving,
            DutyStatus::OnDutyNotDriving => self.on_duty_not_driving,
        }
    }

    /// Hours recorded against `status`.
    #[must_use]
    pub fn hours(&self, status: DutyStatus) -> f64 {
        as_hours(self.for_status(status))
    }

    /// Driving plus on-duty-not-driving time.
    #[must_use]
    pub fn on_duty(&self) -> Duration {
        self.driving + self.on_duty_not_driving
    }

    /// Time accounted for across all statuses.
    #[must_use]
    pub fn recorded(&self) -> Duration {
        DutyStatus::ALL
            .into_iter()
            .map(|status| self.for_status(status))
            .sum()
    }

    const fn slot_mut(&mut self, status: DutyStatus) -> &mut Duration {
        match status {
            DutyStatus::OffDuty => &mut self.off_duty,
            DutyStatus::SleeperBerth => &mut self.sleeper_berth,
            DutyStatus::Driving => &mut self.driving,
            DutyStatus::OnDutyNotDriving => &mut self.on_duty_not_driving,
        }
    }
}

/// A driver's log for one calendar day of the trip.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DailyLog {
    /// Calendar date.
    pub date: NaiveDate,
    /// Day of the trip, starting at 1.
    pub day_number: u32,
    /// Ordered, non-overlapping intervals.
    pub entries: Vec<DutyInterval>,
    /// Totals derived from `entries`.
    pub totals: DailyTotals,
    /// Hours counted against the 70-hour cycle at the end of the day.
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_hours"))]
    pub cycle_hours: Duration,
}

impl DailyLog {
    /// Whether the intervals are ordered, contiguous and within the day.
    #[must_use]
    pub fn is_contiguous(&self) -> bool {
        let within_day = self
            .entries
            .iter()
            .all(|entry| entry.start <= entry.end && entry.end <= crate::rules::DAY);
        let joined = self
            .entries
            .windows(2)
            .all(|pair| matches!(pair, [a, b] if a.end == b.start));
        within_day && joined
    }
}
