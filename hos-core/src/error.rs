//! Errors raised by the scheduler.

use thiserror::Error;

/// Errors returned by [`Scheduler::compute`](crate::Scheduler::compute).
///
/// Hours-of-Service breaches are never errors; they are reported through
/// [`Schedule::warnings`](crate::Schedule::warnings) and the compliance
/// report instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    /// A trip figure was negative or not a finite number.
    #[error("{field} must be a non-negative finite number, got {value}")]
    InvalidInput {
        /// Name of the offending input.
        field: &'static str,
        /// Value supplied by the caller.
        value: f64,
    },
    /// A trip figure was valid but too large to schedule.
    #[error("{field} of {value} is too large to schedule")]
    OutOfRange {
        /// Name of the offending input.
        field: &'static str,
        /// Value supplied by the caller.
        value: f64,
    },
    /// The daily-cycle simulation hit its day cap without finishing the trip.
    #[error("no compliant schedule found within {days} simulated days")]
    SchedulingOverrun {
        /// Number of days simulated before giving up.
        days: u32,
    },
    /// A day of the schedule falls outside the representable calendar.
    #[error("day {day} after {start} is outside the supported calendar")]
    DateOutOfRange {
        /// First day of the trip.
        start: chrono::NaiveDate,
        /// Day number that could not be dated.
        day: u32,
    },
}
