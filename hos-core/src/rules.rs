//! Hours-of-Service limits for property-carrying drivers on the 70-hour,
//! 8-day cycle.
//!
//! The constants mirror the federal limits. [`HosRules`] bundles them so a
//! [`Scheduler`](crate::Scheduler) can be configured without touching the
//! algorithm.

use std::time::Duration;

use crate::ScheduleError;

const SECS_PER_HOUR: u64 = 3_600;

/// Maximum driving time in a single duty day.
pub const MAX_DRIVING_HOURS_PER_DAY: Duration = Duration::from_secs(11 * SECS_PER_HOUR);
/// Maximum on-duty window (driving plus on duty, not driving) per day.
pub const MAX_DUTY_HOURS_WINDOW: Duration = Duration::from_secs(14 * SECS_PER_HOUR);
/// Maximum on-duty time in the rolling 8-day cycle.
pub const MAX_CYCLE_HOURS: Duration = Duration::from_secs(70 * SECS_PER_HOUR);
/// Minimum off-duty period between two duty days.
pub const MIN_OFF_DUTY_HOURS: Duration = Duration::from_secs(10 * SECS_PER_HOUR);
/// Cumulative driving after which a break is required.
pub const MANDATORY_BREAK_AFTER: Duration = Duration::from_secs(8 * SECS_PER_HOUR);
/// Length of the mandatory driving break.
pub const MANDATORY_BREAK_DURATION: Duration = Duration::from_secs(30 * 60);
/// Distance between fuel stops, in miles.
pub const FUEL_INTERVAL_MILES: f64 = 1_000.0;
/// Time spent at each fuel stop.
pub const FUEL_STOP_DURATION: Duration = Duration::from_secs(SECS_PER_HOUR);
/// Daily allowance for inspections, loading and other non-driving duty.
pub const DAILY_NON_DRIVE_OVERHEAD: Duration = Duration::from_secs(2 * SECS_PER_HOUR);
/// Clock time at which each day's driving starts.
pub const DRIVING_DAY_START: Duration = Duration::from_secs(6 * SECS_PER_HOUR);
/// Upper bound on simulated days before scheduling is abandoned.
pub const MAX_SIMULATED_DAYS: u32 = 8 * 365;
/// Upper bound on fuel stops in one schedule.
pub const MAX_FUEL_STOPS: u32 = 100_000;
/// Length of a calendar day.
pub const DAY: Duration = Duration::from_secs(24 * SECS_PER_HOUR);

/// How cycle hours recover while the driver is off duty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CycleModel {
    /// Every forced rest day drops a flat 24 hours from the cycle total.
    #[default]
    FlatDropOff,
    /// The cycle total is the sum of the trailing seven days' duty time.
    RollingWindow,
}

/// Regulatory limits and planning allowances used by the scheduler.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use hos_core::{CycleModel, HosRules};
///
/// let rules = HosRules::default().with_cycle_model(CycleModel::RollingWindow);
/// assert_eq!(rules.max_driving_per_day, Duration::from_secs(11 * 3600));
/// assert_eq!(rules.cycle_model, CycleModel::RollingWindow);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HosRules {
    /// Driving cap per duty day.
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_hours"))]
    pub max_driving_per_day: Duration,
    /// Duty window per duty day.
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_hours"))]
    pub max_duty_window: Duration,
    /// Cycle cap over the 8-day window.
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_hours"))]
    pub max_cycle: Duration,
    /// Rest required between duty days.
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_hours"))]
    pub min_off_duty: Duration,
    /// Driving hours between mandatory breaks.
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_hours"))]
    pub break_after: Duration,
    /// Length of each mandatory break.
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_hours"))]
    pub break_duration: Duration,
    /// Miles between fuel stops.
    pub fuel_interval_miles: f64,
    /// Time spent fuelling.
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_hours"))]
    pub fuel_stop_duration: Duration,
    /// Non-driving duty reserved each day.
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_hours"))]
    pub daily_non_drive_overhead: Duration,
    /// Offset from midnight at which driving begins.
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_hours"))]
    pub day_start: Duration,
    /// Simulation cap in days.
    pub max_simulated_days: u32,
    /// Cycle recovery model.
    pub cycle_model: CycleModel,
}

impl Default for HosRules {
    fn default() -> Self {
        Self {
            max_driving_per_day: MAX_DRIVING_HOURS_PER_DAY,
            max_duty_window: MAX_DUTY_HOURS_WINDOW,
            max_cycle: MAX_CYCLE_HOURS,
            min_off_duty: MIN_OFF_DUTY_HOURS,
            break_after: MANDATORY_BREAK_AFTER,
            break_duration: MANDATORY_BREAK_DURATION,
            fuel_interval_miles: FUEL_INTERVAL_MILES,
            fuel_stop_duration: FUEL_STOP_DURATION,
            daily_non_drive_overhead: DAILY_NON_DRIVE_OVERHEAD,
            day_start: DRIVING_DAY_START,
            max_simulated_days: MAX_SIMULATED_DAYS,
            cycle_model: CycleModel::FlatDropOff,
        }
    }
}

impl HosRules {
    /// Select the cycle recovery model.
    #[must_use]
    pub const fn with_cycle_model(mut self, cycle_model: CycleModel) -> Self {
        self.cycle_model = cycle_model;
        self
    }

    /// Override the simulation cap.
    #[must_use]
    pub const fn with_max_simulated_days(mut self, days: u32) -> Self {
        self.max_simulated_days = days;
        self
    }
}

/// Convert fractional hours into a [`Duration`].
///
/// Returns `None` for negative, non-finite or out-of-range input.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use hos_core::rules::hours;
///
/// assert_eq!(hours(1.5), Some(Duration::from_secs(5_400)));
/// assert_eq!(hours(-1.0), None);
/// ```
#[must_use]
pub fn hours(value: f64) -> Option<Duration> {
    if value.is_finite() && value >= 0.0 {
        Duration::try_from_secs_f64(value * 3_600.0).ok()
    } else {
        None
    }
}

/// Express a [`Duration`] in fractional hours.
#[must_use]
pub fn as_hours(duration: Duration) -> f64 {
    duration.as_secs_f64() / 3_600.0
}

/// Convert an hours figure named `field`, telling invalid input apart from
/// values too large for a [`Duration`].
pub(crate) fn checked_hours(field: &'static str, value: f64) -> Result<Duration, ScheduleError> {
    if !(value.is_finite() && value >= 0.0) {
        return Err(ScheduleError::InvalidInput { field, value });
    }
    hours(value).ok_or(ScheduleError::OutOfRange { field, value })
}

/// Format an offset from midnight as `HH:MM`, truncating seconds.
///
/// The end of the day formats as `24:00`.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use hos_core::rules::format_clock;
///
/// assert_eq!(format_clock(Duration::from_secs(6 * 3600 + 30 * 60)), "06:30");
/// assert_eq!(format_clock(Duration::from_secs(24 * 3600)), "24:00");
/// ```
#[must_use]
pub fn format_clock(offset: Duration) -> String {
    let minutes = offset.as_secs().div_euclid(60);
    format!("{:02}:{:02}", minutes.div_euclid(60), minutes.rem_euclid(60))
}
