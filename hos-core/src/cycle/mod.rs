//! Day-by-day simulation of driving against the daily and cycle limits.
//!
//! The simulator splits a trip's total driving time into duty days. Each
//! day drives as much as the 11-hour cap, the 14-hour window and the hours
//! left in the 70-hour cycle allow, after reserving the daily non-driving
//! overhead. When the cycle leaves no room for a productive day, the driver
//! takes a full rest day instead and no driving is consumed.
//!
//! The loop is bounded by [`HosRules::max_simulated_days`]; exceeding it
//! yields [`ScheduleError::SchedulingOverrun`].

mod ledger;

use std::time::Duration;

use log::debug;

use crate::{HosRules, ScheduleError};

use ledger::CycleLedger;

/// Why a daily rest period was inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RestReason {
    /// The duty day ended with driving still to do.
    EndOfDutyDay,
    /// The cycle had no room for a duty day.
    CycleRecovery,
}

impl RestReason {
    /// Remark recorded against the rest period.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::EndOfDutyDay => "Daily rest period - HOS compliance",
            Self::CycleRecovery => "Cycle recovery rest - no duty hours available",
        }
    }
}

/// The boundary between two duty days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DailyRestPeriod {
    /// Day the rest follows, numbered from 1.
    pub day: u32,
    /// Length of the rest.
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_hours"))]
    pub duration: Duration,
    /// Why the rest was taken.
    pub reason: RestReason,
    /// Driving done on `day`, absent for cycle recovery days.
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_hours::option", default))]
    pub drive_time_today: Option<Duration>,
    /// Duty done on `day`, absent for cycle recovery days.
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_hours::option", default))]
    pub duty_time_today: Option<Duration>,
    /// Cycle hours counted at the end of `day`.
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_hours"))]
    pub cumulative_cycle_hours: Duration,
}

/// Work performed on one simulated day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DutyDay {
    /// Day number, starting at 1.
    pub day: u32,
    /// Driving on this day.
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_hours"))]
    pub drive_time: Duration,
    /// Driving plus non-driving duty on this day.
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_hours"))]
    pub duty_time: Duration,
    /// Hours counted against the cycle at the end of the day.
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_hours"))]
    pub cycle_hours: Duration,
}

impl DutyDay {
    /// Whether the day was spent entirely off duty.
    #[must_use]
    pub const fn is_rest_day(&self) -> bool {
        self.duty_time.is_zero()
    }

    /// Non-driving duty on this day.
    #[must_use]
    pub const fn on_duty_not_driving(&self) -> Duration {
        self.duty_time.saturating_sub(self.drive_time)
    }
}

/// Result of simulating a trip's driving across days.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleSimulation {
    /// Every simulated day in order, including cycle recovery days.
    pub days: Vec<DutyDay>,
    /// Rest periods between consecutive days.
    pub rest_periods: Vec<DailyRestPeriod>,
}

impl CycleSimulation {
    /// Total driving across all days.
    #[must_use]
    pub fn total_drive_time(&self) -> Duration {
        self.days.iter().map(|day| day.drive_time).sum()
    }
}

/// Partition `total_drive_time` into duty days starting from
/// `cycle_hours_used` hours already spent in the cycle.
///
/// A trip without driving produces no days and no rest periods.
///
/// # Errors
///
/// Returns [`ScheduleError::SchedulingOverrun`] when the trip cannot be
/// finished within [`HosRules::max_simulated_days`].
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use hos_core::{HosRules, simulate_daily_cycle};
///
/// let hour = Duration::from_secs(3_600);
/// let sim = simulate_daily_cycle(hour * 20, Duration::ZERO, &HosRules::default())?;
/// let drives: Vec<_> = sim.days.iter().map(|d| d.drive_time).collect();
/// assert_eq!(drives, vec![hour * 11, hour * 9]);
/// assert_eq!(sim.rest_periods.len(), 1);
/// # Ok::<(), hos_core::ScheduleError>(())
/// ```
pub fn simulate_daily_cycle(
    total_drive_time: Duration,
    cycle_hours_used: Duration,
    rules: &HosRules,
) -> Result<CycleSimulation, ScheduleError> {
    let mut ledger = CycleLedger::new(rules.cycle_model, cycle_hours_used);
    let mut simulation = CycleSimulation::default();
    let mut remaining = total_drive_time;
    let mut day: u32 = 1;
    let overhead = rules.daily_non_drive_overhead;

    while !remaining.is_zero() {
        if day > rules.max_simulated_days {
            return Err(ScheduleError::SchedulingOverrun {
                days: rules.max_simulated_days,
            });
        }

        let used = ledger.used();
        let available = rules.max_cycle.saturating_sub(used);
        let max_duty_today = rules.max_duty_window.min(available);
        let max_drive_today = rules.max_driving_per_day.min(remaining);

        if max_duty_today <= overhead {
            debug!("day {day}: cycle exhausted ({used:?} used), resting");
            simulation.rest_periods.push(DailyRestPeriod {
                day,
                duration: rules.min_off_duty,
                reason: RestReason::CycleRecovery,
                drive_time_today: None,
                duty_time_today: None,
                cumulative_cycle_hours: used,
            });
            simulation.days.push(DutyDay {
                day,
                drive_time: Duration::ZERO,
                duty_time: Duration::ZERO,
                cycle_hours: used,
            });
            ledger.record_rest_day();
            day += 1;
            continue;
        }

        let drive_today = max_drive_today.min(max_duty_today - overhead);
        let duty_today = drive_today + overhead;
        remaining -= drive_today;
        let cycle_hours = used + duty_today;
        ledger.record_duty_day(duty_today);
        debug!("day {day}: drive {drive_today:?}, duty {duty_today:?}, {remaining:?} left");

        if !remaining.is_zero() {
            simulation.rest_periods.push(DailyRestPeriod {
                day,
                duration: rules.min_off_duty,
                reason: RestReason::EndOfDutyDay,
                drive_time_today: Some(drive_today),
                duty_time_today: Some(duty_today),
                cumulative_cycle_hours: cycle_hours,
            });
        }
        simulation.days.push(DutyDay {
            day,
            drive_time: drive_today,
            duty_time: duty_today,
            cycle_hours,
        });
        day += 1;
    }

    Ok(simulation)
}
