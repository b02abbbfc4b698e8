//! Assemble fuel stops, breaks and the daily-cycle simulation into a
//! [`Schedule`].
//!
//! [`Scheduler::compute`] is the single entry point. It simulates the duty
//! days first, so an unreachable schedule fails before any other work, then
//! derives stops and synthesises one [`DailyLog`] per simulated day.

mod assemble;

use std::time::Duration;

use chrono::NaiveDate;
use log::{debug, warn};

use crate::rules::{MAX_FUEL_STOPS, as_hours};
use crate::{
    DailyLog, DailyRestPeriod, FuelStop, HosRules, MandatoryBreak, ScheduleError, TripInput,
    fuel_stops, mandatory_breaks, simulate_daily_cycle,
};

/// Headline figures for a scheduled trip.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TripSummary {
    /// Distance in miles.
    pub total_distance: f64,
    /// Driving time.
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_hours"))]
    pub total_drive_time: Duration,
    /// Driving plus every fuel stop, break and rest period.
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_hours"))]
    pub estimated_total_time: Duration,
    /// Calendar days covered by the schedule.
    pub number_of_days: u32,
    /// Number of fuel stops.
    pub fuel_stops_count: usize,
    /// Number of mandatory breaks.
    pub mandatory_breaks_count: usize,
}

/// A complete, day-by-day duty schedule for one trip.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schedule {
    /// Headline figures.
    pub summary: TripSummary,
    /// One log per calendar day, in order.
    pub daily_logs: Vec<DailyLog>,
    /// Fuel stops by distance.
    pub fuel_stops: Vec<FuelStop>,
    /// Breaks by cumulative driving.
    pub mandatory_breaks: Vec<MandatoryBreak>,
    /// Rest periods between consecutive days.
    pub rest_periods: Vec<DailyRestPeriod>,
    /// Advisory, non-fatal warnings.
    pub warnings: Vec<String>,
}

/// Computes schedules under a fixed set of [`HosRules`].
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use hos_core::{Scheduler, TripInput};
///
/// let start = NaiveDate::from_ymd_opt(2024, 3, 4).expect("valid date");
/// let input = TripInput::new(1_100.0, 20.0, 0.0)?;
/// let schedule = Scheduler::default().compute(&input, start)?;
/// assert_eq!(schedule.summary.number_of_days, 2);
/// assert_eq!(schedule.fuel_stops.len(), 1);
/// assert_eq!(schedule.mandatory_breaks.len(), 2);
/// # Ok::<(), hos_core::ScheduleError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scheduler {
    rules: HosRules,
}

impl Scheduler {
    /// Create a scheduler applying `rules`.
    #[must_use]
    pub const fn new(rules: HosRules) -> Self {
        Self { rules }
    }

    /// Rules applied by this scheduler.
    #[must_use]
    pub const fn rules(&self) -> &HosRules {
        &self.rules
    }

    /// Schedule `input`, anchoring day 1 on `start_date`.
    ///
    /// The result depends only on the arguments; calling twice with the same
    /// input yields equal schedules.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::OutOfRange`] when the distance needs more
    /// than [`MAX_FUEL_STOPS`](crate::rules::MAX_FUEL_STOPS) fuel stops,
    /// [`ScheduleError::SchedulingOverrun`] when the driving cannot be
    /// completed within the simulation cap, and
    /// [`ScheduleError::DateOutOfRange`] when a day cannot be dated.
    pub fn compute(
        &self,
        input: &TripInput,
        start_date: NaiveDate,
    ) -> Result<Schedule, ScheduleError> {
        let rules = &self.rules;
        if rules.fuel_interval_miles > 0.0
            && input.total_distance() / rules.fuel_interval_miles > f64::from(MAX_FUEL_STOPS)
        {
            return Err(ScheduleError::OutOfRange {
                field: "total_distance",
                value: input.total_distance(),
            });
        }
        let simulation =
            simulate_daily_cycle(input.total_drive_time(), input.cycle_hours_used(), rules)?;
        let fuel = fuel_stops(input.total_distance(), rules);
        let breaks = mandatory_breaks(input.total_drive_time(), rules);
        let daily_logs = assemble::daily_logs(&simulation, input, rules, start_date)?;

        let stop_time: Duration = fuel
            .iter()
            .map(|stop| stop.duration)
            .chain(breaks.iter().map(|b| b.duration))
            .chain(simulation.rest_periods.iter().map(|r| r.duration))
            .sum();
        let estimated_total_time = input.total_drive_time() + stop_time;
        let number_of_days = simulation.days.last().map_or(1, |day| day.day);

        let mut warnings = Vec::new();
        if input.cycle_hours_used() + estimated_total_time > rules.max_cycle {
            let message = format!(
                "Trip may exceed {:.0}-hour cycle limit. Current: {:.1}h, Estimated additional: {:.1}h",
                as_hours(rules.max_cycle),
                as_hours(input.cycle_hours_used()),
                as_hours(estimated_total_time),
            );
            warn!("{message}");
            warnings.push(message);
        }
        debug!(
            "scheduled {:.1} mi over {number_of_days} day(s) with {} fuel stop(s) and {} break(s)",
            input.total_distance(),
            fuel.len(),
            breaks.len()
        );

        Ok(Schedule {
            summary: TripSummary {
                total_distance: input.total_distance(),
                total_drive_time: input.total_drive_time(),
                estimated_total_time,
                number_of_days,
                fuel_stops_count: fuel.len(),
                mandatory_breaks_count: breaks.len(),
            },
            daily_logs,
            fuel_stops: fuel,
            mandatory_breaks: breaks,
            rest_periods: simulation.rest_periods,
            warnings,
        })
    }
}

/// Schedule a trip under the default rules.
///
/// Distances are in miles; drive time and cycle usage in hours.
///
/// # Errors
///
/// Returns [`ScheduleError::InvalidInput`] for negative or non-finite
/// figures, plus the errors of [`Scheduler::compute`].
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use hos_core::compute_schedule;
///
/// let start = NaiveDate::from_ymd_opt(2024, 3, 4).expect("valid date");
/// let schedule = compute_schedule(0.0, 0.0, 0.0, start)?;
/// assert_eq!(schedule.summary.number_of_days, 1);
/// assert!(schedule.rest_periods.is_empty());
/// assert!(schedule.warnings.is_empty());
/// # Ok::<(), hos_core::ScheduleError>(())
/// ```
pub fn compute_schedule(
    total_distance: f64,
    total_drive_hours: f64,
    cycle_hours_used: f64,
    start_date: NaiveDate,
) -> Result<Schedule, ScheduleError> {
    let input = TripInput::new(total_distance, total_drive_hours, cycle_hours_used)?;
    Scheduler::default().compute(&input, start_date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DutyStatus;
    use rstest::{fixture, rstest};

    const HOUR: Duration = Duration::from_secs(3_600);

    #[fixture]
    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 4).expect("valid date")
    }

    #[rstest]
    fn empty_trip_has_one_quiet_day(start: NaiveDate) {
        let schedule = compute_schedule(0.0, 0.0, 0.0, start).expect("schedules");
        assert_eq!(schedule.summary.number_of_days, 1);
        assert_eq!(schedule.daily_logs.len(), 1);
        assert!(schedule.rest_periods.is_empty());
        assert!(schedule.warnings.is_empty());
        let log = schedule.daily_logs.first().expect("one log");
        assert_eq!(log.totals.driving, Duration::ZERO);
    }

    #[rstest]
    fn long_trip_gets_stops_breaks_and_rest(start: NaiveDate) {
        let schedule = compute_schedule(1_100.0, 20.0, 0.0, start).expect("schedules");
        assert_eq!(schedule.summary.fuel_stops_count, 1);
        assert_eq!(schedule.summary.mandatory_breaks_count, 2);
        assert!(schedule.summary.number_of_days >= 2);
        // 20h driving, 1h fuel, 2 x 0.5h breaks, one 10h rest.
        assert_eq!(schedule.summary.estimated_total_time, HOUR * 32);
        assert!(schedule.warnings.is_empty());
    }

    #[rstest]
    fn logs_are_dated_consecutively(start: NaiveDate) {
        let schedule = compute_schedule(2_000.0, 30.0, 0.0, start).expect("schedules");
        let dates: Vec<_> = schedule.daily_logs.iter().map(|log| log.date).collect();
        let expected: Vec<_> = start.iter_days().take(3).collect();
        assert_eq!(dates, expected);
        let numbers: Vec<_> = schedule.daily_logs.iter().map(|l| l.day_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[rstest]
    fn near_cycle_limit_warns(start: NaiveDate) {
        let schedule = compute_schedule(400.0, 8.0, 65.0, start).expect("schedules");
        assert_eq!(schedule.warnings.len(), 1);
        let warning = schedule.warnings.first().expect("warning");
        assert!(warning.starts_with("Trip may exceed 70-hour cycle limit. Current: 65.0h"));
    }

    #[rstest]
    fn driving_totals_match_trip(start: NaiveDate) {
        let schedule = compute_schedule(1_500.0, 27.25, 10.0, start).expect("schedules");
        let driven: Duration = schedule
            .daily_logs
            .iter()
            .map(|log| log.totals.for_status(DutyStatus::Driving))
            .sum();
        assert_eq!(driven, schedule.summary.total_drive_time);
        let miles: f64 = schedule.daily_logs.iter().map(|l| l.totals.total_miles).sum();
        assert!((miles - 1_500.0).abs() < 1e-6);
    }

    #[rstest]
    fn invalid_input_is_rejected(start: NaiveDate) {
        let err = compute_schedule(10.0, -1.0, 0.0, start).expect_err("negative drive time");
        assert!(matches!(
            err,
            ScheduleError::InvalidInput {
                field: "total_drive_time",
                ..
            }
        ));
    }

    #[rstest]
    fn absurd_distance_is_out_of_range(start: NaiveDate) {
        let err = compute_schedule(1e13, 10.0, 0.0, start).expect_err("too far to schedule");
        assert_eq!(
            err,
            ScheduleError::OutOfRange {
                field: "total_distance",
                value: 1e13,
            }
        );
    }

    #[rstest]
    fn cycle_recovery_days_keep_their_remark(start: NaiveDate) {
        let schedule = compute_schedule(600.0, 10.0, 65.0, start).expect("schedules");
        let rest_day = schedule
            .daily_logs
            .iter()
            .find(|log| log.day_number > 1 && log.totals.driving.is_zero())
            .expect("a recovery day");
        let remarks: Vec<_> = rest_day.entries.iter().map(|e| e.remarks.as_str()).collect();
        assert_eq!(
            remarks,
            vec!["Cycle recovery rest - no duty hours available"]
        );
    }

    #[rstest]
    fn schedules_are_reproducible(start: NaiveDate) {
        let first = compute_schedule(2_345.0, 41.5, 22.0, start).expect("schedules");
        let second = compute_schedule(2_345.0, 41.5, 22.0, start).expect("schedules");
        assert_eq!(first, second);
    }

    #[rstest]
    fn unreachable_schedule_overruns(start: NaiveDate) {
        let scheduler = Scheduler::new(HosRules::default().with_max_simulated_days(3));
        let input = TripInput::new(10.0, 1.0, 500.0).expect("valid input");
        let err = scheduler.compute(&input, start).expect_err("cannot recover");
        assert_eq!(err, ScheduleError::SchedulingOverrun { days: 3 });
    }
}
