//! Turn simulated duty days into clock-time daily logs.

use std::time::Duration;

use chrono::{Days, NaiveDate};

use crate::rules::DAY;
use crate::{
    CycleSimulation, DailyLog, DailyTotals, DutyDay, DutyInterval, DutyStatus, HosRules,
    RestReason, ScheduleError, TripInput,
};

const EN_ROUTE: &str = "En Route";
const REST_AREA: &str = "Rest Area";

/// Build one log per simulated day, or a single idle log when the trip has
/// no driving.
pub(super) fn daily_logs(
    simulation: &CycleSimulation,
    input: &TripInput,
    rules: &HosRules,
    start: NaiveDate,
) -> Result<Vec<DailyLog>, ScheduleError> {
    if simulation.days.is_empty() {
        let idle = DutyDay {
            day: 1,
            drive_time: Duration::ZERO,
            duty_time: Duration::ZERO,
            cycle_hours: input.cycle_hours_used(),
        };
        return day_log(&idle, input, rules, start, "No driving scheduled").map(|log| vec![log]);
    }
    simulation
        .days
        .iter()
        .map(|day| {
            day_log(
                day,
                input,
                rules,
                start,
                RestReason::CycleRecovery.description(),
            )
        })
        .collect()
}

fn day_log(
    day: &DutyDay,
    input: &TripInput,
    rules: &HosRules,
    start: NaiveDate,
    idle_remark: &str,
) -> Result<DailyLog, ScheduleError> {
    let date = start
        .checked_add_days(Days::new(u64::from(day.day.saturating_sub(1))))
        .ok_or(ScheduleError::DateOutOfRange {
            start,
            day: day.day,
        })?;
    let entries = intervals(day, rules, idle_remark);
    let totals = DailyTotals::from_intervals(&entries, apportion_miles(input, day.drive_time));
    Ok(DailyLog {
        date,
        day_number: day.day,
        entries,
        totals,
        cycle_hours: day.cycle_hours,
    })
}

/// Share of the trip distance covered by `drive_time`.
fn apportion_miles(input: &TripInput, drive_time: Duration) -> f64 {
    let total = input.total_drive_time();
    if total.is_zero() {
        return 0.0;
    }
    input.total_distance() * (drive_time.as_secs_f64() / total.as_secs_f64())
}

/// Lay out a day: prior rest until the anchor, driving, the non-driving
/// overhead, then off duty to midnight. Day 1 starts at the anchor.
fn intervals(day: &DutyDay, rules: &HosRules, idle_remark: &str) -> Vec<DutyInterval> {
    let anchor = rules.day_start.min(DAY);
    let day_open = if day.day > 1 { Duration::ZERO } else { anchor };
    let mut timeline = Timeline::default();
    if day.is_rest_day() {
        timeline.push(DutyStatus::OffDuty, day_open, DAY, REST_AREA, idle_remark);
        return timeline.into_entries();
    }
    timeline.push(
        DutyStatus::OffDuty,
        day_open,
        anchor,
        REST_AREA,
        RestReason::EndOfDutyDay.description(),
    );

    let drive_end = (anchor + day.drive_time).min(DAY);
    let duty_end = (anchor + day.duty_time).min(DAY);
    timeline.push(
        DutyStatus::Driving,
        anchor,
        drive_end,
        EN_ROUTE,
        "Driving to destination",
    );
    timeline.push(
        DutyStatus::OnDutyNotDriving,
        drive_end,
        duty_end,
        EN_ROUTE,
        "Inspection, fuelling and paperwork",
    );
    timeline.push(
        DutyStatus::OffDuty,
        duty_end,
        DAY,
        REST_AREA,
        "Daily rest period",
    );
    timeline.into_entries()
}

/// Ordered interval builder that drops empty spans and merges neighbours
/// sharing a status and remark.
#[derive(Default)]
struct Timeline {
    entries: Vec<DutyInterval>,
}

impl Timeline {
    fn push(
        &mut self,
        duty_status: DutyStatus,
        start: Duration,
        end: Duration,
        location: &str,
        remarks: &str,
    ) {
        if end <= start {
            return;
        }
        if let Some(last) = self.entries.last_mut()
            && last.duty_status == duty_status
            && last.remarks == remarks
            && last.end == start
        {
            last.end = end;
            return;
        }
        self.entries.push(DutyInterval {
            duty_status,
            start,
            end,
            location: location.to_owned(),
            remarks: remarks.to_owned(),
        });
    }

    fn into_entries(self) -> Vec<DutyInterval> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    const HOUR: Duration = Duration::from_secs(3_600);

    #[fixture]
    fn rules() -> HosRules {
        HosRules::default()
    }

    fn driving_day(day: u32, drive: u32) -> DutyDay {
        DutyDay {
            day,
            drive_time: HOUR * drive,
            duty_time: HOUR * (drive + 2),
            cycle_hours: HOUR * (drive + 2),
        }
    }

    fn statuses(entries: &[DutyInterval]) -> Vec<(DutyStatus, u64, u64)> {
        entries
            .iter()
            .map(|e| (e.duty_status, e.start.as_secs() / 3_600, e.end.as_secs() / 3_600))
            .collect()
    }

    #[rstest]
    fn first_day_starts_at_the_anchor(rules: HosRules) {
        let entries = intervals(&driving_day(1, 11), &rules, "idle");
        assert_eq!(
            statuses(&entries),
            vec![
                (DutyStatus::Driving, 6, 17),
                (DutyStatus::OnDutyNotDriving, 17, 19),
                (DutyStatus::OffDuty, 19, 24),
            ]
        );
    }

    #[rstest]
    fn later_days_cover_the_whole_day(rules: HosRules) {
        let entries = intervals(&driving_day(2, 9), &rules, "idle");
        assert_eq!(
            statuses(&entries),
            vec![
                (DutyStatus::OffDuty, 0, 6),
                (DutyStatus::Driving, 6, 15),
                (DutyStatus::OnDutyNotDriving, 15, 17),
                (DutyStatus::OffDuty, 17, 24),
            ]
        );
        let totals = DailyTotals::from_intervals(&entries, 0.0);
        assert_eq!(totals.recorded(), DAY);
    }

    #[rstest]
    fn rest_days_merge_into_one_off_duty_span(rules: HosRules) {
        let rest = DutyDay {
            day: 3,
            drive_time: Duration::ZERO,
            duty_time: Duration::ZERO,
            cycle_hours: HOUR * 70,
        };
        let entries = intervals(&rest, &rules, "Cycle recovery");
        assert_eq!(statuses(&entries), vec![(DutyStatus::OffDuty, 0, 24)]);
        assert_eq!(
            entries.first().map(|e| e.remarks.as_str()),
            Some("Cycle recovery")
        );
    }

    #[rstest]
    fn idle_first_day_rests_from_the_anchor(rules: HosRules) {
        let rest = DutyDay {
            day: 1,
            drive_time: Duration::ZERO,
            duty_time: Duration::ZERO,
            cycle_hours: HOUR * 70,
        };
        let entries = intervals(&rest, &rules, "Cycle recovery");
        assert_eq!(statuses(&entries), vec![(DutyStatus::OffDuty, 6, 24)]);
    }

    #[rstest]
    fn neighbours_with_different_remarks_stay_apart() {
        let mut timeline = Timeline::default();
        timeline.push(DutyStatus::OffDuty, Duration::ZERO, HOUR * 6, REST_AREA, "Overnight");
        timeline.push(DutyStatus::OffDuty, HOUR * 6, HOUR * 8, REST_AREA, "Overnight");
        timeline.push(DutyStatus::OffDuty, HOUR * 8, DAY, REST_AREA, "Idle");
        let entries = timeline.into_entries();
        assert_eq!(
            statuses(&entries),
            vec![(DutyStatus::OffDuty, 0, 8), (DutyStatus::OffDuty, 8, 24)]
        );
    }

    #[rstest]
    fn miles_follow_the_share_of_driving() {
        let input = TripInput::new(1_000.0, 20.0, 0.0).expect("valid input");
        assert!((apportion_miles(&input, HOUR * 5) - 250.0).abs() < 1e-9);
        let idle = TripInput::new(0.0, 0.0, 0.0).expect("valid input");
        assert_eq!(apportion_miles(&idle, Duration::ZERO), 0.0);
    }
}
