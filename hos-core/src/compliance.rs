//! Advisory compliance checks over an assembled [`Schedule`].
//!
//! Violations never block a schedule; they are reported as data so callers
//! can show them next to the logs.

use std::fmt;

use crate::rules::as_hours;
use crate::{DailyLog, HosRules, Schedule};

/// The limit a violation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HosRule {
    /// 11 hours of driving per day.
    DrivingLimit,
    /// 14 hours of duty per day.
    DutyWindow,
    /// 70 hours of duty per 8-day cycle.
    CycleLimit,
}

impl fmt::Display for HosRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::DrivingLimit => "driving limit",
            Self::DutyWindow => "duty window",
            Self::CycleLimit => "cycle limit",
        })
    }
}

/// A single breach found on one day.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Violation {
    /// Day number of the offending log.
    pub day: u32,
    /// Limit that was exceeded.
    pub rule: HosRule,
    /// Human-readable description.
    pub message: String,
}

/// Ordered violations for a schedule; empty means compliant.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use hos_core::{ComplianceReport, HosRules, compute_schedule};
///
/// let start = NaiveDate::from_ymd_opt(2024, 3, 4).expect("valid date");
/// let schedule = compute_schedule(1_100.0, 20.0, 0.0, start)?;
/// let report = ComplianceReport::check(&schedule, &HosRules::default());
/// assert!(report.is_compliant());
/// # Ok::<(), hos_core::ScheduleError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComplianceReport {
    /// Violations in day order.
    pub violations: Vec<Violation>,
}

impl ComplianceReport {
    /// Check every daily log in `schedule` against `rules`.
    #[must_use]
    pub fn check(schedule: &Schedule, rules: &HosRules) -> Self {
        Self::check_logs(&schedule.daily_logs, rules)
    }

    /// Check a sequence of daily logs against `rules`.
    #[must_use]
    pub fn check_logs(logs: &[DailyLog], rules: &HosRules) -> Self {
        let violations = logs
            .iter()
            .flat_map(|log| day_violations(log, rules))
            .collect();
        Self { violations }
    }

    /// Whether no limit was exceeded.
    #[must_use]
    pub fn is_compliant(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violation messages in order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(|v| v.message.clone()).collect()
    }
}

fn day_violations(log: &DailyLog, rules: &HosRules) -> Vec<Violation> {
    let day = log.day_number;
    let mut found = Vec::new();
    let driving = log.totals.driving;
    if driving > rules.max_driving_per_day {
        found.push(Violation {
            day,
            rule: HosRule::DrivingLimit,
            message: format!(
                "Day {day}: Exceeds {:.0}-hour driving limit ({:.1} hours)",
                as_hours(rules.max_driving_per_day),
                as_hours(driving)
            ),
        });
    }
    let on_duty = log.totals.on_duty();
    if on_duty > rules.max_duty_window {
        found.push(Violation {
            day,
            rule: HosRule::DutyWindow,
            message: format!(
                "Day {day}: Exceeds {:.0}-hour duty window ({:.1} hours)",
                as_hours(rules.max_duty_window),
                as_hours(on_duty)
            ),
        });
    }
    if log.cycle_hours > rules.max_cycle {
        found.push(Violation {
            day,
            rule: HosRule::CycleLimit,
            message: format!(
                "Day {day}: Exceeds {:.0}-hour cycle limit ({:.1} hours)",
                as_hours(rules.max_cycle),
                as_hours(log.cycle_hours)
            ),
        });
    }
    found
}

/// Report daily driving and duty-window breaches under the default rules.
///
/// Returns one message per breach in day order; an empty list means the
/// schedule is compliant. Cycle breaches are only reported by
/// [`ComplianceReport`].
#[must_use]
pub fn validate_compliance(schedule: &Schedule) -> Vec<String> {
    ComplianceReport::check(schedule, &HosRules::default())
        .violations
        .into_iter()
        .filter(|v| v.rule != HosRule::CycleLimit)
        .map(|v| v.message)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DailyTotals, compute_schedule};
    use chrono::NaiveDate;
    use rstest::{fixture, rstest};
    use std::time::Duration;

    const HOUR: Duration = Duration::from_secs(3_600);

    #[fixture]
    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 4).expect("valid date")
    }

    fn log_with(day_number: u32, driving: u32, other: u32, cycle: u32) -> DailyLog {
        DailyLog {
            date: NaiveDate::from_ymd_opt(2024, 3, 4).expect("valid date"),
            day_number,
            entries: Vec::new(),
            totals: DailyTotals {
                driving: HOUR * driving,
                on_duty_not_driving: HOUR * other,
                ..DailyTotals::default()
            },
            cycle_hours: HOUR * cycle,
        }
    }

    #[rstest]
    fn generated_schedules_comply(start: NaiveDate) {
        let schedule = compute_schedule(3_000.0, 55.0, 30.0, start).expect("schedules");
        assert!(validate_compliance(&schedule).is_empty());
        assert!(ComplianceReport::check(&schedule, &HosRules::default()).is_compliant());
    }

    #[rstest]
    fn driving_and_duty_breaches_are_reported_in_order(start: NaiveDate) {
        let mut schedule = compute_schedule(0.0, 0.0, 0.0, start).expect("schedules");
        schedule.daily_logs = vec![log_with(1, 12, 3, 15), log_with(2, 10, 2, 27)];
        assert_eq!(
            validate_compliance(&schedule),
            vec![
                "Day 1: Exceeds 11-hour driving limit (12.0 hours)".to_owned(),
                "Day 1: Exceeds 14-hour duty window (15.0 hours)".to_owned(),
            ]
        );
    }

    #[rstest]
    fn cycle_breaches_appear_only_in_the_report() {
        let report = ComplianceReport::check_logs(&[log_with(1, 0, 0, 75)], &HosRules::default());
        let rules: Vec<_> = report.violations.iter().map(|v| v.rule).collect();
        assert_eq!(rules, vec![HosRule::CycleLimit]);
        assert_eq!(
            report.messages(),
            vec!["Day 1: Exceeds 70-hour cycle limit (75.0 hours)".to_owned()]
        );
    }

    #[rstest]
    fn starting_over_the_cycle_is_flagged(start: NaiveDate) {
        let schedule = compute_schedule(100.0, 2.0, 72.0, start).expect("schedules");
        let report = ComplianceReport::check(&schedule, &HosRules::default());
        assert!(!report.is_compliant());
        assert!(validate_compliance(&schedule).is_empty());
    }
}
