//! The 24-hour duty status grid.

use std::time::Duration;

use hos_core::{DailyLog, DutyInterval, DutyStatus};

const HOUR: Duration = Duration::from_secs(3_600);

/// Column headings, one per hour from midnight.
pub const HOUR_LABELS: [&str; 24] = [
    "Midnight", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "Noon", "13", "14", "15",
    "16", "17", "18", "19", "20", "21", "22", "23",
];

/// One duty status row of the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    /// Status recorded on this row.
    pub status: DutyStatus,
    /// One flag per hour; set when an interval of `status` overlaps it.
    pub cells: Vec<bool>,
    /// Hours recorded against `status` that day.
    pub total_hours: f64,
}

impl GridRow {
    fn build(status: DutyStatus, log: &DailyLog) -> Self {
        let cells = (0..24)
            .map(|hour| {
                let from = HOUR * hour;
                let to = from + HOUR;
                log.entries
                    .iter()
                    .any(|entry| entry.duty_status == status && overlaps(entry, from, to))
            })
            .collect();
        Self {
            status,
            cells,
            total_hours: log.totals.hours(status),
        }
    }

    /// Whether `hour` (0 to 23) is marked.
    #[must_use]
    pub fn is_marked(&self, hour: usize) -> bool {
        self.cells.get(hour).copied().unwrap_or(false)
    }
}

const fn overlaps(entry: &DutyInterval, from: Duration, to: Duration) -> bool {
    entry.start.as_nanos() < to.as_nanos() && entry.end.as_nanos() > from.as_nanos()
}

/// Four rows, in [`DutyStatus::ALL`] order.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use hos_core::{DutyStatus, compute_schedule};
/// use hos_render::LogGrid;
///
/// let start = NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date");
/// let schedule = compute_schedule(550.0, 11.0, 0.0, start)?;
/// let grid = LogGrid::from_log(schedule.daily_logs.first().expect("a log"));
/// let driving = grid.row(DutyStatus::Driving);
/// assert!(driving.is_marked(6) && driving.is_marked(16));
/// assert!(!driving.is_marked(17));
/// assert_eq!(driving.total_hours, 11.0);
/// # Ok::<(), hos_core::ScheduleError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LogGrid {
    rows: [GridRow; 4],
}

impl LogGrid {
    /// Lay out `log` on the grid.
    #[must_use]
    pub fn from_log(log: &DailyLog) -> Self {
        Self {
            rows: DutyStatus::ALL.map(|status| GridRow::build(status, log)),
        }
    }

    /// Rows in display order.
    #[must_use]
    pub const fn rows(&self) -> &[GridRow] {
        &self.rows
    }

    /// The row for `status`.
    #[must_use]
    pub const fn row(&self, status: DutyStatus) -> &GridRow {
        let [off_duty, sleeper_berth, driving, on_duty_not_driving] = &self.rows;
        match status {
            DutyStatus::OffDuty => off_duty,
            DutyStatus::SleeperBerth => sleeper_berth,
            DutyStatus::Driving => driving,
            DutyStatus::OnDutyNotDriving => on_duty_not_driving,
        }
    }
}
