//! Text layout of a complete daily log sheet.

use std::fmt;
use std::io;

use hos_core::DailyLog;
use hos_core::rules::DAY;
use log::debug;
use thiserror::Error;

use crate::{HOUR_LABELS, LogGrid, LogSheetConfig};

const LABEL_WIDTH: usize = 22;
const HEADER_WIDTH: usize = 48;
const REMARK_WIDTH: usize = 28;
const MARK: char = '*';

/// Errors from [`render_to`].
#[derive(Debug, Error)]
pub enum RenderError {
    /// Writing the sheet failed.
    #[error("failed to write daily log sheet")]
    Io(#[from] io::Error),
}

/// A daily log paired with the header details it is printed with.
///
/// The [`fmt::Display`] implementation produces the sheet.
#[derive(Debug, Clone, Copy)]
pub struct DailyLogSheet<'a> {
    log: &'a DailyLog,
    config: &'a LogSheetConfig,
}

impl<'a> DailyLogSheet<'a> {
    /// Pair `log` with `config`.
    #[must_use]
    pub const fn new(log: &'a DailyLog, config: &'a LogSheetConfig) -> Self {
        Self { log, config }
    }

    fn write_header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.config;
        writeln!(f, "U.S. DEPARTMENT OF TRANSPORTATION")?;
        writeln!(f, "DRIVER'S DAILY LOG")?;
        writeln!(f, "(ONE CALENDAR DAY - 24 HOURS)")?;
        writeln!(f)?;
        write_pair(
            f,
            &format!("DATE: {}", self.log.date.format("%m/%d/%Y")),
            &format!("TOTAL MILES DRIVING TODAY: {:.1}", self.log.totals.total_miles),
        )?;
        writeln!(f, "NAME OF CARRIER: {}", config.carrier_name)?;
        writeln!(f, "MAIN OFFICE ADDRESS: {}", config.main_office_address)?;
        write_pair(
            f,
            &format!("DRIVER'S SIGNATURE: {}", config.driver_name),
            &format!("NAME OF CO-DRIVER: {}", config.co_driver_name),
        )?;
        write_pair(
            f,
            &format!("VEHICLE NUMBERS: {}", config.vehicle_number),
            &format!("TOTAL HOURS: {}", DAY.as_secs().div_euclid(3_600)),
        )
    }

    fn write_grid(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:LABEL_WIDTH$}", "")?;
        for label in HOUR_LABELS {
            write!(f, "|{label:^width$}", width = column_width(label))?;
        }
        writeln!(f, "| Total")?;

        for row in LogGrid::from_log(self.log).rows() {
            write!(f, "{:<LABEL_WIDTH$}", row.status.label())?;
            for (label, marked) in HOUR_LABELS.iter().zip(&row.cells) {
                let mark = if *marked { MARK } else { ' ' };
                write!(f, "|{mark:^width$}", width = column_width(label))?;
            }
            writeln!(f, "|{:>5.1}", row.total_hours)?;
        }
        Ok(())
    }

    fn write_remarks(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "REMARKS")?;
        let mut written = false;
        for entry in self.log.entries.iter().filter(|e| !e.remarks.is_empty()) {
            let place = format!("{} - {}", entry.start_time(), entry.location);
            writeln!(f, "{place:<REMARK_WIDTH$} {}", entry.remarks)?;
            written = true;
        }
        if !written {
            writeln!(f)?;
        }
        Ok(())
    }
}

fn column_width(label: &str) -> usize {
    label.len().max(3)
}

fn write_pair(f: &mut fmt::Formatter<'_>, left: &str, right: &str) -> fmt::Result {
    writeln!(f, "{left:<HEADER_WIDTH$}{right}")
}

impl fmt::Display for DailyLogSheet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_header(f)?;
        writeln!(f)?;
        self.write_grid(f)?;
        writeln!(f)?;
        self.write_remarks(f)
    }
}

/// Render `log` to a string.
#[must_use]
pub fn render_daily_log(log: &DailyLog, config: &LogSheetConfig) -> String {
    DailyLogSheet::new(log, config).to_string()
}

/// Render `log` to `writer`.
///
/// # Errors
///
/// Returns [`RenderError::Io`] when writing fails.
pub fn render_to<W: io::Write>(
    writer: &mut W,
    log: &DailyLog,
    config: &LogSheetConfig,
) -> Result<(), RenderError> {
    debug!("rendering daily log for {}", log.date);
    write!(writer, "{}", DailyLogSheet::new(log, config))?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use hos_core::{DailyTotals, DutyInterval, DutyStatus, compute_schedule};
    use rstest::{fixture, rstest};
    use std::time::Duration;

    #[fixture]
    fn first_day() -> DailyLog {
        let start = NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date");
        compute_schedule(1_100.0, 20.0, 0.0, start)
            .expect("schedules")
            .daily_logs
            .into_iter()
            .next()
            .expect("a log per day")
    }

    #[rstest]
    fn header_uses_configured_details(first_day: DailyLog) {
        let config = LogSheetConfig::default()
            .with_carrier_name("Prairie Freight")
            .with_co_driver_name("Sam Doe");

        let sheet = render_daily_log(&first_day, &config);

        assert!(sheet.contains("DATE: 05/01/2024"));
        assert!(sheet.contains("TOTAL MILES DRIVING TODAY: 605.0"));
        assert!(sheet.contains("NAME OF CARRIER: Prairie Freight"));
        assert!(sheet.contains("NAME OF CO-DRIVER: Sam Doe"));
        assert!(sheet.contains("VEHICLE NUMBERS: Vehicle #123"));
        assert!(sheet.contains("TOTAL HOURS: 24"));
    }

    #[rstest]
    fn grid_lists_hours_and_row_totals(first_day: DailyLog) {
        let sheet = render_daily_log(&first_day, &LogSheetConfig::default());

        assert!(sheet.contains("|Midnight|"));
        assert!(sheet.contains("|Noon|"));
        let driving = sheet
            .lines()
            .find(|line| line.starts_with("Driving"))
            .expect("driving row");
        assert!(driving.ends_with("| 11.0"));
        assert_eq!(driving.matches(MARK).count(), 11);
    }

    #[rstest]
    fn remarks_list_start_time_and_location(first_day: DailyLog) {
        let sheet = render_daily_log(&first_day, &LogSheetConfig::default());

        let remarks = sheet
            .split("REMARKS\n")
            .nth(1)
            .expect("remarks section");
        assert!(remarks.starts_with("06:00 - En Route"));
        assert!(remarks.contains("Driving to destination"));
    }

    #[rstest]
    fn empty_remarks_leave_a_blank_row() {
        let entries = vec![DutyInterval {
            duty_status: DutyStatus::OffDuty,
            start: Duration::ZERO,
            end: DAY,
            location: String::new(),
            remarks: String::new(),
        }];
        let log = DailyLog {
            date: NaiveDate::from_ymd_opt(2024, 5, 3).expect("valid date"),
            day_number: 3,
            totals: DailyTotals::from_intervals(&entries, 0.0),
            entries,
            cycle_hours: Duration::ZERO,
        };

        let sheet = render_daily_log(&log, &LogSheetConfig::default());

        assert!(sheet.ends_with("REMARKS\n\n"));
    }

    #[rstest]
    fn writer_receives_the_same_text(first_day: DailyLog) {
        let config = LogSheetConfig::default();
        let mut buffer = Vec::new();

        render_to(&mut buffer, &first_day, &config).expect("writing to a Vec succeeds");

        assert_eq!(
            String::from_utf8(buffer).expect("utf-8"),
            render_daily_log(&first_day, &config)
        );
    }
}
