//! Driver's daily log sheets rendered as fixed-width text.
//!
//! A sheet has three parts: a header naming the date, mileage, carrier,
//! driver and vehicle; a [`LogGrid`] of 24 hourly columns by four duty
//! status rows with per-row totals; and the remarks recorded for each
//! interval. Carrier and vehicle details are not part of a schedule, so
//! they come from [`LogSheetConfig`].
//!
//! ```
//! use chrono::NaiveDate;
//! use hos_core::compute_schedule;
//! use hos_render::{LogSheetConfig, render_daily_log};
//!
//! let start = NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date");
//! let schedule = compute_schedule(600.0, 10.0, 0.0, start)?;
//! let log = schedule.daily_logs.first().expect("one log per day");
//! let sheet = render_daily_log(log, &LogSheetConfig::default());
//! assert!(sheet.contains("DATE: 05/01/2024"));
//! # Ok::<(), hos_core::ScheduleError>(())
//! ```

mod config;
mod grid;
mod sheet;

pub use config::LogSheetConfig;
pub use grid::{GridRow, HOUR_LABELS, LogGrid};
pub use sheet::{DailyLogSheet, RenderError, render_daily_log, render_to};
