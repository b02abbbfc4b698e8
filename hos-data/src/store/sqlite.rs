//! SQLite persistence for planned trips and their daily logs.
//!
//! Three tables hold the data: `trips`, `daily_logs` (unique per trip and
//! date) and `log_entries` (the duty intervals of a log, in order).
//! Durations are stored as integer nanoseconds and dates as ISO-8601 text.
#![forbid(unsafe_code)]

use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use hos_core::{
    DailyLog, DailyTotals, DutyInterval, DutyStatus, PlannedTrip, ScheduleStore, TripId,
};
use log::debug;
use rusqlite::{Connection, Error as SqliteError, OptionalExtension, Row, Transaction, params};
use thiserror::Error;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors raised by [`SqliteScheduleStore`].
#[derive(Debug, Error)]
pub enum ScheduleStoreError {
    /// Failed to create the parent directory for the SQLite artefact.
    #[error("failed to create parent directory {path:?}")]
    CreateDirectory {
        /// Path of the directory that could not be created.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path:?}")]
    Open {
        /// Destination database path.
        path: Utf8PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Enabling SQLite foreign keys failed.
    #[error("failed to enable SQLite foreign keys")]
    ForeignKeys {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Creating the tables failed.
    #[error("failed to create schedule tables")]
    CreateSchema {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Beginning the transaction failed.
    #[error("failed to begin schedule persistence transaction")]
    BeginTransaction {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Writing the trip row failed.
    #[error("failed to persist trip {trip_id}")]
    PersistTrip {
        /// Trip being persisted.
        trip_id: TripId,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Removing the logs of an earlier save failed.
    #[error("failed to discard the previous logs of trip {trip_id}")]
    DiscardLogs {
        /// Trip whose logs were being replaced.
        trip_id: TripId,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Writing a daily log or its intervals failed.
    #[error("failed to persist the {date} log of trip {trip_id}")]
    PersistLog {
        /// Trip the log belongs to.
        trip_id: TripId,
        /// Date of the log.
        date: NaiveDate,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// A duration does not fit an SQLite integer.
    #[error("{field} of {value:?} exceeds SQLite i64 range")]
    DurationOutOfRange {
        /// Column being written.
        field: &'static str,
        /// Offending value.
        value: Duration,
    },
    /// Committing the transaction failed.
    #[error("failed to commit schedule persistence transaction")]
    Commit {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Reading from the database failed.
    #[error("failed to read from {table}")]
    Query {
        /// Table being read.
        table: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// A stored row could not be decoded.
    #[error("corrupt {table} row: {message}")]
    CorruptRow {
        /// Table holding the row.
        table: &'static str,
        /// What was wrong.
        message: String,
    },
}

/// [`ScheduleStore`] persisting to a SQLite database.
///
/// # Examples
/// ```
/// use hos_core::ScheduleStore;
/// use hos_data::SqliteScheduleStore;
///
/// let store = SqliteScheduleStore::open_in_memory()?;
/// assert!(store.trips()?.is_empty());
/// # Ok::<(), hos_data::ScheduleStoreError>(())
/// ```
#[derive(Debug)]
pub struct SqliteScheduleStore {
    connection: Connection,
}

impl SqliteScheduleStore {
    /// Open or create the database at `path`.
    ///
    /// Parent directories are created automatically, and the tables are
    /// initialised if missing.
    ///
    /// # Errors
    ///
    /// Returns a [`ScheduleStoreError`] when the directory, database or
    /// schema cannot be created.
    pub fn open(path: &Utf8Path) -> Result<Self, ScheduleStoreError> {
        ensure_parent_dir(path)?;
        let connection =
            Connection::open(path.as_std_path()).map_err(|source| ScheduleStoreError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        Self::initialise(connection)
    }

    /// Open a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns a [`ScheduleStoreError`] when SQLite cannot be initialised.
    pub fn open_in_memory() -> Result<Self, ScheduleStoreError> {
        let connection =
            Connection::open_in_memory().map_err(|source| ScheduleStoreError::Open {
                path: Utf8PathBuf::from(":memory:"),
                source,
            })?;
        Self::initialise(connection)
    }

    fn initialise(connection: Connection) -> Result<Self, ScheduleStoreError> {
        connection
            .pragma_update(None, "foreign_keys", true)
            .map_err(|source| ScheduleStoreError::ForeignKeys { source })?;
        create_schema(&connection)?;
        Ok(Self { connection })
    }

    fn load_logs(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<DailyLog>, ScheduleStoreError> {
        let query = |source| ScheduleStoreError::Query {
            table: "daily_logs",
            source,
        };
        let mut statement = self.connection.prepare(sql).map_err(query)?;
        let rows = statement
            .query_map(params, LogRow::from_row)
            .map_err(query)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(query)?;
        rows.into_iter()
            .map(|row| {
                let entries = self.load_entries(row.id)?;
                row.into_log(entries)
            })
            .collect()
    }

    fn load_entries(&self, log_id: i64) -> Result<Vec<DutyInterval>, ScheduleStoreError> {
        let query = |source| ScheduleStoreError::Query {
            table: "log_entries",
            source,
        };
        let mut statement = self
            .connection
            .prepare(
                "SELECT duty_status, start_nanos, end_nanos, location, remarks
                 FROM log_entries WHERE log_id = ?1 ORDER BY position",
            )
            .map_err(query)?;
        let rows = statement
            .query_map([log_id], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                ))
            })
            .map_err(query)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(query)?;
        rows.into_iter()
            .map(|(status, start, end, location, remarks)| {
                let duty_status =
                    status
                        .parse::<DutyStatus>()
                        .map_err(|err| ScheduleStoreError::CorruptRow {
                            table: "log_entries",
                            message: err.to_string(),
                        })?;
                Ok(DutyInterval {
                    duty_status,
                    start: from_nanos("log_entries", start)?,
                    end: from_nanos("log_entries", end)?,
                    location,
                    remarks,
                })
            })
            .collect()
    }
}

impl ScheduleStore for SqliteScheduleStore {
    type Error = ScheduleStoreError;

    fn save_plan(&mut self, trip: &PlannedTrip, logs: &[DailyLog]) -> Result<(), Self::Error> {
        let transaction = self
            .connection
            .transaction()
            .map_err(|source| ScheduleStoreError::BeginTransaction { source })?;

        persist_trip(&transaction, trip)?;
        discard_logs(&transaction, trip.id)?;
        for log in logs {
            persist_log(&transaction, trip.id, log)?;
        }

        transaction
            .commit()
            .map_err(|source| ScheduleStoreError::Commit { source })?;
        debug!("saved trip {} with {} daily logs", trip.id, logs.len());
        Ok(())
    }

    fn trip(&self, id: TripId) -> Result<Option<PlannedTrip>, Self::Error> {
        let row = self
            .connection
            .query_row(
                &format!("SELECT {TRIP_COLUMNS} FROM trips WHERE id = ?1"),
                [id.to_string()],
                TripRow::from_row,
            )
            .optional()
            .map_err(|source| ScheduleStoreError::Query {
                table: "trips",
                source,
            })?;
        row.map(TripRow::into_trip).transpose()
    }

    fn trips(&self) -> Result<Vec<PlannedTrip>, Self::Error> {
        let query = |source| ScheduleStoreError::Query {
            table: "trips",
            source,
        };
        let mut statement = self
            .connection
            .prepare(&format!(
                "SELECT {TRIP_COLUMNS} FROM trips ORDER BY created_at DESC, id"
            ))
            .map_err(query)?;
        let rows = statement
            .query_map([], TripRow::from_row)
            .map_err(query)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(query)?;
        rows.into_iter().map(TripRow::into_trip).collect()
    }

    fn daily_logs(&self, id: TripId) -> Result<Vec<DailyLog>, Self::Error> {
        self.load_logs(
            &format!("SELECT {LOG_COLUMNS} FROM daily_logs WHERE trip_id = ?1 ORDER BY date"),
            [id.to_string()],
        )
    }

    fn daily_log(&self, id: TripId, date: NaiveDate) -> Result<Option<DailyLog>, Self::Error> {
        Ok(self
            .load_logs(
                &format!("SELECT {LOG_COLUMNS} FROM daily_logs WHERE trip_id = ?1 AND date = ?2"),
                [id.to_string(), date.format(DATE_FORMAT).to_string()],
            )?
            .into_iter()
            .next())
    }
}

fn ensure_parent_dir(path: &Utf8Path) -> Result<(), ScheduleStoreError> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() || parent == Utf8Path::new("/") {
        return Ok(());
    }

    let (base_dir, relative) = base_dir_and_relative(parent)?;
    base_dir
        .create_dir_all(&relative)
        .map_err(|source| ScheduleStoreError::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        })
}

fn base_dir_and_relative(
    parent: &Utf8Path,
) -> Result<(fs_utf8::Dir, Utf8PathBuf), ScheduleStoreError> {
    let (base, relative) = if parent.is_absolute() {
        ("/", parent.strip_prefix("/").unwrap_or(parent))
    } else {
        (".", parent)
    };

    let dir = fs_utf8::Dir::open_ambient_dir(base, ambient_authority()).map_err(|source| {
        ScheduleStoreError::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        }
    })?;

    Ok((dir, relative.to_path_buf()))
}

fn create_schema(connection: &Connection) -> Result<(), ScheduleStoreError> {
    connection
        .execute_batch(
            "CREATE TABLE IF NOT EXISTS trips (
                id TEXT PRIMARY KEY,
                current_location TEXT NOT NULL,
                pickup_location TEXT NOT NULL,
                dropoff_location TEXT NOT NULL,
                current_cycle_used REAL NOT NULL,
                created_at TEXT NOT NULL,
                total_distance REAL NOT NULL,
                estimated_drive_time REAL NOT NULL
            );
            CREATE TABLE IF NOT EXISTS daily_logs (
                id INTEGER PRIMARY KEY,
                trip_id TEXT NOT NULL REFERENCES trips(id) ON DELETE CASCADE,
                date TEXT NOT NULL,
                day_number INTEGER NOT NULL,
                total_miles REAL NOT NULL,
                off_duty_nanos INTEGER NOT NULL,
                sleeper_berth_nanos INTEGER NOT NULL,
                driving_nanos INTEGER NOT NULL,
                on_duty_not_driving_nanos INTEGER NOT NULL,
                cycle_nanos INTEGER NOT NULL,
                UNIQUE (trip_id, date)
            );
            CREATE TABLE IF NOT EXISTS log_entries (
                log_id INTEGER NOT NULL REFERENCES daily_logs(id) ON DELETE CASCADE,
                position INTEGER NOT NULL,
                duty_status TEXT NOT NULL,
                start_nanos INTEGER NOT NULL,
                end_nanos INTEGER NOT NULL,
                location TEXT NOT NULL,
                remarks TEXT NOT NULL,
                PRIMARY KEY (log_id, position)
            );",
        )
        .map_err(|source| ScheduleStoreError::CreateSchema { source })
}

fn persist_trip(transaction: &Transaction<'_>, trip: &PlannedTrip) -> Result<(), ScheduleStoreError> {
    transaction
        .execute(
            "INSERT INTO trips (
                id, current_location, pickup_location, dropoff_location,
                current_cycle_used, created_at, total_distance, estimated_drive_time
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT (id) DO UPDATE SET
                current_location = excluded.current_location,
                pickup_location = excluded.pickup_location,
                dropoff_location = excluded.dropoff_location,
                current_cycle_used = excluded.current_cycle_used,
                created_at = excluded.created_at,
                total_distance = excluded.total_distance,
                estimated_drive_time = excluded.estimated_drive_time",
            params![
                trip.id.to_string(),
                trip.current_location,
                trip.pickup_location,
                trip.dropoff_location,
                trip.current_cycle_used,
                trip.created_at.to_rfc3339_opts(SecondsFormat::Nanos, true),
                trip.total_distance,
                trip.estimated_drive_time,
            ],
        )
        .map(|_| ())
        .map_err(|source| ScheduleStoreError::PersistTrip {
            trip_id: trip.id,
            source,
        })
}

/// Drop every log saved for `trip_id`; their intervals cascade.
fn discard_logs(transaction: &Transaction<'_>, trip_id: TripId) -> Result<(), ScheduleStoreError> {
    transaction
        .execute(
            "DELETE FROM daily_logs WHERE trip_id = ?1",
            [trip_id.to_string()],
        )
        .map(|_| ())
        .map_err(|source| ScheduleStoreError::DiscardLogs { trip_id, source })
}

fn persist_log(
    transaction: &Transaction<'_>,
    trip_id: TripId,
    log: &DailyLog,
) -> Result<(), ScheduleStoreError> {
    let failed = |source| ScheduleStoreError::PersistLog {
        trip_id,
        date: log.date,
        source,
    };
    let totals = &log.totals;
    let log_id: i64 = transaction
        .query_row(
            "INSERT INTO daily_logs (
                trip_id, date, day_number, total_miles, off_duty_nanos,
                sleeper_berth_nanos, driving_nanos, on_duty_not_driving_nanos, cycle_nanos
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ON CONFLICT (trip_id, date) DO UPDATE SET
                day_number = excluded.day_number,
                total_miles = excluded.total_miles,
                off_duty_nanos = excluded.off_duty_nanos,
                sleeper_berth_nanos = excluded.sleeper_berth_nanos,
                driving_nanos = excluded.driving_nanos,
                on_duty_not_driving_nanos = excluded.on_duty_not_driving_nanos,
                cycle_nanos = excluded.cycle_nanos
            RETURNING id",
            params![
                trip_id.to_string(),
                log.date.format(DATE_FORMAT).to_string(),
                log.day_number,
                totals.total_miles,
                to_nanos("off_duty", totals.off_duty)?,
                to_nanos("sleeper_berth", totals.sleeper_berth)?,
                to_nanos("driving", totals.driving)?,
                to_nanos("on_duty_not_driving", totals.on_duty_not_driving)?,
                to_nanos("cycle_hours", log.cycle_hours)?,
            ],
            |row| row.get(0),
        )
        .map_err(failed)?;

    transaction
        .execute("DELETE FROM log_entries WHERE log_id = ?1", [log_id])
        .map_err(failed)?;

    let mut statement = transaction
        .prepare(
            "INSERT INTO log_entries (
                log_id, position, duty_status, start_nanos, end_nanos, location, remarks
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .map_err(failed)?;
    for (position, entry) in (0_i64..).zip(&log.entries) {
        statement
            .execute(params![
                log_id,
                position,
                entry.duty_status.as_str(),
                to_nanos("start", entry.start)?,
                to_nanos("end", entry.end)?,
                entry.location,
                entry.remarks,
            ])
            .map_err(failed)?;
    }
    Ok(())
}

fn to_nanos(field: &'static str, value: Duration) -> Result<i64, ScheduleStoreError> {
    i64::try_from(value.as_nanos())
        .map_err(|_| ScheduleStoreError::DurationOutOfRange { field, value })
}

fn from_nanos(table: &'static str, nanos: i64) -> Result<Duration, ScheduleStoreError> {
    u64::try_from(nanos)
        .map(Duration::from_nanos)
        .map_err(|_| ScheduleStoreError::CorruptRow {
            table,
            message: format!("negative duration {nanos}"),
        })
}

const TRIP_COLUMNS: &str = "id, current_location, pickup_location, dropoff_location, \
     current_cycle_used, created_at, total_distance, estimated_drive_time";

struct TripRow {
    id: String,
    current_location: String,
    pickup_location: String,
    dropoff_location: String,
    current_cycle_used: f64,
    created_at: String,
    total_distance: f64,
    estimated_drive_time: f64,
}

impl TripRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            current_location: row.get(1)?,
            pickup_location: row.get(2)?,
            dropoff_location: row.get(3)?,
            current_cycle_used: row.get(4)?,
            created_at: row.get(5)?,
            total_distance: row.get(6)?,
            estimated_drive_time: row.get(7)?,
        })
    }

    fn into_trip(self) -> Result<PlannedTrip, ScheduleStoreError> {
        let corrupt = |message: String| ScheduleStoreError::CorruptRow {
            table: "trips",
            message,
        };
        let id = self
            .id
            .parse::<TripId>()
            .map_err(|err| corrupt(format!("id {:?}: {err}", self.id)))?;
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|err| corrupt(format!("created_at {:?}: {err}", self.created_at)))?
            .with_timezone(&Utc);
        Ok(PlannedTrip {
            id,
            current_location: self.current_location,
            pickup_location: self.pickup_location,
            dropoff_location: self.dropoff_location,
            current_cycle_used: self.current_cycle_used,
            created_at,
            total_distance: self.total_distance,
            estimated_drive_time: self.estimated_drive_time,
        })
    }
}

const LOG_COLUMNS: &str = "id, date, day_number, total_miles, off_duty_nanos, \
     sleeper_berth_nanos, driving_nanos, on_duty_not_driving_nanos, cycle_nanos";

struct LogRow {
    id: i64,
    date: String,
    day_number: u32,
    total_miles: f64,
    off_duty: i64,
    sleeper_berth: i64,
    driving: i64,
    on_duty_not_driving: i64,
    cycle: i64,
}

impl LogRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            date: row.get(1)?,
            day_number: row.get(2)?,
            total_miles: row.get(3)?,
            off_duty: row.get(4)?,
            sleeper_berth: row.get(5)?,
            driving: row.get(6)?,
            on_duty_not_driving: row.get(7)?,
            cycle: row.get(8)?,
        })
    }

    fn into_log(self, entries: Vec<DutyInterval>) -> Result<DailyLog, ScheduleStoreError> {
        let date = NaiveDate::parse_from_str(&self.date, DATE_FORMAT).map_err(|err| {
            ScheduleStoreError::CorruptRow {
                table: "daily_logs",
                message: format!("date {:?}: {err}", self.date),
            }
        })?;
        let totals = DailyTotals {
            off_duty: from_nanos("daily_logs", self.off_duty)?,
            sleeper_berth: from_nanos("daily_logs", self.sleeper_berth)?,
            driving: from_nanos("daily_logs", self.driving)?,
            on_duty_not_driving: from_nanos("daily_logs", self.on_duty_not_driving)?,
            total_miles: self.total_miles,
        };
        Ok(DailyLog {
            date,
            day_number: self.day_number,
            entries,
            totals,
            cycle_hours: from_nanos("daily_logs", self.cycle)?,
        })
    }
}
