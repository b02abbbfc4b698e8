//! Running total of duty hours counted against the 70-hour cycle.

use std::collections::VecDeque;
use std::time::Duration;

use crate::{CycleModel, rules::DAY};

/// Days of history that count against today's cycle allowance. Together
/// with the current day they make up the 8-day window.
const TRAILING_DAYS: usize = 7;

#[derive(Debug, Clone)]
pub(super) enum CycleLedger {
    Flat { cumulative: Duration },
    Rolling { days: VecDeque<Duration> },
}

impl CycleLedger {
    /// Seed the ledger with hours already used before the trip.
    ///
    /// The rolling ledger books all prior hours on the day before the trip,
    /// so they leave the window last.
    pub(super) fn new(model: CycleModel, hours_used: Duration) -> Self {
        match model {
            CycleModel::FlatDropOff => Self::Flat {
                cumulative: hours_used,
            },
            CycleModel::RollingWindow => Self::Rolling {
                days: VecDeque::from([hours_used]),
            },
        }
    }

    /// Hours counted against the cycle at the start of the next day.
    pub(super) fn used(&self) -> Duration {
        match self {
            Self::Flat { cumulative } => *cumulative,
            Self::Rolling { days } => days.iter().sum(),
        }
    }

    pub(super) fn record_duty_day(&mut self, duty: Duration) {
        match self {
            Self::Flat { cumulative } => *cumulative += duty,
            Self::Rolling { days } => push_day(days, duty),
        }
    }

    pub(super) fn record_rest_day(&mut self) {
        match self {
            Self::Flat { cumulative } => *cumulative = cumulative.saturating_sub(DAY),
            Self::Rolling { days } => push_day(days, Duration::ZERO),
        }
    }
}

fn push_day(days: &mut VecDeque<Duration>, duty: Duration) {
    days.push_back(duty);
    while days.len() > TRAILING_DAYS {
        days.pop_front();
    }
}
