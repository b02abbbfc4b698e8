//! Fuel stops and mandatory driving breaks.
//!
//! Both calculators are pure: fuel stops depend only on distance, breaks only
//! on total driving time.

use std::time::Duration;

use crate::HosRules;
use crate::rules::MAX_FUEL_STOPS;

/// A refuelling stop at a fixed distance from the start of the trip.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FuelStop {
    /// Miles driven before the stop.
    pub distance_from_start: f64,
    /// Time spent fuelling.
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_hours"))]
    pub duration: Duration,
}

impl FuelStop {
    /// Human-readable description of the stop.
    #[must_use]
    pub fn description(&self) -> String {
        format!("Fuel Stop at {:.0} miles", self.distance_from_start)
    }
}

/// A 30-minute break required after a block of cumulative driving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MandatoryBreak {
    /// Cumulative driving at which the break is taken.
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_hours"))]
    pub after_drive: Duration,
    /// Length of the break.
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_hours"))]
    pub duration: Duration,
}

impl MandatoryBreak {
    /// Human-readable description of the break.
    #[must_use]
    pub fn description(&self) -> String {
        format!(
            "Mandatory 30-min break after {} hours driving",
            self.after_drive.as_secs().div_euclid(3_600)
        )
    }
}

/// Place one fuel stop at every full fuel interval of `total_distance`.
///
/// No stop is created for a trailing partial interval, and at most
/// [`MAX_FUEL_STOPS`] stops are produced.
///
/// # Examples
/// ```
/// use hos_core::{HosRules, fuel_stops};
///
/// let stops = fuel_stops(2_500.0, &HosRules::default());
/// let miles: Vec<f64> = stops.iter().map(|s| s.distance_from_start).collect();
/// assert_eq!(miles, vec![1_000.0, 2_000.0]);
/// assert!(fuel_stops(999.9, &HosRules::default()).is_empty());
/// ```
#[must_use]
pub fn fuel_stops(total_distance: f64, rules: &HosRules) -> Vec<FuelStop> {
    let interval = rules.fuel_interval_miles;
    if !(interval > 0.0) {
        return Vec::new();
    }
    (1..=MAX_FUEL_STOPS)
        .map(|n| f64::from(n) * interval)
        .take_while(|mark| *mark <= total_distance)
        .map(|distance_from_start| FuelStop {
            distance_from_start,
            duration: rules.fuel_stop_duration,
        })
        .collect()
}

/// Schedule a break at every full break interval of driving that ends
/// strictly before `total_drive_time`.
///
/// A break that would fall exactly at the end of driving is not inserted.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use hos_core::{HosRules, mandatory_breaks};
///
/// let rules = HosRules::default();
/// assert_eq!(mandatory_breaks(Duration::from_secs(20 * 3600), &rules).len(), 2);
/// assert_eq!(mandatory_breaks(Duration::from_secs(16 * 3600), &rules).len(), 1);
/// ```
#[must_use]
pub fn mandatory_breaks(total_drive_time: Duration, rules: &HosRules) -> Vec<MandatoryBreak> {
    if rules.break_after.is_zero() {
        return Vec::new();
    }
    let mut breaks = Vec::new();
    let mut cumulative = Duration::ZERO;
    while cumulative + rules.break_after < total_drive_time {
        cumulative += rules.break_after;
        breaks.push(MandatoryBreak {
            after_drive: cumulative,
            duration: rules.break_duration,
        });
    }
    breaks
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn rules() -> HosRules {
        HosRules::default()
    }

    #[rstest]
    #[case(0.0, 0)]
    #[case(999.0, 0)]
    #[case(1_000.0, 1)]
    #[case(1_100.0, 1)]
    #[case(3_000.0, 3)]
    #[case(3_999.99, 3)]
    fn fuel_stop_count_follows_full_intervals(
        rules: HosRules,
        #[case] distance: f64,
        #[case] expected: usize,
    ) {
        assert_eq!(fuel_stops(distance, &rules).len(), expected);
    }

    #[rstest]
    fn fuel_stops_are_capped(rules: HosRules) {
        let stops = fuel_stops(1e13, &rules);
        assert_eq!(stops.len(), 100_000);
        assert_eq!(
            stops.last().map(|s| s.distance_from_start),
            Some(100_000_000.0)
        );
    }

    #[rstest]
    fn fuel_stops_last_one_hour(rules: HosRules) {
        let stops = fuel_stops(1_100.0, &rules);
        assert_eq!(stops.len(), 1);
        assert_eq!(stops.first().map(|s| s.duration), Some(Duration::from_secs(3_600)));
        assert_eq!(
            stops.first().map(FuelStop::description).as_deref(),
            Some("Fuel Stop at 1000 miles")
        );
    }

    #[rstest]
    #[case(0, Vec::new())]
    #[case(8, Vec::new())]
    #[case(9, vec![8])]
    #[case(16, vec![8])]
    #[case(20, vec![8, 16])]
    #[case(24, vec![8, 16])]
    #[case(25, vec![8, 16, 24])]
    fn breaks_fall_strictly_before_end_of_driving(
        rules: HosRules,
        #[case] drive_hours: u64,
        #[case] expected: Vec<u64>,
    ) {
        let breaks = mandatory_breaks(Duration::from_secs(drive_hours * 3_600), &rules);
        let at: Vec<u64> = breaks
            .iter()
            .map(|b| b.after_drive.as_secs() / 3_600)
            .collect();
        assert_eq!(at, expected);
        assert!(breaks.iter().all(|b| b.duration == Duration::from_secs(1_800)));
    }

    #[rstest]
    fn break_description_names_the_hour(rules: HosRules) {
        let breaks = mandatory_breaks(Duration::from_secs(10 * 3_600), &rules);
        assert_eq!(
            breaks.first().map(MandatoryBreak::description).as_deref(),
            Some("Mandatory 30-min break after 8 hours driving")
        );
    }
}
