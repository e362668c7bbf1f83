//! Pollutant axis and raw upstream samples.

use chrono::{DateTime, Utc};

/// Number of pollutant species reported by the upstream history service.
pub const NUM_POLLUTANTS: usize = 8;

/// The pollutant species tracked per sample, in feature-column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pollutant {
    Co,
    No,
    No2,
    O3,
    So2,
    Pm25,
    Pm10,
    Nh3,
}

impl Pollutant {
    /// All pollutants in feature-column order.
    pub const ALL: [Pollutant; NUM_POLLUTANTS] = [
        Pollutant::Co,
        Pollutant::No,
        Pollutant::No2,
        Pollutant::O3,
        Pollutant::So2,
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::Nh3,
    ];

    /// Column position of this pollutant in the feature matrix.
    pub fn column(self) -> usize {
        match self {
            Pollutant::Co => 0,
            Pollutant::No => 1,
            Pollutant::No2 => 2,
            Pollutant::O3 => 3,
            Pollutant::So2 => 4,
            Pollutant::Pm25 => 5,
            Pollutant::Pm10 => 6,
            Pollutant::Nh3 => 7,
        }
    }

    /// Upstream field name for this pollutant.
    pub fn key(self) -> &'static str {
        match self {
            Pollutant::Co => "co",
            Pollutant::No => "no",
            Pollutant::No2 => "no2",
            Pollutant::O3 => "o3",
            Pollutant::So2 => "so2",
            Pollutant::Pm25 => "pm2_5",
            Pollutant::Pm10 => "pm10",
            Pollutant::Nh3 => "nh3",
        }
    }
}

/// One timestamped reading of all pollutant concentrations.
///
/// Concentrations the upstream service did not report are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSample {
    pub timestamp: DateTime<Utc>,
    concentrations: [Option<f64>; NUM_POLLUTANTS],
}

impl RawSample {
    /// Create a sample with all concentrations missing.
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            concentrations: [None; NUM_POLLUTANTS],
        }
    }

    /// Create a sample from concentrations in feature-column order.
    pub fn with_concentrations(
        timestamp: DateTime<Utc>,
        concentrations: [Option<f64>; NUM_POLLUTANTS],
    ) -> Self {
        Self {
            timestamp,
            concentrations,
        }
    }

    /// Set one pollutant's concentration, consuming and returning the sample.
    pub fn set(mut self, pollutant: Pollutant, value: f64) -> Self {
        self.concentrations[pollutant.column()] = Some(value);
        self
    }

    /// Get one pollutant's concentration, if reported.
    pub fn concentration(&self, pollutant: Pollutant) -> Option<f64> {
        self.concentrations[pollutant.column()]
    }

    /// All concentrations in feature-column order.
    pub fn concentrations(&self) -> &[Option<f64>; NUM_POLLUTANTS] {
        &self.concentrations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn pollutant_columns_cover_all_positions() {
        for (i, p) in Pollutant::ALL.iter().enumerate() {
            assert_eq!(p.column(), i);
        }
    }

    #[test]
    fn pollutant_keys_match_upstream_fields() {
        assert_eq!(Pollutant::Pm25.key(), "pm2_5");
        assert_eq!(Pollutant::Co.key(), "co");
        assert_eq!(Pollutant::Nh3.key(), "nh3");
    }

    #[test]
    fn raw_sample_tracks_missing_concentrations() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let sample = RawSample::new(ts).set(Pollutant::Pm25, 45.0);

        assert_eq!(sample.concentration(Pollutant::Pm25), Some(45.0));
        assert_eq!(sample.concentration(Pollutant::No2), None);
    }
}
