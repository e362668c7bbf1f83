//! Composite air-quality index derivation.
//!
//! Each pollutant has a breakpoint table mapping concentration ranges to
//! index ranges via linear interpolation. The composite index of a sample
//! is the worst (maximum) of its defined sub-indices.

use crate::core::{Pollutant, NUM_POLLUTANTS};

/// One breakpoint bracket: a concentration range mapped to an index range.
#[derive(Debug, Clone, Copy)]
pub struct Breakpoint {
    pub domain_low: f64,
    pub domain_high: f64,
    pub index_low: f64,
    pub index_high: f64,
}

const fn bp(domain_low: f64, domain_high: f64, index_low: f64, index_high: f64) -> Breakpoint {
    Breakpoint {
        domain_low,
        domain_high,
        index_low,
        index_high,
    }
}

const PM25_BREAKPOINTS: &[Breakpoint] = &[
    bp(0.0, 30.0, 0.0, 50.0),
    bp(31.0, 60.0, 51.0, 100.0),
    bp(61.0, 90.0, 101.0, 200.0),
    bp(91.0, 120.0, 201.0, 300.0),
    bp(121.0, 250.0, 301.0, 400.0),
    bp(251.0, 350.0, 401.0, 500.0),
];

const PM10_BREAKPOINTS: &[Breakpoint] = &[
    bp(0.0, 50.0, 0.0, 50.0),
    bp(51.0, 100.0, 51.0, 100.0),
    bp(101.0, 250.0, 101.0, 200.0),
    bp(251.0, 350.0, 201.0, 300.0),
    bp(351.0, 430.0, 301.0, 400.0),
    bp(431.0, 530.0, 401.0, 500.0),
];

/// CO brackets are in mg/m³; the upstream reading is µg/m³ and is divided
/// by 1000 before lookup.
const CO_BREAKPOINTS: &[Breakpoint] = &[
    bp(0.0, 1.0, 0.0, 50.0),
    bp(1.1, 2.0, 51.0, 100.0),
    bp(2.1, 10.0, 101.0, 200.0),
    bp(10.1, 17.0, 201.0, 300.0),
    bp(17.1, 34.0, 301.0, 400.0),
    bp(34.1, 50.0, 401.0, 500.0),
];

const NO2_BREAKPOINTS: &[Breakpoint] = &[
    bp(0.0, 40.0, 0.0, 50.0),
    bp(41.0, 80.0, 51.0, 100.0),
    bp(81.0, 180.0, 101.0, 150.0),
    bp(181.0, 280.0, 151.0, 200.0),
    bp(281.0, 400.0, 201.0, 300.0),
    bp(401.0, 800.0, 301.0, 400.0),
    bp(801.0, 1200.0, 401.0, 500.0),
];

const SO2_BREAKPOINTS: &[Breakpoint] = &[
    bp(0.0, 40.0, 0.0, 50.0),
    bp(41.0, 80.0, 51.0, 100.0),
    bp(81.0, 380.0, 101.0, 150.0),
    bp(381.0, 800.0, 151.0, 200.0),
    bp(801.0, 1600.0, 201.0, 300.0),
    bp(1601.0, 2100.0, 301.0, 400.0),
    bp(2101.0, 2620.0, 401.0, 500.0),
];

const O3_BREAKPOINTS: &[Breakpoint] = &[
    bp(0.0, 84.0, 0.0, 50.0),
    bp(84.0, 124.0, 51.0, 100.0),
    bp(125.0, 164.0, 101.0, 150.0),
    bp(165.0, 204.0, 151.0, 200.0),
    bp(205.0, 404.0, 201.0, 300.0),
    bp(405.0, 504.0, 301.0, 400.0),
    bp(505.0, 604.0, 401.0, 500.0),
];

const NH3_BREAKPOINTS: &[Breakpoint] = &[
    bp(0.0, 10.0, 0.0, 50.0),
    bp(11.0, 20.0, 51.0, 100.0),
    bp(21.0, 30.0, 101.0, 150.0),
    bp(31.0, 50.0, 151.0, 200.0),
    bp(51.0, 100.0, 201.0, 300.0),
    bp(101.0, 200.0, 301.0, 500.0),
];

/// Breakpoint table for a pollutant, `None` for species without one.
pub fn breakpoints(pollutant: Pollutant) -> Option<&'static [Breakpoint]> {
    match pollutant {
        Pollutant::Pm25 => Some(PM25_BREAKPOINTS),
        Pollutant::Pm10 => Some(PM10_BREAKPOINTS),
        Pollutant::Co => Some(CO_BREAKPOINTS),
        Pollutant::No2 => Some(NO2_BREAKPOINTS),
        Pollutant::So2 => Some(SO2_BREAKPOINTS),
        Pollutant::O3 => Some(O3_BREAKPOINTS),
        Pollutant::Nh3 => Some(NH3_BREAKPOINTS),
        Pollutant::No => None,
    }
}

/// Sub-index of one pollutant reading.
///
/// Returns `None` when the reading is missing, the pollutant has no
/// breakpoint table, or the value falls outside every bracket. The result
/// is integer-valued: interpolation is truncated toward zero.
pub fn sub_index(pollutant: Pollutant, concentration: f64) -> Option<f64> {
    if !concentration.is_finite() {
        return None;
    }

    let value = match pollutant {
        Pollutant::Co => concentration / 1000.0,
        _ => concentration,
    };

    let table = breakpoints(pollutant)?;
    for b in table {
        if value >= b.domain_low && value <= b.domain_high {
            let fraction = (value - b.domain_low) / (b.domain_high - b.domain_low);
            let index = b.index_low + fraction * (b.index_high - b.index_low);
            return Some(index.trunc());
        }
    }
    None
}

/// Composite index of one sample: the maximum of its defined sub-indices.
///
/// `None` only when every sub-index is undefined; a single missing or
/// out-of-range pollutant is simply excluded from the max.
pub fn composite_index(row: &[f64; NUM_POLLUTANTS]) -> Option<f64> {
    // The NO2 table is applied to the nitrogen monoxide reading; every
    // published index history was derived this way, so it stays.
    let inputs = [
        (Pollutant::Pm25, row[Pollutant::Pm25.column()]),
        (Pollutant::Pm10, row[Pollutant::Pm10.column()]),
        (Pollutant::Co, row[Pollutant::Co.column()]),
        (Pollutant::No2, row[Pollutant::No.column()]),
        (Pollutant::So2, row[Pollutant::So2.column()]),
        (Pollutant::O3, row[Pollutant::O3.column()]),
        (Pollutant::Nh3, row[Pollutant::Nh3.column()]),
    ];

    inputs
        .iter()
        .filter_map(|&(pollutant, value)| sub_index(pollutant, value))
        .fold(None, |acc, index| match acc {
            Some(best) if best >= index => Some(best),
            _ => Some(index),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn pm25_interpolates_within_bracket() {
        // 51 + (45-31)/(60-31) * (100-51) = 74.65..., truncated.
        assert_relative_eq!(
            sub_index(Pollutant::Pm25, 45.0).unwrap(),
            74.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn sub_index_hits_bracket_endpoints_exactly() {
        assert_relative_eq!(sub_index(Pollutant::Pm25, 0.0).unwrap(), 0.0);
        assert_relative_eq!(sub_index(Pollutant::Pm25, 30.0).unwrap(), 50.0);
        assert_relative_eq!(sub_index(Pollutant::Pm25, 31.0).unwrap(), 51.0);
        assert_relative_eq!(sub_index(Pollutant::Pm25, 350.0).unwrap(), 500.0);
    }

    #[test]
    fn sub_index_is_monotonic_within_each_bracket() {
        for table_pollutant in [Pollutant::Pm25, Pollutant::So2, Pollutant::Nh3] {
            let table = breakpoints(table_pollutant).unwrap();
            for b in table {
                let steps = 20;
                let mut prev = f64::NEG_INFINITY;
                for s in 0..=steps {
                    let v =
                        b.domain_low + (b.domain_high - b.domain_low) * s as f64 / steps as f64;
                    let idx = sub_index(table_pollutant, v).unwrap();
                    assert!(idx >= prev, "{:?} not monotonic at {}", table_pollutant, v);
                    prev = idx;
                }
            }
        }
    }

    #[test]
    fn co_reading_is_converted_to_mg() {
        // 1500 µg/m³ -> 1.5 mg/m³ -> bracket (1.1, 2.0 -> 51, 100).
        let expected = (51.0 + (1.5 - 1.1) / (2.0 - 1.1) * 49.0_f64).trunc();
        assert_relative_eq!(sub_index(Pollutant::Co, 1500.0).unwrap(), expected);
    }

    #[test]
    fn out_of_range_and_missing_values_are_undefined() {
        assert_eq!(sub_index(Pollutant::Pm25, 400.0), None);
        assert_eq!(sub_index(Pollutant::Pm25, -1.0), None);
        assert_eq!(sub_index(Pollutant::Pm25, f64::NAN), None);
        // Gap between CO brackets (2.0, 2.1 mg/m³) yields no sub-index.
        assert_eq!(sub_index(Pollutant::Co, 2050.0), None);
        // Nitrogen monoxide has no table of its own.
        assert_eq!(sub_index(Pollutant::No, 10.0), None);
    }

    #[test]
    fn composite_is_max_of_defined_sub_indices() {
        let mut row = [f64::NAN; NUM_POLLUTANTS];
        row[Pollutant::Pm25.column()] = 45.0; // sub-index 74
        row[Pollutant::So2.column()] = 20.0; // sub-index 25

        assert_relative_eq!(composite_index(&row).unwrap(), 74.0);
    }

    #[test]
    fn composite_uses_nitrogen_monoxide_for_the_no2_table() {
        let mut row = [f64::NAN; NUM_POLLUTANTS];
        row[Pollutant::No.column()] = 60.0; // NO2 bracket (41, 80 -> 51, 100)
        row[Pollutant::No2.column()] = 1000.0; // ignored by the composite

        let expected = (51.0 + (60.0 - 41.0) / (80.0 - 41.0) * 49.0_f64).trunc();
        assert_relative_eq!(composite_index(&row).unwrap(), expected);
    }

    #[test]
    fn composite_is_undefined_when_all_sub_indices_are() {
        let row = [f64::NAN; NUM_POLLUTANTS];
        assert_eq!(composite_index(&row), None);

        let mut row = [f64::NAN; NUM_POLLUTANTS];
        row[Pollutant::Pm25.column()] = 9999.0; // out of every bracket
        assert_eq!(composite_index(&row), None);
    }

    #[test]
    fn composite_is_never_negative() {
        let mut row = [f64::NAN; NUM_POLLUTANTS];
        row[Pollutant::Pm25.column()] = 0.0;
        assert_relative_eq!(composite_index(&row).unwrap(), 0.0);
    }
}
