//! Cooling and heating tables (manual Tables 5-8).
//!
//! Specific loads are W/m² of conditioned floor area for the standard
//! climate, per load level (Low / Medium / High). The correction tables scale
//! them by climate zone.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::usage::*;
use super::{resolve_factor, FactorMatch, FactorRule};
use crate::zone::LoadLevel;

/// Table 5: standard cooling specific load (W/m²), columns Low/Medium/High.
pub const TABLE_5_COOLING_W_M2: &[(&str, [f64; 3])] = &[
    (ARCHIVE, [65.0, 75.0, 95.0]),
    (AUDITORIUM, [245.0, 255.0, 265.0]),
    (LIBRARY, [135.0, 145.0, 155.0]),
    (CAFETERIA_RESTAURANT, [150.0, 160.0, 170.0]),
    (RETAIL_ARCADE, [135.0, 150.0, 145.0]),
    (RETAIL_DEPARTMENT_STORE, [160.0, 155.0, 170.0]),
    (TEACHING, [195.0, 205.0, 215.0]),
    (HOSPITAL_WARD, [105.0, 85.0, 115.0]),
    (HOSPITAL_GENERAL, [95.0, 125.0, 105.0]),
    (HOTEL, [85.0, 95.0, 105.0]),
    (MUSEUM, [135.0, 145.0, 155.0]),
    (OFFICE, [90.0, 100.0, 110.0]),
    (THEATRE, [245.0, 255.0, 265.0]),
];

/// Table 6: cooling correction factor by climate zone.
pub const TABLE_6_COOLING_FACTOR: &[FactorRule] = &[
    FactorRule { codes: &["A4", "B4", "C4"], factor: 1.15 },
    FactorRule { codes: &["C2", "D2"], factor: 1.00 },
    FactorRule { codes: &["A3", "B3", "C3", "D3"], factor: 0.95 },
    FactorRule { codes: &["C1", "D1", "E1"], factor: 0.80 },
];

/// Table 7: standard heating specific load (W/m²), columns Low/Medium/High.
pub const TABLE_7_HEATING_W_M2: &[(&str, [f64; 3])] = &[
    (ARCHIVE, [25.0, 30.0, 45.0]),
    (AUDITORIUM, [190.0, 190.0, 195.0]),
    (LIBRARY, [75.0, 80.0, 95.0]),
    (CAFETERIA_RESTAURANT, [95.0, 100.0, 110.0]),
    (RETAIL_ARCADE, [55.0, 55.0, 60.0]),
    (RETAIL_DEPARTMENT_STORE, [60.0, 75.0, 75.0]),
    (TEACHING, [150.0, 150.0, 175.0]),
    (HOSPITAL_WARD, [70.0, 70.0, 75.0]),
    (HOSPITAL_GENERAL, [75.0, 90.0, 90.0]),
    (HOTEL, [50.0, 55.0, 60.0]),
    (MUSEUM, [90.0, 95.0, 105.0]),
    (OFFICE, [45.0, 50.0, 60.0]),
    (THEATRE, [190.0, 190.0, 195.0]),
];

/// Table 8: heating correction factor by climate zone, as printed.
///
/// `D1` appears in two rows of the source table. The duplication is kept;
/// [`heating_factor`] resolves it to the larger factor.
pub const TABLE_8_HEATING_FACTOR: &[FactorRule] = &[
    FactorRule { codes: &["A3", "A4", "B3", "B4", "C1", "D1"], factor: 1.00 },
    FactorRule { codes: &["C2", "C4"], factor: 1.20 },
    FactorRule { codes: &["C3", "D1", "D3"], factor: 1.30 },
    FactorRule { codes: &["D2", "E1"], factor: 1.40 },
];

static COOLING_INDEX: Lazy<HashMap<&'static str, [f64; 3]>> =
    Lazy::new(|| TABLE_5_COOLING_W_M2.iter().copied().collect());

static HEATING_INDEX: Lazy<HashMap<&'static str, [f64; 3]>> =
    Lazy::new(|| TABLE_7_HEATING_W_M2.iter().copied().collect());

/// Cooling specific load (W/m²) for a usage and load level.
pub fn cooling_w_m2(usage: &str, level: LoadLevel) -> Option<f64> {
    COOLING_INDEX.get(usage.trim()).map(|row| row[level.index()])
}

/// Heating specific load (W/m²) for a usage and load level.
pub fn heating_w_m2(usage: &str, level: LoadLevel) -> Option<f64> {
    HEATING_INDEX.get(usage.trim()).map(|row| row[level.index()])
}

/// Cooling correction factor for a climate zone code.
pub fn cooling_factor(code: &str) -> FactorMatch {
    resolve_factor(TABLE_6_COOLING_FACTOR, code)
}

/// Heating correction factor for a climate zone code.
pub fn heating_factor(code: &str) -> FactorMatch {
    resolve_factor(TABLE_8_HEATING_FACTOR, code)
}
