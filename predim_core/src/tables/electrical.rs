//! Electrical specific loads (Tables 11 and 12), W/m².

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::usage::*;

/// Table 11: normal-supply electrical load (W/m²).
pub const TABLE_11_ELECTRICAL_W_M2: &[(&str, f64)] = &[
    (ARCHIVE, 60.0),
    (AUDITORIUM, 215.0),
    (LIBRARY, 95.0),
    (CAFETERIA_RESTAURANT, 160.0),
    (RETAIL_ARCADE, 150.0),
    (RETAIL_DEPARTMENT_STORE, 125.0),
    (TEACHING, 130.0),
    (HOSPITAL_WARD, 75.0),
    (HOSPITAL_GENERAL, 70.0),
    (HOTEL, 75.0),
    (MUSEUM, 100.0),
    (OFFICE, 100.0),
    (ASSEMBLY_HALL, 155.0),
    (EVENT_VENUE, 215.0),
];

/// Table 12: supplementary-supply electrical load (W/m²).
pub const TABLE_12_SUPPLEMENTARY_W_M2: &[(&str, f64)] = &[
    (AUDITORIUM, 40.0),
    (LIBRARY, 30.0),
    (CAFETERIA_RESTAURANT, 50.0),
    (RETAIL_ARCADE, 40.0),
    (RETAIL_DEPARTMENT_STORE, 40.0),
    (TEACHING, 30.0),
    (HOSPITAL_WARD, 60.0),
    (HOSPITAL_GENERAL, 60.0),
    (HOTEL, 30.0),
    (MUSEUM, 40.0),
    (OFFICE, 30.0),
    (ASSEMBLY_HALL, 40.0),
];

/// Demand at or above which a medium-voltage service is suggested (kW).
pub const MEDIUM_VOLTAGE_THRESHOLD_KW: f64 = 400.0;

/// Demand above which the utility may require a reserved room (kW).
pub const UTILITY_RESERVE_THRESHOLD_KW: f64 = 100.0;

static NORMAL_INDEX: Lazy<HashMap<&'static str, f64>> =
    Lazy::new(|| TABLE_11_ELECTRICAL_W_M2.iter().copied().collect());

static SUPPLEMENTARY_INDEX: Lazy<HashMap<&'static str, f64>> =
    Lazy::new(|| TABLE_12_SUPPLEMENTARY_W_M2.iter().copied().collect());

/// Normal-supply load (W/m²) for a usage.
pub fn normal_w_m2(usage: &str) -> Option<f64> {
    NORMAL_INDEX.get(usage.trim()).copied()
}

/// Supplementary-supply load (W/m²) for a usage.
pub fn supplementary_w_m2(usage: &str) -> Option<f64> {
    SUPPLEMENTARY_INDEX.get(usage.trim()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookups() {
        assert_eq!(normal_w_m2(OFFICE), Some(100.0));
        assert_eq!(supplementary_w_m2(OFFICE), Some(30.0));
        assert_eq!(normal_w_m2(ARCHIVE), Some(60.0));
        // Archives have no supplementary-supply entry
        assert_eq!(supplementary_w_m2(ARCHIVE), None);
    }
}
