//! Air tables: all-air treated flow (Table 9) and exterior ventilation
//! (Table 10).

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::usage::*;
use crate::zone::{Exposure, LoadLevel};

/// All-air typology keys (Table 9 rows).
pub mod typology {
    pub const AUDITORIUM_THEATRE: &str = "Auditorium / Theatre";
    pub const TEACHING: &str = crate::tables::usage::TEACHING;
    pub const DEPARTMENT_STORE_GROUND: &str = "Department store - Ground floor";
    pub const DEPARTMENT_STORE_UPPER: &str = "Department store - Upper floors";
    pub const HOSPITAL_WARD: &str = crate::tables::usage::HOSPITAL_WARD;
    pub const HOSPITAL_GENERAL: &str = crate::tables::usage::HOSPITAL_GENERAL;
    pub const HOTEL_ROOMS: &str = "Hotel (guest rooms)";
    pub const MUSEUM_LIBRARY: &str = "Museum / Library";
    pub const OFFICE_OPEN_PLAN: &str = "Office - Open plan";
    pub const OFFICE_PRIVATE: &str = "Office - Private offices";
    pub const RESTAURANT_LARGE: &str = "Restaurant / Cafeteria - Large";
    pub const RESTAURANT_MEDIUM: &str = "Restaurant / Cafeteria - Medium";
    pub const RETAIL_ARCADE: &str = crate::tables::usage::RETAIL_ARCADE;
}

/// One Table 9 cell row: Low/Medium/High. `None` marks a cell the manual
/// leaves blank (not applicable).
pub type LevelRow = [Option<f64>; 3];

/// Rows indexed E/S/W, N, Interior.
pub type ExposureGrid = [LevelRow; 3];

const NA: LevelRow = [None, None, None];

const fn row(low: f64, medium: f64, high: f64) -> LevelRow {
    [Some(low), Some(medium), Some(high)]
}

/// Table 9: treated air flow in all-air systems (L/s·m²) by typology,
/// exposure and load level.
pub const TABLE_9_ALL_AIR_LS_M2: &[(&str, ExposureGrid)] = &[
    (typology::AUDITORIUM_THEATRE, [NA, NA, row(2.0, 3.0, 5.0)]),
    (
        typology::TEACHING,
        [row(5.0, 6.0, 7.0), row(2.5, 3.5, 7.0), row(2.0, 2.5, 3.0)],
    ),
    (typology::DEPARTMENT_STORE_GROUND, [NA, NA, row(2.0, 2.5, 4.0)]),
    (typology::DEPARTMENT_STORE_UPPER, [NA, NA, row(2.0, 2.5, 4.0)]),
    (
        typology::HOSPITAL_WARD,
        [row(5.5, 6.0, 7.0), row(5.5, 6.0, 7.0), NA],
    ),
    (
        typology::HOSPITAL_GENERAL,
        [row(5.0, 5.5, 6.0), row(3.0, 3.5, 4.0), row(2.0, 2.0, 2.5)],
    ),
    (
        typology::HOTEL_ROOMS,
        [row(5.0, 5.5, 6.0), row(3.0, 3.5, 4.0), NA],
    ),
    (
        typology::MUSEUM_LIBRARY,
        [row(5.0, 6.0, 7.0), row(3.0, 3.0, 4.0), row(2.0, 2.5, 3.0)],
    ),
    (typology::OFFICE_OPEN_PLAN, [NA, NA, row(2.0, 2.5, 3.0)]),
    (
        typology::OFFICE_PRIVATE,
        [row(5.0, 5.5, 6.0), row(3.0, 3.5, 4.0), NA],
    ),
    (
        typology::RESTAURANT_LARGE,
        [row(9.0, 10.0, 13.0), row(5.5, 6.0, 7.0), row(2.0, 2.0, 2.5)],
    ),
    (
        typology::RESTAURANT_MEDIUM,
        [row(8.0, 9.0, 13.0), row(3.0, 3.5, 4.5), row(2.0, 2.0, 2.5)],
    ),
    (
        typology::RETAIL_ARCADE,
        [row(5.0, 5.5, 6.0), row(3.0, 3.5, 4.0), row(3.0, 3.5, 4.0)],
    ),
];

/// Table 10: exterior (outdoor) air ventilation (L/s·m²) by usage.
pub const TABLE_10_VENTILATION_LS_M2: &[(&str, f64)] = &[
    (ARCHIVE, 0.28),
    (AUDITORIUM, 5.33),
    (LIBRARY, 1.25),
    (CAFETERIA_RESTAURANT, 5.33),
    (RETAIL_ARCADE, 1.60),
    (RETAIL_DEPARTMENT_STORE, 1.60),
    (RETAIL_SUPERMARKET, 1.60),
    (BANK, 1.25),
    (TEACHING, 6.00),
    (SPORTS_VENUE, 4.00),
    (HOSPITAL_GENERAL, 2.70),
    (HOTEL, 0.80),
    (LABORATORY, 3.00),
    (MUSEUM, 4.00),
    // Same value for every load level in the manual
    (OFFICE, 1.25),
    (ASSEMBLY_HALL, 8.00),
    (EVENT_VENUE, 4.00),
];

static ALL_AIR_INDEX: Lazy<HashMap<&'static str, ExposureGrid>> =
    Lazy::new(|| TABLE_9_ALL_AIR_LS_M2.iter().copied().collect());

static VENTILATION_INDEX: Lazy<HashMap<&'static str, f64>> =
    Lazy::new(|| TABLE_10_VENTILATION_LS_M2.iter().copied().collect());

/// Result of a Table 9 cell lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AllAirCell {
    /// The cell has a value (L/s·m²)
    Value(f64),
    /// The typology exists but the cell is blank for this exposure/level
    NotApplicable,
    /// The typology is not a Table 9 row
    UnknownTypology,
}

/// Look up the all-air treated flow for a typology.
pub fn all_air_ls_m2(typology: &str, exposure: Exposure, level: LoadLevel) -> AllAirCell {
    match ALL_AIR_INDEX.get(typology.trim()) {
        None => AllAirCell::UnknownTypology,
        Some(grid) => match grid[exposure.index()][level.index()] {
            Some(v) => AllAirCell::Value(v),
            None => AllAirCell::NotApplicable,
        },
    }
}

/// Static key for a Table 9 typology name.
pub fn typology_key(name: &str) -> Option<&'static str> {
    ALL_AIR_INDEX.get_key_value(name.trim()).map(|(k, _)| *k)
}

/// Table 9 typology names in table order.
pub fn typologies() -> impl Iterator<Item = &'static str> {
    TABLE_9_ALL_AIR_LS_M2.iter().map(|(k, _)| *k)
}

/// Exterior ventilation rate (L/s·m²) for a usage.
pub fn ventilation_ls_m2(usage: &str) -> Option<f64> {
    VENTILATION_INDEX.get(usage.trim()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ventilation_lookup() {
        assert_eq!(ventilation_ls_m2(OFFICE), Some(1.25));
        assert_eq!(ventilation_ls_m2(ASSEMBLY_HALL), Some(8.0));
        assert_eq!(ventilation_ls_m2("Theatre"), None);
    }

    #[test]
    fn test_all_air_cells() {
        assert_eq!(
            all_air_ls_m2(typology::OFFICE_OPEN_PLAN, Exposure::Interior, LoadLevel::Medium),
            AllAirCell::Value(2.5)
        );
        assert_eq!(
            all_air_ls_m2(typology::RESTAURANT_LARGE, Exposure::SouthEastWest, LoadLevel::High),
            AllAirCell::Value(13.0)
        );
        assert_eq!(
            all_air_ls_m2(typology::OFFICE_OPEN_PLAN, Exposure::North, LoadLevel::Low),
            AllAirCell::NotApplicable
        );
        assert_eq!(
            all_air_ls_m2("Swimming pool", Exposure::Interior, LoadLevel::Low),
            AllAirCell::UnknownTypology
        );
    }

    #[test]
    fn test_typology_keys() {
        assert_eq!(typology_key(" Museum / Library "), Some(typology::MUSEUM_LIBRARY));
        assert_eq!(typology_key("Office"), None);
        assert_eq!(typologies().count(), 13);
    }
}
