//! Daily water consumption (Table 13) and domestic hot water (Table 14).
//!
//! Each row states the occupancy unit it is expressed per (person, bed or
//! cover). The calculator checks that unit against the zone's resolved
//! occupancy before multiplying.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::zone::OccupancyUnit;

/// Water typology keys (Tables 13 and 14).
pub mod water_use {
    pub const SCHOOL: &str = "School";
    pub const HOSPITAL: &str = "Hospital";
    pub const HOTEL_MID_RANGE: &str = "Hotel (mid-range)";
    pub const HOTEL_UPSCALE: &str = "Hotel (upscale)";
    pub const BOARDING_SCHOOL: &str = "Boarding school";
    pub const OFFICE_WITHOUT_CAFETERIA: &str = "Office without cafeteria";
    pub const OFFICE_WITH_CAFETERIA: &str = "Office with cafeteria";
    /// Table 14 does not split offices by cafeteria
    pub const OFFICE: &str = crate::tables::usage::OFFICE;
    pub const RESTAURANT: &str = "Restaurant";
}

use water_use::*;

/// Table 13 row: litres per unit per day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColdWaterRate {
    pub unit: OccupancyUnit,
    pub liters_per_unit_day: f64,
}

/// Table 14 row: litres per unit per day and kW per unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HotWaterRate {
    pub unit: OccupancyUnit,
    pub liters_per_unit_day: f64,
    pub kw_per_unit: f64,
}

const fn cold(unit: OccupancyUnit, liters: f64) -> ColdWaterRate {
    ColdWaterRate {
        unit,
        liters_per_unit_day: liters,
    }
}

const fn hot(unit: OccupancyUnit, liters: f64, kw: f64) -> HotWaterRate {
    HotWaterRate {
        unit,
        liters_per_unit_day: liters,
        kw_per_unit: kw,
    }
}

/// Table 13: daily drinking-water consumption.
pub const TABLE_13_COLD_WATER: &[(&str, ColdWaterRate)] = &[
    (SCHOOL, cold(OccupancyUnit::Person, 20.0)),
    (HOSPITAL, cold(OccupancyUnit::Bed, 500.0)),
    (HOTEL_MID_RANGE, cold(OccupancyUnit::Bed, 135.0)),
    (HOTEL_UPSCALE, cold(OccupancyUnit::Bed, 200.0)),
    (BOARDING_SCHOOL, cold(OccupancyUnit::Person, 90.0)),
    (OFFICE_WITHOUT_CAFETERIA, cold(OccupancyUnit::Person, 15.0)),
    (OFFICE_WITH_CAFETERIA, cold(OccupancyUnit::Person, 18.0)),
    (RESTAURANT, cold(OccupancyUnit::Cover, 7.0)),
];

/// Table 14: daily hot-water consumption and heating power.
pub const TABLE_14_HOT_WATER: &[(&str, HotWaterRate)] = &[
    (SCHOOL, hot(OccupancyUnit::Person, 5.0, 0.16)),
    (HOSPITAL, hot(OccupancyUnit::Bed, 200.0, 6.40)),
    (HOTEL_MID_RANGE, hot(OccupancyUnit::Bed, 35.0, 1.12)),
    (HOTEL_UPSCALE, hot(OccupancyUnit::Bed, 100.0, 3.20)),
    (BOARDING_SCHOOL, hot(OccupancyUnit::Person, 25.0, 0.80)),
    (OFFICE, hot(OccupancyUnit::Person, 5.0, 0.16)),
    (RESTAURANT, hot(OccupancyUnit::Cover, 6.0, 0.19)),
];

static COLD_INDEX: Lazy<HashMap<&'static str, ColdWaterRate>> =
    Lazy::new(|| TABLE_13_COLD_WATER.iter().copied().collect());

static HOT_INDEX: Lazy<HashMap<&'static str, HotWaterRate>> =
    Lazy::new(|| TABLE_14_HOT_WATER.iter().copied().collect());

/// Table 13 row for a key.
pub fn cold_water(key: &str) -> Option<ColdWaterRate> {
    COLD_INDEX.get(key.trim()).copied()
}

/// Table 14 row for a key.
pub fn hot_water(key: &str) -> Option<HotWaterRate> {
    HOT_INDEX.get(key.trim()).copied()
}

/// Static key for a Table 13 row name.
pub fn cold_water_key(name: &str) -> Option<&'static str> {
    COLD_INDEX.get_key_value(name.trim()).map(|(k, _)| *k)
}

/// Static key for a Table 14 row name.
pub fn hot_water_key(name: &str) -> Option<&'static str> {
    HOT_INDEX.get_key_value(name.trim()).map(|(k, _)| *k)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cold_water_rows() {
        let rate = cold_water(HOSPITAL).unwrap();
        assert_eq!(rate.unit, OccupancyUnit::Bed);
        assert_eq!(rate.liters_per_unit_day, 500.0);
        assert!(cold_water(OFFICE).is_none());
    }

    #[test]
    fn test_hot_water_rows() {
        let rate = hot_water(RESTAURANT).unwrap();
        assert_eq!(rate.unit, OccupancyUnit::Cover);
        assert_eq!(rate.liters_per_unit_day, 6.0);
        assert_eq!(rate.kw_per_unit, 0.19);
        assert!(hot_water(OFFICE_WITH_CAFETERIA).is_none());
    }

    #[test]
    fn test_static_keys() {
        assert_eq!(cold_water_key(" School "), Some(SCHOOL));
        assert_eq!(hot_water_key("Office"), Some(OFFICE));
        assert_eq!(hot_water_key("Gym"), None);
    }
}
