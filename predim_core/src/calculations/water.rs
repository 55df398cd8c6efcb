//! # Water and Domestic Hot Water
//!
//! Daily cold-water volume (Table 13) and hot-water volume and heating power
//! (Table 14) per zone.
//!
//! The table row is the settings mapping for the usage, else the default
//! rule table. Each row is expressed per person, bed or cover; when that
//! unit differs from the zone's resolved occupancy the calculator warns and
//! substitutes:
//!
//! - per-person rows use the zone's computed person count,
//! - per-bed and per-cover rows use the zone's own resolved quantity.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{effective_zones, sum_defined, CalcOutput};
use crate::errors::CalcResult;
use crate::settings::Settings;
use crate::tables::{manual_ref, rules, water};
use crate::units::liters_to_m3;
use crate::warnings::{CalcModule, Warning};
use crate::zone::{OccupancyUnit, Zone};

/// Per-zone water results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterRow {
    pub id: u32,
    pub zone: String,
    pub usage: String,
    pub occupancy_unit: OccupancyUnit,
    pub occupancy: f64,

    /// Table 13 row used
    pub cold_water_key: Option<String>,
    pub cold_water_l_day: Option<f64>,

    /// Table 14 row used
    pub hot_water_key: Option<String>,
    pub hot_water_l_day: Option<f64>,
    pub hot_water_kw: Option<f64>,
}

/// Water totals.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WaterTotals {
    pub cold_water_l_day: f64,
    pub cold_water_m3_day: f64,
    pub hot_water_l_day: f64,
    pub hot_water_m3_day: f64,
    pub hot_water_kw: f64,
}

/// Compute daily cold and hot water consumption for every zone.
pub fn compute_water_and_hot_water(zones: &[Zone], settings: &Settings) -> CalcResult<CalcOutput<WaterRow, WaterTotals>> {
    let zones = effective_zones(zones, settings);

    let mut warnings = Vec::new();
    let mut rows = Vec::with_capacity(zones.len());

    for zone in zones.iter() {
        let name = zone.display_name();
        let usage = zone.usage_key();
        let occupancy = zone.occupancy();

        // Cold water (Table 13)
        let cold_key = Settings::mapped(&settings.cold_water_map, usage).or_else(|| rules::COLD_WATER_KEY.resolve(usage));
        let cold_water_l_day = match cold_key {
            None => {
                warnings.push(not_mapped(CalcModule::Water, &name, usage, manual_ref::TABLE_13));
                None
            }
            Some(key) => match water::cold_water(key) {
                None => {
                    warnings.push(invalid_mapping(CalcModule::Water, &name, key, manual_ref::TABLE_13));
                    None
                }
                Some(rate) => {
                    let n = units_for(rate.unit, zone, CalcModule::Water, &name, key, manual_ref::TABLE_13, &mut warnings);
                    Some(rate.liters_per_unit_day * n)
                }
            },
        };

        // Hot water (Table 14)
        let hot_key = Settings::mapped(&settings.hot_water_map, usage).or_else(|| rules::HOT_WATER_KEY.resolve(usage));
        let (hot_water_l_day, hot_water_kw) = match hot_key {
            None => {
                warnings.push(not_mapped(CalcModule::HotWater, &name, usage, manual_ref::TABLE_14));
                (None, None)
            }
            Some(key) => match water::hot_water(key) {
                None => {
                    warnings.push(invalid_mapping(CalcModule::HotWater, &name, key, manual_ref::TABLE_14));
                    (None, None)
                }
                Some(rate) => {
                    let n = units_for(rate.unit, zone, CalcModule::HotWater, &name, key, manual_ref::TABLE_14, &mut warnings);
                    (Some(rate.liters_per_unit_day * n), Some(rate.kw_per_unit * n))
                }
            },
        };

        rows.push(WaterRow {
            id: zone.id,
            zone: name,
            usage: usage.to_string(),
            occupancy_unit: occupancy.unit,
            occupancy: occupancy.quantity,
            cold_water_key: cold_key.map(str::to_string),
            cold_water_l_day,
            hot_water_key: hot_key.map(str::to_string),
            hot_water_l_day,
            hot_water_kw,
        });
    }

    let cold_water_l_day = sum_defined(rows.iter().map(|r| r.cold_water_l_day));
    let hot_water_l_day = sum_defined(rows.iter().map(|r| r.hot_water_l_day));
    let totals = WaterTotals {
        cold_water_l_day,
        cold_water_m3_day: liters_to_m3(cold_water_l_day),
        hot_water_l_day,
        hot_water_m3_day: liters_to_m3(hot_water_l_day),
        hot_water_kw: sum_defined(rows.iter().map(|r| r.hot_water_kw)),
    };

    debug!(
        zones = rows.len(),
        warnings = warnings.len(),
        cold_water_l_day,
        hot_water_l_day,
        "water computed"
    );

    Ok(CalcOutput { rows, warnings, totals })
}

/// Quantity to multiply a table rate by, warning on a unit mismatch.
fn units_for(
    table_unit: OccupancyUnit,
    zone: &Zone,
    module: CalcModule,
    name: &str,
    key: &str,
    table: &str,
    warnings: &mut Vec<Warning>,
) -> f64 {
    let occupancy = zone.occupancy();
    if occupancy.unit == table_unit {
        return occupancy.quantity;
    }

    if table_unit == OccupancyUnit::Person {
        warnings.push(Warning::new(
            module,
            name,
            format!(
                "{} row '{}' is per person but the zone is counted per {}. Using the computed person count.",
                table, key, occupancy.unit
            ),
        ));
        zone.persons()
    } else {
        warnings.push(Warning::new(
            module,
            name,
            format!(
                "{} row '{}' is per {} but the zone gives no {}s. Using the zone's {} count.",
                table, key, table_unit, table_unit, occupancy.unit
            ),
        ));
        occupancy.quantity
    }
}

fn not_mapped(module: CalcModule, zone: &str, usage: &str, table: &str) -> Warning {
    Warning::new(
        module,
        zone,
        format!("Usage '{}' is not mapped to {}. Select a row in the water mapping.", usage, table),
    )
}

fn invalid_mapping(module: CalcModule, zone: &str, key: &str, table: &str) -> Warning {
    Warning::new(module, zone, format!("Invalid mapping to {}: '{}'.", table, key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::water::water_use;
    use approx::assert_relative_eq;

    #[test]
    fn test_office_by_density() {
        // 4500 m² × 0.08 = 360 persons
        let zones = vec![Zone::new(1, "Office", 4500.0, "D1").with_density(0.08)];
        let out = compute_water_and_hot_water(&zones, &Settings::default()).unwrap();

        let row = &out.rows[0];
        assert_eq!(row.occupancy_unit, OccupancyUnit::Person);
        assert_eq!(row.cold_water_key.as_deref(), Some(water_use::OFFICE_WITHOUT_CAFETERIA));
        assert_relative_eq!(row.cold_water_l_day.unwrap(), 5400.0, epsilon = 1e-6);
        assert_eq!(row.hot_water_key.as_deref(), Some(water_use::OFFICE));
        assert_relative_eq!(row.hot_water_l_day.unwrap(), 1800.0, epsilon = 1e-6);
        assert_relative_eq!(row.hot_water_kw.unwrap(), 57.6, epsilon = 1e-6);

        assert_relative_eq!(out.totals.cold_water_m3_day, 5.4, epsilon = 1e-9);
        assert_relative_eq!(out.totals.hot_water_m3_day, 1.8, epsilon = 1e-9);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_hotel_by_beds() {
        let zones = vec![Zone::new(1, "Hotel", 3000.0, "D1").with_beds(100.0)];
        let out = compute_water_and_hot_water(&zones, &Settings::default()).unwrap();

        assert_relative_eq!(out.totals.cold_water_l_day, 13_500.0, epsilon = 1e-6);
        assert_relative_eq!(out.totals.hot_water_l_day, 3_500.0, epsilon = 1e-6);
        assert_relative_eq!(out.totals.hot_water_kw, 112.0, epsilon = 1e-6);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_person_table_with_bed_zone_uses_person_count() {
        // Boarding school rows are per person; the zone is counted in beds
        let zones = vec![Zone::new(1, water_use::BOARDING_SCHOOL, 1000.0, "D1")
            .with_beds(50.0)
            .with_persons(80.0)];
        let out = compute_water_and_hot_water(&zones, &Settings::default()).unwrap();

        assert_relative_eq!(out.rows[0].cold_water_l_day.unwrap(), 90.0 * 80.0, epsilon = 1e-6);
        assert_relative_eq!(out.rows[0].hot_water_l_day.unwrap(), 25.0 * 80.0, epsilon = 1e-6);
        let mismatches: Vec<_> = out.warnings.iter().filter(|w| w.message.contains("per person")).collect();
        assert_eq!(mismatches.len(), 2);
        assert_eq!(mismatches[0].module, CalcModule::Water);
        assert_eq!(mismatches[1].module, CalcModule::HotWater);
    }

    #[test]
    fn test_bed_table_with_person_zone_uses_own_quantity() {
        let zones = vec![Zone::new(1, "Hospital - Inpatient ward", 1000.0, "D1").with_persons(40.0)];
        let out = compute_water_and_hot_water(&zones, &Settings::default()).unwrap();

        assert_eq!(out.rows[0].cold_water_key.as_deref(), Some(water_use::HOSPITAL));
        assert_relative_eq!(out.rows[0].cold_water_l_day.unwrap(), 500.0 * 40.0, epsilon = 1e-6);
        assert_relative_eq!(out.rows[0].hot_water_kw.unwrap(), 6.40 * 40.0, epsilon = 1e-6);
        assert_eq!(out.warnings.len(), 2);
        assert!(out.warnings[0].message.contains("per bed"));
    }

    #[test]
    fn test_unmapped_and_invalid_mapping() {
        let zones = vec![
            Zone::new(1, "Museum", 800.0, "D1"),
            Zone::new(2, "Office", 100.0, "D1").with_persons(10.0),
        ];
        let settings = Settings::default().with_cold_water_key("Office", "Office canteen");
        let out = compute_water_and_hot_water(&zones, &settings).unwrap();

        assert_eq!(out.rows[0].cold_water_l_day, None);
        assert_eq!(out.rows[0].hot_water_l_day, None);
        assert_eq!(out.rows[1].cold_water_l_day, None);
        // Hot water still resolves through the default rules
        assert_relative_eq!(out.rows[1].hot_water_l_day.unwrap(), 50.0, epsilon = 1e-9);

        let messages: Vec<_> = out.warnings.iter().map(|w| w.message.as_str()).collect();
        assert!(messages.iter().any(|m| m.contains("'Museum' is not mapped to Table 13")));
        assert!(messages.iter().any(|m| m.contains("'Museum' is not mapped to Table 14")));
        assert!(messages.iter().any(|m| m.contains("Invalid mapping to Table 13: 'Office canteen'")));
    }

    #[test]
    fn test_restaurant_by_covers() {
        let zones = vec![Zone::new(1, "Cafeteria and restaurant (general)", 400.0, "D1").with_covers(300.0)];
        let out = compute_water_and_hot_water(&zones, &Settings::default()).unwrap();
        assert_relative_eq!(out.totals.cold_water_l_day, 2100.0, epsilon = 1e-9);
        assert_relative_eq!(out.totals.hot_water_kw, 57.0, epsilon = 1e-9);
        assert!(out.warnings.is_empty());
    }
}
