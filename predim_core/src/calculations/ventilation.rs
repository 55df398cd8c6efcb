//! # Ventilation and All-Air Flow
//!
//! Three flows, each totalled on its own:
//!
//! - **Exterior ventilation** per zone: area × (override | Table 10).
//! - **All-air treated flow** per zone, only when `all_air_active`:
//!   area × Table 9 (typology × exposure × load level). The typology is the
//!   settings mapping for the usage, else the default rule table.
//! - **Garage ventilation** below grade: spaces × supply / extraction rate.
//!
//! Garage flows answer a different requirement than general ventilation and
//! are never added to the above-grade total.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{effective_zones, product, sum_defined, CalcOutput};
use crate::errors::CalcResult;
use crate::settings::{checked_setting, ParkingMode, Settings};
use crate::tables::air::{self, AllAirCell};
use crate::tables::{manual_ref, rules};
use crate::units::lps_to_m3h;
use crate::warnings::{CalcModule, Warning};
use crate::zone::{Exposure, LoadLevel, Zone};

/// Per-zone ventilation results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VentilationRow {
    pub id: u32,
    pub zone: String,
    pub usage: String,
    pub area_m2: f64,
    pub load_level: LoadLevel,
    pub exposure: Exposure,

    /// Table 10 value or override (L/s·m²)
    pub ventilation_ls_m2: Option<f64>,
    pub ventilation_ls: Option<f64>,

    /// Table 9 typology used (all-air only)
    pub all_air_typology: Option<String>,
    pub all_air_ls_m2: Option<f64>,
    pub all_air_ls: Option<f64>,
}

/// Ventilation totals. Above-grade and garage flows are kept apart.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VentilationTotals {
    pub above_grade_ls: f64,
    pub above_grade_m3h: f64,

    pub parking_spaces: u32,
    pub parking_mode: ParkingMode,
    pub garage_supply_ls: f64,
    pub garage_supply_m3h: f64,
    pub garage_extract_ls: f64,
    pub garage_extract_m3h: f64,

    pub all_air_ls: f64,
    pub all_air_m3h: f64,
}

/// Compute exterior ventilation, all-air treated flow and garage ventilation.
pub fn compute_ventilation_and_all_air(
    zones: &[Zone],
    settings: &Settings,
) -> CalcResult<CalcOutput<VentilationRow, VentilationTotals>> {
    let zones = effective_zones(zones, settings);

    let mut warnings = Vec::new();
    let mut rows = Vec::with_capacity(zones.len());

    for zone in zones.iter() {
        let name = zone.display_name();
        let usage = zone.usage_key();
        let area = zone.area();

        let ventilation_ls_m2 = zone
            .overrides
            .ventilation()
            .or_else(|| air::ventilation_ls_m2(usage));
        if ventilation_ls_m2.is_none() {
            warnings.push(Warning::new(
                CalcModule::Ventilation,
                &name,
                format!(
                    "No ventilation rate for usage '{}' ({}). Enter an override.",
                    usage,
                    manual_ref::TABLE_10
                ),
            ));
        }

        let (all_air_typology, all_air_ls_m2) = if settings.all_air_active {
            all_air_rate(zone, &name, settings, &mut warnings)
        } else {
            (None, None)
        };

        rows.push(VentilationRow {
            id: zone.id,
            zone: name,
            usage: usage.to_string(),
            area_m2: area,
            load_level: zone.load_level,
            exposure: zone.exposure,
            ventilation_ls_m2,
            ventilation_ls: product(ventilation_ls_m2, Some(area)),
            all_air_typology,
            all_air_ls_m2,
            all_air_ls: product(all_air_ls_m2, Some(area)),
        });
    }

    // Garage (below grade)
    let parking = &settings.parking;
    let below_m2 = checked_setting(CalcModule::Ventilation, "gfa_below_m2", settings.gfa_below_m2, 0.0, &mut warnings);
    let (garage_supply_ls, garage_extract_ls) = if parking.spaces > 0 {
        for (field, value) in [
            ("parking.supply_ls_per_space", parking.supply_ls_per_space),
            ("parking.extract_ls_per_space", parking.extract_ls_per_space),
        ] {
            if let Some(v) = value.filter(|v| !(v.is_finite() && *v >= 0.0)) {
                warnings.push(Warning::global(
                    CalcModule::Ventilation,
                    format!("Setting '{}' has an invalid value ({}). Using the {} default.", field, v, parking.mode),
                ));
            }
        }
        let spaces = f64::from(parking.spaces);
        (spaces * parking.supply_rate(), spaces * parking.extract_rate())
    } else {
        if below_m2 > 0.0 {
            warnings.push(Warning::global(
                CalcModule::Ventilation,
                "Below-grade area is present but no parking spaces are given. Enter the number of spaces to size garage ventilation.",
            ));
        }
        (0.0, 0.0)
    };

    let above_grade_ls = sum_defined(rows.iter().map(|r| r.ventilation_ls));
    let all_air_ls = sum_defined(rows.iter().map(|r| r.all_air_ls));
    let totals = VentilationTotals {
        above_grade_ls,
        above_grade_m3h: lps_to_m3h(above_grade_ls),
        parking_spaces: parking.spaces,
        parking_mode: parking.mode,
        garage_supply_ls,
        garage_supply_m3h: lps_to_m3h(garage_supply_ls),
        garage_extract_ls,
        garage_extract_m3h: lps_to_m3h(garage_extract_ls),
        all_air_ls,
        all_air_m3h: lps_to_m3h(all_air_ls),
    };

    debug!(
        zones = rows.len(),
        warnings = warnings.len(),
        above_grade_ls,
        all_air_ls,
        "ventilation computed"
    );

    Ok(CalcOutput { rows, warnings, totals })
}

/// Resolve the Table 9 typology and rate for one zone.
fn all_air_rate(
    zone: &Zone,
    name: &str,
    settings: &Settings,
    warnings: &mut Vec<Warning>,
) -> (Option<String>, Option<f64>) {
    let usage = zone.usage_key();
    let typology = Settings::mapped(&settings.all_air_typology_map, usage)
        .or_else(|| rules::ALL_AIR_TYPOLOGY.resolve(usage));

    let Some(typology) = typology else {
        warnings.push(Warning::new(
            CalcModule::AllAir,
            name,
            format!(
                "Usage '{}' is not mapped to a {} typology. Select one in the all-air mapping.",
                usage,
                manual_ref::TABLE_9
            ),
        ));
        return (None, None);
    };

    let rate = match air::all_air_ls_m2(typology, zone.exposure, zone.load_level) {
        AllAirCell::Value(v) => Some(v),
        AllAirCell::NotApplicable => {
            warnings.push(Warning::new(
                CalcModule::AllAir,
                name,
                format!(
                    "{} has no value for '{}' with exposure '{}' and load level '{}'.",
                    manual_ref::TABLE_9,
                    typology,
                    zone.exposure,
                    zone.load_level
                ),
            ));
            None
        }
        AllAirCell::UnknownTypology => {
            warnings.push(Warning::new(
                CalcModule::AllAir,
                name,
                format!(
                    "{} lookup error: typology '{}' is not in the table.",
                    manual_ref::TABLE_9,
                    typology
                ),
            ));
            None
        }
    };

    (Some(typology.to_string()), rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ParkingSettings;
    use crate::tables::air::typology;
    use crate::zone::ZoneOverrides;
    use approx::assert_relative_eq;

    #[test]
    fn test_exterior_ventilation() {
        let zones = vec![
            Zone::new(1, "Office", 4500.0, "D1"),
            Zone::new(2, "Assembly hall", 200.0, "D1"),
        ];
        let out = compute_ventilation_and_all_air(&zones, &Settings::default()).unwrap();

        assert_relative_eq!(out.rows[0].ventilation_ls.unwrap(), 5625.0, epsilon = 1e-9);
        assert_relative_eq!(out.rows[1].ventilation_ls.unwrap(), 1600.0, epsilon = 1e-9);
        assert_relative_eq!(out.totals.above_grade_ls, 7225.0, epsilon = 1e-9);
        assert_relative_eq!(out.totals.above_grade_m3h, 7225.0 * 3.6, epsilon = 1e-6);
        // All-air inactive by default
        assert_eq!(out.rows[0].all_air_ls, None);
        assert_eq!(out.totals.all_air_ls, 0.0);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_missing_ventilation_rate() {
        let zones = vec![Zone::new(1, "Theatre", 300.0, "D1")];
        let out = compute_ventilation_and_all_air(&zones, &Settings::default()).unwrap();
        assert_eq!(out.rows[0].ventilation_ls, None);
        assert_eq!(out.totals.above_grade_ls, 0.0);
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].module, CalcModule::Ventilation);

        let zones = vec![Zone::new(1, "Theatre", 300.0, "D1").with_overrides(ZoneOverrides {
            ventilation_ls_m2: Some(5.0),
            ..Default::default()
        })];
        let out = compute_ventilation_and_all_air(&zones, &Settings::default()).unwrap();
        assert_relative_eq!(out.totals.above_grade_ls, 1500.0, epsilon = 1e-9);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_all_air_default_typology() {
        let zones = vec![Zone::new(1, "Office", 1000.0, "D1")];
        let settings = Settings::default().with_all_air(true);
        let out = compute_ventilation_and_all_air(&zones, &settings).unwrap();

        let row = &out.rows[0];
        assert_eq!(row.all_air_typology.as_deref(), Some(typology::OFFICE_OPEN_PLAN));
        assert_eq!(row.all_air_ls_m2, Some(2.5));
        assert_relative_eq!(out.totals.all_air_ls, 2500.0, epsilon = 1e-9);
        assert_relative_eq!(out.totals.all_air_m3h, 9000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_all_air_not_applicable_cell() {
        // Open-plan offices have no north-facing values
        let zones = vec![Zone::new(1, "Office", 1000.0, "D1").with_exposure(Exposure::North)];
        let settings = Settings::default().with_all_air(true);
        let out = compute_ventilation_and_all_air(&zones, &settings).unwrap();

        assert_eq!(out.rows[0].all_air_ls, None);
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].module, CalcModule::AllAir);
        assert!(out.warnings[0].message.contains("no value"));
    }

    #[test]
    fn test_all_air_mapping_errors() {
        let zones = vec![
            Zone::new(1, "Archive", 100.0, "D1"),
            Zone::new(2, "Bank building", 100.0, "D1"),
        ];
        let settings = Settings::default()
            .with_all_air(true)
            .with_all_air_typology("Bank building", "Bank hall");
        let out = compute_ventilation_and_all_air(&zones, &settings).unwrap();

        let all_air: Vec<_> = out.warnings.iter().filter(|w| w.module == CalcModule::AllAir).collect();
        assert_eq!(all_air.len(), 2);
        assert!(all_air[0].message.contains("not mapped"));
        assert!(all_air[1].message.contains("lookup error"));
        assert_eq!(out.rows[1].all_air_typology.as_deref(), Some("Bank hall"));
    }

    #[test]
    fn test_explicit_mapping_beats_default() {
        let zones = vec![Zone::new(1, "Office", 100.0, "D1").with_exposure(Exposure::North)];
        let settings = Settings::default()
            .with_all_air(true)
            .with_all_air_typology("Office", typology::OFFICE_PRIVATE);
        let out = compute_ventilation_and_all_air(&zones, &settings).unwrap();
        assert_eq!(out.rows[0].all_air_ls_m2, Some(3.5));
    }

    #[test]
    fn test_garage_kept_separate() {
        let zones = vec![Zone::new(1, "Office", 1000.0, "D1")];
        let settings = Settings::default()
            .with_gross_areas(1000.0, 2500.0)
            .with_parking(ParkingSettings {
                spaces: 80,
                mode: ParkingMode::SmokeControl,
                ..Default::default()
            });
        let out = compute_ventilation_and_all_air(&zones, &settings).unwrap();

        assert_relative_eq!(out.totals.garage_supply_ls, 9600.0, epsilon = 1e-9);
        assert_relative_eq!(out.totals.garage_extract_ls, 12000.0, epsilon = 1e-9);
        assert_relative_eq!(out.totals.garage_extract_m3h, 43200.0, epsilon = 1e-6);
        assert_relative_eq!(out.totals.above_grade_ls, 1250.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_rate_override_uses_mode_default() {
        let settings = Settings::default().with_parking(ParkingSettings {
            spaces: 10,
            mode: ParkingMode::Sanitary,
            supply_ls_per_space: Some(0.0),
            extract_ls_per_space: Some(-4.0),
        });
        let out = compute_ventilation_and_all_air(&[], &settings).unwrap();

        assert_relative_eq!(out.totals.garage_supply_ls, 1200.0, epsilon = 1e-9);
        assert_relative_eq!(out.totals.garage_supply_m3h, 4320.0, epsilon = 1e-6);
        assert_relative_eq!(out.totals.garage_extract_ls, 1200.0, epsilon = 1e-9);
        // Zero means "use the default"; only the negative rate is reported
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].message.contains("parking.extract_ls_per_space"));
    }

    #[test]
    fn test_below_grade_without_spaces_warns() {
        let settings = Settings::default().with_gross_areas(0.0, 800.0);
        let out = compute_ventilation_and_all_air(&[], &settings).unwrap();
        assert_eq!(out.totals.garage_supply_ls, 0.0);
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].zone, crate::warnings::GLOBAL_SCOPE);
    }
}
