//! # Electrical Demand
//!
//! Normal-supply power per zone from Table 11 (or override). Supplementary
//! supply is computed only for zones flagged for it, from Table 12 (or
//! override). A zone without the flag contributes 0 kW, not an undefined
//! value: no supplementary supply is a valid state.
//!
//! The grand total selects the suggested service connection:
//!
//! | Grand total      | Service        |
//! |------------------|----------------|
//! | < 400 kW         | Low voltage    |
//! | ≥ 400 kW         | Medium voltage |
//!
//! ## Motor Starting
//!
//! Motors listed in the settings get an informational current estimate,
//! independent of the zone table:
//!
//! ```text
//! I_rated = P·1000 / (√3 · V · pf · η)
//! I_start = I_rated × starting multiple
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{effective_zones, product, sum_defined, CalcOutput};
use crate::errors::CalcResult;
use crate::settings::{MotorInput, Settings};
use crate::tables::electrical::{self, MEDIUM_VOLTAGE_THRESHOLD_KW, UTILITY_RESERVE_THRESHOLD_KW};
use crate::tables::manual_ref;
use crate::units::w_to_kw;
use crate::warnings::{CalcModule, Warning};
use crate::zone::Zone;

/// Suggested electrical service connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ServiceCategory {
    #[default]
    LowVoltage,
    MediumVoltage,
}

impl ServiceCategory {
    /// Category for a total demand; exactly 400 kW is medium voltage.
    pub fn for_demand(total_kw: f64) -> Self {
        if total_kw < MEDIUM_VOLTAGE_THRESHOLD_KW {
            ServiceCategory::LowVoltage
        } else {
            ServiceCategory::MediumVoltage
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ServiceCategory::LowVoltage => "Low voltage",
            ServiceCategory::MediumVoltage => "Medium voltage",
        }
    }
}

impl std::fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Per-zone electrical results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectricalRow {
    pub id: u32,
    pub zone: String,
    pub usage: String,
    pub area_m2: f64,
    /// Table 11 value or override (W/m²)
    pub normal_w_m2: Option<f64>,
    pub normal_kw: Option<f64>,
    /// Supplementary supply applies to this zone
    pub supplementary: bool,
    /// Table 12 value or override (W/m²); `None` when not flagged
    pub supplementary_w_m2: Option<f64>,
    pub supplementary_kw: f64,
}

/// Motor starting-current estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotorRow {
    pub name: String,
    pub power_kw: f64,
    pub voltage_v: f64,
    pub power_factor: f64,
    pub efficiency: f64,
    pub rated_current_a: f64,
    pub starting_multiple: f64,
    pub starting_current_a: f64,
}

/// Electrical totals.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ElectricalTotals {
    pub normal_kw: f64,
    pub supplementary_kw: f64,
    pub total_kw: f64,
    pub service: ServiceCategory,
    /// Above 100 kW the utility may require a reserved room
    pub utility_reserve_advised: bool,
    pub motors: Vec<MotorRow>,
}

/// Compute electrical demand and the suggested service category.
pub fn compute_electrical_demand(
    zones: &[Zone],
    settings: &Settings,
) -> CalcResult<CalcOutput<ElectricalRow, ElectricalTotals>> {
    let zones = effective_zones(zones, settings);

    let mut warnings = Vec::new();
    let mut rows = Vec::with_capacity(zones.len());

    for zone in zones.iter() {
        let name = zone.display_name();
        let usage = zone.usage_key();
        let area = zone.area();

        let normal_w_m2 = zone
            .overrides
            .electrical()
            .or_else(|| electrical::normal_w_m2(usage));
        if normal_w_m2.is_none() {
            warnings.push(Warning::new(
                CalcModule::Electrical,
                &name,
                format!(
                    "No specific power for usage '{}' ({}). Enter an override.",
                    usage,
                    manual_ref::TABLE_11
                ),
            ));
        }

        let supplementary_w_m2 = if zone.supplementary_supply {
            let value = zone
                .overrides
                .electrical_supplementary()
                .or_else(|| electrical::supplementary_w_m2(usage));
            if value.is_none() {
                warnings.push(Warning::new(
                    CalcModule::Electrical,
                    &name,
                    format!(
                        "Supplementary supply is enabled but {} has no value for '{}'. Enter an override.",
                        manual_ref::TABLE_12,
                        usage
                    ),
                ));
            }
            value
        } else {
            None
        };

        rows.push(ElectricalRow {
            id: zone.id,
            zone: name,
            usage: usage.to_string(),
            area_m2: area,
            normal_w_m2,
            normal_kw: product(normal_w_m2, Some(area)).map(w_to_kw),
            supplementary: zone.supplementary_supply,
            supplementary_w_m2,
            supplementary_kw: supplementary_w_m2.map_or(0.0, |w| w_to_kw(w * area)),
        });
    }

    for motor in &settings.motors {
        if let Some(field) = motor.non_finite_field() {
            warnings.push(Warning::global(
                CalcModule::Electrical,
                format!("Motor '{}' has no valid {}. Its currents are reported as zero.", motor.name, field),
            ));
        }
    }

    let normal_kw = sum_defined(rows.iter().map(|r| r.normal_kw));
    let supplementary_kw: f64 = rows.iter().map(|r| r.supplementary_kw).sum();
    let total_kw = normal_kw + supplementary_kw;
    let totals = ElectricalTotals {
        normal_kw,
        supplementary_kw,
        total_kw,
        service: ServiceCategory::for_demand(total_kw),
        utility_reserve_advised: total_kw > UTILITY_RESERVE_THRESHOLD_KW,
        motors: settings.motors.iter().map(motor_currents).collect(),
    };

    debug!(
        zones = rows.len(),
        warnings = warnings.len(),
        total_kw,
        service = %totals.service,
        "electrical demand computed"
    );

    Ok(CalcOutput { rows, warnings, totals })
}

/// Rated and starting current of a three-phase motor.
///
/// A motor with no power, with a voltage, power factor or efficiency that
/// is not positive, or with any non-numeric field reports zero current.
pub fn motor_currents(motor: &MotorInput) -> MotorRow {
    let denominator = 3f64.sqrt() * motor.voltage_v * motor.power_factor * motor.efficiency;
    let usable = motor.non_finite_field().is_none() && motor.power_kw > 0.0 && denominator > 0.0;
    let rated_current_a = if usable {
        motor.power_kw * 1000.0 / denominator
    } else {
        0.0
    };

    MotorRow {
        name: motor.name.clone(),
        power_kw: motor.power_kw,
        voltage_v: motor.voltage_v,
        power_factor: motor.power_factor,
        efficiency: motor.efficiency,
        rated_current_a,
        starting_multiple: motor.starting_multiple,
        starting_current_a: if usable { rated_current_a * motor.starting_multiple } else { 0.0 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone::ZoneOverrides;
    use approx::assert_relative_eq;

    #[test]
    fn test_office_scenario() {
        let zones = vec![
            Zone::new(1, "Office", 4500.0, "D1"),
            Zone::new(2, "Office", 1000.0, "D1"),
        ];
        let out = compute_electrical_demand(&zones, &Settings::default()).unwrap();

        assert_relative_eq!(out.rows[0].normal_kw.unwrap(), 450.0, epsilon = 1e-9);
        assert_relative_eq!(out.totals.total_kw, 550.0, epsilon = 1e-9);
        assert_eq!(out.totals.supplementary_kw, 0.0);
        assert_eq!(out.totals.service, ServiceCategory::MediumVoltage);
        assert!(out.totals.utility_reserve_advised);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_service_threshold() {
        assert_eq!(ServiceCategory::for_demand(400.0), ServiceCategory::MediumVoltage);
        assert_eq!(ServiceCategory::for_demand(399.99), ServiceCategory::LowVoltage);
        assert_eq!(ServiceCategory::for_demand(0.0), ServiceCategory::LowVoltage);

        // 4000 m² × 100 W/m² = exactly 400 kW
        let zones = vec![Zone::new(1, "Office", 4000.0, "D1")];
        let out = compute_electrical_demand(&zones, &Settings::default()).unwrap();
        assert_eq!(out.totals.total_kw, 400.0);
        assert_eq!(out.totals.service, ServiceCategory::MediumVoltage);
    }

    #[test]
    fn test_supplementary_supply() {
        let zones = vec![
            Zone::new(1, "Office", 1000.0, "D1").with_supplementary_supply(true),
            Zone::new(2, "Office", 1000.0, "D1"),
        ];
        let out = compute_electrical_demand(&zones, &Settings::default()).unwrap();

        assert_relative_eq!(out.rows[0].supplementary_kw, 30.0, epsilon = 1e-9);
        assert_eq!(out.rows[1].supplementary_w_m2, None);
        assert_eq!(out.rows[1].supplementary_kw, 0.0);
        assert_relative_eq!(out.totals.supplementary_kw, 30.0, epsilon = 1e-9);
        assert_relative_eq!(out.totals.total_kw, 230.0, epsilon = 1e-9);
    }

    #[test]
    fn test_missing_supplementary_value_is_zero_with_warning() {
        let zones = vec![Zone::new(1, "Archive", 1000.0, "D1").with_supplementary_supply(true)];
        let out = compute_electrical_demand(&zones, &Settings::default()).unwrap();

        assert_eq!(out.rows[0].supplementary_kw, 0.0);
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].message.contains("Table 12"));
        assert_relative_eq!(out.totals.total_kw, 60.0, epsilon = 1e-9);
        assert!(!out.totals.utility_reserve_advised);
    }

    #[test]
    fn test_missing_normal_value_is_undefined() {
        let zones = vec![
            Zone::new(1, "Data center", 500.0, "D1"),
            Zone::new(2, "Data center", 500.0, "D1").with_overrides(ZoneOverrides {
                electrical_w_m2: Some(1000.0),
                ..Default::default()
            }),
        ];
        let out = compute_electrical_demand(&zones, &Settings::default()).unwrap();
        assert_eq!(out.rows[0].normal_kw, None);
        assert_relative_eq!(out.totals.normal_kw, 500.0, epsilon = 1e-9);
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].zone, "Zone 1");
    }

    #[test]
    fn test_motor_currents() {
        let motor = MotorInput::new("Chilled water pump", 15.0);
        let row = motor_currents(&motor);
        let expected = 15_000.0 / (3f64.sqrt() * 400.0 * 0.85 * 0.90);
        assert_relative_eq!(row.rated_current_a, expected, epsilon = 1e-9);
        assert_relative_eq!(row.starting_current_a, expected * 6.0, epsilon = 1e-9);

        let idle = MotorInput::new("Spare", 0.0);
        assert_eq!(motor_currents(&idle).rated_current_a, 0.0);

        let mut broken = MotorInput::new("Broken", 5.0);
        broken.voltage_v = 0.0;
        assert_eq!(motor_currents(&broken).starting_current_a, 0.0);
    }

    #[test]
    fn test_motors_listed_in_totals() {
        let settings = Settings::default()
            .with_motor(MotorInput::new("Fan", 7.5))
            .with_motor(MotorInput::new("Pump", 11.0));
        let out = compute_electrical_demand(&[], &settings).unwrap();
        assert_eq!(out.totals.motors.len(), 2);
        assert_eq!(out.totals.motors[1].name, "Pump");
    }

    #[test]
    fn test_non_numeric_motor_warns_and_keeps_demand() {
        let zones = vec![Zone::new(1, "Office", 4500.0, "D1")];
        let mut motor = MotorInput::new("Pump", 11.0);
        motor.voltage_v = f64::NAN;
        let settings = Settings::default().with_motor(motor);

        let out = compute_electrical_demand(&zones, &settings).unwrap();
        assert_relative_eq!(out.totals.total_kw, 450.0, epsilon = 1e-9);
        assert_eq!(out.totals.motors[0].rated_current_a, 0.0);
        assert_eq!(out.totals.motors[0].starting_current_a, 0.0);
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].message.contains("voltage_v"));
    }
}
