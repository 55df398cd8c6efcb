//! # Building Settings
//!
//! One [`Settings`] value describes the building-wide configuration every
//! calculator reads: oversizing multipliers, table mappings, parking and
//! fire-protection parameters and gross floor areas.
//!
//! Settings are immutable inputs. Calculators take `&Settings`; the
//! `with_*` builders consume a value and return the modified copy.
//!
//! ## JSON Example
//!
//! Every key is optional and falls back to its documented default:
//!
//! ```json
//! {
//!   "heating_oversize": 1.15,
//!   "all_air_active": true,
//!   "all_air_typology_map": { "Bank building": "Office - Private offices" },
//!   "parking": { "spaces": 80, "mode": "SmokeControl" },
//!   "fire": { "active": true },
//!   "gfa_above_m2": 5000.0,
//!   "gfa_below_m2": 1000.0
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::warnings::{CalcModule, Warning};

/// Default cooling generator oversizing multiplier
pub const DEFAULT_COOLING_OVERSIZE: f64 = 1.0;
/// Default heating generator oversizing multiplier
pub const DEFAULT_HEATING_OVERSIZE: f64 = 1.1;

// ============================================================================
// Parking
// ============================================================================

/// Basis for the below-grade garage ventilation rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ParkingMode {
    /// General air quality (120 L/s supply, 120 L/s extraction per space)
    #[default]
    Sanitary,
    /// Smoke control (120 L/s supply, 150 L/s extraction per space)
    SmokeControl,
}

impl ParkingMode {
    pub const ALL: [ParkingMode; 2] = [ParkingMode::Sanitary, ParkingMode::SmokeControl];

    /// Default (supply, extraction) rates in L/s per space
    pub fn default_rates(&self) -> (f64, f64) {
        match self {
            ParkingMode::Sanitary => (120.0, 120.0),
            ParkingMode::SmokeControl => (120.0, 150.0),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ParkingMode::Sanitary => "Sanitary",
            ParkingMode::SmokeControl => "Smoke control",
        }
    }
}

impl std::fmt::Display for ParkingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Below-grade parking ventilation inputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParkingSettings {
    /// Number of parking spaces
    pub spaces: u32,
    pub mode: ParkingMode,
    /// Supply rate override (L/s per space)
    pub supply_ls_per_space: Option<f64>,
    /// Extraction rate override (L/s per space)
    pub extract_ls_per_space: Option<f64>,
}

impl ParkingSettings {
    /// Supply rate in effect. A zero, negative or non-numeric override
    /// falls back to the mode default.
    pub fn supply_rate(&self) -> f64 {
        positive(self.supply_ls_per_space).unwrap_or_else(|| self.mode.default_rates().0)
    }

    /// Extraction rate in effect, with the same fallback as [`Self::supply_rate`].
    pub fn extract_rate(&self) -> f64 {
        positive(self.extract_ls_per_space).unwrap_or_else(|| self.mode.default_rates().1)
    }
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

// ============================================================================
// Fire protection
// ============================================================================

/// Fire-protection water reserve inputs.
///
/// Ratios are L/s per 1000 m² of gross floor area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireProtectionSettings {
    /// Fire protection is part of the project
    pub active: bool,
    /// Derive flows from areas; when false the manual flows are used
    pub automatic: bool,
    pub hose_ratio_building: f64,
    pub hose_ratio_parking: f64,
    pub sprinkler_ratio_building: f64,
    pub sprinkler_ratio_parking: f64,
    /// Hose reserve duration (h)
    pub hose_duration_h: f64,
    /// Sprinkler reserve duration (h)
    pub sprinkler_duration_h: f64,
    pub hose_manual_flow_ls: f64,
    pub sprinkler_manual_flow_ls: f64,
    /// Adds an informational gas-extinguishing row
    pub gas_extinguishing: bool,
}

impl Default for FireProtectionSettings {
    fn default() -> Self {
        FireProtectionSettings {
            active: false,
            automatic: true,
            hose_ratio_building: 3.33,
            hose_ratio_parking: 0.0,
            sprinkler_ratio_building: 25.0,
            sprinkler_ratio_parking: 25.0,
            hose_duration_h: 1.0,
            sprinkler_duration_h: 1.5,
            hose_manual_flow_ls: 0.0,
            sprinkler_manual_flow_ls: 0.0,
            gas_extinguishing: false,
        }
    }
}

// ============================================================================
// Motors
// ============================================================================

/// A motor for the starting-current estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotorInput {
    pub name: String,
    pub power_kw: f64,
    pub voltage_v: f64,
    pub power_factor: f64,
    pub efficiency: f64,
    /// Starting current as a multiple of rated current
    pub starting_multiple: f64,
}

impl MotorInput {
    pub fn new(name: impl Into<String>, power_kw: f64) -> Self {
        MotorInput {
            name: name.into(),
            power_kw,
            ..Default::default()
        }
    }

    /// Name of the first field that is not a finite number.
    pub fn non_finite_field(&self) -> Option<&'static str> {
        [
            ("power_kw", self.power_kw),
            ("voltage_v", self.voltage_v),
            ("power_factor", self.power_factor),
            ("efficiency", self.efficiency),
            ("starting_multiple", self.starting_multiple),
        ]
        .into_iter()
        .find(|(_, value)| !value.is_finite())
        .map(|(name, _)| name)
    }
}

impl Default for MotorInput {
    fn default() -> Self {
        MotorInput {
            name: "Motor".to_string(),
            power_kw: 0.0,
            voltage_v: 400.0,
            power_factor: 0.85,
            efficiency: 0.90,
            starting_multiple: 6.0,
        }
    }
}

// ============================================================================
// Settings
// ============================================================================

/// Building-wide calculation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Cooling generator oversizing multiplier
    pub cooling_oversize: f64,
    /// Heating generator oversizing multiplier
    pub heating_oversize: f64,

    /// When set, every zone is computed with this usage
    pub building_usage: Option<String>,
    /// When set, every zone is computed in this climate zone
    pub building_climate_zone: Option<String>,

    /// Compute all-air treated flows (Table 9)
    pub all_air_active: bool,
    /// Usage → Table 9 typology
    pub all_air_typology_map: BTreeMap<String, String>,
    /// Usage → Table 13 row
    pub cold_water_map: BTreeMap<String, String>,
    /// Usage → Table 14 row
    pub hot_water_map: BTreeMap<String, String>,

    /// Table 2 installations to reserve space for; `None` selects all
    pub installations: Option<Vec<String>>,

    pub parking: ParkingSettings,
    pub fire: FireProtectionSettings,

    /// Gross floor area above grade (m²)
    pub gfa_above_m2: f64,
    /// Gross floor area below grade (m²)
    pub gfa_below_m2: f64,

    pub motors: Vec<MotorInput>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            cooling_oversize: DEFAULT_COOLING_OVERSIZE,
            heating_oversize: DEFAULT_HEATING_OVERSIZE,
            building_usage: None,
            building_climate_zone: None,
            all_air_active: false,
            all_air_typology_map: BTreeMap::new(),
            cold_water_map: BTreeMap::new(),
            hot_water_map: BTreeMap::new(),
            installations: None,
            parking: ParkingSettings::default(),
            fire: FireProtectionSettings::default(),
            gfa_above_m2: 0.0,
            gfa_below_m2: 0.0,
            motors: Vec::new(),
        }
    }
}

impl Settings {
    pub fn with_oversize(mut self, cooling: f64, heating: f64) -> Self {
        self.cooling_oversize = cooling;
        self.heating_oversize = heating;
        self
    }

    pub fn with_building_usage(mut self, usage: impl Into<String>) -> Self {
        self.building_usage = Some(usage.into());
        self
    }

    pub fn with_building_climate_zone(mut self, code: impl Into<String>) -> Self {
        self.building_climate_zone = Some(code.into());
        self
    }

    pub fn with_all_air(mut self, active: bool) -> Self {
        self.all_air_active = active;
        self
    }

    pub fn with_all_air_typology(mut self, usage: impl Into<String>, typology: impl Into<String>) -> Self {
        self.all_air_typology_map.insert(usage.into(), typology.into());
        self
    }

    pub fn with_cold_water_key(mut self, usage: impl Into<String>, key: impl Into<String>) -> Self {
        self.cold_water_map.insert(usage.into(), key.into());
        self
    }

    pub fn with_hot_water_key(mut self, usage: impl Into<String>, key: impl Into<String>) -> Self {
        self.hot_water_map.insert(usage.into(), key.into());
        self
    }

    pub fn with_installations<I, S>(mut self, installations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.installations = Some(installations.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_parking(mut self, parking: ParkingSettings) -> Self {
        self.parking = parking;
        self
    }

    pub fn with_fire(mut self, fire: FireProtectionSettings) -> Self {
        self.fire = fire;
        self
    }

    pub fn with_gross_areas(mut self, above_m2: f64, below_m2: f64) -> Self {
        self.gfa_above_m2 = above_m2;
        self.gfa_below_m2 = below_m2;
        self
    }

    pub fn with_motor(mut self, motor: MotorInput) -> Self {
        self.motors.push(motor);
        self
    }

    /// Explicit mapping for a usage, ignoring blank entries.
    pub(crate) fn mapped<'a>(map: &'a BTreeMap<String, String>, usage: &str) -> Option<&'a str> {
        map.get(usage.trim())
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
    }

    /// Strict check of every numeric setting, used when a project file is
    /// loaded.
    ///
    /// Multipliers, areas, ratios, durations and flow rates must be finite
    /// and non-negative. Motor fields only need to be finite. Calculators do
    /// not call this: each reads its own fields through [`checked_setting`]
    /// and keeps going.
    pub fn validate(&self) -> CalcResult<()> {
        non_negative("cooling_oversize", self.cooling_oversize)?;
        non_negative("heating_oversize", self.heating_oversize)?;
        non_negative("gfa_above_m2", self.gfa_above_m2)?;
        non_negative("gfa_below_m2", self.gfa_below_m2)?;

        if let Some(rate) = self.parking.supply_ls_per_space {
            non_negative("parking.supply_ls_per_space", rate)?;
        }
        if let Some(rate) = self.parking.extract_ls_per_space {
            non_negative("parking.extract_ls_per_space", rate)?;
        }

        let fire = &self.fire;
        for (field, value) in [
            ("fire.hose_ratio_building", fire.hose_ratio_building),
            ("fire.hose_ratio_parking", fire.hose_ratio_parking),
            ("fire.sprinkler_ratio_building", fire.sprinkler_ratio_building),
            ("fire.sprinkler_ratio_parking", fire.sprinkler_ratio_parking),
            ("fire.hose_duration_h", fire.hose_duration_h),
            ("fire.sprinkler_duration_h", fire.sprinkler_duration_h),
            ("fire.hose_manual_flow_ls", fire.hose_manual_flow_ls),
            ("fire.sprinkler_manual_flow_ls", fire.sprinkler_manual_flow_ls),
        ] {
            non_negative(field, value)?;
        }

        for (i, motor) in self.motors.iter().enumerate() {
            if let Some(name) = motor.non_finite_field() {
                return Err(CalcError::invalid_input(
                    format!("motors[{}].{}", i, name),
                    "non-finite",
                    "Must be a finite number",
                ));
            }
        }

        Ok(())
    }
}

/// Read a numeric setting that must be finite and non-negative.
///
/// An out-of-range value is replaced by `fallback` and reported as a global
/// warning for `module`.
pub(crate) fn checked_setting(
    module: CalcModule,
    field: &str,
    value: f64,
    fallback: f64,
    warnings: &mut Vec<Warning>,
) -> f64 {
    if value.is_finite() && value >= 0.0 {
        return value;
    }
    warnings.push(Warning::global(
        module,
        format!("Setting '{}' has an invalid value ({}). Using {}.", field, value, fallback),
    ));
    fallback
}

fn non_negative(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() {
        return Err(CalcError::invalid_input(field, value.to_string(), "Must be a finite number"));
    }
    if value < 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Must not be negative"));
    }
    Ok(())
}
