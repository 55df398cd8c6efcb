//! # Climate Loads
//!
//! Cooling and heating power per zone from the manual's specific loads and
//! climate correction factors.
//!
//! ```text
//! specific load  = override | Table 5/7 (usage × load level)
//! factor         = Table 6/8 (climate zone)
//! power (kW)     = area × specific load × factor / 1000
//! generator (kW) = Σ power × oversize
//! ```
//!
//! A zone whose specific load or factor is undefined gets no power and is
//! left out of the totals. A climate code listed in several rows of a
//! correction table resolves to the largest factor; that choice is reported
//! once per run as a building-wide warning.
//!
//! ## Example
//!
//! ```rust
//! use predim_core::calculations::climate::compute_climate_loads;
//! use predim_core::settings::Settings;
//! use predim_core::zone::Zone;
//!
//! let zones = vec![Zone::new(1, "Office", 4500.0, "D1")];
//! let out = compute_climate_loads(&zones, &Settings::default()).unwrap();
//!
//! println!("Cooling: {:.1} kW", out.totals.cooling_kw);
//! println!("Heating generator: {:.1} kW", out.totals.heating_generator_kw);
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{effective_zones, product, sum_defined, CalcOutput};
use crate::errors::CalcResult;
use crate::settings::{checked_setting, Settings, DEFAULT_COOLING_OVERSIZE, DEFAULT_HEATING_OVERSIZE};
use crate::tables::{climate, manual_ref, FactorMatch};
use crate::units::w_to_kw;
use crate::warnings::{CalcModule, Warning};
use crate::zone::{LoadLevel, Zone};

/// Per-zone climate results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateRow {
    pub id: u32,
    pub zone: String,
    pub usage: String,
    pub area_m2: f64,
    pub climate_zone: String,
    pub load_level: LoadLevel,

    /// Table 5 value or override (W/m²)
    pub cooling_base_w_m2: Option<f64>,
    /// Table 6 factor
    pub cooling_factor: Option<f64>,
    /// Corrected cooling load (W/m²)
    pub cooling_w_m2: Option<f64>,
    pub cooling_kw: Option<f64>,

    /// Table 7 value or override (W/m²)
    pub heating_base_w_m2: Option<f64>,
    /// Table 8 factor
    pub heating_factor: Option<f64>,
    /// Corrected heating load (W/m²)
    pub heating_w_m2: Option<f64>,
    pub heating_kw: Option<f64>,
}

/// Building totals (kW).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClimateTotals {
    pub cooling_kw: f64,
    pub heating_kw: f64,
    /// Cooling total × cooling oversize
    pub cooling_generator_kw: f64,
    /// Heating total × heating oversize
    pub heating_generator_kw: f64,
}

/// Compute cooling and heating loads for every zone.
pub fn compute_climate_loads(zones: &[Zone], settings: &Settings) -> CalcResult<CalcOutput<ClimateRow, ClimateTotals>> {
    let zones = effective_zones(zones, settings);

    let mut warnings = Vec::new();
    // (table, code) pairs whose ambiguity was already reported
    let mut reported: BTreeSet<(&'static str, String)> = BTreeSet::new();
    let mut rows = Vec::with_capacity(zones.len());

    for zone in zones.iter() {
        let name = zone.display_name();
        let usage = zone.usage_key();
        let code = zone.climate_code();
        let area = zone.area();

        // Cooling
        let cooling_base = zone
            .overrides
            .cooling()
            .or_else(|| climate::cooling_w_m2(usage, zone.load_level));
        if cooling_base.is_none() {
            warnings.push(Warning::new(
                CalcModule::Climate,
                &name,
                format!(
                    "No cooling load for usage '{}' ({}). Enter an override.",
                    usage,
                    manual_ref::TABLE_5
                ),
            ));
        }
        let cooling_factor = resolve(
            climate::cooling_factor(code),
            code,
            manual_ref::TABLE_6,
            "cooling",
            &name,
            &mut reported,
            &mut warnings,
        );

        // Heating
        let heating_base = zone
            .overrides
            .heating()
            .or_else(|| climate::heating_w_m2(usage, zone.load_level));
        if heating_base.is_none() {
            warnings.push(Warning::new(
                CalcModule::Climate,
                &name,
                format!(
                    "No heating load for usage '{}' ({}). Enter an override.",
                    usage,
                    manual_ref::TABLE_7
                ),
            ));
        }
        let heating_factor = resolve(
            climate::heating_factor(code),
            code,
            manual_ref::TABLE_8,
            "heating",
            &name,
            &mut reported,
            &mut warnings,
        );

        let cooling_w_m2 = product(cooling_base, cooling_factor);
        let heating_w_m2 = product(heating_base, heating_factor);

        rows.push(ClimateRow {
            id: zone.id,
            zone: name,
            usage: usage.to_string(),
            area_m2: area,
            climate_zone: code.to_string(),
            load_level: zone.load_level,
            cooling_base_w_m2: cooling_base,
            cooling_factor,
            cooling_w_m2,
            cooling_kw: cooling_w_m2.map(|w| w_to_kw(w * area)),
            heating_base_w_m2: heating_base,
            heating_factor,
            heating_w_m2,
            heating_kw: heating_w_m2.map(|w| w_to_kw(w * area)),
        });
    }

    let cooling_oversize = checked_setting(
        CalcModule::Climate,
        "cooling_oversize",
        settings.cooling_oversize,
        DEFAULT_COOLING_OVERSIZE,
        &mut warnings,
    );
    let heating_oversize = checked_setting(
        CalcModule::Climate,
        "heating_oversize",
        settings.heating_oversize,
        DEFAULT_HEATING_OVERSIZE,
        &mut warnings,
    );

    let cooling_kw = sum_defined(rows.iter().map(|r| r.cooling_kw));
    let heating_kw = sum_defined(rows.iter().map(|r| r.heating_kw));
    let totals = ClimateTotals {
        cooling_kw,
        heating_kw,
        cooling_generator_kw: cooling_kw * cooling_oversize,
        heating_generator_kw: heating_kw * heating_oversize,
    };

    debug!(zones = rows.len(), warnings = warnings.len(), cooling_kw, heating_kw, "climate loads computed");

    Ok(CalcOutput { rows, warnings, totals })
}

/// Turn a factor lookup into a value, recording the warning it calls for.
fn resolve(
    found: FactorMatch,
    code: &str,
    table: &'static str,
    kind: &str,
    zone: &str,
    reported: &mut BTreeSet<(&'static str, String)>,
    warnings: &mut Vec<Warning>,
) -> Option<f64> {
    match &found {
        FactorMatch::NotFound => warnings.push(Warning::new(
            CalcModule::Climate,
            zone,
            format!("Climate zone '{}' not found in {} ({}).", code, table, kind),
        )),
        FactorMatch::Ambiguous { chosen, .. } => {
            if reported.insert((table, code.to_string())) {
                warnings.push(Warning::global(
                    CalcModule::Climate,
                    format!(
                        "Climate zone '{}' appears in more than one row of {}. Using the conservative factor {:.2}.",
                        code, table, chosen
                    ),
                ));
            }
        }
        FactorMatch::Unique(_) => {}
    }
    found.value()
}
