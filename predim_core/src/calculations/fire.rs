//! # Fire-Protection Water Reserve
//!
//! Works from settings alone: gross floor areas above and below grade, flow
//! ratios and reserve durations. No zone table is involved.
//!
//! ```text
//! automatic flow (L/s) = above/1000 × building ratio + below/1000 × parking ratio
//! reserve (m³)         = flow × 3600 × hours / 1000
//! ```
//!
//! A term whose area or ratio is not positive contributes nothing. With
//! `automatic` off, the manual flows are used instead.
//!
//! ## Example
//!
//! ```rust
//! use predim_core::calculations::fire::compute_fire_protection_reserve;
//! use predim_core::settings::Settings;
//!
//! let settings = Settings::default().with_gross_areas(5000.0, 1000.0);
//! let out = compute_fire_protection_reserve(&settings).unwrap();
//!
//! assert!((out.totals.total_reserve_m3 - 869.94).abs() < 1e-6);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::CalcOutput;
use crate::errors::CalcResult;
use crate::settings::{checked_setting, FireProtectionSettings, Settings};
use crate::units::LitersPerSecond;
use crate::warnings::{CalcModule, Warning};

/// Fire-protection system in the reserve table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FireSystem {
    /// Hose reels (BIE)
    Hose,
    Sprinkler,
    /// Gas extinguishing, listed for information only
    GasExtinguishing,
}

impl FireSystem {
    pub fn display_name(&self) -> &'static str {
        match self {
            FireSystem::Hose => "Hose reels",
            FireSystem::Sprinkler => "Sprinklers",
            FireSystem::GasExtinguishing => "Gas extinguishing (informational)",
        }
    }
}

impl std::fmt::Display for FireSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Where a design flow came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowMode {
    /// Ratio per 1000 m² of gross floor area
    Automatic,
    Manual,
}

/// One system of the reserve table. The gas row carries no quantities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireRow {
    pub system: FireSystem,
    pub flow_ls: Option<f64>,
    pub duration_h: Option<f64>,
    pub reserve_m3: Option<f64>,
    pub flow_mode: Option<FlowMode>,
}

/// Fire-protection totals.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FireTotals {
    pub hose_flow_ls: f64,
    pub sprinkler_flow_ls: f64,
    pub hose_reserve_m3: f64,
    pub sprinkler_reserve_m3: f64,
    pub total_reserve_m3: f64,
    /// Areas the flows were derived from
    pub gfa_above_m2: f64,
    pub gfa_below_m2: f64,
}

/// Compute design flows and the water reserve volume.
pub fn compute_fire_protection_reserve(settings: &Settings) -> CalcResult<CalcOutput<FireRow, FireTotals>> {
    let mut warnings = Vec::new();
    let fire = sanitized(settings, &mut warnings);
    let above = fire_area(settings.gfa_above_m2, "gfa_above_m2", &mut warnings);
    let below = fire_area(settings.gfa_below_m2, "gfa_below_m2", &mut warnings);

    let (hose_flow_ls, sprinkler_flow_ls, mode) = if fire.automatic {
        (
            area_flow(above, fire.hose_ratio_building) + area_flow(below, fire.hose_ratio_parking),
            area_flow(above, fire.sprinkler_ratio_building) + area_flow(below, fire.sprinkler_ratio_parking),
            FlowMode::Automatic,
        )
    } else {
        (fire.hose_manual_flow_ls, fire.sprinkler_manual_flow_ls, FlowMode::Manual)
    };

    let hose_reserve_m3 = reserve_m3(hose_flow_ls, fire.hose_duration_h);
    let sprinkler_reserve_m3 = reserve_m3(sprinkler_flow_ls, fire.sprinkler_duration_h);

    let mut rows = vec![
        FireRow {
            system: FireSystem::Hose,
            flow_ls: Some(hose_flow_ls),
            duration_h: Some(fire.hose_duration_h),
            reserve_m3: Some(hose_reserve_m3),
            flow_mode: Some(mode),
        },
        FireRow {
            system: FireSystem::Sprinkler,
            flow_ls: Some(sprinkler_flow_ls),
            duration_h: Some(fire.sprinkler_duration_h),
            reserve_m3: Some(sprinkler_reserve_m3),
            flow_mode: Some(mode),
        },
    ];
    if fire.gas_extinguishing {
        rows.push(FireRow {
            system: FireSystem::GasExtinguishing,
            flow_ls: None,
            duration_h: None,
            reserve_m3: None,
            flow_mode: None,
        });
    }

    if fire.active && hose_flow_ls == 0.0 && sprinkler_flow_ls == 0.0 {
        warnings.push(Warning::global(
            CalcModule::FireProtection,
            "Design flows could not be computed (ratios or areas are zero).",
        ));
    }

    let totals = FireTotals {
        hose_flow_ls,
        sprinkler_flow_ls,
        hose_reserve_m3,
        sprinkler_reserve_m3,
        total_reserve_m3: hose_reserve_m3 + sprinkler_reserve_m3,
        gfa_above_m2: above,
        gfa_below_m2: below,
    };

    debug!(?mode, hose_flow_ls, sprinkler_flow_ls, total_m3 = totals.total_reserve_m3, "fire reserve computed");

    Ok(CalcOutput { rows, warnings, totals })
}

/// Fire settings with every out-of-range number replaced by its default.
fn sanitized(settings: &Settings, warnings: &mut Vec<Warning>) -> FireProtectionSettings {
    let fire = &settings.fire;
    let d = FireProtectionSettings::default();
    let mut check = |field: &str, value: f64, fallback: f64| {
        checked_setting(CalcModule::FireProtection, field, value, fallback, warnings)
    };
    FireProtectionSettings {
        hose_ratio_building: check("fire.hose_ratio_building", fire.hose_ratio_building, d.hose_ratio_building),
        hose_ratio_parking: check("fire.hose_ratio_parking", fire.hose_ratio_parking, d.hose_ratio_parking),
        sprinkler_ratio_building: check(
            "fire.sprinkler_ratio_building",
            fire.sprinkler_ratio_building,
            d.sprinkler_ratio_building,
        ),
        sprinkler_ratio_parking: check(
            "fire.sprinkler_ratio_parking",
            fire.sprinkler_ratio_parking,
            d.sprinkler_ratio_parking,
        ),
        hose_duration_h: check("fire.hose_duration_h", fire.hose_duration_h, d.hose_duration_h),
        sprinkler_duration_h: check("fire.sprinkler_duration_h", fire.sprinkler_duration_h, d.sprinkler_duration_h),
        hose_manual_flow_ls: check("fire.hose_manual_flow_ls", fire.hose_manual_flow_ls, d.hose_manual_flow_ls),
        sprinkler_manual_flow_ls: check(
            "fire.sprinkler_manual_flow_ls",
            fire.sprinkler_manual_flow_ls,
            d.sprinkler_manual_flow_ls,
        ),
        ..fire.clone()
    }
}

fn fire_area(value: f64, field: &str, warnings: &mut Vec<Warning>) -> f64 {
    checked_setting(CalcModule::FireProtection, field, value, 0.0, warnings)
}

/// Flow for one area at a ratio in L/s per 1000 m².
fn area_flow(area_m2: f64, ratio: f64) -> f64 {
    if area_m2 > 0.0 && ratio > 0.0 {
        area_m2 / 1000.0 * ratio
    } else {
        0.0
    }
}

/// Reserve volume for a flow held over a duration.
fn reserve_m3(flow_ls: f64, hours: f64) -> f64 {
    if flow_ls > 0.0 {
        LitersPerSecond(flow_ls).volume_over_hours(hours).value()
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::FireProtectionSettings;
    use approx::assert_relative_eq;

    #[test]
    fn test_automatic_defaults() {
        let settings = Settings::default().with_gross_areas(5000.0, 1000.0);
        let out = compute_fire_protection_reserve(&settings).unwrap();
        let t = out.totals;

        assert_relative_eq!(t.hose_flow_ls, 16.65, epsilon = 1e-9);
        assert_relative_eq!(t.sprinkler_flow_ls, 150.0, epsilon = 1e-9);
        assert_relative_eq!(t.hose_reserve_m3, 59.94, epsilon = 1e-9);
        assert_relative_eq!(t.sprinkler_reserve_m3, 810.0, epsilon = 1e-9);
        assert_relative_eq!(t.total_reserve_m3, 869.94, epsilon = 1e-9);
        assert_eq!(t.gfa_above_m2, 5000.0);
        assert_eq!(t.gfa_below_m2, 1000.0);

        assert_eq!(out.rows.len(), 2);
        assert_eq!(out.rows[0].flow_mode, Some(FlowMode::Automatic));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_manual_flows() {
        let fire = FireProtectionSettings {
            automatic: false,
            hose_manual_flow_ls: 10.0,
            sprinkler_manual_flow_ls: 40.0,
            ..Default::default()
        };
        let settings = Settings::default().with_gross_areas(5000.0, 0.0).with_fire(fire);
        let out = compute_fire_protection_reserve(&settings).unwrap();

        assert_relative_eq!(out.totals.hose_reserve_m3, 36.0, epsilon = 1e-9);
        assert_relative_eq!(out.totals.sprinkler_reserve_m3, 216.0, epsilon = 1e-9);
        assert_eq!(out.rows[1].flow_mode, Some(FlowMode::Manual));
    }

    #[test]
    fn test_active_without_flows_warns_once() {
        let fire = FireProtectionSettings {
            active: true,
            ..Default::default()
        };
        let out = compute_fire_protection_reserve(&Settings::default().with_fire(fire)).unwrap();
        assert_eq!(out.totals.total_reserve_m3, 0.0);
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].module, CalcModule::FireProtection);

        // Inactive: no warning
        let out = compute_fire_protection_reserve(&Settings::default()).unwrap();
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_bad_duration_falls_back_to_default() {
        let fire = FireProtectionSettings {
            hose_duration_h: -1.0,
            sprinkler_ratio_parking: f64::NAN,
            ..Default::default()
        };
        let settings = Settings::default().with_gross_areas(5000.0, 1000.0).with_fire(fire);
        let out = compute_fire_protection_reserve(&settings).unwrap();

        // Same as the defaults scenario
        assert_relative_eq!(out.totals.hose_reserve_m3, 59.94, epsilon = 1e-9);
        assert_relative_eq!(out.totals.total_reserve_m3, 869.94, epsilon = 1e-9);
        assert_eq!(out.warnings.len(), 2);
        assert!(out.warnings.iter().any(|w| w.message.contains("fire.hose_duration_h")));
        assert!(out.warnings.iter().all(|w| w.module == CalcModule::FireProtection));
    }

    #[test]
    fn test_gas_row_is_informational() {
        let fire = FireProtectionSettings {
            gas_extinguishing: true,
            ..Default::default()
        };
        let out = compute_fire_protection_reserve(&Settings::default().with_fire(fire)).unwrap();
        assert_eq!(out.rows.len(), 3);
        let gas = &out.rows[2];
        assert_eq!(gas.system, FireSystem::GasExtinguishing);
        assert_eq!(gas.flow_ls, None);
        assert_eq!(gas.reserve_m3, None);
    }

    #[test]
    fn test_zero_ratio_terms_contribute_nothing() {
        assert_eq!(area_flow(1000.0, 0.0), 0.0);
        assert_eq!(area_flow(0.0, 25.0), 0.0);
        assert_relative_eq!(area_flow(2000.0, 25.0), 50.0, epsilon = 1e-12);
        assert_eq!(reserve_m3(0.0, 2.0), 0.0);
    }
}
