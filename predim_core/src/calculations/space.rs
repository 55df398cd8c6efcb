//! # Space Reservation
//!
//! Two independent estimates of plant-room area.
//!
//! **Global (Table 1)**: each zone gets a building category, either its
//! explicit override or the usage mapping. Areas are summed per category and
//! each category's [min %, max %] applies to its own area:
//!
//! ```text
//! global min = Σ category area × min % / 100
//! global max = Σ category area × max % / 100
//! ```
//!
//! **Per installation (Table 2)**: each selected installation type reserves
//! [min %, max %] of the total building area.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{effective_zones, CalcOutput};
use crate::errors::CalcResult;
use crate::settings::Settings;
use crate::tables::{manual_ref, space};
use crate::warnings::{CalcModule, Warning, MISSING_SCOPE};
use crate::zone::Zone;

/// Space reserved for one selected installation type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallationRow {
    pub installation: String,
    pub min_pct: f64,
    pub max_pct: f64,
    pub min_m2: f64,
    pub max_m2: f64,
}

/// Space reserved for one building category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRow {
    pub category: String,
    pub area_m2: f64,
    pub min_pct: f64,
    pub max_pct: f64,
    pub min_m2: f64,
    pub max_m2: f64,
}

/// Space reservation totals.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SpaceTotals {
    pub total_area_m2: f64,
    pub global_min_m2: f64,
    pub global_max_m2: f64,
    /// Per-category breakdown of the global range
    pub categories: Vec<CategoryRow>,
}

/// Compute global and per-installation space reservations.
pub fn compute_space_reservation(
    zones: &[Zone],
    settings: &Settings,
) -> CalcResult<CalcOutput<InstallationRow, SpaceTotals>> {
    let zones = effective_zones(zones, settings);
    let mut warnings = Vec::new();

    let total_area_m2: f64 = zones.iter().map(Zone::area).sum();

    // Area per category; zones without one are counted once for the warning
    let mut by_category: BTreeMap<String, f64> = BTreeMap::new();
    let mut uncategorised = 0usize;
    for zone in zones.iter() {
        let category = zone
            .global_category_override()
            .or_else(|| space::default_category(zone.usage_key()));
        match category {
            Some(cat) => *by_category.entry(cat.to_string()).or_insert(0.0) += zone.area(),
            None => uncategorised += 1,
        }
    }

    if uncategorised > 0 {
        warnings.push(Warning::new(
            CalcModule::Space,
            MISSING_SCOPE,
            format!(
                "Some zones have no global category ({}). Enter one or check the usage mapping.",
                manual_ref::TABLE_1
            ),
        ));
    }

    let mut categories = Vec::with_capacity(by_category.len());
    for (category, area_m2) in by_category {
        let Some(range) = space::global_range(&category) else {
            warnings.push(Warning::global(
                CalcModule::Space,
                format!("Category '{}' has no range in {}.", category, manual_ref::TABLE_1),
            ));
            continue;
        };
        categories.push(CategoryRow {
            min_m2: area_m2 * range.min / 100.0,
            max_m2: area_m2 * range.max / 100.0,
            category,
            area_m2,
            min_pct: range.min,
            max_pct: range.max,
        });
    }

    let selected: Vec<&str> = match &settings.installations {
        Some(list) => list.iter().map(String::as_str).collect(),
        None => space::installations().collect(),
    };

    let mut rows = Vec::with_capacity(selected.len());
    for installation in selected {
        let Some(range) = space::installation_range(installation) else {
            warnings.push(Warning::global(
                CalcModule::Space,
                format!("Installation '{}' not found in {}.", installation, manual_ref::TABLE_2),
            ));
            continue;
        };
        rows.push(InstallationRow {
            installation: installation.trim().to_string(),
            min_pct: range.min,
            max_pct: range.max,
            min_m2: total_area_m2 * range.min / 100.0,
            max_m2: total_area_m2 * range.max / 100.0,
        });
    }

    let totals = SpaceTotals {
        total_area_m2,
        global_min_m2: categories.iter().map(|c| c.min_m2).sum(),
        global_max_m2: categories.iter().map(|c| c.max_m2).sum(),
        categories,
    };

    debug!(
        zones = zones.len(),
        installations = rows.len(),
        warnings = warnings.len(),
        total_area_m2,
        "space reservation computed"
    );

    Ok(CalcOutput { rows, warnings, totals })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::space::category;
    use crate::warnings::GLOBAL_SCOPE;
    use approx::assert_relative_eq;

    #[test]
    fn test_global_range_by_category() {
        let zones = vec![
            Zone::new(1, "Office", 4500.0, "D1"),
            Zone::new(2, "Laboratory", 500.0, "D1"),
        ];
        let out = compute_space_reservation(&zones, &Settings::default()).unwrap();

        // Office 6-10 %, laboratory 15-30 %
        assert_relative_eq!(out.totals.global_min_m2, 270.0 + 75.0, epsilon = 1e-9);
        assert_relative_eq!(out.totals.global_max_m2, 450.0 + 150.0, epsilon = 1e-9);
        assert_eq!(out.totals.categories.len(), 2);
        assert_eq!(out.totals.total_area_m2, 5000.0);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_all_installations_by_default() {
        let zones = vec![Zone::new(1, "Office", 1000.0, "D1")];
        let out = compute_space_reservation(&zones, &Settings::default()).unwrap();

        assert_eq!(out.rows.len(), space::installations().count());
        let lift = out.rows.iter().find(|r| r.installation == "Lift machine room").unwrap();
        assert_relative_eq!(lift.min_m2, 2.0, epsilon = 1e-9);
        assert_relative_eq!(lift.max_m2, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_unknown_installation_skipped() {
        let zones = vec![Zone::new(1, "Office", 1000.0, "D1")];
        let settings = Settings::default().with_installations(["Cooling plant", "Swimming pool plant"]);
        let out = compute_space_reservation(&zones, &settings).unwrap();

        assert_eq!(out.rows.len(), 1);
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].zone, GLOBAL_SCOPE);
        assert!(out.warnings[0].message.contains("Swimming pool plant"));
    }

    #[test]
    fn test_missing_and_unknown_categories() {
        let zones = vec![
            Zone::new(1, "Swimming pool", 300.0, "D1"),
            Zone::new(2, "Car wash", 200.0, "D1"),
            Zone::new(3, "Office", 1000.0, "D1").with_global_category("Heavy plant"),
        ];
        let out = compute_space_reservation(&zones, &Settings::default()).unwrap();

        let missing: Vec<_> = out.warnings.iter().filter(|w| w.zone == MISSING_SCOPE).collect();
        assert_eq!(missing.len(), 1);
        let unknown: Vec<_> = out.warnings.iter().filter(|w| w.message.contains("'Heavy plant'")).collect();
        assert_eq!(unknown.len(), 1);
        assert_eq!(unknown[0].zone, GLOBAL_SCOPE);

        assert_eq!(out.totals.global_min_m2, 0.0);
        assert_eq!(out.totals.total_area_m2, 1500.0);
    }

    #[test]
    fn test_category_override_wins() {
        let zones = vec![Zone::new(1, "Office", 1000.0, "D1").with_global_category(category::INDUSTRIAL)];
        let out = compute_space_reservation(&zones, &Settings::default()).unwrap();
        assert_relative_eq!(out.totals.global_min_m2, 30.0, epsilon = 1e-9);
        assert_relative_eq!(out.totals.global_max_m2, 60.0, epsilon = 1e-9);
    }

    #[test]
    fn test_global_range_scales_with_area() {
        let zones = vec![
            Zone::new(1, "Office", 1200.0, "D1"),
            Zone::new(2, "Hospital - Inpatient ward", 800.0, "D1"),
            Zone::new(3, "Industrial", 350.0, "D1"),
        ];
        let base = compute_space_reservation(&zones, &Settings::default()).unwrap();

        for k in [0.5, 2.0, 7.25] {
            let scaled: Vec<Zone> = zones
                .iter()
                .cloned()
                .map(|mut z| {
                    z.area_m2 = z.area_m2.map(|a| a * k);
                    z
                })
                .collect();
            let out = compute_space_reservation(&scaled, &Settings::default()).unwrap();
            assert_relative_eq!(out.totals.global_min_m2, base.totals.global_min_m2 * k, epsilon = 1e-9);
            assert_relative_eq!(out.totals.global_max_m2, base.totals.global_max_m2 * k, epsilon = 1e-9);
        }
    }
}
