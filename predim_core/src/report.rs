//! # Building Report
//!
//! Runs all six calculators on the same zones and settings and keeps their
//! outputs side by side. The calculators never see each other's results;
//! this is only aggregation for presentation and export.
//!
//! ## Example
//!
//! ```rust
//! use predim_core::project::Project;
//! use predim_core::report::BuildingReport;
//!
//! let project = Project::sample_office();
//! let report = BuildingReport::compute(&project.zones, &project.settings).unwrap();
//!
//! for group in report.grouped_warnings() {
//!     println!("{}", group);
//! }
//! ```

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::calculations::{
    compute_climate_loads, compute_electrical_demand, compute_fire_protection_reserve, compute_space_reservation,
    compute_ventilation_and_all_air, compute_water_and_hot_water, CalcOutput, ClimateRow, ClimateTotals,
    ElectricalRow, ElectricalTotals, FireRow, FireTotals, InstallationRow, SpaceTotals, VentilationRow,
    VentilationTotals, WaterRow, WaterTotals,
};
use crate::errors::CalcResult;
use crate::settings::Settings;
use crate::warnings::{group_warnings, Warning, WarningGroup};
use crate::zone::Zone;

/// Results of every calculator for one building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingReport {
    pub climate: CalcOutput<ClimateRow, ClimateTotals>,
    pub ventilation: CalcOutput<VentilationRow, VentilationTotals>,
    pub electrical: CalcOutput<ElectricalRow, ElectricalTotals>,
    pub water: CalcOutput<WaterRow, WaterTotals>,
    pub space: CalcOutput<InstallationRow, SpaceTotals>,
    pub fire: CalcOutput<FireRow, FireTotals>,
}

impl BuildingReport {
    /// Run all calculators. Out-of-range settings only add warnings to the
    /// calculators that read them.
    pub fn compute(zones: &[Zone], settings: &Settings) -> CalcResult<Self> {
        let report = BuildingReport {
            climate: compute_climate_loads(zones, settings)?,
            ventilation: compute_ventilation_and_all_air(zones, settings)?,
            electrical: compute_electrical_demand(zones, settings)?,
            water: compute_water_and_hot_water(zones, settings)?,
            space: compute_space_reservation(zones, settings)?,
            fire: compute_fire_protection_reserve(settings)?,
        };

        info!(
            zones = zones.len(),
            warnings = report.warning_count(),
            "building report computed"
        );
        Ok(report)
    }

    /// Every warning, in calculator order.
    pub fn all_warnings(&self) -> Vec<Warning> {
        self.climate
            .warnings
            .iter()
            .chain(&self.ventilation.warnings)
            .chain(&self.electrical.warnings)
            .chain(&self.water.warnings)
            .chain(&self.space.warnings)
            .chain(&self.fire.warnings)
            .cloned()
            .collect()
    }

    /// Warnings merged across zones.
    pub fn grouped_warnings(&self) -> Vec<WarningGroup> {
        group_warnings(&self.all_warnings())
    }

    pub fn warning_count(&self) -> usize {
        self.climate.warnings.len()
            + self.ventilation.warnings.len()
            + self.electrical.warnings.len()
            + self.water.warnings.len()
            + self.space.warnings.len()
            + self.fire.warnings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::ServiceCategory;
    use crate::project::Project;
    use crate::warnings::CalcModule;
    use approx::assert_relative_eq;

    #[test]
    fn test_sample_office_report() {
        let project = Project::sample_office();
        let report = BuildingReport::compute(&project.zones, &project.settings).unwrap();

        assert_relative_eq!(report.climate.totals.cooling_kw, 440.0, epsilon = 1e-9);
        assert_relative_eq!(report.climate.totals.heating_kw, 357.5, epsilon = 1e-9);
        assert_relative_eq!(report.electrical.totals.total_kw, 550.0, epsilon = 1e-9);
        assert_eq!(report.electrical.totals.service, ServiceCategory::MediumVoltage);
        assert_relative_eq!(report.fire.totals.total_reserve_m3, 869.94, epsilon = 1e-9);

        let d1 = report
            .all_warnings()
            .into_iter()
            .filter(|w| w.message.contains("D1"))
            .count();
        assert_eq!(d1, 1);
    }

    #[test]
    fn test_warnings_concatenated_in_module_order() {
        let zones = vec![
            Zone::new(1, "Swimming pool", 100.0, "D1"),
            Zone::new(2, "Swimming pool", 100.0, "D1"),
        ];
        let report = BuildingReport::compute(&zones, &Settings::default()).unwrap();
        let all = report.all_warnings();
        assert_eq!(all.len(), report.warning_count());
        assert_eq!(all[0].module, CalcModule::Climate);
        assert_eq!(all.last().map(|w| w.module), Some(CalcModule::Space));

        // Both zones share each message
        let groups = report.grouped_warnings();
        let cooling = groups.iter().find(|g| g.message.contains("No cooling load")).unwrap();
        assert_eq!(cooling.zones_label(), "Zone 1, Zone 2");
    }

    #[test]
    fn test_bad_settings_stay_in_their_module() {
        let project = Project::sample_office();
        let baseline = BuildingReport::compute(&project.zones, &project.settings).unwrap();

        let mut settings = project.settings.clone();
        settings.fire.hose_duration_h = -1.0;
        let report = BuildingReport::compute(&project.zones, &settings).unwrap();

        assert_eq!(report.climate, baseline.climate);
        assert_eq!(report.water, baseline.water);
        assert_eq!(report.space, baseline.space);
        assert_relative_eq!(report.fire.totals.total_reserve_m3, 869.94, epsilon = 1e-9);
        assert_eq!(report.warning_count(), baseline.warning_count() + 1);
    }
}
