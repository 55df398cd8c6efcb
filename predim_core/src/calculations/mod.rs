//! # Pre-sizing Calculations
//!
//! Six independent calculators share one input contract. Each is a pure
//! function of the zone table and the building settings:
//!
//! - `compute_*(zones, settings) -> CalcResult<CalcOutput<Row, Totals>>`
//!
//! Missing or ambiguous data never fails; it produces an undefined (`None`)
//! value and a [`Warning`], and undefined values are left out of the totals.
//! A numeric setting that is negative or not finite is replaced by its
//! default, with a global warning from the calculator that reads it.
//!
//! ## Available Calculations
//!
//! - [`climate`] - Cooling and heating loads (Tables 5-8)
//! - [`ventilation`] - Exterior ventilation, all-air flow and garage ventilation (Tables 9, 10)
//! - [`electrical`] - Electrical demand and service category (Tables 11, 12)
//! - [`water`] - Cold water and domestic hot water (Tables 13, 14)
//! - [`space`] - Plant-room space reservation (Tables 1, 2)
//! - [`fire`] - Fire-protection water reserve (settings only)

pub mod climate;
pub mod electrical;
pub mod fire;
pub mod space;
pub mod ventilation;
pub mod water;

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::warnings::Warning;
use crate::zone::Zone;

// Re-export commonly used types
pub use climate::{compute_climate_loads, ClimateRow, ClimateTotals};
pub use electrical::{compute_electrical_demand, ElectricalRow, ElectricalTotals, MotorRow, ServiceCategory};
pub use fire::{compute_fire_protection_reserve, FireRow, FireSystem, FireTotals, FlowMode};
pub use space::{compute_space_reservation, CategoryRow, InstallationRow, SpaceTotals};
pub use ventilation::{compute_ventilation_and_all_air, VentilationRow, VentilationTotals};
pub use water::{compute_water_and_hot_water, WaterRow, WaterTotals};

/// What every calculator returns: one row per input zone (or per selected
/// item), the warnings raised, and the aggregate totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalcOutput<Row, Totals> {
    pub rows: Vec<Row>,
    pub warnings: Vec<Warning>,
    pub totals: Totals,
}

/// Zones as the calculators see them, with the building-wide usage and
/// climate zone from the settings applied.
pub(crate) fn effective_zones<'a>(zones: &'a [Zone], settings: &Settings) -> Cow<'a, [Zone]> {
    let usage = non_blank(settings.building_usage.as_deref());
    let climate = non_blank(settings.building_climate_zone.as_deref());
    if usage.is_none() && climate.is_none() {
        return Cow::Borrowed(zones);
    }

    Cow::Owned(
        zones
            .iter()
            .map(|zone| {
                let mut zone = zone.clone();
                if let Some(usage) = usage {
                    zone.usage = usage.to_string();
                }
                if let Some(code) = climate {
                    zone.climate_zone = code.to_string();
                }
                zone
            })
            .collect(),
    )
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Product of two optional quantities; undefined if either is.
pub(crate) fn product(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    Some(a? * b?)
}

/// Sum of the defined values.
pub(crate) fn sum_defined<I>(values: I) -> f64
where
    I: IntoIterator<Item = Option<f64>>,
{
    values.into_iter().flatten().sum()
}
