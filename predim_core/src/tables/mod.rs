//! # Reference Tables
//!
//! Static data from the pre-sizing manual ("instalaciones a palmos"). Values
//! are coded exactly as printed; no logic lives here beyond keyed lookup.
//!
//! ## Table Summary
//!
//! | Table | Content                                          | Module          |
//! |-------|--------------------------------------------------|-----------------|
//! | 1     | Global space reservation % by building category  | [`space`]       |
//! | 2     | Space reservation % by installation              | [`space`]       |
//! | 5, 6  | Cooling W/m² and climate correction              | [`climate`]     |
//! | 7, 8  | Heating W/m² and climate correction              | [`climate`]     |
//! | 9     | All-air treated flow L/s·m²                      | [`air`]         |
//! | 10    | Exterior ventilation L/s·m²                      | [`air`]         |
//! | 11    | Electrical load W/m² (normal supply)             | [`electrical`]  |
//! | 12    | Electrical load W/m² (supplementary supply)      | [`electrical`]  |
//! | 13    | Daily cold-water consumption                     | [`water`]       |
//! | 14    | Daily hot-water consumption and power            | [`water`]       |
//! | 16    | HVAC system suitability by application           | [`systems`]     |
//!
//! Some tables contain layout ambiguities in the source (Table 8 lists `D1`
//! in two rows). Those tables are stored as ordered rule lists and resolved
//! with [`resolve_factor`], which collects every match instead of assuming
//! unique keys.

pub mod air;
pub mod climate;
pub mod electrical;
pub mod rules;
pub mod space;
pub mod systems;
pub mod water;

use serde::{Deserialize, Serialize};

// ============================================================================
// Manual References
// ============================================================================

/// Table references printed in warnings and reports.
pub mod manual_ref {
    /// Global space reservation
    pub const TABLE_1: &str = "Table 1";
    /// Space reservation per installation
    pub const TABLE_2: &str = "Table 2";
    /// Cooling specific load
    pub const TABLE_5: &str = "Table 5";
    /// Cooling climate correction
    pub const TABLE_6: &str = "Table 6";
    /// Heating specific load
    pub const TABLE_7: &str = "Table 7";
    /// Heating climate correction
    pub const TABLE_8: &str = "Table 8";
    /// All-air treated flow
    pub const TABLE_9: &str = "Table 9";
    /// Exterior ventilation
    pub const TABLE_10: &str = "Table 10";
    /// Electrical load, normal supply
    pub const TABLE_11: &str = "Table 11";
    /// Electrical load, supplementary supply
    pub const TABLE_12: &str = "Table 12";
    /// Cold water
    pub const TABLE_13: &str = "Table 13";
    /// Hot water
    pub const TABLE_14: &str = "Table 14";
    /// HVAC system guide
    pub const TABLE_16: &str = "Table 16";
}

// ============================================================================
// Usage Keys
// ============================================================================

/// Usage category keys shared by several tables.
pub mod usage {
    pub const ARCHIVE: &str = "Archive";
    pub const AUDITORIUM: &str = "Auditorium";
    pub const LIBRARY: &str = "Library";
    pub const CAFETERIA_RESTAURANT: &str = "Cafeteria and restaurant (general)";
    pub const RETAIL_ARCADE: &str = "Retail - Shopping arcade";
    pub const RETAIL_DEPARTMENT_STORE: &str = "Retail - Department store";
    pub const RETAIL_SUPERMARKET: &str = "Retail - Supermarket";
    pub const TEACHING: &str = "Teaching (classrooms)";
    pub const HOSPITAL_WARD: &str = "Hospital - Inpatient ward";
    pub const HOSPITAL_GENERAL: &str = "Hospital - General (excl. operating theatres)";
    pub const HOTEL: &str = "Hotel";
    pub const MUSEUM: &str = "Museum";
    pub const OFFICE: &str = "Office";
    pub const THEATRE: &str = "Theatre";
    pub const BANK: &str = "Bank building";
    pub const SPORTS_VENUE: &str = "Sports venue with spectators";
    pub const LABORATORY: &str = "Laboratory";
    pub const ASSEMBLY_HALL: &str = "Assembly hall";
    pub const EVENT_VENUE: &str = "Party hall / Exhibition venue";
    pub const DATA_CENTER: &str = "Data center";
    pub const DWELLING: &str = "Residential - Dwelling";
    pub const RESIDENTIAL_GENERAL: &str = "Residential - General";
    pub const INDUSTRIAL: &str = "Industrial";
}

/// Climate zone codes known to the correction tables.
pub const CLIMATE_ZONES: [&str; 12] = [
    "A4", "B4", "C4", "C2", "D2", "A3", "B3", "C3", "D3", "C1", "D1", "E1",
];

// ============================================================================
// Rule-list factor tables
// ============================================================================

/// One row of a climate correction table: every code in `codes` gets `factor`.
#[derive(Debug, Clone, Copy)]
pub struct FactorRule {
    pub codes: &'static [&'static str],
    pub factor: f64,
}

/// Outcome of resolving a key against a rule list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FactorMatch {
    /// Exactly one row matched
    Unique(f64),
    /// Several rows matched; `chosen` is the maximum (conservative) value
    Ambiguous { chosen: f64, candidates: Vec<f64> },
    /// No row matched
    NotFound,
}

impl FactorMatch {
    /// The factor to use, if any
    pub fn value(&self) -> Option<f64> {
        match self {
            FactorMatch::Unique(f) => Some(*f),
            FactorMatch::Ambiguous { chosen, .. } => Some(*chosen),
            FactorMatch::NotFound => None,
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, FactorMatch::Ambiguous { .. })
    }
}

/// Evaluate every rule in order and collect all factors whose code set
/// contains `code`. More than one match resolves to the maximum.
pub fn resolve_factor(rules: &[FactorRule], code: &str) -> FactorMatch {
    let code = code.trim();
    let candidates: Vec<f64> = rules
        .iter()
        .filter(|rule| rule.codes.contains(&code))
        .map(|rule| rule.factor)
        .collect();

    match candidates.as_slice() {
        [] => FactorMatch::NotFound,
        [single] => FactorMatch::Unique(*single),
        _ => {
            let chosen = candidates.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            FactorMatch::Ambiguous { chosen, candidates }
        }
    }
}
