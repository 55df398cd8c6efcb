//! # Warnings
//!
//! Calculators report data-quality issues as [`Warning`] values instead of
//! failing: a missing table entry, an ambiguous key, a unit mismatch or an
//! unmapped selection each produce one warning and an undefined value.
//!
//! [`group_warnings`] collapses identical (module, message) pairs across
//! zones for reporting.
//!
//! ## Example
//!
//! ```rust
//! use predim_core::warnings::{group_warnings, CalcModule, Warning};
//!
//! let warnings = vec![
//!     Warning::new(CalcModule::Water, "Lobby", "Usage 'Lobby' is not mapped to Table 13."),
//!     Warning::new(CalcModule::Water, "Atrium", "Usage 'Lobby' is not mapped to Table 13."),
//! ];
//! let groups = group_warnings(&warnings);
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups[0].zones_label(), "Atrium, Lobby");
//! ```

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Zone label for warnings that concern the whole building.
pub const GLOBAL_SCOPE: &str = "(global)";

/// Zone label for warnings about zones with no value at all.
pub const MISSING_SCOPE: &str = "(missing)";

/// Zones listed by name in a grouped warning before collapsing to "+N more".
const MAX_LISTED_ZONES: usize = 3;

/// Calculation module that raised a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CalcModule {
    #[serde(rename = "Climate")]
    Climate,
    #[serde(rename = "Ventilation")]
    Ventilation,
    #[serde(rename = "All-air")]
    AllAir,
    #[serde(rename = "Electrical")]
    Electrical,
    #[serde(rename = "Water")]
    Water,
    #[serde(rename = "Hot water")]
    HotWater,
    #[serde(rename = "Space")]
    Space,
    #[serde(rename = "Fire protection")]
    FireProtection,
}

impl CalcModule {
    pub const ALL: [CalcModule; 8] = [
        CalcModule::Climate,
        CalcModule::Ventilation,
        CalcModule::AllAir,
        CalcModule::Electrical,
        CalcModule::Water,
        CalcModule::HotWater,
        CalcModule::Space,
        CalcModule::FireProtection,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            CalcModule::Climate => "Climate",
            CalcModule::Ventilation => "Ventilation",
            CalcModule::AllAir => "All-air",
            CalcModule::Electrical => "Electrical",
            CalcModule::Water => "Water",
            CalcModule::HotWater => "Hot water",
            CalcModule::Space => "Space",
            CalcModule::FireProtection => "Fire protection",
        }
    }
}

impl std::fmt::Display for CalcModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One data-quality finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub module: CalcModule,
    /// Zone display name, or [`GLOBAL_SCOPE`] / [`MISSING_SCOPE`]
    pub zone: String,
    pub message: String,
}

impl Warning {
    pub fn new(module: CalcModule, zone: impl Into<String>, message: impl Into<String>) -> Self {
        Warning {
            module,
            zone: zone.into(),
            message: message.into(),
        }
    }

    /// Warning that applies to the whole building
    pub fn global(module: CalcModule, message: impl Into<String>) -> Self {
        Warning::new(module, GLOBAL_SCOPE, message)
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.module, self.zone, self.message)
    }
}

/// Identical warnings merged across zones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarningGroup {
    pub module: CalcModule,
    pub message: String,
    /// Unique, non-blank zone names in sorted order
    pub zones: Vec<String>,
}

impl WarningGroup {
    /// Zones as shown to the user: up to three names, then "(+N more)".
    pub fn zones_label(&self) -> String {
        match self.zones.as_slice() {
            [] => GLOBAL_SCOPE.to_string(),
            [only] => only.clone(),
            zones if zones.len() <= MAX_LISTED_ZONES => zones.join(", "),
            zones => format!(
                "{} (+{} more)",
                zones[..MAX_LISTED_ZONES].join(", "),
                zones.len() - MAX_LISTED_ZONES
            ),
        }
    }
}

impl std::fmt::Display for WarningGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.module, self.zones_label(), self.message)
    }
}

/// Group warnings by (module, message), sorted by module then message.
pub fn group_warnings(warnings: &[Warning]) -> Vec<WarningGroup> {
    let mut groups: BTreeMap<(CalcModule, &str), BTreeSet<&str>> = BTreeMap::new();
    for w in warnings {
        let zones = groups.entry((w.module, w.message.as_str())).or_default();
        let zone = w.zone.trim();
        if !zone.is_empty() {
            zones.insert(zone);
        }
    }

    groups
        .into_iter()
        .map(|((module, message), zones)| WarningGroup {
            module,
            message: message.to_string(),
            zones: zones.into_iter().map(str::to_string).collect(),
        })
        .collect()
}
