//! HVAC system guide (Table 16): which system types the manual considers
//! suitable for each application. Informational only; no calculator reads it.

use serde::{Deserialize, Serialize};

/// HVAC system types (Table 16 columns).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HvacSystem {
    DirectExpansion,
    AirHandlerWithOutdoorAir,
    Radiators,
    FanCoil,
    RadiantCeilingFloor,
    AllAirConstantVolume,
    AllAirVariableVolume,
    InductionPrimaryAir,
    InductionRadiatorsPrimaryAir,
}

impl HvacSystem {
    /// All systems in column order
    pub const ALL: [HvacSystem; 9] = [
        HvacSystem::DirectExpansion,
        HvacSystem::AirHandlerWithOutdoorAir,
        HvacSystem::Radiators,
        HvacSystem::FanCoil,
        HvacSystem::RadiantCeilingFloor,
        HvacSystem::AllAirConstantVolume,
        HvacSystem::AllAirVariableVolume,
        HvacSystem::InductionPrimaryAir,
        HvacSystem::InductionRadiatorsPrimaryAir,
    ];

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            HvacSystem::DirectExpansion => "Direct expansion",
            HvacSystem::AirHandlerWithOutdoorAir => "Air handler with outdoor air",
            HvacSystem::Radiators => "Heating: radiators",
            HvacSystem::FanCoil => "Fan-coil",
            HvacSystem::RadiantCeilingFloor => "Radiant ceiling/floor",
            HvacSystem::AllAirConstantVolume => "All-air constant volume",
            HvacSystem::AllAirVariableVolume => "All-air variable volume",
            HvacSystem::InductionPrimaryAir => "Induction with primary air",
            HvacSystem::InductionRadiatorsPrimaryAir => "Induction radiators with primary air",
        }
    }
}

impl std::fmt::Display for HvacSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

const Y: bool = true;
const N: bool = false;

/// Table 16: suitability matrix, columns in [`HvacSystem::ALL`] order.
pub const TABLE_16_SYSTEMS: &[(&str, [bool; 9])] = &[
    ("Auditoriums", [Y, N, N, Y, N, N, Y, N, N]),
    ("Libraries", [Y, N, N, Y, N, N, Y, N, Y]),
    ("Retail", [Y, Y, N, Y, Y, N, Y, N, Y]),
    ("Banks - Corporate buildings", [N, N, N, Y, Y, Y, Y, Y, Y]),
    ("Banks - Offices", [Y, N, N, Y, Y, N, Y, Y, Y]),
    ("Department stores", [Y, N, N, Y, Y, N, N, N, N]),
    ("Hospitals - General", [N, N, N, N, Y, Y, Y, Y, Y]),
    ("Hospitals - Patient rooms", [N, N, N, N, N, N, N, N, Y]),
    ("Hotels - Guest rooms", [Y, N, N, N, N, Y, Y, Y, Y]),
    ("Hotels - General", [N, N, N, Y, Y, N, N, N, Y]),
    ("Laboratories", [Y, N, N, Y, Y, N, N, N, N]),
    ("Museums", [N, N, N, N, Y, N, N, N, Y]),
    ("Offices", [N, N, N, Y, Y, Y, Y, Y, Y]),
    ("Radio and TV - General", [Y, N, N, Y, Y, Y, Y, Y, Y]),
    ("Radio and TV - Studios", [N, N, N, N, N, N, Y, N, N]),
    ("Residential - Dwellings", [Y, Y, Y, N, N, N, N, N, Y]),
    ("Residential - General", [Y, N, N, N, Y, N, Y, Y, Y]),
    ("Theatres", [Y, N, N, N, N, N, Y, N, N]),
];

/// Applications listed in Table 16.
pub fn applications() -> impl Iterator<Item = &'static str> {
    TABLE_16_SYSTEMS.iter().map(|(k, _)| *k)
}

/// Systems marked suitable for an application, or `None` when the
/// application is not in the table.
pub fn suitable_systems(application: &str) -> Option<Vec<HvacSystem>> {
    let application = application.trim();
    TABLE_16_SYSTEMS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(application))
        .map(|(_, flags)| {
            HvacSystem::ALL
                .iter()
                .zip(flags.iter())
                .filter(|(_, suitable)| **suitable)
                .map(|(system, _)| *system)
                .collect()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offices() {
        let systems = suitable_systems("Offices").unwrap();
        assert_eq!(systems.len(), 6);
        assert!(systems.contains(&HvacSystem::FanCoil));
        assert!(!systems.contains(&HvacSystem::DirectExpansion));
    }

    #[test]
    fn test_case_insensitive_lookup() {
        assert_eq!(
            suitable_systems("radio and tv - studios"),
            Some(vec![HvacSystem::AllAirVariableVolume])
        );
    }

    #[test]
    fn test_unknown_application() {
        assert!(suitable_systems("Airports").is_none());
        assert_eq!(applications().count(), 18);
    }
}
