//! # Zones and the Row Normalizer
//!
//! A [`Zone`] is one area/use within the building: the row of the zone table
//! every calculator consumes. The accessors on `Zone` are the row normalizer:
//! they turn loosely filled input into the canonical values the calculators
//! need (sanitised area, display name, resolved occupancy).
//!
//! ## Occupancy Resolution
//!
//! ```text
//! beds > 0            → Bed,    quantity = beds
//! covers/day > 0      → Cover,  quantity = covers
//! otherwise           → Person, quantity = density × area   (density > 0, area > 0)
//!                                          | explicit persons
//!                                          | 0
//! ```
//!
//! ## JSON Example
//!
//! Every field except `id` may be omitted:
//!
//! ```json
//! {
//!   "id": 1,
//!   "name": "Ground floor",
//!   "usage": "Office",
//!   "area_m2": 4500.0,
//!   "climate_zone": "D1",
//!   "load_level": "Medium",
//!   "exposure": "Interior",
//!   "density_persons_per_m2": 0.08
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Internal load level of a zone (the manual's B/M/A columns).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LoadLevel {
    /// Low internal loads ("B")
    #[serde(alias = "B")]
    Low,
    /// Medium internal loads ("M")
    #[default]
    #[serde(alias = "M")]
    Medium,
    /// High internal loads ("A")
    #[serde(alias = "A")]
    High,
}

impl LoadLevel {
    /// All load levels for UI selection
    pub const ALL: [LoadLevel; 3] = [LoadLevel::Low, LoadLevel::Medium, LoadLevel::High];

    /// Column index into the per-level tables
    pub fn index(&self) -> usize {
        match self {
            LoadLevel::Low => 0,
            LoadLevel::Medium => 1,
            LoadLevel::High => 2,
        }
    }

    /// Single-letter code used by the manual
    pub fn code(&self) -> &'static str {
        match self {
            LoadLevel::Low => "B",
            LoadLevel::Medium => "M",
            LoadLevel::High => "A",
        }
    }

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            LoadLevel::Low => "Low",
            LoadLevel::Medium => "Medium",
            LoadLevel::High => "High",
        }
    }
}

impl std::fmt::Display for LoadLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Façade exposure, used by the all-air table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Exposure {
    /// South, east or west facing
    #[serde(rename = "E/S/W", alias = "SouthEastWest")]
    SouthEastWest,
    /// North facing
    #[serde(alias = "N")]
    North,
    /// No façade
    #[default]
    Interior,
}

impl Exposure {
    /// All exposures for UI selection
    pub const ALL: [Exposure; 3] = [Exposure::SouthEastWest, Exposure::North, Exposure::Interior];

    /// Row index into the all-air table
    pub fn index(&self) -> usize {
        match self {
            Exposure::SouthEastWest => 0,
            Exposure::North => 1,
            Exposure::Interior => 2,
        }
    }

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Exposure::SouthEastWest => "E/S/W",
            Exposure::North => "N",
            Exposure::Interior => "Interior",
        }
    }
}

impl std::fmt::Display for Exposure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// The unit occupancy is counted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OccupancyUnit {
    Person,
    Bed,
    Cover,
}

impl OccupancyUnit {
    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            OccupancyUnit::Person => "person",
            OccupancyUnit::Bed => "bed",
            OccupancyUnit::Cover => "cover",
        }
    }
}

impl std::fmt::Display for OccupancyUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Resolved occupancy of a zone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Occupancy {
    pub unit: OccupancyUnit,
    pub quantity: f64,
}

/// Per-zone values that replace a table lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneOverrides {
    /// Cooling specific load (W/m²)
    pub cooling_w_m2: Option<f64>,
    /// Heating specific load (W/m²)
    pub heating_w_m2: Option<f64>,
    /// Exterior ventilation rate (L/s·m²)
    pub ventilation_ls_m2: Option<f64>,
    /// Normal-supply electrical load (W/m²)
    pub electrical_w_m2: Option<f64>,
    /// Supplementary-supply electrical load (W/m²)
    pub electrical_supplementary_w_m2: Option<f64>,
}

impl ZoneOverrides {
    pub fn cooling(&self) -> Option<f64> {
        finite(self.cooling_w_m2)
    }

    pub fn heating(&self) -> Option<f64> {
        finite(self.heating_w_m2)
    }

    pub fn ventilation(&self) -> Option<f64> {
        finite(self.ventilation_ls_m2)
    }

    pub fn electrical(&self) -> Option<f64> {
        finite(self.electrical_w_m2)
    }

    pub fn electrical_supplementary(&self) -> Option<f64> {
        finite(self.electrical_supplementary_w_m2)
    }
}

/// One row of the zone table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Zone {
    /// Stable identifier
    pub id: u32,

    /// User label; blank means "Zone {id}"
    pub name: String,

    /// Usage category key (e.g. "Office")
    pub usage: String,

    /// Floor area in m²
    pub area_m2: Option<f64>,

    /// Climate zone code (e.g. "D1")
    pub climate_zone: String,

    pub load_level: LoadLevel,

    pub exposure: Exposure,

    /// Occupation density (persons/m²)
    pub density_persons_per_m2: Option<f64>,

    /// Explicit person count
    pub persons: Option<f64>,

    /// Bed count (hospitals, hotels)
    pub beds: Option<f64>,

    /// Meals served per day (restaurants)
    pub covers_per_day: Option<f64>,

    /// Supplementary (standby) electrical supply applies
    pub supplementary_supply: bool,

    pub overrides: ZoneOverrides,

    /// Explicit space-reservation category (Table 1); blank means use the
    /// usage mapping
    pub global_category: Option<String>,
}

impl Zone {
    /// Create a zone with the fields every calculator needs.
    ///
    /// # Example
    ///
    /// ```rust
    /// use predim_core::zone::{LoadLevel, Zone};
    ///
    /// let zone = Zone::new(1, "Office", 4500.0, "D1").with_load_level(LoadLevel::High);
    /// assert_eq!(zone.display_name(), "Zone 1");
    /// assert_eq!(zone.area(), 4500.0);
    /// ```
    pub fn new(id: u32, usage: impl Into<String>, area_m2: f64, climate_zone: impl Into<String>) -> Self {
        Zone {
            id,
            usage: usage.into(),
            area_m2: Some(area_m2),
            climate_zone: climate_zone.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_load_level(mut self, level: LoadLevel) -> Self {
        self.load_level = level;
        self
    }

    pub fn with_exposure(mut self, exposure: Exposure) -> Self {
        self.exposure = exposure;
        self
    }

    pub fn with_density(mut self, persons_per_m2: f64) -> Self {
        self.density_persons_per_m2 = Some(persons_per_m2);
        self
    }

    pub fn with_persons(mut self, persons: f64) -> Self {
        self.persons = Some(persons);
        self
    }

    pub fn with_beds(mut self, beds: f64) -> Self {
        self.beds = Some(beds);
        self
    }

    pub fn with_covers(mut self, covers_per_day: f64) -> Self {
        self.covers_per_day = Some(covers_per_day);
        self
    }

    pub fn with_supplementary_supply(mut self, applies: bool) -> Self {
        self.supplementary_supply = applies;
        self
    }

    pub fn with_overrides(mut self, overrides: ZoneOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn with_global_category(mut self, category: impl Into<String>) -> Self {
        self.global_category = Some(category.into());
        self
    }

    /// Name shown in results and warnings.
    pub fn display_name(&self) -> String {
        let name = self.name.trim();
        if name.is_empty() {
            format!("Zone {}", self.id)
        } else {
            name.to_string()
        }
    }

    /// Usage key with surrounding whitespace removed.
    pub fn usage_key(&self) -> &str {
        self.usage.trim()
    }

    /// Climate zone code with surrounding whitespace removed.
    pub fn climate_code(&self) -> &str {
        self.climate_zone.trim()
    }

    /// Floor area in m². Absent, negative or non-finite input counts as 0.
    pub fn area(&self) -> f64 {
        match finite(self.area_m2) {
            Some(a) if a > 0.0 => a,
            _ => 0.0,
        }
    }

    /// Person count: density × area when both are positive, else the
    /// explicit count, else 0.
    pub fn persons(&self) -> f64 {
        let area = self.area();
        match finite(self.density_persons_per_m2) {
            Some(density) if density > 0.0 && area > 0.0 => density * area,
            _ => finite(self.persons).unwrap_or(0.0),
        }
    }

    /// Resolve which occupancy unit is authoritative for this zone.
    pub fn occupancy(&self) -> Occupancy {
        if let Some(beds) = positive(self.beds) {
            return Occupancy {
                unit: OccupancyUnit::Bed,
                quantity: beds,
            };
        }
        if let Some(covers) = positive(self.covers_per_day) {
            return Occupancy {
                unit: OccupancyUnit::Cover,
                quantity: covers,
            };
        }
        Occupancy {
            unit: OccupancyUnit::Person,
            quantity: self.persons(),
        }
    }

    /// Explicit global category, if one was entered.
    pub fn global_category_override(&self) -> Option<&str> {
        self.global_category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

/// Drop NaN/infinite values.
pub(crate) fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn positive(value: Option<f64>) -> Option<f64> {
    finite(value).filter(|v| *v > 0.0)
}
