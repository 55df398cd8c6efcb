//! Space reservation tables (Tables 1 and 2).
//!
//! Percentages are of built floor area. Table 1 applies per building
//! category to the area of that category; Table 2 applies per installation
//! to the total building area.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::usage::*;

/// Global space categories (Table 1 rows).
pub mod category {
    pub const INDUSTRIAL: &str = "Industrial (comparable)";
    pub const ADMIN_COMMERCIAL_RESIDENTIAL: &str = "Administrative/Commercial/Residential";
    pub const HIGH_TECH: &str = "High technology (hospital, data center, laboratories)";
}

/// A [min %, max %] range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentRange {
    pub min: f64,
    pub max: f64,
}

const fn pct(min: f64, max: f64) -> PercentRange {
    PercentRange { min, max }
}

/// Table 1: global space reservation by building category.
pub const TABLE_1_GLOBAL_SPACE: &[(&str, PercentRange)] = &[
    (category::INDUSTRIAL, pct(3.0, 6.0)),
    (category::ADMIN_COMMERCIAL_RESIDENTIAL, pct(6.0, 10.0)),
    (category::HIGH_TECH, pct(15.0, 30.0)),
];

/// Default usage → Table 1 category mapping.
pub const USAGE_TO_GLOBAL_CATEGORY: &[(&str, &str)] = &[
    (HOSPITAL_WARD, category::HIGH_TECH),
    (HOSPITAL_GENERAL, category::HIGH_TECH),
    (LABORATORY, category::HIGH_TECH),
    (DATA_CENTER, category::HIGH_TECH),
    (OFFICE, category::ADMIN_COMMERCIAL_RESIDENTIAL),
    (BANK, category::ADMIN_COMMERCIAL_RESIDENTIAL),
    (RETAIL_ARCADE, category::ADMIN_COMMERCIAL_RESIDENTIAL),
    (RETAIL_DEPARTMENT_STORE, category::ADMIN_COMMERCIAL_RESIDENTIAL),
    (RETAIL_SUPERMARKET, category::ADMIN_COMMERCIAL_RESIDENTIAL),
    (CAFETERIA_RESTAURANT, category::ADMIN_COMMERCIAL_RESIDENTIAL),
    (HOTEL, category::ADMIN_COMMERCIAL_RESIDENTIAL),
    (DWELLING, category::ADMIN_COMMERCIAL_RESIDENTIAL),
    (RESIDENTIAL_GENERAL, category::ADMIN_COMMERCIAL_RESIDENTIAL),
    (MUSEUM, category::ADMIN_COMMERCIAL_RESIDENTIAL),
    (LIBRARY, category::ADMIN_COMMERCIAL_RESIDENTIAL),
    (AUDITORIUM, category::ADMIN_COMMERCIAL_RESIDENTIAL),
    (THEATRE, category::ADMIN_COMMERCIAL_RESIDENTIAL),
    (ASSEMBLY_HALL, category::ADMIN_COMMERCIAL_RESIDENTIAL),
    (EVENT_VENUE, category::ADMIN_COMMERCIAL_RESIDENTIAL),
    (TEACHING, category::ADMIN_COMMERCIAL_RESIDENTIAL),
    (ARCHIVE, category::ADMIN_COMMERCIAL_RESIDENTIAL),
    (INDUSTRIAL, category::INDUSTRIAL),
];

/// Table 2: space reservation by installation (% of total area).
pub const TABLE_2_INSTALLATION_SPACE: &[(&str, PercentRange)] = &[
    // HVAC
    ("Cooling plant", pct(1.0, 2.0)),
    ("Heating plant", pct(0.8, 1.8)),
    ("Cooling towers", pct(0.3, 1.5)),
    ("Fuel storage (diesel)", pct(1.0, 2.0)),
    ("Air handling - Constant volume (low velocity)", pct(4.0, 6.0)),
    ("Air handling - Variable volume", pct(3.0, 4.5)),
    ("Fan-coil system", pct(1.5, 2.5)),
    ("Induction system", pct(1.0, 3.0)),
    ("Water-loop heat pumps", pct(1.5, 2.0)),
    // Electrical
    ("General electrical (no generator/UPS)", pct(0.5, 1.5)),
    ("Lift machine room", pct(0.2, 0.5)),
];

static GLOBAL_INDEX: Lazy<HashMap<&'static str, PercentRange>> =
    Lazy::new(|| TABLE_1_GLOBAL_SPACE.iter().copied().collect());

static CATEGORY_INDEX: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| USAGE_TO_GLOBAL_CATEGORY.iter().copied().collect());

static INSTALLATION_INDEX: Lazy<HashMap<&'static str, PercentRange>> =
    Lazy::new(|| TABLE_2_INSTALLATION_SPACE.iter().copied().collect());

/// Table 1 range for a global category.
pub fn global_range(category: &str) -> Option<PercentRange> {
    GLOBAL_INDEX.get(category.trim()).copied()
}

/// Default Table 1 category for a usage.
pub fn default_category(usage: &str) -> Option<&'static str> {
    CATEGORY_INDEX.get(usage.trim()).copied()
}

/// Table 2 range for an installation type.
pub fn installation_range(installation: &str) -> Option<PercentRange> {
    INSTALLATION_INDEX.get(installation.trim()).copied()
}

/// All Table 2 installation types in table order.
pub fn installations() -> impl Iterator<Item = &'static str> {
    TABLE_2_INSTALLATION_SPACE.iter().map(|(k, _)| *k)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_mapped_category_has_a_range() {
        for (usage, cat) in USAGE_TO_GLOBAL_CATEGORY {
            assert!(global_range(cat).is_some(), "{} -> {}", usage, cat);
        }
    }

    #[test]
    fn test_lookups() {
        assert_eq!(default_category(OFFICE), Some(category::ADMIN_COMMERCIAL_RESIDENTIAL));
        assert_eq!(global_range(category::HIGH_TECH), Some(pct(15.0, 30.0)));
        assert_eq!(installation_range("Lift machine room"), Some(pct(0.2, 0.5)));
        assert_eq!(installation_range("Swimming pool plant"), None);
        assert_eq!(installations().count(), 11);
    }
}
