//! Usage catalog: every usage key the tables know about, for selection
//! lists.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;

use crate::tables::usage::{DATA_CENTER, INDUSTRIAL};
use crate::tables::water::water_use;
use crate::tables::{air, climate, electrical, space};

/// Usages only reachable through the water selectors.
const WATER_SELECTOR_USAGES: &[&str] = &[
    water_use::SCHOOL,
    water_use::BOARDING_SCHOOL,
    water_use::HOTEL_MID_RANGE,
    water_use::HOTEL_UPSCALE,
    water_use::OFFICE_WITHOUT_CAFETERIA,
    water_use::OFFICE_WITH_CAFETERIA,
    water_use::RESTAURANT,
];

static ALL_USAGES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    let keys = |table: &'static [(&'static str, f64)]| table.iter().map(|(k, _)| *k);
    let level_keys = |table: &'static [(&'static str, [f64; 3])]| table.iter().map(|(k, _)| *k);

    let set: BTreeSet<&'static str> = level_keys(climate::TABLE_5_COOLING_W_M2)
        .chain(level_keys(climate::TABLE_7_HEATING_W_M2))
        .chain(keys(air::TABLE_10_VENTILATION_LS_M2))
        .chain(keys(electrical::TABLE_11_ELECTRICAL_W_M2))
        .chain(keys(electrical::TABLE_12_SUPPLEMENTARY_W_M2))
        .chain(space::USAGE_TO_GLOBAL_CATEGORY.iter().map(|(k, _)| *k))
        .chain(WATER_SELECTOR_USAGES.iter().copied())
        .chain([DATA_CENTER, INDUSTRIAL])
        .collect();
    set.into_iter().collect()
});

/// Sorted, de-duplicated list of known usage keys.
pub fn all_usages() -> &'static [&'static str] {
    &ALL_USAGES
}

/// Whether a usage appears in the catalog.
pub fn is_known_usage(usage: &str) -> bool {
    ALL_USAGES.binary_search(&usage.trim()).is_ok()
}
