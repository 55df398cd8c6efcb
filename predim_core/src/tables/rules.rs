//! # Default Key Rules
//!
//! When the settings carry no explicit mapping for a usage, the all-air and
//! water calculators fall back to these rule tables to pick a row of
//! Table 9, 13 or 14.
//!
//! Resolution order:
//!
//! 1. The usage is itself a row of the target table → that row.
//! 2. The first rule (in order) whose pattern matches the usage → its key.
//! 3. Otherwise no default; the calculator warns and asks for a mapping.
//!
//! `Exact` patterns compare the trimmed usage verbatim. `Prefix` and
//! `Contains` patterns ignore ASCII case.

use super::usage::*;
use super::{air, water};
use air::typology;
use water::water_use;

/// How a rule matches a usage name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Exact(&'static str),
    Prefix(&'static str),
    Contains(&'static str),
}

impl Pattern {
    pub fn matches(&self, usage: &str) -> bool {
        let usage = usage.trim();
        match self {
            Pattern::Exact(p) => usage == *p,
            Pattern::Prefix(p) => usage.to_ascii_lowercase().starts_with(&p.to_ascii_lowercase()),
            Pattern::Contains(p) => usage.to_ascii_lowercase().contains(&p.to_ascii_lowercase()),
        }
    }
}

/// Pattern → table key.
#[derive(Debug, Clone, Copy)]
pub struct KeyRule {
    pub pattern: Pattern,
    pub key: &'static str,
}

const fn exact(p: &'static str, key: &'static str) -> KeyRule {
    KeyRule { pattern: Pattern::Exact(p), key }
}

const fn prefix(p: &'static str, key: &'static str) -> KeyRule {
    KeyRule { pattern: Pattern::Prefix(p), key }
}

const fn contains(p: &'static str, key: &'static str) -> KeyRule {
    KeyRule { pattern: Pattern::Contains(p), key }
}

/// A priority-ordered rule list for one target table.
#[derive(Debug, Clone, Copy)]
pub struct RuleTable {
    /// Target table, for messages
    pub table: &'static str,
    /// Returns the static key when the usage is already a row of the table
    pub own_key: fn(&str) -> Option<&'static str>,
    pub rules: &'static [KeyRule],
}

impl RuleTable {
    /// Default key for a usage, if any rule applies.
    pub fn resolve(&self, usage: &str) -> Option<&'static str> {
        if let Some(key) = (self.own_key)(usage) {
            return Some(key);
        }
        self.rules
            .iter()
            .find(|rule| rule.pattern.matches(usage))
            .map(|rule| rule.key)
    }
}

/// Default Table 9 typology for a usage.
pub static ALL_AIR_TYPOLOGY: RuleTable = RuleTable {
    table: super::manual_ref::TABLE_9,
    own_key: air::typology_key,
    rules: &[
        exact(OFFICE, typology::OFFICE_OPEN_PLAN),
        exact(HOTEL, typology::HOTEL_ROOMS),
        exact(MUSEUM, typology::MUSEUM_LIBRARY),
        exact(LIBRARY, typology::MUSEUM_LIBRARY),
        exact(AUDITORIUM, typology::AUDITORIUM_THEATRE),
        exact(THEATRE, typology::AUDITORIUM_THEATRE),
    ],
};

/// Default Table 13 row for a usage.
pub static COLD_WATER_KEY: RuleTable = RuleTable {
    table: super::manual_ref::TABLE_13,
    own_key: water::cold_water_key,
    rules: &[
        exact(OFFICE, water_use::OFFICE_WITHOUT_CAFETERIA),
        exact(TEACHING, water_use::SCHOOL),
        prefix("Hospital", water_use::HOSPITAL),
        exact(HOTEL, water_use::HOTEL_MID_RANGE),
        contains("restaurant", water_use::RESTAURANT),
        contains("cafeteria", water_use::RESTAURANT),
    ],
};

/// Default Table 14 row for a usage.
pub static HOT_WATER_KEY: RuleTable = RuleTable {
    table: super::manual_ref::TABLE_14,
    own_key: water::hot_water_key,
    rules: &[
        exact(water_use::OFFICE_WITHOUT_CAFETERIA, water_use::OFFICE),
        exact(water_use::OFFICE_WITH_CAFETERIA, water_use::OFFICE),
        exact(TEACHING, water_use::SCHOOL),
        prefix("Hospital", water_use::HOSPITAL),
        exact(HOTEL, water_use::HOTEL_MID_RANGE),
        contains("restaurant", water_use::RESTAURANT),
        contains("cafeteria", water_use::RESTAURANT),
    ],
};
