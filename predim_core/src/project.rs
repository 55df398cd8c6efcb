//! # Project Data Structures
//!
//! The `Project` struct is the root container for one building. Projects
//! serialize to `.pdm` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, engineer, job info, timestamps)
//! ├── settings: Settings (oversizing, mappings, parking, fire protection)
//! └── zones: Vec<Zone> (the zone table, in display order)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use predim_core::project::Project;
//! use predim_core::zone::Zone;
//!
//! let mut project = Project::new("Jane Engineer", "25-042", "ACME Corp");
//! let id = project.add_zone(Zone::new(0, "Office", 1200.0, "C2"));
//! assert_eq!(id, 1);
//!
//! // Serialize to JSON (see file_io module for atomic saves)
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! assert!(json.contains("Office"));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::tables::usage;
use crate::zone::{LoadLevel, Zone};

/// Current schema version for .pdm files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
///
/// This is the top-level struct that gets serialized to `.pdm` files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project metadata (version, engineer, job info)
    pub meta: ProjectMetadata,

    /// Building-wide calculation settings
    #[serde(default)]
    pub settings: Settings,

    /// Zone table
    #[serde(default)]
    pub zones: Vec<Zone>,
}

impl Project {
    /// Create a new empty project.
    ///
    /// # Arguments
    ///
    /// * `engineer` - Name of the responsible engineer
    /// * `job_id` - Job/project number (e.g., "25-001")
    /// * `client` - Client name
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, client: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                client: client.into(),
                title: "Pre-sizing report".to_string(),
                location: String::new(),
                created: now,
                modified: now,
            },
            settings: Settings::default(),
            zones: Vec::new(),
        }
    }

    /// Two-zone office building used as the starting example.
    ///
    /// Offices of 4500 m² and 1000 m² in climate zone D1 at medium load.
    /// Gross floor areas for fire protection are 5000 m² above grade and
    /// 1000 m² below.
    pub fn sample_office() -> Self {
        let mut project = Project::new("", "", "");
        project.meta.title = "Pre-sizing report - Office".to_string();
        project.settings = Settings::default()
            .with_building_usage(usage::OFFICE)
            .with_gross_areas(5000.0, 1000.0);

        project.add_zone(
            Zone::new(0, usage::OFFICE, 4500.0, "D1")
                .with_name("Above grade (Office)")
                .with_load_level(LoadLevel::Medium)
                .with_density(0.08),
        );
        project.add_zone(
            Zone::new(0, usage::OFFICE, 1000.0, "D1")
                .with_name("Below grade (Office / Basement)")
                .with_load_level(LoadLevel::Medium)
                .with_density(0.02),
        );
        project
    }

    /// Append a zone, assigning the next free identifier.
    ///
    /// Returns the identifier given to the zone.
    pub fn add_zone(&mut self, mut zone: Zone) -> u32 {
        let id = self.next_zone_id();
        zone.id = id;
        self.zones.push(zone);
        self.touch();
        id
    }

    /// Remove a zone by identifier.
    ///
    /// Returns the removed zone if it existed.
    pub fn remove_zone(&mut self, id: u32) -> Option<Zone> {
        let index = self.zones.iter().position(|z| z.id == id)?;
        let zone = self.zones.remove(index);
        self.touch();
        Some(zone)
    }

    /// Get a zone by identifier.
    pub fn get_zone(&self, id: u32) -> Option<&Zone> {
        self.zones.iter().find(|z| z.id == id)
    }

    /// Get a mutable reference to a zone by identifier.
    ///
    /// Note: This method updates the modified timestamp when a zone is found.
    pub fn get_zone_mut(&mut self, id: u32) -> Option<&mut Zone> {
        let index = self.zones.iter().position(|z| z.id == id)?;
        self.meta.modified = Utc::now();
        self.zones.get_mut(index)
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    /// Sum of the zone areas (m²).
    pub fn total_area(&self) -> f64 {
        self.zones.iter().map(Zone::area).sum()
    }

    /// One past the highest id; when that would overflow, the lowest unused id.
    fn next_zone_id(&self) -> u32 {
        let Some(max) = self.zones.iter().map(|z| z.id).max() else {
            return 1;
        };
        max.checked_add(1).unwrap_or_else(|| {
            (1..=u32::MAX)
                .find(|id| self.get_zone(*id).is_none())
                .unwrap_or(0)
        })
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible engineer
    pub engineer: String,

    /// Job/project number
    pub job_id: String,

    /// Client name
    pub client: String,

    /// Report title
    #[serde(default)]
    pub title: String,

    /// Site location
    #[serde(default)]
    pub location: String,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_creation() {
        let project = Project::new("John Doe", "25-001", "Acme Corp");
        assert_eq!(project.meta.engineer, "John Doe");
        assert_eq!(project.meta.job_id, "25-001");
        assert_eq!(project.meta.client, "Acme Corp");
        assert_eq!(project.meta.version, SCHEMA_VERSION);
        assert_eq!(project.zone_count(), 0);
    }

    #[test]
    fn test_project_serialization() {
        let project = Project::sample_office();
        let json = serde_json::to_string_pretty(&project).unwrap();

        assert!(json.contains("Above grade (Office)"));
        assert!(json.contains("\"climate_zone\": \"D1\""));

        let roundtrip: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.zones, project.zones);
        assert_eq!(roundtrip.settings, project.settings);
    }

    #[test]
    fn test_sparse_file_uses_defaults() {
        let json = r#"{
            "meta": {
                "version": "0.1.0",
                "engineer": "",
                "job_id": "",
                "client": "",
                "created": "2025-01-01T00:00:00Z",
                "modified": "2025-01-01T00:00:00Z"
            }
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert!(project.zones.is_empty());
        assert_eq!(project.settings, Settings::default());
        assert_eq!(project.meta.title, "");
    }

    #[test]
    fn test_add_remove_zone() {
        let mut project = Project::new("Engineer", "25-001", "Client");

        let a = project.add_zone(Zone::new(99, "Office", 100.0, "D1"));
        let b = project.add_zone(Zone::new(0, "Hotel", 200.0, "D1"));
        assert_eq!((a, b), (1, 2));
        assert_eq!(project.total_area(), 300.0);

        let removed = project.remove_zone(a);
        assert_eq!(removed.map(|z| z.usage), Some("Office".to_string()));
        assert!(project.get_zone(a).is_none());
        assert!(project.remove_zone(a).is_none());

        // Ids keep increasing past the highest in use
        assert_eq!(project.add_zone(Zone::default()), 3);
    }

    #[test]
    fn test_add_zone_after_max_id() {
        let mut project = Project::new("Engineer", "25-001", "Client");
        // Ids loaded from a file are kept as they are
        project.zones.push(Zone::new(u32::MAX, "Office", 100.0, "D1"));
        project.zones.push(Zone::new(1, "Hotel", 100.0, "D1"));

        let id = project.add_zone(Zone::new(0, "Retail", 50.0, "D1"));
        assert_eq!(id, 2);
        assert_eq!(project.get_zone(2).map(|z| z.usage.as_str()), Some("Retail"));
    }

    #[test]
    fn test_get_zone_mut() {
        let mut project = Project::sample_office();
        if let Some(zone) = project.get_zone_mut(2) {
            zone.area_m2 = Some(1500.0);
        }
        assert_eq!(project.get_zone(2).map(Zone::area), Some(1500.0));
        assert!(project.get_zone_mut(42).is_none());
    }

    #[test]
    fn test_sample_office() {
        let project = Project::sample_office();
        assert_eq!(project.zone_count(), 2);
        assert_eq!(project.total_area(), 5500.0);
        assert_eq!(project.settings.gfa_above_m2, 5000.0);
        assert_eq!(project.settings.gfa_below_m2, 1000.0);
        assert_eq!(project.zones[0].display_name(), "Above grade (Office)");
    }
}
