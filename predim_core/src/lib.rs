//! # predim_core - Building-Services Pre-Sizing Engine
//!
//! `predim_core` estimates the building-services demands of a project at an
//! early design stage from a zone table (usage, area, climate zone, load
//! level, occupancy) and a handful of building-wide settings. All inputs and
//! outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Each calculator is a pure function of zones and settings
//! - **Table-driven**: Reference values live in read-only tables ([`tables`])
//! - **Never aborts on data**: Missing lookups and bad settings give empty cells or defaults plus a [`Warning`]
//! - **Rich Errors**: Structured [`CalcError`] for file I/O and project versions
//!
//! ## Quick Start
//!
//! ```rust
//! use predim_core::project::Project;
//! use predim_core::report::BuildingReport;
//!
//! let project = Project::sample_office();
//! let report = BuildingReport::compute(&project.zones, &project.settings).unwrap();
//!
//! println!("Cooling: {:.1} kW", report.climate.totals.cooling_kw);
//! println!("Electrical service: {}", report.electrical.totals.service);
//! ```
//!
//! ## Modules
//!
//! - [`zone`] - Zone table rows and per-zone overrides
//! - [`settings`] - Building-wide settings (oversizing, mappings, parking, fire)
//! - [`tables`] - Reference tables and lookup helpers
//! - [`calculations`] - The six calculators
//! - [`report`] - All calculators run together
//! - [`warnings`] - Warnings and grouping for display
//! - [`project`] - Project container and metadata
//! - [`file_io`] - File operations with atomic saves and locking

pub mod calculations;
pub mod catalog;
pub mod errors;
#[cfg(not(target_arch = "wasm32"))]
pub mod file_io;
pub mod project;
pub mod report;
pub mod settings;
pub mod tables;
pub mod units;
pub mod warnings;
pub mod zone;

// Re-export commonly used types at crate root for convenience
pub use errors::{CalcError, CalcResult};
#[cfg(not(target_arch = "wasm32"))]
pub use file_io::{load_project, save_project, FileLock};
pub use project::{Project, ProjectMetadata};
pub use report::BuildingReport;
pub use settings::Settings;
pub use warnings::{CalcModule, Warning, WarningGroup};
pub use zone::Zone;
