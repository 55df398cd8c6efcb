//! # Project Files
//!
//! A project lives in one `.pdm` file (pretty-printed JSON of
//! [`Project`]). Two sibling files may appear next to it:
//!
//! ```text
//! office.pdm        the project
//! office.pdm.tmp    written first on save, then renamed over office.pdm
//! office.pdm.lock   who is editing office.pdm (JSON LockHolder)
//! ```
//!
//! A project on a shared drive is opened by one engineer at a time: the
//! editor takes a [`FileLock`], others can still load and report on the
//! file and see who holds it through [`load_project_with_lock_check`].
//!
//! Loading checks the schema version. Out-of-range settings are logged but
//! kept, since every calculator falls back to defaults for them.
//!
//! ## Example
//!
//! ```rust,no_run
//! use predim_core::file_io::{save_project, load_project, FileLock};
//! use predim_core::project::Project;
//! use std::path::Path;
//!
//! let path = Path::new("office.pdm");
//! let lock = FileLock::acquire(path, "engineer@company.com")?;
//! save_project(&Project::sample_office(), path)?;
//! drop(lock);
//!
//! let reloaded = load_project(path)?;
//! assert_eq!(reloaded.zones.len(), 2);
//! # Ok::<(), predim_core::errors::CalcError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{CalcError, CalcResult};
use crate::project::{Project, SCHEMA_VERSION};

/// Project file extension
pub const PROJECT_EXTENSION: &str = "pdm";

/// A lock older than this is abandoned, whoever holds it.
const LOCK_MAX_AGE_HOURS: i64 = 24;

// ============================================================================
// Paths
// ============================================================================

/// The project file and its temporary and lock siblings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    pub project: PathBuf,
    pub temp: PathBuf,
    pub lock: PathBuf,
}

impl ProjectPaths {
    /// `office.pdm` → `office.pdm.tmp`, `office.pdm.lock`.
    ///
    /// A path without extension gets `.tmp` and `.lock` appended directly.
    pub fn new(project: &Path) -> Self {
        let sibling = |suffix: &str| {
            let ext = match project.extension() {
                Some(ext) => format!("{}.{}", ext.to_string_lossy(), suffix),
                None => suffix.to_string(),
            };
            project.with_extension(ext)
        };
        ProjectPaths {
            project: project.to_path_buf(),
            temp: sibling("tmp"),
            lock: sibling("lock"),
        }
    }

    fn display(&self) -> String {
        self.project.display().to_string()
    }
}

fn io_error(operation: &str, path: &Path, e: std::io::Error) -> CalcError {
    CalcError::file_error(operation, path.display().to_string(), e.to_string())
}

// ============================================================================
// Locking
// ============================================================================

/// Contents of a `.pdm.lock` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockHolder {
    /// Who is editing (email or username)
    pub user: String,
    pub machine: String,
    pub pid: u32,
    pub since: DateTime<Utc>,
}

impl LockHolder {
    fn current(user: impl Into<String>) -> Self {
        LockHolder {
            user: user.into(),
            machine: machine_name().unwrap_or_else(|| "unknown".to_string()),
            pid: std::process::id(),
            since: Utc::now(),
        }
    }

    /// "user (machine)"
    pub fn label(&self) -> String {
        format!("{} ({})", self.user, self.machine)
    }

    /// Abandoned: the holding process is gone from this machine, or the lock
    /// is older than a day.
    pub fn is_stale(&self) -> bool {
        let same_machine = machine_name().as_deref() == Some(self.machine.as_str());
        (same_machine && !process_alive(self.pid)) || Utc::now() - self.since > Duration::hours(LOCK_MAX_AGE_HOURS)
    }

    fn read(lock_path: &Path) -> Option<Self> {
        let text = fs::read_to_string(lock_path).ok()?;
        serde_json::from_str(&text).ok()
    }
}

fn machine_name() -> Option<String> {
    let var = if cfg!(windows) { "COMPUTERNAME" } else { "HOSTNAME" };
    std::env::var(var).ok().or_else(|| std::env::var("HOST").ok())
}

#[cfg(unix)]
fn process_alive(pid: u32) -> bool {
    Path::new("/proc").join(pid.to_string()).exists()
}

// Only the age limit releases a lock here
#[cfg(not(unix))]
fn process_alive(_pid: u32) -> bool {
    true
}

/// Exclusive edit lock on a project, released on drop.
///
/// Holds an fs2 lock on the `.pdm.lock` file and writes the [`LockHolder`]
/// into it.
pub struct FileLock {
    paths: ProjectPaths,
    _file: File,
    pub holder: LockHolder,
}

impl FileLock {
    /// Take the edit lock for `path`.
    ///
    /// Fails with `FileLocked` when another engineer holds a live lock or
    /// another process has the lock file open. A stale lock is taken over.
    pub fn acquire(path: &Path, user: impl Into<String>) -> CalcResult<Self> {
        let paths = ProjectPaths::new(path);

        if let Some(existing) = LockHolder::read(&paths.lock) {
            if !existing.is_stale() {
                return Err(CalcError::file_locked(paths.display(), existing.label(), existing.since.to_rfc3339()));
            }
            warn!(project = %paths.display(), holder = %existing.label(), since = %existing.since, "taking over stale project lock");
        }

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&paths.lock)
            .map_err(|e| io_error("create lock", &paths.lock, e))?;
        file.try_lock_exclusive()
            .map_err(|_| CalcError::file_locked(paths.display(), "another process", "unknown"))?;

        let holder = LockHolder::current(user);
        let json = serde_json::to_string_pretty(&holder).map_err(CalcError::serialization)?;
        file.write_all(json.as_bytes())
            .and_then(|_| file.sync_all())
            .map_err(|e| io_error("write lock", &paths.lock, e))?;

        debug!(project = %paths.display(), user = %holder.user, "project lock taken");
        Ok(FileLock { paths, _file: file, holder })
    }

    /// Live lock on `path`, if any. Stale locks count as free.
    pub fn check(path: &Path) -> Option<LockHolder> {
        LockHolder::read(&ProjectPaths::new(path).lock).filter(|h| !h.is_stale())
    }

    pub fn project_path(&self) -> &Path {
        &self.paths.project
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.paths.lock);
    }
}

// ============================================================================
// Save / load
// ============================================================================

/// Write `project` to `path` through the `.pdm.tmp` sibling.
///
/// The temporary file is synced before it replaces the project, so a crash
/// leaves either the old or the new project on disk.
pub fn save_project(project: &Project, path: &Path) -> CalcResult<()> {
    let paths = ProjectPaths::new(path);
    let json = serde_json::to_string_pretty(project).map_err(CalcError::serialization)?;

    let written = File::create(&paths.temp)
        .and_then(|mut tmp| tmp.write_all(json.as_bytes()).and_then(|_| tmp.sync_all()))
        .map_err(|e| io_error("write temp file", &paths.temp, e))
        .and_then(|_| fs::rename(&paths.temp, &paths.project).map_err(|e| io_error("replace project", &paths.project, e)));

    if written.is_err() {
        let _ = fs::remove_file(&paths.temp);
    }
    written?;

    debug!(project = %paths.display(), zones = project.zones.len(), bytes = json.len(), "project saved");
    Ok(())
}

/// Read a project and check its schema version.
pub fn load_project(path: &Path) -> CalcResult<Project> {
    let text = fs::read_to_string(path).map_err(|e| io_error("open", path, e))?;
    let project: Project = serde_json::from_str(&text)
        .map_err(|e| CalcError::serialization(format!("{} is not a valid project: {}", path.display(), e)))?;

    check_schema_version(&project.meta.version)?;
    if let Err(e) = project.settings.validate() {
        warn!(project = %path.display(), error = %e, "project has out-of-range settings");
    }

    debug!(project = %path.display(), zones = project.zones.len(), "project loaded");
    Ok(project)
}

/// Load a project for reading, with the holder of its edit lock if any.
pub fn load_project_with_lock_check(path: &Path) -> CalcResult<(Project, Option<LockHolder>)> {
    let project = load_project(path)?;
    Ok((project, FileLock::check(path)))
}

/// Same major version, and while on 0.x no newer minor version.
fn check_schema_version(file_version: &str) -> CalcResult<()> {
    let parse = |v: &str| -> Vec<u32> { v.split('.').filter_map(|p| p.parse().ok()).collect() };
    let compatible = match (parse(file_version).as_slice(), parse(SCHEMA_VERSION).as_slice()) {
        ([0, file_minor, ..], [0, minor, ..]) => file_minor <= minor,
        ([file_major, ..], [major, ..]) => file_major == major,
        _ => false,
    };

    if compatible {
        Ok(())
    } else {
        Err(CalcError::VersionMismatch {
            file_version: file_version.to_string(),
            expected_version: SCHEMA_VERSION.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    fn scratch(name: &str) -> PathBuf {
        temp_dir().join(format!("predim_test_{}_{}.pdm", name, std::process::id()))
    }

    #[test]
    fn test_project_paths() {
        let paths = ProjectPaths::new(Path::new("/jobs/25-001/office.pdm"));
        assert_eq!(paths.temp, Path::new("/jobs/25-001/office.pdm.tmp"));
        assert_eq!(paths.lock, Path::new("/jobs/25-001/office.pdm.lock"));

        let bare = ProjectPaths::new(Path::new("/jobs/office"));
        assert_eq!(bare.lock, Path::new("/jobs/office.lock"));
    }

    #[test]
    fn test_sample_office_survives_save_and_load() {
        let path = scratch("roundtrip");
        let mut project = Project::sample_office();
        project.meta.engineer = "Test Engineer".to_string();
        save_project(&project, &path).unwrap();

        let loaded = load_project(&path).unwrap();
        assert_eq!(loaded.meta.engineer, "Test Engineer");
        assert_eq!(loaded.zones, project.zones);
        assert_eq!(loaded.settings, project.settings);
        assert!(!ProjectPaths::new(&path).temp.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_lock_taken_and_released() {
        let path = scratch("lock");
        let lock_path = ProjectPaths::new(&path).lock;

        let lock = FileLock::acquire(&path, "engineer@example.com").unwrap();
        assert_eq!(lock.holder.user, "engineer@example.com");
        assert_eq!(lock.project_path(), path.as_path());
        assert!(lock_path.exists());

        drop(lock);
        assert!(!lock_path.exists());
    }

    #[test]
    fn test_old_lock_is_stale() {
        let mut holder = LockHolder::current("someone@example.com");
        holder.machine = "another-workstation".to_string();
        assert!(!holder.is_stale());
        assert!(holder.label().starts_with("someone@example.com ("));

        holder.since = Utc::now() - Duration::hours(LOCK_MAX_AGE_HOURS + 1);
        assert!(holder.is_stale());
    }

    #[test]
    fn test_schema_versions() {
        assert!(check_schema_version(SCHEMA_VERSION).is_ok());
        assert!(check_schema_version("0.1.5").is_ok());
        assert!(check_schema_version("0.0.9").is_ok());

        assert!(check_schema_version("1.0.0").is_err());
        assert!(check_schema_version("0.2.0").is_err());
        assert!(check_schema_version("garbage").is_err());
    }

    #[test]
    fn test_out_of_range_settings_still_load() {
        let path = scratch("bad_settings");
        let mut project = Project::sample_office();
        project.settings.heating_oversize = -1.0;
        save_project(&project, &path).unwrap();

        let loaded = load_project(&path).unwrap();
        assert_eq!(loaded.settings.heating_oversize, -1.0);
        assert!(loaded.settings.validate().is_err());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_and_unlocked_files() {
        let err = load_project(Path::new("/definitely/not/here.pdm")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");

        let path = scratch("unlocked");
        save_project(&Project::new("Test", "TEST", "Client"), &path).unwrap();
        let (loaded, holder) = load_project_with_lock_check(&path).unwrap();
        assert_eq!(loaded.meta.job_id, "TEST");
        assert!(holder.is_none());

        let _ = fs::remove_file(&path);
    }
}
