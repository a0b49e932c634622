//! # File I/O Module
//!
//! Saves and reloads estimates together with the input that produced them:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **Version validation**: Refuse records written by a newer schema
//!
//! ## File Format
//!
//! Records are JSON documents with a `meta` block, the `input` and the
//! computed `estimate`. The conventional extension is `.estimate.json`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use estimate_core::file_io::{load_record, save_record, EstimateRecord};
//! use estimate_core::{compute_estimate, ProjectInput, ProjectType};
//! use estimate_core::units::AreaUnit;
//! use std::path::Path;
//!
//! let input = ProjectInput::new(ProjectType::Residential, 1200.0, AreaUnit::Sqft);
//! let estimate = compute_estimate(&input)?;
//! let record = EstimateRecord::new("Kothrud flat", input, estimate);
//!
//! let path = Path::new("kothrud.estimate.json");
//! save_record(&record, path)?;
//! let loaded = load_record(path)?;
//! assert_eq!(loaded.meta.id, record.meta.id);
//! # Ok::<(), estimate_core::errors::EstimateError>(())
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{EstimateError, EstimateResult};
use crate::estimate::CostEstimate;
use crate::project::ProjectInput;

/// Current record schema version
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Record metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMetadata {
    /// Schema version for compatibility checks
    pub version: String,
    pub id: Uuid,
    pub created: DateTime<Utc>,
    /// Free-form name shown in listings
    pub label: String,
}

/// An estimate saved alongside the input that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateRecord {
    pub meta: RecordMetadata,
    pub input: ProjectInput,
    pub estimate: CostEstimate,
}

impl EstimateRecord {
    /// Wrap an estimate in a new record with a fresh id and timestamp.
    pub fn new(label: impl Into<String>, input: ProjectInput, estimate: CostEstimate) -> Self {
        EstimateRecord {
            meta: RecordMetadata {
                version: SCHEMA_VERSION.to_string(),
                id: Uuid::new_v4(),
                created: Utc::now(),
                label: label.into(),
            },
            input,
            estimate,
        }
    }
}

/// Save a record with atomic write semantics.
///
/// The record is written to `<path>.tmp`, synced to disk and renamed over
/// `path`, so an interrupted save never leaves a truncated file behind.
pub fn save_record(record: &EstimateRecord, path: &Path) -> EstimateResult<()> {
    let json = serde_json::to_string_pretty(record).map_err(|e| EstimateError::serialization(e.to_string()))?;

    let tmp_path = tmp_path_for(path);

    let written = write_synced(&tmp_path, json.as_bytes()).and_then(|()| {
        fs::rename(&tmp_path, path)
            .map_err(|e| EstimateError::file_error("rename to final", path.display().to_string(), e.to_string()))
    });
    if let Err(err) = written {
        // Best effort: the temp file may never have been created
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }

    tracing::debug!(path = %path.display(), id = %record.meta.id, "saved estimate record");
    Ok(())
}

fn write_synced(tmp_path: &Path, bytes: &[u8]) -> EstimateResult<()> {
    let tmp_error = |operation: &str, e: std::io::Error| {
        EstimateError::file_error(operation, tmp_path.display().to_string(), e.to_string())
    };

    let mut tmp_file = File::create(tmp_path).map_err(|e| tmp_error("create temp file", e))?;
    tmp_file.write_all(bytes).map_err(|e| tmp_error("write temp file", e))?;
    tmp_file.sync_all().map_err(|e| tmp_error("sync temp file", e))
}

/// Load a record from a file.
///
/// # Returns
///
/// * `Ok(EstimateRecord)` - Successfully loaded record
/// * `Err(EstimateError::VersionMismatch)` - Written by an incompatible schema
/// * `Err(EstimateError::SerializationError)` - Invalid JSON
/// * `Err(EstimateError::FileError)` - I/O error
pub fn load_record(path: &Path) -> EstimateResult<EstimateRecord> {
    let contents = fs::read_to_string(path)
        .map_err(|e| EstimateError::file_error("read", path.display().to_string(), e.to_string()))?;

    let record: EstimateRecord = serde_json::from_str(&contents)
        .map_err(|e| EstimateError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))?;

    validate_version(&record.meta.version)?;

    Ok(record)
}

fn tmp_path_for(path: &Path) -> std::path::PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Validate that a file version is compatible with the current schema.
///
/// Major versions must match. While the schema is 0.x, a file with a newer
/// minor version is rejected too.
pub fn validate_version(file_version: &str) -> EstimateResult<()> {
    let mismatch = || EstimateError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version.split('.').filter_map(|p| p.parse().ok()).collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION.split('.').filter_map(|p| p.parse().ok()).collect();

    let (Some(file_major), Some(current_major)) = (file_parts.first(), current_parts.first()) else {
        return Err(mismatch());
    };

    if file_major != current_major {
        return Err(mismatch());
    }

    if *current_major == 0 {
        if let (Some(file_minor), Some(current_minor)) = (file_parts.get(1), current_parts.get(1)) {
            if file_minor > current_minor {
                return Err(mismatch());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimate::compute_estimate;
    use crate::project::ProjectType;
    use crate::units::AreaUnit;
    use std::env::temp_dir;
    use std::path::PathBuf;

    fn temp_record_path(name: &str) -> PathBuf {
        temp_dir().join(format!("estimate_core_test_{}_{}.estimate.json", name, std::process::id()))
    }

    fn sample_record() -> EstimateRecord {
        let input = ProjectInput::new(ProjectType::Commercial, 2400.0, AreaUnit::Sqft).with_city("Chennai");
        let estimate = compute_estimate(&input).unwrap();
        EstimateRecord::new("Office fit-out", input, estimate)
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_record_path("roundtrip");
        let record = sample_record();

        save_record(&record, &path).unwrap();
        let loaded = load_record(&path).unwrap();

        assert_eq!(loaded.meta.id, record.meta.id);
        assert_eq!(loaded.meta.label, "Office fit-out");
        assert_eq!(loaded.input, record.input);
        assert_eq!(loaded.estimate.total_cost, record.estimate.total_cost);
        assert_eq!(loaded.estimate.timeline, record.estimate.timeline);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let path = temp_record_path("atomic");
        save_record(&sample_record(), &path).unwrap();

        assert!(!tmp_path_for(&path).exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_failed_save_removes_tmp_file() {
        // Renaming a file over a non-empty directory fails after the temp file is written
        let path = temp_record_path("occupied");
        fs::create_dir_all(path.join("inner")).unwrap();

        let err = save_record(&sample_record(), &path).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
        assert!(!tmp_path_for(&path).exists());

        fs::remove_dir_all(&path).unwrap();
    }

    #[test]
    fn test_tmp_path_keeps_full_name() {
        let tmp = tmp_path_for(Path::new("/data/site.estimate.json"));
        assert_eq!(tmp, Path::new("/data/site.estimate.json.tmp"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_record(Path::new("/nonexistent/never.estimate.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_load_invalid_json() {
        let path = temp_record_path("invalid");
        fs::write(&path, "{ not json").unwrap();
        let err = load_record(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_newer_record_rejected() {
        let path = temp_record_path("newer");
        let mut record = sample_record();
        record.meta.version = "0.9.0".to_string();
        save_record(&record, &path).unwrap();

        assert!(matches!(load_record(&path), Err(EstimateError::VersionMismatch { .. })));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version("0.1.0").is_ok());
        assert!(validate_version("0.0.3").is_ok());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("garbage").is_err());
    }
}
