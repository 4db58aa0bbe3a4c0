//! JSON file store for catalogs, aliveness probes and task lists.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::domain::{AlivenessMap, Catalog, CuratorError};

/// Load the catalog persisted by the previous cycle.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog, CuratorError> {
    read_json(path.as_ref())
}

/// Load a `{ "<subscription url>": bool }` probe result.
pub fn load_aliveness(path: impl AsRef<Path>) -> Result<AlivenessMap, CuratorError> {
    read_json(path.as_ref())
}

/// Load a raw list of entries (task declarations, proxy records).
pub fn load_list(path: impl AsRef<Path>) -> Result<Vec<serde_json::Value>, CuratorError> {
    read_json(path.as_ref())
}

/// Write `content` to `path`, creating parent directories first.
///
/// Open, write, flush. Not atomic: a crash mid-write can leave a truncated file.
pub fn persist(path: impl AsRef<Path>, content: &str) -> Result<(), CuratorError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| CuratorError::io(parent, e))?;
    }

    let mut file = File::create(path).map_err(|e| CuratorError::io(path, e))?;
    file.write_all(content.as_bytes())
        .map_err(|e| CuratorError::io(path, e))?;
    file.flush().map_err(|e| CuratorError::io(path, e))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CuratorError> {
    let raw = fs::read_to_string(path).map_err(|e| CuratorError::io(path, e))?;
    serde_json::from_str(&raw).map_err(|e| CuratorError::json(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persist_creates_parent_dirs_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/catalog.json");

        persist(&path, "first").unwrap();
        persist(&path, "second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn load_catalog_reports_path_on_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{not json").unwrap();

        let err = load_catalog(&path).unwrap_err();
        assert!(matches!(err, CuratorError::Json { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_aliveness(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, CuratorError::Io { .. }));
    }

    #[test]
    fn aliveness_map_reads_bools() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alive.json");
        fs::write(&path, r#"{"http://x": true, "http://y": false}"#).unwrap();

        let alive = load_aliveness(&path).unwrap();
        assert_eq!(alive.get("http://x"), Some(&true));
        assert_eq!(alive.get("http://y"), Some(&false));
    }
}
