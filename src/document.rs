use crate::report::Reporter;
use serde::Serialize;
use serde_json::Value;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Error loading {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Error loading {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Error saving {}: {source}", .path.display())]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Error saving {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl DocumentError {
    pub fn path(&self) -> &Path {
        match self {
            DocumentError::Read { path, .. }
            | DocumentError::Parse { path, .. }
            | DocumentError::Serialize { path, .. }
            | DocumentError::Write { path, .. } => path,
        }
    }
}

/// Read and parse a JSON document.
pub fn read_json(path: &Path) -> Result<Value, DocumentError> {
    let file = File::open(path).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| DocumentError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Like [`read_json`], but reports the failure and hands back `None`.
pub fn load_json(path: &Path, reporter: &dyn Reporter) -> Option<Value> {
    match read_json(path) {
        Ok(value) => Some(value),
        Err(e) => {
            reporter.error(&e.to_string());
            None
        }
    }
}

/// Render a value the way it is written to disk: 2-space indent, UTF-8 kept literal.
pub fn to_pretty_string<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// Serialize `value` to `path`, replacing whatever was there.
///
/// Missing parent directories are created first.
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<(), DocumentError> {
    let text = to_pretty_string(value).map_err(|source| DocumentError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;

    let write_err = |source: std::io::Error| DocumentError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
    }

    let mut out = BufWriter::new(File::create(path).map_err(write_err)?);
    out.write_all(text.as_bytes()).map_err(write_err)?;
    out.flush().map_err(write_err)
}

/// Like [`write_json`], but reports the outcome. Returns the error so the caller
/// can count it; nothing is raised past this point.
pub fn save_json<T: Serialize + ?Sized>(
    value: &T,
    path: &Path,
    reporter: &dyn Reporter,
) -> Result<(), DocumentError> {
    match write_json(value, path) {
        Ok(()) => {
            reporter.progress(&format!("Successfully saved to {}", path.display()));
            Ok(())
        }
        Err(e) => {
            reporter.error(&e.to_string());
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Recorder;
    use serde_json::json;

    #[test]
    fn test_load_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("TextMap.json");
        let rec = Recorder::new();

        assert!(load_json(&path, &rec).is_none());

        let errors = rec.errors();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Error loading"));
        assert!(errors[0].contains("TextMap.json"));
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "[{\"RoleID\": 1,").unwrap();

        let err = read_json(&path).unwrap_err();
        assert!(matches!(err, DocumentError::Parse { .. }));
        assert_eq!(err.path(), path.as_path());
    }

    #[test]
    fn test_write_keeps_non_ascii_literal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_json(&json!([{"text": "強化 Boost"}]), &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "[\n  {\n    \"text\": \"強化 Boost\"\n  }\n]");
    }

    #[test]
    fn test_write_overwrites_and_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.json");
        write_json(&json!([1, 2, 3]), &path).unwrap();
        write_json(&json!([]), &path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn test_save_into_missing_location_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let path = blocker.join("out.json");
        let rec = Recorder::new();

        assert!(save_json(&json!([]), &path, &rec).is_err());
        let errors = rec.errors();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Error saving"));
    }
}
