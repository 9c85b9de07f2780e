use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("config directory missing or not a directory: {0}")]
    ConfigDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Atomically replace the file at `path` by writing a sibling temp file then renaming.
///
/// Missing parent directories are created.
pub fn write_atomically(path: &Path, content: &str) -> Result<PathBuf, PersistError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if dir.exists() {
        if !dir.is_dir() {
            return Err(PersistError::ConfigDir(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
    } else {
        fs::create_dir_all(&dir).map_err(|e| PersistError::ConfigDir(e.to_string()))?;
    }

    let mut tmp = NamedTempFile::new_in(&dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;
    tmp.persist(path).map_err(|e| PersistError::Io(e.error))?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn replaces_existing_file() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("slide_forge.ron");

        write_atomically(&target, "first").unwrap();
        let written = write_atomically(&target, "second").unwrap();

        assert_eq!(written, target);
        assert_eq!(fs::read_to_string(&target).unwrap(), "second");
    }

    #[test]
    fn creates_missing_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("nested").join("cfg").join("slide_forge.ron");

        write_atomically(&target, "x").unwrap();
        assert!(target.is_file());
    }

    #[test]
    fn no_partial_file_when_parent_is_a_file() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("not_a_dir");
        fs::write(&blocker, "x").unwrap();

        let result = write_atomically(&blocker.join("slide_forge.ron"), "data");
        assert!(matches!(result, Err(PersistError::ConfigDir(_))));
        assert_eq!(fs::read_to_string(&blocker).unwrap(), "x");
    }
}
