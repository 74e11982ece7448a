use super::{Unit, UnitLoader};
use crate::error::{AutoloadError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Reads units and templates from a project root on disk.
///
/// Unit paths handed to the loader are relative to `root`.
pub struct FsLoader {
    root: PathBuf,
}

impl FsLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn read_optional(&self, path: &Path) -> Result<Option<String>> {
        match fs::read_to_string(self.root.join(path)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AutoloadError::Io(e)),
        }
    }
}

impl UnitLoader for FsLoader {
    fn read_unit(&self, path: &Path) -> Result<Option<Unit>> {
        let Some(content) = self.read_optional(path)? else {
            return Ok(None);
        };
        let unit: Unit = serde_json::from_str(&content).map_err(AutoloadError::Serialization)?;
        Ok(Some(unit))
    }

    fn read_template(&self, path: &Path) -> Result<Option<String>> {
        self.read_optional(path)
    }
}
