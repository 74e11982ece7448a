//! # Resource Loading
//!
//! Loading a unit reads it through a [`UnitLoader`] backend and defines every
//! symbol it declares in the namespace's [`SymbolSpace`]. The backend decides
//! *where* units live; [`ResourceLoader`] decides *when* they are loaded.
//!
//! ## Implementations
//!
//! - [`fs::FsLoader`]: production loader reading units from a project root
//! - [`memory::MemLoader`]: in-memory units for testing and embedding
//!
//! ## Unit Format
//!
//! A unit is a JSON object whose top-level keys are the symbols it defines:
//!
//! ```text
//! classes/model/foo/bar.json
//! {
//!   "Foo_Bar": { "table": "foo_bars" },
//!   "Foo_Bar_Limit": 20
//! }
//! ```
//!
//! View units may pair with a template artifact, read verbatim.
//!
//! ## Load Once
//!
//! Each distinct unit path is loaded at most once per symbol space. Loading a
//! path again is a no-op, and a symbol already defined by an earlier unit
//! keeps its first definition along with the unit it came from.

use crate::error::{LoadFailure, Result};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, trace};

pub mod fs;
pub mod memory;

/// The symbols one unit declares.
pub type Unit = Map<String, Value>;

/// Abstract interface for reading units and templates.
pub trait UnitLoader: Send + Sync {
    /// Read and parse the unit at `path`.
    /// Returns Ok(None) if nothing exists there.
    fn read_unit(&self, path: &Path) -> Result<Option<Unit>>;

    /// Read a template artifact. Returns Ok(None) if it does not exist.
    fn read_template(&self, path: &Path) -> Result<Option<String>>;
}

/// A defined symbol and the unit that defined it.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub value: Value,
    pub unit: PathBuf,
}

/// Symbols defined so far in one namespace, plus the units already loaded.
#[derive(Debug, Default)]
pub struct SymbolSpace {
    symbols: HashMap<String, Symbol>,
    loaded: HashSet<PathBuf>,
}

impl SymbolSpace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn is_loaded(&self, path: &Path) -> bool {
        self.loaded.contains(path)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    fn define(&mut self, name: String, value: Value, unit: &Path) {
        if let Some(existing) = self.symbols.get(&name) {
            debug!(
                symbol = %name,
                kept = %existing.unit.display(),
                "symbol already defined, keeping first definition"
            );
            return;
        }
        let unit = unit.to_path_buf();
        self.symbols.insert(name, Symbol { value, unit });
    }
}

/// Brings units into a [`SymbolSpace`], once per path.
#[derive(Clone)]
pub struct ResourceLoader {
    backend: Arc<dyn UnitLoader>,
}

impl ResourceLoader {
    pub fn new(backend: Arc<dyn UnitLoader>) -> Self {
        Self { backend }
    }

    /// Load the unit at `path` into `symbols`.
    ///
    /// Failures are returned as values so the calling registry can apply its
    /// own error policy. An unreadable unit is not marked as loaded.
    pub fn load(
        &self,
        path: &Path,
        symbols: &mut SymbolSpace,
    ) -> std::result::Result<(), LoadFailure> {
        if symbols.is_loaded(path) {
            trace!(path = %path.display(), "unit already loaded");
            return Ok(());
        }

        let unit = match self.backend.read_unit(path) {
            Ok(Some(unit)) => unit,
            Ok(None) => return Err(LoadFailure::Missing),
            Err(e) => return Err(LoadFailure::Unreadable(e.to_string())),
        };

        debug!(path = %path.display(), symbols = unit.len(), "loaded unit");
        for (name, value) in unit {
            symbols.define(name, value, path);
        }
        symbols.loaded.insert(path.to_path_buf());
        Ok(())
    }

    pub fn template(&self, path: &Path) -> std::result::Result<Option<String>, LoadFailure> {
        self.backend
            .read_template(path)
            .map_err(|e| LoadFailure::Unreadable(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::memory::MemLoader;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_load_defines_every_symbol() {
        let mem = MemLoader::new().with_unit(
            "classes/model/foo.json",
            json!({ "Foo": { "a": 1 }, "Foo_Helper": true }),
        );
        let loader = ResourceLoader::new(Arc::new(mem));
        let mut symbols = SymbolSpace::new();

        loader
            .load(Path::new("classes/model/foo.json"), &mut symbols)
            .unwrap();

        assert!(symbols.lookup("Foo").is_some());
        assert!(symbols.lookup("Foo_Helper").is_some());
        assert!(symbols.is_loaded(Path::new("classes/model/foo.json")));
        assert_eq!(symbols.len(), 2);
    }

    #[test]
    fn test_loading_twice_is_a_noop() {
        let mem = Arc::new(MemLoader::new().with_unit("a.json", json!({ "A": 1 })));
        let loader = ResourceLoader::new(mem.clone());
        let mut symbols = SymbolSpace::new();

        loader.load(Path::new("a.json"), &mut symbols).unwrap();
        loader.load(Path::new("a.json"), &mut symbols).unwrap();

        assert_eq!(mem.reads(Path::new("a.json")), 1);
        assert_eq!(symbols.len(), 1);
    }

    #[test]
    fn test_missing_unit_is_a_failure_value() {
        let loader = ResourceLoader::new(Arc::new(MemLoader::new()));
        let mut symbols = SymbolSpace::new();

        let result = loader.load(Path::new("nope.json"), &mut symbols);
        assert_eq!(result, Err(LoadFailure::Missing));
        assert!(!symbols.is_loaded(Path::new("nope.json")));
    }

    #[test]
    fn test_unreadable_unit_is_not_marked_loaded() {
        let mem = MemLoader::new().with_raw_unit("bad.json", "{ not json");
        let loader = ResourceLoader::new(Arc::new(mem));
        let mut symbols = SymbolSpace::new();

        let result = loader.load(Path::new("bad.json"), &mut symbols);
        assert!(matches!(result, Err(LoadFailure::Unreadable(_))));
        assert!(!symbols.is_loaded(Path::new("bad.json")));
        assert!(symbols.is_empty());
    }

    #[test]
    fn test_first_definition_wins() {
        let mem = MemLoader::new()
            .with_unit("one.json", json!({ "Shared": "first" }))
            .with_unit("two.json", json!({ "Shared": "second" }));
        let loader = ResourceLoader::new(Arc::new(mem));
        let mut symbols = SymbolSpace::new();

        loader.load(Path::new("one.json"), &mut symbols).unwrap();
        loader.load(Path::new("two.json"), &mut symbols).unwrap();

        let shared = symbols.lookup("Shared").unwrap();
        assert_eq!(shared.value, json!("first"));
        assert_eq!(shared.unit, PathBuf::from("one.json"));
    }
}
