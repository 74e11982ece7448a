use super::{Unit, UnitLoader};
use crate::error::{AutoloadError, Result};
use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

/// In-memory unit loader.
///
/// Units are kept as raw JSON text and parsed on every read, exactly like
/// files would be. Reads are counted per path so tests can assert how often
/// a unit was actually loaded.
#[derive(Default)]
pub struct MemLoader {
    units: RwLock<HashMap<PathBuf, String>>,
    templates: RwLock<HashMap<PathBuf, String>>,
    reads: Mutex<HashMap<PathBuf, usize>>,
    read_delay: Option<Duration>,
}

impl MemLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unit(self, path: impl Into<PathBuf>, unit: Value) -> Self {
        self.insert_unit(path, unit);
        self
    }

    /// Store unit text as-is, including text that does not parse.
    pub fn with_raw_unit(self, path: impl Into<PathBuf>, text: &str) -> Self {
        self.units.write().insert(path.into(), text.to_string());
        self
    }

    pub fn with_template(self, path: impl Into<PathBuf>, template: &str) -> Self {
        self.templates
            .write()
            .insert(path.into(), template.to_string());
        self
    }

    /// Make every unit read take at least `delay`.
    pub fn with_read_delay(mut self, delay: Duration) -> Self {
        self.read_delay = Some(delay);
        self
    }

    /// Add or replace a unit after the loader is in use.
    pub fn insert_unit(&self, path: impl Into<PathBuf>, unit: Value) {
        self.units.write().insert(path.into(), unit.to_string());
    }

    /// How many times the unit at `path` has been read.
    pub fn reads(&self, path: &Path) -> usize {
        self.reads.lock().get(path).copied().unwrap_or(0)
    }

    pub fn total_reads(&self) -> usize {
        self.reads.lock().values().sum()
    }
}

impl UnitLoader for MemLoader {
    fn read_unit(&self, path: &Path) -> Result<Option<Unit>> {
        *self.reads.lock().entry(path.to_path_buf()).or_insert(0) += 1;
        if let Some(delay) = self.read_delay {
            thread::sleep(delay);
        }

        let units = self.units.read();
        match units.get(path) {
            Some(text) => {
                let unit: Unit =
                    serde_json::from_str(text).map_err(AutoloadError::Serialization)?;
                Ok(Some(unit))
            }
            None => Ok(None),
        }
    }

    fn read_template(&self, path: &Path) -> Result<Option<String>> {
        Ok(self.templates.read().get(path).cloned())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use serde_json::json;

    /// A small application laid out with the default conventions.
    ///
    /// - models: `Widget` (ok), `Gadget` (unit defines the wrong symbol),
    ///   `Shop_Item` (nested path)
    /// - controllers: `Main` (ok), `Blank` (defined as `false`)
    /// - views: `Home_Index` (unit + template), `Inline` (template inside the
    ///   unit), `Empty` (defined as `""`)
    pub fn sample_app() -> MemLoader {
        MemLoader::new()
            .with_unit(
                "classes/model/widget.json",
                json!({ "Widget": { "table": "widgets" } }),
            )
            .with_unit(
                "classes/model/gadget.json",
                json!({ "Gizmo": { "table": "gizmos" } }),
            )
            .with_unit(
                "classes/model/shop/item.json",
                json!({ "Shop_Item": { "table": "shop_items" } }),
            )
            .with_unit(
                "classes/controller/main.json",
                json!({ "Main": { "actions": ["index", "show"] } }),
            )
            .with_unit("classes/controller/blank.json", json!({ "Blank": false }))
            .with_unit(
                "classes/view/home/index.json",
                json!({ "Home_Index": { "title": "Home" } }),
            )
            .with_template("templates/home/index.template", "<h1>{{ title }}</h1>")
            .with_unit(
                "classes/view/inline.json",
                json!({ "Inline": { "template": "Hi {{ name }}", "name": "there" } }),
            )
            .with_unit("classes/view/empty.json", json!({ "Empty": "" }))
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::sample_app;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_read_missing_unit() {
        let mem = MemLoader::new();
        assert!(mem.read_unit(Path::new("nope.json")).unwrap().is_none());
        assert_eq!(mem.reads(Path::new("nope.json")), 1);
    }

    #[test]
    fn test_read_unit_parses_json() {
        let mem = sample_app();
        let unit = mem
            .read_unit(Path::new("classes/model/widget.json"))
            .unwrap()
            .unwrap();
        assert_eq!(unit.get("Widget"), Some(&json!({ "table": "widgets" })));
    }

    #[test]
    fn test_read_non_object_unit_fails() {
        let mem = MemLoader::new().with_unit("list.json", json!([1, 2]));
        let err = mem.read_unit(Path::new("list.json")).unwrap_err();
        assert!(matches!(err, AutoloadError::Serialization(_)));
    }

    #[test]
    fn test_read_template() {
        let mem = sample_app();
        let template = mem
            .read_template(Path::new("templates/home/index.template"))
            .unwrap();
        assert_eq!(template.as_deref(), Some("<h1>{{ title }}</h1>"));
        assert!(mem
            .read_template(Path::new("templates/missing.template"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_insert_unit_after_use() {
        let mem = MemLoader::new();
        assert!(mem.read_unit(Path::new("late.json")).unwrap().is_none());

        mem.insert_unit("late.json", json!({ "Late": 1 }));
        assert!(mem.read_unit(Path::new("late.json")).unwrap().is_some());
        assert_eq!(mem.total_reads(), 2);
    }
}
