//! # Naming Convention
//!
//! Maps an identifier to the location of the unit that defines it:
//!
//! ```text
//! Model      Foo_Bar  ->  classes/model/foo/bar.json
//! Controller Main     ->  classes/controller/main.json
//! View       Home_Index -> classes/view/home/index.json
//!                          templates/home/index.template
//! ```
//!
//! The identifier is lower-cased and every underscore starts a new path
//! segment. Everything here is pure: the same identifier and configuration
//! always give the same paths and nothing touches the filesystem.

use crate::config::RegistryConfig;
use crate::namespace::Namespace;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Paths derived from one identifier in one namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitPaths {
    /// Lower-cased, segmented form shared by the unit and the template
    pub relative: PathBuf,
    /// Unit location: search root + relative + extension
    pub unit: PathBuf,
    /// Template artifact location (views only)
    pub template: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct NamingConvention {
    config: RegistryConfig,
}

impl NamingConvention {
    pub fn new(config: RegistryConfig) -> Self {
        Self { config }
    }

    pub fn transform(&self, identifier: &str, namespace: Namespace) -> UnitPaths {
        let ns = self.config.namespace(namespace);
        let relative = relative_path(identifier);
        let unit = with_suffix(&ns.search_root.join(&relative), &ns.extension);
        let template = namespace.has_template().then(|| {
            with_suffix(
                &self.config.template_root.join(&relative),
                &self.config.template_ext,
            )
        });

        UnitPaths {
            relative,
            unit,
            template,
        }
    }
}

/// `Foo_Bar` -> `foo/bar`. Empty segments from doubled or edge underscores
/// are dropped.
pub fn relative_path(identifier: &str) -> PathBuf {
    identifier
        .to_lowercase()
        .split('_')
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Whether an identifier can name a unit at all.
///
/// Letters, digits and underscores in any script are accepted, with at least
/// one letter or digit. Separators and dots are not, so a requested name can
/// never step outside its search root.
pub fn is_resolvable(identifier: &str) -> bool {
    identifier.chars().any(char::is_alphanumeric)
        && identifier
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_')
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut raw: OsString = path.as_os_str().to_owned();
    raw.push(suffix);
    PathBuf::from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naming() -> NamingConvention {
        NamingConvention::new(RegistryConfig::default())
    }

    #[test]
    fn test_underscores_become_segments() {
        let paths = naming().transform("Foo_Bar", Namespace::Model);
        assert_eq!(paths.relative, PathBuf::from("foo/bar"));
        assert_eq!(paths.unit, PathBuf::from("classes/model/foo/bar.json"));
        assert!(paths.unit.starts_with("classes/model"));
        assert_eq!(paths.template, None);
    }

    #[test]
    fn test_single_segment_is_lowercased() {
        let paths = naming().transform("FooBar", Namespace::Controller);
        assert_eq!(paths.unit, PathBuf::from("classes/controller/foobar.json"));
    }

    #[test]
    fn test_view_exposes_template_path() {
        let paths = naming().transform("Home_Index", Namespace::View);
        assert_eq!(paths.unit, PathBuf::from("classes/view/home/index.json"));
        assert_eq!(
            paths.template,
            Some(PathBuf::from("templates/home/index.template"))
        );
    }

    #[test]
    fn test_transform_is_deterministic() {
        let naming = naming();
        let first = naming.transform("Admin_User_Profile", Namespace::View);
        let second = naming.transform("Admin_User_Profile", Namespace::View);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_segments_are_dropped() {
        assert_eq!(relative_path("Foo__Bar_"), PathBuf::from("foo/bar"));
        assert_eq!(relative_path("_Foo"), PathBuf::from("foo"));
    }

    #[test]
    fn test_configured_roots_and_extensions() {
        let config = RegistryConfig::default()
            .with_search_root(Namespace::Model, "app/models")
            .with_extension(Namespace::Model, "unit")
            .unwrap()
            .with_template_root("app/templates");
        let naming = NamingConvention::new(config);

        let model = naming.transform("Foo_Bar", Namespace::Model);
        assert_eq!(model.unit, PathBuf::from("app/models/foo/bar.unit"));

        let view = naming.transform("Foo", Namespace::View);
        assert_eq!(view.template, Some(PathBuf::from("app/templates/foo.template")));
    }

    #[test]
    fn test_is_resolvable() {
        assert!(is_resolvable("Foo_Bar"));
        assert!(is_resolvable("Page2"));
        assert!(!is_resolvable(""));
        assert!(!is_resolvable("___"));
        assert!(!is_resolvable("../Secret"));
        assert!(!is_resolvable("foo/bar"));
        assert!(!is_resolvable("foo.bar"));
        assert!(!is_resolvable("foo\\bar"));
    }

    #[test]
    fn test_non_ascii_identifier() {
        assert!(is_resolvable("Café_Menu"));
        assert_eq!(
            naming().transform("Café_Menu", Namespace::Model).unit,
            PathBuf::from("classes/model/café/menu.json")
        );
    }
}
