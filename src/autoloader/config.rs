use crate::error::{AutoloadError, Result};
use crate::namespace::Namespace;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "autoloader.json";
const DEFAULT_UNIT_EXT: &str = ".json";
const DEFAULT_TEMPLATE_EXT: &str = ".template";

/// Where one namespace keeps its units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamespaceConfig {
    /// Base directory for units, relative to the project root
    pub search_root: PathBuf,

    /// Suffix appended to a unit path (e.g. ".json")
    #[serde(default = "default_unit_ext")]
    pub extension: String,
}

impl NamespaceConfig {
    pub fn new(search_root: impl Into<PathBuf>) -> Self {
        Self {
            search_root: search_root.into(),
            extension: default_unit_ext(),
        }
    }
}

/// Registry configuration, stored in `<root>/autoloader.json`.
///
/// Every field is optional in the file; missing ones fall back to the
/// framework layout (`classes/<namespace>/`, `templates/`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegistryConfig {
    #[serde(default = "default_model")]
    pub model: NamespaceConfig,

    #[serde(default = "default_controller")]
    pub controller: NamespaceConfig,

    #[serde(default = "default_view")]
    pub view: NamespaceConfig,

    /// Base directory for view template artifacts
    #[serde(default = "default_template_root")]
    pub template_root: PathBuf,

    #[serde(default = "default_template_ext")]
    pub template_ext: String,
}

fn default_unit_ext() -> String {
    DEFAULT_UNIT_EXT.to_string()
}

fn default_template_ext() -> String {
    DEFAULT_TEMPLATE_EXT.to_string()
}

fn default_model() -> NamespaceConfig {
    NamespaceConfig::new("classes/model")
}

fn default_controller() -> NamespaceConfig {
    NamespaceConfig::new("classes/controller")
}

fn default_view() -> NamespaceConfig {
    NamespaceConfig::new("classes/view")
}

fn default_template_root() -> PathBuf {
    PathBuf::from("templates")
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            controller: default_controller(),
            view: default_view(),
            template_root: default_template_root(),
            template_ext: default_template_ext(),
        }
    }
}

impl RegistryConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(AutoloadError::Io)?;
        let mut config: RegistryConfig =
            serde_json::from_str(&content).map_err(AutoloadError::Serialization)?;
        config.normalize()?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(AutoloadError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(AutoloadError::Serialization)?;
        fs::write(config_path, content).map_err(AutoloadError::Io)?;
        Ok(())
    }

    pub fn namespace(&self, namespace: Namespace) -> &NamespaceConfig {
        match namespace {
            Namespace::Model => &self.model,
            Namespace::Controller => &self.controller,
            Namespace::View => &self.view,
        }
    }

    fn namespace_mut(&mut self, namespace: Namespace) -> &mut NamespaceConfig {
        match namespace {
            Namespace::Model => &mut self.model,
            Namespace::Controller => &mut self.controller,
            Namespace::View => &mut self.view,
        }
    }

    pub fn with_search_root(mut self, namespace: Namespace, root: impl Into<PathBuf>) -> Self {
        self.namespace_mut(namespace).search_root = root.into();
        self
    }

    /// Set a namespace's unit extension (normalizes to start with a dot)
    pub fn with_extension(mut self, namespace: Namespace, ext: &str) -> Result<Self> {
        self.namespace_mut(namespace).extension = checked_ext(namespace.as_str(), ext)?;
        Ok(self)
    }

    pub fn with_template_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.template_root = root.into();
        self
    }

    fn normalize(&mut self) -> Result<()> {
        for namespace in Namespace::ALL {
            let ns = self.namespace_mut(namespace);
            ns.extension = checked_ext(namespace.as_str(), &ns.extension)?;
        }
        self.template_ext = checked_ext("template", &self.template_ext)?;
        Ok(())
    }
}

fn checked_ext(label: &str, ext: &str) -> Result<String> {
    if ext.trim_matches('.').is_empty() {
        return Err(AutoloadError::Config(format!(
            "{} extension cannot be empty",
            label
        )));
    }
    Ok(normalize_ext(ext))
}

fn normalize_ext(ext: &str) -> String {
    if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{}", ext)
    }
}
