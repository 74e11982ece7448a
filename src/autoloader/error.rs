use crate::namespace::Namespace;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Crate-level error for configuration, I/O and rendering.
#[derive(Error, Debug)]
pub enum AutoloadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Render error: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, AutoloadError>;

/// Why the loader could not bring a unit in.
///
/// This is a value handed back to the registry, which turns it into its
/// namespace's error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadFailure {
    #[error("no unit exists at this location")]
    Missing,

    #[error("{0}")]
    Unreadable(String),
}

/// Which step of a resolution failed, independent of namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Nothing exists at the conventional location.
    ResourceNotFound,
    /// A unit exists but could not be read or parsed.
    UnitUnreadable,
    /// The unit loaded but does not define the identifier.
    DefinitionMissing,
    /// The identifier is defined with an empty value.
    VacuousDefinition,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("cannot load model file {}", .path.display())]
    ResourceNotFound { identifier: String, path: PathBuf },

    #[error("model file {} could not be loaded: {reason}", .path.display())]
    UnitUnreadable {
        identifier: String,
        path: PathBuf,
        reason: String,
    },

    #[error("{identifier} not found! {} does not define it", .path.display())]
    DefinitionMissing { identifier: String, path: PathBuf },

    #[error("{identifier} not found! {} defines it as an empty value", .path.display())]
    VacuousDefinition { identifier: String, path: PathBuf },
}

/// Controller failures carry the identifier for callers but never print
/// where the unit was looked up.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ControllerError {
    #[error("not found")]
    ResourceNotFound { identifier: String },

    #[error("not found")]
    UnitUnreadable { identifier: String },

    #[error("not found")]
    DefinitionMissing { identifier: String },

    #[error("not found")]
    VacuousDefinition { identifier: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    #[error("{identifier:?} not found! no view unit at the conventional location")]
    ResourceNotFound { identifier: String },

    #[error("{identifier:?} could not be loaded: {reason}")]
    UnitUnreadable { identifier: String, reason: String },

    #[error("{identifier:?} not found!")]
    DefinitionMissing { identifier: String },

    #[error("{identifier:?} not found! it is defined as an empty value")]
    VacuousDefinition { identifier: String },
}

/// A failed resolution, labeled by the namespace that raised it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Controller(#[from] ControllerError),

    #[error(transparent)]
    View(#[from] ViewError),
}

impl ResolveError {
    pub fn namespace(&self) -> Namespace {
        match self {
            ResolveError::Model(_) => Namespace::Model,
            ResolveError::Controller(_) => Namespace::Controller,
            ResolveError::View(_) => Namespace::View,
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            ResolveError::Model(e) => match e {
                ModelError::ResourceNotFound { .. } => FailureKind::ResourceNotFound,
                ModelError::UnitUnreadable { .. } => FailureKind::UnitUnreadable,
                ModelError::DefinitionMissing { .. } => FailureKind::DefinitionMissing,
                ModelError::VacuousDefinition { .. } => FailureKind::VacuousDefinition,
            },
            ResolveError::Controller(e) => match e {
                ControllerError::ResourceNotFound { .. } => FailureKind::ResourceNotFound,
                ControllerError::UnitUnreadable { .. } => FailureKind::UnitUnreadable,
                ControllerError::DefinitionMissing { .. } => FailureKind::DefinitionMissing,
                ControllerError::VacuousDefinition { .. } => FailureKind::VacuousDefinition,
            },
            ResolveError::View(e) => match e {
                ViewError::ResourceNotFound { .. } => FailureKind::ResourceNotFound,
                ViewError::UnitUnreadable { .. } => FailureKind::UnitUnreadable,
                ViewError::DefinitionMissing { .. } => FailureKind::DefinitionMissing,
                ViewError::VacuousDefinition { .. } => FailureKind::VacuousDefinition,
            },
        }
    }

    pub fn identifier(&self) -> &str {
        match self {
            ResolveError::Model(
                ModelError::ResourceNotFound { identifier, .. }
                | ModelError::UnitUnreadable { identifier, .. }
                | ModelError::DefinitionMissing { identifier, .. }
                | ModelError::VacuousDefinition { identifier, .. },
            ) => identifier,
            ResolveError::Controller(
                ControllerError::ResourceNotFound { identifier }
                | ControllerError::UnitUnreadable { identifier }
                | ControllerError::DefinitionMissing { identifier }
                | ControllerError::VacuousDefinition { identifier },
            ) => identifier,
            ResolveError::View(
                ViewError::ResourceNotFound { identifier }
                | ViewError::UnitUnreadable { identifier, .. }
                | ViewError::DefinitionMissing { identifier }
                | ViewError::VacuousDefinition { identifier },
            ) => identifier,
        }
    }
}

/// Everything known about a failed step, before a policy shapes it.
#[derive(Debug, Clone)]
pub(crate) struct Failure<'a> {
    pub kind: FailureKind,
    pub identifier: &'a str,
    pub path: &'a Path,
    pub reason: Option<String>,
}

impl<'a> Failure<'a> {
    pub fn new(kind: FailureKind, identifier: &'a str, path: &'a Path) -> Self {
        Self {
            kind,
            identifier,
            path,
            reason: None,
        }
    }

    pub fn from_load(failure: LoadFailure, identifier: &'a str, path: &'a Path) -> Self {
        match failure {
            LoadFailure::Missing => Self::new(FailureKind::ResourceNotFound, identifier, path),
            LoadFailure::Unreadable(reason) => Self {
                reason: Some(reason),
                ..Self::new(FailureKind::UnitUnreadable, identifier, path)
            },
        }
    }
}

/// The per-namespace way of reporting a failed resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Messages name the unit file (models).
    NameFile,
    /// A bare "not found" signal (controllers).
    Generic,
    /// Messages name the requested identifier (views).
    NameIdentifier,
}

impl ErrorPolicy {
    pub(crate) fn raise(self, failure: Failure<'_>) -> ResolveError {
        let identifier = failure.identifier.to_string();
        let reason = failure.reason.unwrap_or_default();
        match self {
            ErrorPolicy::NameFile => {
                let path = failure.path.to_path_buf();
                let error = match failure.kind {
                    FailureKind::ResourceNotFound => {
                        ModelError::ResourceNotFound { identifier, path }
                    }
                    FailureKind::UnitUnreadable => ModelError::UnitUnreadable {
                        identifier,
                        path,
                        reason,
                    },
                    FailureKind::DefinitionMissing => {
                        ModelError::DefinitionMissing { identifier, path }
                    }
                    FailureKind::VacuousDefinition => {
                        ModelError::VacuousDefinition { identifier, path }
                    }
                };
                error.into()
            }
            ErrorPolicy::Generic => match failure.kind {
                FailureKind::ResourceNotFound => ControllerError::ResourceNotFound { identifier },
                FailureKind::UnitUnreadable => ControllerError::UnitUnreadable { identifier },
                FailureKind::DefinitionMissing => ControllerError::DefinitionMissing { identifier },
                FailureKind::VacuousDefinition => ControllerError::VacuousDefinition { identifier },
            }
            .into(),
            ErrorPolicy::NameIdentifier => match failure.kind {
                FailureKind::ResourceNotFound => ViewError::ResourceNotFound { identifier },
                FailureKind::UnitUnreadable => ViewError::UnitUnreadable { identifier, reason },
                FailureKind::DefinitionMissing => ViewError::DefinitionMissing { identifier },
                FailureKind::VacuousDefinition => ViewError::VacuousDefinition { identifier },
            }
            .into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raise(ns: Namespace, kind: FailureKind) -> ResolveError {
        let path = Path::new("classes/model/foo/bar.json");
        ns.error_policy().raise(Failure::new(kind, "Foo_Bar", path))
    }

    #[test]
    fn test_model_messages_name_the_file() {
        let err = raise(Namespace::Model, FailureKind::ResourceNotFound);
        assert_eq!(
            err.to_string(),
            "cannot load model file classes/model/foo/bar.json"
        );

        let err = raise(Namespace::Model, FailureKind::DefinitionMissing);
        assert!(err.to_string().starts_with("Foo_Bar not found!"));
        assert!(err.to_string().contains("classes/model/foo/bar.json"));
    }

    #[test]
    fn test_controller_messages_are_generic() {
        for kind in [
            FailureKind::ResourceNotFound,
            FailureKind::UnitUnreadable,
            FailureKind::DefinitionMissing,
            FailureKind::VacuousDefinition,
        ] {
            let err = raise(Namespace::Controller, kind);
            assert_eq!(err.to_string(), "not found");
            assert_eq!(err.kind(), kind);
            assert_eq!(err.identifier(), "Foo_Bar");
        }
    }

    #[test]
    fn test_view_messages_name_the_identifier() {
        let err = raise(Namespace::View, FailureKind::DefinitionMissing);
        assert_eq!(err.to_string(), "\"Foo_Bar\" not found!");

        let err = raise(Namespace::View, FailureKind::ResourceNotFound);
        assert!(err.to_string().starts_with("\"Foo_Bar\" not found!"));
        assert!(!err.to_string().contains(".json"));
    }

    #[test]
    fn test_load_failure_maps_to_kind() {
        let path = Path::new("x.json");
        let missing = Failure::from_load(LoadFailure::Missing, "X", path);
        assert_eq!(missing.kind, FailureKind::ResourceNotFound);

        let broken = Failure::from_load(LoadFailure::Unreadable("bad json".into()), "X", path);
        assert_eq!(broken.kind, FailureKind::UnitUnreadable);

        let err = ErrorPolicy::NameIdentifier.raise(broken);
        assert_eq!(err.to_string(), "\"X\" could not be loaded: bad json");
        assert_eq!(err.namespace(), Namespace::View);
    }
}
