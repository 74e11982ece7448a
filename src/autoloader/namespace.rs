//! # Namespaces
//!
//! A [`Namespace`] is one of the three resolution domains: models, controllers
//! and views. Each namespace owns its own search root, unit extension and
//! [`ErrorPolicy`]; the set is closed.

use crate::error::ErrorPolicy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    Model,
    Controller,
    View,
}

impl Namespace {
    /// All namespaces in wiring order.
    pub const ALL: [Namespace; 3] = [Namespace::Model, Namespace::Controller, Namespace::View];

    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Model => "model",
            Namespace::Controller => "controller",
            Namespace::View => "view",
        }
    }

    /// How failures in this namespace are reported.
    ///
    /// The three policies are deliberately different: model errors name the
    /// unit file, controller errors are a bare "not found", view errors name
    /// the identifier.
    pub fn error_policy(&self) -> ErrorPolicy {
        match self {
            Namespace::Model => ErrorPolicy::NameFile,
            Namespace::Controller => ErrorPolicy::Generic,
            Namespace::View => ErrorPolicy::NameIdentifier,
        }
    }

    /// Only views pair their unit with a template artifact.
    pub fn has_template(&self) -> bool {
        matches!(self, Namespace::View)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Namespace {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "model" | "models" | "m" => Ok(Namespace::Model),
            "controller" | "controllers" | "c" => Ok(Namespace::Controller),
            "view" | "views" | "v" => Ok(Namespace::View),
            other => Err(format!(
                "unknown namespace '{}' (expected model, controller or view)",
                other
            )),
        }
    }
}
