use crate::namespace::Namespace;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// A loaded value bound to an identifier within a namespace.
///
/// Components are created once by their namespace registry and handed out as
/// shared `Arc<Component>` handles; nothing mutates them afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Component {
    namespace: Namespace,
    identifier: String,
    unit_path: PathBuf,
    value: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    template: Option<String>,
}

impl Component {
    pub(crate) fn new(
        namespace: Namespace,
        identifier: impl Into<String>,
        unit_path: impl Into<PathBuf>,
        value: Value,
    ) -> Self {
        Self {
            namespace,
            identifier: identifier.into(),
            unit_path: unit_path.into(),
            value,
            template: None,
        }
    }

    pub(crate) fn with_template(mut self, template: Option<String>) -> Self {
        self.template = template;
        self
    }

    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The unit this component was defined in.
    pub fn unit_path(&self) -> &Path {
        &self.unit_path
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Look up a field of an object-valued definition.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.value.get(key)
    }

    /// The view template, if this component has one.
    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }
}

/// A defined-but-empty binding: `null`, `false`, `""`, `[]` or `{}`.
pub fn is_vacuous(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        Value::Number(_) => false,
    }
}
