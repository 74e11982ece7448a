//! # Registry Set
//!
//! [`Registries`] bundles the model, controller and view registries with the
//! configuration they were built from. It is the only object collaborators
//! talk to:
//!
//! - dispatch resolves a controller by the name taken from the request path
//! - controllers resolve the models they need
//! - output code resolves a view and hands it to a renderer
//!
//! Build it once at startup and share it (it is `Send + Sync`; wrap it in an
//! `Arc` or keep it in a long-lived context). Caches live exactly as long as
//! the set does.
//!
//! ## Generic Over UnitLoader
//!
//! - Production: [`Registries::open`] reads units from a project root
//! - Testing: [`Registries::new`] with a [`MemLoader`](crate::loader::memory::MemLoader)

use crate::component::Component;
use crate::config::RegistryConfig;
use crate::error::{AutoloadError, ResolveError, Result};
use crate::loader::fs::FsLoader;
use crate::loader::{ResourceLoader, UnitLoader};
use crate::naming::NamingConvention;
use crate::namespace::Namespace;
use crate::registry::NamespaceRegistry;
use crate::render::{self, TemplateRenderer};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

pub struct Registries {
    config: RegistryConfig,
    model: NamespaceRegistry,
    controller: NamespaceRegistry,
    view: NamespaceRegistry,
}

impl Registries {
    pub fn new<L: UnitLoader + 'static>(config: RegistryConfig, loader: L) -> Self {
        Self::with_loader(config, Arc::new(loader))
    }

    /// Build the set around a loader shared with the caller.
    pub fn with_loader(config: RegistryConfig, loader: Arc<dyn UnitLoader>) -> Self {
        let naming = NamingConvention::new(config.clone());
        let loader = ResourceLoader::new(loader);
        let build = |namespace| NamespaceRegistry::new(namespace, naming.clone(), loader.clone());

        Self {
            model: build(Namespace::Model),
            controller: build(Namespace::Controller),
            view: build(Namespace::View),
            config,
        }
    }

    /// Open a project root: read `autoloader.json` (or defaults) and load
    /// units from disk under `root`.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        let config = RegistryConfig::load(root)?;
        info!(root = %root.display(), "opened registries");
        Ok(Self::new(config, FsLoader::new(root)))
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn registry(&self, namespace: Namespace) -> &NamespaceRegistry {
        match namespace {
            Namespace::Model => &self.model,
            Namespace::Controller => &self.controller,
            Namespace::View => &self.view,
        }
    }

    pub fn model(&self) -> &NamespaceRegistry {
        &self.model
    }

    pub fn controller(&self) -> &NamespaceRegistry {
        &self.controller
    }

    pub fn view(&self) -> &NamespaceRegistry {
        &self.view
    }

    pub fn resolve(
        &self,
        namespace: Namespace,
        identifier: &str,
    ) -> std::result::Result<Arc<Component>, ResolveError> {
        self.registry(namespace).resolve(identifier)
    }

    /// Resolve a view and render its template.
    ///
    /// The view's own fields form the base context; `context` overrides them.
    pub fn render_view<R: TemplateRenderer>(
        &self,
        renderer: &R,
        identifier: &str,
        context: &Value,
    ) -> Result<String> {
        let view = self.view.resolve(identifier)?;
        let template = view.template().ok_or_else(|| {
            AutoloadError::Render(format!("view {:?} has no template", identifier))
        })?;
        let context = render::view_context(view.value(), context);
        renderer.render(identifier, template, &context)
    }
}

pub use crate::error::{ErrorPolicy, FailureKind};
pub use crate::naming::UnitPaths;
