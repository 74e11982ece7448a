//! # Namespace Registry
//!
//! One generic engine, instantiated once per [`Namespace`]. Resolving an
//! identifier runs:
//!
//! ```text
//! cache hit? ──yes──▶ return cached component
//!     │ no
//!     ▼
//! transform ─▶ load unit ─▶ symbol defined? ─▶ value non-empty? ─▶ cache ─▶ return
//!                 │               │                  │
//!         ResourceNotFound  DefinitionMissing  VacuousDefinition
//! ```
//!
//! Each failure is shaped by the namespace's [`ErrorPolicy`](crate::error::ErrorPolicy).
//!
//! ## Concurrency
//!
//! - Cache reads go through a sharded [`DashMap`] and never wait on a load.
//! - Loading happens under one mutex per namespace, which also guards the
//!   symbol space and the set of loaded units.
//! - Callers racing on the same uncached identifier join a single in-flight
//!   cell and all receive its outcome, success or error.
//! - The in-flight cell is dropped once settled. A failure is never cached,
//!   so a later call starts over.

use crate::component::{self, Component};
use crate::error::{Failure, FailureKind, ResolveError};
use crate::loader::{ResourceLoader, SymbolSpace};
use crate::naming::{self, NamingConvention, UnitPaths};
use crate::namespace::Namespace;
use dashmap::DashMap;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, trace};

type Outcome = Result<Arc<Component>, ResolveError>;

pub struct NamespaceRegistry {
    namespace: Namespace,
    naming: NamingConvention,
    loader: ResourceLoader,
    cache: DashMap<String, Arc<Component>>,
    in_flight: DashMap<String, Arc<OnceCell<Outcome>>>,
    symbols: Mutex<SymbolSpace>,
}

impl NamespaceRegistry {
    pub fn new(namespace: Namespace, naming: NamingConvention, loader: ResourceLoader) -> Self {
        Self {
            namespace,
            naming,
            loader,
            cache: DashMap::new(),
            in_flight: DashMap::new(),
            symbols: Mutex::new(SymbolSpace::new()),
        }
    }

    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    /// Resolve `identifier` to its component, loading its unit on first use.
    pub fn resolve(&self, identifier: &str) -> Outcome {
        if let Some(hit) = self.cache.get(identifier) {
            trace!(namespace = %self.namespace, identifier, "cache hit");
            return Ok(Arc::clone(hit.value()));
        }

        let cell = Arc::clone(self.in_flight.entry(identifier.to_string()).or_default().value());
        let outcome = cell
            .get_or_init(|| self.load_and_verify(identifier))
            .clone();
        self.in_flight
            .remove_if(identifier, |_, current| Arc::ptr_eq(current, &cell));
        outcome
    }

    /// Paths the naming convention derives for `identifier` in this namespace.
    pub fn paths(&self, identifier: &str) -> UnitPaths {
        self.naming.transform(identifier, self.namespace)
    }

    pub fn is_cached(&self, identifier: &str) -> bool {
        self.cache.contains_key(identifier)
    }

    /// Identifiers resolved so far, sorted.
    pub fn cached(&self) -> Vec<String> {
        let mut names: Vec<String> = self.cache.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    fn load_and_verify(&self, identifier: &str) -> Outcome {
        let mut symbols = self.symbols.lock();

        // Another caller may have finished while we waited for the lock.
        if let Some(hit) = self.cache.get(identifier) {
            return Ok(Arc::clone(hit.value()));
        }

        let policy = self.namespace.error_policy();
        let paths = self.paths(identifier);
        let fail = |kind| policy.raise(Failure::new(kind, identifier, &paths.unit));

        if !naming::is_resolvable(identifier) {
            return Err(fail(FailureKind::ResourceNotFound));
        }

        debug!(
            namespace = %self.namespace,
            identifier,
            path = %paths.unit.display(),
            "resolving"
        );
        self.loader
            .load(&paths.unit, &mut symbols)
            .map_err(|failure| policy.raise(Failure::from_load(failure, identifier, &paths.unit)))?;

        let symbol = symbols
            .lookup(identifier)
            .ok_or_else(|| fail(FailureKind::DefinitionMissing))?;
        let value = &symbol.value;
        if component::is_vacuous(value) {
            return Err(fail(FailureKind::VacuousDefinition));
        }

        let template = match &paths.template {
            Some(path) => self
                .loader
                .template(path)
                .map_err(|failure| policy.raise(Failure::from_load(failure, identifier, path)))?
                .or_else(|| inline_template(value)),
            None => None,
        };

        let component = Arc::new(
            Component::new(self.namespace, identifier, &symbol.unit, value.clone())
                .with_template(template),
        );
        self.cache
            .insert(identifier.to_string(), Arc::clone(&component));
        debug!(namespace = %self.namespace, identifier, "cached");
        Ok(component)
    }
}

fn inline_template(value: &Value) -> Option<String> {
    value
        .get("template")
        .and_then(Value::as_str)
        .map(str::to_string)
}
