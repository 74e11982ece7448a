//! # Autoloader Architecture
//!
//! Autoloader is a **convention-based component registry**. Ask it for a
//! model, controller or view by name and it works out where that component
//! lives, loads it the first time it is needed, and serves the same instance
//! from then on.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Registry Set (api.rs)                                      │
//! │  - Model, Controller and View registries + configuration    │
//! │  - The only thing collaborators talk to                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Namespace Registry (registry.rs)                           │
//! │  - cache → transform → load → verify → cache                │
//! │  - One engine, three instances, three error policies        │
//! └─────────────────────────────────────────────────────────────┘
//!                   │                          │
//!                   ▼                          ▼
//! ┌──────────────────────────────┐ ┌────────────────────────────┐
//! │  Naming Convention (naming)  │ │  Resource Loader (loader/) │
//! │  - Foo_Bar → foo/bar         │ │  - UnitLoader trait        │
//! │  - pure, no I/O              │ │  - FsLoader, MemLoader     │
//! └──────────────────────────────┘ └────────────────────────────┘
//! ```
//!
//! ## Naming Convention
//!
//! `Model::Foo_Bar` lives in `classes/model/foo/bar.json`. Views additionally
//! pair with `templates/foo/bar.template`. Roots and extensions come from
//! [`config::RegistryConfig`].
//!
//! ## Load Once, Cache Forever
//!
//! A successful resolution is cached for the lifetime of the registry and
//! never re-loads. A failed one is not cached: the error goes straight back to
//! the caller and the next call tries again. Concurrent first references to
//! the same name share one load and one outcome.
//!
//! ## Errors
//!
//! Each namespace reports failures in its own shape (see [`error`]): model
//! errors name the unit file, controller errors are a bare "not found", view
//! errors name the identifier. [`error::FailureKind`] tells the steps apart
//! regardless of namespace.
//!
//! ## Module Overview
//!
//! - [`api`]: The Registry Set, entry point for collaborators
//! - [`registry`]: The generic namespace registry
//! - [`naming`]: Identifier → path transformation
//! - [`loader`]: Unit loading and backends
//! - [`component`]: Resolved component handles
//! - [`namespace`]: The three namespaces
//! - [`render`]: Template renderer boundary
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod component;
pub mod config;
pub mod error;
pub mod loader;
pub mod namespace;
pub mod naming;
pub mod registry;
pub mod render;
