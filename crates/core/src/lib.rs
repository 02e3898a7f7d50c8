//! Module graph discovery and dependency injection for the arbor framework.
//!
//! An application is a tree of modules, each declaring the providers and
//! controllers it owns and the modules it imports. Bootstrap walks that tree
//! once, enforces module-scoped visibility (own providers plus single-hop
//! imports), wires every singleton in dependency order, and hands the
//! controllers to the route registrar before any traffic is accepted.

pub mod bootstrap;
pub mod config;
pub mod container;
pub mod errors;
pub mod modules;
pub mod routing;

// Re-export key types for convenience
pub use bootstrap::{bootstrap, Application, BootstrapSummary};
pub use config::BootstrapConfig;
pub use container::{
    ControllerDescriptor, Injectable, Instance, InstanceContainer, ResolutionPath, ResolvedArgs,
    ServiceDescriptor, ServiceId, VisibilityRegistry,
};
pub use errors::{CoreError, HttpError};
pub use modules::{Discovery, ModuleCatalog, ModuleDescriptor, ModuleGraphWalker, ModuleSource};
pub use routing::{
    HttpMethod, ResolvedController, RouteDefinition, RouteEntry, RouteRegistrar, RouteTable,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Framework information
pub const FRAMEWORK_NAME: &str = "arbor";

/// Get framework version
pub fn version() -> &'static str {
    VERSION
}

/// Get framework name
pub fn name() -> &'static str {
    FRAMEWORK_NAME
}
