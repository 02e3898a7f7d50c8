use std::any::Any;
use std::sync::Arc;

use tracing::info;

use crate::config::BootstrapConfig;
use crate::container::descriptor::ServiceId;
use crate::container::graph::render_dependency_graph;
use crate::container::instancer::InstanceContainer;
use crate::errors::CoreError;
use crate::modules::descriptor::ModuleSource;
use crate::modules::walker::{Discovery, ModuleGraphWalker};
use crate::routing::{ResolvedController, RouteRegistrar};

/// Names discovered during bootstrap, in discovery order.
#[derive(Debug, Clone, Default)]
pub struct BootstrapSummary {
    pub modules: Vec<String>,
    pub providers: Vec<String>,
    pub controllers: Vec<String>,
    pub skipped_imports: Vec<String>,
}

/// One-shot orchestration: discover the module tree, wire every singleton,
/// then hand the controllers to the route registrar.
///
/// Runs once per application; any error aborts the whole bootstrap and the
/// host must not accept traffic.
pub fn bootstrap<S, R>(
    registrar: &mut R,
    source: &S,
    root_module: &str,
    config: &BootstrapConfig,
) -> Result<Application, CoreError>
where
    S: ModuleSource,
    R: RouteRegistrar,
{
    let Discovery {
        modules,
        providers,
        controllers,
        visibility,
        skipped_imports,
    } = ModuleGraphWalker::with_config(source, config).discover(root_module)?;

    let summary = BootstrapSummary {
        modules,
        providers: providers
            .iter()
            .map(|provider| provider.service_name.clone())
            .collect(),
        controllers: controllers
            .iter()
            .map(|controller| controller.controller_name.clone())
            .collect(),
        skipped_imports,
    };

    let provider_ids: Vec<ServiceId> = providers
        .iter()
        .map(|provider| provider.service_id)
        .collect();
    let controller_ids: Vec<ServiceId> = controllers
        .iter()
        .map(|controller| controller.controller_id)
        .collect();

    let mut container = InstanceContainer::new(visibility, config);
    for provider in providers {
        container.register_provider(provider);
    }
    for controller in controllers {
        container.register_controller(controller);
    }

    // every provider is wired eagerly from its own module, so nothing is
    // left half-constructed once traffic starts
    for id in &provider_ids {
        container.resolve_from_owner(id)?;
    }

    let mut resolved_controllers = Vec::with_capacity(controller_ids.len());
    for id in &controller_ids {
        let instance = container.resolve_controller(id)?;
        let descriptor = match container.controller_descriptor(id) {
            Some(descriptor) => descriptor,
            None => {
                return Err(CoreError::validation(format!(
                    "controller '{}' vanished between discovery and binding",
                    id.short_name()
                )))
            }
        };
        resolved_controllers.push(ResolvedController {
            name: descriptor.controller_name.clone(),
            id: *id,
            base_path: descriptor.base_path.clone(),
            routes: descriptor.routes.clone(),
            instance,
        });
    }

    registrar.register_routes(&resolved_controllers)?;

    info!(
        modules = summary.modules.len(),
        providers = summary.providers.len(),
        controllers = summary.controllers.len(),
        "bootstrap complete"
    );

    Ok(Application {
        summary,
        provider_ids,
        controller_ids,
        container,
    })
}

/// Process-lifetime facade over the bootstrapped container.
///
/// Read-only after construction: the registries and caches are never mutated
/// again, instances are shared out as `Arc` clones.
#[derive(Debug)]
pub struct Application {
    summary: BootstrapSummary,
    provider_ids: Vec<ServiceId>,
    controller_ids: Vec<ServiceId>,
    container: InstanceContainer,
}

impl Application {
    /// Discover, wire and bind everything under the default config.
    ///
    /// Async only so hosts can await it in their startup sequence; there are
    /// no internal suspension points.
    pub async fn start<S, R>(
        registrar: &mut R,
        source: &S,
        root_module: &str,
    ) -> Result<Self, CoreError>
    where
        S: ModuleSource,
        R: RouteRegistrar,
    {
        bootstrap(registrar, source, root_module, &BootstrapConfig::default())
    }

    /// `start` with explicit config
    pub async fn start_with_config<S, R>(
        registrar: &mut R,
        source: &S,
        root_module: &str,
        config: &BootstrapConfig,
    ) -> Result<Self, CoreError>
    where
        S: ModuleSource,
        R: RouteRegistrar,
    {
        bootstrap(registrar, source, root_module, config)
    }

    /// Discovery summary for diagnostics
    pub fn summary(&self) -> &BootstrapSummary {
        &self.summary
    }

    /// Typed handle to a resolved provider
    pub fn provider<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.container.provider::<T>()
    }

    /// Typed handle to a resolved controller
    pub fn controller<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.container.controller::<T>()
    }

    /// Owning module of a class, for diagnostics
    pub fn ownership(&self, id: &ServiceId) -> Option<&str> {
        self.container.ownership(id)
    }

    /// Render the application graph: modules, providers, controllers and
    /// their dependencies
    pub fn render_graph(&self) -> String {
        render_dependency_graph(
            &self.summary.modules,
            &self.provider_ids,
            &self.controller_ids,
            &self.container,
        )
    }

    /// The underlying container
    pub fn container(&self) -> &InstanceContainer {
        &self.container
    }
}
