//! End-to-end bootstrap scenarios: discovery, wiring, route binding.

use std::sync::Arc;

use arbor_core::{
    bootstrap, Application, BootstrapConfig, ControllerDescriptor, CoreError, HttpMethod,
    Injectable, ModuleCatalog, ModuleDescriptor, ResolvedArgs, ResolvedController,
    RouteDefinition, RouteRegistrar, RouteTable, ServiceDescriptor, ServiceId,
};

struct ProviderX;

impl Injectable for ProviderX {
    fn construct(_: &mut ResolvedArgs) -> Result<Self, CoreError> {
        Ok(Self)
    }
}

struct ControllerY {
    provider: Arc<ProviderX>,
}

impl Injectable for ControllerY {
    fn dependencies() -> Vec<ServiceId> {
        vec![ServiceId::of::<ProviderX>()]
    }

    fn construct(args: &mut ResolvedArgs) -> Result<Self, CoreError> {
        Ok(Self {
            provider: args.take()?,
        })
    }
}

/// Registrar double that records every invocation.
#[derive(Default)]
struct RecordingRegistrar {
    calls: usize,
    controllers: Vec<String>,
}

impl RouteRegistrar for RecordingRegistrar {
    fn register_routes(&mut self, controllers: &[ResolvedController]) -> Result<(), CoreError> {
        self.calls += 1;
        self.controllers = controllers
            .iter()
            .map(|controller| controller.name.clone())
            .collect();
        Ok(())
    }
}

fn feature_catalog() -> ModuleCatalog {
    ModuleCatalog::new()
        .with_module(ModuleDescriptor::new("AppModule").with_import("FeatureModule"))
        .with_module(
            ModuleDescriptor::new("FeatureModule")
                .with_provider(ServiceDescriptor::provider::<ProviderX>())
                .with_controller(
                    ControllerDescriptor::new::<ControllerY>()
                        .with_base_path("feature")
                        .with_route(RouteDefinition::new(HttpMethod::GET, "/", "index")),
                ),
        )
}

#[test]
fn scenario_imported_module_wires_controller_to_shared_provider() {
    let catalog = feature_catalog();
    let mut registrar = RecordingRegistrar::default();

    let app = bootstrap(
        &mut registrar,
        &catalog,
        "AppModule",
        &BootstrapConfig::default(),
    )
    .unwrap();

    // exactly one registrar call, with the one controller
    assert_eq!(registrar.calls, 1);
    assert_eq!(registrar.controllers, vec!["ControllerY"]);

    // the controller holds the same ProviderX singleton the container does
    let provider = app.provider::<ProviderX>().unwrap();
    let controller = app.controller::<ControllerY>().unwrap();
    assert!(Arc::ptr_eq(&controller.provider, &provider));

    let summary = app.summary();
    assert_eq!(summary.modules, vec!["AppModule", "FeatureModule"]);
    assert_eq!(summary.providers, vec!["ProviderX"]);
    assert_eq!(summary.controllers, vec!["ControllerY"]);
}

#[test]
fn scenario_import_without_descriptor_contributes_nothing() {
    let catalog = ModuleCatalog::new().with_module(
        ModuleDescriptor::new("AppModule")
            .with_provider(ServiceDescriptor::provider::<ProviderX>())
            .with_import("JustAClass"),
    );
    let mut registrar = RecordingRegistrar::default();

    let app = bootstrap(
        &mut registrar,
        &catalog,
        "AppModule",
        &BootstrapConfig::default(),
    )
    .unwrap();

    let summary = app.summary();
    assert_eq!(summary.modules, vec!["AppModule"]);
    assert_eq!(summary.providers, vec!["ProviderX"]);
    assert!(summary.controllers.is_empty());
    assert_eq!(summary.skipped_imports, vec!["JustAClass"]);
    assert_eq!(registrar.calls, 1);
}

struct ProviderA {
    #[allow(dead_code)]
    other: Arc<ProviderB>,
}

struct ProviderB {
    #[allow(dead_code)]
    other: Arc<ProviderA>,
}

impl Injectable for ProviderA {
    fn dependencies() -> Vec<ServiceId> {
        vec![ServiceId::of::<ProviderB>()]
    }

    fn construct(args: &mut ResolvedArgs) -> Result<Self, CoreError> {
        Ok(Self { other: args.take()? })
    }
}

impl Injectable for ProviderB {
    fn dependencies() -> Vec<ServiceId> {
        vec![ServiceId::of::<ProviderA>()]
    }

    fn construct(args: &mut ResolvedArgs) -> Result<Self, CoreError> {
        Ok(Self { other: args.take()? })
    }
}

#[test]
fn scenario_mutual_providers_abort_with_a_named_cycle() {
    let catalog = ModuleCatalog::new().with_module(
        ModuleDescriptor::new("AppModule")
            .with_provider(ServiceDescriptor::provider::<ProviderA>())
            .with_provider(ServiceDescriptor::provider::<ProviderB>()),
    );
    let mut registrar = RecordingRegistrar::default();

    let error = bootstrap(
        &mut registrar,
        &catalog,
        "AppModule",
        &BootstrapConfig::default(),
    )
    .unwrap_err();

    assert!(error.is_circular());
    let message = error.to_string();
    assert!(message.contains("ProviderA"));
    assert!(message.contains("ProviderB"));

    // bootstrap aborted before route binding
    assert_eq!(registrar.calls, 0);
}

struct UsersRepository;

impl Injectable for UsersRepository {
    fn construct(_: &mut ResolvedArgs) -> Result<Self, CoreError> {
        Ok(Self)
    }
}

struct InvoiceService {
    #[allow(dead_code)]
    users: Arc<UsersRepository>,
}

impl Injectable for InvoiceService {
    fn dependencies() -> Vec<ServiceId> {
        vec![ServiceId::of::<UsersRepository>()]
    }

    fn construct(args: &mut ResolvedArgs) -> Result<Self, CoreError> {
        Ok(Self { users: args.take()? })
    }
}

#[test]
fn provider_depending_across_modules_requires_the_import() {
    // BillingModule never imports UsersModule
    let catalog = ModuleCatalog::new()
        .with_module(
            ModuleDescriptor::new("AppModule")
                .with_import("UsersModule")
                .with_import("BillingModule"),
        )
        .with_module(
            ModuleDescriptor::new("UsersModule")
                .with_provider(ServiceDescriptor::provider::<UsersRepository>()),
        )
        .with_module(
            ModuleDescriptor::new("BillingModule")
                .with_provider(ServiceDescriptor::provider::<InvoiceService>()),
        );
    let mut registrar = RecordingRegistrar::default();

    let error = bootstrap(
        &mut registrar,
        &catalog,
        "AppModule",
        &BootstrapConfig::default(),
    )
    .unwrap_err();

    assert!(error.is_visibility());
    let message = error.to_string();
    assert!(message.contains("UsersRepository"));
    assert!(message.contains("BillingModule"));
}

#[test]
fn provider_dependency_resolves_once_the_import_is_declared() {
    let catalog = ModuleCatalog::new()
        .with_module(
            ModuleDescriptor::new("AppModule")
                .with_import("UsersModule")
                .with_import("BillingModule"),
        )
        .with_module(
            ModuleDescriptor::new("UsersModule")
                .with_provider(ServiceDescriptor::provider::<UsersRepository>()),
        )
        .with_module(
            ModuleDescriptor::new("BillingModule")
                .with_import("UsersModule")
                .with_provider(ServiceDescriptor::provider::<InvoiceService>()),
        );
    let mut registrar = RecordingRegistrar::default();

    let app = bootstrap(
        &mut registrar,
        &catalog,
        "AppModule",
        &BootstrapConfig::default(),
    )
    .unwrap();

    assert!(Arc::ptr_eq(
        &app.provider::<InvoiceService>().unwrap().users,
        &app.provider::<UsersRepository>().unwrap()
    ));
}

#[test]
fn route_table_binds_declared_routes_under_the_base_path() {
    let catalog = feature_catalog();
    let mut table = RouteTable::new();

    bootstrap(
        &mut table,
        &catalog,
        "AppModule",
        &BootstrapConfig::default(),
    )
    .unwrap();

    assert_eq!(table.len(), 1);
    let entry = table.lookup(HttpMethod::GET, "/feature/").unwrap();
    assert_eq!(entry.controller, "ControllerY");
    assert_eq!(entry.handler, "index");
}

#[test]
fn graph_rendering_lists_modules_and_dependencies() {
    let catalog = feature_catalog();
    let mut registrar = RecordingRegistrar::default();

    let app = bootstrap(
        &mut registrar,
        &catalog,
        "AppModule",
        &BootstrapConfig::default(),
    )
    .unwrap();

    let graph = app.render_graph();
    assert!(graph.contains("Module: FeatureModule"));
    assert!(graph.contains("Provider: ProviderX"));
    assert!(graph.contains("Controller: ControllerY"));
    assert!(graph.contains("Depends on: ProviderX"));

    assert_eq!(
        app.ownership(&ServiceId::of::<ProviderX>()),
        Some("FeatureModule")
    );
}

#[tokio::test]
async fn application_start_is_awaitable() {
    let catalog = feature_catalog();
    let mut registrar = RecordingRegistrar::default();

    let app = Application::start(&mut registrar, &catalog, "AppModule")
        .await
        .unwrap();

    assert_eq!(registrar.calls, 1);
    assert!(app.provider::<ProviderX>().is_some());
}

#[test]
fn isolated_bootstraps_do_not_share_singletons() {
    let catalog = feature_catalog();

    let mut first_registrar = RecordingRegistrar::default();
    let first = bootstrap(
        &mut first_registrar,
        &catalog,
        "AppModule",
        &BootstrapConfig::default(),
    )
    .unwrap();

    let mut second_registrar = RecordingRegistrar::default();
    let second = bootstrap(
        &mut second_registrar,
        &catalog,
        "AppModule",
        &BootstrapConfig::default(),
    )
    .unwrap();

    let first_provider = first.provider::<ProviderX>().unwrap();
    let second_provider = second.provider::<ProviderX>().unwrap();
    assert!(!Arc::ptr_eq(&first_provider, &second_provider));
}
