use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use arbor_core::{
    bootstrap, BootstrapConfig, ControllerDescriptor, CoreError, HttpMethod, Injectable,
    ModuleCatalog, ModuleDescriptor, ModuleGraphWalker, ResolvedArgs, RouteDefinition,
    RouteTable, ServiceDescriptor, ServiceId,
};

struct ConfigService;

impl Injectable for ConfigService {
    fn construct(_: &mut ResolvedArgs) -> Result<Self, CoreError> {
        Ok(Self)
    }
}

struct Repository {
    #[allow(dead_code)]
    config: Arc<ConfigService>,
}

impl Injectable for Repository {
    fn dependencies() -> Vec<ServiceId> {
        vec![ServiceId::of::<ConfigService>()]
    }

    fn construct(args: &mut ResolvedArgs) -> Result<Self, CoreError> {
        Ok(Self {
            config: args.take()?,
        })
    }
}

struct DomainService {
    #[allow(dead_code)]
    repository: Arc<Repository>,
}

impl Injectable for DomainService {
    fn dependencies() -> Vec<ServiceId> {
        vec![ServiceId::of::<Repository>()]
    }

    fn construct(args: &mut ResolvedArgs) -> Result<Self, CoreError> {
        Ok(Self {
            repository: args.take()?,
        })
    }
}

struct ApiController {
    #[allow(dead_code)]
    service: Arc<DomainService>,
}

impl Injectable for ApiController {
    fn dependencies() -> Vec<ServiceId> {
        vec![ServiceId::of::<DomainService>()]
    }

    fn construct(args: &mut ResolvedArgs) -> Result<Self, CoreError> {
        Ok(Self {
            service: args.take()?,
        })
    }
}

fn catalog() -> ModuleCatalog {
    ModuleCatalog::new()
        .with_module(
            ModuleDescriptor::new("AppModule")
                .with_import("SharedModule")
                .with_import("ApiModule"),
        )
        .with_module(
            ModuleDescriptor::new("SharedModule")
                .with_provider(ServiceDescriptor::provider::<ConfigService>())
                .with_provider(ServiceDescriptor::provider::<Repository>()),
        )
        .with_module(
            ModuleDescriptor::new("ApiModule")
                .with_import("SharedModule")
                .with_provider(ServiceDescriptor::provider::<DomainService>())
                .with_controller(
                    ControllerDescriptor::new::<ApiController>()
                        .with_base_path("api")
                        .with_route(RouteDefinition::new(HttpMethod::GET, "/", "index")),
                ),
        )
}

fn discovery_benchmark(c: &mut Criterion) {
    let catalog = catalog();

    c.bench_function("module_graph_discovery", |b| {
        b.iter(|| {
            let walker = ModuleGraphWalker::new(&catalog);
            black_box(walker.discover("AppModule").unwrap())
        })
    });
}

fn bootstrap_benchmark(c: &mut Criterion) {
    let catalog = catalog();
    let config = BootstrapConfig::default();

    c.bench_function("full_bootstrap", |b| {
        b.iter(|| {
            let mut table = RouteTable::new();
            black_box(bootstrap(&mut table, &catalog, "AppModule", &config).unwrap())
        })
    });
}

criterion_group!(benches, discovery_benchmark, bootstrap_benchmark);
criterion_main!(benches);
