use std::any::{Any, TypeId};
use std::sync::Arc;

use crate::container::injectable::{Injectable, ResolvedArgs};
use crate::errors::CoreError;
use crate::routing::RouteDefinition;

/// Shared handle to a resolved provider or controller instance.
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Erased constructor; invoked with the resolved dependencies in declared order.
pub type ServiceFactory = Arc<dyn Fn(&mut ResolvedArgs) -> Result<Instance, CoreError> + Send + Sync>;

/// Service identifier derived from the concrete Rust type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServiceId {
    type_id: TypeId,
    type_name: &'static str,
}

impl ServiceId {
    /// Create the service ID for a type
    pub fn of<T: 'static + ?Sized>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Get the full type name
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Last path segment of the type name, used in logs and error messages
    pub fn short_name(&self) -> &'static str {
        self.type_name
            .rsplit("::")
            .next()
            .unwrap_or(self.type_name)
    }
}

impl std::fmt::Display for ServiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Provider declaration: identity, ordered dependencies, factory and the
/// injectable capability marker.
#[derive(Clone)]
pub struct ServiceDescriptor {
    pub service_name: String,
    pub service_id: ServiceId,
    pub dependencies: Vec<ServiceId>,
    /// Set when the class was declared as a provider. A class listed in a
    /// module's provider set without the marker fails resolution with
    /// `CoreError::NotAProvider`.
    pub injectable: bool,
    factory: ServiceFactory,
}

impl ServiceDescriptor {
    /// Declare `T` as an injectable provider.
    pub fn provider<T: Injectable>() -> Self {
        Self::erased::<T>(true)
    }

    /// Declare `T` as a plain constructible class, without the provider marker.
    pub fn class<T: Injectable>() -> Self {
        Self::erased::<T>(false)
    }

    fn erased<T: Injectable>(injectable: bool) -> Self {
        let service_id = ServiceId::of::<T>();
        Self {
            service_name: service_id.short_name().to_string(),
            service_id,
            dependencies: T::dependencies(),
            injectable,
            factory: Arc::new(|args: &mut ResolvedArgs| {
                let instance = T::construct(args)?;
                Ok(Arc::new(instance) as Instance)
            }),
        }
    }

    /// Run the factory against resolved arguments
    pub fn construct(&self, args: &mut ResolvedArgs) -> Result<Instance, CoreError> {
        (self.factory)(args)
    }
}

impl std::fmt::Debug for ServiceDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceDescriptor")
            .field("service_name", &self.service_name)
            .field("dependencies", &self.dependencies)
            .field("injectable", &self.injectable)
            .field("factory", &"<factory>")
            .finish()
    }
}

/// Controller declaration: constructed like a provider, but never injectable,
/// and carrying the metadata route binding needs.
#[derive(Clone)]
pub struct ControllerDescriptor {
    pub controller_name: String,
    pub controller_id: ServiceId,
    pub dependencies: Vec<ServiceId>,
    pub base_path: Option<String>,
    pub routes: Vec<RouteDefinition>,
    factory: ServiceFactory,
}

impl ControllerDescriptor {
    /// Declare `T` as a controller.
    pub fn new<T: Injectable>() -> Self {
        let controller_id = ServiceId::of::<T>();
        Self {
            controller_name: controller_id.short_name().to_string(),
            controller_id,
            dependencies: T::dependencies(),
            base_path: None,
            routes: Vec::new(),
            factory: Arc::new(|args: &mut ResolvedArgs| {
                let instance = T::construct(args)?;
                Ok(Arc::new(instance) as Instance)
            }),
        }
    }

    /// Set the base path all routes hang off
    pub fn with_base_path(mut self, path: impl Into<String>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// Add a route
    pub fn with_route(mut self, route: RouteDefinition) -> Self {
        self.routes.push(route);
        self
    }

    /// Add multiple routes
    pub fn with_routes(mut self, routes: Vec<RouteDefinition>) -> Self {
        self.routes.extend(routes);
        self
    }

    /// Run the factory against resolved arguments
    pub fn construct(&self, args: &mut ResolvedArgs) -> Result<Instance, CoreError> {
        (self.factory)(args)
    }
}

impl std::fmt::Debug for ControllerDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControllerDescriptor")
            .field("controller_name", &self.controller_name)
            .field("dependencies", &self.dependencies)
            .field("base_path", &self.base_path)
            .field("routes", &self.routes)
            .field("factory", &"<factory>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::HttpMethod;

    struct Standalone;

    impl Injectable for Standalone {
        fn construct(_: &mut ResolvedArgs) -> Result<Self, CoreError> {
            Ok(Self)
        }
    }

    struct Consumer {
        #[allow(dead_code)]
        dep: Arc<Standalone>,
    }

    impl Injectable for Consumer {
        fn dependencies() -> Vec<ServiceId> {
            vec![ServiceId::of::<Standalone>()]
        }

        fn construct(args: &mut ResolvedArgs) -> Result<Self, CoreError> {
            Ok(Self { dep: args.take()? })
        }
    }

    #[test]
    fn provider_descriptor_carries_the_marker() {
        let descriptor = ServiceDescriptor::provider::<Consumer>();

        assert!(descriptor.injectable);
        assert_eq!(descriptor.service_name, "Consumer");
        assert_eq!(descriptor.dependencies, vec![ServiceId::of::<Standalone>()]);
    }

    #[test]
    fn plain_class_descriptor_lacks_the_marker() {
        let descriptor = ServiceDescriptor::class::<Standalone>();
        assert!(!descriptor.injectable);
    }

    #[test]
    fn factory_builds_from_ordered_arguments() {
        let descriptor = ServiceDescriptor::provider::<Consumer>();
        let dep: Instance = Arc::new(Standalone);
        let mut args = ResolvedArgs::new("Consumer", vec![dep.clone()]);

        let instance = descriptor.construct(&mut args).unwrap();
        let consumer = instance.downcast::<Consumer>().unwrap();
        assert!(Arc::ptr_eq(
            &consumer.dep,
            &dep.downcast::<Standalone>().unwrap()
        ));
    }

    #[test]
    fn controller_descriptor_collects_routing_metadata() {
        let descriptor = ControllerDescriptor::new::<Consumer>()
            .with_base_path("users")
            .with_route(RouteDefinition::new(HttpMethod::GET, "/", "list"))
            .with_route(RouteDefinition::new(HttpMethod::POST, "/", "create"));

        assert_eq!(descriptor.controller_name, "Consumer");
        assert_eq!(descriptor.base_path.as_deref(), Some("users"));
        assert_eq!(descriptor.routes.len(), 2);
    }

    #[test]
    fn short_name_strips_the_module_path() {
        let id = ServiceId::of::<Standalone>();
        assert_eq!(id.short_name(), "Standalone");
        assert!(id.type_name().contains("descriptor::tests::Standalone"));
    }
}
