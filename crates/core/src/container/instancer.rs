use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::config::BootstrapConfig;
use crate::container::descriptor::{ControllerDescriptor, Instance, ServiceDescriptor, ServiceId};
use crate::container::injectable::ResolvedArgs;
use crate::container::path::ResolutionPath;
use crate::container::visibility::VisibilityRegistry;
use crate::errors::CoreError;

/// Lazy singleton cache plus the recursive resolver.
///
/// All state is held by value: independent containers never share registries
/// or instances, so isolated bootstraps can run side by side. After bootstrap
/// the maps are only read; instances are shared out as `Arc` clones.
pub struct InstanceContainer {
    visibility: VisibilityRegistry,
    services: HashMap<ServiceId, ServiceDescriptor>,
    controllers: HashMap<ServiceId, ControllerDescriptor>,
    instances: HashMap<ServiceId, Instance>,
    controller_instances: HashMap<ServiceId, Instance>,
    max_depth: usize,
}

impl InstanceContainer {
    /// Create a container over an already-populated visibility registry
    pub fn new(visibility: VisibilityRegistry, config: &BootstrapConfig) -> Self {
        Self {
            visibility,
            services: HashMap::new(),
            controllers: HashMap::new(),
            instances: HashMap::new(),
            controller_instances: HashMap::new(),
            max_depth: config.max_resolution_depth,
        }
    }

    /// Register a discovered provider
    pub fn register_provider(&mut self, descriptor: ServiceDescriptor) {
        self.services.insert(descriptor.service_id, descriptor);
    }

    /// Register a discovered controller
    pub fn register_controller(&mut self, descriptor: ControllerDescriptor) {
        self.controllers.insert(descriptor.controller_id, descriptor);
    }

    /// Resolve a provider on behalf of `requesting_module`.
    ///
    /// Order matters: cycle check, singleton short-circuit, depth bound,
    /// visibility, capability marker, then dependencies in declared order.
    /// Dependencies of a provider are validated against the module that owns
    /// that provider, not against the module that started the resolution.
    pub fn resolve(
        &mut self,
        id: &ServiceId,
        requesting_module: &str,
        path: &mut ResolutionPath,
    ) -> Result<Instance, CoreError> {
        if path.contains(id) {
            return Err(CoreError::CircularDependency {
                class: id.short_name().to_string(),
                path: path.path_string(id),
            });
        }

        if let Some(instance) = self.instances.get(id) {
            return Ok(instance.clone());
        }

        if path.depth() >= self.max_depth {
            return Err(CoreError::ResolutionDepthExceeded {
                class: id.short_name().to_string(),
                depth: self.max_depth,
            });
        }

        if !self.visibility.is_visible(id, requesting_module) {
            return Err(CoreError::DependencyNotVisible {
                class: id.short_name().to_string(),
                module: requesting_module.to_string(),
            });
        }

        let descriptor = match self.services.get(id) {
            Some(descriptor) if descriptor.injectable => descriptor.clone(),
            _ => {
                return Err(CoreError::NotAProvider {
                    class: id.short_name().to_string(),
                    module: requesting_module.to_string(),
                })
            }
        };

        // visibility refuses unowned ids, so the owner exists past this point
        let owner = self
            .visibility
            .owner(id)
            .unwrap_or(requesting_module)
            .to_string();

        path.push(*id);
        let mut resolved = Vec::with_capacity(descriptor.dependencies.len());
        for dependency in &descriptor.dependencies {
            resolved.push(self.resolve(dependency, &owner, path)?);
        }

        debug!(
            provider = %descriptor.service_name,
            module = %owner,
            dependencies = descriptor.dependencies.len(),
            "constructing provider"
        );
        let mut args = ResolvedArgs::new(id.short_name(), resolved);
        let instance = descriptor.construct(&mut args)?;
        path.pop();

        self.instances.insert(*id, instance.clone());
        Ok(instance)
    }

    /// Resolve a provider from its own module with an empty path; the
    /// bootstrap entry point for every discovered provider.
    pub fn resolve_from_owner(&mut self, id: &ServiceId) -> Result<Instance, CoreError> {
        let owner = match self.visibility.owner(id) {
            Some(owner) => owner.to_string(),
            None => {
                return Err(CoreError::validation(format!(
                    "provider '{}' was never discovered",
                    id.short_name()
                )))
            }
        };

        let mut path = ResolutionPath::new();
        self.resolve(id, &owner, &mut path)
    }

    /// Resolve a controller; its dependencies run through the same provider
    /// pipeline, validated against the controller's owning module.
    pub fn resolve_controller(&mut self, id: &ServiceId) -> Result<Instance, CoreError> {
        if let Some(instance) = self.controller_instances.get(id) {
            return Ok(instance.clone());
        }

        let descriptor = match self.controllers.get(id) {
            Some(descriptor) => descriptor.clone(),
            None => {
                return Err(CoreError::validation(format!(
                    "controller '{}' was never discovered",
                    id.short_name()
                )))
            }
        };

        let module = match self.visibility.owner(id) {
            Some(owner) => owner.to_string(),
            None => {
                return Err(CoreError::validation(format!(
                    "controller '{}' has no owning module",
                    id.short_name()
                )))
            }
        };

        let mut path = ResolutionPath::new();
        path.push(*id);
        let mut resolved = Vec::with_capacity(descriptor.dependencies.len());
        for dependency in &descriptor.dependencies {
            resolved.push(self.resolve(dependency, &module, &mut path)?);
        }
        path.pop();

        debug!(
            controller = %descriptor.controller_name,
            module = %module,
            dependencies = descriptor.dependencies.len(),
            "constructing controller"
        );
        let mut args = ResolvedArgs::new(id.short_name(), resolved);
        let instance = descriptor.construct(&mut args)?;

        self.controller_instances.insert(*id, instance.clone());
        Ok(instance)
    }

    /// Cached provider instance, if resolved
    pub fn provider_instance(&self, id: &ServiceId) -> Option<Instance> {
        self.instances.get(id).cloned()
    }

    /// Cached controller instance, if resolved
    pub fn controller_instance(&self, id: &ServiceId) -> Option<Instance> {
        self.controller_instances.get(id).cloned()
    }

    /// Typed handle to a resolved provider
    pub fn provider<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        let instance = self.instances.get(&ServiceId::of::<T>())?;
        instance.clone().downcast::<T>().ok()
    }

    /// Typed handle to a resolved controller
    pub fn controller<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        let instance = self.controller_instances.get(&ServiceId::of::<T>())?;
        instance.clone().downcast::<T>().ok()
    }

    /// Owning module of a class, for diagnostics
    pub fn ownership(&self, id: &ServiceId) -> Option<&str> {
        self.visibility.owner(id)
    }

    /// Registered provider descriptor
    pub fn service_descriptor(&self, id: &ServiceId) -> Option<&ServiceDescriptor> {
        self.services.get(id)
    }

    /// Registered controller descriptor
    pub fn controller_descriptor(&self, id: &ServiceId) -> Option<&ControllerDescriptor> {
        self.controllers.get(id)
    }

    pub fn visibility(&self) -> &VisibilityRegistry {
        &self.visibility
    }
}

impl std::fmt::Debug for InstanceContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstanceContainer")
            .field("services", &self.services.len())
            .field("controllers", &self.controllers.len())
            .field("resolved", &self.instances.len())
            .field("max_depth", &self.max_depth)
            .finish()
    }
}
