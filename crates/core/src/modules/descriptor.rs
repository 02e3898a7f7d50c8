use std::collections::HashMap;

use crate::container::descriptor::{ControllerDescriptor, ServiceDescriptor, ServiceId};

/// Declared shape of a module: owned providers and controllers, plus the
/// modules it imports. Immutable once handed to the walker.
#[derive(Debug, Clone, Default)]
pub struct ModuleDescriptor {
    pub name: String,
    pub providers: Vec<ServiceDescriptor>,
    pub controllers: Vec<ControllerDescriptor>,
    pub imports: Vec<String>,
}

impl ModuleDescriptor {
    /// Create a new module descriptor
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            providers: Vec::new(),
            controllers: Vec::new(),
            imports: Vec::new(),
        }
    }

    /// Add a provider
    pub fn with_provider(mut self, provider: ServiceDescriptor) -> Self {
        self.providers.push(provider);
        self
    }

    /// Add multiple providers
    pub fn with_providers(mut self, providers: Vec<ServiceDescriptor>) -> Self {
        self.providers.extend(providers);
        self
    }

    /// Add a controller
    pub fn with_controller(mut self, controller: ControllerDescriptor) -> Self {
        self.controllers.push(controller);
        self
    }

    /// Add multiple controllers
    pub fn with_controllers(mut self, controllers: Vec<ControllerDescriptor>) -> Self {
        self.controllers.extend(controllers);
        self
    }

    /// Import another module by name
    pub fn with_import(mut self, module: impl Into<String>) -> Self {
        self.imports.push(module.into());
        self
    }

    /// Set the imported module names
    pub fn with_imports(mut self, imports: Vec<String>) -> Self {
        self.imports = imports;
        self
    }

    /// Identities of the module's own declared providers
    pub fn provider_ids(&self) -> impl Iterator<Item = ServiceId> + '_ {
        self.providers.iter().map(|provider| provider.service_id)
    }
}

/// External declaration source: where module descriptors come from.
pub trait ModuleSource {
    /// Descriptor for a module name, or `None` when the name was never
    /// declared as a module
    fn descriptor(&self, module: &str) -> Option<&ModuleDescriptor>;
}

/// In-memory module catalog, the standard declaration source.
#[derive(Debug, Default)]
pub struct ModuleCatalog {
    modules: HashMap<String, ModuleDescriptor>,
}

impl ModuleCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a module. A later declaration under the same name replaces the
    /// earlier one.
    pub fn declare(&mut self, descriptor: ModuleDescriptor) {
        self.modules.insert(descriptor.name.clone(), descriptor);
    }

    /// Builder-style declaration
    pub fn with_module(mut self, descriptor: ModuleDescriptor) -> Self {
        self.declare(descriptor);
        self
    }

    /// Check if a module is declared
    pub fn contains(&self, module: &str) -> bool {
        self.modules.contains_key(module)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl ModuleSource for ModuleCatalog {
    fn descriptor(&self, module: &str) -> Option<&ModuleDescriptor> {
        self.modules.get(module)
    }
}
