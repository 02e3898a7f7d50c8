use std::collections::{HashSet, VecDeque};

use tracing::{info, warn};

use crate::config::BootstrapConfig;
use crate::container::descriptor::{ControllerDescriptor, ServiceDescriptor, ServiceId};
use crate::container::visibility::VisibilityRegistry;
use crate::errors::CoreError;
use crate::modules::descriptor::ModuleSource;

/// Everything the walker learned about the module tree, in discovery order.
#[derive(Debug, Default)]
pub struct Discovery {
    pub modules: Vec<String>,
    pub providers: Vec<ServiceDescriptor>,
    pub controllers: Vec<ControllerDescriptor>,
    pub visibility: VisibilityRegistry,
    /// Imports that named something without a module descriptor
    pub skipped_imports: Vec<String>,
}

impl Discovery {
    /// Identities of the discovered providers, in discovery order
    pub fn provider_ids(&self) -> Vec<ServiceId> {
        self.providers
            .iter()
            .map(|provider| provider.service_id)
            .collect()
    }

    /// Identities of the discovered controllers, in discovery order
    pub fn controller_ids(&self) -> Vec<ServiceId> {
        self.controllers
            .iter()
            .map(|controller| controller.controller_id)
            .collect()
    }
}

/// Breadth-first traversal of the module-import graph.
///
/// A visited set keyed by module name stops reprocessing, which also makes
/// cyclic imports harmless: a cycle stops re-queuing instead of erroring.
pub struct ModuleGraphWalker<'a, S: ModuleSource> {
    source: &'a S,
    strict_imports: bool,
}

impl<'a, S: ModuleSource> ModuleGraphWalker<'a, S> {
    /// Create a walker over a declaration source
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            strict_imports: false,
        }
    }

    /// Create a walker with config-driven import handling
    pub fn with_config(source: &'a S, config: &BootstrapConfig) -> Self {
        Self {
            source,
            strict_imports: config.strict_imports,
        }
    }

    /// Walk the import graph from the root module, collecting providers and
    /// controllers and populating ownership and visibility.
    pub fn discover(&self, root_module: &str) -> Result<Discovery, CoreError> {
        let mut queue = VecDeque::new();
        queue.push_back((root_module.to_string(), "bootstrap".to_string()));

        let mut visited: HashSet<String> = HashSet::new();
        let mut seen_classes: HashSet<ServiceId> = HashSet::new();
        let mut discovery = Discovery::default();

        while let Some((name, importer)) = queue.pop_front() {
            if !visited.insert(name.clone()) {
                continue;
            }

            let module = match self.source.descriptor(&name) {
                Some(module) => module,
                None => {
                    // imports may name classes that are not modules at all;
                    // they contribute nothing
                    if self.strict_imports {
                        return Err(CoreError::MissingModuleDescriptor {
                            module: name,
                            importer,
                        });
                    }
                    warn!(module = %name, importer = %importer, "no module descriptor; skipping");
                    discovery.skipped_imports.push(name);
                    continue;
                }
            };

            info!(module = %name, "discovered module");
            discovery.modules.push(name.clone());

            for import in &module.imports {
                queue.push_back((import.clone(), name.clone()));
            }

            for provider in &module.providers {
                discovery.visibility.set_owner(provider.service_id, &name)?;
                if seen_classes.insert(provider.service_id) {
                    info!(provider = %provider.service_name, module = %name, "discovered provider");
                    discovery.providers.push(provider.clone());
                }
            }

            for controller in &module.controllers {
                discovery
                    .visibility
                    .set_owner(controller.controller_id, &name)?;
                if seen_classes.insert(controller.controller_id) {
                    info!(controller = %controller.controller_name, module = %name, "discovered controller");
                    discovery.controllers.push(controller.clone());
                }
            }

            discovery
                .visibility
                .register_visibility(&name, module.provider_ids());

            // single hop: an import contributes its own declared providers,
            // never what it imports in turn
            for import in &module.imports {
                if let Some(imported) = self.source.descriptor(import) {
                    discovery
                        .visibility
                        .register_visibility(&name, imported.provider_ids());
                }
            }
        }

        Ok(discovery)
    }
}
