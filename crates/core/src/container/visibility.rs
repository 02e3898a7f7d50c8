use std::collections::{HashMap, HashSet};

use crate::container::descriptor::ServiceId;
use crate::errors::CoreError;

/// Tracks which module owns each class and which providers each module may
/// inject: its own, plus those of directly-imported modules (single hop).
#[derive(Debug, Default)]
pub struct VisibilityRegistry {
    owners: HashMap<ServiceId, String>,
    visible: HashMap<String, HashSet<ServiceId>>,
}

impl VisibilityRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the owning module for a class.
    ///
    /// Idempotent for the same module; a second owner is a configuration
    /// error rather than a silent overwrite.
    pub fn set_owner(&mut self, id: ServiceId, module: &str) -> Result<(), CoreError> {
        match self.owners.get(&id) {
            Some(owner) if owner == module => Ok(()),
            Some(owner) => Err(CoreError::DuplicateOwner {
                class: id.short_name().to_string(),
                owner: owner.clone(),
                module: module.to_string(),
            }),
            None => {
                self.owners.insert(id, module.to_string());
                Ok(())
            }
        }
    }

    /// Union `ids` into the set of providers importable from `module`
    pub fn register_visibility<I>(&mut self, module: &str, ids: I)
    where
        I: IntoIterator<Item = ServiceId>,
    {
        self.visible
            .entry(module.to_string())
            .or_default()
            .extend(ids);
    }

    /// Owning module of a class, if any
    pub fn owner(&self, id: &ServiceId) -> Option<&str> {
        self.owners.get(id).map(String::as_str)
    }

    /// A class is visible to `module` iff the module owns it or the owning
    /// module's providers were imported. Unowned ids are never visible.
    pub fn is_visible(&self, id: &ServiceId, module: &str) -> bool {
        match self.owners.get(id) {
            None => false,
            Some(owner) if owner == module => true,
            Some(_) => self
                .visible
                .get(module)
                .map_or(false, |set| set.contains(id)),
        }
    }
}
