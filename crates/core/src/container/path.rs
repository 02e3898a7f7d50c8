use crate::container::descriptor::ServiceId;

/// Ordered set of identities currently being constructed.
///
/// Empty at the start and end of every successful top-level resolution; an
/// identity showing up twice is a dependency cycle.
#[derive(Debug, Clone, Default)]
pub struct ResolutionPath {
    services: Vec<ServiceId>,
}

impl ResolutionPath {
    /// Create an empty resolution path
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a service as in progress
    pub fn push(&mut self, id: ServiceId) {
        self.services.push(id);
    }

    /// Unmark the most recent service
    pub fn pop(&mut self) -> Option<ServiceId> {
        self.services.pop()
    }

    /// Check whether a service is already being constructed
    pub fn contains(&self, id: &ServiceId) -> bool {
        self.services.contains(id)
    }

    /// Current construction depth
    pub fn depth(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Render the path for error messages, closing it with the offending id
    pub fn path_string(&self, tail: &ServiceId) -> String {
        self.services
            .iter()
            .chain(std::iter::once(tail))
            .map(ServiceId::short_name)
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}
