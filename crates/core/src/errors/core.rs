use thiserror::Error;

/// Core error type for the arbor runtime.
///
/// Every variant raised during bootstrap is fatal: the host must not accept
/// traffic after a failed bootstrap. `MissingModuleDescriptor` is only
/// produced under strict imports; the default treats an undeclared import as
/// a zero-contribution leaf.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("'{class}' is injected into module '{module}' but is not marked as a provider; mark it as a provider")]
    NotAProvider { class: String, module: String },

    #[error("'{class}' is not visible from module '{module}'; declare it in the module's provider list or import the module that owns it")]
    DependencyNotVisible { class: String, module: String },

    #[error("Circular dependency detected while constructing '{class}': {path}")]
    CircularDependency { class: String, path: String },

    #[error("Module '{module}' (reached from '{importer}') carries no module descriptor")]
    MissingModuleDescriptor { module: String, importer: String },

    #[error("'{class}' is declared by module '{module}' but already belongs to '{owner}'; a class has exactly one owning module")]
    DuplicateOwner {
        class: String,
        owner: String,
        module: String,
    },

    #[error("Resolution of '{class}' exceeded the maximum depth of {depth}")]
    ResolutionDepthExceeded { class: String, depth: usize },

    #[error("Constructor of '{class}' ran out of arguments while expecting '{expected}'")]
    MissingArgument { class: String, expected: String },

    #[error("Constructor argument of '{class}' does not match the declared type '{expected}'")]
    ArgumentMismatch { class: String, expected: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl CoreError {
    /// Create a new configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Check if the error is a visibility rejection
    pub fn is_visibility(&self) -> bool {
        matches!(self, Self::DependencyNotVisible { .. })
    }

    /// Check if the error is a cycle rejection
    pub fn is_circular(&self) -> bool {
        matches!(self, Self::CircularDependency { .. })
    }

    /// Check if the error is a configuration error
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Configuration { .. } | Self::DuplicateOwner { .. }
        )
    }
}
