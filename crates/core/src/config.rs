use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Default bound on recursive resolution depth.
pub const DEFAULT_MAX_RESOLUTION_DEPTH: usize = 128;

const MAX_DEPTH_ENV: &str = "ARBOR_MAX_RESOLUTION_DEPTH";
const STRICT_IMPORTS_ENV: &str = "ARBOR_STRICT_IMPORTS";

/// Bootstrap tuning knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Hard bound on the resolution path length. Cycle detection fires first
    /// on real cycles; the bound is the fallback against pathological graphs.
    pub max_resolution_depth: usize,
    /// Fail bootstrap when an import names something without a module
    /// descriptor instead of skipping it.
    pub strict_imports: bool,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            max_resolution_depth: DEFAULT_MAX_RESOLUTION_DEPTH,
            strict_imports: false,
        }
    }
}

impl BootstrapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read overrides from `ARBOR_MAX_RESOLUTION_DEPTH` and
    /// `ARBOR_STRICT_IMPORTS`.
    pub fn from_env() -> Result<Self, CoreError> {
        let mut config = Self::default();

        if let Ok(value) = std::env::var(MAX_DEPTH_ENV) {
            config.max_resolution_depth = value.parse().map_err(|_| {
                CoreError::configuration(format!("invalid {}: '{}'", MAX_DEPTH_ENV, value))
            })?;
            if config.max_resolution_depth == 0 {
                return Err(CoreError::configuration(format!(
                    "{} must be at least 1",
                    MAX_DEPTH_ENV
                )));
            }
        }

        if let Ok(value) = std::env::var(STRICT_IMPORTS_ENV) {
            config.strict_imports = match value.as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(CoreError::configuration(format!(
                        "invalid {}: '{}'",
                        STRICT_IMPORTS_ENV, value
                    )))
                }
            };
        }

        Ok(config)
    }

    /// Set the resolution depth bound
    pub fn with_max_resolution_depth(mut self, depth: usize) -> Self {
        self.max_resolution_depth = depth;
        self
    }

    /// Set strict import handling
    pub fn with_strict_imports(mut self, strict: bool) -> Self {
        self.strict_imports = strict;
        self
    }
}
