//! Registry configuration
//!
//! Behavior switches threaded into the tree manager at construction. The
//! `development` flag is an explicit runtime value rather than a compile-time
//! toggle so both modes stay testable in one build.

use serde::{Deserialize, Serialize};

/// Behavior switches for a [`crate::module::ModuleCollection`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Enable definition validation and structural warnings.
    ///
    /// Production deployments disable this and trust well-formed input:
    /// malformed handler declarations pass through unchecked and non-fatal
    /// conditions are silent.
    #[serde(default = "default_development")]
    pub development: bool,
}

fn default_development() -> bool {
    cfg!(debug_assertions)
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            development: default_development(),
        }
    }
}

impl RegistryConfig {
    /// Config with validation and warnings enabled.
    pub fn development() -> Self {
        Self { development: true }
    }

    /// Config with validation and warnings disabled.
    pub fn production() -> Self {
        Self { development: false }
    }
}
