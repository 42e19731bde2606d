use std::path::Path;

use capsule_codec::TransformOptions;
use serde::{Deserialize, Serialize};

use crate::error::{CapsuleError, CapsuleResult};

/// Per-accessor options.
///
/// Missing fields take their defaults, so an empty TOML document is a valid
/// configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapsuleConfig {
    /// Write dates as tagged ISO-8601 text and rebuild them on read.
    pub hydrate_dates: bool,
}

impl Default for CapsuleConfig {
    fn default() -> Self {
        Self {
            hydrate_dates: true,
        }
    }
}

impl CapsuleConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> CapsuleResult<Self> {
        toml::from_str(text).map_err(|e| CapsuleError::Config(e.to_string()))
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> CapsuleResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| CapsuleError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Codec transforms implied by this configuration.
    pub fn transform_options(&self) -> TransformOptions {
        TransformOptions::none().with_date(self.hydrate_dates)
    }
}
