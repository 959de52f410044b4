//! # Fangst Configuration System
//!
//! Hierarchical configuration management for the Fangst packet recorder.
//!
//! ## Features
//! - **Unified Configuration**: Single source of truth for all workers
//! - **Validation**: Runtime validation of critical parameters
//! - **Environment Awareness**: `FANGST_*` variables override file settings

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

mod error;
mod recorder;
mod validation;

pub use error::ConfigError;
pub use recorder::RecorderConfig;
pub use validation::MAX_TEMPLATE_LENGTH;

/// Top-level configuration container for all Fangst components.
#[derive(Debug, Serialize, Deserialize, Validate, Default)]
pub struct FangstConfig {
    /// Packet recorder parameters (naming, rotation, burst sizing).
    #[validate(nested)]
    pub recorder: RecorderConfig,
}

impl FangstConfig {
    /// Load configuration from default files and environment.
    ///
    /// Hierarchy:
    /// 1. Default values
    /// 2. `config/fangst.yaml` - base settings. If missing, defaults are used.
    /// 3. `FANGST_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        // Start with defaults.
        let mut figment = Figment::from(Serialized::defaults(FangstConfig::default()));

        if Path::new("config/fangst.yaml").exists() {
            figment = figment.merge(Yaml::file("config/fangst.yaml"));
        }

        figment
            .merge(Env::prefixed("FANGST_").split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }

    /// Load configuration from a specific path for testing/validation.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(PathBuf::from(
                path.to_string_lossy().to_string(),
            )));
        }

        Figment::from(Serialized::defaults(FangstConfig::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed("FANGST_").split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }
}
