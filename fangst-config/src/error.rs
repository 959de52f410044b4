//! Configuration error type.

use std::path::PathBuf;
use thiserror::Error;
use validator::ValidationErrors;

/// Errors raised while loading or validating recorder configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The requested config file does not exist.
    #[error("config file does not exist: {0}")]
    FileNotFound(PathBuf),

    /// One or more fields failed validation.
    #[error("config rejected:\n{}", render_field_errors(.0))]
    Validation(#[source] ValidationErrors),

    /// The file or environment layers could not be merged/parsed.
    #[error("config could not be parsed: {0}")]
    Parsing(#[from] figment::Error),

    /// Underlying filesystem failure while reading config.
    #[error("config I/O failure: {0}")]
    Io(#[from] std::io::Error),
}

/// Flattens validator's per-field error map into one line per problem,
/// ready for operator-facing log output.
fn render_field_errors(errors: &ValidationErrors) -> String {
    let mut lines = Vec::new();
    for (field, errors) in errors.field_errors() {
        for error in errors {
            let reason = match &error.message {
                Some(message) => message.to_string(),
                None => error.code.to_string(),
            };
            lines.push(format!("  {}: {}", field, reason));
        }
    }
    lines.join("\n")
}

impl From<ValidationErrors> for ConfigError {
    fn from(errors: ValidationErrors) -> Self {
        ConfigError::Validation(errors)
    }
}
