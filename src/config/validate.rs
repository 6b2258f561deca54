//! Configuration validation.

use crate::config::Config;
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    config.classifier_settings().validate()?;
    validate_store(config)?;
    Ok(())
}

/// Validate store settings.
fn validate_store(config: &Config) -> Result<()> {
    if config.store.key.trim().is_empty() {
        return Err(Error::ConfigValidation {
            message: "store key must not be empty".to_string(),
        });
    }

    if let Some(ref path) = config.store.path
        && path.is_dir()
    {
        return Err(Error::ConfigValidation {
            message: format!("store path is a directory: {}", path.display()),
        });
    }

    Ok(())
}
