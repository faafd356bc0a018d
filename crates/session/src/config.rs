//! Engine configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `ROSEBUD_CART_EXPIRY_DAYS` - Days an untouched session survives
//!   (default: 5)

use chrono::TimeDelta;
use thiserror::Error;

/// Default expiry window in days.
pub const DEFAULT_EXPIRY_DAYS: i64 = 5;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Session engine configuration.
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    /// Age past which a persisted session is cleared on load.
    pub expiry: TimeDelta,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            expiry: TimeDelta::days(DEFAULT_EXPIRY_DAYS),
        }
    }
}

impl SessionConfig {
    /// Load configuration from the environment, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if `ROSEBUD_CART_EXPIRY_DAYS` is set but not a
    /// positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        let Ok(raw) = std::env::var("ROSEBUD_CART_EXPIRY_DAYS") else {
            return Ok(Self::default());
        };
        let days: i64 = raw.parse().map_err(|_| {
            ConfigError::InvalidEnvVar(
                "ROSEBUD_CART_EXPIRY_DAYS".to_owned(),
                format!("expected a positive integer, got {raw:?}"),
            )
        })?;
        if days <= 0 {
            return Err(ConfigError::InvalidEnvVar(
                "ROSEBUD_CART_EXPIRY_DAYS".to_owned(),
                "must be positive".to_owned(),
            ));
        }
        Ok(Self {
            expiry: TimeDelta::days(days),
        })
    }
}
