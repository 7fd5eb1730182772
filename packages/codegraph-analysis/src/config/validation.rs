//! Validation trait shared by all configuration sections

use super::error::ConfigResult;

/// Common validation interface for configuration sections
///
/// ```rust,ignore
/// fn check<C: Validatable>(config: &C) -> ConfigResult<()> {
///     config.validate()
/// }
/// ```
pub trait Validatable {
    /// Validate the configuration
    ///
    /// Returns `Ok(())` if valid, `Err(ConfigError)` with details if invalid.
    fn validate(&self) -> ConfigResult<()>;

    /// Get the configuration name for error messages
    fn config_name(&self) -> &'static str {
        "Config"
    }
}
