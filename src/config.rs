//! Configuration management module.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::booking::Fee;

/// Configuration load result.
#[derive(Debug)]
pub enum ConfigLoadResult {
    /// Config loaded successfully.
    Loaded(AppConfig),
    /// Config file missing (first run).
    Missing,
    /// Config file exists but invalid.
    Invalid(ConfigError),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub hospital: HospitalConfig,
    #[serde(default)]
    pub booking: BookingConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Hospital identity shown across the portal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HospitalConfig {
    pub name: String,
    pub tagline: String,
    /// Address printed on every confirmed appointment.
    pub location: String,
    /// Name used in the dashboard greeting.
    pub patient_name: String,
}

/// Booking fee settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    pub fee_amount: u32,
    pub currency: String,
}

/// Credentials accepted by the simulated login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub demo_username: String,
    pub demo_password: String,
}

/// Simulated backend latency and failure policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub login_delay_ms: u64,
    pub signup_delay_ms: u64,
    pub payment_delay_ms: u64,
    /// Probability (0.0 to 1.0) that any simulated call fails.
    #[serde(default)]
    pub failure_rate: f64,
}

/// UI preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// How long a notification stays on screen.
    #[serde(default = "default_toast_seconds")]
    pub toast_seconds: f32,
    #[serde(default)]
    pub dark_mode: bool,
}

fn default_toast_seconds() -> f32 {
    4.0
}

impl AppConfig {
    /// Get config file path (same directory as executable).
    pub fn default_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    /// Attempt to load config with detailed result.
    pub fn try_load(path: &Path) -> ConfigLoadResult {
        if !path.exists() {
            return ConfigLoadResult::Missing;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<AppConfig>(&content) {
                Ok(config) => match config.validate() {
                    Ok(()) => ConfigLoadResult::Loaded(config),
                    Err(e) => ConfigLoadResult::Invalid(e),
                },
                Err(e) => ConfigLoadResult::Invalid(ConfigError::Parse(e)),
            },
            Err(e) => ConfigLoadResult::Invalid(ConfigError::Read(e)),
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hospital.name.trim().is_empty() {
            return Err(ConfigError::Validation("Hospital name cannot be empty".to_string()));
        }
        if self.hospital.location.trim().is_empty() {
            return Err(ConfigError::Validation("Hospital location cannot be empty".to_string()));
        }
        if self.booking.fee_amount == 0 {
            return Err(ConfigError::Validation("Booking fee must be greater than 0".to_string()));
        }
        if self.booking.currency.trim().is_empty() {
            return Err(ConfigError::Validation("Currency cannot be empty".to_string()));
        }
        if self.auth.demo_username.trim().is_empty() {
            return Err(ConfigError::Validation("Demo username cannot be empty".to_string()));
        }
        if self.auth.demo_password.is_empty() {
            return Err(ConfigError::Validation("Demo password cannot be empty".to_string()));
        }
        if !(0.0..=1.0).contains(&self.backend.failure_rate) {
            return Err(ConfigError::Validation(
                "Failure rate must be between 0.0 and 1.0".to_string(),
            ));
        }
        if self.backend.payment_delay_ms > 60_000 {
            return Err(ConfigError::Validation(
                "Payment delay cannot exceed 60 seconds".to_string(),
            ));
        }
        if !self.ui.toast_seconds.is_finite() || self.ui.toast_seconds <= 0.0 {
            return Err(ConfigError::Validation(
                "Toast duration must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl BookingConfig {
    /// The canonical appointment fee.
    pub fn fee(&self) -> Fee {
        Fee::new(self.fee_amount, self.currency.clone())
    }
}

impl Default for HospitalConfig {
    fn default() -> Self {
        Self {
            name: "Mwaiwathu Private Hospital".to_string(),
            tagline: "Doctor's Appointment System".to_string(),
            location: "Mwaiwathu Private Hospital, Nyambadwe, Old Chileka Road.".to_string(),
            patient_name: "John".to_string(),
        }
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            fee_amount: 10_000,
            currency: "MK".to_string(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            demo_username: "demo".to_string(),
            demo_password: "password".to_string(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            login_delay_ms: 1500,
            signup_delay_ms: 2000,
            payment_delay_ms: 2000,
            failure_rate: 0.0,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            toast_seconds: default_toast_seconds(),
            dark_mode: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_fee() {
        let config = AppConfig::default();
        assert_eq!(config.booking.fee().to_string(), "MK10000");
    }

    #[test]
    fn test_validation_empty_location() {
        let mut config = AppConfig::default();
        config.hospital.location = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_fee() {
        let mut config = AppConfig::default();
        config.booking.fee_amount = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_failure_rate_bounds() {
        let mut config = AppConfig::default();

        config.backend.failure_rate = -0.1;
        assert!(config.validate().is_err());

        config.backend.failure_rate = 1.5;
        assert!(config.validate().is_err());

        config.backend.failure_rate = 1.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [booking]
            fee_amount = 5000
            currency = "MK"
            "#,
        )
        .unwrap();
        assert_eq!(config.booking.fee_amount, 5000);
        assert_eq!(config.auth.demo_username, "demo");
        assert_eq!(config.backend.payment_delay_ms, 2000);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("medicare-portal-config-{}.toml", std::process::id()));
        let mut config = AppConfig::default();
        config.hospital.patient_name = "Grace".to_string();
        config.save(&path).unwrap();

        match AppConfig::try_load(&path) {
            ConfigLoadResult::Loaded(loaded) => assert_eq!(loaded.hospital.patient_name, "Grace"),
            other => panic!("unexpected load result: {other:?}"),
        }
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("medicare-portal-does-not-exist.toml");
        assert!(matches!(AppConfig::try_load(&path), ConfigLoadResult::Missing));
    }
}
