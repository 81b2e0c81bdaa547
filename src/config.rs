use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::context::PaymentMethod;
use crate::flow::DEFAULT_HISTORY_LIMIT;

/// Main configuration structure for the booking flow
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BookingFlowConfig {
    /// Provider matching settings
    pub matching: MatchingConfig,
    /// Payment phase settings
    pub payment: PaymentConfig,
    /// Flow controller settings
    pub flow: FlowSettings,
    /// Observability settings
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MatchingConfig {
    /// Seconds the host waits in PROVIDER_MATCHING before feeding TIMEOUT
    pub timeout_seconds: u64,
    /// Polling cadence for booking status while matching
    pub poll_interval_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaymentConfig {
    /// Payment method assumed when the customer never picked one
    pub default_method: PaymentMethod,
    /// Whether completion goes through an invoice (GENERATE_INVOICE)
    /// or straight to settlement (SKIP_INVOICE)
    pub invoice_enabled: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FlowSettings {
    /// Transition records retained per flow instance
    pub history_limit: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Enable tracing output
    pub tracing_enabled: bool,
    /// Log level
    pub log_level: String,
    /// Emit logs as JSON lines (false = human-readable)
    pub json_logs: bool,
}

impl Default for BookingFlowConfig {
    fn default() -> Self {
        Self {
            matching: MatchingConfig {
                timeout_seconds: 300, // 5 minutes before the matching window expires
                poll_interval_seconds: 5,
            },
            payment: PaymentConfig {
                default_method: PaymentMethod::Cash,
                invoice_enabled: true,
            },
            flow: FlowSettings {
                history_limit: DEFAULT_HISTORY_LIMIT,
            },
            observability: ObservabilityConfig {
                tracing_enabled: true,
                log_level: "info".to_string(),
                json_logs: true,
            },
        }
    }
}

impl BookingFlowConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration file (booking-flow.toml)
    /// 3. Environment variables (BOOKING_FLOW_ prefix, double underscore
    ///    between nesting levels: BOOKING_FLOW_MATCHING__TIMEOUT_SECONDS)
    pub fn load() -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if Path::new("booking-flow.toml").exists() {
            builder = builder.add_source(File::with_name("booking-flow"));
        }

        builder = builder.add_source(
            Environment::with_prefix("BOOKING_FLOW")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;

        let mut flow_config: BookingFlowConfig = config.try_deserialize()?;

        // Flat BOOKING_FLOW_LOG_LEVEL is accepted as a short form of
        // BOOKING_FLOW_OBSERVABILITY__LOG_LEVEL.
        if let Ok(level) = std::env::var("BOOKING_FLOW_LOG_LEVEL") {
            flow_config.observability.log_level = level;
        }

        Ok(flow_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_content = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_content)?;
        Ok(())
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::info!("Loaded environment variables from .env file");
        }
        Ok(())
    }
}

/// Global configuration instance
static CONFIG: std::sync::LazyLock<Result<BookingFlowConfig, anyhow::Error>> =
    std::sync::LazyLock::new(|| {
        // Load .env file first
        let _ = BookingFlowConfig::load_env_file();
        BookingFlowConfig::load()
    });

/// Get the global configuration
pub fn config() -> Result<&'static BookingFlowConfig> {
    CONFIG
        .as_ref()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))
}

/// Initialize configuration (called at startup)
pub fn init_config() -> Result<()> {
    let _config = config()?;
    tracing::info!("Configuration loaded successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sane() {
        let config = BookingFlowConfig::default();
        assert!(config.matching.timeout_seconds > 0);
        assert!(config.matching.poll_interval_seconds < config.matching.timeout_seconds);
        assert_eq!(config.payment.default_method, PaymentMethod::Cash);
        assert!(config.payment.invoice_enabled);
        assert_eq!(config.flow.history_limit, DEFAULT_HISTORY_LIMIT);
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("booking-flow.toml");

        let mut config = BookingFlowConfig::default();
        config.matching.timeout_seconds = 120;
        config.payment.default_method = PaymentMethod::Upi;
        config.save_to_file(&path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let reloaded: BookingFlowConfig = toml::from_str(&raw).unwrap();
        assert_eq!(reloaded.matching.timeout_seconds, 120);
        assert_eq!(reloaded.payment.default_method, PaymentMethod::Upi);
        assert!(reloaded.observability.tracing_enabled);
    }

    #[test]
    fn test_env_overrides_reach_nested_fields() {
        std::env::set_var("BOOKING_FLOW_MATCHING__TIMEOUT_SECONDS", "42");
        std::env::set_var("BOOKING_FLOW_OBSERVABILITY__JSON_LOGS", "false");
        std::env::set_var("BOOKING_FLOW_LOG_LEVEL", "debug");

        let config = BookingFlowConfig::load();

        std::env::remove_var("BOOKING_FLOW_MATCHING__TIMEOUT_SECONDS");
        std::env::remove_var("BOOKING_FLOW_OBSERVABILITY__JSON_LOGS");
        std::env::remove_var("BOOKING_FLOW_LOG_LEVEL");

        let config = config.unwrap();
        assert_eq!(config.matching.timeout_seconds, 42);
        assert!(!config.observability.json_logs);
        assert_eq!(config.observability.log_level, "debug");
        // Untouched fields keep their defaults.
        assert_eq!(config.flow.history_limit, DEFAULT_HISTORY_LIMIT);
    }

    #[test]
    fn test_payment_method_uses_wire_names_in_toml() {
        let config = BookingFlowConfig::default();
        let toml_content = toml::to_string_pretty(&config).unwrap();
        assert!(toml_content.contains("default_method = \"CASH\""));
    }
}
