//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `mailwatch.toml` in the working directory. Every field has a
//! default, so the file is optional. Environment variables take precedence
//! over file values, and the result is validated before any adapter is
//! built.

use serde::Deserialize;

use mailwatch_adapter_mqtt::MqttConfig;
use mailwatch_adapter_ntp::NtpConfig;
use mailwatch_adapter_smtp::SmtpConfig;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Device identity.
    pub device: DeviceConfig,
    /// MQTT broker settings.
    pub mqtt: MqttConfig,
    /// Time synchronization settings.
    pub ntp: NtpConfig,
    /// SMTP transport settings.
    pub smtp: SmtpConfig,
    /// Notification addressing.
    pub email: EmailConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Device identity configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Hostname quoted in notification bodies and Message-ID headers.
    /// When unset, one is derived from the machine fingerprint.
    pub hostname: Option<String>,
}

/// Notification addressing configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    /// Display name for the `From` header and the body sign-off.
    pub sender_name: String,
    /// Sender address.
    pub sender: String,
    /// Recipient address.
    pub recipient: String,
    /// Domain suffix appended to generated Message-ID headers, including
    /// the `@`.
    pub domain_suffix: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `mailwatch.toml` (if present), apply
    /// environment-variable overrides, then validate.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed,
    /// or if the resulting configuration fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("mailwatch.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("MAILWATCH_MQTT_HOST") {
            self.mqtt.broker_host = val;
        }
        if let Ok(val) = std::env::var("MAILWATCH_MQTT_PORT") {
            if let Ok(port) = val.parse() {
                self.mqtt.broker_port = port;
            }
        }
        if let Ok(val) = std::env::var("MAILWATCH_NTP_SERVER") {
            self.ntp.server = val;
        }
        if let Ok(val) = std::env::var("MAILWATCH_SMTP_HOST") {
            self.smtp.host = val;
        }
        if let Ok(val) = std::env::var("MAILWATCH_SMTP_USERNAME") {
            self.smtp.username = Some(val);
        }
        if let Ok(val) = std::env::var("MAILWATCH_SMTP_PASSWORD") {
            self.smtp.password = Some(val);
        }
        if let Ok(val) = std::env::var("MAILWATCH_RECIPIENT") {
            self.email.recipient = val;
        }
        if let Ok(val) = std::env::var("MAILWATCH_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.mqtt.broker_host.is_empty() {
            return Err(ConfigError::Validation(
                "mqtt.broker_host must not be empty".to_string(),
            ));
        }
        if self.mqtt.broker_port == 0 {
            return Err(ConfigError::Validation(
                "mqtt.broker_port must be non-zero".to_string(),
            ));
        }
        if self.ntp.server.is_empty() {
            return Err(ConfigError::Validation(
                "ntp.server must not be empty".to_string(),
            ));
        }
        if self.ntp.fast_poll_secs == 0 {
            return Err(ConfigError::Validation(
                "ntp.fast_poll_secs must be non-zero".to_string(),
            ));
        }
        if self.ntp.fast_poll_secs >= self.ntp.steady_poll_secs {
            return Err(ConfigError::Validation(
                "ntp.fast_poll_secs must be shorter than ntp.steady_poll_secs".to_string(),
            ));
        }
        if self.smtp.host.is_empty() {
            return Err(ConfigError::Validation(
                "smtp.host must not be empty".to_string(),
            ));
        }
        if self.smtp.port == 0 {
            return Err(ConfigError::Validation(
                "smtp.port must be non-zero".to_string(),
            ));
        }
        if self.email.recipient.is_empty() {
            return Err(ConfigError::Validation(
                "email.recipient must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            sender_name: "mailwatch".to_string(),
            sender: "mailwatch@localhost".to_string(),
            recipient: "root@localhost".to_string(),
            domain_suffix: "@localhost".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "mailwatchd=info,mailwatch=info".to_string(),
        }
    }
}

/// Configuration errors — the only fatal errors in the program.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.device.hostname, None);
        assert_eq!(config.mqtt.broker_host, "localhost");
        assert_eq!(config.mqtt.broker_port, 1883);
        assert_eq!(config.ntp.fast_poll_secs, 63);
        assert_eq!(config.ntp.steady_poll_secs, 3603);
        assert_eq!(config.smtp.port, 587);
        assert_eq!(config.email.sender_name, "mailwatch");
        assert_eq!(config.email.recipient, "root@localhost");
    }

    #[test]
    fn should_validate_the_defaults() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.mqtt.broker_port, 1883);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = r#"
            [device]
            hostname = "basement-watcher"

            [mqtt]
            broker_host = "broker.local"
            broker_port = 8883
            client_id = "watcher"
            keep_alive_secs = 60

            [ntp]
            server = "nl.pool.ntp.org"
            fast_poll_secs = 30
            steady_poll_secs = 1800
            timeout_millis = 800

            [smtp]
            host = "smtp.example.org"
            port = 465
            username = "watcher"
            password = "hunter2"
            tls = "tls"

            [email]
            sender_name = "Watcher"
            sender = "watcher@example.org"
            recipient = "owner@example.org"
            domain_suffix = "@example.org"

            [logging]
            filter = "debug"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.device.hostname.as_deref(), Some("basement-watcher"));
        assert_eq!(config.mqtt.broker_host, "broker.local");
        assert_eq!(config.mqtt.broker_port, 8883);
        assert_eq!(config.ntp.server, "nl.pool.ntp.org");
        assert_eq!(config.ntp.fast_poll_secs, 30);
        assert_eq!(config.smtp.port, 465);
        assert_eq!(config.smtp.username.as_deref(), Some("watcher"));
        assert_eq!(config.email.recipient, "owner@example.org");
        assert_eq!(config.email.domain_suffix, "@example.org");
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn should_parse_partial_toml_with_defaults() {
        let toml = r#"
            [email]
            recipient = "owner@example.org"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.email.recipient, "owner@example.org");
        assert_eq!(config.email.sender_name, "mailwatch");
        assert_eq!(config.mqtt.broker_port, 1883);
        assert_eq!(config.ntp.fast_poll_secs, 63);
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.mqtt.broker_port, 1883);
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }

    #[test]
    fn should_reject_zero_mqtt_port() {
        let mut config = Config::default();
        config.mqtt.broker_port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_zero_smtp_port() {
        let mut config = Config::default();
        config.smtp.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_empty_mqtt_host() {
        let mut config = Config::default();
        config.mqtt.broker_host.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_empty_ntp_server() {
        let mut config = Config::default();
        config.ntp.server.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_empty_smtp_host() {
        let mut config = Config::default();
        config.smtp.host.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_empty_recipient() {
        let mut config = Config::default();
        config.email.recipient.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_zero_fast_interval() {
        let mut config = Config::default();
        config.ntp.fast_poll_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_fast_interval_not_shorter_than_steady() {
        let mut config = Config::default();
        config.ntp.fast_poll_secs = config.ntp.steady_poll_secs;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_keep_env_free_config_unchanged_by_overrides() {
        // `std::env::set_var` is unsafe on this edition, so the positive
        // override paths are not exercised here. With no MAILWATCH_*
        // variables set, applying overrides must change nothing.
        let mut config = Config::default();
        config.apply_env_overrides();
        assert_eq!(config.mqtt.broker_host, "localhost");
        assert_eq!(config.mqtt.broker_port, 1883);
        assert_eq!(config.email.recipient, "root@localhost");
    }
}
