//! SMTP transport configuration.

use serde::Deserialize;

/// How the connection to the SMTP server is secured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TlsMode {
    /// Plain connection upgraded with STARTTLS (the submission-port norm).
    #[default]
    Starttls,
    /// TLS from the first byte (implicit TLS, usually port 465).
    Tls,
    /// No encryption at all. Only sensible against a relay on localhost.
    None,
}

/// Configuration for the SMTP mail transport.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SmtpConfig {
    /// SMTP server hostname.
    pub host: String,
    /// SMTP server port.
    pub port: u16,
    /// Login username; authentication is skipped when absent.
    pub username: Option<String>,
    /// Login password.
    pub password: Option<String>,
    /// Connection security mode.
    pub tls: TlsMode,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 587,
            username: None,
            password: None,
            tls: TlsMode::Starttls,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_have_sensible_defaults() {
        let config = SmtpConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 587);
        assert_eq!(config.username, None);
        assert_eq!(config.password, None);
        assert_eq!(config.tls, TlsMode::Starttls);
    }

    #[test]
    fn should_deserialize_from_toml() {
        let toml = r#"
            host = "smtp.example.org"
            port = 465
            username = "watcher"
            password = "hunter2"
            tls = "tls"
        "#;
        let config: SmtpConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.host, "smtp.example.org");
        assert_eq!(config.port, 465);
        assert_eq!(config.username.as_deref(), Some("watcher"));
        assert_eq!(config.password.as_deref(), Some("hunter2"));
        assert_eq!(config.tls, TlsMode::Tls);
    }

    #[test]
    fn should_parse_each_tls_mode() {
        for (text, mode) in [
            ("starttls", TlsMode::Starttls),
            ("tls", TlsMode::Tls),
            ("none", TlsMode::None),
        ] {
            let config: SmtpConfig = toml::from_str(&format!("tls = \"{text}\"")).unwrap();
            assert_eq!(config.tls, mode);
        }
    }

    #[test]
    fn should_reject_unknown_tls_mode() {
        let result: Result<SmtpConfig, _> = toml::from_str(r#"tls = "ssl3""#);
        assert!(result.is_err());
    }
}
