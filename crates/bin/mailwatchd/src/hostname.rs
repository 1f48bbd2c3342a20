//! Hostname resolution — configured name or machine-fingerprint derivation.
//!
//! The derived name folds a machine-unique identifier (`/etc/machine-id`)
//! into the fixed `mw-xxxxxx` format. A configured name always wins.

use std::path::Path;

use mailwatch_domain::hostname::Hostname;

use crate::config::DeviceConfig;

const MACHINE_ID_PATH: &str = "/etc/machine-id";

/// Resolve the device hostname once at startup.
pub fn resolve(config: &DeviceConfig) -> Hostname {
    if let Some(name) = config.hostname.as_deref()
        && !name.is_empty()
    {
        return Hostname::named(name);
    }
    match fingerprint_from_file(Path::new(MACHINE_ID_PATH)) {
        Some(fingerprint) => Hostname::derive(fingerprint),
        None => {
            // No machine id (containers, exotic distros): the process id
            // still yields a usable, if less stable, name.
            tracing::warn!(path = MACHINE_ID_PATH, "machine id unreadable, using process id");
            Hostname::derive(std::process::id())
        }
    }
}

/// Fold the machine-id file into a fingerprint. `None` when the file is
/// missing, unreadable, or blank.
fn fingerprint_from_file(path: &Path) -> Option<u32> {
    let content = std::fs::read_to_string(path).ok()?;
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(fold(trimmed))
}

/// Deterministic 32-bit fold of an identifier string.
fn fold(text: &str) -> u32 {
    text.bytes()
        .fold(0u32, |acc, byte| acc.wrapping_mul(31).wrapping_add(u32::from(byte)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_prefer_the_configured_name() {
        let config = DeviceConfig {
            hostname: Some("basement-watcher".to_string()),
        };
        assert_eq!(resolve(&config).as_str(), "basement-watcher");
    }

    #[test]
    fn should_derive_when_the_configured_name_is_empty() {
        let config = DeviceConfig {
            hostname: Some(String::new()),
        };
        assert!(resolve(&config).as_str().starts_with("mw-"));
    }

    #[test]
    fn should_always_derive_the_fixed_format() {
        let config = DeviceConfig::default();
        let hostname = resolve(&config);
        let suffix = hostname.as_str().strip_prefix("mw-").unwrap();
        assert_eq!(suffix.len(), 6);
        assert!(
            suffix
                .chars()
                .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
        );
    }

    #[test]
    fn should_fold_deterministically() {
        assert_eq!(fold("abc123"), fold("abc123"));
        assert_ne!(fold("abc123"), fold("abc124"));
    }

    #[test]
    fn should_return_none_for_missing_file() {
        assert_eq!(
            fingerprint_from_file(Path::new("/nonexistent/machine-id")),
            None
        );
    }
}
