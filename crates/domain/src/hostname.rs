//! Device hostname — the identity quoted in notification bodies and
//! Message-ID headers.

use std::fmt;

/// Hostname of this device. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hostname(String);

impl Hostname {
    /// Derive the fixed-format hostname from a machine fingerprint: `mw-`
    /// followed by the low 24 bits as six lowercase hex digits.
    #[must_use]
    pub fn derive(fingerprint: u32) -> Self {
        Self(format!("mw-{:06x}", fingerprint & 0x00ff_ffff))
    }

    /// Use a configured name verbatim.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The hostname as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Hostname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
