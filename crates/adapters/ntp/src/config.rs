//! Time synchronization configuration.

use serde::Deserialize;

/// Configuration for the SNTP polling client.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NtpConfig {
    /// Time server hostname (port 123 unless given explicitly).
    pub server: String,
    /// Polling interval in seconds until the first successful sync.
    pub fast_poll_secs: u64,
    /// Polling interval in seconds once the clock is trustworthy.
    pub steady_poll_secs: u64,
    /// Per-request timeout in milliseconds.
    pub timeout_millis: u64,
}

impl Default for NtpConfig {
    fn default() -> Self {
        Self {
            server: "pool.ntp.org".to_string(),
            // 63 s until the first sync lands, then an hour and a bit so
            // polls drift across the minute instead of piling onto :00.
            fast_poll_secs: 63,
            steady_poll_secs: 3603,
            timeout_millis: 1500,
        }
    }
}
