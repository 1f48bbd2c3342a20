//! Common error types used across the workspace.

/// Top-level error crossing port boundaries.
///
/// Adapters define their own typed errors and convert into this enum at the
/// port boundary, wrapping the original error as a boxed source.
#[derive(Debug, thiserror::Error)]
pub enum MailwatchError {
    /// A time synchronization attempt failed.
    #[error("time synchronization failed")]
    TimeSync(#[from] TimeSyncError),

    /// Message bus failure (connect, subscribe, transport).
    #[error("message bus error")]
    Bus(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// An email notification could not be built or delivered.
    #[error("notification error")]
    Notify(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The runtime event queue is closed — the reactor is gone and the
    /// process is shutting down.
    #[error("event queue closed")]
    QueueClosed,
}

/// The four ways a time synchronization attempt can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TimeSyncError {
    /// The server did not answer within the timeout.
    #[error("no response from time server")]
    NoResponse,

    /// The server address is not reachable.
    #[error("time server address not reachable")]
    UnreachableAddress,

    /// Sending the request failed.
    #[error("failed to send time sync request")]
    SendFailed,

    /// The reply arrived but did not pass validation.
    #[error("malformed time server response")]
    MalformedResponse,
}
