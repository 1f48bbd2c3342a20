//! Runtime events — the typed signals the reactor loop consumes.

use crate::error::TimeSyncError;
use crate::message::InboundMessage;
use crate::time::Timestamp;

/// One asynchronous occurrence the reactor reacts to.
///
/// Produced by the adapters' background tasks (and by the composition root
/// for [`RuntimeEvent::NetworkUp`]), queued on a bounded channel, and
/// consumed exactly once, in publication order, by the reactor.
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeEvent {
    /// Network connectivity is established; services may start.
    NetworkUp,
    /// A time synchronization attempt made progress.
    TimeSynced(SyncOutcome),
    /// The message bus (re)connected; the subscription must be (re)issued.
    BusConnected,
    /// A message arrived on the watched topic.
    MessageReceived(InboundMessage),
}

/// Progress of a single time-synchronization attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    /// The request was sent; no response yet.
    Pending,
    /// The clock was synchronized.
    Synced {
        /// Authoritative wall-clock time reported by the server.
        server_time: Timestamp,
    },
    /// The attempt failed.
    Failed(TimeSyncError),
}

impl SyncOutcome {
    /// Whether this outcome reports a completed, successful synchronization.
    #[must_use]
    pub fn is_synced(&self) -> bool {
        matches!(self, Self::Synced { .. })
    }
}
