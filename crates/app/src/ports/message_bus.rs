//! Message bus port — broker connection and topic subscription.

use std::future::Future;

use mailwatch_domain::error::MailwatchError;
use mailwatch_domain::message::QosLevel;

/// Driven port for the asynchronous publish/subscribe client.
///
/// Incoming activity (connection acknowledged, message received) reaches
/// the application through the event queue; this trait covers the calls the
/// reactor makes in the other direction.
pub trait MessageBus {
    /// Start driving the broker connection.
    ///
    /// Called on every network-up event, so it must tolerate re-entry: an
    /// implementation that is already running treats the call as a no-op
    /// and leaves reconnection to the underlying client.
    fn connect(&mut self) -> impl Future<Output = Result<(), MailwatchError>> + Send;

    /// Subscribe to `filter` at the given quality-of-service level.
    fn subscribe(
        &mut self,
        filter: &str,
        qos: QosLevel,
    ) -> impl Future<Output = Result<(), MailwatchError>> + Send;
}
