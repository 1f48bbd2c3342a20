//! Time sync port — periodic clock synchronization.

use std::future::Future;
use std::time::Duration;

use mailwatch_domain::error::MailwatchError;

/// Driven port for the periodic clock-synchronization client.
///
/// Attempt outcomes are reported through the event queue; the reactor
/// steers the polling cadence through this trait.
pub trait TimeSync {
    /// (Re)start periodic synchronization at the fast polling interval.
    ///
    /// Called on every network-up event: a running implementation restarts
    /// its polling task and returns to the fast interval.
    fn start(&mut self) -> impl Future<Output = Result<(), MailwatchError>> + Send;

    /// Interval currently used between synchronization attempts.
    fn poll_interval(&self) -> Duration;

    /// Change the interval used between synchronization attempts. Takes
    /// effect from the next attempt.
    fn set_poll_interval(&mut self, interval: Duration);
}
