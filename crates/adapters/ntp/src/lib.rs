//! # mailwatch-adapter-ntp
//!
//! Time sync adapter over [`rsntp`].
//!
//! ## How it works
//!
//! [`NtpSyncer`] implements the [`TimeSync`] port. `start` spawns a polling
//! task that, per attempt, publishes a [`SyncOutcome::Pending`] event when
//! the request goes out and then either [`SyncOutcome::Synced`] with the
//! server time or [`SyncOutcome::Failed`] with one of the four
//! [`TimeSyncError`] kinds.
//!
//! The polling interval is shared with the reactor through an atomic: the
//! task reads it before every sleep, so the reactor's widening after the
//! first successful sync takes effect from the next attempt, and a later
//! `start` (network bounce) resets it to the fast value.
//!
//! ## Dependency rule
//! Same as the other adapters: depends on `mailwatch-app` and
//! `mailwatch-domain`.

mod config;

pub use config::NtpConfig;

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use rsntp::{AsyncSntpClient, SynchronizationError};
use tokio::task::JoinHandle;

use mailwatch_app::event_queue::EventQueue;
use mailwatch_app::ports::TimeSync;
use mailwatch_domain::error::{MailwatchError, TimeSyncError};
use mailwatch_domain::event::{RuntimeEvent, SyncOutcome};

/// Periodic SNTP polling client.
pub struct NtpSyncer {
    config: NtpConfig,
    events: EventQueue,
    /// Current polling interval in milliseconds, shared with the task.
    interval_millis: Arc<AtomicU64>,
    task: Option<JoinHandle<()>>,
}

impl NtpSyncer {
    /// Create a syncer that publishes runtime events into `events`.
    ///
    /// Polling begins with [`start`].
    ///
    /// [`start`]: TimeSync::start
    #[must_use]
    pub fn new(config: NtpConfig, events: EventQueue) -> Self {
        let fast_millis = config.fast_poll_secs.saturating_mul(1000);
        Self {
            config,
            events,
            interval_millis: Arc::new(AtomicU64::new(fast_millis)),
            task: None,
        }
    }

    /// Whether the polling task is currently running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Poll the server forever, publishing one pending and one result event
    /// per attempt, until the event queue closes.
    async fn poll_loop(
        server: String,
        timeout: Duration,
        interval_millis: Arc<AtomicU64>,
        events: EventQueue,
    ) {
        let mut client = AsyncSntpClient::new();
        client.set_timeout(timeout);

        loop {
            tracing::debug!(server = %server, "time sync request");
            if events
                .publish(RuntimeEvent::TimeSynced(SyncOutcome::Pending))
                .await
                .is_err()
            {
                break;
            }

            let outcome = match client.synchronize(&server).await {
                Ok(result) => match result.datetime().into_chrono_datetime() {
                    Ok(server_time) => SyncOutcome::Synced { server_time },
                    // A reply whose timestamp does not fit a DateTime is as
                    // good as no reply at all.
                    Err(_) => SyncOutcome::Failed(TimeSyncError::MalformedResponse),
                },
                Err(err) => SyncOutcome::Failed(classify(&err)),
            };
            if events
                .publish(RuntimeEvent::TimeSynced(outcome))
                .await
                .is_err()
            {
                break;
            }

            let interval = Duration::from_millis(interval_millis.load(Ordering::Relaxed));
            tokio::time::sleep(interval).await;
        }
        tracing::debug!("event queue closed, time sync task stopping");
    }
}

impl TimeSync for NtpSyncer {
    /// (Re)start periodic synchronization at the fast polling interval.
    ///
    /// A running task is aborted first, so a network bounce restarts the
    /// fast-poll phase from scratch.
    async fn start(&mut self) -> Result<(), MailwatchError> {
        if let Some(handle) = self.task.take() {
            handle.abort();
        }
        self.interval_millis
            .store(self.config.fast_poll_secs.saturating_mul(1000), Ordering::Relaxed);

        tracing::info!(
            server = %self.config.server,
            fast_poll_secs = self.config.fast_poll_secs,
            "starting time synchronization"
        );
        self.task = Some(tokio::spawn(Self::poll_loop(
            self.config.server.clone(),
            Duration::from_millis(self.config.timeout_millis),
            Arc::clone(&self.interval_millis),
            self.events.clone(),
        )));
        Ok(())
    }

    fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.interval_millis.load(Ordering::Relaxed))
    }

    fn set_poll_interval(&mut self, interval: Duration) {
        let millis = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self.interval_millis.store(millis, Ordering::Relaxed);
    }
}

impl Drop for NtpSyncer {
    fn drop(&mut self) {
        if let Some(handle) = self.task.take() {
            handle.abort();
        }
    }
}

/// Classify a library error into one of the four sync failure kinds.
fn classify(err: &SynchronizationError) -> TimeSyncError {
    match err {
        SynchronizationError::ProtocolError(_) => TimeSyncError::MalformedResponse,
        SynchronizationError::IOError(io_err) => classify_io(io_err.kind()),
    }
}

/// Map an I/O error kind to a sync failure kind. DNS failures surface as
/// uncategorized I/O errors and land in `SendFailed`.
fn classify_io(kind: io::ErrorKind) -> TimeSyncError {
    match kind {
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => TimeSyncError::NoResponse,
        io::ErrorKind::ConnectionRefused
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::HostUnreachable
        | io::ErrorKind::NetworkUnreachable
        | io::ErrorKind::AddrNotAvailable => TimeSyncError::UnreachableAddress,
        _ => TimeSyncError::SendFailed,
    }
}
