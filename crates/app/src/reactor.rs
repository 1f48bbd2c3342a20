//! The reactor loop — dispatches runtime events to their follow-up actions.

use std::time::Duration;

use tokio::sync::mpsc;

use mailwatch_domain::event::{RuntimeEvent, SyncOutcome};
use mailwatch_domain::message::{InboundMessage, QosLevel};
use mailwatch_domain::message_id::MessageIdGenerator;
use mailwatch_domain::notification::NotificationTemplate;
use mailwatch_domain::time::TimezoneRules;

use crate::ports::{MessageBus, Notifier, TimeSync};

/// Sequential dispatcher over runtime events.
///
/// Exactly one follow-up action per event kind, fire-and-forget: failures
/// are logged and never retried, so a lost email or a failed sync never
/// stops the loop. Handlers run strictly one at a time.
pub struct Reactor<B, N, T> {
    bus: B,
    notifier: N,
    time_sync: T,
    template: NotificationTemplate,
    id_generator: MessageIdGenerator,
    timezone: TimezoneRules,
    steady_poll: Duration,
}

impl<B, N, T> Reactor<B, N, T>
where
    B: MessageBus + Send,
    N: Notifier + Send,
    T: TimeSync + Send,
{
    #[must_use]
    pub fn new(
        bus: B,
        notifier: N,
        time_sync: T,
        template: NotificationTemplate,
        id_generator: MessageIdGenerator,
        timezone: TimezoneRules,
        steady_poll: Duration,
    ) -> Self {
        Self {
            bus,
            notifier,
            time_sync,
            template,
            id_generator,
            timezone,
            steady_poll,
        }
    }

    /// Consume events until the queue closes.
    pub async fn run(mut self, mut events: mpsc::Receiver<RuntimeEvent>) {
        while let Some(event) = events.recv().await {
            self.handle_event(event).await;
        }
        tracing::debug!("event queue closed, reactor stopping");
    }

    /// Dispatch a single event.
    pub async fn handle_event(&mut self, event: RuntimeEvent) {
        match event {
            RuntimeEvent::NetworkUp => self.on_network_up().await,
            RuntimeEvent::TimeSynced(outcome) => self.on_time_synced(outcome),
            RuntimeEvent::BusConnected => self.on_bus_connected().await,
            RuntimeEvent::MessageReceived(message) => self.on_message_received(message).await,
        }
    }

    /// Connectivity established: (re)start clock sync and the bus
    /// connection. Both calls are safe to repeat when the network bounces.
    async fn on_network_up(&mut self) {
        tracing::info!("network up, starting time sync and message bus");
        if let Err(err) = self.time_sync.start().await {
            tracing::warn!(error = %err, "failed to start time sync client");
        }
        if let Err(err) = self.bus.connect().await {
            tracing::warn!(error = %err, "failed to initiate bus connection");
        }
    }

    /// Sync progress: log it, and on the first success — recognizable by
    /// the poll interval still being fast — widen the interval and reseed
    /// the message-ID generator with trusted time.
    fn on_time_synced(&mut self, outcome: SyncOutcome) {
        match outcome {
            SyncOutcome::Pending => tracing::debug!("time sync request sent"),
            SyncOutcome::Failed(err) => tracing::warn!(error = %err, "time sync failed"),
            SyncOutcome::Synced { server_time } => {
                tracing::info!(
                    local_time = %self.timezone.format_local(server_time),
                    "time synchronized"
                );
                if self.time_sync.poll_interval() < self.steady_poll {
                    self.time_sync.set_poll_interval(self.steady_poll);
                    self.id_generator
                        .reseed(server_time.timestamp().unsigned_abs());
                    tracing::info!(
                        interval_secs = self.steady_poll.as_secs(),
                        "first sync complete, switching to steady-state interval"
                    );
                }
            }
        }
    }

    /// Bus (re)connected: issue the single topic subscription. Runs on
    /// every reconnect because sessions are not persisted.
    async fn on_bus_connected(&mut self) {
        let filter = self.template.topic_filter();
        tracing::info!(topic = %filter, "bus connected, subscribing");
        if let Err(err) = self.bus.subscribe(filter, QosLevel::AtMostOnce).await {
            tracing::warn!(error = %err, topic = %filter, "subscribe failed");
        }
    }

    /// Message received: build and send exactly one notification. The send
    /// is awaited inline — nothing else is dispatched while it runs.
    async fn on_message_received(&mut self, message: InboundMessage) {
        tracing::info!(
            topic = %message.topic,
            payload_len = message.payload.len(),
            "action message received"
        );
        let suffix = self.id_generator.suffix();
        let notification = self.template.render(&message.payload_text(), &suffix);
        match self.notifier.send(notification).await {
            Ok(()) => tracing::debug!(topic = %message.topic, "notification sent"),
            Err(err) => tracing::warn!(error = %err, "failed to send notification"),
        }
    }
}
