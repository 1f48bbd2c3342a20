//! # mailwatch-adapter-mqtt
//!
//! Message bus adapter over [`rumqttc`].
//!
//! ## How it works
//!
//! [`MqttListener`] implements the [`MessageBus`] port. The first `connect`
//! call builds the rumqttc client and spawns a background task that pumps
//! the protocol event loop forever:
//!
//! - a connection acknowledgement becomes a [`RuntimeEvent::BusConnected`],
//!   so the reactor re-issues the topic subscription after every reconnect;
//! - an incoming publish becomes a [`RuntimeEvent::MessageReceived`] with
//!   the raw payload bytes and delivery properties;
//! - everything else the broker sends is ignored.
//!
//! Reconnection is rumqttc's job: the pump keeps polling through errors,
//! pausing briefly between attempts so a dead broker does not spin the task.
//!
//! ## Dependency rule
//! Same as the other adapters: depends on `mailwatch-app` and
//! `mailwatch-domain`.

mod config;
mod error;

pub use config::MqttConfig;
pub use error::MqttError;

use std::time::Duration;

use rumqttc::{AsyncClient, Event, MqttOptions, Packet, Publish, QoS};
use tokio::task::JoinHandle;

use mailwatch_app::event_queue::EventQueue;
use mailwatch_app::ports::MessageBus;
use mailwatch_domain::error::MailwatchError;
use mailwatch_domain::event::RuntimeEvent;
use mailwatch_domain::message::{InboundMessage, QosLevel};

/// Pause between event-loop polls after a connection error.
const RECONNECT_PAUSE: Duration = Duration::from_secs(1);

/// Request queue capacity handed to the rumqttc client.
const REQUEST_CAPACITY: usize = 16;

/// Message bus client driving one MQTT broker connection.
pub struct MqttListener {
    config: MqttConfig,
    events: EventQueue,
    client: Option<AsyncClient>,
    pump: Option<JoinHandle<()>>,
}

impl MqttListener {
    /// Create a listener that publishes runtime events into `events`.
    ///
    /// Nothing happens on the network until [`connect`] is called.
    ///
    /// [`connect`]: MessageBus::connect
    #[must_use]
    pub fn new(config: MqttConfig, events: EventQueue) -> Self {
        Self {
            config,
            events,
            client: None,
            pump: None,
        }
    }

    /// Whether the background pump task is currently running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.pump.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Pump the protocol event loop, translating packets into runtime
    /// events, until the event queue closes.
    async fn pump(mut event_loop: rumqttc::EventLoop, events: EventQueue) {
        loop {
            match event_loop.poll().await {
                Ok(Event::Incoming(Packet::ConnAck(ack))) => {
                    tracing::info!(
                        session_present = ack.session_present,
                        "broker connection acknowledged"
                    );
                    if events.publish(RuntimeEvent::BusConnected).await.is_err() {
                        break;
                    }
                }
                Ok(Event::Incoming(Packet::Publish(publish))) => {
                    let message = inbound_from_publish(&publish);
                    tracing::debug!(
                        topic = %message.topic,
                        payload_len = message.payload.len(),
                        "publish received"
                    );
                    if events
                        .publish(RuntimeEvent::MessageReceived(message))
                        .await
                        .is_err()
                    {
                        break;
                    }
                }
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(error = %err, "MQTT connection error, retrying");
                    tokio::time::sleep(RECONNECT_PAUSE).await;
                }
            }
        }
        tracing::debug!("event queue closed, MQTT pump stopping");
    }
}

impl MessageBus for MqttListener {
    /// Start driving the broker connection.
    ///
    /// Re-entrant: while the pump task is alive this is a no-op, because
    /// rumqttc owns reconnection and a second client would fight the first.
    async fn connect(&mut self) -> Result<(), MailwatchError> {
        if self.is_running() {
            tracing::debug!("MQTT pump already running, connect is a no-op");
            return Ok(());
        }

        let mut options = MqttOptions::new(
            self.config.client_id.clone(),
            self.config.broker_host.clone(),
            self.config.broker_port,
        );
        options.set_keep_alive(Duration::from_secs(u64::from(self.config.keep_alive_secs)));
        // Clean sessions: the broker holds nothing between connects, so the
        // reactor re-subscribes on every BusConnected event.
        options.set_clean_session(true);

        let (client, event_loop) = AsyncClient::new(options, REQUEST_CAPACITY);
        tracing::info!(
            host = %self.config.broker_host,
            port = self.config.broker_port,
            client_id = %self.config.client_id,
            "connecting to MQTT broker"
        );

        self.client = Some(client);
        self.pump = Some(tokio::spawn(Self::pump(event_loop, self.events.clone())));
        Ok(())
    }

    async fn subscribe(&mut self, filter: &str, qos: QosLevel) -> Result<(), MailwatchError> {
        let client = self.client.as_ref().ok_or(MqttError::NotConnected)?;
        client
            .subscribe(filter, to_protocol_qos(qos))
            .await
            .map_err(|err| MqttError::Client(err).into_domain())
    }
}

impl Drop for MqttListener {
    fn drop(&mut self) {
        if let Some(handle) = self.pump.take() {
            handle.abort();
        }
    }
}

/// Translate an incoming publish packet into a domain message.
fn inbound_from_publish(publish: &Publish) -> InboundMessage {
    InboundMessage {
        topic: publish.topic.clone(),
        payload: publish.payload.to_vec(),
        qos: from_protocol_qos(publish.qos),
        dup: publish.dup,
        retain: publish.retain,
    }
}

fn to_protocol_qos(qos: QosLevel) -> QoS {
    match qos {
        QosLevel::AtMostOnce => QoS::AtMostOnce,
        QosLevel::AtLeastOnce => QoS::AtLeastOnce,
        QosLevel::ExactlyOnce => QoS::ExactlyOnce,
    }
}

fn from_protocol_qos(qos: QoS) -> QosLevel {
    match qos {
        QoS::AtMostOnce => QosLevel::AtMostOnce,
        QoS::AtLeastOnce => QosLevel::AtLeastOnce,
        QoS::ExactlyOnce => QosLevel::ExactlyOnce,
    }
}
