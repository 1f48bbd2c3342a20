//! # mailwatchd — MQTT → email notification daemon
//!
//! Composition root that wires the adapters to the reactor and runs it.
//!
//! ## Responsibilities
//! - Load and validate configuration (`mailwatch.toml` + env overrides)
//! - Initialize structured logging
//! - Resolve the device hostname and build the notification template
//! - Construct the event queue, the three adapters, and the reactor
//! - Emit the initial network-up event (the host link is assumed up at
//!   process start) and run until the queue closes or a signal arrives
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;
mod hostname;

use std::time::Duration;

use mailwatch_adapter_mqtt::MqttListener;
use mailwatch_adapter_ntp::NtpSyncer;
use mailwatch_adapter_smtp::SmtpMailer;
use mailwatch_app::event_queue::EventQueue;
use mailwatch_app::reactor::Reactor;
use mailwatch_domain::event::RuntimeEvent;
use mailwatch_domain::message::ACTION_TOPIC_FILTER;
use mailwatch_domain::message_id::MessageIdGenerator;
use mailwatch_domain::notification::NotificationTemplate;
use mailwatch_domain::time::TimezoneRules;

use config::Config;

/// Events buffered while the reactor is busy (a send in flight).
const EVENT_QUEUE_CAPACITY: usize = 256;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    init_tracing(&config.logging.filter);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "mailwatchd starting"
    );

    let hostname = hostname::resolve(&config.device);
    tracing::info!(hostname = %hostname, topic = ACTION_TOPIC_FILTER, "watching");

    let template = NotificationTemplate::new(
        config.email.sender_name.clone(),
        config.email.sender.clone(),
        config.email.recipient.clone(),
        hostname,
        config.email.domain_suffix.clone(),
        ACTION_TOPIC_FILTER,
    );

    let (events, receiver) = EventQueue::bounded(EVENT_QUEUE_CAPACITY);
    let bus = MqttListener::new(config.mqtt.clone(), events.clone());
    let notifier = SmtpMailer::new(&config.smtp)?;
    let time_sync = NtpSyncer::new(config.ntp.clone(), events.clone());
    let steady_poll = Duration::from_secs(config.ntp.steady_poll_secs);

    let reactor = Reactor::new(
        bus,
        notifier,
        time_sync,
        template,
        MessageIdGenerator::new(),
        TimezoneRules::central_europe(),
        steady_poll,
    );

    // A daemon has no link-association callback: connectivity is assumed
    // established at startup, and this event starts the services.
    events.publish(RuntimeEvent::NetworkUp).await?;

    tokio::select! {
        () = reactor.run(receiver) => {
            tracing::info!("event queue closed, exiting");
        }
        () = shutdown_signal() => {
            tracing::info!("shutdown signal received, exiting");
        }
    }
    Ok(())
}

fn init_tracing(filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_new(filter)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Resolve on SIGINT or SIGTERM.
async fn shutdown_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "cannot listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
