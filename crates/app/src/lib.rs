//! # mailwatch-app
//!
//! Application layer — the reactor loop and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `MessageBus` — drive the broker connection, subscribe to the watched topic
//!   - `TimeSync` — run periodic clock synchronization, expose the poll interval
//!   - `Notifier` — deliver one email notification
//! - Provide the **event queue**: the bounded channel of runtime events that
//!   adapters publish into
//! - Run the **reactor**: consume runtime events one at a time and perform
//!   exactly one follow-up action per event
//!
//! ## Dependency rule
//! Depends on `mailwatch-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod event_queue;
pub mod ports;
pub mod reactor;
