//! # mailwatch-domain
//!
//! Pure domain model for the mailwatch notification daemon.
//!
//! ## Responsibilities
//! - Foundational types: errors, timestamps, the device hostname
//! - Define **runtime events** — the typed signals the reactor dispatches on
//! - Define **inbound messages** (topic, payload, delivery properties)
//! - Build **email notifications** from inbound payloads (template + Message-ID)
//! - Generate the random **message-ID suffix** (seedable, reseeded on first sync)
//! - **Timezone rules** for formatting log timestamps in local time
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod event;
pub mod hostname;
pub mod message;
pub mod message_id;
pub mod notification;
pub mod time;
