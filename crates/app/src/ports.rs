//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the reactor and the adapter
//! layer can depend on them without creating circular dependencies.

pub mod message_bus;
pub mod notifier;
pub mod time_sync;

pub use message_bus::MessageBus;
pub use notifier::Notifier;
pub use time_sync::TimeSync;
