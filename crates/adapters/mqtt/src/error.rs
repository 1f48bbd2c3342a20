//! Message bus adapter error types.

use mailwatch_domain::error::MailwatchError;

/// Errors specific to the MQTT adapter.
#[derive(Debug, thiserror::Error)]
pub enum MqttError {
    /// No connection has been initiated yet; [`connect`] must run first.
    ///
    /// [`connect`]: mailwatch_app::ports::MessageBus::connect
    #[error("MQTT client not connected")]
    NotConnected,

    /// The rumqttc client returned an error.
    #[error("MQTT client error")]
    Client(#[source] rumqttc::ClientError),
}

impl MqttError {
    /// Convert into a [`MailwatchError::Bus`] for propagation across the
    /// port boundary.
    #[must_use]
    pub fn into_domain(self) -> MailwatchError {
        MailwatchError::Bus(Box::new(self))
    }
}

impl From<MqttError> for MailwatchError {
    fn from(err: MqttError) -> Self {
        err.into_domain()
    }
}
