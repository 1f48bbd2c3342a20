//! # mailwatch-adapter-smtp
//!
//! Mail adapter over [`lettre`].
//!
//! ## How it works
//!
//! [`SmtpMailer`] implements the [`Notifier`] port: it maps one
//! [`EmailNotification`] onto a lettre [`Message`] (From display name,
//! recipient, subject, custom Message-ID, plain-text body) and hands it to
//! a pooled async SMTP transport. The reactor awaits the send inline, so
//! delivery time directly delays the next event — accepted behavior.
//!
//! The transport is built once from [`SmtpConfig`]: STARTTLS on the
//! submission port by default, implicit TLS or plaintext on request, with
//! optional login credentials.
//!
//! ## Dependency rule
//! Same as the other adapters: depends on `mailwatch-app` and
//! `mailwatch-domain`.

mod config;
mod error;

pub use config::{SmtpConfig, TlsMode};
pub use error::MailerError;

use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use mailwatch_app::ports::Notifier;
use mailwatch_domain::error::MailwatchError;
use mailwatch_domain::notification::EmailNotification;

/// SMTP mail client delivering one notification per send call.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Build the transport from configuration.
    ///
    /// # Errors
    ///
    /// Fails when the relay builder rejects the host (TLS parameter setup).
    pub fn new(config: &SmtpConfig) -> Result<Self, MailerError> {
        let mut builder = match config.tls {
            TlsMode::Starttls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                    .map_err(MailerError::Transport)?
            }
            TlsMode::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .map_err(MailerError::Transport)?,
            TlsMode::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host),
        };
        builder = builder.port(config.port);
        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }
        Ok(Self {
            transport: builder.build(),
        })
    }
}

impl Notifier for SmtpMailer {
    async fn send(&self, notification: EmailNotification) -> Result<(), MailwatchError> {
        let recipient = notification.recipient.clone();
        let message = build_message(&notification)?;
        let response = self
            .transport
            .send(message)
            .await
            .map_err(|err| MailerError::Transport(err).into_domain())?;
        tracing::debug!(
            recipient = %recipient,
            code = %response.code(),
            "notification accepted by SMTP server"
        );
        Ok(())
    }
}

/// Assemble the wire message from a rendered notification.
fn build_message(notification: &EmailNotification) -> Result<Message, MailerError> {
    let sender_address = notification
        .sender
        .parse::<Address>()
        .map_err(MailerError::Address)?;
    let from = Mailbox::new(Some(notification.sender_name.clone()), sender_address);
    let to = notification
        .recipient
        .parse::<Mailbox>()
        .map_err(MailerError::Address)?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(notification.subject.clone())
        .message_id(Some(notification.message_id.clone()))
        .body(notification.body.clone())
        .map_err(MailerError::Build)
}
