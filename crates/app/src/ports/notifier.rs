//! Notifier port — outbound email delivery.

use std::future::Future;

use mailwatch_domain::error::MailwatchError;
use mailwatch_domain::notification::EmailNotification;

/// Driven port for delivering one notification email.
pub trait Notifier {
    /// Deliver the notification, resolving when the transport accepts or
    /// rejects it. The reactor awaits this inline, one send at a time.
    fn send(
        &self,
        notification: EmailNotification,
    ) -> impl Future<Output = Result<(), MailwatchError>> + Send;
}
