//! Outbound email notifications and the template that builds them.

use crate::hostname::Hostname;

/// A fully-formed outbound notification, ready for a mail transport.
///
/// Transient: constructed fresh per received message, sent, discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailNotification {
    /// Display name for the `From` header.
    pub sender_name: String,
    /// Sender address.
    pub sender: String,
    /// Recipient address.
    pub recipient: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
    /// Custom `Message-ID` header value, angle brackets included.
    pub message_id: String,
}

/// Immutable template mapping one payload to one [`EmailNotification`].
///
/// Constructed once at startup from configuration plus the derived
/// hostname; everything per-message comes in through [`render`].
///
/// [`render`]: NotificationTemplate::render
#[derive(Debug, Clone)]
pub struct NotificationTemplate {
    sender_name: String,
    sender: String,
    recipient: String,
    hostname: Hostname,
    domain_suffix: String,
    topic_filter: String,
}

impl NotificationTemplate {
    #[must_use]
    pub fn new(
        sender_name: impl Into<String>,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        hostname: Hostname,
        domain_suffix: impl Into<String>,
        topic_filter: impl Into<String>,
    ) -> Self {
        Self {
            sender_name: sender_name.into(),
            sender: sender.into(),
            recipient: recipient.into(),
            hostname,
            domain_suffix: domain_suffix.into(),
            topic_filter: topic_filter.into(),
        }
    }

    /// Topic filter quoted in every subject line — also the filter the
    /// reactor subscribes with, so the two can never drift apart.
    #[must_use]
    pub fn topic_filter(&self) -> &str {
        &self.topic_filter
    }

    /// Build the notification for one received payload.
    ///
    /// `suffix` is the random message-ID component drawn for this message.
    /// The payload goes into the body untouched — empty and multi-line
    /// payloads included.
    #[must_use]
    pub fn render(&self, payload: &str, suffix: &str) -> EmailNotification {
        EmailNotification {
            sender_name: self.sender_name.clone(),
            sender: self.sender.clone(),
            recipient: self.recipient.clone(),
            subject: format!("MQTT ({}) message.", self.topic_filter),
            body: format!(
                "MQTT message received from {}.\n\nPayload: {}\n\nGreetings, {}\n",
                self.hostname, payload, self.sender_name,
            ),
            message_id: format!("<{}.{}{}>", self.hostname, suffix, self.domain_suffix),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> NotificationTemplate {
        NotificationTemplate::new(
            "mailwatch",
            "watcher@example.org",
            "owner@example.org",
            Hostname::derive(0x00ab_cdef),
            "@example.org",
            "sensor/+/action",
        )
    }

    /// The body must contain `Payload: ` immediately followed by the
    /// payload, whatever the payload looks like.
    #[test]
    fn should_embed_payload_verbatim_after_marker() {
        for payload in ["on", "", "line one\nline two", "  spaced  "] {
            let notification = template().render(payload, "abcdefghij");
            let marker = notification
                .body
                .find("Payload: ")
                .expect("body must contain the payload marker");
            let after = &notification.body[marker + "Payload: ".len()..];
            assert!(
                after.starts_with(payload),
                "payload {payload:?} not found after marker in {:?}",
                notification.body
            );
        }
    }

    #[test]
    fn should_name_the_topic_filter_in_the_subject() {
        let notification = template().render("on", "abcdefghij");
        assert_eq!(notification.subject, "MQTT (sensor/+/action) message.");
    }

    #[test]
    fn should_quote_the_hostname_in_the_body() {
        let notification = template().render("on", "abcdefghij");
        assert!(
            notification
                .body
                .starts_with("MQTT message received from mw-abcdef.")
        );
    }

    #[test]
    fn should_assemble_message_id_from_hostname_suffix_and_domain() {
        let notification = template().render("on", "qrstuvwxyz");
        assert_eq!(notification.message_id, "<mw-abcdef.qrstuvwxyz@example.org>");
    }

    #[test]
    fn should_carry_addresses_through_unchanged() {
        let notification = template().render("on", "abcdefghij");
        assert_eq!(notification.sender, "watcher@example.org");
        assert_eq!(notification.recipient, "owner@example.org");
        assert_eq!(notification.sender_name, "mailwatch");
    }

    #[test]
    fn should_sign_off_with_the_sender_name() {
        let notification = template().render("on", "abcdefghij");
        assert!(notification.body.ends_with("Greetings, mailwatch\n"));
    }
}
