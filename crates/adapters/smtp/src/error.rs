//! Mail adapter error types.

use mailwatch_domain::error::MailwatchError;

/// Errors specific to the SMTP adapter.
#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    /// A sender or recipient address did not parse.
    #[error("invalid email address")]
    Address(#[source] lettre::address::AddressError),

    /// The message could not be assembled.
    #[error("failed to build email message")]
    Build(#[source] lettre::error::Error),

    /// The SMTP transport rejected the connection or the message.
    #[error("SMTP transport error")]
    Transport(#[source] lettre::transport::smtp::Error),
}

impl MailerError {
    /// Convert into a [`MailwatchError::Notify`] for propagation across the
    /// port boundary.
    #[must_use]
    pub fn into_domain(self) -> MailwatchError {
        MailwatchError::Notify(Box::new(self))
    }
}

impl From<MailerError> for MailwatchError {
    fn from(err: MailerError) -> Self {
        err.into_domain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lettre::Address;

    #[test]
    fn should_display_address_error() {
        let parse_err = "not an address".parse::<Address>().unwrap_err();
        let err = MailerError::Address(parse_err);
        assert_eq!(err.to_string(), "invalid email address");
    }

    #[test]
    fn should_convert_into_notify_error() {
        let parse_err = "@@".parse::<Address>().unwrap_err();
        let err: MailwatchError = MailerError::Address(parse_err).into();
        assert!(matches!(err, MailwatchError::Notify(_)));
    }

    #[test]
    fn should_keep_the_adapter_error_as_source() {
        use std::error::Error;

        let parse_err = "@@".parse::<Address>().unwrap_err();
        let err = MailerError::Address(parse_err).into_domain();
        let source = err.source().expect("notify error must carry a source");
        assert_eq!(source.to_string(), "invalid email address");
    }
}
