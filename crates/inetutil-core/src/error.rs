//! Error taxonomy for address conversion.

use thiserror::Error;

use crate::errno;
use crate::family::AddressFamily;

/// Errors returned by [`parse_to_binary`](crate::parse_to_binary) and
/// [`format_to_text`](crate::format_to_text).
///
/// The first three variants are caller input errors. `ResourceExhausted` and
/// `FormatFailure` abort the current call but leave the process usable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddrError {
    #[error("{}", unsupported_family_message(.af, .reason))]
    UnsupportedFamily { af: i32, reason: &'static str },
    #[error("illegal IP address string passed to inet_pton")]
    InvalidAddressFormat,
    #[error(
        "invalid length of packed IP address string: {family} needs {expected} bytes, got {actual}"
    )]
    InvalidLength {
        family: AddressFamily,
        expected: usize,
        actual: usize,
    },
    #[error("resource exhausted while parsing address (errno {errno})")]
    ResourceExhausted { errno: i32 },
    #[error("formatting the address text failed")]
    FormatFailure,
}

/// Reason used when `AF_INET6` is requested from a build without IPv6.
pub(crate) const IPV6_DISABLED: &str = "can't use AF_INET6, IPv6 is disabled";

/// `unknown address family 99`; the IPv6-disabled message already names
/// its family.
fn unsupported_family_message(af: &i32, reason: &str) -> String {
    if reason == IPV6_DISABLED {
        reason.to_string()
    } else {
        format!("{reason} {af}")
    }
}

impl AddrError {
    /// Returns `true` for ordinary rejected input.
    ///
    /// A host bridge raises these as value errors; the rest are system errors.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFamily { .. } | Self::InvalidAddressFormat | Self::InvalidLength { .. }
        )
    }

    /// POSIX errno a C-style caller would observe for this error.
    #[must_use]
    pub const fn errno(&self) -> i32 {
        match self {
            Self::UnsupportedFamily { .. } => errno::EAFNOSUPPORT,
            Self::InvalidAddressFormat | Self::InvalidLength { .. } => errno::EINVAL,
            Self::ResourceExhausted { errno } => *errno,
            Self::FormatFailure => errno::ENOSPC,
        }
    }

    /// Stable short name of the error kind, used in fixtures and logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UnsupportedFamily { .. } => "UnsupportedFamily",
            Self::InvalidAddressFormat => "InvalidAddressFormat",
            Self::InvalidLength { .. } => "InvalidLength",
            Self::ResourceExhausted { .. } => "ResourceExhausted",
            Self::FormatFailure => "FormatFailure",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_are_recoverable() {
        assert!(
            AddrError::UnsupportedFamily {
                af: 99,
                reason: "unknown address family"
            }
            .is_recoverable()
        );
        assert!(AddrError::InvalidAddressFormat.is_recoverable());
        assert!(
            AddrError::InvalidLength {
                family: AddressFamily::Inet,
                expected: 4,
                actual: 3
            }
            .is_recoverable()
        );
    }

    #[test]
    fn system_errors_are_fatal() {
        assert!(!AddrError::ResourceExhausted { errno: errno::ENOMEM }.is_recoverable());
        assert!(!AddrError::FormatFailure.is_recoverable());
    }

    #[test]
    fn errno_mapping() {
        assert_eq!(
            AddrError::UnsupportedFamily {
                af: 1,
                reason: "unknown address family"
            }
            .errno(),
            errno::EAFNOSUPPORT
        );
        assert_eq!(AddrError::InvalidAddressFormat.errno(), errno::EINVAL);
        assert_eq!(AddrError::ResourceExhausted { errno: 5 }.errno(), 5);
        assert_eq!(AddrError::FormatFailure.errno(), errno::ENOSPC);
    }

    #[test]
    fn messages() {
        assert_eq!(
            AddrError::UnsupportedFamily {
                af: 99,
                reason: "unknown address family"
            }
            .to_string(),
            "unknown address family 99"
        );
        assert_eq!(
            AddrError::UnsupportedFamily {
                af: 10,
                reason: IPV6_DISABLED
            }
            .to_string(),
            "can't use AF_INET6, IPv6 is disabled"
        );
        assert_eq!(
            AddrError::InvalidAddressFormat.to_string(),
            "illegal IP address string passed to inet_pton"
        );
        assert_eq!(
            AddrError::InvalidLength {
                family: AddressFamily::Inet6,
                expected: 16,
                actual: 4
            }
            .to_string(),
            "invalid length of packed IP address string: AF_INET6 needs 16 bytes, got 4"
        );
    }

    #[test]
    fn kind_names() {
        assert_eq!(AddrError::InvalidAddressFormat.kind(), "InvalidAddressFormat");
        assert_eq!(AddrError::FormatFailure.kind(), "FormatFailure");
    }
}
