//! Address families understood by the codec.
//!
//! IPv6 support is a build-time capability (`ipv6` feature). When it is
//! compiled out, `AF_INET6` is rejected exactly like an unknown family.

use core::fmt;

use crate::error::{AddrError, IPV6_DISABLED};

/// IPv4 Internet protocols.
pub const AF_INET: i32 = 2;
/// IPv6 Internet protocols.
pub const AF_INET6: i32 = 10;

/// Buffer size for IPv4 text including the terminating NUL.
pub const INET_ADDRSTRLEN: usize = 16;
/// Buffer size for IPv6 text including the terminating NUL.
pub const INET6_ADDRSTRLEN: usize = 46;

/// Returns `true` when the crate was built with IPv6 support.
#[inline]
#[must_use]
pub const fn ipv6_enabled() -> bool {
    cfg!(feature = "ipv6")
}

/// An IP address family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    /// IPv4: 4-byte binary form, dotted-decimal text.
    Inet,
    /// IPv6: 16-byte binary form, colon-hex text.
    Inet6,
}

impl AddressFamily {
    /// Converts a raw `AF_*` code.
    ///
    /// Fails with [`AddrError::UnsupportedFamily`] for any other code, and for
    /// `AF_INET6` when IPv6 is disabled.
    pub fn from_raw(af: i32) -> Result<Self, AddrError> {
        let family = match af {
            AF_INET => Self::Inet,
            AF_INET6 => Self::Inet6,
            _ => {
                return Err(AddrError::UnsupportedFamily {
                    af,
                    reason: "unknown address family",
                });
            }
        };
        family.ensure_enabled()
    }

    /// Returns `self` if the family is usable in this build.
    pub fn ensure_enabled(self) -> Result<Self, AddrError> {
        match self {
            Self::Inet6 if !ipv6_enabled() => Err(AddrError::UnsupportedFamily {
                af: AF_INET6,
                reason: IPV6_DISABLED,
            }),
            _ => Ok(self),
        }
    }

    /// The raw `AF_*` code.
    #[must_use]
    pub const fn raw(self) -> i32 {
        match self {
            Self::Inet => AF_INET,
            Self::Inet6 => AF_INET6,
        }
    }

    /// Exact length of the packed binary form.
    #[must_use]
    pub const fn binary_len(self) -> usize {
        match self {
            Self::Inet => 4,
            Self::Inet6 => 16,
        }
    }

    /// Longest canonical or accepted text form, excluding the NUL.
    #[must_use]
    pub const fn max_text_len(self) -> usize {
        match self {
            Self::Inet => INET_ADDRSTRLEN - 1,
            Self::Inet6 => INET6_ADDRSTRLEN - 1,
        }
    }

    /// Symbolic name (`AF_INET` / `AF_INET6`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Inet => "AF_INET",
            Self::Inet6 => "AF_INET6",
        }
    }

    /// Parse from a loose textual name (case-insensitive).
    ///
    /// Accepts `inet`, `ipv4`, `v4`, `af_inet`, `2` and the IPv6 equivalents.
    #[must_use]
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inet" | "ipv4" | "v4" | "4" | "af_inet" | "2" => Some(Self::Inet),
            "inet6" | "ipv6" | "v6" | "6" | "af_inet6" | "10" => Some(Self::Inet6),
            _ => None,
        }
    }
}

impl TryFrom<i32> for AddressFamily {
    type Error = AddrError;

    fn try_from(af: i32) -> Result<Self, Self::Error> {
        Self::from_raw(af)
    }
}

impl From<AddressFamily> for i32 {
    fn from(family: AddressFamily) -> Self {
        family.raw()
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
