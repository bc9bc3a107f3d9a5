//! Parsing strategies.
//!
//! Two implementations of the same contract:
//! - [`NativeBackend`]: the pure Rust grammar in [`crate::inet`].
//! - [`ResolverBackend`]: delegates to a platform numeric-address primitive
//!   (`getaddrinfo` with `AI_NUMERICHOST`, `WSAStringToAddress`, ...) through
//!   the [`NumericResolver`] trait.
//!
//! Formatting is always done by the built-in canonical formatter.

use std::ffi::{CStr, CString};

use thiserror::Error;

use crate::errno;
use crate::error::AddrError;
use crate::family::AddressFamily;
use crate::inet::{self, BinaryAddress};

/// A `pton`/`ntop` implementation.
pub trait AddressBackend {
    /// Short identifier used in reports and logs.
    fn name(&self) -> &'static str;

    /// Parses `text` under the grammar of `family`.
    fn parse(&self, family: AddressFamily, text: &str) -> Result<BinaryAddress, AddrError>;

    /// Formats packed `bytes` of `family` canonically.
    fn format(&self, family: AddressFamily, bytes: &[u8]) -> Result<String, AddrError> {
        inet::ntop(family, bytes)
    }

    /// Raw-family `inet_pton`: converts the `AF_*` code, then parses.
    fn pton(&self, af: i32, text: &str) -> Result<Vec<u8>, AddrError> {
        let family = AddressFamily::from_raw(af)?;
        self.parse(family, text).map(|addr| addr.to_vec())
    }

    /// Raw-family `inet_ntop`: converts the `AF_*` code, then formats.
    fn ntop(&self, af: i32, bytes: &[u8]) -> Result<String, AddrError> {
        let family = AddressFamily::from_raw(af)?;
        self.format(family, bytes)
    }
}

// ---------------------------------------------------------------------------
// Native
// ---------------------------------------------------------------------------

/// The built-in grammar. Always available.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeBackend;

impl AddressBackend for NativeBackend {
    fn name(&self) -> &'static str {
        "native"
    }

    fn parse(&self, family: AddressFamily, text: &str) -> Result<BinaryAddress, AddrError> {
        inet::pton(family, text)
    }
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

/// Outcome of a failed platform numeric lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The text is not a numeric address (`WSAEINVAL`, `EAI_NONAME`).
    #[error("not a numeric address")]
    InvalidArgument,
    /// The platform could not allocate (`EAI_MEMORY`, `WSAENOBUFS`).
    #[error("out of memory")]
    NoMemory,
    /// The platform does not support the family (`EAI_FAMILY`, `WSAEAFNOSUPPORT`).
    #[error("address family not supported by resolver")]
    FamilyNotSupported,
    /// Any other platform failure, carrying its errno or Winsock code.
    #[error("resolver system error (errno {0})")]
    System(i32),
}

impl ResolveError {
    /// Maps a resolver failure onto the codec taxonomy.
    ///
    /// Invalid input stays a value error; only genuine system failures become
    /// `ResourceExhausted`.
    #[must_use]
    pub fn into_addr_error(self, family: AddressFamily) -> AddrError {
        match self {
            Self::InvalidArgument => AddrError::InvalidAddressFormat,
            Self::NoMemory => AddrError::ResourceExhausted {
                errno: errno::ENOMEM,
            },
            Self::FamilyNotSupported => AddrError::UnsupportedFamily {
                af: family.raw(),
                reason: "address family not supported by resolver",
            },
            Self::System(code) => AddrError::ResourceExhausted { errno: code },
        }
    }
}

/// A platform primitive that converts one numeric address literal.
///
/// Implementations must never consult DNS, hosts files or service tables:
/// exactly one numeric match of `family`, or an error.
pub trait NumericResolver {
    fn resolve_numeric(
        &self,
        family: AddressFamily,
        text: &CStr,
    ) -> Result<BinaryAddress, ResolveError>;
}

impl<R: NumericResolver + ?Sized> NumericResolver for &R {
    fn resolve_numeric(
        &self,
        family: AddressFamily,
        text: &CStr,
    ) -> Result<BinaryAddress, ResolveError> {
        (**self).resolve_numeric(family, text)
    }
}

/// Parses by delegating to a [`NumericResolver`].
///
/// Input is screened lexically before it reaches the resolver, so anything
/// that could be read as a hostname (or as a legacy `inet_aton` form such
/// as `127.1` or `0x7f.0.0.1`) is rejected without a platform call.
#[derive(Debug, Clone, Default)]
pub struct ResolverBackend<R> {
    resolver: R,
}

impl<R: NumericResolver> ResolverBackend<R> {
    #[must_use]
    pub const fn new(resolver: R) -> Self {
        Self { resolver }
    }

    /// The wrapped resolver.
    #[must_use]
    pub fn resolver(&self) -> &R {
        &self.resolver
    }
}

impl<R: NumericResolver> AddressBackend for ResolverBackend<R> {
    fn name(&self) -> &'static str {
        "resolver"
    }

    fn parse(&self, family: AddressFamily, text: &str) -> Result<BinaryAddress, AddrError> {
        let family = family.ensure_enabled()?;
        if !is_numeric_literal(family, text) {
            return Err(AddrError::InvalidAddressFormat);
        }
        let owned = duplicate_input(text)?;
        let addr = self
            .resolver
            .resolve_numeric(family, &owned)
            .map_err(|err| err.into_addr_error(family))?;
        // A resolver answering with another family is a platform fault.
        if addr.family() != family {
            return Err(AddrError::InvalidAddressFormat);
        }
        Ok(addr)
    }
}

/// Copies `text` into an owned NUL-terminated buffer.
///
/// Allocation failure is reported instead of aborting; an interior NUL can
/// never be part of an address.
pub fn duplicate_input(text: &str) -> Result<CString, AddrError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(text.len() + 1)
        .map_err(|_| AddrError::ResourceExhausted {
            errno: errno::ENOMEM,
        })?;
    buf.extend_from_slice(text.as_bytes());
    CString::new(buf).map_err(|_| AddrError::InvalidAddressFormat)
}

/// Lexical screen for numeric address literals.
///
/// IPv4 must be a dotted quad of 1-3 digit parts without leading zeros.
/// IPv6 may only contain hex digits, `:` and `.`, must contain a `:`, and a
/// dotted tail must itself be a dotted quad. Value ranges are left to the
/// resolver.
#[must_use]
pub fn is_numeric_literal(family: AddressFamily, text: &str) -> bool {
    if text.is_empty() || text.len() > family.max_text_len() {
        return false;
    }
    match family {
        AddressFamily::Inet => inet::ipv4::is_dotted_quad_shape(text),
        AddressFamily::Inet6 => {
            if !text
                .bytes()
                .all(|b| b.is_ascii_hexdigit() || b == b':' || b == b'.')
            {
                return false;
            }
            let Some(last_colon) = text.rfind(':') else {
                return false;
            };
            let tail = &text[last_colon + 1..];
            !tail.contains('.') || inet::ipv4::is_dotted_quad_shape(tail)
        }
    }
}
