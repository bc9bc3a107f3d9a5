//! Internet address conversion.
//!
//! Implements the `<arpa/inet.h>` conversions between human-readable IP
//! addresses and packed network-order bytes. All logic is safe Rust with no
//! syscalls. Parsing works on the borrowed text and allocates nothing;
//! formatting goes through a stack [`TextBuf`] and allocates only the
//! returned `String`.

pub mod ipv4;
pub mod ipv6;

use core::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::error::AddrError;
use crate::family::{AddressFamily, INET6_ADDRSTRLEN};

pub use ipv4::{parse_ipv4, write_ipv4};
pub use ipv6::{parse_ipv6, write_ipv6};

/// Longest text `inet_ntop` can produce, excluding the NUL.
pub const MAX_TEXT_LEN: usize = INET6_ADDRSTRLEN - 1;

// ---------------------------------------------------------------------------
// Binary address
// ---------------------------------------------------------------------------

/// A packed address whose length always matches its family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryAddress {
    V4([u8; 4]),
    V6([u8; 16]),
}

impl BinaryAddress {
    /// Validates `bytes` against `family` and copies them.
    ///
    /// Fails with [`AddrError::InvalidLength`] unless `bytes.len()` is exactly
    /// the family's binary length.
    pub fn from_slice(family: AddressFamily, bytes: &[u8]) -> Result<Self, AddrError> {
        let family = family.ensure_enabled()?;
        let invalid = || AddrError::InvalidLength {
            family,
            expected: family.binary_len(),
            actual: bytes.len(),
        };
        match family {
            AddressFamily::Inet => <[u8; 4]>::try_from(bytes)
                .map(Self::V4)
                .map_err(|_| invalid()),
            AddressFamily::Inet6 => <[u8; 16]>::try_from(bytes)
                .map(Self::V6)
                .map_err(|_| invalid()),
        }
    }

    /// The family this address belongs to.
    #[must_use]
    pub const fn family(&self) -> AddressFamily {
        match self {
            Self::V4(_) => AddressFamily::Inet,
            Self::V6(_) => AddressFamily::Inet6,
        }
    }

    /// The packed network-order bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::V4(octets) => octets,
            Self::V6(octets) => octets,
        }
    }

    /// Copies the packed bytes into a `Vec`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

impl AsRef<[u8]> for BinaryAddress {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Display for BinaryAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4(octets) => write_ipv4(f, octets),
            Self::V6(octets) => write_ipv6(f, octets),
        }
    }
}

impl From<BinaryAddress> for IpAddr {
    fn from(addr: BinaryAddress) -> Self {
        match addr {
            BinaryAddress::V4(octets) => IpAddr::V4(Ipv4Addr::from(octets)),
            BinaryAddress::V6(octets) => IpAddr::V6(Ipv6Addr::from(octets)),
        }
    }
}

impl From<IpAddr> for BinaryAddress {
    fn from(addr: IpAddr) -> Self {
        match addr {
            IpAddr::V4(v4) => Self::V4(v4.octets()),
            IpAddr::V6(v6) => Self::V6(v6.octets()),
        }
    }
}

// ---------------------------------------------------------------------------
// Bounded text buffer
// ---------------------------------------------------------------------------

/// Fixed-capacity text sink. Writes past capacity fail instead of growing.
#[derive(Debug)]
pub struct TextBuf<const N: usize> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> TextBuf<N> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buf: [0u8; N],
            len: 0,
        }
    }

    /// The text written so far.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.buf[..self.len]).ok()
    }
}

impl<const N: usize> Default for TextBuf<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Write for TextBuf<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.len.checked_add(s.len()).ok_or(fmt::Error)?;
        if end > N {
            return Err(fmt::Error);
        }
        self.buf[self.len..end].copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// pton / ntop
// ---------------------------------------------------------------------------

/// Converts `text` to a packed address of `family` with the built-in grammar.
pub fn pton(family: AddressFamily, text: &str) -> Result<BinaryAddress, AddrError> {
    let parsed = match family.ensure_enabled()? {
        AddressFamily::Inet => parse_ipv4(text).map(BinaryAddress::V4),
        AddressFamily::Inet6 => parse_ipv6(text).map(BinaryAddress::V6),
    };
    parsed.ok_or(AddrError::InvalidAddressFormat)
}

/// Converts packed `bytes` of `family` to canonical text.
pub fn ntop(family: AddressFamily, bytes: &[u8]) -> Result<String, AddrError> {
    format_address(&BinaryAddress::from_slice(family, bytes)?)
}

/// Formats an already validated address into a bounded buffer.
pub fn format_address(addr: &BinaryAddress) -> Result<String, AddrError> {
    let mut buf = TextBuf::<MAX_TEXT_LEN>::new();
    format_into(&mut buf, addr)?;
    buf.as_str()
        .map(str::to_owned)
        .ok_or(AddrError::FormatFailure)
}

/// Formats `addr` into a caller-provided bounded buffer.
///
/// Fails with [`AddrError::FormatFailure`] when the text does not fit.
pub fn format_into<const N: usize>(
    buf: &mut TextBuf<N>,
    addr: &BinaryAddress,
) -> Result<(), AddrError> {
    let written = match addr {
        BinaryAddress::V4(octets) => write_ipv4(buf, octets),
        BinaryAddress::V6(octets) => write_ipv6(buf, octets),
    };
    written.map_err(|_| AddrError::FormatFailure)
}

// ===========================================================================
// Tests
// ===========================================================================
