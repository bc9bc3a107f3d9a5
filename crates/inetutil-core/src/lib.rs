//! # inetutil-core
//!
//! Conversion between textual and packed binary IP addresses.
//!
//! This crate provides the two `<arpa/inet.h>` style conversions,
//! `inet_pton` and `inet_ntop`, as safe Rust functions returning typed
//! errors. Parsing is strict (no octal, no hex IPv4 parts, no zone ids) and
//! formatting is canonical (lowercase, longest zero run compressed).
//!
//! Parsing can be delegated to a platform numeric resolver through
//! [`backend::ResolverBackend`]; the pure Rust grammar lives in
//! [`backend::NativeBackend`]. Both satisfy the same contract.

#![deny(unsafe_code)]

pub mod backend;
pub mod errno;
pub mod error;
pub mod family;
pub mod inet;

pub use backend::{AddressBackend, NativeBackend, NumericResolver, ResolveError, ResolverBackend};
pub use error::AddrError;
pub use family::{AF_INET, AF_INET6, AddressFamily};
pub use inet::BinaryAddress;

/// Parses `text` as an address of `family` using the built-in grammar.
pub fn parse_to_binary(family: AddressFamily, text: &str) -> Result<BinaryAddress, AddrError> {
    NativeBackend.parse(family, text)
}

/// Formats a packed address of `family` in canonical text form.
pub fn format_to_text(family: AddressFamily, bytes: &[u8]) -> Result<String, AddrError> {
    NativeBackend.format(family, bytes)
}

/// Raw-family variant of [`parse_to_binary`], taking an `AF_*` code.
pub fn inet_pton(af: i32, text: &str) -> Result<Vec<u8>, AddrError> {
    NativeBackend.pton(af, text)
}

/// Raw-family variant of [`format_to_text`], taking an `AF_*` code.
pub fn inet_ntop(af: i32, bytes: &[u8]) -> Result<String, AddrError> {
    NativeBackend.ntop(af, bytes)
}
