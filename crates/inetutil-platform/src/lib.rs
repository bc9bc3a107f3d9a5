//! # inetutil-platform
//!
//! Platform boundary for inetutil. Hosts the numeric resolvers
//! (`getaddrinfo` on unix, `WSAStringToAddressA` on Windows) and picks the
//! default parsing strategy at build time:
//!
//! - default: [`NativeBackend`], the built-in grammar.
//! - `resolver-fallback`: [`ResolverBackend`] over [`PlatformResolver`].
//!
//! Both strategies share the same contract and the same canonical formatter.

#[cfg(unix)]
pub mod getaddrinfo;
pub mod strategy;
#[cfg(windows)]
pub mod winsock;

#[cfg(unix)]
pub use getaddrinfo::GetAddrInfoResolver;
pub use strategy::Strategy;
#[cfg(windows)]
pub use winsock::WsaStringResolver;

pub use inetutil_core::{
    AF_INET, AF_INET6, AddrError, AddressBackend, AddressFamily, BinaryAddress, NativeBackend,
    ResolverBackend,
};

/// This platform's numeric resolver.
#[cfg(unix)]
pub type PlatformResolver = GetAddrInfoResolver;

/// This platform's numeric resolver.
#[cfg(windows)]
pub type PlatformResolver = WsaStringResolver;

/// Backend behind the crate-level conversion functions.
#[cfg(all(any(unix, windows), feature = "resolver-fallback"))]
pub type DefaultBackend = ResolverBackend<PlatformResolver>;

/// Backend behind the crate-level conversion functions.
#[cfg(not(all(any(unix, windows), feature = "resolver-fallback")))]
pub type DefaultBackend = NativeBackend;

/// The build's default backend.
#[must_use]
pub fn default_backend() -> DefaultBackend {
    DefaultBackend::default()
}

/// Parses `text` with the build's default strategy.
pub fn parse_to_binary(family: AddressFamily, text: &str) -> Result<BinaryAddress, AddrError> {
    default_backend().parse(family, text)
}

/// Formats `bytes` canonically.
pub fn format_to_text(family: AddressFamily, bytes: &[u8]) -> Result<String, AddrError> {
    default_backend().format(family, bytes)
}

/// Raw-family `inet_pton` with the build's default strategy.
pub fn inet_pton(af: i32, text: &str) -> Result<Vec<u8>, AddrError> {
    default_backend().pton(af, text)
}

/// Raw-family `inet_ntop`.
pub fn inet_ntop(af: i32, bytes: &[u8]) -> Result<String, AddrError> {
    default_backend().ntop(af, bytes)
}
