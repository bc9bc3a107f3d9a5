//! Parsing strategy selection.
//!
//! The compiled default follows the `resolver-fallback` feature. Callers that
//! pick a strategy at run time (the harness, benches) go through
//! [`Strategy::backend`], which reports `None` when the platform cannot
//! provide the requested one.

use std::fmt;

use inetutil_core::{AddressBackend, NativeBackend};

/// Which implementation performs `pton`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Built-in grammar.
    Native,
    /// Platform numeric resolver.
    Resolver,
}

impl Strategy {
    pub const ALL: [Self; 2] = [Self::Native, Self::Resolver];

    /// Parse from string (case-insensitive). Unknown names yield `None`.
    #[must_use]
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "native" | "builtin" | "rust" => Some(Self::Native),
            "resolver" | "platform" | "system" | "getaddrinfo" | "winsock" => Some(Self::Resolver),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Resolver => "resolver",
        }
    }

    /// Strategy used by the crate-level conversion functions.
    #[must_use]
    pub const fn compiled_default() -> Self {
        if cfg!(all(any(unix, windows), feature = "resolver-fallback")) {
            Self::Resolver
        } else {
            Self::Native
        }
    }

    /// Whether this build can run the strategy.
    #[must_use]
    pub const fn available(self) -> bool {
        match self {
            Self::Native => true,
            Self::Resolver => cfg!(any(unix, windows)),
        }
    }

    /// Instantiates the backend, or `None` if it is not available here.
    #[must_use]
    pub fn backend(self) -> Option<Box<dyn AddressBackend + Send + Sync>> {
        match self {
            Self::Native => Some(Box::new(NativeBackend)),
            Self::Resolver => resolver_backend(),
        }
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Self::compiled_default()
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(any(unix, windows))]
fn resolver_backend() -> Option<Box<dyn AddressBackend + Send + Sync>> {
    use inetutil_core::ResolverBackend;

    use crate::PlatformResolver;

    Some(Box::new(ResolverBackend::new(PlatformResolver::default())))
}

#[cfg(not(any(unix, windows)))]
fn resolver_backend() -> Option<Box<dyn AddressBackend + Send + Sync>> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_strategy_names() {
        assert_eq!(Strategy::from_str_loose("native"), Some(Strategy::Native));
        assert_eq!(Strategy::from_str_loose("NATIVE"), Some(Strategy::Native));
        assert_eq!(Strategy::from_str_loose(" rust "), Some(Strategy::Native));
        assert_eq!(
            Strategy::from_str_loose("resolver"),
            Some(Strategy::Resolver)
        );
        assert_eq!(
            Strategy::from_str_loose("getaddrinfo"),
            Some(Strategy::Resolver)
        );
        assert_eq!(Strategy::from_str_loose("bogus"), None);
        assert_eq!(Strategy::from_str_loose(""), None);
    }

    #[test]
    fn names_round_trip() {
        for strategy in Strategy::ALL {
            assert_eq!(Strategy::from_str_loose(strategy.name()), Some(strategy));
            assert_eq!(strategy.to_string(), strategy.name());
        }
    }

    #[test]
    fn default_matches_feature() {
        let expected = if cfg!(all(any(unix, windows), feature = "resolver-fallback")) {
            Strategy::Resolver
        } else {
            Strategy::Native
        };
        assert_eq!(Strategy::default(), expected);
        assert!(Strategy::default().available());
    }

    #[test]
    fn native_is_always_available() {
        assert!(Strategy::Native.available());
        let backend = Strategy::Native.backend().unwrap();
        assert_eq!(backend.name(), "native");
    }

    #[test]
    fn backend_presence_follows_availability() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.backend().is_some(), strategy.available());
        }
    }

    #[cfg(any(unix, windows))]
    #[test]
    fn resolver_backend_names_itself() {
        let backend = Strategy::Resolver.backend().unwrap();
        assert_eq!(backend.name(), "resolver");
    }
}
