//! Numeric resolver backed by `getaddrinfo(3)` with `AI_NUMERICHOST`.
//!
//! `AI_NUMERICHOST` suppresses every name service lookup, the service
//! argument is null and the socket type is pinned so the platform returns a
//! single entry for the literal.

use std::ffi::CStr;
use std::mem::size_of;
use std::ptr;

use inetutil_core::{AddressFamily, BinaryAddress, NumericResolver, ResolveError};

/// Resolver using the C library's `getaddrinfo`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetAddrInfoResolver;

impl NumericResolver for GetAddrInfoResolver {
    fn resolve_numeric(
        &self,
        family: AddressFamily,
        text: &CStr,
    ) -> Result<BinaryAddress, ResolveError> {
        // SAFETY: all-zero is the documented "no hints" addrinfo value.
        let mut hints: libc::addrinfo = unsafe { std::mem::zeroed() };
        hints.ai_family = match family {
            AddressFamily::Inet => libc::AF_INET,
            AddressFamily::Inet6 => libc::AF_INET6,
        };
        hints.ai_flags = libc::AI_NUMERICHOST;
        hints.ai_socktype = libc::SOCK_STREAM;

        let mut res: *mut libc::addrinfo = ptr::null_mut();
        // SAFETY: `text` is NUL-terminated, the service pointer may be null,
        // `hints` and `res` are valid for the duration of the call.
        let rc = unsafe { libc::getaddrinfo(text.as_ptr(), ptr::null(), &hints, &mut res) };
        if rc != 0 {
            return Err(map_gai_error(rc));
        }

        let list = AddrInfoList(res);
        list.first_address(family)
    }
}

/// Owns a `getaddrinfo` result list and frees it on drop.
struct AddrInfoList(*mut libc::addrinfo);

impl AddrInfoList {
    fn first_address(&self, family: AddressFamily) -> Result<BinaryAddress, ResolveError> {
        // SAFETY: the pointer came from a successful getaddrinfo and is live
        // until `self` is dropped.
        let Some(ai) = (unsafe { self.0.as_ref() }) else {
            return Err(ResolveError::InvalidArgument);
        };
        if ai.ai_addr.is_null() {
            return Err(ResolveError::InvalidArgument);
        }
        let addrlen = ai.ai_addrlen as usize;

        match family {
            AddressFamily::Inet => {
                if ai.ai_family != libc::AF_INET || addrlen < size_of::<libc::sockaddr_in>() {
                    return Err(ResolveError::InvalidArgument);
                }
                // SAFETY: family and length checked above.
                let sin = unsafe { &*ai.ai_addr.cast::<libc::sockaddr_in>() };
                // s_addr is stored in network order, so its memory bytes are the octets.
                Ok(BinaryAddress::V4(sin.sin_addr.s_addr.to_ne_bytes()))
            }
            AddressFamily::Inet6 => {
                if ai.ai_family != libc::AF_INET6 || addrlen < size_of::<libc::sockaddr_in6>() {
                    return Err(ResolveError::InvalidArgument);
                }
                // SAFETY: family and length checked above.
                let sin6 = unsafe { &*ai.ai_addr.cast::<libc::sockaddr_in6>() };
                Ok(BinaryAddress::V6(sin6.sin6_addr.s6_addr))
            }
        }
    }
}

impl Drop for AddrInfoList {
    fn drop(&mut self) {
        if !self.0.is_null() {
            // SAFETY: allocated by getaddrinfo and freed exactly once.
            unsafe { libc::freeaddrinfo(self.0) };
        }
    }
}

/// Maps `EAI_*` codes onto resolver outcomes.
///
/// `EAI_NONAME` is what a malformed literal produces under
/// `AI_NUMERICHOST`; it is the `WSAEINVAL` of this platform.
fn map_gai_error(rc: i32) -> ResolveError {
    match rc {
        libc::EAI_NONAME => ResolveError::InvalidArgument,
        libc::EAI_MEMORY => ResolveError::NoMemory,
        libc::EAI_FAMILY => ResolveError::FamilyNotSupported,
        libc::EAI_SYSTEM => ResolveError::System(
            std::io::Error::last_os_error()
                .raw_os_error()
                .unwrap_or(libc::EIO),
        ),
        _ => ResolveError::System(libc::EIO),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(family: AddressFamily, text: &CStr) -> Result<BinaryAddress, ResolveError> {
        GetAddrInfoResolver.resolve_numeric(family, text)
    }

    #[test]
    fn ipv4_literal() {
        assert_eq!(
            resolve(AddressFamily::Inet, c"192.168.1.1"),
            Ok(BinaryAddress::V4([192, 168, 1, 1]))
        );
    }

    #[test]
    fn ipv6_literal() {
        let mut expected = [0u8; 16];
        expected[15] = 1;
        assert_eq!(
            resolve(AddressFamily::Inet6, c"::1"),
            Ok(BinaryAddress::V6(expected))
        );
    }

    #[test]
    fn hostname_is_not_resolved() {
        assert_eq!(
            resolve(AddressFamily::Inet, c"localhost"),
            Err(ResolveError::InvalidArgument)
        );
    }

    #[test]
    fn out_of_range_octet_is_invalid_argument() {
        assert_eq!(
            resolve(AddressFamily::Inet, c"1.2.3.256"),
            Err(ResolveError::InvalidArgument)
        );
    }

    #[test]
    fn gai_error_mapping() {
        assert_eq!(map_gai_error(libc::EAI_NONAME), ResolveError::InvalidArgument);
        assert_eq!(map_gai_error(libc::EAI_MEMORY), ResolveError::NoMemory);
        assert_eq!(
            map_gai_error(libc::EAI_FAMILY),
            ResolveError::FamilyNotSupported
        );
        assert_eq!(map_gai_error(libc::EAI_AGAIN), ResolveError::System(libc::EIO));
    }
}
