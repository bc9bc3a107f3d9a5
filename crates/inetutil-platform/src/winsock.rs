//! Numeric resolver backed by Winsock's `WSAStringToAddressA`.
//!
//! `WSAStringToAddressA` only converts literals; it never consults a name
//! service. It takes a mutable string, so the literal is copied into an owned
//! buffer first, and Winsock must be started for the duration of the call.

use std::ffi::CStr;
use std::mem::{self, size_of};
use std::ptr;

use inetutil_core::{AddressFamily, BinaryAddress, NumericResolver, ResolveError};
use windows_sys::Win32::Networking::WinSock::{
    AF_INET, AF_INET6, SOCKADDR, SOCKADDR_IN, SOCKADDR_IN6, SOCKADDR_STORAGE, WSA_NOT_ENOUGH_MEMORY,
    WSADATA, WSAEAFNOSUPPORT, WSAEINVAL, WSAENOBUFS, WSACleanup, WSAGetLastError, WSAStartup,
    WSAStringToAddressA,
};

const WINSOCK_VERSION: u16 = 0x0202;

/// Resolver using Winsock's `WSAStringToAddressA`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WsaStringResolver;

impl NumericResolver for WsaStringResolver {
    fn resolve_numeric(
        &self,
        family: AddressFamily,
        text: &CStr,
    ) -> Result<BinaryAddress, ResolveError> {
        let raw = text.to_bytes_with_nul();
        let mut owned = Vec::new();
        owned
            .try_reserve_exact(raw.len())
            .map_err(|_| ResolveError::NoMemory)?;
        owned.extend_from_slice(raw);

        let _session = WsaSession::start()?;

        let af = match family {
            AddressFamily::Inet => AF_INET,
            AddressFamily::Inet6 => AF_INET6,
        };
        // SAFETY: all-zero is a valid empty sockaddr_storage.
        let mut storage: SOCKADDR_STORAGE = unsafe { mem::zeroed() };
        storage.ss_family = af;
        let mut len = size_of::<SOCKADDR_STORAGE>() as i32;

        // SAFETY: `owned` is NUL-terminated and outlives the call, the protocol
        // info may be null, and `storage` is `len` bytes long.
        let rc = unsafe {
            WSAStringToAddressA(
                owned.as_mut_ptr(),
                i32::from(af),
                ptr::null(),
                ptr::addr_of_mut!(storage).cast::<SOCKADDR>(),
                &mut len,
            )
        };
        if rc != 0 {
            // SAFETY: plain thread-local error read.
            return Err(map_wsa_error(unsafe { WSAGetLastError() }));
        }

        let len = usize::try_from(len).unwrap_or(0);
        match family {
            AddressFamily::Inet => {
                if storage.ss_family != AF_INET || len < size_of::<SOCKADDR_IN>() {
                    return Err(ResolveError::InvalidArgument);
                }
                // SAFETY: family and length checked above.
                let sin = unsafe { &*ptr::addr_of!(storage).cast::<SOCKADDR_IN>() };
                // SAFETY: every view of the in_addr union is plain bytes.
                let s_addr = unsafe { sin.sin_addr.S_un.S_addr };
                Ok(BinaryAddress::V4(s_addr.to_ne_bytes()))
            }
            AddressFamily::Inet6 => {
                if storage.ss_family != AF_INET6 || len < size_of::<SOCKADDR_IN6>() {
                    return Err(ResolveError::InvalidArgument);
                }
                // SAFETY: family and length checked above.
                let sin6 = unsafe { &*ptr::addr_of!(storage).cast::<SOCKADDR_IN6>() };
                // SAFETY: every view of the in6_addr union is plain bytes.
                Ok(BinaryAddress::V6(unsafe { sin6.sin6_addr.u.Byte }))
            }
        }
    }
}

/// Keeps Winsock started; `WSAStartup` is reference counted, so each guard
/// pairs with exactly one `WSACleanup`.
struct WsaSession;

impl WsaSession {
    fn start() -> Result<Self, ResolveError> {
        // SAFETY: all-zero is a valid out-parameter for WSAStartup.
        let mut data: WSADATA = unsafe { mem::zeroed() };
        // SAFETY: `data` is a valid WSADATA for the call.
        let rc = unsafe { WSAStartup(WINSOCK_VERSION, &mut data) };
        if rc != 0 {
            return Err(map_wsa_error(rc));
        }
        Ok(Self)
    }
}

impl Drop for WsaSession {
    fn drop(&mut self) {
        // SAFETY: balanced with the successful WSAStartup in `start`.
        unsafe { WSACleanup() };
    }
}

/// Maps Winsock error codes onto resolver outcomes.
///
/// `WSAEINVAL` is how `WSAStringToAddressA` reports a malformed literal.
fn map_wsa_error(code: i32) -> ResolveError {
    match code {
        WSAEINVAL => ResolveError::InvalidArgument,
        WSA_NOT_ENOUGH_MEMORY | WSAENOBUFS => ResolveError::NoMemory,
        WSAEAFNOSUPPORT => ResolveError::FamilyNotSupported,
        other => ResolveError::System(other),
    }
}
