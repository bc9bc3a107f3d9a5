//! POSIX error numbers reported by [`AddrError::errno`](crate::AddrError::errno).
//!
//! Values match Linux so a C-style bridge can store them directly.

/// Out of memory.
pub const ENOMEM: i32 = 12;
/// Invalid argument.
pub const EINVAL: i32 = 22;
/// No space left on device (output buffer too small).
pub const ENOSPC: i32 = 28;
/// Address family not supported by protocol.
pub const EAFNOSUPPORT: i32 = 97;
