//! Dotted-decimal IPv4 grammar.

use core::fmt;

/// Parse a dotted-quad IPv4 text address into exactly 4 bytes.
///
/// Rejects leading zeros, values > 255, wrong number of parts, empty parts,
/// signs, whitespace and any other non-digit byte.
pub fn parse_ipv4(text: &str) -> Option<[u8; 4]> {
    if text.is_empty() {
        return None;
    }

    let mut parts = text.splitn(5, '.');
    let mut octets = [0u8; 4];
    for octet in &mut octets {
        *octet = parse_octet(parts.next()?)?;
    }
    // A fifth part means too many dots.
    if parts.next().is_some() {
        return None;
    }
    Some(octets)
}

fn parse_octet(part: &str) -> Option<u8> {
    let bytes = part.as_bytes();
    if bytes.is_empty() || bytes.len() > 3 {
        return None;
    }
    // Leading zeros are octal in inet_aton; refuse the ambiguity.
    if bytes.len() > 1 && bytes[0] == b'0' {
        return None;
    }
    let mut value: u16 = 0;
    for &b in bytes {
        if !b.is_ascii_digit() {
            return None;
        }
        value = value * 10 + u16::from(b - b'0');
    }
    u8::try_from(value).ok()
}

/// Returns `true` if `text` has the lexical shape of a dotted quad: four
/// parts of one to three digits with no leading zeros.
///
/// Octet ranges are not checked.
pub fn is_dotted_quad_shape(text: &str) -> bool {
    let mut count = 0;
    for part in text.split('.') {
        count += 1;
        let bytes = part.as_bytes();
        if bytes.is_empty()
            || bytes.len() > 3
            || (bytes.len() > 1 && bytes[0] == b'0')
            || !bytes.iter().all(u8::is_ascii_digit)
        {
            return false;
        }
    }
    count == 4
}

/// Writes `octets` in dotted-decimal form.
pub fn write_ipv4<W: fmt::Write + ?Sized>(out: &mut W, octets: &[u8; 4]) -> fmt::Result {
    write!(out, "{}.{}.{}.{}", octets[0], octets[1], octets[2], octets[3])
}
