//! Colon-hex IPv6 grammar and canonical (RFC 5952) formatting.

use core::fmt;

use super::ipv4::{parse_ipv4, write_ipv4};

const GROUPS: usize = 8;

/// Parses an IPv6 address string into 16 network-order bytes.
///
/// Supports:
/// - Full form (8 groups of 1-4 hex digits, either case)
/// - One `::` standing for one or more zero groups
/// - A trailing dotted-quad in place of the last two groups
///   (e.g. `::ffff:192.168.1.1`)
pub fn parse_ipv6(text: &str) -> Option<[u8; 16]> {
    if text.is_empty() {
        return None;
    }

    let (head, tail) = match text.find("::") {
        Some(pos) => {
            let rest = &text[pos + 2..];
            if rest.contains("::") {
                return None;
            }
            (&text[..pos], Some(rest))
        }
        None => (text, None),
    };

    let mut groups = [0u16; GROUPS];
    match tail {
        None => {
            if parse_groups(head, true, &mut groups)? != GROUPS {
                return None;
            }
        }
        Some(tail) => {
            // The dotted quad can only sit at the very end, i.e. after `::`.
            let mut front = [0u16; GROUPS];
            let mut back = [0u16; GROUPS];
            let front_len = parse_groups(head, false, &mut front)?;
            let back_len = parse_groups(tail, true, &mut back)?;
            // `::` must stand for at least one group.
            if front_len + back_len >= GROUPS {
                return None;
            }
            groups[..front_len].copy_from_slice(&front[..front_len]);
            groups[GROUPS - back_len..].copy_from_slice(&back[..back_len]);
        }
    }

    let mut out = [0u8; 16];
    for (chunk, group) in out.chunks_exact_mut(2).zip(groups) {
        chunk.copy_from_slice(&group.to_be_bytes());
    }
    Some(out)
}

/// Parses a colon-separated run of groups into `out`, returning the count.
fn parse_groups(s: &str, allow_dotted_tail: bool, out: &mut [u16; GROUPS]) -> Option<usize> {
    if s.is_empty() {
        return Some(0);
    }

    let mut n = 0;
    let mut parts = s.split(':').peekable();
    while let Some(part) = parts.next() {
        let last = parts.peek().is_none();
        if last && allow_dotted_tail && part.contains('.') {
            let v4 = parse_ipv4(part)?;
            if n + 2 > GROUPS {
                return None;
            }
            out[n] = u16::from_be_bytes([v4[0], v4[1]]);
            out[n + 1] = u16::from_be_bytes([v4[2], v4[3]]);
            return Some(n + 2);
        }
        if n == GROUPS {
            return None;
        }
        out[n] = parse_hex_group(part)?;
        n += 1;
    }
    Some(n)
}

fn parse_hex_group(part: &str) -> Option<u16> {
    let bytes = part.as_bytes();
    if bytes.is_empty() || bytes.len() > 4 {
        return None;
    }
    let mut value: u16 = 0;
    for &b in bytes {
        let digit = (b as char).to_digit(16)?;
        value = (value << 4) | digit as u16;
    }
    Some(value)
}

/// Splits 16 network-order bytes into eight host-order groups.
#[must_use]
pub fn groups_of(addr: &[u8; 16]) -> [u16; GROUPS] {
    let mut groups = [0u16; GROUPS];
    for (group, chunk) in groups.iter_mut().zip(addr.chunks_exact(2)) {
        *group = u16::from_be_bytes([chunk[0], chunk[1]]);
    }
    groups
}

/// Finds the longest run of two or more zero groups.
///
/// Returns `(start, len)`; ties go to the leftmost run. A lone zero group is
/// never compressed.
#[must_use]
pub fn longest_zero_run(groups: &[u16; GROUPS]) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    let mut i = 0;
    while i < GROUPS {
        if groups[i] != 0 {
            i += 1;
            continue;
        }
        let start = i;
        while i < GROUPS && groups[i] == 0 {
            i += 1;
        }
        let len = i - start;
        if len >= 2 && best.is_none_or(|(_, best_len)| len > best_len) {
            best = Some((start, len));
        }
    }
    best
}

/// Writes `addr` in canonical text form: lowercase hex, no leading zeros,
/// longest zero run replaced by `::`.
///
/// IPv4-compatible (`::a.b.c.d`) and IPv4-mapped (`::ffff:a.b.c.d`)
/// addresses keep their last 32 bits in dotted-quad form, as the C library
/// formatter prints them.
pub fn write_ipv6<W: fmt::Write + ?Sized>(out: &mut W, addr: &[u8; 16]) -> fmt::Result {
    let groups = groups_of(addr);
    let run = longest_zero_run(&groups);
    let dotted_tail = match run {
        Some((0, 6)) => true,
        Some((0, 5)) => groups[5] == 0xffff,
        _ => false,
    };
    let hex_groups = if dotted_tail { GROUPS - 2 } else { GROUPS };

    let mut need_colon = false;
    let mut i = 0;
    while i < hex_groups {
        if let Some((start, len)) = run
            && i == start
        {
            out.write_str("::")?;
            need_colon = false;
            i += len;
            continue;
        }
        if need_colon {
            out.write_char(':')?;
        }
        write!(out, "{:x}", groups[i])?;
        need_colon = true;
        i += 1;
    }

    if dotted_tail {
        if need_colon {
            out.write_char(':')?;
        }
        write_ipv4(out, &[addr[12], addr[13], addr[14], addr[15]])?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt6(addr: &[u8; 16]) -> String {
        let mut s = String::new();
        write_ipv6(&mut s, addr).unwrap();
        s
    }

    #[test]
    fn loopback() {
        let mut expected = [0u8; 16];
        expected[15] = 1;
        assert_eq!(parse_ipv6("::1"), Some(expected));
    }

    #[test]
    fn unspecified() {
        assert_eq!(parse_ipv6("::"), Some([0u8; 16]));
    }

    #[test]
    fn full_form() {
        assert_eq!(
            parse_ipv6("2001:db8:85a3:0:0:8a2e:370:7334"),
            Some([
                0x20, 0x01, 0x0d, 0xb8, 0x85, 0xa3, 0x00, 0x00, 0x00, 0x00, 0x8a, 0x2e, 0x03, 0x70,
                0x73, 0x34
            ])
        );
    }

    #[test]
    fn full_form_with_leading_zeros() {
        let parsed = parse_ipv6("2001:0db8:0000:0000:0000:0000:0000:0001").unwrap();
        assert_eq!(&parsed[..4], &[0x20, 0x01, 0x0d, 0xb8]);
        assert_eq!(parsed[15], 1);
    }

    #[test]
    fn compression_positions() {
        assert_eq!(
            parse_ipv6("2001:db8::1"),
            Some([0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1])
        );
        let mut fe80 = [0u8; 16];
        fe80[0] = 0xfe;
        fe80[1] = 0x80;
        assert_eq!(parse_ipv6("fe80::"), Some(fe80));
        assert_eq!(
            parse_ipv6("1:2::7:8"),
            Some([0, 1, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 7, 0, 8])
        );
    }

    #[test]
    fn double_colon_may_stand_for_one_group() {
        assert_eq!(
            parse_ipv6("1:2:3:4:5:6:7::"),
            Some([0, 1, 0, 2, 0, 3, 0, 4, 0, 5, 0, 6, 0, 7, 0, 0])
        );
        assert_eq!(
            parse_ipv6("::2:3:4:5:6:7:8"),
            Some([0, 0, 0, 2, 0, 3, 0, 4, 0, 5, 0, 6, 0, 7, 0, 8])
        );
    }

    #[test]
    fn uppercase_hex() {
        let parsed = parse_ipv6("FE80::ABCD").unwrap();
        assert_eq!(&parsed[..2], &[0xfe, 0x80]);
        assert_eq!(&parsed[14..], &[0xab, 0xcd]);
    }

    #[test]
    fn embedded_ipv4() {
        assert_eq!(
            parse_ipv6("::ffff:192.168.1.1"),
            Some([0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xff, 192, 168, 1, 1])
        );
        assert_eq!(
            parse_ipv6("::1.2.3.4"),
            Some([0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 2, 3, 4])
        );
        assert_eq!(
            parse_ipv6("1:2:3:4:5:6:1.2.3.4"),
            Some([0, 1, 0, 2, 0, 3, 0, 4, 0, 5, 0, 6, 1, 2, 3, 4])
        );
    }

    #[test]
    fn invalid() {
        for text in [
            "",
            ":",
            ":::",
            ":1",
            "1:",
            "1::2::3",
            "::1::",
            "1:::2",
            "1:2:3:4:5:6:7:8:9",
            "1:2:3:4:5:6:7",
            "1:2:3:4:5:6:7:8::",
            "::1:2:3:4:5:6:7:8",
            "12345::",
            "g::1",
            "::+1",
            "1.2.3.4",
            "1.2.3.4::",
            "::1.2.3.4:5",
            "::ffff:1.2.3",
            "::ffff:1.2.3.256",
            "::ffff:01.2.3.4",
            "1:2:3:4:5:6:7:1.2.3.4",
            "fe80::1%eth0",
            " ::1",
            "::1 ",
        ] {
            assert_eq!(parse_ipv6(text), None, "accepted {text:?}");
        }
    }

    #[test]
    fn zero_run_selection() {
        assert_eq!(longest_zero_run(&[0; 8]), Some((0, 8)));
        assert_eq!(longest_zero_run(&[1, 0, 2, 0, 3, 0, 4, 0]), None);
        assert_eq!(longest_zero_run(&[1, 0, 0, 2, 0, 0, 0, 3]), Some((4, 3)));
        // Tie: leftmost wins.
        assert_eq!(longest_zero_run(&[1, 0, 0, 2, 3, 0, 0, 4]), Some((1, 2)));
    }

    #[test]
    fn format_canonical() {
        let mut lo = [0u8; 16];
        lo[15] = 1;
        assert_eq!(fmt6(&lo), "::1");
        assert_eq!(fmt6(&[0u8; 16]), "::");
        assert_eq!(fmt6(&[0xff; 16]), "ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff");

        let mut fe80 = [0u8; 16];
        fe80[0] = 0xfe;
        fe80[1] = 0x80;
        assert_eq!(fmt6(&fe80), "fe80::");
    }

    #[test]
    fn format_single_zero_group_not_compressed() {
        // 2001:db8:0:1:1:1:1:1
        let addr = [
            0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1,
        ];
        assert_eq!(fmt6(&addr), "2001:db8:0:1:1:1:1:1");
    }

    #[test]
    fn format_longest_run_wins() {
        // 1:0:0:2:0:0:0:3
        let addr = [0, 1, 0, 0, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 3];
        assert_eq!(fmt6(&addr), "1:0:0:2::3");
    }

    #[test]
    fn format_tie_compresses_leftmost() {
        // 2001:db8:0:0:1:0:0:1
        let addr = [
            0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1,
        ];
        assert_eq!(fmt6(&addr), "2001:db8::1:0:0:1");
    }

    #[test]
    fn format_mapped_ipv4_dotted() {
        let addr = [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xff, 1, 2, 3, 4];
        assert_eq!(fmt6(&addr), "::ffff:1.2.3.4");
        let addr = [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xff, 0, 0, 0, 0];
        assert_eq!(fmt6(&addr), "::ffff:0.0.0.0");
    }

    #[test]
    fn format_compatible_ipv4_dotted() {
        let addr = [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 2, 3, 4];
        assert_eq!(fmt6(&addr), "::1.2.3.4");
        let addr = [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0];
        assert_eq!(fmt6(&addr), "::1.0.0.0");
    }

    #[test]
    fn format_near_embedded_forms_stay_hex() {
        // Group 6 zero: the run reaches group 7.
        let addr = [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 2];
        assert_eq!(fmt6(&addr), "::102");
        let addr = [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xfe, 1, 2, 3, 4];
        assert_eq!(fmt6(&addr), "::fffe:102:304");
        let addr = [0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xff, 1, 2, 3, 4];
        assert_eq!(fmt6(&addr), "1::ffff:102:304");
        let addr = [0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 1, 2, 3, 4];
        assert_eq!(fmt6(&addr), "::1:0:102:304");
    }

    #[test]
    fn format_drops_leading_zeros() {
        let addr = [
            0x00, 0x01, 0x00, 0x20, 0x03, 0x00, 0x40, 0x00, 0, 0x0a, 0, 0xb0, 0x0c, 0, 0xd0, 0,
        ];
        assert_eq!(fmt6(&addr), "1:20:300:4000:a:b0:c00:d000");
    }
}
