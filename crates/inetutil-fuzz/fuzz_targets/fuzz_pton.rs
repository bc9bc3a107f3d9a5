#![no_main]
use inetutil_core::{AddressFamily, format_to_text, parse_to_binary};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let Ok(text) = std::str::from_utf8(rest) else {
        return;
    };
    let family = if selector & 1 == 0 {
        AddressFamily::Inet
    } else {
        AddressFamily::Inet6
    };

    let Ok(addr) = parse_to_binary(family, text) else {
        return;
    };
    assert_eq!(addr.as_bytes().len(), family.binary_len());

    // Anything accepted must survive a canonical round trip.
    let canonical = format_to_text(family, addr.as_bytes()).expect("format accepted address");
    assert_eq!(parse_to_binary(family, &canonical), Ok(addr));
    assert!(canonical.len() <= family.max_text_len());
});
