#![no_main]
use inetutil_core::{AddrError, AddressFamily, format_to_text, parse_to_binary};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    for family in [AddressFamily::Inet, AddressFamily::Inet6] {
        match format_to_text(family, data) {
            Ok(text) => {
                assert_eq!(data.len(), family.binary_len());
                let back = parse_to_binary(family, &text).expect("canonical text parses");
                assert_eq!(back.as_bytes(), data);
                assert_eq!(format_to_text(family, back.as_bytes()).as_deref(), Ok(text.as_str()));
            }
            Err(err) => {
                assert_ne!(data.len(), family.binary_len(), "{err}");
                assert!(matches!(err, AddrError::InvalidLength { .. }));
            }
        }
    }
});
