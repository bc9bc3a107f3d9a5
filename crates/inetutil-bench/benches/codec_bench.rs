//! Address codec benchmarks.

use std::ffi::CString;
use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use inetutil_core::{AddressBackend, AddressFamily, BinaryAddress};
use inetutil_platform::Strategy;

const V4_INPUTS: &[(&str, &str)] = &[
    ("loopback", "127.0.0.1"),
    ("broadcast", "255.255.255.255"),
    ("invalid", "1.2.3.256"),
];

const V6_INPUTS: &[(&str, &str)] = &[
    ("loopback", "::1"),
    ("full", "2001:0db8:85a3:0000:0000:8a2e:0370:7334"),
    ("mapped", "::ffff:192.168.1.1"),
    ("invalid", "1::2::3"),
];

fn backends() -> Vec<(Strategy, Box<dyn AddressBackend + Send + Sync>)> {
    Strategy::ALL
        .into_iter()
        .filter_map(|s| s.backend().map(|b| (s, b)))
        .collect()
}

fn bench_parse(c: &mut Criterion) {
    for (family, inputs) in [
        (AddressFamily::Inet, V4_INPUTS),
        (AddressFamily::Inet6, V6_INPUTS),
    ] {
        let mut group = c.benchmark_group(format!("parse_{}", family.name()));
        for (strategy, backend) in backends() {
            for &(label, text) in inputs {
                group.bench_with_input(
                    BenchmarkId::new(strategy.name(), label),
                    &text,
                    |b, &text| {
                        b.iter(|| black_box(backend.parse(family, black_box(text))));
                    },
                );
            }
        }
        group.finish();
    }
}

fn bench_format(c: &mut Criterion) {
    let cases = [
        ("v4", BinaryAddress::V4([192, 168, 1, 1])),
        ("v6_loopback", BinaryAddress::V6(1u128.to_be_bytes())),
        (
            "v6_dense",
            BinaryAddress::V6(0x2001_0db8_85a3_0000_0000_8a2e_0370_7334u128.to_be_bytes()),
        ),
        ("v6_ones", BinaryAddress::V6([0xff; 16])),
    ];

    let mut group = c.benchmark_group("format");
    for (label, addr) in &cases {
        group.bench_with_input(BenchmarkId::new("canonical", label), addr, |b, addr| {
            b.iter(|| {
                black_box(inetutil_core::format_to_text(
                    addr.family(),
                    black_box(addr.as_bytes()),
                ))
            });
        });
    }
    group.finish();
}

/// Baseline: the C library's own `inet_pton`.
fn bench_libc_baseline(c: &mut Criterion) {
    let mut group = c.benchmark_group("libc_inet_pton");
    for (af, label, text) in [
        (libc::AF_INET, "v4_loopback", "127.0.0.1"),
        (libc::AF_INET6, "v6_full", "2001:0db8:85a3:0000:0000:8a2e:0370:7334"),
    ] {
        let Ok(c_text) = CString::new(text) else {
            continue;
        };
        group.bench_function(label, |b| {
            let mut out = [0u8; 16];
            b.iter(|| {
                // SAFETY: c_text is NUL-terminated and out holds 16 bytes.
                let rc = unsafe {
                    libc::inet_pton(af, c_text.as_ptr(), out.as_mut_ptr().cast::<libc::c_void>())
                };
                black_box((rc, out))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_format, bench_libc_baseline);
criterion_main!(benches);
