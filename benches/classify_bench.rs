//! Benchmarks for user-agent classification and identifier hashing.
//!
//! Measures rule-table evaluation for common agents, the bot/fallback path
//! for non-browser agents, and the digest + UUID encoding used by every
//! fingerprint.
//!
//! Run with: `cargo bench --bench classify_bench`

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use visitorid::hash::{digest, rolling_hash, uuid_of};
use visitorid::{DeviceProfile, Fingerprinter, StaticEnvironment};

// ---------------------------------------------------------------------------
// User-agent datasets
// ---------------------------------------------------------------------------

const BROWSER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (iPad; CPU OS 17_2 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Mobile/15E148 Safari/604.1",
    "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.6099.144 Mobile Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.2210.91",
];

/// Agents that reach the bot tokens or the generic `name/version` fallback.
const NON_BROWSER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)",
    "curl/8.4.0",
    "ExampleFetchBot/3.1",
    "CaptiveNetworkSupport-355.200.27 wispr",
    "",
];

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    group.bench_function("browsers", |b| {
        b.iter(|| {
            for ua in BROWSER_AGENTS {
                black_box(DeviceProfile::parse(black_box(ua)));
            }
        });
    });

    group.bench_function("non_browsers", |b| {
        b.iter(|| {
            for ua in NON_BROWSER_AGENTS {
                black_box(DeviceProfile::parse(black_box(ua)));
            }
        });
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Hashing
// ---------------------------------------------------------------------------

fn bench_hashing(c: &mut Criterion) {
    let mut group = c.benchmark_group("hashing");
    let payload = "Microsoft Windows:Windows 10:24:24:true:false:false:false:true:false";

    group.bench_function("digest", |b| {
        b.iter(|| black_box(digest(black_box(payload))));
    });

    group.bench_function("rolling_hash", |b| {
        b.iter(|| black_box(rolling_hash(black_box(payload))));
    });

    group.bench_function("uuid_of", |b| {
        b.iter(|| black_box(uuid_of(black_box(payload))));
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Synchronous identifier (classify + payload + hash)
// ---------------------------------------------------------------------------

fn bench_get(c: &mut Criterion) {
    let env = StaticEnvironment::with_user_agent(BROWSER_AGENTS[0]).screen([1920, 1080], 24, 24);
    let fingerprinter = Fingerprinter::new(Arc::new(env));

    c.bench_function("fingerprinter_get", |b| {
        b.iter(|| black_box(fingerprinter.get(black_box(Some("tenant-7")))));
    });
}

criterion_group!(benches, bench_classify, bench_hashing, bench_get);
criterion_main!(benches);
