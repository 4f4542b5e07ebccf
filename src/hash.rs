//! Hashing primitives
//!
//! - [`digest`]: 128-bit message digest rendered as 32 lowercase hex chars
//! - [`rolling_hash`]: 32-bit `hash * 31 + code_unit` rolling hash
//! - [`encode_uuid`]: v4-shaped rendering of a 16-byte digest
//!
//! Inputs are Rust strings, so multi-byte characters are already UTF-8
//! encoded before digesting and hash identically on every platform.

use uuid::Builder;

/// Digest `input` into a 32 character lowercase hex string.
#[must_use]
pub fn digest(input: &str) -> String {
    format!("{:x}", md5::compute(input.as_bytes()))
}

/// Raw 16 bytes of the digest of `input`.
#[must_use]
pub fn digest_bytes(input: &str) -> [u8; 16] {
    md5::compute(input.as_bytes()).0
}

/// 32-bit signed rolling hash over UTF-16 code units.
///
/// `hash = hash * 31 + code_unit`, wrapping on overflow. Empty input hashes to `0`.
#[must_use]
pub fn rolling_hash(input: &str) -> i32 {
    input
        .encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

/// Rolling hash rendered as 8 lowercase hex chars (two's complement bits).
#[must_use]
pub fn rolling_hex(input: &str) -> String {
    format!("{:08x}", rolling_hash(input).cast_unsigned())
}

/// Render digest bytes as a v4-shaped UUID string.
///
/// The version nibble is forced to `4` and the variant nibble into `8..=b`.
/// The remaining 122 bits come straight from the digest, so the result is
/// as deterministic as its input.
#[must_use]
pub fn encode_uuid(bytes: [u8; 16]) -> String {
    Builder::from_random_bytes(bytes)
        .into_uuid()
        .hyphenated()
        .to_string()
}

/// Digest `input` and encode the result as a v4-shaped UUID.
#[must_use]
pub fn uuid_of(input: &str) -> String {
    encode_uuid(digest_bytes(input))
}
