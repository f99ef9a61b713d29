#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::multiple_crate_versions
)]

//! Dynamic flag primitives: answer hashing, domain-tagged HMAC PRF,
//! fixed-width little-endian encodings, constant-time equality.
//
// This crate holds the normative utilities shared by every engine component:
//
// - SHA-256 over the normalized answer (trim, lowercase)
// - HMAC-SHA256 over `UTF8(tag) || Σ ( LE(|p|,8) || p )`
// - Constant-time equality for digests and arbitrary byte strings
// - Random 256-bit salts from the operating system

use hmac::{Hmac, Mac};
use rand_core::{CryptoRngCore, OsRng, RngCore};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use thiserror::Error;

pub use subtle::Choice;

/// 32-byte digest (SHA-256 / HMAC-SHA256 output).
pub type Hash256 = [u8; 32];

/// Keyed HMAC-SHA256 state, cloned per PRF evaluation.
pub type HmacSha256 = Hmac<Sha256>;

pub mod constants;

#[derive(Debug, Error)]
pub enum PrimitiveError {
    #[error("invalid PRF key length")]
    InvalidKeyLength,

    #[error("operating system entropy unavailable: {0}")]
    EntropyUnavailable(String),
}

/// Convert an unsigned integer to fixed-width little-endian bytes.
///
/// The output is exactly `W` bytes (no overlong encodings).
#[must_use]
pub fn le_bytes<const W: usize>(mut x: u128) -> [u8; W] {
    let mut out = [0u8; W];
    let mut i = 0usize;
    while i < W {
        out[i] = (x & 0xFF) as u8;
        x >>= 8;
        i += 1;
    }
    out
}

/// Two's-complement little-endian encoding of a signed 64-bit value.
#[inline]
#[must_use]
pub const fn le_i64(x: i64) -> [u8; constants::LEN_U64] {
    x.to_le_bytes()
}

/// Canonical answer form: surrounding whitespace removed, lowercased.
#[must_use]
pub fn normalize_answer(answer: &str) -> String {
    answer.trim().to_lowercase()
}

/// Plain SHA-256.
#[must_use]
pub fn sha256(data: &[u8]) -> Hash256 {
    let digest = Sha256::digest(data);
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}

/// `SHA256( normalize(answer) )`
#[must_use]
pub fn answer_digest(answer: &str) -> Hash256 {
    sha256(normalize_answer(answer).as_bytes())
}

/// Key an HMAC-SHA256 instance once; evaluate it many times via [`prf_tag`].
pub fn keyed_prf(key: &[u8]) -> Result<HmacSha256, PrimitiveError> {
    HmacSha256::new_from_slice(key).map_err(|_| PrimitiveError::InvalidKeyLength)
}

/// Domain-tagged HMAC-SHA256 with length framing:
/// `PRF(key, tag, parts[])` = `HMAC_SHA256`( key, UTF8(tag) || Σ ( LE(|p|,8) || p ) )
#[must_use]
pub fn prf_tag(keyed: &HmacSha256, tag: &str, parts: &[&[u8]]) -> Hash256 {
    debug_assert!(
        tag.starts_with("dynflag."),
        "non-dynflag.* tag used in flag derivation: {tag}"
    );
    let mut mac = keyed.clone();
    mac.update(tag.as_bytes());
    for p in parts {
        mac.update(&le_bytes::<8>(p.len() as u128));
        mac.update(p);
    }
    let tag_bytes = mac.finalize().into_bytes();
    let mut out = [0u8; 32];
    out.copy_from_slice(&tag_bytes);
    out
}

/// Constant-time equality for two 32-byte hashes.
#[must_use]
pub fn ct_eq_hash(a: &Hash256, b: &Hash256) -> bool {
    a.ct_eq(b).into()
}

/// Constant-time equality for byte strings. Unequal lengths compare unequal;
/// lengths are treated as public.
#[must_use]
pub fn ct_eq_choice(a: &[u8], b: &[u8]) -> Choice {
    a.ct_eq(b)
}

/// Fill 32 bytes from the supplied cryptographic RNG.
pub fn random_32_from(rng: &mut impl CryptoRngCore) -> Result<[u8; 32], PrimitiveError> {
    let mut out = [0u8; 32];
    rng.try_fill_bytes(&mut out)
        .map_err(|e| PrimitiveError::EntropyUnavailable(e.to_string()))?;
    Ok(out)
}

/// Fill 32 bytes from the operating system RNG.
pub fn random_32() -> Result<[u8; 32], PrimitiveError> {
    random_32_from(&mut OsRng)
}

#[cfg(test)]
#[allow(clippy::missing_assert_message)]
mod tests {
    use super::*;

    #[test]
    fn normalization_trims_and_lowercases() {
        assert_eq!(normalize_answer("  Admin_Password \n"), "admin_password");
        assert_eq!(normalize_answer("\tFOO"), "foo");
        assert_eq!(normalize_answer("a b"), "a b");
    }

    #[test]
    fn le_bytes_is_fixed_width() {
        assert_eq!(le_bytes::<8>(1), [1, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(le_bytes::<4>(0x0102_0304), [4, 3, 2, 1]);
        assert_eq!(le_i64(-1), [0xFF; 8]);
    }

    #[test]
    fn ct_eq_rejects_length_mismatch() {
        assert!(bool::from(ct_eq_choice(b"abc", b"abc")));
        assert!(!bool::from(ct_eq_choice(b"abc", b"abd")));
        assert!(!bool::from(ct_eq_choice(b"abc", b"abcd")));
    }

    #[test]
    fn prf_tag_depends_on_framing() {
        let keyed = keyed_prf(&[7u8; 32]).unwrap();
        // "ab" || "c" and "a" || "bc" concatenate identically; framing separates them.
        let x = prf_tag(&keyed, constants::TAG_FLAG, &[b"ab", b"c"]);
        let y = prf_tag(&keyed, constants::TAG_FLAG, &[b"a", b"bc"]);
        assert!(!ct_eq_hash(&x, &y));
    }

    #[test]
    fn random_salts_differ() {
        let a = random_32().unwrap();
        let b = random_32().unwrap();
        assert_ne!(a, b);
    }
}
