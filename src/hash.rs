//! Hash primitives used throughout the codec and key-derivation layers.
use ripemd::Ripemd160;
use sha2::{Digest, Sha256, Sha512};

/// SHA-256 digest.
#[must_use]
pub fn sha256(bytes: &[u8]) -> [u8; 32] {
    Sha256::digest(bytes).into()
}

/// The first 32 bytes of a SHA-512 digest ("SHA-512/256-half").
#[must_use]
pub fn sha512half(bytes: &[u8]) -> [u8; 32] {
    let digest = Sha512::digest(bytes);
    let mut half = [0u8; 32];
    half.copy_from_slice(&digest[..32]);
    half
}

/// RIPEMD-160 digest.
#[must_use]
pub fn ripemd160(bytes: &[u8]) -> [u8; 20] {
    Ripemd160::digest(bytes).into()
}

/// The first 4 bytes of `sha256(sha256(bytes))`, used as the base-58 checksum.
#[must_use]
pub fn checksum(bytes: &[u8]) -> [u8; 4] {
    let double = sha256(&sha256(bytes));
    let mut out = [0u8; 4];
    out.copy_from_slice(&double[..4]);
    out
}
