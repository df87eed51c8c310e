//! Ed25519 key derivation, signing, and verification.
//!
//! Unlike secp256k1, derivation here is a single hash: the private key is
//! simply `sha512half(seed)`. See <https://xrpl.org/cryptographic-keys.html#ed25519-key-derivation>.
use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};

use crate::error::SignError;
use crate::hash::sha512half;

const PREFIX: u8 = 0xED;

pub fn derive_key_pair(seed: &[u8; 16]) -> ([u8; 32], [u8; 33]) {
    let private = sha512half(seed);
    let public = public_key_from_private(&private);
    (private, public)
}

pub fn public_key_from_private(private: &[u8; 32]) -> [u8; 33] {
    let signing_key = SigningKey::from_bytes(private);
    let verifying_key = signing_key.verifying_key();
    let mut out = [0u8; 33];
    out[0] = PREFIX;
    out[1..].copy_from_slice(verifying_key.as_bytes());
    out
}

pub fn sign(message: &[u8], private: &[u8; 32]) -> [u8; 64] {
    let signing_key = SigningKey::from_bytes(private);
    signing_key.sign(message).to_bytes()
}

pub fn verify(message: &[u8], signature: &[u8; 64], public: &[u8; 33]) -> Result<(), SignError> {
    let verifying_key = VerifyingKey::from_bytes(
        public[1..]
            .try_into()
            .map_err(|_| SignError::BadKeyLength { expected: 32, actual: public.len() - 1 })?,
    )
    .map_err(|err| SignError::Crypto(err.to_string()))?;
    let signature = ed25519_dalek::Signature::from_bytes(signature);
    verifying_key
        .verify(message, &signature)
        .map_err(|_| SignError::SignatureVerification)
}
