//! Key derivation, signing, and verification for the two algorithms the XRP
//! Ledger accepts: ed25519 and secp256k1 with a custom "family seed"
//! derivation scheme (not BIP32).
mod ed25519;
mod secp256k1;

use crate::error::SignError;
use crate::hash::sha512half;

/// Signing algorithm an account's keys were derived with.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Algorithm {
    /// Ed25519, as specified in RFC 8032.
    Ed25519,
    /// ECDSA over secp256k1, with deterministic (RFC 6979) nonces.
    Secp256k1,
}

impl Algorithm {
    /// The base-58 seed prefix bytes for this algorithm.
    #[must_use]
    pub const fn seed_prefix(self) -> &'static [u8] {
        match self {
            Self::Ed25519 => &[0x01, 0xE1, 0x4B],
            Self::Secp256k1 => &[0x21],
        }
    }

    /// The single-byte wire prefix prepended to this algorithm's public keys.
    #[must_use]
    pub const fn public_key_prefix(self) -> u8 {
        match self {
            Self::Ed25519 => 0xED,
            Self::Secp256k1 => 0x02, // overwritten per-key; see `PublicKey::to_bytes`
        }
    }
}

/// A 32-byte private key, unprefixed regardless of algorithm.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct PrivateKey {
    algorithm: Algorithm,
    bytes: [u8; 32],
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("algorithm", &self.algorithm)
            .field("bytes", &"<redacted>")
            .finish()
    }
}

impl PrivateKey {
    /// Derives the master key pair deterministically from a 16-byte seed.
    #[must_use]
    pub fn derive(seed: &[u8; 16], algorithm: Algorithm) -> (Self, PublicKey) {
        let (priv_bytes, pub_bytes) = match algorithm {
            Algorithm::Ed25519 => ed25519::derive_key_pair(seed),
            Algorithm::Secp256k1 => secp256k1::derive_key_pair(seed),
        };
        let private = Self { algorithm, bytes: priv_bytes };
        let public = PublicKey { algorithm, bytes: pub_bytes };
        (private, public)
    }

    /// Wraps a raw 32-byte private key for the given algorithm.
    pub fn from_bytes(algorithm: Algorithm, bytes: &[u8]) -> Result<Self, SignError> {
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| SignError::BadKeyLength { expected: 32, actual: bytes.len() })?;
        if algorithm == Algorithm::Secp256k1 {
            secp256k1::validate_private(&bytes)?;
        }
        Ok(Self { algorithm, bytes })
    }

    /// The 32 raw bytes of this key.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 32] {
        self.bytes
    }

    /// The algorithm this key was derived under.
    #[must_use]
    pub const fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Recomputes the corresponding public key.
    #[must_use]
    pub fn public_key(&self) -> PublicKey {
        let bytes = match self.algorithm {
            Algorithm::Ed25519 => ed25519::public_key_from_private(&self.bytes),
            Algorithm::Secp256k1 => secp256k1::public_key_from_private(&self.bytes),
        };
        PublicKey { algorithm: self.algorithm, bytes }
    }

    /// Signs `message`: ed25519 signs it raw; secp256k1 signs the `sha512half` digest.
    #[must_use]
    pub fn sign(&self, message: &[u8]) -> Signature {
        let digest = sha512half(message);
        match self.algorithm {
            Algorithm::Ed25519 => Signature::Ed25519(ed25519::sign(message, &self.bytes)),
            Algorithm::Secp256k1 => Signature::Secp256k1(secp256k1::sign_prehashed(&digest, &self.bytes)),
        }
    }
}

/// A 33-byte public key: a 1-byte algorithm prefix followed by the curve point.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PublicKey {
    algorithm: Algorithm,
    bytes: [u8; 33],
}

impl PublicKey {
    /// Wraps a raw 33-byte public key (prefix byte included).
    pub fn from_bytes(algorithm: Algorithm, bytes: &[u8]) -> Result<Self, SignError> {
        let bytes: [u8; 33] = bytes
            .try_into()
            .map_err(|_| SignError::BadKeyLength { expected: 33, actual: bytes.len() })?;
        Ok(Self { algorithm, bytes })
    }

    /// The 33 raw bytes of this key, prefix included.
    #[must_use]
    pub fn to_bytes(self) -> [u8; 33] {
        self.bytes
    }

    /// The algorithm this key belongs to.
    #[must_use]
    pub const fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// The 20-byte `AccountID`: `RIPEMD160(SHA256(public key bytes))`.
    #[must_use]
    pub fn account_id(&self) -> [u8; 20] {
        crate::hash::ripemd160(&crate::hash::sha256(&self.bytes))
    }

    /// Verifies `signature` over `message`: ed25519 verifies it raw; secp256k1
    /// verifies against the `sha512half` digest.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), SignError> {
        let digest = sha512half(message);
        match (self.algorithm, signature) {
            (Algorithm::Ed25519, Signature::Ed25519(sig)) => {
                ed25519::verify(message, sig, &self.bytes)
            },
            (Algorithm::Secp256k1, Signature::Secp256k1(sig)) => {
                secp256k1::verify_prehashed(&digest, sig, &self.bytes)
            },
            _ => Err(SignError::SignatureVerification),
        }
    }
}

/// A signature: raw ed25519 over the message, or DER ECDSA over its
/// `sha512half` digest for secp256k1.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Signature {
    /// 64-byte raw ed25519 signature.
    Ed25519([u8; 64]),
    /// DER-encoded secp256k1 ECDSA signature, normalized to low-S.
    Secp256k1(Vec<u8>),
}

impl Signature {
    /// The algorithm this signature was produced with.
    #[must_use]
    pub const fn algorithm(&self) -> Algorithm {
        match self {
            Self::Ed25519(_) => Algorithm::Ed25519,
            Self::Secp256k1(_) => Algorithm::Secp256k1,
        }
    }

    /// Wire bytes for this signature.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::Ed25519(bytes) => bytes.to_vec(),
            Self::Secp256k1(bytes) => bytes.clone(),
        }
    }

    /// Parses wire bytes into a signature for the given algorithm.
    #[must_use]
    pub fn from_bytes(algorithm: Algorithm, bytes: &[u8]) -> Self {
        match algorithm {
            Algorithm::Ed25519 => {
                let mut fixed = [0u8; 64];
                fixed.copy_from_slice(bytes);
                Self::Ed25519(fixed)
            },
            Algorithm::Secp256k1 => Self::Secp256k1(bytes.to_vec()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ed25519_derive_matches_known_vector() {
        let seed = hex_seed("sEdSKaCy2JT7JaM7v95H9SxkhP9wS2r");
        let (private, public) = PrivateKey::derive(&seed, Algorithm::Ed25519);
        assert_eq!(
            hex::encode_upper(private.to_bytes()),
            "B4C4E046826BD26190D09715FC31F4E6A728204EADD112905B08B14B7F15C4F3"
        );
        assert_eq!(
            hex::encode_upper(public.to_bytes()),
            "ED01FA53FA5A7E77798F882ECE20B1ABC00BB358A9E55A202D0D0676BD0CE37A63"
        );
    }

    #[test]
    fn secp256k1_sign_and_verify_round_trip() {
        let seed = [9u8; 16];
        let (private, public) = PrivateKey::derive(&seed, Algorithm::Secp256k1);
        let signature = private.sign(b"hello xrpl");
        assert!(public.verify(b"hello xrpl", &signature).is_ok());
        assert!(public.verify(b"tampered", &signature).is_err());
    }

    #[test]
    fn ed25519_sign_and_verify_round_trip() {
        let seed = [3u8; 16];
        let (private, public) = PrivateKey::derive(&seed, Algorithm::Ed25519);
        let signature = private.sign(b"hello xrpl");
        assert!(public.verify(b"hello xrpl", &signature).is_ok());
        assert!(public.verify(b"tampered", &signature).is_err());
    }

    #[test]
    fn public_key_recomputed_from_private_matches_derived() {
        let seed = [1u8; 16];
        for algorithm in [Algorithm::Ed25519, Algorithm::Secp256k1] {
            let (private, public) = PrivateKey::derive(&seed, algorithm);
            assert_eq!(private.public_key(), public);
        }
    }

    #[test]
    fn secp256k1_from_bytes_rejects_zero_scalar() {
        assert!(PrivateKey::from_bytes(Algorithm::Secp256k1, &[0u8; 32]).is_err());
    }

    #[test]
    fn secp256k1_from_bytes_rejects_scalar_at_curve_order() {
        // The secp256k1 group order n; a scalar equal to n is out of range.
        let n = hex::decode("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141")
            .unwrap();
        let bytes: [u8; 32] = n.try_into().unwrap();
        assert!(PrivateKey::from_bytes(Algorithm::Secp256k1, &bytes).is_err());
    }

    fn hex_seed(s58: &str) -> [u8; 16] {
        let (bytes, _algo) = crate::base58::Codec::default()
            .decode_seed(s58, &[Algorithm::Ed25519, Algorithm::Secp256k1])
            .unwrap();
        let mut out = [0u8; 16];
        out.copy_from_slice(&bytes);
        out
    }
}
