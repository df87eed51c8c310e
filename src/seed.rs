//! The 16-byte entropy seed that every XRPL key pair is derived from.
use crate::base58::DEFAULT_CODEC;
use crate::error::{Base58Error, XrplError};
use crate::keys::Algorithm;

/// 16 bytes of entropy, tagged with the algorithm its owner intends to derive.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct Seed {
    bytes: [u8; 16],
    algorithm: Algorithm,
}

impl std::fmt::Debug for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Seed")
            .field("algorithm", &self.algorithm)
            .field("bytes", &"<redacted>")
            .finish()
    }
}

impl Seed {
    /// Wraps raw entropy for the given algorithm.
    #[must_use]
    pub const fn new(bytes: [u8; 16], algorithm: Algorithm) -> Self {
        Self { bytes, algorithm }
    }

    /// Decodes a base-58 seed string, trying each algorithm in `candidates` in turn.
    pub fn decode(s: &str, candidates: &[Algorithm]) -> Result<Self, XrplError> {
        let (bytes, algorithm) = DEFAULT_CODEC.decode_seed(s, candidates)?;
        let bytes: [u8; 16] = bytes
            .try_into()
            .map_err(|v: Vec<u8>| Base58Error::BadSeedLength(v.len()))?;
        Ok(Self { bytes, algorithm })
    }

    /// Encodes this seed as its base-58 string form.
    pub fn encode(&self) -> Result<String, XrplError> {
        DEFAULT_CODEC.encode_seed(&self.bytes, self.algorithm).map_err(Into::into)
    }

    /// The raw 16 bytes of entropy.
    #[must_use]
    pub const fn bytes(&self) -> &[u8; 16] {
        &self.bytes
    }

    /// The algorithm this seed is tagged with.
    #[must_use]
    pub const fn algorithm(&self) -> Algorithm {
        self.algorithm
    }
}
