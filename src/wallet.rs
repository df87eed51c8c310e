//! Composes a seed into a usable signing identity: algorithm, key pair, and address.
use crate::error::XrplError;
use crate::keys::{Algorithm, PrivateKey, PublicKey, Signature};
use crate::seed::Seed;

/// A derived signing identity: key pair plus its base-58 address.
#[derive(Clone)]
pub struct Wallet {
    private_key: PrivateKey,
    public_key: PublicKey,
    address: String,
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("algorithm", &self.private_key.algorithm())
            .field("address", &self.address)
            .finish()
    }
}

impl Wallet {
    /// Derives a wallet from a 16-byte seed and algorithm.
    #[must_use]
    pub fn from_seed(seed: &Seed) -> Self {
        let (private_key, public_key) = PrivateKey::derive(seed.bytes(), seed.algorithm());
        Self::from_keys(private_key, public_key)
    }

    /// Decodes a base-58 seed string and derives its wallet.
    pub fn from_seed_str(s: &str, candidates: &[Algorithm]) -> Result<Self, XrplError> {
        let seed = Seed::decode(s, candidates)?;
        Ok(Self::from_seed(&seed))
    }

    /// Wraps an already-derived key pair.
    #[must_use]
    pub fn from_keys(private_key: PrivateKey, public_key: PublicKey) -> Self {
        tracing::debug!(algorithm = ?public_key.algorithm(), "computing account address");
        let address = crate::base58::DEFAULT_CODEC.encode_address(&public_key.account_id());
        Self { private_key, public_key, address }
    }

    /// The signing algorithm this wallet's keys were derived under.
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.private_key.algorithm()
    }

    /// This wallet's private key.
    #[must_use]
    pub const fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    /// This wallet's public key.
    #[must_use]
    pub const fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// This wallet's base-58 `r`-prefixed address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Signs `message` with this wallet's private key.
    #[must_use]
    pub fn sign(&self, message: &[u8]) -> Signature {
        self.private_key.sign(message)
    }
}
