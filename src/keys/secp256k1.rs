//! secp256k1 key derivation, signing, and verification.
//!
//! Derivation is the XRP Ledger's own "family seed" scheme, not BIP32: a root
//! key pair and an intermediate key pair (derived from the root public key and
//! a zero "family" suffix) are added together modulo the group order to
//! produce the master key pair. See
//! <https://xrpl.org/cryptographic-keys.html#secp256k1-key-derivation>.
use ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::{Signature as EcdsaSignature, SigningKey, VerifyingKey};
use k256::elliptic_curve::ff::PrimeField;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{NonZeroScalar, PublicKey as K256PublicKey, Scalar};

use crate::error::SignError;
use crate::hash::sha512half;

const FAMILY: [u8; 4] = [0u8; 4];

fn derive_scalar(seed: &[u8]) -> NonZeroScalar {
    let mut counter: u32 = 0;
    loop {
        let mut buf = Vec::with_capacity(seed.len() + 4);
        buf.extend_from_slice(seed);
        buf.extend_from_slice(&counter.to_be_bytes());
        let digest = sha512half(&buf);
        let candidate = Scalar::from_repr(digest.into());
        if bool::from(candidate.is_some()) {
            let nz = NonZeroScalar::new(candidate.unwrap());
            if bool::from(nz.is_some()) {
                return nz.unwrap();
            }
        }
        counter = counter.wrapping_add(1);
    }
}

fn compressed_point(scalar: &NonZeroScalar) -> [u8; 33] {
    let public = K256PublicKey::from_secret_scalar(scalar);
    let encoded = public.to_encoded_point(true);
    let mut out = [0u8; 33];
    out.copy_from_slice(encoded.as_bytes());
    out
}

/// Rejects private-key bytes that aren't a valid nonzero scalar mod the
/// group order. Called from `PrivateKey::from_bytes` so that every
/// `PrivateKey` this module ever operates on is already known-valid.
pub fn validate_private(private: &[u8; 32]) -> Result<(), SignError> {
    scalar_from_private_checked(private).map(|_| ())
}

fn scalar_from_private_checked(private: &[u8; 32]) -> Result<NonZeroScalar, SignError> {
    let scalar = Scalar::from_repr((*private).into());
    if !bool::from(scalar.is_some()) {
        return Err(SignError::Crypto(
            "private key scalar is not less than the curve order".to_string(),
        ));
    }
    let nz = NonZeroScalar::new(scalar.unwrap());
    if !bool::from(nz.is_some()) {
        return Err(SignError::Crypto("private key scalar is zero".to_string()));
    }
    Ok(nz.unwrap())
}

fn scalar_from_private(private: &[u8; 32]) -> NonZeroScalar {
    scalar_from_private_checked(private).expect("validated in PrivateKey::from_bytes; qed")
}

pub fn derive_key_pair(seed: &[u8; 16]) -> ([u8; 32], [u8; 33]) {
    let root_scalar = derive_scalar(seed);
    let root_public = compressed_point(&root_scalar);

    let mut inter_seed = Vec::with_capacity(root_public.len() + FAMILY.len());
    inter_seed.extend_from_slice(&root_public);
    inter_seed.extend_from_slice(&FAMILY);
    let inter_scalar = derive_scalar(&inter_seed);

    // (root + inter) mod n corresponds to the sum of the two public points,
    // since scalar multiplication distributes over addition.
    let master_raw: Scalar = *root_scalar.as_ref() + *inter_scalar.as_ref();
    let master_scalar =
        NonZeroScalar::new(master_raw).expect("sum of two nonzero scalars is nonzero; qed");

    let mut private = [0u8; 32];
    private.copy_from_slice(&master_scalar.to_bytes());
    let public = compressed_point(&master_scalar);
    (private, public)
}

pub fn public_key_from_private(private: &[u8; 32]) -> [u8; 33] {
    compressed_point(&scalar_from_private(private))
}

pub fn sign_prehashed(digest: &[u8; 32], private: &[u8; 32]) -> Vec<u8> {
    let signing_key =
        SigningKey::from_slice(private).expect("32-byte nonzero scalar is a valid key; qed");
    let signature: EcdsaSignature = signing_key
        .sign_prehash(digest)
        .expect("prehash signing over a fixed-size digest cannot fail; qed");
    let signature = signature.normalize_s().unwrap_or(signature);
    signature.to_der().as_bytes().to_vec()
}

pub fn verify_prehashed(
    digest: &[u8; 32],
    signature: &[u8],
    public: &[u8; 33],
) -> Result<(), SignError> {
    let verifying_key =
        VerifyingKey::from_sec1_bytes(public).map_err(|err| SignError::Crypto(err.to_string()))?;
    let signature =
        EcdsaSignature::from_der(signature).map_err(|err| SignError::Crypto(err.to_string()))?;
    verifying_key
        .verify_prehash(digest, &signature)
        .map_err(|_| SignError::SignatureVerification)
}
