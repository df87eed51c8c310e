//! Canonical binary serialization, address codec, and key derivation for the XRP Ledger.
//!
//! This crate implements the parts of an XRPL client that must be bit-exact with the
//! reference network: the field-tagged binary wire format used for transactions and
//! ledger objects, the base-58 address/seed codec, and the ed25519 / secp256k1 key
//! derivation and signing schemes. Transport, submission, and wallet persistence are
//! left to callers.
#![deny(missing_docs)]
#![deny(warnings)]

pub mod base58;
pub mod codec;
pub mod error;
pub mod fields;
pub mod hash;
pub mod keys;
pub mod scanner;
pub mod seed;
pub mod sign;
pub mod wallet;

pub use codec::FieldValue;
pub use error::XrplError;
pub use fields::FieldTable;
pub use keys::{Algorithm, PrivateKey, PublicKey, Signature};
pub use scanner::Scanner;
pub use seed::Seed;
pub use wallet::Wallet;
