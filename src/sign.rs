//! The transaction (de)serialization and signing pipeline: §4.10/§4.11.
use crate::codec::{object, FieldValue, StObject};
use crate::error::XrplError;
use crate::fields::FieldTable;
use crate::hash::sha512half;
use crate::scanner::Scanner;
use crate::wallet::Wallet;

/// Domain-separation prefix for the transaction-signing hash.
pub const SIGNING_PREFIX: &[u8; 4] = b"STX\0";
/// Domain-separation prefix for the transaction-id hash.
pub const TRANSACTION_ID_PREFIX: &[u8; 4] = b"TXN\0";

fn set_field(object: &mut StObject, name: &str, value: FieldValue) {
    if let Some(entry) = object.iter_mut().find(|(existing, _)| existing == name) {
        entry.1 = value;
    } else {
        object.push((name.to_string(), value));
    }
}

/// Serializes a transaction or ledger object per §4.10.
pub fn serialize_transaction(
    tx: &StObject,
    signing: bool,
    marker: bool,
) -> Result<Vec<u8>, XrplError> {
    object::serialize_object(tx, FieldTable::bundled(), signing, marker)
}

/// Deserializes a transaction or ledger object from its wire bytes.
pub fn deserialize_transaction(bytes: &[u8]) -> Result<StObject, XrplError> {
    let mut scanner = Scanner::new(bytes);
    object::deserialize_object(&mut scanner, FieldTable::bundled(), false)
}

/// Runs the full signing pipeline (§4.11): injects `SigningPubKey`, signs the
/// signing-mode serialization, injects `TxnSignature`, then computes and
/// injects the final transaction-id `hash`.
pub fn sign_transaction(tx: &StObject, wallet: &Wallet) -> Result<StObject, XrplError> {
    let mut tx = tx.clone();

    set_field(&mut tx, "SigningPubKey", FieldValue::Blob(wallet.public_key().to_bytes().to_vec()));

    let signing_blob = serialize_transaction(&tx, true, false)?;
    let mut to_sign = SIGNING_PREFIX.to_vec();
    to_sign.extend_from_slice(&signing_blob);
    tracing::debug!(algorithm = ?wallet.algorithm(), "signing transaction");
    let signature = wallet.sign(&to_sign);

    set_field(&mut tx, "TxnSignature", FieldValue::Blob(signature.to_bytes()));

    let final_blob = serialize_transaction(&tx, false, false)?;
    let mut to_hash = TRANSACTION_ID_PREFIX.to_vec();
    to_hash.extend_from_slice(&final_blob);
    let hash = sha512half(&to_hash);
    tracing::debug!(hash = %hex::encode_upper(hash), "computed transaction id");
    set_field(&mut tx, "hash", FieldValue::Hash256(hash));

    Ok(tx)
}

/// Convenience re-export so callers don't need to reach into `codec` directly.
pub use crate::codec::amount::serialize as serialize_amount;
pub use crate::codec::amount::deserialize as deserialize_amount;
