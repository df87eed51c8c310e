//! Per-type wire codecs and the `FieldValue` tagged union that unifies them.
pub mod amount;
pub mod object;
pub mod pathset;
pub mod vl;

use crate::error::{FieldError, XrplError};
use crate::fields::{FieldTable, SerializeFn, DeserializeFn};
use crate::scanner::Scanner;

pub use amount::Amount;
pub use object::StObject;
pub use pathset::PathSet;

/// A typed field value: one variant per wire type this crate understands.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    /// 20-byte account identifier.
    AccountId([u8; 20]),
    /// XRP drops or an issued-currency value.
    Amount(Amount),
    /// An arbitrary-length byte string.
    Blob(Vec<u8>),
    /// 128-bit hash.
    Hash128([u8; 16]),
    /// 160-bit hash.
    Hash160([u8; 20]),
    /// 256-bit hash.
    Hash256([u8; 32]),
    /// Alternative payment routes.
    PathSet(PathSet),
    /// 8-bit unsigned integer.
    UInt8(u8),
    /// 16-bit unsigned integer.
    UInt16(u16),
    /// 32-bit unsigned integer.
    UInt32(u32),
    /// 64-bit unsigned integer.
    UInt64(u64),
    /// A list of 256-bit hashes.
    Vector256(Vec<[u8; 32]>),
    /// A nested field-name to value mapping.
    STObject(StObject),
    /// A list of single-key wrapper objects.
    STArray(Vec<StObject>),
    /// A transaction-type name, encoded on the wire as `UInt16`.
    TransactionType(String),
    /// A ledger-entry-type name, encoded on the wire as `UInt16`.
    LedgerEntryType(String),
}

macro_rules! expect_variant {
    ($value:expr, $variant:ident, $type_name:literal) => {
        match $value {
            FieldValue::$variant(inner) => Ok(inner),
            other => Err(FieldError::Unserializable {
                name: String::new(),
                type_name: format!("{} (got {:?})", $type_name, other),
            }
            .into()),
        }
    };
}

fn serialize_account_id(value: &FieldValue, _: &FieldTable, _: bool) -> Result<Vec<u8>, XrplError> {
    let bytes = expect_variant!(value, AccountId, "AccountID")?;
    vl::encode(bytes).map_err(Into::into)
}

fn deserialize_account_id(
    scanner: &mut Scanner<'_>,
    _: &FieldTable,
    _: bool,
) -> Result<FieldValue, XrplError> {
    let bytes = vl::decode(scanner)?;
    let array: [u8; 20] = bytes
        .try_into()
        .map_err(|_| FieldError::HashLengthMismatch { expected: 160, actual: bytes.len() * 8, value: hex::encode(bytes) })?;
    Ok(FieldValue::AccountId(array))
}

fn serialize_amount(value: &FieldValue, _: &FieldTable, _: bool) -> Result<Vec<u8>, XrplError> {
    amount::serialize(expect_variant!(value, Amount, "Amount")?)
}

fn deserialize_amount(scanner: &mut Scanner<'_>, _: &FieldTable, _: bool) -> Result<FieldValue, XrplError> {
    Ok(FieldValue::Amount(amount::deserialize(scanner)?))
}

fn serialize_blob(value: &FieldValue, _: &FieldTable, _: bool) -> Result<Vec<u8>, XrplError> {
    let bytes = expect_variant!(value, Blob, "Blob")?;
    vl::encode(bytes).map_err(Into::into)
}

fn deserialize_blob(scanner: &mut Scanner<'_>, _: &FieldTable, _: bool) -> Result<FieldValue, XrplError> {
    Ok(FieldValue::Blob(vl::decode(scanner)?.to_vec()))
}

macro_rules! fixed_hash_codec {
    ($serialize_fn:ident, $deserialize_fn:ident, $variant:ident, $len:literal) => {
        fn $serialize_fn(value: &FieldValue, _: &FieldTable, _: bool) -> Result<Vec<u8>, XrplError> {
            Ok(expect_variant!(value, $variant, stringify!($variant))?.to_vec())
        }

        fn $deserialize_fn(
            scanner: &mut Scanner<'_>,
            _: &FieldTable,
            _: bool,
        ) -> Result<FieldValue, XrplError> {
            let bytes = scanner.take($len)?;
            let array: [u8; $len] = bytes.try_into().expect("exact length read; qed");
            Ok(FieldValue::$variant(array))
        }
    };
}

fixed_hash_codec!(serialize_hash128, deserialize_hash128, Hash128, 16);
fixed_hash_codec!(serialize_hash160, deserialize_hash160, Hash160, 20);
fixed_hash_codec!(serialize_hash256, deserialize_hash256, Hash256, 32);

macro_rules! uint_codec {
    ($serialize_fn:ident, $deserialize_fn:ident, $variant:ident, $int:ty, $len:literal) => {
        fn $serialize_fn(value: &FieldValue, _: &FieldTable, _: bool) -> Result<Vec<u8>, XrplError> {
            let n = expect_variant!(value, $variant, stringify!($variant))?;
            Ok(n.to_be_bytes().to_vec())
        }

        fn $deserialize_fn(
            scanner: &mut Scanner<'_>,
            _: &FieldTable,
            _: bool,
        ) -> Result<FieldValue, XrplError> {
            let bytes = scanner.take($len)?;
            let array: [u8; $len] = bytes.try_into().expect("exact length read; qed");
            Ok(FieldValue::$variant(<$int>::from_be_bytes(array)))
        }
    };
}

uint_codec!(serialize_uint8, deserialize_uint8, UInt8, u8, 1);
uint_codec!(serialize_uint16, deserialize_uint16, UInt16, u16, 2);
uint_codec!(serialize_uint32, deserialize_uint32, UInt32, u32, 4);
uint_codec!(serialize_uint64, deserialize_uint64, UInt64, u64, 8);

fn serialize_vector256(value: &FieldValue, _: &FieldTable, _: bool) -> Result<Vec<u8>, XrplError> {
    let hashes = expect_variant!(value, Vector256, "Vector256")?;
    let mut flat = Vec::with_capacity(hashes.len() * 32);
    for hash in hashes {
        flat.extend_from_slice(hash);
    }
    vl::encode(&flat).map_err(Into::into)
}

fn deserialize_vector256(
    scanner: &mut Scanner<'_>,
    _: &FieldTable,
    _: bool,
) -> Result<FieldValue, XrplError> {
    let bytes = vl::decode(scanner)?;
    if bytes.len() % 32 != 0 {
        return Err(FieldError::HashLengthMismatch { expected: 256, actual: bytes.len() * 8, value: hex::encode(bytes) }.into());
    }
    let hashes = bytes
        .chunks_exact(32)
        .map(|chunk| chunk.try_into().expect("32-byte chunk; qed"))
        .collect();
    Ok(FieldValue::Vector256(hashes))
}

fn serialize_pathset(value: &FieldValue, _: &FieldTable, _: bool) -> Result<Vec<u8>, XrplError> {
    pathset::serialize(expect_variant!(value, PathSet, "PathSet")?)
}

fn deserialize_pathset(scanner: &mut Scanner<'_>, _: &FieldTable, _: bool) -> Result<FieldValue, XrplError> {
    Ok(FieldValue::PathSet(pathset::deserialize(scanner)?))
}

fn serialize_stobject(value: &FieldValue, table: &FieldTable, signing: bool) -> Result<Vec<u8>, XrplError> {
    object::serialize_object(expect_variant!(value, STObject, "STObject")?, table, signing, true)
}

fn deserialize_stobject(
    scanner: &mut Scanner<'_>,
    table: &FieldTable,
    signing: bool,
) -> Result<FieldValue, XrplError> {
    Ok(FieldValue::STObject(object::deserialize_object(scanner, table, signing)?))
}

fn serialize_starray(value: &FieldValue, table: &FieldTable, signing: bool) -> Result<Vec<u8>, XrplError> {
    object::serialize_array(expect_variant!(value, STArray, "STArray")?, table, signing)
}

fn deserialize_starray(
    scanner: &mut Scanner<'_>,
    table: &FieldTable,
    signing: bool,
) -> Result<FieldValue, XrplError> {
    Ok(FieldValue::STArray(object::deserialize_array(scanner, table, signing)?))
}

fn serialize_transaction_type(
    value: &FieldValue,
    table: &FieldTable,
    _: bool,
) -> Result<Vec<u8>, XrplError> {
    let name = expect_variant!(value, TransactionType, "TransactionType")?;
    let code = table.transaction_type_code(name)?;
    Ok(code.to_be_bytes().to_vec())
}

fn deserialize_transaction_type(
    scanner: &mut Scanner<'_>,
    table: &FieldTable,
    _: bool,
) -> Result<FieldValue, XrplError> {
    let bytes = scanner.take(2)?;
    let code = u16::from_be_bytes(bytes.try_into().expect("2 bytes; qed"));
    Ok(FieldValue::TransactionType(table.transaction_type_name(code)?.to_string()))
}

fn serialize_ledger_entry_type(
    value: &FieldValue,
    table: &FieldTable,
    _: bool,
) -> Result<Vec<u8>, XrplError> {
    let name = expect_variant!(value, LedgerEntryType, "LedgerEntryType")?;
    let code = table.ledger_entry_type_code(name)?;
    Ok(code.to_be_bytes().to_vec())
}

fn deserialize_ledger_entry_type(
    scanner: &mut Scanner<'_>,
    table: &FieldTable,
    _: bool,
) -> Result<FieldValue, XrplError> {
    let bytes = scanner.take(2)?;
    let code = u16::from_be_bytes(bytes.try_into().expect("2 bytes; qed"));
    Ok(FieldValue::LedgerEntryType(table.ledger_entry_type_name(code)?.to_string()))
}

/// Looks up the `(serialize, deserialize)` function pair for a type name.
#[must_use]
pub fn dispatch_for(type_name: &str) -> Option<(SerializeFn, DeserializeFn)> {
    Some(match type_name {
        "AccountID" => (serialize_account_id, deserialize_account_id),
        "Amount" => (serialize_amount, deserialize_amount),
        "Blob" => (serialize_blob, deserialize_blob),
        "Hash128" => (serialize_hash128, deserialize_hash128),
        "Hash160" => (serialize_hash160, deserialize_hash160),
        "Hash256" => (serialize_hash256, deserialize_hash256),
        "PathSet" => (serialize_pathset, deserialize_pathset),
        "UInt8" => (serialize_uint8, deserialize_uint8),
        "UInt16" => (serialize_uint16, deserialize_uint16),
        "UInt32" => (serialize_uint32, deserialize_uint32),
        "UInt64" => (serialize_uint64, deserialize_uint64),
        "Vector256" => (serialize_vector256, deserialize_vector256),
        "STObject" => (serialize_stobject, deserialize_stobject),
        "STArray" => (serialize_starray, deserialize_starray),
        "TransactionType" => (serialize_transaction_type, deserialize_transaction_type),
        "LedgerEntryType" => (serialize_ledger_entry_type, deserialize_ledger_entry_type),
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uint32_round_trips() {
        let value = FieldValue::UInt32(524_288);
        let bytes = serialize_uint32(&value, FieldTable::bundled(), false).unwrap();
        let mut scanner = Scanner::new(&bytes);
        assert_eq!(deserialize_uint32(&mut scanner, FieldTable::bundled(), false).unwrap(), value);
    }

    #[test]
    fn hash256_round_trips() {
        let value = FieldValue::Hash256([7u8; 32]);
        let bytes = serialize_hash256(&value, FieldTable::bundled(), false).unwrap();
        assert_eq!(bytes.len(), 32);
        let mut scanner = Scanner::new(&bytes);
        assert_eq!(deserialize_hash256(&mut scanner, FieldTable::bundled(), false).unwrap(), value);
    }

    #[test]
    fn blob_round_trips_through_vl_prefix() {
        let value = FieldValue::Blob(vec![1, 2, 3, 4, 5]);
        let bytes = serialize_blob(&value, FieldTable::bundled(), false).unwrap();
        assert_eq!(bytes[0], 5);
        let mut scanner = Scanner::new(&bytes);
        assert_eq!(deserialize_blob(&mut scanner, FieldTable::bundled(), false).unwrap(), value);
    }

    #[test]
    fn transaction_type_round_trips() {
        let value = FieldValue::TransactionType("OfferCreate".to_string());
        let bytes = serialize_transaction_type(&value, FieldTable::bundled(), false).unwrap();
        assert_eq!(bytes, vec![0, 7]);
        let mut scanner = Scanner::new(&bytes);
        assert_eq!(
            deserialize_transaction_type(&mut scanner, FieldTable::bundled(), false).unwrap(),
            value
        );
    }
}
