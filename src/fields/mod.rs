//! The field-definitions table: the registry mapping a transaction or
//! ledger-object field name to its wire type, its `(type_code, field_code)`
//! pair, and the codec used to (de)serialize it.
use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::codec::{self, FieldValue};
use crate::error::{FieldError, XrplError};
use crate::scanner::Scanner;

const BUNDLED_MANIFEST: &str = include_str!("definitions.json");

/// A `(value, context) -> bytes` serializer for one field type.
pub type SerializeFn = fn(&FieldValue, &FieldTable, bool) -> Result<Vec<u8>, XrplError>;
/// A `(scanner, context) -> value` deserializer for one field type.
pub type DeserializeFn = fn(&mut Scanner<'_>, &FieldTable, bool) -> Result<FieldValue, XrplError>;

/// An immutable entry in the field-definitions table.
#[derive(Clone)]
pub struct FieldRecord {
    /// The field's name, e.g. `"Account"`.
    pub name: String,
    /// The field's declared XRPL type name, e.g. `"AccountID"`.
    pub type_name: String,
    /// The numeric type code (matches `TYPES` in the manifest).
    pub type_code: u16,
    /// The field's `nth` value within its type.
    pub field_code: u16,
    /// Whether this field is ever written to the wire.
    pub is_serialized: bool,
    /// Whether this field participates in the transaction-signing blob.
    pub is_signing_field: bool,
    /// The precomputed 1-3 byte field-id header.
    pub id_bytes: Vec<u8>,
    serialize: SerializeFn,
    deserialize: DeserializeFn,
}

/// The field-definitions table: field records plus the transaction-type and
/// ledger-entry-type name tables.
pub struct FieldTable {
    by_name: HashMap<String, FieldRecord>,
    by_code: HashMap<(u16, u16), String>,
    transaction_types: HashMap<String, u16>,
    transaction_types_rev: HashMap<u16, String>,
    ledger_entry_types: HashMap<String, u16>,
    ledger_entry_types_rev: HashMap<u16, String>,
}

#[derive(Deserialize)]
struct RawFieldProps {
    #[serde(rename = "type")]
    type_name: String,
    nth: u16,
    #[serde(rename = "isSerialized")]
    is_serialized: bool,
    #[serde(rename = "isSigningField")]
    is_signing_field: bool,
    #[allow(dead_code)]
    #[serde(rename = "isVLEncoded", default)]
    is_vl_encoded: bool,
}

#[derive(Deserialize)]
struct RawManifest {
    #[serde(rename = "TYPES")]
    types: HashMap<String, u16>,
    #[serde(rename = "LEDGER_ENTRY_TYPES")]
    ledger_entry_types: HashMap<String, u16>,
    #[serde(rename = "TRANSACTION_TYPES")]
    transaction_types: HashMap<String, u16>,
    #[serde(rename = "FIELDS")]
    fields: Vec<(String, RawFieldProps)>,
}

/// Field-id header for the end of a serialized object.
pub const OBJECT_END_MARKER: u8 = 0xE1;
/// Field-id header for the end of a serialized array.
pub const ARRAY_END_MARKER: u8 = 0xF1;

impl FieldTable {
    /// Builds a table from a definitions-manifest JSON document.
    pub fn from_manifest_json(bytes: &[u8]) -> Result<Self, FieldError> {
        let raw: RawManifest =
            serde_json::from_slice(bytes).map_err(|err| FieldError::ManifestParse(err.to_string()))?;

        let mut by_name = HashMap::with_capacity(raw.fields.len());
        let mut by_code = HashMap::with_capacity(raw.fields.len());

        for (name, props) in raw.fields {
            if !props.is_serialized {
                continue;
            }
            let type_code = match props.type_name.as_str() {
                // TransactionType / LedgerEntryType are UInt16 on the wire but
                // dispatch through their own name -> code tables.
                "TransactionType" | "LedgerEntryType" => *raw
                    .types
                    .get("UInt16")
                    .ok_or_else(|| FieldError::ManifestParse("TYPES missing UInt16".into()))?,
                other => *raw
                    .types
                    .get(other)
                    .ok_or_else(|| FieldError::ManifestParse(format!("TYPES missing {other}")))?,
            };
            let field_code = props.nth;
            if type_code == 0 || type_code > 255 || field_code == 0 || field_code > 255 {
                return Err(FieldError::CodeOutOfRange(type_code, field_code));
            }
            let id_bytes = field_id_bytes(type_code, field_code);
            let (serialize, deserialize) = codec::dispatch_for(&props.type_name)
                .ok_or_else(|| FieldError::Unserializable {
                    name: name.clone(),
                    type_name: props.type_name.clone(),
                })?;

            by_code.insert((type_code, field_code), name.clone());
            by_name.insert(
                name.clone(),
                FieldRecord {
                    name,
                    type_name: props.type_name,
                    type_code,
                    field_code,
                    is_serialized: props.is_serialized,
                    is_signing_field: props.is_signing_field,
                    id_bytes,
                    serialize,
                    deserialize,
                },
            );
        }

        let transaction_types_rev = raw
            .transaction_types
            .iter()
            .map(|(name, &code)| (code, name.clone()))
            .collect();
        let ledger_entry_types_rev = raw
            .ledger_entry_types
            .iter()
            .map(|(name, &code)| (code, name.clone()))
            .collect();

        Ok(Self {
            by_name,
            by_code,
            transaction_types: raw.transaction_types,
            transaction_types_rev,
            ledger_entry_types: raw.ledger_entry_types,
            ledger_entry_types_rev,
        })
    }

    /// The process-wide table built from the bundled manifest.
    pub fn bundled() -> &'static Self {
        &BUNDLED
    }

    /// Looks up a field record by name.
    pub fn get(&self, name: &str) -> Result<&FieldRecord, FieldError> {
        self.by_name.get(name).ok_or_else(|| FieldError::UnknownField(name.to_string()))
    }

    /// Looks up the field name owning a `(type_code, field_code)` pair.
    pub fn name_for_code(&self, type_code: u16, field_code: u16) -> Result<&str, FieldError> {
        self.by_code
            .get(&(type_code, field_code))
            .map(String::as_str)
            .ok_or(FieldError::UnknownFieldId(type_code, field_code))
    }

    /// Serializes a single field's value through its registered codec.
    pub fn serialize_value(
        &self,
        record: &FieldRecord,
        value: &FieldValue,
        signing: bool,
    ) -> Result<Vec<u8>, FieldError> {
        (record.serialize)(value, self, signing).map_err(|err| FieldError::InField {
            name: record.name.clone(),
            type_name: record.type_name.clone(),
            source: Box::new(err),
        })
    }

    /// Deserializes a single field's value through its registered codec.
    pub fn deserialize_value(
        &self,
        record: &FieldRecord,
        scanner: &mut Scanner<'_>,
        signing: bool,
    ) -> Result<FieldValue, FieldError> {
        (record.deserialize)(scanner, self, signing).map_err(|err| FieldError::InField {
            name: record.name.clone(),
            type_name: record.type_name.clone(),
            source: Box::new(err),
        })
    }

    /// Maps a transaction-type name to its numeric code.
    pub fn transaction_type_code(&self, name: &str) -> Result<u16, FieldError> {
        self.transaction_types
            .get(name)
            .copied()
            .ok_or_else(|| FieldError::UnknownTransactionType(name.to_string()))
    }

    /// Maps a numeric transaction-type code back to its name.
    pub fn transaction_type_name(&self, code: u16) -> Result<&str, FieldError> {
        self.transaction_types_rev
            .get(&code)
            .map(String::as_str)
            .ok_or_else(|| FieldError::UnknownTransactionType(code.to_string()))
    }

    /// Maps a ledger-entry-type name to its numeric code.
    pub fn ledger_entry_type_code(&self, name: &str) -> Result<u16, FieldError> {
        self.ledger_entry_types
            .get(name)
            .copied()
            .ok_or_else(|| FieldError::UnknownLedgerEntryType(name.to_string()))
    }

    /// Maps a numeric ledger-entry-type code back to its name.
    pub fn ledger_entry_type_name(&self, code: u16) -> Result<&str, FieldError> {
        self.ledger_entry_types_rev
            .get(&code)
            .map(String::as_str)
            .ok_or_else(|| FieldError::UnknownLedgerEntryType(code.to_string()))
    }
}

/// Packs a `(type_code, field_code)` pair into its 1-3 byte wire header.
#[must_use]
pub fn field_id_bytes(type_code: u16, field_code: u16) -> Vec<u8> {
    match (type_code < 16, field_code < 16) {
        (true, true) => vec![((type_code << 4) | field_code) as u8],
        (false, true) => vec![field_code as u8, type_code as u8],
        (true, false) => vec![(type_code << 4) as u8, field_code as u8],
        (false, false) => vec![0, type_code as u8, field_code as u8],
    }
}

/// Reads a `(type_code, field_code)` pair off the wire, mirroring
/// [`field_id_bytes`].
pub fn read_field_id(scanner: &mut Scanner<'_>) -> Result<(u16, u16), crate::error::ScannerError> {
    let first = scanner.take1()?;
    let high = u16::from(first >> 4);
    let low = u16::from(first & 0x0F);
    let type_code = if high == 0 { u16::from(scanner.take1()?) } else { high };
    let field_code = if low == 0 { u16::from(scanner.take1()?) } else { low };
    Ok((type_code, field_code))
}

static BUNDLED: Lazy<FieldTable> = Lazy::new(|| {
    FieldTable::from_manifest_json(BUNDLED_MANIFEST.as_bytes())
        .expect("bundled definitions.json is well-formed; qed")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_id_encoding_matches_nibble_rules() {
        assert_eq!(field_id_bytes(8, 1), vec![0x81]);
        assert_eq!(field_id_bytes(2, 2), vec![0x22]);
        assert_eq!(field_id_bytes(1, 2), vec![0x12]);
        assert_eq!(field_id_bytes(2, 25), vec![0x20, 0x19]);
        assert_eq!(field_id_bytes(18, 1), vec![0x01, 0x12]);
    }

    #[test]
    fn field_id_round_trips_through_scanner() {
        for (type_code, field_code) in [(8u16, 1u16), (2, 2), (1, 2), (2, 25), (18, 1), (250, 250)] {
            let bytes = field_id_bytes(type_code, field_code);
            let mut scanner = Scanner::new(&bytes);
            assert_eq!(read_field_id(&mut scanner).unwrap(), (type_code, field_code));
        }
    }

    #[test]
    fn bundled_table_resolves_known_fields() {
        let table = FieldTable::bundled();
        let account = table.get("Account").unwrap();
        assert_eq!(account.id_bytes, vec![0x81]);
        let offer_sequence = table.get("OfferSequence").unwrap();
        assert_eq!(offer_sequence.id_bytes, vec![0x20, 0x19]);
        assert_eq!(table.transaction_type_code("OfferCreate").unwrap(), 7);
    }

    #[test]
    fn unknown_field_is_reported() {
        let table = FieldTable::bundled();
        assert!(matches!(table.get("NotAField"), Err(FieldError::UnknownField(_))));
    }
}
