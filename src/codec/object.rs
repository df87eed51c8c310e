//! `STObject`/`STArray` codecs: the nested containers that make up every
//! transaction and ledger entry.
use crate::error::XrplError;
use crate::fields::{self, FieldTable};
use crate::scanner::Scanner;

use super::FieldValue;

/// An ordered field-name to value mapping; wire order is re-derived at
/// serialize time from the field table, not from insertion order.
pub type StObject = Vec<(String, FieldValue)>;

/// Serializes an object's fields, sorted by `(type_code, field_code)`.
///
/// `signing` restricts output to signing fields; `marker` appends
/// `ObjectEndMarker` (used for every nested object, never the top-level
/// transaction).
pub fn serialize_object(
    object: &StObject,
    table: &FieldTable,
    signing: bool,
    marker: bool,
) -> Result<Vec<u8>, XrplError> {
    let mut entries = Vec::with_capacity(object.len());
    for (name, value) in object {
        let record = table.get(name)?;
        if !record.is_serialized || (signing && !record.is_signing_field) {
            continue;
        }
        entries.push((record, value));
    }
    entries.sort_by_key(|(record, _)| (record.type_code, record.field_code));

    let mut out = Vec::new();
    for (record, value) in entries {
        tracing::trace!(field = %record.name, type_name = %record.type_name, "serializing field");
        out.extend_from_slice(&record.id_bytes);
        out.extend_from_slice(&table.serialize_value(record, value, signing)?);
    }
    if marker {
        out.push(fields::OBJECT_END_MARKER);
    }
    Ok(out)
}

/// Deserializes an object's fields until `ObjectEndMarker` or the buffer is
/// exhausted (the latter terminates a top-level transaction, which carries
/// no trailing marker).
pub fn deserialize_object(
    scanner: &mut Scanner<'_>,
    table: &FieldTable,
    signing: bool,
) -> Result<StObject, XrplError> {
    let mut object = Vec::new();
    loop {
        if scanner.is_exhausted() {
            break;
        }
        if scanner.peek()? == fields::OBJECT_END_MARKER {
            scanner.skip(1)?;
            break;
        }
        let (type_code, field_code) = fields::read_field_id(scanner)?;
        let name = table.name_for_code(type_code, field_code)?.to_string();
        let record = table.get(&name)?;
        tracing::trace!(field = %name, type_name = %record.type_name, "deserializing field");
        let value = table.deserialize_value(record, scanner, signing)?;
        object.push((name, value));
    }
    Ok(object)
}

/// Serializes an `STArray`: each element is itself a single-field object
/// (the wrapping field name mapped to its nested `STObject` value).
pub fn serialize_array(
    array: &[StObject],
    table: &FieldTable,
    signing: bool,
) -> Result<Vec<u8>, XrplError> {
    let mut out = Vec::new();
    for element in array {
        out.extend_from_slice(&serialize_object(element, table, signing, true)?);
    }
    out.push(fields::ARRAY_END_MARKER);
    Ok(out)
}

/// Deserializes an `STArray`.
pub fn deserialize_array(
    scanner: &mut Scanner<'_>,
    table: &FieldTable,
    signing: bool,
) -> Result<Vec<StObject>, XrplError> {
    let mut array = Vec::new();
    loop {
        if scanner.is_exhausted() {
            break;
        }
        if scanner.peek()? == fields::ARRAY_END_MARKER {
            scanner.skip(1)?;
            break;
        }
        array.push(deserialize_object(scanner, table, signing)?);
    }
    Ok(array)
}
