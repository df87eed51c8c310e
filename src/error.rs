use thiserror::Error;

/// Errors raised while encoding or decoding base-58 payloads (addresses, seeds).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Base58Error {
    /// A character outside the configured alphabet was encountered while decoding.
    #[error("character {0:?} is not part of the base58 alphabet")]
    InvalidCharacter(char),

    /// The trailing 4-byte checksum did not match the payload.
    #[error("checksum mismatch")]
    ChecksumMismatch,

    /// A seed must carry exactly 16 bytes of entropy.
    #[error("seed must have exactly 16 bytes of entropy, got {0}")]
    BadSeedLength(usize),

    /// None of the candidate algorithms' prefixes matched the decoded payload.
    #[error("unknown signing algorithm prefix")]
    UnknownAlgorithm,

    /// The decoded payload was shorter than the checksum it's supposed to carry.
    #[error("payload too short to contain a checksum")]
    PayloadTooShort,
}

/// Errors raised while packing or unpacking an `Amount`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    /// Issued-amount magnitude could not be represented in 54-bit mantissa / 8-bit exponent.
    #[error("amount overflow")]
    Overflow,

    /// XRP drop magnitude exceeds the protocol ceiling of 10^17.
    #[error("XRP amount {0} exceeds the maximum of 100,000,000,000,000,000 drops")]
    DropsOutOfRange(i64),

    /// Currency code matched neither the ISO-4217-style pattern nor the 40-hex pattern.
    #[error("unrecognized currency code: {0:?}")]
    BadCurrency(String),

    /// A decimal string could not be parsed as a number.
    #[error("invalid decimal value: {0:?}")]
    InvalidDecimal(String),
}

/// Errors raised by the field-definitions table and the object/array codecs built on it.
#[derive(Debug, Error)]
pub enum FieldError {
    /// A field name is not present in the definitions table.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// A field is known, but has no (de)serializer registered for its type.
    #[error("field {name} ({type_name}): no codec registered")]
    Unserializable {
        /// Field name.
        name: String,
        /// Field's declared XRPL type name.
        type_name: String,
    },

    /// A codec raised an error while handling a specific field.
    #[error("field {name} ({type_name}): {source}")]
    InField {
        /// Field name.
        name: String,
        /// Field's declared XRPL type name.
        type_name: String,
        /// Underlying cause.
        #[source]
        source: Box<XrplError>,
    },

    /// A `(type_code, field_code)` pair read off the wire has no matching field.
    #[error("unknown field id: type {0}, field {1}")]
    UnknownFieldId(u16, u16),

    /// A hex-encoded hash field had the wrong byte length.
    #[error("expected {expected} bits, got {actual} bits: {value:?}")]
    HashLengthMismatch {
        /// Expected bit length.
        expected: usize,
        /// Actual bit length found.
        actual: usize,
        /// Offending hex string.
        value: String,
    },

    /// A variable-length field exceeded the protocol ceiling.
    #[error("blob of {0} bytes exceeds the 918744-byte VL-encoding ceiling")]
    BlobTooLong(usize),

    /// A `PathSet` or `Path` was empty.
    #[error("{0} must not be empty")]
    EmptyContainer(&'static str),

    /// A transaction type name was not found in the `TRANSACTION_TYPES` table.
    #[error("unknown transaction type: {0}")]
    UnknownTransactionType(String),

    /// A ledger entry type name was not found in the `LEDGER_ENTRY_TYPES` table.
    #[error("unknown ledger entry type: {0}")]
    UnknownLedgerEntryType(String),

    /// A type/field code pair does not fit the 1-255 range the wire format requires.
    #[error("type/field code out of range: type {0}, field {1}")]
    CodeOutOfRange(u16, u16),

    /// The manifest JSON was malformed.
    #[error("malformed field-definitions manifest: {0}")]
    ManifestParse(String),
}

impl PartialEq for FieldError {
    fn eq(&self, other: &Self) -> bool {
        format!("{self}") == format!("{other}")
    }
}

/// Errors raised while advancing a [`crate::Scanner`] past the end of its buffer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScannerError {
    /// The cursor was advanced past the end of the underlying byte stream.
    #[error("unexpected end of stream: wanted {wanted} bytes, {remaining} remained")]
    UnexpectedEndOfStream {
        /// Bytes requested.
        wanted: usize,
        /// Bytes actually remaining.
        remaining: usize,
    },

    /// A variable-length prefix's first byte did not encode a valid tier.
    #[error("not a length prefix: {0}")]
    BadLengthPrefix(u8),
}

/// Errors raised by key derivation, signing, and verification.
#[derive(Debug, Error)]
pub enum SignError {
    /// A key of the wrong length was supplied.
    #[error("expected a {expected}-byte key, got {actual} bytes")]
    BadKeyLength {
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// The underlying elliptic-curve crate rejected a key or signature.
    #[error("cryptographic operation failed: {0}")]
    Crypto(String),

    /// Signature verification returned false.
    #[error("signature verification failed")]
    SignatureVerification,
}

impl PartialEq for SignError {
    fn eq(&self, other: &Self) -> bool {
        format!("{self}") == format!("{other}")
    }
}

/// Aggregate error type for every public, fallible operation in this crate.
#[derive(Debug, Error, PartialEq)]
pub enum XrplError {
    /// Base-58 codec failure.
    #[error(transparent)]
    Base58(#[from] Base58Error),

    /// Amount codec failure.
    #[error(transparent)]
    Amount(#[from] AmountError),

    /// Field table / object codec failure.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// Scanner failure.
    #[error(transparent)]
    Scanner(#[from] ScannerError),

    /// Signing/verification failure.
    #[error(transparent)]
    Sign(#[from] SignError),

    /// A hex string could not be decoded.
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

impl From<hex::FromHexError> for XrplError {
    fn from(err: hex::FromHexError) -> Self {
        Self::InvalidHex(err.to_string())
    }
}
