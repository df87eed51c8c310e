//! The `Amount` codec: signed XRP drops, or an issued-currency value with a
//! canonical 64-bit mantissa/exponent encoding.
use crate::base58::DEFAULT_CODEC;
use crate::error::{AmountError, XrplError};
use crate::scanner::Scanner;

const MIN_MANTISSA: u128 = 1_000_000_000_000_000;
const MAX_MANTISSA: u128 = 9_999_999_999_999_999;
const MIN_EXPONENT: i32 = -96;
const MAX_EXPONENT: i32 = 80;
const MAX_DROPS: i64 = 100_000_000_000_000_000;

const NOT_XRP_BIT: u64 = 1 << 63;
const POSITIVE_BIT: u64 = 1 << 62;
const MANTISSA_MASK: u64 = (1 << 54) - 1;
const CANONICAL_ZERO: u64 = NOT_XRP_BIT;

/// An XRPL amount: either signed XRP drops or an issued-currency value.
#[derive(Clone, Debug, PartialEq)]
pub enum Amount {
    /// Signed integer drops (1 XRP = 10^6 drops).
    Xrp(i64),
    /// A non-XRP balance: a decimal string, a currency code, and an issuer address.
    Issued {
        /// Decimal value, e.g. `"7072.8"`.
        value: String,
        /// 3-character ISO-style code, 40-hex-character code, or `"XRP"`.
        currency: String,
        /// Issuer's base-58 address.
        issuer: String,
    },
}

fn parse_decimal(s: &str) -> Result<(bool, u128, i32), AmountError> {
    let trimmed = s.trim();
    let (positive, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (false, rest),
        None => (true, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((i, f)) => (i, f),
        None => (rest, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(AmountError::InvalidDecimal(s.to_string()));
    }
    let mut digits = String::with_capacity(int_part.len() + frac_part.len());
    digits.push_str(int_part);
    digits.push_str(frac_part);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AmountError::InvalidDecimal(s.to_string()));
    }
    let exponent = -(frac_part.len() as i32);
    let trimmed_digits = digits.trim_start_matches('0');
    let mantissa_str = if trimmed_digits.is_empty() { "0" } else { trimmed_digits };
    let mantissa: u128 =
        mantissa_str.parse().map_err(|_| AmountError::InvalidDecimal(s.to_string()))?;
    Ok((positive, mantissa, exponent))
}

/// Brings `(mantissa, exponent)` into the canonical 15-digit-precision
/// window, or signals that the value collapses to canonical zero.
fn normalize(mut mantissa: u128, mut exponent: i32) -> Result<Option<(u128, i32)>, AmountError> {
    if mantissa == 0 {
        return Ok(None);
    }
    while mantissa < MIN_MANTISSA && exponent > MIN_EXPONENT {
        mantissa *= 10;
        exponent -= 1;
    }
    while mantissa > MAX_MANTISSA {
        if exponent >= MAX_EXPONENT {
            return Err(AmountError::Overflow);
        }
        mantissa /= 10;
        exponent += 1;
    }
    if exponent < MIN_EXPONENT || mantissa < MIN_MANTISSA {
        return Ok(None);
    }
    if exponent > MAX_EXPONENT {
        return Err(AmountError::Overflow);
    }
    Ok(Some((mantissa, exponent)))
}

fn pack(positive: bool, mantissa: u128, exponent: i32) -> u64 {
    let mut word = NOT_XRP_BIT;
    if positive {
        word |= POSITIVE_BIT;
    }
    let exponent_field = (exponent + 97) as u64;
    word |= exponent_field << 54;
    word |= (mantissa as u64) & MANTISSA_MASK;
    word
}

fn encode_issued_value(value: &str) -> Result<u64, AmountError> {
    let (positive, mantissa, exponent) = parse_decimal(value)?;
    Ok(match normalize(mantissa, exponent)? {
        None => CANONICAL_ZERO,
        Some((mantissa, exponent)) => pack(positive, mantissa, exponent),
    })
}

fn decode_issued_value(word: u64) -> String {
    if word == CANONICAL_ZERO {
        return "0".to_string();
    }
    let positive = word & POSITIVE_BIT != 0;
    let exponent = ((word >> 54) & 0xFF) as i32 - 97;
    let mantissa = word & MANTISSA_MASK;
    let sign = if positive { "" } else { "-" };
    format!("{sign}{mantissa}e{exponent}")
}

/// Encodes a currency code into its 160-bit wire representation.
pub fn encode_currency(code: &str) -> Result<[u8; 20], AmountError> {
    if code == "XRP" {
        return Ok([0u8; 20]);
    }
    let is_iso = code.len() == 3
        && code.bytes().all(|b| {
            b.is_ascii_alphanumeric()
                || b"?!@#$%^&*<>(){}|[]".contains(&b)
        });
    if is_iso {
        let mut out = [0u8; 20];
        out[12..15].copy_from_slice(code.as_bytes());
        return Ok(out);
    }
    if code.len() == 40 && code.bytes().all(|b| b.is_ascii_hexdigit()) {
        let bytes = hex::decode(code).map_err(|_| AmountError::BadCurrency(code.to_string()))?;
        let mut out = [0u8; 20];
        out.copy_from_slice(&bytes);
        return Ok(out);
    }
    Err(AmountError::BadCurrency(code.to_string()))
}

/// Decodes a 160-bit wire currency representation back into a code string.
#[must_use]
pub fn decode_currency(bytes: &[u8; 20]) -> String {
    if bytes.iter().all(|&b| b == 0) {
        return "XRP".to_string();
    }
    if bytes[0] == 0 {
        return String::from_utf8_lossy(&bytes[12..15]).to_string();
    }
    hex::encode_upper(bytes)
}

/// Serializes an `Amount` to its wire bytes (8 bytes for XRP, 48 for issued).
pub fn serialize(amount: &Amount) -> Result<Vec<u8>, XrplError> {
    match amount {
        Amount::Xrp(drops) => {
            if drops.unsigned_abs() > MAX_DROPS as u64 {
                return Err(AmountError::DropsOutOfRange(*drops).into());
            }
            let mut word = drops.unsigned_abs();
            if *drops >= 0 {
                word |= POSITIVE_BIT;
            }
            Ok(word.to_be_bytes().to_vec())
        },
        Amount::Issued { value, currency, issuer } => {
            let word = encode_issued_value(value)?;
            let mut out = word.to_be_bytes().to_vec();
            out.extend_from_slice(&encode_currency(currency)?);
            let account_id =
                DEFAULT_CODEC.decode_address(issuer).map_err(crate::error::XrplError::Base58)?;
            out.extend_from_slice(&account_id);
            Ok(out)
        },
    }
}

/// Deserializes an `Amount` from wire bytes.
pub fn deserialize(scanner: &mut Scanner<'_>) -> Result<Amount, XrplError> {
    let word = u64::from_be_bytes(scanner.take(8)?.try_into().expect("8 bytes; qed"));
    if word & NOT_XRP_BIT == 0 {
        let positive = word & POSITIVE_BIT != 0;
        let magnitude = (word & (POSITIVE_BIT - 1)) as i64;
        return Ok(Amount::Xrp(if positive { magnitude } else { -magnitude }));
    }
    let value = decode_issued_value(word);
    let currency_bytes: [u8; 20] = scanner.take(20)?.try_into().expect("20 bytes; qed");
    let issuer_bytes: [u8; 20] = scanner.take(20)?.try_into().expect("20 bytes; qed");
    Ok(Amount::Issued {
        value,
        currency: decode_currency(&currency_bytes),
        issuer: DEFAULT_CODEC.encode_address(&issuer_bytes),
    })
}
