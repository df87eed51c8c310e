//! Variable-length prefixing for blob-typed fields: a 1-3 byte length header
//! whose width depends on the payload length.
use crate::error::{FieldError, ScannerError};
use crate::scanner::Scanner;

const TIER1_MAX: usize = 192;
const TIER2_MAX: usize = 12480;
const TIER3_MAX: usize = 918_744;

/// Encodes a VL length prefix.
pub fn encode_length(len: usize) -> Result<Vec<u8>, FieldError> {
    if len <= TIER1_MAX {
        Ok(vec![len as u8])
    } else if len <= TIER2_MAX {
        let len = len - 193;
        Ok(vec![(193 + len / 256) as u8, (len % 256) as u8])
    } else if len <= TIER3_MAX {
        let len = len - 12481;
        Ok(vec![(241 + len / 65536) as u8, ((len / 256) % 256) as u8, (len % 256) as u8])
    } else {
        Err(FieldError::BlobTooLong(len))
    }
}

/// Encodes `bytes` with its VL length prefix.
pub fn encode(bytes: &[u8]) -> Result<Vec<u8>, FieldError> {
    let mut out = encode_length(bytes.len())?;
    out.extend_from_slice(bytes);
    Ok(out)
}

/// Reads a VL length prefix, returning the decoded length.
pub fn decode_length(scanner: &mut Scanner<'_>) -> Result<usize, ScannerError> {
    let first = scanner.take1()?;
    if first <= 192 {
        Ok(first as usize)
    } else if first <= 240 {
        let second = scanner.take1()?;
        Ok(193 + (usize::from(first) - 193) * 256 + usize::from(second))
    } else if first <= 254 {
        let second = scanner.take1()?;
        let third = scanner.take1()?;
        Ok(12481 + (usize::from(first) - 241) * 65536 + usize::from(second) * 256 + usize::from(third))
    } else {
        Err(ScannerError::BadLengthPrefix(first))
    }
}

/// Reads a VL-prefixed payload.
pub fn decode<'a>(scanner: &mut Scanner<'a>) -> Result<&'a [u8], ScannerError> {
    let len = decode_length(scanner)?;
    scanner.take(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries_round_trip() {
        for len in [0usize, 1, 192, 193, 12480, 12481, 918_744] {
            let prefix = encode_length(len).unwrap();
            let mut scanner = Scanner::new(&prefix);
            assert_eq!(decode_length(&mut scanner).unwrap(), len);
        }
    }

    #[test]
    fn over_ceiling_is_rejected() {
        assert_eq!(encode_length(918_745), Err(FieldError::BlobTooLong(918_745)));
    }

    #[test]
    fn payload_round_trips() {
        let payload = vec![0xAB; 300];
        let encoded = encode(&payload).unwrap();
        let mut scanner = Scanner::new(&encoded);
        assert_eq!(decode(&mut scanner).unwrap(), payload.as_slice());
    }
}
