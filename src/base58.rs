//! Alphabet-parameterized base-58 codec with a 4-byte checksum, as used for XRPL
//! addresses and seeds.
use crate::error::Base58Error;
use crate::hash::checksum as default_checksum;
use crate::keys::Algorithm;

/// The alphabet used by the XRP Ledger network (note: not the Bitcoin alphabet).
pub const XRPL_ALPHABET: &str = "rpshnaf39wBUDNEGHJKLM4PQRST7VWXYZ2bcdeCg65jkm8oFqi1tuvAxyz";

const ADDRESS_PREFIX: u8 = 0x00;

/// A base-58 codec bound to a specific alphabet and checksum function.
pub struct Codec {
    alphabet: [u8; 58],
    base: u32,
}

impl Default for Codec {
    fn default() -> Self {
        Self::new(XRPL_ALPHABET)
    }
}

impl Codec {
    /// Builds a codec from a 58-character alphabet string.
    ///
    /// # Panics
    /// Panics if `alphabet` is not exactly 58 ASCII characters.
    #[must_use]
    pub fn new(alphabet: &str) -> Self {
        let bytes = alphabet.as_bytes();
        assert_eq!(bytes.len(), 58, "base58 alphabet must have 58 characters");
        let mut table = [0u8; 58];
        table.copy_from_slice(bytes);
        Self { alphabet: table, base: 58 }
    }

    fn digit_value(&self, c: u8) -> Option<u32> {
        self.alphabet.iter().position(|&a| a == c).map(|i| i as u32)
    }

    /// Encodes `bytes` as a base-58 string, preserving leading zero bytes as
    /// leading alphabet-zero characters.
    #[must_use]
    pub fn encode(&self, bytes: &[u8]) -> String {
        let zeroes = bytes.iter().take_while(|&&b| b == 0).count();
        let sigfig = &bytes[zeroes..];

        // Big-endian base-256 -> base-58 conversion via repeated division, done
        // byte-by-byte so we never need a bignum type.
        let mut digits: Vec<u8> = vec![0];
        for &byte in sigfig {
            let mut carry = u32::from(byte);
            for digit in &mut digits {
                carry += u32::from(*digit) << 8;
                *digit = (carry % self.base) as u8;
                carry /= self.base;
            }
            while carry > 0 {
                digits.push((carry % self.base) as u8);
                carry /= self.base;
            }
        }

        let mut out = String::with_capacity(zeroes + digits.len());
        out.extend(std::iter::repeat(self.alphabet[0] as char).take(zeroes));
        out.extend(digits.iter().rev().map(|&d| self.alphabet[d as usize] as char));
        out
    }

    /// Decodes a base-58 string back into bytes.
    pub fn decode(&self, s: &str) -> Result<Vec<u8>, Base58Error> {
        let zero_char = self.alphabet[0] as char;
        let zeroes = s.chars().take_while(|&c| c == zero_char).count();
        let sigfig = &s[zeroes..];

        // Base-58 -> base-256 conversion via repeated division, inverse of `encode`.
        let mut bytes: Vec<u8> = vec![0];
        for c in sigfig.chars() {
            let digit = self
                .digit_value(c as u8)
                .ok_or(Base58Error::InvalidCharacter(c))?;
            let mut carry = digit;
            for byte in &mut bytes {
                carry += u32::from(*byte) * self.base;
                *byte = (carry & 0xFF) as u8;
                carry >>= 8;
            }
            while carry > 0 {
                bytes.push((carry & 0xFF) as u8);
                carry >>= 8;
            }
        }

        let mut out = vec![0u8; zeroes];
        out.extend(bytes.iter().rev());
        Ok(out)
    }

    /// Appends the checksum and encodes.
    #[must_use]
    pub fn encode_with_checksum(&self, bytes: &[u8]) -> String {
        let check = default_checksum(bytes);
        let mut payload = Vec::with_capacity(bytes.len() + 4);
        payload.extend_from_slice(bytes);
        payload.extend_from_slice(&check);
        self.encode(&payload)
    }

    /// Decodes and verifies the trailing 4-byte checksum, returning the payload
    /// without it.
    pub fn decode_with_checksum(&self, s: &str) -> Result<Vec<u8>, Base58Error> {
        let bytes = self.decode(s)?;
        if bytes.len() < 4 {
            return Err(Base58Error::PayloadTooShort);
        }
        let (payload, check) = bytes.split_at(bytes.len() - 4);
        if default_checksum(payload) != check {
            return Err(Base58Error::ChecksumMismatch);
        }
        Ok(payload.to_vec())
    }

    /// Encodes a 16-byte seed with the algorithm's prefix and a checksum.
    pub fn encode_seed(&self, seed: &[u8], algorithm: Algorithm) -> Result<String, Base58Error> {
        if seed.len() != 16 {
            return Err(Base58Error::BadSeedLength(seed.len()));
        }
        let mut payload = Vec::with_capacity(algorithm.seed_prefix().len() + 16);
        payload.extend_from_slice(algorithm.seed_prefix());
        payload.extend_from_slice(seed);
        Ok(self.encode_with_checksum(&payload))
    }

    /// Decodes a seed string, matching its prefix against every algorithm in turn.
    pub fn decode_seed(
        &self,
        s: &str,
        candidates: &[Algorithm],
    ) -> Result<(Vec<u8>, Algorithm), Base58Error> {
        let payload = self.decode_with_checksum(s)?;
        for &algorithm in candidates {
            let prefix = algorithm.seed_prefix();
            if payload.starts_with(prefix) {
                return Ok((payload[prefix.len()..].to_vec(), algorithm));
            }
        }
        Err(Base58Error::UnknownAlgorithm)
    }

    /// Encodes a 20-byte account ID as an `r`-prefixed address.
    #[must_use]
    pub fn encode_address(&self, account_id: &[u8]) -> String {
        let mut payload = Vec::with_capacity(account_id.len() + 1);
        payload.push(ADDRESS_PREFIX);
        payload.extend_from_slice(account_id);
        self.encode_with_checksum(&payload)
    }

    /// Decodes an address string back into its 20-byte account ID.
    pub fn decode_address(&self, s: &str) -> Result<Vec<u8>, Base58Error> {
        let payload = self.decode_with_checksum(s)?;
        Ok(payload[1..].to_vec())
    }
}

/// The codec instance used everywhere in this crate: XRPL alphabet, double-SHA256 checksum.
pub static DEFAULT_CODEC: once_cell::sync::Lazy<Codec> = once_cell::sync::Lazy::new(Codec::default);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_arbitrary_bytes() {
        let codec = Codec::default();
        for input in [
            &b""[..],
            &b"\x00\x00\x01"[..],
            &b"hello, xrpl"[..],
            &[0u8; 20][..],
            &[0xFFu8; 33][..],
        ] {
            let encoded = codec.encode(input);
            let decoded = codec.decode(&encoded).unwrap();
            assert_eq!(decoded, input);
        }
    }

    #[test]
    fn checksum_mismatch_is_detected() {
        let codec = Codec::default();
        let good = codec.encode_with_checksum(b"payload");
        let mut bad = good.into_bytes();
        let last = *bad.last().unwrap();
        let swapped = if last == bad[0] { bad[1] } else { bad[0] };
        *bad.last_mut().unwrap() = swapped;
        let bad = String::from_utf8(bad).unwrap();
        assert_eq!(
            codec.decode_with_checksum(&bad),
            Err(Base58Error::ChecksumMismatch)
        );
    }

    #[test]
    fn seed_round_trip() {
        let codec = Codec::default();
        let seed = [7u8; 16];
        for algorithm in [Algorithm::Ed25519, Algorithm::Secp256k1] {
            let encoded = codec.encode_seed(&seed, algorithm).unwrap();
            let (decoded, alg) = codec
                .decode_seed(&encoded, &[Algorithm::Ed25519, Algorithm::Secp256k1])
                .unwrap();
            assert_eq!(decoded, seed);
            assert_eq!(alg, algorithm);
        }
    }

    #[test]
    fn bad_seed_length_is_rejected() {
        let codec = Codec::default();
        assert_eq!(
            codec.encode_seed(&[0u8; 15], Algorithm::Ed25519),
            Err(Base58Error::BadSeedLength(15))
        );
    }

    #[test]
    fn address_round_trip() {
        let codec = Codec::default();
        let account_id = hex::decode("ba8e78626ee42c41b46d46c3048df3a1c3c87072").unwrap();
        assert_eq!(account_id.len(), 20);
        let address = codec.encode_address(&account_id);
        assert!(address.starts_with('r'));
        assert_eq!(codec.decode_address(&address).unwrap(), account_id);
    }

    #[test]
    fn known_address_vector() {
        // rLUEXYuLiQptky37CqLcm9USQpPiz5rkpD is the well-known address for the
        // account ID derived from public key ED01FA53FA5A7E77798F882ECE20B1ABC00BB358A9E55A202D0D0676BD0CE37A63.
        let codec = Codec::default();
        let account_id = crate::hash::ripemd160(&crate::hash::sha256(
            &hex::decode("ED01FA53FA5A7E77798F882ECE20B1ABC00BB358A9E55A202D0D0676BD0CE37A63").unwrap(),
        ));
        assert_eq!(codec.encode_address(&account_id), "rLUEXYuLiQptky37CqLcm9USQpPiz5rkpD");
    }
}
