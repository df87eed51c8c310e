//! `PathSet`/`Path`/`Step` codec: alternative payment routes through a
//! currency graph.
use crate::base58::DEFAULT_CODEC;
use crate::error::{FieldError, XrplError};
use crate::scanner::Scanner;

const PATH_SEPARATOR: u8 = 0xFF;
const PATHSET_END: u8 = 0x00;

const HAS_ACCOUNT: u8 = 0x01;
const HAS_CURRENCY: u8 = 0x10;
const HAS_ISSUER: u8 = 0x20;

/// One hop in a payment path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Step {
    /// Intermediate account, if this step routes through one.
    pub account: Option<String>,
    /// Currency code, if this step changes currency.
    pub currency: Option<String>,
    /// Issuer account, if this step changes issuer.
    pub issuer: Option<String>,
}

/// A non-empty sequence of steps.
pub type Path = Vec<Step>;
/// A non-empty collection of paths.
pub type PathSet = Vec<Path>;

fn serialize_step(step: &Step) -> Result<Vec<u8>, XrplError> {
    let mut mask = 0u8;
    if step.account.is_some() {
        mask |= HAS_ACCOUNT;
    }
    if step.currency.is_some() {
        mask |= HAS_CURRENCY;
    }
    if step.issuer.is_some() {
        mask |= HAS_ISSUER;
    }
    let mut out = vec![mask];
    if let Some(account) = &step.account {
        out.extend_from_slice(&DEFAULT_CODEC.decode_address(account)?);
    }
    if let Some(currency) = &step.currency {
        out.extend_from_slice(&super::amount::encode_currency(currency)?);
    }
    if let Some(issuer) = &step.issuer {
        out.extend_from_slice(&DEFAULT_CODEC.decode_address(issuer)?);
    }
    Ok(out)
}

fn deserialize_step(scanner: &mut Scanner<'_>) -> Result<Step, XrplError> {
    let mask = scanner.take1()?;
    let account = if mask & HAS_ACCOUNT != 0 {
        let bytes: [u8; 20] = scanner.take(20)?.try_into().expect("20 bytes; qed");
        Some(DEFAULT_CODEC.encode_address(&bytes))
    } else {
        None
    };
    let currency = if mask & HAS_CURRENCY != 0 {
        let bytes: [u8; 20] = scanner.take(20)?.try_into().expect("20 bytes; qed");
        Some(super::amount::decode_currency(&bytes))
    } else {
        None
    };
    let issuer = if mask & HAS_ISSUER != 0 {
        let bytes: [u8; 20] = scanner.take(20)?.try_into().expect("20 bytes; qed");
        Some(DEFAULT_CODEC.encode_address(&bytes))
    } else {
        None
    };
    Ok(Step { account, currency, issuer })
}

/// Serializes a full `PathSet`.
pub fn serialize(pathset: &PathSet) -> Result<Vec<u8>, XrplError> {
    if pathset.is_empty() {
        return Err(FieldError::EmptyContainer("PathSet").into());
    }
    let mut out = Vec::new();
    for (i, path) in pathset.iter().enumerate() {
        if path.is_empty() {
            return Err(FieldError::EmptyContainer("Path").into());
        }
        if i > 0 {
            out.push(PATH_SEPARATOR);
        }
        for step in path {
            out.extend_from_slice(&serialize_step(step)?);
        }
    }
    out.push(PATHSET_END);
    Ok(out)
}

/// Deserializes a full `PathSet`.
pub fn deserialize(scanner: &mut Scanner<'_>) -> Result<PathSet, XrplError> {
    let mut pathset = Vec::new();
    let mut current = Vec::new();
    loop {
        let next = scanner.peek()?;
        if next == PATHSET_END {
            scanner.skip(1)?;
            if !current.is_empty() {
                pathset.push(current);
            }
            break;
        }
        if next == PATH_SEPARATOR {
            scanner.skip(1)?;
            pathset.push(std::mem::take(&mut current));
            continue;
        }
        current.push(deserialize_step(scanner)?);
    }
    if pathset.is_empty() {
        return Err(FieldError::EmptyContainer("PathSet").into());
    }
    Ok(pathset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_step_path_round_trips() {
        let pathset: PathSet = vec![vec![Step {
            account: None,
            currency: Some("USD".to_string()),
            issuer: Some("rvYAfWj5gh67oV6fW32ZzP3Aw4Eubs59B".to_string()),
        }]];
        let bytes = serialize(&pathset).unwrap();
        let mut scanner = Scanner::new(&bytes);
        assert_eq!(deserialize(&mut scanner).unwrap(), pathset);
    }

    #[test]
    fn multi_path_round_trips() {
        let step = Step {
            account: Some("rvYAfWj5gh67oV6fW32ZzP3Aw4Eubs59B".to_string()),
            currency: None,
            issuer: None,
        };
        let pathset: PathSet = vec![vec![step.clone()], vec![step.clone(), step]];
        let bytes = serialize(&pathset).unwrap();
        let mut scanner = Scanner::new(&bytes);
        assert_eq!(deserialize(&mut scanner).unwrap(), pathset);
    }

    #[test]
    fn empty_pathset_is_rejected() {
        assert!(matches!(
            serialize(&vec![]),
            Err(XrplError::Field(FieldError::EmptyContainer("PathSet")))
        ));
    }
}
