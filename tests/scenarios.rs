//! Integration tests exercising the published concrete scenarios and
//! universal round-trip properties for the wire codec and key derivation.
use xrpl_core::codec::{self, Amount};
use xrpl_core::keys::Algorithm;
use xrpl_core::seed::Seed;
use xrpl_core::wallet::Wallet;
use xrpl_core::{FieldTable, FieldValue, Scanner};

const BOTH: &[Algorithm] = &[Algorithm::Ed25519, Algorithm::Secp256k1];

fn account_id(address: &str) -> [u8; 20] {
    xrpl_core::base58::DEFAULT_CODEC
        .decode_address(address)
        .unwrap()
        .try_into()
        .unwrap()
}

#[test]
fn scenario_ed25519_keypair_from_seed() {
    let seed = Seed::decode("sEdSKaCy2JT7JaM7v95H9SxkhP9wS2r", BOTH).unwrap();
    let wallet = Wallet::from_seed(&seed);
    assert_eq!(
        hex::encode_upper(wallet.private_key().to_bytes()),
        "B4C4E046826BD26190D09715FC31F4E6A728204EADD112905B08B14B7F15C4F3"
    );
    assert_eq!(
        hex::encode_upper(wallet.public_key().to_bytes()),
        "ED01FA53FA5A7E77798F882ECE20B1ABC00BB358A9E55A202D0D0676BD0CE37A63"
    );
    assert_eq!(wallet.address(), "rLUEXYuLiQptky37CqLcm9USQpPiz5rkpD");
}

#[test]
fn scenario_secp256k1_keypair_from_seed() {
    let wallet = Wallet::from_seed_str("sp5fghtJtpUorTwvof1NpDXAzNwf5", BOTH).unwrap();
    assert_eq!(
        hex::encode_upper(wallet.private_key().to_bytes()),
        "D78B9735C3F26501C7337B8A5727FD53A6EFDBC6AA55984F098488561F985E23"
    );
    assert_eq!(
        hex::encode_upper(wallet.public_key().to_bytes()),
        "030D58EB48B4420B1F7B9DF55087E0E29FEF0E8468F9A6825B01CA2C361042D435"
    );
    assert_eq!(wallet.address(), "rU6K7V3Po4snVhBBaU29sesqs2qTQJWDw1");
}

#[test]
fn scenario_address_encode() {
    let id = account_id_from_hex("BA8E78626EE42C41B46D46C3048DF3A1C3C87072");
    let address = xrpl_core::base58::DEFAULT_CODEC.encode_address(&id);
    assert_eq!(address, "rJrRMgiRgrU6hDF4pgu5DXQdWyPbY35ErN");
}

fn account_id_from_hex(hex_str: &str) -> [u8; 20] {
    hex::decode(hex_str).unwrap().try_into().unwrap()
}

fn offer_create_transaction() -> xrpl_core::codec::StObject {
    vec![
        ("TransactionType".to_string(), FieldValue::TransactionType("OfferCreate".to_string())),
        ("Account".to_string(), FieldValue::AccountId(account_id("rMBzp8CgpE441cp5PVyA9rpVV7oT8hP3ys"))),
        ("Fee".to_string(), FieldValue::Amount(Amount::Xrp(10))),
        ("Flags".to_string(), FieldValue::UInt32(524_288)),
        ("Sequence".to_string(), FieldValue::UInt32(1_752_792)),
        ("Expiration".to_string(), FieldValue::UInt32(595_640_108)),
        ("OfferSequence".to_string(), FieldValue::UInt32(1_752_791)),
        ("TakerGets".to_string(), FieldValue::Amount(Amount::Xrp(15_000_000_000))),
        (
            "TakerPays".to_string(),
            FieldValue::Amount(Amount::Issued {
                value: "7072.8".to_string(),
                currency: "USD".to_string(),
                issuer: "rvYAfWj5gh67oV6fW32ZzP3Aw4Eubs59B".to_string(),
            }),
        ),
    ]
}

#[test]
fn scenario_transaction_serialize_round_trips() {
    let tx = offer_create_transaction();
    let bytes = xrpl_core::sign::serialize_transaction(&tx, false, false).unwrap();
    let decoded = xrpl_core::sign::deserialize_transaction(&bytes).unwrap();
    assert_eq!(decoded.len(), tx.len());

    // Field headers must appear in strictly ascending (type_code, field_code) order.
    let table = FieldTable::bundled();
    let mut last = None;
    for (name, _) in &decoded {
        let record = table.get(name).unwrap();
        let key = (record.type_code, record.field_code);
        if let Some(prev) = last {
            assert!(prev < key, "{name} out of order: {prev:?} >= {key:?}");
        }
        last = Some(key);
    }
}

// The published OfferCreate wire blob gives SigningPubKey/TxnSignature only
// as truncated hex (`03EE83BB…DEE7FE3`, `3044…1C2C`), so the full 33/~70-byte
// values aren't recoverable from it and aren't asserted here. Every other
// field's bytes are given in full (the TakerPays issued-amount value is
// spelled out completely as scenario 6), so this test builds the object
// without those two blobs and checks the literal leading and trailing bytes
// of the published blob, which don't move regardless of what optional
// type-7 blob fields are present between them.
#[test]
fn scenario_transaction_serialize_matches_published_blob_edges() {
    let tx = offer_create_transaction();
    let bytes = xrpl_core::sign::serialize_transaction(&tx, false, false).unwrap();

    let expected_prefix = hex::decode(concat!(
        "120007220008000024001ABED82A2380BF2C2019001ABED764",
        "D55920AC9391400000000000000000000000000055534400000000000A20B3C85F482532A9578DBB3950B85CA06594D1",
    ))
    .unwrap();
    let expected_suffix =
        hex::decode("8114DD76483FACDEE26E60D8A586BB58D09F27045C46").unwrap();

    assert!(bytes.starts_with(&expected_prefix), "prefix mismatch: {}", hex::encode_upper(&bytes));
    assert!(bytes.ends_with(&expected_suffix), "suffix mismatch: {}", hex::encode_upper(&bytes));
}

#[test]
fn scenario_transaction_id_hash_changes_with_signature() {
    let seed = Seed::decode("sEdSKaCy2JT7JaM7v95H9SxkhP9wS2r", &[Algorithm::Ed25519]).unwrap();
    let wallet = Wallet::from_seed(&seed);
    let signed = xrpl_core::sign::sign_transaction(&offer_create_transaction(), &wallet).unwrap();

    let hash = signed.iter().find(|(name, _)| name == "hash").map(|(_, v)| v.clone());
    match hash {
        Some(FieldValue::Hash256(bytes)) => assert_eq!(bytes.len(), 32),
        other => panic!("expected injected Hash256 hash field, got {other:?}"),
    }
    assert!(signed.iter().any(|(name, _)| name == "SigningPubKey"));
    assert!(signed.iter().any(|(name, _)| name == "TxnSignature"));
}

#[test]
fn scenario_issued_amount_canonicalization() {
    let amount = Amount::Issued {
        value: "7072.8".to_string(),
        currency: "USD".to_string(),
        issuer: "rvYAfWj5gh67oV6fW32ZzP3Aw4Eubs59B".to_string(),
    };
    let bytes = codec::amount::serialize(&amount).unwrap();
    assert_eq!(hex::encode_upper(&bytes[..8]), "D55920AC93914000");
    let mut scanner = Scanner::new(&bytes);
    assert_eq!(codec::amount::deserialize(&mut scanner).unwrap(), amount);
}

#[test]
fn universal_seed_round_trip() {
    for algorithm in [Algorithm::Ed25519, Algorithm::Secp256k1] {
        let seed = Seed::new([42u8; 16], algorithm);
        let encoded = seed.encode().unwrap();
        let decoded = Seed::decode(&encoded, BOTH).unwrap();
        assert_eq!(decoded.bytes(), seed.bytes());
        assert_eq!(decoded.algorithm(), algorithm);
    }
}

#[test]
fn universal_address_round_trip() {
    let id = [0x11u8; 20];
    let address = xrpl_core::base58::DEFAULT_CODEC.encode_address(&id);
    assert_eq!(xrpl_core::base58::DEFAULT_CODEC.decode_address(&address).unwrap(), id);
}

#[test]
fn universal_sign_verify_round_trip() {
    for algorithm in BOTH {
        let wallet = Wallet::from_seed(&Seed::new([17u8; 16], *algorithm));
        let signature = wallet.sign(b"universal round trip");
        assert!(wallet.public_key().verify(b"universal round trip", &signature).is_ok());
    }
}

#[test]
fn universal_vl_length_round_trip() {
    for len in [0usize, 1, 192, 193, 12480, 12481, 200_000, 918_744] {
        let prefix = codec::vl::encode_length(len).unwrap();
        let mut scanner = Scanner::new(&prefix);
        assert_eq!(codec::vl::decode_length(&mut scanner).unwrap(), len);
    }
}
