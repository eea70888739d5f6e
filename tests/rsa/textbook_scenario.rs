//! The canonical 11/17/7 textbook RSA worked example, end to end through the
//! public API: key construction, raw encrypt/decrypt, and text serialisation.

use rubbish_rsa::bigint::BigInt;
use rubbish_rsa::keys::{PrivateKey, PublicKey, RsaPublicLike};

fn key() -> PrivateKey {
    PrivateKey::from_factors(&BigInt::from(11_u32), &BigInt::from(17_u32), BigInt::from(7_u32))
        .unwrap()
}

#[test]
fn p11_q17_e7_matches_worked_example() {
    let key = key();

    assert_eq!(key.public_key().n().clone(), BigInt::from(187_u32));
    assert_eq!(key.d().clone(), BigInt::from(23_u32));

    let ciphertext = key.public_key().raw_encrypt(&BigInt::from(65_u32)).unwrap();
    assert_eq!(ciphertext, BigInt::from(142_u32));
    assert_eq!(key.raw_decrypt(&ciphertext).unwrap(), BigInt::from(65_u32));
}

#[test]
fn key_round_trips_through_text_with_shuffled_fields() {
    let key = key();

    let private_text = key.to_text();
    let recovered = PrivateKey::from_text(&private_text).unwrap();
    assert_eq!(recovered, key);

    let shuffled = format!(
        "n={}\n  d={}  \ne={}\n",
        key.public_key().n(),
        key.d(),
        key.public_key().e()
    );
    assert_eq!(PrivateKey::from_text(&shuffled).unwrap(), key);

    let public_text = key.public_key().to_text();
    assert_eq!(PublicKey::from_text(&public_text).unwrap(), key.public_key());
}

#[test]
fn every_message_in_range_round_trips() {
    let key = key();
    let pubkey = key.public_key();
    let n = pubkey.n().to_u64().unwrap();

    for m in 0..n {
        let m = BigInt::from(m);
        let ciphertext = pubkey.raw_encrypt(&m).unwrap();
        assert_eq!(key.raw_decrypt(&ciphertext).unwrap(), m);

        let signature = key.raw_sign(&m).unwrap();
        assert!(pubkey.raw_verify(&m, &signature).unwrap());
    }
}
