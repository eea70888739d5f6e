//! Recovering a private key from nothing but a public key, by factoring the
//! modulus and reconstructing the private exponent.

use rubbish_rsa::attack::crack_key;
use rubbish_rsa::bigint::BigInt;
use rubbish_rsa::keys::{PrivateKey, PublicKey, RsaPublicLike};

#[test]
fn cracks_the_textbook_3233_modulus() {
    let pubkey = PublicKey::new(BigInt::from(65537_u32), BigInt::from(3233_u32));
    let cracked = crack_key(&pubkey).unwrap();

    assert_eq!(cracked.d().clone(), BigInt::from(2753_u32));

    let ciphertext = pubkey.raw_encrypt(&BigInt::from(65_u32)).unwrap();
    assert_eq!(cracked.raw_decrypt(&ciphertext).unwrap(), BigInt::from(65_u32));
}

#[test]
fn cracked_key_behaves_like_the_original_on_a_sample_message() {
    for bits in [32_u32, 48, 64] {
        let original = PrivateKey::generate(bits).unwrap();
        let cracked = crack_key(&original.public_key()).unwrap();

        let message = BigInt::from(12345_u32) % original.public_key().n().clone();
        let ciphertext = original.public_key().raw_encrypt(&message).unwrap();

        assert_eq!(
            cracked.raw_decrypt(&ciphertext).unwrap(),
            original.raw_decrypt(&ciphertext).unwrap()
        );
    }
}
