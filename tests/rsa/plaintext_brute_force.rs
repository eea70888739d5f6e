//! Exploiting textbook RSA's determinism: recovering a plaintext from a small
//! candidate space, driven either by an integer range or a line-delimited stream.

use rubbish_rsa::attack::{brute_force_ptext_range, brute_force_ptext_stream};
use rubbish_rsa::bigint::BigInt;
use rubbish_rsa::codec::ascii_to_bigint;
use rubbish_rsa::keys::{PrivateKey, RsaPublicLike};

fn small_key() -> PrivateKey {
    PrivateKey::from_factors(&BigInt::from(53_u32), &BigInt::from(61_u32), BigInt::from(17_u32))
        .unwrap()
}

#[test]
fn range_brute_force_recovers_42() {
    let pubkey = small_key().public_key();
    let ciphertext = pubkey.raw_encrypt(&BigInt::from(42_u32)).unwrap();

    let found = brute_force_ptext_range(
        &pubkey,
        &ciphertext,
        &BigInt::zero(),
        &pubkey.n().clone(),
        0,
    );

    assert_eq!(found, Some(BigInt::from(42_u32)));
}

#[test]
fn stream_brute_force_recovers_banana() {
    let pubkey = small_key().public_key();
    let ciphertext = pubkey.raw_encrypt(&ascii_to_bigint("banana")).unwrap();

    let candidates = b"apple\nbanana\ncherry\n";
    let found = brute_force_ptext_stream(&pubkey, &ciphertext, &candidates[..], b'\n', false, 2)
        .unwrap();

    assert_eq!(found, Some(ascii_to_bigint("banana")));
}

#[test]
fn stream_brute_force_accepts_hex_candidates() {
    let pubkey = small_key().public_key();
    let target = BigInt::from(99_u32);
    let ciphertext = pubkey.raw_encrypt(&target).unwrap();

    let candidates = b"1\n2\n63\nff\n";
    let found = brute_force_ptext_stream(&pubkey, &ciphertext, &candidates[..], b'\n', true, 1)
        .unwrap();

    assert_eq!(found, Some(target));
}

#[test]
fn stream_brute_force_exhausts_without_match() {
    let pubkey = small_key().public_key();
    let ciphertext = pubkey.raw_encrypt(&BigInt::from(7_u32)).unwrap();

    let candidates = b"apple\nbanana\n";
    let found = brute_force_ptext_stream(&pubkey, &ciphertext, &candidates[..], b'\n', false, 1)
        .unwrap();

    assert_eq!(found, None);
}
