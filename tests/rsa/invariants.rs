//! Sampled checks of the quantified invariants from this crate's spec: encrypt/
//! decrypt and sign/verify are mutual inverses, egcd and modinv satisfy their
//! Bezout identities, the codec round-trips, and the homomorphic helpers agree
//! with doing the real operation twice.

use rubbish_rsa::bigint::BigInt;
use rubbish_rsa::codec::{ascii_to_bigint, bigint_to_ascii};
use rubbish_rsa::keys::{PrivateKey, RsaPublicLike};
use rubbish_rsa::numtheory::{egcd, modinv};

const SMALL_SEMIPRIMES: &[(u32, u32, u32)] = &[
    (11, 17, 7),
    (53, 61, 17),
    (3, 11, 7),
    (5, 13, 7),
];

#[test]
fn encrypt_decrypt_and_sign_verify_are_mutual_inverses() {
    for &(p, q, e) in SMALL_SEMIPRIMES {
        let key =
            PrivateKey::from_factors(&BigInt::from(p), &BigInt::from(q), BigInt::from(e)).unwrap();
        let pubkey = key.public_key();
        let n = pubkey.n().to_u64().unwrap();

        for m in 0..n {
            let m = BigInt::from(m);
            assert_eq!(key.raw_decrypt(&pubkey.raw_encrypt(&m).unwrap()).unwrap(), m);
            assert!(pubkey.raw_verify(&m, &key.raw_sign(&m).unwrap()).unwrap());
        }
    }
}

#[test]
fn egcd_satisfies_bezouts_identity() {
    let pairs = [(3_u32, 26), (240, 46), (1, 1), (17, 5), (101, 10)];

    for (a, b) in pairs {
        let (a, b) = (BigInt::from(a), BigInt::from(b));
        let (g, x, y) = egcd(&a, &b).unwrap();

        assert_eq!(&(&a * &x) + &(&b * &y), g);
        assert!((&a % &g).is_zero());
        assert!((&b % &g).is_zero());
    }
}

#[test]
fn modinv_produces_a_normalised_inverse_in_range() {
    let pairs = [(17_u32, 3120), (7, 40), (3, 11), (65537, 3120)];

    for (a, n) in pairs {
        let (a, n) = (BigInt::from(a), BigInt::from(n));
        let inv = modinv(&a, &n).unwrap();

        assert_eq!((&a * &inv) % &n, BigInt::one());
        assert!(!inv.is_negative());
        assert!(inv < n);
    }
}

#[test]
fn codec_round_trips_for_arbitrary_byte_strings() {
    for s in ["", "a", "hello, world", "RSA is not semantically secure"] {
        assert_eq!(bigint_to_ascii(&ascii_to_bigint(s)), s);
    }
}

#[test]
fn enc_multiply_matches_direct_encryption_of_the_product() {
    let key =
        PrivateKey::from_factors(&BigInt::from(53_u32), &BigInt::from(61_u32), BigInt::from(17_u32))
            .unwrap();
    let pubkey = key.public_key();

    for (m, v) in [(5_u32, 3_u32), (10, 20), (0, 99), (1, 1)] {
        let (m, v) = (BigInt::from(m), BigInt::from(v));
        let encrypted_m = pubkey.raw_encrypt(&m).unwrap();

        let derived = rubbish_rsa::attack::enc_multiply(&pubkey, &encrypted_m, &v).unwrap();
        let expected = pubkey.raw_encrypt(&((&m * &v) % pubkey.n().clone())).unwrap();

        assert_eq!(derived, expected);
    }
}

#[test]
fn sig_forge_multiply_matches_direct_signature_of_the_product() {
    let key =
        PrivateKey::from_factors(&BigInt::from(53_u32), &BigInt::from(61_u32), BigInt::from(17_u32))
            .unwrap();
    let pubkey = key.public_key();

    for (m1, m2) in [(3_u32, 5_u32), (10, 20), (0, 99)] {
        let (m1, m2) = (BigInt::from(m1), BigInt::from(m2));
        let forged = rubbish_rsa::attack::sig_forge_multiply(
            &pubkey,
            &key.raw_sign(&m1).unwrap(),
            &key.raw_sign(&m2).unwrap(),
        );

        let product = (&m1 * &m2) % pubkey.n().clone();
        assert!(pubkey.raw_verify(&product, &forged).unwrap());
    }
}
