//! RSA key primitives: raw (unpadded) encrypt/decrypt/sign/verify, key generation,
//! and an opaque text serialisation.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::bigint::BigInt;
use crate::error::{Result, RsaError};
use crate::numtheory::{carmichael_semiprime, generate_prime, modinv};

/// The recommended default public exponent (low Hamming weight, fast `powm`).
pub static DEFAULT_PUBLIC_EXPONENT: Lazy<BigInt> = Lazy::new(|| BigInt::from(65537_u32));

fn check_operand(what: &'static str, value: &BigInt, n: &BigInt) -> Result<()> {
    if value.is_negative() || value >= n {
        return Err(RsaError::invalid_argument(
            what,
            format!("{value} is not in [0, {n})"),
        ));
    }
    Ok(())
}

/// Capability shared by [`PublicKey`] and [`PrivateKey`]: anything with an `(e, n)`
/// can encrypt and verify. A private key is a superset of a public key; any
/// operation accepting `&dyn RsaPublicLike` accepts either.
pub trait RsaPublicLike {
    fn e(&self) -> &BigInt;
    fn n(&self) -> &BigInt;

    /// `message^e mod n`.
    fn raw_encrypt(&self, message: &BigInt) -> Result<BigInt> {
        check_operand("raw_encrypt.message", message, self.n())?;
        Ok(message.powm(self.e(), self.n()))
    }

    /// `true` iff `signature^e mod n == message`.
    fn raw_verify(&self, message: &BigInt, signature: &BigInt) -> Result<bool> {
        check_operand("raw_verify.signature", signature, self.n())?;
        Ok(&signature.powm(self.e(), self.n()) == message)
    }
}

/// An RSA public key: `(e, n)`, with `n` expected to be a product of two distinct primes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    e: BigInt,
    n: BigInt,
}

impl PublicKey {
    pub fn new(e: BigInt, n: BigInt) -> PublicKey {
        PublicKey { e, n }
    }

    pub fn to_text(&self) -> String {
        format!(
            "e={}\nn={}\n",
            self.e.to_decimal_string(),
            self.n.to_decimal_string()
        )
    }

    pub fn from_text(text: &str) -> Result<PublicKey> {
        let fields = parse_fields(text)?;
        Ok(PublicKey {
            e: require_field(&fields, "e")?,
            n: require_field(&fields, "n")?,
        })
    }
}

impl RsaPublicLike for PublicKey {
    fn e(&self) -> &BigInt {
        &self.e
    }

    fn n(&self) -> &BigInt {
        &self.n
    }
}

/// An RSA private key: `(e, n, d)` with `d = e^-1 mod lambda(n)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrivateKey {
    e: BigInt,
    n: BigInt,
    d: BigInt,
}

impl RsaPublicLike for PrivateKey {
    fn e(&self) -> &BigInt {
        &self.e
    }

    fn n(&self) -> &BigInt {
        &self.n
    }
}

impl PrivateKey {
    /// Projects this private key down to the public key it corresponds to.
    pub fn public_key(&self) -> PublicKey {
        PublicKey::new(self.e.clone(), self.n.clone())
    }

    pub fn d(&self) -> &BigInt {
        &self.d
    }

    /// `ciphertext^d mod n`.
    pub fn raw_decrypt(&self, ciphertext: &BigInt) -> Result<BigInt> {
        check_operand("raw_decrypt.ciphertext", ciphertext, &self.n)?;
        Ok(ciphertext.powm(&self.d, &self.n))
    }

    /// `message^d mod n`. Identical operation to [`PrivateKey::raw_decrypt`].
    pub fn raw_sign(&self, message: &BigInt) -> Result<BigInt> {
        check_operand("raw_sign.message", message, &self.n)?;
        Ok(message.powm(&self.d, &self.n))
    }

    /// Builds a key from two (assumed prime) factors and a public exponent.
    /// Fails if `gcd(e, lambda(n)) != 1`.
    pub fn from_factors(p: &BigInt, q: &BigInt, e: BigInt) -> Result<PrivateKey> {
        let n = p * q;
        let lambda = carmichael_semiprime(p, q)?;
        let d = modinv(&e, &lambda)?;
        Ok(PrivateKey { e, n, d })
    }

    /// Generates a fresh keypair with an approximately `bits`-bit modulus and the
    /// default public exponent. To keep `p` and `q` noticeably different in
    /// length, `p` is generated with `bits/2 + 4` bits and `q` with `bits/2 - 3`.
    pub fn generate(bits: u32) -> Result<PrivateKey> {
        Self::generate_with_exponent(bits, DEFAULT_PUBLIC_EXPONENT.clone())
    }

    /// As [`PrivateKey::generate`], but with a caller-supplied public exponent.
    pub fn generate_with_exponent(bits: u32, e: BigInt) -> Result<PrivateKey> {
        if bits < 16 {
            return Err(RsaError::invalid_argument(
                "generate.bits",
                format!("{bits} < 16"),
            ));
        }

        let p = generate_prime(bits / 2 + 4);
        let q = generate_prime(bits / 2 - 3);

        Self::from_factors(&p, &q, e)
    }

    pub fn to_text(&self) -> String {
        format!(
            "e={}\nd={}\nn={}\n",
            self.e.to_decimal_string(),
            self.d.to_decimal_string(),
            self.n.to_decimal_string()
        )
    }

    pub fn from_text(text: &str) -> Result<PrivateKey> {
        let fields = parse_fields(text)?;
        Ok(PrivateKey {
            e: require_field(&fields, "e")?,
            d: require_field(&fields, "d")?,
            n: require_field(&fields, "n")?,
        })
    }
}

fn parse_fields(text: &str) -> Result<HashMap<String, BigInt>> {
    let mut fields = HashMap::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (name, value) = line.split_once('=').ok_or_else(|| {
            RsaError::parse_error("key field", format!("line {line:?} is missing '='"))
        })?;

        fields.insert(name.trim().to_owned(), BigInt::parse_decimal(value)?);
    }

    Ok(fields)
}

fn require_field(fields: &HashMap<String, BigInt>, name: &str) -> Result<BigInt> {
    fields
        .get(name)
        .cloned()
        .ok_or_else(|| RsaError::parse_error("key field", format!("missing field {name:?}")))
}
