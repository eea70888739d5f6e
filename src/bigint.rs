//! A thin shim around an arbitrary-precision integer.
//!
//! Everything in this crate talks in terms of [`BigInt`] rather than reaching for
//! `num-bigint` directly, so the rest of the crate doesn't care which arbitrary-precision
//! backend is underneath. All arithmetic here is on non-negative values except the
//! internal coefficients produced by [`crate::numtheory::egcd`].

use std::fmt;
use std::ops::{Add, BitAnd, Div, Mul, Neg, Rem, Shl, Shr, Sub};

use num_bigint::{RandBigInt, Sign};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use rand::Rng;

use crate::error::{Result, RsaError};

/// An arbitrary-precision signed integer with value semantics.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BigInt(num_bigint::BigInt);

impl BigInt {
    pub fn zero() -> BigInt {
        BigInt(num_bigint::BigInt::zero())
    }

    pub fn one() -> BigInt {
        BigInt(num_bigint::BigInt::one())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.0.is_one()
    }

    pub fn is_even(&self) -> bool {
        self.0.is_even()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    pub fn abs(&self) -> BigInt {
        BigInt(self.0.abs())
    }

    /// Number of bits needed to represent the magnitude (0 for zero).
    pub fn bits(&self) -> u64 {
        self.0.bits()
    }

    /// `self^exp mod modulus`. Mirrors `num_bigint::BigInt::modpow`.
    pub fn powm(&self, exp: &BigInt, modulus: &BigInt) -> BigInt {
        BigInt(self.0.modpow(&exp.0, &modulus.0))
    }

    pub fn to_decimal_string(&self) -> String {
        self.0.to_str_radix(10)
    }

    pub fn to_hex_string(&self) -> String {
        self.0.to_str_radix(16)
    }

    pub fn parse_decimal(s: &str) -> Result<BigInt> {
        num_bigint::BigInt::parse_bytes(s.trim().as_bytes(), 10)
            .map(BigInt)
            .ok_or_else(|| RsaError::parse_error("decimal integer", s.to_owned()))
    }

    pub fn parse_hex(s: &str) -> Result<BigInt> {
        let trimmed = s.trim();
        if !trimmed.bytes().all(|b| b.is_ascii_hexdigit()) || trimmed.is_empty() {
            return Err(RsaError::parse_error(
                "hexadecimal integer",
                format!("{s:?} contains a non-hex character"),
            ));
        }

        num_bigint::BigInt::parse_bytes(trimmed.as_bytes(), 16)
            .map(BigInt)
            .ok_or_else(|| RsaError::parse_error("hexadecimal integer", s.to_owned()))
    }

    /// Interprets `bytes` as a non-negative base-256 number, most significant byte first.
    pub fn from_be_bytes(bytes: &[u8]) -> BigInt {
        BigInt(num_bigint::BigInt::from_bytes_be(Sign::Plus, bytes))
    }

    /// Emits the base-256 digits of a non-negative value, most significant first.
    /// The representation of zero is the empty byte string.
    pub fn to_be_bytes(&self) -> Vec<u8> {
        self.0.to_bytes_be().1
    }

    /// Samples uniformly from `[low, high)` using the given RNG.
    pub fn random_range<R: Rng + ?Sized>(rng: &mut R, low: &BigInt, high: &BigInt) -> BigInt {
        BigInt(rng.gen_bigint_range(&low.0, &high.0))
    }

    /// Samples uniformly from `[0, bound)` using the given RNG.
    pub fn random_below<R: Rng + ?Sized>(rng: &mut R, bound: &BigInt) -> BigInt {
        BigInt(rng.gen_bigint_range(&num_bigint::BigInt::zero(), &bound.0))
    }

    /// Attempts a lossless conversion to `u64` (for small values: loop counters,
    /// seed primes, and the like).
    pub fn to_u64(&self) -> Option<u64> {
        use num_traits::ToPrimitive;
        self.0.to_u64()
    }
}

impl fmt::Debug for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigInt({})", self.0)
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for BigInt {
                fn from(value: $t) -> BigInt {
                    BigInt(num_bigint::BigInt::from(value))
                }
            }
        )*
    };
}

impl_from_int!(u8, u16, u32, u64, usize, i32, i64, isize);

macro_rules! impl_bin_op {
    ($trait_:ident, $method:ident) => {
        impl $trait_ for BigInt {
            type Output = BigInt;

            fn $method(self, rhs: BigInt) -> BigInt {
                BigInt(self.0.$method(rhs.0))
            }
        }

        impl $trait_<&BigInt> for &BigInt {
            type Output = BigInt;

            fn $method(self, rhs: &BigInt) -> BigInt {
                BigInt((&self.0).$method(&rhs.0))
            }
        }

        impl $trait_<BigInt> for &BigInt {
            type Output = BigInt;

            fn $method(self, rhs: BigInt) -> BigInt {
                BigInt((&self.0).$method(rhs.0))
            }
        }

        impl $trait_<&BigInt> for BigInt {
            type Output = BigInt;

            fn $method(self, rhs: &BigInt) -> BigInt {
                BigInt(self.0.$method(&rhs.0))
            }
        }
    };
}

impl_bin_op!(Add, add);
impl_bin_op!(Sub, sub);
impl_bin_op!(Mul, mul);
impl_bin_op!(Div, div);
impl_bin_op!(Rem, rem);
impl_bin_op!(BitAnd, bitand);

impl Neg for BigInt {
    type Output = BigInt;

    fn neg(self) -> BigInt {
        BigInt(-self.0)
    }
}

impl Shl<u32> for &BigInt {
    type Output = BigInt;

    fn shl(self, rhs: u32) -> BigInt {
        BigInt((&self.0) << rhs)
    }
}

impl Shr<u32> for &BigInt {
    type Output = BigInt;

    fn shr(self, rhs: u32) -> BigInt {
        BigInt((&self.0) >> rhs)
    }
}
