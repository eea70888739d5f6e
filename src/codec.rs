//! Conversions between octet-stream text, hexadecimal, and [`BigInt`].
//!
//! `ascii_to_bigint`/`bigint_to_ascii` interpret a byte string as a base-256 number,
//! most-significant byte first. `hex_to_bigint`/`bigint_to_hex` do the same in base 16.
//!
//! Round-trip law: `ascii_to_bigint(bigint_to_ascii(n)) == n` for all `n >= 0`. Text
//! with leading zero bytes does *not* round-trip - those leading zeros carry no
//! numeric weight and are lost, by design.

use std::io::BufRead;

use crate::bigint::BigInt;
use crate::error::Result;

/// Interprets `s` as a base-256 number, most significant byte first.
pub fn ascii_to_bigint(s: &str) -> BigInt {
    BigInt::from_be_bytes(s.as_bytes())
}

/// Interprets raw bytes as a base-256 number, most significant byte first.
pub fn bytes_to_bigint(bytes: &[u8]) -> BigInt {
    BigInt::from_be_bytes(bytes)
}

/// Emits the base-256 digits of `n` as an octet string, most significant first.
/// `n == 0` maps to the empty string.
pub fn bigint_to_ascii(n: &BigInt) -> String {
    String::from_utf8_lossy(&n.to_be_bytes()).into_owned()
}

/// Emits the base-256 digits of `n` as raw bytes, most significant first.
pub fn bigint_to_bytes(n: &BigInt) -> Vec<u8> {
    n.to_be_bytes()
}

/// Parses `s` (no `0x` prefix) as a non-negative hexadecimal integer.
pub fn hex_to_bigint(s: &str) -> Result<BigInt> {
    BigInt::parse_hex(s)
}

/// Formats `n` as a hexadecimal string, no `0x` prefix, no sign (`n` must be non-negative).
pub fn bigint_to_hex(n: &BigInt) -> String {
    n.to_hex_string()
}

/// Reads successive delimiter-separated tokens from `reader`, converting each with
/// either [`hex_to_bigint`] or [`ascii_to_bigint`]. Used to build a brute-force
/// candidate producer over a line-delimited file.
pub fn read_next_candidate<R: BufRead>(
    reader: &mut R,
    delimiter: u8,
    as_hex: bool,
) -> Result<Option<BigInt>> {
    let mut buf = Vec::new();
    let read = reader.read_until(delimiter, &mut buf)?;

    if read == 0 {
        return Ok(None);
    }

    if buf.last() == Some(&delimiter) {
        buf.pop();
    }

    let token = String::from_utf8_lossy(&buf);

    if as_hex {
        Ok(Some(hex_to_bigint(&token)?))
    } else {
        Ok(Some(bytes_to_bigint(&buf)))
    }
}
