//! Attacks on textbook RSA's lack of semantic security: plaintext and signature
//! brute force, homomorphic forgery, and key cracking via factorisation.

use std::io::BufRead;
use std::sync::Mutex;

use crate::bigint::BigInt;
use crate::codec::{bigint_to_bytes, read_next_candidate};
use crate::error::{Result, RsaError};
use crate::keys::{PrivateKey, PublicKey, RsaPublicLike};
use crate::numtheory::factorise_semiprime;
use crate::parallel::{parallel_search, resolve_worker_count, StepOutcome};

/// Derives the encryption of `value * m` given only the encryption of `m`, by the
/// multiplicative homomorphism of unpadded RSA: `E(v) * E(m) mod n == E(v*m mod n)`.
pub fn enc_multiply<K: RsaPublicLike>(
    pubkey: &K,
    encrypted_message: &BigInt,
    value: &BigInt,
) -> Result<BigInt> {
    let encrypted_value = pubkey.raw_encrypt(value)?;
    Ok((&encrypted_value * encrypted_message) % pubkey.n())
}

/// Forges a valid signature on `m1 * m2 mod n` given signatures on `m1` and `m2`.
pub fn sig_forge_multiply<K: RsaPublicLike>(pubkey: &K, sig_1: &BigInt, sig_2: &BigInt) -> BigInt {
    (sig_1 * sig_2) % pubkey.n()
}

/// A byte whose visual effect on a terminal is negligible, so it can pad a forged
/// signature's plaintext without changing what's displayed. Visible exceptions -
/// never treated as padding: backspace, tab, LF, VT, FF, CR, ESC, and 0x20-0x7E.
pub fn is_invisible(byte: u8) -> bool {
    matches!(byte, 0x00..=0x07 | 0x0E..=0x1A | 0x1C..=0x1F | 0x7F..=0xFF)
}

/// Exploits the lack of semantic security in textbook RSA: two encryptions of the
/// same plaintext under the same key are identical, so a brute-forcible plaintext
/// space can be searched for one that encrypts to `encrypted_message`.
///
/// `next_candidate(worker_id)` yields successive candidates or `None` at
/// exhaustion; it may be called concurrently and must serialise itself internally.
/// `worker_count == 0` means "use hardware concurrency".
pub fn brute_force_ptext<F>(
    pubkey: &PublicKey,
    encrypted_message: &BigInt,
    next_candidate: F,
    worker_count: usize,
) -> Option<BigInt>
where
    F: Fn(usize) -> Option<BigInt> + Sync,
{
    log::debug!("brute_force_ptext: starting");
    let tried = std::sync::atomic::AtomicUsize::new(0);

    let result = parallel_search(
        worker_count,
        |worker_id| {
            log::trace!("brute_force_ptext: worker {worker_id} starting");
        },
        |(), worker_id, _found| match next_candidate(worker_id) {
            Some(candidate) => {
                let n = tried.fetch_add(1, std::sync::atomic::Ordering::Relaxed) + 1;
                if n % 100_000 == 0 {
                    log::trace!("brute_force_ptext: {n} candidates tried so far");
                }
                match pubkey.raw_encrypt(&candidate) {
                    Ok(ciphertext) if &ciphertext == encrypted_message => {
                        StepOutcome::Found(candidate)
                    }
                    _ => StepOutcome::Continue,
                }
            }
            None => StepOutcome::Exhausted,
        },
    );

    log::debug!("brute_force_ptext: {}", if result.is_some() { "match found" } else { "exhausted" });
    result
}

/// A brute-force candidate producer drawn from a delimited stream, one token per
/// candidate, shared across workers behind a single lock.
pub fn brute_force_ptext_stream<R: BufRead>(
    pubkey: &PublicKey,
    encrypted_message: &BigInt,
    reader: R,
    delimiter: u8,
    as_hex: bool,
    worker_count: usize,
) -> Result<Option<BigInt>> {
    let reader = Mutex::new(reader);
    let error_slot: Mutex<Option<RsaError>> = Mutex::new(None);

    let found = brute_force_ptext(
        pubkey,
        encrypted_message,
        |_worker_id| {
            let mut guard = reader.lock().unwrap();
            match read_next_candidate(&mut *guard, delimiter, as_hex) {
                Ok(candidate) => candidate,
                Err(err) => {
                    *error_slot.lock().unwrap() = Some(err);
                    None
                }
            }
        },
        worker_count,
    );

    match (found, error_slot.into_inner().unwrap()) {
        (None, Some(err)) => Err(err),
        (found, _) => Ok(found),
    }
}

/// A brute-force candidate producer over the inclusive integer range `[min, max]`,
/// partitioned among workers as arithmetic progressions `min+i, min+i+w, ...`.
/// Returns `None` immediately if `min > max`.
pub fn brute_force_ptext_range(
    pubkey: &PublicKey,
    encrypted_message: &BigInt,
    min: &BigInt,
    max: &BigInt,
    worker_count: usize,
) -> Option<BigInt> {
    if min > max {
        return None;
    }

    let worker_count = resolve_worker_count(worker_count);
    let step = BigInt::from(worker_count as u64);
    let max = max.clone();
    let counters: Vec<Mutex<BigInt>> = (0..worker_count)
        .map(|i| Mutex::new(min + &BigInt::from(i as u64)))
        .collect();

    brute_force_ptext(
        pubkey,
        encrypted_message,
        |worker_id| {
            let mut counter = counters[worker_id].lock().unwrap();
            if *counter > max {
                return None;
            }
            let candidate = counter.clone();
            *counter = &*counter + &step;
            Some(candidate)
        },
        worker_count,
    )
}

/// Brute-forces a signature: for each guess `g` in `[0, n)`, computes
/// `m' = g^e mod n` and calls `accept(m')`. The first guess `accept` approves wins.
pub fn brute_force_sig<K, F>(pubkey: &K, accept: F, worker_count: usize) -> Option<BigInt>
where
    K: RsaPublicLike + Sync,
    F: Fn(&BigInt) -> bool + Sync,
{
    let worker_count = resolve_worker_count(worker_count);
    log::debug!("brute_force_sig: starting with {worker_count} workers");
    let step = BigInt::from(worker_count as u64);
    let n = pubkey.n().clone();

    let result = parallel_search(
        worker_count,
        |worker_id| {
            log::trace!("brute_force_sig: worker {worker_id} starting");
            BigInt::from(worker_id as u64)
        },
        |guess, _worker_id, _found| {
            if *guess >= n {
                return StepOutcome::Exhausted;
            }

            let candidate = guess.clone();
            let m_prime = candidate.powm(pubkey.e(), &n);
            *guess = &*guess + &step;

            if accept(&m_prime) {
                StepOutcome::Found(candidate)
            } else {
                StepOutcome::Continue
            }
        },
    );

    log::debug!("brute_force_sig: {}", if result.is_some() { "guess accepted" } else { "exhausted" });
    result
}

/// Compares a signature-brute-force candidate's decrypted bytes against `target`,
/// tolerating any number of trailing (least-significant) invisible bytes.
fn matches_with_invisible_suffix(candidate: &BigInt, target: &[u8]) -> bool {
    let bytes = bigint_to_bytes(candidate);

    let mut visible_end = bytes.len();
    while visible_end > 0 && is_invisible(bytes[visible_end - 1]) {
        visible_end -= 1;
    }

    bytes[..visible_end] == *target
}

/// Forges a signature on `msg` that tolerates an invisible trailing suffix: any
/// guess whose decrypted bytes start with `msg`'s bytes and end in only invisible
/// bytes is accepted. `msg`'s own bytes are taken as exactly the visible sequence
/// to match.
pub fn brute_force_sig_invisible<K: RsaPublicLike + Sync>(
    pubkey: &K,
    msg: &BigInt,
    worker_count: usize,
) -> Option<BigInt> {
    let target = bigint_to_bytes(msg);
    brute_force_sig(
        pubkey,
        |candidate| matches_with_invisible_suffix(candidate, &target),
        worker_count,
    )
}

/// Attempts to factorise `pubkey.n` and reconstruct the corresponding private key.
pub fn crack_key(pubkey: &PublicKey) -> Result<PrivateKey> {
    log::info!("crack_key: attempting to factor a {}-bit modulus", pubkey.n().bits());
    let (p, q) = factorise_semiprime(pubkey.n());
    log::info!("crack_key: recovered factors, reconstructing private key");
    PrivateKey::from_factors(&p, &q, pubkey.e().clone())
}
