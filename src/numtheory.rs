//! Number theory: extended GCD, modular inverse, Miller-Rabin primality, parallel
//! prime generation, and parallel Pollard's rho factoring.

use once_cell::sync::Lazy;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

use crate::bigint::BigInt;
use crate::error::{Result, RsaError};
use crate::parallel::{parallel_search, resolve_worker_count, StepOutcome};

/// Miller-Rabin rounds for general-purpose `is_prime` calls.
pub const DEFAULT_MILLER_RABIN_ROUNDS: u32 = 64;
/// Miller-Rabin rounds used while generating primes for a fresh keypair.
pub const KEYGEN_MILLER_RABIN_ROUNDS: u32 = 128;
/// Hard cap on the number of Pollard's rho workers, regardless of hardware.
const POLLARD_RHO_MAX_WORKERS: usize = 128;

/// [Extended Euclidean algorithm](https://en.wikipedia.org/wiki/Extended_Euclidean_algorithm).
///
/// Returns `(g, x, y)` with `a*x + b*y = g = gcd(a, b)`. Requires `a, b > 0`.
pub fn egcd(a: &BigInt, b: &BigInt) -> Result<(BigInt, BigInt, BigInt)> {
    if a.is_zero() || a.is_negative() {
        return Err(RsaError::invalid_argument("egcd.a", format!("{a} is not positive")));
    }
    if b.is_zero() || b.is_negative() {
        return Err(RsaError::invalid_argument("egcd.b", format!("{b} is not positive")));
    }

    // Two rows (x_i, y_i, r_i) with a*x_i + b*y_i = r_i, reduced in place.
    let mut row_a = [BigInt::one(), BigInt::zero(), a.clone()];
    let mut row_b = [BigInt::zero(), BigInt::one(), b.clone()];

    loop {
        let q = &row_a[2] / &row_b[2];
        for i in 0..3 {
            row_a[i] = &row_a[i] - &(&row_b[i] * &q);
        }
        if row_a[2].is_zero() {
            return Ok((row_b[2].clone(), row_b[0].clone(), row_b[1].clone()));
        }

        let q = &row_b[2] / &row_a[2];
        for i in 0..3 {
            row_b[i] = &row_b[i] - &(&row_a[i] * &q);
        }
        if row_b[2].is_zero() {
            return Ok((row_a[2].clone(), row_a[0].clone(), row_a[1].clone()));
        }
    }
}

/// Computes `a^-1 mod n`, normalised into `[0, n)`. Fails if `gcd(a, n) != 1`.
pub fn modinv(a: &BigInt, n: &BigInt) -> Result<BigInt> {
    let (g, x, _y) = egcd(a, n)?;

    if !g.is_one() {
        return Err(RsaError::invalid_argument(
            "modinv",
            format!("gcd({a}, {n}) = {g}, but a and n must be coprime"),
        ));
    }

    Ok(if x.is_negative() { x + n.clone() } else { x })
}

/// `lcm(a, b) = a / gcd(a, b) * b`. Requires `a, b > 0`.
pub fn lcm(a: &BigInt, b: &BigInt) -> Result<BigInt> {
    let (g, _, _) = egcd(a, b)?;
    Ok(&(a / &g) * b)
}

/// `lambda(n) = lcm(p - 1, q - 1)` for a semiprime `n = p * q`.
pub fn carmichael_semiprime(p: &BigInt, q: &BigInt) -> Result<BigInt> {
    let one = BigInt::one();
    lcm(&(p - &one), &(q - &one))
}

/// Plain `gcd(a, b)` for internal use where both operands are known-positive.
fn gcd(a: &BigInt, b: &BigInt) -> BigInt {
    egcd(a, b)
        .expect("gcd: both operands must be positive")
        .0
}

/// [Miller-Rabin primality test](https://en.wikipedia.org/wiki/Miller%E2%80%93Rabin_primality_test),
/// using the given RNG to draw witnesses. "Probably prime" returns `true`;
/// "definitely composite" returns `false`.
pub fn is_prime_with_rng<R: Rng + ?Sized>(candidate: &BigInt, rounds: u32, rng: &mut R) -> bool {
    let two = BigInt::from(2_u32);
    let three = BigInt::from(3_u32);

    if candidate < &two {
        return false;
    }
    if candidate == &two || candidate == &three {
        return true;
    }
    if candidate.is_even() {
        return false;
    }

    let one = BigInt::one();
    let c_minus_1 = candidate - &one;

    // c - 1 = 2^s * d, d odd.
    let mut d = c_minus_1.clone();
    let mut s: u32 = 0;
    while d.is_even() {
        d = &d >> 1;
        s += 1;
    }

    let upper_exclusive = c_minus_1.clone(); // witnesses drawn from [2, c-2]

    'witness: for _ in 0..rounds {
        let a = BigInt::random_range(rng, &two, &upper_exclusive);
        let mut x = a.powm(&d, candidate);

        if x.is_one() || x == c_minus_1 {
            continue;
        }

        for _ in 0..s.saturating_sub(1) {
            x = x.powm(&two, candidate);
            if x == c_minus_1 {
                continue 'witness;
            }
        }

        return false;
    }

    true
}

/// `is_prime` using a fresh thread-local RNG for witnesses. Default rounds: [`DEFAULT_MILLER_RABIN_ROUNDS`].
pub fn is_prime(candidate: &BigInt, rounds: u32) -> bool {
    is_prime_with_rng(candidate, rounds, &mut rand::thread_rng())
}

struct PrimeGenWorker {
    /// Fast, deterministic PRNG for Miller-Rabin witnesses.
    witness_rng: StdRng,
    /// Cryptographically-seeded PRNG for candidate sampling.
    candidate_rng: StdRng,
}

/// Generates a prime of approximately `bits` bits. Spawns one worker per hardware
/// thread; the first worker to draw a prime candidate wins.
pub fn generate_prime(bits: u32) -> BigInt {
    assert!(bits >= 2, "generate_prime requires at least 2 bits");
    log::debug!("generate_prime: searching for a {bits}-bit prime");

    let one = BigInt::one();
    let low = &one << (bits - 2);
    let high_inclusive = &one << (bits - 1);
    let high_exclusive = &high_inclusive + &one;

    let result = parallel_search(
        0,
        |worker_id| {
            log::trace!("generate_prime: worker {worker_id} starting");
            PrimeGenWorker {
                witness_rng: StdRng::from_rng(rand::thread_rng())
                    .expect("failed to seed witness RNG from thread_rng"),
                candidate_rng: StdRng::from_entropy(),
            }
        },
        |worker, worker_id, _found| {
            let r = BigInt::random_range(&mut worker.candidate_rng, &low, &high_exclusive);
            let candidate = (&r << 1_u32) + &one;
            log::trace!("generate_prime: worker {worker_id} trying candidate {candidate}");

            if is_prime_with_rng(&candidate, KEYGEN_MILLER_RABIN_ROUNDS, &mut worker.witness_rng) {
                StepOutcome::Found(candidate)
            } else {
                StepOutcome::Continue
            }
        },
    )
    .expect("generate_prime: a worker always eventually finds a prime");

    log::debug!("generate_prime: found {result} ({} bits)", result.bits());
    result
}

/// First 128 primes, used to seed distinct Pollard's rho starting points.
static RHO_SEEDS: Lazy<Vec<BigInt>> = Lazy::new(|| {
    let mut primes: Vec<u64> = vec![2];
    let mut candidate = 3_u64;

    while primes.len() < POLLARD_RHO_MAX_WORKERS {
        let is_prime = primes
            .iter()
            .take_while(|&&p| p * p <= candidate)
            .all(|&p| candidate % p != 0);

        if is_prime {
            primes.push(candidate);
        }

        candidate += 2;
    }

    primes.into_iter().map(BigInt::from).collect()
});

struct RhoWorker {
    x: BigInt,
    y: BigInt,
    /// The additive constant of the polynomial `f(t) = t^2 + c`. Bumped whenever
    /// this worker's cycle collapses without yielding a nontrivial factor.
    c: BigInt,
}

impl RhoWorker {
    fn reseed(&mut self, worker_id: usize) {
        let seed = RHO_SEEDS[worker_id % RHO_SEEDS.len()].clone();
        self.x = seed.clone();
        self.y = seed;
        self.c = &self.c + &BigInt::one();
    }
}

fn rho_f(t: &BigInt, c: &BigInt, n: &BigInt) -> BigInt {
    (&t.powm(&BigInt::from(2_u32), n) + c) % n
}

/// [Pollard's rho](https://en.wikipedia.org/wiki/Pollard%27s_rho_algorithm) factoring.
///
/// Returns a non-trivial factor of `n` with high probability. Spawns up to
/// `min(hardware concurrency, 128)` workers, each seeded with a distinct small
/// prime. If a worker's cycle collapses to `gcd = n` it continues with a
/// different polynomial constant rather than reporting `n` as a factor.
pub fn pollard_rho(n: &BigInt) -> BigInt {
    let workers = resolve_worker_count(0).min(POLLARD_RHO_MAX_WORKERS);
    log::debug!("pollard_rho: factoring a {}-bit modulus with {workers} workers", n.bits());

    let result = parallel_search(
        workers,
        |worker_id| {
            log::trace!("pollard_rho: worker {worker_id} starting");
            let seed = RHO_SEEDS[worker_id % RHO_SEEDS.len()].clone();
            RhoWorker {
                x: seed.clone(),
                y: seed,
                c: BigInt::one(),
            }
        },
        |worker, worker_id, _found| {
            worker.x = rho_f(&worker.x, &worker.c, n);
            worker.y = rho_f(&rho_f(&worker.y, &worker.c, n), &worker.c, n);

            let diff = (&worker.x - &worker.y).abs();
            if diff.is_zero() {
                log::trace!("pollard_rho: worker {worker_id} cycle collapsed, reseeding");
                worker.reseed(worker_id);
                return StepOutcome::Continue;
            }

            let g = gcd(&diff, n);
            if g.is_one() {
                StepOutcome::Continue
            } else if &g == n {
                log::trace!("pollard_rho: worker {worker_id} hit the trivial factor, reseeding");
                worker.reseed(worker_id);
                StepOutcome::Continue
            } else {
                StepOutcome::Found(g)
            }
        },
    )
    .expect("pollard_rho: a worker always eventually finds a factor");

    log::debug!("pollard_rho: found factor {result}");
    result
}

/// Factors a semiprime `n = p * q`, returning `(p, q)`.
///
/// For `n` under ~70 bits, Pollard's rho alone is fast enough to use directly.
/// Larger `n` falls back to the same algorithm: a sub-exponential method (e.g. a
/// quadratic sieve) is an open slot, not implemented here (see DESIGN.md).
pub fn factorise_semiprime(n: &BigInt) -> (BigInt, BigInt) {
    let p = pollard_rho(n);
    let q = n / &p;
    (p, q)
}
