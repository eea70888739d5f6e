//! `rubbish-rsa`: a didactic, deliberately insecure textbook-RSA toolkit.
//!
//! This crate implements unpadded RSA key generation, raw encrypt/decrypt/sign/verify,
//! and a parallel attack engine that factors moduli, brute-forces plaintexts and
//! signatures, and forges signatures through the multiplicative homomorphism. None
//! of this is suitable for anything but teaching - there is no padding, no
//! constant-time arithmetic, and no defense against any of the attacks this same
//! crate implements. *Don't roll your own crypto.*
//!
//! The modules are layered bottom-up: [`bigint`] and [`codec`] depend on nothing
//! else in the crate; [`numtheory`] builds on [`bigint`]; [`keys`] builds on
//! [`numtheory`] and [`codec`]; [`attack`] builds on [`keys`] and [`numtheory`].
//! [`parallel`] is the cancellable-search routine shared by prime generation,
//! Pollard's rho, and both brute-force attackers.

#![deny(clippy::correctness)]
#![warn(clippy::style)]
#![warn(clippy::complexity)]
#![warn(clippy::perf)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::use_self)] // Not sure about this :/
#![allow(clippy::unreadable_literal)] // I don't like it on hex magic constants
#![allow(clippy::cast_precision_loss)] // I like it, but there are too many which renders it pointless
#![allow(clippy::cast_possible_truncation)] // I like it, but there are too many which renders it pointless
#![allow(clippy::needless_range_loop)] // Too many false positives, not very smart
#![allow(clippy::doc_markdown)] // Too many false positives, not very smart
#![allow(clippy::module_name_repetitions)] // Anti-pattern IMHO

pub mod attack;
pub mod bigint;
pub mod codec;
pub mod error;
pub mod keys;
pub mod numtheory;
pub mod parallel;

pub use bigint::BigInt;
pub use error::{Result, RsaError};
pub use keys::{PrivateKey, PublicKey, RsaPublicLike};
