//! Error types surfaced to collaborators (CLI, tests, anything driving this crate).
//!
//! Probabilistic algorithms (Miller-Rabin, Pollard's rho) never raise on ordinary
//! non-success; they loop until they succeed. Only programming errors - zero/negative
//! `egcd` inputs, non-coprime `modinv` inputs, undersized key requests, out-of-range
//! RSA operands, and malformed text - surface as `RsaError`.

use thiserror::Error;

/// Everything that can go wrong in this crate.
#[derive(Error, Debug)]
pub enum RsaError {
    /// A caller passed an argument that violates a documented precondition.
    #[error("invalid argument for {what}: {detail}")]
    InvalidArgument {
        /// Which field/operand was at fault (e.g. `"egcd.a"`, `"raw_encrypt.message"`).
        what: &'static str,
        detail: String,
    },

    /// Malformed key text or malformed hex input.
    #[error("failed to parse {what}: {detail}")]
    ParseError {
        what: &'static str,
        detail: String,
    },

    /// Surfaced unchanged from an I/O collaborator (e.g. a candidate stream).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RsaError {
    pub(crate) fn invalid_argument(what: &'static str, detail: impl Into<String>) -> RsaError {
        RsaError::InvalidArgument {
            what,
            detail: detail.into(),
        }
    }

    pub(crate) fn parse_error(what: &'static str, detail: impl Into<String>) -> RsaError {
        RsaError::ParseError {
            what,
            detail: detail.into(),
        }
    }
}

/// Shorthand used throughout this crate.
pub type Result<T> = std::result::Result<T, RsaError>;
