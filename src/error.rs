//! Shared error-code contract.
//!
//! Every error enum in the crate maps to a grepable `E_*` code that the HTTP
//! layer returns in JSON error bodies and that log lines carry as a field.

/// Grepable error code and retryable flag for structured error responses.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}
