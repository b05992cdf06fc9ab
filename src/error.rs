//! Grepable error codes for user-facing failure notices.

/// Grepable error code and retryable flag for failures shown to the user.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}
