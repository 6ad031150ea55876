use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the particle core.
///
/// Every precondition the particle operations rely on is reported through one
/// of these variants instead of producing undefined arithmetic.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A required argument is absent or holds an unusable value.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The periodic domain is unusable (non-finite, zero or negative limit).
    #[error("invalid domain: {0}")]
    InvalidDomain(String),
}
