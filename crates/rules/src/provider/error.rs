//! Error type for the pull-based provider.

use crate::convert::DecodeError;
use crate::remote::FetchError;

/// Errors surfaced by [`FlowRuleProvider`](super::FlowRuleProvider).
///
/// Both variants pass the underlying error through uninterpreted; the
/// provider performs no retries and no fallback of its own.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The remote read failed (network, auth, timeout, missing namespace).
    #[error("remote fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// The fetched payload was present but undecodable.
    #[error("rule decode failed: {0}")]
    Decode(#[from] DecodeError),
}

/// Result alias for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;
