//! Failure taxonomy for eligibility and claim orchestration
//!
//! Every failure the orchestrator can produce is one of these kinds.
//! Per-address failures inside a batch are captured as data
//! (`FailureEntry`), never thrown past the batch boundary; everything
//! else surfaces as a typed `Err` carrying enough context to render a
//! precise message. "Could not determine" is always kept distinct from
//! "not eligible".

use serde::Serialize;

/// Classified failure kinds
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FailureKind {
    // Input validation
    InvalidAddress { input: String, reason: String },
    EmptyInput,

    // Wallet session
    WalletUnavailable,
    SessionBusy,
    UserRejected,
    NotConnected,

    // Network guard
    NetworkError { chain_id: u64, cause: String },

    // Eligibility resolution
    ResolutionError { address: String, cause: String },

    // Claim preconditions
    IdentityMismatch { requester: String, target: String },
    NotClaimable { address: String, reason: String },

    // Claim execution
    ClaimRejectedByContract { cause: String },
    TransactionError { cause: String },
}

impl FailureKind {
    /// Whether the caller may retry the same operation unchanged
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            FailureKind::UserRejected | FailureKind::TransactionError { .. }
        )
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::InvalidAddress { input, reason } => {
                write!(f, "Invalid address '{}': {}", input, reason)
            }
            FailureKind::EmptyInput => write!(f, "No addresses provided"),
            FailureKind::WalletUnavailable => {
                write!(f, "No wallet capability available in this environment")
            }
            FailureKind::SessionBusy => {
                write!(f, "A wallet connection attempt is already in progress")
            }
            FailureKind::UserRejected => write!(f, "User rejected the wallet prompt"),
            FailureKind::NotConnected => write!(f, "Wallet is not connected"),
            FailureKind::NetworkError { chain_id, cause } => {
                write!(f, "Network error for chain {}: {}", chain_id, cause)
            }
            FailureKind::ResolutionError { address, cause } => {
                write!(f, "Could not resolve eligibility for {}: {}", address, cause)
            }
            FailureKind::IdentityMismatch { requester, target } => {
                write!(
                    f,
                    "Claims are self-serve only: connected account {} cannot claim for {}",
                    requester, target
                )
            }
            FailureKind::NotClaimable { address, reason } => {
                write!(f, "{} is not claimable: {}", address, reason)
            }
            FailureKind::ClaimRejectedByContract { cause } => {
                write!(f, "Claim rejected by contract: {}", cause)
            }
            FailureKind::TransactionError { cause } => {
                write!(f, "Transaction error: {}", cause)
            }
        }
    }
}

impl std::error::Error for FailureKind {}
