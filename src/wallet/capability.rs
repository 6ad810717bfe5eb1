//! Capability contract for an environment-provided wallet
//!
//! The wallet is an external collaborator (an injected provider in a
//! browser, a hardware bridge, a test double). The orchestrator only
//! depends on this trait, so every failure mode it needs to classify is
//! a structured code here, never a message string to be pattern-matched.

use crate::config::NetworkConfig;
use alloy::rpc::types::TransactionRequest;
use alloy_primitives::{Address, B256};

/// General wallet failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// No wallet is present in the environment
    Unavailable,
    /// The human declined the wallet prompt
    UserDeclined,
    Other(String),
}

impl std::fmt::Display for WalletError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WalletError::Unavailable => write!(f, "wallet unavailable"),
            WalletError::UserDeclined => write!(f, "user declined"),
            WalletError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

/// Closed code set for chain-switch requests, mirroring the
/// EIP-1193/EIP-3085 provider codes (4902 unrecognized chain, 4200
/// unsupported method, 4001 user rejection).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchChainError {
    /// The wallet does not know the requested chain (4902)
    UnrecognizedChain,
    /// The wallet cannot switch chains at all (4200)
    Unsupported,
    /// The human declined the switch prompt (4001)
    UserDeclined,
    Other(String),
}

impl std::fmt::Display for SwitchChainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SwitchChainError::UnrecognizedChain => write!(f, "chain not recognized by wallet"),
            SwitchChainError::Unsupported => write!(f, "chain switching unsupported"),
            SwitchChainError::UserDeclined => write!(f, "user declined chain switch"),
            SwitchChainError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

/// Failures while signing, submitting or confirming a transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// The human declined the signing prompt
    UserDeclined,
    /// Contract-level revert during execution
    Reverted(String),
    /// Transport or node failure
    Transport(String),
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitError::UserDeclined => write!(f, "user declined signing"),
            SubmitError::Reverted(msg) => write!(f, "execution reverted: {}", msg),
            SubmitError::Transport(msg) => write!(f, "transport error: {}", msg),
        }
    }
}

/// Receipt of a confirmed transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimReceipt {
    pub tx_hash: B256,
    pub block_number: u64,
    /// Execution status reported by the chain; `false` means the
    /// transaction was mined but reverted
    pub success: bool,
}

#[async_trait::async_trait]
pub trait WalletCapability: Send + Sync {
    /// Request account access, returning the wallet's accounts
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError>;

    /// Ask the wallet to switch its active chain
    async fn switch_chain(&self, chain_id: u64) -> Result<(), SwitchChainError>;

    /// Register a network definition with the wallet
    async fn register_chain(&self, descriptor: &NetworkConfig) -> Result<(), WalletError>;

    /// Sign and broadcast a transaction, returning its hash
    async fn sign_and_submit(&self, tx: TransactionRequest) -> Result<B256, SubmitError>;

    /// Wait for on-chain confirmation of a previously submitted
    /// transaction. Abandoning the wait does not retract the
    /// submission.
    async fn await_confirmation(&self, tx_hash: B256) -> Result<ClaimReceipt, SubmitError>;
}
