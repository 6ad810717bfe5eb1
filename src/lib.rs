//! Airdrop eligibility and claim orchestration
//!
//! Determines whether one or many addresses are eligible for a token
//! airdrop, reports allocations and claim status, and submits the
//! on-chain claim for a connected wallet. Wallet access and chain
//! queries are capability traits, so the whole flow runs against
//! scripted doubles in tests and against a real provider in production.

pub mod address;
pub mod chain;
pub mod claim;
pub mod client;
pub mod config;
pub mod eligibility;
pub mod errors;
pub mod wallet;

// Re-export commonly used items
pub use chain::{AllocationQuery, ChainGuard, ContractQuery, NetworkStatus, SimulatedQuery};
pub use claim::{ClaimAttempt, ClaimExecutor, ClaimOutcome};
pub use client::AirdropClient;
pub use config::AirdropConfig;
pub use eligibility::{
    BatchEligibilityResolver, BatchEntry, BatchReport, EligibilityRecord, EligibilityResolver,
    FailureEntry,
};
pub use errors::FailureKind;
pub use wallet::{SimulatedWallet, WalletCapability, WalletSession, WalletSessionState};
