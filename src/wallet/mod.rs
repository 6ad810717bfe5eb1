//! Wallet capability contract and session state

mod capability;
mod session;
mod simulated;

pub use capability::{ClaimReceipt, SubmitError, SwitchChainError, WalletCapability, WalletError};
pub use session::{WalletSession, WalletSessionState};
pub use simulated::SimulatedWallet;
