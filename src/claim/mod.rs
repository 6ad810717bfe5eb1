//! Claim submission and confirmation

mod executor;
mod types;

pub use executor::ClaimExecutor;
pub use types::{ClaimAttempt, ClaimOutcome};
