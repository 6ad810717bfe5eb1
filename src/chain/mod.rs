//! Network guard and on-chain query capability

mod guard;
mod query;

pub use guard::{ChainGuard, NetworkStatus};
pub use query::{
    AllocationQuery, ContractQuery, IAirdrop, QueryError, RawClaimState, SimulatedQuery,
};
