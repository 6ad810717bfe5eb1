//! Read-only chain query capability
//!
//! One view call per address: `accountClaim` returns the raw
//! fixed-point allocation plus the claim flags. The trait seam keeps
//! the resolver independent of the transport, with `ContractQuery` as
//! the RPC-backed implementation and `SimulatedQuery` as a scripted
//! double.

use alloy::providers::Provider;
use alloy::sol;
use alloy_primitives::{Address, U256};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

sol! {
    /// Airdrop distribution contract
    #[sol(rpc)]
    interface IAirdrop {
        /// Allocation and claim flags for an account
        function accountClaim(address account) external view returns (uint256 allocation, bool claimed, bool claimOpen);

        /// Transfer the caller's allocation to `_claimTo`
        function claim(address _claimTo) external;
    }
}

/// Raw on-chain claim state, before decimal conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawClaimState {
    pub allocation: U256,
    pub claimed: bool,
    pub claim_open: bool,
}

/// Transport or decode failure while querying the contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryError(pub String);

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for QueryError {}

#[async_trait::async_trait]
pub trait AllocationQuery: Send + Sync {
    async fn account_claim(&self, account: Address) -> Result<RawClaimState, QueryError>;
}

/// RPC-backed allocation query against the deployed contract
pub struct ContractQuery<P>
where
    P: Provider + Clone,
{
    provider: P,
    contract: Address,
}

impl<P> ContractQuery<P>
where
    P: Provider + Clone,
{
    pub fn new(provider: P, contract: Address) -> Self {
        Self { provider, contract }
    }
}

#[async_trait::async_trait]
impl<P> AllocationQuery for ContractQuery<P>
where
    P: Provider + Clone + Send + Sync + 'static,
{
    async fn account_claim(&self, account: Address) -> Result<RawClaimState, QueryError> {
        let airdrop = IAirdrop::new(self.contract, &self.provider);

        let ret = airdrop
            .accountClaim(account)
            .call()
            .await
            .map_err(|e| QueryError(format!("accountClaim failed: {}", e)))?;

        Ok(RawClaimState {
            allocation: ret.allocation,
            claimed: ret.claimed,
            claim_open: ret.claimOpen,
        })
    }
}

/// Scripted query responses, consumed in order per address
enum ScriptedResponse {
    State(RawClaimState),
    Error(QueryError),
}

/// Deterministic allocation-query double
///
/// Responses queue per address; the last queued response is sticky, so
/// a single `with_state` answers every call for that address. Unknown
/// addresses resolve to a zero allocation with the claim window open.
/// Every call is logged for assertions.
#[derive(Default)]
pub struct SimulatedQuery {
    scripts: Mutex<HashMap<Address, VecDeque<ScriptedResponse>>>,
    delays: Mutex<HashMap<Address, u64>>,
    calls: Mutex<Vec<Address>>,
}

impl SimulatedQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a claim state response for an address
    pub fn with_state(self, account: Address, allocation: U256, claimed: bool, claim_open: bool) -> Self {
        self.scripts
            .lock()
            .entry(account)
            .or_default()
            .push_back(ScriptedResponse::State(RawClaimState {
                allocation,
                claimed,
                claim_open,
            }));
        self
    }

    /// Queue a query failure for an address
    pub fn with_error(self, account: Address, cause: &str) -> Self {
        self.scripts
            .lock()
            .entry(account)
            .or_default()
            .push_back(ScriptedResponse::Error(QueryError(cause.to_string())));
        self
    }

    /// Delay responses for an address, to exercise ordering under
    /// concurrency
    pub fn with_delay_ms(self, account: Address, millis: u64) -> Self {
        self.delays.lock().insert(account, millis);
        self
    }

    pub fn calls(&self) -> Vec<Address> {
        self.calls.lock().clone()
    }

    pub fn calls_for(&self, account: Address) -> usize {
        self.calls.lock().iter().filter(|a| **a == account).count()
    }
}

#[async_trait::async_trait]
impl AllocationQuery for SimulatedQuery {
    async fn account_claim(&self, account: Address) -> Result<RawClaimState, QueryError> {
        self.calls.lock().push(account);

        let delay = self.delays.lock().get(&account).copied();
        if let Some(millis) = delay {
            tokio::time::sleep(Duration::from_millis(millis)).await;
        }

        let mut scripts = self.scripts.lock();
        let Some(queue) = scripts.get_mut(&account) else {
            return Ok(RawClaimState {
                allocation: U256::ZERO,
                claimed: false,
                claim_open: true,
            });
        };

        // Last response is sticky
        let response = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().map(|r| match r {
                ScriptedResponse::State(s) => ScriptedResponse::State(*s),
                ScriptedResponse::Error(e) => ScriptedResponse::Error(e.clone()),
            })
        };

        match response {
            Some(ScriptedResponse::State(state)) => Ok(state),
            Some(ScriptedResponse::Error(e)) => Err(e),
            None => Ok(RawClaimState {
                allocation: U256::ZERO,
                claimed: false,
                claim_open: true,
            }),
        }
    }
}
