//! Top-level orchestrator
//!
//! Composes the session, network guard, resolvers and claim executor
//! over one wallet capability and one allocation query. Control flow
//! follows connect -> ensure network -> resolve (single or batch) ->
//! claim -> refresh.

use crate::chain::{AllocationQuery, ChainGuard, NetworkStatus};
use crate::claim::{ClaimAttempt, ClaimExecutor};
use crate::config::AirdropConfig;
use crate::eligibility::{BatchEligibilityResolver, BatchReport, EligibilityRecord, EligibilityResolver};
use crate::errors::FailureKind;
use crate::wallet::{WalletCapability, WalletSession, WalletSessionState};
use std::sync::Arc;

pub struct AirdropClient<W, Q>
where
    W: WalletCapability,
    Q: AllocationQuery,
{
    session: Arc<WalletSession<W>>,
    guard: ChainGuard<W>,
    resolver: Arc<EligibilityResolver<Q>>,
    batch: BatchEligibilityResolver<Q>,
    executor: ClaimExecutor<W, Q>,
}

impl<W, Q> AirdropClient<W, Q>
where
    W: WalletCapability,
    Q: AllocationQuery + 'static,
{
    pub fn new(config: AirdropConfig, wallet: Arc<W>, query: Arc<Q>) -> eyre::Result<Self> {
        let contract = config
            .contract_address()
            .map_err(|e| eyre::eyre!("invalid contract address in config: {}", e))?;

        let session = Arc::new(WalletSession::new(Arc::clone(&wallet)));
        let guard = ChainGuard::new(Arc::clone(&wallet), config.network.clone());
        let resolver = Arc::new(EligibilityResolver::new(
            query,
            config.contract.token_symbol.clone(),
            config.contract.token_decimals,
        ));
        let batch = BatchEligibilityResolver::new(Arc::clone(&resolver), config.batch.concurrency);
        let executor = ClaimExecutor::new(
            wallet,
            Arc::clone(&session),
            Arc::clone(&resolver),
            contract,
        );

        Ok(Self {
            session,
            guard,
            resolver,
            batch,
            executor,
        })
    }

    /// Connect the wallet and guarantee the required network.
    ///
    /// The session counts as connected only after both steps succeed;
    /// a guard failure rolls the session back to disconnected. The
    /// returned `NetworkStatus` carries the "switching unsupported,
    /// proceeding" warning marker when the wallet cannot switch.
    pub async fn connect(&self) -> Result<(WalletSessionState, NetworkStatus), FailureKind> {
        self.session.connect().await?;

        let status = match self.guard.ensure_network().await {
            Ok(status) => status,
            Err(e) => {
                self.session.disconnect();
                return Err(e);
            }
        };
        if status == NetworkStatus::Switched {
            self.session.mark_chain(self.guard.required_chain_id());
        }

        Ok((self.session.state(), status))
    }

    pub fn disconnect(&self) {
        self.session.disconnect();
    }

    pub fn session_state(&self) -> WalletSessionState {
        self.session.state()
    }

    /// Check eligibility for a raw address string
    pub async fn check(&self, raw: &str) -> Result<EligibilityRecord, FailureKind> {
        self.resolver.resolve_str(raw).await
    }

    /// Check eligibility for the connected account, the default query
    /// address after a successful connect
    pub async fn check_connected(&self) -> Result<EligibilityRecord, FailureKind> {
        let account = self
            .session
            .current_account()
            .ok_or(FailureKind::NotConnected)?;
        self.resolver.resolve(account).await
    }

    /// Check a list of raw address strings with per-item isolation
    pub async fn check_batch(&self, addresses: &[String]) -> Result<BatchReport, FailureKind> {
        self.batch.resolve_batch(addresses).await
    }

    /// Claim the connected account's allocation. Re-resolves
    /// eligibility before submitting; never claims for a third-party
    /// address.
    pub async fn claim(&self) -> Result<ClaimAttempt, FailureKind> {
        let account = self
            .session
            .current_account()
            .ok_or(FailureKind::NotConnected)?;
        self.executor.claim(account).await
    }

    /// Claim for an explicitly named target, which must still be the
    /// connected account
    pub async fn claim_for(&self, raw: &str) -> Result<ClaimAttempt, FailureKind> {
        let target = crate::address::validate(raw)?;
        self.executor.claim(target).await
    }
}
