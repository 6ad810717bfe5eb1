//! Claim execution
//!
//! Validates preconditions, submits the claim transaction through the
//! wallet capability, waits for confirmation, and classifies failures.
//! Claims are self-serve only: the target must be the connected
//! account, and the contract's own self-claim enforcement is treated as
//! authoritative even when the local check passed.

use crate::chain::{AllocationQuery, IAirdrop};
use crate::claim::types::{ClaimAttempt, ClaimOutcome};
use crate::eligibility::{EligibilityRecord, EligibilityResolver};
use crate::errors::FailureKind;
use crate::wallet::{SubmitError, WalletCapability, WalletSession};
use alloy::rpc::types::TransactionRequest;
use alloy_primitives::Address;
use alloy_sol_types::SolCall;
use std::sync::Arc;

pub struct ClaimExecutor<W, Q>
where
    W: WalletCapability,
    Q: AllocationQuery,
{
    wallet: Arc<W>,
    session: Arc<WalletSession<W>>,
    resolver: Arc<EligibilityResolver<Q>>,
    contract: Address,
}

impl<W, Q> ClaimExecutor<W, Q>
where
    W: WalletCapability,
    Q: AllocationQuery,
{
    pub fn new(
        wallet: Arc<W>,
        session: Arc<WalletSession<W>>,
        resolver: Arc<EligibilityResolver<Q>>,
        contract: Address,
    ) -> Self {
        Self {
            wallet,
            session,
            resolver,
            contract,
        }
    }

    /// Resolve the target's current eligibility, then claim.
    ///
    /// Connection and identity are checked before the resolution query,
    /// so a mismatched target never causes a remote call.
    pub async fn claim(&self, target: Address) -> Result<ClaimAttempt, FailureKind> {
        self.check_identity(target)?;
        let record = self.resolver.resolve(target).await?;
        self.submit(target, &record).await
    }

    /// Submit a claim for a target whose eligibility record the caller
    /// already holds.
    pub async fn submit(
        &self,
        target: Address,
        record: &EligibilityRecord,
    ) -> Result<ClaimAttempt, FailureKind> {
        let requester = self.check_identity(target)?;

        if !record.is_claimable() {
            let reason = if !record.eligible {
                "no allocation"
            } else if record.claimed {
                "already claimed"
            } else {
                "claim window closed"
            };
            return Err(FailureKind::NotClaimable {
                address: record.address.clone(),
                reason: reason.to_string(),
            });
        }

        let call = IAirdrop::claimCall { _claimTo: target };
        let tx = TransactionRequest::default()
            .from(requester)
            .to(self.contract)
            .input(call.abi_encode().into());

        let mut attempt = ClaimAttempt::submitted(requester, target);

        tracing::info!(
            target = %target,
            amount = %record.amount,
            token = %record.token,
            "🔗 Submitting claim transaction"
        );

        let tx_hash = match self.wallet.sign_and_submit(tx).await {
            Ok(hash) => hash,
            Err(e) => {
                let kind = classify_submit_error(e);
                tracing::warn!(target = %target, error = %kind, "Claim submission failed");
                attempt.outcome = ClaimOutcome::Rejected(kind);
                return Ok(attempt);
            }
        };

        // Irrevocable from here: only the wait can be abandoned
        match self.wallet.await_confirmation(tx_hash).await {
            Ok(receipt) if receipt.success => {
                tracing::info!(
                    target = %target,
                    tx_hash = %receipt.tx_hash,
                    block_number = receipt.block_number,
                    "✓ Claim confirmed"
                );

                // The prior record is stale by definition now
                let refreshed = match self.resolver.resolve(target).await {
                    Ok(record) => Some(record),
                    Err(e) => {
                        tracing::warn!(target = %target, error = %e, "Post-claim refresh failed");
                        None
                    }
                };
                attempt.outcome = ClaimOutcome::Confirmed { receipt, refreshed };
            }
            Ok(receipt) => {
                // Mined but reverted - the contract enforces self-claim
                tracing::warn!(
                    target = %target,
                    tx_hash = %receipt.tx_hash,
                    "Claim transaction reverted on-chain"
                );
                attempt.outcome = ClaimOutcome::Rejected(FailureKind::ClaimRejectedByContract {
                    cause: "claim transaction reverted".to_string(),
                });
            }
            Err(e) => {
                let kind = classify_submit_error(e);
                tracing::warn!(target = %target, error = %kind, "Claim confirmation failed");
                attempt.outcome = ClaimOutcome::Rejected(kind);
            }
        }

        Ok(attempt)
    }

    /// Preconditions 1 and 2: connected wallet, self-claim identity.
    /// Address comparison is on parsed bytes, so differing letter case
    /// never causes a mismatch.
    fn check_identity(&self, target: Address) -> Result<Address, FailureKind> {
        let requester = self
            .session
            .current_account()
            .ok_or(FailureKind::NotConnected)?;

        if requester != target {
            return Err(FailureKind::IdentityMismatch {
                requester: requester.to_string(),
                target: target.to_string(),
            });
        }
        Ok(requester)
    }
}

fn classify_submit_error(error: SubmitError) -> FailureKind {
    match error {
        SubmitError::UserDeclined => FailureKind::UserRejected,
        SubmitError::Reverted(cause) => FailureKind::ClaimRejectedByContract { cause },
        SubmitError::Transport(cause) => FailureKind::TransactionError { cause },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::SimulatedQuery;
    use crate::wallet::SimulatedWallet;
    use alloy_primitives::{address, U256};

    const ACCOUNT: Address = address!("00000000000000000000000000000000000000a1");
    const OTHER: Address = address!("00000000000000000000000000000000000000b2");

    fn ether(units: u64) -> U256 {
        U256::from(units) * U256::from(10).pow(U256::from(18))
    }

    struct Fixture {
        wallet: Arc<SimulatedWallet>,
        query: Arc<SimulatedQuery>,
        executor: ClaimExecutor<SimulatedWallet, SimulatedQuery>,
    }

    async fn fixture(wallet: SimulatedWallet, query: SimulatedQuery, connect: bool) -> Fixture {
        let wallet = Arc::new(wallet.with_accounts(vec![ACCOUNT]));
        let query = Arc::new(query);
        let session = Arc::new(WalletSession::new(Arc::clone(&wallet)));
        if connect {
            session.connect().await.unwrap();
        }
        let resolver = Arc::new(EligibilityResolver::new(
            Arc::clone(&query),
            "ZORA".to_string(),
            18,
        ));
        let executor = ClaimExecutor::new(
            Arc::clone(&wallet),
            session,
            resolver,
            address!("0000000002ba96C69b95E32CAAB8fc38bAB8B3F8"),
        );
        Fixture {
            wallet,
            query,
            executor,
        }
    }

    fn claimable_record(account: Address) -> EligibilityRecord {
        EligibilityRecord {
            address: account.to_string(),
            eligible: true,
            amount: "5".to_string(),
            amount_raw: ether(5),
            token: "ZORA".to_string(),
            claimed: false,
            claim_open: true,
        }
    }

    #[tokio::test]
    async fn not_connected_fails_before_any_remote_call() {
        let f = fixture(SimulatedWallet::new(), SimulatedQuery::new(), false).await;

        let err = f.executor.claim(ACCOUNT).await.unwrap_err();
        assert_eq!(err, FailureKind::NotConnected);
        assert!(f.wallet.submitted_transactions().is_empty());
        assert!(f.query.calls().is_empty());
    }

    #[tokio::test]
    async fn identity_mismatch_fails_before_any_remote_call() {
        let f = fixture(SimulatedWallet::new(), SimulatedQuery::new(), true).await;

        let err = f.executor.claim(OTHER).await.unwrap_err();
        assert!(matches!(err, FailureKind::IdentityMismatch { .. }));
        assert!(f.wallet.submitted_transactions().is_empty());
        assert!(f.query.calls().is_empty());
    }

    #[tokio::test]
    async fn unclaimable_records_are_rejected_without_submission() {
        let f = fixture(SimulatedWallet::new(), SimulatedQuery::new(), true).await;

        let mut already_claimed = claimable_record(ACCOUNT);
        already_claimed.claimed = true;
        let err = f.executor.submit(ACCOUNT, &already_claimed).await.unwrap_err();
        assert!(matches!(err, FailureKind::NotClaimable { .. }));

        let mut window_closed = claimable_record(ACCOUNT);
        window_closed.claim_open = false;
        let err = f.executor.submit(ACCOUNT, &window_closed).await.unwrap_err();
        assert!(matches!(err, FailureKind::NotClaimable { .. }));

        let mut not_eligible = claimable_record(ACCOUNT);
        not_eligible.eligible = false;
        not_eligible.amount_raw = U256::ZERO;
        let err = f.executor.submit(ACCOUNT, &not_eligible).await.unwrap_err();
        assert!(matches!(err, FailureKind::NotClaimable { .. }));

        assert!(f.wallet.submitted_transactions().is_empty());
    }

    #[tokio::test]
    async fn confirmed_claim_refreshes_eligibility_exactly_once() {
        // First resolve sees the claimable state, the post-claim
        // refresh sees it claimed
        let query = SimulatedQuery::new()
            .with_state(ACCOUNT, ether(5), false, true)
            .with_state(ACCOUNT, ether(5), true, true);
        let f = fixture(SimulatedWallet::new(), query, true).await;

        let attempt = f.executor.claim(ACCOUNT).await.unwrap();

        assert!(attempt.is_confirmed());
        assert_eq!(attempt.requester, ACCOUNT);
        assert_eq!(attempt.target, ACCOUNT);
        assert_eq!(f.wallet.submitted_transactions().len(), 1);
        assert_eq!(f.wallet.confirmation_waits(), 1);
        // One pre-claim resolve plus exactly one refresh
        assert_eq!(f.query.calls_for(ACCOUNT), 2);

        match attempt.outcome {
            ClaimOutcome::Confirmed { receipt, refreshed } => {
                assert!(receipt.success);
                let refreshed = refreshed.unwrap();
                assert!(refreshed.claimed);
                assert!(!refreshed.is_claimable());
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn declined_signing_is_user_rejected_and_retryable() {
        let wallet = SimulatedWallet::new().with_submit_error(SubmitError::UserDeclined);
        let query = SimulatedQuery::new().with_state(ACCOUNT, ether(5), false, true);
        let f = fixture(wallet, query, true).await;

        let attempt = f.executor.claim(ACCOUNT).await.unwrap();
        let rejection = attempt.rejection().unwrap();
        assert_eq!(*rejection, FailureKind::UserRejected);
        assert!(rejection.is_retryable());
        // No refresh after a failed submission
        assert_eq!(f.query.calls_for(ACCOUNT), 1);
    }

    #[tokio::test]
    async fn reverted_receipt_is_claim_rejected_by_contract() {
        let wallet = SimulatedWallet::new().with_failed_receipt();
        let query = SimulatedQuery::new().with_state(ACCOUNT, ether(5), false, true);
        let f = fixture(wallet, query, true).await;

        let attempt = f.executor.claim(ACCOUNT).await.unwrap();
        assert!(matches!(
            attempt.rejection(),
            Some(FailureKind::ClaimRejectedByContract { .. })
        ));
    }

    #[tokio::test]
    async fn revert_during_execution_is_claim_rejected_by_contract() {
        let wallet = SimulatedWallet::new()
            .with_submit_error(SubmitError::Reverted("not claim owner".to_string()));
        let query = SimulatedQuery::new().with_state(ACCOUNT, ether(5), false, true);
        let f = fixture(wallet, query, true).await;

        let attempt = f.executor.claim(ACCOUNT).await.unwrap();
        match attempt.rejection() {
            Some(FailureKind::ClaimRejectedByContract { cause }) => {
                assert!(cause.contains("not claim owner"));
            }
            other => panic!("unexpected rejection: {:?}", other),
        }
    }

    #[tokio::test]
    async fn transport_failure_is_a_retryable_transaction_error() {
        let wallet = SimulatedWallet::new()
            .with_confirm_error(SubmitError::Transport("connection reset".to_string()));
        let query = SimulatedQuery::new().with_state(ACCOUNT, ether(5), false, true);
        let f = fixture(wallet, query, true).await;

        let attempt = f.executor.claim(ACCOUNT).await.unwrap();
        let rejection = attempt.rejection().unwrap();
        assert!(matches!(rejection, FailureKind::TransactionError { .. }));
        assert!(rejection.is_retryable());
        // Submission went out even though confirmation failed
        assert_eq!(f.wallet.submitted_transactions().len(), 1);
    }
}
