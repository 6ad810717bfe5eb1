use crate::eligibility::EligibilityRecord;
use crate::errors::FailureKind;
use crate::wallet::ClaimReceipt;
use alloy_primitives::Address;
use chrono::{DateTime, Utc};

/// Terminal state of a claim attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// Submitted, confirmation not yet observed
    Pending,
    /// Mined successfully; `refreshed` is the post-claim eligibility
    /// state, re-resolved rather than assumed (`None` only if the
    /// refresh query itself failed)
    Confirmed {
        receipt: ClaimReceipt,
        refreshed: Option<EligibilityRecord>,
    },
    Rejected(FailureKind),
}

/// A claim transaction attempt. Created at submission time; the
/// preconditions (connected wallet, self-claim identity, claimable
/// record) are enforced before one of these exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimAttempt {
    pub requester: Address,
    pub target: Address,
    pub submitted_at: DateTime<Utc>,
    pub outcome: ClaimOutcome,
}

impl ClaimAttempt {
    pub(crate) fn submitted(requester: Address, target: Address) -> Self {
        Self {
            requester,
            target,
            submitted_at: Utc::now(),
            outcome: ClaimOutcome::Pending,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self.outcome, ClaimOutcome::Confirmed { .. })
    }

    /// The failure kind for a rejected attempt
    pub fn rejection(&self) -> Option<&FailureKind> {
        match &self.outcome {
            ClaimOutcome::Rejected(kind) => Some(kind),
            _ => None,
        }
    }
}
