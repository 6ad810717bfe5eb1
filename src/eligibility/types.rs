use crate::errors::FailureKind;
use alloy_primitives::U256;
use serde::Serialize;

/// Outcome of one eligibility check
///
/// Immutable once produced; a re-check yields a fresh record rather
/// than mutating this one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EligibilityRecord {
    /// Canonical checksummed rendering of the checked address, not the
    /// input's original casing: case variants of one address yield
    /// byte-identical records. Raw input survives in `FailureEntry`.
    pub address: String,
    pub eligible: bool,
    /// Human-readable decimal string, full precision
    pub amount: String,
    /// Raw fixed-point allocation as returned by the contract
    pub amount_raw: U256,
    pub token: String,
    pub claimed: bool,
    pub claim_open: bool,
}

impl EligibilityRecord {
    /// Eligible, unclaimed, and inside the claim window
    pub fn is_claimable(&self) -> bool {
        self.eligible && !self.claimed && self.claim_open
    }
}

/// Per-address failure inside a batch, captured as data so one bad
/// address never aborts the siblings. `address` keeps the raw input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureEntry {
    pub address: String,
    pub reason: FailureKind,
}

/// One slot of a batch report, in input order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum BatchEntry {
    Resolved(EligibilityRecord),
    Failed(FailureEntry),
}

impl BatchEntry {
    pub fn record(&self) -> Option<&EligibilityRecord> {
        match self {
            BatchEntry::Resolved(record) => Some(record),
            BatchEntry::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&FailureEntry> {
        match self {
            BatchEntry::Resolved(_) => None,
            BatchEntry::Failed(entry) => Some(entry),
        }
    }
}

/// Aggregate report over a batch of addresses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    /// One entry per input address, in input order
    pub records: Vec<BatchEntry>,
    pub total_checked: usize,
    pub total_eligible: usize,
    /// Exact decimal sum of eligible allocations
    pub total_allocation: String,
    pub total_allocation_raw: U256,
}
