//! Single-address eligibility resolution
//!
//! One read-only contract query per check. A failed query is a
//! `ResolutionError`, never a zero-eligibility record: callers must be
//! able to tell "not eligible" from "could not determine".

use crate::address;
use crate::chain::AllocationQuery;
use crate::eligibility::types::EligibilityRecord;
use crate::errors::FailureKind;
use alloy_primitives::utils::format_units;
use alloy_primitives::{Address, U256};
use std::sync::Arc;

pub struct EligibilityResolver<Q>
where
    Q: AllocationQuery,
{
    query: Arc<Q>,
    token: String,
    decimals: u8,
}

impl<Q> EligibilityResolver<Q>
where
    Q: AllocationQuery,
{
    pub fn new(query: Arc<Q>, token: String, decimals: u8) -> Self {
        Self {
            query,
            token,
            decimals,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Resolve eligibility for a validated address
    pub async fn resolve(&self, account: Address) -> Result<EligibilityRecord, FailureKind> {
        let display_addr = account.to_string();

        let state = self.query.account_claim(account).await.map_err(|e| {
            tracing::warn!(address = %account, error = %e, "Eligibility query failed");
            FailureKind::ResolutionError {
                address: display_addr.clone(),
                cause: e.to_string(),
            }
        })?;

        let amount = self.format_amount(state.allocation).map_err(|cause| {
            FailureKind::ResolutionError {
                address: display_addr.clone(),
                cause,
            }
        })?;

        let record = EligibilityRecord {
            address: display_addr,
            eligible: state.allocation > U256::ZERO,
            amount,
            amount_raw: state.allocation,
            token: self.token.clone(),
            claimed: state.claimed,
            claim_open: state.claim_open,
        };

        tracing::debug!(
            address = %record.address,
            eligible = record.eligible,
            amount = %record.amount,
            claimed = record.claimed,
            claim_open = record.claim_open,
            "Resolved eligibility"
        );
        Ok(record)
    }

    /// Validate a raw address string, then resolve it
    pub async fn resolve_str(&self, raw: &str) -> Result<EligibilityRecord, FailureKind> {
        let account = address::validate(raw)?;
        self.resolve(account).await
    }

    /// Convert a raw fixed-point value to a decimal string with full
    /// precision, trimming insignificant trailing zeros.
    pub fn format_amount(&self, raw: U256) -> Result<String, String> {
        let formatted = format_units(raw, self.decimals).map_err(|e| e.to_string())?;
        Ok(trim_fraction(&formatted))
    }
}

/// Drop trailing fractional zeros ("5.000" -> "5", "0.50" -> "0.5")
fn trim_fraction(formatted: &str) -> String {
    if !formatted.contains('.') {
        return formatted.to_string();
    }
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
