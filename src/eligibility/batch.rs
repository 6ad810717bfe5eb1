//! Batched eligibility resolution with per-item isolation
//!
//! Each address is validated and resolved independently; a failure
//! becomes a `FailureEntry` in the report instead of aborting the
//! batch. Resolution fans out concurrently up to the configured limit,
//! and results are reassembled in input order.

use crate::address;
use crate::chain::AllocationQuery;
use crate::eligibility::resolver::EligibilityResolver;
use crate::eligibility::types::{BatchEntry, BatchReport, FailureEntry};
use crate::errors::FailureKind;
use alloy_primitives::U256;
use futures_util::stream::{self, StreamExt};
use std::sync::Arc;

pub struct BatchEligibilityResolver<Q>
where
    Q: AllocationQuery,
{
    resolver: Arc<EligibilityResolver<Q>>,
    concurrency: usize,
}

impl<Q> BatchEligibilityResolver<Q>
where
    Q: AllocationQuery + 'static,
{
    pub fn new(resolver: Arc<EligibilityResolver<Q>>, concurrency: usize) -> Self {
        Self {
            resolver,
            concurrency: concurrency.max(1),
        }
    }

    /// Resolve a list of raw address strings into an aggregate report.
    ///
    /// Each input string may hold several line-separated addresses;
    /// lines are trimmed and blank lines dropped. Fails fast with
    /// `EmptyInput` when nothing remains.
    pub async fn resolve_batch(&self, addresses: &[String]) -> Result<BatchReport, FailureKind> {
        let entries: Vec<String> = addresses
            .iter()
            .flat_map(|input| input.lines())
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        if entries.is_empty() {
            return Err(FailureKind::EmptyInput);
        }

        tracing::info!(count = entries.len(), "Resolving eligibility batch");

        // `buffered` keeps input order regardless of completion order,
        // and one item's failure never cancels its siblings.
        let records: Vec<BatchEntry> = stream::iter(entries.into_iter().map(|raw| {
            let resolver = Arc::clone(&self.resolver);
            async move { Self::resolve_entry(&resolver, raw).await }
        }))
        .buffered(self.concurrency)
        .collect()
        .await;

        let mut total_eligible = 0;
        let mut total_raw = U256::ZERO;
        for record in records.iter().filter_map(BatchEntry::record) {
            if record.eligible {
                total_eligible += 1;
                total_raw = total_raw.saturating_add(record.amount_raw);
            }
        }

        let total_allocation = self
            .resolver
            .format_amount(total_raw)
            .map_err(|cause| FailureKind::ResolutionError {
                address: "<batch total>".to_string(),
                cause,
            })?;

        let report = BatchReport {
            total_checked: records.len(),
            total_eligible,
            total_allocation,
            total_allocation_raw: total_raw,
            records,
        };

        tracing::info!(
            total_checked = report.total_checked,
            total_eligible = report.total_eligible,
            total_allocation = %report.total_allocation,
            token = %self.resolver.token(),
            "Batch resolution complete"
        );
        Ok(report)
    }

    async fn resolve_entry(resolver: &EligibilityResolver<Q>, raw: String) -> BatchEntry {
        let account = match address::validate(&raw) {
            Ok(account) => account,
            Err(reason) => {
                tracing::warn!(input = %raw, error = %reason, "Skipping invalid address");
                return BatchEntry::Failed(FailureEntry {
                    address: raw,
                    reason,
                });
            }
        };

        match resolver.resolve(account).await {
            Ok(record) => BatchEntry::Resolved(record),
            Err(reason) => {
                tracing::warn!(input = %raw, error = %reason, "Eligibility check failed in batch");
                BatchEntry::Failed(FailureEntry {
                    address: raw,
                    reason,
                })
            }
        }
    }
}
