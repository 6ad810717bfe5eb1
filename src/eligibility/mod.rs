//! Eligibility resolution, single and batched

mod batch;
mod resolver;
mod types;

pub use batch::BatchEligibilityResolver;
pub use resolver::EligibilityResolver;
pub use types::{BatchEntry, BatchReport, EligibilityRecord, FailureEntry};
