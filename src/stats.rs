//! Stats Aggregator
//!
//! Lead counts grouped by stage.

use std::collections::BTreeMap;

use crate::record::Record;

/// Stages always present in [`Stats::by_stage`]
pub const CORE_STAGES: [&str; 3] = ["NEW", "ATTEMPT", "CUSTOMER"];

/// Collection totals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stats {
    /// Number of records
    pub total: usize,

    /// Count per stage value; core stages are listed even when zero
    pub by_stage: BTreeMap<String, usize>,
}

impl Stats {
    /// Count for one stage (0 when unseen)
    pub fn count(&self, stage: &str) -> usize {
        self.by_stage.get(stage).copied().unwrap_or(0)
    }
}

/// Count records per stage in a single pass
pub fn stats(records: &[Record]) -> Stats {
    let mut by_stage: BTreeMap<String, usize> = CORE_STAGES
        .iter()
        .map(|stage| (stage.to_string(), 0))
        .collect();

    // Records without a stage count toward the total only
    for record in records.iter().filter(|r| !r.stage().is_empty()) {
        *by_stage.entry(record.stage().to_string()).or_insert(0) += 1;
    }

    Stats {
        total: records.len(),
        by_stage,
    }
}
