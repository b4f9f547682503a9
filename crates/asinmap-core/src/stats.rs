//! Run-lifetime counters, owned by the driver and reported once at the end.

use crate::row::ResolutionOutcome;

#[derive(Debug, Default, Clone, Copy)]
pub struct RunStatistics {
    pub processed: u64,
    pub succeeded: u64,
    pub failed: u64,
}

impl RunStatistics {
    /// Counts one finalized row. Every outcome increments `processed` and
    /// exactly one of the other two counters.
    pub fn record(&mut self, outcome: &ResolutionOutcome) {
        self.processed += 1;
        match outcome {
            ResolutionOutcome::Success { .. } => self.succeeded += 1,
            ResolutionOutcome::Failure { .. } => self.failed += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::FailureReason;

    #[test]
    fn record_splits_outcomes_across_counters() {
        let mut stats = RunStatistics::default();
        stats.record(&ResolutionOutcome::Success {
            sku: "SKU001".to_string(),
            asin: "B000TEST01".to_string(),
        });
        stats.record(&ResolutionOutcome::Failure {
            line_number: 3,
            sku: None,
            reason: FailureReason::NoGoodMatch,
        });
        assert_eq!(stats.processed, 2);
        assert_eq!(stats.succeeded, 1);
        assert_eq!(stats.failed, 1);
    }
}
