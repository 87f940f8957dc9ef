//! Fisher's exact test over the induced 2x2 contingency table
//!
//! The table for an itemset is "contains the itemset" vs "positive
//! outcome". The one-sided (upper tail) hypergeometric sum is computed in
//! log space; the reported statistic is the positive count inside the
//! support set.

use super::{binary_positive_count, ln_choose, ConfigError, TestFamily, TestOutcome};
use crate::transaction::Transaction;

/// Fisher exact strategy; requires strictly 0/1 outcomes
#[derive(Debug)]
pub struct FisherExact {
    /// Total transactions
    n: usize,
    /// Positive-outcome transactions
    n1: usize,
}

impl FisherExact {
    pub fn new(transactions: &[Transaction]) -> Result<Self, ConfigError> {
        let n1 = binary_positive_count(transactions)?;
        Ok(Self {
            n: transactions.len(),
            n1,
        })
    }

    /// Hypergeometric point probability P(X = positives) at the given support
    fn point_probability(&self, positives: usize, support: usize) -> f64 {
        (ln_choose(self.n1, positives) + ln_choose(self.n - self.n1, support - positives)
            - ln_choose(self.n, support))
            .exp()
    }
}

impl TestFamily for FisherExact {
    fn name(&self) -> &'static str {
        "fisher"
    }

    fn min_attainable_p(&self, min_support: usize) -> f64 {
        // Most extreme table: every supporting transaction is positive
        let extreme = min_support.min(self.n1);
        self.point_probability(extreme, min_support).min(1.0)
    }

    fn support_cap(&self) -> Option<usize> {
        Some(self.n1)
    }

    fn evaluate(&self, transactions: &[Transaction], supporting: &[usize]) -> TestOutcome {
        let support = supporting.len();
        let observed = supporting
            .iter()
            .filter(|&&t| transactions[t].value == 1.0)
            .count();

        // Upper tail: tables at least as enriched as observed
        let mut p = 0.0;
        for positives in observed..=support.min(self.n1) {
            p += self.point_probability(positives, support);
        }

        TestOutcome {
            p_value: p.min(1.0),
            statistic: observed as f64,
        }
    }
}
