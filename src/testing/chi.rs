//! Chi-square test over the induced 2x2 contingency table
//!
//! Pearson statistic with one degree of freedom; the one-sided p halves the
//! upper-tail probability when the observed count sits above expectation.
//! The survival function of a 1-df chi-squared variable is
//! erfc(sqrt(x / 2)), so no distribution object is needed.

use super::{binary_positive_count, ConfigError, TestFamily, TestOutcome};
use crate::transaction::Transaction;
use statrs::function::erf::erfc;

/// Chi-square strategy; requires strictly 0/1 outcomes
#[derive(Debug)]
pub struct ChiSquare {
    n: usize,
    n1: usize,
}

impl ChiSquare {
    pub fn new(transactions: &[Transaction]) -> Result<Self, ConfigError> {
        let n1 = binary_positive_count(transactions)?;
        Ok(Self {
            n: transactions.len(),
            n1,
        })
    }

    /// Pearson chi-square of the table with `observed` positives among
    /// `support` covering transactions; 0.0 when a margin is empty
    fn statistic(&self, observed: usize, support: usize) -> f64 {
        let a = observed as f64;
        let b = (support - observed) as f64;
        let c = (self.n1 - observed) as f64;
        let d = (self.n + observed - support - self.n1) as f64;
        let n = self.n as f64;

        let denom = (a + b) * (c + d) * (a + c) * (b + d);
        if denom == 0.0 {
            return 0.0;
        }
        n * (a * d - b * c).powi(2) / denom
    }

    /// One-sided p from the statistic and the enrichment direction
    fn one_sided_p(&self, statistic: f64, observed: usize, support: usize) -> f64 {
        let two_sided = erfc((statistic / 2.0).sqrt());
        let expected = support as f64 * self.n1 as f64 / self.n as f64;
        if observed as f64 >= expected {
            two_sided / 2.0
        } else {
            1.0 - two_sided / 2.0
        }
    }
}

impl TestFamily for ChiSquare {
    fn name(&self) -> &'static str {
        "chi"
    }

    fn min_attainable_p(&self, min_support: usize) -> f64 {
        if min_support == 0 || min_support > self.n {
            return 1.0;
        }
        // Most extreme table: every supporting transaction is positive
        let extreme = min_support.min(self.n1);
        let statistic = self.statistic(extreme, min_support);
        self.one_sided_p(statistic, extreme, min_support)
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
        let statistic = self.statistic(observed, support);

        TestOutcome {
            p_value: self.one_sided_p(statistic, observed, support),
            statistic,
        }
    }
}
