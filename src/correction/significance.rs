//! Significance evaluation: exact tests at the chosen threshold
//!
//! With lambda-star and its correction factor fixed, every pattern at or
//! above the threshold gets an exact test; patterns below alpha / k are the
//! FWER-controlled discoveries. An empty result is a legitimate statistical
//! outcome, reported as a warning rather than an error.

use crate::correction::search::SearchOutcome;
use crate::mining::{MiningError, PatternIndex};
use crate::testing::TestFamily;
use crate::transaction::Transaction;
use serde::Serialize;

/// One accepted pattern
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignificantPattern {
    /// Item ids of the tested combination
    pub items: Vec<usize>,
    /// Raw p-value
    pub raw_p: f64,
    /// Bonferroni-adjusted p-value (k * raw_p)
    pub adjusted_p: f64,
    /// Number of supporting transactions
    pub support: usize,
    /// Test statistic reported by the strategy
    pub statistic: f64,
}

/// Full evaluation result at lambda-star
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    /// Accepted patterns, ascending by raw p-value
    pub significant: Vec<SignificantPattern>,
    /// Number of patterns tested
    pub tested: usize,
    /// Pattern count at lambda-star; zero is the warning condition
    pub pattern_total: usize,
    /// The per-test threshold alpha / k
    pub adjusted_alpha: f64,
}

/// Test every pattern with support >= lambda-star and keep those below
/// alpha / k
///
/// The index must hold the enumeration at `search.lambda_star` (the search
/// leaves it in exactly that state).
pub fn evaluate_significance(
    transactions: &[Transaction],
    index: &PatternIndex,
    strategy: &dyn TestFamily,
    search: &SearchOutcome,
    alpha: f64,
) -> Result<Evaluation, MiningError> {
    let k = index.total_count(search.lambda_star)?;
    let adjusted_alpha = alpha / k.max(1) as f64;

    let mut significant = Vec::new();
    let mut tested = 0;
    for pattern in index.patterns() {
        // Only supports in [lambda_star, max_lambda] are tested; under a
        // capped range a pattern can exceed max_lambda, and those stay in
        // the divisor but never in the tested set
        if pattern.support() > search.max_lambda {
            continue;
        }
        tested += 1;
        let outcome = strategy.evaluate(transactions, &pattern.transactions);
        tracing::debug!(
            items = ?pattern.items,
            p = outcome.p_value,
            "tested pattern"
        );
        if outcome.p_value < adjusted_alpha {
            significant.push(SignificantPattern {
                items: pattern.items.clone(),
                raw_p: outcome.p_value,
                adjusted_p: outcome.p_value * k as f64,
                support: pattern.support(),
                statistic: outcome.statistic,
            });
        }
    }

    significant.sort_by(|a, b| a.raw_p.total_cmp(&b.raw_p));

    Ok(Evaluation {
        significant,
        tested,
        pattern_total: k,
        adjusted_alpha,
    })
}
