//! Correction-factor search: the adaptive minimum-support threshold
//!
//! Descends from the largest achievable support toward 1, at each candidate
//! threshold comparing the pattern count against the window implied by the
//! minimum-attainable-p bound at the threshold and one below it. The search
//! stops at the smallest threshold whose count is still consistent with the
//! bound, which makes the resulting count a sound Bonferroni divisor
//! without ever enumerating the full combinatorial family.

use crate::mining::{MiningError, PatternIndex};
use crate::testing::TestFamily;
use crate::transaction::{self, Transaction};
use thiserror::Error;

/// Fatal search failures
#[derive(Error, Debug)]
pub enum SearchError {
    #[error(
        "bound inversion: f({upper}) = {f_upper} exceeds f({lower}) = {f_lower}; \
         the minimum attainable p-value must not rise with support"
    )]
    BoundInversion {
        lower: usize,
        f_lower: f64,
        upper: usize,
        f_upper: f64,
    },

    #[error(transparent)]
    Mining(#[from] MiningError),
}

/// Result of the threshold search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// The minimum-support threshold at which testing begins
    pub lambda_star: usize,
    /// Number of patterns tested at `lambda_star`; the alpha divisor
    pub correction_factor: usize,
    /// Upper end of the searched range, after the strategy's support cap
    pub max_lambda: usize,
}

/// Find the smallest sound testing threshold and its correction factor
pub fn find_correction_factor(
    transactions: &[Transaction],
    strategy: &dyn TestFamily,
    index: &mut PatternIndex,
    alpha: f64,
    max_size: Option<usize>,
) -> Result<SearchOutcome, SearchError> {
    let mut max_lambda = transaction::max_item_support(transactions);
    if let Some(cap) = strategy.support_cap() {
        if cap < max_lambda {
            max_lambda = cap;
        }
    }
    tracing::debug!(max_lambda, "starting threshold search");

    let mut lambda_star = 1;
    let mut lam = max_lambda;
    while lam >= 1 {
        tracing::debug!(lambda = lam, "candidate threshold");
        if lam == 1 {
            // Everything with support >= 1 is testable; no bound window
            // exists below this point
            lambda_star = 1;
            index.enumerate(1, max_size)?;
            break;
        }

        index.enumerate(lam, max_size)?;
        let m_lambda = index.total_count(lam)?;
        let f_prev = cached_bound(index, strategy, lam - 1);
        let f_lam = cached_bound(index, strategy, lam);
        tracing::debug!(m_lambda, f_prev, f_lam, "bound window");

        if f_lam > f_prev {
            return Err(SearchError::BoundInversion {
                lower: lam - 1,
                f_lower: f_prev,
                upper: lam,
                f_upper: f_lam,
            });
        }

        let bottom = if f_prev == 0.0 {
            usize::MAX
        } else {
            floor_ratio(alpha, f_prev).saturating_add(1)
        };
        let top = if f_lam == 0.0 {
            usize::MAX
        } else {
            floor_ratio(alpha, f_lam)
        };

        if bottom <= m_lambda && m_lambda <= top {
            // Count consistent with both bounds: exact optimum
            lambda_star = lam;
            break;
        }
        if m_lambda > top {
            // Threshold is final, but the count overshoots the ceiling;
            // only the re-enumeration below is trusted for k
            lambda_star = lam;
            break;
        }
        lam -= 1;
    }

    // Authoritative correction factor at the chosen threshold
    index.enumerate(lambda_star, max_size)?;
    let correction_factor = index.total_count(lambda_star)?;
    tracing::debug!(lambda_star, correction_factor, "search finished");

    if lambda_star > max_lambda {
        // Only reachable when the optimum lands on the very first iteration
        // or the capped range is empty; never below 1
        lambda_star = max_lambda.max(1);
    }

    Ok(SearchOutcome {
        lambda_star,
        correction_factor,
        max_lambda,
    })
}

/// Bound at this support, computed once and cached on the index
fn cached_bound(index: &mut PatternIndex, strategy: &dyn TestFamily, support: usize) -> f64 {
    if let Some(bound) = index.bound(support) {
        return bound;
    }
    let bound = strategy.min_attainable_p(support);
    index.set_bound(support, bound);
    bound
}

/// floor(alpha / bound), saturating on overflow or non-finite ratios
fn floor_ratio(alpha: f64, bound: f64) -> usize {
    let ratio = alpha / bound;
    if !ratio.is_finite() || ratio >= usize::MAX as f64 {
        usize::MAX
    } else {
        ratio.floor() as usize
    }
}
