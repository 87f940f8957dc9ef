//! Full analysis pipeline: strategy construction, threshold search,
//! significance evaluation, report assembly
//!
//! This is the library-level entry point the CLI drives; integration tests
//! call it directly with in-memory transactions.

use crate::correction::{evaluate_significance, find_correction_factor};
use crate::mining::PatternIndex;
use crate::report::{RunReport, SignificantRow, Timing};
use crate::testing::TestMethod;
use crate::transaction::Transaction;
use anyhow::Result;
use std::time::Instant;

/// Configuration surface consumed by one run
#[derive(Debug, Clone, Copy)]
pub struct AnalysisConfig {
    /// Significance level, in (0, 1]
    pub alpha: f64,
    /// Test family
    pub method: TestMethod,
    /// Optional cap on combination cardinality
    pub max_comb: Option<usize>,
}

/// Run the complete correction procedure over one transaction set
pub fn run(
    transactions: &[Transaction],
    item_names: &[String],
    config: &AnalysisConfig,
) -> Result<RunReport> {
    if !(config.alpha > 0.0 && config.alpha <= 1.0) {
        anyhow::bail!(
            "significance level must be in (0, 1], got {}",
            config.alpha
        );
    }

    let strategy = config.method.build(transactions)?;
    let mut index = PatternIndex::new(transactions);

    let search_start = Instant::now();
    let search = find_correction_factor(
        transactions,
        strategy.as_ref(),
        &mut index,
        config.alpha,
        config.max_comb,
    )?;
    let correction_seconds = search_start.elapsed().as_secs_f64();
    tracing::info!(
        lambda_star = search.lambda_star,
        correction_factor = search.correction_factor,
        "threshold search finished"
    );

    let evaluation_start = Instant::now();
    let evaluation = evaluate_significance(
        transactions,
        &index,
        strategy.as_ref(),
        &search,
        config.alpha,
    )?;
    let evaluation_seconds = evaluation_start.elapsed().as_secs_f64();

    let significant = evaluation
        .significant
        .iter()
        .map(|hit| SignificantRow {
            raw_p: hit.raw_p,
            adjusted_p: hit.adjusted_p,
            combination: hit
                .items
                .iter()
                .map(|&id| {
                    item_names
                        .get(id)
                        .cloned()
                        .unwrap_or_else(|| format!("item{id}"))
                })
                .collect(),
            support: hit.support,
            statistic: hit.statistic,
        })
        .collect();

    Ok(RunReport {
        method: strategy.name().to_string(),
        alpha: config.alpha,
        lambda_star: search.lambda_star,
        correction_factor: search.correction_factor,
        max_lambda: search.max_lambda,
        adjusted_alpha: evaluation.adjusted_alpha,
        pattern_total: evaluation.pattern_total,
        significant,
        timing: Timing {
            correction_seconds,
            evaluation_seconds,
            total_seconds: correction_seconds + evaluation_seconds,
        },
    })
}
