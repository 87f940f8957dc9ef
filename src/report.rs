//! Run report: text table and JSON rendering
//!
//! The text format keeps the layout of the classic tool output: a results
//! header, the optional no-pattern warning, the adjusted threshold and
//! correction factor, then one tab-separated row per significant
//! combination, and a final timing line. JSON carries the same fields for
//! machine consumption.

use serde::Serialize;

/// One significant combination, names resolved
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignificantRow {
    pub raw_p: f64,
    pub adjusted_p: f64,
    /// Item display names of the combination
    pub combination: Vec<String>,
    pub support: usize,
    pub statistic: f64,
}

/// Phase durations in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Timing {
    pub correction_seconds: f64,
    pub evaluation_seconds: f64,
    pub total_seconds: f64,
}

/// Everything a finished run reports
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    /// Test family used
    pub method: String,
    /// Requested significance level
    pub alpha: f64,
    /// Chosen minimum-support threshold
    pub lambda_star: usize,
    /// Number of tested combinations; the alpha divisor
    pub correction_factor: usize,
    /// Upper end of the searched threshold range
    pub max_lambda: usize,
    /// Per-test threshold alpha / k
    pub adjusted_alpha: f64,
    /// Combination count at the chosen threshold (warning when zero)
    pub pattern_total: usize,
    /// Accepted combinations, ascending by raw p-value
    pub significant: Vec<SignificantRow>,
    pub timing: Timing,
}

impl RunReport {
    /// Render the classic text table
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str("--- results ---\n");
        if self.pattern_total < 1 {
            out.push_str(&format!(
                "Warning: no combination satisfies support >= {}.\n",
                self.lambda_star
            ));
        }
        out.push_str(&format!(
            "Threshold: {}, Correction factor: {} (# of combinations with support >= {})\n",
            self.adjusted_alpha, self.correction_factor, self.lambda_star
        ));
        out.push_str(&format!("# of significant: {}\n", self.significant.len()));
        if !self.significant.is_empty() {
            out.push_str("Raw p-value\tAdjusted p-value\tCombination\tSupport\tStatistic\n");
            for row in &self.significant {
                out.push_str(&format!(
                    "{}\t{}\t{}\t{}\t{}\n",
                    row.raw_p,
                    row.adjusted_p,
                    row.combination.join(","),
                    row.support,
                    row.statistic
                ));
            }
        }
        out.push_str(&format!(
            "Time (sec.): Correction factor {:.3}, P-value {:.3}, Total {:.3}\n",
            self.timing.correction_seconds,
            self.timing.evaluation_seconds,
            self.timing.total_seconds
        ));
        out
    }

    /// Render as pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
