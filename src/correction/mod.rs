// Tarone-type adaptive multiple-testing correction
//
// The search half finds the smallest minimum-support threshold whose
// pattern count is provably consistent with the test family's
// minimum-attainable-p bound; the evaluation half runs the exact tests at
// that threshold with alpha divided by the resulting count. Together they
// control the FWER without enumerating the full combinatorial family of
// itemsets.

mod search;
mod significance;

pub use search::{find_correction_factor, SearchError, SearchOutcome};
pub use significance::{evaluate_significance, Evaluation, SignificantPattern};
