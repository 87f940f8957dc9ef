//! Test-family strategies: Fisher exact, chi-square, Mann-Whitney U
//!
//! Each family exposes the same three capabilities behind one trait:
//! the monotone minimum-attainable-p bound used by the correction-factor
//! search, the normalizing total that caps the search range for the
//! binary-outcome tests, and the exact p-value/statistic calculator used
//! during significance evaluation.
//!
//! The set of families is closed: exactly three concrete types, selected by
//! name at configuration time. An unrecognized name is a `ConfigError`
//! raised before any computation begins.

mod chi;
mod fisher;

pub use chi::ChiSquare;
pub use fisher::FisherExact;
pub use u_test::MannWhitney;

use crate::transaction::Transaction;
use clap::ValueEnum;
use statrs::function::gamma::ln_gamma;
use std::str::FromStr;
use thiserror::Error;

/// Configuration-time errors: bad family name or outcomes the family
/// cannot accept
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unknown test family '{0}': choose 'fisher', 'chi' or 'u-test'")]
    UnknownTestFamily(String),

    #[error("transaction {transaction} has outcome {value}; this test family requires 0/1 outcomes")]
    NonBinaryOutcome { transaction: usize, value: f64 },
}

/// Exact test result for one pattern
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestOutcome {
    /// One-sided p-value
    pub p_value: f64,
    /// Reported statistic (positive count, chi-square value, or z score)
    pub statistic: f64,
}

/// Capability interface shared by the three test families
pub trait TestFamily {
    /// Display name of this family
    fn name(&self) -> &'static str;

    /// Minimum p-value ANY itemset of exactly this support could attain
    ///
    /// Pure function of the transaction set and the support value, and
    /// monotone non-increasing in the support. The correction-factor search
    /// aborts the run if an implementation violates the monotonicity
    /// contract.
    fn min_attainable_p(&self, min_support: usize) -> f64;

    /// Support cap implied by the outcome distribution
    ///
    /// `Some(n1)` for the binary-outcome families (no itemset can be more
    /// extreme than one covering every positive transaction); `None` for
    /// the rank test.
    fn support_cap(&self) -> Option<usize>;

    /// Exact p-value and statistic for the itemset supported by the given
    /// transaction ids
    fn evaluate(&self, transactions: &[Transaction], supporting: &[usize]) -> TestOutcome;
}

/// Test-family selection, by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TestMethod {
    /// Fisher's exact test (binary outcomes)
    #[value(name = "fisher")]
    Fisher,
    /// Chi-square test (binary outcomes)
    #[value(name = "chi")]
    Chi,
    /// Mann-Whitney U test (real-valued outcomes)
    #[value(name = "u-test")]
    UTest,
}

impl TestMethod {
    /// Construct the strategy for this transaction set
    pub fn build(self, transactions: &[Transaction]) -> Result<Box<dyn TestFamily>, ConfigError> {
        match self {
            TestMethod::Fisher => Ok(Box::new(FisherExact::new(transactions)?)),
            TestMethod::Chi => Ok(Box::new(ChiSquare::new(transactions)?)),
            TestMethod::UTest => Ok(Box::new(MannWhitney::new(transactions))),
        }
    }
}

impl FromStr for TestMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fisher" => Ok(TestMethod::Fisher),
            "chi" => Ok(TestMethod::Chi),
            "u-test" | "u_test" => Ok(TestMethod::UTest),
            other => Err(ConfigError::UnknownTestFamily(other.to_string())),
        }
    }
}

/// Log binomial coefficient ln C(n, k)
pub(crate) fn ln_choose(n: usize, k: usize) -> f64 {
    if k > n {
        return f64::NEG_INFINITY;
    }
    ln_gamma(n as f64 + 1.0) - ln_gamma(k as f64 + 1.0) - ln_gamma((n - k) as f64 + 1.0)
}

/// Validate 0/1 outcomes and return the positive count
pub(crate) fn binary_positive_count(transactions: &[Transaction]) -> Result<usize, ConfigError> {
    let mut positives = 0;
    for t in transactions {
        if t.value == 1.0 {
            positives += 1;
        } else if t.value != 0.0 {
            return Err(ConfigError::NonBinaryOutcome {
                transaction: t.id,
                value: t.value,
            });
        }
    }
    Ok(positives)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn value_fixture(values: &[f64]) -> Vec<Transaction> {
        values
            .iter()
            .enumerate()
            .map(|(id, &v)| Transaction::new(id, vec![], v))
            .collect()
    }

    #[test]
    fn test_parse_known_names() {
        assert_eq!("fisher".parse::<TestMethod>().unwrap(), TestMethod::Fisher);
        assert_eq!("chi".parse::<TestMethod>().unwrap(), TestMethod::Chi);
        assert_eq!("u-test".parse::<TestMethod>().unwrap(), TestMethod::UTest);
        assert_eq!("u_test".parse::<TestMethod>().unwrap(), TestMethod::UTest);
    }

    #[test]
    fn test_parse_unknown_name() {
        assert!(matches!(
            "bonferroni".parse::<TestMethod>(),
            Err(ConfigError::UnknownTestFamily(_))
        ));
    }

    #[test]
    fn test_build_rejects_non_binary_for_fisher() {
        let transactions = value_fixture(&[1.0, 0.5, 0.0]);
        assert!(matches!(
            TestMethod::Fisher.build(&transactions),
            Err(ConfigError::NonBinaryOutcome { transaction: 1, .. })
        ));
    }

    #[test]
    fn test_build_accepts_real_values_for_u_test() {
        let transactions = value_fixture(&[1.5, -0.5, 0.0]);
        assert!(TestMethod::UTest.build(&transactions).is_ok());
    }

    #[test]
    fn test_ln_choose_small_values() {
        assert!((ln_choose(5, 2).exp() - 10.0).abs() < 1e-9);
        assert!((ln_choose(8, 4).exp() - 70.0).abs() < 1e-9);
        assert_eq!(ln_choose(3, 5), f64::NEG_INFINITY);
    }

    proptest! {
        /// The minimum-attainable-p bound is non-increasing over the capped
        /// search range for the binary-outcome families
        #[test]
        fn prop_binary_bounds_monotone(values in proptest::collection::vec(0..=1u8, 4..24)) {
            let transactions = value_fixture(
                &values.iter().map(|&v| v as f64).collect::<Vec<_>>(),
            );
            for method in [TestMethod::Fisher, TestMethod::Chi] {
                let family = method.build(&transactions).unwrap();
                let cap = family.support_cap().unwrap_or(transactions.len());
                let mut prev = f64::INFINITY;
                for s in 1..=cap {
                    let b = family.min_attainable_p(s);
                    prop_assert!(b <= prev + 1e-12, "{}: f({}) = {} rose above {}", family.name(), s, b, prev);
                    prop_assert!((0.0..=1.0).contains(&b));
                    prev = b;
                }
            }
        }

        /// The rank-test bound is non-increasing up to the balanced point
        #[test]
        fn prop_u_test_bound_monotone_below_half(values in proptest::collection::vec(-10.0..10.0f64, 4..24)) {
            let transactions = value_fixture(&values);
            let family = MannWhitney::new(&transactions);
            let mut prev = f64::INFINITY;
            for s in 1..=transactions.len() / 2 {
                let b = family.min_attainable_p(s);
                prop_assert!(b <= prev + 1e-12);
                prev = b;
            }
        }
    }
}
