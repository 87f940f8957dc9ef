//! Transaction model: the item/outcome matrix held in memory
//!
//! A transaction is one row of the input matrix: the set of items present
//! in that row plus its outcome value. The analysis operates over an ordered
//! `Vec<Transaction>`; order is preserved so that item ids stay consistent
//! with the column-name map produced at ingestion.

use std::collections::HashMap;

/// One row of the item matrix with its outcome value
///
/// `items` holds the ids of the columns flagged 1 for this row, sorted
/// ascending. `value` is 0/1 for the binary-outcome tests and real-valued
/// for the rank-based test.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Position of this transaction in the input order
    pub id: usize,
    /// Item ids present in this transaction (sorted ascending)
    pub items: Vec<usize>,
    /// Outcome value for this transaction
    pub value: f64,
}

impl Transaction {
    pub fn new(id: usize, mut items: Vec<usize>, value: f64) -> Self {
        items.sort_unstable();
        items.dedup();
        Self { id, items, value }
    }

    /// Whether this transaction contains the given item
    pub fn contains(&self, item: usize) -> bool {
        self.items.binary_search(&item).is_ok()
    }
}

/// Largest number of transactions containing any single item
///
/// This is the upper end of the minimum-support search range: no itemset can
/// have higher support than its most frequent member item.
pub fn max_item_support(transactions: &[Transaction]) -> usize {
    let mut sizes: HashMap<usize, usize> = HashMap::new();
    for t in transactions {
        for &item in &t.items {
            *sizes.entry(item).or_insert(0) += 1;
        }
    }
    sizes.values().copied().max().unwrap_or(0)
}

/// Sum of outcome values across all transactions
///
/// For binary outcomes this is the positive count, used by the
/// binary-outcome test families to cap the search range.
pub fn positive_total(transactions: &[Transaction]) -> f64 {
    transactions.iter().map(|t| t.value).sum()
}
