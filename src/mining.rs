//! Pattern index: closed-itemset enumeration plus the bound cache
//!
//! Wraps an in-process closed-itemset enumerator (prefix-preserving closure
//! extension). For a chosen minimum-support threshold the index materializes
//! the total pattern count and the patterns themselves with their
//! supporting-transaction ids. Because enumeration runs in-process over the
//! transaction slice, the supporting ids ARE transaction-model ids; no
//! backend-local id remapping is needed.
//!
//! The index also owns two per-run caches: per-threshold pattern counts
//! (enumeration is deterministic, so re-running at a seen threshold is
//! wasted work) and the per-support minimum-attainable-p bound values
//! populated by the correction-factor search.

use crate::transaction::Transaction;
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised by pattern enumeration
#[derive(Error, Debug)]
pub enum MiningError {
    #[error("minimum support must be at least 1")]
    ZeroSupportThreshold,

    #[error("maximum itemset size must be at least 1")]
    ZeroSizeCap,

    #[error("no enumeration has run at minimum support {min_support}")]
    NotEnumerated { min_support: usize },
}

pub type Result<T> = std::result::Result<T, MiningError>;

/// A closed itemset with its supporting transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    /// Item ids in this itemset (sorted ascending)
    pub items: Vec<usize>,
    /// Ids of the transactions containing every item (sorted ascending)
    pub transactions: Vec<usize>,
}

impl Pattern {
    /// Number of transactions containing this itemset
    pub fn support(&self) -> usize {
        self.transactions.len()
    }
}

/// Closed-itemset index over one transaction set
#[derive(Debug)]
pub struct PatternIndex {
    /// Per-item supporting-transaction lists (item id → sorted tids)
    tidsets: Vec<Vec<usize>>,
    n_transactions: usize,
    /// Most recent enumeration result, ordered by decreasing support
    patterns: Vec<Pattern>,
    /// Threshold and size cap of the most recent enumeration
    current: Option<(usize, Option<usize>)>,
    /// Per-threshold pattern counts seen this run
    totals: HashMap<usize, usize>,
    /// Per-support minimum-attainable-p cache (absent = not yet computed)
    bounds: HashMap<usize, f64>,
}

impl PatternIndex {
    /// Build the index for one transaction set
    pub fn new(transactions: &[Transaction]) -> Self {
        let n_items = transactions
            .iter()
            .flat_map(|t| t.items.iter().copied())
            .max()
            .map_or(0, |m| m + 1);
        let mut tidsets = vec![Vec::new(); n_items];
        for t in transactions {
            for &item in &t.items {
                tidsets[item].push(t.id);
            }
        }
        Self {
            tidsets,
            n_transactions: transactions.len(),
            patterns: Vec::new(),
            current: None,
            totals: HashMap::new(),
            bounds: HashMap::new(),
        }
    }

    /// Enumerate closed itemsets with support >= `min_support`
    ///
    /// `max_size` caps itemset cardinality; closures larger than the cap are
    /// skipped outright (a truncated closure would duplicate the support
    /// list of a smaller closed set). Re-invoking at the threshold of the
    /// most recent run is a no-op.
    pub fn enumerate(&mut self, min_support: usize, max_size: Option<usize>) -> Result<()> {
        if min_support == 0 {
            return Err(MiningError::ZeroSupportThreshold);
        }
        if max_size == Some(0) {
            return Err(MiningError::ZeroSizeCap);
        }
        if self.current == Some((min_support, max_size)) {
            return Ok(());
        }

        let mut found = Vec::new();
        let all_tids: Vec<usize> = (0..self.n_transactions).collect();
        if self.n_transactions >= min_support {
            // Closure of the empty set: items present in every transaction
            let root: Vec<usize> = (0..self.tidsets.len())
                .filter(|&i| self.tidsets[i].len() == self.n_transactions)
                .collect();
            let fits = max_size.map_or(true, |cap| root.len() <= cap);
            if !root.is_empty() && fits {
                found.push(Pattern {
                    items: root.clone(),
                    transactions: all_tids.clone(),
                });
            }
            if fits {
                self.expand(&root, &all_tids, 0, min_support, max_size, &mut found);
            }
        }

        found.sort_by(|a, b| {
            b.support()
                .cmp(&a.support())
                .then_with(|| a.items.cmp(&b.items))
        });
        self.totals.insert(min_support, found.len());
        self.patterns = found;
        self.current = Some((min_support, max_size));
        Ok(())
    }

    /// Depth-first prefix-preserving closure extension
    fn expand(
        &self,
        closure: &[usize],
        tids: &[usize],
        start: usize,
        min_support: usize,
        max_size: Option<usize>,
        out: &mut Vec<Pattern>,
    ) {
        if max_size == Some(closure.len()) {
            return;
        }
        for cand in start..self.tidsets.len() {
            if closure.binary_search(&cand).is_ok() {
                continue;
            }
            let new_tids = intersect(tids, &self.tidsets[cand]);
            if new_tids.len() < min_support {
                continue;
            }
            let new_closure: Vec<usize> = (0..self.tidsets.len())
                .filter(|&j| self.covers(j, &new_tids))
                .collect();
            // Prefix check: a closure gaining an item below the generator
            // was already produced from that smaller item
            if new_closure
                .iter()
                .any(|&j| j < cand && closure.binary_search(&j).is_err())
            {
                continue;
            }
            if max_size.is_some_and(|cap| new_closure.len() > cap) {
                continue;
            }
            out.push(Pattern {
                items: new_closure.clone(),
                transactions: new_tids.clone(),
            });
            self.expand(&new_closure, &new_tids, cand + 1, min_support, max_size, out);
        }
    }

    /// Whether item `j`'s tidset contains every id in `tids`
    fn covers(&self, j: usize, tids: &[usize]) -> bool {
        let tidset = &self.tidsets[j];
        tids.len() <= tidset.len() && tids.iter().all(|t| tidset.binary_search(t).is_ok())
    }

    /// Pattern count from the enumeration at exactly this threshold
    pub fn total_count(&self, min_support: usize) -> Result<usize> {
        self.totals
            .get(&min_support)
            .copied()
            .ok_or(MiningError::NotEnumerated { min_support })
    }

    /// Patterns from the most recent enumeration, decreasing support order
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Cached minimum-attainable-p for this support, if computed
    pub fn bound(&self, support: usize) -> Option<f64> {
        self.bounds.get(&support).copied()
    }

    /// Record a computed minimum-attainable-p for this support
    pub fn set_bound(&mut self, support: usize, p: f64) {
        self.bounds.insert(support, p);
    }
}

/// Intersection of two sorted id lists
fn intersect(a: &[usize], b: &[usize]) -> Vec<usize> {
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out
}
