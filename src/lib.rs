//! Cribar - Combinatorial multiple-testing correction
//!
//! Given a binary item/transaction matrix and a per-transaction outcome,
//! Cribar finds item combinations associated with the outcome while
//! controlling the family-wise error rate. The correction factor is not the
//! full combinatorial family: a Tarone-type adaptive search locates the
//! smallest minimum-support threshold whose pattern count is provably
//! consistent with the test family's minimum-attainable-p bound, and only
//! those patterns divide alpha.

pub mod analysis;
pub mod cli;
pub mod correction;
pub mod ingest;
pub mod mining;
pub mod report;
pub mod testing;
pub mod transaction;
