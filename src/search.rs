//! Parallel Top-K Search (C5).
//!
//! This module's sharding idiom is learned from the rayon-based parallel
//! scoring used by `nova-fuzzy`/`frizbee`-style fuzzy matchers.
//! Each shard scores its slice of the corpus independently and keeps only
//! its own bounded min-heap; no cross-shard communication happens until the
//! final merge, which is also where determinism is established via the
//! `(score, index)` composite key.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::alphabet::Cid;
use crate::config::ScoringConfig;
use crate::corpus::Corpus;
use crate::cost::CostMatrix;
use crate::distance::weighted_damerau_levenshtein;

/// One scored corpus word, ordered by `(score, index)` ascending -- the
/// ordering that makes search results deterministic and gives ties a stable
/// tie-break.
#[derive(Debug, Clone, Copy)]
pub struct Scored {
    pub score: f64,
    pub index: usize,
}

impl PartialEq for Scored {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score && self.index == other.index
    }
}
impl Eq for Scored {}

impl PartialOrd for Scored {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scored {
    fn cmp(&self, other: &Self) -> Ordering {
        // NaN cannot occur: every cost is a sum of non-negative, finite
        // configured weights and matrix entries.
        self.score
            .partial_cmp(&other.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.index.cmp(&other.index))
    }
}

/// Returns the `k` corpus words with the smallest `D(query, word)`, sorted
/// ascending by `(score, index)`. Empty corpus is a precondition violation
/// the caller (`Engine`) must have already ruled out.
pub fn top_k(
    query: &[Cid],
    corpus: &Corpus,
    matrix: &CostMatrix,
    config: &ScoringConfig,
    k: usize,
) -> Vec<Scored> {
    let shard_count = rayon::current_num_threads().max(1);
    let len = corpus.len();
    let shard_size = (len + shard_count - 1) / shard_count.max(1);

    let shard_results: Vec<BinaryHeap<Scored>> = if shard_size == 0 {
        Vec::new()
    } else {
        (0..shard_count)
            .into_par_iter()
            .map(|shard| {
                let start = shard * shard_size;
                let end = (start + shard_size).min(len);
                let mut heap: BinaryHeap<Scored> = BinaryHeap::with_capacity(k + 1);

                for index in start..end {
                    let word = corpus.get(index);
                    let score = weighted_damerau_levenshtein(query, word, matrix, config);

                    // Bounded max-heap of size k keyed by (score, index): we
                    // push everything under capacity, and once full only
                    // replace the current worst (largest) entry when a
                    // strictly better one shows up. Correctness does not
                    // depend on this -- it's a pruning optimization.
                    if heap.len() < k {
                        heap.push(Scored { score, index });
                    } else if let Some(worst) = heap.peek() {
                        if Scored { score, index } < *worst {
                            heap.pop();
                            heap.push(Scored { score, index });
                        }
                    }
                }

                trace!(shard, scored = end.saturating_sub(start), "shard done");
                heap
            })
            .collect()
    };

    let mut merged: Vec<Scored> = shard_results.into_iter().flatten().collect();
    merged.sort();
    merged.truncate(k);

    debug!(query_len = query.len(), corpus_len = len, k, "top_k complete");

    merged
}

/// `best(query)`: the single nearest corpus word. Never fails on a
/// non-empty corpus.
pub fn best(query: &[Cid], corpus: &Corpus, matrix: &CostMatrix, config: &ScoringConfig) -> Scored {
    top_k(query, corpus, matrix, config, 1)
        .into_iter()
        .next()
        .expect("corpus must be non-empty (checked at Engine construction)")
}
