//! Scoring Kernel (C4): weighted Damerau-Levenshtein distance.
//!
//! Generalizes `fuzzy::util::multi_modified_damlev` -- same
//! flat `Vec<f64>` plus `idx(i, j)` closure technique, same restricted
//! (optimal-string-alignment) transposition guard -- from unweighted `u32`
//! edit counts to a weighted `f64` recurrence: a character-pair cost matrix
//! for substitution, and a distinct "append" cost for insertions past the
//! end of the query so prefix matches dominate.

use crate::alphabet::Cid;
use crate::config::ScoringConfig;
use crate::cost::CostMatrix;

/// `D(query, word)`, the weighted Damerau-Levenshtein distance. Uses a
/// rolling two-row buffer; the recurrence, not any particular buffer
/// strategy, is the reference behavior.
pub fn weighted_damerau_levenshtein(
    query: &[Cid],
    word: &[Cid],
    matrix: &CostMatrix,
    config: &ScoringConfig,
) -> f64 {
    let m = query.len();
    let n = word.len();

    if m == 0 && n == 0 {
        return 0.0;
    }

    // We need the previous two rows to evaluate the transposition term, so
    // keep three rolling rows of width n+1 rather than two.
    let width = n + 1;
    let mut prev2 = vec![0.0f64; width]; // d[i-2][..]
    let mut prev1 = vec![0.0f64; width]; // d[i-1][..]
    let mut curr = vec![0.0f64; width]; // d[i][..]

    // Row 0: d[0][j] = j * ins for j <= m, else accumulating `app` past m.
    // Every insertion whose destination column j exceeds m costs app
    // rather than ins -- j here is 1-indexed into the word.
    prev1[0] = 0.0;
    for j in 1..=n {
        let step_cost = if j > m { config.app } else { config.ins };
        prev1[j] = prev1[j - 1] + step_cost;
    }

    for i in 1..=m {
        curr[0] = i as f64 * config.del;

        for j in 1..=n {
            let qi = query[i - 1];
            let wj = word[j - 1];

            let sub_cost = if qi == wj {
                0.0
            } else if config.use_matrix {
                matrix.get(qi, wj)
            } else {
                config.rep
            };

            let ins_cost = if j > m { config.app } else { config.ins };

            let mut best = (prev1[j - 1] + sub_cost)
                .min(curr[j - 1] + ins_cost)
                .min(prev1[j] + config.del);

            if i >= 2 && j >= 2 && qi == word[j - 2] && query[i - 2] == wj {
                best = best.min(prev2[j - 2] + config.trn);
            }

            curr[j] = best;
        }

        std::mem::swap(&mut prev2, &mut prev1);
        std::mem::swap(&mut prev1, &mut curr);
    }

    prev1[n]
}
