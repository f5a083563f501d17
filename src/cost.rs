//! Cost Model Builder (C2).
//!
//! Turns a keyboard layout into a dense `A x A` substitution-cost matrix.
//! Re-architects `wiktionary_latin.py::key_key_cost`'s complex-number
//! distance trick as an explicit `(row, col)` Euclidean distance:
//! mathematically identical, easier to read.
//!
//! The resulting matrix is intentionally not a metric (the case penalty and
//! flat fallback can violate the triangle inequality) -- it is a calibrated
//! heuristic for typing errors, not a distance.

use crate::alphabet::{Alphabet, Cid};
use crate::config::{EngineConfig, KeyboardLayout};
use tracing::debug;

/// Dense, immutable `A x A` substitution-cost matrix.
#[derive(Debug, Clone)]
pub struct CostMatrix {
    size: usize,
    costs: Vec<f64>,
}

impl CostMatrix {
    fn new(size: usize) -> CostMatrix {
        CostMatrix {
            size,
            costs: vec![0.0; size * size],
        }
    }

    #[inline]
    fn index(&self, a: Cid, b: Cid) -> usize {
        a as usize * self.size + b as usize
    }

    #[inline]
    pub fn get(&self, a: Cid, b: Cid) -> f64 {
        self.costs[self.index(a, b)]
    }

    fn set(&mut self, a: Cid, b: Cid, cost: f64) {
        let idx = self.index(a, b);
        self.costs[idx] = cost;
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

fn euclidean(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dr = a.0 - b.0;
    let dc = a.1 - b.1;
    (dr * dr + dc * dc).sqrt()
}

/// Builds the substitution-cost matrix from a keyboard layout, given an
/// already-built `Alphabet` (so cids line up) and the engine's frozen
/// configuration.
pub fn build_cost_matrix(alphabet: &Alphabet, config: &EngineConfig) -> CostMatrix {
    build_cost_matrix_from_layout(
        alphabet,
        &config.layout,
        config.case_penalty,
        config.non_layout_distance,
        config.fallback_cost,
    )
}

fn build_cost_matrix_from_layout(
    alphabet: &Alphabet,
    layout: &KeyboardLayout,
    case_penalty: f64,
    non_layout_distance: f64,
    fallback_cost: f64,
) -> CostMatrix {
    let size = alphabet.len();
    let mut matrix = CostMatrix::new(size);

    // Default off-diagonal entries to `fallback_cost`, diagonal to 0. The
    // loop below always overwrites every off-diagonal cell (every pair gets
    // either a real inter-key distance or `non_layout_distance`), so
    // `fallback_cost` only actually survives on an alphabet of size <= 1.
    for a in 0..size as Cid {
        for b in 0..size as Cid {
            matrix.set(a, b, if a == b { 0.0 } else { fallback_cost });
        }
    }

    let positions = layout.positions();
    let mut explicit_pairs = 0usize;

    // Every unordered pair of laid-out characters gets a distance via their
    // Euclidean positions; any character not on the layout is modeled as
    // `non_layout_distance` away from everything. We enumerate over the full
    // alphabet here (not just the layout) so the "one side is off-layout"
    // case is written too, matching the original's `defaultdict` fallback.
    let layout_pos: std::collections::HashMap<char, (f64, f64)> = positions
        .iter()
        .map(|&(c, row, col)| (c, (row, col)))
        .collect();

    for a in 0..size as Cid {
        let ca = alphabet.cid_to_char(a);
        for b in 0..size as Cid {
            if a == b {
                continue;
            }
            let cb = alphabet.cid_to_char(b);

            // `layout_pos` is keyed by the lowercase layout characters only
            // (`KeyboardLayout` enumerates lowercase rows); fold both sides
            // to lowercase before the lookup so a pair like `{'Q', 'w'}`
            // finds the same position data as `{'q', 'w'}` rather than
            // falling through to `non_layout_distance`. The formula is the
            // same for every case combination of a given unordered pair --
            // only `case_cost` below depends on case.
            let dist = match (
                layout_pos.get(&ca.to_ascii_lowercase()),
                layout_pos.get(&cb.to_ascii_lowercase()),
            ) {
                (Some(&pa), Some(&pb)) => euclidean(pa, pb),
                _ => non_layout_distance,
            };

            let case_cost = if same_case_class(ca, cb) {
                0.0
            } else {
                case_penalty
            };

            matrix.set(a, b, dist + case_cost);
            explicit_pairs += 1;
        }
    }

    // Pure case-flip pairs always cost exactly `case_penalty`, overwriting
    // whatever the distance-based pass above wrote.
    for a in 0..size as Cid {
        let ca = alphabet.cid_to_char(a);
        let (lower, upper) = (ca.to_ascii_lowercase(), ca.to_ascii_uppercase());
        if lower == upper || ca != lower && ca != upper {
            continue;
        }
        let flipped = if ca == lower { upper } else { lower };
        if flipped == ca {
            continue;
        }
        let b = alphabet.char_to_cid(flipped);
        if alphabet.cid_to_char(b) != flipped {
            continue; // flipped char isn't in the alphabet
        }
        matrix.set(a, b, case_penalty);
        matrix.set(b, a, case_penalty);
    }

    debug!(
        alphabet_size = size,
        explicit_pairs, "built cost matrix"
    );

    matrix
}

/// True if `a` and `b` are the same character up to letter case (i.e. not a
/// pure case-flip pair and not different letters entirely -- used only to
/// decide the `case_penalty` add-on for the distance-based pass).
fn same_case_class(a: char, b: char) -> bool {
    a.is_uppercase() == b.is_uppercase()
}
