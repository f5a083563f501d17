//! Frozen configuration records.
//!
//! Nothing here reads from disk or the environment: the core consumes no
//! environment variables or runtime flags. Configuration is just ordinary
//! constructor arguments, grouped into small structs so `Engine::new` takes
//! one value instead of a long parameter list.

/// A keyboard laid out as staggered rows, e.g. the reference QWERTY grid:
///
/// ```text
/// row 0 (staggered 0.0): q w e r t y u i o p
/// row 1 (staggered 0.5): a s d f g h j k l
/// row 2 (staggered 1.0): z x c v b n m
/// ```
#[derive(Debug, Clone)]
pub struct KeyboardLayout {
    rows: Vec<Vec<char>>,
}

impl KeyboardLayout {
    pub fn new(rows: Vec<Vec<char>>) -> KeyboardLayout {
        KeyboardLayout { rows }
    }

    /// The reference QWERTY layout.
    pub fn qwerty() -> KeyboardLayout {
        KeyboardLayout::new(vec![
            "qwertyuiop".chars().collect(),
            "asdfghjkl".chars().collect(),
            "zxcvbnm".chars().collect(),
        ])
    }

    /// `(row, col + 0.5*row)` position of every laid-out character, in the
    /// row-then-column order the rows were given in. This iteration order is
    /// also the order `Alphabet::build` uses to assign low, dense cids.
    pub fn positions(&self) -> Vec<(char, f64, f64)> {
        let mut out = Vec::new();
        for (row_idx, row) in self.rows.iter().enumerate() {
            let row_f = row_idx as f64;
            for (col_idx, &c) in row.iter().enumerate() {
                let col = col_idx as f64 + 0.5 * row_f;
                out.push((c, row_f, col));
            }
        }
        out
    }

    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.rows.iter().flatten().copied()
    }
}

/// One scoring profile: the weights the weighted Damerau-Levenshtein
/// recurrence uses for a single `D(query, word)` evaluation.
#[derive(Debug, Clone, Copy)]
pub struct ScoringConfig {
    /// Cost of inserting a character into the query at a column `<= |query|`.
    pub ins: f64,
    /// Cost of inserting a character past the end of the query (the
    /// "append" rule); kept as a distinct field from `ins` rather than
    /// collapsed into one insertion cost, so prefix-extension behavior can
    /// be tuned independently of mid-word insertion behavior.
    pub app: f64,
    /// Cost of deleting a character from the query.
    pub del: f64,
    /// Cost of an adjacent transposition.
    pub trn: f64,
    /// Scalar substitution cost used when `use_matrix` is false.
    pub rep: f64,
    /// When true, substitution cost is looked up in the cost matrix;
    /// when false, it is `rep` for any mismatch and `0` for a match.
    pub use_matrix: bool,
}

impl ScoringConfig {
    /// The canonical "search" profile: appends cost the same as any other
    /// insertion.
    pub fn search() -> ScoringConfig {
        ScoringConfig {
            ins: 3.0,
            app: 3.0,
            del: 3.0,
            trn: 2.0,
            rep: 10.0,
            use_matrix: true,
        }
    }

    /// The "suggestions" profile: appends are nearly free so that longer
    /// dictionary words extending the query's prefix are strongly preferred.
    pub fn suggestions() -> ScoringConfig {
        ScoringConfig {
            app: 0.1,
            ..ScoringConfig::search()
        }
    }
}

/// Bundles everything `Engine::new` needs besides the corpus source.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub layout: KeyboardLayout,
    /// Penalty added when two characters being compared differ only in
    /// case.
    pub case_penalty: f64,
    /// Distance assigned between any character not on the layout and any
    /// other character.
    pub non_layout_distance: f64,
    /// Default substitution cost for any pair not explicitly set.
    pub fallback_cost: f64,
    pub search: ScoringConfig,
    pub suggestions: ScoringConfig,
}

impl Default for EngineConfig {
    fn default() -> EngineConfig {
        EngineConfig {
            layout: KeyboardLayout::qwerty(),
            case_penalty: 0.1,
            non_layout_distance: 100.0,
            fallback_cost: 10.0,
            search: ScoringConfig::search(),
            suggestions: ScoringConfig::suggestions(),
        }
    }
}
