//! Engine Facade (C6).
//!
//! Owns the alphabet, cost matrix, corpus, and two frozen scoring
//! profiles; exposes the small public search/suggest/roman API. Grounded on
//! `wiktionary_latin.py`'s `Latin` class, which plays the identical role
//! (owns encoding tables, the scorer, the word list, and the roman-numeral
//! helper) but keyed by dynamic hash maps; here re-architected into
//! fixed-size arrays built once at construction.

use std::io::BufRead;
use std::time::Instant;

use rand::Rng;
use tracing::info;

use crate::alphabet::{Alphabet, Cid};
use crate::config::EngineConfig;
use crate::corpus::Corpus;
use crate::cost::{build_cost_matrix, CostMatrix};
use crate::error::{EngineError, Result};
use crate::search;

/// The fuzzy-match search engine: alphabet + cost matrix + corpus + the two
/// scoring profiles, frozen at construction.
pub struct Engine {
    alphabet: Alphabet,
    matrix: CostMatrix,
    corpus: Corpus,
    config: EngineConfig,
}

impl Engine {
    /// Builds the engine from a raw headword iterator (e.g. lines of
    /// `latin_words.txt`). Fails with `PreconditionFailed` on an empty
    /// corpus -- the engine refuses to start.
    pub fn new<I, S>(words: I, config: EngineConfig) -> Result<Engine>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let start = Instant::now();
        let normalized = Corpus::normalize_lines(words);
        if normalized.is_empty() {
            return Err(EngineError::PreconditionFailed(
                "corpus must contain at least one word".to_string(),
            ));
        }

        let layout_chars: Vec<char> = config.layout.chars().collect();
        let alphabet = Alphabet::build(
            layout_chars,
            &normalized.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
        );
        let matrix = build_cost_matrix(&alphabet, &config);
        let corpus = Corpus::from_words(normalized, &alphabet);

        info!(
            corpus_len = corpus.len(),
            alphabet_size = alphabet.len(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "engine constructed"
        );

        Ok(Engine {
            alphabet,
            matrix,
            corpus,
            config,
        })
    }

    /// Builds the engine by reading one headword per line from `reader`
    /// (the `latin_words.txt` on-disk format).
    pub fn from_reader<R: BufRead>(reader: R, config: EngineConfig) -> Result<Engine> {
        let lines: std::io::Result<Vec<String>> = reader.lines().collect();
        let lines = lines.map_err(|e| EngineError::PreconditionFailed(e.to_string()))?;
        Engine::new(lines, config)
    }

    fn encode(&self, text: &str) -> Vec<Cid> {
        self.alphabet.encode(text)
    }

    /// Nearest corpus word under the search profile. Never fails, because
    /// construction already guaranteed a non-empty corpus.
    pub fn best(&self, text: &str) -> String {
        let query = self.encode(text);
        let scored = search::best(&query, &self.corpus, &self.matrix, &self.config.search);
        self.corpus.text(scored.index).to_string()
    }

    /// Top `k` corpus words under the search profile, ascending by score.
    pub fn top_k(&self, text: &str, k: usize) -> Result<Vec<String>> {
        self.ranked(text, k, false)
    }

    /// Top `k` corpus words under the suggestions profile, ascending by
    /// score. The suggestions profile's near-zero append cost means longer
    /// words that extend the query's prefix dominate.
    pub fn suggest(&self, text: &str, k: usize) -> Result<Vec<String>> {
        self.ranked(text, k, true)
    }

    fn ranked(&self, text: &str, k: usize, suggestions: bool) -> Result<Vec<String>> {
        if k == 0 {
            return Err(EngineError::InvalidArgument(
                "k must be >= 1".to_string(),
            ));
        }
        let query = self.encode(text);
        let profile = if suggestions {
            &self.config.suggestions
        } else {
            &self.config.search
        };
        let results = search::top_k(&query, &self.corpus, &self.matrix, profile, k);
        Ok(results
            .into_iter()
            .map(|s| self.corpus.text(s.index).to_string())
            .collect())
    }

    /// A uniformly random corpus word.
    pub fn random_word(&self) -> String {
        let mut rng = rand::thread_rng();
        self.random_word_with(&mut rng)
    }

    /// Same as `random_word`, but takes an explicit `Rng` so tests (and any
    /// caller wanting reproducibility) can seed it.
    pub fn random_word_with<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let idx = self.corpus.random_index(rng);
        self.corpus.text(idx).to_string()
    }

    /// Converts `n` to a Roman numeral: `0 -> " "`, `n < 0` is
    /// `InvalidArgument`, `n >= 4000` degrades to the decimal representation
    /// of `n` rather than failing.
    pub fn roman(n: i64) -> Result<String> {
        if n < 0 {
            return Err(EngineError::InvalidArgument(
                "roman numerals must be nonnegative".to_string(),
            ));
        }
        if n == 0 {
            return Ok(" ".to_string());
        }
        if n >= 4000 {
            return Ok(n.to_string());
        }

        const VALUES: [(i64, &str); 13] = [
            (1000, "M"),
            (900, "CM"),
            (500, "D"),
            (400, "CD"),
            (100, "C"),
            (90, "XC"),
            (50, "L"),
            (40, "XL"),
            (10, "X"),
            (9, "IX"),
            (5, "V"),
            (4, "IV"),
            (1, "I"),
        ];

        let mut remaining = n;
        let mut result = String::new();
        for &(value, numeral) in VALUES.iter() {
            while remaining >= value {
                result.push_str(numeral);
                remaining -= value;
            }
            if remaining == 0 {
                break;
            }
        }
        Ok(result)
    }

    pub fn corpus_len(&self) -> usize {
        self.corpus.len()
    }

    pub fn alphabet_size(&self) -> usize {
        self.alphabet.len()
    }
}
