//! Corpus (C3): the immutable, deduplicated, encoded word list the engine
//! searches.
//!
//! Grounded on `wiktionary_latin.py::read_parsed_latin_words` /
//! `get_random_word` for the read-dedup-sample shape, and on the
//! builder-then-freeze pattern of `phrase::PhraseSetBuilder` for structuring
//! construction as an explicit step separate from use.

use std::io::{self, BufRead};

use itertools::Itertools;
use rand::Rng;

use crate::alphabet::{normalize, Alphabet, Cid};

/// An immutable, ordered array of encoded dictionary words. Ordering defines
/// each word's canonical index, which is the tie-break for ranking.
#[derive(Debug)]
pub struct Corpus {
    words: Vec<Vec<Cid>>,
    // kept for `random_word` and decoding convenience without re-decoding
    // through the alphabet on every lookup.
    text: Vec<String>,
}

impl Corpus {
    /// Reads one normalized, deduplicated headword per line from `reader`,
    /// in file order (first occurrence wins), and encodes each via
    /// `alphabet`. `alphabet` must already have been built over the same
    /// (normalized) word list -- see `Corpus::normalize_lines`.
    pub fn from_reader<R: BufRead>(reader: R, alphabet: &Alphabet) -> io::Result<Corpus> {
        let lines: io::Result<Vec<String>> = reader.lines().collect();
        Ok(Corpus::from_words(lines?, alphabet))
    }

    /// Builds directly from an in-memory word list (used by tests and by
    /// callers that already have headwords in memory rather than a file).
    /// Order-preserving dedup: the first occurrence of each normalized word
    /// wins its corpus index.
    pub fn from_words<I, S>(words: I, alphabet: &Alphabet) -> Corpus
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let text = Corpus::normalize_lines(words);
        let words = text.iter().map(|w| alphabet.encode(w)).collect();
        Corpus { words, text }
    }

    /// Normalizes and deduplicates raw headwords the same way `from_words`
    /// will, for callers that need to build an `Alphabet` over exactly the
    /// corpus characters before the `Corpus` itself can exist.
    pub fn normalize_lines<I, S>(words: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        words
            .into_iter()
            .map(|w| normalize(w.as_ref()))
            .filter(|w| !w.is_empty())
            .unique()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Random-access by canonical corpus index.
    pub fn get(&self, index: usize) -> &[Cid] {
        &self.words[index]
    }

    pub fn text(&self, index: usize) -> &str {
        &self.text[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &[Cid]> {
        self.words.iter().map(|w| w.as_slice())
    }

    /// Uniform random word, for the "lucky" fallback
    /// (`wiktionary_latin.py::get_random_word`). Panics if the corpus is
    /// empty; callers should have already rejected empty corpora at
    /// construction (an empty corpus is a construction-time failure).
    pub fn random_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        rng.gen_range(0..self.words.len())
    }
}
