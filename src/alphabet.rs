//! Alphabet & Encoder (C1).
//!
//! Assigns every character a small integer id (`cid`) so the hot-path DP in
//! `distance.rs` never has to look at variable-width `char`s, only `u32`s.
//! Ids are dense and start from the characters in the keyboard layout so the
//! cost matrix stays small and packed around the keys that actually matter.

use rustc_hash::FxHashMap;

/// A small non-negative integer identifying one character.
pub type Cid = u32;

/// Fallback id for any character outside the known alphabet. Always valid:
/// `SPACE_CID < alphabet_size()`.
pub const SPACE_CID: Cid = 0;

const MACRON_PAIRS: &[(char, char)] = &[
    ('ā', 'a'),
    ('ē', 'e'),
    ('ī', 'i'),
    ('ō', 'o'),
    ('ū', 'u'),
    ('Ā', 'A'),
    ('Ē', 'E'),
    ('Ī', 'I'),
    ('Ō', 'O'),
    ('Ū', 'U'),
];

/// Applies the normalization `encode` performs (macron-stripping, then
/// whitespace trim) without requiring an already-built `Alphabet`. Exposed so
/// callers that need to scan characters *before* the alphabet exists (namely
/// `Corpus`, which must know a word's post-normalization characters to build
/// the alphabet in the first place) see the same characters `encode` will
/// eventually look up, instead of wasting cids on macron characters that
/// `encode` will never produce.
pub fn normalize(text: &str) -> String {
    text.trim().chars().map(strip_macron).collect()
}

fn strip_macron(c: char) -> char {
    MACRON_PAIRS
        .iter()
        .find(|&&(long, _)| long == c)
        .map(|&(_, short)| short)
        .unwrap_or(c)
}

/// Total, bidirectional mapping between characters and dense `cid`s.
///
/// Construction order is part of the contract: the space
/// character is reserved as id 0 first, then every character that appears on
/// either side of a cost-model pair gets the next ids in that builder's
/// iteration order, and finally any corpus character not yet seen is
/// appended. Once built, both directions are pure array/map lookups.
#[derive(Debug, Clone)]
pub struct Alphabet {
    encode: FxHashMap<char, Cid>,
    decode: Vec<char>,
}

impl Alphabet {
    /// Builds the alphabet from the cost-model's character order followed by
    /// the corpus's character order, deduplicating as it goes.
    pub fn build<'a, I>(layout_chars: I, corpus_words: &[&'a str]) -> Alphabet
    where
        I: IntoIterator<Item = char>,
    {
        let mut encode = FxHashMap::default();
        let mut decode = Vec::new();

        fn push(c: char, encode: &mut FxHashMap<char, Cid>, decode: &mut Vec<char>) {
            encode.entry(c).or_insert_with(|| {
                let id = decode.len() as Cid;
                decode.push(c);
                id
            });
        }

        // SPACE_CID must be 0 and must always be present.
        push(' ', &mut encode, &mut decode);

        for c in layout_chars {
            push(c, &mut encode, &mut decode);
        }

        for word in corpus_words {
            for c in word.chars() {
                push(c, &mut encode, &mut decode);
            }
        }

        debug_assert_eq!(encode[&' '], SPACE_CID);

        Alphabet { encode, decode }
    }

    /// Number of distinct cids in this alphabet.
    pub fn len(&self) -> usize {
        self.decode.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decode.is_empty()
    }

    /// `char -> cid`, falling back to `SPACE_CID` for unknown characters.
    pub fn char_to_cid(&self, c: char) -> Cid {
        *self.encode.get(&c).unwrap_or(&SPACE_CID)
    }

    /// `cid -> char`. Panics on an out-of-range id, which would indicate an
    /// internal bug (ids are only ever produced by this type).
    pub fn cid_to_char(&self, cid: Cid) -> char {
        self.decode[cid as usize]
    }

    /// Normalizes then encodes a query/word: strips leading/trailing
    /// whitespace, strips macrons, then maps each remaining character,
    /// unknown characters becoming `SPACE_CID`.
    pub fn encode(&self, text: &str) -> Vec<Cid> {
        text.trim()
            .chars()
            .map(strip_macron)
            .map(|c| self.char_to_cid(c))
            .collect()
    }

    /// Total inverse of `encode` (modulo the normalization that `encode`
    /// already performed): one character per cid, concatenated.
    pub fn decode(&self, cids: &[Cid]) -> String {
        cids.iter().map(|&cid| self.cid_to_char(cid)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qwerty_chars() -> Vec<char> {
        "qwertyuiopasdfghjklzxcvbnm".chars().collect()
    }

    #[test]
    fn space_is_always_id_zero() {
        let alphabet = Alphabet::build(qwerty_chars(), &["amor"]);
        assert_eq!(alphabet.char_to_cid(' '), SPACE_CID);
    }

    #[test]
    fn layout_chars_get_low_dense_ids() {
        let alphabet = Alphabet::build(qwerty_chars(), &["amor", "zzz"]);
        for c in qwerty_chars() {
            assert!((alphabet.char_to_cid(c) as usize) < 27);
        }
    }

    #[test]
    fn unknown_chars_fall_back_to_space() {
        let alphabet = Alphabet::build(qwerty_chars(), &["amor"]);
        let encoded = alphabet.encode("\u{3b1}\u{3b2}\u{3b3}"); // greek letters
        assert_eq!(encoded, vec![SPACE_CID, SPACE_CID, SPACE_CID]);
    }

    #[test]
    fn encode_strips_macrons_and_whitespace() {
        let alphabet = Alphabet::build(qwerty_chars(), &["amare"]);
        let encoded = alphabet.encode("  am\u{101}re  ");
        assert_eq!(alphabet.decode(&encoded), "amare");
    }

    #[test]
    fn round_trip_law() {
        let alphabet = Alphabet::build(qwerty_chars(), &["amor", "amare", "amicus"]);
        for s in ["amor", " amare ", "amicus"] {
            let encoded = alphabet.encode(s);
            assert_eq!(alphabet.decode(&encoded), s.trim());
        }
    }

    #[test]
    fn normalize_matches_what_encode_would_see() {
        let raw = "  am\u{101}re  ";
        let normalized = normalize(raw);
        let alphabet = Alphabet::build(qwerty_chars(), &[normalized.as_str()]);
        assert_eq!(alphabet.decode(&alphabet.encode(raw)), normalized);
    }

    #[test]
    fn is_case_sensitive() {
        let alphabet = Alphabet::build(qwerty_chars(), &["Amor", "amor"]);
        assert_ne!(alphabet.char_to_cid('A'), alphabet.char_to_cid('a'));
    }
}
