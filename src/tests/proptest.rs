#[cfg(test)]
mod prop_tests {
    use crate::alphabet::Alphabet;
    use crate::config::{EngineConfig, ScoringConfig};
    use crate::cost::build_cost_matrix;
    use crate::distance::weighted_damerau_levenshtein;
    use crate::engine::Engine;
    use proptest::prelude::*;

    fn qwerty_chars() -> Vec<char> {
        "qwertyuiopasdfghjklzxcvbnm".chars().collect()
    }

    fn qwerty_chars_both_cases() -> Vec<char> {
        "qwertyuiopasdfghjklzxcvbnmQWERTYUIOPASDFGHJKLZXCVBNM"
            .chars()
            .collect()
    }

    fn lowercase_word() -> impl Strategy<Value = String> {
        "[a-z]{1,12}"
    }

    fn lowercase_corpus() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(lowercase_word(), 1..12)
    }

    proptest! {
        // Invariant 1: identity.
        #[test]
        fn identity_is_zero_for_any_word(word in lowercase_word()) {
            let alphabet = Alphabet::build(qwerty_chars(), &[word.as_str()]);
            let config = EngineConfig::default();
            let matrix = build_cost_matrix(&alphabet, &config);
            let q = alphabet.encode(&word);
            let score = weighted_damerau_levenshtein(&q, &q, &matrix, &ScoringConfig::search());
            prop_assert_eq!(score, 0.0);
        }

        // Invariant 2: appending any character to a query never decreases
        // its distance to a fixed corpus word under the search profile.
        #[test]
        fn appending_a_character_never_decreases_search_distance(
            word in lowercase_word(),
            query in lowercase_word(),
            extra in "[a-z]",
        ) {
            let extra_char = extra.chars().next().unwrap();
            let alphabet = Alphabet::build(qwerty_chars(), &[word.as_str(), query.as_str()]);
            let config = EngineConfig::default();
            let matrix = build_cost_matrix(&alphabet, &config);
            let scoring = ScoringConfig::search();

            let w = alphabet.encode(&word);
            let mut q = alphabet.encode(&query);
            let base = weighted_damerau_levenshtein(&q, &w, &matrix, &scoring);
            q.push(alphabet.char_to_cid(extra_char));
            let extended = weighted_damerau_levenshtein(&q, &w, &matrix, &scoring);
            prop_assert!(extended >= base - 1e-9);
        }

        // Invariant 3 (corrected bound): for a query that is a prefix of a
        // word, D(q, w) <= (|w| - |q|) * app under the suggestions profile.
        #[test]
        fn prefix_queries_stay_within_the_append_bound(
            prefix in lowercase_word(),
            suffix in "[a-z]{0,10}",
        ) {
            let word = format!("{prefix}{suffix}");
            let alphabet = Alphabet::build(qwerty_chars(), &[word.as_str()]);
            let config = EngineConfig::default();
            let matrix = build_cost_matrix(&alphabet, &config);
            let scoring = ScoringConfig::suggestions();

            let q = alphabet.encode(&prefix);
            let w = alphabet.encode(&word);
            let score = weighted_damerau_levenshtein(&q, &w, &matrix, &scoring);
            let bound = (w.len() - q.len()) as f64 * scoring.app;
            prop_assert!(score <= bound + 1e-9);
        }

        // Invariant 4: determinism across repeated calls.
        #[test]
        fn top_k_is_deterministic(corpus in lowercase_corpus(), query in lowercase_word()) {
            let engine = Engine::new(corpus, EngineConfig::default()).unwrap();
            let k = engine.corpus_len().min(5).max(1);
            let first = engine.top_k(&query, k).unwrap();
            let second = engine.top_k(&query, k).unwrap();
            prop_assert_eq!(first, second);
        }

        // Invariant 6: cost-matrix symmetry, including cross-case pairs.
        #[test]
        fn cost_matrix_is_symmetric_for_layout_letters(
            a in prop::sample::select(qwerty_chars_both_cases()),
            b in prop::sample::select(qwerty_chars_both_cases()),
        ) {
            let alphabet = Alphabet::build(
                qwerty_chars(),
                &["QWERTYUIOPASDFGHJKLZXCVBNM", "amor"],
            );
            let config = EngineConfig::default();
            let matrix = build_cost_matrix(&alphabet, &config);
            let ca = alphabet.char_to_cid(a);
            let cb = alphabet.char_to_cid(b);
            prop_assert_eq!(matrix.get(ca, cb), matrix.get(cb, ca));
        }

        // A capitalized letter against a *different* lowercase letter must
        // reuse that pair's real key distance (case-folded lookup), not
        // fall through to the off-layout fallback the way an unfolded
        // lookup would.
        #[test]
        fn uppercase_letters_reuse_the_lowercase_pair_distance(
            a in prop::sample::select(qwerty_chars()),
            b in prop::sample::select(qwerty_chars()),
        ) {
            prop_assume!(a != b);
            let alphabet = Alphabet::build(
                qwerty_chars(),
                &["QWERTYUIOPASDFGHJKLZXCVBNM", "amor"],
            );
            let config = EngineConfig::default();
            let matrix = build_cost_matrix(&alphabet, &config);

            let lowercase_dist = matrix.get(alphabet.char_to_cid(a), alphabet.char_to_cid(b));
            let upper_a = alphabet.char_to_cid(a.to_ascii_uppercase());
            let cross_case_dist = matrix.get(upper_a, alphabet.char_to_cid(b));

            prop_assert_ne!(lowercase_dist, config.non_layout_distance);
            prop_assert!((cross_case_dist - (lowercase_dist + config.case_penalty)).abs() < 1e-9);
        }

        // Invariant 8 / fallback mapping: anything outside the known
        // alphabet encodes to SPACE_CID and round-trips as a literal space.
        #[test]
        fn unknown_characters_round_trip_as_space(c in prop::char::range('\u{0370}', '\u{03FF}')) {
            let alphabet = Alphabet::build(qwerty_chars(), &["amor"]);
            let encoded = alphabet.encode(&c.to_string());
            prop_assert_eq!(encoded, vec![crate::alphabet::SPACE_CID]);
            prop_assert_eq!(alphabet.decode(&encoded), " ");
        }

        // Round-trip law: decode(encode(s)) == s stripped of macrons and
        // leading/trailing whitespace, for s drawn entirely from known chars.
        #[test]
        fn encode_decode_round_trips_modulo_normalization(word in lowercase_word()) {
            let alphabet = Alphabet::build(qwerty_chars(), &[word.as_str()]);
            let padded = format!("  {word}  ");
            let encoded = alphabet.encode(&padded);
            prop_assert_eq!(alphabet.decode(&encoded), word);
        }

        // roman(n) never panics and round-trips through the documented
        // degenerate cases for any nonnegative n.
        #[test]
        fn roman_never_panics_for_nonnegative_n(n in 0i64..200_000) {
            let result = Engine::roman(n);
            prop_assert!(result.is_ok());
            if n == 0 {
                prop_assert_eq!(result.unwrap(), " ".to_string());
            } else if n >= 4000 {
                prop_assert_eq!(result.unwrap(), n.to_string());
            }
        }
    }
}
