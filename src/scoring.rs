//! Word difficulty scoring.
//!
//! Difficulty is a pure function of commonness: rare words are hard to
//! fill in, common words are easy. Unknown words (zipf 0) land at the top
//! of the scale.

use crate::lexicon::FrequencyLexicon;
use crate::util::round2;

/// Map a Zipf commonness value (0-8) onto the 0-10 difficulty scale,
/// rounded to two decimals.
pub fn difficulty_from_zipf(zipf: f64) -> f64 {
  round2(((8.0 - zipf) * 1.25).clamp(0.0, 10.0))
}

/// Difficulty of a word per the frequency oracle. Deterministic for a
/// fixed lexicon; no side effects.
pub fn score_word(lexicon: &FrequencyLexicon, word: &str) -> f64 {
  difficulty_from_zipf(lexicon.zipf(word))
}
