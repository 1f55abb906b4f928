//! Read-only lexical capabilities: the word-frequency oracle and the
//! profanity classifier.
//!
//! Both are built once at startup from the embedded seed tables (plus
//! optional TOML extensions) and never mutated afterwards; the engine only
//! ever borrows them.

use std::collections::{HashMap, HashSet};
use tracing::{info, warn};

use crate::seeds::{seed_profanity_words, seed_zipf_table};

/// Word-commonness oracle on the fixed 0-8 Zipf scale.
#[derive(Clone, Debug)]
pub struct FrequencyLexicon {
  #[allow(dead_code)]
  language: String,
  zipf: HashMap<String, f64>,
}

impl FrequencyLexicon {
  #[allow(dead_code)]
  pub fn from_seed(language: &str) -> Self {
    Self::with_overrides(language, &HashMap::new())
  }

  /// Build the oracle from the embedded table, applying per-word overrides
  /// from configuration on top. Override values are clamped onto the scale.
  pub fn with_overrides(language: &str, overrides: &HashMap<String, f64>) -> Self {
    let mut zipf: HashMap<String, f64> = seed_zipf_table()
      .iter()
      .map(|(word, z)| (word.to_string(), *z))
      .collect();
    for (word, z) in overrides {
      zipf.insert(word.to_lowercase(), z.clamp(0.0, 8.0));
    }
    if language != "en" {
      warn!(
        target: "versegap_backend",
        %language,
        "Only the English frequency table ships embedded; unlisted words will score 0."
      );
    }
    info!(target: "versegap_backend", %language, words = zipf.len(), "Frequency lexicon ready");
    Self { language: language.to_string(), zipf }
  }

  /// Commonness of a word, 0-8. Lookup is case-insensitive; unknown words
  /// score 0 and are therefore treated as hardest.
  pub fn zipf(&self, word: &str) -> f64 {
    self.zipf.get(word.to_lowercase().as_str()).copied().unwrap_or(0.0)
  }

  #[cfg(test)]
  pub fn from_pairs(pairs: &[(&str, f64)]) -> Self {
    Self {
      language: "en".into(),
      zipf: pairs.iter().map(|(w, z)| (w.to_string(), *z)).collect(),
    }
  }
}

/// Lowercase membership test over the loaded profanity wordlist.
#[derive(Clone, Debug)]
pub struct ProfanityList {
  words: HashSet<String>,
}

impl ProfanityList {
  pub fn from_seed() -> Self {
    Self {
      words: seed_profanity_words().iter().map(|w| w.to_string()).collect(),
    }
  }

  /// Add configured words on top of the seed list (construction-time only).
  pub fn extend(&mut self, extra: &[String]) {
    for word in extra {
      self.words.insert(word.to_lowercase());
    }
  }

  pub fn is_profane(&self, word: &str) -> bool {
    self.words.contains(word.to_lowercase().as_str())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unknown_words_score_zero() {
    let lex = FrequencyLexicon::from_seed("en");
    assert_eq!(lex.zipf("zzyzx"), 0.0);
    assert!(lex.zipf("river") > 5.0);
    assert_eq!(lex.zipf("River"), lex.zipf("river"));
  }

  #[test]
  fn overrides_win_and_are_clamped() {
    let mut overrides = HashMap::new();
    overrides.insert("River".to_string(), 2.0);
    overrides.insert("zzyzx".to_string(), 99.0);
    let lex = FrequencyLexicon::with_overrides("en", &overrides);
    assert_eq!(lex.zipf("river"), 2.0);
    assert_eq!(lex.zipf("zzyzx"), 8.0);
  }

  #[test]
  fn profanity_is_case_insensitive_and_extendable() {
    let mut list = ProfanityList::from_seed();
    assert!(list.is_profane("DAMN"));
    assert!(!list.is_profane("moon"));
    list.extend(&["Gobbledygook".to_string()]);
    assert!(list.is_profane("gobbledygook"));
  }
}
