//! Candidate extraction: which tokens are allowed to become blanks.

use tracing::debug;

use crate::domain::{Candidate, PosTag, Token};
use crate::lexicon::{FrequencyLexicon, ProfanityList};
use crate::scoring::score_word;

/// Per-token inclusion test. Rules are evaluated in order and the first
/// failing rule rejects the token:
///   1. must be purely alphabetic
///   2. must be at least 3 characters
///   3. must not be profane
///   4. proper nouns are accepted outright when the tier prefers them
///      (the frequency floor is skipped on this path only)
///   5. otherwise only nouns, verbs and adjectives qualify
///   6. and the word must clear the tier's frequency floor
pub fn is_valid_gap_word(
  token: &Token,
  min_zipf: f64,
  prefer_proper_nouns: bool,
  lexicon: &FrequencyLexicon,
  profanity: &ProfanityList,
) -> bool {
  if !token.is_alpha {
    return false;
  }
  if token.text.chars().count() < 3 {
    return false;
  }
  let lower = token.text.to_lowercase();
  if profanity.is_profane(&lower) {
    return false;
  }
  if prefer_proper_nouns && token.pos_tag == PosTag::Propn {
    return true;
  }
  if !matches!(token.pos_tag, PosTag::Noun | PosTag::Verb | PosTag::Adj) {
    return false;
  }
  lexicon.zipf(&lower) >= min_zipf
}

/// Scan the token stream in order, filtering through `is_valid_gap_word`
/// and attaching positional metadata. `line_number` increments (and the
/// in-line word index resets) whenever the *previous* token ended a line;
/// the final token always counts as end-of-line.
pub fn extract(
  tokens: &[Token],
  min_zipf: f64,
  prefer_proper_nouns: bool,
  lexicon: &FrequencyLexicon,
  profanity: &ProfanityList,
) -> Vec<Candidate> {
  let mut candidates: Vec<Candidate> = Vec::new();
  let mut line_number = 0usize;
  let mut word_index = 0usize;
  let last = tokens.len().saturating_sub(1);

  for (i, token) in tokens.iter().enumerate() {
    if i > 0 && tokens[i - 1].ends_line {
      line_number += 1;
      word_index = 0;
    }

    if is_valid_gap_word(token, min_zipf, prefer_proper_nouns, lexicon, profanity) {
      candidates.push(Candidate {
        position: token.position,
        word: token.text.clone(),
        pos_tag: token.pos_tag,
        difficulty: score_word(lexicon, &token.text),
        line_number,
        word_index_in_line: word_index,
        lemma: token.lemma.to_lowercase(),
        char_count: token.text.chars().count(),
        is_end_of_line: token.ends_line || i == last,
      });
    }

    word_index += 1;
  }

  debug!(
    target: "exercise",
    tokens = tokens.len(),
    candidates = candidates.len(),
    min_zipf,
    prefer_proper_nouns,
    "Candidate extraction complete"
  );
  candidates
}

#[cfg(test)]
mod tests {
  use super::*;

  fn tok(position: usize, text: &str, pos_tag: PosTag) -> Token {
    Token {
      position,
      text: text.to_string(),
      whitespace: " ".to_string(),
      is_alpha: text.chars().all(|c| c.is_alphabetic()),
      pos_tag,
      lemma: text.to_lowercase(),
      ends_line: false,
    }
  }

  fn lex() -> FrequencyLexicon {
    FrequencyLexicon::from_pairs(&[
      ("river", 5.3),
      ("run", 5.6),
      ("rare", 2.0),
      ("damn", 5.5),
    ])
  }

  #[test]
  fn rejects_non_alpha_and_short_words() {
    let profanity = ProfanityList::from_seed();
    let short = tok(0, "go", PosTag::Verb);
    let contraction = tok(1, "don't", PosTag::Verb);
    assert!(!is_valid_gap_word(&short, 0.0, false, &lex(), &profanity));
    assert!(!is_valid_gap_word(&contraction, 0.0, false, &lex(), &profanity));
  }

  #[test]
  fn rejects_profane_words_even_as_proper_nouns() {
    let profanity = ProfanityList::from_seed();
    let word = tok(0, "Damn", PosTag::Propn);
    // profanity is checked before the proper-noun fast path
    assert!(!is_valid_gap_word(&word, 0.0, true, &lex(), &profanity));
  }

  #[test]
  fn proper_noun_fast_path_skips_the_frequency_floor() {
    let profanity = ProfanityList::from_seed();
    let name = tok(0, "Georgia", PosTag::Propn); // not in the lexicon, zipf 0
    assert!(is_valid_gap_word(&name, 5.0, true, &lex(), &profanity));
    // without the preference the POS filter rejects PROPN
    assert!(!is_valid_gap_word(&name, 0.0, false, &lex(), &profanity));
  }

  #[test]
  fn frequency_floor_applies_to_open_class_words() {
    let profanity = ProfanityList::from_seed();
    let common = tok(0, "river", PosTag::Noun);
    let rare = tok(1, "rare", PosTag::Adj);
    assert!(is_valid_gap_word(&common, 5.0, false, &lex(), &profanity));
    assert!(!is_valid_gap_word(&rare, 3.0, false, &lex(), &profanity));
    assert!(is_valid_gap_word(&rare, 0.0, false, &lex(), &profanity));
  }

  #[test]
  fn closed_class_tokens_never_qualify() {
    let profanity = ProfanityList::from_seed();
    let pron = tok(0, "they", PosTag::Pron);
    let adv = tok(1, "always", PosTag::Adv);
    assert!(!is_valid_gap_word(&pron, 0.0, false, &lex(), &profanity));
    assert!(!is_valid_gap_word(&adv, 0.0, false, &lex(), &profanity));
  }

  #[test]
  fn line_and_word_indices_follow_the_stream() {
    let profanity = ProfanityList::from_seed();
    let mut tokens = vec![
      tok(0, "river", PosTag::Noun),
      tok(1, "the", PosTag::Det),
      tok(2, "run", PosTag::Verb),
      tok(3, "river", PosTag::Noun),
      tok(4, "run", PosTag::Verb),
    ];
    tokens[2].ends_line = true;

    let candidates = extract(&tokens, 0.0, false, &lex(), &profanity);
    assert_eq!(candidates.len(), 4);

    // first line: positions 0 and 2, word indices 0 and 2
    assert_eq!((candidates[0].line_number, candidates[0].word_index_in_line), (0, 0));
    assert_eq!((candidates[1].line_number, candidates[1].word_index_in_line), (0, 2));
    // second line starts after the token that ended the line
    assert_eq!((candidates[2].line_number, candidates[2].word_index_in_line), (1, 0));
    assert_eq!((candidates[3].line_number, candidates[3].word_index_in_line), (1, 1));
  }

  #[test]
  fn end_of_line_flags_line_enders_and_the_final_token() {
    let profanity = ProfanityList::from_seed();
    let mut tokens = vec![
      tok(0, "river", PosTag::Noun),
      tok(1, "run", PosTag::Verb),
      tok(2, "river", PosTag::Noun),
    ];
    tokens[1].ends_line = true;

    let candidates = extract(&tokens, 0.0, false, &lex(), &profanity);
    assert!(!candidates[0].is_end_of_line);
    assert!(candidates[1].is_end_of_line);
    assert!(candidates[2].is_end_of_line, "final token counts as end of line");
  }

  #[test]
  fn candidates_carry_scores_and_lowercased_lemmas() {
    let profanity = ProfanityList::from_seed();
    let tokens = vec![Token {
      lemma: "River".to_string(),
      ..tok(0, "River", PosTag::Noun)
    }];
    let candidates = extract(&tokens, 0.0, false, &lex(), &profanity);
    assert_eq!(candidates[0].lemma, "river");
    assert_eq!(candidates[0].difficulty, 3.38); // (8 - 5.3) * 1.25
    assert_eq!(candidates[0].char_count, 5);
    assert_eq!(candidates[0].word, "River");
  }
}
