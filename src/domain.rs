//! Domain models for the gap-fill engine: tokens, candidates, difficulty
//! tiers, gap items, and the persisted exercise document.

use serde::{Deserialize, Serialize};

/// Placeholder substituted for a gapped word in the rendered exercise text.
pub const GAP_MARKER: &str = "___";

/// Difficulty tier of a gap-fill exercise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
  Easy,
  Medium,
  Hard,
}

impl Difficulty {
  pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

  pub fn as_str(&self) -> &'static str {
    match self {
      Difficulty::Easy => "easy",
      Difficulty::Medium => "medium",
      Difficulty::Hard => "hard",
    }
  }

  pub fn parse(s: &str) -> Option<Difficulty> {
    match s.trim().to_lowercase().as_str() {
      "easy" => Some(Difficulty::Easy),
      "medium" => Some(Difficulty::Medium),
      "hard" => Some(Difficulty::Hard),
      _ => None,
    }
  }

  /// Tier settings are fixed and looked up here, never read from free-form
  /// configuration.
  pub fn config(self) -> &'static DifficultyConfig {
    match self {
      Difficulty::Easy => &EASY,
      Difficulty::Medium => &MEDIUM,
      Difficulty::Hard => &HARD,
    }
  }
}

/// Per-tier generation settings.
#[derive(Clone, Copy, Debug)]
pub struct DifficultyConfig {
  pub min_gaps: usize,
  pub max_gaps: usize,
  pub prefer_proper_nouns: bool,
  /// Frequency floor; enforced for non-proper-noun candidates only.
  pub min_zipf: f64,
}

const EASY: DifficultyConfig =
  DifficultyConfig { min_gaps: 8, max_gaps: 10, prefer_proper_nouns: true, min_zipf: 5.0 };
const MEDIUM: DifficultyConfig =
  DifficultyConfig { min_gaps: 12, max_gaps: 15, prefer_proper_nouns: false, min_zipf: 3.0 };
const HARD: DifficultyConfig =
  DifficultyConfig { min_gaps: 15, max_gaps: 20, prefer_proper_nouns: false, min_zipf: 0.0 };

/// Part-of-speech tagset shared by the local and remote taggers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PosTag {
  Noun,
  Verb,
  Adj,
  Adv,
  Pron,
  Det,
  Adp,
  Conj,
  Num,
  Part,
  Propn,
  Punct,
  Other,
}

impl PosTag {
  pub fn as_str(&self) -> &'static str {
    match self {
      PosTag::Noun => "NOUN",
      PosTag::Verb => "VERB",
      PosTag::Adj => "ADJ",
      PosTag::Adv => "ADV",
      PosTag::Pron => "PRON",
      PosTag::Det => "DET",
      PosTag::Adp => "ADP",
      PosTag::Conj => "CONJ",
      PosTag::Num => "NUM",
      PosTag::Part => "PART",
      PosTag::Propn => "PROPN",
      PosTag::Punct => "PUNCT",
      PosTag::Other => "OTHER",
    }
  }

  /// Lenient parse for tags coming off the wire; anything unrecognized
  /// maps to OTHER rather than failing the whole token stream.
  pub fn parse(s: &str) -> PosTag {
    match s.trim().to_uppercase().as_str() {
      "NOUN" => PosTag::Noun,
      "VERB" | "AUX" => PosTag::Verb,
      "ADJ" => PosTag::Adj,
      "ADV" => PosTag::Adv,
      "PRON" => PosTag::Pron,
      "DET" => PosTag::Det,
      "ADP" => PosTag::Adp,
      "CONJ" | "CCONJ" | "SCONJ" => PosTag::Conj,
      "NUM" => PosTag::Num,
      "PART" => PosTag::Part,
      "PROPN" => PosTag::Propn,
      "PUNCT" => PosTag::Punct,
      _ => PosTag::Other,
    }
  }
}

/// One token of the source lyrics, as produced by a tagger.
/// `whitespace` carries the token's original trailing whitespace so the
/// renderer can reproduce formatting exactly.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Token {
  pub position: usize,
  pub text: String,
  pub whitespace: String,
  pub is_alpha: bool,
  pub pos_tag: PosTag,
  pub lemma: String,
  pub ends_line: bool,
}

/// A token that passed inclusion filtering and may become a blank.
/// Immutable once created.
#[derive(Clone, Debug)]
pub struct Candidate {
  pub position: usize,
  pub word: String,
  pub pos_tag: PosTag,
  pub difficulty: f64,
  pub line_number: usize,
  pub word_index_in_line: usize,
  pub lemma: String,
  pub char_count: usize,
  pub is_end_of_line: bool,
}

/// Persisted representation of one selected candidate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GapItem {
  pub line_number: usize,
  pub word_index: usize,
  pub original_word: String,
  pub lemma: String,
  pub pos_tag: PosTag,
  pub difficulty_score: f64,
  pub char_count: usize,
  pub is_end_of_line: bool,
}

/// Unit of persistence, one per (song_id, difficulty).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Exercise {
  pub exercise_id: String,
  pub song_id: String,
  pub difficulty: Difficulty,
  pub gaps: Vec<GapItem>,
  pub blanked_text: String,
  pub gap_count: usize,
  pub avg_difficulty_score: f64,
}

/// Where did we get a song from?
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SongSource {
  LocalBank, // from user-provided TOML bank
  Seed,      // built-in seeds
  Api,       // submitted through the HTTP API
}

/// A song the engine generates exercises for.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Song {
  pub id: String,
  pub title: String,
  pub source: SongSource,
  pub lyrics: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn tier_configs_match_platform_settings() {
    let easy = Difficulty::Easy.config();
    assert_eq!((easy.min_gaps, easy.max_gaps), (8, 10));
    assert!(easy.prefer_proper_nouns);
    assert_eq!(easy.min_zipf, 5.0);

    let medium = Difficulty::Medium.config();
    assert_eq!((medium.min_gaps, medium.max_gaps), (12, 15));
    assert!(!medium.prefer_proper_nouns);

    let hard = Difficulty::Hard.config();
    assert_eq!((hard.min_gaps, hard.max_gaps), (15, 20));
    assert_eq!(hard.min_zipf, 0.0);
  }

  #[test]
  fn difficulty_round_trips_through_strings() {
    for d in Difficulty::ALL {
      assert_eq!(Difficulty::parse(d.as_str()), Some(d));
    }
    assert_eq!(Difficulty::parse("HARD "), Some(Difficulty::Hard));
    assert_eq!(Difficulty::parse("brutal"), None);
  }

  #[test]
  fn pos_tags_serialize_uppercase() {
    let json = serde_json::to_string(&PosTag::Propn).expect("serialize");
    assert_eq!(json, "\"PROPN\"");
    assert_eq!(PosTag::parse("propn"), PosTag::Propn);
    assert_eq!(PosTag::parse("INTJ"), PosTag::Other);
  }
}
