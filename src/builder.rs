//! Exercise Builder: orchestrates scoring, extraction, selection and
//! rendering for one (song, difficulty) pair.

use std::collections::HashSet;
use std::fmt;

use tracing::{debug, instrument};
use uuid::Uuid;

use crate::domain::{Difficulty, Exercise, GapItem};
use crate::extract::extract;
use crate::lexicon::{FrequencyLexicon, ProfanityList};
use crate::render::render;
use crate::select::select;
use crate::tagger::Tokenizer;
use crate::util::round2;

/// Lyrics shorter than this never produce an exercise.
pub const MIN_TEXT_CHARS: usize = 100;

/// Why a (song, difficulty) pair produced no exercise. Insufficient input
/// is local and expected; collaborator failures are propagated so the
/// batch driver can skip the pair and move on.
#[derive(Clone, Debug)]
pub enum BuildError {
  InputTooShort { chars: usize },
  InsufficientCandidates { have: usize, need: usize },
  Collaborator(String),
}

impl fmt::Display for BuildError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      BuildError::InputTooShort { chars } => {
        write!(f, "lyrics too short: {} chars (need {})", chars, MIN_TEXT_CHARS)
      }
      BuildError::InsufficientCandidates { have, need } => {
        write!(f, "insufficient gap candidates: {} of {} required", have, need)
      }
      BuildError::Collaborator(msg) => write!(f, "collaborator failure: {}", msg),
    }
  }
}

/// Build one exercise. No partial results: either every invariant holds on
/// the returned exercise or the build fails and nothing is persisted.
#[instrument(level = "info", skip(song_text, tokenizer, lexicon, profanity), fields(%song_id, difficulty = %difficulty.as_str(), text_len = song_text.len()))]
pub async fn build(
  song_id: &str,
  song_text: &str,
  difficulty: Difficulty,
  tokenizer: &Tokenizer,
  lexicon: &FrequencyLexicon,
  profanity: &ProfanityList,
) -> Result<Exercise, BuildError> {
  let chars = song_text.chars().count();
  if song_text.trim().is_empty() || chars < MIN_TEXT_CHARS {
    return Err(BuildError::InputTooShort { chars });
  }

  let config = difficulty.config();
  let tokens = tokenizer.tokenize(song_text).await.map_err(BuildError::Collaborator)?;

  let candidates = extract(
    &tokens,
    config.min_zipf,
    config.prefer_proper_nouns,
    lexicon,
    profanity,
  );
  let selected = select(
    &candidates,
    tokens.len(),
    config.min_gaps,
    config.max_gaps,
    config.prefer_proper_nouns,
  );
  if selected.len() < config.min_gaps {
    return Err(BuildError::InsufficientCandidates {
      have: selected.len(),
      need: config.min_gaps,
    });
  }

  let positions: HashSet<usize> = selected.iter().map(|c| c.position).collect();
  let blanked_text = render(&tokens, &positions);

  let gaps: Vec<GapItem> = selected
    .iter()
    .map(|c| GapItem {
      line_number: c.line_number,
      word_index: c.word_index_in_line,
      original_word: c.word.to_lowercase(),
      lemma: c.lemma.to_lowercase(),
      pos_tag: c.pos_tag,
      difficulty_score: c.difficulty,
      char_count: c.char_count,
      is_end_of_line: c.is_end_of_line,
    })
    .collect();

  let avg_difficulty_score =
    round2(gaps.iter().map(|g| g.difficulty_score).sum::<f64>() / gaps.len() as f64);

  debug!(
    target: "exercise",
    %song_id,
    gap_count = gaps.len(),
    avg_difficulty_score,
    "Exercise assembled"
  );

  Ok(Exercise {
    exercise_id: Uuid::new_v4().to_string(),
    song_id: song_id.to_string(),
    difficulty,
    gap_count: gaps.len(),
    gaps,
    blanked_text,
    avg_difficulty_score,
  })
}
