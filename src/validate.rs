//! Quality validation for persisted exercises.
//!
//! The validator re-reads persisted JSON documents (never the builder's
//! in-memory types) and checks every structural and content invariant.
//! Findings split into errors, which invalidate the exercise, and
//! warnings, which only flag it — so historical documents written under
//! older tier bounds stay consumable while still being surfaced.
//! Read-only throughout: nothing is ever mutated or deleted.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use crate::domain::Difficulty;
use crate::lexicon::ProfanityList;
use crate::util::{count_markers, is_alpha_ignoring_spaces, round2};

/// Hard ceiling on gaps per exercise, across all tiers.
pub const GAP_COUNT_CEILING: usize = 20;

/// Declared and recomputed averages may drift by at most this much before
/// a warning fires.
const AVG_DRIFT_TOLERANCE: f64 = 0.1;

const REQUIRED_FIELDS: &[&str] = &[
  "exercise_id",
  "song_id",
  "difficulty",
  "gaps",
  "blanked_text",
  "gap_count",
  "avg_difficulty_score",
];

const GAP_FIELDS: &[&str] = &[
  "line_number",
  "word_index",
  "original_word",
  "lemma",
  "pos_tag",
  "difficulty_score",
  "char_count",
  "is_end_of_line",
];

#[derive(Clone, Debug, Default, Serialize)]
pub struct ExerciseStats {
  pub gap_count: usize,
  pub pos_distribution: HashMap<String, usize>,
  pub recomputed_avg_difficulty: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct ValidationReport {
  pub is_valid: bool,
  pub errors: Vec<String>,
  pub warnings: Vec<String>,
  pub stats: ExerciseStats,
}

impl ValidationReport {
  fn invalid(errors: Vec<String>, warnings: Vec<String>, stats: ExerciseStats) -> Self {
    Self { is_valid: false, errors, warnings, stats }
  }
}

/// Validate one persisted exercise document.
pub fn validate_exercise(doc: &Value, profanity: &ProfanityList) -> ValidationReport {
  let mut errors: Vec<String> = Vec::new();
  let mut warnings: Vec<String> = Vec::new();
  let mut stats = ExerciseStats::default();

  // Missing top-level fields stop everything else; there is nothing
  // meaningful to check on a structurally incomplete document.
  for field in REQUIRED_FIELDS {
    if doc.get(field).is_none() {
      errors.push(format!("missing required field '{}'", field));
    }
  }
  if !errors.is_empty() {
    return ValidationReport::invalid(errors, warnings, stats);
  }

  let gaps = match doc.get("gaps").and_then(Value::as_array) {
    Some(gaps) => gaps,
    None => {
      errors.push("field 'gaps' is not an array".into());
      return ValidationReport::invalid(errors, warnings, stats);
    }
  };
  let gap_count = match doc.get("gap_count").and_then(Value::as_u64) {
    Some(n) => n as usize,
    None => {
      errors.push("field 'gap_count' is not a non-negative integer".into());
      return ValidationReport::invalid(errors, warnings, stats);
    }
  };
  stats.gap_count = gap_count;

  if gap_count != gaps.len() {
    warnings.push(format!(
      "gap_count {} does not match {} stored gaps",
      gap_count,
      gaps.len()
    ));
  }
  if gap_count > GAP_COUNT_CEILING {
    errors.push(format!(
      "gap_count {} exceeds the platform ceiling of {}",
      gap_count, GAP_COUNT_CEILING
    ));
  }
  if gap_count < 1 {
    errors.push("exercise has no gaps".into());
  }

  match doc.get("difficulty").and_then(Value::as_str) {
    Some(tier_str) => match Difficulty::parse(tier_str) {
      Some(tier) => {
        let config = tier.config();
        if gap_count < config.min_gaps || gap_count > config.max_gaps {
          warnings.push(format!(
            "gap_count {} outside {} bounds {}-{}",
            gap_count,
            tier.as_str(),
            config.min_gaps,
            config.max_gaps
          ));
        }
      }
      None => errors.push(format!("unknown difficulty tier '{}'", tier_str)),
    },
    None => errors.push("field 'difficulty' is not a string".into()),
  }

  let mut score_sum = 0.0;
  let mut score_n = 0usize;
  for (i, gap) in gaps.iter().enumerate() {
    let mut complete = true;
    for field in GAP_FIELDS {
      if gap.get(field).is_none() {
        errors.push(format!("gap {}: missing field '{}'", i, field));
        complete = false;
      }
    }
    if !complete {
      continue;
    }

    match gap.get("original_word").and_then(Value::as_str) {
      Some(word) if !word.is_empty() => {
        if !is_alpha_ignoring_spaces(word) {
          errors.push(format!("gap {}: word '{}' is not alphabetic", i, word));
        }
        if profanity.is_profane(&word.to_lowercase()) {
          errors.push(format!("gap {}: word is on the profanity list", i));
        }
      }
      _ => errors.push(format!("gap {}: empty original_word", i)),
    }

    match gap.get("difficulty_score").and_then(Value::as_f64) {
      Some(score) => {
        if !(0.0..=10.0).contains(&score) {
          errors.push(format!("gap {}: difficulty_score {} outside [0, 10]", i, score));
        }
        score_sum += score;
        score_n += 1;
      }
      None => errors.push(format!("gap {}: difficulty_score is not a number", i)),
    }

    if let Some(tag) = gap.get("pos_tag").and_then(Value::as_str) {
      *stats.pos_distribution.entry(tag.to_string()).or_default() += 1;
    }
  }

  if score_n > 0 {
    stats.recomputed_avg_difficulty = round2(score_sum / score_n as f64);
    let declared = doc.get("avg_difficulty_score").and_then(Value::as_f64).unwrap_or(0.0);
    if (declared - stats.recomputed_avg_difficulty).abs() > AVG_DRIFT_TOLERANCE {
      warnings.push(format!(
        "declared avg_difficulty_score {} differs from recomputed {}",
        declared, stats.recomputed_avg_difficulty
      ));
    }
  }

  match doc.get("blanked_text").and_then(Value::as_str) {
    Some(text) => {
      let markers = count_markers(text);
      if markers != gap_count {
        errors.push(format!(
          "blanked_text has {} gap markers, expected {}",
          markers, gap_count
        ));
      }
    }
    None => errors.push("field 'blanked_text' is not a string".into()),
  }

  let is_valid = errors.is_empty();
  ValidationReport { is_valid, errors, warnings, stats }
}

/// Corpus-level roll-up across all checked exercises.
#[derive(Clone, Debug, Default, Serialize)]
pub struct CorpusReport {
  pub total: usize,
  pub checked: usize,
  pub valid: usize,
  pub invalid: usize,
  /// Pass rate: valid / checked × 100. A reporting aggregate, not part of
  /// per-exercise correctness.
  pub quality_score: f64,
  pub warnings: usize,
  pub per_tier: HashMap<String, usize>,
  pub pos_distribution: HashMap<String, usize>,
  pub avg_difficulty: f64,
}

/// Validate a corpus snapshot — all of it, or a uniform random sample of
/// `sample` documents.
#[instrument(level = "info", skip(docs, profanity), fields(total = docs.len(), sample = ?sample))]
pub fn validate_corpus(docs: &[Value], sample: Option<usize>, profanity: &ProfanityList) -> CorpusReport {
  let mut report = CorpusReport { total: docs.len(), ..Default::default() };

  let checked: Vec<&Value> = match sample {
    Some(n) if n < docs.len() => {
      let mut rng = rand::thread_rng();
      docs.choose_multiple(&mut rng, n).collect()
    }
    _ => docs.iter().collect(),
  };
  report.checked = checked.len();

  let mut avg_sum = 0.0;
  let mut avg_n = 0usize;
  for doc in checked {
    let result = validate_exercise(doc, profanity);
    if result.is_valid {
      report.valid += 1;
    } else {
      report.invalid += 1;
    }
    report.warnings += result.warnings.len();

    if let Some(tier) = doc.get("difficulty").and_then(Value::as_str) {
      *report.per_tier.entry(tier.to_string()).or_default() += 1;
    }
    for (tag, n) in result.stats.pos_distribution {
      *report.pos_distribution.entry(tag).or_default() += n;
    }
    if result.stats.recomputed_avg_difficulty > 0.0 {
      avg_sum += result.stats.recomputed_avg_difficulty;
      avg_n += 1;
    }
  }

  if avg_n > 0 {
    report.avg_difficulty = round2(avg_sum / avg_n as f64);
  }
  if report.checked > 0 {
    report.quality_score = round2(report.valid as f64 * 100.0 / report.checked as f64);
  }
  report
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  /// A structurally sound easy exercise with 8 gaps and 8 markers.
  fn valid_doc() -> Value {
    let gaps: Vec<Value> = (0..8)
      .map(|i| {
        json!({
          "line_number": i / 4,
          "word_index": i % 4,
          "original_word": format!("word{}", ["a","b","c","d","e","f","g","h"][i]),
          "lemma": "word",
          "pos_tag": "NOUN",
          "difficulty_score": 4.0,
          "char_count": 5,
          "is_end_of_line": i % 4 == 3,
        })
      })
      .collect();
    json!({
      "exercise_id": "ex-1",
      "song_id": "song-1",
      "difficulty": "easy",
      "gaps": gaps,
      "blanked_text": "___ ___ ___ ___\n___ ___ ___ ___\n",
      "gap_count": 8,
      "avg_difficulty_score": 4.0,
    })
  }

  #[test]
  fn a_sound_document_validates_cleanly() {
    let report = validate_exercise(&valid_doc(), &ProfanityList::from_seed());
    assert!(report.is_valid, "errors: {:?}", report.errors);
    assert!(report.errors.is_empty());
    assert!(report.warnings.is_empty());
    assert_eq!(report.stats.gap_count, 8);
    assert_eq!(report.stats.recomputed_avg_difficulty, 4.0);
    assert_eq!(report.stats.pos_distribution.get("NOUN"), Some(&8));
  }

  #[test]
  fn missing_top_level_field_stops_all_other_checks() {
    let mut doc = valid_doc();
    doc.as_object_mut().expect("object").remove("blanked_text");
    let report = validate_exercise(&doc, &ProfanityList::from_seed());
    assert!(!report.is_valid);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].contains("blanked_text"));
    // gap-level checks never ran
    assert_eq!(report.stats.gap_count, 0);
  }

  #[test]
  fn marker_count_mismatch_is_an_error() {
    let mut doc = valid_doc();
    // 10 declared gaps but only 9 markers
    doc["gap_count"] = json!(10);
    doc["blanked_text"] = json!("___ ___ ___ ___ ___ ___ ___ ___ ___");
    let report = validate_exercise(&doc, &ProfanityList::from_seed());
    assert!(!report.is_valid);
    assert!(report.errors.iter().any(|e| e.contains("9 gap markers, expected 10")));
  }

  #[test]
  fn avg_drift_is_a_warning_not_an_error() {
    let mut doc = valid_doc();
    // recomputed mean stays 4.0; declare 4.2
    doc["avg_difficulty_score"] = json!(4.2);
    let report = validate_exercise(&doc, &ProfanityList::from_seed());
    assert!(report.is_valid, "drift alone must not invalidate");
    assert!(report.warnings.iter().any(|w| w.contains("avg_difficulty_score")));
    // within tolerance stays silent
    doc["avg_difficulty_score"] = json!(4.05);
    let report = validate_exercise(&doc, &ProfanityList::from_seed());
    assert!(report.warnings.is_empty());
  }

  #[test]
  fn gap_count_gaps_len_mismatch_is_a_warning() {
    let mut doc = valid_doc();
    doc["gaps"].as_array_mut().expect("array").pop();
    // gap_count still 8, gaps now 7, markers still 8
    let report = validate_exercise(&doc, &ProfanityList::from_seed());
    assert!(report.warnings.iter().any(|w| w.contains("does not match")));
  }

  #[test]
  fn tier_bounds_violations_warn_but_do_not_invalidate() {
    let mut doc = valid_doc();
    // 12 markers + gap_count 12 on an easy exercise: legal globally (< 20)
    // but outside the easy band 8-10.
    doc["gap_count"] = json!(12);
    doc["blanked_text"] = json!("___ ".repeat(12));
    let report = validate_exercise(&doc, &ProfanityList::from_seed());
    assert!(report.warnings.iter().any(|w| w.contains("outside easy bounds")));
    // the gaps-length mismatch also warns; neither invalidates
    assert!(report.is_valid, "errors: {:?}", report.errors);
  }

  #[test]
  fn global_gap_ceiling_and_floor_are_errors() {
    let mut doc = valid_doc();
    doc["gap_count"] = json!(21);
    doc["blanked_text"] = json!("___ ".repeat(21));
    let report = validate_exercise(&doc, &ProfanityList::from_seed());
    assert!(!report.is_valid);
    assert!(report.errors.iter().any(|e| e.contains("ceiling")));

    let mut doc = valid_doc();
    doc["gap_count"] = json!(0);
    doc["blanked_text"] = json!("");
    doc["gaps"] = json!([]);
    let report = validate_exercise(&doc, &ProfanityList::from_seed());
    assert!(!report.is_valid);
    assert!(report.errors.iter().any(|e| e.contains("no gaps")));
  }

  #[test]
  fn profane_or_non_alphabetic_gap_words_are_errors() {
    let mut doc = valid_doc();
    doc["gaps"][0]["original_word"] = json!("damn");
    doc["gaps"][1]["original_word"] = json!("route66");
    let report = validate_exercise(&doc, &ProfanityList::from_seed());
    assert!(!report.is_valid);
    assert!(report.errors.iter().any(|e| e.contains("profanity")));
    assert!(report.errors.iter().any(|e| e.contains("not alphabetic")));
  }

  #[test]
  fn gap_missing_subfields_report_each_field() {
    let mut doc = valid_doc();
    doc["gaps"][2].as_object_mut().expect("gap").remove("lemma");
    doc["gaps"][2].as_object_mut().expect("gap").remove("pos_tag");
    let report = validate_exercise(&doc, &ProfanityList::from_seed());
    assert!(!report.is_valid);
    assert!(report.errors.iter().any(|e| e.contains("gap 2: missing field 'lemma'")));
    assert!(report.errors.iter().any(|e| e.contains("gap 2: missing field 'pos_tag'")));
  }

  #[test]
  fn out_of_range_scores_are_errors() {
    let mut doc = valid_doc();
    doc["gaps"][0]["difficulty_score"] = json!(11.5);
    let report = validate_exercise(&doc, &ProfanityList::from_seed());
    assert!(!report.is_valid);
    assert!(report.errors.iter().any(|e| e.contains("outside [0, 10]")));
  }

  #[test]
  fn corpus_quality_score_is_the_pass_rate() {
    let good = valid_doc();
    let mut bad = valid_doc();
    bad["blanked_text"] = json!("no markers at all");
    let docs = vec![good.clone(), good.clone(), good, bad];
    let report = validate_corpus(&docs, None, &ProfanityList::from_seed());
    assert_eq!(report.total, 4);
    assert_eq!(report.checked, 4);
    assert_eq!((report.valid, report.invalid), (3, 1));
    assert_eq!(report.quality_score, 75.0);
    assert_eq!(report.per_tier.get("easy"), Some(&4));
    assert_eq!(report.pos_distribution.get("NOUN"), Some(&32));
    assert_eq!(report.avg_difficulty, 4.0);
  }

  #[tokio::test]
  async fn freshly_generated_documents_validate_cleanly() {
    use crate::builder::build;
    use crate::domain::Difficulty;
    use crate::lexicon::FrequencyLexicon;
    use crate::seeds::seed_songs;
    use crate::tagger::Tokenizer;

    let lexicon = FrequencyLexicon::from_seed("en");
    let profanity = ProfanityList::from_seed();
    let songs = seed_songs();
    let song = &songs[1];
    for difficulty in Difficulty::ALL {
      let exercise = build(&song.id, &song.lyrics, difficulty, &Tokenizer::local(), &lexicon, &profanity)
        .await
        .expect("seed song should generate");
      let doc = serde_json::to_value(&exercise).expect("serialize");
      let report = validate_exercise(&doc, &profanity);
      assert!(
        report.is_valid,
        "{} should persist valid: {:?}",
        difficulty.as_str(),
        report.errors
      );
      assert!(report.warnings.is_empty(), "unexpected warnings: {:?}", report.warnings);
    }
  }

  #[test]
  fn corpus_sampling_checks_only_the_sample() {
    let docs: Vec<Value> = (0..10).map(|_| valid_doc()).collect();
    let report = validate_corpus(&docs, Some(4), &ProfanityList::from_seed());
    assert_eq!(report.total, 10);
    assert_eq!(report.checked, 4);
    assert_eq!(report.valid, 4);
    assert_eq!(report.quality_score, 100.0);
  }
}
