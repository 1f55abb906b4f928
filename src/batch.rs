//! Batch driver: generation over the whole song bank.
//!
//! Songs are independent, so each one runs on its own tokio task; within a
//! song the three tiers are built and upserted one after another. A failed
//! tier is tallied and skipped — it never aborts the song, let alone the
//! batch.

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, instrument, warn};

use crate::builder::{build, BuildError};
use crate::domain::{Difficulty, Exercise, Song};
use crate::state::AppState;

/// Aggregate counts for one batch run.
#[derive(Clone, Debug, Default, Serialize)]
pub struct BatchSummary {
  pub songs_processed: usize,
  pub exercises_created: usize,
  pub input_too_short: usize,
  pub insufficient_candidates: usize,
  pub collaborator_failures: usize,
}

/// Outcome of one (song, difficulty) pair.
pub struct TierOutcome {
  pub difficulty: Difficulty,
  pub result: Result<Exercise, BuildError>,
}

/// Generate and upsert all three tiers for one song. A song may end up
/// with 0-3 persisted exercises depending on how many tiers succeeded.
#[instrument(level = "info", skip(state, song), fields(song_id = %song.id))]
pub async fn generate_song(state: &AppState, song: &Song) -> Vec<TierOutcome> {
  let mut outcomes: Vec<TierOutcome> = Vec::with_capacity(Difficulty::ALL.len());
  for difficulty in Difficulty::ALL {
    let result = match build(
      &song.id,
      &song.lyrics,
      difficulty,
      &state.tokenizer,
      &state.lexicon,
      &state.profanity,
    )
    .await
    {
      Ok(exercise) => match state.upsert_exercise(&exercise).await {
        Ok(()) => {
          info!(
            target: "exercise",
            song_id = %song.id,
            difficulty = %difficulty.as_str(),
            gap_count = exercise.gap_count,
            avg = exercise.avg_difficulty_score,
            "Exercise created"
          );
          Ok(exercise)
        }
        Err(e) => {
          error!(target: "exercise", song_id = %song.id, difficulty = %difficulty.as_str(), error = %e, "Upsert failed; tier skipped");
          Err(BuildError::Collaborator(e))
        }
      },
      Err(e) => {
        warn!(target: "exercise", song_id = %song.id, difficulty = %difficulty.as_str(), reason = %e, "Tier skipped");
        Err(e)
      }
    };
    outcomes.push(TierOutcome { difficulty, result });
  }
  outcomes
}

/// Run generation for every song currently in the bank and roll the
/// outcomes up into a `BatchSummary`.
#[instrument(level = "info", skip(state))]
pub async fn run_startup_batch(state: Arc<AppState>) -> BatchSummary {
  let songs = state.song_list().await;
  let mut handles = Vec::with_capacity(songs.len());
  for song in songs {
    let worker_state = state.clone();
    handles.push(tokio::spawn(async move {
      generate_song(&worker_state, &song).await
    }));
  }

  let mut summary = BatchSummary::default();
  for handle in handles {
    match handle.await {
      Ok(outcomes) => {
        summary.songs_processed += 1;
        for outcome in outcomes {
          match outcome.result {
            Ok(_) => summary.exercises_created += 1,
            Err(BuildError::InputTooShort { .. }) => summary.input_too_short += 1,
            Err(BuildError::InsufficientCandidates { .. }) => {
              summary.insufficient_candidates += 1
            }
            Err(BuildError::Collaborator(_)) => summary.collaborator_failures += 1,
          }
        }
      }
      Err(e) => {
        error!(target: "versegap_backend", error = %e, "Batch worker panicked");
      }
    }
  }

  info!(
    target: "exercise",
    songs = summary.songs_processed,
    created = summary.exercises_created,
    too_short = summary.input_too_short,
    thin = summary.insufficient_candidates,
    collaborator = summary.collaborator_failures,
    "Batch complete"
  );
  summary
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::SongSource;
  use crate::seeds::seed_songs;

  #[tokio::test]
  async fn seed_bank_batch_populates_the_store() {
    let state = Arc::new(AppState::for_tests());
    for song in seed_songs() {
      state.insert_song(song).await;
    }

    let summary = run_startup_batch(state.clone()).await;
    assert_eq!(summary.songs_processed, 3);
    assert_eq!(summary.exercises_created, 9, "all three tiers of all three seeds");
    assert_eq!(summary.collaborator_failures, 0);
    assert_eq!(state.exercise_snapshot().await.len(), 9);
  }

  #[tokio::test]
  async fn failing_songs_are_isolated() {
    let state = Arc::new(AppState::for_tests());
    state
      .insert_song(Song {
        id: "too-short".into(),
        title: String::new(),
        source: SongSource::Api,
        lyrics: "way too short".into(),
      })
      .await;
    state.insert_song(seed_songs().remove(0)).await;

    let summary = run_startup_batch(state.clone()).await;
    assert_eq!(summary.songs_processed, 2);
    assert_eq!(summary.input_too_short, 3, "every tier of the short song");
    assert_eq!(summary.exercises_created, 3, "the healthy song still generates");
    assert!(state.get_exercise("too-short", Difficulty::Easy).await.is_none());
  }
}
