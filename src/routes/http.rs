//! HTTP endpoint handlers. These are thin wrappers that forward to the
//! engine; each handler is instrumented and logs parameters plus basic
//! result info.

use std::sync::Arc;

use axum::{
  extract::{Query, State},
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::batch::generate_song;
use crate::domain::{Difficulty, Song, SongSource};
use crate::protocol::*;
use crate::state::AppState;
use crate::validate::validate_corpus;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
  Json(HealthOut { ok: true })
}

#[instrument(level = "info", skip(state, body), fields(lyrics_len = body.lyrics.len()))]
pub async fn http_post_generate(
  State(state): State<Arc<AppState>>,
  Json(body): Json<GenerateIn>,
) -> impl IntoResponse {
  let song_id = body.song_id.clone().unwrap_or_else(|| Uuid::new_v4().to_string());
  let song = Song {
    id: song_id.clone(),
    title: body.title.clone().unwrap_or_default(),
    source: SongSource::Api,
    lyrics: body.lyrics,
  };
  state.insert_song(song.clone()).await;

  let outcomes = generate_song(&state, &song).await;
  let created = outcomes.iter().filter(|o| o.result.is_ok()).count();
  info!(target: "exercise", %song_id, created, "HTTP generate served");

  Json(GenerateOut {
    song_id,
    results: outcomes.iter().map(tier_to_out).collect(),
  })
}

#[instrument(level = "info", skip(state), fields(song_id = %q.song_id, difficulty = %q.difficulty))]
pub async fn http_get_exercise(
  State(state): State<Arc<AppState>>,
  Query(q): Query<ExerciseQuery>,
) -> Response {
  let difficulty = match Difficulty::parse(&q.difficulty) {
    Some(d) => d,
    None => {
      return (
        StatusCode::BAD_REQUEST,
        Json(ErrorOut { message: format!("Unknown difficulty: {}", q.difficulty) }),
      )
        .into_response();
    }
  };

  match state.get_exercise(&q.song_id, difficulty).await {
    Some(doc) => {
      info!(target: "exercise", song_id = %q.song_id, difficulty = %difficulty.as_str(), "HTTP exercise served");
      Json(doc).into_response()
    }
    None => (
      StatusCode::NOT_FOUND,
      Json(ErrorOut { message: "No exercise for that song and difficulty.".into() }),
    )
      .into_response(),
  }
}

#[instrument(level = "info", skip(state), fields(sample = ?q.sample))]
pub async fn http_get_quality_report(
  State(state): State<Arc<AppState>>,
  Query(q): Query<QualityQuery>,
) -> impl IntoResponse {
  let docs = state.exercise_snapshot().await;
  let report = validate_corpus(&docs, q.sample, &state.profanity);
  info!(
    target: "exercise",
    checked = report.checked,
    valid = report.valid,
    quality_score = report.quality_score,
    "HTTP quality report served"
  );
  Json(report)
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_batch_summary(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(state.batch_summary().await.unwrap_or_default())
}
