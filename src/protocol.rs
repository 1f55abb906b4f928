//! Public request/response DTOs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and clients independently.

use serde::{Deserialize, Serialize};

use crate::batch::TierOutcome;

/// Body of POST /api/v1/generate.
#[derive(Debug, Deserialize)]
pub struct GenerateIn {
    #[serde(rename = "songId")]
    pub song_id: Option<String>,
    pub title: Option<String>,
    pub lyrics: String,
}

/// Per-tier result inside a generate response.
#[derive(Debug, Serialize)]
pub struct TierResultOut {
    pub difficulty: &'static str,
    pub status: &'static str, // "created" | "skipped"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercise_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_difficulty_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateOut {
    #[serde(rename = "songId")]
    pub song_id: String,
    pub results: Vec<TierResultOut>,
}

/// Convert an internal tier outcome to the public DTO.
pub fn tier_to_out(outcome: &TierOutcome) -> TierResultOut {
    match &outcome.result {
        Ok(exercise) => TierResultOut {
            difficulty: outcome.difficulty.as_str(),
            status: "created",
            exercise_id: Some(exercise.exercise_id.clone()),
            gap_count: Some(exercise.gap_count),
            avg_difficulty_score: Some(exercise.avg_difficulty_score),
            detail: None,
        },
        Err(e) => TierResultOut {
            difficulty: outcome.difficulty.as_str(),
            status: "skipped",
            exercise_id: None,
            gap_count: None,
            avg_difficulty_score: None,
            detail: Some(e.to_string()),
        },
    }
}

//
// Query DTOs
//

#[derive(Debug, Deserialize)]
pub struct ExerciseQuery {
    #[serde(rename = "songId")]
    pub song_id: String,
    pub difficulty: String,
}

#[derive(Debug, Deserialize)]
pub struct QualityQuery {
    pub sample: Option<usize>,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[derive(Serialize)]
pub struct ErrorOut {
    pub message: String,
}
