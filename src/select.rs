//! Gap selection: a bounded, evenly-distributed subset of the candidates.

use std::cmp::Ordering;

use tracing::debug;

use crate::domain::{Candidate, PosTag};

/// Choose which candidates become blanks.
///
/// Ranking decides *pick order* only, never the output order:
/// proper-noun-preferring tiers rank proper nouns first and then easiest
/// first; other tiers rank hardest first. Picks walk ideal positions spaced
/// evenly across the token stream and take the not-yet-picked ranked
/// candidate closest to each (ties go to the earlier ranked candidate).
/// The output is sorted by ascending source position.
///
/// Degenerate case: fewer candidates than `min_gaps` returns them all
/// unchanged; the caller treats that as generation failure.
pub fn select(
  candidates: &[Candidate],
  total_token_count: usize,
  min_gaps: usize,
  max_gaps: usize,
  prefer_proper_nouns: bool,
) -> Vec<Candidate> {
  if candidates.len() < min_gaps {
    return candidates.to_vec();
  }

  let mut ranked: Vec<&Candidate> = candidates.iter().collect();
  if prefer_proper_nouns {
    // proper nouns first, then easiest-first among the rest
    ranked.sort_by(|a, b| {
      let a_not_proper = a.pos_tag != PosTag::Propn;
      let b_not_proper = b.pos_tag != PosTag::Propn;
      a_not_proper
        .cmp(&b_not_proper)
        .then(a.difficulty.partial_cmp(&b.difficulty).unwrap_or(Ordering::Equal))
    });
  } else {
    // hardest first
    ranked.sort_by(|a, b| b.difficulty.partial_cmp(&a.difficulty).unwrap_or(Ordering::Equal));
  }

  let num_gaps = max_gaps.min(candidates.len());
  let spacing = total_token_count as f64 / (num_gaps as f64 + 1.0);

  let mut picked = vec![false; ranked.len()];
  let mut selected: Vec<&Candidate> = Vec::with_capacity(num_gaps);

  for gap_num in 0..num_gaps {
    let ideal_position = (gap_num as f64 + 1.0) * spacing;
    let mut best_idx: Option<usize> = None;
    let mut best_dist = f64::INFINITY;
    for (idx, candidate) in ranked.iter().enumerate() {
      if picked[idx] {
        continue;
      }
      let dist = (candidate.position as f64 - ideal_position).abs();
      if dist < best_dist {
        best_dist = dist;
        best_idx = Some(idx);
      }
    }
    if let Some(idx) = best_idx {
      picked[idx] = true;
      selected.push(ranked[idx]);
    }
  }

  // Top up to the floor in ranked order (proximity no longer matters).
  if selected.len() < min_gaps {
    for (idx, candidate) in ranked.iter().enumerate() {
      if selected.len() >= min_gaps {
        break;
      }
      if !picked[idx] {
        picked[idx] = true;
        selected.push(candidate);
      }
    }
  }

  let mut chosen: Vec<Candidate> = selected.into_iter().cloned().collect();
  chosen.sort_by_key(|c| c.position);
  // Callers guarantee min_gaps <= max_gaps; the truncation only bites on
  // misconfigured bounds where the top-up overshot.
  chosen.truncate(max_gaps);

  debug!(
    target: "exercise",
    candidates = candidates.len(),
    selected = chosen.len(),
    total_token_count,
    "Gap selection complete"
  );
  chosen
}
