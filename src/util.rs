//! Small utility helpers used across modules.

use crate::domain::GAP_MARKER;

/// Round to two decimal places. Scores are persisted with 2-decimal
/// precision throughout.
pub fn round2(x: f64) -> f64 {
  (x * 100.0).round() / 100.0
}

/// True if the string is non-empty and purely alphabetic once internal
/// spaces are removed (multi-word proper nouns keep their spaces).
pub fn is_alpha_ignoring_spaces(s: &str) -> bool {
  let mut seen = false;
  for c in s.chars() {
    if c.is_whitespace() {
      continue;
    }
    if !c.is_alphabetic() {
      return false;
    }
    seen = true;
  }
  seen
}

/// Number of gap markers in a blanked text (non-overlapping count).
pub fn count_markers(text: &str) -> usize {
  text.matches(GAP_MARKER).count()
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge request/response payloads.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.chars().count() <= max {
    s.to_string()
  } else {
    let head: String = s.chars().take(max).collect();
    format!("{}… ({} bytes total)", head, s.len())
  }
}
