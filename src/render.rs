//! Blanked-text rendering.

use std::collections::HashSet;

use crate::domain::{Token, GAP_MARKER};

/// Emit the exercise text: gapped tokens become a bare `___` (their
/// trailing whitespace is dropped — persisted content depends on this
/// exact shape), every other token is reproduced verbatim including its
/// trailing whitespace.
pub fn render(tokens: &[Token], selected_positions: &HashSet<usize>) -> String {
  let mut out = String::new();
  for token in tokens {
    if selected_positions.contains(&token.position) {
      out.push_str(GAP_MARKER);
    } else {
      out.push_str(&token.text);
      out.push_str(&token.whitespace);
    }
  }
  out
}
