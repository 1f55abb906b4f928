//! Built-in rule-based tokenizer and part-of-speech tagger for English
//! lyrics.
//!
//! This is the local fallback collaborator behind the `Tokenizer`
//! capability: whitespace tokenization that preserves each token's trailing
//! whitespace (the renderer reconstructs formatting from it), punctuation
//! split into its own tokens, closed-class word tables plus suffix
//! heuristics for tagging, and a crude suffix-stripping lemmatizer.
//! Deliberately deterministic; a remote tagger can replace it wholesale.

use crate::domain::{PosTag, Token};

const DETERMINERS: &[&str] = &[
  "the", "a", "an", "this", "that", "these", "those", "every", "each",
  "some", "any", "no", "another", "all", "both",
];

const PRONOUNS: &[&str] = &[
  "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us",
  "them", "my", "your", "his", "its", "our", "their", "mine", "yours",
  "myself", "yourself", "who", "whom", "whose", "what", "which",
  "somebody", "someone", "something", "nobody", "nothing", "everyone",
  "everybody", "everything", "anyone", "anything",
];

const PREPOSITIONS: &[&str] = &[
  "in", "on", "at", "by", "for", "with", "about", "against", "between",
  "into", "through", "during", "before", "after", "above", "below",
  "from", "out", "off", "over", "under", "of", "near", "onto", "upon",
  "without", "within", "around", "down", "up",
];

const CONJUNCTIONS: &[&str] = &[
  "and", "but", "or", "nor", "so", "yet", "because", "although", "while",
  "when", "where", "if", "than", "though", "until", "unless", "since", "as",
];

const PARTICLES: &[&str] = &["to", "not"];

const COMMON_VERBS: &[&str] = &[
  "is", "am", "are", "was", "were", "be", "been", "being", "have", "has",
  "had", "do", "does", "did", "will", "would", "can", "could", "shall",
  "should", "may", "might", "must", "go", "goes", "went", "gone", "come",
  "came", "get", "got", "know", "knew", "say", "said", "see", "saw",
  "make", "made", "take", "took", "run", "ran", "fall", "fell", "feel",
  "felt", "keep", "kept", "let", "tell", "told", "think", "thought",
  "give", "gave", "find", "found", "leave", "left", "bring", "brought",
  "sing", "sang", "hear", "heard", "hold", "held", "wait", "stay", "live",
  "die", "cry", "try", "need", "want", "call", "turn",
];

const COMMON_ADVERBS: &[&str] = &[
  "now", "then", "here", "there", "never", "always", "again", "still",
  "just", "too", "very", "only", "even", "away", "back", "soon", "once",
  "maybe", "really", "forever", "somewhere", "anywhere", "everywhere",
];

const COMMON_ADJECTIVES: &[&str] = &[
  "good", "bad", "old", "new", "young", "long", "little", "own", "other",
  "great", "high", "small", "large", "big", "black", "white", "red",
  "blue", "green", "golden", "silver", "cold", "warm", "hot", "dark",
  "bright", "sweet", "true", "free", "wild", "lonely", "happy", "sad",
  "beautiful", "broken", "empty", "deep", "soft", "hard", "slow", "fast",
  "strong", "weak", "alone", "hollow", "tired", "lost", "bare", "pale",
  "wide", "tall", "dry", "same", "simple", "last", "few",
];

/// Tokenize raw lyrics into tagged tokens.
pub fn tokenize(text: &str) -> Vec<Token> {
  // Pass 1: non-whitespace runs, each carrying its trailing whitespace.
  let mut runs: Vec<(String, String)> = Vec::new();
  let mut word = String::new();
  let mut ws = String::new();
  for ch in text.trim_start().chars() {
    if ch.is_whitespace() {
      ws.push(ch);
    } else {
      if !ws.is_empty() {
        runs.push((std::mem::take(&mut word), std::mem::take(&mut ws)));
      }
      word.push(ch);
    }
  }
  if !word.is_empty() || !ws.is_empty() {
    runs.push((word, ws));
  }

  // Pass 2: split leading/trailing punctuation into its own tokens and tag.
  // `line_initial` tracks whether the next alphabetic token opens a line,
  // which suppresses the capitalization cue for proper nouns.
  let mut tokens: Vec<Token> = Vec::new();
  let mut line_initial = true;
  for (run, ws) in runs {
    let pieces = split_punctuation(&run);
    let count = pieces.len();
    let run_ends_line = ws.contains('\n');
    for (j, piece) in pieces.into_iter().enumerate() {
      let last_piece = j + 1 == count;
      let is_alpha = !piece.is_empty() && piece.chars().all(|c| c.is_alphabetic());
      let pos_tag = tag_piece(&piece, is_alpha, line_initial);
      let lemma = lemmatize(&piece, pos_tag);
      if is_alpha {
        line_initial = false;
      }
      tokens.push(Token {
        position: tokens.len(),
        text: piece,
        whitespace: if last_piece { ws.clone() } else { String::new() },
        is_alpha,
        pos_tag,
        lemma,
        ends_line: last_piece && run_ends_line,
      });
    }
    if run_ends_line {
      line_initial = true;
    }
  }
  tokens
}

/// Splits "(night)," into ["(", "night", ")", ","]; inner apostrophes and
/// hyphens stay attached, so "don't" survives as one (non-alpha) token.
fn split_punctuation(run: &str) -> Vec<String> {
  let chars: Vec<char> = run.chars().collect();
  let mut start = 0;
  let mut end = chars.len();
  while start < end && !chars[start].is_alphanumeric() {
    start += 1;
  }
  while end > start && !chars[end - 1].is_alphanumeric() {
    end -= 1;
  }

  let mut pieces: Vec<String> = Vec::new();
  for c in &chars[..start] {
    pieces.push(c.to_string());
  }
  if start < end {
    pieces.push(chars[start..end].iter().collect());
  }
  for c in &chars[end..] {
    pieces.push(c.to_string());
  }
  pieces
}

fn tag_piece(piece: &str, is_alpha: bool, line_initial: bool) -> PosTag {
  if piece.chars().all(|c| !c.is_alphanumeric()) {
    return PosTag::Punct;
  }
  if piece.chars().any(|c| c.is_ascii_digit()) {
    return PosTag::Num;
  }

  let lower = piece.to_lowercase();
  let l = lower.as_str();
  if DETERMINERS.contains(&l) {
    return PosTag::Det;
  }
  if PRONOUNS.contains(&l) {
    return PosTag::Pron;
  }
  if PARTICLES.contains(&l) {
    return PosTag::Part;
  }
  if PREPOSITIONS.contains(&l) {
    return PosTag::Adp;
  }
  if CONJUNCTIONS.contains(&l) {
    return PosTag::Conj;
  }
  if COMMON_VERBS.contains(&l) {
    return PosTag::Verb;
  }
  if COMMON_ADVERBS.contains(&l) {
    return PosTag::Adv;
  }
  if COMMON_ADJECTIVES.contains(&l) {
    return PosTag::Adj;
  }

  // Capitalization away from a line start is the proper-noun cue.
  if is_alpha
    && !line_initial
    && piece.chars().next().map(|c| c.is_uppercase()).unwrap_or(false)
  {
    return PosTag::Propn;
  }

  if l.ends_with("ly") && l.len() > 4 {
    return PosTag::Adv;
  }
  if (l.ends_with("ing") || l.ends_with("ed")) && l.len() > 4 {
    return PosTag::Verb;
  }
  if l.ends_with("tion") || l.ends_with("ness") || l.ends_with("ment") || l.ends_with("ship") {
    return PosTag::Noun;
  }
  if l.ends_with("ful") || l.ends_with("ous") || l.ends_with("ive") || l.ends_with("less")
    || l.ends_with("able")
  {
    return PosTag::Adj;
  }

  PosTag::Noun
}

/// Very small suffix-stripping lemmatizer. Only open-class words get
/// stripped; everything else just lowercases.
fn lemmatize(piece: &str, pos: PosTag) -> String {
  let lower = piece.to_lowercase();
  if !matches!(pos, PosTag::Noun | PosTag::Verb | PosTag::Adj | PosTag::Propn) {
    return lower;
  }
  if lower.ends_with("ies") && lower.len() > 4 {
    return format!("{}y", &lower[..lower.len() - 3]);
  }
  if lower.ends_with("ing") && lower.len() > 5 {
    return lower[..lower.len() - 3].to_string();
  }
  if lower.ends_with("ed") && lower.len() > 4 {
    return lower[..lower.len() - 2].to_string();
  }
  if lower.ends_with('s') && !lower.ends_with("ss") && lower.len() > 3 {
    return lower[..lower.len() - 1].to_string();
  }
  lower
}
