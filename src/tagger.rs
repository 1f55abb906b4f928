//! Tokenizer/POS-tagger capability: an optional remote tagging service with
//! the built-in rule-based tagger as fallback.
//!
//! The remote service speaks a small JSON protocol:
//!   POST {TAGGER_URL}/tokenize   body {"text": "...", "lang": "en"}
//!   ->   {"tokens": [{"text", "whitespace", "is_alpha", "pos", "lemma",
//!         "ends_line"}, ...]}
//!
//! Calls are instrumented and log latency and token counts, never lyric
//! contents. The API key is never logged.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::domain::{PosTag, Token};
use crate::util::trunc_for_log;

#[derive(Clone)]
pub struct RemoteTagger {
  pub client: reqwest::Client,
  pub base_url: String,
  api_key: Option<String>,
}

#[derive(Serialize)]
struct TagRequest<'a> {
  text: &'a str,
  lang: &'a str,
}

#[derive(Deserialize)]
struct WireToken {
  text: String,
  #[serde(default)]
  whitespace: String,
  is_alpha: bool,
  pos: String,
  #[serde(default)]
  lemma: String,
  #[serde(default)]
  ends_line: bool,
}

#[derive(Deserialize)]
struct WireTokenized {
  tokens: Vec<WireToken>,
}

impl RemoteTagger {
  /// Construct the client if we find TAGGER_URL; otherwise return None.
  pub fn from_env() -> Option<Self> {
    let base_url = std::env::var("TAGGER_URL").ok()?;
    let api_key = std::env::var("TAGGER_API_KEY").ok();

    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(20))
      .build()
      .ok()?;

    Some(Self { client, base_url, api_key })
  }

  #[instrument(level = "info", skip(self, text), fields(text_len = text.len()))]
  pub async fn tokenize(&self, text: &str) -> Result<Vec<Token>, String> {
    let url = format!("{}/tokenize", self.base_url.trim_end_matches('/'));
    let mut req = self.client.post(&url)
      .header(USER_AGENT, "versegap-backend/0.1")
      .header(CONTENT_TYPE, "application/json");
    if let Some(key) = &self.api_key {
      req = req.header(AUTHORIZATION, format!("Bearer {}", key));
    }

    let start = std::time::Instant::now();
    let res = req
      .json(&TagRequest { text, lang: "en" })
      .send().await.map_err(|e| e.to_string())?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      return Err(format!("tagger HTTP {}: {}", status, trunc_for_log(&body, 200)));
    }

    let body: WireTokenized = res.json().await.map_err(|e| e.to_string())?;
    let elapsed = start.elapsed();
    info!(?elapsed, tokens = body.tokens.len(), "Remote tagger response received");

    // Positions are assigned locally; the wire order is authoritative.
    Ok(
      body.tokens
        .into_iter()
        .enumerate()
        .map(|(i, t)| Token {
          position: i,
          is_alpha: t.is_alpha,
          pos_tag: PosTag::parse(&t.pos),
          lemma: if t.lemma.is_empty() { t.text.to_lowercase() } else { t.lemma },
          text: t.text,
          whitespace: t.whitespace,
          ends_line: t.ends_line,
        })
        .collect(),
    )
  }
}

/// The tokenizer capability injected into the engine: remote service first
/// when configured, built-in tagger otherwise.
#[derive(Clone)]
pub struct Tokenizer {
  remote: Option<RemoteTagger>,
  require_remote: bool,
}

impl Tokenizer {
  pub fn from_env(require_remote: bool) -> Self {
    let remote = RemoteTagger::from_env();
    match &remote {
      Some(rt) => {
        info!(target: "versegap_backend", base_url = %rt.base_url, require_remote, "Remote tagger enabled.")
      }
      None => {
        info!(target: "versegap_backend", "Remote tagger disabled (no TAGGER_URL). Using built-in tagger.")
      }
    }
    Self { remote, require_remote }
  }

  /// Built-in tagger only, no env lookup.
  #[allow(dead_code)]
  pub fn local() -> Self {
    Self { remote: None, require_remote: false }
  }

  /// Tokenize raw lyrics. A remote failure falls back to the built-in
  /// tagger unless strict mode was configured, in which case the failure
  /// propagates and the caller skips this song+tier.
  pub async fn tokenize(&self, text: &str) -> Result<Vec<Token>, String> {
    if let Some(rt) = &self.remote {
      match rt.tokenize(text).await {
        Ok(tokens) => return Ok(tokens),
        Err(e) if self.require_remote => {
          return Err(format!("remote tagger unavailable: {}", e));
        }
        Err(e) => {
          error!(target: "versegap_backend", error = %e, "Remote tagger failed; using built-in tagger.");
        }
      }
    }
    Ok(crate::tokenize::tokenize(text))
  }
}
