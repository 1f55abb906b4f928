//! Loading engine configuration (options + song bank + lexicon extensions)
//! from TOML.
//!
//! See `EngineConfig` for the expected schema. Everything is optional: the
//! service runs on built-in seeds with no config file at all.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::{error, info};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct EngineConfig {
  #[serde(default)]
  pub engine: EngineOptions,
  #[serde(default)]
  pub songs: Vec<SongCfg>,
  #[serde(default)]
  pub lexicon: LexiconCfg,
}

/// Engine-wide options.
#[derive(Clone, Debug, Deserialize)]
pub struct EngineOptions {
  /// Language code handed to the frequency oracle.
  #[serde(default = "default_language")]
  pub language: String,
  /// When true, a remote tagger failure fails the song+tier instead of
  /// falling back to the built-in tagger.
  #[serde(default)]
  pub require_remote_tagger: bool,
}

impl Default for EngineOptions {
  fn default() -> Self {
    Self { language: default_language(), require_remote_tagger: false }
  }
}

fn default_language() -> String {
  "en".into()
}

/// Song entry accepted in TOML configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct SongCfg {
  #[serde(default)]
  pub id: Option<String>,
  #[serde(default)]
  pub title: Option<String>,
  pub lyrics: String,
}

/// Extensions layered on top of the embedded lexical seed tables.
#[derive(Clone, Debug, Deserialize, Default)]
pub struct LexiconCfg {
  #[serde(default)]
  pub extra_profanity: Vec<String>,
  #[serde(default)]
  pub zipf_overrides: HashMap<String, f64>,
}

/// Attempt to load `EngineConfig` from ENGINE_CONFIG_PATH. On any
/// parsing/IO error, returns None (the service still starts on seeds).
pub fn load_engine_config_from_env() -> Option<EngineConfig> {
  let path = std::env::var("ENGINE_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<EngineConfig>(&s) {
      Ok(cfg) => {
        info!(target: "versegap_backend", %path, songs = cfg.songs.len(), "Loaded engine config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "versegap_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "versegap_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn full_config_parses() {
    let cfg: EngineConfig = toml::from_str(
      r#"
      [engine]
      language = "en"
      require_remote_tagger = true

      [[songs]]
      id = "bank-1"
      title = "From the Bank"
      lyrics = "some lyrics here"

      [[songs]]
      lyrics = "untitled lyrics"

      [lexicon]
      extra_profanity = ["gobbledygook"]

      [lexicon.zipf_overrides]
      vespertine = 2.5
      "#,
    )
    .expect("config should parse");

    assert!(cfg.engine.require_remote_tagger);
    assert_eq!(cfg.songs.len(), 2);
    assert_eq!(cfg.songs[0].id.as_deref(), Some("bank-1"));
    assert!(cfg.songs[1].id.is_none());
    assert_eq!(cfg.lexicon.extra_profanity, vec!["gobbledygook"]);
    assert_eq!(cfg.lexicon.zipf_overrides.get("vespertine"), Some(&2.5));
  }

  #[test]
  fn empty_config_defaults() {
    let cfg: EngineConfig = toml::from_str("").expect("empty config should parse");
    assert_eq!(cfg.engine.language, "en");
    assert!(!cfg.engine.require_remote_tagger);
    assert!(cfg.songs.is_empty());
    assert!(cfg.lexicon.extra_profanity.is_empty());
  }
}
