//! Application state: the song bank, the exercise document store, the
//! batch summary, and the injected collaborator capabilities.
//!
//! This module owns:
//!   - the song bank (TOML bank + built-in seeds + API submissions)
//!   - the persisted-exercise store, keyed by (song_id, difficulty)
//!   - the frequency lexicon and profanity list (read-only after init)
//!   - the tokenizer capability (remote tagger with built-in fallback)
//!
//! Exercises persist as JSON documents so the Quality Validator re-reads
//! exactly what was written, not the in-memory builder types.

use std::{collections::HashMap, sync::Arc};

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::batch::BatchSummary;
use crate::config::load_engine_config_from_env;
use crate::domain::{Difficulty, Exercise, Song, SongSource};
use crate::lexicon::{FrequencyLexicon, ProfanityList};
use crate::seeds::seed_songs;
use crate::tagger::Tokenizer;

#[derive(Clone)]
pub struct AppState {
    pub songs: Arc<RwLock<HashMap<String, Song>>>,
    pub exercises: Arc<RwLock<HashMap<(String, Difficulty), Value>>>,
    pub batch: Arc<RwLock<Option<BatchSummary>>>,
    pub tokenizer: Tokenizer,
    pub lexicon: FrequencyLexicon,
    pub profanity: ProfanityList,
}

impl AppState {
    /// Build state from env: load config, merge the song bank with seeds,
    /// build the lexical capabilities, init the tokenizer.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let cfg_opt = load_engine_config_from_env();
        let options = cfg_opt.as_ref().map(|c| c.engine.clone()).unwrap_or_default();

        let mut song_map = HashMap::<String, Song>::new();

        // Insert config-bank songs (if any) first.
        if let Some(cfg) = &cfg_opt {
            for sc in &cfg.songs {
                let id = sc.id.clone().unwrap_or_else(|| Uuid::new_v4().to_string());
                let lyrics = sc.lyrics.trim();
                if lyrics.is_empty() {
                    error!(target: "exercise", %id, "Skipping bank song: missing lyrics.");
                    continue;
                }
                song_map.insert(
                    id.clone(),
                    Song {
                        id,
                        title: sc.title.clone().unwrap_or_default(),
                        source: SongSource::LocalBank,
                        lyrics: lyrics.to_string(),
                    },
                );
            }
        }

        // Always insert built-in seeds, but don't overwrite existing ids.
        for song in seed_songs() {
            song_map.entry(song.id.clone()).or_insert(song);
        }

        // Inventory summary by source.
        let mut bank = 0usize;
        let mut seeded = 0usize;
        for song in song_map.values() {
            match song.source {
                SongSource::LocalBank => bank += 1,
                SongSource::Seed => seeded += 1,
                SongSource::Api => {}
            }
        }
        info!(target: "exercise", local_bank = bank, seed = seeded, "Startup song inventory");

        let lexicon_cfg = cfg_opt.as_ref().map(|c| c.lexicon.clone()).unwrap_or_default();
        let lexicon = FrequencyLexicon::with_overrides(&options.language, &lexicon_cfg.zipf_overrides);
        let mut profanity = ProfanityList::from_seed();
        profanity.extend(&lexicon_cfg.extra_profanity);

        let tokenizer = Tokenizer::from_env(options.require_remote_tagger);

        Self {
            songs: Arc::new(RwLock::new(song_map)),
            exercises: Arc::new(RwLock::new(HashMap::new())),
            batch: Arc::new(RwLock::new(None)),
            tokenizer,
            lexicon,
            profanity,
        }
    }

    /// Idempotent whole-document upsert keyed by (song_id, difficulty).
    /// Re-generation replaces the prior document wholesale; there is no
    /// partial update path.
    #[instrument(level = "debug", skip(self, exercise), fields(song_id = %exercise.song_id, difficulty = %exercise.difficulty.as_str()))]
    pub async fn upsert_exercise(&self, exercise: &Exercise) -> Result<(), String> {
        let doc = serde_json::to_value(exercise).map_err(|e| format!("serialize exercise: {}", e))?;
        let mut exercises = self.exercises.write().await;
        exercises.insert((exercise.song_id.clone(), exercise.difficulty), doc);
        Ok(())
    }

    /// Point lookup of a persisted exercise document.
    #[instrument(level = "debug", skip(self), fields(%song_id, difficulty = %difficulty.as_str()))]
    pub async fn get_exercise(&self, song_id: &str, difficulty: Difficulty) -> Option<Value> {
        let exercises = self.exercises.read().await;
        exercises.get(&(song_id.to_string(), difficulty)).cloned()
    }

    /// Snapshot of every persisted document, for the validator. The
    /// validator may observe a partially-populated corpus mid-batch; it
    /// reports on what exists at read time.
    pub async fn exercise_snapshot(&self) -> Vec<Value> {
        self.exercises.read().await.values().cloned().collect()
    }

    pub async fn insert_song(&self, song: Song) {
        self.songs.write().await.insert(song.id.clone(), song);
    }

    pub async fn song_list(&self) -> Vec<Song> {
        self.songs.read().await.values().cloned().collect()
    }

    pub async fn set_batch_summary(&self, summary: BatchSummary) {
        *self.batch.write().await = Some(summary);
    }

    pub async fn batch_summary(&self) -> Option<BatchSummary> {
        self.batch.read().await.clone()
    }

    /// State with empty stores and local-only collaborators; tests inject
    /// songs explicitly.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            songs: Arc::new(RwLock::new(HashMap::new())),
            exercises: Arc::new(RwLock::new(HashMap::new())),
            batch: Arc::new(RwLock::new(None)),
            tokenizer: Tokenizer::local(),
            lexicon: FrequencyLexicon::from_seed("en"),
            profanity: ProfanityList::from_seed(),
        }
    }
}
