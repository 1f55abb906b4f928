//! Seed data and small utilities related to default content.
//!
//! Three kinds of seeds ship with the binary:
//! - a handful of songs so the engine has work to do without any config,
//! - the embedded word-frequency table backing the Zipf oracle,
//! - the base profanity list.

use crate::domain::{Song, SongSource};

/// Minimal set of built-in songs that guarantee the service produces
/// exercises even without external config.
pub fn seed_songs() -> Vec<Song> {
  vec![
    Song {
      id: "seed-river-road".into(),
      title: "River Road".into(),
      source: SongSource::Seed,
      lyrics: "\
Down by the river where the water runs slow
I follow the road that my father would go
The morning is golden, the sky is still pale
And every small story becomes an old tale

I carry a lantern, I carry a name
The city behind me will never be the same
The night brings a song and the song brings a light
And I keep on walking away from the night

Oh the river keeps rolling, the mountain stands tall
The summer is calling, I remember it all
My heart is a window, my dream is a door
And I will be singing forever and more
"
      .into(),
    },
    Song {
      id: "seed-caroline".into(),
      title: "Letters to Caroline".into(),
      source: SongSource::Seed,
      lyrics: "\
I wrote a letter to Caroline last night
I told her the city was burning with light
We danced in the kitchen while the radio played
And the songs of Havana were the promises we made

The train leaves for Georgia at a quarter past nine
I count every station, I stand in the line
The winter is coming and the garden is bare
But I keep a picture of Caroline there

So carry me home where the tall grasses grow
Through the fields of Montana and the silver of snow
If the river runs dry and the mountain turns cold
I will sing about Caroline until I grow old
"
      .into(),
    },
    Song {
      id: "seed-small-hours".into(),
      title: "Small Hours".into(),
      source: SongSource::Seed,
      lyrics: "\
The clock on the wall keeps talking to me
The moon at the window is wide as the sea
I pour out the coffee, I sit in my chair
And the smoke of the evening goes curling somewhere

The radio whispers a tune that I know
I learned it in winter a long time ago
The words are so simple, the melody true
The small hours are empty without you
"
      .into(),
    },
  ]
}

/// Embedded Zipf commonness table (0-8 scale, higher = more common) for the
/// English frequency oracle. Hand-curated around everyday and lyric
/// vocabulary; anything absent scores 0 and is treated as hardest.
pub fn seed_zipf_table() -> &'static [(&'static str, f64)] {
  ZIPF_SEED
}

const ZIPF_SEED: &[(&str, f64)] = &[
  // function words
  ("the", 7.73), ("and", 7.57), ("you", 7.26), ("that", 7.1), ("for", 7.06),
  ("with", 6.9), ("this", 6.8), ("from", 6.67), ("they", 6.6), ("will", 6.76),
  ("would", 6.55), ("there", 6.58), ("their", 6.45), ("what", 6.71), ("about", 6.52),
  ("which", 6.45), ("when", 6.6), ("where", 6.2), ("while", 5.9), ("until", 5.6),
  ("every", 6.0), ("never", 6.1), ("always", 5.9), ("again", 6.0), ("still", 6.2),
  ("away", 5.9), ("behind", 5.5), ("through", 6.2), ("without", 5.9),
  // common verbs
  ("have", 6.83), ("know", 6.7), ("make", 6.5), ("take", 6.4), ("come", 6.4),
  ("keep", 6.0), ("carry", 5.2), ("follow", 5.4), ("remember", 5.6), ("stand", 5.5),
  ("bring", 5.7), ("sing", 4.9), ("dance", 5.0), ("grow", 5.4), ("turn", 5.9),
  ("count", 5.4), ("wrote", 5.1), ("told", 5.9), ("played", 5.5), ("made", 6.3),
  ("runs", 5.0), ("stands", 4.8), ("becomes", 5.2), ("keeps", 5.0), ("brings", 4.9),
  ("goes", 5.7), ("leaves", 4.9), ("turns", 4.9), ("sit", 5.3), ("pour", 4.4),
  ("walking", 5.1), ("rolling", 4.5), ("calling", 4.7), ("singing", 4.6),
  ("burning", 4.7), ("waiting", 5.3), ("coming", 5.7), ("talking", 5.3),
  ("curling", 3.6), ("learned", 5.2), ("danced", 4.3), ("whisper", 4.1),
  ("whispers", 4.0), ("grew", 4.8),
  // everyday nouns
  ("time", 7.2), ("day", 7.0), ("year", 6.8), ("way", 6.8), ("man", 6.6),
  ("world", 6.4), ("life", 6.5), ("hand", 6.2), ("eye", 5.9), ("eyes", 6.0),
  ("name", 6.2), ("home", 6.3), ("night", 6.1), ("light", 6.0), ("water", 6.0),
  ("word", 6.2), ("words", 6.0), ("city", 5.9), ("heart", 5.8), ("story", 5.8),
  ("line", 5.8), ("door", 5.7), ("hours", 5.6), ("hour", 5.7), ("morning", 5.6),
  ("summer", 5.6), ("picture", 5.6), ("road", 5.5), ("fire", 5.6), ("air", 5.8),
  ("sea", 5.4), ("rain", 5.4), ("train", 5.4), ("song", 5.4), ("songs", 5.3),
  ("dream", 5.4), ("dreams", 5.3), ("coffee", 5.4), ("wall", 5.3), ("letter", 5.3),
  ("winter", 5.3), ("snow", 5.3), ("river", 5.3), ("window", 5.3), ("sky", 5.2),
  ("evening", 5.2), ("station", 5.2), ("fields", 5.2), ("field", 5.5), ("map", 5.2),
  ("radio", 5.2), ("moon", 5.1), ("garden", 5.1), ("kitchen", 5.1), ("mountain", 5.0),
  ("quarter", 5.0), ("ticket", 4.9), ("pocket", 4.9), ("chair", 4.9), ("silver", 4.9),
  ("smoke", 4.8), ("clock", 4.6), ("tune", 4.5), ("promises", 4.5), ("promise", 4.8),
  ("tale", 4.4), ("melody", 4.2), ("lantern", 3.4), ("father", 5.9), ("mother", 5.9),
  ("friend", 5.8), ("money", 6.0), ("music", 5.8), ("people", 6.6), ("place", 6.2),
  ("street", 5.6), ("town", 5.6), ("tree", 5.3), ("bird", 5.1), ("stone", 5.1),
  ("wind", 5.2), ("star", 5.3), ("stars", 5.3), ("ocean", 5.0), ("shadow", 4.9),
  ("grass", 4.9), ("valley", 4.7), ("thunder", 4.4), ("ashes", 4.0), ("ember", 3.2),
  // adjectives
  ("good", 6.5), ("new", 6.6), ("old", 6.3), ("long", 6.3), ("small", 5.9),
  ("little", 6.2), ("great", 6.2), ("young", 5.8), ("true", 5.9), ("free", 5.9),
  ("cold", 5.5), ("warm", 5.2), ("dark", 5.4), ("bright", 5.0), ("sweet", 5.2),
  ("wide", 5.3), ("deep", 5.4), ("slow", 5.2), ("tall", 4.9), ("pale", 4.4),
  ("golden", 4.6), ("simple", 5.5), ("empty", 5.0), ("lonely", 4.5), ("broken", 5.0),
  ("silent", 4.7), ("hollow", 4.2), ("bare", 4.5), ("dry", 5.0), ("wild", 5.1),
  ("happy", 5.7), ("same", 6.3),
];

/// Base profanity list for the gap-word content filter. Extended (never
/// replaced) by `[lexicon] extra_profanity` in the TOML config.
pub fn seed_profanity_words() -> &'static [&'static str] {
  PROFANITY_SEED
}

const PROFANITY_SEED: &[&str] = &[
  "arse", "ass", "asshole", "bastard", "bitch", "bollocks", "bugger",
  "crap", "damn", "dick", "dickhead", "douche", "fuck", "fucker",
  "fucking", "goddamn", "jackass", "piss", "pissed", "prick", "shit",
  "shitty", "slut", "twat", "wanker", "whore",
];

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn seed_songs_are_long_enough_to_generate() {
    for song in seed_songs() {
      assert!(
        song.lyrics.chars().count() >= 100,
        "seed song {} is below the generation floor",
        song.id
      );
      assert_eq!(song.source, SongSource::Seed);
    }
  }

  #[test]
  fn zipf_seed_values_stay_on_scale() {
    for (word, zipf) in seed_zipf_table() {
      assert!((0.0..=8.0).contains(zipf), "{word} has off-scale zipf {zipf}");
      assert_eq!(*word, word.to_lowercase(), "{word} must be stored lowercase");
    }
  }
}
