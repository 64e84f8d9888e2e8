use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("pool_amount must be greater than zero")]
    ZeroPool,
    #[error("beats_per_minute must be positive, got {0}")]
    NonPositiveBpm(f32),
    #[error("song_duration must be positive, got {0}")]
    NonPositiveDuration(f32),
}

/// Construction-time sequencer settings. All fixed for the duration of a
/// run; there is no mid-run reconfiguration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequencerConfig {
    /// Number of reusable note instances, cycled round-robin.
    pub pool_amount: usize,
    /// Max concurrently in-flight notes the active table can track. Sized
    /// independently from the pool; see [`SequencerConfig::validate`].
    pub queue_capacity: usize,
    pub beats_per_minute: f32,
    /// Song length in seconds; playback auto-stops when it runs out.
    pub song_duration: f32,
    /// Units per second along the spawner's forward axis.
    pub note_speed: f32,
    /// Euler angles in degrees, applied uniformly on top of each note's
    /// cut-direction roll.
    pub note_starting_rotation: [f32; 3],
    /// Name fragment identifying the player's saber for hit detection.
    pub saber_tag: String,
    /// Name fragment identifying note blocks for the despawn wall.
    pub note_tag: String,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            pool_amount: 10,
            queue_capacity: 30,
            beats_per_minute: 132.0,
            song_duration: 15.0,
            note_speed: 10.0,
            note_starting_rotation: [0.0, 90.0, 0.0],
            saber_tag: "Saber".to_string(),
            note_tag: "NoteBlock".to_string(),
        }
    }
}

impl SequencerConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Rejects configurations the sequencer cannot run with, and warns about
    /// legal-but-hazardous sizing: a queue smaller than the pool means
    /// overflow before every instance is even in use, and a pool smaller
    /// than the real concurrent demand recycles instances that are still in
    /// flight. Neither hazard is checkable statically beyond this.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pool_amount == 0 {
            return Err(ConfigError::ZeroPool);
        }
        if self.beats_per_minute <= 0.0 {
            return Err(ConfigError::NonPositiveBpm(self.beats_per_minute));
        }
        if self.song_duration <= 0.0 {
            return Err(ConfigError::NonPositiveDuration(self.song_duration));
        }
        if self.queue_capacity == 0 {
            warn!("queue_capacity is 0: every spawn will overflow the active table");
        } else if self.queue_capacity < self.pool_amount {
            warn!(
                "queue_capacity ({}) is smaller than pool_amount ({}); dense sections may overflow",
                self.queue_capacity, self.pool_amount
            );
        }
        Ok(())
    }
}
