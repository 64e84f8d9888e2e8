//! Beat-synchronized note sequencer for rhythm games.
//!
//! Parses a textual note chart into a typed timeline, converts wall-clock
//! time into due chart events through a whole-second beat accumulator, and
//! recycles a fixed pool of visual note instances while a bounded active
//! table tracks which ones are in flight. Designed to be embedded in a host
//! game loop: the host drives [`spawn::SpawnScheduler::tick`] once per frame
//! and reports contacts through the detectors in [`contact`].

pub mod active;
pub mod chart;
pub mod clock;
pub mod config;
pub mod contact;
pub mod instance;
pub mod pool;
pub mod spawn;

pub use active::{ActiveSlots, RegistryFull};
pub use chart::{Chart, ChartError, NoteEvent, parse_chart};
pub use clock::BeatClock;
pub use config::{ConfigError, SequencerConfig};
pub use contact::{DespawnWall, HitDetector};
pub use instance::{BlockProvider, InstanceProvider, NoteInstance};
pub use pool::NotePool;
pub use spawn::SpawnScheduler;
