use glam::{EulerRot, Quat, Vec3};
use log::{error, info, warn};

use crate::active::ActiveSlots;
use crate::chart::Chart;
use crate::clock::BeatClock;
use crate::config::{ConfigError, SequencerConfig};
use crate::instance::{InstanceProvider, NoteInstance};
use crate::pool::NotePool;

/// Lateral (z) offsets per lane column, lanes 0..=3.
const LANE_OFFSETS: [f32; 4] = [-1.0, 0.0, 1.0, 2.0];
/// Vertical (y) offsets per layer row, layers 0..=2.
const LAYER_OFFSETS: [f32; 3] = [-1.0, 0.0, 1.0];
/// Roll in degrees per cut direction: down, up, left, right and the four
/// diagonals. Out-of-range enumerants fall back to zero roll.
const CUT_ROLL_DEG: [f32; 8] = [180.0, 0.0, 90.0, 270.0, 135.0, 225.0, 45.0, 315.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SongState {
    Idle,
    Running,
}

/// The per-frame sequencer: advances the beat clock, spawns pool instances
/// for due chart events, and flies live notes toward the player.
///
/// Single-threaded and cooperative; one `tick` runs to completion per frame,
/// and the only other entry points are `start`, `stop`, and `remove_note`
/// (the contact detectors' path, safe to call within the same frame as a
/// tick because it is a pure table-and-visibility mutation).
#[derive(Debug)]
pub struct SpawnScheduler {
    config: SequencerConfig,
    chart: Chart,
    clock: BeatClock,
    next_event_index: usize,
    pool: NotePool,
    active: ActiveSlots,
    origin: Vec3,
    forward: Vec3,
    starting_rotation: [f32; 3],
    remaining_song_time: f32,
    state: SongState,
    overflow_count: u32,
    reuse_count: u32,
}

impl SpawnScheduler {
    /// Builds a scheduler over a successfully parsed chart. The pool is
    /// created here, once, and retained across `start`/`stop` cycles.
    pub fn new(
        config: SequencerConfig,
        chart: Chart,
        provider: &mut dyn InstanceProvider,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let starting_rotation = config.note_starting_rotation;
        let pool = NotePool::new(config.pool_amount, provider, euler_deg(starting_rotation));
        let active = ActiveSlots::new(config.queue_capacity);
        let clock = BeatClock::new(config.beats_per_minute);
        Ok(Self {
            config,
            chart,
            clock,
            next_event_index: 0,
            pool,
            active,
            origin: Vec3::ZERO,
            forward: Vec3::Z,
            starting_rotation,
            remaining_song_time: 0.0,
            state: SongState::Idle,
            overflow_count: 0,
            reuse_count: 0,
        })
    }

    /// Places the spawner in the world. Notes spawn relative to `origin` and
    /// travel along `forward`.
    pub fn set_transform(&mut self, origin: Vec3, forward: Vec3) {
        self.origin = origin;
        self.forward = forward;
    }

    /// Begins playback from the top of the chart. Forces a stop first, so
    /// calling it mid-run restarts cleanly.
    pub fn start(&mut self) {
        self.stop();
        info!("song started");
        self.active.clear();
        self.pool.reset_cursor();
        self.next_event_index = 0;
        self.clock.reset();
        self.remaining_song_time = self.config.song_duration;
        self.overflow_count = 0;
        self.reuse_count = 0;
        self.state = SongState::Running;
    }

    /// Ends playback: hides every in-flight note and clears the active
    /// table. Safe to call from any state, any number of times.
    pub fn stop(&mut self) {
        info!("song stopped");
        self.state = SongState::Idle;
        for id in self.active.iter() {
            if let Some(inst) = self.pool.get_mut(id) {
                inst.visible = false;
            }
        }
        self.active.clear();
    }

    /// One frame of playback; a no-op unless running. Order matches the
    /// frame contract: song timer, beat evaluation + due-event spawning,
    /// then motion for everything in flight.
    pub fn tick(&mut self, dt: f32) {
        if self.state != SongState::Running || self.pool.is_empty() {
            return;
        }

        self.remaining_song_time -= dt;
        if self.remaining_song_time <= 0.0 {
            self.stop();
            return;
        }

        if self.clock.advance(dt) {
            let due = self.clock.drain_due(&self.chart, &mut self.next_event_index);
            for event_index in due {
                self.spawn_note(event_index);
            }
        }

        self.translate_notes(dt);
    }

    /// External removal path, invoked by a contact detector when a note is
    /// reached (or flies out of bounds). Hides the instance and frees its
    /// slot; unknown ids are ignored.
    pub fn remove_note(&mut self, id: usize) {
        if self.active.remove(id) {
            if let Some(inst) = self.pool.get_mut(id) {
                inst.visible = false;
            }
        }
    }

    fn spawn_note(&mut self, event_index: usize) {
        let Some(event) = self.chart.get(event_index).copied() else {
            return;
        };

        let position = self.origin + spawn_offset(event.lane, event.layer);
        let roll = cut_roll_deg(event.cut_direction);
        let rotation = euler_deg([
            self.starting_rotation[0],
            self.starting_rotation[1],
            self.starting_rotation[2] + roll,
        ]);

        let id = self.pool.acquire_next();

        // Round-robin reuse of an instance that is still in flight means the
        // pool is under-provisioned for this chart's density. The stale
        // table entry is retired so the id never occupies two cells.
        if self.active.remove(id) {
            warn!("pool under capacity: instance {id} recycled while still in flight");
            self.reuse_count += 1;
        }

        if let Some(inst) = self.pool.get_mut(id) {
            inst.visible = true;
            inst.position = position;
            inst.rotation = rotation;
        }

        if self.active.insert(id).is_err() {
            // The event was already consumed from the timeline; the
            // instance stays visible where it spawned but is untracked, so
            // it neither moves nor reacts to contacts.
            error!(
                "active table overloaded; slow down the chart or raise queue_capacity \
                 (event {event_index}, instance {id})"
            );
            self.overflow_count += 1;
        }
    }

    fn translate_notes(&mut self, dt: f32) {
        let step = self.forward * self.config.note_speed * dt;
        let Self { active, pool, .. } = self;
        for id in active.iter() {
            if let Some(inst) = pool.get_mut(id) {
                if inst.visible {
                    inst.position += step;
                }
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.state == SongState::Running
    }

    pub fn remaining_song_time(&self) -> f32 {
        self.remaining_song_time
    }

    pub fn accumulated_beats(&self) -> f32 {
        self.clock.accumulated_beats()
    }

    pub fn next_event_index(&self) -> usize {
        self.next_event_index
    }

    /// In-flight note count.
    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn active_contains(&self, id: usize) -> bool {
        self.active.contains(id)
    }

    /// Spawns that could not be tracked because the active table was full.
    pub fn overflow_count(&self) -> u32 {
        self.overflow_count
    }

    /// Spawns that recycled an instance still logically in flight.
    pub fn reuse_count(&self) -> u32 {
        self.reuse_count
    }

    pub fn instance(&self, id: usize) -> Option<&NoteInstance> {
        self.pool.get(id)
    }

    pub fn instances(&self) -> impl Iterator<Item = &NoteInstance> {
        self.pool.iter()
    }

    pub fn config(&self) -> &SequencerConfig {
        &self.config
    }
}

fn spawn_offset(lane: i32, layer: i32) -> Vec3 {
    let z = usize::try_from(lane)
        .ok()
        .and_then(|i| LANE_OFFSETS.get(i).copied())
        .unwrap_or(0.0);
    let y = usize::try_from(layer)
        .ok()
        .and_then(|i| LAYER_OFFSETS.get(i).copied())
        .unwrap_or(0.0);
    Vec3::new(0.0, y, z)
}

fn cut_roll_deg(cut_direction: i32) -> f32 {
    usize::try_from(cut_direction)
        .ok()
        .and_then(|i| CUT_ROLL_DEG.get(i).copied())
        .unwrap_or(0.0)
}

/// Unity-convention Euler degrees (applied Y, then X, then Z) to a quaternion.
fn euler_deg(deg: [f32; 3]) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        deg[1].to_radians(),
        deg[0].to_radians(),
        deg[2].to_radians(),
    )
}
