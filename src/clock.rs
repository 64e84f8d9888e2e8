use smallvec::SmallVec;

use crate::chart::Chart;

/// Beat accumulator with two nested cadences: real time is collected every
/// tick, but beat progress is only evaluated once a whole second has elapsed.
/// Each evaluation credits `bpm / 60` beats, so the due-event test runs at
/// most once per second while staying exact; a hitched frame still yields a
/// single evaluation whose drain catches up on every overdue event at once.
#[derive(Debug, Clone)]
pub struct BeatClock {
    beats_per_minute: f32,
    elapsed_sub_second: f32,
    accumulated_beats: f32,
}

impl BeatClock {
    pub fn new(beats_per_minute: f32) -> Self {
        Self {
            beats_per_minute,
            elapsed_sub_second: 0.0,
            accumulated_beats: 0.0,
        }
    }

    /// Accumulates `dt` seconds. Returns true when a whole second was
    /// consumed and beat progress advanced; the fractional remainder is kept
    /// for the next tick.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.elapsed_sub_second += dt;
        if self.elapsed_sub_second < 1.0 {
            return false;
        }
        self.elapsed_sub_second %= 1.0;
        self.accumulated_beats += self.beats_per_minute / 60.0;
        true
    }

    #[inline(always)]
    pub fn accumulated_beats(&self) -> f32 {
        self.accumulated_beats
    }

    pub fn reset(&mut self) {
        self.elapsed_sub_second = 0.0;
        self.accumulated_beats = 0.0;
    }

    /// Drains every currently due event starting at `cursor`: indices whose
    /// beat time has been reached or passed by the accumulator, in ascending
    /// order. Stops at the first not-yet-due event or the end of the chart
    /// (an exhausted chart is not a failure; playback continues on the song
    /// timer). The cursor is advanced past each returned index and never
    /// moves backward, so an event is returned at most once per run.
    pub fn drain_due(&self, chart: &Chart, cursor: &mut usize) -> SmallVec<[usize; 8]> {
        let mut due = SmallVec::new();
        while let Some(event) = chart.get(*cursor) {
            if event.beat_time > self.accumulated_beats {
                break;
            }
            due.push(*cursor);
            *cursor += 1;
        }
        due
    }
}
