use log::info;

use crate::spawn::SpawnScheduler;

/// Saber-hit detector: retires a note when the object that touched it
/// carries the configured saber tag in its name. Matching is by substring
/// containment, same convention as the chart parser's field keys.
#[derive(Debug, Clone)]
pub struct HitDetector {
    saber_tag: String,
}

impl HitDetector {
    pub fn new(saber_tag: impl Into<String>) -> Self {
        Self { saber_tag: saber_tag.into() }
    }

    /// Reports a contact between note `note_id` and an object named
    /// `other_name`. Returns whether the note was hit and retired.
    pub fn on_contact(&self, seq: &mut SpawnScheduler, note_id: usize, other_name: &str) -> bool {
        if !other_name.contains(&self.saber_tag) {
            return false;
        }
        info!("hit: {other_name} -> note {note_id}");
        seq.remove_note(note_id);
        true
    }
}

/// Out-of-bounds detector: a wall past the player that retires anything
/// note-tagged flying through it, so missed notes do not stay live forever.
#[derive(Debug, Clone)]
pub struct DespawnWall {
    note_tag: String,
}

impl DespawnWall {
    pub fn new(note_tag: impl Into<String>) -> Self {
        Self { note_tag: note_tag.into() }
    }

    /// Reports that instance `note_id` crossed the wall. Only objects whose
    /// name carries the note tag are retired; anything else passes through.
    pub fn on_contact(&self, seq: &mut SpawnScheduler, note_id: usize) -> bool {
        let Some(inst) = seq.instance(note_id) else {
            return false;
        };
        if !inst.name.contains(&self.note_tag) {
            return false;
        }
        seq.remove_note(note_id);
        true
    }
}
