use glam::Quat;
use log::info;

use crate::instance::{InstanceProvider, NoteInstance};

/// Fixed round-robin pool of note instances, built once at initialization
/// and never resized during a run.
///
/// `acquire_next` always succeeds: the pool hands out the next index with
/// wraparound regardless of whether the previous use is still logically in
/// flight. The active registry, not the pool, is the capacity guard; the
/// pool also never resets instance state on acquire (the spawner sets pose
/// and visibility after acquisition).
#[derive(Debug, Clone)]
pub struct NotePool {
    instances: Vec<NoteInstance>,
    cursor: usize,
}

impl NotePool {
    /// Builds `amount` dormant instances from the provider, each posed at
    /// the starting rotation and tagged with its pool index.
    pub fn new(amount: usize, provider: &mut dyn InstanceProvider, starting_rotation: Quat) -> Self {
        info!("initializing note block pool ({amount} instances)...");
        let instances = (0..amount)
            .map(|id| {
                let mut inst = provider.instantiate(id);
                inst.id = id;
                inst.rotation = starting_rotation;
                inst
            })
            .collect();
        info!("note block pool initialized");
        Self { instances, cursor: 0 }
    }

    /// Returns the next pool id, cycling forward with wraparound.
    pub fn acquire_next(&mut self) -> usize {
        debug_assert!(!self.instances.is_empty());
        let id = self.cursor;
        self.cursor += 1;
        if self.cursor >= self.instances.len() {
            self.cursor = 0;
        }
        id
    }

    pub fn reset_cursor(&mut self) {
        self.cursor = 0;
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&NoteInstance> {
        self.instances.get(id)
    }

    pub fn get_mut(&mut self, id: usize) -> Option<&mut NoteInstance> {
        self.instances.get_mut(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NoteInstance> {
        self.instances.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::BlockProvider;

    fn pool(amount: usize) -> NotePool {
        NotePool::new(amount, &mut BlockProvider::new("NoteBlock"), Quat::IDENTITY)
    }

    #[test]
    fn acquisitions_round_robin_with_wraparound() {
        let mut p = pool(3);
        let first: Vec<usize> = (0..3).map(|_| p.acquire_next()).collect();
        assert_eq!(first, vec![0, 1, 2]);
        // The (amount + 1)-th acquisition is the same handle as the first.
        assert_eq!(p.acquire_next(), 0);
    }

    #[test]
    fn instances_are_distinguishable_and_created_up_front() {
        let p = pool(4);
        assert_eq!(p.len(), 4);
        let names: Vec<&str> = p.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["NoteBlock_0", "NoteBlock_1", "NoteBlock_2", "NoteBlock_3"]);
    }

    #[test]
    fn acquire_does_not_reset_instance_state() {
        let mut p = pool(1);
        p.get_mut(0).unwrap().visible = true;
        let id = p.acquire_next();
        assert!(p.get(id).unwrap().visible);
    }

    #[test]
    fn reset_cursor_restarts_the_cycle() {
        let mut p = pool(2);
        p.acquire_next();
        p.reset_cursor();
        assert_eq!(p.acquire_next(), 0);
    }
}
