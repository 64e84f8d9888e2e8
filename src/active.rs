use thiserror::Error;

/// Overflow outcome for [`ActiveSlots::insert`]: every cell is occupied, so
/// the note exists visually but cannot be tracked for removal. This is
/// surfaced rather than silently dropped because the event was already
/// consumed from the timeline.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("active note table is full")]
pub struct RegistryFull;

/// Fixed-capacity table of the pool ids currently in flight.
///
/// Backed by an explicit free-list (stack of free cell indices), giving O(1)
/// insert and O(1) slot recycling on removal; removal by identity is a
/// linear scan. Capacity is set once at construction and `clear` never
/// shrinks it. Invariants: an id occupies at most one cell, every free-list
/// entry points at an empty cell, and `len() + free == capacity()`.
#[derive(Debug, Clone)]
pub struct ActiveSlots {
    cells: Vec<Option<usize>>,
    free: Vec<usize>,
}

impl ActiveSlots {
    pub fn new(capacity: usize) -> Self {
        let mut slots = Self {
            cells: vec![None; capacity],
            free: Vec::with_capacity(capacity),
        };
        slots.rebuild_free_list();
        slots
    }

    // Reversed so pops hand out the lowest free index first.
    fn rebuild_free_list(&mut self) {
        self.free.clear();
        self.free.extend((0..self.cells.len()).rev());
    }

    /// Writes `id` into the next free cell and returns its index. A zero
    /// capacity table or one with no free cell reports [`RegistryFull`]
    /// without touching existing entries.
    ///
    /// An id may occupy at most one cell; callers must `remove` a live id
    /// before re-inserting it (debug-asserted).
    pub fn insert(&mut self, id: usize) -> Result<usize, RegistryFull> {
        debug_assert!(!self.contains(id), "id {id} is already registered");
        let cell = self.free.pop().ok_or(RegistryFull)?;
        debug_assert!(self.cells[cell].is_none());
        self.cells[cell] = Some(id);
        Ok(cell)
    }

    /// Clears the first cell holding `id` and recycles its slot. Removing an
    /// unknown or already-removed id is a no-op, reported as `false`.
    pub fn remove(&mut self, id: usize) -> bool {
        for (index, cell) in self.cells.iter_mut().enumerate() {
            if *cell == Some(id) {
                *cell = None;
                self.free.push(index);
                return true;
            }
        }
        false
    }

    /// Empties every cell, keeping capacity intact (song stop path).
    pub fn clear(&mut self) {
        self.cells.fill(None);
        self.rebuild_free_list();
    }

    pub fn contains(&self, id: usize) -> bool {
        self.cells.iter().any(|cell| *cell == Some(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells.iter().filter_map(|cell| *cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.cells.len()
    }
}
