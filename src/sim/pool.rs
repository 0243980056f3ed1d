//! Fixed-capacity object pools
//!
//! Every entity kind (projectile, enemy, particle, decal, XP crystal) lives
//! in a `Pool<T>`: a fixed slab of slots allocated once per run, recycled
//! through a free-index stack plus a dense active-index array. Spawning,
//! despawning and iteration are all allocation-free and O(1) amortized.
//!
//! A slot's identity is its array index. Live data never moves; only the
//! dense index array is swap-compacted on removal.

/// One pool slot. `live` mirrors membership in the active list and exists so
/// stale handles can be rejected.
#[derive(Debug, Clone)]
struct Slot<T> {
    value: T,
    live: bool,
}

/// Fixed-capacity pool with free-list allocation and dense active indices.
///
/// Invariant: `count()` equals the number of slots with `live == true`, and
/// the active array holds exactly those indices. A full pool rejects spawns
/// (returns `None`) without touching any state.
#[derive(Debug, Clone)]
pub struct Pool<T> {
    slots: Vec<Slot<T>>,
    /// Dense array of live slot indices, in spawn order (swap-compacted)
    active: Vec<usize>,
    /// slot index -> position in `active`; only valid while the slot is live
    active_pos: Vec<usize>,
    /// Free slot indices, LIFO: a freed slot is the next one reused
    free: Vec<usize>,
}

impl<T: Default> Pool<T> {
    /// Allocate a pool of `capacity` slots. This is the only allocation the
    /// pool ever performs.
    pub fn new(capacity: usize) -> Self {
        let mut pool = Self {
            slots: (0..capacity)
                .map(|_| Slot {
                    value: T::default(),
                    live: false,
                })
                .collect(),
            active: Vec::with_capacity(capacity),
            active_pos: vec![0; capacity],
            free: Vec::with_capacity(capacity),
        };
        pool.clear();
        pool
    }

    /// Reset every slot to inactive without deallocating.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.live = false;
        }
        self.active.clear();
        self.free.clear();
        // Reversed so a fresh pool hands out slot 0 first
        self.free.extend((0..self.slots.len()).rev());
    }

    /// Number of live slots.
    #[inline]
    pub fn count(&self) -> usize {
        self.active.len()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.free.is_empty()
    }

    /// Activate a slot holding `value`. Returns the slot index, or `None`
    /// when the pool is exhausted (`count` unchanged; the caller tolerates a
    /// missing spawn).
    pub fn spawn(&mut self, value: T) -> Option<usize> {
        let idx = self.free.pop()?;
        debug_assert!(!self.slots[idx].live);
        self.slots[idx].value = value;
        self.slots[idx].live = true;
        self.active_pos[idx] = self.active.len();
        self.active.push(idx);
        Some(idx)
    }

    /// Deactivate a slot: O(1) swap-removal from the dense active array plus
    /// a push onto the free stack. No-op for slots that are not live.
    pub fn despawn(&mut self, idx: usize) {
        if idx >= self.slots.len() || !self.slots[idx].live {
            return;
        }
        let pos = self.active_pos[idx];
        let last = self.active.pop().unwrap_or(idx);
        if last != idx {
            // Move the last active index into the vacated position
            self.active[pos] = last;
            self.active_pos[last] = pos;
        }
        self.slots[idx].live = false;
        self.free.push(idx);
    }

    /// Shared access to a live slot.
    #[inline]
    pub fn get(&self, idx: usize) -> Option<&T> {
        let slot = self.slots.get(idx)?;
        slot.live.then_some(&slot.value)
    }

    /// Mutable access to a live slot.
    #[inline]
    pub fn get_mut(&mut self, idx: usize) -> Option<&mut T> {
        let slot = self.slots.get_mut(idx)?;
        slot.live.then_some(&mut slot.value)
    }

    /// Dense live indices, in current iteration order.
    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.active
    }

    /// Iterate live entries as `(slot_index, &value)`. This is the read-only
    /// view the renderer walks each frame.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.active.iter().map(move |&i| (i, &self.slots[i].value))
    }

    /// Advance all live slots, despawning those for which `f` returns false.
    ///
    /// Removal during iteration is safe: the swap brings the former tail
    /// element into the vacated dense position, so the cursor only advances
    /// on keep.
    pub fn retain_active<F>(&mut self, mut f: F)
    where
        F: FnMut(usize, &mut T) -> bool,
    {
        let mut pos = 0;
        while pos < self.active.len() {
            let idx = self.active[pos];
            if f(idx, &mut self.slots[idx].value) {
                pos += 1;
            } else {
                self.despawn(idx);
            }
        }
    }

    /// Debug check: the dense array and the live flags agree.
    #[cfg(test)]
    fn check_invariant(&self) -> bool {
        let live = self.slots.iter().filter(|s| s.live).count();
        live == self.active.len()
            && self.active.iter().all(|&i| self.slots[i].live)
            && self.active.len() + self.free.len() == self.slots.len()
    }
}
