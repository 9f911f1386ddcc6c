//! # Paged Sparse Set
//!
//! Maps sparse external ids to densely packed values.
//!
//! A flat `sparse[id]` table sized to the maximum possible id wastes memory
//! when ids are sparse or the id space is large. The table here is split into
//! fixed-size pages that are allocated lazily, the first time an id in a
//! page's range is inserted. Lookup stays O(1):
//!
//! ```text
//! sparse[page(id)][offset(id)] -> dense slot s, with ids[s] == id
//! ids:  [id_a, id_b, id_c]   <- parallel to data, contiguous
//! data: [val_a, val_b, val_c] <- iterate this, O(live-count)
//! ```
//!
//! Removal swaps the target slot with the last slot and truncates, then fixes
//! the sparse entries for both the removed and the relocated id. Dense order
//! is therefore unspecified beyond "last element moved into the gap".

use super::Index;

/// Number of contiguous ids covered by one lazily allocated sparse page.
pub const PAGE_SIZE: usize = 4096;

/// Sentinel marking a vacant sparse slot.
const TOMBSTONE: u32 = u32::MAX;

#[inline]
const fn page_index(id: Index) -> usize {
    id as usize / PAGE_SIZE
}

#[inline]
const fn page_offset(id: Index) -> usize {
    id as usize % PAGE_SIZE
}

fn new_page() -> Box<[u32]> {
    vec![TOMBSTONE; PAGE_SIZE].into_boxed_slice()
}

/// Sparse-to-dense mapping from external ids to values of type `T`.
///
/// This container guarantees:
/// - O(1) insert, remove, and lookup by id
/// - Iteration over the dense arrays is O(live-count), independent of the
///   size of the id space
/// - Sparse pages are allocated only for id ranges that have been touched
///
/// References returned by [`get`](Self::get) and pointers into
/// [`values`](Self::values) are invalidated by any subsequent insert or
/// remove; treat them as transient.
///
/// # Example
///
/// ```rust,ignore
/// let mut healths: SparseSet<f32> = SparseSet::new();
/// healths.insert(unit_id, 100.0);
/// if let Some(hp) = healths.get_mut(unit_id) {
///     *hp -= 25.0;
/// }
/// ```
#[derive(Debug)]
pub struct SparseSet<T> {
    /// Paged sparse table: page -> slot-per-offset, `TOMBSTONE` when vacant.
    sparse: Vec<Option<Box<[u32]>>>,
    /// Id stored in each dense slot (parallel to `data`).
    ids: Vec<Index>,
    /// Dense value storage.
    data: Vec<T>,
}

impl<T> Default for SparseSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SparseSet<T> {
    /// Creates an empty sparse set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sparse: Vec::new(),
            ids: Vec::new(),
            data: Vec::new(),
        }
    }

    /// Creates an empty sparse set with pre-reserved dense capacity.
    ///
    /// Sparse pages are still allocated lazily.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sparse: Vec::new(),
            ids: Vec::with_capacity(capacity),
            data: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of live entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Checks if the set holds no entries.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Resolves an id to its dense slot, if present.
    ///
    /// The bounds check on the slot defends against stale sparse entries; a
    /// live slot always satisfies `ids[slot] == id`.
    #[inline]
    fn slot_of(&self, id: Index) -> Option<usize> {
        let page = self.sparse.get(page_index(id))?.as_deref()?;
        let slot = page[page_offset(id)];
        if slot == TOMBSTONE {
            return None;
        }
        let i = slot as usize;
        (i < self.ids.len() && self.ids[i] == id).then_some(i)
    }

    /// Writes the sparse entry for `id`. The id's page must already exist.
    #[inline]
    fn set_slot(&mut self, id: Index, slot: u32) {
        if let Some(page) = self
            .sparse
            .get_mut(page_index(id))
            .and_then(Option::as_deref_mut)
        {
            page[page_offset(id)] = slot;
        }
    }

    /// Inserts a value for `id`, growing the sparse page table to cover the
    /// id's page if needed.
    ///
    /// If `id` is already present the value is overwritten in place and the
    /// previous value returned; the dense arrays never accumulate duplicate
    /// entries for the same id.
    ///
    /// # Arguments
    ///
    /// * `id` - External id; `Index::MAX` is reserved
    /// * `value` - The value to associate with `id`
    ///
    /// # Returns
    ///
    /// The replaced value if `id` was already present, otherwise `None`.
    pub fn insert(&mut self, id: Index, value: T) -> Option<T> {
        debug_assert!(id != Index::MAX, "id Index::MAX is reserved");

        if let Some(i) = self.slot_of(id) {
            return Some(core::mem::replace(&mut self.data[i], value));
        }

        let page = page_index(id);
        if page >= self.sparse.len() {
            self.sparse.resize_with(page + 1, || None);
        }
        let slots = self.sparse[page].get_or_insert_with(new_page);
        slots[page_offset(id)] = self.ids.len() as u32;

        self.ids.push(id);
        self.data.push(value);
        None
    }

    /// Removes the entry for `id`, if present.
    ///
    /// The last dense entry is swapped into the freed slot and the sparse
    /// entry of the relocated id is fixed up, so removal is O(1). The dense
    /// slot of the relocated id changes; its lookup result does not.
    ///
    /// # Returns
    ///
    /// The removed value, or `None` if `id` was not present.
    pub fn remove(&mut self, id: Index) -> Option<T> {
        let i = self.slot_of(id)?;

        self.ids.swap_remove(i);
        let value = self.data.swap_remove(i);

        // The formerly-last entry (if any) now lives at slot i.
        if i < self.ids.len() {
            let moved = self.ids[i];
            self.set_slot(moved, i as u32);
        }
        self.set_slot(id, TOMBSTONE);

        Some(value)
    }

    /// Checks whether `id` has an entry.
    #[inline]
    #[must_use]
    pub fn contains(&self, id: Index) -> bool {
        self.slot_of(id).is_some()
    }

    /// Gets the value associated with `id`.
    #[inline]
    #[must_use]
    pub fn get(&self, id: Index) -> Option<&T> {
        self.slot_of(id).map(|i| &self.data[i])
    }

    /// Gets the value associated with `id`, mutably.
    #[inline]
    pub fn get_mut(&mut self, id: Index) -> Option<&mut T> {
        self.slot_of(id).map(|i| &mut self.data[i])
    }

    /// Direct access to the dense value array, for bulk iteration.
    ///
    /// Parallel to [`ids`](Self::ids); order is unspecified.
    #[inline]
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.data
    }

    /// Direct mutable access to the dense value array.
    #[inline]
    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Direct access to the dense id array, parallel to
    /// [`values`](Self::values).
    #[inline]
    #[must_use]
    pub fn ids(&self) -> &[Index] {
        &self.ids
    }

    /// Iterates `(id, value)` pairs in dense order (not id order).
    pub fn iter(&self) -> impl Iterator<Item = (Index, &T)> {
        self.ids.iter().copied().zip(self.data.iter())
    }

    /// Iterates `(id, value)` pairs mutably, in dense order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Index, &mut T)> {
        self.ids.iter().copied().zip(self.data.iter_mut())
    }

    /// Reserves dense capacity for at least `additional` more entries.
    pub fn reserve(&mut self, additional: usize) {
        self.ids.reserve(additional);
        self.data.reserve(additional);
    }

    /// Removes all entries and drops every sparse page.
    ///
    /// After `clear`, `contains` is false for every id because no page
    /// exists to resolve it.
    pub fn clear(&mut self) {
        self.sparse.clear();
        self.ids.clear();
        self.data.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_lookup_roundtrip() {
        let mut set: SparseSet<i32> = SparseSet::new();
        assert!(set.is_empty());

        assert_eq!(set.insert(7, 700), None);
        assert!(set.contains(7));
        assert_eq!(set.get(7), Some(&700));
        assert_eq!(set.len(), 1);

        assert_eq!(set.remove(7), Some(700));
        assert!(!set.contains(7));
        assert_eq!(set.get(7), None);
        assert!(set.is_empty());
    }

    #[test]
    fn test_remove_relocates_last_entry() {
        // Scenario: ids 10, 20, 30 with values 100, 200, 300; removing 20
        // moves 30 into 20's dense slot without disturbing its lookup.
        let mut set: SparseSet<i32> = SparseSet::new();
        set.insert(10, 100);
        set.insert(20, 200);
        set.insert(30, 300);

        assert_eq!(set.ids(), &[10, 20, 30]);
        assert_eq!(set.remove(20), Some(200));

        assert!(!set.contains(20));
        assert!(set.contains(10));
        assert!(set.contains(30));
        assert_eq!(set.get(30), Some(&300));
        assert_eq!(set.ids(), &[10, 30]);
        assert_eq!(set.values(), &[100, 300]);
    }

    #[test]
    fn test_remove_last_entry_no_relocation() {
        let mut set: SparseSet<i32> = SparseSet::new();
        set.insert(1, 10);
        set.insert(2, 20);

        assert_eq!(set.remove(2), Some(20));
        assert_eq!(set.ids(), &[1]);
        assert_eq!(set.get(1), Some(&10));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut set: SparseSet<i32> = SparseSet::new();
        set.insert(5, 50);

        assert_eq!(set.remove(99), None);
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(5), Some(&50));
    }

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut set: SparseSet<i32> = SparseSet::new();
        assert_eq!(set.insert(3, 30), None);
        assert_eq!(set.insert(3, 31), Some(30));

        // No orphaned duplicate in the dense arrays.
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(3), Some(&31));
    }

    #[test]
    fn test_pages_allocated_lazily_across_ranges() {
        let mut set: SparseSet<u8> = SparseSet::new();
        let far = (PAGE_SIZE * 40) as Index;

        set.insert(3, 1);
        set.insert(far, 2);
        set.insert(far + 1, 3);

        assert_eq!(set.get(3), Some(&1));
        assert_eq!(set.get(far), Some(&2));
        assert_eq!(set.get(far + 1), Some(&3));
        assert!(!set.contains(far - 1));

        // Only the touched pages exist.
        let live_pages = set.sparse.iter().filter(|p| p.is_some()).count();
        assert_eq!(live_pages, 2);
    }

    #[test]
    fn test_page_boundary_ids() {
        let mut set: SparseSet<usize> = SparseSet::new();
        let boundary = PAGE_SIZE as Index;

        set.insert(boundary - 1, 1);
        set.insert(boundary, 2);
        assert_eq!(set.get(boundary - 1), Some(&1));
        assert_eq!(set.get(boundary), Some(&2));

        set.remove(boundary - 1);
        assert!(!set.contains(boundary - 1));
        assert!(set.contains(boundary));
    }

    #[test]
    fn test_clear_drops_pages() {
        let mut set: SparseSet<i32> = SparseSet::new();
        set.insert(1, 10);
        set.insert((PAGE_SIZE * 2) as Index, 20);

        set.clear();
        assert!(set.is_empty());
        assert!(!set.contains(1));
        assert!(!set.contains((PAGE_SIZE * 2) as Index));

        // Reuse after clear behaves like a fresh set.
        assert_eq!(set.insert(1, 11), None);
        assert_eq!(set.get(1), Some(&11));
    }

    #[test]
    fn test_iteration_visits_live_ids_exactly_once() {
        let mut set: SparseSet<u32> = SparseSet::new();
        for id in 0..64 {
            set.insert(id * 3, id);
        }
        for id in 0..32 {
            set.remove(id * 6);
        }

        let mut seen: Vec<Index> = set.iter().map(|(id, _)| id).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), set.len());

        for (id, value) in set.iter() {
            assert!(set.contains(id));
            assert_eq!(set.get(id), Some(value));
        }
    }

    #[test]
    fn test_values_mut_bulk_update() {
        let mut set: SparseSet<f32> = SparseSet::new();
        set.insert(2, 1.0);
        set.insert(9, 2.0);

        for v in set.values_mut() {
            *v *= 10.0;
        }
        assert_eq!(set.get(2), Some(&10.0));
        assert_eq!(set.get(9), Some(&20.0));
    }
}
