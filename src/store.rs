//! Packed per-particle attribute storage.
//!
//! A [`PackedStore`] holds one attribute group (e.g. position `[x, y, z]`)
//! for every particle in a single flat `f32` buffer, interleaved per
//! particle. The layout is exactly what the renderer uploads as a vertex
//! buffer, so field order is part of the contract and never reshuffled.
//!
//! Offsets are flat indices into the buffer: particle `i`'s tuple starts
//! at `i * spread`, where `spread` is the number of fields per particle.

/// Fixed-size interleaved attribute buffer for N particles.
///
/// Allocated once at startup; `get`/`set` never allocate and never grow
/// the buffer. Out-of-range offsets are programming errors, not runtime
/// conditions, and are checked in debug builds.
pub struct PackedStore {
    values: Vec<f32>,
    count: usize,
    spread: usize,
}

impl PackedStore {
    /// Create a zero-filled store for `count` particles with `spread`
    /// fields each.
    pub fn new(count: usize, spread: usize) -> Self {
        assert!(spread > 0, "attribute store needs at least one field");
        Self {
            values: vec![0.0; count * spread],
            count,
            spread,
        }
    }

    /// Number of particles in the store.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Fields per particle; also the stride for computing flat offsets.
    #[inline]
    pub fn spread(&self) -> usize {
        self.spread
    }

    /// Flat offset of particle `i`'s tuple.
    #[inline]
    pub fn offset(&self, i: usize) -> usize {
        i * self.spread
    }

    /// Read particle tuple at a flat offset.
    #[inline]
    pub fn get(&self, offset: usize) -> &[f32] {
        debug_assert!(offset + self.spread <= self.values.len());
        &self.values[offset..offset + self.spread]
    }

    /// Write a tuple back at a flat offset.
    ///
    /// Partial writes are allowed: `tuple` may be shorter than the
    /// spread, in which case trailing fields keep their values. The age
    /// store relies on this to write back `age` without touching `life`.
    #[inline]
    pub fn set(&mut self, tuple: &[f32], offset: usize) {
        debug_assert!(tuple.len() <= self.spread);
        debug_assert!(offset + tuple.len() <= self.values.len());
        self.values[offset..offset + tuple.len()].copy_from_slice(tuple);
    }

    /// Replace every particle's tuple via a generator.
    ///
    /// The closure receives a mutable view of particle `i`'s tuple and
    /// the index `i`. Used for bulk (re)initialization, never on the
    /// per-frame hot path.
    pub fn map<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut [f32], usize),
    {
        for i in 0..self.count {
            let offset = i * self.spread;
            f(&mut self.values[offset..offset + self.spread], i);
        }
    }

    /// Read-only view of the whole buffer, in upload order.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zero_filled() {
        let store = PackedStore::new(4, 3);
        assert_eq!(store.count(), 4);
        assert_eq!(store.spread(), 3);
        assert!(store.as_slice().iter().all(|&v| v == 0.0));
        assert_eq!(store.as_slice().len(), 12);
    }

    #[test]
    fn test_set_then_get_neighbors_untouched() {
        // count=3, fields=[x, y]: writing index 1 leaves 0 and 2 alone.
        let mut store = PackedStore::new(3, 2);
        store.set(&[9.0, 9.0], store.offset(1));

        assert_eq!(store.get(store.offset(1)), &[9.0, 9.0]);
        assert_eq!(store.get(store.offset(0)), &[0.0, 0.0]);
        assert_eq!(store.get(store.offset(2)), &[0.0, 0.0]);
    }

    #[test]
    fn test_roundtrip_is_idempotent() {
        let mut store = PackedStore::new(5, 3);
        store.map(|tuple, i| {
            for (k, v) in tuple.iter_mut().enumerate() {
                *v = (i * 10 + k) as f32;
            }
        });

        let before: Vec<f32> = store.as_slice().to_vec();
        for i in 0..store.count() {
            let offset = store.offset(i);
            let tuple: Vec<f32> = store.get(offset).to_vec();
            store.set(&tuple, offset);
        }
        assert_eq!(store.as_slice(), &before[..]);
    }

    #[test]
    fn test_partial_set_preserves_trailing_fields() {
        let mut store = PackedStore::new(2, 2);
        store.set(&[3.0, 700.0], store.offset(1));
        store.set(&[4.0], store.offset(1));
        assert_eq!(store.get(store.offset(1)), &[4.0, 700.0]);
    }

    #[test]
    fn test_map_visits_every_index() {
        let mut store = PackedStore::new(8, 1);
        let mut seen = Vec::new();
        store.map(|tuple, i| {
            tuple[0] = i as f32;
            seen.push(i);
        });
        assert_eq!(seen, (0..8).collect::<Vec<_>>());
        assert_eq!(store.get(store.offset(7)), &[7.0]);
    }
}
