// Per-tick sample history ring buffer (fixed-size, no heap).
//
// One `HistorySample` is pushed per sampling tick; at 1 Hz the production
// capacity of 60 slots covers the last minute. Readers iterate oldest to
// newest and always see exactly `len()` samples, wrapped or not.

// ── Constants ───────────────────────────────────────────────────────

/// Slots kept by the node (one minute at 1 Hz).
pub const HISTORY_CAPACITY: usize = 60;

// ── Sample ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HistorySample {
    pub temperature_c: f32,
    pub humidity_pct: f32,
    pub light_percent: f32,
    pub motion: bool,
}

// ── Ring buffer ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct HistoryRing<const N: usize> {
    slots: [HistorySample; N],
    /// Next slot to write.
    cursor: usize,
    count: usize,
}

impl<const N: usize> HistoryRing<N> {
    pub const fn new() -> Self {
        const { assert!(N > 0, "history ring needs at least one slot") };
        Self {
            slots: [HistorySample {
                temperature_c: 0.0,
                humidity_pct: 0.0,
                light_percent: 0.0,
                motion: false,
            }; N],
            cursor: 0,
            count: 0,
        }
    }

    /// Store a sample, overwriting the oldest once full.
    pub fn push(&mut self, sample: HistorySample) {
        self.slots[self.cursor] = sample;
        self.cursor = (self.cursor + 1) % N;
        if self.count < N {
            self.count += 1;
        }
    }

    /// Iterate samples oldest → newest.
    pub fn iter(&self) -> Iter<'_, N> {
        let start = if self.count < N { 0 } else { self.cursor };
        Iter {
            slots: &self.slots,
            start,
            next: 0,
            len: self.count,
        }
    }

    /// The iterator together with the count it will yield, both taken from
    /// the same cursor position.
    pub fn snapshot(&self) -> (Iter<'_, N>, usize) {
        (self.iter(), self.count)
    }

    /// Most recently pushed sample.
    pub fn latest(&self) -> Option<&HistorySample> {
        if self.count == 0 {
            return None;
        }
        Some(&self.slots[(self.cursor + N - 1) % N])
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for HistoryRing<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, const N: usize> IntoIterator for &'a HistoryRing<N> {
    type Item = &'a HistorySample;
    type IntoIter = Iter<'a, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Oldest-first iterator over a [`HistoryRing`].
pub struct Iter<'a, const N: usize> {
    slots: &'a [HistorySample; N],
    start: usize,
    next: usize,
    len: usize,
}

impl<'a, const N: usize> Iterator for Iter<'a, N> {
    type Item = &'a HistorySample;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.len {
            return None;
        }
        let slot = &self.slots[(self.start + self.next) % N];
        self.next += 1;
        Some(slot)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.next;
        (remaining, Some(remaining))
    }
}

impl<const N: usize> ExactSizeIterator for Iter<'_, N> {}
