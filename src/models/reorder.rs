//! Drag-and-drop reordering over sort_order columns.
//!
//! A reorder always operates on one displayed list at a time: the entries,
//! fetched in ascending sort_order (ties by id), are rearranged and every
//! position is renumbered to its zero-based index. Only entries whose stored
//! sort_order differs from the recomputed value are written back, so a move
//! inside an already-dense list touches just the shifted range, while a list
//! with gaps or duplicates gets compacted by the first move that lands in it.

/// An entry of the list being reordered: its row id and the sort_order the
/// store currently holds for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub id: i64,
    pub sort_order: i64,
}

/// One pending sort_order write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortWrite {
    pub id: i64,
    pub sort_order: i64,
}

/// Assign dense 0..n-1 sort orders over `arrangement` (already in final
/// order), emitting a write for each entry whose stored value differs.
pub fn renumber(arrangement: &[SortKey]) -> Vec<SortWrite> {
    arrangement
        .iter()
        .enumerate()
        .filter(|(index, entry)| entry.sort_order != *index as i64)
        .map(|(index, entry)| SortWrite {
            id: entry.id,
            sort_order: index as i64,
        })
        .collect()
}

/// Move the entry at `source` to `destination` and plan the writes that
/// realize the new order. A missing destination, a destination equal to the
/// source, or an out-of-range index is a no-op producing no writes.
pub fn plan_move(entries: &[SortKey], source: usize, destination: Option<usize>) -> Vec<SortWrite> {
    let Some(destination) = destination else {
        return Vec::new();
    };
    if source == destination || source >= entries.len() || destination >= entries.len() {
        return Vec::new();
    }

    let mut arrangement = entries.to_vec();
    let moved = arrangement.remove(source);
    arrangement.insert(destination, moved);

    renumber(&arrangement)
}

/// Staged reordering session for lists that are only persisted on an
/// explicit save (document-type tabs). Owns the last-fetched baseline and
/// the working arrangement; nothing is written until `writes` is flushed.
#[derive(Debug, Clone)]
pub struct PendingReorder {
    baseline: Vec<SortKey>,
    current: Vec<SortKey>,
}

impl PendingReorder {
    /// `entries` must be in display order (ascending stored sort_order).
    pub fn new(entries: Vec<SortKey>) -> Self {
        Self {
            current: entries.clone(),
            baseline: entries,
        }
    }

    /// Stage a single move. Returns false for a no-op (cancelled drag,
    /// same-position drop, or out-of-range index).
    pub fn stage_move(&mut self, source: usize, destination: Option<usize>) -> bool {
        let Some(destination) = destination else {
            return false;
        };
        if source == destination || source >= self.current.len() || destination >= self.current.len()
        {
            return false;
        }
        let moved = self.current.remove(source);
        self.current.insert(destination, moved);
        true
    }

    /// Whether the staged arrangement differs from the baseline.
    pub fn has_changes(&self) -> bool {
        self.current != self.baseline
    }

    /// Discard staged moves and return to the last-fetched order.
    pub fn reset(&mut self) {
        self.current = self.baseline.clone();
    }

    /// The staged arrangement, in display order.
    pub fn order(&self) -> &[SortKey] {
        &self.current
    }

    /// The flush batch for the staged arrangement. Each entry still carries
    /// the sort_order the store knows, so only genuinely changed rows are
    /// written. Empty when nothing moved.
    pub fn writes(&self) -> Vec<SortWrite> {
        if !self.has_changes() {
            return Vec::new();
        }
        renumber(&self.current)
    }
}
