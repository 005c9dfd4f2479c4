//! Snapshot consumers.
//!
//! [`SnapshotSink`] is the seam between a running solver and whatever wants
//! its output. The solver hands a borrowed [`Snapshot`] to the sink and
//! moves on; sinks decide what to keep.

use indexmap::IndexMap;

use kiln_core::{Element, StepId};

use crate::error::SinkError;
use crate::snapshot::{OwnedSnapshot, Snapshot};

/// Receives snapshots during a run.
///
/// Implementations must not hold on to the borrowed view; detach with
/// [`Snapshot::to_owned`] to keep data. A sink error aborts the run after
/// the current step has already committed.
pub trait SnapshotSink<T: Element> {
    /// Accept one snapshot.
    fn record(&mut self, snapshot: &Snapshot<'_, T>) -> Result<(), SinkError>;
}

/// An in-memory sink keeping snapshots in step order.
///
/// With a nonzero capacity the recorder holds at most that many snapshots
/// and evicts the oldest on overflow; capacity zero means unbounded.
/// Recording never fails.
#[derive(Debug)]
pub struct MemoryRecorder<T: Element> {
    capacity: usize,
    history: IndexMap<StepId, OwnedSnapshot<T>>,
}

impl<T: Element> MemoryRecorder<T> {
    /// An unbounded recorder.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// A recorder keeping at most `capacity` snapshots, zero for unbounded.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            history: IndexMap::new(),
        }
    }

    /// Configured capacity, zero meaning unbounded.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// The snapshot recorded at `step`, if still held.
    pub fn get(&self, step: StepId) -> Option<&OwnedSnapshot<T>> {
        self.history.get(&step)
    }

    /// The most recently recorded snapshot.
    pub fn latest(&self) -> Option<&OwnedSnapshot<T>> {
        self.history.last().map(|(_, snapshot)| snapshot)
    }

    /// Stored steps, oldest first.
    pub fn steps(&self) -> impl Iterator<Item = StepId> + '_ {
        self.history.keys().copied()
    }

    /// Stored snapshots with their steps, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = (StepId, &OwnedSnapshot<T>)> {
        self.history.iter().map(|(step, snapshot)| (*step, snapshot))
    }

    /// Drop all stored snapshots, keeping the capacity.
    pub fn clear(&mut self) {
        self.history.clear();
    }
}

impl<T: Element> Default for MemoryRecorder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> SnapshotSink<T> for MemoryRecorder<T> {
    fn record(&mut self, snapshot: &Snapshot<'_, T>) -> Result<(), SinkError> {
        let step = snapshot.step();
        // Re-recording a step replaces in place and must not evict.
        if self.capacity > 0
            && self.history.len() == self.capacity
            && !self.history.contains_key(&step)
        {
            self.history.shift_remove_index(0);
        }
        self.history.insert(step, snapshot.to_owned());
        Ok(())
    }
}
