//! Snapshot sink
//!
//! The driver hands the full solution array to a [`SnapshotSink`] three
//! ways: once at `t = 0` with [`SnapshotLabel::Initial`], on every post
//! threshold with [`SnapshotLabel::Intermediate`], and once at the end time
//! with [`SnapshotLabel::Final`]. Calls are synchronous and in time order.

use crate::error::FvmResult;
use crate::physics::Solution;
use std::fmt;

/// Kind of snapshot
///
/// Renders as `"initial"`, `""` and `"final"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapshotLabel {
    /// State at `t = 0`, before the first step
    Initial,
    /// State at a post threshold
    Intermediate,
    /// State at the end time
    Final,
}

impl SnapshotLabel {
    /// Label text used in file names and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            SnapshotLabel::Initial => "initial",
            SnapshotLabel::Intermediate => "",
            SnapshotLabel::Final => "final",
        }
    }
}

impl fmt::Display for SnapshotLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receiver of solution snapshots
pub trait SnapshotSink {
    /// Record the solution at `time`
    ///
    /// An error aborts the run.
    fn record(&mut self, solutions: &[Solution], time: f64, label: SnapshotLabel) -> FvmResult<()>;
}

/// One recorded snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Simulated time
    pub time: f64,
    pub label: SnapshotLabel,
    /// Copy of the solution array, one entry per cell
    pub solutions: Vec<Solution>,
}

/// In-memory sink keeping a copy of every snapshot
#[derive(Debug, Clone, Default)]
pub struct SnapshotRecorder {
    snapshots: Vec<Snapshot>,
}

impl SnapshotRecorder {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded snapshots, oldest first
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Labels of the recorded snapshots, oldest first
    pub fn labels(&self) -> Vec<SnapshotLabel> {
        self.snapshots.iter().map(|s| s.label).collect()
    }

    /// Times of the recorded snapshots, oldest first
    pub fn times(&self) -> Vec<f64> {
        self.snapshots.iter().map(|s| s.time).collect()
    }

    /// Most recent snapshot
    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    /// Number of recorded snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// `true` before anything was recorded
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Drop every recorded snapshot
    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}

impl SnapshotSink for SnapshotRecorder {
    fn record(&mut self, solutions: &[Solution], time: f64, label: SnapshotLabel) -> FvmResult<()> {
        self.snapshots.push(Snapshot {
            time,
            label,
            solutions: solutions.to_vec(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DVector;

    #[test]
    fn test_label_rendering() {
        assert_eq!(SnapshotLabel::Initial.to_string(), "initial");
        assert_eq!(SnapshotLabel::Intermediate.to_string(), "");
        assert_eq!(SnapshotLabel::Final.to_string(), "final");
    }

    #[test]
    fn test_recorder_keeps_copies() {
        let mut recorder = SnapshotRecorder::new();
        let mut solutions = vec![DVector::from_vec(vec![1.0])];

        recorder.record(&solutions, 0.0, SnapshotLabel::Initial).unwrap();
        solutions[0][0] = 2.0;
        recorder.record(&solutions, 1.0, SnapshotLabel::Final).unwrap();

        assert_eq!(recorder.len(), 2);
        assert_eq!(recorder.snapshots()[0].solutions[0][0], 1.0);
        assert_eq!(recorder.times(), vec![0.0, 1.0]);
        assert_eq!(recorder.labels(), vec![SnapshotLabel::Initial, SnapshotLabel::Final]);
        assert_eq!(recorder.last().map(|s| s.time), Some(1.0));
    }
}
