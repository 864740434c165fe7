//! Output of solution snapshots
//!
//! ```text
//! output/
//! ├── mod.rs
//! ├── snapshot.rs   ← SnapshotSink trait, labels, in-memory recorder
//! └── csv.rs        ← one CSV file per snapshot
//! ```
//!
//! The driver only knows the [`SnapshotSink`] trait. Tests collect snapshots
//! in a [`SnapshotRecorder`]; runs that need files on disk use a
//! [`CsvSnapshotWriter`].

pub mod csv;
pub mod snapshot;

pub use csv::{CsvConfig, CsvMetadata, CsvSnapshotWriter};
pub use snapshot::{Snapshot, SnapshotLabel, SnapshotRecorder, SnapshotSink};
