//! CSV snapshot export
//!
//! [`CsvSnapshotWriter`] is a [`SnapshotSink`] that writes one CSV file per
//! snapshot into an output directory. Files are named after the snapshot
//! index and label:
//!
//! ```text
//! output/
//! ├── snapshot_0000_initial.csv
//! ├── snapshot_0001.csv
//! ├── snapshot_0002.csv
//! └── snapshot_0003_final.csv
//! ```
//!
//! # Format
//!
//! One row per cell, one column per conserved quantity:
//!
//! ```csv
//! # Finite Volume Snapshot
//! # Generated: 2026-02-11T15:30:00+00:00
//! # Time: 0.5
//! # Label: final
//! # Equation: LinearAdvection
//! #
//! cell,u0
//! 0,0.000000
//! 1,1.000000
//! 2,0.000000
//! ```
//!
//! The metadata header is optional (see [`CsvConfig::include_metadata`]).
//!
//! # Example
//!
//! ```rust,no_run
//! use fvm_rs::output::{CsvConfig, CsvSnapshotWriter, SnapshotLabel, SnapshotSink};
//! use nalgebra::DVector;
//!
//! # fn main() -> fvm_rs::FvmResult<()> {
//! let config = CsvConfig::default().precision(10);
//! let mut writer = CsvSnapshotWriter::new("output", config)?;
//!
//! let solutions = vec![DVector::from_vec(vec![1.0]); 4];
//! writer.record(&solutions, 0.0, SnapshotLabel::Initial)?;
//! # Ok(())
//! # }
//! ```

use crate::error::{FvmError, FvmResult};
use crate::output::{SnapshotLabel, SnapshotSink};
use crate::physics::Solution;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Example
///
/// ```rust
/// use fvm_rs::output::CsvConfig;
///
/// let config = CsvConfig {
///     delimiter: ';',
///     precision: 10,
///     ..Default::default()
/// };
/// assert!(config.include_metadata);
/// ```
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of decimal places for floating-point values (default: 6)
    pub precision: usize,

    /// Include metadata header comments (default: true)
    pub include_metadata: bool,

    /// Metadata to include in header
    pub metadata: CsvMetadata,

    /// Header of the cell index column (default: "cell")
    pub cell_header: String,

    /// Headers of the conserved-quantity columns
    ///
    /// When empty, columns are named `u0`, `u1`, ...
    pub variable_headers: Vec<String>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            include_metadata: true,
            metadata: CsvMetadata::default(),
            cell_header: "cell".to_string(),
            variable_headers: Vec::new(),
        }
    }
}

impl CsvConfig {
    /// Semicolon delimiter, comma decimal separator
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: set metadata
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = metadata;
        self
    }

    /// Builder pattern: drop the comment header
    pub fn without_metadata(mut self) -> Self {
        self.include_metadata = false;
        self
    }

    /// Builder pattern: name the conserved-quantity columns
    pub fn variable_headers<S: Into<String>>(mut self, headers: impl IntoIterator<Item = S>) -> Self {
        self.variable_headers = headers.into_iter().map(Into::into).collect();
        self
    }
}

/// Metadata for CSV header comments
///
/// Only the fields that are set are written.
#[derive(Debug, Clone, Default)]
pub struct CsvMetadata {
    /// Governing equation name (e.g., "LinearAdvection")
    pub equation_name: Option<String>,

    /// Numerical flux name (e.g., "Upwind")
    pub flux_name: Option<String>,

    /// Time integral method name (e.g., "SSP-RK3")
    pub integrator_name: Option<String>,

    /// Additional custom parameters
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Metadata naming the equation, flux and integrator of the run
    pub fn new(equation: &str, flux: &str, integrator: &str) -> Self {
        Self {
            equation_name: Some(equation.to_string()),
            flux_name: Some(flux.to_string()),
            integrator_name: Some(integrator.to_string()),
            custom: Vec::new(),
        }
    }

    /// Add custom parameter
    pub fn add_custom(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.custom.push((key.into(), value.into()));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn write_metadata_header<W: Write>(
    out: &mut W,
    metadata: &CsvMetadata,
    time: f64,
    label: SnapshotLabel,
) -> std::io::Result<()> {
    writeln!(out, "# Finite Volume Snapshot")?;

    let now = chrono::Utc::now();
    writeln!(out, "# Generated: {}", now.to_rfc3339())?;

    writeln!(out, "# Time: {}", time)?;
    writeln!(out, "# Label: {}", label)?;

    if let Some(equation) = &metadata.equation_name {
        writeln!(out, "# Equation: {}", equation)?;
    }
    if let Some(flux) = &metadata.flux_name {
        writeln!(out, "# Flux: {}", flux)?;
    }
    if let Some(integrator) = &metadata.integrator_name {
        writeln!(out, "# Integrator: {}", integrator)?;
    }

    for (key, value) in &metadata.custom {
        writeln!(out, "# {}: {}", key, value)?;
    }

    writeln!(out, "#")
}

/// Format number with configured precision and decimal separator
fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = format!("{:.prec$}", value, prec = config.precision);

    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

// =============================================================================
// Writer
// =============================================================================

/// Snapshot sink writing one CSV file per snapshot
#[derive(Debug)]
pub struct CsvSnapshotWriter {
    directory: PathBuf,
    config: CsvConfig,
    written: Vec<PathBuf>,
}

impl CsvSnapshotWriter {
    /// Create a writer, creating `directory` if needed
    ///
    /// # Errors
    ///
    /// [`FvmError::Io`] if the directory cannot be created.
    pub fn new(directory: impl AsRef<Path>, config: CsvConfig) -> FvmResult<Self> {
        let directory = directory.as_ref().to_path_buf();
        fs::create_dir_all(&directory)?;
        Ok(Self {
            directory,
            config,
            written: Vec::new(),
        })
    }

    /// Output directory
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Files written so far, in order
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn file_name(&self, label: SnapshotLabel) -> String {
        let index = self.written.len();
        match label {
            SnapshotLabel::Intermediate => format!("snapshot_{:04}.csv", index),
            other => format!("snapshot_{:04}_{}.csv", index, other),
        }
    }

    fn column_headers(&self, num_equations: usize) -> FvmResult<Vec<String>> {
        if self.config.variable_headers.is_empty() {
            return Ok((0..num_equations).map(|k| format!("u{}", k)).collect());
        }

        if self.config.variable_headers.len() != num_equations {
            return Err(FvmError::config(format!(
                "{} CSV column headers for {} conserved quantities",
                self.config.variable_headers.len(),
                num_equations
            )));
        }

        Ok(self.config.variable_headers.clone())
    }
}

impl SnapshotSink for CsvSnapshotWriter {
    fn record(&mut self, solutions: &[Solution], time: f64, label: SnapshotLabel) -> FvmResult<()> {
        // ============================= Validation =============================

        let num_equations = solutions.first().map_or(0, |s| s.len());
        if let Some(cell) = solutions.iter().position(|s| s.len() != num_equations) {
            return Err(FvmError::config(format!(
                "cell {} has {} components, expected {}",
                cell,
                solutions[cell].len(),
                num_equations
            )));
        }
        let headers = self.column_headers(num_equations)?;

        // ============================= Open File ==============================

        let path = self.directory.join(self.file_name(label));
        let mut out = BufWriter::new(File::create(&path)?);
        let config = &self.config;

        // ============================= Write Metadata =========================

        if config.include_metadata {
            write_metadata_header(&mut out, &config.metadata, time, label)?;
        }

        // ============================= Write Header ===========================

        write!(out, "{}", config.cell_header)?;
        for header in &headers {
            write!(out, "{}{}", config.delimiter, header)?;
        }
        writeln!(out)?;

        // ============================= Write Data =============================

        for (cell, solution) in solutions.iter().enumerate() {
            write!(out, "{}", cell)?;
            for value in solution.iter() {
                write!(out, "{}{}", config.delimiter, format_number(*value, config))?;
            }
            writeln!(out)?;
        }

        out.flush()?;
        self.written.push(path);
        Ok(())
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DVector;
    use tempfile::TempDir;

    fn solutions() -> Vec<Solution> {
        vec![
            DVector::from_vec(vec![1.0, 0.5]),
            DVector::from_vec(vec![0.25, -2.0]),
        ]
    }

    #[test]
    fn test_format_number() {
        let config = CsvConfig::default().precision(3);
        assert_eq!(format_number(1.23456, &config), "1.235");

        let european = CsvConfig::european().precision(2);
        assert_eq!(format_number(0.5, &european), "0,50");
    }

    #[test]
    fn test_file_names_follow_labels() {
        let dir = TempDir::new().unwrap();
        let mut writer = CsvSnapshotWriter::new(dir.path(), CsvConfig::default()).unwrap();

        writer.record(&solutions(), 0.0, SnapshotLabel::Initial).unwrap();
        writer.record(&solutions(), 0.5, SnapshotLabel::Intermediate).unwrap();
        writer.record(&solutions(), 1.0, SnapshotLabel::Final).unwrap();

        let names: Vec<_> = writer
            .written()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec!["snapshot_0000_initial.csv", "snapshot_0001.csv", "snapshot_0002_final.csv"]
        );
    }

    #[test]
    fn test_content_without_metadata() {
        let dir = TempDir::new().unwrap();
        let config = CsvConfig::default()
            .without_metadata()
            .precision(2)
            .variable_headers(["rho", "m"]);
        let mut writer = CsvSnapshotWriter::new(dir.path(), config).unwrap();

        writer.record(&solutions(), 0.0, SnapshotLabel::Initial).unwrap();

        let content = fs::read_to_string(&writer.written()[0]).unwrap();
        assert_eq!(content, "cell,rho,m\n0,1.00,0.50\n1,0.25,-2.00\n");
    }

    #[test]
    fn test_metadata_header() {
        let dir = TempDir::new().unwrap();
        let mut metadata = CsvMetadata::new("LinearAdvection", "Upwind", "Forward Euler");
        metadata.add_custom("CFL", "0.9");
        let mut writer = CsvSnapshotWriter::new(dir.path(), CsvConfig::default().with_metadata(metadata)).unwrap();

        writer.record(&solutions(), 2.5, SnapshotLabel::Final).unwrap();

        let content = fs::read_to_string(&writer.written()[0]).unwrap();
        assert!(content.starts_with("# Finite Volume Snapshot\n# Generated: "));
        assert!(content.contains("# Time: 2.5\n"));
        assert!(content.contains("# Label: final\n"));
        assert!(content.contains("# Equation: LinearAdvection\n"));
        assert!(content.contains("# CFL: 0.9\n"));
        assert!(content.contains("#\ncell,u0,u1\n"));
    }

    #[test]
    fn test_header_count_mismatch_rejected() {
        let dir = TempDir::new().unwrap();
        let config = CsvConfig::default().variable_headers(["only_one"]);
        let mut writer = CsvSnapshotWriter::new(dir.path(), config).unwrap();

        let error = writer.record(&solutions(), 0.0, SnapshotLabel::Initial).unwrap_err();
        assert!(matches!(error, FvmError::Configuration { .. }));
        assert!(writer.written().is_empty());
    }

    #[test]
    fn test_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let writer = CsvSnapshotWriter::new(&nested, CsvConfig::default()).unwrap();
        assert!(writer.directory().is_dir());
    }
}
