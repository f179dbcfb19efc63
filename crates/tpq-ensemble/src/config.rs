use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// YAML-configurable parameters governing an analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Physical system description.
    pub system: SystemConfig,
    /// Magnetic field grid specification.
    #[serde(default)]
    pub field_grid: FieldGridConfig,
    /// Bootstrap resampling parameters.
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
    /// Master seed and substream policy.
    #[serde(default)]
    pub seed_policy: SeedPolicy,
    /// Sample file discovery settings.
    #[serde(default)]
    pub input: InputConfig,
    /// Output directory configuration.
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            system: SystemConfig::default(),
            field_grid: FieldGridConfig::default(),
            bootstrap: BootstrapConfig::default(),
            seed_policy: SeedPolicy::default(),
            input: InputConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Physical system description supplied by the external configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Lattice size L; sectors carry quantum numbers -L..L in steps of 2.
    pub lattice: i64,
}

impl SystemConfig {
    /// Returns the sector quantum numbers implied by the lattice size.
    pub fn sector_numbers(&self) -> Vec<i64> {
        (-self.lattice..=self.lattice).step_by(2).collect()
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self { lattice: 2 }
    }
}

/// Magnetic field grid construction settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldGridConfig {
    /// First field value.
    #[serde(default)]
    pub start: f64,
    /// Last field value (inclusive).
    #[serde(default = "default_field_stop")]
    pub stop: f64,
    /// Number of grid points.
    #[serde(default = "default_field_points")]
    pub points: usize,
}

fn default_field_stop() -> f64 {
    4.0
}

fn default_field_points() -> usize {
    101
}

impl FieldGridConfig {
    /// Returns the linearly spaced field values, both endpoints included.
    pub fn values(&self) -> Vec<f64> {
        match self.points {
            0 => Vec::new(),
            1 => vec![self.start],
            n => (0..n)
                .map(|i| self.start + (self.stop - self.start) * i as f64 / (n - 1) as f64)
                .collect(),
        }
    }
}

impl Default for FieldGridConfig {
    fn default() -> Self {
        Self {
            start: 0.0,
            stop: default_field_stop(),
            points: default_field_points(),
        }
    }
}

/// Bootstrap resampling parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Number of bootstrap replicas to draw.
    #[serde(default = "default_replicas")]
    pub replicas: usize,
}

fn default_replicas() -> usize {
    4000
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            replicas: default_replicas(),
        }
    }
}

/// Deterministic seeding configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedPolicy {
    /// Master seed used for the run.
    #[serde(default = "default_master_seed")]
    pub master_seed: u64,
    /// Optional label used when deriving substream seeds (documented in provenance).
    #[serde(default)]
    pub label: Option<String>,
}

fn default_master_seed() -> u64 {
    0xB007_5EED_B007_5EED_u64
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self {
            master_seed: default_master_seed(),
            label: None,
        }
    }
}

/// Sample file discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Root directory holding the per-sector subdirectories. Relative paths
    /// resolved from the CLI working dir.
    #[serde(default)]
    pub root: Option<PathBuf>,
    /// Prefix of a sector directory name; the quantum number is appended.
    #[serde(default = "default_sector_prefix")]
    pub sector_prefix: String,
    /// Glob matched against file names inside a sector directory.
    #[serde(default = "default_sample_pattern")]
    pub sample_pattern: String,
}

fn default_sector_prefix() -> String {
    "Sz=".to_string()
}

fn default_sample_pattern() -> String {
    "sample_*.json".to_string()
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            root: None,
            sector_prefix: default_sector_prefix(),
            sample_pattern: default_sample_pattern(),
        }
    }
}

/// Output directory layout configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Root directory for run artefacts. Created if it does not exist. When
    /// unset the result grid is kept in memory only.
    #[serde(default)]
    pub run_directory: Option<PathBuf>,
    /// Result filename relative to `run_directory`.
    #[serde(default = "default_result_filename")]
    pub result_file: PathBuf,
}

fn default_result_filename() -> PathBuf {
    PathBuf::from("bootstrapped.json")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            run_directory: None,
            result_file: default_result_filename(),
        }
    }
}
