#![deny(missing_docs)]

//! Bootstrap reweighting engine for sector-resolved TPQ samples.
//!
//! The pipeline turns per-magnetization-sector sample collections into a grid
//! of canonical-ensemble observables indexed by (magnetic field, inverse
//! temperature), each reported as mean ± bootstrap error.

/// YAML configuration schema and defaults.
pub mod config;
/// Two-stage loader for per-sector sample collections.
pub mod dataset;
/// Deterministic seed derivation helpers.
pub mod determinism;
/// Pipeline driver and public `run` entry point.
pub mod kernel;
/// Observable derivation from canonical moments.
pub mod observables;
/// Bootstrap resampling engine.
pub mod resample;
/// Result grid aggregation and persistence.
pub mod result;
/// Boltzmann reweighting across sectors.
pub mod reweight;

pub use config::{
    AnalysisConfig, BootstrapConfig, FieldGridConfig, InputConfig, OutputConfig, SeedPolicy,
    SystemConfig,
};
pub use dataset::{DatasetScan, GlobalMinimum, SectorDataset, SectorScan, WeightedSector};
pub use kernel::{run, RunSummary};
pub use observables::ObservableSet;
pub use resample::{BootstrapReplica, SectorMoments};
pub use result::{BootstrapResult, ObservableTable};
pub use reweight::{CanonicalMoments, FieldWeights};
