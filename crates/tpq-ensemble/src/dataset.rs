use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tpq_core::errors::ErrorInfo;
use tpq_core::TpqError;

use crate::config::InputConfig;

/// On-disk schema of one sampler output file. Unknown per-sample keys
/// (bond dimensions, timings) are ignored.
#[derive(Debug, Clone, Deserialize)]
struct SampleFile {
    beta: Vec<f64>,
    #[serde(rename = "LowestEnergy")]
    lowest_energy: f64,
    #[serde(rename = "Samples")]
    samples: Vec<SampleRecord>,
}

/// One stochastic trial as written by the sampler: three sequences aligned
/// to the shared beta ladder.
#[derive(Debug, Clone, Deserialize)]
pub struct SampleRecord {
    /// Running energy estimates along the ladder; the last entry is the
    /// sample's asymptotic estimate.
    #[serde(rename = "Energy")]
    pub energy: Vec<f64>,
    /// Running squared-energy estimates along the ladder.
    #[serde(rename = "SquaredEnergy")]
    pub squared_energy: Vec<f64>,
    /// Running amplitude norms along the ladder.
    #[serde(rename = "Norm")]
    pub norm: Vec<f64>,
}

/// Pass-1 view of one sector: its label, minimum energy and raw samples.
#[derive(Debug, Clone)]
pub struct SectorScan {
    /// Magnetization quantum number (2·Sz), in {-L, -L+2, .., L}.
    pub quantum_number: i64,
    /// Minimum asymptotic energy over the sector's sample files.
    pub lowest_energy: f64,
    /// Raw samples concatenated across the sector's files.
    pub samples: Vec<SampleRecord>,
}

/// Stabilizing reference energy: the minimum lowest energy over all sectors.
///
/// Only obtainable from a completed [`DatasetScan`], which makes the two-pass
/// ordering explicit in the types: per-sample weighting cannot start before
/// every sector's minimum is known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalMinimum(f64);

impl GlobalMinimum {
    /// Returns the reference energy value.
    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Result of pass 1: the shared beta ladder and every sector's scan.
#[derive(Debug, Clone)]
pub struct DatasetScan {
    /// Shared beta ladder, identical across every sector and sample.
    pub beta: Vec<f64>,
    /// Per-sector scans ordered by ascending quantum number.
    pub sectors: Vec<SectorScan>,
}

impl DatasetScan {
    /// Computes the global stabilizing reference across all sectors.
    pub fn global_minimum(&self) -> Result<GlobalMinimum, TpqError> {
        let minimum = self
            .sectors
            .iter()
            .map(|sector| sector.lowest_energy)
            .fold(f64::INFINITY, f64::min);
        if !minimum.is_finite() {
            return Err(TpqError::Config(
                ErrorInfo::new(
                    "no-sectors",
                    "cannot take a minimum energy over an empty sector set",
                )
                .with_hint("check the lattice size and input root"),
            ));
        }
        Ok(GlobalMinimum(minimum))
    }
}

/// One sector's stabilized per-sample rows, all indexed [sample][temperature].
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedSector {
    /// Magnetization quantum number (2·Sz).
    pub quantum_number: i64,
    /// Minimum asymptotic energy over the sector's samples.
    pub lowest_energy: f64,
    /// Weighted squared norms per sample.
    pub sq_norm: Vec<Vec<f64>>,
    /// Weighted norm²·energy per sample.
    pub energy: Vec<Vec<f64>>,
    /// Weighted norm²·squared-energy per sample.
    pub sq_energy: Vec<Vec<f64>>,
}

impl WeightedSector {
    /// Effective magnetization entering every reweighting formula.
    pub fn magnetization(&self) -> f64 {
        self.quantum_number as f64 / 2.0
    }

    /// Number of samples in the sector.
    pub fn sample_count(&self) -> usize {
        self.sq_norm.len()
    }
}

/// Immutable dataset passed between the pipeline stages.
#[derive(Debug, Clone, PartialEq)]
pub struct SectorDataset {
    /// Shared beta ladder.
    pub beta: Vec<f64>,
    /// Stabilizing reference energy the sample weights were computed with.
    pub reference_energy: f64,
    /// Weighted sectors ordered by ascending quantum number.
    pub sectors: Vec<WeightedSector>,
}

impl SectorDataset {
    /// Pass 2: turns a completed scan into stabilized per-sample rows.
    ///
    /// For every sample the stabilizing weight at temperature index i is
    /// `exp(0.5·beta_i·(gene − E_last))·norm_i`, with `E_last` the sample's
    /// asymptotic energy. The squared weight then scales the three stored
    /// quantities.
    pub fn assemble(scan: DatasetScan, reference: GlobalMinimum) -> Self {
        let gene = reference.value();
        let sectors = scan
            .sectors
            .into_iter()
            .map(|sector| {
                let mut sq_norm = Vec::with_capacity(sector.samples.len());
                let mut energy = Vec::with_capacity(sector.samples.len());
                let mut sq_energy = Vec::with_capacity(sector.samples.len());
                for sample in &sector.samples {
                    let asymptotic = sample.energy[sample.energy.len() - 1];
                    let mut sq_norm_row = Vec::with_capacity(scan.beta.len());
                    let mut energy_row = Vec::with_capacity(scan.beta.len());
                    let mut sq_energy_row = Vec::with_capacity(scan.beta.len());
                    for (i, &beta) in scan.beta.iter().enumerate() {
                        let weight = (0.5 * beta * (gene - asymptotic)).exp() * sample.norm[i];
                        let weight_sq = weight * weight;
                        sq_norm_row.push(weight_sq);
                        energy_row.push(weight_sq * sample.energy[i]);
                        sq_energy_row.push(weight_sq * sample.squared_energy[i]);
                    }
                    sq_norm.push(sq_norm_row);
                    energy.push(energy_row);
                    sq_energy.push(sq_energy_row);
                }
                WeightedSector {
                    quantum_number: sector.quantum_number,
                    lowest_energy: sector.lowest_energy,
                    sq_norm,
                    energy,
                    sq_energy,
                }
            })
            .collect();
        Self {
            beta: scan.beta,
            reference_energy: gene,
            sectors,
        }
    }

    /// Runs both loader passes over the sector directories under `root`.
    pub fn load(root: &Path, lattice: i64, input: &InputConfig) -> Result<Self, TpqError> {
        let scan = scan_sectors(root, lattice, input)?;
        let reference = scan.global_minimum()?;
        Ok(Self::assemble(scan, reference))
    }
}

/// Pass 1: discovers and parses every sector's sample files, validating the
/// beta ladder and recording each sector's lowest energy and sample count.
pub fn scan_sectors(
    root: &Path,
    lattice: i64,
    input: &InputConfig,
) -> Result<DatasetScan, TpqError> {
    let mut ladder: Option<Vec<f64>> = None;
    let mut sectors = Vec::new();
    for quantum_number in (-lattice..=lattice).step_by(2) {
        let directory = root.join(format!("{}{}", input.sector_prefix, quantum_number));
        let files = sample_files(&directory, &input.sample_pattern)?;
        if files.is_empty() {
            return Err(empty_sector_error(quantum_number, &directory));
        }

        let mut lowest_energy = f64::INFINITY;
        let mut samples = Vec::new();
        for path in &files {
            let file = read_sample_file(path)?;
            let reference = ladder.get_or_insert_with(|| file.beta.clone());
            if file.beta != *reference {
                return Err(TpqError::Data(
                    ErrorInfo::new(
                        "ladder-mismatch",
                        "beta ladder differs from the first loaded ladder",
                    )
                    .with_context("path", path.display().to_string())
                    .with_context("expected_len", reference.len().to_string())
                    .with_context("found_len", file.beta.len().to_string()),
                ));
            }
            for (index, sample) in file.samples.iter().enumerate() {
                let len = file.beta.len();
                if sample.energy.len() != len
                    || sample.squared_energy.len() != len
                    || sample.norm.len() != len
                {
                    return Err(TpqError::Data(
                        ErrorInfo::new(
                            "sample-length",
                            "sample sequences do not match the beta ladder length",
                        )
                        .with_context("path", path.display().to_string())
                        .with_context("sample", index.to_string()),
                    ));
                }
            }
            lowest_energy = lowest_energy.min(file.lowest_energy);
            samples.extend(file.samples);
        }

        if samples.is_empty() {
            return Err(empty_sector_error(quantum_number, &directory));
        }
        sectors.push(SectorScan {
            quantum_number,
            lowest_energy,
            samples,
        });
    }

    if sectors.is_empty() {
        return Err(TpqError::Config(
            ErrorInfo::new("no-sectors", "the lattice size implies no sectors")
                .with_context("lattice", lattice.to_string()),
        ));
    }
    let beta = ladder.unwrap_or_default();
    if beta.is_empty() {
        return Err(TpqError::Data(
            ErrorInfo::new("empty-ladder", "the shared beta ladder has no entries")
                .with_context("root", root.display().to_string()),
        ));
    }
    Ok(DatasetScan { beta, sectors })
}

fn sample_files(directory: &Path, pattern: &str) -> Result<Vec<PathBuf>, TpqError> {
    let full_pattern = directory.join(pattern).display().to_string();
    let entries = glob::glob(&full_pattern).map_err(|err| {
        TpqError::Config(
            ErrorInfo::new("sample-pattern", err.to_string())
                .with_context("pattern", full_pattern.clone()),
        )
    })?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|err| {
            TpqError::Serde(
                ErrorInfo::new("sample-glob", err.to_string())
                    .with_context("pattern", full_pattern.clone()),
            )
        })?;
        files.push(path);
    }
    Ok(files)
}

fn read_sample_file(path: &Path) -> Result<SampleFile, TpqError> {
    let contents = fs::read_to_string(path).map_err(|err| {
        TpqError::Serde(
            ErrorInfo::new("sample-read", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    serde_json::from_str(&contents).map_err(|err| {
        TpqError::Serde(
            ErrorInfo::new("sample-parse", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })
}

fn empty_sector_error(quantum_number: i64, directory: &Path) -> TpqError {
    TpqError::Config(
        ErrorInfo::new("empty-sector", "sector yielded no samples")
            .with_context("sector", format!("Sz={quantum_number}"))
            .with_context("path", directory.display().to_string())
            .with_hint("every sector needs at least one sample_*.json file with samples"),
    )
}
