use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tpq_core::errors::ErrorInfo;
use tpq_core::{RunProvenance, TpqError};

use crate::observables::ObservableSet;

/// Mean and bootstrap error surfaces for one observable, indexed
/// [field][temperature].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ObservableTable {
    /// Mean over the bootstrap replicas.
    #[serde(rename = "Average")]
    pub average: Vec<Vec<f64>>,
    /// Population standard deviation over the bootstrap replicas.
    #[serde(rename = "Error")]
    pub error: Vec<Vec<f64>>,
}

impl ObservableTable {
    fn push_row(&mut self, row: (Vec<f64>, Vec<f64>)) {
        self.average.push(row.0);
        self.error.push(row.1);
    }
}

/// Persisted result grid, field names matching the record consumed by the
/// downstream plotting scripts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BootstrapResult {
    /// Shared beta ladder.
    #[serde(rename = "Beta")]
    pub beta: Vec<f64>,
    /// Magnetic field grid, complete from the first write.
    #[serde(rename = "MagneticField")]
    pub magnetic_field: Vec<f64>,
    /// Lattice size L, the per-site normalization divisor for consumers.
    #[serde(rename = "SystemSize")]
    pub system_size: i64,
    /// Number of bootstrap replicas behind every error bar.
    #[serde(rename = "BootstrapSize")]
    pub bootstrap_size: usize,
    /// Canonical energy surfaces.
    #[serde(rename = "Energy")]
    pub energy: ObservableTable,
    /// Canonical magnetization surfaces.
    #[serde(rename = "Magnetization")]
    pub magnetization: ObservableTable,
    /// Susceptibility surfaces.
    #[serde(rename = "Susceptibility")]
    pub susceptibility: ObservableTable,
    /// Fluctuation-form specific heat surfaces.
    #[serde(rename = "SpecificHeat")]
    pub specific_heat: ObservableTable,
    /// Entropy-derivative specific heat surfaces.
    #[serde(rename = "SpecificHeatFromS")]
    pub specific_heat_from_entropy: ObservableTable,
    /// Entropy surfaces.
    #[serde(rename = "Entropy")]
    pub entropy: ObservableTable,
    /// Shifted partition function surfaces, a numerical sanity check.
    #[serde(rename = "PositivePartitionFunction")]
    pub partition: ObservableTable,
    /// Provenance block tying the grid to its configuration and seed.
    #[serde(rename = "Provenance", default, skip_serializing_if = "Option::is_none")]
    pub provenance: Option<RunProvenance>,
}

impl BootstrapResult {
    /// Creates an empty result grid for the given ladder and field grid.
    pub fn new(
        beta: Vec<f64>,
        magnetic_field: Vec<f64>,
        system_size: i64,
        bootstrap_size: usize,
    ) -> Self {
        Self {
            beta,
            magnetic_field,
            system_size,
            bootstrap_size,
            energy: ObservableTable::default(),
            magnetization: ObservableTable::default(),
            susceptibility: ObservableTable::default(),
            specific_heat: ObservableTable::default(),
            specific_heat_from_entropy: ObservableTable::default(),
            entropy: ObservableTable::default(),
            partition: ObservableTable::default(),
            provenance: None,
        }
    }

    /// Collapses the replica dimension for one field value and appends the
    /// resulting (Average, Error) rows to every observable table.
    pub fn absorb_field(&mut self, sets: &[ObservableSet]) {
        self.energy.push_row(mean_and_error(sets, |set| &set.energy));
        self.magnetization
            .push_row(mean_and_error(sets, |set| &set.magnetization));
        self.susceptibility
            .push_row(mean_and_error(sets, |set| &set.susceptibility));
        self.specific_heat
            .push_row(mean_and_error(sets, |set| &set.specific_heat));
        self.specific_heat_from_entropy
            .push_row(mean_and_error(sets, |set| &set.specific_heat_from_entropy));
        self.entropy
            .push_row(mean_and_error(sets, |set| &set.entropy));
        self.partition
            .push_row(mean_and_error(sets, |set| &set.partition));
    }

    /// Number of field values aggregated so far.
    pub fn fields_completed(&self) -> usize {
        self.energy.average.len()
    }

    /// Writes the grid to disk, overwriting any previous write.
    pub fn store(&self, path: &Path) -> Result<(), TpqError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| {
                TpqError::Serde(
                    ErrorInfo::new("result-mkdir", err.to_string())
                        .with_context("path", parent.display().to_string()),
                )
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|err| {
            TpqError::Serde(
                ErrorInfo::new("result-serialize", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        fs::write(path, json).map_err(|err| {
            TpqError::Serde(
                ErrorInfo::new("result-write", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })
    }

    /// Loads a persisted grid from disk.
    pub fn load(path: &Path) -> Result<Self, TpqError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            TpqError::Serde(
                ErrorInfo::new("result-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        serde_json::from_str(&contents).map_err(|err| {
            TpqError::Serde(
                ErrorInfo::new("result-parse", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })
    }
}

/// Mean and population standard deviation across replicas, per temperature.
fn mean_and_error<F>(sets: &[ObservableSet], select: F) -> (Vec<f64>, Vec<f64>)
where
    F: Fn(&ObservableSet) -> &Vec<f64>,
{
    let Some(first) = sets.first() else {
        return (Vec::new(), Vec::new());
    };
    let n_beta = select(first).len();
    let count = sets.len() as f64;
    let mut mean = vec![0.0; n_beta];
    for set in sets {
        for (i, &value) in select(set).iter().enumerate() {
            mean[i] += value;
        }
    }
    for value in &mut mean {
        *value /= count;
    }
    let mut variance = vec![0.0; n_beta];
    for set in sets {
        for (i, &value) in select(set).iter().enumerate() {
            let delta = value - mean[i];
            variance[i] += delta * delta;
        }
    }
    let error = variance
        .into_iter()
        .map(|sum| (sum / count).sqrt())
        .collect();
    (mean, error)
}
