use std::path::PathBuf;

use sha2::{Digest, Sha256};
use tpq_core::errors::ErrorInfo;
use tpq_core::{RunProvenance, SchemaVersion, TpqError};

use crate::config::AnalysisConfig;
use crate::dataset::SectorDataset;
use crate::observables::{self, ObservableSet};
use crate::resample;
use crate::result::BootstrapResult;
use crate::reweight::{self, FieldWeights};

/// Summary returned to callers after an analysis run completes.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Number of field values fully processed.
    pub fields_processed: usize,
    /// Number of bootstrap replicas behind every error bar.
    pub bootstrap_size: usize,
    /// Number of magnetization sectors combined.
    pub sector_count: usize,
    /// Length of the shared beta ladder.
    pub beta_count: usize,
    /// Path the result grid was persisted to, if a run directory was set.
    pub result_path: Option<PathBuf>,
    /// The aggregated result grid.
    pub result: BootstrapResult,
}

/// Runs the full bootstrap reweighting pipeline over the field grid.
///
/// The replica set is generated once up front and reused, read-only, for
/// every field value. When the configuration names a run directory the result
/// grid is rewritten after every completed field value, so an interrupted run
/// leaves the last completed field's full table on disk.
pub fn run(
    config: &AnalysisConfig,
    seed: u64,
    dataset: &SectorDataset,
) -> Result<RunSummary, TpqError> {
    if config.bootstrap.replicas == 0 {
        return Err(TpqError::Config(
            ErrorInfo::new("bootstrap-size", "bootstrap.replicas must be at least 1")
                .with_hint("use replicas: 1 for an error-free point estimate"),
        ));
    }

    let fields = config.field_grid.values();
    let replicas = resample::generate_replicas(dataset, config.bootstrap.replicas, seed);
    let result_path = config
        .output
        .run_directory
        .as_ref()
        .map(|directory| directory.join(&config.output.result_file));

    let mut result = BootstrapResult::new(
        dataset.beta.clone(),
        fields.clone(),
        config.system.lattice,
        config.bootstrap.replicas,
    );
    result.provenance = Some(build_provenance(config, seed)?);

    for &field in &fields {
        let weights = FieldWeights::new(dataset, field);
        let mut sets: Vec<ObservableSet> = Vec::with_capacity(replicas.len());
        for replica in &replicas {
            let moments = reweight::canonical_moments(&weights, dataset, replica)?;
            sets.push(observables::derive(
                &dataset.beta,
                field,
                weights.lambda_min,
                &moments,
            ));
        }
        result.absorb_field(&sets);
        if let Some(path) = &result_path {
            result.store(path)?;
        }
    }

    Ok(RunSummary {
        fields_processed: result.fields_completed(),
        bootstrap_size: config.bootstrap.replicas,
        sector_count: dataset.sectors.len(),
        beta_count: dataset.beta.len(),
        result_path,
        result,
    })
}

fn build_provenance(config: &AnalysisConfig, seed: u64) -> Result<RunProvenance, TpqError> {
    let encoded = serde_json::to_vec(config).map_err(|err| {
        TpqError::Serde(ErrorInfo::new("config-serialize", err.to_string()))
    })?;
    let mut hasher = Sha256::new();
    hasher.update(&encoded);
    let config_hash = hasher
        .finalize()
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect();
    let input_root = config
        .input
        .root
        .as_ref()
        .map(|root| root.display().to_string())
        .unwrap_or_default();
    Ok(RunProvenance {
        schema_version: SchemaVersion::default(),
        config_hash,
        input_root,
        seed,
        seed_label: config.seed_policy.label.clone(),
        created_at: chrono::Utc::now().to_rfc3339(),
        tool_versions: [("tpq-ensemble".to_string(), env!("CARGO_PKG_VERSION").to_string())]
            .into_iter()
            .collect(),
    })
}
