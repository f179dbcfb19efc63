use tpq_core::errors::ErrorInfo;
use tpq_core::TpqError;

use crate::dataset::SectorDataset;
use crate::resample::BootstrapReplica;

/// Shifted Boltzmann weights combining the sectors at one field value.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldWeights {
    /// Field value the weights were computed for.
    pub field: f64,
    /// Minimum effective sector energy at this field value.
    pub lambda_min: f64,
    weights: Vec<Vec<f64>>,
}

impl FieldWeights {
    /// Computes `exp(-beta_i·(lambda_s − lambda_min))` for every sector s and
    /// temperature index i, with `lambda_s = lowest_energy(s) − h·m̃_s`.
    ///
    /// The shift by `lambda_min` keeps the largest exponent at zero so the
    /// weights cannot overflow.
    pub fn new(dataset: &SectorDataset, field: f64) -> Self {
        let lambdas: Vec<f64> = dataset
            .sectors
            .iter()
            .map(|sector| sector.lowest_energy - field * sector.magnetization())
            .collect();
        let lambda_min = lambdas.iter().copied().fold(f64::INFINITY, f64::min);
        let weights = lambdas
            .iter()
            .map(|&lambda| {
                dataset
                    .beta
                    .iter()
                    .map(|&beta| (-beta * (lambda - lambda_min)).exp())
                    .collect()
            })
            .collect();
        Self {
            field,
            lambda_min,
            weights,
        }
    }

    /// Weight row for the given sector index, aligned with the beta ladder.
    pub fn sector_row(&self, sector_index: usize) -> &[f64] {
        &self.weights[sector_index]
    }
}

/// Canonical per-temperature moments combined across all sectors.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalMoments {
    /// Canonical mean energy.
    pub ene: Vec<f64>,
    /// Canonical mean squared energy.
    pub ene_sq: Vec<f64>,
    /// Canonical mean magnetization.
    pub mag: Vec<f64>,
    /// Canonical mean squared magnetization.
    pub mag_sq: Vec<f64>,
    /// Canonical mean energy·magnetization cross term.
    pub ene_mag: Vec<f64>,
    /// Shifted partition function (the weighted-norm denominator).
    pub partition: Vec<f64>,
}

/// Combines one replica's sector moments into canonical moments.
///
/// All six sums run in a single pass over the weight matrix. The denominator
/// is checked for finiteness and positivity before any ratio is formed.
pub fn canonical_moments(
    weights: &FieldWeights,
    dataset: &SectorDataset,
    replica: &BootstrapReplica,
) -> Result<CanonicalMoments, TpqError> {
    if replica.sectors.len() != dataset.sectors.len() {
        return Err(TpqError::Data(
            ErrorInfo::new("replica-shape", "replica does not cover every sector")
                .with_context("replica_sectors", replica.sectors.len().to_string())
                .with_context("dataset_sectors", dataset.sectors.len().to_string()),
        ));
    }

    let n_beta = dataset.beta.len();
    let mut denom = vec![0.0; n_beta];
    let mut numer_e = vec![0.0; n_beta];
    let mut numer_e_sq = vec![0.0; n_beta];
    let mut numer_m = vec![0.0; n_beta];
    let mut numer_m_sq = vec![0.0; n_beta];
    let mut numer_em = vec![0.0; n_beta];
    for (sector_index, sector) in dataset.sectors.iter().enumerate() {
        let magnetization = sector.magnetization();
        let row = weights.sector_row(sector_index);
        let moments = &replica.sectors[sector_index];
        for i in 0..n_beta {
            let weighted_norm = row[i] * moments.sq_norm[i];
            let weighted_energy = row[i] * moments.energy[i];
            denom[i] += weighted_norm;
            numer_e[i] += weighted_energy;
            numer_e_sq[i] += row[i] * moments.sq_energy[i];
            numer_m[i] += magnetization * weighted_norm;
            numer_m_sq[i] += magnetization * magnetization * weighted_norm;
            numer_em[i] += magnetization * weighted_energy;
        }
    }

    for (i, &value) in denom.iter().enumerate() {
        if !value.is_finite() || value <= 0.0 {
            return Err(TpqError::Numeric(
                ErrorInfo::new(
                    "denom-nonfinite",
                    "partition denominator is not a positive finite number",
                )
                .with_context("beta_index", i.to_string())
                .with_context("beta", dataset.beta[i].to_string())
                .with_context("field", weights.field.to_string())
                .with_context("denom", value.to_string()),
            ));
        }
    }

    let ratio = |numer: &[f64]| -> Vec<f64> {
        numer
            .iter()
            .zip(denom.iter())
            .map(|(&n, &d)| n / d)
            .collect()
    };
    Ok(CanonicalMoments {
        ene: ratio(&numer_e),
        ene_sq: ratio(&numer_e_sq),
        mag: ratio(&numer_m),
        mag_sq: ratio(&numer_m_sq),
        ene_mag: ratio(&numer_em),
        partition: denom,
    })
}
