use tpq_core::RngHandle;

use crate::dataset::{SectorDataset, WeightedSector};
use crate::determinism;

/// Per-sector, per-temperature bootstrap moments.
#[derive(Debug, Clone, PartialEq)]
pub struct SectorMoments {
    /// Mean weighted squared norm at each temperature index.
    pub sq_norm: Vec<f64>,
    /// Mean weighted norm²·energy at each temperature index.
    pub energy: Vec<f64>,
    /// Mean weighted norm²·squared-energy at each temperature index.
    pub sq_energy: Vec<f64>,
}

/// One bootstrap replica: an independent draw for every sector.
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapReplica {
    /// Per-sector moments aligned with the dataset's sector order.
    pub sectors: Vec<SectorMoments>,
}

/// Draws one sector's moments by resampling its rows with replacement.
///
/// The draw keeps the sector's original sample count: n indices are drawn
/// uniformly from 0..n and the per-temperature quantities are averaged over
/// the drawn rows.
pub fn draw_moments(sector: &WeightedSector, rng: &mut RngHandle) -> SectorMoments {
    let count = sector.sample_count();
    let picks: Vec<usize> = (0..count).map(|_| rng.index(count)).collect();
    averaged_moments(sector, &picks)
}

/// Moments of the full, un-resampled sample set (bootstrap disabled).
pub fn identity_moments(sector: &WeightedSector) -> SectorMoments {
    let picks: Vec<usize> = (0..sector.sample_count()).collect();
    averaged_moments(sector, &picks)
}

fn averaged_moments(sector: &WeightedSector, picks: &[usize]) -> SectorMoments {
    let n_beta = sector.sq_norm.first().map_or(0, Vec::len);
    let mut sq_norm = vec![0.0; n_beta];
    let mut energy = vec![0.0; n_beta];
    let mut sq_energy = vec![0.0; n_beta];
    for &pick in picks {
        for i in 0..n_beta {
            sq_norm[i] += sector.sq_norm[pick][i];
            energy[i] += sector.energy[pick][i];
            sq_energy[i] += sector.sq_energy[pick][i];
        }
    }
    let count = picks.len().max(1) as f64;
    for i in 0..n_beta {
        sq_norm[i] /= count;
        energy[i] /= count;
        sq_energy[i] /= count;
    }
    SectorMoments {
        sq_norm,
        energy,
        sq_energy,
    }
}

/// Generates `replicas` independent bootstrap replicas from the dataset.
///
/// Replicas depend only on the master seed, never on the field grid; the
/// caller generates them once and reuses them for every field value.
pub fn generate_replicas(
    dataset: &SectorDataset,
    replicas: usize,
    master_seed: u64,
) -> Vec<BootstrapReplica> {
    (0..replicas)
        .map(|replica_index| BootstrapReplica {
            sectors: dataset
                .sectors
                .iter()
                .enumerate()
                .map(|(sector_index, sector)| {
                    let seed = determinism::draw_seed(master_seed, replica_index, sector_index);
                    let mut rng = RngHandle::from_seed(seed);
                    draw_moments(sector, &mut rng)
                })
                .collect(),
        })
        .collect()
}

/// Builds the single identity replica covering the full sample set.
pub fn identity_replica(dataset: &SectorDataset) -> BootstrapReplica {
    BootstrapReplica {
        sectors: dataset.sectors.iter().map(identity_moments).collect(),
    }
}
