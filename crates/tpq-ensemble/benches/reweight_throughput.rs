use criterion::{criterion_group, criterion_main, Criterion};

use tpq_ensemble::dataset::{DatasetScan, SampleRecord, SectorDataset, SectorScan};
use tpq_ensemble::observables;
use tpq_ensemble::resample::generate_replicas;
use tpq_ensemble::reweight::{canonical_moments, FieldWeights};

fn sample_dataset() -> SectorDataset {
    let beta: Vec<f64> = (0..64).map(|i| 0.05 * i as f64).collect();
    let sectors = (0..9)
        .map(|index| {
            let quantum_number = -8 + 2 * index as i64;
            let base = -10.0 + 0.3 * index as f64;
            let samples = (0..32)
                .map(|trial| {
                    let wobble = 0.01 * trial as f64;
                    SampleRecord {
                        energy: beta.iter().map(|&b| base + wobble - 0.1 * b).collect(),
                        squared_energy: beta
                            .iter()
                            .map(|&b| (base + wobble - 0.1 * b).powi(2) + 0.5)
                            .collect(),
                        norm: beta.iter().map(|&b| (-0.05 * b).exp()).collect(),
                    }
                })
                .collect();
            SectorScan {
                quantum_number,
                lowest_energy: base - 0.5,
                samples,
            }
        })
        .collect();
    let scan = DatasetScan {
        beta,
        sectors,
    };
    let reference = scan.global_minimum().unwrap();
    SectorDataset::assemble(scan, reference)
}

fn bench_reweight(c: &mut Criterion) {
    let dataset = sample_dataset();
    let replicas = generate_replicas(&dataset, 16, 42);
    let weights = FieldWeights::new(&dataset, 1.5);

    c.bench_function("canonical_combine", |b| {
        b.iter(|| {
            for replica in &replicas {
                let moments = canonical_moments(&weights, &dataset, replica).unwrap();
                let _ = observables::derive(&dataset.beta, 1.5, weights.lambda_min, &moments);
            }
        })
    });
}

criterion_group!(benches, bench_reweight);
criterion_main!(benches);
