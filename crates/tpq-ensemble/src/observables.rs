use crate::reweight::CanonicalMoments;

/// The seven derived observable curves for one (field, replica) pair, each
/// aligned with the beta ladder.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservableSet {
    /// Canonical energy.
    pub energy: Vec<f64>,
    /// Canonical entropy.
    pub entropy: Vec<f64>,
    /// Canonical magnetization.
    pub magnetization: Vec<f64>,
    /// Magnetic susceptibility from magnetization fluctuations.
    pub susceptibility: Vec<f64>,
    /// Specific heat from energy fluctuations.
    pub specific_heat: Vec<f64>,
    /// Specific heat from the entropy derivative, −β·dS/dβ.
    pub specific_heat_from_entropy: Vec<f64>,
    /// Shifted partition function, non-negative by construction.
    pub partition: Vec<f64>,
}

/// Derives the observable curves from canonical moments at one field value.
pub fn derive(
    beta: &[f64],
    field: f64,
    lambda_min: f64,
    moments: &CanonicalMoments,
) -> ObservableSet {
    let n = beta.len();
    let mut energy = Vec::with_capacity(n);
    let mut entropy = Vec::with_capacity(n);
    let mut magnetization = Vec::with_capacity(n);
    let mut susceptibility = Vec::with_capacity(n);
    let mut specific_heat = Vec::with_capacity(n);
    let mut partition = Vec::with_capacity(n);
    for i in 0..n {
        let ene = moments.ene[i];
        let mag = moments.mag[i];
        let shifted = ene - field * mag;
        energy.push(ene);
        entropy.push(beta[i] * (shifted - lambda_min) + moments.partition[i].ln());
        magnetization.push(mag);
        susceptibility.push(beta[i] * (moments.mag_sq[i] - mag * mag));
        specific_heat.push(
            beta[i]
                * beta[i]
                * (moments.ene_sq[i] - 2.0 * field * moments.ene_mag[i]
                    + field * field * moments.mag_sq[i]
                    - shifted * shifted),
        );
        partition.push(moments.partition[i]);
    }
    let specific_heat_from_entropy = entropy_derivative(beta, &entropy);
    ObservableSet {
        energy,
        entropy,
        magnetization,
        susceptibility,
        specific_heat,
        specific_heat_from_entropy,
        partition,
    }
}

/// Computes −β·dS/dβ with a centered difference at interior indices and
/// one-sided differences at the ladder ends.
fn entropy_derivative(beta: &[f64], entropy: &[f64]) -> Vec<f64> {
    let n = beta.len();
    if n < 2 {
        // The derivative is undefined on a single-point ladder.
        return vec![0.0; n];
    }
    let mut out = Vec::with_capacity(n);
    out.push(-beta[0] * (entropy[1] - entropy[0]) / (beta[1] - beta[0]));
    for i in 1..n - 1 {
        out.push(-beta[i] * (entropy[i + 1] - entropy[i - 1]) / (beta[i + 1] - beta[i - 1]));
    }
    out.push(-beta[n - 1] * (entropy[n - 1] - entropy[n - 2]) / (beta[n - 1] - beta[n - 2]));
    out
}
