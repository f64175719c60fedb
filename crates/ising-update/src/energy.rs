//! Per-model local energies, energy deltas, and acceptance rules.
//!
//! Couplings are ferromagnetic with unit strength throughout.

use ising_core::SimRng;

/// Energy change from flipping a binary spin `s` whose four neighbours sum
/// to `neighbor_sum`, under field `h`: `ΔE = 2·s·(nb + h)`.
#[inline]
pub fn binary_flip_delta(spin: i8, neighbor_sum: i32, field: f64) -> f64 {
    2.0 * spin as f64 * (neighbor_sum as f64 + field)
}

/// Energy of a rotor at angle `theta`:
/// `−Σ cos(θ − θ_nb) − h·cos θ`.
#[inline]
pub fn rotor_site_energy(theta: f64, neighbors: &[f64; 4], field: f64) -> f64 {
    let coupling: f64 = neighbors.iter().map(|&nb| (theta - nb).cos()).sum();
    -coupling - field * theta.cos()
}

/// Energy of a multi-state site in `state`:
/// `−Σ [s = s_nb] − h·[s = 0]`.  The field favours state 0 only.
#[inline]
pub fn potts_site_energy(state: u8, neighbors: &[u8; 4], field: f64) -> f64 {
    let matches = neighbors.iter().filter(|&&nb| nb == state).count() as f64;
    let field_term = if state == 0 { field } else { 0.0 };
    -matches - field_term
}

/// Field-energy change from flipping a whole cluster whose spins sum to
/// `spin_sum`: `ΔE = 2h·Σ s_i`.
#[inline]
pub fn cluster_flip_delta(field: f64, spin_sum: i64) -> f64 {
    2.0 * field * spin_sum as f64
}

/// Wolff bond probability `1 − exp(−2β)`.
#[inline]
pub fn bond_probability(beta: f64) -> f64 {
    1.0 - (-2.0 * beta).exp()
}

/// Metropolis rule: accept when `ΔE ≤ 0`, else with probability
/// `exp(−β·ΔE)`.
///
/// A non-positive `ΔE` is accepted without consuming a draw.
#[inline]
pub fn metropolis_accept(delta: f64, beta: f64, rng: &mut SimRng) -> bool {
    delta <= 0.0 || rng.uniform() < (-beta * delta).exp()
}
