//! Order parameters per model and the combined [`measure`] entry point.

use ising_core::{Lattice, ModelKind, SimParams, Spins};

use crate::energy::energy_per_site;

/// Sum `f(k)` over `k in 0..n`.
#[cfg(not(feature = "parallel"))]
pub(crate) fn sum_sites<F>(n: usize, f: F) -> f64
where
    F: Fn(usize) -> f64 + Sync + Send,
{
    (0..n).map(f).sum()
}

/// Sum `f(k)` over `k in 0..n` on Rayon's thread pool.
#[cfg(feature = "parallel")]
pub(crate) fn sum_sites<F>(n: usize, f: F) -> f64
where
    F: Fn(usize) -> f64 + Sync + Send,
{
    use rayon::prelude::*;
    (0..n).into_par_iter().map(f).sum()
}

// ── Observables ───────────────────────────────────────────────────────────────

/// Everything the calculator reports for one lattice snapshot.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Observables {
    pub model:           ModelKind,
    /// Magnetization (binary), `|M|` (continuous), or the normalized
    /// state-0 excess (multi-state).
    pub order_parameter: f64,
    /// `(Mx, My)` for the continuous model only.
    pub vector:          Option<[f64; 2]>,
    /// Nearest-neighbour plus field energy divided by `N`.
    pub energy_per_site: f64,
    /// `q` for the multi-state model only.
    pub state_count:     Option<u8>,
}

/// Measure every observable of `lattice` under `params`.
///
/// The order parameter depends only on the lattice; the energy also uses
/// the boundary policy and field from `params`.
pub fn measure(lattice: &Lattice, params: &SimParams) -> Observables {
    let (order_parameter, vector) = match lattice.spins() {
        Spins::Binary(cells) => (binary_magnetization(cells), None),
        Spins::Continuous(angles) => {
            let [mx, my] = rotor_magnetization(angles);
            ((mx * mx + my * my).sqrt(), Some([mx, my]))
        }
        Spins::MultiState { states, q } => (potts_order(states, *q), None),
    };

    Observables {
        model: lattice.model(),
        order_parameter,
        vector,
        energy_per_site: energy_per_site(lattice, params),
        state_count: lattice.state_count(),
    }
}

/// `Σ s / N`.  Empty input measures 0.
pub fn binary_magnetization(cells: &[i8]) -> f64 {
    if cells.is_empty() {
        return 0.0;
    }
    sum_sites(cells.len(), |k| cells[k] as f64) / cells.len() as f64
}

/// `(Σ cos θ, Σ sin θ) / N`.
pub fn rotor_magnetization(angles: &[f64]) -> [f64; 2] {
    if angles.is_empty() {
        return [0.0, 0.0];
    }
    let n = angles.len() as f64;
    let mx = sum_sites(angles.len(), |k| angles[k].cos());
    let my = sum_sites(angles.len(), |k| angles[k].sin());
    [mx / n, my / n]
}

/// `(n₀ − N/q) / (N − N/q)`: `1` when every site is in state 0, `0` for an
/// exactly uniform distribution.  Returns 0 when the denominator vanishes.
pub fn potts_order(states: &[u8], q: u8) -> f64 {
    let total = states.len() as f64;
    let expected = total / q.max(1) as f64;
    let denominator = total - expected;
    if denominator <= 0.0 {
        return 0.0;
    }
    let zeros = sum_sites(states.len(), |k| if states[k] == 0 { 1.0 } else { 0.0 });
    (zeros - expected) / denominator
}
