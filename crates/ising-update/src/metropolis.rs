//! Single-site Metropolis sweeps.
//!
//! Each sweep visits every site exactly once in the order given by `order`,
//! a fresh uniform permutation per sweep (random sequential update).  Every
//! visit makes one proposal and decides it with one Metropolis test; the
//! neighbour values are re-read through the boundary-aware [`Grid`] on each
//! visit so earlier acceptances in the same sweep are seen.
//!
//! All three functions return the number of accepted proposals.
//!
//! [`Grid`]: ising_core::Grid

use ising_core::lattice::{angle_grid, binary_grid, state_grid, wrap_angle};
use ising_core::{SimParams, SimRng};

use crate::energy::{binary_flip_delta, metropolis_accept, potts_site_energy, rotor_site_energy};

/// Half-width of the uniform angle proposal, in radians.
pub const ANGLE_STEP: f64 = 0.5;

/// Binary sweep: propose `s → −s` with `ΔE = 2·s·(nb + h)`.
pub fn sweep_binary(
    cells:  &mut [i8],
    size:   usize,
    params: &SimParams,
    order:  &[usize],
    rng:    &mut SimRng,
) -> usize {
    let (beta, field, boundary) = (params.beta(), params.field(), params.boundary());
    let mut accepted = 0;

    for &k in order {
        let spin = cells[k];
        let neighbor_sum: i32 = binary_grid(cells, size, boundary)
            .neighbors(k)
            .iter()
            .map(|&s| s as i32)
            .sum();

        let delta = binary_flip_delta(spin, neighbor_sum, field);
        if metropolis_accept(delta, beta, rng) {
            cells[k] = -spin;
            accepted += 1;
        }
    }
    accepted
}

/// Continuous sweep: propose `θ → wrap(θ + U(−0.5, 0.5))`.
pub fn sweep_continuous(
    cells:  &mut [f64],
    size:   usize,
    params: &SimParams,
    order:  &[usize],
    rng:    &mut SimRng,
) -> usize {
    let (beta, field, boundary) = (params.beta(), params.field(), params.boundary());
    let mut accepted = 0;

    for &k in order {
        let theta = cells[k];
        let proposal = wrap_angle(theta + rng.gen_range(-ANGLE_STEP..ANGLE_STEP));
        let neighbors = angle_grid(cells, size, boundary).neighbors(k);

        let delta = rotor_site_energy(proposal, &neighbors, field)
            - rotor_site_energy(theta, &neighbors, field);
        if metropolis_accept(delta, beta, rng) {
            cells[k] = proposal;
            accepted += 1;
        }
    }
    accepted
}

/// Multi-state sweep: propose a state drawn uniformly from the `q − 1`
/// states other than the current one.
pub fn sweep_potts(
    cells:  &mut [u8],
    size:   usize,
    q:      u8,
    params: &SimParams,
    order:  &[usize],
    rng:    &mut SimRng,
) -> usize {
    if q < 2 {
        return 0;
    }
    let (beta, field, boundary) = (params.beta(), params.field(), params.boundary());
    let mut accepted = 0;

    for &k in order {
        let state = cells[k];
        // Draw from 0..q-1 and skip over the current state.
        let draw = rng.gen_range(0..q - 1);
        let proposal = if draw >= state { draw + 1 } else { draw };
        let neighbors = state_grid(cells, size, boundary, q).neighbors(k);

        let delta = potts_site_energy(proposal, &neighbors, field)
            - potts_site_energy(state, &neighbors, field);
        if metropolis_accept(delta, beta, rng) {
            cells[k] = proposal;
            accepted += 1;
        }
    }
    accepted
}
