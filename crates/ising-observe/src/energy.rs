//! Total energy per site.
//!
//! Couplings are ferromagnetic with unit strength:
//!
//! | Model       | Bond energy          | Field energy   |
//! |-------------|----------------------|----------------|
//! | Binary      | `−s·s'`              | `−h·s`         |
//! | Continuous  | `−cos(θ − θ')`       | `−h·cos θ`     |
//! | Multi-state | `−[s = s']`          | `−h·[s = 0]`   |
//!
//! Every bond between two lattice sites is counted once.  Under a fixed
//! boundary the bonds from edge sites to the virtual boundary values are
//! counted once as well, so an ordered lattice matching its boundary has a
//! lower energy than an ordered periodic one.

use ising_core::lattice::{angle_grid, binary_grid, resolve, state_grid, Grid, NEIGHBOR_OFFSETS};
use ising_core::{BoundaryKind, Lattice, SimParams, Spins};

use crate::observables::sum_sites;

/// Total energy of `lattice` divided by the number of sites.
pub fn energy_per_site(lattice: &Lattice, params: &SimParams) -> f64 {
    let n = lattice.site_count();
    if n == 0 {
        return 0.0;
    }
    let (size, boundary, h) = (lattice.size(), params.boundary(), params.field());

    let total = match lattice.spins() {
        Spins::Binary(cells) => total_energy(
            binary_grid(cells, size, boundary),
            cells,
            boundary,
            |s, nb| -(s as f64) * nb as f64,
            |s| -h * s as f64,
        ),
        Spins::Continuous(cells) => total_energy(
            angle_grid(cells, size, boundary),
            cells,
            boundary,
            |theta, nb| -(theta - nb).cos(),
            |theta| -h * theta.cos(),
        ),
        Spins::MultiState { states, q } => total_energy(
            state_grid(states, size, boundary, *q),
            states,
            boundary,
            |s, nb| if s == nb { -1.0 } else { 0.0 },
            |s| if s == 0 { -h } else { 0.0 },
        ),
    };
    total / n as f64
}

/// Sum bond and field energies over all sites.
///
/// Each site sees its four neighbours.  A bond to another site is seen from
/// both ends and weighted by one half; a bond to a fixed boundary value is
/// seen only from inside and weighted fully.
fn total_energy<T, B, F>(grid: Grid<'_, T>, cells: &[T], boundary: BoundaryKind, bond: B, field: F) -> f64
where
    T: Copy + Sync,
    B: Fn(T, T) -> f64 + Sync + Send,
    F: Fn(T) -> f64 + Sync + Send,
{
    let size = grid.size();
    sum_sites(cells.len(), |k| {
        let (i, j) = ((k / size) as isize, (k % size) as isize);
        let value = cells[k];
        let bonds: f64 = NEIGHBOR_OFFSETS
            .iter()
            .map(|&(di, dj)| {
                let (ni, nj) = (i + di, j + dj);
                let weight = if resolve(size, boundary, ni, nj).is_some() { 0.5 } else { 1.0 };
                weight * bond(value, grid.get(ni, nj))
            })
            .sum();
        bonds + field(value)
    })
}
