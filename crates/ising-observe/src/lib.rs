//! `ising-observe` — observable calculator for the spin-lattice simulator.
//!
//! Everything here is a pure function of a [`Lattice`] snapshot and the
//! current [`SimParams`]; nothing mutates the lattice.
//!
//! | Model         | Scalar order parameter                     | Vector      |
//! |---------------|--------------------------------------------|-------------|
//! | Binary        | `Σ s / N` in `[−1, 1]`                      | —           |
//! | Continuous    | `√(Mx² + My²)` in `[0, 1]`                  | `(Mx, My)`  |
//! | Multi-state   | `(n₀ − N/q) / (N − N/q)`                    | —           |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Lattice sums run on Rayon's thread pool.               |
//!
//! [`Lattice`]: ising_core::Lattice
//! [`SimParams`]: ising_core::SimParams

pub mod energy;
pub mod observables;
pub mod stats;


pub use energy::energy_per_site;
pub use observables::{measure, Observables};
pub use stats::{ObservableAccumulator, RunningStats, ThermoSummary};
