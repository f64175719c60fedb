//! `ising-core` — foundational types for the spin-lattice simulator.
//!
//! This crate is a dependency of every other `ising-*` crate.  It has no
//! `ising-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`kinds`]       | `ModelKind`, `BoundaryKind`, `AlgorithmKind`          |
//! | [`lattice`]     | `Lattice`, `Spins`, `SiteValue`, `Grid` neighbour view |
//! | [`params`]      | `SimParams` (validated parameter store)               |
//! | [`rng`]         | `SimRng` (seedable uniform source)                    |
//! | [`time`]        | `SweepCount`                                          |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to kinds and `SimParams`.   |

pub mod error;
pub mod kinds;
pub mod lattice;
pub mod params;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use kinds::{AlgorithmKind, BoundaryKind, ModelKind};
pub use lattice::{Grid, Lattice, SiteValue, Spins, TWO_PI};
pub use params::SimParams;
pub use rng::SimRng;
pub use time::SweepCount;
