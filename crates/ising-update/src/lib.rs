//! `ising-update` — Monte Carlo update engine.
//!
//! # One step
//!
//! ```text
//! step(lattice, params, rng):
//!   lattice model ≠ params model      → Skipped(ModelMismatch)
//!   algorithm = LocalSweep            → one Metropolis sweep, random
//!                                       permutation order, all L² sites
//!   algorithm = Cluster
//!     model ≠ Binary                  → Skipped(UnsupportedModel)
//!     |h| ≤ 1e-10                     → Skipped(ZeroField)
//!     otherwise                       → grow one Wolff cluster from a
//!                                       random seed, accept the whole flip
//!                                       on its field-energy change
//! ```
//!
//! Skipped steps leave the lattice untouched.  The engine never falls back
//! from `Cluster` to `LocalSweep` on its own; drivers that want a fallback
//! check [`StepOutcome::Skipped`] and call [`UpdateEngine::sweep`].
//!
//! # Quick-start
//!
//! ```rust
//! use ising_core::{Lattice, ModelKind, SimParams, SimRng};
//! use ising_update::UpdateEngine;
//!
//! let mut rng = SimRng::new(7);
//! let params = SimParams::new(2.0, ModelKind::Binary).unwrap();
//! let mut lattice = Lattice::create(16, ModelKind::Binary, 2, &mut rng).unwrap();
//! let mut engine = UpdateEngine::new();
//! for _ in 0..10 {
//!     engine.step(&mut lattice, &params, &mut rng);
//! }
//! ```

pub mod energy;
pub mod engine;
pub mod metropolis;
pub mod wolff;


pub use engine::{SkipReason, StepOutcome, UpdateEngine};
