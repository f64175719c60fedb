//! Read-only snapshots handed to consumers.

use std::time::Duration;

use ising_core::{Lattice, ModelKind, SweepCount};
use ising_observe::Observables;

/// One emitted snapshot: a copy of the lattice plus its observables.
///
/// Frames own their data, so a consumer may keep one for as long as it
/// likes without holding up the drive loop.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub lattice:     Lattice,
    pub observables: Observables,
    /// Steps completed on this lattice when the frame was taken.
    pub sweep:       SweepCount,
    /// Wall time since the [`Simulation`](crate::Simulation) was created.
    pub timestamp:   Duration,
}

impl Frame {
    #[inline]
    pub fn model(&self) -> ModelKind {
        self.observables.model
    }

    #[inline]
    pub fn order_parameter(&self) -> f64 {
        self.observables.order_parameter
    }

    /// `(Mx, My)`, continuous model only.
    #[inline]
    pub fn vector(&self) -> Option<[f64; 2]> {
        self.observables.vector
    }

    /// `q`, multi-state model only.
    #[inline]
    pub fn state_count(&self) -> Option<u8> {
        self.observables.state_count
    }
}

/// On-demand view returned by
/// [`Simulation::get_current_state`](crate::Simulation::get_current_state).
#[derive(Clone, Debug, PartialEq)]
pub struct StateSnapshot {
    pub lattice:     Lattice,
    pub observables: Observables,
    pub model:       ModelKind,
    pub size:        usize,
    pub sweep:       SweepCount,
}
