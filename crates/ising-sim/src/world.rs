//! The mutable simulation state guarded by the clock's lattice lock.

use std::time::Duration;

use ising_core::{CoreResult, Lattice, ModelKind, SimParams, SimRng, SweepCount};
use ising_observe::measure;
use ising_update::{StepOutcome, UpdateEngine};

use crate::{Frame, StateSnapshot};

/// Result of one synchronous [`Simulation::advance`](crate::Simulation::advance).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// `step()` calls made.
    pub steps:   u64,
    /// Steps that changed at least one site.
    pub changed: u64,
    /// Outcome of the final step, `None` when no step ran.
    pub last:    Option<StepOutcome>,
}

impl BatchSummary {
    fn record(&mut self, outcome: StepOutcome) {
        self.steps += 1;
        if outcome.changed_lattice() {
            self.changed += 1;
        }
        self.last = Some(outcome);
    }

    pub(crate) fn absorb(&mut self, later: BatchSummary) {
        self.steps += later.steps;
        self.changed += later.changed;
        self.last = later.last.or(self.last);
    }
}

/// Lattice plus everything only the single mutator may touch.
#[derive(Debug)]
pub(crate) struct World {
    lattice: Lattice,
    engine:  UpdateEngine,
    rng:     SimRng,
    sweep:   SweepCount,
    /// Set by any step that changes a site, cleared when a frame is emitted.
    dirty:   bool,
}

impl World {
    pub(crate) fn create(size: usize, params: &SimParams, mut rng: SimRng) -> CoreResult<Self> {
        let lattice = Lattice::create(size, params.model(), params.state_count(), &mut rng)?;
        Ok(Self {
            lattice,
            engine: UpdateEngine::new(),
            rng,
            sweep: SweepCount::ZERO,
            dirty: true,
        })
    }

    pub(crate) fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub(crate) fn sweep(&self) -> SweepCount {
        self.sweep
    }

    /// Derive an RNG stream for a replacement world.
    pub(crate) fn child_rng(&mut self) -> SimRng {
        self.rng.child(self.sweep.0)
    }

    /// Replace the lattice with a freshly randomized one of side `size`
    /// under `params`.  The step counter restarts at zero.
    pub(crate) fn reallocate(&mut self, size: usize, params: &SimParams) -> CoreResult<()> {
        self.lattice = Lattice::create(size, params.model(), params.state_count(), &mut self.rng)?;
        self.sweep = SweepCount::ZERO;
        self.dirty = true;
        Ok(())
    }

    /// `true` when the lattice representation no longer matches `params`:
    /// a different model kind, or a different `q` for the multi-state model.
    pub(crate) fn is_stale(&self, params: &SimParams) -> bool {
        if self.lattice.model() != params.model() {
            return true;
        }
        params.model() == ModelKind::MultiState
            && self.lattice.state_count() != Some(params.state_count())
    }

    /// Reallocate if stale.  Returns `true` when the lattice was replaced.
    pub(crate) fn sync(&mut self, params: &SimParams) -> CoreResult<bool> {
        if !self.is_stale(params) {
            return Ok(false);
        }
        let from = self.lattice.model();
        self.reallocate(self.lattice.size(), params)?;
        log::info!(
            "reallocated {size}x{size} lattice: {from} -> {to}",
            size = self.lattice.size(),
            to = params.model(),
        );
        Ok(true)
    }

    /// Run one batch of `params.steps_per_frame()` steps.
    pub(crate) fn run_batch(&mut self, params: &SimParams) -> CoreResult<BatchSummary> {
        self.sync(params)?;
        let mut summary = BatchSummary::default();
        for _ in 0..params.steps_per_frame() {
            let outcome = self.engine.step(&mut self.lattice, params, &mut self.rng);
            self.sweep.advance();
            self.dirty |= outcome.changed_lattice();
            summary.record(outcome);
        }
        Ok(summary)
    }

    /// Clear and return the changed-since-last-frame flag.
    pub(crate) fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub(crate) fn frame(&self, params: &SimParams, timestamp: Duration) -> Frame {
        Frame {
            lattice:     self.lattice.clone(),
            observables: measure(&self.lattice, params),
            sweep:       self.sweep,
            timestamp,
        }
    }

    pub(crate) fn snapshot(&self, params: &SimParams) -> StateSnapshot {
        StateSnapshot {
            lattice:     self.lattice.clone(),
            observables: measure(&self.lattice, params),
            model:       self.lattice.model(),
            size:        self.lattice.size(),
            sweep:       self.sweep,
        }
    }
}
