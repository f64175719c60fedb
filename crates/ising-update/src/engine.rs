//! The `UpdateEngine` and its step dispatch.

use ising_core::{AlgorithmKind, Lattice, ModelKind, SimParams, SimRng, Spins};

use crate::energy::{bond_probability, cluster_flip_delta, metropolis_accept};
use crate::metropolis::{sweep_binary, sweep_continuous, sweep_potts};
use crate::wolff::ClusterScratch;

// ── Outcome types ─────────────────────────────────────────────────────────────

/// Why a step left the lattice untouched.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SkipReason {
    /// The cluster move needs `|h| > 1e-10`.
    ZeroField,
    /// The cluster move is only defined for the binary model.
    UnsupportedModel(ModelKind),
    /// The parameters name a different model than the lattice holds; the
    /// lattice is due for reallocation.
    ModelMismatch { lattice: ModelKind, params: ModelKind },
}

/// What one call to [`UpdateEngine::step`] did.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum StepOutcome {
    /// A full Metropolis sweep ran; `accepted` proposals were applied.
    Swept { accepted: usize },
    /// A cluster of `size` sites was grown and flipped.
    ClusterFlipped { size: usize },
    /// A cluster of `size` sites was grown but its flip was rejected.
    ClusterRejected { size: usize },
    /// Defined no-op; see [`SkipReason`].
    Skipped(SkipReason),
}

impl StepOutcome {
    /// `true` when at least one site value changed.
    pub fn changed_lattice(&self) -> bool {
        match self {
            StepOutcome::Swept { accepted }      => *accepted > 0,
            StepOutcome::ClusterFlipped { size } => *size > 0,
            StepOutcome::ClusterRejected { .. } | StepOutcome::Skipped(_) => false,
        }
    }
}

// ── UpdateEngine ──────────────────────────────────────────────────────────────

/// Advances a lattice by Monte Carlo steps.
///
/// The engine holds only scratch buffers (visit permutation, cluster
/// stamps and stack), reused from step to step.  All physics state lives in
/// the [`Lattice`] and [`SimParams`] passed to each call, and all randomness
/// comes from the caller's [`SimRng`]: identical inputs and RNG state give
/// bit-identical results.
#[derive(Debug, Default, Clone)]
pub struct UpdateEngine {
    order:   Vec<usize>,
    cluster: ClusterScratch,
}

impl UpdateEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Perform one step under the current parameters.
    ///
    /// Dispatches on `(lattice model, params.algorithm())`.  Unsupported
    /// combinations return [`StepOutcome::Skipped`] and do not touch the
    /// lattice or draw from `rng`.
    pub fn step(
        &mut self,
        lattice: &mut Lattice,
        params:  &SimParams,
        rng:     &mut SimRng,
    ) -> StepOutcome {
        if lattice.model() != params.model() {
            return StepOutcome::Skipped(SkipReason::ModelMismatch {
                lattice: lattice.model(),
                params:  params.model(),
            });
        }
        match params.algorithm() {
            AlgorithmKind::LocalSweep => self.sweep(lattice, params, rng),
            AlgorithmKind::Cluster    => self.cluster_step(lattice, params, rng),
        }
    }

    /// One Metropolis sweep, whatever the configured algorithm.
    pub fn sweep(
        &mut self,
        lattice: &mut Lattice,
        params:  &SimParams,
        rng:     &mut SimRng,
    ) -> StepOutcome {
        let size = lattice.size();
        self.refresh_order(lattice.site_count(), rng);
        let order = self.order.as_slice();

        let accepted = match lattice.spins_mut() {
            Spins::Binary(cells)     => sweep_binary(cells, size, params, order, rng),
            Spins::Continuous(cells) => sweep_continuous(cells, size, params, order, rng),
            Spins::MultiState { states, q } => {
                sweep_potts(states, size, *q, params, order, rng)
            }
        };
        StepOutcome::Swept { accepted }
    }

    /// One Wolff cluster attempt.
    ///
    /// Growth uses only the bond probability `1 − exp(−2β)`; the field
    /// enters solely through the final accept test on `ΔE = 2h·Σ s_i`.
    /// This combination does not satisfy detailed balance exactly at
    /// nonzero field and is kept as is.
    pub fn cluster_step(
        &mut self,
        lattice: &mut Lattice,
        params:  &SimParams,
        rng:     &mut SimRng,
    ) -> StepOutcome {
        let (size, model) = (lattice.size(), lattice.model());
        if !model.supports_cluster() {
            return StepOutcome::Skipped(SkipReason::UnsupportedModel(model));
        }
        if !params.field_is_active() {
            return StepOutcome::Skipped(SkipReason::ZeroField);
        }
        let Spins::Binary(cells) = lattice.spins_mut() else {
            return StepOutcome::Skipped(SkipReason::UnsupportedModel(model));
        };

        let seed = rng.gen_range(0..cells.len());
        let p_add = bond_probability(params.beta());
        let members = self.cluster.grow(cells.as_slice(), size, params.boundary(), seed, p_add, rng);

        let spin_sum: i64 = members.iter().map(|&k| cells[k] as i64).sum();
        let delta = cluster_flip_delta(params.field(), spin_sum);
        let cluster_size = members.len();

        if metropolis_accept(delta, params.beta(), rng) {
            for &k in members {
                cells[k] = -cells[k];
            }
            StepOutcome::ClusterFlipped { size: cluster_size }
        } else {
            StepOutcome::ClusterRejected { size: cluster_size }
        }
    }

    /// Grow (but do not flip) a cluster from `seed` on a binary site array.
    ///
    /// Exposed for diagnostics such as measuring the empirical bond
    /// inclusion rate.
    pub fn grow_cluster(
        &mut self,
        cells:  &[i8],
        size:   usize,
        params: &SimParams,
        seed:   usize,
        rng:    &mut SimRng,
    ) -> &[usize] {
        let p_add = bond_probability(params.beta());
        self.cluster.grow(cells, size, params.boundary(), seed, p_add, rng)
    }

    /// Reset the visit order to a fresh uniform permutation of `0..n`.
    fn refresh_order(&mut self, n: usize, rng: &mut SimRng) {
        if self.order.len() != n {
            self.order = (0..n).collect();
        }
        rng.shuffle(&mut self.order);
    }
}
