//! Lock-free parameter store shared between the host and the drive loop.
//!
//! Every field of [`SimParams`] lives in its own atomic: `f64` values as
//! their bit patterns in an `AtomicU64`, kinds as their `u8` codes.  A
//! writer validates first and stores only on success, so a rejected write
//! never disturbs the stored value, and no reader can observe a torn field.
//!
//! The drive loop reads a [`SimParams`] snapshot once per batch and passes
//! it explicitly into every `step()` of that batch.  Fields written by
//! different setters are independent, so a snapshot taken between two
//! writes is as valid as one taken after both.

use std::sync::atomic::{AtomicU64, AtomicU8, AtomicUsize, Ordering};

use ising_core::params::{beta_for, clamp_state_count, validate_field, validate_steps_per_frame};
use ising_core::{AlgorithmKind, BoundaryKind, CoreResult, ModelKind, SimParams};

#[derive(Debug)]
pub struct SharedParams {
    beta:            AtomicU64,
    field:           AtomicU64,
    boundary:        AtomicU8,
    model:           AtomicU8,
    algorithm:       AtomicU8,
    state_count:     AtomicU8,
    steps_per_frame: AtomicUsize,
}

impl Default for SharedParams {
    fn default() -> Self {
        Self::new(&SimParams::default())
    }
}

impl SharedParams {
    pub fn new(params: &SimParams) -> Self {
        Self {
            beta:            AtomicU64::new(params.beta().to_bits()),
            field:           AtomicU64::new(params.field().to_bits()),
            boundary:        AtomicU8::new(params.boundary().code()),
            model:           AtomicU8::new(params.model().code()),
            algorithm:       AtomicU8::new(params.algorithm().code()),
            state_count:     AtomicU8::new(params.state_count()),
            steps_per_frame: AtomicUsize::new(params.steps_per_frame()),
        }
    }

    /// Copy every field out into a plain [`SimParams`].
    pub fn snapshot(&self) -> SimParams {
        SimParams::from_validated(
            f64::from_bits(self.beta.load(Ordering::Acquire)),
            f64::from_bits(self.field.load(Ordering::Acquire)),
            BoundaryKind::from_code(self.boundary.load(Ordering::Acquire)).unwrap_or_default(),
            ModelKind::from_code(self.model.load(Ordering::Acquire)).unwrap_or_default(),
            AlgorithmKind::from_code(self.algorithm.load(Ordering::Acquire)).unwrap_or_default(),
            self.state_count.load(Ordering::Acquire),
            self.steps_per_frame.load(Ordering::Acquire),
        )
    }

    /// Overwrite every field from an already-validated [`SimParams`].
    pub fn store(&self, params: &SimParams) {
        self.beta.store(params.beta().to_bits(), Ordering::Release);
        self.field.store(params.field().to_bits(), Ordering::Release);
        self.boundary.store(params.boundary().code(), Ordering::Release);
        self.model.store(params.model().code(), Ordering::Release);
        self.algorithm.store(params.algorithm().code(), Ordering::Release);
        self.state_count.store(params.state_count(), Ordering::Release);
        self.steps_per_frame.store(params.steps_per_frame(), Ordering::Release);
    }

    // ── Field setters ─────────────────────────────────────────────────────

    pub fn set_temperature(&self, temperature: f64) -> CoreResult<()> {
        let beta = beta_for(temperature)?;
        self.beta.store(beta.to_bits(), Ordering::Release);
        Ok(())
    }

    pub fn set_field(&self, field: f64) -> CoreResult<()> {
        let field = validate_field(field)?;
        self.field.store(field.to_bits(), Ordering::Release);
        Ok(())
    }

    pub fn set_boundary(&self, boundary: BoundaryKind) {
        self.boundary.store(boundary.code(), Ordering::Release);
    }

    pub fn set_model(&self, model: ModelKind) {
        self.model.store(model.code(), Ordering::Release);
    }

    pub fn set_algorithm(&self, algorithm: AlgorithmKind) {
        self.algorithm.store(algorithm.code(), Ordering::Release);
    }

    /// Store `q` clamped into `[2, 10]` and return the stored value.
    pub fn set_state_count(&self, requested: usize) -> u8 {
        let q = clamp_state_count(requested);
        self.state_count.store(q, Ordering::Release);
        q
    }

    pub fn set_steps_per_frame(&self, steps: usize) -> CoreResult<()> {
        let steps = validate_steps_per_frame(steps)?;
        self.steps_per_frame.store(steps, Ordering::Release);
        Ok(())
    }
}
