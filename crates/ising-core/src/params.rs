//! Validated simulation parameters.
//!
//! # Design
//!
//! Temperature is accepted from callers but stored as inverse temperature
//! `β = 1/T`, the only form the acceptance rules use.  Every setter either
//! clamps (state count) or rejects and leaves the previous value in place
//! (temperature, field, steps-per-frame), so `β` can never become NaN or
//! infinite.
//!
//! The validation rules are exposed as free functions as well so that
//! `ising-sim`'s atomic parameter store applies exactly the same checks.

use crate::{AlgorithmKind, BoundaryKind, CoreError, CoreResult, ModelKind};

/// Smallest allowed multi-state count.
pub const MIN_STATE_COUNT: u8 = 2;
/// Largest allowed multi-state count.
pub const MAX_STATE_COUNT: u8 = 10;
/// State count used until a caller picks one.
pub const DEFAULT_STATE_COUNT: u8 = 3;
/// Default temperature, close to the square-lattice Ising critical point.
pub const DEFAULT_TEMPERATURE: f64 = 2.269;
/// Fields with magnitude at or below this are treated as zero.
pub const FIELD_EPSILON: f64 = 1e-10;

// ── Validation rules ──────────────────────────────────────────────────────────

/// Convert a temperature to `β`, rejecting zero, negative, and non-finite input.
pub fn beta_for(temperature: f64) -> CoreResult<f64> {
    if !temperature.is_finite() || temperature <= 0.0 {
        return Err(CoreError::InvalidTemperature(temperature));
    }
    let beta = 1.0 / temperature;
    // Subnormal temperatures overflow 1/T.
    if !beta.is_finite() {
        return Err(CoreError::InvalidTemperature(temperature));
    }
    Ok(beta)
}

/// The external field may take any finite value.
pub fn validate_field(field: f64) -> CoreResult<f64> {
    if field.is_finite() {
        Ok(field)
    } else {
        Err(CoreError::InvalidField(field))
    }
}

/// Clamp a requested state count into `[MIN_STATE_COUNT, MAX_STATE_COUNT]`.
pub fn clamp_state_count(requested: usize) -> u8 {
    requested.clamp(MIN_STATE_COUNT as usize, MAX_STATE_COUNT as usize) as u8
}

/// Steps per frame must be at least one.
pub fn validate_steps_per_frame(steps: usize) -> CoreResult<usize> {
    if steps == 0 {
        Err(CoreError::InvalidStepsPerFrame(steps))
    } else {
        Ok(steps)
    }
}

// ── SimParams ─────────────────────────────────────────────────────────────────

/// The parameter store consulted by every `step()` and observable call.
///
/// `SimParams` is `Copy`; callers pass it by reference into the update
/// engine and observable calculator rather than keeping ambient state.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimParams {
    beta:            f64,
    field:           f64,
    boundary:        BoundaryKind,
    model:           ModelKind,
    algorithm:       AlgorithmKind,
    state_count:     u8,
    steps_per_frame: usize,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            beta:            1.0 / DEFAULT_TEMPERATURE,
            field:           0.0,
            boundary:        BoundaryKind::default(),
            model:           ModelKind::default(),
            algorithm:       AlgorithmKind::default(),
            state_count:     DEFAULT_STATE_COUNT,
            steps_per_frame: 1,
        }
    }
}

impl SimParams {
    /// Parameters for `model` at `temperature`, everything else at defaults.
    pub fn new(temperature: f64, model: ModelKind) -> CoreResult<Self> {
        Ok(Self {
            beta: beta_for(temperature)?,
            model,
            ..Self::default()
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn beta(&self) -> f64 {
        self.beta
    }

    #[inline]
    pub fn temperature(&self) -> f64 {
        1.0 / self.beta
    }

    #[inline]
    pub fn field(&self) -> f64 {
        self.field
    }

    /// `true` when `|h|` exceeds [`FIELD_EPSILON`].
    #[inline]
    pub fn field_is_active(&self) -> bool {
        self.field.abs() > FIELD_EPSILON
    }

    #[inline]
    pub fn boundary(&self) -> BoundaryKind {
        self.boundary
    }

    #[inline]
    pub fn model(&self) -> ModelKind {
        self.model
    }

    #[inline]
    pub fn algorithm(&self) -> AlgorithmKind {
        self.algorithm
    }

    #[inline]
    pub fn state_count(&self) -> u8 {
        self.state_count
    }

    #[inline]
    pub fn steps_per_frame(&self) -> usize {
        self.steps_per_frame
    }

    // ── Setters ───────────────────────────────────────────────────────────

    /// Set `T`; on error `β` keeps its previous value.
    pub fn set_temperature(&mut self, temperature: f64) -> CoreResult<()> {
        self.beta = beta_for(temperature)?;
        Ok(())
    }

    /// Set `h`; non-finite input is rejected.
    pub fn set_field(&mut self, field: f64) -> CoreResult<()> {
        self.field = validate_field(field)?;
        Ok(())
    }

    pub fn set_boundary(&mut self, boundary: BoundaryKind) {
        self.boundary = boundary;
    }

    pub fn set_model(&mut self, model: ModelKind) {
        self.model = model;
    }

    pub fn set_algorithm(&mut self, algorithm: AlgorithmKind) {
        self.algorithm = algorithm;
    }

    /// Set `q`, clamped into `[2, 10]`.  Returns the value actually stored.
    pub fn set_state_count(&mut self, requested: usize) -> u8 {
        self.state_count = clamp_state_count(requested);
        self.state_count
    }

    pub fn set_steps_per_frame(&mut self, steps: usize) -> CoreResult<()> {
        self.steps_per_frame = validate_steps_per_frame(steps)?;
        Ok(())
    }

    // ── Raw assembly ──────────────────────────────────────────────────────

    /// Assemble parameters from already-validated parts.
    ///
    /// Used by stores that validate on write and snapshot on read.  `beta`
    /// must come from [`beta_for`] and `state_count` from
    /// [`clamp_state_count`].
    pub fn from_validated(
        beta:            f64,
        field:           f64,
        boundary:        BoundaryKind,
        model:           ModelKind,
        algorithm:       AlgorithmKind,
        state_count:     u8,
        steps_per_frame: usize,
    ) -> Self {
        Self { beta, field, boundary, model, algorithm, state_count, steps_per_frame }
    }
}
