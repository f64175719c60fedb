//! Fluent builder for constructing an initialized [`Simulation`].

use std::time::Duration;

use ising_core::{AlgorithmKind, BoundaryKind, ModelKind, SimParams};

use crate::{ClockConfig, FrameSink, SimResult, Simulation};

/// Fluent builder for [`Simulation`].
///
/// # Required inputs
///
/// - lattice side length `size`
/// - temperature `T > 0`
/// - [`ModelKind`]
///
/// # Optional inputs (have defaults)
///
/// | Method                  | Default                      |
/// |-------------------------|------------------------------|
/// | `.boundary(b)`          | `BoundaryKind::Periodic`     |
/// | `.algorithm(a)`         | `AlgorithmKind::LocalSweep`  |
/// | `.field(h)`             | `0.0`                        |
/// | `.state_count(q)`       | `3` (clamped into `[2, 10]`) |
/// | `.steps_per_frame(n)`   | `1`                          |
/// | `.seed(s)`              | `ClockConfig::default().seed`|
/// | `.frame_interval(d)`    | 33 ms                        |
/// | `.sink(s)`              | `NoopSink`                   |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(64, 2.269, ModelKind::Binary)
///     .algorithm(AlgorithmKind::Cluster)
///     .field(0.1)
///     .sink(|frame: &Frame| println!("{}", frame.order_parameter()))
///     .build()?;
/// sim.start()?;
/// ```
pub struct SimBuilder {
    size:            usize,
    temperature:     f64,
    model:           ModelKind,
    boundary:        BoundaryKind,
    algorithm:       AlgorithmKind,
    field:           f64,
    state_count:     usize,
    steps_per_frame: usize,
    config:          ClockConfig,
    sink:            Option<Box<dyn FrameSink>>,
}

impl SimBuilder {
    pub fn new(size: usize, temperature: f64, model: ModelKind) -> Self {
        let defaults = SimParams::default();
        Self {
            size,
            temperature,
            model,
            boundary:        defaults.boundary(),
            algorithm:       defaults.algorithm(),
            field:           defaults.field(),
            state_count:     defaults.state_count() as usize,
            steps_per_frame: defaults.steps_per_frame(),
            config:          ClockConfig::default(),
            sink:            None,
        }
    }

    pub fn boundary(mut self, boundary: BoundaryKind) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn algorithm(mut self, algorithm: AlgorithmKind) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn field(mut self, field: f64) -> Self {
        self.field = field;
        self
    }

    pub fn state_count(mut self, q: usize) -> Self {
        self.state_count = q;
        self
    }

    pub fn steps_per_frame(mut self, steps: usize) -> Self {
        self.steps_per_frame = steps;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config = self.config.with_seed(seed);
        self
    }

    pub fn frame_interval(mut self, interval: Duration) -> Self {
        self.config = self.config.with_frame_interval(interval);
        self
    }

    pub fn sink<S: FrameSink + 'static>(mut self, sink: S) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Validate every parameter and return an initialized, stopped
    /// [`Simulation`].
    pub fn build(self) -> SimResult<Simulation> {
        let mut params = SimParams::new(self.temperature, self.model)?;
        params.set_field(self.field)?;
        params.set_boundary(self.boundary);
        params.set_algorithm(self.algorithm);
        params.set_state_count(self.state_count);
        params.set_steps_per_frame(self.steps_per_frame)?;

        let sim = Simulation::new(self.config);
        sim.initialize_with(self.size, &params)?;
        if let Some(sink) = self.sink {
            sim.set_boxed_sink(sink);
        }
        Ok(sim)
    }
}
