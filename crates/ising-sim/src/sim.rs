//! The simulation clock: run/stop state machine and the two worker threads.
//!
//! # Threads
//!
//! ```text
//! host ──setters──▶ SharedParams (atomics)            lattice lock
//!   │                    │ snapshot per batch              │
//!   │                    ▼                                 ▼
//!   │   drive:   lock ─▶ sync ─▶ steps_per_frame × step ─▶ frame? ─▶ unlock ─▶ yield
//!   │                                                        │
//!   │                                               pending slot (depth 1)
//!   │                                                        ▼
//!   │   emitter: park(interval) ─▶ take pending ─▶ sink.on_frame
//!   │
//!   └─stop()──▶ running = false ─▶ unpark emitter ─▶ join both
//! ```
//!
//! Only the drive thread mutates the lattice while the clock runs, and it
//! does so only while holding the lattice lock; the host takes the same
//! lock for reallocation and on-demand snapshots.  A frame is built under
//! the lock after a batch completes, so no snapshot ever sees a half-applied
//! sweep.  The pending slot keeps only the newest frame: a slow sink drops
//! frames instead of queueing them.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle, Thread};
use std::time::{Duration, Instant};

use ising_core::{AlgorithmKind, BoundaryKind, CoreError, ModelKind, SimParams, SimRng, SweepCount};

use crate::world::{BatchSummary, World};
use crate::{ClockConfig, Frame, FrameSink, NoopSink, SharedParams, SimError, SimResult, StateSnapshot};

/// Shortest emitter park, so a zero frame interval does not spin.
const MIN_PARK: Duration = Duration::from_millis(1);

/// Every critical section leaves its data consistent, so a panic on another
/// thread does not make the value unusable.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ── Shared state ──────────────────────────────────────────────────────────────

struct Shared {
    config:      ClockConfig,
    epoch:       Instant,
    params:      SharedParams,
    initialized: AtomicBool,
    running:     AtomicBool,
    world:       Mutex<Option<World>>,
    pending:     Mutex<Option<Frame>>,
    sink:        Mutex<Box<dyn FrameSink>>,
}

struct Workers {
    drive:   JoinHandle<()>,
    emitter: JoinHandle<()>,
}

// ── Simulation ────────────────────────────────────────────────────────────────

/// An interactive spin-lattice simulation.
///
/// Created uninitialized; [`initialize`](Self::initialize) allocates the
/// lattice.  [`start`](Self::start) launches a background drive loop and a
/// frame emitter; [`stop`](Self::stop) halts both.  Parameter setters work
/// in either state and take effect at the next batch.
///
/// Dropping a running simulation stops it.
pub struct Simulation {
    shared:  Arc<Shared>,
    workers: Option<Workers>,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(ClockConfig::default())
    }
}

impl Simulation {
    pub fn new(config: ClockConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                config,
                epoch:       Instant::now(),
                params:      SharedParams::default(),
                initialized: AtomicBool::new(false),
                running:     AtomicBool::new(false),
                world:       Mutex::new(None),
                pending:     Mutex::new(None),
                sink:        Mutex::new(Box::new(NoopSink)),
            }),
            workers: None,
        }
    }

    pub fn config(&self) -> &ClockConfig {
        &self.shared.config
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Allocate a randomized `size × size` lattice for `model` at
    /// `temperature`.
    ///
    /// `boundary` and `algorithm` keep their current values when `None`;
    /// field, state count, and steps-per-frame always do.  On error nothing
    /// changes.  Re-initializing an initialized simulation replaces its
    /// lattice, including while running.
    pub fn initialize(
        &self,
        size:        usize,
        temperature: f64,
        model:       ModelKind,
        boundary:    Option<BoundaryKind>,
        algorithm:   Option<AlgorithmKind>,
    ) -> SimResult<()> {
        let mut params = self.shared.params.snapshot();
        params
            .set_temperature(temperature)
            .inspect_err(|err| log::warn!("initialize rejected: {err}"))?;
        params.set_model(model);
        if let Some(boundary) = boundary {
            params.set_boundary(boundary);
        }
        if let Some(algorithm) = algorithm {
            params.set_algorithm(algorithm);
        }
        self.initialize_with(size, &params)
    }

    /// Allocate a lattice under a complete, validated parameter set.
    pub fn initialize_with(&self, size: usize, params: &SimParams) -> SimResult<()> {
        if size == 0 {
            log::warn!("initialize rejected: lattice size 0");
            return Err(CoreError::InvalidSize(size).into());
        }

        let mut guard = lock(&self.shared.world);
        let rng = match guard.as_mut() {
            Some(world) => world.child_rng(),
            None => SimRng::new(self.shared.config.seed),
        };
        let world = World::create(size, params, rng)?;
        self.shared.params.store(params);
        *guard = Some(world);
        self.shared.initialized.store(true, Ordering::Release);

        log::info!(
            "initialized {size}x{size} {model} lattice: T={t:.4} h={h} boundary={b} algorithm={a}",
            model = params.model(),
            t = params.temperature(),
            h = params.field(),
            b = params.boundary(),
            a = params.algorithm(),
        );
        Ok(())
    }

    /// Transition stopped → running.
    ///
    /// Resumes from the current lattice and parameters.  Calling `start` on
    /// a running clock does nothing.
    pub fn start(&mut self) -> SimResult<()> {
        if self.workers.is_some() {
            if self.shared.running.load(Ordering::Acquire) {
                log::debug!("start ignored: clock already running");
                return Ok(());
            }
            // The drive loop halted on its own; collect it before restarting.
            self.stop()?;
        }
        if !self.is_initialized() {
            log::warn!("start() called before initialize()");
            return Err(SimError::NotInitialized);
        }

        self.shared.running.store(true, Ordering::Release);
        *lock(&self.shared.pending) = None;

        let emitter = {
            let shared = Arc::clone(&self.shared);
            thread::Builder::new()
                .name("ising-emitter".into())
                .spawn(move || emit_loop(&shared))
        };
        let emitter = match emitter {
            Ok(handle) => handle,
            Err(source) => {
                self.shared.running.store(false, Ordering::Release);
                return Err(SimError::Spawn { what: "emitter", source });
            }
        };

        let drive = {
            let shared = Arc::clone(&self.shared);
            let wake = emitter.thread().clone();
            thread::Builder::new()
                .name("ising-drive".into())
                .spawn(move || drive_loop(&shared, &wake))
        };
        let drive = match drive {
            Ok(handle) => handle,
            Err(source) => {
                self.shared.running.store(false, Ordering::Release);
                emitter.thread().unpark();
                let _ = emitter.join();
                return Err(SimError::Spawn { what: "drive", source });
            }
        };

        self.workers = Some(Workers { drive, emitter });
        let params = self.shared.params.snapshot();
        log::info!(
            "clock started: {model}, {steps} steps per frame, frame interval {interval:?}",
            model = params.model(),
            steps = params.steps_per_frame(),
            interval = self.shared.config.frame_interval,
        );
        Ok(())
    }

    /// Transition running → stopped and wait for both threads to finish.
    ///
    /// The batch in flight completes; no frame callback runs after this
    /// returns.  Calling `stop` on a stopped clock does nothing.
    pub fn stop(&mut self) -> SimResult<()> {
        let Some(workers) = self.workers.take() else {
            return Ok(());
        };
        self.shared.running.store(false, Ordering::Release);
        workers.emitter.thread().unpark();

        let drive = workers.drive.join().map_err(|_| SimError::Thread("drive"));
        let emitter = workers.emitter.join().map_err(|_| SimError::Thread("emitter"));
        *lock(&self.shared.pending) = None;

        let sweep = lock(&self.shared.world).as_ref().map(World::sweep).unwrap_or_default();
        log::info!("clock stopped at {sweep}");
        drive.and(emitter)
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.workers.is_some() && self.shared.running.load(Ordering::Acquire)
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.shared.initialized.load(Ordering::Acquire)
    }

    // ── Parameter setters ─────────────────────────────────────────────────

    /// Set `T > 0`.  Rejected values leave `β` unchanged.
    pub fn set_temperature(&self, temperature: f64) -> SimResult<()> {
        self.ensure_initialized()?;
        self.shared
            .params
            .set_temperature(temperature)
            .inspect_err(|err| log::warn!("temperature write rejected: {err}"))?;
        log::debug!("temperature set to {temperature}");
        Ok(())
    }

    pub fn set_field(&self, field: f64) -> SimResult<()> {
        self.ensure_initialized()?;
        self.shared
            .params
            .set_field(field)
            .inspect_err(|err| log::warn!("field write rejected: {err}"))?;
        log::debug!("field set to {field}");
        Ok(())
    }

    pub fn set_boundary(&self, boundary: BoundaryKind) -> SimResult<()> {
        self.ensure_initialized()?;
        self.shared.params.set_boundary(boundary);
        log::debug!("boundary set to {boundary}");
        Ok(())
    }

    pub fn set_algorithm(&self, algorithm: AlgorithmKind) -> SimResult<()> {
        self.ensure_initialized()?;
        self.shared.params.set_algorithm(algorithm);
        log::debug!("algorithm set to {algorithm}");
        Ok(())
    }

    /// Switch the model kind.  A different kind replaces the lattice with a
    /// freshly randomized one of the same size.
    pub fn set_model_kind(&self, model: ModelKind) -> SimResult<()> {
        self.ensure_initialized()?;
        self.shared.params.set_model(model);
        log::debug!("model set to {model}");
        self.sync_world()
    }

    /// Set `q`, clamped into `[2, 10]`, and return the stored value.  While
    /// the multi-state model is active a change re-randomizes the lattice.
    pub fn set_state_count(&self, requested: usize) -> SimResult<u8> {
        self.ensure_initialized()?;
        let q = self.shared.params.set_state_count(requested);
        log::debug!("state count set to {q} (requested {requested})");
        self.sync_world()?;
        Ok(q)
    }

    /// Set the number of steps per drive batch (`≥ 1`).
    pub fn set_steps_per_frame(&self, steps: usize) -> SimResult<()> {
        self.ensure_initialized()?;
        self.shared
            .params
            .set_steps_per_frame(steps)
            .inspect_err(|err| log::warn!("steps-per-frame write rejected: {err}"))?;
        log::debug!("steps per frame set to {steps}");
        Ok(())
    }

    /// Register the frame consumer, replacing the previous one.
    ///
    /// A sink installed while running receives frames from the next emission
    /// on but no `on_start` call.  The replaced sink is dropped without an
    /// `on_stop` call.  Blocks while a callback is in progress, so it must not
    /// be called from inside a [`FrameSink`] callback.
    pub fn set_frame_sink<S: FrameSink + 'static>(&self, sink: S) {
        self.set_boxed_sink(Box::new(sink));
    }

    pub fn set_boxed_sink(&self, sink: Box<dyn FrameSink>) {
        *lock(&self.shared.sink) = sink;
    }

    /// Current parameters.
    pub fn params(&self) -> SimParams {
        self.shared.params.snapshot()
    }

    // ── Lattice control ───────────────────────────────────────────────────

    /// Re-randomize the lattice under the current parameters.
    pub fn reset(&self) -> SimResult<()> {
        let params = self.shared.params.snapshot();
        let mut guard = lock(&self.shared.world);
        let world = guard.as_mut().ok_or(SimError::NotInitialized)?;
        let size = world.lattice().size();
        world.reallocate(size, &params)?;
        log::info!("reset {size}x{size} {} lattice", params.model());
        Ok(())
    }

    /// Reallocate at side length `size`.  `0` is rejected.
    pub fn set_size(&self, size: usize) -> SimResult<()> {
        if size == 0 {
            log::warn!("size write rejected: 0");
            return Err(CoreError::InvalidSize(size).into());
        }
        let params = self.shared.params.snapshot();
        let mut guard = lock(&self.shared.world);
        let world = guard.as_mut().ok_or(SimError::NotInitialized)?;
        world.reallocate(size, &params)?;
        log::info!("resized to {size}x{size}");
        Ok(())
    }

    /// Run `batches` batches of `steps_per_frame` steps on the calling
    /// thread.  Refused while the clock is running.
    pub fn advance(&self, batches: usize) -> SimResult<BatchSummary> {
        if self.is_running() {
            return Err(SimError::AlreadyRunning);
        }
        let mut guard = lock(&self.shared.world);
        let world = guard.as_mut().ok_or(SimError::NotInitialized)?;

        let mut summary = BatchSummary::default();
        for _ in 0..batches {
            let params = self.shared.params.snapshot();
            summary.absorb(world.run_batch(&params)?);
        }
        Ok(summary)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Build a frame now, outside the emission cadence.
    pub fn frame(&self) -> SimResult<Frame> {
        let params = self.shared.params.snapshot();
        let guard = lock(&self.shared.world);
        let world = guard.as_ref().ok_or(SimError::NotInitialized)?;
        Ok(world.frame(&params, self.shared.epoch.elapsed()))
    }

    /// Lattice copy, observables, model kind, and size.
    pub fn get_current_state(&self) -> SimResult<StateSnapshot> {
        let params = self.shared.params.snapshot();
        let guard = lock(&self.shared.world);
        let world = guard.as_ref().ok_or(SimError::NotInitialized)?;
        Ok(world.snapshot(&params))
    }

    /// Steps completed on the current lattice.
    pub fn sweep(&self) -> SimResult<SweepCount> {
        let guard = lock(&self.shared.world);
        guard.as_ref().map(World::sweep).ok_or(SimError::NotInitialized)
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn ensure_initialized(&self) -> SimResult<()> {
        if self.is_initialized() { Ok(()) } else { Err(SimError::NotInitialized) }
    }

    /// Reallocate the lattice if the stored parameters no longer match it.
    fn sync_world(&self) -> SimResult<()> {
        let params = self.shared.params.snapshot();
        if let Some(world) = lock(&self.shared.world).as_mut() {
            world.sync(&params)?;
        }
        Ok(())
    }
}

impl Drop for Simulation {
    fn drop(&mut self) {
        if let Err(err) = self.stop() {
            log::error!("error stopping simulation on drop: {err}");
        }
    }
}

// ── Worker loops ──────────────────────────────────────────────────────────────

/// Run batches back to back until `running` clears, publishing a frame into
/// the pending slot at most once per frame interval and only when the
/// lattice changed since the last one.
fn drive_loop(shared: &Shared, emitter: &Thread) {
    let interval = shared.config.frame_interval;
    let mut last_emit: Option<Instant> = None;

    while shared.running.load(Ordering::Acquire) {
        let frame = {
            let mut guard = lock(&shared.world);
            let Some(world) = guard.as_mut() else { break };
            let params = shared.params.snapshot();
            if let Err(err) = world.run_batch(&params) {
                log::error!("drive loop halted: {err}");
                break;
            }
            let due = last_emit.is_none_or(|at| at.elapsed() >= interval);
            (due && world.take_dirty()).then(|| world.frame(&params, shared.epoch.elapsed()))
        };

        if let Some(frame) = frame {
            *lock(&shared.pending) = Some(frame);
            emitter.unpark();
            last_emit = Some(Instant::now());
        }
        thread::yield_now();
    }

    shared.running.store(false, Ordering::Release);
    emitter.unpark();
}

/// Deliver pending frames to the sink until `running` clears.
fn emit_loop(shared: &Shared) {
    let park = shared.config.frame_interval.max(MIN_PARK);
    lock(&shared.sink).on_start();

    while shared.running.load(Ordering::Acquire) {
        thread::park_timeout(park);
        if !shared.running.load(Ordering::Acquire) {
            break;
        }
        let frame = lock(&shared.pending).take();
        if let Some(frame) = frame {
            lock(&shared.sink).on_frame(&frame);
        }
    }

    lock(&shared.sink).on_stop();
}
