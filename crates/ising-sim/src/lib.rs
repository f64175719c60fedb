//! `ising-sim` — simulation clock for the spin-lattice simulator.
//!
//! # State machine
//!
//! ```text
//!            initialize()
//!  (uninit) ─────────────▶ stopped ◀──────┐
//!     │                     │  start()    │ stop()
//!     │ start() → Err       ▼             │
//!     └──────────────     running ────────┘
//! ```
//!
//! While running, a drive thread calls `UpdateEngine::step` in batches of
//! `steps_per_frame` with no delay between batches (yielding once per
//! batch), and an emitter thread delivers at most one [`Frame`] per frame
//! interval (≈30 Hz by default) to the registered [`FrameSink`].  While
//! stopped, [`Simulation::advance`] runs batches synchronously.
//!
//! Parameter setters take effect at the next batch.  Changing the model kind,
//! or `q` while the multi-state model is active, replaces the lattice.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Frame observables are computed on Rayon's thread pool. |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ising_core::ModelKind;
//! use ising_sim::{Frame, SimBuilder};
//!
//! let mut sim = SimBuilder::new(128, 2.0, ModelKind::Binary)
//!     .sink(|frame: &Frame| log::info!("{} m={:.3}", frame.sweep, frame.order_parameter()))
//!     .build()?;
//! sim.start()?;
//! std::thread::sleep(std::time::Duration::from_secs(1));
//! sim.stop()?;
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod frame;
pub mod observer;
pub mod shared;
pub mod sim;
pub mod world;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use config::ClockConfig;
pub use error::{SimError, SimResult};
pub use frame::{Frame, StateSnapshot};
pub use observer::{FrameSink, NoopSink};
pub use shared::SharedParams;
pub use sim::Simulation;
pub use world::BatchSummary;
