//! `ising-output` — frame trace writers for the spin-lattice simulator.
//!
//! Frames are reduced to one [`FrameRow`] of observables each (the lattice
//! itself is not persisted) and handed to a [`FrameWriter`] backend.
//! [`FrameTrace`] adapts any writer into an `ising_sim::FrameSink`.
//!
//! | Backend             | Output                                                        |
//! |---------------------|---------------------------------------------------------------|
//! | [`CsvFrameWriter`]  | `timestamp_ms,sweep,model,order_parameter,mx,my,energy_per_site` |
//!
//! # Usage
//!
//! ```rust,ignore
//! use ising_output::{CsvFrameWriter, FrameTrace};
//!
//! let trace = FrameTrace::new(CsvFrameWriter::from_path("frames.csv")?);
//! let errors = trace.error_slot();
//! sim.set_frame_sink(trace);
//! sim.start()?;
//! // ...
//! sim.stop()?;
//! if let Some(e) = errors.take() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod row;
pub mod trace;
pub mod writer;


pub use crate::csv::CsvFrameWriter;
pub use error::{OutputError, OutputResult};
pub use row::FrameRow;
pub use trace::{ErrorSlot, FrameTrace};
pub use writer::FrameWriter;
