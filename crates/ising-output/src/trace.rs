//! `FrameTrace<W>` — bridges `FrameSink` to a `FrameWriter`.

use std::sync::{Arc, Mutex, PoisonError};

use ising_sim::{Frame, FrameSink};

use crate::row::FrameRow;
use crate::writer::FrameWriter;
use crate::{OutputError, OutputResult};

/// Shared handle to the first error a [`FrameTrace`] hit.
///
/// The trace is moved into the simulation when registered as a sink; the
/// host keeps a clone of this handle to check for errors after `stop()`.
#[derive(Clone, Debug, Default)]
pub struct ErrorSlot(Arc<Mutex<Option<OutputError>>>);

impl ErrorSlot {
    /// Take the stored error, if any.
    pub fn take(&self) -> Option<OutputError> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).take()
    }

    fn store(&self, result: OutputResult<()>) {
        if let Err(e) = result {
            let mut slot = self.0.lock().unwrap_or_else(PoisonError::into_inner);
            // Keep only the first error.
            if slot.is_none() {
                *slot = Some(e);
            }
        }
    }
}

/// A [`FrameSink`] that writes one [`FrameRow`] per frame to any
/// [`FrameWriter`] backend and flushes when the clock stops.
///
/// Sink callbacks cannot fail, so write errors are stored and retrieved
/// with [`take_error`](Self::take_error) or through an [`ErrorSlot`].
pub struct FrameTrace<W: FrameWriter> {
    writer: W,
    errors: ErrorSlot,
}

impl<W: FrameWriter> FrameTrace<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, errors: ErrorSlot::default() }
    }

    pub fn error_slot(&self) -> ErrorSlot {
        self.errors.clone()
    }

    pub fn take_error(&mut self) -> Option<OutputError> {
        self.errors.take()
    }

    /// Write `frame` directly, for frames taken outside the clock.
    pub fn record(&mut self, frame: &Frame) -> OutputResult<()> {
        self.writer.write_row(&FrameRow::from(frame))
    }

    /// Flush and unwrap the inner writer.
    pub fn into_writer(mut self) -> W {
        let result = self.writer.finish();
        self.errors.store(result);
        self.writer
    }
}

impl<W: FrameWriter + Send> FrameSink for FrameTrace<W> {
    fn on_frame(&mut self, frame: &Frame) {
        let result = self.record(frame);
        self.errors.store(result);
    }

    fn on_stop(&mut self) {
        let result = self.writer.finish();
        self.errors.store(result);
    }
}
