//! Frame consumer trait.

use crate::Frame;

/// Receives frames from the emitter thread.
///
/// `on_frame` is the only required method.  All callbacks run on the
/// emitter thread, never concurrently with each other, and none run after
/// [`Simulation::stop`](crate::Simulation::stop) returns.
///
/// Callbacks run while the emitter holds the sink lock.  A sink must not
/// call [`Simulation::set_frame_sink`](crate::Simulation::set_frame_sink)
/// or `set_boxed_sink` on its own simulation: that takes the same lock and
/// deadlocks the emitter.  Replace sinks from the host thread.
///
/// Any `FnMut(&Frame) + Send` closure is a sink:
///
/// ```rust,ignore
/// sim.set_frame_sink(|frame: &Frame| {
///     log::info!("{} m={:.3}", frame.sweep, frame.order_parameter());
/// });
/// ```
pub trait FrameSink: Send {
    fn on_frame(&mut self, frame: &Frame);

    /// Called once on the emitter thread when the clock starts.
    fn on_start(&mut self) {}

    /// Called once on the emitter thread as the clock stops, before
    /// `stop()` returns.
    fn on_stop(&mut self) {}
}

impl<F> FrameSink for F
where
    F: FnMut(&Frame) + Send,
{
    fn on_frame(&mut self, frame: &Frame) {
        self(frame)
    }
}

/// A [`FrameSink`] that discards every frame.  Installed until the host
/// registers its own.
pub struct NoopSink;

impl FrameSink for NoopSink {
    fn on_frame(&mut self, _frame: &Frame) {}
}
