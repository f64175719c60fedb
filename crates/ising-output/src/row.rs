//! Plain data row written per frame.

use ising_sim::Frame;
use serde::Serialize;

/// The observables of one frame.
///
/// `mx`/`my` are empty cells unless the frame is from the continuous model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameRow {
    pub timestamp_ms:    u64,
    pub sweep:           u64,
    pub model:           &'static str,
    pub order_parameter: f64,
    pub mx:              Option<f64>,
    pub my:              Option<f64>,
    pub energy_per_site: f64,
}

impl From<&Frame> for FrameRow {
    fn from(frame: &Frame) -> Self {
        let (mx, my) = match frame.vector() {
            Some([mx, my]) => (Some(mx), Some(my)),
            None => (None, None),
        };
        Self {
            timestamp_ms:    u64::try_from(frame.timestamp.as_millis()).unwrap_or(u64::MAX),
            sweep:           frame.sweep.0,
            model:           frame.model().as_str(),
            order_parameter: frame.order_parameter(),
            mx,
            my,
            energy_per_site: frame.observables.energy_per_site,
        }
    }
}
