//! Monte Carlo time.
//!
//! Simulated time is the number of completed `step()` calls.  A step is one
//! full Metropolis sweep or one Wolff cluster attempt depending on the
//! active algorithm, so the counter is not a physical time unit; it only
//! orders frames and lets a consumer measure throughput.

use std::fmt;

/// Count of completed update steps since the lattice was created.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SweepCount(pub u64);

impl SweepCount {
    pub const ZERO: SweepCount = SweepCount(0);

    /// Advance by one step.
    #[inline]
    pub fn advance(&mut self) {
        self.0 += 1;
    }

    /// Steps elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: SweepCount) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Display for SweepCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}
