//! Running thermodynamic statistics over a sequence of measurements.
//!
//! [`RunningStats`] is Welford's single-pass mean/variance; it never stores
//! samples, so a scan can run for as long as it likes.
//! [`ObservableAccumulator`] pairs two of them to derive the fluctuation
//! quantities:
//!
//! ```text
//! χ = β · N · Var(|m|)        susceptibility
//! C = β² · N · Var(e)         specific heat per site
//! ```

use crate::Observables;

/// Single-pass mean and population variance.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RunningStats {
    count: u64,
    mean:  f64,
    m2:    f64,
}

impl RunningStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, x: f64) {
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (x - self.mean);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Mean of the samples so far, 0 when empty.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Population variance, 0 with fewer than two samples.
    pub fn variance(&self) -> f64 {
        if self.count < 2 { 0.0 } else { self.m2 / self.count as f64 }
    }

    /// Standard error of the mean, treating samples as independent.
    pub fn std_error(&self) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        (self.m2 / (self.count - 1) as f64 / self.count as f64).sqrt()
    }
}

// ── ObservableAccumulator ─────────────────────────────────────────────────────

/// Equilibrium averages at one temperature.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ThermoSummary {
    pub samples:         u64,
    /// `⟨|m|⟩`.
    pub mean_order:      f64,
    pub mean_energy:     f64,
    pub susceptibility:  f64,
    pub specific_heat:   f64,
}

/// Accumulates `|order_parameter|` and `energy_per_site` from successive
/// [`Observables`] at fixed `β` and `N`.
#[derive(Clone, Debug)]
pub struct ObservableAccumulator {
    beta:   f64,
    sites:  usize,
    order:  RunningStats,
    energy: RunningStats,
}

impl ObservableAccumulator {
    pub fn new(beta: f64, sites: usize) -> Self {
        Self { beta, sites, order: RunningStats::new(), energy: RunningStats::new() }
    }

    pub fn push(&mut self, obs: &Observables) {
        self.order.push(obs.order_parameter.abs());
        self.energy.push(obs.energy_per_site);
    }

    pub fn order(&self) -> &RunningStats {
        &self.order
    }

    pub fn energy(&self) -> &RunningStats {
        &self.energy
    }

    pub fn summary(&self) -> ThermoSummary {
        let n = self.sites as f64;
        ThermoSummary {
            samples:        self.order.count(),
            mean_order:     self.order.mean(),
            mean_energy:    self.energy.mean(),
            susceptibility: self.beta * n * self.order.variance(),
            specific_heat:  self.beta * self.beta * n * self.energy.variance(),
        }
    }
}
