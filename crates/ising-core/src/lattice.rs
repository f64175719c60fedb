//! Lattice storage and boundary-aware neighbour access.
//!
//! # Layout
//!
//! A lattice of side `L` stores `L²` site values in one row-major `Vec`:
//! site `(i, j)` lives at index `i·L + j`.  Exactly one representation is
//! active at a time ([`Spins`]); switching model kind replaces the whole
//! lattice through [`Lattice::create`], values are never translated.
//!
//! # Boundary policy
//!
//! Storage is never padded.  [`BoundaryKind`] only changes how a read at
//! `(i, j)` outside `[0, L)` is resolved:
//!
//! | Policy       | Binary | Continuous | Multi-state |
//! |--------------|--------|------------|-------------|
//! | `Periodic`   | wrap   | wrap       | wrap        |
//! | `FixedHigh`  | `+1`   | `0`        | `0`         |
//! | `FixedLow`   | `-1`   | `π`        | `q − 1`     |
//!
//! [`Grid`] is the single read primitive; every energy calculation in the
//! update engine and observable calculator goes through it.

use std::f64::consts::PI;

use crate::params::clamp_state_count;
use crate::{BoundaryKind, CoreError, CoreResult, ModelKind, SimRng};

/// Full turn in radians.  Stored angles always lie in `[0, TWO_PI)`.
pub const TWO_PI: f64 = std::f64::consts::TAU;

/// Row/column offsets of the four nearest neighbours: up, down, left, right.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Normalize an angle into `[0, 2π)`.
///
/// `rem_euclid` can round a tiny negative input up to exactly `2π`; that
/// case folds back to `0`.
#[inline]
pub fn wrap_angle(theta: f64) -> f64 {
    let wrapped = theta.rem_euclid(TWO_PI);
    if wrapped >= TWO_PI { 0.0 } else { wrapped }
}

/// Resolve `(i, j)` to a storage index under `boundary`.
///
/// In-range coordinates always resolve.  Out-of-range coordinates wrap under
/// `Periodic` and resolve to `None` under the fixed policies.
#[inline]
pub fn resolve(size: usize, boundary: BoundaryKind, i: isize, j: isize) -> Option<usize> {
    let n = size as isize;
    if (0..n).contains(&i) && (0..n).contains(&j) {
        return Some((i * n + j) as usize);
    }
    match boundary {
        BoundaryKind::Periodic => Some((i.rem_euclid(n) * n + j.rem_euclid(n)) as usize),
        BoundaryKind::FixedHigh | BoundaryKind::FixedLow => None,
    }
}

/// Storage indices of the four neighbours of `index`.  `None` marks a
/// neighbour that falls outside a fixed boundary.
#[inline]
pub fn neighbor_indices(size: usize, boundary: BoundaryKind, index: usize) -> [Option<usize>; 4] {
    let i = (index / size) as isize;
    let j = (index % size) as isize;
    NEIGHBOR_OFFSETS.map(|(di, dj)| resolve(size, boundary, i + di, j + dj))
}

// ── Grid ──────────────────────────────────────────────────────────────────────

/// Read-only view of one representation's cells with boundary resolution.
///
/// Cheap to build (a slice and four scalars), so update loops construct one
/// per site visit and drop it before writing.
#[derive(Copy, Clone, Debug)]
pub struct Grid<'a, T> {
    cells:    &'a [T],
    size:     usize,
    boundary: BoundaryKind,
    high:     T,
    low:      T,
}

impl<'a, T: Copy> Grid<'a, T> {
    /// `high` and `low` are the values read beyond a `FixedHigh` or
    /// `FixedLow` boundary.
    pub fn new(cells: &'a [T], size: usize, boundary: BoundaryKind, high: T, low: T) -> Self {
        debug_assert_eq!(cells.len(), size * size);
        Self { cells, size, boundary, high, low }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Effective value at `(i, j)`, applying the boundary policy when either
    /// coordinate is outside `[0, L)`.
    #[inline]
    pub fn get(&self, i: isize, j: isize) -> T {
        match resolve(self.size, self.boundary, i, j) {
            Some(k) => self.cells[k],
            None => match self.boundary {
                BoundaryKind::FixedLow => self.low,
                BoundaryKind::FixedHigh | BoundaryKind::Periodic => self.high,
            },
        }
    }

    /// Values of the four neighbours of storage index `index`.
    #[inline]
    pub fn neighbors(&self, index: usize) -> [T; 4] {
        let i = (index / self.size) as isize;
        let j = (index % self.size) as isize;
        NEIGHBOR_OFFSETS.map(|(di, dj)| self.get(i + di, j + dj))
    }
}

/// Binary view: `+1` beyond a high boundary, `-1` beyond a low one.
#[inline]
pub fn binary_grid(cells: &[i8], size: usize, boundary: BoundaryKind) -> Grid<'_, i8> {
    Grid::new(cells, size, boundary, 1, -1)
}

/// Continuous view: angle `0` beyond a high boundary, `π` beyond a low one.
#[inline]
pub fn angle_grid(cells: &[f64], size: usize, boundary: BoundaryKind) -> Grid<'_, f64> {
    Grid::new(cells, size, boundary, 0.0, PI)
}

/// Multi-state view: state `0` beyond a high boundary, `q − 1` beyond a low one.
#[inline]
pub fn state_grid(cells: &[u8], size: usize, boundary: BoundaryKind, q: u8) -> Grid<'_, u8> {
    Grid::new(cells, size, boundary, 0, q.saturating_sub(1))
}

// ── Spins / SiteValue ─────────────────────────────────────────────────────────

/// The backing array of a lattice, tagged by representation.
#[derive(Clone, Debug, PartialEq)]
pub enum Spins {
    /// `+1` / `-1` per site.
    Binary(Vec<i8>),
    /// Angle in `[0, 2π)` per site.
    Continuous(Vec<f64>),
    /// State index in `0..q` per site.
    MultiState { states: Vec<u8>, q: u8 },
}

impl Spins {
    pub fn model(&self) -> ModelKind {
        match self {
            Spins::Binary(_)          => ModelKind::Binary,
            Spins::Continuous(_)      => ModelKind::Continuous,
            Spins::MultiState { .. }  => ModelKind::MultiState,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Spins::Binary(v)               => v.len(),
            Spins::Continuous(v)           => v.len(),
            Spins::MultiState { states, .. } => states.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `q` for the multi-state representation, `None` otherwise.
    pub fn state_count(&self) -> Option<u8> {
        match self {
            Spins::MultiState { q, .. } => Some(*q),
            _ => None,
        }
    }
}

/// One site's value, as returned by [`Lattice::get`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SiteValue {
    Spin(i8),
    Angle(f64),
    State(u8),
}

// ── Lattice ───────────────────────────────────────────────────────────────────

/// A square spin lattice of side `size`.
///
/// The lattice exclusively owns its backing array.  It is created wholesale
/// on (re)initialization and replaced, never migrated, on a model change.
#[derive(Clone, Debug, PartialEq)]
pub struct Lattice {
    size:  usize,
    spins: Spins,
}

impl Lattice {
    /// Allocate `size²` sites for `model` and randomize them uniformly:
    /// binary sites in `{+1, −1}`, angles in `[0, 2π)`, states in `0..q`.
    ///
    /// `state_count` is only consulted for the multi-state model and is
    /// clamped into `[2, 10]`.
    pub fn create(
        size:        usize,
        model:       ModelKind,
        state_count: u8,
        rng:         &mut SimRng,
    ) -> CoreResult<Self> {
        if size == 0 {
            return Err(CoreError::InvalidSize(size));
        }
        let n = size.checked_mul(size).ok_or(CoreError::InvalidSize(size))?;

        let spins = match model {
            ModelKind::Binary => Spins::Binary(
                (0..n).map(|_| if rng.gen_bool(0.5) { 1 } else { -1 }).collect(),
            ),
            ModelKind::Continuous => Spins::Continuous(
                (0..n).map(|_| rng.gen_range(0.0..TWO_PI)).collect(),
            ),
            ModelKind::MultiState => {
                let q = clamp_state_count(state_count as usize);
                Spins::MultiState {
                    states: (0..n).map(|_| rng.gen_range(0..q)).collect(),
                    q,
                }
            }
        };
        Ok(Self { size, spins })
    }

    /// Wrap an existing site array.  The array length must be `size²`.
    pub fn from_spins(size: usize, spins: Spins) -> CoreResult<Self> {
        if size == 0 {
            return Err(CoreError::InvalidSize(size));
        }
        let expected = size * size;
        if spins.len() != expected {
            return Err(CoreError::SiteCount { expected, got: spins.len() });
        }
        Ok(Self { size, spins })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// Side length `L`.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of sites, `L²`.
    #[inline]
    pub fn site_count(&self) -> usize {
        self.spins.len()
    }

    #[inline]
    pub fn model(&self) -> ModelKind {
        self.spins.model()
    }

    #[inline]
    pub fn state_count(&self) -> Option<u8> {
        self.spins.state_count()
    }

    #[inline]
    pub fn spins(&self) -> &Spins {
        &self.spins
    }

    /// Mutable access for the update engine.  Callers keep values inside the
    /// representation's domain.
    #[inline]
    pub fn spins_mut(&mut self) -> &mut Spins {
        &mut self.spins
    }

    // ── Site access ───────────────────────────────────────────────────────

    /// Effective value at `(i, j)` under `boundary`.
    ///
    /// In-range coordinates return raw storage regardless of the policy.
    pub fn get(&self, i: isize, j: isize, boundary: BoundaryKind) -> SiteValue {
        match &self.spins {
            Spins::Binary(cells) => {
                SiteValue::Spin(binary_grid(cells, self.size, boundary).get(i, j))
            }
            Spins::Continuous(cells) => {
                SiteValue::Angle(angle_grid(cells, self.size, boundary).get(i, j))
            }
            Spins::MultiState { states, q } => {
                SiteValue::State(state_grid(states, self.size, boundary, *q).get(i, j))
            }
        }
    }

    /// Raw in-bounds write.  No domain validation: the caller guarantees the
    /// index is in range and the value belongs to the active representation.
    /// A value of the wrong representation is ignored.
    pub fn set(&mut self, index: usize, value: SiteValue) {
        match (&mut self.spins, value) {
            (Spins::Binary(cells), SiteValue::Spin(s))                 => cells[index] = s,
            (Spins::Continuous(cells), SiteValue::Angle(theta))        => cells[index] = theta,
            (Spins::MultiState { states, .. }, SiteValue::State(s))    => states[index] = s,
            (spins, value) => {
                debug_assert!(false, "{value:?} written to a {} lattice", spins.model());
            }
        }
    }
}
