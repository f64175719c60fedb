//! Enumerations selecting the spin model, boundary policy, and update
//! algorithm.
//!
//! All three share the same surface: a `Default`, a stable lowercase label
//! (`as_str` / `Display` / `FromStr`) for host configuration strings, and a
//! compact `u8` code so `ising-sim` can store them in atomics.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Generate label, code, and parsing impls for a fieldless kind enum.
macro_rules! labelled_kind {
    ($name:ident { $($variant:ident => ($code:literal, $label:literal)),+ $(,)? }) => {
        impl $name {
            /// Every variant, in code order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Stable lowercase label.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            /// Compact code used for atomic storage.
            #[inline]
            pub fn code(self) -> u8 {
                match self {
                    $($name::$variant => $code,)+
                }
            }

            /// Inverse of [`code`](Self::code).  Unknown codes map to `None`.
            #[inline]
            pub fn from_code(code: u8) -> Option<Self> {
                match code {
                    $($code => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($label => Ok($name::$variant),)+
                    other => Err(CoreError::Parse(format!(
                        "unknown {} '{other}'",
                        stringify!($name),
                    ))),
                }
            }
        }
    };
}

// ── ModelKind ─────────────────────────────────────────────────────────────────

/// Which spin representation the lattice carries.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModelKind {
    /// Two-state spins, each site is `+1` or `-1`.
    #[default]
    Binary,
    /// Planar rotor, each site is an angle in `[0, 2π)`.
    Continuous,
    /// q-state spins, each site is an index in `0..q`.
    MultiState,
}

labelled_kind!(ModelKind {
    Binary     => (0, "binary"),
    Continuous => (1, "continuous"),
    MultiState => (2, "multistate"),
});

// ── BoundaryKind ──────────────────────────────────────────────────────────────

/// How neighbour reads outside `[0, L)` are resolved.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundaryKind {
    /// Indices wrap modulo `L`.
    #[default]
    Periodic,
    /// Out-of-range neighbours read as the model's aligned value.
    FixedHigh,
    /// Out-of-range neighbours read as the model's opposed value.
    FixedLow,
}

labelled_kind!(BoundaryKind {
    Periodic  => (0, "periodic"),
    FixedHigh => (1, "fixed-high"),
    FixedLow  => (2, "fixed-low"),
});

// ── AlgorithmKind ─────────────────────────────────────────────────────────────

/// Which Monte Carlo move one `step()` performs.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlgorithmKind {
    /// One Metropolis sweep over every site in random order.
    #[default]
    LocalSweep,
    /// One Wolff cluster grown from a random seed site.
    Cluster,
}

labelled_kind!(AlgorithmKind {
    LocalSweep => (0, "local"),
    Cluster    => (1, "cluster"),
});

impl ModelKind {
    /// `true` when the Wolff move is defined for this model.
    #[inline]
    pub fn supports_cluster(self) -> bool {
        matches!(self, ModelKind::Binary)
    }
}
