//! Wolff single-cluster growth for the binary model.
//!
//! # Growth
//!
//! Starting from a seed site, the cluster grows through an explicit stack
//! (no recursion, so lattices thousands of sites wide are fine).  Every
//! unvisited neighbour holding the seed's value is added with independent
//! probability `p_add = 1 − exp(−2β)`.  Each neighbour test consumes one
//! uniform draw.  Neighbours beyond a fixed boundary are not sites and are
//! never added.
//!
//! # Amortized scratch
//!
//! Visited marks are generation stamps: a site is in the current cluster
//! when `stamp[k] == epoch`.  Starting a new cluster bumps `epoch` instead
//! of clearing the array, so a step costs O(cluster size) rather than O(L²).
//! The buffers are reused across steps and only reallocated when the site
//! count changes.

use ising_core::lattice::neighbor_indices;
use ising_core::{BoundaryKind, SimRng};

/// Reusable buffers for cluster growth.
#[derive(Debug, Default, Clone)]
pub struct ClusterScratch {
    stamp:   Vec<u32>,
    epoch:   u32,
    stack:   Vec<usize>,
    members: Vec<usize>,
}

impl ClusterScratch {
    fn begin(&mut self, site_count: usize) {
        if self.stamp.len() != site_count {
            self.stamp = vec![0; site_count];
            self.epoch = 0;
        }
        self.epoch = self.epoch.wrapping_add(1);
        if self.epoch == 0 {
            // Stamp counter wrapped: old marks could alias the new epoch.
            self.stamp.fill(0);
            self.epoch = 1;
        }
        self.stack.clear();
        self.members.clear();
    }

    #[inline]
    fn is_visited(&self, k: usize) -> bool {
        self.stamp[k] == self.epoch
    }

    #[inline]
    fn admit(&mut self, k: usize) {
        self.stamp[k] = self.epoch;
        self.stack.push(k);
        self.members.push(k);
    }

    /// Grow a cluster of sites sharing `cells[seed]`'s value and return its
    /// members.  The lattice is not modified.
    pub fn grow(
        &mut self,
        cells:    &[i8],
        size:     usize,
        boundary: BoundaryKind,
        seed:     usize,
        p_add:    f64,
        rng:      &mut SimRng,
    ) -> &[usize] {
        self.begin(cells.len());
        let target = cells[seed];
        self.admit(seed);

        while let Some(k) = self.stack.pop() {
            for nb in neighbor_indices(size, boundary, k).into_iter().flatten() {
                if !self.is_visited(nb) && cells[nb] == target && rng.uniform() < p_add {
                    self.admit(nb);
                }
            }
        }
        &self.members
    }
}
