//! Unit tests for ising-core primitives.

#[cfg(test)]
mod kinds {
    use crate::{AlgorithmKind, BoundaryKind, CoreError, ModelKind};

    #[test]
    fn defaults() {
        assert_eq!(ModelKind::default(), ModelKind::Binary);
        assert_eq!(BoundaryKind::default(), BoundaryKind::Periodic);
        assert_eq!(AlgorithmKind::default(), AlgorithmKind::LocalSweep);
    }

    #[test]
    fn labels_parse_back() {
        for &kind in BoundaryKind::ALL {
            assert_eq!(kind.as_str().parse::<BoundaryKind>().unwrap(), kind);
        }
        assert_eq!(" Cluster ".parse::<AlgorithmKind>().unwrap(), AlgorithmKind::Cluster);
        assert_eq!(ModelKind::MultiState.to_string(), "multistate");
    }

    #[test]
    fn unknown_label_is_parse_error() {
        let err = "potts4".parse::<ModelKind>().unwrap_err();
        assert!(matches!(err, CoreError::Parse(_)));
    }

    #[test]
    fn codes_are_stable() {
        for &kind in ModelKind::ALL {
            assert_eq!(ModelKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(AlgorithmKind::from_code(9), None);
    }

    #[test]
    fn only_binary_supports_cluster() {
        assert!(ModelKind::Binary.supports_cluster());
        assert!(!ModelKind::Continuous.supports_cluster());
        assert!(!ModelKind::MultiState.supports_cluster());
    }
}

#[cfg(test)]
mod params {
    use crate::params::{clamp_state_count, DEFAULT_STATE_COUNT};
    use crate::{CoreError, ModelKind, SimParams};

    #[test]
    fn temperature_stored_as_beta() {
        let p = SimParams::new(4.0, ModelKind::Binary).unwrap();
        assert_eq!(p.beta(), 0.25);
        assert_eq!(p.temperature(), 4.0);
    }

    #[test]
    fn invalid_temperature_keeps_previous_beta() {
        let mut p = SimParams::new(2.0, ModelKind::Binary).unwrap();
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY, f64::MIN_POSITIVE / 8.0] {
            let err = p.set_temperature(bad).unwrap_err();
            assert!(matches!(err, CoreError::InvalidTemperature(_)));
            assert_eq!(p.beta(), 0.5);
        }
    }

    #[test]
    fn new_rejects_non_positive_temperature() {
        assert!(SimParams::new(0.0, ModelKind::Continuous).is_err());
    }

    #[test]
    fn state_count_clamps() {
        let mut p = SimParams::default();
        assert_eq!(p.state_count(), DEFAULT_STATE_COUNT);
        assert_eq!(p.set_state_count(0), 2);
        assert_eq!(p.set_state_count(1), 2);
        assert_eq!(p.set_state_count(7), 7);
        assert_eq!(p.set_state_count(250), 10);
        assert_eq!(clamp_state_count(usize::MAX), 10);
    }

    #[test]
    fn steps_per_frame_rejects_zero() {
        let mut p = SimParams::default();
        p.set_steps_per_frame(12).unwrap();
        assert!(p.set_steps_per_frame(0).is_err());
        assert_eq!(p.steps_per_frame(), 12);
    }

    #[test]
    fn field_must_be_finite() {
        let mut p = SimParams::default();
        p.set_field(-0.3).unwrap();
        assert!(p.set_field(f64::NAN).is_err());
        assert_eq!(p.field(), -0.3);
        assert!(p.field_is_active());
        p.set_field(1e-12).unwrap();
        assert!(!p.field_is_active());
    }
}

#[cfg(test)]
mod lattice {
    use std::f64::consts::PI;

    use crate::lattice::{neighbor_indices, resolve, wrap_angle};
    use crate::{BoundaryKind, CoreError, Lattice, ModelKind, SimRng, SiteValue, Spins, TWO_PI};

    fn all_models(size: usize, seed: u64) -> Vec<Lattice> {
        let mut rng = SimRng::new(seed);
        ModelKind::ALL
            .iter()
            .map(|&m| Lattice::create(size, m, 5, &mut rng).unwrap())
            .collect()
    }

    fn raw(lattice: &Lattice, k: usize) -> SiteValue {
        match lattice.spins() {
            Spins::Binary(v)               => SiteValue::Spin(v[k]),
            Spins::Continuous(v)           => SiteValue::Angle(v[k]),
            Spins::MultiState { states, .. } => SiteValue::State(states[k]),
        }
    }

    #[test]
    fn zero_size_is_rejected() {
        let mut rng = SimRng::new(1);
        let err = Lattice::create(0, ModelKind::Binary, 2, &mut rng).unwrap_err();
        assert_eq!(err, CoreError::InvalidSize(0));
    }

    #[test]
    fn create_allocates_square() {
        for lattice in all_models(7, 3) {
            assert_eq!(lattice.size(), 7);
            assert_eq!(lattice.site_count(), 49);
        }
    }

    #[test]
    fn random_values_within_domain() {
        let mut rng = SimRng::new(11);
        let bin = Lattice::create(16, ModelKind::Binary, 2, &mut rng).unwrap();
        let Spins::Binary(v) = bin.spins() else { panic!("binary expected") };
        assert!(v.iter().all(|&s| s == 1 || s == -1));
        assert!(v.contains(&1) && v.contains(&-1));

        let cont = Lattice::create(16, ModelKind::Continuous, 2, &mut rng).unwrap();
        let Spins::Continuous(v) = cont.spins() else { panic!("continuous expected") };
        assert!(v.iter().all(|&t| (0.0..TWO_PI).contains(&t)));

        let potts = Lattice::create(16, ModelKind::MultiState, 4, &mut rng).unwrap();
        let Spins::MultiState { states, q } = potts.spins() else { panic!("multistate expected") };
        assert_eq!(*q, 4);
        assert!(states.iter().all(|&s| s < 4));
        for target in 0..4 {
            assert!(states.contains(&target), "state {target} never drawn");
        }
    }

    #[test]
    fn state_count_is_clamped_on_create() {
        let mut rng = SimRng::new(5);
        let lattice = Lattice::create(4, ModelKind::MultiState, 40, &mut rng).unwrap();
        assert_eq!(lattice.state_count(), Some(10));
    }

    #[test]
    fn in_range_reads_ignore_boundary() {
        for lattice in all_models(5, 99) {
            for &boundary in BoundaryKind::ALL {
                for i in 0..5 {
                    for j in 0..5 {
                        assert_eq!(
                            lattice.get(i as isize, j as isize, boundary),
                            raw(&lattice, i * 5 + j),
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn periodic_wraps() {
        for lattice in all_models(4, 8) {
            let b = BoundaryKind::Periodic;
            assert_eq!(lattice.get(-1, 0, b), raw(&lattice, 12));
            assert_eq!(lattice.get(2, 4, b), raw(&lattice, 8));
            assert_eq!(lattice.get(4, -1, b), raw(&lattice, 3));
        }
    }

    #[test]
    fn fixed_boundaries_read_model_extremes() {
        let lattices = all_models(3, 21);
        let high = BoundaryKind::FixedHigh;
        let low = BoundaryKind::FixedLow;

        assert_eq!(lattices[0].get(-1, 1, high), SiteValue::Spin(1));
        assert_eq!(lattices[0].get(1, 3, low), SiteValue::Spin(-1));
        assert_eq!(lattices[1].get(3, 0, high), SiteValue::Angle(0.0));
        assert_eq!(lattices[1].get(0, -1, low), SiteValue::Angle(PI));
        assert_eq!(lattices[2].get(-5, -5, high), SiteValue::State(0));
        assert_eq!(lattices[2].get(0, 3, low), SiteValue::State(4));
    }

    #[test]
    fn neighbor_indices_respect_boundary() {
        // Corner (0, 0) of a 3x3 lattice.
        assert_eq!(
            neighbor_indices(3, BoundaryKind::Periodic, 0),
            [Some(6), Some(3), Some(2), Some(1)],
        );
        assert_eq!(
            neighbor_indices(3, BoundaryKind::FixedLow, 0),
            [None, Some(3), None, Some(1)],
        );
        assert_eq!(resolve(3, BoundaryKind::FixedHigh, 1, 1), Some(4));
    }

    #[test]
    fn set_writes_raw_storage() {
        let mut rng = SimRng::new(2);
        let mut lattice = Lattice::create(3, ModelKind::Continuous, 2, &mut rng).unwrap();
        lattice.set(4, SiteValue::Angle(1.25));
        assert_eq!(lattice.get(1, 1, BoundaryKind::FixedLow), SiteValue::Angle(1.25));
    }

    #[test]
    fn from_spins_checks_length() {
        let err = Lattice::from_spins(3, Spins::Binary(vec![1; 8])).unwrap_err();
        assert_eq!(err, CoreError::SiteCount { expected: 9, got: 8 });
        assert!(Lattice::from_spins(2, Spins::Binary(vec![1; 4])).is_ok());
    }

    #[test]
    fn wrap_angle_stays_in_range() {
        for theta in [-1e-18, -0.4, 0.0, TWO_PI, 3.0 * TWO_PI + 0.1, -7.0 * PI] {
            let w = wrap_angle(theta);
            assert!((0.0..TWO_PI).contains(&w), "{theta} -> {w}");
        }
        assert!((wrap_angle(-0.5) - (TWO_PI - 0.5)).abs() < 1e-12);
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn same_seed_same_stream() {
        let mut a = SimRng::new(42);
        let mut b = SimRng::new(42);
        for _ in 0..64 {
            assert_eq!(a.uniform().to_bits(), b.uniform().to_bits());
        }
    }

    #[test]
    fn uniform_in_unit_interval() {
        let mut rng = SimRng::new(7);
        for _ in 0..1_000 {
            let u = rng.uniform();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = SimRng::new(3);
        let mut v: Vec<usize> = (0..50).collect();
        rng.shuffle(&mut v);
        let mut sorted = v.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }
}

#[cfg(test)]
mod time {
    use crate::SweepCount;

    #[test]
    fn sweep_arithmetic() {
        let mut s = SweepCount::ZERO;
        s.advance();
        s.advance();
        assert_eq!(s, SweepCount(2));
        assert_eq!(SweepCount(7).since(s), 5);
        assert_eq!(s.since(SweepCount(10)), 0);
        assert_eq!(s.to_string(), "S2");
    }
}
