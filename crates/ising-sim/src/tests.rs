//! Unit tests for ising-sim.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use ising_core::{AlgorithmKind, BoundaryKind, CoreError, Lattice, ModelKind, Spins, SweepCount};

use crate::{ClockConfig, Frame, FrameSink, SharedParams, SimBuilder, SimError, Simulation};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn binary_sim(size: usize, temperature: f64) -> Simulation {
    init_logging();
    SimBuilder::new(size, temperature, ModelKind::Binary).seed(7).build().unwrap()
}

fn lattice_of(sim: &Simulation) -> Lattice {
    sim.get_current_state().unwrap().lattice
}

/// Poll `cond` every millisecond for up to five seconds.
fn wait_for(mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        thread::sleep(Duration::from_millis(1));
    }
    cond()
}

/// Sink recording sweep counts and lifecycle calls.
#[derive(Clone, Default)]
struct Recorder {
    sweeps: Arc<Mutex<Vec<SweepCount>>>,
    starts: Arc<AtomicUsize>,
    stops:  Arc<AtomicUsize>,
}

impl Recorder {
    fn frames(&self) -> usize {
        self.sweeps.lock().unwrap().len()
    }
}

impl FrameSink for Recorder {
    fn on_frame(&mut self, frame: &Frame) {
        self.sweeps.lock().unwrap().push(frame.sweep);
    }

    fn on_start(&mut self) {
        self.starts.fetch_add(1, Ordering::SeqCst);
    }

    fn on_stop(&mut self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
    }
}

// ── Initialization and state machine ──────────────────────────────────────────

#[cfg(test)]
mod lifecycle {
    use super::*;

    #[test]
    fn start_before_initialize_is_an_error() {
        init_logging();
        let mut sim = Simulation::default();
        assert!(matches!(sim.start(), Err(SimError::NotInitialized)));
        assert!(!sim.is_running());
    }

    #[test]
    fn uninitialized_queries_and_setters_fail() {
        let sim = Simulation::default();
        assert!(matches!(sim.set_temperature(1.0), Err(SimError::NotInitialized)));
        assert!(matches!(sim.frame(), Err(SimError::NotInitialized)));
        assert!(matches!(sim.get_current_state(), Err(SimError::NotInitialized)));
        assert!(matches!(sim.advance(1), Err(SimError::NotInitialized)));
        assert!(matches!(sim.reset(), Err(SimError::NotInitialized)));
    }

    #[test]
    fn invalid_initialization_is_rejected() {
        init_logging();
        let sim = Simulation::default();
        assert!(matches!(
            sim.initialize(0, 1.0, ModelKind::Binary, None, None),
            Err(SimError::Core(CoreError::InvalidSize(0)))
        ));
        for t in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                sim.initialize(8, t, ModelKind::Binary, None, None),
                Err(SimError::Core(CoreError::InvalidTemperature(_)))
            ));
        }
        assert!(!sim.is_initialized());
    }

    #[test]
    fn initialize_applies_optional_kinds() {
        let sim = Simulation::default();
        sim.initialize(6, 1.5, ModelKind::Continuous, Some(BoundaryKind::FixedLow), None)
            .unwrap();
        let p = sim.params();
        assert_eq!(p.model(), ModelKind::Continuous);
        assert_eq!(p.boundary(), BoundaryKind::FixedLow);
        assert_eq!(p.algorithm(), AlgorithmKind::LocalSweep);

        let state = sim.get_current_state().unwrap();
        assert_eq!(state.size, 6);
        assert_eq!(state.model, ModelKind::Continuous);
        assert_eq!(state.lattice.site_count(), 36);
        assert_eq!(state.sweep, SweepCount::ZERO);
    }

    #[test]
    fn builder_rejects_invalid_parameters() {
        assert!(SimBuilder::new(0, 1.0, ModelKind::Binary).build().is_err());
        assert!(SimBuilder::new(4, -2.0, ModelKind::Binary).build().is_err());
        assert!(SimBuilder::new(4, 1.0, ModelKind::Binary).steps_per_frame(0).build().is_err());
        assert!(SimBuilder::new(4, 1.0, ModelKind::Binary).field(f64::NAN).build().is_err());
    }

    #[test]
    fn builder_clamps_state_count() {
        let sim = SimBuilder::new(4, 1.0, ModelKind::MultiState).state_count(40).build().unwrap();
        assert_eq!(sim.params().state_count(), 10);
        assert_eq!(lattice_of(&sim).state_count(), Some(10));
    }

    #[test]
    fn stop_when_stopped_is_a_no_op() {
        let mut sim = binary_sim(4, 1.0);
        sim.stop().unwrap();
        sim.stop().unwrap();
        assert!(!sim.is_running());
    }
}

// ── Parameter store ───────────────────────────────────────────────────────────

#[cfg(test)]
mod parameters {
    use super::*;

    #[test]
    fn rejected_temperature_keeps_previous_beta() {
        let sim = binary_sim(4, 2.0);
        for bad in [0.0, -3.0, f64::NAN] {
            assert!(sim.set_temperature(bad).is_err());
            assert_eq!(sim.params().beta(), 0.5);
        }
        sim.set_temperature(4.0).unwrap();
        assert_eq!(sim.params().beta(), 0.25);
    }

    #[test]
    fn state_count_is_clamped() {
        let sim = binary_sim(4, 1.0);
        assert_eq!(sim.set_state_count(50).unwrap(), 10);
        assert_eq!(sim.set_state_count(0).unwrap(), 2);
        assert_eq!(sim.set_state_count(5).unwrap(), 5);
        assert_eq!(sim.params().state_count(), 5);
    }

    #[test]
    fn zero_steps_per_frame_rejected() {
        let sim = binary_sim(4, 1.0);
        sim.set_steps_per_frame(3).unwrap();
        assert!(sim.set_steps_per_frame(0).is_err());
        assert_eq!(sim.params().steps_per_frame(), 3);
    }

    #[test]
    fn non_finite_field_rejected() {
        let sim = binary_sim(4, 1.0);
        sim.set_field(0.25).unwrap();
        assert!(sim.set_field(f64::INFINITY).is_err());
        assert_eq!(sim.params().field(), 0.25);
    }

    #[test]
    fn shared_params_round_trip() {
        let shared = SharedParams::default();
        shared.set_temperature(1.25).unwrap();
        shared.set_field(-0.5).unwrap();
        shared.set_boundary(BoundaryKind::FixedHigh);
        shared.set_model(ModelKind::MultiState);
        shared.set_algorithm(AlgorithmKind::Cluster);
        shared.set_state_count(7);
        shared.set_steps_per_frame(4).unwrap();

        let p = shared.snapshot();
        assert_eq!(p.beta(), 0.8);
        assert_eq!(p.field(), -0.5);
        assert_eq!(p.boundary(), BoundaryKind::FixedHigh);
        assert_eq!(p.model(), ModelKind::MultiState);
        assert_eq!(p.algorithm(), AlgorithmKind::Cluster);
        assert_eq!(p.state_count(), 7);
        assert_eq!(p.steps_per_frame(), 4);

        let copy = SharedParams::new(&p);
        assert_eq!(copy.snapshot(), p);
    }
}

// ── Reallocation ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod reallocation {
    use super::*;

    #[test]
    fn model_switch_replaces_lattice() {
        let sim = binary_sim(8, 1.0);
        sim.advance(3).unwrap();
        sim.set_model_kind(ModelKind::Continuous).unwrap();

        let state = sim.get_current_state().unwrap();
        assert_eq!(state.model, ModelKind::Continuous);
        assert_eq!(state.size, 8);
        assert_eq!(state.sweep, SweepCount::ZERO);
        assert!(state.observables.vector.is_some());
    }

    #[test]
    fn same_model_keeps_lattice() {
        let sim = binary_sim(8, 1.0);
        let before = lattice_of(&sim);
        sim.set_model_kind(ModelKind::Binary).unwrap();
        assert_eq!(lattice_of(&sim), before);
    }

    #[test]
    fn state_count_change_rerandomizes_multi_state() {
        let sim = SimBuilder::new(10, 1.0, ModelKind::MultiState).state_count(8).build().unwrap();
        sim.set_state_count(3).unwrap();

        let lattice = lattice_of(&sim);
        assert_eq!(lattice.state_count(), Some(3));
        let Spins::MultiState { states, .. } = lattice.spins() else {
            panic!("multi-state lattice expected");
        };
        assert!(states.iter().all(|&s| s < 3));
    }

    #[test]
    fn state_count_change_ignored_by_binary_lattice() {
        let sim = binary_sim(6, 1.0);
        let before = lattice_of(&sim);
        sim.set_state_count(6).unwrap();
        assert_eq!(lattice_of(&sim), before);
    }

    #[test]
    fn reset_keeps_model_and_size() {
        let sim = binary_sim(12, 1.0);
        let before = lattice_of(&sim);
        sim.reset().unwrap();
        let after = lattice_of(&sim);
        assert_eq!(after.size(), 12);
        assert_eq!(after.model(), ModelKind::Binary);
        // 144 fresh coin flips matching the old ones is not a realistic outcome.
        assert_ne!(after, before);
    }

    #[test]
    fn set_size_reallocates_and_rejects_zero() {
        let sim = binary_sim(4, 1.0);
        sim.set_size(9).unwrap();
        assert_eq!(lattice_of(&sim).site_count(), 81);
        assert!(matches!(sim.set_size(0), Err(SimError::Core(CoreError::InvalidSize(0)))));
        assert_eq!(lattice_of(&sim).size(), 9);
    }
}

// ── Synchronous stepping ──────────────────────────────────────────────────────

#[cfg(test)]
mod stepping {
    use super::*;

    #[test]
    fn advance_counts_steps() {
        let sim = binary_sim(6, 2.0);
        sim.set_steps_per_frame(2).unwrap();
        let summary = sim.advance(3).unwrap();
        assert_eq!(summary.steps, 6);
        assert_eq!(sim.sweep().unwrap(), SweepCount(6));
        assert_eq!(sim.frame().unwrap().sweep, SweepCount(6));
    }

    #[test]
    fn cluster_with_zero_field_leaves_lattice_unchanged() {
        let sim = binary_sim(8, 1.0);
        sim.set_algorithm(AlgorithmKind::Cluster).unwrap();
        let before = lattice_of(&sim);

        let summary = sim.advance(20).unwrap();
        assert_eq!(summary.steps, 20);
        assert_eq!(summary.changed, 0);
        assert_eq!(lattice_of(&sim), before);
    }

    #[test]
    fn cluster_on_continuous_is_a_no_op() {
        let sim = SimBuilder::new(6, 1.0, ModelKind::Continuous)
            .algorithm(AlgorithmKind::Cluster)
            .field(0.5)
            .build()
            .unwrap();
        let before = lattice_of(&sim);
        assert_eq!(sim.advance(10).unwrap().changed, 0);
        assert_eq!(lattice_of(&sim), before);
    }

    #[test]
    fn equal_seeds_give_identical_runs() {
        let run = || {
            let sim = SimBuilder::new(10, 2.5, ModelKind::Binary).seed(99).build().unwrap();
            sim.advance(25).unwrap();
            lattice_of(&sim)
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn frame_carries_model_specific_fields() {
        let potts = SimBuilder::new(4, 1.0, ModelKind::MultiState).state_count(4).build().unwrap();
        let frame = potts.frame().unwrap();
        assert_eq!(frame.model(), ModelKind::MultiState);
        assert_eq!(frame.state_count(), Some(4));
        assert!(frame.vector().is_none());

        let rotor = SimBuilder::new(4, 1.0, ModelKind::Continuous).build().unwrap();
        let frame = rotor.frame().unwrap();
        assert_eq!(frame.state_count(), None);
        let [mx, my] = frame.vector().unwrap();
        assert!((frame.order_parameter() - (mx * mx + my * my).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn low_temperature_fixed_high_boundary_orders() {
        let sim = SimBuilder::new(10, 0.1, ModelKind::Binary)
            .boundary(BoundaryKind::FixedHigh)
            .seed(3)
            .build()
            .unwrap();
        sim.advance(2000).unwrap();
        assert!(sim.frame().unwrap().order_parameter() > 0.8);
    }

    #[test]
    fn low_temperature_periodic_runs_mostly_order() {
        // Some periodic runs freeze into straight stripes, so count seeds.
        let seeds = 40;
        let ordered = (0..seeds)
            .filter(|&seed| {
                let sim = SimBuilder::new(10, 0.1, ModelKind::Binary).seed(seed).build().unwrap();
                sim.advance(2000).unwrap();
                sim.frame().unwrap().order_parameter().abs() > 0.8
            })
            .count();
        assert!(ordered > seeds as usize / 2, "ordered {ordered}/{seeds}");
    }

    #[test]
    fn high_temperature_stays_disordered() {
        // A single 16-site sample is too noisy to bound; average over the run.
        let sim = SimBuilder::new(4, 100.0, ModelKind::Binary).seed(4).build().unwrap();
        let samples = 1000;
        let mut total = 0.0;
        for _ in 0..samples {
            sim.advance(1).unwrap();
            total += sim.frame().unwrap().order_parameter().abs();
        }
        assert!(total / (samples as f64) < 0.3);
    }
}

// ── Background clock ──────────────────────────────────────────────────────────

#[cfg(test)]
mod clock {
    use super::*;

    fn running_sim(recorder: &Recorder) -> Simulation {
        init_logging();
        SimBuilder::new(16, 2.0, ModelKind::Binary)
            .frame_interval(Duration::from_millis(2))
            .sink(recorder.clone())
            .build()
            .unwrap()
    }

    #[test]
    fn frames_arrive_and_stop_after_stop() {
        let recorder = Recorder::default();
        let mut sim = running_sim(&recorder);
        sim.start().unwrap();
        assert!(sim.is_running());
        assert!(wait_for(|| recorder.frames() >= 3));

        sim.stop().unwrap();
        assert!(!sim.is_running());
        let delivered = recorder.frames();
        thread::sleep(Duration::from_millis(50));
        assert_eq!(recorder.frames(), delivered);

        assert_eq!(recorder.starts.load(Ordering::SeqCst), 1);
        assert_eq!(recorder.stops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn frame_sweeps_are_increasing() {
        let recorder = Recorder::default();
        let mut sim = running_sim(&recorder);
        sim.start().unwrap();
        assert!(wait_for(|| recorder.frames() >= 5));
        sim.stop().unwrap();

        let sweeps = recorder.sweeps.lock().unwrap();
        assert!(sweeps.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn restart_resumes_from_current_state() {
        let recorder = Recorder::default();
        let mut sim = running_sim(&recorder);
        sim.start().unwrap();
        assert!(wait_for(|| sim.sweep().unwrap() > SweepCount(10)));
        sim.stop().unwrap();
        let paused = sim.sweep().unwrap();

        thread::sleep(Duration::from_millis(10));
        assert_eq!(sim.sweep().unwrap(), paused);

        sim.start().unwrap();
        assert!(wait_for(|| sim.sweep().unwrap() > paused));
        sim.stop().unwrap();
        assert_eq!(recorder.starts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn second_start_is_a_no_op() {
        let recorder = Recorder::default();
        let mut sim = running_sim(&recorder);
        sim.start().unwrap();
        sim.start().unwrap();
        sim.stop().unwrap();
        assert_eq!(recorder.starts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn advance_refused_while_running() {
        let recorder = Recorder::default();
        let mut sim = running_sim(&recorder);
        sim.start().unwrap();
        assert!(matches!(sim.advance(1), Err(SimError::AlreadyRunning)));
        sim.stop().unwrap();
        assert!(sim.advance(1).is_ok());
    }

    #[test]
    fn setters_apply_while_running() {
        let recorder = Recorder::default();
        let mut sim = running_sim(&recorder);
        sim.start().unwrap();
        sim.set_temperature(1.0).unwrap();
        sim.set_model_kind(ModelKind::MultiState).unwrap();
        sim.set_state_count(5).unwrap();
        assert!(wait_for(|| sim.sweep().unwrap() > SweepCount(3)));
        sim.stop().unwrap();

        let state = sim.get_current_state().unwrap();
        assert_eq!(state.model, ModelKind::MultiState);
        assert_eq!(state.lattice.state_count(), Some(5));
        assert_eq!(sim.params().beta(), 1.0);
    }

    #[test]
    fn closure_sink_receives_frames() {
        init_logging();
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        let mut sim = SimBuilder::new(8, 2.0, ModelKind::Continuous)
            .frame_interval(Duration::from_millis(1))
            .build()
            .unwrap();
        sim.set_frame_sink(move |frame: &Frame| {
            assert!(frame.vector().is_some());
            counter.fetch_add(1, Ordering::SeqCst);
        });
        sim.start().unwrap();
        assert!(wait_for(|| seen.load(Ordering::SeqCst) > 0));
        sim.stop().unwrap();
    }

    #[test]
    fn sink_replaced_from_host_while_running() {
        let first = Recorder::default();
        let mut sim = running_sim(&first);
        sim.start().unwrap();
        assert!(wait_for(|| first.frames() > 0));

        let second = Recorder::default();
        sim.set_frame_sink(second.clone());
        let delivered = first.frames();
        assert!(wait_for(|| second.frames() > 0));
        assert_eq!(first.frames(), delivered);
        sim.stop().unwrap();

        assert_eq!(first.stops.load(Ordering::SeqCst), 0);
        assert_eq!(second.starts.load(Ordering::SeqCst), 0);
        assert_eq!(second.stops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn drop_stops_running_clock() {
        let recorder = Recorder::default();
        {
            let mut sim = running_sim(&recorder);
            sim.start().unwrap();
            assert!(wait_for(|| recorder.frames() > 0));
        }
        assert_eq!(recorder.stops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn custom_config_is_kept() {
        let config = ClockConfig::default().with_seed(5).with_frame_interval(Duration::from_millis(10));
        let sim = Simulation::new(config);
        assert_eq!(sim.config().seed, 5);
        assert_eq!(sim.config().frame_interval, Duration::from_millis(10));
    }
}
