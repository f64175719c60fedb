//! `headless` — drives the spin-lattice simulator without a display.
//!
//! 1. A live session: the background clock runs a 64×64 binary lattice at
//!    the critical temperature while this thread changes parameters the way
//!    a UI would.  Every frame is appended to `output/frames.csv` and every
//!    15th one is logged.
//! 2. A synchronous scan: for each temperature, equilibrate a 16×16 lattice
//!    and report ⟨|m|⟩, susceptibility, and specific heat.
//!
//! Run with:
//!   RUST_LOG=info cargo run -p headless --release

use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};

use ising_core::{AlgorithmKind, ModelKind, SweepCount};
use ising_observe::ObservableAccumulator;
use ising_output::{CsvFrameWriter, FrameTrace};
use ising_sim::{Frame, FrameSink, SimBuilder};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:              u64   = 42;
const OUTPUT_DIR:        &str  = "output";
const LIVE_SIZE:         usize = 64;
const LIVE_PHASE:        Duration = Duration::from_millis(1500);
const LOG_EVERY:         u64   = 15;

const SCAN_SIZE:         usize = 16;
const SCAN_TEMPERATURES: [f64; 9] = [1.5, 1.8, 2.0, 2.2, 2.269, 2.4, 2.6, 3.0, 3.5];
const EQUILIBRATION:     usize = 1_000;
const SAMPLES:           usize = 4_000;

// ── Live session sink ─────────────────────────────────────────────────────────

/// Writes every frame to the CSV trace and logs a sample of them.
struct LoggingTrace {
    trace:  FrameTrace<CsvFrameWriter<fs::File>>,
    frames: u64,
    /// Step count at the previous logged frame.
    logged: SweepCount,
}

impl FrameSink for LoggingTrace {
    fn on_frame(&mut self, frame: &Frame) {
        self.frames += 1;
        if self.frames % LOG_EVERY == 0 {
            let vector = frame
                .vector()
                .map(|[mx, my]| format!(" M=({mx:+.3}, {my:+.3})"))
                .unwrap_or_default();
            log::info!(
                "{:>7.3}s {} (+{}) {}: order={:+.4}{vector} e={:.4}",
                frame.timestamp.as_secs_f64(),
                frame.sweep,
                frame.sweep.since(self.logged),
                frame.model(),
                frame.order_parameter(),
                frame.observables.energy_per_site,
            );
            self.logged = frame.sweep;
        }
        self.trace.on_frame(frame);
    }

    fn on_start(&mut self) {
        log::info!("frame trace open");
    }

    fn on_stop(&mut self) {
        self.trace.on_stop();
        log::info!("frame trace closed after {} frames", self.frames);
    }
}

// ── Phases ────────────────────────────────────────────────────────────────────

fn live_session(out: &Path) -> Result<()> {
    let trace = FrameTrace::new(CsvFrameWriter::from_path(out.join("frames.csv"))?);
    let errors = trace.error_slot();

    let mut sim = SimBuilder::new(LIVE_SIZE, 2.269, ModelKind::Binary)
        .seed(SEED)
        .steps_per_frame(4)
        .sink(LoggingTrace { trace, frames: 0, logged: SweepCount::ZERO })
        .build()?;

    sim.start()?;
    thread::sleep(LIVE_PHASE);

    log::info!("quench to T = 1.0 with a small field, cluster updates");
    sim.set_temperature(1.0)?;
    sim.set_field(0.05)?;
    sim.set_algorithm(AlgorithmKind::Cluster)?;
    thread::sleep(LIVE_PHASE);

    log::info!("switch to the continuous model");
    sim.set_algorithm(AlgorithmKind::LocalSweep)?;
    sim.set_model_kind(ModelKind::Continuous)?;
    thread::sleep(LIVE_PHASE);

    log::info!("switch to the 4-state model");
    sim.set_model_kind(ModelKind::MultiState)?;
    sim.set_state_count(4)?;
    thread::sleep(LIVE_PHASE);

    sim.stop()?;
    let state = sim.get_current_state()?;
    log::info!(
        "live session done: {} {}x{} lattice at {}, order={:+.4}",
        state.model,
        state.size,
        state.size,
        state.sweep,
        state.observables.order_parameter,
    );

    if let Some(err) = errors.take() {
        return Err(err).context("writing frame trace");
    }
    Ok(())
}

fn temperature_scan() -> Result<()> {
    println!();
    println!("Temperature scan: {SCAN_SIZE}x{SCAN_SIZE} binary, periodic");
    println!(
        "{:>7}  {:>8} {:>8}  {:>10}  {:>9} {:>8}  {:>9}",
        "T", "<|m|>", "+/-", "chi", "<e>", "+/-", "C"
    );

    for (i, &t) in SCAN_TEMPERATURES.iter().enumerate() {
        let sim = SimBuilder::new(SCAN_SIZE, t, ModelKind::Binary)
            .seed(SEED + i as u64)
            .build()?;
        sim.advance(EQUILIBRATION)?;

        let mut acc = ObservableAccumulator::new(sim.params().beta(), SCAN_SIZE * SCAN_SIZE);
        for _ in 0..SAMPLES {
            sim.advance(1)?;
            acc.push(&sim.frame()?.observables);
        }

        // Successive sweeps are correlated, so the error bars are lower bounds.
        let s = acc.summary();
        println!(
            "{t:>7.3}  {:>8.4} {:>8.4}  {:>10.4}  {:>9.4} {:>8.4}  {:>9.4}",
            s.mean_order,
            acc.order().std_error(),
            s.susceptibility,
            s.mean_energy,
            acc.energy().std_error(),
            s.specific_heat
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let out = Path::new(OUTPUT_DIR);
    fs::create_dir_all(out).with_context(|| format!("creating {}", out.display()))?;

    live_session(out)?;
    temperature_scan()?;
    Ok(())
}
