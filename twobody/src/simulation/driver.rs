//! Drivers that repeatedly advance a `Scenario` and hand snapshots to a sink
//!
//! The sink is anything implementing [`Recorder`]:
//! - [`FileRecorder`]: one `t,x1,y1,x2,y2` line per snapshot (batch mode)
//! - [`MemoryRecorder`]: keeps snapshots in a `Vec`
//! - the live viewer's snapshot buffer (see `visualization`)

use bevy::app::App;
use bevy::log::{info, warn, Level, LogPlugin};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::configuration::config::{Mode, RunConfig};
use crate::error::Result;
use crate::simulation::engine::RunState;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::Snapshot;
use crate::visualization::twobody_vis2d::run_2d;

/// Capability to receive a snapshot taken between two steps
pub trait Recorder {
    fn record(&mut self, snapshot: &Snapshot) -> Result<()>;

    /// Called once after the last snapshot
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Writes `t,x1,y1,x2,y2` lines, no header.
///
/// Positions use `Display` (shortest round-trip). `t` does too unless
/// `with_time_decimals` is set, in which case it is rounded to that many
/// places so `steps * dt` noise such as `3.0000000000000004e-6` is not printed.
pub struct FileRecorder<W: Write> {
    out: W,
    lines: u64,
    time_decimals: Option<usize>,
}

impl FileRecorder<BufWriter<File>> {
    /// Create (or truncate) the output file
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> FileRecorder<W> {
    pub fn new(out: W) -> Self {
        Self { out, lines: 0, time_decimals: None }
    }

    pub fn with_time_decimals(mut self, decimals: usize) -> Self {
        self.time_decimals = Some(decimals);
        self
    }

    pub fn lines(&self) -> u64 {
        self.lines
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Recorder for FileRecorder<W> {
    fn record(&mut self, s: &Snapshot) -> Result<()> {
        match self.time_decimals {
            Some(n) => write!(self.out, "{}", format_time(s.t, n))?,
            None => write!(self.out, "{}", s.t)?,
        }
        writeln!(self.out, ",{},{},{},{}", s.x1, s.y1, s.x2, s.y2)?;
        self.lines += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// Fixed `decimals` places with trailing zeros (and a bare `.`) stripped
pub fn format_time(t: f64, decimals: usize) -> String {
    let s = format!("{t:.decimals$}");
    if !s.contains('.') {
        return s;
    }
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

#[derive(Debug, Default)]
pub struct MemoryRecorder {
    pub snapshots: Vec<Snapshot>,
}

impl Recorder for MemoryRecorder {
    fn record(&mut self, snapshot: &Snapshot) -> Result<()> {
        self.snapshots.push(*snapshot);
        Ok(())
    }
}

/// Record every step from t = 0 to t = t_max inclusive, advancing in between.
/// Returns the number of snapshots recorded (`total_steps + 1`).
pub fn run_batch<R: Recorder>(scenario: &mut Scenario, recorder: &mut R) -> Result<u64> {
    let last = scenario.parameters.total_steps();
    let mut state = RunState::Running;
    let mut recorded = 0;

    while state.is_running() {
        recorder.record(&scenario.snapshot())?;
        recorded += 1;

        if scenario.steps() >= last {
            state.stop();
        } else {
            scenario.advance()?;
        }
    }

    recorder.finish()?;
    Ok(recorded)
}

/// Install the same tracing subscriber bevy's `DefaultPlugins` would, for runs without a window
pub fn init_logging() {
    let mut app = App::new();
    app.add_plugins(LogPlugin {
        level: Level::INFO,
        ..Default::default()
    });
}

/// Run a scenario in the given mode
pub fn run(mode: Mode, cfg: RunConfig) -> Result<()> {
    let mut scenario = Scenario::build_scenario(&cfg);

    match mode {
        Mode::Batch { output } => {
            init_logging();
            info!(
                "starting batch run: {} steps of dt = {:e} into {}",
                scenario.parameters.total_steps(),
                scenario.parameters.dt,
                output.display()
            );

            let p0 = scenario.system.total_momentum();
            let e0 = scenario.system.total_energy(scenario.parameters.G);

            let mut recorder =
                FileRecorder::create(&output)?.with_time_decimals(scenario.parameters.time_decimals());
            let lines = run_batch(&mut scenario, &mut recorder)?;

            let dp = (scenario.system.total_momentum() - p0).norm();
            let e1 = scenario.system.total_energy(scenario.parameters.G);
            info!("simulation complete: {lines} lines written");
            info!("momentum error {dp:e}, relative energy drift {:e}", ((e1 - e0) / e0).abs());
            if !scenario.system.is_finite() {
                warn!("state became non-finite (bodies coincided?)");
            }
        }
        Mode::Interactive => run_2d(scenario, cfg.viewer),
    }

    Ok(())
}
