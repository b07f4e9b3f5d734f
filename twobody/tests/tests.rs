use twobody::simulation::states::{NVec2, Particle, TwoBody};
use twobody::simulation::params::{Parameters, DT, G};
use twobody::simulation::engine::Engine;
use twobody::simulation::scenario::Scenario;
use twobody::simulation::driver::{run_batch, FileRecorder, MemoryRecorder};
use twobody::{Error, SingularityPolicy};

use std::fs;
use std::path::PathBuf;

/// Scenario at the fixed initial conditions with default settings
pub fn default_scenario() -> Scenario {
    Scenario::new(Engine::default())
}

/// Both bodies at the same point
pub fn coincident_system() -> TwoBody {
    TwoBody {
        p1: Particle::new(1.0, NVec2::new(0.05, 0.0), NVec2::new(0.0, 0.0)),
        p2: Particle::new(1.0, NVec2::new(0.05, 0.0), NVec2::new(0.0, 0.1)),
    }
}

fn temp_output(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("twobody-{}-{name}", std::process::id()))
}

// ==================================================================================
// Single step golden values
// ==================================================================================

#[test]
fn one_step_golden_values() {
    let mut scenario = default_scenario();
    scenario.advance().unwrap();
    let sys = scenario.system;

    // r^2 = 0.01, r^3 = 0.001, a = 0.0172 / 0.001 * 0.1 = 1.72
    assert!((sys.p1.a.x - 1.72).abs() < 1e-9);
    assert_eq!(sys.p1.a.y, 0.0);
    assert!((sys.p2.a.x + 1.72).abs() < 1e-9);
    assert_eq!(sys.p2.a.y, 0.0);

    // v = v0 + a dt
    assert!((sys.p1.v.x - 1.72e-6).abs() < 1e-15);
    assert_eq!(sys.p1.v.y, 0.0);
    assert!((sys.p2.v.x + 1.72e-6).abs() < 1e-15);
    assert_eq!(sys.p2.v.y, 0.1);

    // x = x0 + v dt + 1/2 a dt^2 = 1.72e-12 + 0.86e-12
    assert!((sys.p1.x.x - 2.58e-12).abs() < 1e-20);
    assert_eq!(sys.p1.x.y, 0.0);
    assert!((sys.p2.x.x - (0.1 - 2.58e-12)).abs() < 1e-16);
    assert!((sys.p2.x.y - 0.1 * DT).abs() < 1e-20);

    assert_eq!(scenario.steps(), 1);
}

// ==================================================================================
// Invariants over many steps
// ==================================================================================

#[test]
fn masses_never_change() {
    let mut scenario = default_scenario();
    for _ in 0..1000 {
        scenario.advance().unwrap();
        assert_eq!(scenario.system.p1.m, 1.0);
        assert_eq!(scenario.system.p2.m, 1.0);
    }
}

#[test]
fn accelerations_are_antisymmetric_every_step() {
    let mut scenario = default_scenario();
    for _ in 0..1000 {
        scenario.advance().unwrap();
        let sys = scenario.system;
        assert_eq!(sys.p1.m * sys.p1.a, -(sys.p2.m * sys.p2.a));
    }
}

#[test]
fn momentum_stays_near_initial() {
    let mut scenario = default_scenario();
    let p0 = scenario.system.total_momentum();

    let mut worst: f64 = 0.0;
    for step in 1..=10_000u64 {
        scenario.advance().unwrap();
        let err = (scenario.system.total_momentum() - p0).norm();
        worst = worst.max(err);
        // roundoff bound growing with the step count
        assert!(err <= 1e-15 * step as f64, "momentum error {err:e} at step {step}");
    }
    assert!(worst < 1e-11);
}

#[test]
fn stepping_is_deterministic() {
    let mut a = default_scenario();
    let mut b = default_scenario();
    for _ in 0..5000 {
        a.advance().unwrap();
        b.advance().unwrap();
    }
    assert_eq!(a.system, b.system);
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn bodies_attract() {
    let mut scenario = default_scenario();
    let r0 = scenario.system.separation();
    for _ in 0..10_000 {
        scenario.advance().unwrap();
    }
    assert!(scenario.system.separation() < r0);
}

// ==================================================================================
// Degenerate geometry
// ==================================================================================

#[test]
fn coincident_bodies_propagate_nan_without_panicking() {
    let mut scenario = Scenario::from_system(Engine::default(), Parameters::default(), coincident_system()).unwrap();

    scenario.advance().unwrap();
    assert!(!scenario.system.is_finite());
    assert!(scenario.system.p1.a.x.is_nan());

    // keeps going, NaN flows through
    scenario.advance().unwrap();
    assert!(scenario.system.p2.x.x.is_nan());
    assert_eq!(scenario.steps(), 2);
}

#[test]
fn coincident_bodies_rejected_under_reject_policy() {
    let engine = Engine { singularity: SingularityPolicy::Reject };
    let mut scenario = Scenario::from_system(engine, Parameters::default(), coincident_system()).unwrap();
    let before = scenario.system;

    let err = scenario.advance().unwrap_err();
    assert!(matches!(err, Error::SingularSeparation { r2 } if r2 == 0.0));
    assert_eq!(scenario.system, before);
    assert_eq!(scenario.steps(), 0);
}

#[test]
fn reject_policy_does_not_affect_normal_runs() {
    let engine = Engine { singularity: SingularityPolicy::Reject };
    let mut guarded = Scenario::new(engine);
    let mut plain = default_scenario();
    for _ in 0..1000 {
        guarded.advance().unwrap();
        plain.advance().unwrap();
    }
    assert_eq!(guarded.system, plain.system);
}

// ==================================================================================
// Batch output
// ==================================================================================

#[test]
fn batch_file_has_every_step_inclusive() {
    let path = temp_output("batch.csv");
    let mut scenario = default_scenario();

    let decimals = scenario.parameters.time_decimals();
    let mut recorder = FileRecorder::create(&path).unwrap().with_time_decimals(decimals);
    let n = run_batch(&mut scenario, &mut recorder).unwrap();
    drop(recorder);
    assert_eq!(n, 10_001);

    let text = fs::read_to_string(&path).unwrap();
    fs::remove_file(&path).ok();

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 10_001);
    assert_eq!(lines[0], "0,0,0,0.1,0");
    assert!(lines[3].starts_with("0.000003,"), "noisy time in {}", lines[3]);
    assert!(lines[10_000].starts_with("0.01,"), "noisy time in {}", lines[10_000]);
    assert!(text.ends_with('\n'));

    let mut prev = f64::NEG_INFINITY;
    for line in &lines {
        let fields: Vec<f64> = line.split(',').map(|f| f.parse().unwrap()).collect();
        assert_eq!(fields.len(), 5, "bad line {line}");
        assert!(fields[0] > prev, "time not increasing at {line}");
        prev = fields[0];
    }
    assert!((prev - 1e-2).abs() < 1e-12);
}

#[test]
fn batch_snapshots_match_stepping() {
    let params = Parameters { t_max: 100.0 * DT, ..Parameters::default() };
    let mut scenario = Scenario::with_parameters(Engine::default(), params).unwrap();
    let mut recorder = MemoryRecorder::default();
    run_batch(&mut scenario, &mut recorder).unwrap();

    let mut manual = Scenario::with_parameters(Engine::default(), params).unwrap();
    for snap in &recorder.snapshots {
        assert_eq!(*snap, manual.snapshot());
        manual.advance().unwrap();
    }
    assert_eq!(recorder.snapshots.len(), 101);
}

#[test]
fn batch_to_missing_directory_is_io_error() {
    let path = temp_output("no-such-dir").join("out.csv");
    let err = FileRecorder::create(&path).err().unwrap();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn uses_fixed_constants() {
    let p = Parameters::default();
    assert_eq!(p.G, G);
    assert_eq!(p.G, 0.0172);
    assert_eq!(p.dt, 1e-6);
    assert_eq!(p.t_max, 1e-2);
}

#[test]
fn non_positive_step_size_refused_before_running() {
    for dt in [-1e-6, 0.0, f64::NAN] {
        let params = Parameters { dt, ..Parameters::default() };
        let err = Scenario::with_parameters(Engine::default(), params).unwrap_err();
        assert!(matches!(err, Error::InvalidParam(_)), "dt = {dt}");
    }
}
