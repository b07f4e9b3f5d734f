use bevy::asset::LoadState;
use bevy::math::primitives::Circle;
use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::window::{WindowCloseRequested, WindowResolution};

use crate::configuration::config::ViewerConfig;
use crate::error::Result;
use crate::simulation::driver::Recorder;
use crate::simulation::engine::RunState;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::Snapshot;

#[derive(Component)]
struct BodyMarker(pub usize);

#[derive(Component)]
struct ElapsedLabel;

#[derive(Resource)]
struct Viewer(ViewerConfig);

/// Custom label font still being loaded (or in use). `None` means bevy's default font.
#[derive(Resource)]
struct LabelFont(Option<(String, Handle<Font>)>);

#[derive(Resource, Default)]
struct ViewerState(RunState);

/// Latest between-steps snapshot; everything drawn in a frame is read from here
#[derive(Resource, Default, Debug)]
pub struct SnapshotBuffer {
    pub latest: Option<Snapshot>,
}

impl Recorder for SnapshotBuffer {
    fn record(&mut self, snapshot: &Snapshot) -> Result<()> {
        self.latest = Some(*snapshot);
        Ok(())
    }
}

const MARKER_COLORS: [Color; 2] = [Color::srgb(1.0, 0.35, 0.25), Color::srgb(0.3, 0.65, 1.0)];

/// Simulation position -> screen pixels (origin top-left, y down): `scale * pos + offset`
pub fn to_screen(x: f64, y: f64, cfg: &ViewerConfig) -> Vec2 {
    let scale = cfg.scale as f64;
    Vec2::new(
        (x * scale + cfg.offset[0] as f64) as f32,
        (y * scale + cfg.offset[1] as f64) as f32,
    )
}

/// Screen pixels -> bevy 2D world coordinates (origin at the window centre, y up)
pub fn screen_to_world(screen: Vec2, cfg: &ViewerConfig) -> Vec2 {
    Vec2::new(screen.x - cfg.width / 2.0, cfg.height / 2.0 - screen.y)
}

pub fn run_2d(scenario: Scenario, cfg: ViewerConfig) {
    let window = Window {
        title: "twobody".into(),
        resolution: WindowResolution::new(cfg.width, cfg.height),
        ..Default::default()
    };

    App::new()
        .insert_resource(scenario)
        .insert_resource(Viewer(cfg))
        .init_resource::<SnapshotBuffer>()
        .init_resource::<ViewerState>()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(window),
            ..Default::default()
        }))
        .add_systems(Startup, setup_bodies_system)
        .add_systems(
            Update,
            (
                poll_close_system,
                record_snapshot_system,
                (sync_transforms_system, update_label_system),
                physics_step_system,
            )
                .chain(),
        )
        .add_systems(Update, font_fallback_system)
        .run();
}

fn setup_bodies_system(
    mut commands: Commands,
    viewer: Res<Viewer>,
    scenario: Res<Scenario>,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    // LogPlugin is installed by now, unlike at the top of `run_2d`
    info!("run_2d: starting bevy viewer, dt = {:e}", scenario.parameters.dt);

    let cfg = &viewer.0;
    commands.spawn(Camera2dBundle::default());

    let snap = scenario.snapshot();
    let positions = [(snap.x1, snap.y1), (snap.x2, snap.y2)];

    for (i, (x, y)) in positions.into_iter().enumerate() {
        let world = screen_to_world(to_screen(x, y, cfg), cfg);
        commands.spawn((
            MaterialMesh2dBundle {
                mesh: Mesh2dHandle(meshes.add(Circle::new(cfg.marker_radius))),
                material: materials.add(ColorMaterial::from(MARKER_COLORS[i])),
                transform: Transform::from_xyz(world.x, world.y, 0.0),
                ..Default::default()
            },
            BodyMarker(i),
        ));
    }

    let font = match &cfg.font {
        Some(path) => {
            let handle: Handle<Font> = asset_server.load(path.clone());
            commands.insert_resource(LabelFont(Some((path.clone(), handle.clone()))));
            handle
        }
        None => {
            commands.insert_resource(LabelFont(None));
            Handle::default()
        }
    };

    commands.spawn((
        TextBundle::from_section(
            "t = 0",
            TextStyle {
                font,
                font_size: cfg.font_size,
                color: Color::WHITE,
            },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..Default::default()
        }),
        ElapsedLabel,
    ));
}

// Close is checked once per frame, before anything else runs
fn poll_close_system(
    scenario: Res<Scenario>,
    mut closes: EventReader<WindowCloseRequested>,
    mut state: ResMut<ViewerState>,
) {
    if closes.read().next().is_some() {
        info!("window closed at t = {:e} after {} steps", scenario.time(), scenario.steps());
        state.0.stop();
    }
}

fn record_snapshot_system(scenario: Res<Scenario>, mut buffer: ResMut<SnapshotBuffer>) {
    if let Err(e) = buffer.record(&scenario.snapshot()) {
        error!("failed to record snapshot: {e}");
    }
}

fn sync_transforms_system(
    viewer: Res<Viewer>,
    buffer: Res<SnapshotBuffer>,
    mut query: Query<(&BodyMarker, &mut Transform)>,
) {
    let Some(snap) = buffer.latest else {
        return;
    };
    for (BodyMarker(i), mut transform) in &mut query {
        let (x, y) = if *i == 0 { (snap.x1, snap.y1) } else { (snap.x2, snap.y2) };
        if !(x.is_finite() && y.is_finite()) {
            continue;
        }
        let world = screen_to_world(to_screen(x, y, &viewer.0), &viewer.0);
        transform.translation.x = world.x;
        transform.translation.y = world.y;
    }
}

fn update_label_system(buffer: Res<SnapshotBuffer>, mut query: Query<&mut Text, With<ElapsedLabel>>) {
    let Some(snap) = buffer.latest else {
        return;
    };
    for mut text in &mut query {
        text.sections[0].value = format!("t = {:.6}", snap.t);
    }
}

fn physics_step_system(
    mut scenario: ResMut<Scenario>,
    mut state: ResMut<ViewerState>,
    mut exit: EventWriter<AppExit>,
) {
    if !state.0.is_running() {
        return;
    }
    if let Err(e) = scenario.advance() {
        error!("stopping at t = {:e}: {e}", scenario.time());
        state.0.stop();
        exit.send(AppExit::Success);
    }
}

// Font load failures are reported and the label switches to bevy's built-in font
fn font_fallback_system(
    asset_server: Res<AssetServer>,
    mut font: ResMut<LabelFont>,
    mut query: Query<&mut Text, With<ElapsedLabel>>,
) {
    let Some((path, handle)) = &font.0 else {
        return;
    };
    match asset_server.get_load_state(handle.id()) {
        Some(LoadState::Failed(err)) => {
            error!("failed to load font {path}: {err}, using default font");
            for mut text in &mut query {
                for section in text.sections.iter_mut() {
                    section.style.font = Handle::default();
                }
            }
            font.0 = None;
        }
        Some(LoadState::Loaded) => {
            font.0 = None;
        }
        _ => {}
    }
}
