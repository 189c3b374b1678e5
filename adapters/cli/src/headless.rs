//! Windowless runs driven by a simple aim-and-fire autopilot.

use std::{f32::consts::PI, fs, path::Path};

use anyhow::{Context, Result};
use last_stand_core::{Event, GameConfig, PlayerInput, PlayerIntent};
use last_stand_rendering::{FrameBuffer, ProjectionConfig, Projector, Viewport};
use last_stand_simulation::{AudioSink, Simulation};
use last_stand_world::query;
use log::info;

use crate::{audio::LogAudio, scene};

const DUMP_WIDTH: u32 = 320;
const DUMP_HEIGHT: u32 = 200;
/// Largest bearing error, in radians, at which the autopilot pulls the trigger.
const FIRE_CONE: f32 = 0.05;

/// Totals gathered over a headless run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Summary {
    pub(crate) ticks: u32,
    pub(crate) final_wave: u32,
    pub(crate) enemies_spawned: u32,
    pub(crate) shots_fired: u32,
    pub(crate) kills: u32,
    pub(crate) currency: u32,
    pub(crate) defeated: bool,
}

/// Runs `ticks` fixed steps without a window, logs a summary and optionally
/// writes the final view to `frame_dump`.
pub(crate) fn run(config: GameConfig, ticks: u32, frame_dump: Option<&Path>) -> Result<()> {
    let mut simulation = Simulation::new(config, LogAudio).context("invalid game configuration")?;
    info!("{}", query::welcome_banner(simulation.world()));

    let summary = simulate(&mut simulation, ticks);
    info!(
        "headless run: {} ticks, wave {}, {} spawned, {} shots, {} kills, {} currency{}",
        summary.ticks,
        summary.final_wave,
        summary.enemies_spawned,
        summary.shots_fired,
        summary.kills,
        summary.currency,
        if summary.defeated { ", defeated" } else { "" },
    );

    if let Some(path) = frame_dump {
        let image = render_ppm(&simulation)?;
        fs::write(path, image)
            .with_context(|| format!("failed to write frame to {}", path.display()))?;
        info!("final frame written to {}", path.display());
    }

    Ok(())
}

/// Steps the simulation `ticks` times under autopilot control.
pub(crate) fn simulate<A: AudioSink>(simulation: &mut Simulation<A>, ticks: u32) -> Summary {
    let mut summary = Summary::default();

    for _ in 0..ticks {
        let input = autopilot(simulation);
        simulation.submit_input(input);
        for event in simulation.step() {
            match event {
                Event::EnemySpawned { .. } => summary.enemies_spawned += 1,
                Event::WeaponFired { .. } => summary.shots_fired += 1,
                Event::EnemyDamaged { killed: true, .. } => summary.kills += 1,
                _ => {}
            }
        }
        summary.ticks += 1;
    }

    let world = simulation.world();
    summary.final_wave = query::wave(world).get();
    summary.currency = query::player(world).currency;
    summary.defeated = query::is_defeated(world);
    summary
}

/// Turns toward the nearest enemy and fires once it is inside the cone.
fn autopilot<A: AudioSink>(simulation: &Simulation<A>) -> PlayerInput {
    let world = simulation.world();
    let player = query::player(world);
    let sensitivity = query::config(world).player.look_sensitivity;

    let nearest = query::enemy_view(world)
        .iter()
        .map(|enemy| enemy.position)
        .min_by(|a, b| {
            player
                .position
                .distance(*a)
                .total_cmp(&player.position.distance(*b))
        });
    let Some(target) = nearest else {
        return PlayerInput::default();
    };

    let offset = target - player.position;
    let bearing = wrap(offset.y.atan2(offset.x) - player.yaw);
    PlayerInput {
        intent: PlayerIntent {
            look_delta: bearing / sensitivity,
            ..PlayerIntent::default()
        },
        fire_held: bearing.abs() < FIRE_CONE,
        ..PlayerInput::default()
    }
}

fn wrap(angle: f32) -> f32 {
    (angle + PI).rem_euclid(2.0 * PI) - PI
}

/// Rasterises the current view into a binary PPM image.
fn render_ppm<A: AudioSink>(simulation: &Simulation<A>) -> Result<Vec<u8>> {
    let projector = Projector::new(ProjectionConfig::default())?;
    let viewport = Viewport::new(DUMP_WIDTH as f32, DUMP_HEIGHT as f32)?;
    let frame = projector.project(&scene::capture(simulation), viewport);

    let mut buffer = FrameBuffer::new(DUMP_WIDTH, DUMP_HEIGHT)?;
    buffer.rasterize(&frame);

    let mut image = format!("P6\n{} {}\n255\n", buffer.width(), buffer.height()).into_bytes();
    image.reserve(buffer.pixels().len() * 3);
    for [red, green, blue, _] in buffer.pixels() {
        image.extend_from_slice(&[*red, *green, *blue]);
    }
    Ok(image)
}
