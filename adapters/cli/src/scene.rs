//! Copies committed simulation state into the renderer's scene.

use last_stand_rendering::{EnemySprite, Scene, ViewPose};
use last_stand_simulation::{AudioSink, Simulation};
use last_stand_world::query;

/// Builds a scene describing the simulation's current state.
pub(crate) fn capture<A: AudioSink>(simulation: &Simulation<A>) -> Scene {
    let world = simulation.world();
    let start = query::map(world).player_start();
    let mut scene = Scene::new(query::map(world).clone(), ViewPose::new(start, 0.0));
    refresh(simulation, &mut scene);
    scene
}

/// Overwrites `scene` with the simulation's current state.
pub(crate) fn refresh<A: AudioSink>(simulation: &Simulation<A>, scene: &mut Scene) {
    let world = simulation.world();
    let player = query::player(world);

    scene.view = ViewPose {
        position: player.position,
        yaw: player.yaw,
        aiming: player.aiming,
        bob_offset: player.bob_offset,
    };
    scene.grid.clone_from(query::map(world));

    scene.enemies.clear();
    scene
        .enemies
        .extend(query::enemy_view(world).iter().map(|enemy| EnemySprite {
            position: enemy.position,
            flashing: enemy.flashing,
        }));

    scene.projectiles.clear();
    scene.projectiles.extend(
        query::projectile_view(world)
            .iter()
            .map(|projectile| projectile.position),
    );

    scene.damage_flash = query::damage_flash(world);
    scene.hud = simulation.hud();
}
