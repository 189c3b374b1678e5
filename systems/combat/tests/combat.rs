use std::time::Duration;

use glam::Vec2;
use last_stand_core::{
    Command, DamageCause, Event, GameConfig, GridMap, PlayerIntent, PurchaseOffer, StationId,
    StationKind, WaveNumber, WeaponKind,
};
use last_stand_system_combat::{Combat, Config};
use last_stand_world::{self as world, query, World};

fn corridor_world() -> World {
    let map = GridMap::from_rows(&["111111111111", "100000000001", "111111111111"])
        .with_player_start(Vec2::new(1.5, 1.5))
        .with_spawn_point(Vec2::new(10.5, 1.5))
        .with_station(
            Vec2::new(1.5, 1.5),
            StationKind::Weapon(WeaponKind::Shotgun),
            0,
        );
    World::with_map(GameConfig::default(), map)
}

fn combat_for(config: &GameConfig) -> Combat {
    Combat::new(Config::new(config.combat, config.grenades, 42))
}

/// Applies commands, feeds the resulting events through combat and applies its
/// follow-up commands, returning every event produced.
fn resolve(world: &mut World, combat: &mut Combat, commands: Vec<Command>) -> Vec<Event> {
    let mut events = Vec::new();
    for command in commands {
        world::apply(world, command, &mut events);
    }

    let mut follow_up = Vec::new();
    combat.handle(
        &events,
        &query::enemy_view(world),
        query::map(world),
        &mut follow_up,
    );

    let mut resolved = events;
    for command in follow_up {
        world::apply(world, command, &mut resolved);
    }
    world::apply(world, Command::RemoveExpired, &mut resolved);
    resolved
}

#[test]
fn pistol_shot_down_the_corridor_hits_the_enemy() {
    let config = GameConfig::default();
    let mut world = corridor_world();
    let mut combat = combat_for(&config);

    let events = resolve(
        &mut world,
        &mut combat,
        vec![
            Command::SpawnEnemy {
                position: Vec2::new(6.5, 1.5),
                wave: WaveNumber::first(),
            },
            Command::FireWeapon,
        ],
    );

    assert!(events.iter().any(|event| matches!(
        event,
        Event::EnemyDamaged {
            cause: DamageCause::Hitscan,
            killed: false,
            reward: 10,
            ..
        }
    )));
    assert!(query::hitmarker_active(&world));
    assert_eq!(query::player(&world).currency, 510);
}

#[test]
fn grenade_detonates_once_and_is_cleaned_up() {
    let config = GameConfig::default();
    let mut world = corridor_world();
    let mut combat = combat_for(&config);

    let _ = resolve(
        &mut world,
        &mut combat,
        vec![
            Command::SpawnEnemy {
                position: Vec2::new(3.0, 1.5),
                wave: WaveNumber::first(),
            },
            Command::ThrowGrenade,
        ],
    );

    let mut detonations = 0;
    let mut removals = 0;
    for _ in 0..(60 * 3) {
        let events = resolve(
            &mut world,
            &mut combat,
            vec![Command::Tick {
                dt: Duration::from_secs_f32(1.0 / 60.0),
                intent: PlayerIntent::default(),
            }],
        );
        for event in events {
            match event {
                Event::ProjectileDetonated { .. } => detonations += 1,
                Event::ProjectileRemoved { .. } => removals += 1,
                _ => {}
            }
        }
    }

    assert_eq!(detonations, 1);
    assert_eq!(removals, 1);
    assert!(query::projectile_view(&world).into_vec().is_empty());
}

#[test]
fn shotgun_pellets_carry_on_to_the_enemy_behind_a_kill() {
    let config = GameConfig::default();
    let mut world = corridor_world();
    let mut combat = combat_for(&config);

    let events = resolve(
        &mut world,
        &mut combat,
        vec![
            Command::Purchase {
                offer: PurchaseOffer::Station(StationId::new(0)),
            },
            Command::SpawnEnemy {
                position: Vec2::new(2.5, 1.5),
                wave: WaveNumber::first(),
            },
            Command::SpawnEnemy {
                position: Vec2::new(3.5, 1.5),
                wave: WaveNumber::first(),
            },
            Command::FireWeapon,
        ],
    );

    let hits: Vec<(u32, bool)> = events
        .iter()
        .filter_map(|event| match event {
            Event::EnemyDamaged {
                enemy,
                cause: DamageCause::Hitscan,
                killed,
                ..
            } => Some((enemy.get(), *killed)),
            _ => None,
        })
        .collect();
    assert_eq!(hits.len(), 7, "every pellet lands on a living enemy");
    assert_eq!(hits.iter().filter(|(id, _)| *id == 0).count(), 6);
    assert_eq!(hits[5], (0, true));
    assert_eq!(hits[6], (1, false));

    let survivors = query::enemy_view(&world).into_vec();
    assert_eq!(survivors.len(), 1);
    assert!((survivors[0].health - 40.0).abs() < 1e-4);
}
