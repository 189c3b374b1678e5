use std::time::Duration;

use glam::Vec2;
use last_stand_core::{
    Command, DamageCause, EnemyId, Event, GameConfig, GridMap, PlayerIntent, PurchaseOffer,
    PurchaseRejection, StationId, StationKind, WaveNumber, WeaponKind,
};
use last_stand_world::{self as world, query, World};

const STEP: f32 = 1.0 / 60.0;

fn apply(world: &mut World, command: Command) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, command, &mut events);
    events
}

fn tick_with(world: &mut World, intent: PlayerIntent) -> Vec<Event> {
    apply(
        world,
        Command::Tick {
            dt: Duration::from_secs_f32(STEP),
            intent,
        },
    )
}

fn idle_for(world: &mut World, seconds: f32) -> Vec<Event> {
    let ticks = (seconds / STEP).round() as usize;
    let mut events = Vec::new();
    for _ in 0..ticks {
        events.extend(tick_with(world, PlayerIntent::default()));
    }
    events
}

fn station_of(world: &World, kind: StationKind) -> StationId {
    query::map(world)
        .stations()
        .iter()
        .find(|station| station.kind() == kind)
        .map(|station| station.id())
        .expect("arena sells the requested goods")
}

/// Small sealed room where the player stands at the centre.
fn test_room() -> GridMap {
    GridMap::from_rows(&[
        "111111111",
        "100000001",
        "100000001",
        "100000001",
        "100000001",
        "100000001",
        "111111111",
    ])
    .with_player_start(Vec2::new(4.5, 3.5))
    .with_spawn_point(Vec2::new(1.5, 1.5))
    .with_station(Vec2::new(4.5, 3.5), StationKind::Ammo, 250)
}

#[test]
fn pistol_shot_reports_fire_without_reload() {
    let mut world = World::new(GameConfig::default());
    let events = apply(&mut world, Command::FireWeapon);

    assert!(matches!(
        events.as_slice(),
        [Event::WeaponFired {
            weapon: WeaponKind::Pistol,
            pellets: 1,
            ..
        }]
    ));

    let weapon = query::player(&world).weapon;
    assert_eq!(weapon.magazine, 11);
    assert_eq!(weapon.reserve, 36);
    assert!((weapon.cooldown - 0.25).abs() < 1e-6);
    assert!(!weapon.reloading);
}

#[test]
fn emptying_the_magazine_starts_an_automatic_reload() {
    let mut world = World::new(GameConfig::default());
    let mut reloads = 0;
    for _ in 0..(12 * 16 + 4) {
        for event in apply(&mut world, Command::FireWeapon) {
            if matches!(event, Event::ReloadStarted { .. }) {
                reloads += 1;
            }
        }
        let _ = tick_with(&mut world, PlayerIntent::default());
    }

    assert_eq!(reloads, 1);
    let weapon = query::player(&world).weapon;
    assert!(weapon.reloading);
    assert_eq!(weapon.magazine, 0);

    let completed = idle_for(&mut world, 1.3);
    assert!(completed.iter().any(|event| matches!(
        event,
        Event::ReloadCompleted {
            magazine: 12,
            reserve: 24,
            ..
        }
    )));
}

#[test]
fn ammo_purchase_refills_reserve_and_restocks_a_grenade() {
    let mut world = World::with_map(GameConfig::default(), test_room());
    let ammo = station_of(&world, StationKind::Ammo);

    let _ = apply(&mut world, Command::ThrowGrenade);
    assert_eq!(query::player(&world).grenades, 2);

    let events = apply(
        &mut world,
        Command::Purchase {
            offer: PurchaseOffer::Station(ammo),
        },
    );
    assert_eq!(
        events,
        vec![Event::PurchaseCompleted {
            offer: PurchaseOffer::Station(ammo),
            cost: 250,
        }]
    );

    let player = query::player(&world);
    assert_eq!(player.currency, 250);
    assert_eq!(player.weapon.reserve, 60);
    assert_eq!(player.grenades, 3);

    let _ = apply(
        &mut world,
        Command::Purchase {
            offer: PurchaseOffer::Station(ammo),
        },
    );
    assert_eq!(query::player(&world).grenades, 3, "restock is capped");
}

#[test]
fn insufficient_funds_leave_state_untouched() {
    let mut world = World::new(GameConfig::default());
    let shotgun = station_of(&world, StationKind::Weapon(WeaponKind::Shotgun));

    let events = apply(
        &mut world,
        Command::Purchase {
            offer: PurchaseOffer::Station(shotgun),
        },
    );
    assert_eq!(
        events,
        vec![Event::PurchaseRejected {
            offer: PurchaseOffer::Station(shotgun),
            reason: PurchaseRejection::InsufficientFunds,
        }]
    );
    let player = query::player(&world);
    assert_eq!(player.currency, 500);
    assert_eq!(player.weapon.kind, WeaponKind::Pistol);
}

#[test]
fn weapon_purchase_replaces_the_held_weapon() {
    let mut world = World::new(GameConfig::default());
    let rifle = station_of(&world, StationKind::Weapon(WeaponKind::Rifle));
    let _ = apply(&mut world, Command::FireWeapon);

    let _ = apply(
        &mut world,
        Command::Purchase {
            offer: PurchaseOffer::Station(rifle),
        },
    );

    let player = query::player(&world);
    assert_eq!(player.currency, 0);
    assert_eq!(player.weapon.kind, WeaponKind::Rifle);
    assert_eq!(player.weapon.magazine, 30);
    assert_eq!(player.weapon.reserve, 90);
}

#[test]
fn door_opens_once() {
    let mut config = GameConfig::default();
    config.player.starting_currency = 2_000;
    let mut world = World::new(config);
    let door_centre = query::map(&world).door().expect("door").centre();
    assert!(query::map(&world).is_blocked(door_centre));

    let first = apply(
        &mut world,
        Command::Purchase {
            offer: PurchaseOffer::Door,
        },
    );
    assert_eq!(
        first,
        vec![Event::PurchaseCompleted {
            offer: PurchaseOffer::Door,
            cost: 750,
        }]
    );
    assert!(!query::map(&world).is_blocked(door_centre));

    let second = apply(
        &mut world,
        Command::Purchase {
            offer: PurchaseOffer::Door,
        },
    );
    assert_eq!(
        second,
        vec![Event::PurchaseRejected {
            offer: PurchaseOffer::Door,
            reason: PurchaseRejection::AlreadyOpen,
        }]
    );
    assert_eq!(query::player(&world).currency, 1_250);
    assert!(!query::map(&world).is_blocked(door_centre));
}

#[test]
fn grenade_fuse_expires_once_and_detonation_removes_it() {
    let mut world = World::with_map(GameConfig::default(), test_room());
    let thrown = apply(&mut world, Command::ThrowGrenade);
    let Some(Event::GrenadeThrown { projectile, .. }) = thrown.first().cloned() else {
        panic!("expected a grenade throw, got {thrown:?}");
    };

    let refused = apply(&mut world, Command::ThrowGrenade);
    assert!(refused.is_empty(), "throw cooldown blocks a second throw");

    let events = idle_for(&mut world, 2.5);
    let expiries = events
        .iter()
        .filter(|event| matches!(event, Event::FuseExpired { .. }))
        .count();
    assert_eq!(expiries, 1);

    let detonated = apply(&mut world, Command::DetonateProjectile { projectile });
    assert!(matches!(
        detonated.as_slice(),
        [Event::ProjectileDetonated { .. }]
    ));
    assert!(query::projectile_view(&world).into_vec().is_empty());

    assert_eq!(
        apply(&mut world, Command::RemoveExpired),
        vec![Event::ProjectileRemoved { projectile }]
    );
}

#[test]
fn begin_wave_restores_grenades() {
    let mut world = World::with_map(GameConfig::default(), test_room());
    let _ = apply(&mut world, Command::ThrowGrenade);
    assert_eq!(query::player(&world).grenades, 2);

    let events = apply(
        &mut world,
        Command::BeginWave {
            wave: WaveNumber::new(2),
        },
    );
    assert_eq!(
        events,
        vec![Event::WaveStarted {
            wave: WaveNumber::new(2)
        }]
    );
    assert_eq!(query::player(&world).grenades, 3);
    assert_eq!(query::wave(&world).get(), 2);
}

#[test]
fn adjacent_enemy_strikes_on_cooldown_and_flashes_the_screen() {
    let mut world = World::with_map(GameConfig::default(), test_room());
    let _ = apply(
        &mut world,
        Command::SpawnEnemy {
            position: Vec2::new(4.0, 3.5),
            wave: WaveNumber::first(),
        },
    );

    let events = tick_with(&mut world, PlayerIntent::default());
    assert!(events.iter().any(|event| matches!(
        event,
        Event::PlayerDamaged {
            enemy,
            amount,
            ..
        } if *enemy == EnemyId::new(0) && (*amount - 10.5).abs() < 1e-6
    )));
    assert!(query::damage_flash(&world) > 0.3);

    let strikes = idle_for(&mut world, 1.0)
        .into_iter()
        .filter(|event| matches!(event, Event::PlayerDamaged { .. }))
        .count();
    assert_eq!(strikes, 0, "attack cooldown is 1.2 seconds");
    assert!(query::damage_flash(&world) < f32::EPSILON);
}

#[test]
fn defeated_player_ignores_input_while_world_keeps_ticking() {
    let mut config = GameConfig::default();
    config.enemy.base_contact_damage = 500.0;
    let mut world = World::with_map(config, test_room());
    let _ = apply(
        &mut world,
        Command::SpawnEnemy {
            position: Vec2::new(4.0, 3.5),
            wave: WaveNumber::first(),
        },
    );

    let events = tick_with(&mut world, PlayerIntent::default());
    assert!(events.contains(&Event::PlayerDefeated));
    assert!(query::is_defeated(&world));
    assert_eq!(query::player(&world).health, 0.0);

    let before = query::player(&world).position;
    let walk = PlayerIntent {
        forward: true,
        ..PlayerIntent::default()
    };
    let _ = tick_with(&mut world, walk);
    assert_eq!(query::player(&world).position, before);
    assert!(apply(&mut world, Command::FireWeapon).is_empty());
    assert_eq!(query::tick_index(&world), 2);
}

#[test]
fn explosion_kill_rewards_and_hitscan_hit_rewards_differ() {
    let mut world = World::with_map(GameConfig::default(), test_room());
    for _ in 0..2 {
        let _ = apply(
            &mut world,
            Command::SpawnEnemy {
                position: Vec2::new(1.5, 1.5),
                wave: WaveNumber::first(),
            },
        );
    }

    let _ = apply(
        &mut world,
        Command::DamageEnemy {
            enemy: EnemyId::new(0),
            amount: 100.0,
            cause: DamageCause::Explosion,
        },
    );
    let _ = apply(
        &mut world,
        Command::DamageEnemy {
            enemy: EnemyId::new(1),
            amount: 5.0,
            cause: DamageCause::Hitscan,
        },
    );
    assert_eq!(query::player(&world).currency, 500 + 80 + 10);
    assert_eq!(query::enemy_count(&world), 1);
}
