//! The arena the game is played in.

use glam::Vec2;
use last_stand_core::{CellCoord, GameConfig, GridMap, StationKind, WeaponKind};

const ARENA_ROWS: [&str; 13] = [
    "111111111111111",
    "100000000000001",
    "101111011111101",
    "101000010000101",
    "101011110110101",
    "101010000010101",
    "101010111010101",
    "100010100010001",
    "111010101110111",
    "100000000000001",
    "101111101111101",
    "100000100000001",
    "111111111111111",
];

const DOOR_CELL: CellCoord = CellCoord::new(7, 8);
const PLAYER_START: Vec2 = Vec2::new(7.5, 5.5);
const SPAWN_POINTS: [Vec2; 4] = [
    Vec2::new(1.5, 1.5),
    Vec2::new(13.5, 1.5),
    Vec2::new(1.5, 11.5),
    Vec2::new(13.5, 11.5),
];

/// Builds the arena with its door, shop stations and enemy spawn points.
///
/// Weapon station prices come from the weapon catalogue; the door and ammo
/// prices come from the economy tuning.
#[must_use]
pub fn arena(config: &GameConfig) -> GridMap {
    let rifle = WeaponKind::Rifle;
    let shotgun = WeaponKind::Shotgun;

    let mut map = GridMap::from_rows(&ARENA_ROWS)
        .with_door(DOOR_CELL, config.economy.door_cost)
        .with_station(
            Vec2::new(3.5, 2.5),
            StationKind::Weapon(rifle),
            rifle.spec().price,
        )
        .with_station(
            Vec2::new(11.5, 9.5),
            StationKind::Weapon(shotgun),
            shotgun.spec().price,
        )
        .with_station(
            Vec2::new(6.5, 10.5),
            StationKind::Ammo,
            config.economy.ammo_cost,
        )
        .with_player_start(PLAYER_START);

    for spawn in SPAWN_POINTS {
        map = map.with_spawn_point(spawn);
    }

    map
}
