//! Static weapon catalogue.

use serde::{Deserialize, Serialize};

/// Closed set of weapons the player can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WeaponKind {
    /// Free sidearm every session starts with.
    Pistol,
    /// Automatic rifle sold at a wall station.
    Rifle,
    /// Multi-pellet shotgun sold at a wall station.
    Shotgun,
}

impl WeaponKind {
    /// Every weapon in catalogue order.
    pub const ALL: [WeaponKind; 3] = [WeaponKind::Pistol, WeaponKind::Rifle, WeaponKind::Shotgun];

    /// Immutable identity of the weapon.
    #[must_use]
    pub const fn spec(self) -> &'static WeaponSpec {
        match self {
            WeaponKind::Pistol => &PISTOL,
            WeaponKind::Rifle => &RIFLE,
            WeaponKind::Shotgun => &SHOTGUN,
        }
    }

    /// Display name of the weapon.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.spec().name
    }
}

/// Identity of a weapon shared by every instance of that kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeaponSpec {
    /// Display name.
    pub name: &'static str,
    /// Damage applied per pellet.
    pub damage: f32,
    /// Shots per second.
    pub fire_rate: f32,
    /// Rounds held by a full magazine.
    pub magazine: u32,
    /// Seconds a reload takes to complete.
    pub reload_seconds: f32,
    /// Traces emitted per shot.
    pub pellets: u32,
    /// Maximum angular deviation of a pellet in radians.
    pub spread: f32,
    /// Reserve rounds carried when the weapon is acquired.
    pub starting_reserve: u32,
    /// Upper bound on carried reserve rounds.
    pub reserve_capacity: u32,
    /// Price charged at a wall station.
    pub price: u32,
}

impl WeaponSpec {
    /// Seconds between two consecutive shots.
    #[must_use]
    pub fn cooldown_seconds(&self) -> f32 {
        1.0 / self.fire_rate
    }
}

const PISTOL: WeaponSpec = WeaponSpec {
    name: "Pistol",
    damage: 20.0,
    fire_rate: 4.0,
    magazine: 12,
    reload_seconds: 1.2,
    pellets: 1,
    spread: 0.02,
    starting_reserve: 36,
    reserve_capacity: 60,
    price: 0,
};

const RIFLE: WeaponSpec = WeaponSpec {
    name: "Rifle",
    damage: 12.0,
    fire_rate: 10.0,
    magazine: 30,
    reload_seconds: 1.8,
    pellets: 1,
    spread: 0.03,
    starting_reserve: 90,
    reserve_capacity: 180,
    price: 500,
};

const SHOTGUN: WeaponSpec = WeaponSpec {
    name: "Shotgun",
    damage: 8.0,
    fire_rate: 1.2,
    magazine: 6,
    reload_seconds: 2.2,
    pellets: 7,
    spread: 0.12,
    starting_reserve: 24,
    reserve_capacity: 48,
    price: 700,
};
