#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Last Stand engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Systems and the simulation driver
//! submit [`Command`] values describing desired mutations, the world executes
//! those commands via its `apply` entry point, and then broadcasts [`Event`]
//! values for systems to react to deterministically. Systems consume event
//! streams, query immutable snapshots, and respond exclusively with new
//! command batches.

mod config;
mod map;
mod weapon;

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub use config::{
    CombatTuning, ConfigError, EconomyTuning, EnemyTuning, FeedbackTuning, GameConfig,
    GrenadeTuning, PlayerTuning, SimulationTuning, WaveTuning,
};
pub use map::{CellKind, Door, GridMap, Station, StationKind};
pub use weapon::{WeaponKind, WeaponSpec};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Last Stand: hold the line.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Starts the provided wave, restoring the grenade allotment.
    BeginWave {
        /// Wave that becomes active.
        wave: WaveNumber,
    },
    /// Creates an enemy whose stats are derived from the wave number.
    SpawnEnemy {
        /// World-space location of the new enemy.
        position: Vec2,
        /// Wave whose scaling applies to the enemy.
        wave: WaveNumber,
    },
    /// Advances every actor by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
        /// Continuous player controls sampled for the tick.
        intent: PlayerIntent,
    },
    /// Requests that the held weapon fire once.
    FireWeapon,
    /// Requests that the held weapon begin reloading.
    ReloadWeapon,
    /// Requests that the player throw a grenade.
    ThrowGrenade,
    /// Applies damage to an enemy and credits the configured reward.
    DamageEnemy {
        /// Identifier of the enemy being struck.
        enemy: EnemyId,
        /// Amount of health removed.
        amount: f32,
        /// Source of the damage, which selects the reward table.
        cause: DamageCause,
    },
    /// Marks a grenade as exploded after its blast has been resolved.
    DetonateProjectile {
        /// Identifier of the grenade.
        projectile: ProjectileId,
    },
    /// Attempts a purchase against the player's currency.
    Purchase {
        /// Item being purchased.
        offer: PurchaseOffer,
    },
    /// Removes dead enemies and exploded projectiles.
    RemoveExpired,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Announces that a new wave became active.
    WaveStarted {
        /// Wave that started.
        wave: WaveNumber,
    },
    /// Confirms that an enemy entered the world.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Location the enemy appeared at.
        position: Vec2,
        /// Health fixed at creation.
        health: f32,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Reports that an enemy struck the player.
    PlayerDamaged {
        /// Enemy that landed the strike.
        enemy: EnemyId,
        /// Damage dealt.
        amount: f32,
        /// Player health after the strike, never below zero.
        health: f32,
    },
    /// Reports that the player's health reached zero.
    PlayerDefeated,
    /// Confirms that the held weapon discharged one shot.
    WeaponFired {
        /// Weapon that fired.
        weapon: WeaponKind,
        /// Muzzle location.
        origin: Vec2,
        /// Aim direction in radians.
        yaw: f32,
        /// Number of traces the shot emits.
        pellets: u32,
        /// Maximum angular deviation per pellet.
        spread: f32,
        /// Damage applied per pellet.
        damage: f32,
    },
    /// Confirms that the held weapon began reloading.
    ReloadStarted {
        /// Weapon being reloaded.
        weapon: WeaponKind,
    },
    /// Confirms that a reload transferred rounds from the reserve.
    ReloadCompleted {
        /// Weapon that finished reloading.
        weapon: WeaponKind,
        /// Rounds in the magazine afterwards.
        magazine: u32,
        /// Rounds left in the reserve afterwards.
        reserve: u32,
    },
    /// Confirms that a grenade left the player's hand.
    GrenadeThrown {
        /// Identifier assigned to the grenade.
        projectile: ProjectileId,
        /// Launch location.
        position: Vec2,
        /// Launch velocity.
        velocity: Vec2,
    },
    /// Reports that a grenade's fuse ran out and its blast must be resolved.
    FuseExpired {
        /// Identifier of the grenade.
        projectile: ProjectileId,
        /// Centre of the blast.
        position: Vec2,
    },
    /// Confirms that a grenade was marked exploded.
    ProjectileDetonated {
        /// Identifier of the grenade.
        projectile: ProjectileId,
        /// Centre of the blast.
        position: Vec2,
    },
    /// Confirms that damage was applied to a living enemy.
    EnemyDamaged {
        /// Identifier of the enemy.
        enemy: EnemyId,
        /// Damage applied.
        amount: f32,
        /// Source of the damage.
        cause: DamageCause,
        /// Whether the damage reduced health to zero or below.
        killed: bool,
        /// Currency credited to the player.
        reward: u32,
    },
    /// Confirms that a purchase succeeded.
    PurchaseCompleted {
        /// Item that was purchased.
        offer: PurchaseOffer,
        /// Currency debited.
        cost: u32,
    },
    /// Reports that a purchase was refused.
    PurchaseRejected {
        /// Item that was requested.
        offer: PurchaseOffer,
        /// Specific reason the purchase failed.
        reason: PurchaseRejection,
    },
    /// Confirms that a dead enemy left the world.
    EnemyRemoved {
        /// Identifier of the enemy.
        enemy: EnemyId,
    },
    /// Confirms that an exploded grenade left the world.
    ProjectileRemoved {
        /// Identifier of the grenade.
        projectile: ProjectileId,
    },
}

/// Source of damage applied to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageCause {
    /// A weapon pellet trace.
    Hitscan,
    /// A grenade blast.
    Explosion,
}

/// Items that can be purchased through interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PurchaseOffer {
    /// Opening the map's door.
    Door,
    /// The goods sold by the identified station.
    Station(StationId),
}

/// Reasons a purchase may be refused by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PurchaseRejection {
    /// The player cannot afford the item.
    InsufficientFunds,
    /// The door has already been opened.
    AlreadyOpen,
    /// The map has no door or no station with the requested identifier.
    UnknownFixture,
}

/// Continuous player controls sampled once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlayerIntent {
    /// Horizontal pointer motion accumulated since the previous tick.
    pub look_delta: f32,
    /// Move toward the facing direction.
    pub forward: bool,
    /// Move away from the facing direction.
    pub back: bool,
    /// Strafe to the left of the facing direction.
    pub left: bool,
    /// Strafe to the right of the facing direction.
    pub right: bool,
    /// Sprint if stamina allows.
    pub sprint: bool,
    /// Aim down sights.
    pub aim: bool,
}

/// Everything an input source reports for one simulation tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlayerInput {
    /// Continuous movement and look controls.
    pub intent: PlayerIntent,
    /// Trigger is held; fires whenever the weapon allows.
    pub fire_held: bool,
    /// One-shot reload request.
    pub reload: bool,
    /// One-shot grenade throw request.
    pub grenade: bool,
    /// One-shot interaction request.
    pub interact: bool,
    /// One-shot pause toggle.
    pub pause_toggle: bool,
}

impl PlayerInput {
    /// Folds a newer sample into this one.
    ///
    /// Look deltas accumulate, held controls take the newer value and one-shot
    /// requests stay latched until consumed.
    pub fn merge(&mut self, newer: PlayerInput) {
        let look_delta = self.intent.look_delta + newer.intent.look_delta;
        self.intent = newer.intent;
        self.intent.look_delta = look_delta;
        self.fire_held = newer.fire_held;
        self.reload |= newer.reload;
        self.grenade |= newer.grenade;
        self.interact |= newer.interact;
        self.pause_toggle |= newer.pause_toggle;
    }
}

/// Identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Identifier assigned to a thrown projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Identifier of a shop station on the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StationId(u32);

impl StationId {
    /// Creates a new station identifier with the provided value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// One-based wave counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WaveNumber(u32);

impl WaveNumber {
    /// Creates a wave number; zero is promoted to the first wave.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        if value == 0 {
            Self(1)
        } else {
            Self(value)
        }
    }

    /// The opening wave.
    #[must_use]
    pub const fn first() -> Self {
        Self(1)
    }

    /// The wave that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Retrieves the numeric representation of the wave.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a grid cell expressed as column and row indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Read-only snapshot of the player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// World-space location.
    pub position: Vec2,
    /// Facing direction in radians.
    pub yaw: f32,
    /// Current health, zero once defeated.
    pub health: f32,
    /// Current stamina.
    pub stamina: f32,
    /// Spendable currency.
    pub currency: u32,
    /// Grenades carried.
    pub grenades: u32,
    /// Whether the player aims down sights.
    pub aiming: bool,
    /// Vertical view offset as a fraction of half the screen height.
    pub bob_offset: f32,
    /// Held weapon.
    pub weapon: WeaponSnapshot,
}

/// Read-only snapshot of the held weapon.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeaponSnapshot {
    /// Weapon identity.
    pub kind: WeaponKind,
    /// Rounds in the magazine.
    pub magazine: u32,
    /// Rounds in the reserve.
    pub reserve: u32,
    /// Whether a reload is in progress.
    pub reloading: bool,
    /// Seconds before the next shot is allowed.
    pub cooldown: f32,
}

/// Read-only snapshot of a living enemy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Identifier of the enemy.
    pub id: EnemyId,
    /// World-space location.
    pub position: Vec2,
    /// Remaining health.
    pub health: f32,
    /// Whether the enemy was struck within the hit-flash window.
    pub flashing: bool,
}

/// Immutable representation of the enemies stored in the world.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new view from the provided snapshots, sorted by identifier.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterates over the captured enemy snapshots.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Number of enemies in the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view holds no enemies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Read-only snapshot of an in-flight grenade.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Identifier of the grenade.
    pub id: ProjectileId,
    /// World-space location.
    pub position: Vec2,
    /// Seconds left on the fuse.
    pub fuse: f32,
}

/// Immutable representation of the projectiles stored in the world.
#[derive(Clone, Debug, Default)]
pub struct ProjectileView {
    snapshots: Vec<ProjectileSnapshot>,
}

impl ProjectileView {
    /// Creates a new view from the provided snapshots, sorted by identifier.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ProjectileSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterates over the captured projectile snapshots.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectileSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ProjectileSnapshot> {
        self.snapshots
    }
}

/// Sound cues the simulation asks the audio sink to play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AudioCue {
    /// A weapon discharged.
    Shoot,
    /// A reload began.
    Reload,
    /// A trace struck an enemy.
    HitConfirmed,
    /// A grenade detonated.
    Explosion,
    /// Enemies are nearby; rate limited by the simulation.
    EnemyAmbient,
}

/// Everything a heads-up display needs to draw one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct HudSnapshot {
    /// Health as a fraction of the maximum.
    pub health_fraction: f32,
    /// Stamina as a fraction of the maximum.
    pub stamina_fraction: f32,
    /// Display name of the held weapon.
    pub weapon: &'static str,
    /// Rounds in the magazine.
    pub magazine: u32,
    /// Rounds in the reserve.
    pub reserve: u32,
    /// Grenades carried.
    pub grenades: u32,
    /// Active wave.
    pub wave: u32,
    /// Spendable currency.
    pub currency: u32,
    /// Interaction prompt for the nearest affordable fixture, if any.
    pub prompt: Option<String>,
    /// Wave banner while it is visible.
    pub banner: Option<String>,
    /// Whether the hitmarker should be drawn.
    pub hitmarker: bool,
    /// Whether the player aims down sights.
    pub aiming: bool,
    /// Whether the simulation is paused.
    pub paused: bool,
    /// Whether the player has been defeated.
    pub defeated: bool,
}

impl Default for HudSnapshot {
    fn default() -> Self {
        Self {
            health_fraction: 1.0,
            stamina_fraction: 1.0,
            weapon: WeaponKind::Pistol.name(),
            magazine: 0,
            reserve: 0,
            grenades: 0,
            wave: 1,
            currency: 0,
            prompt: None,
            banner: None,
            hitmarker: false,
            aiming: false,
            paused: false,
            defeated: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wave_numbers_start_at_one() {
        assert_eq!(WaveNumber::new(0), WaveNumber::first());
        assert_eq!(WaveNumber::first().next().get(), 2);
    }

    #[test]
    fn merged_input_accumulates_look_and_latches_one_shots() {
        let mut pending = PlayerInput {
            intent: PlayerIntent {
                look_delta: 3.0,
                forward: true,
                ..PlayerIntent::default()
            },
            reload: true,
            ..PlayerInput::default()
        };

        pending.merge(PlayerInput {
            intent: PlayerIntent {
                look_delta: -1.0,
                sprint: true,
                ..PlayerIntent::default()
            },
            fire_held: true,
            ..PlayerInput::default()
        });

        assert!((pending.intent.look_delta - 2.0).abs() < f32::EPSILON);
        assert!(!pending.intent.forward);
        assert!(pending.intent.sprint);
        assert!(pending.fire_held);
        assert!(pending.reload);
    }

    #[test]
    fn enemy_view_is_sorted_by_identifier() {
        let snapshot = |id| EnemySnapshot {
            id: EnemyId::new(id),
            position: Vec2::ZERO,
            health: 40.0,
            flashing: false,
        };
        let view = EnemyView::from_snapshots(vec![snapshot(4), snapshot(1), snapshot(2)]);
        let ids: Vec<u32> = view.iter().map(|enemy| enemy.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 4]);
        assert_eq!(view.len(), 3);
    }

    #[test]
    fn purchase_offer_round_trips_through_toml() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Wrapper {
            offer: PurchaseOffer,
        }

        let wrapper = Wrapper {
            offer: PurchaseOffer::Station(StationId::new(2)),
        };
        let text = toml::to_string(&wrapper).expect("serialize");
        let restored: Wrapper = toml::from_str(&text).expect("deserialize");
        assert_eq!(restored, wrapper);
    }
}
