#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Last Stand.
//!
//! The world owns the map, the player, every enemy and every grenade. It is
//! mutated exclusively through [`apply`], which reports what happened as
//! [`Event`] values, and observed through the read-only [`query`] module.

mod collision;
mod enemy;
mod layout;
mod player;
mod projectile;
mod registry;
mod weapon;

use glam::Vec2;
use last_stand_core::{
    Command, DamageCause, EnemyId, Event, GameConfig, GridMap, PlayerIntent, ProjectileId,
    PurchaseOffer, PurchaseRejection, StationKind, WaveNumber, WELCOME_BANNER,
};
use log::{debug, info};

pub use layout::arena;

use crate::{
    enemy::Enemy, player::Player, projectile::Projectile, registry::Registry, weapon::Weapon,
};

/// Represents the authoritative Last Stand world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: GameConfig,
    map: GridMap,
    player: Player,
    enemies: Registry<EnemyId, Enemy>,
    projectiles: Registry<ProjectileId, Projectile>,
    wave: WaveNumber,
    hitmarker: f32,
    damage_flash: f32,
    tick_index: u64,
}

impl World {
    /// Creates a world on the standard arena.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let map = arena(&config);
        Self::with_map(config, map)
    }

    /// Creates a world on a caller-provided map.
    #[must_use]
    pub fn with_map(config: GameConfig, map: GridMap) -> Self {
        let player = Player::spawn(
            map.player_start(),
            &config.player,
            config.grenades.starting_count,
        );

        Self {
            banner: WELCOME_BANNER,
            player,
            map,
            enemies: Registry::new(),
            projectiles: Registry::new(),
            wave: WaveNumber::first(),
            hitmarker: 0.0,
            damage_flash: 0.0,
            tick_index: 0,
            config,
        }
    }

    fn tick(&mut self, dt: f32, intent: &PlayerIntent, out_events: &mut Vec<Event>) {
        let feedback = &self.config.feedback;
        self.hitmarker = (self.hitmarker - dt).max(0.0);
        self.damage_flash = (self.damage_flash - dt * feedback.damage_flash_decay).max(0.0);

        if !self.player.is_defeated() {
            let completion = self
                .player
                .update(dt, intent, &self.map, &self.config.player);
            if let Some(completion) = completion {
                debug!(
                    "reload completed: {}/{}",
                    completion.magazine, completion.reserve
                );
                out_events.push(Event::ReloadCompleted {
                    weapon: self.player.weapon.kind(),
                    magazine: completion.magazine,
                    reserve: completion.reserve,
                });
            }
        }

        let contact_damage = self.config.enemy.contact_damage_for(self.wave.get());
        for (id, enemy) in self.enemies.iter_mut() {
            if !enemy.is_alive() {
                continue;
            }

            enemy.update(dt, self.player.position, &self.map);
            let target = self.player.position;
            if self.player.is_defeated() || !enemy.try_attack(target, &self.config.enemy) {
                continue;
            }

            let defeated = self.player.take_damage(contact_damage, &self.config.player);
            self.damage_flash = self.config.feedback.damage_flash;
            out_events.push(Event::PlayerDamaged {
                enemy: id,
                amount: contact_damage,
                health: self.player.health,
            });

            if defeated {
                info!("player defeated on wave {}", self.wave.get());
                out_events.push(Event::PlayerDefeated);
            }
        }

        let damping = self.config.grenades.bounce_damping;
        for (id, projectile) in self.projectiles.iter_mut() {
            projectile.update(dt, &self.map, damping);
            if projectile.should_explode() {
                projectile.expire();
                out_events.push(Event::FuseExpired {
                    projectile: id,
                    position: projectile.position,
                });
            }
        }
    }

    fn fire(&mut self, out_events: &mut Vec<Event>) {
        let weapon = &mut self.player.weapon;
        if !weapon.shoot() {
            return;
        }

        let spec = weapon.spec();
        out_events.push(Event::WeaponFired {
            weapon: weapon.kind(),
            origin: self.player.position,
            yaw: self.player.yaw,
            pellets: spec.pellets,
            spread: spec.spread,
            damage: spec.damage,
        });

        if weapon.magazine() == 0 && weapon.start_reload() {
            debug!("magazine empty, reloading {}", spec.name);
            out_events.push(Event::ReloadStarted {
                weapon: weapon.kind(),
            });
        }
    }

    fn throw_grenade(&mut self, out_events: &mut Vec<Event>) {
        let player = &mut self.player;
        if player.grenades == 0 || player.grenade_cooldown > 0.0 {
            return;
        }

        let tuning = &self.config.grenades;
        player.grenades -= 1;
        player.grenade_cooldown = tuning.throw_cooldown;

        let velocity = Vec2::from_angle(player.yaw) * tuning.throw_speed;
        let projectile = self
            .projectiles
            .insert(Projectile::launch(player.position, velocity, tuning.fuse));
        out_events.push(Event::GrenadeThrown {
            projectile,
            position: player.position,
            velocity,
        });
    }

    fn damage_enemy(
        &mut self,
        id: EnemyId,
        amount: f32,
        cause: DamageCause,
        out_events: &mut Vec<Event>,
    ) {
        let Some(enemy) = self.enemies.get_mut(id) else {
            return;
        };
        if !enemy.is_alive() {
            return;
        }

        let killed = enemy.take_damage(amount, self.config.enemy.hit_flash);
        let reward = match (cause, killed) {
            (DamageCause::Hitscan, true) => self.config.combat.kill_reward,
            (DamageCause::Hitscan, false) => self.config.combat.hit_reward,
            (DamageCause::Explosion, true) => self.config.grenades.kill_reward,
            (DamageCause::Explosion, false) => 0,
        };
        self.player.currency = self.player.currency.saturating_add(reward);

        if cause == DamageCause::Hitscan {
            self.hitmarker = self.config.feedback.hitmarker;
        }

        out_events.push(Event::EnemyDamaged {
            enemy: id,
            amount,
            cause,
            killed,
            reward,
        });
    }

    fn purchase(&mut self, offer: PurchaseOffer, out_events: &mut Vec<Event>) {
        let cost = match self.price_of(offer) {
            Ok(cost) => cost,
            Err(reason) => {
                debug!("purchase of {offer:?} rejected: {reason:?}");
                out_events.push(Event::PurchaseRejected { offer, reason });
                return;
            }
        };

        if self.player.currency < cost {
            debug!(
                "purchase of {offer:?} rejected: {} < {cost}",
                self.player.currency
            );
            out_events.push(Event::PurchaseRejected {
                offer,
                reason: PurchaseRejection::InsufficientFunds,
            });
            return;
        }

        self.player.currency -= cost;
        match offer {
            PurchaseOffer::Door => {
                let _ = self.map.open_door();
            }
            PurchaseOffer::Station(id) => {
                match self.map.station(id).map(|station| station.kind()) {
                    Some(StationKind::Weapon(kind)) => {
                        self.player.weapon = Weapon::new(kind);
                    }
                    Some(StationKind::Ammo) => {
                        self.player.weapon.refill();
                        let cap = self.config.grenades.starting_count;
                        self.player.grenades = (self.player.grenades + 1).min(cap);
                    }
                    None => {}
                }
            }
        }

        info!(
            "purchased {offer:?} for {cost}, {} remaining (reserve {})",
            self.player.currency,
            self.player.weapon.reserve()
        );
        out_events.push(Event::PurchaseCompleted { offer, cost });
    }

    fn price_of(&self, offer: PurchaseOffer) -> Result<u32, PurchaseRejection> {
        match offer {
            PurchaseOffer::Door => match self.map.door() {
                None => Err(PurchaseRejection::UnknownFixture),
                Some(door) if door.is_open() => Err(PurchaseRejection::AlreadyOpen),
                Some(door) => Ok(door.cost()),
            },
            PurchaseOffer::Station(id) => self
                .map
                .station(id)
                .map(|station| station.cost())
                .ok_or(PurchaseRejection::UnknownFixture),
        }
    }

    fn remove_expired(&mut self, out_events: &mut Vec<Event>) {
        for enemy in self.enemies.remove_where(|enemy| !enemy.is_alive()) {
            out_events.push(Event::EnemyRemoved { enemy });
        }

        for projectile in self.projectiles.remove_where(Projectile::is_exploded) {
            out_events.push(Event::ProjectileRemoved { projectile });
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::BeginWave { wave } => {
            world.wave = wave;
            world.player.grenades = world.config.grenades.starting_count;
            info!("wave {} started", wave.get());
            out_events.push(Event::WaveStarted { wave });
        }
        Command::SpawnEnemy { position, wave } => {
            let enemy = Enemy::spawn(position, wave.get(), &world.config.enemy);
            let health = enemy.health;
            let id = world.enemies.insert(enemy);
            debug!("enemy {} spawned at {position}", id.get());
            out_events.push(Event::EnemySpawned {
                enemy: id,
                position,
                health,
            });
        }
        Command::Tick { dt, intent } => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced { dt });
            world.tick(dt.as_secs_f32(), &intent, out_events);
        }
        Command::FireWeapon => {
            if !world.player.is_defeated() {
                world.fire(out_events);
            }
        }
        Command::ReloadWeapon => {
            if !world.player.is_defeated() && world.player.weapon.start_reload() {
                out_events.push(Event::ReloadStarted {
                    weapon: world.player.weapon.kind(),
                });
            }
        }
        Command::ThrowGrenade => {
            if !world.player.is_defeated() {
                world.throw_grenade(out_events);
            }
        }
        Command::DamageEnemy {
            enemy,
            amount,
            cause,
        } => world.damage_enemy(enemy, amount, cause, out_events),
        Command::DetonateProjectile { projectile } => {
            let Some(grenade) = world.projectiles.get_mut(projectile) else {
                return;
            };
            if grenade.detonate() {
                debug!("grenade {} detonated", projectile.get());
                out_events.push(Event::ProjectileDetonated {
                    projectile,
                    position: grenade.position,
                });
            }
        }
        Command::Purchase { offer } => {
            if !world.player.is_defeated() {
                world.purchase(offer, out_events);
            }
        }
        Command::RemoveExpired => world.remove_expired(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use last_stand_core::{
        EnemySnapshot, EnemyView, GameConfig, GridMap, PlayerSnapshot, ProjectileSnapshot,
        ProjectileView, WaveNumber,
    };

    use super::World;

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Configuration the world was created with.
    #[must_use]
    pub fn config(world: &World) -> &GameConfig {
        &world.config
    }

    /// Provides read-only access to the map, including the door state.
    #[must_use]
    pub fn map(world: &World) -> &GridMap {
        &world.map
    }

    /// Captures the player's current state.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        world.player.snapshot()
    }

    /// Captures a read-only view of the living enemies.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        let snapshots = world
            .enemies
            .iter()
            .filter(|(_, enemy)| enemy.is_alive())
            .map(|(id, enemy)| EnemySnapshot {
                id,
                position: enemy.position,
                health: enemy.health,
                flashing: enemy.is_flashing(),
            })
            .collect();
        EnemyView::from_snapshots(snapshots)
    }

    /// Number of living enemies.
    #[must_use]
    pub fn enemy_count(world: &World) -> usize {
        world
            .enemies
            .iter()
            .filter(|(_, enemy)| enemy.is_alive())
            .count()
    }

    /// Captures a read-only view of the grenades still in flight.
    #[must_use]
    pub fn projectile_view(world: &World) -> ProjectileView {
        let snapshots = world
            .projectiles
            .iter()
            .filter(|(_, projectile)| !projectile.is_exploded())
            .map(|(id, projectile)| ProjectileSnapshot {
                id,
                position: projectile.position,
                fuse: projectile.timer(),
            })
            .collect();
        ProjectileView::from_snapshots(snapshots)
    }

    /// Wave most recently started.
    #[must_use]
    pub fn wave(world: &World) -> WaveNumber {
        world.wave
    }

    /// Intensity of the red wash shown after the player is struck.
    #[must_use]
    pub fn damage_flash(world: &World) -> f32 {
        world.damage_flash
    }

    /// Reports whether the hitmarker should be visible.
    #[must_use]
    pub fn hitmarker_active(world: &World) -> bool {
        world.hitmarker > 0.0
    }

    /// Reports whether the player's health has reached zero.
    #[must_use]
    pub fn is_defeated(world: &World) -> bool {
        world.player.is_defeated()
    }

    /// Number of ticks processed so far.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }
}
