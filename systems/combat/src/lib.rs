#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Combat resolver that turns shots and expired fuses into damage commands.
//!
//! Weapon discharges are resolved as hit-scan traces marched through the grid
//! in fixed increments; grenade blasts damage every enemy strictly inside the
//! blast radius with a linear falloff.

use std::collections::BTreeMap;

use glam::Vec2;
use last_stand_core::{
    CombatTuning, Command, DamageCause, EnemyId, EnemySnapshot, EnemyView, Event, GridMap,
    GrenadeTuning,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Configuration parameters required to construct the combat resolver.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    combat: CombatTuning,
    grenades: GrenadeTuning,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration from the trace and blast tuning plus a spread seed.
    #[must_use]
    pub const fn new(combat: CombatTuning, grenades: GrenadeTuning, rng_seed: u64) -> Self {
        Self {
            combat,
            grenades,
            rng_seed,
        }
    }
}

/// Pure system that resolves hit-scan fire and explosions.
#[derive(Debug)]
pub struct Combat {
    combat: CombatTuning,
    grenades: GrenadeTuning,
    rng: ChaCha8Rng,
}

impl Combat {
    /// Creates a new combat resolver using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            combat: config.combat,
            grenades: config.grenades,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Consumes world events and emits damage and detonation commands.
    ///
    /// Damage issued earlier in the same batch counts against each enemy, so
    /// a pellet never stops on an enemy that earlier pellets already killed.
    pub fn handle(
        &mut self,
        events: &[Event],
        enemies: &EnemyView,
        map: &GridMap,
        out: &mut Vec<Command>,
    ) {
        let mut dealt = BTreeMap::new();
        for event in events {
            match event {
                Event::WeaponFired {
                    origin,
                    yaw,
                    pellets,
                    spread,
                    damage,
                    ..
                } => {
                    for _ in 0..*pellets {
                        let deviation = if *spread > 0.0 {
                            self.rng.gen_range(-*spread..=*spread)
                        } else {
                            0.0
                        };

                        let struck = trace(
                            *origin,
                            yaw + deviation,
                            enemies,
                            map,
                            &self.combat,
                            |enemy| is_standing(enemy, &dealt),
                        );
                        if let Some(enemy) = struck {
                            *dealt.entry(enemy).or_insert(0.0) += *damage;
                            out.push(Command::DamageEnemy {
                                enemy,
                                amount: *damage,
                                cause: DamageCause::Hitscan,
                            });
                        }
                    }
                }
                Event::FuseExpired {
                    projectile,
                    position,
                } => {
                    for enemy in enemies.iter() {
                        if !is_standing(enemy, &dealt) {
                            continue;
                        }
                        let distance = enemy.position.distance(*position);
                        if let Some(amount) = explosion_damage(distance, &self.grenades) {
                            *dealt.entry(enemy.id).or_insert(0.0) += amount;
                            out.push(Command::DamageEnemy {
                                enemy: enemy.id,
                                amount,
                                cause: DamageCause::Explosion,
                            });
                        }
                    }
                    out.push(Command::DetonateProjectile {
                        projectile: *projectile,
                    });
                }
                _ => {}
            }
        }
    }
}

/// Marches a single pellet from `origin` along `angle` and reports the first enemy it meets.
///
/// The march stops at the first blocked sample or once the configured range
/// is exceeded. At each sample the lowest-id enemy within the hit radius wins.
#[must_use]
pub fn trace_pellet(
    origin: Vec2,
    angle: f32,
    enemies: &EnemyView,
    map: &GridMap,
    tuning: &CombatTuning,
) -> Option<EnemyId> {
    trace(origin, angle, enemies, map, tuning, |_| true)
}

fn trace(
    origin: Vec2,
    angle: f32,
    enemies: &EnemyView,
    map: &GridMap,
    tuning: &CombatTuning,
    standing: impl Fn(&EnemySnapshot) -> bool,
) -> Option<EnemyId> {
    let direction = Vec2::from_angle(angle);
    let mut distance = 0.0;

    while distance < tuning.max_range {
        distance += tuning.ray_step;
        let sample = origin + direction * distance;
        if map.is_blocked(sample) {
            return None;
        }

        let struck = enemies
            .iter()
            .filter(|enemy| standing(*enemy))
            .find(|enemy| enemy.position.distance(sample) < tuning.hit_radius);
        if let Some(enemy) = struck {
            return Some(enemy.id);
        }
    }

    None
}

/// Whether `enemy` survives the damage already issued against it this batch.
fn is_standing(enemy: &EnemySnapshot, dealt: &BTreeMap<EnemyId, f32>) -> bool {
    dealt.get(&enemy.id).map_or(true, |amount| *amount < enemy.health)
}

/// Damage dealt by a blast to an enemy `distance` away from its centre.
///
/// Falls off linearly from the maximum at the centre toward the minimum at the
/// radius; enemies at or beyond the radius are untouched.
#[must_use]
pub fn explosion_damage(distance: f32, tuning: &GrenadeTuning) -> Option<f32> {
    if !(distance < tuning.blast_radius) {
        return None;
    }

    let t = (distance / tuning.blast_radius).max(0.0);
    Some(tuning.max_damage + (tuning.min_damage - tuning.max_damage) * t)
}
