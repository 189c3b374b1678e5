//! Pursuing melee enemies.

use glam::Vec2;
use last_stand_core::{EnemyTuning, GridMap};

use crate::collision;

#[derive(Clone, Debug)]
pub(crate) struct Enemy {
    pub(crate) position: Vec2,
    speed: f32,
    pub(crate) health: f32,
    attack_cooldown: f32,
    hit_flash: f32,
}

impl Enemy {
    /// Creates an enemy whose speed and health are fixed by the wave it belongs to.
    pub(crate) fn spawn(position: Vec2, wave: u32, tuning: &EnemyTuning) -> Self {
        Self {
            position,
            speed: tuning.speed_for(wave),
            health: tuning.health_for(wave),
            attack_cooldown: 0.0,
            hit_flash: 0.0,
        }
    }

    pub(crate) fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    pub(crate) fn is_flashing(&self) -> bool {
        self.hit_flash > 0.0
    }

    /// Steps straight toward `target`, sliding along walls, and counts down timers.
    pub(crate) fn update(&mut self, dt: f32, target: Vec2, map: &GridMap) {
        let heading = (target - self.position).normalize_or_zero();
        self.position = collision::slide(map, self.position, heading * self.speed * dt).position;
        self.attack_cooldown = (self.attack_cooldown - dt).max(0.0);
        self.hit_flash = (self.hit_flash - dt).max(0.0);
    }

    /// Strikes `target` when off cooldown and strictly within melee range.
    pub(crate) fn try_attack(&mut self, target: Vec2, tuning: &EnemyTuning) -> bool {
        if self.attack_cooldown > 0.0 {
            return false;
        }

        if self.position.distance(target) < tuning.attack_range {
            self.attack_cooldown = tuning.attack_cooldown;
            return true;
        }

        false
    }

    /// Subtracts health, starts the hit flash and reports whether the enemy died.
    pub(crate) fn take_damage(&mut self, amount: f32, hit_flash: f32) -> bool {
        self.health -= amount;
        self.hit_flash = hit_flash;
        self.health <= 0.0
    }
}
