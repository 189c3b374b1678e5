//! Player movement, stamina, health and view-bob rules.

use glam::Vec2;
use last_stand_core::{GridMap, PlayerIntent, PlayerSnapshot, PlayerTuning, WeaponKind};

use crate::{
    collision,
    weapon::{ReloadCompletion, Weapon},
};

#[derive(Clone, Debug)]
pub(crate) struct Player {
    pub(crate) position: Vec2,
    pub(crate) yaw: f32,
    pub(crate) health: f32,
    pub(crate) stamina: f32,
    pub(crate) currency: u32,
    pub(crate) weapon: Weapon,
    pub(crate) grenades: u32,
    pub(crate) grenade_cooldown: f32,
    aiming: bool,
    bob_phase: f32,
    bob_offset: f32,
    regen_timer: f32,
}

impl Player {
    pub(crate) fn spawn(position: Vec2, tuning: &PlayerTuning, grenades: u32) -> Self {
        Self {
            position,
            yaw: 0.0,
            health: tuning.health_max,
            stamina: tuning.stamina_max,
            currency: tuning.starting_currency,
            weapon: Weapon::new(WeaponKind::Pistol),
            grenades,
            grenade_cooldown: 0.0,
            aiming: false,
            bob_phase: 0.0,
            bob_offset: 0.0,
            regen_timer: 0.0,
        }
    }

    pub(crate) fn is_defeated(&self) -> bool {
        self.health <= 0.0
    }

    /// Advances the player by one tick and reports a reload that finished during it.
    pub(crate) fn update(
        &mut self,
        dt: f32,
        intent: &PlayerIntent,
        map: &GridMap,
        tuning: &PlayerTuning,
    ) -> Option<ReloadCompletion> {
        self.aiming = intent.aim;
        self.yaw += intent.look_delta * tuning.look_sensitivity;

        let forward = axis(intent.forward, intent.back);
        let strafe = axis(intent.right, intent.left);
        let moving = forward != 0.0 || strafe != 0.0;
        let sprinting = intent.sprint && self.stamina > 0.0 && !self.aiming;

        let mut speed = tuning.move_speed;
        if sprinting {
            speed *= tuning.sprint_multiplier;
        }
        if self.aiming {
            speed *= tuning.ads_speed_multiplier;
        }

        if moving {
            let facing = Vec2::from_angle(self.yaw);
            let direction = (facing * forward + facing.perp() * strafe).normalize_or_zero();
            self.position = collision::slide(map, self.position, direction * speed * dt).position;
        }

        self.stamina = if sprinting && moving {
            (self.stamina - tuning.stamina_drain * dt).max(0.0)
        } else {
            (self.stamina + tuning.stamina_regen * dt).min(tuning.stamina_max)
        };

        if moving {
            self.bob_phase += tuning.bob_speed * dt;
            self.bob_offset = self.bob_phase.sin() * tuning.bob_amplitude;
        } else {
            self.bob_offset = 0.0;
        }

        self.regen_timer = (self.regen_timer - dt).max(0.0);
        if self.regen_timer <= 0.0 && self.health < tuning.health_max {
            self.health = (self.health + tuning.health_regen_rate * dt).min(tuning.health_max);
        }

        self.grenade_cooldown = (self.grenade_cooldown - dt).max(0.0);
        self.weapon.update(dt)
    }

    /// Applies contact damage and reports whether it was lethal.
    pub(crate) fn take_damage(&mut self, amount: f32, tuning: &PlayerTuning) -> bool {
        self.health = (self.health - amount).max(0.0);
        self.regen_timer = tuning.health_regen_delay;
        self.is_defeated()
    }

    pub(crate) fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            position: self.position,
            yaw: self.yaw,
            health: self.health.max(0.0),
            stamina: self.stamina,
            currency: self.currency,
            grenades: self.grenades,
            aiming: self.aiming,
            bob_offset: self.bob_offset,
            weapon: self.weapon.snapshot(),
        }
    }
}

fn axis(positive: bool, negative: bool) -> f32 {
    match (positive, negative) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_field() -> GridMap {
        GridMap::from_rows(&[
            "1111111111",
            "1000000001",
            "1000000001",
            "1000000001",
            "1000000001",
            "1111111111",
        ])
    }

    fn player_at(x: f32, y: f32) -> Player {
        Player::spawn(Vec2::new(x, y), &PlayerTuning::default(), 3)
    }

    #[test]
    fn forward_moves_along_yaw() {
        let tuning = PlayerTuning::default();
        let mut player = player_at(2.5, 2.5);
        let intent = PlayerIntent {
            forward: true,
            ..PlayerIntent::default()
        };

        let _ = player.update(0.5, &intent, &open_field(), &tuning);
        assert!((player.position.x - (2.5 + 1.6)).abs() < 1e-4);
        assert!((player.position.y - 2.5).abs() < 1e-4);
    }

    #[test]
    fn right_strafe_is_clockwise_of_facing() {
        let tuning = PlayerTuning::default();
        let mut player = player_at(2.5, 2.5);
        let intent = PlayerIntent {
            right: true,
            ..PlayerIntent::default()
        };

        let _ = player.update(0.1, &intent, &open_field(), &tuning);
        assert!(player.position.y > 2.5, "facing +x, right is +y");
        assert!((player.position.x - 2.5).abs() < 1e-4);
    }

    #[test]
    fn look_delta_rotates_by_sensitivity() {
        let tuning = PlayerTuning::default();
        let mut player = player_at(2.5, 2.5);
        let intent = PlayerIntent {
            look_delta: 500.0,
            ..PlayerIntent::default()
        };
        let _ = player.update(0.016, &intent, &open_field(), &tuning);
        assert!((player.yaw - 1.0).abs() < 1e-5);
    }

    #[test]
    fn sprinting_drains_stamina_and_aiming_blocks_sprint() {
        let tuning = PlayerTuning::default();
        let map = open_field();
        let mut sprinter = player_at(1.5, 2.5);
        let sprint = PlayerIntent {
            forward: true,
            sprint: true,
            ..PlayerIntent::default()
        };
        let _ = sprinter.update(0.5, &sprint, &map, &tuning);
        assert!((sprinter.stamina - (5.0 - 1.2)).abs() < 1e-4);
        assert!((sprinter.position.x - (1.5 + 3.2 * 1.6 * 0.5)).abs() < 1e-4);

        let mut aimer = player_at(1.5, 2.5);
        let aimed_sprint = PlayerIntent { aim: true, ..sprint };
        let _ = aimer.update(0.5, &aimed_sprint, &map, &tuning);
        assert!((aimer.stamina - 5.0).abs() < 1e-6, "no drain while aiming");
        assert!((aimer.position.x - (1.5 + 3.2 * 0.7 * 0.5)).abs() < 1e-4);
    }

    #[test]
    fn stamina_never_leaves_bounds() {
        let tuning = PlayerTuning::default();
        let map = open_field();
        let mut player = player_at(1.5, 2.5);
        let sprint = PlayerIntent {
            forward: true,
            sprint: true,
            ..PlayerIntent::default()
        };
        for _ in 0..600 {
            let _ = player.update(1.0 / 60.0, &sprint, &map, &tuning);
            assert!(player.stamina >= 0.0 && player.stamina <= tuning.stamina_max);
        }
        for _ in 0..600 {
            let _ = player.update(1.0 / 60.0, &PlayerIntent::default(), &map, &tuning);
            assert!(player.stamina <= tuning.stamina_max);
        }
        assert!((player.stamina - tuning.stamina_max).abs() < 1e-6);
    }

    #[test]
    fn health_regenerates_only_after_delay() {
        let tuning = PlayerTuning::default();
        let map = open_field();
        let mut player = player_at(2.5, 2.5);
        assert!(!player.take_damage(30.0, &tuning));

        let _ = player.update(2.0, &PlayerIntent::default(), &map, &tuning);
        assert!((player.health - 70.0).abs() < 1e-5);

        let _ = player.update(1.0, &PlayerIntent::default(), &map, &tuning);
        assert!((player.health - 76.0).abs() < 1e-4);

        let _ = player.update(60.0, &PlayerIntent::default(), &map, &tuning);
        assert!((player.health - tuning.health_max).abs() < 1e-6);
    }

    #[test]
    fn lethal_damage_clamps_health_at_zero() {
        let tuning = PlayerTuning::default();
        let mut player = player_at(2.5, 2.5);
        assert!(player.take_damage(150.0, &tuning));
        assert!(player.is_defeated());
        assert_eq!(player.snapshot().health, 0.0);
    }

    #[test]
    fn view_bob_rests_when_idle() {
        let tuning = PlayerTuning::default();
        let map = open_field();
        let mut player = player_at(2.5, 2.5);
        let walk = PlayerIntent {
            forward: true,
            ..PlayerIntent::default()
        };
        let _ = player.update(0.1, &walk, &map, &tuning);
        assert!(player.snapshot().bob_offset.abs() > 0.0);
        assert!(player.snapshot().bob_offset.abs() <= tuning.bob_amplitude);

        let _ = player.update(0.1, &PlayerIntent::default(), &map, &tuning);
        assert_eq!(player.snapshot().bob_offset, 0.0);
    }
}
