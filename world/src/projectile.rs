//! Thrown grenades that bounce off walls until their fuse runs out.

use glam::Vec2;
use last_stand_core::GridMap;

use crate::collision;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Fuse {
    Burning,
    Expired,
    Exploded,
}

#[derive(Clone, Debug)]
pub(crate) struct Projectile {
    pub(crate) position: Vec2,
    velocity: Vec2,
    timer: f32,
    fuse: Fuse,
}

impl Projectile {
    pub(crate) fn launch(position: Vec2, velocity: Vec2, fuse_seconds: f32) -> Self {
        Self {
            position,
            velocity,
            timer: fuse_seconds,
            fuse: Fuse::Burning,
        }
    }

    pub(crate) fn timer(&self) -> f32 {
        self.timer.max(0.0)
    }

    /// Integrates one tick; a blocked axis is reversed and scaled by `damping`.
    pub(crate) fn update(&mut self, dt: f32, map: &GridMap, damping: f32) {
        if self.fuse != Fuse::Burning {
            return;
        }

        self.timer -= dt;
        let outcome = collision::slide(map, self.position, self.velocity * dt);
        self.position = outcome.position;
        if outcome.blocked_x {
            self.velocity.x *= -damping;
        }
        if outcome.blocked_y {
            self.velocity.y *= -damping;
        }
    }

    /// True on the single tick the fuse is observed to have run out.
    pub(crate) fn should_explode(&self) -> bool {
        self.fuse == Fuse::Burning && self.timer <= 0.0
    }

    /// Freezes the grenade until its blast has been resolved.
    pub(crate) fn expire(&mut self) {
        self.fuse = Fuse::Expired;
    }

    /// Marks the blast as resolved. Returns `false` if the grenade was not awaiting detonation.
    pub(crate) fn detonate(&mut self) -> bool {
        if self.fuse == Fuse::Expired {
            self.fuse = Fuse::Exploded;
            true
        } else {
            false
        }
    }

    pub(crate) fn is_exploded(&self) -> bool {
        self.fuse == Fuse::Exploded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pocket() -> GridMap {
        GridMap::from_rows(&["11111", "10001", "10001", "11111"])
    }

    #[test]
    fn bounce_reverses_and_damps_blocked_axis() {
        let mut grenade = Projectile::launch(Vec2::new(3.9, 1.5), Vec2::new(4.0, 0.0), 2.2);
        grenade.update(0.05, &pocket(), 0.4);

        assert!((grenade.position.x - 3.9).abs() < 1e-6, "wall refused the move");
        assert!((grenade.velocity.x + 1.6).abs() < 1e-6);
        assert_eq!(grenade.velocity.y, 0.0);
    }

    #[test]
    fn should_explode_is_reported_exactly_once() {
        let map = pocket();
        let mut grenade = Projectile::launch(Vec2::new(2.0, 2.0), Vec2::ZERO, 0.1);
        grenade.update(0.06, &map, 0.4);
        assert!(!grenade.should_explode());

        grenade.update(0.06, &map, 0.4);
        assert!(grenade.should_explode());
        grenade.expire();
        assert!(!grenade.should_explode());

        grenade.update(0.06, &map, 0.4);
        assert!(!grenade.should_explode());
        assert!(grenade.detonate());
        assert!(grenade.is_exploded());
        assert!(!grenade.detonate());
    }
}
