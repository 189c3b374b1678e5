//! Runtime ammunition, cooldown and reload state of the held weapon.

use last_stand_core::{WeaponKind, WeaponSnapshot, WeaponSpec};

/// Rounds moved from the reserve when a reload finishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ReloadCompletion {
    pub(crate) magazine: u32,
    pub(crate) reserve: u32,
}

#[derive(Clone, Debug)]
pub(crate) struct Weapon {
    kind: WeaponKind,
    magazine: u32,
    reserve: u32,
    cooldown: f32,
    reloading: bool,
    reload_timer: f32,
}

impl Weapon {
    /// Fresh instance with a full magazine and the default reserve.
    pub(crate) fn new(kind: WeaponKind) -> Self {
        let spec = kind.spec();
        Self {
            kind,
            magazine: spec.magazine,
            reserve: spec.starting_reserve,
            cooldown: 0.0,
            reloading: false,
            reload_timer: 0.0,
        }
    }

    pub(crate) fn kind(&self) -> WeaponKind {
        self.kind
    }

    pub(crate) fn spec(&self) -> &'static WeaponSpec {
        self.kind.spec()
    }

    pub(crate) fn magazine(&self) -> u32 {
        self.magazine
    }

    pub(crate) fn reserve(&self) -> u32 {
        self.reserve
    }

    /// Advances cooldown and reload timers, finishing a reload whose timer ran out.
    pub(crate) fn update(&mut self, dt: f32) -> Option<ReloadCompletion> {
        self.cooldown = (self.cooldown - dt).max(0.0);
        self.reload_timer = (self.reload_timer - dt).max(0.0);

        if !self.reloading || self.reload_timer > 0.0 {
            return None;
        }

        let deficit = self.spec().magazine - self.magazine;
        let transferred = deficit.min(self.reserve);
        self.magazine += transferred;
        self.reserve -= transferred;
        self.reloading = false;

        Some(ReloadCompletion {
            magazine: self.magazine,
            reserve: self.reserve,
        })
    }

    pub(crate) fn can_shoot(&self) -> bool {
        self.cooldown <= 0.0 && !self.reloading && self.magazine > 0
    }

    /// Consumes one round and starts the fire-rate cooldown.
    pub(crate) fn shoot(&mut self) -> bool {
        if !self.can_shoot() {
            return false;
        }

        self.magazine -= 1;
        self.cooldown = self.spec().cooldown_seconds();
        true
    }

    pub(crate) fn start_reload(&mut self) -> bool {
        if self.reloading || self.magazine == self.spec().magazine || self.reserve == 0 {
            return false;
        }

        self.reloading = true;
        self.reload_timer = self.spec().reload_seconds;
        true
    }

    /// Tops the reserve up to capacity.
    pub(crate) fn refill(&mut self) {
        self.reserve = self.spec().reserve_capacity;
    }

    pub(crate) fn snapshot(&self) -> WeaponSnapshot {
        WeaponSnapshot {
            kind: self.kind,
            magazine: self.magazine,
            reserve: self.reserve,
            reloading: self.reloading,
            cooldown: self.cooldown,
        }
    }
}
