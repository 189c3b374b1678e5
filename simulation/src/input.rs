//! Latches per-frame input until the simulation consumes it.

use last_stand_core::PlayerInput;

/// Accumulates input between ticks.
///
/// Held controls reflect the most recent submission. Look motion and one-shot
/// requests are consumed by the first tick that reads them.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputLatch {
    pending: PlayerInput,
}

impl InputLatch {
    /// Folds a fresh sample into the pending input.
    pub fn submit(&mut self, input: PlayerInput) {
        self.pending.merge(input);
    }

    /// Returns the input for one tick and clears everything that must not repeat.
    pub fn take_tick(&mut self) -> PlayerInput {
        let taken = self.pending;
        self.discard_one_shots();
        self.pending.pause_toggle = false;
        taken
    }

    /// Drops look motion and action requests while keeping held controls and
    /// any pending pause toggle.
    pub fn discard_one_shots(&mut self) {
        self.pending.intent.look_delta = 0.0;
        self.pending.reload = false;
        self.pending.grenade = false;
        self.pending.interact = false;
    }

    /// Removes and reports a pending pause toggle.
    pub fn take_pause_toggle(&mut self) -> bool {
        std::mem::take(&mut self.pending.pause_toggle)
    }
}
