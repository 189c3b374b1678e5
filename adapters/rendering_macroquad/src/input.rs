//! Translation of raw device state into player controls.

use glam::Vec2;
use last_stand_core::{PlayerInput, PlayerIntent};

/// Look units generated per second while an arrow key is held.
const ARROW_TURN_RATE: f32 = 1_100.0;

/// Raw device state observed during a single frame.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputObservations {
    /// `W` is held.
    pub forward: bool,
    /// `S` is held.
    pub back: bool,
    /// `A` is held.
    pub left: bool,
    /// `D` is held.
    pub right: bool,
    /// `Shift` is held.
    pub sprint: bool,
    /// Left arrow is held.
    pub turn_left: bool,
    /// Right arrow is held.
    pub turn_right: bool,
    /// Cursor position in window pixels.
    pub cursor: Vec2,
    /// Left mouse button is held.
    pub fire_down: bool,
    /// Right mouse button is held.
    pub aim_down: bool,
    /// `F` went down this frame.
    pub aim_toggle_pressed: bool,
    /// `R` went down this frame.
    pub reload_pressed: bool,
    /// `G` went down this frame.
    pub grenade_pressed: bool,
    /// `E` went down this frame.
    pub interact_pressed: bool,
    /// `Escape` went down this frame.
    pub pause_pressed: bool,
    /// Real duration of the frame in seconds.
    pub frame_seconds: f32,
}

/// Remembers the state needed to turn per-frame observations into controls.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Default)]
pub struct InputCapture {
    last_cursor: Option<Vec2>,
    aim_latched: bool,
}

impl InputCapture {
    /// Converts one frame of observations into player input.
    ///
    /// Cursor travel since the previous frame becomes look motion. `F` flips a
    /// latched aim that combines with the right mouse button.
    pub fn sample(&mut self, observed: InputObservations) -> PlayerInput {
        let cursor_delta = self
            .last_cursor
            .map_or(0.0, |previous| observed.cursor.x - previous.x);
        self.last_cursor = Some(observed.cursor);

        if observed.aim_toggle_pressed {
            self.aim_latched = !self.aim_latched;
        }

        let turn = f32::from(u8::from(observed.turn_right)) - f32::from(u8::from(observed.turn_left));
        let look_delta = cursor_delta + turn * ARROW_TURN_RATE * observed.frame_seconds.max(0.0);

        PlayerInput {
            intent: PlayerIntent {
                look_delta,
                forward: observed.forward,
                back: observed.back,
                left: observed.left,
                right: observed.right,
                sprint: observed.sprint,
                aim: observed.aim_down || self.aim_latched,
            },
            fire_held: observed.fire_down,
            reload: observed.reload_pressed,
            grenade: observed.grenade_pressed,
            interact: observed.interact_pressed,
            pause_toggle: observed.pause_pressed,
        }
    }

    /// Forgets the previous cursor position so the next frame produces no look motion.
    pub fn reset_look(&mut self) {
        self.last_cursor = None;
    }
}

/// Whether the OS cursor is hidden and confined to the window for mouse-look.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct CursorGrab {
    grabbed: bool,
}

impl CursorGrab {
    /// Records the wanted state and returns it when the cursor must change.
    pub(crate) fn update(&mut self, wanted: bool) -> Option<bool> {
        if self.grabbed == wanted {
            return None;
        }
        self.grabbed = wanted;
        Some(wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_produces_no_look_motion() {
        let mut capture = InputCapture::default();
        let input = capture.sample(InputObservations {
            cursor: Vec2::new(400.0, 300.0),
            ..InputObservations::default()
        });
        assert_eq!(input.intent.look_delta, 0.0);

        let input = capture.sample(InputObservations {
            cursor: Vec2::new(390.0, 320.0),
            ..InputObservations::default()
        });
        assert_eq!(input.intent.look_delta, -10.0);
    }

    #[test]
    fn cursor_grab_reports_only_changes() {
        let mut grab = CursorGrab::default();
        assert_eq!(grab.update(true), Some(true));
        assert_eq!(grab.update(true), None);
        assert_eq!(grab.update(false), Some(false));
        assert_eq!(grab.update(false), None);
    }

    #[test]
    fn arrow_keys_turn_in_proportion_to_frame_time() {
        let mut capture = InputCapture::default();
        let input = capture.sample(InputObservations {
            turn_right: true,
            frame_seconds: 0.5,
            ..InputObservations::default()
        });
        assert!((input.intent.look_delta - 550.0).abs() < 1e-3);
    }
}
