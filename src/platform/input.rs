//! Logical game actions and per-frame key state

use serde::{Deserialize, Serialize};

/// A logical control, independent of the physical key bound to it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Jump,
    Restart,
    Confirm,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::MoveUp,
        Action::MoveDown,
        Action::Jump,
        Action::Restart,
        Action::Confirm,
    ];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Something that can be polled for input once per frame
pub trait InputSource {
    /// Key is down right now
    fn is_held(&self, action: Action) -> bool;
    /// Key went down since the previous frame
    fn was_pressed(&self, action: Action) -> bool;
}

/// Held keys plus the edges derived from them.
///
/// Frontends call [`press`](Self::press) / [`release`](Self::release) as key
/// events arrive and [`end_frame`](Self::end_frame) once the frame's input has
/// been consumed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    held: u8,
    pressed: u8,
}

impl KeyState {
    pub fn press(&mut self, action: Action) {
        if self.held & action.bit() == 0 {
            self.pressed |= action.bit();
        }
        self.held |= action.bit();
    }

    pub fn release(&mut self, action: Action) {
        self.held &= !action.bit();
    }

    /// Forget this frame's presses; held keys stay held
    pub fn end_frame(&mut self) {
        self.pressed = 0;
    }
}

impl InputSource for KeyState {
    fn is_held(&self, action: Action) -> bool {
        self.held & action.bit() != 0
    }

    fn was_pressed(&self, action: Action) -> bool {
        self.pressed & action.bit() != 0
    }
}
