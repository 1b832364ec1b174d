//! Badge buttons as a [`ButtonSource`].
//!
//! The badge has a D-pad (up/down/left/right), A, B, Start, Select and a
//! joystick click. The joystick click has no bit in the mask.

use esp_hal::gpio::{
    Input,
    InputConfig,
    Pull,
};

use crate::{
    ButtonResources,
    input::{
        ButtonMask,
        ButtonSource,
    },
};

/// All nine badge buttons.
pub struct Buttons {
    pub up: Input<'static>,
    pub down: Input<'static>,
    pub left: Input<'static>,
    pub right: Input<'static>,
    pub stick: Input<'static>,
    pub a: Input<'static>,
    pub b: Input<'static>,
    pub start: Input<'static>,
    pub select: Input<'static>,
}

impl From<ButtonResources<'static>> for Buttons {
    fn from(res: ButtonResources<'static>) -> Self {
        let pull_up = InputConfig::default().with_pull(Pull::Up);
        Self {
            up: Input::new(res.up, pull_up),
            down: Input::new(res.down, pull_up),
            left: Input::new(res.left, pull_up),
            right: Input::new(res.right, pull_up),
            stick: Input::new(res.stick, pull_up),
            a: Input::new(res.a, pull_up),
            b: Input::new(res.b, pull_up),
            start: Input::new(res.start, pull_up),
            select: Input::new(res.select, InputConfig::default().with_pull(Pull::Down)),
        }
    }
}

impl ButtonSource for Buttons {
    fn read_mask(&mut self) -> ButtonMask {
        // Active low, apart from SELECT which is pulled down.
        let pressed = [
            (self.left.is_low(), ButtonMask::LEFT),
            (self.up.is_low(), ButtonMask::UP),
            (self.down.is_low(), ButtonMask::DOWN),
            (self.right.is_low(), ButtonMask::RIGHT),
            (self.select.is_high(), ButtonMask::SELECT),
            (self.start.is_low(), ButtonMask::START),
            (self.a.is_low(), ButtonMask::A),
            (self.b.is_low(), ButtonMask::B),
        ];

        let mut mask = ButtonMask::NONE;
        for (down, bit) in pressed {
            if down {
                mask |= bit;
            }
        }
        mask
    }
}
