//! Zone light group.
//!
//! | Mode    | Colour | Blink length |
//! |---------|--------|--------------|
//! | default | white  | 0 (steady)   |
//! | warning | yellow | 3            |
//! | alarm   | red    | 3            |

use crate::app::ports::{COLOUR_RED, COLOUR_WHITE, COLOUR_YELLOW, Light, Rgb};
use crate::status::StatusLevel;

const WARNING_BLINK_LENGTH: f32 = 3.0;

pub struct LightGroup {
    lights: Vec<Box<dyn Light>>,
}

impl LightGroup {
    /// Wrap the lights and put them in default mode.
    pub fn new(lights: Vec<Box<dyn Light>>) -> Self {
        let mut group = Self { lights };
        group.reset();
        group
    }

    pub fn turn_on(&mut self) {
        self.lights.iter_mut().for_each(|l| l.set_enabled(true));
    }

    pub fn turn_off(&mut self) {
        self.lights.iter_mut().for_each(|l| l.set_enabled(false));
    }

    pub fn warning(&mut self) {
        self.paint(COLOUR_YELLOW, WARNING_BLINK_LENGTH);
    }

    pub fn alarm(&mut self) {
        self.paint(COLOUR_RED, WARNING_BLINK_LENGTH);
    }

    pub fn reset(&mut self) {
        self.paint(COLOUR_WHITE, 0.0);
    }

    /// Match the lights to a status level.
    pub fn show(&mut self, level: StatusLevel) {
        match level {
            StatusLevel::Warning => self.warning(),
            StatusLevel::Alarm => self.alarm(),
            StatusLevel::Ok | StatusLevel::Normal => self.reset(),
        }
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    fn paint(&mut self, colour: Rgb, blink: f32) {
        for light in &mut self.lights {
            light.set_colour(colour);
            light.set_blink_length(blink);
        }
    }
}
