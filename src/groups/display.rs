//! Status display group.
//!
//! | Level   | Background | Font  |
//! |---------|------------|-------|
//! | Normal  | unchanged  | unchanged |
//! | Ok      | green      | white |
//! | Warning | yellow     | black |
//! | Alarm   | red        | white |

use crate::app::ports::{
    COLOUR_BLACK, COLOUR_GREEN, COLOUR_RED, COLOUR_WHITE, COLOUR_YELLOW, Display, Rgb,
    TextAlignment,
};
use crate::status::StatusLevel;

pub struct DisplayGroup {
    displays: Vec<Box<dyn Display>>,
    font_size: f32,
}

impl DisplayGroup {
    /// Wrap the displays and apply the default look.
    pub fn new(displays: Vec<Box<dyn Display>>, font_size: f32) -> Self {
        let mut group = Self {
            displays,
            font_size,
        };
        group.reset();
        group
    }

    /// Write `text` to every display and colour it for `level`.
    pub fn write(&mut self, text: &str, level: StatusLevel, append: bool) {
        let colours = Self::colours(level);
        for display in &mut self.displays {
            display.write_text(text, append);
            if let Some((background, font)) = colours {
                display.set_background_colour(background);
                display.set_font_colour(font);
            }
        }
    }

    /// Black background, white centered text at the configured size.
    pub fn reset(&mut self) {
        for display in &mut self.displays {
            display.set_background_colour(COLOUR_BLACK);
            display.set_font_colour(COLOUR_WHITE);
            display.set_font_size(self.font_size);
            display.set_alignment(TextAlignment::Center);
        }
    }

    pub fn len(&self) -> usize {
        self.displays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.displays.is_empty()
    }

    fn colours(level: StatusLevel) -> Option<(Rgb, Rgb)> {
        match level {
            StatusLevel::Normal => None,
            StatusLevel::Ok => Some((COLOUR_GREEN, COLOUR_WHITE)),
            StatusLevel::Warning => Some((COLOUR_YELLOW, COLOUR_BLACK)),
            StatusLevel::Alarm => Some((COLOUR_RED, COLOUR_WHITE)),
        }
    }
}
