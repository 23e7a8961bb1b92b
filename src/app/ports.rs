//! Port traits: the hexagonal boundary between the controller and the
//! host's hardware.
//!
//! ```text
//!   Host block ──▶ Port trait ──▶ Group ──▶ Airlock (domain)
//! ```
//!
//! Each kind of block is a distinct capability trait.  The zone
//! classifier sorts a [`Block`] inventory once at construction time and
//! hands each group its already-typed handles, so nothing downstream
//! inspects block types at run time.

use core::fmt;

/// Colour as (R, G, B) tuple, each 0–255.
pub type Rgb = (u8, u8, u8);

pub const COLOUR_BLACK: Rgb = (0, 0, 0);
pub const COLOUR_WHITE: Rgb = (255, 255, 255);
pub const COLOUR_RED: Rgb = (255, 0, 0);
pub const COLOUR_GREEN: Rgb = (0, 128, 0);
pub const COLOUR_YELLOW: Rgb = (255, 255, 0);

// ───────────────────────────────────────────────────────────────
// Doors
// ───────────────────────────────────────────────────────────────

/// Status reported by a single door.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorStatus {
    Open,
    Closed,
    Opening,
    Closing,
    Unknown,
}

/// A single powered door.
pub trait Door {
    fn status(&self) -> DoorStatus;

    /// Command the door open.  No effect if already open.
    fn open(&mut self);

    /// Command the door closed.  No effect if already closed.
    fn close(&mut self);

    fn toggle(&mut self);

    fn enabled(&self) -> bool;

    fn set_enabled(&mut self, enabled: bool);
}

// ───────────────────────────────────────────────────────────────
// Vents
// ───────────────────────────────────────────────────────────────

/// An air vent facing one side of the airlock.
pub trait Vent {
    /// Atmospheric fill level of the room the vent serves, 0.0 (vacuum)
    /// to 1.0 (full).
    fn oxygen_ratio(&self) -> f32;

    /// `true` = venting to vacuum, `false` = pressurizing from reserves.
    fn depressurize(&self) -> bool;

    fn set_depressurize(&mut self, depressurize: bool);
}

// ───────────────────────────────────────────────────────────────
// Presence sensors
// ───────────────────────────────────────────────────────────────

pub trait PresenceSensor {
    fn presence_detected(&self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Displays and lights
// ───────────────────────────────────────────────────────────────

/// Text alignment on a display surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlignment {
    Left,
    Center,
    Right,
}

/// A text panel.
pub trait Display {
    /// Write `text`, replacing the current contents unless `append`.
    fn write_text(&mut self, text: &str, append: bool);

    fn set_background_colour(&mut self, colour: Rgb);

    fn set_font_colour(&mut self, colour: Rgb);

    fn set_font_size(&mut self, size: f32);

    fn set_alignment(&mut self, alignment: TextAlignment);
}

/// An interior light.
pub trait Light {
    fn enabled(&self) -> bool;

    fn set_enabled(&mut self, enabled: bool);

    fn set_colour(&mut self, colour: Rgb);

    /// Blink length in percent of the blink interval; 0 = steady.
    fn set_blink_length(&mut self, length: f32);
}

// ───────────────────────────────────────────────────────────────
// Block inventory (driven adapter: host grid → classifier)
// ───────────────────────────────────────────────────────────────

/// A typed hardware handle.
pub enum Hardware {
    Door(Box<dyn Door>),
    Vent(Box<dyn Vent>),
    Sensor(Box<dyn PresenceSensor>),
    Light(Box<dyn Light>),
    Display(Box<dyn Display>),
}

impl Hardware {
    /// Short kind label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Door(_) => "door",
            Self::Vent(_) => "vent",
            Self::Sensor(_) => "sensor",
            Self::Light(_) => "light",
            Self::Display(_) => "display",
        }
    }
}

/// One controllable entity on the grid.
pub struct Block {
    /// Human-facing block name.
    pub name: String,
    /// Freeform classification tag (zone name prefix, role suffix).
    pub tag: String,
    pub hardware: Hardware,
}

impl Block {
    pub fn new(name: impl Into<String>, tag: impl Into<String>, hardware: Hardware) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
            hardware,
        }
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block")
            .field("name", &self.name)
            .field("tag", &self.tag)
            .field("kind", &self.hardware.kind())
            .finish()
    }
}

/// Enumerates the blocks the controller may drive.
pub trait BlockInventory {
    /// Hand over every block on the controller's own structure.  Blocks
    /// on docked or foreign structures are never returned.
    fn local_blocks(&mut self) -> Vec<Block>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / echo)
// ───────────────────────────────────────────────────────────────

/// The controller emits structured [`AirlockEvent`](super::events::AirlockEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AirlockEvent);
}
