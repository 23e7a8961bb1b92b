//! Chamber status classification and status-panel rendering.
//!
//! Nothing here feeds back into the cycle state machine: the payload is
//! recomputed every tick and handed to the display and light groups.

use core::fmt::{self, Write};

use log::warn;

use crate::config::PressureThresholds;

/// Capacity of the rendered status text, in bytes.
pub const STATUS_TEXT_CAP: usize = 384;

/// Rendered status text.  Fixed capacity, no heap.
pub type StatusText = heapless::String<STATUS_TEXT_CAP>;

/// Pressure state of the chamber, derived from the internal vents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AirlockStatus {
    Depressurized,
    Balancing,
    Pressurized,
    Unknown,
}

impl AirlockStatus {
    /// Classify a chamber oxygen reading.  `None` (no vents, or a vent
    /// returned garbage) is `Unknown`.
    pub fn classify(level: Option<f32>, thresholds: PressureThresholds) -> Self {
        match level {
            None => Self::Unknown,
            Some(l) if l < thresholds.depressurized_below => Self::Depressurized,
            Some(l) if l < thresholds.pressurized_at => Self::Balancing,
            Some(_) => Self::Pressurized,
        }
    }

    /// Indicator level shown on panels and lights.
    pub fn level(self) -> StatusLevel {
        match self {
            Self::Depressurized | Self::Balancing => StatusLevel::Warning,
            Self::Pressurized => StatusLevel::Ok,
            Self::Unknown => StatusLevel::Alarm,
        }
    }

    /// Human-readable status line.
    pub fn message(self) -> &'static str {
        match self {
            Self::Depressurized => "Air evacuated",
            Self::Balancing => "Pressure equalizing",
            Self::Pressurized => "Air pressurized",
            Self::Unknown => "Status undefined",
        }
    }
}

/// Indicator level for displays and lights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    /// Plain text, colours left as they are.
    Normal,
    Ok,
    Warning,
    Alarm,
}

/// Everything a status panel shows for one zone.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusPayload {
    pub zone: String,
    /// Truncated chamber oxygen percentage.
    pub internal_percent: Option<u8>,
    /// Truncated outside oxygen percentage.
    pub external_percent: Option<u8>,
    pub status: AirlockStatus,
}

impl StatusPayload {
    pub fn new(
        zone: &str,
        internal: Option<f32>,
        external: Option<f32>,
        status: AirlockStatus,
    ) -> Self {
        Self {
            zone: zone.to_string(),
            internal_percent: internal.map(truncate_percent),
            external_percent: external.map(truncate_percent),
            status,
        }
    }

    pub fn level(&self) -> StatusLevel {
        self.status.level()
    }

    /// Render the multi-line panel text.
    pub fn render(&self) -> StatusText {
        let mut text = StatusText::new();
        if write!(text, "{self}").is_err() {
            warn!("status text for '{}' truncated", self.zone);
        }
        text
    }
}

impl fmt::Display for StatusPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.zone)?;
        writeln!(f, "--Oxygen level--")?;
        f.write_str(" Inside: ")?;
        write_percent(f, self.internal_percent)?;
        f.write_str(" Outside: ")?;
        write_percent(f, self.external_percent)?;
        writeln!(f)?;
        f.write_str(self.status.message())
    }
}

fn write_percent(f: &mut fmt::Formatter<'_>, pct: Option<u8>) -> fmt::Result {
    match pct {
        Some(p) => write!(f, "{p}%"),
        None => f.write_str("--%"),
    }
}

fn truncate_percent(ratio: f32) -> u8 {
    (ratio.clamp(0.0, 1.0) * 100.0).trunc() as u8
}
