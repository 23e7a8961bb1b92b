//! System configuration parameters
//!
//! All tunable parameters for the airlock controller.  Values can be
//! loaded from a JSON document; missing fields take their defaults.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Longest zone name accepted.  Keeps the rendered status text inside its
/// fixed-capacity buffer.
pub const MAX_ZONE_NAME_CHARS: usize = 64;

/// Largest accepted auto-close threshold.  About 28 minutes at the default
/// `Update100` cadence.
pub const MAX_DOOR_CLOSE_AFTER_TICKS: u32 = 1000;

/// Host update cadence that drives the periodic tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateFrequency {
    /// Every simulation step.
    Update1,
    /// Every 10th simulation step.
    Update10,
    /// Every 100th simulation step (~1.67 s).
    Update100,
}

/// Oxygen bands used to classify the airlock chamber.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureThresholds {
    /// Below this ratio the chamber counts as depressurized.
    pub depressurized_below: f32,
    /// At or above this ratio the chamber counts as pressurized.
    pub pressurized_at: f32,
}

impl Default for PressureThresholds {
    fn default() -> Self {
        Self {
            depressurized_below: 0.2,
            pressurized_at: 0.8,
        }
    }
}

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Zones ---
    /// Airlock names.  Blocks whose tag starts with a name belong to it.
    pub zones: Vec<String>,

    // --- Doors ---
    /// Ticks a door may stay open before it is force-closed.
    pub door_close_after_ticks: u32,
    /// Suppress the auto-close while a sensor detects someone.
    pub hold_doors_while_occupied: bool,

    // --- Pressure ---
    /// Chamber oxygen ratio below which it is depressurized.
    pub depressurized_below: f32,
    /// Chamber oxygen ratio at or above which it is pressurized.
    pub pressurized_at: f32,

    // --- Timing ---
    /// Which host update source runs the periodic tick.
    pub update_frequency: UpdateFrequency,

    // --- Display ---
    /// Font size applied to status displays on reset.
    pub display_font_size: f32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        let thresholds = PressureThresholds::default();
        Self {
            zones: vec!["Airlock 1".to_string()],

            door_close_after_ticks: 1,
            hold_doors_while_occupied: false,

            depressurized_below: thresholds.depressurized_below,
            pressurized_at: thresholds.pressurized_at,

            update_frequency: UpdateFrequency::Update100,

            display_font_size: 1.1,
        }
    }
}

impl SystemConfig {
    /// Decode a JSON document and validate it.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the controller cannot run with.
    ///
    /// Out-of-range values are rejected, never clamped.
    pub fn validate(&self) -> Result<()> {
        if self.zones.is_empty() {
            return Err(Error::Config("zone list is empty"));
        }
        let mut seen: Vec<String> = Vec::with_capacity(self.zones.len());
        for name in &self.zones {
            if name.trim().is_empty() {
                return Err(Error::Config("zone name is blank"));
            }
            // Trigger arguments are trimmed before lookup.
            if name.trim() != name {
                return Err(Error::Config(
                    "zone name has leading or trailing whitespace",
                ));
            }
            if name.chars().count() > MAX_ZONE_NAME_CHARS {
                return Err(Error::Config("zone name longer than 64 characters"));
            }
            let key = name.to_lowercase();
            if seen.contains(&key) {
                return Err(Error::DuplicateZone(name.clone()));
            }
            seen.push(key);
        }

        if self.door_close_after_ticks > MAX_DOOR_CLOSE_AFTER_TICKS {
            return Err(Error::Config("door_close_after_ticks above 1000"));
        }

        let in_unit = |v: f32| (0.0..=1.0).contains(&v);
        if !in_unit(self.depressurized_below) || !in_unit(self.pressurized_at) {
            return Err(Error::Config("pressure thresholds must lie in [0, 1]"));
        }
        if self.depressurized_below >= self.pressurized_at {
            return Err(Error::Config(
                "depressurized_below must be below pressurized_at",
            ));
        }
        // JSON has no infinity; an overflowed literal would not write back.
        if !self.display_font_size.is_finite() || self.display_font_size <= 0.0 {
            return Err(Error::Config("display_font_size must be positive and finite"));
        }
        Ok(())
    }

    /// Pressure bands as a single value for the state machine.
    pub fn thresholds(&self) -> PressureThresholds {
        PressureThresholds {
            depressurized_below: self.depressurized_below,
            pressurized_at: self.pressurized_at,
        }
    }
}
