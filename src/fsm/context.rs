//! Decision context threaded through the request handlers.
//!
//! The airlock fills a [`ZoneSnapshot`] from its groups, the handler reads
//! it and writes [`CycleCommands`], and the airlock applies those
//! commands to the hardware.  Handlers never touch hardware directly.

use crate::config::PressureThresholds;
use crate::groups::DoorsStatus;
use crate::status::AirlockStatus;

// ---------------------------------------------------------------------------
// Snapshot (read-only to handlers)
// ---------------------------------------------------------------------------

/// Point-in-time readings for one zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneSnapshot {
    /// Mean chamber oxygen ratio; `None` when undefined.
    pub internal_oxygen: Option<f32>,
    /// Mean outside oxygen ratio; `None` when undefined.
    pub external_oxygen: Option<f32>,
    pub internal_doors: DoorsStatus,
    pub external_doors: DoorsStatus,
}

// ---------------------------------------------------------------------------
// Commands (written by handlers)
// ---------------------------------------------------------------------------

/// Hardware actions a handler requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleCommands {
    pub open_external: bool,
    pub open_internal: bool,
    /// `Some(true)` = vent chamber to vacuum, `Some(false)` = pressurize.
    pub internal_depressurize: Option<bool>,
}

impl CycleCommands {
    /// No hardware action requested.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ---------------------------------------------------------------------------
// CycleContext
// ---------------------------------------------------------------------------

pub struct CycleContext {
    pub snapshot: ZoneSnapshot,
    pub commands: CycleCommands,
    pub thresholds: PressureThresholds,
}

impl CycleContext {
    pub fn new(snapshot: ZoneSnapshot, thresholds: PressureThresholds) -> Self {
        Self {
            snapshot,
            commands: CycleCommands::default(),
            thresholds,
        }
    }

    /// Chamber status, recomputed on every call.
    pub fn airlock_status(&self) -> AirlockStatus {
        AirlockStatus::classify(self.snapshot.internal_oxygen, self.thresholds)
    }

    /// Outside reading at or above the pressurized band.  Undefined
    /// readings are neither pressurized nor evacuated.
    pub fn outside_pressurized(&self) -> Option<bool> {
        self.snapshot
            .external_oxygen
            .map(|o| o >= self.thresholds.pressurized_at)
    }

    /// Outside reading below the depressurized band.
    pub fn outside_evacuated(&self) -> Option<bool> {
        self.snapshot
            .external_oxygen
            .map(|o| o < self.thresholds.depressurized_below)
    }
}
