//! Zone controller.
//!
//! One [`Airlock`] per named zone.  It owns the zone's hardware groups and
//! the cycle state machine, and is driven from two directions:
//!
//! ```text
//!   host tick ──▶ update()            trigger ──▶ request_external()
//!                  │                               request_internal()
//!                  ├─ door safety-close (both sides)      │
//!                  ├─ continue outstanding cycle ◀────────┘ (next ticks)
//!                  └─ render status
//! ```
//!
//! Every request builds a fresh [`ZoneSnapshot`], runs the handler, and
//! applies the resulting commands before returning.

use core::fmt;

use log::{debug, info};

use crate::app::events::AirlockEvent;
use crate::app::ports::EventSink;
use crate::classify::ZoneHardware;
use crate::config::{PressureThresholds, SystemConfig};
use crate::fsm::context::{CycleCommands, CycleContext, ZoneSnapshot};
use crate::fsm::states::build_request_table;
use crate::fsm::{CycleFsm, RequestOutcome, RequestState, Side};
use crate::groups::{DisplayGroup, DoorGroup, LightGroup, SensorGroup, VentGroup};
use crate::status::{AirlockStatus, StatusPayload};

pub struct Airlock {
    name: String,
    external_doors: DoorGroup,
    internal_doors: DoorGroup,
    external_vents: VentGroup,
    internal_vents: VentGroup,
    sensors: SensorGroup,
    lights: LightGroup,
    displays: DisplayGroup,
    fsm: CycleFsm,
    thresholds: PressureThresholds,
    hold_doors_while_occupied: bool,
    block_names: Vec<String>,
}

impl Airlock {
    /// Build the controller from already-classified hardware.  Lights and
    /// displays are reset to their default look.
    pub fn new(name: &str, hw: ZoneHardware, config: &SystemConfig) -> Self {
        let threshold = config.door_close_after_ticks;
        Self {
            name: name.to_string(),
            external_doors: DoorGroup::new(Side::External, hw.external_doors, threshold),
            internal_doors: DoorGroup::new(Side::Internal, hw.internal_doors, threshold),
            external_vents: VentGroup::new(Side::External, hw.external_vents),
            internal_vents: VentGroup::new(Side::Internal, hw.internal_vents),
            sensors: SensorGroup::new(hw.sensors),
            lights: LightGroup::new(hw.lights),
            displays: DisplayGroup::new(hw.displays, config.display_font_size),
            fsm: CycleFsm::new(build_request_table()),
            thresholds: config.thresholds(),
            hold_doors_while_occupied: config.hold_doors_while_occupied,
            block_names: hw.block_names,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Announce the zone and render its initial status.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        let doors = self.external_doors.len() + self.internal_doors.len();
        let vents = self.external_vents.len() + self.internal_vents.len();
        info!(
            "airlock '{}' online: {} doors, {} vents, {} sensors",
            self.name,
            doors,
            vents,
            self.sensors.len()
        );
        sink.emit(&AirlockEvent::Started {
            zone: self.name.clone(),
            doors,
            vents,
        });
        self.render_status(sink);
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// One tick: door safety-close → continue cycle → render status.
    pub fn update(&mut self, sink: &mut impl EventSink) {
        // 1. Safety-close runs unconditionally, even mid-cycle.
        let hold = self.hold_doors_while_occupied && self.sensors.presence_detected();
        for side in [Side::External, Side::Internal] {
            let count = self.doors_mut(side).update(hold);
            if count > 0 {
                sink.emit(&AirlockEvent::DoorsForcedClosed {
                    zone: self.name.clone(),
                    side,
                    count,
                });
            }
        }

        // 2. Re-issue the outstanding request, if any.
        let before = self.fsm.state();
        let mut ctx = self.context();
        if let Some(outcome) = self.fsm.tick(&mut ctx) {
            if let Some(side) = before.side() {
                self.finish(side, before, outcome, ctx.commands, sink);
            }
        }

        // 3. Status.
        self.render_status(sink);
    }

    // ── Requests ──────────────────────────────────────────────

    /// Request passage to the outside.  Safe to call every tick.
    pub fn request_external(&mut self, sink: &mut impl EventSink) -> RequestOutcome {
        self.request(Side::External, sink)
    }

    /// Request passage to the interior.  Safe to call every tick.
    pub fn request_internal(&mut self, sink: &mut impl EventSink) -> RequestOutcome {
        self.request(Side::Internal, sink)
    }

    pub fn request(&mut self, side: Side, sink: &mut impl EventSink) -> RequestOutcome {
        let before = self.fsm.state();
        let mut ctx = self.context();
        let outcome = self.fsm.request(side, &mut ctx);
        self.finish(side, before, outcome, ctx.commands, sink);
        outcome
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> RequestState {
        self.fsm.state()
    }

    /// Chamber status, recomputed from the inner vents on every call.
    pub fn status(&self) -> AirlockStatus {
        AirlockStatus::classify(self.internal_vents.oxygen_level(), self.thresholds)
    }

    pub fn status_payload(&self) -> StatusPayload {
        StatusPayload::new(
            &self.name,
            self.internal_vents.oxygen_level(),
            self.external_vents.oxygen_level(),
            self.status(),
        )
    }

    pub fn presence_detected(&self) -> bool {
        self.sensors.presence_detected()
    }

    pub fn doors(&self, side: Side) -> &DoorGroup {
        match side {
            Side::External => &self.external_doors,
            Side::Internal => &self.internal_doors,
        }
    }

    pub fn doors_mut(&mut self, side: Side) -> &mut DoorGroup {
        match side {
            Side::External => &mut self.external_doors,
            Side::Internal => &mut self.internal_doors,
        }
    }

    pub fn vents(&self, side: Side) -> &VentGroup {
        match side {
            Side::External => &self.external_vents,
            Side::Internal => &self.internal_vents,
        }
    }

    pub fn block_names(&self) -> &[String] {
        &self.block_names
    }

    // ── Internal ──────────────────────────────────────────────

    fn context(&self) -> CycleContext {
        CycleContext::new(
            ZoneSnapshot {
                internal_oxygen: self.internal_vents.oxygen_level(),
                external_oxygen: self.external_vents.oxygen_level(),
                internal_doors: self.internal_doors.aggregate_status(),
                external_doors: self.external_doors.aggregate_status(),
            },
            self.thresholds,
        )
    }

    /// Apply handler commands, then report what happened.
    fn finish(
        &mut self,
        side: Side,
        before: RequestState,
        outcome: RequestOutcome,
        commands: CycleCommands,
        sink: &mut impl EventSink,
    ) {
        if commands.open_external {
            self.external_doors.open_all();
        }
        if commands.open_internal {
            self.internal_doors.open_all();
        }
        if let Some(depressurize) = commands.internal_depressurize {
            self.internal_vents.set_depressurize(depressurize);
        }

        let zone = self.name.clone();
        match outcome {
            RequestOutcome::Dropped => {
                debug!("'{}': {:?} request dropped in {}", zone, side, before.name());
                sink.emit(&AirlockEvent::RequestDropped {
                    zone,
                    side,
                    state: before,
                });
            }
            RequestOutcome::Pending if before != self.fsm.state() => {
                sink.emit(&AirlockEvent::CycleStarted { zone, side });
            }
            RequestOutcome::Pending => {}
            RequestOutcome::Completed => {
                info!("'{}': {:?} doors opening, cycle complete", zone, side);
                sink.emit(&AirlockEvent::CycleCompleted { zone, side });
            }
        }
    }

    fn render_status(&mut self, sink: &mut impl EventSink) {
        let payload = self.status_payload();
        let level = payload.level();
        self.displays.write(payload.render().as_str(), level, false);
        self.lights.show(level);
        sink.emit(&AirlockEvent::Status(payload));
    }
}

/// Diagnostic echo: the names of every block in the zone.
impl fmt::Display for Airlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.block_names.join("\n"))
    }
}
