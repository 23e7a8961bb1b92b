//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing each [`AirlockEvent`] as one log
//! line.  Per-tick status lines go out at `debug` so a running controller
//! is quiet at the default level.

use log::{debug, info, warn};

use crate::app::events::AirlockEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AirlockEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AirlockEvent) {
        match event {
            AirlockEvent::Started { zone, doors, vents } => {
                info!("START | zone='{}' doors={} vents={}", zone, doors, vents);
            }
            AirlockEvent::CycleStarted { zone, side } => {
                info!("CYCLE | zone='{}' {:?} started", zone, side);
            }
            AirlockEvent::CycleCompleted { zone, side } => {
                info!("CYCLE | zone='{}' {:?} complete, doors opening", zone, side);
            }
            AirlockEvent::RequestDropped { zone, side, state } => {
                info!(
                    "CYCLE | zone='{}' {:?} request dropped (state={})",
                    zone,
                    side,
                    state.name()
                );
            }
            AirlockEvent::DoorsForcedClosed { zone, side, count } => {
                warn!("DOOR  | zone='{}' {:?} forced closed: {}", zone, side, count);
            }
            AirlockEvent::TriggerReceived { zone, side } => {
                info!("TRIG  | zone='{}' request {:?}", zone, side);
            }
            AirlockEvent::Status(p) => {
                debug!(
                    "STATUS | zone='{}' inside={:?}% outside={:?}% {:?}",
                    p.zone, p.internal_percent, p.external_percent, p.status
                );
            }
        }
    }
}
