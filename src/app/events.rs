//! Outbound controller events.
//!
//! [`Airlock`](crate::airlock::Airlock) and
//! [`CoreSystem`](super::service::CoreSystem) emit these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other side
//! decide what to do with them: log them, echo them to an operator panel.

use crate::fsm::{RequestState, Side};
use crate::status::StatusPayload;

/// Structured events emitted by the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum AirlockEvent {
    /// A zone controller was built (carries its block counts).
    Started {
        zone: String,
        doors: usize,
        vents: usize,
    },

    /// A cycle began or changed side.
    CycleStarted { zone: String, side: Side },

    /// A cycle finished; doors on `side` were commanded open.
    CycleCompleted { zone: String, side: Side },

    /// A request was dropped by its guard.
    RequestDropped {
        zone: String,
        side: Side,
        state: RequestState,
    },

    /// The safety auto-close closed doors left open.
    DoorsForcedClosed {
        zone: String,
        side: Side,
        count: usize,
    },

    /// A trigger reached a zone.
    TriggerReceived { zone: String, side: Side },

    /// Per-tick status snapshot.
    Status(StatusPayload),
}
