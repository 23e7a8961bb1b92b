//! Request handlers and table builder.
//!
//! One plain `fn` per side.  A handler inspects the current state and the
//! snapshot, writes hardware commands into the context, and returns the
//! next state, or `None` when the request is dropped.
//!
//! ```text
//!            RequestExternal                 RequestInternal
//!  IDLE ─────────────────────▶ EXT_CYCLE    IDLE ──────────────▶ INT_CYCLE
//!    ▲  [equalized: open ext]     │           ▲  [pressurized:       │
//!    └────────────────────────────┘           └───open int]──────────┘
//!
//!  EXT_CYCLE ──RequestInternal──▶ dropped    INT_CYCLE ──RequestExternal──▶ dropped
//! ```

use log::debug;

use super::context::CycleContext;
use super::{RequestDescriptor, RequestState, Side};
use crate::groups::DoorsStatus;
use crate::status::AirlockStatus;

/// Build the request table.  Indexed by [`Side::index`].
pub fn build_request_table() -> [RequestDescriptor; Side::COUNT] {
    [
        // Index 0: External
        RequestDescriptor {
            name: "RequestExternal",
            handler: external_request,
        },
        // Index 1: Internal
        RequestDescriptor {
            name: "RequestInternal",
            handler: internal_request,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  EXTERNAL: equalize the chamber with the outside, then open outer doors
// ═══════════════════════════════════════════════════════════════════════════

fn external_request(current: RequestState, ctx: &mut CycleContext) -> Option<RequestState> {
    if current == RequestState::InternalCycle {
        debug!("external request dropped: internal cycle in progress");
        return None;
    }
    if ctx.snapshot.internal_doors != DoorsStatus::Closed {
        debug!(
            "external request dropped: inner doors {:?}",
            ctx.snapshot.internal_doors
        );
        return None;
    }

    match ctx.airlock_status() {
        AirlockStatus::Pressurized => match ctx.outside_pressurized() {
            Some(true) => {
                ctx.commands.open_external = true;
                Some(RequestState::Idle)
            }
            Some(false) => {
                ctx.commands.internal_depressurize = Some(true);
                Some(RequestState::ExternalCycle)
            }
            None => Some(RequestState::ExternalCycle),
        },
        AirlockStatus::Depressurized => match ctx.outside_evacuated() {
            Some(true) => {
                ctx.commands.open_external = true;
                Some(RequestState::Idle)
            }
            Some(false) => {
                ctx.commands.internal_depressurize = Some(false);
                Some(RequestState::ExternalCycle)
            }
            None => Some(RequestState::ExternalCycle),
        },
        // Never guess from an ambiguous reading.
        AirlockStatus::Balancing | AirlockStatus::Unknown => Some(RequestState::ExternalCycle),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  INTERNAL: always re-pressurize to crew standard, then open inner doors
// ═══════════════════════════════════════════════════════════════════════════

fn internal_request(current: RequestState, ctx: &mut CycleContext) -> Option<RequestState> {
    if current == RequestState::ExternalCycle {
        debug!("internal request dropped: external cycle in progress");
        return None;
    }
    if ctx.snapshot.external_doors != DoorsStatus::Closed {
        debug!(
            "internal request dropped: outer doors {:?}",
            ctx.snapshot.external_doors
        );
        return None;
    }

    match ctx.airlock_status() {
        AirlockStatus::Pressurized => {
            ctx.commands.open_internal = true;
            Some(RequestState::Idle)
        }
        AirlockStatus::Depressurized => {
            ctx.commands.internal_depressurize = Some(false);
            Some(RequestState::InternalCycle)
        }
        AirlockStatus::Balancing | AirlockStatus::Unknown => Some(RequestState::InternalCycle),
    }
}
