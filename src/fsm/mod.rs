//! Airlock cycle state machine.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  RequestTable                                            │
//! │  ┌──────────┬───────────────────┬─────────────────────┐  │
//! │  │ Side     │ name              │ handler             │  │
//! │  ├──────────┼───────────────────┼─────────────────────┤  │
//! │  │ External │ "RequestExternal" │ fn(state, ctx)->Opt │  │
//! │  │ Internal │ "RequestInternal" │ fn(state, ctx)->Opt │  │
//! │  └──────────┴───────────────────┴─────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! A request (from a trigger, or re-issued by `tick` while a cycle is
//! outstanding) runs the side's handler against the current state.  The
//! handler either drops the request (`None`) or names the next state.
//!
//! The two in-progress cycles are variants of one [`RequestState`], so an
//! external and an internal cycle can never be active at once.

pub mod context;
pub mod states;

use context::CycleContext;
use log::{debug, info};

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Role of a door or vent group within a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Side {
    /// Faces vacuum / the outside.
    External = 0,
    /// Faces the crewed, pressurized interior.
    Internal = 1,
}

impl Side {
    /// Number of sides; sizes the request table.
    pub const COUNT: usize = 2;

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Tag suffix that assigns a door or vent to this side.
    pub const fn tag_suffix(self) -> &'static str {
        match self {
            Self::External => "external",
            Self::Internal => "internal",
        }
    }

    /// State recorded while a cycle for this side is outstanding.
    pub const fn cycle_state(self) -> RequestState {
        match self {
            Self::External => RequestState::ExternalCycle,
            Self::Internal => RequestState::InternalCycle,
        }
    }
}

/// Which cycle, if any, is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RequestState {
    #[default]
    Idle,
    ExternalCycle,
    InternalCycle,
}

impl RequestState {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::ExternalCycle => "ExternalCycle",
            Self::InternalCycle => "InternalCycle",
        }
    }

    /// Side whose cycle is outstanding.
    pub const fn side(self) -> Option<Side> {
        match self {
            Self::Idle => None,
            Self::ExternalCycle => Some(Side::External),
            Self::InternalCycle => Some(Side::Internal),
        }
    }
}

/// Result of a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Guard failed; nothing changed.  The caller must re-issue.
    Dropped,
    /// The cycle continues on the next tick.
    Pending,
    /// Doors on the requested side were commanded open; back to idle.
    Completed,
}

// ---------------------------------------------------------------------------
// Table rows
// ---------------------------------------------------------------------------

/// Signature for a request handler.
/// Returns `Some(next)` to accept the request, `None` to drop it.
pub type RequestHandlerFn = fn(RequestState, &mut CycleContext) -> Option<RequestState>;

/// Static descriptor for one side's request.
pub struct RequestDescriptor {
    pub name: &'static str,
    pub handler: RequestHandlerFn,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

pub struct CycleFsm {
    table: [RequestDescriptor; Side::COUNT],
    state: RequestState,
}

impl CycleFsm {
    pub fn new(table: [RequestDescriptor; Side::COUNT]) -> Self {
        Self {
            table,
            state: RequestState::Idle,
        }
    }

    /// Apply a request for `side`.  Either the guard fails and nothing
    /// changes, or the handler's branch is taken in full.
    pub fn request(&mut self, side: Side, ctx: &mut CycleContext) -> RequestOutcome {
        let row = &self.table[side.index()];

        let Some(next) = (row.handler)(self.state, ctx) else {
            debug!("{} dropped in {}", row.name, self.state.name());
            ctx.commands = context::CycleCommands::default();
            return RequestOutcome::Dropped;
        };

        if next != self.state {
            self.transition(next);
        }
        if next == RequestState::Idle {
            RequestOutcome::Completed
        } else {
            RequestOutcome::Pending
        }
    }

    /// Re-issue the outstanding request, if any.
    pub fn tick(&mut self, ctx: &mut CycleContext) -> Option<RequestOutcome> {
        let side = self.state.side()?;
        Some(self.request(side, ctx))
    }

    pub fn state(&self) -> RequestState {
        self.state
    }

    /// Handler name for a side, for logs.
    pub fn request_name(&self, side: Side) -> &'static str {
        self.table[side.index()].name
    }

    fn transition(&mut self, next: RequestState) {
        info!("cycle transition: {} -> {}", self.state.name(), next.name());
        self.state = next;
    }
}
