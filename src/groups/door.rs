//! Door group with the safety auto-close.
//!
//! ## Safety contract
//!
//! Every tick, each door's open-duration counter advances:
//!
//! | observed status      | counter         |
//! |----------------------|-----------------|
//! | `Closed`             | reset to 0      |
//! | `Open`               | +1              |
//! | `Opening`/`Closing`/`Unknown` | unchanged |
//!
//! A door whose counter exceeds the threshold is commanded closed and its
//! counter reset.  This runs regardless of any cycle in progress, so a
//! door opened by a cycle is still closed behind the crew.

use log::{debug, warn};

use crate::app::ports::{Door, DoorStatus};
use crate::fsm::Side;

/// Aggregate status of a door group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorsStatus {
    Closed,
    Open,
    Closing,
    Opening,
    Unknown,
}

/// A door plus its open-duration counter.
struct SafeDoor {
    door: Box<dyn Door>,
    open_ticks: u32,
}

impl SafeDoor {
    fn new(door: Box<dyn Door>) -> Self {
        Self {
            door,
            open_ticks: 0,
        }
    }

    /// Advance the counter; returns `true` if the door was force-closed.
    fn update(&mut self, close_after_ticks: u32, hold_open: bool) -> bool {
        match self.door.status() {
            DoorStatus::Open => self.open_ticks = self.open_ticks.saturating_add(1),
            DoorStatus::Closed => self.open_ticks = 0,
            DoorStatus::Opening | DoorStatus::Closing | DoorStatus::Unknown => {}
        }
        if self.open_ticks <= close_after_ticks || hold_open {
            return false;
        }
        self.open_ticks = 0;
        self.door.close();
        true
    }
}

/// All doors on one side of one zone.
pub struct DoorGroup {
    side: Side,
    doors: Vec<SafeDoor>,
    close_after_ticks: u32,
}

impl DoorGroup {
    pub fn new(side: Side, doors: Vec<Box<dyn Door>>, close_after_ticks: u32) -> Self {
        Self {
            side,
            doors: doors.into_iter().map(SafeDoor::new).collect(),
            close_after_ticks,
        }
    }

    /// Run the safety auto-close pass.  Returns how many doors were
    /// commanded closed.
    ///
    /// `hold_open` suppresses the close (counters still advance), so a
    /// held door closes on the first tick after the hold is released.
    pub fn update(&mut self, hold_open: bool) -> usize {
        let threshold = self.close_after_ticks;
        let closed = self
            .doors
            .iter_mut()
            .map(|d| d.update(threshold, hold_open))
            .filter(|&forced| forced)
            .count();
        if closed > 0 {
            warn!("{:?} doors: {} left open, forcing closed", self.side, closed);
        }
        closed
    }

    /// Command every door open, whatever its current status.
    pub fn open_all(&mut self) {
        debug!("{:?} doors: open all", self.side);
        self.doors.iter_mut().for_each(|d| d.door.open());
    }

    /// Command every door closed, whatever its current status.
    pub fn close_all(&mut self) {
        debug!("{:?} doors: close all", self.side);
        self.doors.iter_mut().for_each(|d| d.door.close());
    }

    /// First match wins: all closed, all open, any closing, any opening.
    /// An empty group is `Closed`.
    pub fn aggregate_status(&self) -> DoorsStatus {
        let all = |s: DoorStatus| self.doors.iter().all(|d| d.door.status() == s);
        let any = |s: DoorStatus| self.doors.iter().any(|d| d.door.status() == s);

        if all(DoorStatus::Closed) {
            DoorsStatus::Closed
        } else if all(DoorStatus::Open) {
            DoorsStatus::Open
        } else if any(DoorStatus::Closing) {
            DoorsStatus::Closing
        } else if any(DoorStatus::Opening) {
            DoorsStatus::Opening
        } else {
            DoorsStatus::Unknown
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.doors.iter_mut().for_each(|d| d.door.set_enabled(enabled));
    }

    pub fn all_enabled(&self) -> bool {
        self.doors.iter().all(|d| d.door.enabled())
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn len(&self) -> usize {
        self.doors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doors.is_empty()
    }

    /// Open-duration counters, in member order.
    pub fn open_ticks(&self) -> impl Iterator<Item = u32> + '_ {
        self.doors.iter().map(|d| d.open_ticks)
    }
}
