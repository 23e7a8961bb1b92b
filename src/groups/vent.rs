//! Vent group: averaged oxygen reading plus broadcast pressurize intent.

use log::warn;

use crate::app::ports::Vent;
use crate::fsm::Side;

/// All vents facing one side of one zone.
pub struct VentGroup {
    side: Side,
    vents: Vec<Box<dyn Vent>>,
}

impl VentGroup {
    pub fn new(side: Side, vents: Vec<Box<dyn Vent>>) -> Self {
        Self { side, vents }
    }

    /// Mean oxygen ratio of the members, clamped to [0, 1].
    ///
    /// `None` when the group is empty or any member reports a non-finite
    /// ratio; callers treat that as an unknown reading.
    pub fn oxygen_level(&self) -> Option<f32> {
        if self.vents.is_empty() {
            return None;
        }
        let mut sum = 0.0_f32;
        for vent in &self.vents {
            let ratio = vent.oxygen_ratio();
            if !ratio.is_finite() {
                warn!("{:?} vent reported non-finite oxygen ratio", self.side);
                return None;
            }
            sum += ratio.clamp(0.0, 1.0);
        }
        Some(sum / self.vents.len() as f32)
    }

    /// `true` = vent to vacuum, `false` = pressurize.  Sent to every member.
    pub fn set_depressurize(&mut self, depressurize: bool) {
        self.vents
            .iter_mut()
            .for_each(|v| v.set_depressurize(depressurize));
    }

    /// `true` only if every member is venting.  Empty groups report `false`.
    pub fn depressurizing(&self) -> bool {
        !self.vents.is_empty() && self.vents.iter().all(|v| v.depressurize())
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn len(&self) -> usize {
        self.vents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vents.is_empty()
    }
}
