//! Presence sensor group.

use crate::app::ports::PresenceSensor;

/// All presence sensors in one zone.
pub struct SensorGroup {
    sensors: Vec<Box<dyn PresenceSensor>>,
}

impl SensorGroup {
    pub fn new(sensors: Vec<Box<dyn PresenceSensor>>) -> Self {
        Self { sensors }
    }

    /// `true` if any member detects someone.  Empty groups detect nobody.
    pub fn presence_detected(&self) -> bool {
        self.sensors.iter().any(|s| s.presence_detected())
    }

    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }
}
