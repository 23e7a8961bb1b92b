//! Zone classifier.
//!
//! Partitions a block inventory into zones by tag convention:
//!
//! - a block belongs to zone Z if its tag starts with Z's name
//!   (case-insensitive).  When several zone names match, the longest one
//!   wins, so "Airlock 10" blocks are not claimed by "Airlock 1";
//! - within a zone, a door or vent whose tag ends with `external` or
//!   `internal` (case-insensitive) takes that side.  Doors and vents with
//!   neither suffix are left out of every group.
//!
//! Sensors, lights and displays serve the whole zone.

use log::debug;

use crate::app::ports::{Block, Display, Door, Hardware, Light, PresenceSensor, Vent};
use crate::fsm::Side;

/// The typed handles for one zone, ready to hand to the groups.
#[derive(Default)]
pub struct ZoneHardware {
    pub external_doors: Vec<Box<dyn Door>>,
    pub internal_doors: Vec<Box<dyn Door>>,
    pub external_vents: Vec<Box<dyn Vent>>,
    pub internal_vents: Vec<Box<dyn Vent>>,
    pub sensors: Vec<Box<dyn PresenceSensor>>,
    pub lights: Vec<Box<dyn Light>>,
    pub displays: Vec<Box<dyn Display>>,
    /// Names of every block assigned to the zone, in inventory order.
    pub block_names: Vec<String>,
}

/// Side encoded in a tag's suffix, if any.
pub fn side_of(tag: &str) -> Option<Side> {
    let tag = tag.to_lowercase();
    [Side::External, Side::Internal]
        .into_iter()
        .find(|side| tag.ends_with(side.tag_suffix()))
}

/// Index of the zone a tag belongs to.
pub fn zone_of(tag: &str, zones: &[String]) -> Option<usize> {
    let tag = tag.to_lowercase();
    zones
        .iter()
        .enumerate()
        .filter(|(_, name)| tag.starts_with(&name.to_lowercase()))
        .max_by_key(|(_, name)| name.len())
        .map(|(idx, _)| idx)
}

/// Split `blocks` into one [`ZoneHardware`] per zone name, in the order
/// given.  Blocks matching no zone are dropped.
pub fn partition(blocks: Vec<Block>, zones: &[String]) -> Vec<ZoneHardware> {
    let mut out: Vec<ZoneHardware> = zones.iter().map(|_| ZoneHardware::default()).collect();

    for block in blocks {
        let Some(idx) = zone_of(&block.tag, zones) else {
            debug!("block '{}' ({}) matches no zone", block.name, block.tag);
            continue;
        };
        let zone = &mut out[idx];
        let side = side_of(&block.tag);

        match (block.hardware, side) {
            (Hardware::Door(d), Some(Side::External)) => zone.external_doors.push(d),
            (Hardware::Door(d), Some(Side::Internal)) => zone.internal_doors.push(d),
            (Hardware::Vent(v), Some(Side::External)) => zone.external_vents.push(v),
            (Hardware::Vent(v), Some(Side::Internal)) => zone.internal_vents.push(v),
            (Hardware::Door(_) | Hardware::Vent(_), None) => {
                debug!(
                    "block '{}' in zone '{}' has no side suffix, ignored",
                    block.name, zones[idx]
                );
            }
            (Hardware::Sensor(s), _) => zone.sensors.push(s),
            (Hardware::Light(l), _) => zone.lights.push(l),
            (Hardware::Display(d), _) => zone.displays.push(d),
        }
        zone.block_names.push(block.name);
    }

    out
}
