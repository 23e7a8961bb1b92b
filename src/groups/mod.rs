//! Hardware groups: typed aggregates over one zone's blocks.
//!
//! Each group owns the handles the classifier gave it and exposes
//! aggregate reads and broadcast commands.  Only [`door::DoorGroup`]
//! keeps state of its own (the per-door open counters).

pub mod display;
pub mod door;
pub mod light;
pub mod sensor;
pub mod vent;

pub use display::DisplayGroup;
pub use door::{DoorGroup, DoorsStatus};
pub use light::LightGroup;
pub use sensor::SensorGroup;
pub use vent::VentGroup;
