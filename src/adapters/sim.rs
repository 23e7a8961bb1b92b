//! In-memory simulated grid.
//!
//! Every simulated block is a cheap clonable handle over shared state: one
//! clone goes into the [`Block`] handed to the controller, the grid keeps
//! another so an operator (or a test) can change readings from outside.
//!
//! Doors move in two steps: a command puts them in `Opening`/`Closing`
//! and the next [`SimGrid::advance`] completes the motion.  Oxygen ratios
//! only change when set explicitly; there is no gas model.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::app::ports::{
    Block, BlockInventory, COLOUR_BLACK, COLOUR_WHITE, Display, Door, DoorStatus, Hardware,
    Light, PresenceSensor, Rgb, TextAlignment, Vent,
};

// ── Doors ─────────────────────────────────────────────────────

#[derive(Debug)]
struct DoorState {
    status: DoorStatus,
    enabled: bool,
}

#[derive(Debug, Clone)]
pub struct SimDoor(Rc<RefCell<DoorState>>);

impl SimDoor {
    pub fn new(status: DoorStatus) -> Self {
        Self(Rc::new(RefCell::new(DoorState {
            status,
            enabled: true,
        })))
    }

    pub fn set_status(&self, status: DoorStatus) {
        self.0.borrow_mut().status = status;
    }

    /// Finish any motion in progress.
    pub fn advance(&self) {
        let mut s = self.0.borrow_mut();
        s.status = match s.status {
            DoorStatus::Opening => DoorStatus::Open,
            DoorStatus::Closing => DoorStatus::Closed,
            other => other,
        };
    }
}

impl Door for SimDoor {
    fn status(&self) -> DoorStatus {
        self.0.borrow().status
    }

    fn open(&mut self) {
        let mut s = self.0.borrow_mut();
        if s.enabled && !matches!(s.status, DoorStatus::Open | DoorStatus::Opening) {
            s.status = DoorStatus::Opening;
        }
    }

    fn close(&mut self) {
        let mut s = self.0.borrow_mut();
        if s.enabled && !matches!(s.status, DoorStatus::Closed | DoorStatus::Closing) {
            s.status = DoorStatus::Closing;
        }
    }

    fn toggle(&mut self) {
        match self.status() {
            DoorStatus::Open | DoorStatus::Opening => self.close(),
            _ => self.open(),
        }
    }

    fn enabled(&self) -> bool {
        self.0.borrow().enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.0.borrow_mut().enabled = enabled;
    }
}

// ── Vents ─────────────────────────────────────────────────────

#[derive(Debug)]
struct VentState {
    oxygen: f32,
    depressurize: bool,
}

#[derive(Debug, Clone)]
pub struct SimVent(Rc<RefCell<VentState>>);

impl SimVent {
    pub fn new(oxygen: f32) -> Self {
        Self(Rc::new(RefCell::new(VentState {
            oxygen,
            depressurize: false,
        })))
    }

    pub fn set_oxygen(&self, ratio: f32) {
        self.0.borrow_mut().oxygen = ratio;
    }
}

impl Vent for SimVent {
    fn oxygen_ratio(&self) -> f32 {
        self.0.borrow().oxygen
    }

    fn depressurize(&self) -> bool {
        self.0.borrow().depressurize
    }

    fn set_depressurize(&mut self, depressurize: bool) {
        self.0.borrow_mut().depressurize = depressurize;
    }
}

// ── Sensors ───────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct SimSensor(Rc<Cell<bool>>);

impl SimSensor {
    pub fn set_presence(&self, present: bool) {
        self.0.set(present);
    }
}

impl PresenceSensor for SimSensor {
    fn presence_detected(&self) -> bool {
        self.0.get()
    }
}

// ── Lights ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightState {
    pub enabled: bool,
    pub colour: Rgb,
    pub blink_length: f32,
}

#[derive(Debug, Clone)]
pub struct SimLight(Rc<Cell<LightState>>);

impl SimLight {
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(LightState {
            enabled: true,
            colour: COLOUR_WHITE,
            blink_length: 0.0,
        })))
    }

    pub fn state(&self) -> LightState {
        self.0.get()
    }

    fn update(&self, f: impl FnOnce(&mut LightState)) {
        let mut s = self.0.get();
        f(&mut s);
        self.0.set(s);
    }
}

impl Default for SimLight {
    fn default() -> Self {
        Self::new()
    }
}

impl Light for SimLight {
    fn enabled(&self) -> bool {
        self.0.get().enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.update(|s| s.enabled = enabled);
    }

    fn set_colour(&mut self, colour: Rgb) {
        self.update(|s| s.colour = colour);
    }

    fn set_blink_length(&mut self, length: f32) {
        self.update(|s| s.blink_length = length);
    }
}

// ── Displays ──────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct PanelState {
    pub text: String,
    pub background: Rgb,
    pub font: Rgb,
    pub font_size: f32,
    pub alignment: TextAlignment,
}

#[derive(Debug, Clone)]
pub struct SimDisplay(Rc<RefCell<PanelState>>);

impl SimDisplay {
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(PanelState {
            text: String::new(),
            background: COLOUR_BLACK,
            font: COLOUR_WHITE,
            font_size: 1.0,
            alignment: TextAlignment::Left,
        })))
    }

    pub fn panel(&self) -> PanelState {
        self.0.borrow().clone()
    }
}

impl Default for SimDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for SimDisplay {
    fn write_text(&mut self, text: &str, append: bool) {
        let mut p = self.0.borrow_mut();
        if !append {
            p.text.clear();
        }
        p.text.push_str(text);
    }

    fn set_background_colour(&mut self, colour: Rgb) {
        self.0.borrow_mut().background = colour;
    }

    fn set_font_colour(&mut self, colour: Rgb) {
        self.0.borrow_mut().font = colour;
    }

    fn set_font_size(&mut self, size: f32) {
        self.0.borrow_mut().font_size = size;
    }

    fn set_alignment(&mut self, alignment: TextAlignment) {
        self.0.borrow_mut().alignment = alignment;
    }
}

// ── Grid ──────────────────────────────────────────────────────

/// A simulated structure plus any docked neighbours.
#[derive(Default)]
pub struct SimGrid {
    /// Blocks not yet handed to the controller.
    pending: Vec<Block>,
    /// Blocks on docked structures; never handed out.
    foreign: Vec<Block>,
    doors: Vec<(String, SimDoor)>,
    vents: Vec<(String, SimVent)>,
    sensors: Vec<(String, SimSensor)>,
    lights: Vec<(String, SimLight)>,
    displays: Vec<(String, SimDisplay)>,
}

impl SimGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_door(&mut self, name: &str, tag: &str, status: DoorStatus) -> SimDoor {
        let door = SimDoor::new(status);
        self.pending
            .push(Block::new(name, tag, Hardware::Door(Box::new(door.clone()))));
        self.doors.push((name.to_string(), door.clone()));
        door
    }

    pub fn add_vent(&mut self, name: &str, tag: &str, oxygen: f32) -> SimVent {
        let vent = SimVent::new(oxygen);
        self.pending
            .push(Block::new(name, tag, Hardware::Vent(Box::new(vent.clone()))));
        self.vents.push((name.to_string(), vent.clone()));
        vent
    }

    pub fn add_sensor(&mut self, name: &str, tag: &str) -> SimSensor {
        let sensor = SimSensor::default();
        self.pending
            .push(Block::new(name, tag, Hardware::Sensor(Box::new(sensor.clone()))));
        self.sensors.push((name.to_string(), sensor.clone()));
        sensor
    }

    pub fn add_light(&mut self, name: &str, tag: &str) -> SimLight {
        let light = SimLight::new();
        self.pending
            .push(Block::new(name, tag, Hardware::Light(Box::new(light.clone()))));
        self.lights.push((name.to_string(), light.clone()));
        light
    }

    pub fn add_display(&mut self, name: &str, tag: &str) -> SimDisplay {
        let display = SimDisplay::new();
        self.pending.push(Block::new(
            name,
            tag,
            Hardware::Display(Box::new(display.clone())),
        ));
        self.displays.push((name.to_string(), display.clone()));
        display
    }

    /// A door on a docked structure.  Visible to nobody.
    pub fn add_foreign_door(&mut self, name: &str, tag: &str) {
        let door = SimDoor::new(DoorStatus::Closed);
        self.foreign
            .push(Block::new(name, tag, Hardware::Door(Box::new(door))));
    }

    /// Two doors and one vent per side, one sensor, one light, one display.
    /// The chamber starts pressurized, the outside at vacuum.
    pub fn add_standard_zone(&mut self, zone: &str) {
        for n in 1..=2 {
            self.add_door(
                &format!("{zone} Outer Door {n}"),
                &format!("{zone} external"),
                DoorStatus::Closed,
            );
            self.add_door(
                &format!("{zone} Inner Door {n}"),
                &format!("{zone} internal"),
                DoorStatus::Closed,
            );
        }
        self.add_vent(&format!("{zone} Outer Vent"), &format!("{zone} external"), 0.0);
        self.add_vent(&format!("{zone} Chamber Vent"), &format!("{zone} internal"), 1.0);
        self.add_sensor(&format!("{zone} Sensor"), zone);
        self.add_light(&format!("{zone} Light"), zone);
        self.add_display(&format!("{zone} Panel"), zone);
    }

    /// Finish every door motion in progress.
    pub fn advance(&self) {
        self.doors.iter().for_each(|(_, d)| d.advance());
    }

    pub fn door(&self, name: &str) -> Option<&SimDoor> {
        find(&self.doors, name)
    }

    pub fn vent(&self, name: &str) -> Option<&SimVent> {
        find(&self.vents, name)
    }

    pub fn sensor(&self, name: &str) -> Option<&SimSensor> {
        find(&self.sensors, name)
    }

    pub fn light(&self, name: &str) -> Option<&SimLight> {
        find(&self.lights, name)
    }

    pub fn display(&self, name: &str) -> Option<&SimDisplay> {
        find(&self.displays, name)
    }

    /// Number of docked blocks held back from the controller.
    pub fn foreign_count(&self) -> usize {
        self.foreign.len()
    }
}

impl BlockInventory for SimGrid {
    fn local_blocks(&mut self) -> Vec<Block> {
        std::mem::take(&mut self.pending)
    }
}

fn find<'a, T>(items: &'a [(String, T)], name: &str) -> Option<&'a T> {
    let key = name.to_lowercase();
    items
        .iter()
        .find(|(n, _)| n.to_lowercase() == key)
        .map(|(_, h)| h)
}
