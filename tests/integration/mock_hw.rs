//! Mock blocks for integration tests.
//!
//! Every mock is a clonable handle over shared cells: the controller gets
//! one clone inside a [`Block`], the test keeps another to set readings
//! and assert on the recorded command history.  Doors never move on their
//! own; tests set the observed status explicitly.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use airlock::app::events::AirlockEvent;
use airlock::app::ports::{
    Block, BlockInventory, COLOUR_BLACK, Display, Door, DoorStatus, EventSink, Hardware, Light,
    PresenceSensor, Rgb, TextAlignment, Vent,
};
use airlock::fsm::Side;

// ── Door call record ──────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorCall {
    Open,
    Close,
    Toggle,
}

// ── MockDoor ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockDoor {
    status: Rc<Cell<DoorStatus>>,
    enabled: Rc<Cell<bool>>,
    calls: Rc<RefCell<Vec<DoorCall>>>,
}

#[allow(dead_code)]
impl MockDoor {
    pub fn new(status: DoorStatus) -> Self {
        Self {
            status: Rc::new(Cell::new(status)),
            enabled: Rc::new(Cell::new(true)),
            calls: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn set_status(&self, status: DoorStatus) {
        self.status.set(status);
    }

    pub fn calls(&self) -> Vec<DoorCall> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, call: DoorCall) -> usize {
        self.calls.borrow().iter().filter(|&&c| c == call).count()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl Door for MockDoor {
    fn status(&self) -> DoorStatus {
        self.status.get()
    }

    fn open(&mut self) {
        self.calls.borrow_mut().push(DoorCall::Open);
    }

    fn close(&mut self) {
        self.calls.borrow_mut().push(DoorCall::Close);
    }

    fn toggle(&mut self) {
        self.calls.borrow_mut().push(DoorCall::Toggle);
    }

    fn enabled(&self) -> bool {
        self.enabled.get()
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled.set(enabled);
    }
}

// ── MockVent ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockVent {
    oxygen: Rc<Cell<f32>>,
    depressurize: Rc<Cell<bool>>,
    /// Every value written through `set_depressurize`.
    writes: Rc<RefCell<Vec<bool>>>,
}

#[allow(dead_code)]
impl MockVent {
    pub fn new(oxygen: f32) -> Self {
        Self {
            oxygen: Rc::new(Cell::new(oxygen)),
            depressurize: Rc::new(Cell::new(false)),
            writes: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn set_oxygen(&self, ratio: f32) {
        self.oxygen.set(ratio);
    }

    pub fn writes(&self) -> Vec<bool> {
        self.writes.borrow().clone()
    }

    pub fn clear_writes(&self) {
        self.writes.borrow_mut().clear();
    }
}

impl Vent for MockVent {
    fn oxygen_ratio(&self) -> f32 {
        self.oxygen.get()
    }

    fn depressurize(&self) -> bool {
        self.depressurize.get()
    }

    fn set_depressurize(&mut self, depressurize: bool) {
        self.depressurize.set(depressurize);
        self.writes.borrow_mut().push(depressurize);
    }
}

// ── MockSensor ────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockSensor(Rc<Cell<bool>>);

impl MockSensor {
    pub fn set(&self, present: bool) {
        self.0.set(present);
    }
}

impl PresenceSensor for MockSensor {
    fn presence_detected(&self) -> bool {
        self.0.get()
    }
}

// ── MockLight / MockDisplay ───────────────────────────────────

#[derive(Clone)]
pub struct MockLight {
    pub colour: Rc<Cell<Rgb>>,
    pub blink: Rc<Cell<f32>>,
}

impl MockLight {
    pub fn new() -> Self {
        Self {
            colour: Rc::new(Cell::new(COLOUR_BLACK)),
            blink: Rc::new(Cell::new(0.0)),
        }
    }
}

impl Light for MockLight {
    fn enabled(&self) -> bool {
        true
    }

    fn set_enabled(&mut self, _enabled: bool) {}

    fn set_colour(&mut self, colour: Rgb) {
        self.colour.set(colour);
    }

    fn set_blink_length(&mut self, length: f32) {
        self.blink.set(length);
    }
}

#[derive(Clone)]
pub struct MockDisplay {
    pub text: Rc<RefCell<String>>,
    pub background: Rc<Cell<Rgb>>,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self {
            text: Rc::new(RefCell::new(String::new())),
            background: Rc::new(Cell::new(COLOUR_BLACK)),
        }
    }
}

impl Display for MockDisplay {
    fn write_text(&mut self, text: &str, append: bool) {
        let mut t = self.text.borrow_mut();
        if !append {
            t.clear();
        }
        t.push_str(text);
    }

    fn set_background_colour(&mut self, colour: Rgb) {
        self.background.set(colour);
    }

    fn set_font_colour(&mut self, _colour: Rgb) {}

    fn set_font_size(&mut self, _size: f32) {}

    fn set_alignment(&mut self, _alignment: TextAlignment) {}
}

// ── MockZone ──────────────────────────────────────────────────

/// One zone's worth of mocks: two doors and one vent per side, plus a
/// sensor, a light and a display.
#[derive(Clone)]
pub struct MockZone {
    pub name: String,
    pub external_doors: Vec<MockDoor>,
    pub internal_doors: Vec<MockDoor>,
    pub external_vent: MockVent,
    pub internal_vent: MockVent,
    pub sensor: MockSensor,
    pub light: MockLight,
    pub display: MockDisplay,
}

#[allow(dead_code)]
impl MockZone {
    /// All doors closed; oxygen readings as given.
    pub fn new(name: &str, internal_oxygen: f32, external_oxygen: f32) -> Self {
        Self {
            name: name.to_string(),
            external_doors: (0..2).map(|_| MockDoor::new(DoorStatus::Closed)).collect(),
            internal_doors: (0..2).map(|_| MockDoor::new(DoorStatus::Closed)).collect(),
            external_vent: MockVent::new(external_oxygen),
            internal_vent: MockVent::new(internal_oxygen),
            sensor: MockSensor::default(),
            light: MockLight::new(),
            display: MockDisplay::new(),
        }
    }

    pub fn doors(&self, side: Side) -> &[MockDoor] {
        match side {
            Side::External => &self.external_doors,
            Side::Internal => &self.internal_doors,
        }
    }

    pub fn set_doors(&self, side: Side, status: DoorStatus) {
        self.doors(side).iter().for_each(|d| d.set_status(status));
    }

    /// Times every door on `side` was told to open.
    pub fn opens(&self, side: Side) -> usize {
        self.doors(side).iter().map(|d| d.count(DoorCall::Open)).sum()
    }

    pub fn closes(&self, side: Side) -> usize {
        self.doors(side).iter().map(|d| d.count(DoorCall::Close)).sum()
    }

    /// Forget every recorded door and vent command.
    pub fn clear_commands(&self) {
        self.external_doors
            .iter()
            .chain(&self.internal_doors)
            .for_each(MockDoor::clear_calls);
        self.external_vent.clear_writes();
        self.internal_vent.clear_writes();
    }

    /// Blocks tagged by the usual convention.
    pub fn blocks(&self) -> Vec<Block> {
        let z = &self.name;
        let mut blocks = Vec::new();
        for (i, d) in self.external_doors.iter().enumerate() {
            blocks.push(Block::new(
                format!("{z} Outer Door {i}"),
                format!("{z} external"),
                Hardware::Door(Box::new(d.clone())),
            ));
        }
        for (i, d) in self.internal_doors.iter().enumerate() {
            blocks.push(Block::new(
                format!("{z} Inner Door {i}"),
                format!("{z} internal"),
                Hardware::Door(Box::new(d.clone())),
            ));
        }
        blocks.push(Block::new(
            format!("{z} Outer Vent"),
            format!("{z} external"),
            Hardware::Vent(Box::new(self.external_vent.clone())),
        ));
        blocks.push(Block::new(
            format!("{z} Chamber Vent"),
            format!("{z} internal"),
            Hardware::Vent(Box::new(self.internal_vent.clone())),
        ));
        blocks.push(Block::new(
            format!("{z} Sensor"),
            z.clone(),
            Hardware::Sensor(Box::new(self.sensor.clone())),
        ));
        blocks.push(Block::new(
            format!("{z} Light"),
            z.clone(),
            Hardware::Light(Box::new(self.light.clone())),
        ));
        blocks.push(Block::new(
            format!("{z} Panel"),
            z.clone(),
            Hardware::Display(Box::new(self.display.clone())),
        ));
        blocks
    }
}

// ── MockInventory ─────────────────────────────────────────────

#[derive(Default)]
pub struct MockInventory {
    pub blocks: Vec<Block>,
}

#[allow(dead_code)]
impl MockInventory {
    pub fn with_zones(zones: &[&MockZone]) -> Self {
        Self {
            blocks: zones.iter().flat_map(|z| z.blocks()).collect(),
        }
    }
}

impl BlockInventory for MockInventory {
    fn local_blocks(&mut self) -> Vec<Block> {
        std::mem::take(&mut self.blocks)
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AirlockEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AirlockEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AirlockEvent) {
        self.events.push(event.clone());
    }
}
