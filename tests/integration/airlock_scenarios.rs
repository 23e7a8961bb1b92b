//! Airlock cycle scenarios, door safety-close and status rendering.
//!
//! Each test builds one zone from mock blocks, drives it through
//! `request_*` and `update`, and asserts on the commands the mocks saw.

use airlock::airlock::Airlock;
use airlock::app::events::AirlockEvent;
use airlock::app::ports::{COLOUR_GREEN, COLOUR_RED, COLOUR_YELLOW, DoorStatus};
use airlock::classify::partition;
use airlock::config::SystemConfig;
use airlock::fsm::{RequestOutcome, RequestState, Side};
use airlock::status::AirlockStatus;

use crate::mock_hw::{MockZone, RecordingSink};

const ZONE: &str = "Airlock 1";

fn make_with(zone: &MockZone, config: &SystemConfig) -> (Airlock, RecordingSink) {
    let mut parts = partition(zone.blocks(), &[zone.name.clone()]);
    let hw = parts.remove(0);
    let mut airlock = Airlock::new(&zone.name, hw, config);
    let mut sink = RecordingSink::new();
    airlock.start(&mut sink);
    (airlock, sink)
}

fn make(zone: &MockZone) -> (Airlock, RecordingSink) {
    make_with(zone, &SystemConfig::default())
}

// ── Exit sequence ─────────────────────────────────────────────

#[test]
fn exit_cycle_depressurizes_then_opens_outer_doors() {
    let zone = MockZone::new(ZONE, 1.0, 0.0);
    let (mut airlock, mut sink) = make(&zone);

    assert_eq!(airlock.request_external(&mut sink), RequestOutcome::Pending);
    assert_eq!(airlock.state(), RequestState::ExternalCycle);
    assert_eq!(zone.internal_vent.writes(), vec![true]);
    assert_eq!(zone.opens(Side::External), 0);

    // Chamber still venting.
    zone.internal_vent.set_oxygen(0.5);
    airlock.update(&mut sink);
    assert_eq!(airlock.state(), RequestState::ExternalCycle);
    assert_eq!(zone.opens(Side::External), 0);

    zone.internal_vent.set_oxygen(0.15);
    airlock.update(&mut sink);
    assert_eq!(airlock.state(), RequestState::Idle);
    assert_eq!(zone.opens(Side::External), 2);
    assert_eq!(zone.opens(Side::Internal), 0);

    let completed = sink.count(|e| {
        matches!(
            e,
            AirlockEvent::CycleCompleted {
                side: Side::External,
                ..
            }
        )
    });
    assert_eq!(completed, 1);
    assert_eq!(
        sink.count(|e| matches!(e, AirlockEvent::CycleStarted { .. })),
        1
    );
}

#[test]
fn exit_opens_immediately_when_outside_already_pressurized() {
    let zone = MockZone::new(ZONE, 1.0, 0.9);
    let (mut airlock, mut sink) = make(&zone);

    assert_eq!(airlock.request_external(&mut sink), RequestOutcome::Completed);
    assert_eq!(airlock.state(), RequestState::Idle);
    assert_eq!(zone.opens(Side::External), 2);
    assert!(zone.internal_vent.writes().is_empty());
}

#[test]
fn exit_from_evacuated_chamber_repressurizes_when_outside_has_air() {
    let zone = MockZone::new(ZONE, 0.1, 0.5);
    let (mut airlock, mut sink) = make(&zone);

    assert_eq!(airlock.request_external(&mut sink), RequestOutcome::Pending);
    assert_eq!(zone.internal_vent.writes(), vec![false]);
    assert_eq!(zone.opens(Side::External), 0);
}

// ── Entry sequence ────────────────────────────────────────────

#[test]
fn entry_cycle_pressurizes_then_opens_inner_doors() {
    let zone = MockZone::new(ZONE, 0.0, 0.0);
    let (mut airlock, mut sink) = make(&zone);

    assert_eq!(airlock.request_internal(&mut sink), RequestOutcome::Pending);
    assert_eq!(airlock.state(), RequestState::InternalCycle);
    assert_eq!(zone.internal_vent.writes(), vec![false]);

    zone.internal_vent.set_oxygen(0.5);
    airlock.update(&mut sink);
    assert_eq!(airlock.state(), RequestState::InternalCycle);
    assert_eq!(zone.opens(Side::Internal), 0);

    zone.internal_vent.set_oxygen(0.8);
    airlock.update(&mut sink);
    assert_eq!(airlock.state(), RequestState::Idle);
    assert_eq!(zone.opens(Side::Internal), 2);
    assert_eq!(zone.opens(Side::External), 0);
}

// ── Conflicts and guards ──────────────────────────────────────

#[test]
fn internal_request_during_exit_cycle_is_dropped() {
    let zone = MockZone::new(ZONE, 1.0, 0.0);
    let (mut airlock, mut sink) = make(&zone);
    airlock.request_external(&mut sink);
    zone.clear_commands();
    sink.clear();

    assert_eq!(airlock.request_internal(&mut sink), RequestOutcome::Dropped);
    assert_eq!(airlock.state(), RequestState::ExternalCycle);
    assert!(zone.internal_vent.writes().is_empty());
    assert_eq!(zone.opens(Side::Internal) + zone.opens(Side::External), 0);
    assert_eq!(
        sink.events,
        vec![AirlockEvent::RequestDropped {
            zone: ZONE.into(),
            side: Side::Internal,
            state: RequestState::ExternalCycle,
        }]
    );
}

#[test]
fn exit_request_with_inner_doors_open_is_noop() {
    let zone = MockZone::new(ZONE, 1.0, 0.0);
    let (mut airlock, mut sink) = make(&zone);
    zone.set_doors(Side::Internal, DoorStatus::Open);

    assert_eq!(airlock.request_external(&mut sink), RequestOutcome::Dropped);
    assert_eq!(airlock.state(), RequestState::Idle);
    assert!(zone.internal_vent.writes().is_empty());
    assert_eq!(zone.opens(Side::External), 0);
}

#[test]
fn moving_doors_also_block_the_opposite_side() {
    let zone = MockZone::new(ZONE, 1.0, 0.0);
    let (mut airlock, mut sink) = make(&zone);
    zone.internal_doors[0].set_status(DoorStatus::Closing);
    assert_eq!(airlock.request_external(&mut sink), RequestOutcome::Dropped);

    zone.internal_doors[0].set_status(DoorStatus::Closed);
    zone.external_doors[1].set_status(DoorStatus::Opening);
    assert_eq!(airlock.request_internal(&mut sink), RequestOutcome::Dropped);
    assert_eq!(airlock.state(), RequestState::Idle);
}

#[test]
fn undefined_chamber_reading_takes_no_action() {
    let zone = MockZone::new(ZONE, f32::NAN, 0.0);
    let (mut airlock, mut sink) = make(&zone);
    assert_eq!(airlock.status(), AirlockStatus::Unknown);

    for _ in 0..3 {
        assert_eq!(airlock.request_external(&mut sink), RequestOutcome::Pending);
        airlock.update(&mut sink);
    }
    assert_eq!(airlock.state(), RequestState::ExternalCycle);
    assert!(zone.internal_vent.writes().is_empty());
    assert_eq!(zone.opens(Side::External) + zone.opens(Side::Internal), 0);
}

#[test]
fn undefined_outside_reading_waits() {
    let zone = MockZone::new(ZONE, 0.1, f32::INFINITY);
    let (mut airlock, mut sink) = make(&zone);

    assert_eq!(airlock.request_external(&mut sink), RequestOutcome::Pending);
    airlock.update(&mut sink);
    assert_eq!(airlock.state(), RequestState::ExternalCycle);
    assert!(zone.internal_vent.writes().is_empty());
    assert_eq!(zone.opens(Side::External), 0);
}

// ── Door safety-close ─────────────────────────────────────────

#[test]
fn open_door_closed_on_tick_after_threshold() {
    let zone = MockZone::new(ZONE, 1.0, 0.0);
    let (mut airlock, mut sink) = make(&zone);
    zone.external_doors[0].set_status(DoorStatus::Open);

    airlock.update(&mut sink);
    assert_eq!(zone.closes(Side::External), 0);
    airlock.update(&mut sink);
    assert_eq!(zone.closes(Side::External), 1);
    assert_eq!(
        airlock.doors(Side::External).open_ticks().collect::<Vec<_>>(),
        vec![0, 0]
    );
    assert_eq!(
        sink.count(|e| matches!(
            e,
            AirlockEvent::DoorsForcedClosed {
                side: Side::External,
                count: 1,
                ..
            }
        )),
        1
    );
}

#[test]
fn doors_opened_by_a_cycle_are_still_closed_behind_the_crew() {
    let zone = MockZone::new(ZONE, 1.0, 1.0);
    let (mut airlock, mut sink) = make(&zone);
    assert_eq!(airlock.request_external(&mut sink), RequestOutcome::Completed);
    zone.set_doors(Side::External, DoorStatus::Open);

    airlock.update(&mut sink);
    airlock.update(&mut sink);
    assert_eq!(zone.closes(Side::External), 2);
}

#[test]
fn larger_threshold_keeps_doors_open_longer() {
    let zone = MockZone::new(ZONE, 1.0, 0.0);
    let config = SystemConfig {
        door_close_after_ticks: 3,
        ..SystemConfig::default()
    };
    let (mut airlock, mut sink) = make_with(&zone, &config);
    zone.internal_doors[1].set_status(DoorStatus::Open);

    for _ in 0..3 {
        airlock.update(&mut sink);
    }
    assert_eq!(zone.closes(Side::Internal), 0);
    airlock.update(&mut sink);
    assert_eq!(zone.closes(Side::Internal), 1);
}

#[test]
fn presence_does_not_hold_doors_by_default() {
    let zone = MockZone::new(ZONE, 1.0, 0.0);
    let (mut airlock, mut sink) = make(&zone);
    zone.sensor.set(true);
    zone.internal_doors[0].set_status(DoorStatus::Open);

    airlock.update(&mut sink);
    airlock.update(&mut sink);
    assert_eq!(zone.closes(Side::Internal), 1);
}

#[test]
fn presence_holds_doors_when_configured() {
    let zone = MockZone::new(ZONE, 1.0, 0.0);
    let config = SystemConfig {
        hold_doors_while_occupied: true,
        ..SystemConfig::default()
    };
    let (mut airlock, mut sink) = make_with(&zone, &config);
    zone.sensor.set(true);
    zone.internal_doors[0].set_status(DoorStatus::Open);

    for _ in 0..5 {
        airlock.update(&mut sink);
    }
    assert!(airlock.presence_detected());
    assert_eq!(zone.closes(Side::Internal), 0);

    zone.sensor.set(false);
    airlock.update(&mut sink);
    assert_eq!(zone.closes(Side::Internal), 1);
}

// ── Status rendering ──────────────────────────────────────────

#[test]
fn status_panel_shows_percentages_and_colour() {
    let zone = MockZone::new(ZONE, 1.0, 0.0);
    let (mut airlock, mut sink) = make(&zone);

    assert_eq!(
        zone.display.text.borrow().as_str(),
        "Airlock 1\n--Oxygen level--\n Inside: 100% Outside: 0%\nAir pressurized"
    );
    assert_eq!(zone.display.background.get(), COLOUR_GREEN);

    zone.internal_vent.set_oxygen(0.456);
    airlock.update(&mut sink);
    assert!(zone.display.text.borrow().contains("Inside: 45%"));
    assert!(zone.display.text.borrow().ends_with("Pressure equalizing"));
    assert_eq!(zone.display.background.get(), COLOUR_YELLOW);
    assert_eq!(zone.light.colour.get(), COLOUR_YELLOW);
    assert!(zone.light.blink.get() > 0.0);
}

#[test]
fn undefined_reading_renders_as_alarm() {
    let zone = MockZone::new(ZONE, f32::NAN, 0.0);
    let (_airlock, sink) = make(&zone);

    let text = zone.display.text.borrow().clone();
    assert!(text.contains("Inside: --%"));
    assert!(text.ends_with("Status undefined"));
    assert_eq!(zone.light.colour.get(), COLOUR_RED);
    assert!(sink.events.iter().any(|e| matches!(
        e,
        AirlockEvent::Status(p) if p.status == AirlockStatus::Unknown
    )));
}

#[test]
fn diagnostic_echo_lists_every_block() {
    let zone = MockZone::new(ZONE, 1.0, 0.0);
    let (airlock, _) = make(&zone);
    let echo = airlock.to_string();
    assert_eq!(echo.lines().count(), 9);
    assert!(echo.lines().any(|l| l == "Airlock 1 Chamber Vent"));
    assert_eq!(airlock.block_names().len(), 9);
}
