//! Fuzz target: trigger argument parsing and dispatch
//!
//! Feeds arbitrary UTF-8 into `CoreSystem::run` as a trigger against a
//! simulated two-zone grid.
//!
//! Invariants checked:
//! - No panics under any input
//! - A successful parse always names a configured zone or is rejected
//!   with `UnknownZone`
//! - The two cycles are never both active after the call
//!
//! cargo fuzz run fuzz_trigger

#![no_main]

use airlock::adapters::sim::SimGrid;
use airlock::app::commands::{AirlockCommand, UpdateSource};
use airlock::app::events::AirlockEvent;
use airlock::app::ports::EventSink;
use airlock::app::service::CoreSystem;
use airlock::config::SystemConfig;
use airlock::error::Error;
use libfuzzer_sys::fuzz_target;

struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &AirlockEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let Ok(argument) = std::str::from_utf8(data) else {
        return;
    };

    let config = SystemConfig {
        zones: vec!["Airlock 1".into(), "Airlock 10".into()],
        ..SystemConfig::default()
    };
    let mut grid = SimGrid::new();
    for zone in &config.zones {
        grid.add_standard_zone(zone);
    }
    let Ok(mut core) = CoreSystem::new(&mut grid, config) else {
        return;
    };
    let mut sink = NullSink;

    let parsed = AirlockCommand::parse(argument);
    let result = core.run(argument, UpdateSource::Trigger, &mut sink);

    match (parsed, result) {
        (Err(_), Ok(_)) => panic!("unparseable trigger accepted: {argument:?}"),
        (Ok(cmd), Err(Error::UnknownZone(_))) => assert!(core.zone(cmd.zone()).is_none()),
        (Ok(_), Err(e)) => panic!("parsed trigger rejected: {e}"),
        _ => {}
    }
});
