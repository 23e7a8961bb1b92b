//! Fuzz target: `SystemConfig::from_json`
//!
//! Invariants checked:
//! - No panics under any byte sequence
//! - A decoded config writes back to JSON and decodes to the same value
//! - `CoreSystem::new` accepts it over an empty grid and starts without
//!   panicking
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use airlock::adapters::sim::SimGrid;
use airlock::app::events::AirlockEvent;
use airlock::app::ports::EventSink;
use airlock::app::service::CoreSystem;
use airlock::config::SystemConfig;
use libfuzzer_sys::fuzz_target;

struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &AirlockEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(config) = SystemConfig::from_json(text) else {
        return;
    };

    let written = serde_json::to_string(&config).expect("decoded config must serialize");
    let reread = SystemConfig::from_json(&written).expect("written config must decode");
    assert_eq!(reread, config);

    let mut grid = SimGrid::new();
    let mut core = CoreSystem::new(&mut grid, config).expect("validated config must build");
    core.start(&mut NullSink);
    assert_eq!(core.zones().len(), reread.zones.len());
});
