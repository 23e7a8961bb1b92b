//! Composition root.
//!
//! [`CoreSystem`] is built once at startup from the host's block inventory
//! and configuration.  It owns one [`Airlock`] per configured zone and
//! forwards the host's tick and trigger callbacks to them.
//!
//! ```text
//!  BlockInventory ──▶ classify ──▶ ┌─────────────────────┐ ──▶ EventSink
//!                                  │     CoreSystem      │
//!  run(arg, source) ─────────────▶ │  Airlock × zones    │
//!                                  └─────────────────────┘
//! ```

use log::{debug, info};

use crate::airlock::Airlock;
use crate::classify::partition;
use crate::config::SystemConfig;
use crate::error::{Error, Result};
use crate::fsm::RequestOutcome;

use super::commands::{AirlockCommand, UpdateSource};
use super::events::AirlockEvent;
use super::ports::{BlockInventory, EventSink};

pub struct CoreSystem {
    zones: Vec<Airlock>,
    config: SystemConfig,
    tick_count: u64,
}

impl CoreSystem {
    /// Validate `config`, classify the inventory and build every zone.
    pub fn new(inventory: &mut impl BlockInventory, config: SystemConfig) -> Result<Self> {
        config.validate()?;
        let blocks = inventory.local_blocks();
        debug!("classifying {} blocks into {} zones", blocks.len(), config.zones.len());

        let zones = partition(blocks, &config.zones)
            .into_iter()
            .zip(&config.zones)
            .map(|(hw, name)| Airlock::new(name, hw, &config))
            .collect();

        Ok(Self {
            zones,
            config,
            tick_count: 0,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        for zone in &mut self.zones {
            zone.start(sink);
        }
        info!("core system started with {} zones", self.zones.len());
    }

    // ── Host entry point ──────────────────────────────────────

    /// Dispatch one host invocation.  The configured update cadence ticks
    /// every zone, a trigger is parsed and routed, everything else is
    /// ignored.
    pub fn run(
        &mut self,
        argument: &str,
        source: UpdateSource,
        sink: &mut impl EventSink,
    ) -> Result<Option<RequestOutcome>> {
        if source.is_tick(self.config.update_frequency) {
            self.update(sink);
            return Ok(None);
        }
        match source {
            UpdateSource::Trigger => self.handle_trigger(argument, sink).map(Some),
            _ => Ok(None),
        }
    }

    /// Tick every zone.
    pub fn update(&mut self, sink: &mut impl EventSink) {
        self.tick_count += 1;
        for zone in &mut self.zones {
            zone.update(sink);
        }
    }

    /// Parse and apply a trigger argument.
    pub fn handle_trigger(
        &mut self,
        argument: &str,
        sink: &mut impl EventSink,
    ) -> Result<RequestOutcome> {
        let cmd = AirlockCommand::parse(argument)?;
        self.handle_command(&cmd, sink)
    }

    pub fn handle_command(
        &mut self,
        cmd: &AirlockCommand,
        sink: &mut impl EventSink,
    ) -> Result<RequestOutcome> {
        let side = cmd.side();
        let zone = self
            .zone_mut(cmd.zone())
            .ok_or_else(|| Error::UnknownZone(cmd.zone().to_string()))?;
        sink.emit(&AirlockEvent::TriggerReceived {
            zone: zone.name().to_string(),
            side,
        });
        Ok(zone.request(side, sink))
    }

    // ── Queries ───────────────────────────────────────────────

    /// Look up a zone by case-insensitive name.
    pub fn zone(&self, name: &str) -> Option<&Airlock> {
        let key = name.to_lowercase();
        self.zones.iter().find(|z| z.name().to_lowercase() == key)
    }

    pub fn zone_mut(&mut self, name: &str) -> Option<&mut Airlock> {
        let key = name.to_lowercase();
        self.zones.iter_mut().find(|z| z.name().to_lowercase() == key)
    }

    pub fn zones(&self) -> &[Airlock] {
        &self.zones
    }

    /// Ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }
}
