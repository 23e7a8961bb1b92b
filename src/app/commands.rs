//! Inbound commands to the controller.
//!
//! The host delivers string triggers of the form `"<zone> requestExternal"`
//! or `"<zone> requestInternal"`, plus periodic update callbacks tagged with
//! an [`UpdateSource`].  This module turns both into typed values.

use crate::config::UpdateFrequency;
use crate::error::{Error, Result};
use crate::fsm::Side;

const VERB_EXTERNAL: &str = "requestexternal";
const VERB_INTERNAL: &str = "requestinternal";

/// A parsed trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AirlockCommand {
    /// Cycle the named zone so its outer doors open.
    RequestExternal { zone: String },
    /// Cycle the named zone so its inner doors open.
    RequestInternal { zone: String },
}

impl AirlockCommand {
    /// Parse `"<zone name> <verb>"`.  The verb is the last whitespace
    /// separated word and is matched case-insensitively; the zone name is
    /// everything before it and may contain spaces.
    pub fn parse(argument: &str) -> Result<Self> {
        let trimmed = argument.trim();
        let Some((zone, verb)) = trimmed.rsplit_once(char::is_whitespace) else {
            return Err(Error::UnknownTrigger(argument.to_string()));
        };
        let zone = zone.trim().to_string();
        if zone.is_empty() {
            return Err(Error::UnknownTrigger(argument.to_string()));
        }
        match verb.to_lowercase().as_str() {
            VERB_EXTERNAL => Ok(Self::RequestExternal { zone }),
            VERB_INTERNAL => Ok(Self::RequestInternal { zone }),
            _ => Err(Error::UnknownTrigger(argument.to_string())),
        }
    }

    pub fn zone(&self) -> &str {
        match self {
            Self::RequestExternal { zone } | Self::RequestInternal { zone } => zone,
        }
    }

    pub fn side(&self) -> Side {
        match self {
            Self::RequestExternal { .. } => Side::External,
            Self::RequestInternal { .. } => Side::Internal,
        }
    }
}

/// Why the host invoked the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateSource {
    None,
    Terminal,
    Trigger,
    Mod,
    Script,
    Update1,
    Update10,
    Update100,
    Once,
    Igc,
}

impl UpdateSource {
    /// Whether this source is the configured periodic tick.
    pub fn is_tick(self, frequency: UpdateFrequency) -> bool {
        matches!(
            (self, frequency),
            (Self::Update1, UpdateFrequency::Update1)
                | (Self::Update10, UpdateFrequency::Update10)
                | (Self::Update100, UpdateFrequency::Update100)
        )
    }
}

impl From<UpdateFrequency> for UpdateSource {
    fn from(frequency: UpdateFrequency) -> Self {
        match frequency {
            UpdateFrequency::Update1 => Self::Update1,
            UpdateFrequency::Update10 => Self::Update10,
            UpdateFrequency::Update100 => Self::Update100,
        }
    }
}
