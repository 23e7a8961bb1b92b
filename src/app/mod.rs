//! Application core boundary.
//!
//! Port traits in [`ports`], typed inbound commands and outbound events,
//! and the [`service::CoreSystem`] composition root.  All interaction with
//! host hardware happens through the port traits, so the whole core runs
//! against mocks in tests.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
