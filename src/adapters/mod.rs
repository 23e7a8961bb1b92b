//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements              | Connects to                 |
//! |------------|-------------------------|-----------------------------|
//! | `log_sink` | EventSink               | `log` facade                |
//! | `sim`      | BlockInventory          | In-memory simulated grid    |
//! |            | Door, Vent, Light, ...  |                             |

pub mod log_sink;
pub mod sim;
