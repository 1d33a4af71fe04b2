//! Shareable location tokens
//!
//! - `token`: the `"" | "item/<id>"` grammar and its parser
//! - `channel`: the `LocationChannel` capability and `InMemoryLocation`
//! - `sync`: echo-suppressing glue between the viewer and the channel

pub mod channel;
pub mod sync;
pub mod token;

pub use channel::{InMemoryLocation, LocationChannel};
pub use sync::{LocationSync, LocationWriter, SyncDecision};
pub use token::{ITEM_PREFIX, LocationToken, TokenError, parse_identifier};
