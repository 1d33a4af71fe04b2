//! Media items and the data source they are loaded from
//!
//! # Architecture
//!
//! - `types`: `MediaItem` (immutable, identity = url) and its wire form `MediaRecord`
//! - `source`: one-shot loading of a JSON array of records
//! - `error`: `LoadError`

pub mod error;
pub mod source;
pub mod types;

pub use error::LoadError;
pub use source::{DataSource, JsonFileSource, load_collection, parse_collection};
pub use types::{MediaItem, MediaRecord, parse_date};
