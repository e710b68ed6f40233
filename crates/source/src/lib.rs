//! Observation sources for the analytics engine.
//!
//! The engine itself only consumes in-memory rows; this crate models the
//! import boundary: a source trait, an explicit token-bucket rate
//! limiter for tracker APIs, and a JSON-file reference implementation.

#![warn(missing_docs)]

pub mod trait_;
pub mod limiter;
pub mod json_source;

pub use trait_::{ObservationSource, Result, SourceError};
pub use limiter::TokenBucket;
pub use json_source::JsonFileSource;
