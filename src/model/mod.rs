//! Data models for the pattern network.
//!
//! - [`Category`]: the closed set of pattern classifications and their colors
//! - [`PatternNode`]: a pattern as it sits in the built graph

mod pattern;
mod types;

pub use pattern::PatternNode;
pub use types::{Category, UNKNOWN_CATEGORY};
