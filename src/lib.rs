//! # pattern-network - a visual map of natural patterns
//!
//! Builds an undirected graph of pattern concepts from a small curated
//! catalog, renders it as a force-directed PNG colored by category, and
//! exports the same graph as `{nodes, links}` JSON for web viewers.
//!
//! ## Quick Start
//!
//! ```bash
//! # Render docs/visualizations/pattern_network.{png,json} from the built-in catalog
//! pattern-network
//!
//! # Seed an editable catalog and config in the current directory
//! pattern-network init
//!
//! # Find relationships that point at uncategorized patterns
//! pattern-network check
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: The pattern table and relationship declarations
//! - [`graph`]: Graph construction from a catalog
//! - [`layout`]: Seeded spring layout
//! - [`render`]: PNG rendering
//! - [`export`]: JSON export
//! - [`config`]: Configuration loading and management
//! - [`error`]: Error types and result aliases

/// Pattern catalog: categories and declared relationships.
pub mod catalog;

/// Command-line interface definitions using clap.
pub mod cli;

/// Configuration loading and management.
///
/// Handles `.pattern-network.toml` files and project discovery.
pub mod config;

/// Error types and result aliases.
///
/// Defines `NetworkError` enum and `Result<T>` type alias.
pub mod error;

/// JSON export of the graph.
pub mod export;

/// Undirected pattern graph built from a catalog.
pub mod graph;

pub mod layout;
pub mod logging;

/// Data models: `Category` and `PatternNode`.
pub mod model;

pub mod render;
