use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pattern-network")]
#[command(
    author,
    version,
    about = "Render a network of natural patterns as an image and export it as JSON"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config file (searches upward for .pattern-network.toml by default)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Pattern catalog file (.toml, .yaml or .json) replacing the built-in patterns
    #[arg(long, global = true, env = "PATTERN_NETWORK_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Output directory (overrides config)
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write JSON logs to this file (rotated daily)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the graph, render the image and export the JSON data
    #[command(visible_alias = "gen")]
    Generate {
        /// Only export the JSON data
        #[arg(long)]
        skip_image: bool,

        /// Fail when relationships reference uncategorized patterns
        #[arg(long)]
        strict: bool,
    },

    /// Render only the network image
    Render {
        /// Image path (defaults to <output-dir>/pattern_network.png)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export only the network data as JSON
    Export {
        /// JSON path (defaults to <output-dir>/pattern_network.json)
        #[arg(short, long, conflicts_with = "stdout")]
        output: Option<PathBuf>,

        /// Print the document instead of writing a file
        #[arg(long)]
        stdout: bool,
    },

    /// Report catalog problems: dangling and one-sided relationships, isolated patterns
    Check {
        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Exit with an error when dangling relationships exist
        #[arg(long)]
        strict: bool,
    },

    /// Write a config file and an editable copy of the built-in catalog
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },
}
