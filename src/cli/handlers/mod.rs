mod check;
mod export;
mod generate;
mod init;
mod render;

pub use check::handle_check;
pub use export::handle_export;
pub use generate::handle_generate;
pub use init::handle_init;
pub use render::handle_render;

use crate::catalog::Catalog;
use crate::config::NetworkConfig;
use crate::error::NetworkError;
use crate::graph::{BuildReport, PatternGraph};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Common context passed to all command handlers
pub struct CommandContext {
    pub config: NetworkConfig,
    pub root: PathBuf,
    pub catalog: Catalog,
}

impl CommandContext {
    /// Resolve config, output directory and catalog from the global flags.
    ///
    /// Relative flag paths are taken from `cwd`; relative config paths from
    /// the project root.
    pub fn load(
        cwd: &Path,
        config_path: Option<&Path>,
        catalog_path: Option<&Path>,
        output_dir: Option<&Path>,
    ) -> Result<Self> {
        let (mut config, root) = match config_path {
            Some(path) => NetworkConfig::load(&cwd.join(path))
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => NetworkConfig::discover(cwd).context("Failed to load configuration")?,
        };

        if let Some(dir) = output_dir {
            config.network.output_dir = cwd.join(dir).to_string_lossy().into_owned();
        }

        let catalog_file = catalog_path
            .map(|p| cwd.join(p))
            .or_else(|| config.catalog_path(&root));
        let catalog = match catalog_file {
            Some(path) => Catalog::load(&path)
                .with_context(|| format!("Failed to load catalog from {}", path.display()))?,
            None => Catalog::builtin(),
        };

        Ok(Self {
            config,
            root,
            catalog,
        })
    }

    pub fn output_dir(&self) -> PathBuf {
        self.config.output_dir(&self.root)
    }

    /// Build the graph, failing in strict mode when relationships were dropped.
    pub fn build_graph(&self, strict: bool) -> Result<(PatternGraph, BuildReport)> {
        let (graph, report) = PatternGraph::build_with_report(&self.catalog);
        if (strict || self.config.network.strict) && !report.is_clean() {
            return Err(NetworkError::DanglingRelationships(report.dropped.len()).into());
        }
        Ok((graph, report))
    }
}
