use crate::error::{NetworkError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project configuration file, searched upward from the working directory.
pub const CONFIG_FILE: &str = ".pattern-network.toml";

/// Largest canvas side, in pixels.
pub const MAX_IMAGE_SIDE_PX: u32 = 20_000;

/// Catalog file seeded by `init`.
pub const DEFAULT_CATALOG_FILE: &str = "patterns.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default)]
    pub network: NetworkSettings,

    #[serde(default)]
    pub layout: LayoutSettings,

    #[serde(default)]
    pub image: ImageSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSettings {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    #[serde(default = "default_image_name")]
    pub image_name: String,

    #[serde(default = "default_data_name")]
    pub data_name: String,

    /// Catalog file replacing the built-in patterns, relative to the project root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,

    /// Treat relationships to uncategorized patterns as an error.
    #[serde(default)]
    pub strict: bool,
}

fn default_output_dir() -> String {
    "docs/visualizations".to_string()
}

fn default_image_name() -> String {
    "pattern_network.png".to_string()
}

fn default_data_name() -> String {
    "pattern_network.json".to_string()
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            image_name: default_image_name(),
            data_name: default_data_name(),
            catalog: None,
            strict: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutSettings {
    #[serde(default = "default_seed")]
    pub seed: u64,

    #[serde(default = "default_k")]
    pub k: f64,

    #[serde(default = "default_iterations")]
    pub iterations: usize,

    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_seed() -> u64 {
    42
}

fn default_k() -> f64 {
    0.3
}

fn default_iterations() -> usize {
    50
}

fn default_threshold() -> f64 {
    1e-4
}

impl LayoutSettings {
    pub fn validate(&self) -> Result<()> {
        if !(self.k.is_finite() && self.k > 0.0) {
            return Err(NetworkError::Config(format!(
                "layout.k must be a positive number, got {}",
                self.k
            )));
        }
        if !(self.threshold.is_finite() && self.threshold >= 0.0) {
            return Err(NetworkError::Config(format!(
                "layout.threshold must be a non-negative number, got {}",
                self.threshold
            )));
        }
        Ok(())
    }
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            k: default_k(),
            iterations: default_iterations(),
            threshold: default_threshold(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageSettings {
    #[serde(default = "default_width_in")]
    pub width_in: f64,

    #[serde(default = "default_height_in")]
    pub height_in: f64,

    #[serde(default = "default_dpi")]
    pub dpi: u32,

    /// TrueType font for labels; common system fonts are tried when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
}

fn default_width_in() -> f64 {
    16.0
}

fn default_height_in() -> f64 {
    12.0
}

fn default_dpi() -> u32 {
    300
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            width_in: default_width_in(),
            height_in: default_height_in(),
            dpi: default_dpi(),
            font: None,
        }
    }
}

impl ImageSettings {
    /// Canvas size in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = f64::from(self.dpi);
        (
            (self.width_in * dpi).round() as u32,
            (self.height_in * dpi).round() as u32,
        )
    }

    /// Convert typographic points to pixels at this resolution.
    pub fn points_to_px(&self, points: f64) -> f64 {
        points * f64::from(self.dpi) / 72.0
    }

    pub fn validate(&self) -> Result<()> {
        if self.dpi == 0 {
            return Err(NetworkError::Config("image.dpi must be positive".to_string()));
        }
        if !(self.width_in > 0.0 && self.height_in > 0.0) {
            return Err(NetworkError::Config(
                "image width and height must be positive".to_string(),
            ));
        }
        let dpi = f64::from(self.dpi);
        let max = f64::from(MAX_IMAGE_SIDE_PX);
        if !(self.width_in * dpi <= max && self.height_in * dpi <= max) {
            return Err(NetworkError::Config(format!(
                "image is {:.0}x{:.0} px, at most {} px per side is supported",
                self.width_in * dpi,
                self.height_in * dpi,
                MAX_IMAGE_SIDE_PX
            )));
        }
        Ok(())
    }
}

impl NetworkConfig {
    /// Load the nearest config file above `start_path`, or defaults rooted at
    /// `start_path` when there is none.
    pub fn discover(start_path: &Path) -> Result<(Self, PathBuf)> {
        match Self::find_config_file(start_path) {
            Some(path) => Self::load(&path),
            None => {
                tracing::debug!("No {} found, using defaults", CONFIG_FILE);
                Ok((Self::default(), start_path.to_path_buf()))
            }
        }
    }

    /// Load a specific config file. The project root is its parent directory.
    pub fn load(config_path: &Path) -> Result<(Self, PathBuf)> {
        let content = std::fs::read_to_string(config_path)?;
        let config: NetworkConfig = toml::from_str(&content)?;
        config.layout.validate()?;
        config.image.validate()?;
        let project_root = config_path
            .parent()
            .ok_or_else(|| NetworkError::Config("Config file has no parent directory".to_string()))?
            .to_path_buf();
        tracing::debug!(path = %config_path.display(), "Loaded configuration");
        Ok((config, project_root))
    }

    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path.to_path_buf();
        loop {
            let config_path = current.join(CONFIG_FILE);
            if config_path.exists() {
                return Some(config_path);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    pub fn output_dir(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.network.output_dir)
    }

    pub fn image_path(&self, project_root: &Path) -> PathBuf {
        self.output_dir(project_root).join(&self.network.image_name)
    }

    pub fn data_path(&self, project_root: &Path) -> PathBuf {
        self.output_dir(project_root).join(&self.network.data_name)
    }

    pub fn catalog_path(&self, project_root: &Path) -> Option<PathBuf> {
        self.network
            .catalog
            .as_ref()
            .map(|catalog| project_root.join(catalog))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
