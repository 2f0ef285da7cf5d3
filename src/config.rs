//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Config file passed with `--config` (TOML)
//! 3. Environment variables: `GALAXYVIEW__<SECTION>__<KEY>`, e.g. `GALAXYVIEW__RENDER__SCALE=1000`

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::ViewerResult;
use crate::registry::{InsertPolicy, TreeRegistry};
use crate::render::{DEFAULT_SCALE, DEFAULT_STAR_RADIUS, Layering, Renderer};
use crate::source::DEFAULT_BASE_URL;

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "GALAXYVIEW";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP viewer binds to
    pub listen: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:8081".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SourceConfig {
    /// Base URL of the tree dump service
    pub base_url: String,
    /// Per-fetch timeout in seconds
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Simulation units per pixel
    pub scale: f64,
    /// Side of the SVG canvas in pixels
    pub svg_size: u32,
    /// Side of the PNG canvas in pixels
    pub png_size: u32,
    pub star_radius: u32,
    pub layering: Layering,
    /// Largest canvas side accepted
    pub max_canvas_side: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            svg_size: 1920 * 8,
            png_size: 16384,
            star_radius: DEFAULT_STAR_RADIUS,
            layering: Layering::default(),
            max_canvas_side: 32768,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RegistryConfig {
    pub policy: InsertPolicy,
    /// Highest tree index accepted; the registry holds at most `max_index + 1` trees
    pub max_index: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            policy: InsertPolicy::default(),
            max_index: 1_000_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BatchConfig {
    /// Directory holding `{i}.json` inputs and receiving `{i}.png` outputs
    pub dir: PathBuf,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { dir: PathBuf::from(".") }
    }
}

/// Unified configuration for galaxyview.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub server: ServerConfig,
    pub source: SourceConfig,
    pub render: RenderConfig,
    pub registry: RegistryConfig,
    pub batch: BatchConfig,
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `path` - Optional TOML file; it must exist when given
    pub fn load(path: Option<&Path>) -> ViewerResult<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Settings::default())?);
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );
        Ok(builder.build()?.try_deserialize()?)
    }

    pub fn listen_addr(&self) -> ViewerResult<SocketAddr> {
        self.server.listen.parse::<SocketAddr>().map_err(|e| {
            config::ConfigError::Message(format!("server.listen {:?}: {e}", self.server.listen)).into()
        })
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.source.timeout_secs)
    }

    pub fn renderer(&self) -> Renderer {
        Renderer::new(self.render.scale, self.render.star_radius, self.render.layering)
    }

    pub fn registry(&self) -> TreeRegistry {
        TreeRegistry::new(self.registry.policy, self.registry.max_index)
    }
}
