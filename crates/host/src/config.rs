//! Configuration management for the cardspace host.
//!
//! Configuration is loaded from TOML files in the following locations (in order):
//! 1. The platform config directory (`ProjectDirs`), e.g.
//!    `~/.config/cardspace/config.toml` on Linux
//! 2. `~/.config/cardspace/config.toml` (Unix-style, for platforms whose config dir differs)
//! 3. `./config.toml` (current directory, for development)

use anyhow::{Context, Result};
use cardspace_core_layout::config::{
    CARD_SNAP_THRESHOLD, DRAG_THRESHOLD, HEADER_HEIGHT, SNAP_GRID, SNAP_THRESHOLD,
};
use cardspace_core_layout::{EngineConfig, LayoutMode, Padding};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::Level;

/// Main configuration structure for cardspace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Snapping thresholds and grid.
    pub snap: SnapConfig,
    /// Workspace padding and visibility margin.
    pub padding: PaddingConfig,
    /// Layout mode and card sizing.
    pub layout: LayoutConfig,
    /// Behavior configuration.
    pub behavior: BehaviorConfig,
}

/// Snapping configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    /// Distance from a workspace edge that enters a docking zone.
    #[serde(default = "default_snap_threshold")]
    pub snap_threshold: f64,

    /// Distance at which card edges align with each other.
    #[serde(default = "default_card_snap_threshold")]
    pub card_snap_threshold: f64,

    /// Grid cell size in pixels.
    #[serde(default = "default_grid_size")]
    pub grid_size: f64,

    /// Whether drops land on the grid.
    #[serde(default)]
    pub grid_enabled: bool,

    /// Pointer travel before a press becomes a drag.
    #[serde(default = "default_drag_threshold")]
    pub drag_threshold: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            snap_threshold: default_snap_threshold(),
            card_snap_threshold: default_card_snap_threshold(),
            grid_size: default_grid_size(),
            grid_enabled: false,
            drag_threshold: default_drag_threshold(),
        }
    }
}

/// Padding configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddingConfig {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,

    /// Horizontal pixels of a card that must stay inside the workspace.
    #[serde(default = "default_min_visible")]
    pub min_visible: f64,
}

impl Default for PaddingConfig {
    fn default() -> Self {
        Self {
            top: 0.0,
            bottom: 0.0,
            left: 0.0,
            right: 0.0,
            min_visible: default_min_visible(),
        }
    }
}

/// Layout-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Mode the workspace starts in (freeflow, snap, focus).
    #[serde(default)]
    pub mode: LayoutMode,

    /// Card header height in pixels.
    #[serde(default = "default_header_height")]
    pub header_height: f64,

    /// Offset between cascaded new cards.
    #[serde(default = "default_cascade_offset")]
    pub cascade_offset: f64,

    /// Minimum card width in pixels.
    #[serde(default = "default_min_card_width")]
    pub min_card_width: f64,

    /// Minimum card height in pixels.
    #[serde(default = "default_min_card_height")]
    pub min_card_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            mode: LayoutMode::default(),
            header_height: default_header_height(),
            cascade_offset: default_cascade_offset(),
            min_card_width: default_min_card_width(),
            min_card_height: default_min_card_height(),
        }
    }
}

/// Behavior-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl BehaviorConfig {
    /// Parsed log level. Unknown values fall back to info.
    pub fn level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }
}

fn default_snap_threshold() -> f64 {
    SNAP_THRESHOLD
}

fn default_card_snap_threshold() -> f64 {
    CARD_SNAP_THRESHOLD
}

fn default_grid_size() -> f64 {
    SNAP_GRID
}

fn default_drag_threshold() -> f64 {
    DRAG_THRESHOLD
}

fn default_min_visible() -> f64 {
    Padding::default().min_visible
}

fn default_header_height() -> f64 {
    HEADER_HEIGHT
}

fn default_cascade_offset() -> f64 {
    EngineConfig::default().cascade_offset
}

fn default_min_card_width() -> f64 {
    EngineConfig::default().min_card_width
}

fn default_min_card_height() -> f64 {
    EngineConfig::default().min_card_height
}

fn default_log_level() -> String {
    "info".to_string()
}

/// A value that was out of range and got replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigWarning {
    pub field: String,
    pub message: String,
}

fn check_range(
    value: &mut f64,
    default: f64,
    allow_zero: bool,
    field: &str,
    warnings: &mut Vec<ConfigWarning>,
) {
    let ok = value.is_finite() && if allow_zero { *value >= 0.0 } else { *value > 0.0 };
    if !ok {
        warnings.push(ConfigWarning {
            field: field.to_string(),
            message: format!(
                "{} is not a {} number, using {}",
                value,
                if allow_zero { "non-negative" } else { "positive" },
                default
            ),
        });
        *value = default;
    }
}

impl Config {
    /// Load configuration from standard locations.
    ///
    /// Returns default config if no file is found.
    pub fn load() -> Result<Self> {
        let paths = config_paths();

        for path in &paths {
            if path.exists() {
                tracing::info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Replace out-of-range values with their defaults.
    pub fn validate(&mut self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        let snap = &mut self.snap;
        check_range(
            &mut snap.snap_threshold,
            default_snap_threshold(),
            true,
            "snap.snap_threshold",
            &mut warnings,
        );
        check_range(
            &mut snap.card_snap_threshold,
            default_card_snap_threshold(),
            true,
            "snap.card_snap_threshold",
            &mut warnings,
        );
        check_range(
            &mut snap.grid_size,
            default_grid_size(),
            false,
            "snap.grid_size",
            &mut warnings,
        );
        check_range(
            &mut snap.drag_threshold,
            default_drag_threshold(),
            true,
            "snap.drag_threshold",
            &mut warnings,
        );

        let padding = &mut self.padding;
        check_range(&mut padding.top, 0.0, true, "padding.top", &mut warnings);
        check_range(&mut padding.bottom, 0.0, true, "padding.bottom", &mut warnings);
        check_range(&mut padding.left, 0.0, true, "padding.left", &mut warnings);
        check_range(&mut padding.right, 0.0, true, "padding.right", &mut warnings);
        check_range(
            &mut padding.min_visible,
            default_min_visible(),
            true,
            "padding.min_visible",
            &mut warnings,
        );

        let layout = &mut self.layout;
        check_range(
            &mut layout.header_height,
            default_header_height(),
            false,
            "layout.header_height",
            &mut warnings,
        );
        check_range(
            &mut layout.cascade_offset,
            default_cascade_offset(),
            true,
            "layout.cascade_offset",
            &mut warnings,
        );
        check_range(
            &mut layout.min_card_width,
            default_min_card_width(),
            false,
            "layout.min_card_width",
            &mut warnings,
        );
        check_range(
            &mut layout.min_card_height,
            default_min_card_height(),
            false,
            "layout.min_card_height",
            &mut warnings,
        );

        let level = self.behavior.log_level.to_lowercase();
        if !["trace", "debug", "info", "warn", "error"].contains(&level.as_str()) {
            warnings.push(ConfigWarning {
                field: "behavior.log_level".to_string(),
                message: format!("unknown level '{}', using info", self.behavior.log_level),
            });
            self.behavior.log_level = default_log_level();
        }

        warnings
    }

    /// The engine settings this configuration describes.
    pub fn to_engine_config(&self) -> EngineConfig {
        EngineConfig {
            snap_threshold: self.snap.snap_threshold,
            card_snap_threshold: self.snap.card_snap_threshold,
            grid_size: self.snap.grid_size,
            grid_enabled: self.snap.grid_enabled,
            drag_threshold: self.snap.drag_threshold,
            header_height: self.layout.header_height,
            padding: Padding {
                top: self.padding.top,
                bottom: self.padding.bottom,
                left: self.padding.left,
                right: self.padding.right,
                min_visible: self.padding.min_visible,
            },
            cascade_offset: self.layout.cascade_offset,
            min_card_width: self.layout.min_card_width,
            min_card_height: self.layout.min_card_height,
        }
    }
}

/// Get all possible config file paths in priority order.
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(proj_dirs) = ProjectDirs::from("com", "cardspace", "cardspace") {
        paths.push(proj_dirs.config_dir().join("config.toml"));
    }

    if let Some(home) = dirs_home() {
        let unix_style = home.join(".config").join("cardspace").join("config.toml");
        if !paths.contains(&unix_style) {
            paths.push(unix_style);
        }
    }

    paths.push(PathBuf::from("config.toml"));

    paths
}

/// Get the user's home directory.
fn dirs_home() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf())
}
