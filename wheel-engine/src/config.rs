use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Highest frame rate a host is asked to deliver.
pub const MAX_FRAME_RATE: u32 = 1000;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub spin: SpinConfig,
    #[serde(default)]
    pub wheel: WheelConfig,
    #[serde(default)]
    pub host: HostConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinConfig {
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u32,
    /// Full turns the ball is wound back before easing onto the target.
    #[serde(default = "default_spin_turns")]
    pub spin_turns: f64,
    /// Eased progress at which the ball starts dropping towards the resting radius.
    #[serde(default = "default_drop_threshold")]
    pub drop_threshold: f64,
    #[serde(default = "default_true")]
    pub radial_drop: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelConfig {
    #[serde(default = "default_wheel_radius")]
    pub wheel_radius: f64,
    #[serde(default = "default_outer_wall_width")]
    pub outer_wall_width: f64,
    #[serde(default = "default_ball_radius")]
    pub ball_radius: f64,
    #[serde(default = "default_ball_drop_inset")]
    pub ball_drop_inset: f64,
    #[serde(default = "default_label_inset")]
    pub label_inset: f64,
    /// Depth of the pocket ring, measured in from `wheel_radius`.
    #[serde(default = "default_pocket_depth")]
    pub pocket_depth: f64,
    #[serde(default = "default_hub_radius")]
    pub hub_radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostConfig {
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_render_padding")]
    pub padding: f64,
    #[serde(default = "default_red")]
    pub red: String,
    #[serde(default = "default_black")]
    pub black: String,
    #[serde(default = "default_green")]
    pub green: String,
    #[serde(default = "default_wood")]
    pub wood: String,
    #[serde(default = "default_track")]
    pub track: String,
    #[serde(default = "default_hub")]
    pub hub: String,
    #[serde(default = "default_divider")]
    pub divider: String,
    #[serde(default = "default_ball")]
    pub ball: String,
}

fn default_true() -> bool { true }

fn default_duration_ms() -> u32 { 5000 }
fn default_spin_turns() -> f64 { 10.0 }
fn default_drop_threshold() -> f64 { 0.9 }

fn default_wheel_radius() -> f64 { 150.0 }
fn default_outer_wall_width() -> f64 { 20.0 }
fn default_ball_radius() -> f64 { 5.0 }
fn default_ball_drop_inset() -> f64 { 10.0 }
fn default_label_inset() -> f64 { 20.0 }
fn default_pocket_depth() -> f64 { 30.0 }
fn default_hub_radius() -> f64 { 50.0 }

fn default_frame_rate() -> u32 { 60 }

fn default_render_padding() -> f64 { 20.0 }
fn default_red() -> String { "#c62828".to_string() }
fn default_black() -> String { "#1b1b1b".to_string() }
fn default_green() -> String { "#2e7d32".to_string() }
fn default_wood() -> String { "#8b4513".to_string() }
fn default_track() -> String { "#3a3a3a".to_string() }
fn default_hub() -> String { "#ffd700".to_string() }
fn default_divider() -> String { "#5d3a1a".to_string() }
fn default_ball() -> String { "#ffffff".to_string() }

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_duration_ms(),
            spin_turns: default_spin_turns(),
            drop_threshold: default_drop_threshold(),
            radial_drop: default_true(),
        }
    }
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            wheel_radius: default_wheel_radius(),
            outer_wall_width: default_outer_wall_width(),
            ball_radius: default_ball_radius(),
            ball_drop_inset: default_ball_drop_inset(),
            label_inset: default_label_inset(),
            pocket_depth: default_pocket_depth(),
            hub_radius: default_hub_radius(),
        }
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self { frame_rate: default_frame_rate() }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            padding: default_render_padding(),
            red: default_red(),
            black: default_black(),
            green: default_green(),
            wood: default_wood(),
            track: default_track(),
            hub: default_hub(),
            divider: default_divider(),
            ball: default_ball(),
        }
    }
}

impl SpinConfig {
    /// Angle the free spin starts from: `spin_turns` full turns, 20π by default.
    pub fn spin_multiplier(&self) -> f64 {
        self.spin_turns * TAU
    }

    pub fn duration_ms(&self) -> f64 {
        f64::from(self.duration_ms.max(1))
    }
}

impl WheelConfig {
    /// Radius the ball circles at while it is still spinning freely.
    pub fn outer_ball_radius(&self) -> f64 {
        self.wheel_radius + self.outer_wall_width / 2.0
    }

    /// Radius the ball settles at inside the pocket ring.
    pub fn resting_radius(&self) -> f64 {
        self.wheel_radius - self.ball_drop_inset
    }

    pub fn label_radius(&self) -> f64 {
        self.wheel_radius - self.label_inset
    }

    pub fn rim_radius(&self) -> f64 {
        self.wheel_radius + self.outer_wall_width
    }

    /// Radius of the wooden cone inside the pocket ring.
    pub fn cone_radius(&self) -> f64 {
        (self.wheel_radius - self.pocket_depth).max(0.0)
    }

    fn is_usable(&self) -> bool {
        let lengths = [
            self.wheel_radius,
            self.outer_wall_width,
            self.ball_radius,
            self.ball_drop_inset,
            self.label_inset,
            self.pocket_depth,
            self.hub_radius,
        ];
        lengths.iter().all(|v| v.is_finite() && *v >= 0.0)
            && self.resting_radius() > 0.0
            && self.label_radius() > 0.0
            && self.hub_radius <= self.cone_radius()
    }
}

impl HostConfig {
    /// Interval between frames on the host clock.
    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / f64::from(self.frame_rate.max(1))
    }
}

impl Config {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("Failed to parse config")?;
        Ok(config.normalized())
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    fn normalized(mut self) -> Self {
        if !(0.0..1.0).contains(&self.spin.drop_threshold) {
            warn!(
                "drop_threshold {} outside [0, 1), using {}",
                self.spin.drop_threshold,
                default_drop_threshold()
            );
            self.spin.drop_threshold = default_drop_threshold();
        }
        if !self.spin.spin_turns.is_finite() || self.spin.spin_turns < 0.0 {
            warn!(
                "spin_turns {} is not a usable turn count, using {}",
                self.spin.spin_turns,
                default_spin_turns()
            );
            self.spin.spin_turns = default_spin_turns();
        }
        if !self.wheel.is_usable() {
            warn!("Wheel dimensions {:?} do not fit together, using the default wheel", self.wheel);
            self.wheel = WheelConfig::default();
        }
        if !(1..=MAX_FRAME_RATE).contains(&self.host.frame_rate) {
            warn!(
                "frame_rate {} outside 1..={}, using {}",
                self.host.frame_rate,
                MAX_FRAME_RATE,
                default_frame_rate()
            );
            self.host.frame_rate = default_frame_rate();
        }
        if !self.render.padding.is_finite() || self.render.padding < 0.0 {
            warn!(
                "padding {} is not usable, using {}",
                self.render.padding,
                default_render_padding()
            );
            self.render.padding = default_render_padding();
        }
        self
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("roulette-wheel").join("config.toml"))
}

pub fn load_config() -> Config {
    match default_config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("No config directory available, using default config");
            Config::default()
        }
    }
}

pub fn load_config_from(path: &Path) -> Config {
    let contents = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(_) => {
            warn!("Could not read config file at {}, using defaults", path.display());
            return Config::default();
        }
    };

    match Config::from_toml_str(&contents) {
        Ok(config) => {
            tracing::info!("Loaded config from {}", path.display());
            config
        }
        Err(e) => {
            warn!("{:#}, using defaults", e);
            Config::default()
        }
    }
}
