//! Configuration
//!
//! Tunables for the snap panel and the mock reply timing. Every field has a
//! serde default so partial JSON documents and empty environments both work.

use serde::{Deserialize, Serialize};

use crate::error::{ChatError, Result};

/// Snap panel tunables
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Net drag distance (px) a release must exceed to change snap point
    #[serde(default = "default_snap_threshold")]
    pub snap_threshold_px: f64,

    /// Scale applied to motion dragged past the fully-open bound
    #[serde(default = "default_damping")]
    pub damping: f64,

    /// Panel height as a fraction of the viewport height
    #[serde(default = "default_full_height_ratio")]
    pub full_height_ratio: f64,

    /// Fraction of the viewport the panel covers when half open
    #[serde(default = "default_half_visible_ratio")]
    pub half_visible_ratio: f64,

    /// Extra travel past the bottom edge; must cover the sheet's shadow
    /// (see [`SHEET_SHADOW_EXTENT_PX`])
    #[serde(default = "default_hidden_overshoot")]
    pub hidden_overshoot_px: f64,
}

fn default_snap_threshold() -> f64 { 60.0 }
fn default_damping() -> f64 { 0.2 }
fn default_full_height_ratio() -> f64 { 0.92 }
fn default_half_visible_ratio() -> f64 { 0.5 }
fn default_hidden_overshoot() -> f64 { 40.0 }

/// How far the sheet's `box-shadow` reaches above its top edge
/// (`0 -8px 24px`: 8px offset plus 24px blur)
pub const SHEET_SHADOW_EXTENT_PX: f64 = 32.0;

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            snap_threshold_px: default_snap_threshold(),
            damping: default_damping(),
            full_height_ratio: default_full_height_ratio(),
            half_visible_ratio: default_half_visible_ratio(),
            hidden_overshoot_px: default_hidden_overshoot(),
        }
    }
}

impl PanelConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.snap_threshold_px.is_finite() && self.snap_threshold_px > 0.0) {
            return Err(ChatError::Config(format!(
                "snap_threshold_px must be positive, got {}",
                self.snap_threshold_px
            )));
        }
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(ChatError::Config(format!(
                "damping must be within [0, 1], got {}",
                self.damping
            )));
        }
        for (name, ratio) in [
            ("full_height_ratio", self.full_height_ratio),
            ("half_visible_ratio", self.half_visible_ratio),
        ] {
            if !(ratio > 0.0 && ratio <= 1.0) {
                return Err(ChatError::Config(format!(
                    "{} must be within (0, 1], got {}",
                    name, ratio
                )));
            }
        }
        if !(self.hidden_overshoot_px.is_finite() && self.hidden_overshoot_px >= 0.0) {
            return Err(ChatError::Config(format!(
                "hidden_overshoot_px must be non-negative, got {}",
                self.hidden_overshoot_px
            )));
        }
        Ok(())
    }
}

/// Mock reply latency window
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyConfig {
    #[serde(default = "default_min_delay_ms")]
    pub min_delay_ms: u64,

    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

fn default_min_delay_ms() -> u64 { 600 }
fn default_max_delay_ms() -> u64 { 1800 }

impl Default for ReplyConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: default_min_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

impl ReplyConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_delay_ms > self.max_delay_ms {
            return Err(ChatError::Config(format!(
                "min_delay_ms ({}) exceeds max_delay_ms ({})",
                self.min_delay_ms, self.max_delay_ms
            )));
        }
        Ok(())
    }
}

/// Top-level configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatConfig {
    #[serde(default)]
    pub panel: PanelConfig,

    #[serde(default)]
    pub replies: ReplyConfig,
}

impl ChatConfig {
    /// Read overrides from `CHATUI_*` environment variables.
    ///
    /// Unset or unparsable variables fall back to the defaults; the result is
    /// validated like [`ChatConfig::from_json`].
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Build from any `CHATUI_*` variable source, then validate
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        fn parsed<T: std::str::FromStr>(raw: Option<String>) -> Option<T> {
            raw.and_then(|v| v.trim().parse().ok())
        }

        let defaults = Self::default();
        let config = Self {
            panel: PanelConfig {
                snap_threshold_px: parsed(lookup("CHATUI_SNAP_THRESHOLD_PX"))
                    .unwrap_or(defaults.panel.snap_threshold_px),
                damping: parsed(lookup("CHATUI_DAMPING")).unwrap_or(defaults.panel.damping),
                ..defaults.panel
            },
            replies: ReplyConfig {
                min_delay_ms: parsed(lookup("CHATUI_REPLY_MIN_DELAY_MS"))
                    .unwrap_or(defaults.replies.min_delay_ms),
                max_delay_ms: parsed(lookup("CHATUI_REPLY_MAX_DELAY_MS"))
                    .unwrap_or(defaults.replies.max_delay_ms),
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.panel.validate()?;
        self.replies.validate()
    }
}
