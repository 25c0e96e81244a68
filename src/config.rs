//! Engine configuration, loaded from environment variables with fallbacks.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_ITEM_SIZE, SELECTION_LINE_WIDTH, SELECTION_OUTLINE_SCALE};

/// Tuning knobs for item placement and selection rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Size given to glyphs added by a drop.
    pub default_item_size: f64,
    /// Outline side length as a multiple of the rendered font size.
    pub outline_scale: f64,
    /// Outline stroke width at zoom 1.0.
    pub outline_line_width: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_item_size: DEFAULT_ITEM_SIZE,
            outline_scale: SELECTION_OUTLINE_SCALE,
            outline_line_width: SELECTION_LINE_WIDTH,
        }
    }
}

impl EngineConfig {
    /// Read `EMOJIART_DEFAULT_ITEM_SIZE`, `EMOJIART_OUTLINE_SCALE`, and
    /// `EMOJIART_OUTLINE_LINE_WIDTH`, keeping defaults for unset or invalid values.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            default_item_size: positive(&lookup, "EMOJIART_DEFAULT_ITEM_SIZE", defaults.default_item_size),
            outline_scale: positive(&lookup, "EMOJIART_OUTLINE_SCALE", defaults.outline_scale),
            outline_line_width: positive(&lookup, "EMOJIART_OUTLINE_LINE_WIDTH", defaults.outline_line_width),
        }
    }
}

fn positive<F>(lookup: &F, key: &str, default: f64) -> f64
where
    F: Fn(&str) -> Option<String>,
{
    match env_parse(lookup, key, default) {
        v if v > 0.0 && v.is_finite() => v,
        v => {
            tracing::warn!(key, value = v, default, "config: ignoring non-positive value");
            default
        }
    }
}

pub(crate) fn env_parse<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + Copy,
{
    match lookup(key).map(|raw| raw.trim().parse::<T>()) {
        Some(Ok(value)) => value,
        _ => default,
    }
}
