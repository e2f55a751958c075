//! Layout geometry constants, with overrides from the environment or a JSON file.

use serde::{Deserialize, Serialize};

pub const DEFAULT_BOX_WIDTH: f64 = 100.0;
pub const DEFAULT_BOX_HEIGHT: f64 = 40.0;
pub const DEFAULT_H_GAP: f64 = 30.0;
pub const DEFAULT_BRANCH_PITCH: f64 = 80.0;
pub const DEFAULT_RAIL_INSET: f64 = 20.0;
pub const DEFAULT_BASE_HEIGHT: f64 = 180.0;
pub const DEFAULT_MIN_WIDTH: f64 = 800.0;

/// Geometry used by the layout engine. All values are in diagram units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Width of one instruction box.
    pub box_width: f64,
    /// Height of one instruction box.
    pub box_height: f64,
    /// Horizontal gap between neighbouring boxes; the horizontal pitch is
    /// `box_width + h_gap`.
    pub h_gap: f64,
    /// Vertical distance between stacked branch paths.
    pub branch_pitch: f64,
    /// Distance of each power rail from its canvas edge.
    pub rail_inset: f64,
    /// Canvas height of a rung without side branches.
    pub base_height: f64,
    /// Narrowest canvas; long rungs grow past it.
    pub min_width: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            box_width: DEFAULT_BOX_WIDTH,
            box_height: DEFAULT_BOX_HEIGHT,
            h_gap: DEFAULT_H_GAP,
            branch_pitch: DEFAULT_BRANCH_PITCH,
            rail_inset: DEFAULT_RAIL_INSET,
            base_height: DEFAULT_BASE_HEIGHT,
            min_width: DEFAULT_MIN_WIDTH,
        }
    }
}

impl LayoutConfig {
    /// Build a config from environment variables, falling back to defaults.
    ///
    /// Optional:
    /// - `LADDER_BOX_WIDTH`: default 100
    /// - `LADDER_BOX_HEIGHT`: default 40
    /// - `LADDER_H_GAP`: default 30
    /// - `LADDER_BRANCH_PITCH`: default 80
    /// - `LADDER_RAIL_INSET`: default 20
    /// - `LADDER_BASE_HEIGHT`: default 180
    /// - `LADDER_MIN_WIDTH`: default 800
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(std::env::var)
    }

    /// Build a config from an arbitrary key lookup, over the defaults.
    ///
    /// Values that are missing, unparsable, or not strictly positive keep
    /// their default.
    #[must_use]
    pub fn from_lookup<F, E>(lookup: F) -> Self
    where
        F: Fn(&'static str) -> Result<String, E>,
    {
        Self::default().with_overrides(&lookup)
    }

    /// Parse a JSON object; missing fields keep their defaults, and fields
    /// that are not strictly positive are reset to their default.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed JSON or mistyped fields.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let parsed: Self = serde_json::from_str(json)?;
        Ok(parsed.validated())
    }

    fn validated(self) -> Self {
        let defaults = Self::default();
        Self {
            box_width: checked_dimension("box_width", self.box_width, defaults.box_width),
            box_height: checked_dimension("box_height", self.box_height, defaults.box_height),
            h_gap: checked_dimension("h_gap", self.h_gap, defaults.h_gap),
            branch_pitch: checked_dimension("branch_pitch", self.branch_pitch, defaults.branch_pitch),
            rail_inset: checked_dimension("rail_inset", self.rail_inset, defaults.rail_inset),
            base_height: checked_dimension("base_height", self.base_height, defaults.base_height),
            min_width: checked_dimension("min_width", self.min_width, defaults.min_width),
        }
    }

    /// Apply environment-style overrides on top of `self`.
    #[must_use]
    pub fn with_overrides<F, E>(self, lookup: &F) -> Self
    where
        F: Fn(&'static str) -> Result<String, E>,
    {
        Self {
            box_width: lookup_dimension(lookup, "LADDER_BOX_WIDTH", self.box_width),
            box_height: lookup_dimension(lookup, "LADDER_BOX_HEIGHT", self.box_height),
            h_gap: lookup_dimension(lookup, "LADDER_H_GAP", self.h_gap),
            branch_pitch: lookup_dimension(lookup, "LADDER_BRANCH_PITCH", self.branch_pitch),
            rail_inset: lookup_dimension(lookup, "LADDER_RAIL_INSET", self.rail_inset),
            base_height: lookup_dimension(lookup, "LADDER_BASE_HEIGHT", self.base_height),
            min_width: lookup_dimension(lookup, "LADDER_MIN_WIDTH", self.min_width),
        }
    }

    /// Horizontal distance from one series box to the next.
    #[must_use]
    pub fn pitch(&self) -> f64 {
        self.box_width + self.h_gap
    }

    /// Width of `count` boxes laid in series, gaps between them included.
    #[must_use]
    pub fn span(&self, count: usize) -> f64 {
        if count == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let count = count as f64;
        count * self.box_width + (count - 1.0) * self.h_gap
    }
}

fn lookup_dimension<F, E>(lookup: &F, key: &'static str, default: f64) -> f64
where
    F: Fn(&'static str) -> Result<String, E>,
{
    let Ok(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<f64>() {
        Ok(value) if is_valid_dimension(value) => value,
        _ => {
            tracing::warn!(key, raw = %raw, default, "ignoring invalid layout override");
            default
        }
    }
}

fn checked_dimension(key: &'static str, value: f64, default: f64) -> f64 {
    if is_valid_dimension(value) {
        return value;
    }
    tracing::warn!(key, value, default, "ignoring invalid layout dimension");
    default
}

fn is_valid_dimension(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
