//! Decimation settings

use crate::selection::{Policy, MIN_STEP};
use pathdecim_core::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest accepted stride
pub const MAX_STEP: u32 = 1000;

pub const DEFAULT_STEP: u32 = 2;

pub const DEFAULT_DISTANCE: f32 = 0.5;

/// Which selector to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecimateMode {
    /// Keep every Nth point plus the endpoints
    #[default]
    #[serde(alias = "STEP")]
    Step,
    /// Keep points spaced by a minimum distance plus the endpoints
    #[serde(alias = "DIST")]
    Dist,
}

impl fmt::Display for DecimateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecimateMode::Step => f.write_str("step"),
            DecimateMode::Dist => f.write_str("dist"),
        }
    }
}

impl FromStr for DecimateMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "step" | "stride" => Ok(DecimateMode::Step),
            "dist" | "distance" => Ok(DecimateMode::Dist),
            other => Err(Error::InvalidData(format!(
                "unknown decimation mode '{}' (expected 'step' or 'dist')",
                other
            ))),
        }
    }
}

/// User-facing decimation settings.
///
/// Values are taken as given and clamped when turned into a [`Policy`]:
/// `step` into `[2, 1000]`, `distance` to at least `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecimateConfig {
    pub mode: DecimateMode,
    pub step: u32,
    pub distance: f32,
}

impl Default for DecimateConfig {
    fn default() -> Self {
        Self {
            mode: DecimateMode::Step,
            step: DEFAULT_STEP,
            distance: DEFAULT_DISTANCE,
        }
    }
}

impl DecimateConfig {
    /// Stride settings with the given step
    pub fn stride(step: u32) -> Self {
        Self {
            mode: DecimateMode::Step,
            step,
            ..Self::default()
        }
    }

    /// Minimum distance settings with the given threshold
    pub fn min_distance(distance: f32) -> Self {
        Self {
            mode: DecimateMode::Dist,
            distance,
            ..Self::default()
        }
    }

    /// A copy with every field inside its accepted range
    pub fn clamped(&self) -> Self {
        let distance = if self.distance.is_nan() {
            0.0
        } else {
            self.distance.max(0.0)
        };
        Self {
            mode: self.mode,
            step: self.step.clamp(MIN_STEP as u32, MAX_STEP),
            distance,
        }
    }

    /// The selection policy for the active mode
    pub fn policy(&self) -> Policy {
        let c = self.clamped();
        match c.mode {
            DecimateMode::Step => Policy::Stride {
                step: c.step as usize,
            },
            DecimateMode::Dist => Policy::MinDistance {
                threshold: c.distance,
            },
        }
    }
}
