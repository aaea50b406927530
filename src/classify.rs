//! Score classifiers
//!
//! Pure functions from a numeric score to a display label. Every dimension
//! shares one band layout, so the per-dimension work is a table lookup.
//!
//! Note on tiers: the published coding legend has five tiers (0-4) but
//! [`classify`] only has four bands, with `>= 3` covering both tier 3 and
//! tier 4. That merge is kept as-is for compatibility with the existing
//! dashboard text; [`Tiering::Published`] switches to the five-tier legend.

use serde::{Deserialize, Serialize};

use crate::dimension::Dimension;
use crate::error::ScoreError;

/// How dimension scores are turned into labels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tiering {
    /// Bands <1, <2, <3, >=3 with the short dimension labels
    #[default]
    FourBucket,
    /// Published tiers 0..=4 with the coding headlines
    Published,
}

const ECONOMIC_BANDS: [&str; 7] = [
    "Far-Left",
    "Left",
    "Center-Left",
    "Center",
    "Center-Right",
    "Right",
    "Far-Right",
];

/// Upper bounds (exclusive) for the social bands; the last band is open
const SOCIAL_BOUNDS: [f64; 4] = [2.0, 4.0, 7.0, 9.0];
const SOCIAL_BANDS: [&str; 5] = [
    "Very Liberal",
    "Liberal",
    "Moderate",
    "Conservative",
    "Very Conservative",
];

fn check(score: f64) -> Result<f64, ScoreError> {
    if score.is_finite() && score >= 0.0 {
        Ok(score)
    } else {
        Err(ScoreError::Invalid { score })
    }
}

/// Band index 0..=3 for a dimension score
pub fn band(score: f64) -> Result<usize, ScoreError> {
    let score = check(score)?;
    Ok((score.floor() as usize).min(3))
}

/// Published tier 0..=4 for a dimension score
pub fn published_tier(score: f64) -> Result<usize, ScoreError> {
    let score = check(score)?;
    Ok((score.floor() as usize).min(4))
}

/// Four-band label for `score` on `dimension`
pub fn classify(dimension: Dimension, score: f64) -> Result<&'static str, ScoreError> {
    Ok(dimension.spec().tier_labels[band(score)?])
}

/// Label for `score` under the chosen tiering
pub fn classify_with(
    tiering: Tiering,
    dimension: Dimension,
    score: f64,
) -> Result<&'static str, ScoreError> {
    match tiering {
        Tiering::FourBucket => classify(dimension, score),
        Tiering::Published => Ok(dimension.spec().coding[published_tier(score)?].headline),
    }
}

/// Economic left-right position, unit-width bands over [0, 7)
pub fn classify_economic(score: f64) -> Result<&'static str, ScoreError> {
    let score = check(score)?;
    Ok(ECONOMIC_BANDS[(score.floor() as usize).min(ECONOMIC_BANDS.len() - 1)])
}

/// Social liberal-conservative position
pub fn classify_social(score: f64) -> Result<&'static str, ScoreError> {
    let score = check(score)?;
    let idx = SOCIAL_BOUNDS
        .iter()
        .position(|&bound| score < bound)
        .unwrap_or(SOCIAL_BOUNDS.len());
    Ok(SOCIAL_BANDS[idx])
}
