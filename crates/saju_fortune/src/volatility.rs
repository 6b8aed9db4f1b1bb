//! Volatility statistics over a score sequence.

use serde::Serialize;

/// Standard deviation that saturates the normalized spread.
pub const STD_SCALE: f64 = 18.0;
/// Range that saturates the normalized spread.
pub const RANGE_SCALE: f64 = 60.0;

const STD_WEIGHT: f64 = 0.7;
const RANGE_WEIGHT: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VolatilityLabel {
    #[default]
    Stable,
    Normal,
    Swingy,
    Volatile,
}

impl VolatilityLabel {
    pub const fn from_score(score: u8) -> Self {
        match score {
            0..=25 => Self::Stable,
            26..=50 => Self::Normal,
            51..=75 => Self::Swingy,
            _ => Self::Volatile,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Volatility {
    pub mean: f64,
    /// Population standard deviation.
    pub std: f64,
    pub range: f64,
    /// `round(100·(0.7·clamp(std/18) + 0.3·clamp(range/60)))`.
    pub volatility_score: u8,
    pub stability_score: u8,
    pub label: VolatilityLabel,
}

/// Statistics of `scores`; an empty slice yields zeros and `Stable`.
pub fn compute_volatility(scores: &[f64]) -> Volatility {
    if scores.is_empty() {
        return Volatility {
            stability_score: 100,
            ..Volatility::default()
        };
    }
    let n = scores.len() as f64;
    let mean = scores.iter().sum::<f64>() / n;
    let var = scores.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    let std = var.sqrt();
    let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    let std_norm = (std / STD_SCALE).clamp(0.0, 1.0);
    let range_norm = (range / RANGE_SCALE).clamp(0.0, 1.0);
    let volatility_score = (100.0 * (STD_WEIGHT * std_norm + RANGE_WEIGHT * range_norm)).round() as u8;

    Volatility {
        mean,
        std,
        range,
        volatility_score,
        stability_score: 100 - volatility_score,
        label: VolatilityLabel::from_score(volatility_score),
    }
}
