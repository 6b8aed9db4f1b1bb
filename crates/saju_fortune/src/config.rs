//! Scoring and timeline configuration.
//!
//! Every field has a default; a JSON file only needs the fields it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FortuneError, config};
use crate::score::CareerClashMode;

/// Largest accepted `end_age`.
pub const MAX_END_AGE: u32 = 120;
/// Smallest accepted `end_age`; the first decade can start as late as 10.
pub const MIN_END_AGE: u32 = 11;

/// Toggles for the optional score corrections.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub ten_god_correction: bool,
    pub strength_correction: bool,
    /// Looser excess thresholds for the day-stem element.
    pub day_stem_relief: bool,
    /// Multiplier on the +8/−5 strength correction.
    pub strength_scale: f64,
    /// Forces a career clash mode instead of classifying one.
    pub career_clash_override: Option<CareerClashMode>,
    /// Share of the decade stem's +8/−10 relation points added to each
    /// decade category.
    pub stem_relation_scale: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            ten_god_correction: true,
            strength_correction: true,
            day_stem_relief: true,
            strength_scale: 0.25,
            career_clash_override: None,
            stem_relation_scale: 0.5,
        }
    }
}

/// Blend, smoothing and overheat parameters of the timeline builders.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Decades and years stop before this age.
    pub end_age: u32,
    /// Weight of the (transition-blended) decade score in a year score.
    pub year_decade_weight: f64,
    /// Decade, year mix and month raw weights of a month score.
    pub month_weights: [f64; 3],
    /// Weight of the previous decade 0, 1 and 2 years after a decade starts.
    pub transition_alpha: [f64; 3],
    /// Share of the previous year's raw score in the first two months.
    pub carry_alpha: f64,
    /// Weight of the current month against the previous smoothed month.
    pub smoothing: f64,
    /// Smoothing weight used when the month shows a crash combo.
    pub crash_smoothing: f64,
    pub overheat_threshold: u8,
    pub overheat_streak: u32,
    pub overheat_penalty: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            end_age: 80,
            year_decade_weight: 0.55,
            month_weights: [0.45, 0.35, 0.20],
            transition_alpha: [0.65, 0.40, 0.20],
            carry_alpha: 0.25,
            smoothing: 0.75,
            crash_smoothing: 0.90,
            overheat_threshold: 85,
            overheat_streak: 3,
            overheat_penalty: 5.0,
        }
    }
}

/// Full pipeline configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadingConfig {
    pub scoring: ScoringConfig,
    pub timeline: TimelineConfig,
}

fn check_unit(name: &str, v: f64) -> Result<(), FortuneError> {
    if (0.0..=1.0).contains(&v) {
        Ok(())
    } else {
        Err(config(format!("{name} must be in [0, 1], got {v}")))
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), FortuneError> {
        if !self.strength_scale.is_finite() || self.strength_scale < 0.0 {
            return Err(config(format!(
                "strength_scale must be finite and non-negative, got {}",
                self.strength_scale
            )));
        }
        check_unit("stem_relation_scale", self.stem_relation_scale)
    }
}

impl TimelineConfig {
    pub fn validate(&self) -> Result<(), FortuneError> {
        if !(MIN_END_AGE..=MAX_END_AGE).contains(&self.end_age) {
            return Err(config(format!(
                "end_age must be in {MIN_END_AGE}..={MAX_END_AGE}, got {}",
                self.end_age
            )));
        }
        check_unit("year_decade_weight", self.year_decade_weight)?;
        for (i, w) in self.month_weights.iter().enumerate() {
            check_unit(&format!("month_weights[{i}]"), *w)?;
        }
        let sum: f64 = self.month_weights.iter().sum();
        if (sum - 1.0).abs() > 1e-9 {
            return Err(config(format!("month_weights must sum to 1, got {sum}")));
        }
        for (i, a) in self.transition_alpha.iter().enumerate() {
            check_unit(&format!("transition_alpha[{i}]"), *a)?;
        }
        check_unit("carry_alpha", self.carry_alpha)?;
        check_unit("smoothing", self.smoothing)?;
        check_unit("crash_smoothing", self.crash_smoothing)?;
        if self.overheat_threshold > 100 {
            return Err(config("overheat_threshold must be at most 100"));
        }
        if self.overheat_streak == 0 {
            return Err(config("overheat_streak must be at least 1"));
        }
        if !(0.0..=100.0).contains(&self.overheat_penalty) {
            return Err(config("overheat_penalty must be in [0, 100]"));
        }
        Ok(())
    }
}

impl ReadingConfig {
    pub fn validate(&self) -> Result<(), FortuneError> {
        self.scoring.validate()?;
        self.timeline.validate()
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> Result<Self, FortuneError> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FortuneError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }
}
