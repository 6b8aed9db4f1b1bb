//! Fortune-period scoring on top of a Four Pillars chart.
//!
//! This crate provides:
//! - The two-stage period scorer (`score`) with combos and event levels
//! - Decade, year and month timelines (`timeline`)
//! - Volatility, life score and badges over a finished timeline
//! - Deterministic seed-based phrase selection (`text`)
//! - `build_reading`, which runs the whole pipeline for one birth
//!
//! Everything is synchronous and pure; configuration selects behaviour but
//! never mutates the constant tables.

pub mod badge;
pub mod combo;
pub mod config;
pub mod error;
pub mod life;
pub mod reading;
pub mod score;
pub mod text;
pub mod timeline;
pub mod volatility;

pub use badge::{BadgeTone, GlobalBadge, PeriodBadge, global_badges, period_badges};
pub use combo::{Combo, EventLevel, EventLevels, detect_combos, event_levels};
pub use config::{ReadingConfig, ScoringConfig, TimelineConfig};
pub use error::FortuneError;
pub use life::{age_weight, life_score};
pub use reading::{Reading, build_reading};
pub use score::{
    ALL_CATEGORIES, CareerClashMode, Category, CategoryScores, Grade, NatalContext, PeriodScore,
    base_score, classify_career_clash_mode, final_score, grade, provisional_score, score_period,
    score_two_stage, total_score,
};
pub use text::{
    CategoryText, Mulberry32, PeriodText, PhraseBook, PhraseKeys, combo_key, event_key,
    period_seed, phrase_keys, pick_deterministic, render_period, render_reading, score_key,
    seed_hash,
};
pub use timeline::{
    DecadeTimeline, Direction, LuckPeriod, MonthPeriod, MonthTimeline, PeriodInput, PeriodLevel,
    YearPeriod, apply_stem_relation, build_decades, build_months, build_years,
};
pub use volatility::{Volatility, VolatilityLabel, compute_volatility};
