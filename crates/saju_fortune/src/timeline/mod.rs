//! Luck-period timelines: decades, years and months.
//!
//! Each stage is a pure function of the natal context, the earlier stages
//! and the configuration, built in the order decades → years → months.

mod decade;
mod month;
mod year;

pub use decade::{DecadeTimeline, Direction, apply_stem_relation, build_decades, start_age};
pub use month::{MONTHS_PER_YEAR, MonthPeriod, MonthTimeline, build_months, month_pillar_of};
pub use year::{YearPeriod, build_years, decade_index_for_year};

use std::ops::RangeInclusive;

use serde::Serialize;

use saju_base::{InteractionEvents, Pillar, StemRelation};

use crate::badge::{PeriodBadge, period_badges};
use crate::combo::{Combo, EventLevels, detect_combos, event_levels};
use crate::config::ScoringConfig;
use crate::score::{
    CareerClashMode, CategoryScores, Grade, NatalContext, PeriodScore, score_two_stage,
};
use crate::text::{PhraseKeys, phrase_keys};

/// Number of entries in best/worst lists.
pub const TOP_N: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodLevel {
    Decade,
    Year,
    Month,
}

impl PeriodLevel {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Decade => "decade",
            Self::Year => "year",
            Self::Month => "month",
        }
    }
}

/// One scored period. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LuckPeriod {
    pub level: PeriodLevel,
    pub label: String,
    pub pillar: Pillar,
    /// Age for decades, calendar year for years, month index for months.
    pub start: i32,
    /// Inclusive, same unit as `start`.
    pub end: i32,
    pub categories: CategoryScores,
    pub total: u8,
    pub grade: Grade,
    pub events: InteractionEvents,
    pub event_levels: EventLevels,
    pub combos: Vec<Combo>,
    pub career_clash_mode: CareerClashMode,
    pub badges: Vec<PeriodBadge>,
    /// Phrase-book keys per category.
    pub phrase_keys: Vec<PhraseKeys>,
    /// Relation of a decade stem to the natal stems.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stem_relation: Option<StemRelation>,
}

/// Inputs of one period; everything else is derived by [`PeriodInput::build`].
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodInput {
    level: PeriodLevel,
    label: String,
    pillar: Pillar,
    span: RangeInclusive<i32>,
    categories: CategoryScores,
    events: InteractionEvents,
    career_clash_mode: CareerClashMode,
    grade_total: Option<u8>,
    combos: Option<Vec<Combo>>,
    overheat: bool,
    stem_relation: Option<StemRelation>,
}

impl PeriodInput {
    pub fn new(
        level: PeriodLevel,
        label: impl Into<String>,
        pillar: Pillar,
        span: RangeInclusive<i32>,
        categories: CategoryScores,
        events: InteractionEvents,
        career_clash_mode: CareerClashMode,
    ) -> Self {
        Self {
            level,
            label: label.into(),
            pillar,
            span,
            categories,
            events,
            career_clash_mode,
            grade_total: None,
            combos: None,
            overheat: false,
            stem_relation: None,
        }
    }

    /// Grade from `total` instead of the final categories.
    pub fn grade_from(mut self, total: u8) -> Self {
        self.grade_total = Some(total);
        self
    }

    /// Use combos detected upstream instead of detecting them again.
    pub fn combos(mut self, combos: Vec<Combo>) -> Self {
        self.combos = Some(combos);
        self
    }

    pub fn overheat(mut self, overheat: bool) -> Self {
        self.overheat = overheat;
        self
    }

    pub fn stem_relation(mut self, relation: StemRelation) -> Self {
        self.stem_relation = Some(relation);
        self
    }

    /// Total, grade, combos, event levels, badges and phrase keys follow
    /// from the final categories unless overridden.
    pub fn build(self) -> LuckPeriod {
        let total = self.categories.total();
        let grade = Grade::from_total(self.grade_total.unwrap_or(total));
        let combos = self
            .combos
            .unwrap_or_else(|| detect_combos(&self.events, &self.categories));
        let event_levels = event_levels(&self.events);
        let phrase_keys = phrase_keys(&self.categories, &event_levels, combos.first().copied());

        let mut period = LuckPeriod {
            level: self.level,
            label: self.label,
            pillar: self.pillar,
            start: *self.span.start(),
            end: *self.span.end(),
            categories: self.categories,
            total,
            grade,
            events: self.events,
            event_levels,
            combos,
            career_clash_mode: self.career_clash_mode,
            badges: Vec::new(),
            phrase_keys,
            stem_relation: self.stem_relation,
        };
        period.badges = period_badges(&period, self.overheat);
        period
    }
}

impl LuckPeriod {
    /// Whether `combo` was detected for this period.
    pub fn has_combo(&self, combo: Combo) -> bool {
        self.combos.contains(&combo)
    }
}

/// Two-stage score of `pillar` with categories rounded.
pub(crate) fn raw_score(
    natal: &NatalContext,
    pillar: Pillar,
    cfg: &ScoringConfig,
) -> (PeriodScore, CategoryScores, CareerClashMode) {
    let (score, mode) = score_two_stage(natal, pillar, cfg);
    let rounded = score.categories.rounded();
    (score, rounded, mode)
}

/// Keys of the three highest (or lowest, with `ascending`) totals.
///
/// Ties go to the larger key.
pub fn top_three<K: Copy + Ord>(entries: impl IntoIterator<Item = (K, u8)>, ascending: bool) -> Vec<K> {
    let mut v: Vec<(K, u8)> = entries.into_iter().collect();
    v.sort_by(|a, b| {
        let by_total = if ascending { a.1.cmp(&b.1) } else { b.1.cmp(&a.1) };
        by_total.then_with(|| b.0.cmp(&a.0))
    });
    v.into_iter().take(TOP_N).map(|(k, _)| k).collect()
}
