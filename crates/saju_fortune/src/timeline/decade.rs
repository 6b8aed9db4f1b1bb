//! Decade periods (大運).
//!
//! Direction follows year-stem polarity and sex: a yang year runs forward
//! for men, a yin year forward for women. The start age counts whole days
//! to the governing solar-term boundary in that direction, three days per
//! year. Decade `i` takes the month pillar advanced `i + 1` steps.
//!
//! A decade stem that combines with a natal stem adds 8 points, one that
//! controls the day stem costs 10; `stem_relation_scale` of that lands on
//! every category.

use serde::Serialize;
use tracing::debug;

use saju_base::{BirthInput, Sex, Stem, StemRelation, stem_relation};
use saju_time::{LocalDateTime, MINUTES_PER_DAY, boundary_after, boundary_at_or_before};

use super::{LuckPeriod, PeriodInput, PeriodLevel, raw_score};
use crate::config::ReadingConfig;
use crate::score::{CategoryScores, NatalContext, clamp_score};

/// Days of offset that count as one year of start age.
pub const DAYS_PER_START_YEAR: i64 = 3;
/// Ages covered by one decade.
pub const DECADE_SPAN: u32 = 10;

/// Cycling direction through the sexagenary cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub const fn from_year_stem(year_stem: Stem, sex: Sex) -> Self {
        let yang = year_stem.polarity().is_yang();
        match (sex, yang) {
            (Sex::Male, true) | (Sex::Female, false) => Self::Forward,
            _ => Self::Backward,
        }
    }

    /// `+1` forward, `-1` backward.
    pub const fn step(self) -> i32 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}

/// Decade sequence with its derivation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecadeTimeline {
    pub direction: Direction,
    pub start_age: u32,
    /// The boundary used for the start age came from the approximation.
    pub start_is_approximate: bool,
    pub decades: Vec<LuckPeriod>,
}

/// Start age and whether the boundary used was approximate.
///
/// Forward counts to the next boundary strictly after birth; backward
/// counts back to the latest boundary at or before it.
pub fn start_age(birth: &LocalDateTime, direction: Direction) -> (u32, bool) {
    let (minutes, approx) = match direction {
        Direction::Forward => {
            let b = boundary_after(birth);
            (birth.minutes_until(&b.instant), b.is_approximate)
        }
        Direction::Backward => {
            let b = boundary_at_or_before(birth);
            (b.instant.minutes_until(birth), b.is_approximate)
        }
    };
    let days = minutes.div_euclid(MINUTES_PER_DAY);
    ((days / DAYS_PER_START_YEAR) as u32, approx)
}

/// Shift every category by the scaled relation points, rounded and clamped.
pub fn apply_stem_relation(
    cats: &CategoryScores,
    relation: StemRelation,
    scale: f64,
) -> CategoryScores {
    let delta = f64::from(relation.points()) * scale;
    CategoryScores::from_fn(|c| clamp_score((cats.get(c) + delta).round()))
}

/// Build and score decades from the start age up to `end_age`.
#[tracing::instrument(level = "debug", skip_all, fields(birth = %birth.instant))]
pub fn build_decades(
    natal: &NatalContext,
    birth: &BirthInput,
    cfg: &ReadingConfig,
) -> DecadeTimeline {
    let direction = Direction::from_year_stem(natal.chart.year.stem, birth.sex);
    let (start, start_is_approximate) = start_age(&birth.instant, direction);
    let end_age = cfg.timeline.end_age;

    let mut decades = Vec::new();
    let mut age = start;
    let mut step = direction.step();
    while age < end_age {
        let next = (age + DECADE_SPAN).min(end_age);
        let pillar = natal.chart.month.advance(step);
        let (score, cats, mode) = raw_score(natal, pillar, &cfg.scoring);
        let relation = stem_relation(pillar.stem, &natal.chart);
        let cats = apply_stem_relation(&cats, relation, cfg.scoring.stem_relation_scale);
        decades.push(
            PeriodInput::new(
                PeriodLevel::Decade,
                format!("{age}-{}", next - 1),
                pillar,
                (age as i32)..=(next as i32 - 1),
                cats,
                score.events,
                mode,
            )
            .stem_relation(relation)
            .build(),
        );
        age = next;
        step += direction.step();
    }

    debug!(?direction, start_age = start, count = decades.len(), "decades built");
    DecadeTimeline {
        direction,
        start_age: start,
        start_is_approximate,
        decades,
    }
}
