//! Year periods (歲運).

use serde::Serialize;
use tracing::debug;

use saju_base::{BirthInput, year_pillar};

use super::{LuckPeriod, PeriodInput, PeriodLevel, raw_score};
use crate::config::ReadingConfig;
use crate::score::{CategoryScores, NatalContext};

/// One calendar year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearPeriod {
    #[serde(flatten)]
    pub period: LuckPeriod,
    /// Rounded two-stage score of the year pillar alone.
    pub raw: CategoryScores,
    /// Index into the decade list this year was blended with.
    pub decade_index: usize,
}

impl YearPeriod {
    pub fn year(&self) -> i32 {
        self.period.start
    }
}

/// Decade whose age span holds `year`; years past the last decade use it.
pub fn decade_index_for_year(decades: &[LuckPeriod], birth_year: i32, year: i32) -> Option<usize> {
    decades
        .iter()
        .position(|d| (birth_year + d.start..=birth_year + d.end).contains(&year))
        .or_else(|| decades.len().checked_sub(1))
}

/// One entry per calendar year from the first decade's start through
/// `end_age − 1`.
///
/// For the first three years of a decade its categories are pulled toward
/// the previous decade with the transition alphas; the result is blended
/// with the year's own raw score.
#[tracing::instrument(level = "debug", skip_all, fields(birth = %birth.instant))]
pub fn build_years(
    natal: &NatalContext,
    decades: &[LuckPeriod],
    birth: &BirthInput,
    cfg: &ReadingConfig,
) -> Vec<YearPeriod> {
    let Some(first) = decades.first() else {
        return Vec::new();
    };
    let tl = &cfg.timeline;
    let birth_year = birth.instant.year;
    let first_year = birth_year + first.start;
    let last_year = birth_year + tl.end_age as i32 - 1;

    let mut years = Vec::new();
    for y in first_year..=last_year {
        let Some(di) = decade_index_for_year(decades, birth_year, y) else {
            break;
        };
        let decade = &decades[di];
        let pillar = year_pillar(y);
        let (score, raw, mode) = raw_score(natal, pillar, &cfg.scoring);

        let k = y - (birth_year + decade.start);
        let blended = match (usize::try_from(k), di.checked_sub(1)) {
            (Ok(k), Some(prev)) if k < tl.transition_alpha.len() => {
                decades[prev]
                    .categories
                    .blend(&decade.categories, tl.transition_alpha[k])
            }
            _ => decade.categories,
        };
        let cats = blended.blend(&raw, tl.year_decade_weight);

        years.push(YearPeriod {
            period: PeriodInput::new(
                PeriodLevel::Year,
                y.to_string(),
                pillar,
                y..=y,
                cats,
                score.events,
                mode,
            )
            .build(),
            raw,
            decade_index: di,
        });
    }
    debug!(count = years.len(), first_year, last_year, "years built");
    years
}
