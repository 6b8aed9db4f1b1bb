//! Month periods (月運) of one year.
//!
//! Month `i` is the solar month opened by term `i` (寅 month first). A
//! month's categories blend the decade, the year raw score (carrying part
//! of the previous year's raw into the first two months) and the month's
//! own raw score, then are smoothed against the previous month. A run of
//! high totals marks the month as overheated and costs health.

use serde::Serialize;
use tracing::debug;

use saju_base::{Branch, Pillar, month_pillar, year_pillar};
use saju_time::SolarTerm;

use super::year::YearPeriod;
use super::{LuckPeriod, PeriodInput, PeriodLevel, raw_score, top_three};
use crate::combo::{Combo, detect_combos};
use crate::config::ReadingConfig;
use crate::score::{CategoryScores, NatalContext, clamp_score};

pub const MONTHS_PER_YEAR: u8 = 12;

/// Months that carry part of the previous year.
const CARRY_MONTHS: u8 = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthPeriod {
    #[serde(flatten)]
    pub period: LuckPeriod,
    pub overheat: bool,
}

impl MonthPeriod {
    /// 0 = 寅 month.
    pub fn index(&self) -> u8 {
        self.period.start as u8
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthTimeline {
    pub year: i32,
    pub months: Vec<MonthPeriod>,
    /// Indices of the three highest totals.
    pub best: Vec<u8>,
    /// Indices of the three lowest totals.
    pub worst: Vec<u8>,
}

/// Pillar of month `index` (0 = 寅) in `year`.
pub fn month_pillar_of(year: i32, index: u8) -> Pillar {
    let branch = Branch::from_index(SolarTerm::from_index(index).branch_index());
    month_pillar(year_pillar(year).stem, branch)
}

/// Build the twelve months of `year`.
///
/// `prev_year` supplies the carried raw score; without it the year's own
/// raw is used. `decade` is the decade `year` was blended with.
#[tracing::instrument(level = "debug", skip_all, fields(year = year.year()))]
pub fn build_months(
    natal: &NatalContext,
    year: &YearPeriod,
    prev_year: Option<&YearPeriod>,
    decade: &LuckPeriod,
    cfg: &ReadingConfig,
) -> MonthTimeline {
    let tl = &cfg.timeline;
    let [w_decade, w_year, w_month] = tl.month_weights;
    let prev_raw = prev_year.map_or(year.raw, |p| p.raw);

    let mut months: Vec<MonthPeriod> = Vec::with_capacity(MONTHS_PER_YEAR as usize);
    let mut prev_smoothed: Option<CategoryScores> = None;
    let mut streak = 0u32;

    for mi in 0..MONTHS_PER_YEAR {
        let pillar = month_pillar_of(year.year(), mi);
        let (score, raw, mode) = raw_score(natal, pillar, &cfg.scoring);

        let carry = if mi < CARRY_MONTHS { tl.carry_alpha } else { 0.0 };
        let year_mix = prev_raw.blend(&year.raw, carry);

        let cats = CategoryScores::from_fn(|c| {
            clamp_score(
                (w_decade * decade.categories.get(c)
                    + w_year * year_mix.get(c)
                    + w_month * raw.get(c))
                .round(),
            )
        });

        let combos = detect_combos(&score.events, &cats);
        let crash = combos.contains(&Combo::Crash);

        let smoothed = match prev_smoothed {
            Some(prev) => {
                let a = if crash { tl.crash_smoothing } else { tl.smoothing };
                cats.blend(&prev, a)
            }
            None => cats,
        };

        let total = smoothed.total();
        if total >= tl.overheat_threshold {
            streak += 1;
        } else {
            streak = 0;
        }
        let overheat = streak >= tl.overheat_streak;
        let final_cats = if overheat {
            CategoryScores {
                health: clamp_score(smoothed.health - tl.overheat_penalty),
                ..smoothed
            }
        } else {
            smoothed
        };

        // grade and combos come from before smoothing/penalty
        let period = PeriodInput::new(
            PeriodLevel::Month,
            format!("{}月", pillar.branch.hanja()),
            pillar,
            i32::from(mi)..=i32::from(mi),
            final_cats,
            score.events,
            mode,
        )
        .grade_from(total)
        .combos(combos)
        .overheat(overheat)
        .build();

        months.push(MonthPeriod { period, overheat });
        prev_smoothed = Some(final_cats);
    }

    let totals = || months.iter().map(|m| (m.index(), m.period.total));
    let best = top_three(totals(), false);
    let worst = top_three(totals(), true);
    debug!(year = year.year(), ?best, ?worst, "months built");

    MonthTimeline {
        year: year.year(),
        months,
        best,
        worst,
    }
}
