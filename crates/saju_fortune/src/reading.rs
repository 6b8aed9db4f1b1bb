//! Full reading: chart → decades → years → months, plus lifetime summaries.

use serde::Serialize;
use tracing::debug;

use saju_base::{
    BirthInput, Chart, ChartStructure, ElementVector, Strength, analyze_structure, build_chart,
};

use crate::badge::{GlobalBadge, global_badges};
use crate::config::ReadingConfig;
use crate::error::FortuneError;
use crate::life::life_score;
use crate::score::NatalContext;
use crate::timeline::{
    DecadeTimeline, MonthTimeline, YearPeriod, build_decades, build_months, build_years,
    top_three,
};
use crate::volatility::{Volatility, compute_volatility};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    pub birth: BirthInput,
    pub chart: Chart,
    /// Some solar-term boundary used for the chart or start age was approximate.
    pub is_approximate: bool,
    pub surface: ElementVector,
    pub hidden: ElementVector,
    pub strength: Strength,
    /// Pattern, ten-god roles and balancing element.
    pub structure: ChartStructure,
    pub decades: DecadeTimeline,
    pub years: Vec<YearPeriod>,
    /// One timeline per entry of `years`, same order.
    pub months: Vec<MonthTimeline>,
    pub life_score: u8,
    /// Over year totals.
    pub volatility: Volatility,
    pub best_years: Vec<i32>,
    pub worst_years: Vec<i32>,
    pub badges: Vec<GlobalBadge>,
}

/// Run the whole pipeline for one birth.
#[tracing::instrument(level = "debug", skip_all, fields(birth = %birth.instant, sex = %birth.sex))]
pub fn build_reading(birth: &BirthInput, cfg: &ReadingConfig) -> Result<Reading, FortuneError> {
    cfg.validate()?;
    let chart = build_chart(&birth.instant)?;
    let natal = NatalContext::new(&chart.chart);
    let structure = analyze_structure(&natal.chart, &natal.surface, &natal.strength);
    debug!(
        geok = %structure.geok.name(),
        purity = structure.geok.purity,
        yongshin = %structure.yongshin,
        "structure analyzed"
    );

    let decades = build_decades(&natal, birth, cfg);
    let years = build_years(&natal, &decades.decades, birth, cfg);

    let months: Vec<MonthTimeline> = years
        .iter()
        .enumerate()
        .map(|(i, y)| {
            let prev = i.checked_sub(1).and_then(|p| years.get(p));
            build_months(&natal, y, prev, &decades.decades[y.decade_index], cfg)
        })
        .collect();

    let life = life_score(&decades.decades);
    let totals: Vec<f64> = years.iter().map(|y| f64::from(y.period.total)).collect();
    let volatility = compute_volatility(&totals);
    let entries = || years.iter().map(|y| (y.year(), y.period.total));
    let best_years = top_three(entries(), false);
    let worst_years = top_three(entries(), true);
    let badges = global_badges(life, &volatility);

    debug!(life, volatility = volatility.volatility_score, years = years.len(), "reading built");
    Ok(Reading {
        birth: *birth,
        chart: chart.chart,
        is_approximate: chart.is_approximate || decades.start_is_approximate,
        surface: natal.surface,
        hidden: natal.hidden,
        strength: natal.strength,
        structure,
        decades,
        years,
        months,
        life_score: life,
        volatility,
        best_years,
        worst_years,
        badges,
    })
}
