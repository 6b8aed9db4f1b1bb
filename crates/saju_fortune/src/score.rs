//! Period scoring.
//!
//! A period pillar (decade, year or month) is scored against the natal chart
//! in four categories. Each category is
//!
//! ```text
//! clamp(base + 0.9·element_delta + 4·boost_c + event_c − penalty_c
//!       + health_imbalance + clash_extra_c + ten_god_c + strength, 0, 100)
//! ```
//!
//! Career clash handling depends on a mode classified from a first pass,
//! so scoring runs as `provisional_score` → `classify_career_clash_mode` →
//! `final_score`.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use saju_base::{
    ALL_ELEMENTS, Branch, Chart, Element, ElementVector, InteractionEvents, Pillar, Stem,
    Strength, StrengthLabel, TenGodFamily, element_vector, interaction_events, pillar_vector,
    strength, ten_god,
};

use crate::combo::{Combo, detect_combos};
use crate::config::ScoringConfig;

/// Balanced count per element for an 8-symbol chart.
pub const TARGET_COUNT: f64 = 2.0;
/// Excess threshold for the day-stem element when relief is on.
pub const DAY_STEM_EXCESS_THRESHOLD: f64 = 3.5;

const BASE_MIN: f64 = 40.0;
const BASE_MAX: f64 = 95.0;
const BASE_IMBALANCE_FACTOR: f64 = 12.0;

const DEFICIT_GAIN: f64 = 6.0;
const EXCESS_LOSS: f64 = 4.0;
const ELEMENT_DELTA_WEIGHT: f64 = 0.9;
const BOOST_WEIGHT: f64 = 4.0;
const BOOST_EXCESS_FACTOR: f64 = 0.7;

/// `(soft, hard)` thresholds on the combined natal + period count.
const PENALTY_THRESHOLDS: (f64, f64) = (4.5, 6.0);
const DAY_STEM_PENALTY_THRESHOLDS: (f64, f64) = (5.5, 7.5);
const PENALTY_SOFT: f64 = 6.0;
const PENALTY_HARD: f64 = 10.0;

const HEALTH_IMBALANCE_FACTOR: f64 = 3.0;

const CLASH_PENALTY: f64 = 8.0;
const CLASH_ACCEL: f64 = 6.0;

const STRENGTH_FAVOURED: f64 = 8.0;
const STRENGTH_DISFAVOURED: f64 = -5.0;

/// Category-specific element boost weights, `[category][element]`.
const CATEGORY_WEIGHTS: [[f64; 5]; 4] = [
    [1.2, 1.1, 0.8, 0.6, 0.9],
    [0.7, 0.8, 1.2, 1.1, 1.0],
    [0.8, 1.0, 1.0, 1.2, 0.7],
    [1.0, 1.0, 1.0, 1.0, 1.0],
];

/// Category-specific excess penalty weights, `[category][element]`.
const EXCESS_PENALTY_WEIGHTS: [[f64; 5]; 4] = [
    [1.0, 1.2, 0.8, 1.0, 1.1],
    [0.6, 0.7, 1.1, 0.8, 1.0],
    [0.7, 0.6, 0.8, 1.1, 0.6],
    [1.1, 1.2, 1.1, 0.9, 1.1],
];

/// Multiplier on the shared event delta per category.
const EVENT_WEIGHTS: [f64; 4] = [1.2, 1.0, 0.8, 1.3];

/// Total blend weights: love, money, career, health.
const TOTAL_WEIGHTS: [f64; 4] = [0.25, 0.30, 0.30, 0.15];

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Category {
    Love = 0,
    Money = 1,
    Career = 2,
    Health = 3,
}

pub const ALL_CATEGORIES: [Category; 4] = [
    Category::Love,
    Category::Money,
    Category::Career,
    Category::Health,
];

impl Category {
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Love => "love",
            Self::Money => "money",
            Self::Career => "career",
            Self::Health => "health",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Score per category, 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryScores {
    pub love: f64,
    pub money: f64,
    pub career: f64,
    pub health: f64,
}

impl CategoryScores {
    pub fn from_fn(mut f: impl FnMut(Category) -> f64) -> Self {
        Self {
            love: f(Category::Love),
            money: f(Category::Money),
            career: f(Category::Career),
            health: f(Category::Health),
        }
    }

    pub fn get(&self, c: Category) -> f64 {
        match c {
            Category::Love => self.love,
            Category::Money => self.money,
            Category::Career => self.career,
            Category::Health => self.health,
        }
    }

    #[must_use]
    pub fn map(&self, mut f: impl FnMut(f64) -> f64) -> Self {
        Self::from_fn(|c| f(self.get(c)))
    }

    /// Each category rounded to the nearest integer.
    #[must_use]
    pub fn rounded(&self) -> Self {
        self.map(f64::round)
    }

    /// `round(w·self + (1 − w)·other)` per category, clamped to 0..=100.
    #[must_use]
    pub fn blend(&self, other: &Self, w: f64) -> Self {
        Self::from_fn(|c| clamp_score((w * self.get(c) + (1.0 - w) * other.get(c)).round()))
    }

    /// Weighted total, see [`total_score`].
    pub fn total(&self) -> u8 {
        total_score(self)
    }
}

pub(crate) fn clamp_score(x: f64) -> f64 {
    x.clamp(0.0, 100.0)
}

/// `round(.25 love + .30 money + .30 career + .15 health)`, clamped to 0..=100.
pub fn total_score(cats: &CategoryScores) -> u8 {
    let t: f64 = ALL_CATEGORIES
        .iter()
        .map(|c| TOTAL_WEIGHTS[c.index()] * cats.get(*c))
        .sum();
    clamp_score(t.round()) as u8
}

/// Six-band letter grade of a total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Grade {
    S,
    A,
    B,
    C,
    D,
    E,
}

impl Grade {
    pub const fn from_total(total: u8) -> Self {
        match total {
            90.. => Self::S,
            80..=89 => Self::A,
            65..=79 => Self::B,
            50..=64 => Self::C,
            35..=49 => Self::D,
            _ => Self::E,
        }
    }

    pub const fn letter(self) -> &'static str {
        match self {
            Self::S => "S",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

/// Grade of a total, see [`Grade::from_total`].
pub const fn grade(total: u8) -> Grade {
    Grade::from_total(total)
}

// ---------------------------------------------------------------------------
// Career clash mode
// ---------------------------------------------------------------------------

/// How a clash in the period branch is read for career.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareerClashMode {
    /// Clash as a push for change: career acceleration penalty halved.
    Opportunity,
    #[default]
    Neutral,
    Risk,
}

/// Classify from a provisional pass.
///
/// No clash is always `Neutral`. Otherwise career ≥ 70 with at least one
/// positive event is `Opportunity`; career ≤ 55 with any punishment,
/// breaking or harm is `Risk`.
pub fn classify_career_clash_mode(
    events: &InteractionEvents,
    cats: &CategoryScores,
) -> CareerClashMode {
    if events.clash == 0 {
        return CareerClashMode::Neutral;
    }
    if cats.career >= 70.0 && events.positive() >= 1 {
        CareerClashMode::Opportunity
    } else if cats.career <= 55.0 && events.punishment + events.breaking + events.harm >= 1 {
        CareerClashMode::Risk
    } else {
        CareerClashMode::Neutral
    }
}

// ---------------------------------------------------------------------------
// Natal context
// ---------------------------------------------------------------------------

/// Everything about the natal chart the scorer needs, computed once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NatalContext {
    pub chart: Chart,
    pub surface: ElementVector,
    pub hidden: ElementVector,
    pub branches: [Branch; 4],
    pub day_stem: Stem,
    pub strength: Strength,
}

impl NatalContext {
    pub fn new(chart: &Chart) -> Self {
        Self {
            chart: *chart,
            surface: element_vector(chart, false),
            hidden: element_vector(chart, true),
            branches: chart.branches(),
            day_stem: chart.day_stem(),
            strength: strength(chart),
        }
    }
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Result of scoring one period pillar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodScore {
    pub categories: CategoryScores,
    pub base: f64,
    pub element_delta: f64,
    pub events: InteractionEvents,
    pub combos: Vec<Combo>,
}

/// `clamp(100 − 12·Σ|n − 2|, 40, 95)` over the natal surface vector.
pub fn base_score(surface: &ElementVector) -> f64 {
    (100.0 - BASE_IMBALANCE_FACTOR * surface.imbalance(TARGET_COUNT)).clamp(BASE_MIN, BASE_MAX)
}

/// Signed event sum shared by every category before weighting.
pub fn event_delta(ev: &InteractionEvents) -> f64 {
    6.0 * f64::from(ev.combination) + 8.0 * f64::from(ev.triad) + 8.0 * f64::from(ev.quartet)
        - 8.0 * f64::from(ev.clash)
        - 6.0 * f64::from(ev.punishment)
        - 5.0 * f64::from(ev.breaking)
        - 4.0 * f64::from(ev.harm)
}

/// Ten-god correction per category for a period stem of the given family.
pub const fn ten_god_delta(family: TenGodFamily, category: Category) -> f64 {
    use Category::*;
    use TenGodFamily::*;
    match (category, family) {
        (Money, Wealth) => 2.0,
        (Money, Officer | Output) => 1.0,
        (Money, Peer) => -1.0,
        (Career, Officer) => 2.0,
        (Career, Resource) => 1.5,
        (Career, Output) => 1.0,
        (Love, Officer | Wealth | Output) => 1.0,
        (Love, Peer) => -1.0,
        (Love, Resource) => 0.5,
        (Health, Resource | Peer) => 1.0,
        _ => 0.0,
    }
}

/// Unscaled strength correction: a strong day master favours output and
/// wealth, a weak one favours peers and resource.
pub const fn strength_delta(label: StrengthLabel, family: TenGodFamily) -> f64 {
    use TenGodFamily::*;
    match (label, family) {
        (StrengthLabel::Strong, Output | Wealth) => STRENGTH_FAVOURED,
        (StrengthLabel::Strong, Peer | Resource) => STRENGTH_DISFAVOURED,
        (StrengthLabel::Weak, Peer | Resource) => STRENGTH_FAVOURED,
        (StrengthLabel::Weak, Output | Wealth) => STRENGTH_DISFAVOURED,
        _ => 0.0,
    }
}

fn threshold_for(e: Element, day: Element, relief: bool, normal: f64, day_stem: f64) -> f64 {
    if relief && e == day { day_stem } else { normal }
}

/// Score `pillar` against the natal chart under a fixed career clash mode.
pub fn score_period(
    natal: &NatalContext,
    pillar: Pillar,
    cfg: &ScoringConfig,
    mode: CareerClashMode,
) -> PeriodScore {
    let base = base_score(&natal.surface);
    let day = natal.day_stem.element();
    let relief = cfg.day_stem_relief;

    let mut deficit = [0.0; 5];
    let mut excess = [0.0; 5];
    for e in ALL_ELEMENTS {
        let n = natal.surface[e];
        let th = threshold_for(e, day, relief, TARGET_COUNT, DAY_STEM_EXCESS_THRESHOLD);
        deficit[e.index()] = (TARGET_COUNT - n).max(0.0);
        excess[e.index()] = (n - th).max(0.0);
    }

    let period_v = pillar_vector(pillar);
    let element_delta: f64 = period_v
        .iter()
        .map(|(e, p)| DEFICIT_GAIN * p * deficit[e.index()] - EXCESS_LOSS * p * excess[e.index()])
        .sum();

    let events = interaction_events(&natal.branches, pillar.branch);
    let shared_events = event_delta(&events);

    let combined = natal.surface + period_v;
    let combined_imbalance = combined.imbalance(TARGET_COUNT);

    let clash = f64::from(events.clash);
    let clash_base = -CLASH_PENALTY * clash;
    let clash_accel = if events.clash >= 2 {
        -CLASH_ACCEL * (clash - 1.0)
    } else {
        0.0
    };

    let family = ten_god(natal.day_stem, pillar.stem).family();
    let strength_adj = if cfg.strength_correction {
        strength_delta(natal.strength.label, family) * cfg.strength_scale
    } else {
        0.0
    };

    let categories = CategoryScores::from_fn(|c| {
        let ci = c.index();

        let boost: f64 = period_v
            .iter()
            .map(|(e, p)| {
                let k = e.index();
                CATEGORY_WEIGHTS[ci][k] * p * (deficit[k] - BOOST_EXCESS_FACTOR * excess[k])
            })
            .sum();

        let penalty: f64 = combined
            .iter()
            .map(|(e, n)| {
                let (soft, hard) = if relief && e == day {
                    DAY_STEM_PENALTY_THRESHOLDS
                } else {
                    PENALTY_THRESHOLDS
                };
                EXCESS_PENALTY_WEIGHTS[ci][e.index()]
                    * (PENALTY_SOFT * (n - soft).max(0.0) + PENALTY_HARD * (n - hard).max(0.0))
            })
            .sum();

        let health_imbalance = if c == Category::Health {
            -HEALTH_IMBALANCE_FACTOR * combined_imbalance
        } else {
            0.0
        };

        let clash_extra = if events.clash == 0 {
            0.0
        } else if c == Category::Career && mode == CareerClashMode::Opportunity {
            clash_base + 0.5 * clash_accel
        } else {
            clash_base + clash_accel
        };

        let ten_god_adj = if cfg.ten_god_correction {
            ten_god_delta(family, c)
        } else {
            0.0
        };

        clamp_score(
            base + ELEMENT_DELTA_WEIGHT * element_delta
                + BOOST_WEIGHT * boost
                + EVENT_WEIGHTS[ci] * shared_events
                - penalty
                + health_imbalance
                + clash_extra
                + ten_god_adj
                + strength_adj,
        )
    });

    trace!(%pillar, ?mode, base, element_delta, "period scored");
    let combos = detect_combos(&events, &categories);
    PeriodScore {
        categories,
        base,
        element_delta,
        events,
        combos,
    }
}

/// First pass, always under `Neutral`.
pub fn provisional_score(natal: &NatalContext, pillar: Pillar, cfg: &ScoringConfig) -> PeriodScore {
    score_period(natal, pillar, cfg, CareerClashMode::Neutral)
}

/// Second pass under the classified mode.
pub fn final_score(
    natal: &NatalContext,
    pillar: Pillar,
    cfg: &ScoringConfig,
    mode: CareerClashMode,
) -> PeriodScore {
    score_period(natal, pillar, cfg, mode)
}

/// Both passes. A configured override replaces the classification.
pub fn score_two_stage(
    natal: &NatalContext,
    pillar: Pillar,
    cfg: &ScoringConfig,
) -> (PeriodScore, CareerClashMode) {
    let mode = match cfg.career_clash_override {
        Some(m) => m,
        None => {
            let first = provisional_score(natal, pillar, cfg);
            classify_career_clash_mode(&first.events, &first.categories)
        }
    };
    (final_score(natal, pillar, cfg, mode), mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn natal(idx: [u8; 4]) -> NatalContext {
        NatalContext::new(&Chart {
            year: Pillar::from_index(idx[0]),
            month: Pillar::from_index(idx[1]),
            day: Pillar::from_index(idx[2]),
            hour: Pillar::from_index(idx[3]),
        })
    }

    #[test]
    fn balanced_surface_hits_base_ceiling() {
        let v = ElementVector::from_counts([2.0; 5]);
        assert_eq!(base_score(&v), 95.0);
    }

    #[test]
    fn lopsided_surface_hits_base_floor() {
        let v = ElementVector::from_counts([8.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(base_score(&v), 40.0);
    }

    #[test]
    fn total_weights() {
        let c = CategoryScores {
            love: 80.0,
            money: 60.0,
            career: 70.0,
            health: 50.0,
        };
        // 20 + 18 + 21 + 7.5 = 66.5
        assert_eq!(total_score(&c), 67);
        assert_eq!(grade(67), Grade::B);
    }

    #[test]
    fn grade_bands() {
        let cases = [
            (100, Grade::S),
            (90, Grade::S),
            (89, Grade::A),
            (80, Grade::A),
            (65, Grade::B),
            (64, Grade::C),
            (50, Grade::C),
            (35, Grade::D),
            (34, Grade::E),
            (0, Grade::E),
        ];
        for (t, g) in cases {
            assert_eq!(grade(t), g, "total {t}");
        }
    }

    #[test]
    fn event_delta_signs() {
        let ev = InteractionEvents {
            clash: 1,
            combination: 1,
            punishment: 1,
            breaking: 1,
            harm: 1,
            triad: 1,
            quartet: 1,
        };
        assert_eq!(event_delta(&ev), 6.0 + 8.0 + 8.0 - 8.0 - 6.0 - 5.0 - 4.0);
    }

    #[test]
    fn clash_mode_without_clash_is_neutral() {
        let ev = InteractionEvents {
            combination: 2,
            ..Default::default()
        };
        let cats = CategoryScores::from_fn(|_| 95.0);
        assert_eq!(classify_career_clash_mode(&ev, &cats), CareerClashMode::Neutral);
    }

    #[test]
    fn clash_mode_opportunity_and_risk() {
        let ev = InteractionEvents {
            clash: 1,
            combination: 1,
            ..Default::default()
        };
        let high = CategoryScores::from_fn(|_| 72.0);
        assert_eq!(
            classify_career_clash_mode(&ev, &high),
            CareerClashMode::Opportunity
        );

        let ev = InteractionEvents {
            clash: 1,
            harm: 1,
            ..Default::default()
        };
        let low = CategoryScores::from_fn(|_| 50.0);
        assert_eq!(classify_career_clash_mode(&ev, &low), CareerClashMode::Risk);
        let mid = CategoryScores::from_fn(|_| 60.0);
        assert_eq!(classify_career_clash_mode(&ev, &mid), CareerClashMode::Neutral);
    }

    #[test]
    fn ten_god_table() {
        assert_eq!(ten_god_delta(TenGodFamily::Wealth, Category::Money), 2.0);
        assert_eq!(ten_god_delta(TenGodFamily::Resource, Category::Career), 1.5);
        assert_eq!(ten_god_delta(TenGodFamily::Peer, Category::Love), -1.0);
        assert_eq!(ten_god_delta(TenGodFamily::Officer, Category::Health), 0.0);
    }

    #[test]
    fn strength_table() {
        use StrengthLabel::*;
        assert_eq!(strength_delta(Strong, TenGodFamily::Wealth), 8.0);
        assert_eq!(strength_delta(Strong, TenGodFamily::Resource), -5.0);
        assert_eq!(strength_delta(Weak, TenGodFamily::Peer), 8.0);
        assert_eq!(strength_delta(Weak, TenGodFamily::Output), -5.0);
        assert_eq!(strength_delta(Balanced, TenGodFamily::Wealth), 0.0);
        assert_eq!(strength_delta(Strong, TenGodFamily::Officer), 0.0);
    }

    #[test]
    fn double_clash_lowers_career() {
        // 甲子 ×4: incoming 午 clashes twice
        let n = natal([0, 0, 0, 0]);
        let cfg = ScoringConfig {
            ten_god_correction: false,
            strength_correction: false,
            ..ScoringConfig::default()
        };
        let clash = score_period(&n, Pillar::from_index(42), &cfg, CareerClashMode::Neutral); // 丙午
        assert_eq!(clash.events.clash, 2);
        let calm = score_period(&n, Pillar::from_index(2), &cfg, CareerClashMode::Neutral); // 丙寅
        assert_eq!(calm.events.clash, 0);
        assert!(clash.categories.career < calm.categories.career);
    }

    #[test]
    fn opportunity_halves_career_acceleration_only() {
        let n = natal([0, 0, 0, 0]);
        let cfg = ScoringConfig::default();
        let pillar = Pillar::from_index(42);
        let neutral = score_period(&n, pillar, &cfg, CareerClashMode::Neutral);
        let opp = score_period(&n, pillar, &cfg, CareerClashMode::Opportunity);
        assert_eq!(neutral.categories.love, opp.categories.love);
        assert_eq!(neutral.categories.health, opp.categories.health);
        assert!(opp.categories.career >= neutral.categories.career);
    }

    #[test]
    fn scoring_is_deterministic() {
        let n = natal([40, 2, 34, 53]);
        let cfg = ScoringConfig::default();
        for i in 0..60 {
            let p = Pillar::from_index(i);
            assert_eq!(score_two_stage(&n, p, &cfg), score_two_stage(&n, p, &cfg));
        }
    }

    #[test]
    fn override_skips_classification() {
        let n = natal([0, 0, 0, 0]);
        let cfg = ScoringConfig {
            career_clash_override: Some(CareerClashMode::Risk),
            ..ScoringConfig::default()
        };
        let (_, mode) = score_two_stage(&n, Pillar::from_index(42), &cfg);
        assert_eq!(mode, CareerClashMode::Risk);
    }

    #[test]
    fn blend_rounds_and_clamps() {
        let a = CategoryScores::from_fn(|_| 80.0);
        let b = CategoryScores::from_fn(|_| 61.0);
        let m = a.blend(&b, 0.5);
        assert_eq!(m.love, 71.0);
    }
}
