//! Day-master strength (身强/身弱).
//!
//! Score = 50 + season + root + stem assist, where each term compares an
//! element with the day stem's element:
//!
//! | relation to day element | season | root (× hidden weight × branch weight) | stem |
//! |-------------------------|--------|----------------------------------------|------|
//! | same                    | +18    | +14                                    | +4   |
//! | generates day           | +10    | +10                                    | +3   |
//! | day generates it        | −8     | −6                                     | −2   |
//! | controls day            | −14    | −9                                     | −3   |
//! | day controls it         | −6     | −5                                     | −1   |
//!
//! Root branch weights: year 0.8, month 1.6, day 1.3, hour 1.0. Stem assist
//! covers the year, month and hour stems.

use serde::Serialize;

use crate::chart::Chart;
use crate::element::{Element, ElementRelation};

const ROOT_BRANCH_WEIGHTS: [f64; 4] = [0.8, 1.6, 1.3, 1.0];

/// Lower bound of the strong label.
pub const STRONG_MIN: f64 = 66.0;
/// Lower bound of the balanced label.
pub const BALANCED_MIN: f64 = 36.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthLabel {
    Strong,
    Balanced,
    Weak,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Strength {
    pub score: f64,
    pub label: StrengthLabel,
    pub season: f64,
    pub root: f64,
    pub stem_assist: f64,
}

/// `(season, root, stem)` points for `other` seen from `day`.
fn points(day: Element, other: Element) -> (f64, f64, f64) {
    match other.relation_to(day) {
        ElementRelation::Same => (18.0, 14.0, 4.0),
        ElementRelation::Generates => (10.0, 10.0, 3.0),
        ElementRelation::GeneratedBy => (-8.0, -6.0, -2.0),
        ElementRelation::Controls => (-14.0, -9.0, -3.0),
        ElementRelation::ControlledBy => (-6.0, -5.0, -1.0),
    }
}

/// Strength of the chart's day master.
pub fn strength(chart: &Chart) -> Strength {
    let day = chart.day_stem().element();

    let season = points(day, chart.month.branch.season().element()).0;

    let root: f64 = chart
        .branches()
        .iter()
        .zip(ROOT_BRANCH_WEIGHTS)
        .flat_map(|(b, w)| {
            b.hidden_stems()
                .iter()
                .map(move |h| h.weight * w * points(day, h.stem.element()).1)
        })
        .sum();

    let stem_assist: f64 = [chart.year.stem, chart.month.stem, chart.hour.stem]
        .iter()
        .map(|s| points(day, s.element()).2)
        .sum();

    let score = 50.0 + season + root + stem_assist;
    let label = if score >= STRONG_MIN {
        StrengthLabel::Strong
    } else if score >= BALANCED_MIN {
        StrengthLabel::Balanced
    } else {
        StrengthLabel::Weak
    };
    Strength {
        score,
        label,
        season,
        root,
        stem_assist,
    }
}
