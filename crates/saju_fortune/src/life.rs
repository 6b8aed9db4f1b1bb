//! Lifetime score: decade totals weighted by age band.

use crate::timeline::LuckPeriod;

/// Weight of a decade starting at `age`. Ages 30–49 count most.
pub const fn age_weight(age: i32) -> f64 {
    match age {
        10..=19 => 0.6,
        20..=29 => 0.8,
        30..=49 => 1.2,
        50..=59 => 1.0,
        60..=69 => 0.8,
        _ => 0.6,
    }
}

/// Weighted mean of decade totals, rounded. Zero for no decades.
pub fn life_score(decades: &[LuckPeriod]) -> u8 {
    let (sum, wsum) = decades.iter().fold((0.0, 0.0), |(s, w), d| {
        let aw = age_weight(d.start);
        (s + f64::from(d.total) * aw, w + aw)
    });
    (sum / f64::max(wsum, 1e-9)).round().clamp(0.0, 100.0) as u8
}
