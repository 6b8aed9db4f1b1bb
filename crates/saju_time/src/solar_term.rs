//! Approximate solar-term (jieqi) boundaries.
//!
//! Twelve month-opening terms per solar year. Each boundary is a base
//! day-of-year plus a base minute-of-day; for the sampled years a small
//! per-year minute offset is added. Outside the sample the base values are
//! used as-is and the boundary is flagged approximate. Lookups never fail.
//!
//! XIAOHAN closes the solar year that LICHUN opens, so `boundary_for(y,
//! Xiaohan)` lands in January of civil year `y + 1`.

use serde::Serialize;

use crate::julian::MINUTES_PER_DAY;
use crate::local_time::LocalDateTime;

/// The 12 month-opening solar terms, in solar-year order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum SolarTerm {
    Lichun = 0,
    Jingzhe = 1,
    Qingming = 2,
    Lixia = 3,
    Mangzhong = 4,
    Xiaoshu = 5,
    Liqiu = 6,
    Bailu = 7,
    Hanlu = 8,
    Lidong = 9,
    Daxue = 10,
    Xiaohan = 11,
}

/// All 12 terms in solar-year order (index 0 = Lichun).
pub const ALL_SOLAR_TERMS: [SolarTerm; 12] = [
    SolarTerm::Lichun,
    SolarTerm::Jingzhe,
    SolarTerm::Qingming,
    SolarTerm::Lixia,
    SolarTerm::Mangzhong,
    SolarTerm::Xiaoshu,
    SolarTerm::Liqiu,
    SolarTerm::Bailu,
    SolarTerm::Hanlu,
    SolarTerm::Lidong,
    SolarTerm::Daxue,
    SolarTerm::Xiaohan,
];

const BASE_DAY_OF_YEAR: [u32; 12] = [35, 64, 95, 126, 157, 188, 220, 251, 281, 311, 341, 5];

const BASE_MINUTE_OF_DAY: [i64; 12] = [
    120, 330, 615, 890, 1100, 1305, 210, 440, 680, 910, 1130, 200,
];

/// First year of the sampled span.
pub const SAMPLE_FIRST_YEAR: i32 = 2020;

/// Per-year minute offsets for 2020..=2030, `round(sin((k+1)·0.9)·6)`.
/// Every term shares the same offset for a given year.
const SAMPLE_OFFSET_MINUTES: [i64; 11] = [5, 6, 3, -3, -6, -5, 0, 5, 6, 2, -3];

/// Last year of the sampled span (inclusive).
pub const SAMPLE_LAST_YEAR: i32 = SAMPLE_FIRST_YEAR + SAMPLE_OFFSET_MINUTES.len() as i32 - 1;

impl SolarTerm {
    /// 0-based position in the solar year (Lichun=0 .. Xiaohan=11).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Term from its solar-year position; wraps modulo 12.
    pub const fn from_index(i: u8) -> Self {
        ALL_SOLAR_TERMS[(i % 12) as usize]
    }

    /// Pinyin name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Lichun => "Lichun",
            Self::Jingzhe => "Jingzhe",
            Self::Qingming => "Qingming",
            Self::Lixia => "Lixia",
            Self::Mangzhong => "Mangzhong",
            Self::Xiaoshu => "Xiaoshu",
            Self::Liqiu => "Liqiu",
            Self::Bailu => "Bailu",
            Self::Hanlu => "Hanlu",
            Self::Lidong => "Lidong",
            Self::Daxue => "Daxue",
            Self::Xiaohan => "Xiaohan",
        }
    }

    /// Position (子=0 .. 亥=11) of the earthly branch whose month this term opens.
    ///
    /// Lichun opens 寅 (2), and each later term opens the next branch.
    pub const fn branch_index(self) -> u8 {
        (self.index() + 2) % 12
    }

    /// Next term in the cycle (Xiaohan wraps to Lichun).
    pub const fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Previous term in the cycle (Lichun wraps to Xiaohan).
    pub const fn prev(self) -> Self {
        Self::from_index(self.index() + 11)
    }

    /// Approximate day of year (1-based) of the term.
    pub const fn base_day_of_year(self) -> u32 {
        BASE_DAY_OF_YEAR[self.index() as usize]
    }

    /// Approximate local minute of day of the term.
    pub const fn base_minute_of_day(self) -> i64 {
        BASE_MINUTE_OF_DAY[self.index() as usize]
    }

    /// Civil year in which the term of solar year `year` occurs.
    pub const fn occurrence_year(self, year: i32) -> i32 {
        match self {
            Self::Xiaohan => year + 1,
            _ => year,
        }
    }
}

/// Minute offset for a sampled year, or `None` outside the sample.
pub fn sample_offset_minutes(year: i32) -> Option<i64> {
    if !(SAMPLE_FIRST_YEAR..=SAMPLE_LAST_YEAR).contains(&year) {
        return None;
    }
    Some(SAMPLE_OFFSET_MINUTES[(year - SAMPLE_FIRST_YEAR) as usize])
}

/// One resolved solar-term boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SolarTermBoundary {
    pub term: SolarTerm,
    /// Solar year the term belongs to (the `year` it was requested for).
    pub year: i32,
    /// Local +09:00 instant of the boundary.
    pub instant: LocalDateTime,
    /// True when the year is outside the sampled span.
    pub is_approximate: bool,
}

/// Boundary of `term` for solar year `year`.
///
/// The offset is looked up by `year` even when the term occurs in the
/// following civil year.
pub fn boundary_for(year: i32, term: SolarTerm) -> SolarTermBoundary {
    let offset = sample_offset_minutes(year);
    let civil = term.occurrence_year(year);
    let jan1 = crate::julian::gregorian_to_jdn(civil, 1, 1);
    let jdn = jan1 + term.base_day_of_year() as i64 - 1;
    let minute = term.base_minute_of_day() + offset.unwrap_or(0);
    SolarTermBoundary {
        term,
        year,
        instant: LocalDateTime::from_minutes(jdn * MINUTES_PER_DAY + minute),
        is_approximate: offset.is_none(),
    }
}

/// The boundaries that can govern any instant of civil year `civil_year`,
/// sorted chronologically.
///
/// DAXUE and XIAOHAN of the previous solar year open 子 and 丑 months that are
/// still running on January 1st; LICHUN..DAXUE of the current solar year
/// follow.
pub fn boundaries_for_civil_year(civil_year: i32) -> [SolarTermBoundary; 13] {
    let mut out = [boundary_for(civil_year - 1, SolarTerm::Daxue); 13];
    out[1] = boundary_for(civil_year - 1, SolarTerm::Xiaohan);
    for (slot, term) in out[2..].iter_mut().zip(ALL_SOLAR_TERMS.iter().take(11)) {
        *slot = boundary_for(civil_year, *term);
    }
    out.sort_by_key(|b| b.instant);
    out
}

/// Latest boundary at or before `instant`.
pub fn boundary_at_or_before(instant: &LocalDateTime) -> SolarTermBoundary {
    let bounds = boundaries_for_civil_year(instant.year);
    let mut last = bounds[0];
    for b in bounds.iter() {
        if b.instant <= *instant {
            last = *b;
        } else {
            break;
        }
    }
    last
}

/// Earliest boundary strictly after `instant`.
pub fn boundary_after(instant: &LocalDateTime) -> SolarTermBoundary {
    let following = boundaries_for_civil_year(instant.year + 1);
    boundaries_for_civil_year(instant.year)
        .into_iter()
        .chain(following)
        .find(|b| b.instant > *instant)
        .unwrap_or(following[12])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lichun_2024_sampled() {
        let b = boundary_for(2024, SolarTerm::Lichun);
        assert!(!b.is_approximate);
        // day 35 = Feb 4; 120 - 6 minutes
        assert_eq!(b.instant, LocalDateTime::new(2024, 2, 4, 1, 54).unwrap());
    }

    #[test]
    fn out_of_sample_is_approximate() {
        let b = boundary_for(1990, SolarTerm::Lichun);
        assert!(b.is_approximate);
        assert_eq!(b.instant, LocalDateTime::new(1990, 2, 4, 2, 0).unwrap());
    }

    #[test]
    fn xiaohan_rolls_into_next_year() {
        let b = boundary_for(2020, SolarTerm::Xiaohan);
        assert_eq!(b.year, 2020);
        assert_eq!(b.instant.year, 2021);
        assert_eq!((b.instant.month, b.instant.day), (1, 5));
        // offset looked up by the solar year, 2020 -> +5
        assert_eq!((b.instant.hour, b.instant.minute), (3, 25));
    }

    #[test]
    fn xiaohan_of_last_sample_year_keeps_offset() {
        let b = boundary_for(SAMPLE_LAST_YEAR, SolarTerm::Xiaohan);
        assert!(!b.is_approximate);
        assert_eq!(b.instant.year, SAMPLE_LAST_YEAR + 1);
    }

    #[test]
    fn leap_year_shifts_calendar_date() {
        let leap = boundary_for(2024, SolarTerm::Jingzhe).instant;
        let common = boundary_for(2023, SolarTerm::Jingzhe).instant;
        assert_eq!((leap.month, leap.day), (3, 4));
        assert_eq!((common.month, common.day), (3, 5));
    }

    #[test]
    fn branch_indices() {
        assert_eq!(SolarTerm::Lichun.branch_index(), 2);
        assert_eq!(SolarTerm::Daxue.branch_index(), 0);
        assert_eq!(SolarTerm::Xiaohan.branch_index(), 1);
    }

    #[test]
    fn next_prev_wrap() {
        assert_eq!(SolarTerm::Xiaohan.next(), SolarTerm::Lichun);
        assert_eq!(SolarTerm::Lichun.prev(), SolarTerm::Xiaohan);
    }

    #[test]
    fn civil_year_boundaries_sorted_and_complete() {
        let bounds = boundaries_for_civil_year(2024);
        assert!(bounds.windows(2).all(|w| w[0].instant < w[1].instant));
        assert_eq!(bounds[0].term, SolarTerm::Daxue);
        assert_eq!(bounds[0].instant.year, 2023);
        assert_eq!(bounds[1].term, SolarTerm::Xiaohan);
        assert_eq!(bounds[2].term, SolarTerm::Lichun);
        assert_eq!(bounds[12].term, SolarTerm::Daxue);
    }

    #[test]
    fn early_january_falls_in_previous_daxue() {
        let t = LocalDateTime::new(2024, 1, 2, 12, 0).unwrap();
        let b = boundary_at_or_before(&t);
        assert_eq!(b.term, SolarTerm::Daxue);
        assert_eq!(b.year, 2023);
    }

    #[test]
    fn next_after_late_december_is_xiaohan() {
        let t = LocalDateTime::new(2024, 12, 20, 0, 0).unwrap();
        let b = boundary_after(&t);
        assert_eq!(b.term, SolarTerm::Xiaohan);
        assert_eq!(b.instant.year, 2025);
    }

    #[test]
    fn after_is_strict() {
        let lichun = boundary_for(2024, SolarTerm::Lichun).instant;
        assert_eq!(boundary_after(&lichun).term, SolarTerm::Jingzhe);
        assert_eq!(boundary_at_or_before(&lichun).term, SolarTerm::Lichun);
    }
}
