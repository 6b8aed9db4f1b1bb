//! Four-pillar chart construction from a local birth instant.
//!
//! - Year: civil year, minus one before that year's Lichun; index (y − 1984) mod 60.
//! - Month: branch of the latest solar-term boundary at or before the instant;
//!   stem from the year stem (五虎遁).
//! - Day: Julian Day Number against the 1984-02-02 anchor.
//! - Hour: two-hour buckets with 23:00–00:59 as 子; stem from the day stem (五鼠遁).

use std::fmt;
use std::str::FromStr;

use saju_time::{LocalDateTime, SolarTerm, boundaries_for_civil_year, boundary_for};
use serde::Serialize;
use tracing::debug;

use crate::branch::Branch;
use crate::error::BaseError;
use crate::sexagenary::Pillar;
use crate::stem::Stem;

/// Year whose index in the 60-cycle is 0 (甲子).
pub const YEAR_EPOCH: i32 = 1984;

/// Day-pillar anchor date.
pub const DAY_ANCHOR: (i32, u32, u32) = (1984, 2, 2);

/// Cycle index assigned to the anchor date.
pub const DAY_ANCHOR_INDEX: i64 = 2;

/// Biological sex as used for the decade direction rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

impl FromStr for Sex {
    type Err = BaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" | "male" => Ok(Self::Male),
            "f" | "female" => Ok(Self::Female),
            other => Err(BaseError::InvalidInput(format!(
                "sex must be M or F, got '{other}'"
            ))),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Male => "M",
            Self::Female => "F",
        })
    }
}

/// Validated birth input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BirthInput {
    pub instant: LocalDateTime,
    pub sex: Sex,
}

impl BirthInput {
    pub fn new(instant: LocalDateTime, sex: Sex) -> Self {
        Self { instant, sex }
    }

    /// Parse `YYYY-MM-DD`, `HH:MM` and `M`/`F`.
    pub fn parse(date: &str, time: &str, sex: &str) -> Result<Self, BaseError> {
        let instant = LocalDateTime::parse(date, time)?;
        let sex = sex.parse()?;
        Ok(Self { instant, sex })
    }
}

/// The four pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Chart {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Pillar,
}

impl Chart {
    /// Pillars in year, month, day, hour order.
    pub fn pillars(&self) -> [Pillar; 4] {
        [self.year, self.month, self.day, self.hour]
    }

    /// Branches in year, month, day, hour order.
    pub fn branches(&self) -> [Branch; 4] {
        self.pillars().map(|p| p.branch)
    }

    /// The day master.
    pub fn day_stem(&self) -> Stem {
        self.day.stem
    }
}

impl fmt::Display for Chart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.year, self.month, self.day, self.hour)
    }
}

/// A built chart plus the approximate-calendar flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartResult {
    pub chart: Chart,
    /// True if any solar-term boundary consulted was outside the sample.
    pub is_approximate: bool,
}

/// Build the four pillars for a local birth instant.
#[tracing::instrument(level = "debug", skip_all, fields(instant = %instant))]
pub fn build_chart(instant: &LocalDateTime) -> Result<ChartResult, BaseError> {
    // Fields are public; re-validate so an impossible date cannot slip through.
    let instant = LocalDateTime::new(
        instant.year,
        instant.month,
        instant.day,
        instant.hour,
        instant.minute,
    )?;

    let (solar_year, year_approx) = solar_year_of(&instant);
    let year = year_pillar(solar_year);
    let (month_branch, month_approx) = month_branch_of(&instant);
    let month = month_pillar(year.stem, month_branch);
    let day = day_pillar(instant.year, instant.month, instant.day);
    let hb = hour_branch(instant.hour, instant.minute);
    let hour = Pillar {
        stem: hour_stem(day.stem, hb),
        branch: hb,
    };

    let chart = Chart {
        year,
        month,
        day,
        hour,
    };
    let is_approximate = year_approx || month_approx;
    debug!(%chart, is_approximate, "chart built");
    Ok(ChartResult {
        chart,
        is_approximate,
    })
}

/// Solar year of an instant: the civil year, minus one before its Lichun.
pub fn solar_year_of(instant: &LocalDateTime) -> (i32, bool) {
    let lichun = boundary_for(instant.year, SolarTerm::Lichun);
    let year = if *instant < lichun.instant {
        instant.year - 1
    } else {
        instant.year
    };
    (year, lichun.is_approximate)
}

/// Year pillar of a solar year.
pub fn year_pillar(solar_year: i32) -> Pillar {
    Pillar::from_index((solar_year - YEAR_EPOCH).rem_euclid(60) as u8)
}

/// Month branch from the governing boundary; flag is true if any of the
/// civil year's boundaries was approximate.
pub fn month_branch_of(instant: &LocalDateTime) -> (Branch, bool) {
    let bounds = boundaries_for_civil_year(instant.year);
    let approx = bounds.iter().any(|b| b.is_approximate);
    let governing = bounds
        .iter()
        .take_while(|b| b.instant <= *instant)
        .last()
        .unwrap_or(&bounds[0]);
    (Branch::from_index(governing.term.branch_index()), approx)
}

/// First month stem of a year (寅 month), 五虎遁.
pub const fn first_month_stem(year_stem: Stem) -> Stem {
    match year_stem.index() % 5 {
        0 => Stem::Byeong,
        1 => Stem::Mu,
        2 => Stem::Gyeong,
        3 => Stem::Im,
        _ => Stem::Gap,
    }
}

/// Month pillar from the year stem and month branch.
pub fn month_pillar(year_stem: Stem, month_branch: Branch) -> Pillar {
    Pillar {
        stem: first_month_stem(year_stem).advance(month_branch.month_position() as i32),
        branch: month_branch,
    }
}

/// Day pillar of a civil date.
pub fn day_pillar(year: i32, month: u32, day: u32) -> Pillar {
    let anchor = saju_time::gregorian_to_jdn(DAY_ANCHOR.0, DAY_ANCHOR.1, DAY_ANCHOR.2);
    let jdn = saju_time::gregorian_to_jdn(year, month, day);
    Pillar::from_index((jdn - anchor + DAY_ANCHOR_INDEX).rem_euclid(60) as u8)
}

/// Hour branch: 23:00–00:59 is 子, then two-hour buckets.
pub const fn hour_branch(hour: u32, minute: u32) -> Branch {
    let minutes = hour * 60 + minute;
    Branch::from_index((((minutes + 60) / 120) % 12) as u8)
}

/// First hour stem of a day (子 hour), 五鼠遁.
pub const fn first_hour_stem(day_stem: Stem) -> Stem {
    match day_stem.index() % 5 {
        0 => Stem::Gap,
        1 => Stem::Byeong,
        2 => Stem::Mu,
        3 => Stem::Gyeong,
        _ => Stem::Im,
    }
}

/// Hour stem from the day stem and hour branch.
pub const fn hour_stem(day_stem: Stem, hour_branch: Branch) -> Stem {
    first_hour_stem(day_stem).advance(hour_branch.index() as i32)
}
