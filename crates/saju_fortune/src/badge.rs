//! Summary badges for periods and for a whole reading.

use serde::Serialize;

use crate::combo::Combo;
use crate::timeline::LuckPeriod;
use crate::volatility::{Volatility, VolatilityLabel};

pub const MAX_PERIOD_BADGES: usize = 3;

/// Rendering hint for a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeTone {
    Good,
    Warn,
    Bad,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodBadge {
    GoldenTiming,
    Rising,
    Manage,
    Adjust,
    Caution,
    LoveStrong,
    MoneyStrong,
    CareerStrong,
    HealthCaution,
    SpendingCaution,
    RelationshipCaution,
    RiskAlert,
    Leap,
    Overheat,
}

impl PeriodBadge {
    pub const fn tone(self) -> BadgeTone {
        match self {
            Self::GoldenTiming
            | Self::Rising
            | Self::LoveStrong
            | Self::MoneyStrong
            | Self::CareerStrong
            | Self::Leap => BadgeTone::Good,
            Self::Manage | Self::Adjust | Self::Overheat => BadgeTone::Warn,
            Self::Caution
            | Self::HealthCaution
            | Self::SpendingCaution
            | Self::RelationshipCaution
            | Self::RiskAlert => BadgeTone::Bad,
        }
    }

    /// Band badge of a total.
    pub const fn band(total: u8) -> Self {
        match total {
            85.. => Self::GoldenTiming,
            75..=84 => Self::Rising,
            60..=74 => Self::Manage,
            45..=59 => Self::Adjust,
            _ => Self::Caution,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GlobalBadge {
    RisingLife,
    StableLife,
    AdjustingLife,
    DefensiveLife,
    SteadyAccumulation,
    SteadyGrowth,
    SwingAndLeap,
    HighRiskHighReturn,
}

impl GlobalBadge {
    pub const fn tone(self) -> BadgeTone {
        match self {
            Self::RisingLife | Self::StableLife | Self::SteadyAccumulation | Self::SteadyGrowth => {
                BadgeTone::Good
            }
            Self::AdjustingLife | Self::SwingAndLeap => BadgeTone::Warn,
            Self::DefensiveLife | Self::HighRiskHighReturn => BadgeTone::Bad,
        }
    }
}

/// Badges of one period, at most three.
///
/// Overheat, then breakthrough, then crash go in front of the band badge
/// and the category flags.
pub fn period_badges(period: &LuckPeriod, overheat: bool) -> Vec<PeriodBadge> {
    let c = &period.categories;
    let flags = [
        (c.love >= 80.0, PeriodBadge::LoveStrong),
        (c.money >= 80.0, PeriodBadge::MoneyStrong),
        (c.career >= 80.0, PeriodBadge::CareerStrong),
        (c.health <= 45.0, PeriodBadge::HealthCaution),
        (c.money <= 45.0, PeriodBadge::SpendingCaution),
        (c.love <= 45.0, PeriodBadge::RelationshipCaution),
    ];
    let front = [
        (overheat, PeriodBadge::Overheat),
        (period.has_combo(Combo::Breakthrough), PeriodBadge::Leap),
        (period.has_combo(Combo::Crash), PeriodBadge::RiskAlert),
    ];

    front
        .into_iter()
        .filter_map(|(on, b)| on.then_some(b))
        .chain(std::iter::once(PeriodBadge::band(period.total)))
        .chain(flags.into_iter().filter_map(|(on, b)| on.then_some(b)))
        .take(MAX_PERIOD_BADGES)
        .collect()
}

/// Life-score band badge followed by the volatility badge.
pub fn global_badges(life_score: u8, volatility: &Volatility) -> Vec<GlobalBadge> {
    let life = match life_score {
        80.. => GlobalBadge::RisingLife,
        65..=79 => GlobalBadge::StableLife,
        50..=64 => GlobalBadge::AdjustingLife,
        _ => GlobalBadge::DefensiveLife,
    };
    let vol = match volatility.label {
        VolatilityLabel::Stable => GlobalBadge::SteadyAccumulation,
        VolatilityLabel::Normal => GlobalBadge::SteadyGrowth,
        VolatilityLabel::Swingy => GlobalBadge::SwingAndLeap,
        VolatilityLabel::Volatile => GlobalBadge::HighRiskHighReturn,
    };
    vec![life, vol]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::{CareerClashMode, CategoryScores};
    use crate::timeline::{PeriodInput, PeriodLevel};
    use saju_base::{InteractionEvents, Pillar};

    fn period(cats: CategoryScores, events: InteractionEvents) -> LuckPeriod {
        PeriodInput::new(
            PeriodLevel::Month,
            "",
            Pillar::from_index(0),
            0..=0,
            cats,
            events,
            CareerClashMode::Neutral,
        )
        .build()
    }

    #[test]
    fn band_thresholds() {
        assert_eq!(PeriodBadge::band(85), PeriodBadge::GoldenTiming);
        assert_eq!(PeriodBadge::band(84), PeriodBadge::Rising);
        assert_eq!(PeriodBadge::band(60), PeriodBadge::Manage);
        assert_eq!(PeriodBadge::band(45), PeriodBadge::Adjust);
        assert_eq!(PeriodBadge::band(44), PeriodBadge::Caution);
    }

    #[test]
    fn band_then_category_flags() {
        let cats = CategoryScores {
            love: 82.0,
            money: 81.0,
            career: 80.0,
            health: 70.0,
        };
        let p = period(cats, InteractionEvents::default());
        assert_eq!(
            period_badges(&p, false),
            vec![
                PeriodBadge::Rising,
                PeriodBadge::LoveStrong,
                PeriodBadge::MoneyStrong
            ]
        );
    }

    #[test]
    fn overheat_and_crash_go_first() {
        let ev = InteractionEvents {
            clash: 2,
            breaking: 1,
            harm: 1,
            ..Default::default()
        };
        let p = period(CategoryScores::from_fn(|_| 40.0), ev);
        assert!(p.has_combo(Combo::Crash));
        assert_eq!(
            period_badges(&p, true),
            vec![
                PeriodBadge::Overheat,
                PeriodBadge::RiskAlert,
                PeriodBadge::Caution
            ]
        );
    }

    #[test]
    fn global_pairs() {
        let v = Volatility {
            label: VolatilityLabel::Swingy,
            ..Volatility::default()
        };
        assert_eq!(
            global_badges(70, &v),
            vec![GlobalBadge::StableLife, GlobalBadge::SwingAndLeap]
        );
        assert_eq!(global_badges(49, &v)[0], GlobalBadge::DefensiveLife);
        assert_eq!(GlobalBadge::DefensiveLife.tone(), BadgeTone::Bad);
    }
}
