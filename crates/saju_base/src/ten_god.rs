//! Ten gods (十神): how another stem relates to the day stem.
//!
//! The element relation picks the family; equal polarity picks the first
//! member of each pair (比肩, 食神, 偏財, 偏官, 偏印), differing polarity the second.

use std::fmt;

use serde::Serialize;

use crate::element::ElementRelation;
use crate::stem::Stem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TenGod {
    /// 比肩
    Companion,
    /// 劫財
    RobWealth,
    /// 食神
    EatingGod,
    /// 傷官
    HurtingOfficer,
    /// 偏財
    IndirectWealth,
    /// 正財
    DirectWealth,
    /// 偏官
    SevenKillings,
    /// 正官
    DirectOfficer,
    /// 偏印
    IndirectResource,
    /// 正印
    DirectResource,
}

/// Pairs of ten gods sharing an element relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TenGodFamily {
    /// 比劫: same element.
    Peer,
    /// 食傷: day stem generates.
    Output,
    /// 財: day stem controls.
    Wealth,
    /// 官: controls the day stem.
    Officer,
    /// 印: generates the day stem.
    Resource,
}

/// All ten gods, paired by family (比肩 劫財 食神 傷官 偏財 正財 偏官 正官 偏印 正印).
pub const ALL_TEN_GODS: [TenGod; 10] = [
    TenGod::Companion,
    TenGod::RobWealth,
    TenGod::EatingGod,
    TenGod::HurtingOfficer,
    TenGod::IndirectWealth,
    TenGod::DirectWealth,
    TenGod::SevenKillings,
    TenGod::DirectOfficer,
    TenGod::IndirectResource,
    TenGod::DirectResource,
];

impl TenGod {
    /// Position in [`ALL_TEN_GODS`].
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn hanja(self) -> &'static str {
        match self {
            Self::Companion => "比肩",
            Self::RobWealth => "劫財",
            Self::EatingGod => "食神",
            Self::HurtingOfficer => "傷官",
            Self::IndirectWealth => "偏財",
            Self::DirectWealth => "正財",
            Self::SevenKillings => "偏官",
            Self::DirectOfficer => "正官",
            Self::IndirectResource => "偏印",
            Self::DirectResource => "正印",
        }
    }

    pub const fn family(self) -> TenGodFamily {
        match self {
            Self::Companion | Self::RobWealth => TenGodFamily::Peer,
            Self::EatingGod | Self::HurtingOfficer => TenGodFamily::Output,
            Self::IndirectWealth | Self::DirectWealth => TenGodFamily::Wealth,
            Self::SevenKillings | Self::DirectOfficer => TenGodFamily::Officer,
            Self::IndirectResource | Self::DirectResource => TenGodFamily::Resource,
        }
    }
}

impl fmt::Display for TenGod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hanja())
    }
}

/// Ten god of `other` relative to `day_stem`.
pub fn ten_god(day_stem: Stem, other: Stem) -> TenGod {
    let same_polarity = day_stem.polarity() == other.polarity();
    let pick = |same: TenGod, diff: TenGod| if same_polarity { same } else { diff };
    match day_stem.element().relation_to(other.element()) {
        ElementRelation::Same => pick(TenGod::Companion, TenGod::RobWealth),
        ElementRelation::Generates => pick(TenGod::EatingGod, TenGod::HurtingOfficer),
        ElementRelation::Controls => pick(TenGod::IndirectWealth, TenGod::DirectWealth),
        ElementRelation::ControlledBy => pick(TenGod::SevenKillings, TenGod::DirectOfficer),
        ElementRelation::GeneratedBy => pick(TenGod::IndirectResource, TenGod::DirectResource),
    }
}
