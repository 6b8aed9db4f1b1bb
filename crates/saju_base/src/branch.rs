//! The twelve earthly branches.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::element::{Element, Polarity};
use crate::error::BaseError;
use crate::hidden_stem::{HIDDEN_STEMS, HiddenStem};

/// An earthly branch (jiji).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Branch {
    Ja = 0,
    Chuk = 1,
    In = 2,
    Myo = 3,
    Jin = 4,
    Sa = 5,
    O = 6,
    Mi = 7,
    Sin = 8,
    Yu = 9,
    Sul = 10,
    Hae = 11,
}

/// All 12 branches in cyclic order (index 0 = 子).
pub const ALL_BRANCHES: [Branch; 12] = [
    Branch::Ja,
    Branch::Chuk,
    Branch::In,
    Branch::Myo,
    Branch::Jin,
    Branch::Sa,
    Branch::O,
    Branch::Mi,
    Branch::Sin,
    Branch::Yu,
    Branch::Sul,
    Branch::Hae,
];

const BRANCH_HANJA: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];

const BRANCH_NAMES: [&str; 12] = [
    "Ja", "Chuk", "In", "Myo", "Jin", "Sa", "O", "Mi", "Sin", "Yu", "Sul", "Hae",
];

/// Season of a month branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    /// Ruling element of the season. Earth has no season of its own.
    pub const fn element(self) -> Element {
        match self {
            Self::Spring => Element::Wood,
            Self::Summer => Element::Fire,
            Self::Autumn => Element::Metal,
            Self::Winter => Element::Water,
        }
    }
}

impl Branch {
    /// 0-based cyclic position.
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Branch at a cyclic position; wraps modulo 12.
    pub const fn from_index(i: u8) -> Self {
        ALL_BRANCHES[(i % 12) as usize]
    }

    /// Romanized name.
    pub const fn name(self) -> &'static str {
        BRANCH_NAMES[self.index() as usize]
    }

    /// Hanja character.
    pub const fn hanja(self) -> &'static str {
        BRANCH_HANJA[self.index() as usize]
    }

    /// Surface element.
    pub const fn element(self) -> Element {
        match self {
            Self::In | Self::Myo => Element::Wood,
            Self::Sa | Self::O => Element::Fire,
            Self::Chuk | Self::Jin | Self::Mi | Self::Sul => Element::Earth,
            Self::Sin | Self::Yu => Element::Metal,
            Self::Hae | Self::Ja => Element::Water,
        }
    }

    /// Yang for even positions (子 寅 辰 午 申 戌).
    pub const fn polarity(self) -> Polarity {
        Polarity::from_position(self.index())
    }

    /// Hidden stems in primary, secondary, residual order.
    pub const fn hidden_stems(self) -> &'static [HiddenStem] {
        HIDDEN_STEMS[self.index() as usize]
    }

    /// Season when read as a month branch (寅卯辰 spring .. 亥子丑 winter).
    pub const fn season(self) -> Season {
        match self {
            Self::In | Self::Myo | Self::Jin => Season::Spring,
            Self::Sa | Self::O | Self::Mi => Season::Summer,
            Self::Sin | Self::Yu | Self::Sul => Season::Autumn,
            Self::Hae | Self::Ja | Self::Chuk => Season::Winter,
        }
    }

    /// Position in the solar-term month order (寅=0 .. 丑=11).
    pub const fn month_position(self) -> u8 {
        (self.index() + 10) % 12
    }

    /// Step forward (or backward) through the 12-cycle.
    pub const fn advance(self, steps: i32) -> Self {
        Self::from_index((self.index() as i32 + steps).rem_euclid(12) as u8)
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hanja())
    }
}

impl Serialize for Branch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.hanja())
    }
}

impl FromStr for Branch {
    type Err = BaseError;

    /// Accepts the Hanja or the romanized name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ALL_BRANCHES
            .into_iter()
            .find(|b| b.hanja() == s || b.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| BaseError::InvalidInput(format!("unknown branch '{s}'")))
    }
}
