//! The five elements and yin/yang polarity.
//!
//! Generating cycle: wood → fire → earth → metal → water → wood.
//! Controlling cycle: wood → earth → water → fire → metal → wood.

use std::fmt;

use serde::Serialize;

/// One of the five elements (wuxing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Element {
    Wood = 0,
    Fire = 1,
    Earth = 2,
    Metal = 3,
    Water = 4,
}

/// All elements in generating-cycle order.
pub const ALL_ELEMENTS: [Element; 5] = [
    Element::Wood,
    Element::Fire,
    Element::Earth,
    Element::Metal,
    Element::Water,
];

impl Element {
    /// 0-based index (Wood=0 .. Water=4).
    pub const fn index(self) -> usize {
        self as usize
    }

    /// English name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wood => "wood",
            Self::Fire => "fire",
            Self::Earth => "earth",
            Self::Metal => "metal",
            Self::Water => "water",
        }
    }

    /// Single Hanja character.
    pub const fn hanja(self) -> &'static str {
        match self {
            Self::Wood => "木",
            Self::Fire => "火",
            Self::Earth => "土",
            Self::Metal => "金",
            Self::Water => "水",
        }
    }

    /// The element this one generates.
    pub const fn generates(self) -> Self {
        ALL_ELEMENTS[(self.index() + 1) % 5]
    }

    /// The element this one controls.
    pub const fn controls(self) -> Self {
        ALL_ELEMENTS[(self.index() + 2) % 5]
    }

    /// How `other` relates to `self`.
    pub fn relation_to(self, other: Self) -> ElementRelation {
        if self == other {
            ElementRelation::Same
        } else if self.generates() == other {
            ElementRelation::Generates
        } else if other.generates() == self {
            ElementRelation::GeneratedBy
        } else if self.controls() == other {
            ElementRelation::Controls
        } else {
            ElementRelation::ControlledBy
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Relationship of a second element as seen from a first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementRelation {
    Same,
    /// First generates second.
    Generates,
    /// Second generates first.
    GeneratedBy,
    /// First controls second.
    Controls,
    /// Second controls first.
    ControlledBy,
}

/// Yin/yang polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Yang,
    Yin,
}

impl Polarity {
    /// Polarity of a cyclic position: even is yang.
    pub const fn from_position(i: u8) -> Self {
        if i % 2 == 0 { Self::Yang } else { Self::Yin }
    }

    /// True for yang.
    pub const fn is_yang(self) -> bool {
        matches!(self, Self::Yang)
    }
}
