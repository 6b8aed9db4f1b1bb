//! The ten heavenly stems.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::element::{Element, Polarity};
use crate::error::BaseError;

/// A heavenly stem (cheongan).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Stem {
    Gap = 0,
    Eul = 1,
    Byeong = 2,
    Jeong = 3,
    Mu = 4,
    Gi = 5,
    Gyeong = 6,
    Sin = 7,
    Im = 8,
    Gye = 9,
}

/// All 10 stems in cyclic order (index 0 = 甲).
pub const ALL_STEMS: [Stem; 10] = [
    Stem::Gap,
    Stem::Eul,
    Stem::Byeong,
    Stem::Jeong,
    Stem::Mu,
    Stem::Gi,
    Stem::Gyeong,
    Stem::Sin,
    Stem::Im,
    Stem::Gye,
];

const STEM_HANJA: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];

const STEM_NAMES: [&str; 10] = [
    "Gap", "Eul", "Byeong", "Jeong", "Mu", "Gi", "Gyeong", "Sin", "Im", "Gye",
];

impl Stem {
    /// 0-based cyclic position.
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Stem at a cyclic position; wraps modulo 10.
    pub const fn from_index(i: u8) -> Self {
        ALL_STEMS[(i % 10) as usize]
    }

    /// Romanized name.
    pub const fn name(self) -> &'static str {
        STEM_NAMES[self.index() as usize]
    }

    /// Hanja character.
    pub const fn hanja(self) -> &'static str {
        STEM_HANJA[self.index() as usize]
    }

    /// Element: stems pair up as wood, fire, earth, metal, water.
    pub const fn element(self) -> Element {
        match self.index() / 2 {
            0 => Element::Wood,
            1 => Element::Fire,
            2 => Element::Earth,
            3 => Element::Metal,
            _ => Element::Water,
        }
    }

    /// Yang for even positions (甲 丙 戊 庚 壬).
    pub const fn polarity(self) -> Polarity {
        Polarity::from_position(self.index())
    }

    /// Step forward (or backward) through the 10-cycle.
    pub const fn advance(self, steps: i32) -> Self {
        Self::from_index((self.index() as i32 + steps).rem_euclid(10) as u8)
    }
}

impl fmt::Display for Stem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hanja())
    }
}

impl Serialize for Stem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.hanja())
    }
}

impl FromStr for Stem {
    type Err = BaseError;

    /// Accepts the Hanja or the romanized name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ALL_STEMS
            .into_iter()
            .find(|st| st.hanja() == s || st.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| BaseError::InvalidInput(format!("unknown stem '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elements_in_pairs() {
        assert_eq!(Stem::Gap.element(), Element::Wood);
        assert_eq!(Stem::Eul.element(), Element::Wood);
        assert_eq!(Stem::Jeong.element(), Element::Fire);
        assert_eq!(Stem::Gi.element(), Element::Earth);
        assert_eq!(Stem::Gyeong.element(), Element::Metal);
        assert_eq!(Stem::Gye.element(), Element::Water);
    }

    #[test]
    fn polarity_alternates() {
        assert!(Stem::Gap.polarity().is_yang());
        assert!(!Stem::Eul.polarity().is_yang());
        assert!(Stem::Im.polarity().is_yang());
    }

    #[test]
    fn advance_wraps_both_ways() {
        assert_eq!(Stem::Gye.advance(1), Stem::Gap);
        assert_eq!(Stem::Gap.advance(-1), Stem::Gye);
        assert_eq!(Stem::Byeong.advance(20), Stem::Byeong);
    }

    #[test]
    fn parse_hanja_and_name() {
        assert_eq!("庚".parse::<Stem>().unwrap(), Stem::Gyeong);
        assert_eq!("gyeong".parse::<Stem>().unwrap(), Stem::Gyeong);
        assert!("X".parse::<Stem>().is_err());
    }
}
