//! Hidden stems (jijanggan) contained in each branch.
//!
//! One weighting table is used everywhere: a single member carries 1.0, two
//! members 0.7/0.3, three members 0.6/0.25/0.15 in primary, secondary,
//! residual order.

use serde::Serialize;

use crate::stem::Stem;

use HiddenRole::{Primary as P, Residual as R, Secondary as S};

/// Role of a hidden stem inside its branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HiddenRole {
    Primary,
    Secondary,
    Residual,
}

/// A weighted hidden stem.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HiddenStem {
    pub stem: Stem,
    pub role: HiddenRole,
    pub weight: f64,
}

const fn one(stem: Stem) -> HiddenStem {
    HiddenStem {
        stem,
        role: HiddenRole::Primary,
        weight: 1.0,
    }
}

const fn two(stem: Stem, role: HiddenRole) -> HiddenStem {
    let weight = match role {
        HiddenRole::Primary => 0.7,
        _ => 0.3,
    };
    HiddenStem { stem, role, weight }
}

const fn three(stem: Stem, role: HiddenRole) -> HiddenStem {
    let weight = match role {
        HiddenRole::Primary => 0.6,
        HiddenRole::Secondary => 0.25,
        HiddenRole::Residual => 0.15,
    };
    HiddenStem { stem, role, weight }
}

/// Hidden stems indexed by branch position (子=0 .. 亥=11).
pub(crate) const HIDDEN_STEMS: [&[HiddenStem]; 12] = [
    &[one(Stem::Gye)],
    &[three(Stem::Gi, P), three(Stem::Gye, S), three(Stem::Sin, R)],
    &[three(Stem::Gap, P), three(Stem::Byeong, S), three(Stem::Mu, R)],
    &[one(Stem::Eul)],
    &[three(Stem::Mu, P), three(Stem::Eul, S), three(Stem::Gye, R)],
    &[three(Stem::Byeong, P), three(Stem::Gyeong, S), three(Stem::Mu, R)],
    &[two(Stem::Jeong, P), two(Stem::Gi, S)],
    &[three(Stem::Gi, P), three(Stem::Jeong, S), three(Stem::Eul, R)],
    &[three(Stem::Gyeong, P), three(Stem::Im, S), three(Stem::Mu, R)],
    &[one(Stem::Sin)],
    &[three(Stem::Mu, P), three(Stem::Sin, S), three(Stem::Jeong, R)],
    &[two(Stem::Im, P), two(Stem::Gap, S)],
];
