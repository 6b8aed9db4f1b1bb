//! The 60-term sexagenary cycle (stem × branch).
//!
//! Index i (0..60) pairs stem `i mod 10` with branch `i mod 12`. Because
//! gcd(10, 12) = 2, only pairs whose positions share parity exist; for those
//! the index is unique by the Chinese remainder theorem.

use std::fmt;

use serde::Serialize;

use crate::branch::Branch;
use crate::error::BaseError;
use crate::stem::Stem;

/// Length of the cycle.
pub const CYCLE_LEN: u8 = 60;

/// Cycle index of a (stem, branch) pair.
///
/// Fails with [`BaseError::InvalidPillar`] when the positions differ in parity.
pub fn index_of(stem: Stem, branch: Branch) -> Result<u8, BaseError> {
    let s = stem.index() as i32;
    let b = branch.index() as i32;
    if (s - b).rem_euclid(2) != 0 {
        return Err(BaseError::InvalidPillar { stem, branch });
    }
    // i = s + 10k with i ≡ b (mod 12)  =>  5k ≡ (b - s)/2 (mod 6)  =>  k ≡ 5·(b - s)/2
    let k = (5 * (b - s) / 2).rem_euclid(6);
    Ok((s + 10 * k) as u8)
}

/// (stem, branch) at a cycle index; any index is reduced modulo 60.
pub const fn from_index(i: u8) -> (Stem, Branch) {
    let i = i % CYCLE_LEN;
    (Stem::from_index(i % 10), Branch::from_index(i % 12))
}

/// Move a cycle index by a signed number of steps.
pub const fn advance(index: u8, delta: i32) -> u8 {
    (index as i32 + delta).rem_euclid(CYCLE_LEN as i32) as u8
}

/// A (stem, branch) pair that is a member of the 60-cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Pillar {
    pub stem: Stem,
    pub branch: Branch,
}

impl Pillar {
    /// Validated constructor.
    pub fn new(stem: Stem, branch: Branch) -> Result<Self, BaseError> {
        index_of(stem, branch)?;
        Ok(Self { stem, branch })
    }

    /// Pillar at a cycle index (reduced modulo 60).
    pub const fn from_index(i: u8) -> Self {
        let (stem, branch) = from_index(i);
        Self { stem, branch }
    }

    /// Cycle index of this pillar.
    pub fn index(self) -> u8 {
        // Construction guarantees parity agreement.
        let s = self.stem.index() as i32;
        let b = self.branch.index() as i32;
        (s + 10 * (5 * (b - s) / 2).rem_euclid(6)) as u8
    }

    /// Pillar `delta` steps along the cycle.
    pub fn advance(self, delta: i32) -> Self {
        Self::from_index(advance(self.index(), delta))
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.stem, self.branch)
    }
}
