//! Branch interaction events between a natal branch set and an incoming branch.
//!
//! Pair relations (clash, six-combination, breaking, harm) are unordered and
//! counted once per matching natal branch, capped at 2 each. Punishment,
//! triad and seasonal-quartet relations are group tests over natal ∪ {incoming}.

use serde::Serialize;

use crate::branch::Branch;
use crate::branch::Branch::{Chuk, Hae, In, Ja, Jin, Mi, Myo, O, Sa, Sin, Sul, Yu};

/// Cap applied to each pairwise count.
pub const PAIR_CAP: u8 = 2;

/// 沖 clash pairs.
pub const CLASH_PAIRS: [(Branch, Branch); 6] =
    [(Ja, O), (Chuk, Mi), (In, Sin), (Myo, Yu), (Jin, Sul), (Sa, Hae)];

/// 六合 six-combination pairs.
pub const COMBINATION_PAIRS: [(Branch, Branch); 6] =
    [(Ja, Chuk), (In, Hae), (Myo, Sul), (Jin, Yu), (Sa, Sin), (O, Mi)];

/// 破 breaking pairs.
pub const BREAKING_PAIRS: [(Branch, Branch); 6] =
    [(Ja, Yu), (Chuk, Jin), (In, Hae), (Myo, O), (Sa, Sin), (Mi, Sul)];

/// 害 harm pairs.
pub const HARM_PAIRS: [(Branch, Branch); 6] =
    [(Ja, Mi), (Chuk, O), (In, Sa), (Myo, Jin), (Sin, Hae), (Yu, Sul)];

/// 刑 punishment groups.
pub const PUNISHMENT_GROUPS: [&[Branch]; 3] = [&[In, Sa, Sin], &[Chuk, Mi, Sul], &[Ja, Myo]];

/// 自刑 self-punishment branches.
pub const SELF_PUNISHMENT: [Branch; 4] = [Jin, O, Yu, Hae];

/// 三合 triad groups.
pub const TRIAD_GROUPS: [[Branch; 3]; 4] =
    [[Sin, Ja, Jin], [Hae, Myo, Mi], [In, O, Sul], [Sa, Yu, Chuk]];

/// 方合 seasonal quartet groups.
pub const QUARTET_GROUPS: [[Branch; 3]; 4] =
    [[In, Myo, Jin], [Sa, O, Mi], [Sin, Yu, Sul], [Hae, Ja, Chuk]];

/// Counts of each interaction type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct InteractionEvents {
    /// 沖
    pub clash: u8,
    /// 六合
    pub combination: u8,
    /// 刑
    pub punishment: u8,
    /// 破
    pub breaking: u8,
    /// 害
    pub harm: u8,
    /// 三合
    pub triad: u8,
    /// 方合
    pub quartet: u8,
}

impl InteractionEvents {
    /// Combination + triad + quartet.
    pub fn positive(&self) -> u8 {
        self.combination + self.triad + self.quartet
    }

    /// Clash + punishment + breaking + harm.
    pub fn negative(&self) -> u8 {
        self.clash + self.punishment + self.breaking + self.harm
    }
}

/// True if `{a, b}` appears in `pairs`, in either order.
pub fn has_pair(pairs: &[(Branch, Branch)], a: Branch, b: Branch) -> bool {
    pairs
        .iter()
        .any(|&(x, y)| (x == a && y == b) || (x == b && y == a))
}

fn pair_count(pairs: &[(Branch, Branch)], natal: &[Branch; 4], incoming: Branch) -> u8 {
    let n = natal.iter().filter(|nb| has_pair(pairs, **nb, incoming)).count() as u8;
    n.min(PAIR_CAP)
}

/// Interaction events of `incoming` against the four natal branches.
pub fn interaction_events(natal: &[Branch; 4], incoming: Branch) -> InteractionEvents {
    let present = |b: &Branch| natal.contains(b) || *b == incoming;

    let mut punishment = 0;
    for group in PUNISHMENT_GROUPS {
        let c = group.iter().filter(|b| present(b)).count();
        punishment += match (group.len(), c) {
            (3, 2) => 1,
            (3, 3) => 2,
            (2, 2) => 1,
            _ => 0,
        };
    }
    if SELF_PUNISHMENT.contains(&incoming) && natal.contains(&incoming) {
        punishment += 1;
    }

    let complete = |g: &[Branch; 3]| g.iter().all(present);
    let triad = TRIAD_GROUPS.iter().filter(|g| complete(g)).count() as u8;
    let quartet = QUARTET_GROUPS.iter().filter(|g| complete(g)).count() as u8;

    InteractionEvents {
        clash: pair_count(&CLASH_PAIRS, natal, incoming),
        combination: pair_count(&COMBINATION_PAIRS, natal, incoming),
        punishment,
        breaking: pair_count(&BREAKING_PAIRS, natal, incoming),
        harm: pair_count(&HARM_PAIRS, natal, incoming),
        triad,
        quartet,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_clash() {
        let ev = interaction_events(&[Ja, In, Jin, Sul], O);
        assert_eq!(ev.clash, 1);
    }

    #[test]
    fn clash_capped_at_two() {
        let ev = interaction_events(&[Ja, Ja, Ja, Ja], O);
        assert_eq!(ev.clash, 2);
    }

    #[test]
    fn pair_lookup_is_unordered() {
        assert!(has_pair(&CLASH_PAIRS, O, Ja));
        assert!(has_pair(&CLASH_PAIRS, Ja, O));
        assert!(!has_pair(&CLASH_PAIRS, Ja, Chuk));
    }

    #[test]
    fn six_combination_and_breaking_overlap() {
        // 寅亥 is both 六合 and 破
        let ev = interaction_events(&[Hae, Ja, Ja, Ja], In);
        assert_eq!(ev.combination, 1);
        assert_eq!(ev.breaking, 1);
    }

    #[test]
    fn three_way_punishment() {
        let ev = interaction_events(&[In, Sa, Ja, Ja], Sin);
        // 寅巳申 complete (+2); 子卯 absent
        assert_eq!(ev.punishment, 2);
    }

    #[test]
    fn two_of_three_punishment() {
        let ev = interaction_events(&[Chuk, Ja, Ja, Ja], Mi);
        assert_eq!(ev.punishment, 1);
    }

    #[test]
    fn rat_rabbit_punishment() {
        let ev = interaction_events(&[Ja, Yu, Yu, Yu], Myo);
        assert_eq!(ev.punishment, 1);
    }

    #[test]
    fn self_punishment_needs_natal_copy() {
        assert_eq!(interaction_events(&[O, Ja, Ja, Ja], O).punishment, 1);
        assert_eq!(interaction_events(&[Ja, Ja, Ja, Ja], O).punishment, 0);
        // 子 is not in the self list
        assert_eq!(interaction_events(&[Ja, In, In, In], Ja).punishment, 0);
    }

    #[test]
    fn triad_completed_by_incoming_branch() {
        let ev = interaction_events(&[Sin, Ja, Yu, Yu], Jin);
        assert_eq!(ev.triad, 1);
        let partial = interaction_events(&[Sin, Yu, Yu, Yu], Jin);
        assert_eq!(partial.triad, 0);
    }

    #[test]
    fn quartet_completed_by_incoming_branch() {
        let ev = interaction_events(&[In, Myo, Yu, Yu], Jin);
        assert_eq!(ev.quartet, 1);
    }

    #[test]
    fn positive_negative_sums() {
        let ev = InteractionEvents {
            clash: 1,
            combination: 2,
            punishment: 1,
            breaking: 0,
            harm: 1,
            triad: 1,
            quartet: 0,
        };
        assert_eq!(ev.positive(), 3);
        assert_eq!(ev.negative(), 3);
    }
}
