//! Named event/score patterns ("combos") and event intensity levels.

use std::fmt;

use serde::Serialize;

use saju_base::InteractionEvents;

use crate::score::{CategoryScores, total_score};

/// Maximum combos attached to one period.
pub const MAX_COMBOS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Combo {
    /// Two or more clashes plus two or more of breaking/punishment/harm.
    Crash,
    /// Two or more combinations or triads, no clash, total ≥ 75.
    Breakthrough,
    MoneyLeak,
    LoveConflict,
    HealthStress,
    LoveBoost,
    Teamwork,
    ChangeChance,
}

/// Order in which the primary combo is chosen.
const PRIMARY_ORDER: [Combo; 8] = [
    Combo::Crash,
    Combo::Breakthrough,
    Combo::MoneyLeak,
    Combo::LoveConflict,
    Combo::HealthStress,
    Combo::Teamwork,
    Combo::LoveBoost,
    Combo::ChangeChance,
];

/// Order in which secondary combos are appended.
const SECONDARY_ORDER: [Combo; 7] = [
    Combo::Breakthrough,
    Combo::MoneyLeak,
    Combo::LoveConflict,
    Combo::HealthStress,
    Combo::Teamwork,
    Combo::LoveBoost,
    Combo::ChangeChance,
];

impl Combo {
    /// Stable key, also used for phrase-book lookups.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Crash => "crash",
            Self::Breakthrough => "breakthrough",
            Self::MoneyLeak => "money_leak",
            Self::LoveConflict => "love_conflict",
            Self::HealthStress => "health_stress",
            Self::LoveBoost => "love_boost",
            Self::Teamwork => "teamwork",
            Self::ChangeChance => "change_chance",
        }
    }

    /// Whether the predicate holds for the given events and scores.
    pub fn matches(self, ev: &InteractionEvents, cats: &CategoryScores) -> bool {
        let hap_like = ev.combination + ev.triad;
        match self {
            Self::Crash => ev.clash >= 2 && ev.breaking + ev.punishment + ev.harm >= 2,
            Self::Breakthrough => hap_like >= 2 && ev.clash == 0 && total_score(cats) >= 75,
            Self::MoneyLeak => ev.breaking >= 1 && ev.clash >= 1,
            Self::LoveConflict => ev.clash + ev.punishment >= 2,
            Self::HealthStress => {
                ev.punishment + ev.harm >= 2 || (ev.clash >= 1 && cats.health <= 55.0)
            }
            Self::LoveBoost => hap_like >= 1 && cats.love >= 70.0,
            Self::Teamwork => hap_like >= 1 && cats.career >= 70.0,
            Self::ChangeChance => ev.clash >= 1 && cats.career >= 70.0 && ev.positive() > 0,
        }
    }
}

impl fmt::Display for Combo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Primary combo by priority, then distinct secondaries, at most three.
pub fn detect_combos(ev: &InteractionEvents, cats: &CategoryScores) -> Vec<Combo> {
    let mut out = Vec::with_capacity(MAX_COMBOS);
    if let Some(primary) = PRIMARY_ORDER.iter().find(|c| c.matches(ev, cats)) {
        out.push(*primary);
    }
    for c in SECONDARY_ORDER {
        if out.len() >= MAX_COMBOS {
            break;
        }
        if !out.contains(&c) && c.matches(ev, cats) {
            out.push(c);
        }
    }
    out
}

/// Intensity of the positive or negative side of a period's events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventLevel {
    None,
    Light,
    Medium,
    Strong,
}

impl EventLevel {
    pub const fn from_count(n: u8) -> Self {
        match n {
            0 => Self::None,
            1 => Self::Light,
            2 => Self::Medium,
            _ => Self::Strong,
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Light => "light",
            Self::Medium => "medium",
            Self::Strong => "strong",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EventLevels {
    pub positive_count: u8,
    pub negative_count: u8,
    pub positive: EventLevel,
    pub negative: EventLevel,
}

/// Positive (combination + triad + quartet) and negative (clash +
/// punishment + breaking + harm) intensity.
pub fn event_levels(ev: &InteractionEvents) -> EventLevels {
    let (p, n) = (ev.positive(), ev.negative());
    EventLevels {
        positive_count: p,
        negative_count: n,
        positive: EventLevel::from_count(p),
        negative: EventLevel::from_count(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cats(v: f64) -> CategoryScores {
        CategoryScores::from_fn(|_| v)
    }

    #[test]
    fn crash_is_primary() {
        let ev = InteractionEvents {
            clash: 2,
            breaking: 1,
            harm: 1,
            ..Default::default()
        };
        let combos = detect_combos(&ev, &cats(50.0));
        assert_eq!(combos[0], Combo::Crash);
        // MoneyLeak, LoveConflict and HealthStress also hold; capped at 3
        assert_eq!(
            combos,
            vec![Combo::Crash, Combo::MoneyLeak, Combo::LoveConflict]
        );
    }

    #[test]
    fn breakthrough_needs_high_total_and_no_clash() {
        let ev = InteractionEvents {
            combination: 1,
            triad: 1,
            ..Default::default()
        };
        assert_eq!(
            detect_combos(&ev, &cats(80.0)),
            vec![Combo::Breakthrough, Combo::Teamwork, Combo::LoveBoost]
        );
        assert_eq!(
            detect_combos(&ev, &cats(60.0)),
            Vec::<Combo>::new(),
            "total below 75 and categories below 70"
        );
    }

    #[test]
    fn teamwork_outranks_love_boost() {
        let ev = InteractionEvents {
            combination: 1,
            ..Default::default()
        };
        let c = CategoryScores {
            love: 72.0,
            money: 60.0,
            career: 71.0,
            health: 60.0,
        };
        assert_eq!(detect_combos(&ev, &c), vec![Combo::Teamwork, Combo::LoveBoost]);
    }

    #[test]
    fn quartet_alone_does_not_count_as_hap() {
        let ev = InteractionEvents {
            quartet: 1,
            ..Default::default()
        };
        assert!(detect_combos(&ev, &cats(90.0)).is_empty());
    }

    #[test]
    fn no_duplicates() {
        let ev = InteractionEvents {
            clash: 1,
            breaking: 1,
            combination: 1,
            ..Default::default()
        };
        let combos = detect_combos(&ev, &cats(75.0));
        let mut dedup = combos.clone();
        dedup.dedup();
        assert_eq!(combos, dedup);
        assert!(combos.len() <= MAX_COMBOS);
    }

    #[test]
    fn levels() {
        let ev = InteractionEvents {
            clash: 2,
            harm: 1,
            combination: 1,
            ..Default::default()
        };
        let l = event_levels(&ev);
        assert_eq!(l.positive, EventLevel::Light);
        assert_eq!(l.negative, EventLevel::Strong);
        assert_eq!(event_levels(&InteractionEvents::default()).positive, EventLevel::None);
    }
}
