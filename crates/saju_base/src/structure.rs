//! Chart structure: the month-command pattern (格局), the 用/喜/忌/閑 split
//! of the ten gods, the balancing element (用神) and heavenly-stem relations.
//!
//! The pattern is named after the ten god of the month branch's primary
//! hidden stem. Its purity starts at 0.5 and moves with transparency,
//! abundance and a clash against the month branch, clamped to [0.1, 1.0].

use serde::Serialize;

use crate::chart::Chart;
use crate::element::{ALL_ELEMENTS, Element};
use crate::element_vector::ElementVector;
use crate::events::{CLASH_PAIRS, has_pair};
use crate::stem::{ALL_STEMS, Stem};
use crate::strength::{Strength, StrengthLabel};
use crate::ten_god::{ALL_TEN_GODS, TenGod, ten_god};

use crate::ten_god::TenGod::{
    Companion as BiGyeon, DirectOfficer as JeongGwan, DirectResource as JeongIn,
    DirectWealth as JeongJae, EatingGod as SikSin, HurtingOfficer as SangGwan,
    IndirectResource as PyeonIn, IndirectWealth as PyeonJae, RobWealth as GeopJae,
    SevenKillings as PyeonGwan,
};

const BASE_PURITY: f64 = 0.5;
const TRANSPARENT_BONUS: f64 = 0.2;
const ABUNDANT_BONUS: f64 = 0.15;
const SCARCE_PENALTY: f64 = 0.1;
const BROKEN_PENALTY: f64 = 0.25;
const MIN_PURITY: f64 = 0.1;
const MAX_PURITY: f64 = 1.0;

/// Heavenly-stem combinations (天干合): 甲己 乙庚 丙辛 丁壬 戊癸.
pub const STEM_COMBINATIONS: [(Stem, Stem); 5] = [
    (Stem::Gap, Stem::Gi),
    (Stem::Eul, Stem::Gyeong),
    (Stem::Byeong, Stem::Sin),
    (Stem::Jeong, Stem::Im),
    (Stem::Mu, Stem::Gye),
];

/// Weighted ten-god counts of a chart.
///
/// The year, month and hour stems count 1.0 each; every branch adds its
/// hidden stems at their weights. The day stem itself is not counted.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TenGodVector {
    counts: [f64; 10],
}

impl TenGodVector {
    pub fn get(&self, god: TenGod) -> f64 {
        self.counts[god.index()]
    }
}

impl Serialize for TenGodVector {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(10))?;
        for god in ALL_TEN_GODS {
            map.serialize_entry(god.hanja(), &self.get(god))?;
        }
        map.end()
    }
}

pub fn ten_god_vector(chart: &Chart) -> TenGodVector {
    let day = chart.day_stem();
    let mut counts = [0.0; 10];
    for stem in [chart.year.stem, chart.month.stem, chart.hour.stem] {
        counts[ten_god(day, stem).index()] += 1.0;
    }
    for branch in chart.branches() {
        for h in branch.hidden_stems() {
            counts[ten_god(day, h.stem).index()] += h.weight;
        }
    }
    TenGodVector { counts }
}

/// The month-command pattern of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Geok {
    /// Ten god of the month branch's primary hidden stem.
    pub main: TenGod,
    pub purity: f64,
    /// The pattern's ten god also shows on the year, month or hour stem.
    pub transparent: bool,
    /// The month branch is clashed by another natal branch (破格).
    pub broken: bool,
}

impl Geok {
    /// Pattern name, e.g. `偏官格`.
    pub fn name(&self) -> String {
        format!("{}格", self.main.hanja())
    }
}

pub fn determine_geok(chart: &Chart, gods: &TenGodVector) -> Geok {
    let day = chart.day_stem();
    let month_branch = chart.month.branch;
    // every branch has a primary hidden stem
    let primary = month_branch.hidden_stems()[0].stem;
    let main = ten_god(day, primary);

    let mut purity = BASE_PURITY;

    let transparent = [chart.year.stem, chart.month.stem, chart.hour.stem]
        .into_iter()
        .any(|s| ten_god(day, s) == main);
    if transparent {
        purity += TRANSPARENT_BONUS;
    }

    let count = gods.get(main);
    if count >= 2.0 {
        purity += ABUNDANT_BONUS;
    } else if count < 1.0 {
        purity -= SCARCE_PENALTY;
    }

    let broken = [chart.year.branch, chart.day.branch, chart.hour.branch]
        .into_iter()
        .any(|b| has_pair(&CLASH_PAIRS, month_branch, b));
    if broken {
        purity -= BROKEN_PENALTY;
    }

    Geok {
        main,
        purity: purity.clamp(MIN_PURITY, MAX_PURITY),
        transparent,
        broken,
    }
}

/// Ten gods a pattern wants, is helped by, and fears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeokPreference {
    pub prefer: &'static [TenGod],
    pub support: &'static [TenGod],
    pub avoid: &'static [TenGod],
}

pub fn geok_preference(main: TenGod) -> GeokPreference {
    let (prefer, support, avoid): (&[TenGod], &[TenGod], &[TenGod]) = match main {
        SikSin => (&[SikSin], &[JeongJae, PyeonJae], &[PyeonIn, GeopJae]),
        SangGwan => (&[SangGwan], &[PyeonJae, JeongJae], &[JeongGwan]),
        JeongJae => (&[JeongJae], &[SikSin, SangGwan, JeongGwan], &[GeopJae]),
        PyeonJae => (&[PyeonJae], &[SikSin, SangGwan], &[GeopJae, BiGyeon]),
        JeongGwan => (&[JeongGwan], &[JeongIn, PyeonIn, JeongJae], &[SangGwan]),
        PyeonGwan => (&[PyeonGwan], &[SikSin, JeongIn], &[SangGwan]),
        JeongIn => (&[JeongIn], &[BiGyeon, JeongGwan], &[PyeonJae]),
        PyeonIn => (&[PyeonIn], &[GeopJae, PyeonGwan], &[SikSin]),
        BiGyeon => (&[BiGyeon], &[SikSin, SangGwan, PyeonGwan], &[JeongJae, PyeonJae]),
        GeopJae => (&[GeopJae], &[SangGwan, PyeonGwan], &[JeongJae]),
    };
    GeokPreference {
        prefer,
        support,
        avoid,
    }
}

const OUTPUT_WEALTH_OFFICER: [TenGod; 6] =
    [SikSin, SangGwan, PyeonJae, JeongJae, PyeonGwan, JeongGwan];

/// One role group: its ten gods and the elements they stand for.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RoleGroup {
    pub ten_gods: Vec<TenGod>,
    pub elements: Vec<Element>,
}

/// 用 (use), 喜 (welcome), 忌 (avoid) and 閑 (idle) ten gods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementRoles {
    pub yong: RoleGroup,
    pub hee: RoleGroup,
    pub gi: RoleGroup,
    pub han: RoleGroup,
    /// Objective score per ten god, in [`ALL_TEN_GODS`] order.
    pub scores: [i32; 10],
}

/// Elements of the stems that stand in `god` to `day`, deduplicated in stem order.
fn elements_of(day: Stem, gods: &[TenGod]) -> Vec<Element> {
    let mut out = Vec::new();
    for god in gods {
        for stem in ALL_STEMS {
            let e = stem.element();
            if ten_god(day, stem) == *god && !out.contains(&e) {
                out.push(e);
            }
        }
    }
    out
}

/// Rank the ten gods by pattern preference, day-master strength and
/// abundance, then split them into 用/喜/忌/閑.
///
/// The best scorer is 用, the next two 喜; anything scoring below −5 is 忌
/// and the rest 閑.
pub fn classify_elements(
    chart: &Chart,
    gods: &TenGodVector,
    strength: &Strength,
    geok: &Geok,
) -> ElementRoles {
    let day = chart.day_stem();
    let pref = geok_preference(geok.main);

    let (strength_prefer, strength_avoid): (Vec<TenGod>, &[TenGod]) = match strength.label {
        StrengthLabel::Weak => {
            let mut prefer = vec![BiGyeon, GeopJae];
            // 印: stems whose element generates the day element
            for stem in ALL_STEMS {
                if stem.element().generates() == day.element() {
                    let g = ten_god(day, stem);
                    if !prefer.contains(&g) {
                        prefer.push(g);
                    }
                }
            }
            (prefer, &OUTPUT_WEALTH_OFFICER)
        }
        StrengthLabel::Strong => (
            OUTPUT_WEALTH_OFFICER.to_vec(),
            &[BiGyeon, GeopJae, PyeonIn, JeongIn],
        ),
        StrengthLabel::Balanced => (pref.prefer.to_vec(), &[]),
    };

    let score_of = |god: TenGod| -> i32 {
        let mut s = 0;
        if pref.prefer.contains(&god) {
            s += 10;
        }
        if pref.support.contains(&god) {
            s += 5;
        }
        if pref.avoid.contains(&god) {
            s -= 10;
        }
        if strength_prefer.contains(&god) {
            s += 8;
        }
        if strength_avoid.contains(&god) {
            s -= 8;
        }
        let count = gods.get(god);
        if count > 2.5 {
            s -= 5;
        }
        if count < 0.5 {
            s += 3;
        }
        s
    };
    let scores = ALL_TEN_GODS.map(score_of);

    let mut ranked: Vec<(TenGod, i32)> = ALL_TEN_GODS.into_iter().zip(scores).collect();
    // stable: ties keep table order
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let yong = vec![ranked[0].0];
    let hee = vec![ranked[1].0, ranked[2].0];
    let mut gi = Vec::new();
    let mut han = Vec::new();
    for (god, s) in &ranked {
        if *s < -5 {
            gi.push(*god);
        } else if !yong.contains(god) && !hee.contains(god) {
            han.push(*god);
        }
    }

    let group = |ten_gods: Vec<TenGod>| RoleGroup {
        elements: elements_of(day, &ten_gods),
        ten_gods,
    };
    ElementRoles {
        yong: group(yong),
        hee: group(hee),
        gi: group(gi),
        han: group(han),
        scores,
    }
}

/// Balancing element (用神) from the surface counts.
///
/// A day element counted at most twice is fed by its generating element;
/// otherwise the element with the lowest share is chosen (first in
/// generating-cycle order on ties).
pub fn yongshin(surface: &ElementVector, day_stem: Stem) -> Element {
    let day = day_stem.element();
    if surface.get(day) <= 2.0 {
        return ALL_ELEMENTS
            .into_iter()
            .find(|e| e.generates() == day)
            .unwrap_or(day);
    }
    let mut weakest = Element::Wood;
    let mut min = f64::INFINITY;
    for (e, c) in surface.iter() {
        if c < min {
            min = c;
            weakest = e;
        }
    }
    weakest
}

/// How a period stem meets the natal stems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StemRelation {
    /// Forms a heavenly-stem combination with some natal stem.
    pub combination: bool,
    /// Its element controls the day stem's element.
    pub controls_day: bool,
}

impl StemRelation {
    pub const COMBINATION_POINTS: i32 = 8;
    pub const CONTROL_POINTS: i32 = -10;

    /// `+8` for a combination, `−10` for controlling the day stem.
    pub const fn points(&self) -> i32 {
        let mut p = 0;
        if self.combination {
            p += Self::COMBINATION_POINTS;
        }
        if self.controls_day {
            p += Self::CONTROL_POINTS;
        }
        p
    }
}

pub fn stem_combines(a: Stem, b: Stem) -> bool {
    STEM_COMBINATIONS
        .iter()
        .any(|&(x, y)| (x == a && y == b) || (x == b && y == a))
}

/// Relation of `stem` to the four natal stems.
pub fn stem_relation(stem: Stem, chart: &Chart) -> StemRelation {
    let natal = chart.pillars().map(|p| p.stem);
    StemRelation {
        combination: natal.iter().any(|n| stem_combines(stem, *n)),
        controls_day: stem.element().controls() == chart.day_stem().element(),
    }
}

/// Everything derived from the chart's structure in one pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartStructure {
    pub ten_gods: TenGodVector,
    pub geok: Geok,
    pub roles: ElementRoles,
    pub yongshin: Element,
}

pub fn analyze_structure(
    chart: &Chart,
    surface: &ElementVector,
    strength: &Strength,
) -> ChartStructure {
    let ten_gods = ten_god_vector(chart);
    let geok = determine_geok(chart, &ten_gods);
    let roles = classify_elements(chart, &ten_gods, strength, &geok);
    ChartStructure {
        ten_gods,
        geok,
        roles,
        yongshin: yongshin(surface, chart.day_stem()),
    }
}
