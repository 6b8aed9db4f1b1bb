//! Deterministic phrase selection.
//!
//! A seed string is hashed with 32-bit FNV-1a over its UTF-16 code units,
//! the hash seeds a mulberry32 generator, and the first draw picks an
//! index. The same seed always picks the same entry.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::combo::{Combo, EventLevel, EventLevels};
use crate::error::{FortuneError, config};
use crate::reading::Reading;
use crate::score::{ALL_CATEGORIES, Category, CategoryScores, Grade};
use crate::timeline::{LuckPeriod, PeriodLevel};

const FNV_OFFSET: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a over UTF-16 code units.
pub fn seed_hash(s: &str) -> u32 {
    s.encode_utf16()
        .fold(FNV_OFFSET, |h, u| (h ^ u32::from(u)).wrapping_mul(FNV_PRIME))
}

/// mulberry32 pseudo-random generator, uniform in `[0, 1)`.
#[derive(Debug, Clone)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let a = self.state;
        let mut t = (a ^ (a >> 15)).wrapping_mul(1 | a);
        t = t.wrapping_add((t ^ (t >> 7)).wrapping_mul(61 | t)) ^ t;
        t ^ (t >> 14)
    }

    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }
}

/// Pick an entry of `pool` by seed; `None` for an empty pool.
pub fn pick_deterministic<'a, T>(pool: &'a [T], seed: &str) -> Option<&'a T> {
    if pool.is_empty() {
        return None;
    }
    let r = Mulberry32::new(seed_hash(seed)).next_f64();
    let idx = ((r * pool.len() as f64) as usize).min(pool.len() - 1);
    pool.get(idx)
}

/// Seed for a period phrase: `"{name}|{level}|{label}|{category}"`.
pub fn period_seed(name: &str, level: PeriodLevel, label: &str, category: Category) -> String {
    format!("{name}|{}|{label}|{category}", level.name())
}

/// Pool key for a category's grade band, e.g. `score.love.A`.
pub fn score_key(category: Category, grade: Grade) -> String {
    format!("score.{category}.{grade}")
}

/// Pool key for a combo, e.g. `combo.crash`.
pub fn combo_key(combo: Combo) -> String {
    format!("combo.{}", combo.key())
}

/// Pool key for an event phrase, e.g. `event.neg.medium.health`.
pub fn event_key(positive: bool, level: EventLevel, category: Category) -> String {
    let side = if positive { "pos" } else { "neg" };
    format!("event.{side}.{}.{category}", level.key())
}

/// Pool keys of one category of a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhraseKeys {
    pub category: Category,
    /// Grade band of the category score.
    pub score: String,
    /// Absent when the period has no positive events.
    pub positive: Option<String>,
    pub negative: Option<String>,
    /// Key of the primary combo.
    pub combo: Option<String>,
}

/// Keys for every category, in [`ALL_CATEGORIES`] order.
pub fn phrase_keys(
    categories: &CategoryScores,
    levels: &EventLevels,
    primary_combo: Option<Combo>,
) -> Vec<PhraseKeys> {
    let event = |positive: bool, level: EventLevel, c: Category| {
        (level != EventLevel::None).then(|| event_key(positive, level, c))
    };
    ALL_CATEGORIES
        .iter()
        .map(|&c| PhraseKeys {
            category: c,
            score: score_key(c, Grade::from_total(categories.get(c).round() as u8)),
            positive: event(true, levels.positive, c),
            negative: event(false, levels.negative, c),
            combo: primary_combo.map(combo_key),
        })
        .collect()
}

/// Phrases picked for one category of a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryText {
    pub category: Category,
    pub score: Option<String>,
    pub positive: Option<String>,
    pub negative: Option<String>,
    pub combo: Option<String>,
}

/// Phrases for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodText {
    pub level: PeriodLevel,
    pub label: String,
    pub categories: Vec<CategoryText>,
}

/// Pick every phrase of `period` from `book`.
///
/// The seed is [`period_seed`]; event phrases append `|pos` or `|neg` and
/// the combo phrase `|combo|{key}`. A combo pool per category
/// (`combo.crash.love`) wins over the shared one (`combo.crash`).
pub fn render_period(book: &PhraseBook, name: &str, period: &LuckPeriod) -> PeriodText {
    let categories = period
        .phrase_keys
        .iter()
        .map(|k| {
            let base = period_seed(name, period.level, &period.label, k.category);
            let pick = |key: Option<&str>, seed: String| {
                key.and_then(|key| book.pick(key, &seed)).map(str::to_owned)
            };
            let combo = k.combo.as_deref().and_then(|key| {
                let seed = format!("{base}|combo|{key}");
                book.pick(&format!("{key}.{}", k.category), &seed)
                    .or_else(|| book.pick(key, &seed))
                    .map(str::to_owned)
            });
            CategoryText {
                category: k.category,
                score: pick(Some(k.score.as_str()), base.clone()),
                positive: pick(k.positive.as_deref(), format!("{base}|pos")),
                negative: pick(k.negative.as_deref(), format!("{base}|neg")),
                combo,
            }
        })
        .collect();
    PeriodText {
        level: period.level,
        label: period.label.clone(),
        categories,
    }
}

/// Phrases for every decade, year and month of a reading.
pub fn render_reading(book: &PhraseBook, name: &str, reading: &Reading) -> Vec<PeriodText> {
    reading
        .decades
        .decades
        .iter()
        .chain(reading.years.iter().map(|y| &y.period))
        .chain(
            reading
                .months
                .iter()
                .flat_map(|t| t.months.iter().map(|m| &m.period)),
        )
        .map(|p| render_period(book, name, p))
        .collect()
}

/// Phrase pools keyed by string. Contents are opaque to the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhraseBook {
    pools: BTreeMap<String, Vec<String>>,
}

impl PhraseBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, phrases: Vec<String>) {
        self.pools.insert(key.into(), phrases);
    }

    pub fn pool(&self, key: &str) -> Option<&[String]> {
        self.pools.get(key).map(Vec::as_slice)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pools.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Phrase for `key` chosen by `seed`; `None` if the pool is missing or empty.
    pub fn pick(&self, key: &str, seed: &str) -> Option<&str> {
        self.pool(key)
            .and_then(|p| pick_deterministic(p, seed))
            .map(String::as_str)
    }

    /// Parse a JSON object of `key → [phrase, ...]`.
    pub fn from_json_str(s: &str) -> Result<Self, FortuneError> {
        serde_json::from_str(s).map_err(|e| config(format!("phrase book: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FortuneError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }
}
