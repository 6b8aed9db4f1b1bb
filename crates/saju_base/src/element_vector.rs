//! Five-element count vectors.

use std::ops::{Add, Index};

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::chart::Chart;
use crate::element::{ALL_ELEMENTS, Element};
use crate::sexagenary::Pillar;

/// Non-negative count per element, fractional when hidden stems are weighted.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ElementVector {
    counts: [f64; 5],
}

impl ElementVector {
    pub const ZERO: Self = Self { counts: [0.0; 5] };

    pub const fn from_counts(counts: [f64; 5]) -> Self {
        Self { counts }
    }

    pub fn get(&self, e: Element) -> f64 {
        self.counts[e.index()]
    }

    /// Copy with `amount` added to one element.
    #[must_use]
    pub fn with_added(mut self, e: Element, amount: f64) -> Self {
        self.counts[e.index()] += amount;
        self
    }

    pub fn total(&self) -> f64 {
        self.counts.iter().sum()
    }

    /// Σ |count − target| over the five elements.
    pub fn imbalance(&self, target: f64) -> f64 {
        self.counts.iter().map(|c| (c - target).abs()).sum()
    }

    /// `(element, count)` pairs in generating-cycle order.
    pub fn iter(&self) -> impl Iterator<Item = (Element, f64)> + '_ {
        ALL_ELEMENTS.iter().map(move |e| (*e, self.get(*e)))
    }

    pub fn as_array(&self) -> [f64; 5] {
        self.counts
    }
}

impl Index<Element> for ElementVector {
    type Output = f64;

    fn index(&self, e: Element) -> &f64 {
        &self.counts[e.index()]
    }
}

impl Add for ElementVector {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let mut counts = self.counts;
        for (c, r) in counts.iter_mut().zip(rhs.counts) {
            *c += r;
        }
        Self { counts }
    }
}

impl Serialize for ElementVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(5))?;
        for (e, v) in self.iter() {
            map.serialize_entry(e.name(), &v)?;
        }
        map.end()
    }
}

/// Surface vector of a single pillar: one for its stem, one for its branch.
pub fn pillar_vector(p: Pillar) -> ElementVector {
    ElementVector::ZERO
        .with_added(p.stem.element(), 1.0)
        .with_added(p.branch.element(), 1.0)
}

/// Element vector of a chart.
///
/// Surface counts one per stem and one per branch (8 total). With
/// `include_hidden`, each branch's weighted hidden stems are added on top.
pub fn element_vector(chart: &Chart, include_hidden: bool) -> ElementVector {
    let mut v = chart
        .pillars()
        .into_iter()
        .fold(ElementVector::ZERO, |acc, p| acc + pillar_vector(p));
    if include_hidden {
        for b in chart.branches() {
            for h in b.hidden_stems() {
                v = v.with_added(h.stem.element(), h.weight);
            }
        }
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branch::Branch;
    use crate::stem::Stem;

    fn chart_of(idx: [u8; 4]) -> Chart {
        Chart {
            year: Pillar::from_index(idx[0]),
            month: Pillar::from_index(idx[1]),
            day: Pillar::from_index(idx[2]),
            hour: Pillar::from_index(idx[3]),
        }
    }

    #[test]
    fn surface_totals_eight() {
        let v = element_vector(&chart_of([40, 2, 17, 33]), false);
        assert!((v.total() - 8.0).abs() < 1e-12);
    }

    #[test]
    fn hidden_adds_one_per_branch() {
        let c = chart_of([40, 2, 17, 33]);
        let v = element_vector(&c, true);
        assert!((v.total() - 12.0).abs() < 1e-9);
    }

    #[test]
    fn gapja_pillar() {
        let v = pillar_vector(Pillar::from_index(0));
        assert_eq!(v[Element::Wood], 1.0);
        assert_eq!(v[Element::Water], 1.0);
        assert_eq!(v.total(), 2.0);
    }

    #[test]
    fn hidden_weights_applied() {
        // all four branches 子: hidden 癸 (water, 1.0) each
        let p = Pillar::new(Stem::Gap, Branch::Ja).unwrap();
        let c = Chart {
            year: p,
            month: p,
            day: p,
            hour: p,
        };
        let v = element_vector(&c, true);
        assert_eq!(v[Element::Wood], 4.0);
        assert_eq!(v[Element::Water], 8.0);
    }

    #[test]
    fn imbalance_of_even_vector_is_zero() {
        let v = ElementVector::from_counts([2.0; 5]);
        assert_eq!(v.imbalance(2.0), 0.0);
    }
}
