//! Four Pillars chart primitives.
//!
//! This crate provides:
//! - Stems, branches, elements and the hidden-stem table
//! - Sexagenary (60-cycle) index arithmetic and the `Pillar` type
//! - Chart construction from a local +09:00 birth instant
//! - Element vectors, branch interaction events, ten gods and day-master strength
//! - Chart structure: month-command pattern, ten-god roles and the balancing element
//!
//! All tables are immutable constants; every function is pure.

pub mod branch;
pub mod chart;
pub mod element;
pub mod element_vector;
pub mod error;
pub mod events;
pub mod hidden_stem;
pub mod sexagenary;
pub mod stem;
pub mod strength;
pub mod structure;
pub mod ten_god;

pub use branch::{ALL_BRANCHES, Branch, Season};
pub use chart::{
    BirthInput, Chart, ChartResult, Sex, build_chart, day_pillar, hour_branch, hour_stem,
    month_pillar, solar_year_of, year_pillar,
};
pub use element::{ALL_ELEMENTS, Element, ElementRelation, Polarity};
pub use element_vector::{ElementVector, element_vector, pillar_vector};
pub use error::BaseError;
pub use events::{InteractionEvents, interaction_events};
pub use hidden_stem::{HiddenRole, HiddenStem};
pub use sexagenary::{CYCLE_LEN, Pillar, advance, from_index, index_of};
pub use stem::{ALL_STEMS, Stem};
pub use strength::{Strength, StrengthLabel, strength};
pub use structure::{
    ChartStructure, ElementRoles, Geok, GeokPreference, RoleGroup, StemRelation, TenGodVector,
    analyze_structure, classify_elements, determine_geok, geok_preference, stem_relation,
    ten_god_vector, yongshin,
};
pub use ten_god::{ALL_TEN_GODS, TenGod, TenGodFamily, ten_god};
