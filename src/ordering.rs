//! Client-side ordering of fetched records.
//!
//! All functions here are pure: they take a list and return (or reorder) it
//! without touching the network. Randomness comes from a caller-supplied
//! [`Rng`] so tests can pin it with a seed.

use rand::Rng;
use rand::seq::SliceRandom;
use std::cmp::Ordering;

use crate::types::{Feather, PaintingRecord};

/// Uniformly random permutation of `records`.
pub fn shuffle<T, R: Rng + ?Sized>(mut records: Vec<T>, rng: &mut R) -> Vec<T> {
    records.shuffle(rng);
    records
}

/// Ascending by catalog number; records without one (spirits) sort by id
/// after all numbered records.
pub fn sort_by_identifier(records: &mut [PaintingRecord]) {
    records.sort_by(|a, b| match (a.number(), b.number()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.identifier().cmp(&b.identifier()),
    });
}

/// Newest year first, then name A→Z. Records without a year go last.
///
/// Years compare numerically when both parse, otherwise as strings.
pub fn sort_by_year_desc_then_name_asc(records: &mut [PaintingRecord]) {
    records.sort_by(|a, b| {
        compare_years(b.year(), a.year()).then_with(|| {
            let an = a.name().unwrap_or_default().to_lowercase();
            let bn = b.name().unwrap_or_default().to_lowercase();
            an.cmp(&bn)
        })
    });
}

fn compare_years(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a.map(str::trim), b.map(str::trim)) {
        (Some(x), Some(y)) => match (x.parse::<i32>(), y.parse::<i32>()) {
            (Ok(x), Ok(y)) => x.cmp(&y),
            _ => x.cmp(y),
        },
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

/// Only arrangements flagged active are shown; other records pass through.
pub fn active_arrangements(records: Vec<PaintingRecord>) -> Vec<PaintingRecord> {
    records
        .into_iter()
        .filter(|r| match r {
            PaintingRecord::Arrangement(a) => a.is_active,
            _ => true,
        })
        .collect()
}

/// Random starting position for a carousel, or `None` for an empty list.
pub fn random_index<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Option<usize> {
    (len > 0).then(|| rng.random_range(0..len))
}

/// Which relation list to follow from a feather.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Relation {
    Similar,
    Complementary,
    Triad1,
    Triad2,
}

impl Relation {
    fn ids(self, feather: &Feather) -> &[String] {
        match self {
            Relation::Similar => &feather.similar_feather_ids,
            Relation::Complementary => &feather.complementary_feather_ids,
            Relation::Triad1 => &feather.triad_1_feather_ids,
            Relation::Triad2 => &feather.triad_2_feather_ids,
        }
    }
}

/// Position in `feathers` of the first related feather that is present.
///
/// Relation ids are string-encoded numbers; entries that don't parse or
/// aren't in the list are skipped.
pub fn related_index(feathers: &[Feather], from: &Feather, relation: Relation) -> Option<usize> {
    relation
        .ids(from)
        .iter()
        .filter_map(|id| id.trim().parse::<u32>().ok())
        .find_map(|number| feathers.iter().position(|f| f.number == number))
}
