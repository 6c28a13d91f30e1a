//! Join of locations and metadata by id, with per-type aggregates.
//!
//! Aggregates only count metadata whose id exists among the locations. The
//! outer difference is reported separately in both directions: locations no
//! metadata references ([`Summary::invalid_locations`]) and metadata ids with
//! no location ([`Summary::unmatched_metadata`]).

use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::model::{Location, Metadata};

/// Count and rating total for one metadata type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeStats {
    pub count: usize,
    pub rating_sum: f64,
    pub average_rating: f64,
}

/// The metadata record with the most reviews, joined with its location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MostReviewed {
    pub metadata: Metadata,
    pub location: Location,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Summary {
    /// Keyed by type name, so iteration order is stable.
    pub type_stats: BTreeMap<String, TypeStats>,
    pub most_reviewed: Option<MostReviewed>,
    pub invalid_locations: Vec<Location>,
    pub unmatched_metadata: Vec<String>,

    pub total_locations: usize,
    pub total_metadata: usize,
    pub matched_records: usize,
}

impl Summary {
    pub fn from_records(locations: &[Location], metadata: &[Metadata]) -> Self {
        // Later duplicates replace earlier ones.
        let location_index: HashMap<&str, &Location> =
            locations.iter().map(|l| (l.id.as_str(), l)).collect();

        let mut s = Summary {
            total_locations: location_index.len(),
            total_metadata: metadata.len(),
            ..Default::default()
        };

        let mut running: BTreeMap<&str, (usize, f64)> = BTreeMap::new();
        let mut most_reviewed: Option<(&Metadata, &Location)> = None;

        for meta in metadata {
            let Some(&location) = location_index.get(meta.id.as_str()) else {
                s.unmatched_metadata.push(meta.id.clone());
                continue;
            };

            s.matched_records += 1;

            let entry = running.entry(meta.kind.as_str()).or_insert((0, 0.0));
            entry.0 += 1;
            entry.1 += meta.rating;

            // Strictly greater keeps the first record on ties.
            if most_reviewed.is_none_or(|(best, _)| meta.reviews > best.reviews) {
                most_reviewed = Some((meta, location));
            }
        }

        s.type_stats = running
            .into_iter()
            .map(|(kind, (count, rating_sum))| {
                (
                    kind.to_string(),
                    TypeStats {
                        count,
                        rating_sum,
                        average_rating: rating_sum / count as f64,
                    },
                )
            })
            .collect();

        s.most_reviewed = most_reviewed.map(|(meta, location)| MostReviewed {
            metadata: meta.clone(),
            location: location.clone(),
        });

        let metadata_ids: HashSet<&str> = metadata.iter().map(|m| m.id.as_str()).collect();
        let mut reported: HashSet<&str> = HashSet::new();

        for loc in locations {
            let id = loc.id.as_str();
            if metadata_ids.contains(id) || !reported.insert(id) {
                continue;
            }
            s.invalid_locations.push(location_index[id].clone());
        }

        s
    }

    pub fn type_counts(&self) -> BTreeMap<&str, usize> {
        self.type_stats
            .iter()
            .map(|(kind, t)| (kind.as_str(), t.count))
            .collect()
    }

    pub fn type_averages(&self) -> BTreeMap<&str, f64> {
        self.type_stats
            .iter()
            .map(|(kind, t)| (kind.as_str(), t.average_rating))
            .collect()
    }
}
