//! Deterministic in-memory provider.
//!
//! Carries a tiny built-in gazetteer so the CLI works offline and tests get
//! reproducible outcomes. Matching is substring, case-insensitive, and scoped
//! by the query's search area when one is given.

use std::time::Duration;

use crate::geo::{GeoCoordinate, SearchArea};
use crate::model::ResultItem;
use crate::providers::{ProviderFuture, SearchProvider};
use crate::query::Query;

#[derive(Debug, Clone)]
struct FixtureEntry {
    name: &'static str,
    address: &'static str,
    category: &'static str,
    lat: f64,
    lon: f64,
}

const GAZETTEER: &[FixtureEntry] = &[
    FixtureEntry {
        name: "Berlin",
        address: "Berlin, Germany",
        category: "city",
        lat: 52.5200,
        lon: 13.4050,
    },
    FixtureEntry {
        name: "Alexanderplatz",
        address: "Alexanderplatz, 10178 Berlin, Germany",
        category: "square",
        lat: 52.5219,
        lon: 13.4132,
    },
    FixtureEntry {
        name: "Brandenburg Gate",
        address: "Pariser Platz, 10117 Berlin, Germany",
        category: "monument",
        lat: 52.5163,
        lon: 13.3777,
    },
    FixtureEntry {
        name: "Curry 36",
        address: "Mehringdamm 36, 10961 Berlin, Germany",
        category: "restaurant",
        lat: 52.4938,
        lon: 13.3879,
    },
    FixtureEntry {
        name: "Cafe Einstein",
        address: "Kurfuerstenstrasse 58, 10785 Berlin, Germany",
        category: "restaurant",
        lat: 52.5010,
        lon: 13.3585,
    },
    FixtureEntry {
        name: "Paris",
        address: "Paris, France",
        category: "city",
        lat: 48.8566,
        lon: 2.3522,
    },
];

/// In-memory [`SearchProvider`] over the built-in gazetteer.
pub struct FixtureProvider {
    latency: Duration,
}

impl FixtureProvider {
    pub fn new() -> Self {
        Self {
            latency: Duration::ZERO,
        }
    }

    /// Delay every response, to exercise loading states interactively.
    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }

    fn resolve(query: &Query) -> Vec<ResultItem> {
        match query {
            Query::Geocode { text, area } => {
                let needle = text.to_lowercase();
                GAZETTEER
                    .iter()
                    .filter(|e| e.name.to_lowercase().contains(&needle))
                    .filter(|e| in_area(e, area.as_ref()))
                    .map(|e| ResultItem::GeocodeMatch {
                        address: e.address.to_string(),
                        coordinate: entry_coordinate(e),
                    })
                    .collect()
            }
            Query::ReverseGeocode { coordinate } => {
                // Nearest entry stands in for the address at the probe point.
                GAZETTEER
                    .iter()
                    .min_by(|a, b| {
                        distance(a, *coordinate)
                            .partial_cmp(&distance(b, *coordinate))
                            .unwrap_or(std::cmp::Ordering::Equal)
                    })
                    .map(|e| ResultItem::GeocodeMatch {
                        address: e.address.to_string(),
                        coordinate: *coordinate,
                    })
                    .into_iter()
                    .collect()
            }
            Query::Discover { text, area } => {
                let needle = text.to_lowercase();
                let mut items: Vec<ResultItem> = GAZETTEER
                    .iter()
                    .filter(|e| {
                        e.name.to_lowercase().contains(&needle)
                            || e.category.to_lowercase().contains(&needle)
                    })
                    .filter(|e| in_area(e, Some(area)))
                    .map(|e| ResultItem::Place {
                        name: e.name.to_string(),
                        address: Some(e.address.to_string()),
                        coordinate: entry_coordinate(e),
                    })
                    .collect();
                if !items.is_empty() {
                    items.push(ResultItem::DiscoveryLink {
                        title: format!("More results for \"{text}\""),
                    });
                }
                items
            }
            Query::Around { category, area } => {
                let needle = category.to_lowercase();
                GAZETTEER
                    .iter()
                    .filter(|e| e.category.to_lowercase() == needle)
                    .filter(|e| in_area(e, Some(area)))
                    .map(|e| ResultItem::Place {
                        name: e.name.to_string(),
                        address: Some(e.address.to_string()),
                        coordinate: entry_coordinate(e),
                    })
                    .collect()
            }
        }
    }
}

impl Default for FixtureProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchProvider for FixtureProvider {
    fn execute(&self, query: Query) -> ProviderFuture {
        let latency = self.latency;
        Box::pin(async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            Ok(FixtureProvider::resolve(&query))
        })
    }

    fn name(&self) -> &'static str {
        "fixture"
    }
}

fn entry_coordinate(entry: &FixtureEntry) -> GeoCoordinate {
    GeoCoordinate {
        lat: entry.lat,
        lon: entry.lon,
    }
}

fn in_area(entry: &FixtureEntry, area: Option<&SearchArea>) -> bool {
    let Some(area) = area else { return true };
    let bbox = area.to_bounding_box();
    entry.lat >= bbox.south_west.lat
        && entry.lat <= bbox.north_east.lat
        && entry.lon >= bbox.south_west.lon
        && entry.lon <= bbox.north_east.lon
}

// Squared equirectangular distance; only used for ordering.
fn distance(entry: &FixtureEntry, point: GeoCoordinate) -> f64 {
    let dlat = entry.lat - point.lat;
    let dlon = (entry.lon - point.lon) * point.lat.to_radians().cos();
    dlat * dlat + dlon * dlon
}
