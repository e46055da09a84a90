//! Provider-agnostic result model.
//!
//! Providers return heterogeneous hits; everything is normalized into
//! [`ResultItem`] so the coordinator and UI never see provider types. A
//! [`ResultSet`] is produced once per completed query and superseded wholesale
//! by the next one, never merged.

use crate::geo::GeoCoordinate;

/// One matched place, address or follow-up link.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultItem {
    /// A concrete place with a position.
    Place {
        name: String,
        address: Option<String>,
        coordinate: GeoCoordinate,
    },
    /// A refinement link; no position of its own, so it is never annotated.
    DiscoveryLink { title: String },
    /// An address match from forward or reverse geocoding.
    GeocodeMatch {
        address: String,
        coordinate: GeoCoordinate,
    },
}

impl ResultItem {
    /// The item's position, if it has one. DiscoveryLinks do not.
    pub fn coordinate(&self) -> Option<GeoCoordinate> {
        match self {
            Self::Place { coordinate, .. } | Self::GeocodeMatch { coordinate, .. } => {
                Some(*coordinate)
            }
            Self::DiscoveryLink { .. } => None,
        }
    }

    /// Primary display text for lists and marker labels.
    pub fn display_name(&self) -> &str {
        match self {
            Self::Place { name, .. } => name,
            Self::DiscoveryLink { title } => title,
            Self::GeocodeMatch { address, .. } => address,
        }
    }
}

/// Ordered results of one completed query, in provider order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    /// Sequence number of the query that produced this set.
    pub seq: u64,
    pub items: Vec<ResultItem>,
}

impl ResultSet {
    pub fn new(seq: u64, items: Vec<ResultItem>) -> Self {
        Self { seq, items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Iterate items that can be placed on a map.
    pub fn locatable(&self) -> impl Iterator<Item = (&ResultItem, GeoCoordinate)> {
        self.items
            .iter()
            .filter_map(|item| item.coordinate().map(|coord| (item, coord)))
    }
}
