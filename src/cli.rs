//! Command-line surface for the `mps` binary.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Parser, ValueEnum};

use crate::config::AppConfig;
use crate::geo::{GeoCoordinate, SearchArea};
use crate::query::Query;

#[derive(Parser, Debug)]
#[command(
    name = "mps",
    version,
    about = "Search places and keep map annotations in sync with the latest query"
)]
pub struct Cli {
    /// Query text: an address for geocode, free text for discover, a category
    /// for around. Unused by reverse lookups.
    pub text: Option<String>,

    /// Which request type to issue.
    #[arg(long, value_enum, default_value_t = KindArg::Geocode)]
    pub kind: KindArg,

    /// Search backend.
    #[arg(long, value_enum, default_value_t = ProviderArg::Fixture)]
    pub provider: ProviderArg,

    /// Latitude for reverse lookups, or to override the configured area center.
    #[arg(long)]
    pub lat: Option<f64>,

    /// Longitude, paired with --lat.
    #[arg(long)]
    pub lon: Option<f64>,

    /// Search radius in meters, overriding the configured area radius.
    #[arg(long)]
    pub radius: Option<u32>,

    /// Restrict geocoding to the search area instead of searching globally.
    #[arg(long)]
    pub bounded: bool,

    /// Config file path (default: platform config dir).
    #[arg(long, env = "MPS_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindArg {
    Geocode,
    Reverse,
    Discover,
    Around,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderArg {
    /// Built-in offline gazetteer.
    Fixture,
    /// Public OSM Nominatim API.
    Nominatim,
}

impl Cli {
    /// Resolve CLI arguments plus config defaults into a concrete [`Query`].
    ///
    /// Empty text is deliberately *not* rejected here; it flows into the
    /// coordinator so the empty-input path behaves the same from every entry
    /// point.
    pub fn to_query(&self, config: &AppConfig) -> Result<Query> {
        let area = self.search_area(config)?;
        let text = self.text.clone().unwrap_or_default();
        Ok(match self.kind {
            KindArg::Geocode => Query::Geocode {
                text,
                area: self.bounded.then_some(area),
            },
            KindArg::Reverse => {
                let (Some(lat), Some(lon)) = (self.lat, self.lon) else {
                    bail!("--kind reverse requires --lat and --lon");
                };
                Query::ReverseGeocode {
                    coordinate: GeoCoordinate::new(lat, lon)?,
                }
            }
            KindArg::Discover => Query::Discover { text, area },
            KindArg::Around => Query::Around {
                category: text,
                area,
            },
        })
    }

    fn search_area(&self, config: &AppConfig) -> Result<SearchArea> {
        let center = match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => GeoCoordinate::new(lat, lon)?,
            (None, None) => config.default_area.center,
            _ => bail!("--lat and --lon must be given together"),
        };
        let radius_m = self.radius.unwrap_or(config.default_area.radius_m);
        Ok(SearchArea::new(center, radius_m))
    }
}
