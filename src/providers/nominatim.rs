//! OSM Nominatim provider.
//!
//! Talks to the public Nominatim HTTP API (or a self-hosted instance via
//! `base_url`). Forward geocoding and discovery use `/search`, reverse uses
//! `/reverse`; area-scoped queries are translated to a bounded `viewbox`.
//! Nominatim asks for a descriptive User-Agent, so we always send one.

use serde::Deserialize;

use crate::geo::GeoCoordinate;
use crate::model::ResultItem;
use crate::providers::{ProviderError, ProviderFuture, SearchProvider};
use crate::query::Query;

const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";
const USER_AGENT: &str = concat!("map-place-search/", env!("CARGO_PKG_VERSION"));
const MAX_RESULTS: usize = 10;

#[derive(Deserialize)]
struct SearchRow {
    lat: String,
    lon: String,
    display_name: String,
}

#[derive(Deserialize)]
struct ReverseRow {
    display_name: String,
}

/// [`SearchProvider`] backed by the Nominatim HTTP API.
pub struct NominatimProvider {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn search_url(&self, text: &str, query: &Query) -> String {
        let mut url = format!(
            "{}/search?format=jsonv2&limit={}&q={}",
            self.base_url,
            MAX_RESULTS,
            urlencoding::encode(text)
        );
        let area = match query {
            Query::Geocode { area, .. } => area.as_ref(),
            Query::Discover { area, .. } | Query::Around { area, .. } => Some(area),
            Query::ReverseGeocode { .. } => None,
        };
        if let Some(area) = area {
            // viewbox is lon1,lat1,lon2,lat2; bounded=1 makes it a hard filter.
            let bbox = area.to_bounding_box();
            url.push_str(&format!(
                "&bounded=1&viewbox={},{},{},{}",
                bbox.south_west.lon, bbox.north_east.lat, bbox.north_east.lon, bbox.south_west.lat
            ));
        }
        url
    }

    async fn fetch_json<T: for<'de> Deserialize<'de>>(
        client: reqwest::Client,
        url: String,
    ) -> Result<T, ProviderError> {
        let response = client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Rejected {
                code: status.as_u16().to_string(),
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))
    }
}

impl Default for NominatimProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchProvider for NominatimProvider {
    fn execute(&self, query: Query) -> ProviderFuture {
        let client = self.client.clone();
        match &query {
            Query::ReverseGeocode { coordinate } => {
                let url = format!(
                    "{}/reverse?format=jsonv2&lat={}&lon={}",
                    self.base_url, coordinate.lat, coordinate.lon
                );
                let probe = *coordinate;
                Box::pin(async move {
                    let row: ReverseRow = Self::fetch_json(client, url).await?;
                    Ok(vec![ResultItem::GeocodeMatch {
                        address: row.display_name,
                        coordinate: probe,
                    }])
                })
            }
            Query::Geocode { text, .. } => {
                let url = self.search_url(text, &query);
                Box::pin(async move {
                    let rows: Vec<SearchRow> = Self::fetch_json(client, url).await?;
                    rows.into_iter().map(|row| to_geocode_match(&row)).collect()
                })
            }
            Query::Discover { text, .. } => {
                let url = self.search_url(text, &query);
                Box::pin(async move {
                    let rows: Vec<SearchRow> = Self::fetch_json(client, url).await?;
                    rows.into_iter().map(|row| to_place(&row)).collect()
                })
            }
            Query::Around { category, .. } => {
                let url = self.search_url(category, &query);
                Box::pin(async move {
                    let rows: Vec<SearchRow> = Self::fetch_json(client, url).await?;
                    rows.into_iter().map(|row| to_place(&row)).collect()
                })
            }
        }
    }

    fn name(&self) -> &'static str {
        "nominatim"
    }
}

fn parse_coordinate(row: &SearchRow) -> Result<GeoCoordinate, ProviderError> {
    let lat = row
        .lat
        .parse::<f64>()
        .map_err(|e| ProviderError::Decode(format!("invalid lat: {e}")))?;
    let lon = row
        .lon
        .parse::<f64>()
        .map_err(|e| ProviderError::Decode(format!("invalid lon: {e}")))?;
    GeoCoordinate::new(lat, lon).map_err(|e| ProviderError::Decode(e.to_string()))
}

fn to_geocode_match(row: &SearchRow) -> Result<ResultItem, ProviderError> {
    Ok(ResultItem::GeocodeMatch {
        address: row.display_name.clone(),
        coordinate: parse_coordinate(row)?,
    })
}

fn to_place(row: &SearchRow) -> Result<ResultItem, ProviderError> {
    // Nominatim's display_name leads with the specific feature name.
    let name = row
        .display_name
        .split(',')
        .next()
        .unwrap_or(&row.display_name)
        .trim()
        .to_string();
    Ok(ResultItem::Place {
        name,
        address: Some(row.display_name.clone()),
        coordinate: parse_coordinate(row)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::SearchArea;

    #[test]
    fn test_search_url_encodes_query() {
        let provider = NominatimProvider::with_base_url("http://localhost:8080");
        let query = Query::geocode("Pariser Platz");
        let url = provider.search_url("Pariser Platz", &query);
        assert!(url.starts_with("http://localhost:8080/search?"));
        assert!(url.contains("q=Pariser%20Platz"));
        assert!(!url.contains("viewbox"));
    }

    #[test]
    fn test_search_url_bounds_area_queries() {
        let provider = NominatimProvider::with_base_url("http://localhost:8080");
        let area = SearchArea::new(GeoCoordinate::new(52.52, 13.405).unwrap(), 5000);
        let query = Query::geocode_in("Museum", area);
        let url = provider.search_url("Museum", &query);
        assert!(url.contains("bounded=1"));
        assert!(url.contains("viewbox="));
    }

    #[test]
    fn test_row_parsing_rejects_bad_coordinates() {
        let row = SearchRow {
            lat: "not-a-number".into(),
            lon: "13.4".into(),
            display_name: "Somewhere".into(),
        };
        assert!(matches!(
            to_geocode_match(&row),
            Err(ProviderError::Decode(_))
        ));
    }

    #[test]
    fn test_place_name_is_first_display_segment() {
        let row = SearchRow {
            lat: "52.5163".into(),
            lon: "13.3777".into(),
            display_name: "Brandenburg Gate, Pariser Platz, Berlin, Germany".into(),
        };
        let item = to_place(&row).unwrap();
        assert!(matches!(item, ResultItem::Place { ref name, .. }
            if name == "Brandenburg Gate"));
    }
}
