//! Country polygons and the loaded boundary set.

use bytes::Bytes;
use geo::{BoundingRect, MultiPolygon, Rect};

use crate::error::Result;
use crate::geojson::parse_feature_collection;

/// Territories too small relative to the grid to aggregate reliably.
pub const EXCLUDED_COUNTRIES: &[&str] = &["Fr. S. Antarctic Lands", "Falkland Is."];

pub fn is_excluded(name: &str) -> bool {
    EXCLUDED_COUNTRIES.contains(&name)
}

/// A named boundary in lon/lat degrees.
#[derive(Debug, Clone)]
pub struct CountryPolygon {
    pub name: String,
    pub geometry: MultiPolygon<f64>,
    /// Excluded countries are kept in the set but never ranked.
    pub excluded: bool,
    bounds: Option<Rect<f64>>,
}

impl CountryPolygon {
    pub fn new(name: impl Into<String>, geometry: MultiPolygon<f64>) -> Self {
        let name = name.into();
        let excluded = is_excluded(&name);
        let bounds = geometry.bounding_rect();
        Self {
            name,
            geometry,
            excluded,
            bounds,
        }
    }

    /// Axis-aligned bounds; `None` for an empty geometry.
    pub fn bounds(&self) -> Option<Rect<f64>> {
        self.bounds
    }
}

/// Every parsed country plus the document it came from.
#[derive(Debug, Clone)]
pub struct CountrySet {
    countries: Vec<CountryPolygon>,
    raw: Bytes,
}

impl CountrySet {
    pub fn new(countries: Vec<CountryPolygon>, raw: Bytes) -> Self {
        Self { countries, raw }
    }

    /// Parse a GeoJSON FeatureCollection, keeping the original bytes.
    pub fn from_geojson(raw: Bytes) -> Result<Self> {
        let countries = parse_feature_collection(&raw)?
            .into_iter()
            .map(|named| CountryPolygon::new(named.name, named.geometry))
            .collect();
        Ok(Self { countries, raw })
    }

    pub fn countries(&self) -> &[CountryPolygon] {
        &self.countries
    }

    /// Countries eligible for ranking.
    pub fn active(&self) -> impl Iterator<Item = &CountryPolygon> {
        self.countries.iter().filter(|c| !c.excluded)
    }

    /// The GeoJSON document as loaded.
    pub fn raw(&self) -> &Bytes {
        &self.raw
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}
