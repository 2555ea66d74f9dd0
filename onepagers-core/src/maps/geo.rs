//! Boundary dataset: GeoJSON country polygons, looked up by exact name.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::MapError;

/// Longitude/latitude in degrees.
pub type LonLat = (f64, f64);

/// Outer ring first, then holes.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub rings: Vec<Vec<LonLat>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Country {
    pub name: String,
    pub polygons: Vec<Polygon>,
}

impl Country {
    /// (min_lon, min_lat, max_lon, max_lat), or `None` without points.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let mut points = self
            .polygons
            .iter()
            .flat_map(|p| p.rings.iter().flatten());
        let &(lon, lat) = points.next()?;
        Some(points.fold((lon, lat, lon, lat), |(a, b, c, d), &(x, y)| {
            (a.min(x), b.min(y), c.max(x), d.max(y))
        }))
    }
}

#[derive(Debug, Clone, Default)]
pub struct BoundaryDataset {
    countries: Vec<Country>,
}

impl BoundaryDataset {
    pub fn load(path: &Path) -> Result<Self, MapError> {
        let content = fs::read_to_string(path)?;
        Self::from_geojson(&content)
    }

    pub fn from_geojson(content: &str) -> Result<Self, MapError> {
        let collection: FeatureCollection = serde_json::from_str(content)?;
        let countries = collection
            .features
            .into_iter()
            .filter_map(|f| {
                let name = f.properties.name?;
                let polygons = match f.geometry? {
                    Geometry::Polygon { coordinates } => vec![polygon(coordinates)],
                    Geometry::MultiPolygon { coordinates } => {
                        coordinates.into_iter().map(polygon).collect()
                    }
                    Geometry::Unsupported => return None,
                };
                Some(Country { name, polygons })
            })
            .collect();
        Ok(Self { countries })
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    /// Exact, case-sensitive name match.
    pub fn find(&self, name: &str) -> Option<&Country> {
        self.countries.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}

fn polygon(rings: Vec<Vec<Vec<f64>>>) -> Polygon {
    Polygon {
        rings: rings
            .into_iter()
            .map(|ring| {
                ring.into_iter()
                    .filter(|pos| pos.len() >= 2)
                    .map(|pos| (pos[0], pos[1]))
                    .collect()
            })
            .collect(),
    }
}

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Properties,
    geometry: Option<Geometry>,
}

#[derive(Deserialize, Default)]
struct Properties {
    name: Option<String>,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    Polygon { coordinates: Vec<Vec<Vec<f64>>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Vec<f64>>>> },
    #[serde(other)]
    Unsupported,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "id": "QAT", "properties": {"name": "Qatar"},
             "geometry": {"type": "Polygon", "coordinates": [[[50.8, 24.7], [51.6, 24.2], [51.6, 26.1], [50.8, 24.7]]]}},
            {"type": "Feature", "id": "OMN", "properties": {"name": "Oman"},
             "geometry": {"type": "MultiPolygon", "coordinates": [
                [[[58.0, 23.0], [59.0, 22.0], [56.0, 17.0], [58.0, 23.0]]],
                [[[56.2, 26.0], [56.4, 26.3], [56.1, 26.2], [56.2, 26.0]]]
             ]}},
            {"type": "Feature", "properties": {"name": "Marker"},
             "geometry": {"type": "Point", "coordinates": [1.0, 2.0]}}
        ]
    }"#;

    #[test]
    fn test_parses_polygon_and_multipolygon() {
        let data = BoundaryDataset::from_geojson(SAMPLE).unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.find("Qatar").unwrap().polygons.len(), 1);
        assert_eq!(data.find("Oman").unwrap().polygons.len(), 2);
    }

    #[test]
    fn test_lookup_is_exact() {
        let data = BoundaryDataset::from_geojson(SAMPLE).unwrap();
        assert!(data.find("qatar").is_none());
        assert!(data.find("Qatar ").is_none());
        assert!(data.find("Marker").is_none());
    }

    #[test]
    fn test_bounds() {
        let data = BoundaryDataset::from_geojson(SAMPLE).unwrap();
        assert_eq!(data.find("Qatar").unwrap().bounds(), Some((50.8, 24.2, 51.6, 26.1)));
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(matches!(BoundaryDataset::from_geojson("{"), Err(MapError::Dataset(_))));
    }
}
