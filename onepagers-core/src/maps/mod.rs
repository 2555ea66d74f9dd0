//! Country Highlight Maps
//!
//! Standalone from the report: one figure per country name, the named
//! country shaded over a regional basemap. A name missing from the boundary
//! dataset is not an error; its figure simply has no overlay.

pub mod fetch;
pub mod geo;
pub mod svg;

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use fetch::{ensure_dataset, CacheStatus, DatasetSource, HttpSource, DATASET_PATH, DATASET_URL};
pub use geo::{BoundaryDataset, Country};

#[derive(Debug, Error)]
pub enum MapError {
    #[error("Dataset download failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid boundary dataset: {0}")]
    Dataset(#[from] serde_json::Error),
}

/// Figure layout and overlay look.
#[derive(Debug, Clone, PartialEq)]
pub struct MapStyle {
    /// lon_min, lon_max, lat_min, lat_max
    pub extent: [f64; 4],
    pub figure_inches: (f64, f64),
    pub dpi: f64,
    pub border_width: f64,
    pub face_color: String,
    pub edge_color: String,
    pub edge_width: f64,
    pub alpha: f64,
}

impl MapStyle {
    pub fn figure_px(&self) -> (f64, f64) {
        (self.figure_inches.0 * self.dpi, self.figure_inches.1 * self.dpi)
    }
}

impl Default for MapStyle {
    /// Middle East region.
    fn default() -> Self {
        Self {
            extent: [30.0, 65.0, 10.0, 35.0],
            figure_inches: (10.0, 6.0),
            dpi: 100.0,
            border_width: 1.0,
            face_color: "turquoise".to_string(),
            edge_color: "black".to_string(),
            edge_width: 1.0,
            alpha: 0.6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MapOutcome {
    Shaded,
    NotFound,
}

#[derive(Debug, Clone)]
pub struct Figure {
    pub country: String,
    pub outcome: MapOutcome,
    pub svg: String,
}

impl Figure {
    /// Console notice for a name missing from the dataset.
    pub fn notice(&self) -> Option<String> {
        match self.outcome {
            MapOutcome::NotFound => Some(format!("Country not found: {}", self.country)),
            MapOutcome::Shaded => None,
        }
    }
}

/// One written figure, as reported by the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct MapReport {
    pub country: String,
    pub outcome: MapOutcome,
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

pub struct MapRenderer {
    dataset: BoundaryDataset,
    style: MapStyle,
}

impl MapRenderer {
    pub fn new(dataset: BoundaryDataset, style: MapStyle) -> Self {
        Self { dataset, style }
    }

    /// Fetch the dataset if `path` is missing, then load it.
    pub fn from_cache(source: &dyn DatasetSource, url: &str, path: &Path) -> Result<Self, MapError> {
        ensure_dataset(source, url, path)?;
        let dataset = BoundaryDataset::load(path)?;
        tracing::info!(countries = dataset.len(), "boundary dataset loaded");
        Ok(Self::new(dataset, MapStyle::default()))
    }

    pub fn dataset(&self) -> &BoundaryDataset {
        &self.dataset
    }

    pub fn render(&self, country: &str) -> Figure {
        let matched = self.dataset.find(country);
        let outcome = if matched.is_some() { MapOutcome::Shaded } else { MapOutcome::NotFound };
        if outcome == MapOutcome::NotFound {
            tracing::warn!(country, "country not found in boundary dataset");
        }
        Figure {
            country: country.to_string(),
            outcome,
            svg: svg::render_figure(country, &self.dataset, matched, &self.style),
        }
    }

    /// Render every name and write `<out_dir>/<slug>.svg`.
    pub fn render_all(&self, countries: &[&str], out_dir: &Path) -> Result<Vec<MapReport>, MapError> {
        fs::create_dir_all(out_dir)?;
        let mut reports = vec![];
        for country in countries {
            let figure = self.render(country);
            let path = out_dir.join(format!("{}.svg", slug(country)));
            fs::write(&path, &figure.svg)?;
            tracing::info!(country, path = %path.display(), "map written");
            reports.push(MapReport {
                country: figure.country.clone(),
                outcome: figure.outcome,
                notice: figure.notice(),
                path,
            });
        }
        Ok(reports)
    }
}

/// File-name form of a country name: lowercase, non-alphanumerics as `_`.
pub fn slug(name: &str) -> String {
    let mut out = String::new();
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    out.trim_matches('_').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug() {
        assert_eq!(slug("United Arab Emirates"), "united_arab_emirates");
        assert_eq!(slug("ARIPO (AP) — Regional"), "aripo_ap_regional");
    }

    #[test]
    fn test_notice_only_when_missing() {
        let renderer = MapRenderer::new(BoundaryDataset::default(), MapStyle::default());
        let figure = renderer.render("Atlantis");
        assert_eq!(figure.outcome, MapOutcome::NotFound);
        assert_eq!(figure.notice().as_deref(), Some("Country not found: Atlantis"));
    }
}
