//! Plate carrée figure rendering to SVG.

use std::fmt::Write as _;

use super::geo::{BoundaryDataset, Country, LonLat};
use super::MapStyle;

const TITLE_HEIGHT: f64 = 40.0;
const PADDING: f64 = 20.0;

/// Maps lon/lat degrees to pixel coordinates inside the plot box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub lon_min: f64,
    pub lat_max: f64,
    pub scale: f64,
    pub origin: (f64, f64),
    pub size: (f64, f64),
}

impl Projection {
    /// Fit the style's extent into the figure, keeping one degree of
    /// longitude as wide as one degree of latitude is tall.
    pub fn fit(style: &MapStyle) -> Self {
        let [lon_min, lon_max, lat_min, lat_max] = style.extent;
        let (fig_w, fig_h) = style.figure_px();
        let avail_w = fig_w - 2.0 * PADDING;
        let avail_h = fig_h - TITLE_HEIGHT - 2.0 * PADDING;
        let span_lon = (lon_max - lon_min).max(f64::EPSILON);
        let span_lat = (lat_max - lat_min).max(f64::EPSILON);
        let scale = (avail_w / span_lon).min(avail_h / span_lat);
        let size = (span_lon * scale, span_lat * scale);
        let origin = (
            (fig_w - size.0) / 2.0,
            TITLE_HEIGHT + PADDING + (avail_h - size.1) / 2.0,
        );
        Self { lon_min, lat_max, scale, origin, size }
    }

    pub fn project(&self, (lon, lat): LonLat) -> (f64, f64) {
        (
            self.origin.0 + (lon - self.lon_min) * self.scale,
            self.origin.1 + (self.lat_max - lat) * self.scale,
        )
    }
}

/// Whether any part of the country's bounding box falls in the extent.
fn intersects(country: &Country, extent: [f64; 4]) -> bool {
    let [lon_min, lon_max, lat_min, lat_max] = extent;
    match country.bounds() {
        Some((x0, y0, x1, y1)) => x1 >= lon_min && x0 <= lon_max && y1 >= lat_min && y0 <= lat_max,
        None => false,
    }
}

fn path_data(country: &Country, projection: &Projection) -> String {
    let mut d = String::new();
    for polygon in &country.polygons {
        for ring in &polygon.rings {
            for (i, point) in ring.iter().enumerate() {
                let (x, y) = projection.project(*point);
                let cmd = if i == 0 { 'M' } else { 'L' };
                let _ = write!(d, "{}{:.2},{:.2} ", cmd, x, y);
            }
            if !ring.is_empty() {
                d.push_str("Z ");
            }
        }
    }
    d.trim_end().to_string()
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}

/// Regional basemap with every dataset outline, plus an optional shaded
/// overlay.
pub fn render_figure(
    title: &str,
    dataset: &BoundaryDataset,
    highlight: Option<&Country>,
    style: &MapStyle,
) -> String {
    let projection = Projection::fit(style);
    let (fig_w, fig_h) = style.figure_px();
    let (px, py) = projection.origin;
    let (pw, ph) = projection.size;

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = fig_w,
        h = fig_h
    );
    let _ = writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#);
    let _ = writeln!(
        svg,
        r#"<text x="{:.2}" y="{:.2}" text-anchor="middle" font-family="sans-serif" font-size="16">{}</text>"#,
        fig_w / 2.0,
        TITLE_HEIGHT - 8.0,
        escape(title)
    );
    let _ = writeln!(
        svg,
        r#"<clipPath id="extent"><rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}"/></clipPath>"#,
        px, py, pw, ph
    );

    let _ = writeln!(
        svg,
        r#"<g id="basemap" clip-path="url(#extent)" fill="none" stroke="black" stroke-width="{}">"#,
        style.border_width
    );
    for country in dataset.countries().iter().filter(|c| intersects(c, style.extent)) {
        let _ = writeln!(svg, r#"<path d="{}"/>"#, path_data(country, &projection));
    }
    let _ = writeln!(svg, "</g>");

    if let Some(country) = highlight {
        let _ = writeln!(
            svg,
            r#"<g id="highlight" clip-path="url(#extent)"><path d="{}" fill="{}" fill-opacity="{}" stroke="{}" stroke-width="{}"/></g>"#,
            path_data(country, &projection),
            style.face_color,
            style.alpha,
            style.edge_color,
            style.edge_width
        );
    }

    let _ = writeln!(
        svg,
        r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="none" stroke="black" stroke-width="1"/>"#,
        px, py, pw, ph
    );
    svg.push_str("</svg>\n");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_corners() {
        let style = MapStyle::default();
        let p = Projection::fit(&style);
        let (x0, y0) = p.project((30.0, 35.0));
        assert_eq!((x0, y0), p.origin);
        let (x1, y1) = p.project((65.0, 10.0));
        assert!((x1 - (p.origin.0 + p.size.0)).abs() < 1e-9);
        assert!((y1 - (p.origin.1 + p.size.1)).abs() < 1e-9);
    }

    #[test]
    fn test_aspect_preserved() {
        let p = Projection::fit(&MapStyle::default());
        assert!((p.size.0 / p.size.1 - 35.0 / 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_title_escaped() {
        let svg = render_figure("A & B", &BoundaryDataset::default(), None, &MapStyle::default());
        assert!(svg.contains(">A &amp; B</text>"));
        assert!(!svg.contains(r#"id="highlight""#));
    }
}
