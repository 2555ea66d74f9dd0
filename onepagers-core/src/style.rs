//! Style System - Layout Values And The Base Template
//!
//! `StyleConfig` carries every literal the renderers need. Missing keys in a
//! JSON override fall back to the built-in values.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::document::{BaseFont, CellMargins, HalfPoints, PageSetup, Twips};

/// Style every table falls back to when its requested style is unknown.
pub const GRID_STYLE: &str = "Table Grid";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginsCm {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl MarginsCm {
    pub fn page_setup(&self) -> PageSetup {
        PageSetup {
            top: Twips::from_cm(self.top),
            bottom: Twips::from_cm(self.bottom),
            left: Twips::from_cm(self.left),
            right: Twips::from_cm(self.right),
            ..PageSetup::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontConfig {
    pub name: String,
    pub size_pt: f64,
}

impl FontConfig {
    pub fn base_font(&self) -> BaseFont {
        BaseFont {
            name: self.name.clone(),
            size: HalfPoints::from_pt(self.size_pt),
        }
    }
}

impl Default for FontConfig {
    fn default() -> Self {
        Self { name: "Calibri".to_string(), size_pt: 11.0 }
    }
}

/// Cell padding in dxa: top, bottom, start, end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Padding {
    pub top: u32,
    pub bottom: u32,
    pub start: u32,
    pub end: u32,
}

impl Padding {
    pub const fn new(top: u32, bottom: u32, start: u32, end: u32) -> Self {
        Self { top, bottom, start, end }
    }

    pub fn margins(&self) -> CellMargins {
        CellMargins::new(self.top, self.bottom, self.start, self.end)
    }
}

/// Layout of the one-pager report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleConfig {
    pub margins: MarginsCm,
    pub font: FontConfig,
    pub requirements_table_style: String,
    pub layout_table_style: String,
    pub key_facts_table_style: String,
    /// Inches per column, six entries.
    pub requirements_widths: Vec<f64>,
    /// Inches per column, label then value.
    pub key_facts_widths: Vec<f64>,
    /// Hex fill of the requirements header row.
    pub header_shading: String,
    pub header_padding: Padding,
    pub body_padding: Padding,
    pub map_cell_padding: Padding,
    pub facts_cell_padding: Padding,
    pub body_font_pt: f64,
    pub title_font_pt: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            margins: MarginsCm { top: 1.6, bottom: 1.6, left: 1.8, right: 1.8 },
            font: FontConfig::default(),
            requirements_table_style: "Light List Accent 1".to_string(),
            layout_table_style: GRID_STYLE.to_string(),
            key_facts_table_style: GRID_STYLE.to_string(),
            requirements_widths: vec![1.6, 0.9, 1.1, 1.2, 1.2, 1.7],
            key_facts_widths: vec![2.0, 4.3],
            header_shading: "EDEDED".to_string(),
            header_padding: Padding::new(80, 120, 80, 80),
            body_padding: Padding::new(60, 60, 80, 80),
            map_cell_padding: Padding::new(200, 200, 80, 80),
            facts_cell_padding: Padding::new(120, 120, 80, 80),
            body_font_pt: 10.5,
            title_font_pt: 18.0,
        }
    }
}

impl StyleConfig {
    /// Margins and font of the verbatim dump.
    pub fn verbatim() -> Self {
        Self {
            margins: MarginsCm { top: 2.0, bottom: 2.0, left: 2.2, right: 2.2 },
            ..Self::default()
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self, StyleError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn requirements_twips(&self) -> Vec<Twips> {
        self.requirements_widths.iter().map(|w| Twips::from_inches(*w)).collect()
    }

    pub fn key_facts_twips(&self) -> Vec<Twips> {
        self.key_facts_widths.iter().map(|w| Twips::from_inches(*w)).collect()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StyleError {
    #[error("Failed to read style file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid style JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A table style shipped in `styles.xml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableStyleDef {
    pub name: &'static str,
    pub id: &'static str,
    /// Style id the definition is based on, if any.
    pub based_on: Option<&'static str>,
    pub borders: BorderSpec,
    /// Color of the rule drawn under the first row, if the style has one.
    pub first_row_rule: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderSpec {
    /// Width in eighths of a point.
    pub size: u32,
    pub color: &'static str,
    pub inside: bool,
}

/// Styles available to documents written by this crate.
pub struct BaseTemplate {
    table_styles: Vec<TableStyleDef>,
}

impl BaseTemplate {
    pub fn new() -> Self {
        Self {
            table_styles: vec![
                TableStyleDef {
                    name: GRID_STYLE,
                    id: "TableGrid",
                    based_on: Some("TableNormal"),
                    borders: BorderSpec { size: 4, color: "auto", inside: true },
                    first_row_rule: None,
                },
                TableStyleDef {
                    name: "Light List Accent 1",
                    id: "LightList-Accent1",
                    based_on: Some("TableNormal"),
                    borders: BorderSpec { size: 8, color: "4F81BD", inside: false },
                    first_row_rule: Some("4F81BD"),
                },
            ],
        }
    }

    /// A template that only knows the grid style.
    pub fn grid_only() -> Self {
        let mut template = Self::new();
        template.table_styles.retain(|s| s.name == GRID_STYLE);
        template
    }

    pub fn table_styles(&self) -> &[TableStyleDef] {
        &self.table_styles
    }

    pub fn get(&self, name: &str) -> Option<&TableStyleDef> {
        self.table_styles.iter().find(|s| s.name == name)
    }

    /// Style id for `name`, or the grid style when the template lacks it.
    pub fn resolve_table_style(&self, name: &str) -> &'static str {
        match self.get(name) {
            Some(def) => def.id,
            None => {
                tracing::debug!(requested = name, fallback = GRID_STYLE, "table style unavailable");
                "TableGrid"
            }
        }
    }
}

impl Default for BaseTemplate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_style_resolves_to_its_id() {
        let template = BaseTemplate::new();
        assert_eq!(template.resolve_table_style("Light List Accent 1"), "LightList-Accent1");
        assert_eq!(template.resolve_table_style(GRID_STYLE), "TableGrid");
    }

    #[test]
    fn test_unknown_style_falls_back_to_grid() {
        let template = BaseTemplate::new();
        assert_eq!(template.resolve_table_style("Medium Shading 2"), "TableGrid");
        assert_eq!(BaseTemplate::grid_only().resolve_table_style("Light List Accent 1"), "TableGrid");
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let style: StyleConfig = serde_json::from_str(r#"{"headerShading": "D9D9D9"}"#).unwrap();
        assert_eq!(style.header_shading, "D9D9D9");
        assert_eq!(style.requirements_widths.len(), 6);
        assert_eq!(style.font.name, "Calibri");
    }

    #[test]
    fn test_margins_in_twips() {
        let page = StyleConfig::default().margins.page_setup();
        assert_eq!(page.top, Twips(907));
        assert_eq!(page.left, Twips(1020));
    }
}
