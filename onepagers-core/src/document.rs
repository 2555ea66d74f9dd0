//! Document Model - What The Renderers Produce
//!
//! A small block tree (paragraphs, tables, page breaks) plus page setup and
//! footer. Renderers build it in memory; `docx` serializes it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Length in twentieths of a point (OOXML "dxa").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Twips(pub u32);

impl Twips {
    pub fn from_inches(inches: f64) -> Self {
        Self((inches * 1440.0).round().max(0.0) as u32)
    }

    pub fn from_cm(cm: f64) -> Self {
        Self::from_inches(cm / 2.54)
    }
}

/// Font size in half points, the unit of `w:sz`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HalfPoints(pub u32);

impl HalfPoints {
    pub fn from_pt(pt: f64) -> Self {
        Self((pt * 2.0).round().max(0.0) as u32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub size: Option<HalfPoints>,
}

impl Run {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), ..Default::default() }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn size(mut self, size: HalfPoints) -> Self {
        self.size = Some(size);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Paragraph style id, e.g. `Heading1`. `None` means Normal.
    pub style: Option<String>,
    pub alignment: Option<Alignment>,
    pub runs: Vec<Run>,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paragraph holding one plain run (no run at all for empty text).
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut p = Self::new();
        if !text.is_empty() {
            p.runs.push(Run::new(text));
        }
        p
    }

    pub fn with_run(mut self, run: Run) -> Self {
        self.runs.push(run);
        self
    }

    pub fn with_style(mut self, style: &str) -> Self {
        self.style = Some(style.to_string());
        self
    }

    pub fn aligned(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    /// Concatenated text of all runs.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// Per-cell padding; unset sides keep the table default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellMargins {
    pub top: Option<Twips>,
    pub start: Option<Twips>,
    pub bottom: Option<Twips>,
    pub end: Option<Twips>,
}

impl CellMargins {
    pub fn new(top: u32, bottom: u32, start: u32, end: u32) -> Self {
        Self {
            top: Some(Twips(top)),
            start: Some(Twips(start)),
            bottom: Some(Twips(bottom)),
            end: Some(Twips(end)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub blocks: Vec<Block>,
    pub width: Twips,
    pub margins: Option<CellMargins>,
    /// Fill color as six hex digits, no `#`.
    pub shading: Option<String>,
}

impl Cell {
    fn empty(width: Twips) -> Self {
        Self {
            // Every cell must end in a paragraph.
            blocks: vec![Block::Paragraph(Paragraph::new())],
            width,
            margins: None,
            shading: None,
        }
    }

    /// Replace the cell content with a single paragraph.
    pub fn set_paragraph(&mut self, paragraph: Paragraph) {
        self.blocks = vec![Block::Paragraph(paragraph)];
    }

    /// Append a nested table, followed by the trailing paragraph a cell needs.
    pub fn add_table(&mut self, table: Table) {
        self.blocks.push(Block::Table(table));
        self.blocks.push(Block::Paragraph(Paragraph::new()));
    }

    pub fn set_margins(&mut self, margins: CellMargins) {
        self.margins = Some(margins);
    }

    /// Text of all paragraphs directly in the cell, joined by newlines.
    pub fn text(&self) -> String {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Paragraph(p) => Some(p.plain_text()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub cells: Vec<Cell>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Expected {expected} column widths, got {actual}")]
    ColumnCountMismatch { expected: usize, actual: usize },

    #[error("Column {0} has zero width")]
    ZeroWidth(usize),
}

/// Outcome of a best-effort width application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthOutcome {
    Applied,
    DefaultKept,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Table style id, already resolved against the base template.
    pub style: String,
    pub alignment: Option<Alignment>,
    pub grid: Vec<Twips>,
    pub rows: Vec<Row>,
}

impl Table {
    /// A table of `rows` x `cols` empty cells sharing `total_width` evenly.
    pub fn new(rows: usize, cols: usize, total_width: Twips, style: &str) -> Self {
        let col_width = Twips(total_width.0 / cols.max(1) as u32);
        let mut table = Self {
            style: style.to_string(),
            alignment: None,
            grid: vec![col_width; cols],
            rows: vec![],
        };
        for _ in 0..rows {
            table.add_row();
        }
        table
    }

    pub fn column_count(&self) -> usize {
        self.grid.len()
    }

    pub fn add_row(&mut self) -> &mut Row {
        let cells = self.grid.iter().map(|w| Cell::empty(*w)).collect();
        self.rows.push(Row { cells });
        let last = self.rows.len() - 1;
        &mut self.rows[last]
    }

    /// Set every column's width. Validates first, so a failure leaves the
    /// table untouched.
    pub fn set_column_widths(&mut self, widths: &[Twips]) -> Result<(), LayoutError> {
        if widths.len() != self.column_count() {
            return Err(LayoutError::ColumnCountMismatch {
                expected: self.column_count(),
                actual: widths.len(),
            });
        }
        if let Some(idx) = widths.iter().position(|w| w.0 == 0) {
            return Err(LayoutError::ZeroWidth(idx));
        }

        self.grid = widths.to_vec();
        for row in &mut self.rows {
            for (cell, width) in row.cells.iter_mut().zip(widths) {
                cell.width = *width;
            }
        }
        Ok(())
    }

    /// Apply widths if possible; on any failure the evenly-split default
    /// widths stay in place.
    pub fn set_column_widths_or_default(&mut self, widths: &[Twips]) -> WidthOutcome {
        match self.set_column_widths(widths) {
            Ok(()) => WidthOutcome::Applied,
            Err(e) => {
                tracing::debug!(error = %e, "column widths not applied, keeping defaults");
                WidthOutcome::DefaultKept
            }
        }
    }

    /// Shade every cell of a row.
    pub fn shade_row(&mut self, row: usize, color: &str) {
        if let Some(row) = self.rows.get_mut(row) {
            for cell in &mut row.cells {
                cell.shading = Some(color.to_string());
            }
        }
    }

    /// Cell texts, row by row.
    pub fn texts(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|r| r.cells.iter().map(Cell::text).collect())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
    PageBreak,
}

/// Page margins and size for the single document section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSetup {
    pub width: Twips,
    pub height: Twips,
    pub top: Twips,
    pub bottom: Twips,
    pub left: Twips,
    pub right: Twips,
}

impl PageSetup {
    /// Width between the left and right margins.
    pub fn text_width(&self) -> Twips {
        Twips(self.width.0.saturating_sub(self.left.0.saturating_add(self.right.0)))
    }
}

impl Default for PageSetup {
    /// US Letter, one inch margins.
    fn default() -> Self {
        Self {
            width: Twips(12240),
            height: Twips(15840),
            top: Twips(1440),
            bottom: Twips(1440),
            left: Twips(1440),
            right: Twips(1440),
        }
    }
}

/// Default run font for the Normal style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseFont {
    pub name: String,
    pub size: HalfPoints,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Package title, written to the core properties.
    pub title: Option<String>,
    pub page: PageSetup,
    pub font: BaseFont,
    pub body: Vec<Block>,
    pub footer: Option<Paragraph>,
}

impl Document {
    pub fn new(page: PageSetup, font: BaseFont) -> Self {
        Self { title: None, page, font, body: vec![], footer: None }
    }

    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.body.push(Block::Paragraph(paragraph));
    }

    pub fn add_heading(&mut self, text: &str, level: u8) {
        let style = format!("Heading{}", level);
        self.add_paragraph(
            Paragraph::text(text)
                .with_style(&style)
                .aligned(Alignment::Left),
        );
    }

    pub fn add_table(&mut self, table: Table) {
        self.body.push(Block::Table(table));
    }

    pub fn add_page_break(&mut self) {
        self.body.push(Block::PageBreak);
    }

    pub fn page_break_count(&self) -> usize {
        self.body.iter().filter(|b| matches!(b, Block::PageBreak)).count()
    }

    /// Top-level paragraphs only.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.body.iter().filter_map(|b| match b {
            Block::Paragraph(p) => Some(p),
            _ => None,
        })
    }

    /// Top-level tables only.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.body.iter().filter_map(|b| match b {
            Block::Table(t) => Some(t),
            _ => None,
        })
    }

    /// Body split at page breaks.
    pub fn pages(&self) -> Vec<&[Block]> {
        self.body.split(|b| matches!(b, Block::PageBreak)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units() {
        assert_eq!(Twips::from_inches(1.0), Twips(1440));
        assert_eq!(Twips::from_inches(0.9), Twips(1296));
        assert_eq!(Twips::from_cm(2.54), Twips(1440));
        assert_eq!(HalfPoints::from_pt(10.5), HalfPoints(21));
    }

    #[test]
    fn test_new_table_splits_width_evenly() {
        let table = Table::new(1, 4, Twips(8000), "TableGrid");
        assert_eq!(table.grid, vec![Twips(2000); 4]);
        assert_eq!(table.rows[0].cells.len(), 4);
        assert!(table.rows[0].cells.iter().all(|c| c.width == Twips(2000)));
    }

    #[test]
    fn test_width_mismatch_keeps_defaults() {
        let mut table = Table::new(2, 3, Twips(9000), "TableGrid");
        let before = table.clone();
        let outcome = table.set_column_widths_or_default(&[Twips(100), Twips(200)]);
        assert_eq!(outcome, WidthOutcome::DefaultKept);
        assert_eq!(table, before);
    }

    #[test]
    fn test_zero_width_rejected() {
        let mut table = Table::new(1, 2, Twips(9000), "TableGrid");
        assert_eq!(
            table.set_column_widths(&[Twips(100), Twips(0)]),
            Err(LayoutError::ZeroWidth(1))
        );
    }

    #[test]
    fn test_widths_applied_to_all_rows() {
        let mut table = Table::new(3, 2, Twips(9000), "TableGrid");
        let outcome = table.set_column_widths_or_default(&[Twips(100), Twips(200)]);
        assert_eq!(outcome, WidthOutcome::Applied);
        for row in &table.rows {
            assert_eq!(row.cells[0].width, Twips(100));
            assert_eq!(row.cells[1].width, Twips(200));
        }
    }

    #[test]
    fn test_nested_table_is_followed_by_paragraph() {
        let mut table = Table::new(1, 1, Twips(4000), "TableGrid");
        let cell = &mut table.rows[0].cells[0];
        cell.add_table(Table::new(0, 2, Twips(4000), "TableGrid"));
        assert!(matches!(cell.blocks.as_slice(), [
            Block::Paragraph(_),
            Block::Table(_),
            Block::Paragraph(_)
        ]));
    }

    #[test]
    fn test_pages_split_on_breaks() {
        let mut doc = Document::new(
            PageSetup::default(),
            BaseFont { name: "Calibri".into(), size: HalfPoints(22) },
        );
        doc.add_paragraph(Paragraph::text("a"));
        doc.add_page_break();
        doc.add_paragraph(Paragraph::text("b"));
        assert_eq!(doc.page_break_count(), 1);
        assert_eq!(doc.pages().len(), 2);
    }

    #[test]
    fn test_text_width_with_oversized_margins() {
        let page = PageSetup {
            left: Twips(u32::MAX),
            right: Twips(u32::MAX),
            ..PageSetup::default()
        };
        assert_eq!(page.text_width(), Twips(0));
        assert_eq!(PageSetup::default().text_width(), Twips(9360));
    }
}
