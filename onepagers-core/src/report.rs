//! Report Renderer - One Section Per Jurisdiction
//!
//! `render` is pure: same records and style give an equal `Document`.
//! `render_to_file` adds the single write to disk.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::document::{Alignment, Document, HalfPoints, Paragraph, Run, Table, Twips, WidthOutcome};
use crate::docx::{DocxError, DocxWriter};
use crate::hashing::{compute_content_hash, compute_job_hash};
use crate::records::{CoverPage, Dataset, JurisdictionRecord, RequirementRow, REQUIREMENT_HEADERS};
use crate::style::{BaseTemplate, StyleConfig};
use crate::GENERATOR_VERSION;

pub const DEFAULT_REPORT_PATH: &str = "Rouse_MEA_Patents_Designs_OnePagers_v1.docx";
pub const REQUIREMENTS_SUBHEADING: &str = "Documentary Requirements (Patents & Designs)";
pub const NOTES_LABEL: &str = "Notes: ";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Document write failed: {0}")]
    Docx(#[from] DocxError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// What a render run produced, printed by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderManifest {
    pub id: String,
    pub kind: String,
    pub output: PathBuf,
    pub generator_version: String,
    pub created_at: DateTime<Utc>,
    pub job_hash: String,
    pub content_hash: String,
    pub sections: usize,
    pub page_breaks: usize,
}

impl RenderManifest {
    pub(crate) fn build(
        kind: &str,
        output: PathBuf,
        job_hash: String,
        document: &Document,
        sections: usize,
    ) -> Result<Self, RenderError> {
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            kind: kind.to_string(),
            output,
            generator_version: GENERATOR_VERSION.to_string(),
            created_at: Utc::now(),
            job_hash,
            content_hash: compute_content_hash(document)?,
            sections,
            page_breaks: document.page_break_count(),
        })
    }
}

/// Renders jurisdiction one-pagers into a document.
pub struct ReportRenderer {
    style: StyleConfig,
    template: BaseTemplate,
}

impl ReportRenderer {
    pub fn new(style: StyleConfig) -> Self {
        Self::with_template(style, BaseTemplate::new())
    }

    pub fn with_template(style: StyleConfig, template: BaseTemplate) -> Self {
        Self { style, template }
    }

    /// Build the whole report in memory.
    pub fn render(&self, dataset: &Dataset) -> Document {
        let mut doc = Document::new(self.style.margins.page_setup(), self.style.font.base_font());
        doc.title = Some(dataset.cover.title.clone());

        self.add_cover(&mut doc, &dataset.cover);

        let count = dataset.jurisdictions.len();
        for (idx, record) in dataset.jurisdictions.iter().enumerate() {
            self.add_section(&mut doc, record, &dataset.cover.last_verified);
            if idx + 1 != count {
                doc.add_page_break();
            }
        }

        doc.footer = Some(Paragraph::text(dataset.cover.footer.as_str()).aligned(Alignment::Center));

        tracing::debug!(sections = count, "report rendered");
        doc
    }

    /// Render and write to `path`.
    pub fn render_to_file(&self, dataset: &Dataset, path: &Path) -> Result<RenderManifest, RenderError> {
        let job_hash = compute_job_hash("report", dataset, &self.style, GENERATOR_VERSION)?;
        let doc = self.render(dataset);
        let output = DocxWriter::new(&self.template).write_file(&doc, path)?;
        tracing::info!(
            sections = dataset.jurisdictions.len(),
            output = %output.display(),
            "report generated"
        );
        RenderManifest::build("report", output, job_hash, &doc, dataset.jurisdictions.len())
    }

    fn add_cover(&self, doc: &mut Document, cover: &CoverPage) {
        doc.add_paragraph(
            Paragraph::new()
                .with_run(
                    Run::new(cover.title.as_str())
                        .bold()
                        .size(HalfPoints::from_pt(self.style.title_font_pt)),
                )
                .aligned(Alignment::Left),
        );
        doc.add_paragraph(Paragraph::text(cover.subtitle.as_str()).aligned(Alignment::Left));
        doc.add_paragraph(Paragraph::text(cover.scope.as_str()));
        doc.add_paragraph(Paragraph::new());
    }

    fn add_section(&self, doc: &mut Document, record: &JurisdictionRecord, last_verified: &str) {
        let width = doc.page.text_width();
        doc.add_heading(&record.heading(), 1);

        doc.add_table(self.summary_table(width, record, last_verified));

        doc.add_paragraph(Paragraph::new());
        doc.add_paragraph(Paragraph::new().with_run(Run::new(REQUIREMENTS_SUBHEADING).bold()));

        doc.add_table(self.requirements_table(width, &record.requirements));

        if let Some(notes) = record.notes.as_deref().filter(|n| !n.is_empty()) {
            doc.add_paragraph(Paragraph::new());
            doc.add_paragraph(Paragraph::new().with_run(Run::new(NOTES_LABEL).bold()));
            doc.add_paragraph(Paragraph::text(notes));
        }
    }

    /// 1x2 layout: map placeholder left, key facts right.
    fn summary_table(&self, width: Twips, record: &JurisdictionRecord, last_verified: &str) -> Table {
        let style = self.template.resolve_table_style(&self.style.layout_table_style);
        let mut wrap = Table::new(1, 2, width, style);
        wrap.alignment = Some(Alignment::Center);

        let (left, right) = wrap.rows[0].cells.split_at_mut(1);
        let (left, right) = (&mut left[0], &mut right[0]);

        left.set_paragraph(
            Paragraph::new()
                .with_run(
                    Run::new(format!("[Map placeholder: {}]", record.map_reference))
                        .italic()
                        .size(HalfPoints::from_pt(self.style.body_font_pt)),
                )
                .aligned(Alignment::Center),
        );
        left.set_margins(self.style.map_cell_padding.margins());
        right.set_margins(self.style.facts_cell_padding.margins());

        let facts = self.key_facts_table(right.width, record, last_verified);
        right.add_table(facts);
        wrap
    }

    fn key_facts_table(&self, width: Twips, record: &JurisdictionRecord, last_verified: &str) -> Table {
        let style = self.template.resolve_table_style(&self.style.key_facts_table_style);
        let mut table = Table::new(0, 2, width, style);
        table.alignment = Some(Alignment::Left);

        for (label, value) in record.key_facts(last_verified) {
            let row = table.add_row();
            row.cells[0].set_paragraph(Paragraph::new().with_run(Run::new(label).bold()));
            row.cells[1].set_paragraph(Paragraph::text(value));
        }
        for row in &mut table.rows {
            for cell in &mut row.cells {
                cell.set_margins(self.style.body_padding.margins());
            }
        }

        if table.set_column_widths_or_default(&self.style.key_facts_twips()) == WidthOutcome::DefaultKept {
            tracing::debug!(jurisdiction = %record.name, "key-facts widths left at default");
        }
        table
    }

    fn requirements_table(&self, width: Twips, rows: &[RequirementRow]) -> Table {
        let style = self.template.resolve_table_style(&self.style.requirements_table_style);
        let mut table = Table::new(1, REQUIREMENT_HEADERS.len(), width, style);
        let body_size = HalfPoints::from_pt(self.style.body_font_pt);

        for (cell, header) in table.rows[0].cells.iter_mut().zip(REQUIREMENT_HEADERS) {
            cell.set_paragraph(
                Paragraph::new()
                    .with_run(Run::new(header).bold())
                    .aligned(Alignment::Center),
            );
            cell.set_margins(self.style.header_padding.margins());
        }
        table.shade_row(0, &self.style.header_shading);

        for requirement in rows {
            let row = table.add_row();
            for (cell, text) in row.cells.iter_mut().zip(requirement.cells()) {
                let mut paragraph = Paragraph::new();
                if !text.is_empty() {
                    paragraph = paragraph.with_run(Run::new(text).size(body_size));
                }
                cell.set_paragraph(paragraph);
                cell.set_margins(self.style.body_padding.margins());
            }
        }

        table.set_column_widths_or_default(&self.style.requirements_twips());
        table
    }
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::new(StyleConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Block;
    use crate::records::CoverPage;

    fn cover() -> CoverPage {
        CoverPage {
            title: "Title".into(),
            subtitle: "Sub".into(),
            scope: "Scope".into(),
            last_verified: "2025-08-09".into(),
            footer: "Footer".into(),
        }
    }

    fn record(name: &str, rows: usize, notes: Option<&str>) -> JurisdictionRecord {
        JurisdictionRecord {
            name: name.into(),
            map_reference: format!("maps/{}.png", name.to_lowercase()),
            population: "1".into(),
            system: "National".into(),
            office: "Office".into(),
            languages: "English".into(),
            translation_rule: "None".into(),
            requirements: (0..rows)
                .map(|i| RequirementRow::new(&format!("Doc {}", i), "Y/Y", "3 months", "Original", "Simple", ""))
                .collect(),
            notes: notes.map(str::to_string),
        }
    }

    #[test]
    fn test_section_layout_order() {
        let data = Dataset { cover: cover(), jurisdictions: vec![record("Kenya", 2, Some("Keep PoA early."))] };
        let doc = ReportRenderer::default().render(&data);

        // cover: 4 paragraphs, then the section
        let section = &doc.body[4..];
        assert!(matches!(&section[0], Block::Paragraph(p) if p.plain_text() == "Kenya — Patents & Designs"
            && p.style.as_deref() == Some("Heading1")));
        assert!(matches!(&section[1], Block::Table(t) if t.rows.len() == 1 && t.column_count() == 2));
        assert!(matches!(&section[2], Block::Paragraph(p) if p.runs.is_empty()));
        assert!(matches!(&section[3], Block::Paragraph(p) if p.plain_text() == REQUIREMENTS_SUBHEADING && p.runs[0].bold));
        assert!(matches!(&section[4], Block::Table(t) if t.rows.len() == 3));
        assert!(matches!(&section[6], Block::Paragraph(p) if p.plain_text() == NOTES_LABEL));
        assert!(matches!(&section[7], Block::Paragraph(p) if p.plain_text() == "Keep PoA early."));
        assert_eq!(section.len(), 8);
    }

    #[test]
    fn test_map_placeholder_and_key_facts() {
        let data = Dataset { cover: cover(), jurisdictions: vec![record("Oman", 1, None)] };
        let doc = ReportRenderer::default().render(&data);
        let wrap = doc.tables().next().unwrap();
        let left = &wrap.rows[0].cells[0];
        assert_eq!(left.text(), "[Map placeholder: maps/oman.png]");
        assert!(left.blocks.iter().all(|b| !matches!(b, Block::Table(_))));

        let right = &wrap.rows[0].cells[1];
        let facts = right
            .blocks
            .iter()
            .find_map(|b| match b {
                Block::Table(t) => Some(t),
                _ => None,
            })
            .unwrap();
        let labels: Vec<_> = facts.texts().into_iter().map(|r| r[0].clone()).collect();
        assert_eq!(labels, [
            "Population",
            "System / Coverage",
            "Office / Authority",
            "Filing language(s)",
            "Translation rule",
            "Last verified",
        ]);
        assert_eq!(facts.texts()[5][1], "2025-08-09");
        assert_eq!(facts.grid, vec![Twips(2880), Twips(6192)]);
    }

    #[test]
    fn test_header_row_shaded_and_padded() {
        let data = Dataset { cover: cover(), jurisdictions: vec![record("Qatar", 1, None)] };
        let doc = ReportRenderer::default().render(&data);
        let reqs = doc.tables().nth(1).unwrap();
        assert_eq!(reqs.style, "LightList-Accent1");
        for cell in &reqs.rows[0].cells {
            assert_eq!(cell.shading.as_deref(), Some("EDEDED"));
            assert_eq!(cell.margins.unwrap().bottom, Some(Twips(120)));
        }
        assert!(reqs.rows[1].cells.iter().all(|c| c.shading.is_none()));
        assert_eq!(reqs.rows[1].cells[0].blocks.len(), 1);
    }

    #[test]
    fn test_bad_widths_do_not_abort() {
        let style = StyleConfig {
            requirements_widths: vec![1.0, 2.0],
            ..StyleConfig::default()
        };
        let renderer = ReportRenderer::new(style);
        let data = Dataset { cover: cover(), jurisdictions: vec![record("Egypt", 2, None)] };
        let doc = renderer.render(&data);
        let reqs = doc.tables().nth(1).unwrap();
        let even = Twips(doc.page.text_width().0 / 6);
        assert_eq!(reqs.grid, vec![even; 6]);
    }

    #[test]
    fn test_missing_style_uses_grid() {
        let renderer = ReportRenderer::with_template(StyleConfig::default(), BaseTemplate::grid_only());
        let data = Dataset { cover: cover(), jurisdictions: vec![record("Kuwait", 1, None)] };
        let doc = renderer.render(&data);
        assert!(doc.tables().all(|t| t.style == "TableGrid"));
    }

    #[test]
    fn test_footer_centered() {
        let data = Dataset { cover: cover(), jurisdictions: vec![] };
        let doc = ReportRenderer::default().render(&data);
        let footer = doc.footer.as_ref().unwrap();
        assert_eq!(footer.plain_text(), "Footer");
        assert_eq!(footer.alignment, Some(Alignment::Center));
        assert_eq!(doc.page_break_count(), 0);
    }
}
