//! Verbatim Dump - Source Text, One Paragraph Per Line
//!
//! No markdown interpretation at all: `#`, `|`, `**` stay literal.

use std::path::Path;

use crate::document::{Document, Paragraph};
use crate::docx::DocxWriter;
use crate::hashing::compute_job_hash;
use crate::report::{RenderError, RenderManifest};
use crate::style::{BaseTemplate, StyleConfig};
use crate::GENERATOR_VERSION;

pub const DEFAULT_VERBATIM_PATH: &str = "Rouse_MEA_Patents_Designs_OnePagers_VERBATIM.docx";

pub struct VerbatimRenderer {
    style: StyleConfig,
    template: BaseTemplate,
}

impl VerbatimRenderer {
    pub fn new(style: StyleConfig) -> Self {
        Self { style, template: BaseTemplate::new() }
    }

    pub fn render(&self, text: &str) -> Document {
        let mut doc = Document::new(self.style.margins.page_setup(), self.style.font.base_font());
        for line in text.split('\n') {
            doc.add_paragraph(Paragraph::text(line));
        }
        doc
    }

    pub fn render_to_file(&self, text: &str, path: &Path) -> Result<RenderManifest, RenderError> {
        let job_hash = compute_job_hash("verbatim", &text, &self.style, GENERATOR_VERSION)?;
        let doc = self.render(text);
        let output = DocxWriter::new(&self.template).write_file(&doc, path)?;
        let lines = doc.body.len();
        tracing::info!(lines, output = %output.display(), "verbatim dump generated");
        RenderManifest::build("verbatim", output, job_hash, &doc, 1)
    }
}

impl Default for VerbatimRenderer {
    fn default() -> Self {
        Self::new(StyleConfig::verbatim())
    }
}

/// Paragraph texts joined with `\n`; inverse of [`VerbatimRenderer::render`].
pub fn reassemble(document: &Document) -> String {
    document
        .paragraphs()
        .map(Paragraph::plain_text)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::VERBATIM_SOURCE;
    use crate::document::Twips;

    #[test]
    fn test_round_trip_builtin_source() {
        let doc = VerbatimRenderer::default().render(VERBATIM_SOURCE);
        assert_eq!(reassemble(&doc), VERBATIM_SOURCE);
    }

    #[test]
    fn test_blank_and_padded_lines_survive() {
        let text = "\n  indented\n\ntrailing  \n";
        let doc = VerbatimRenderer::default().render(text);
        assert_eq!(doc.body.len(), 5);
        assert_eq!(reassemble(&doc), text);
    }

    #[test]
    fn test_no_styles_applied() {
        let doc = VerbatimRenderer::default().render("# Heading\n| a | b |");
        assert!(doc.paragraphs().all(|p| p.style.is_none() && p.alignment.is_none()));
        assert!(doc.tables().next().is_none());
    }

    #[test]
    fn test_verbatim_margins() {
        let doc = VerbatimRenderer::default().render("x");
        assert_eq!(doc.page.top, Twips(1134));
        assert_eq!(doc.page.left, Twips(1247));
    }
}
