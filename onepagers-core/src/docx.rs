//! DOCX Writer - Office Open XML Packaging
//!
//! Serializes a [`Document`] into a zip package. Output bytes depend only on
//! the document and the base template: entry order, compression and
//! timestamps are fixed.

use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fs::File;
use std::io::{Cursor, Seek, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::document::{
    Alignment, Block, Cell, CellMargins, Document, Paragraph, Run, Table,
};
use crate::style::{BaseTemplate, TableStyleDef};

const NS_W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_PKG_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_CORE_PROPS: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const REL_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
const REL_FOOTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/footer";

pub const DOCUMENT_PART: &str = "word/document.xml";
pub const STYLES_PART: &str = "word/styles.xml";
pub const FOOTER_PART: &str = "word/footer1.xml";

#[derive(Debug, Error)]
pub enum DocxError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Writes documents against one base template.
pub struct DocxWriter<'a> {
    template: &'a BaseTemplate,
}

impl<'a> DocxWriter<'a> {
    pub fn new(template: &'a BaseTemplate) -> Self {
        Self { template }
    }

    /// Write the package to `path`. Serialization completes before the file
    /// is created, so a failed render leaves nothing behind.
    pub fn write_file(&self, document: &Document, path: &Path) -> Result<PathBuf, DocxError> {
        let bytes = self.to_bytes(document)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = File::create(path)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
        tracing::info!(path = %path.display(), "document written");
        Ok(path.to_path_buf())
    }

    /// Package bytes, in memory.
    pub fn to_bytes(&self, document: &Document) -> Result<Vec<u8>, DocxError> {
        Ok(self.write_package(document, Cursor::new(Vec::new()))?.into_inner())
    }

    fn write_package<W: Write + Seek>(&self, document: &Document, sink: W) -> Result<W, DocxError> {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(zip::DateTime::default());
        let has_footer = document.footer.is_some();

        let mut parts: Vec<(&str, Vec<u8>)> = vec![
            ("[Content_Types].xml", content_types_xml(has_footer)?),
            ("_rels/.rels", package_rels_xml()?),
            ("docProps/core.xml", core_xml(document)?),
            ("word/_rels/document.xml.rels", document_rels_xml(has_footer)?),
            (DOCUMENT_PART, document_xml(document)?),
            (STYLES_PART, styles_xml(document, self.template)?),
        ];
        if let Some(footer) = &document.footer {
            parts.push((FOOTER_PART, footer_xml(footer)?));
        }

        let mut zip = ZipWriter::new(sink);
        for (name, data) in parts {
            zip.start_file(name, options)?;
            zip.write_all(&data)?;
        }
        Ok(zip.finish()?)
    }
}

/// Thin wrapper over the quick-xml writer with this module's error type.
struct Xml {
    w: Writer<Vec<u8>>,
}

impl Xml {
    fn new() -> Result<Self, DocxError> {
        let mut xml = Self { w: Writer::new(Vec::new()) };
        xml.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(xml)
    }

    fn event(&mut self, event: Event<'_>) -> Result<(), DocxError> {
        self.w.write_event(event).map_err(|e| DocxError::Xml(e.to_string()))
    }

    fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), DocxError> {
        let mut el = BytesStart::new(name);
        for attr in attrs {
            el.push_attribute(*attr);
        }
        self.event(Event::Start(el))
    }

    fn end(&mut self, name: &str) -> Result<(), DocxError> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), DocxError> {
        let mut el = BytesStart::new(name);
        for attr in attrs {
            el.push_attribute(*attr);
        }
        self.event(Event::Empty(el))
    }

    /// Character data. `\r` goes out as a character reference so readers
    /// do not normalize it away as a line end.
    fn text(&mut self, text: &str) -> Result<(), DocxError> {
        if let Some(c) = text.chars().find(|c| !is_xml_char(*c)) {
            return Err(DocxError::Xml(format!(
                "non-XML character U+{:04X} in text",
                c as u32
            )));
        }
        let escaped = partial_escape(text).replace('\r', "&#xD;");
        self.event(Event::Text(BytesText::from_escaped(escaped)))
    }

    /// `<name attrs>text</name>`
    fn text_element(&mut self, name: &str, attrs: &[(&str, &str)], text: &str) -> Result<(), DocxError> {
        self.start(name, attrs)?;
        self.text(text)?;
        self.end(name)
    }

    fn val(&mut self, name: &str, value: &str) -> Result<(), DocxError> {
        self.empty(name, &[("w:val", value)])
    }

    fn finish(self) -> Vec<u8> {
        self.w.into_inner()
    }
}

/// XML 1.0 `Char` production.
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..)
}

fn content_types_xml(has_footer: bool) -> Result<Vec<u8>, DocxError> {
    let mut x = Xml::new()?;
    x.start("Types", &[("xmlns", NS_CONTENT_TYPES)])?;
    x.empty("Default", &[
        ("Extension", "rels"),
        ("ContentType", "application/vnd.openxmlformats-package.relationships+xml"),
    ])?;
    x.empty("Default", &[("Extension", "xml"), ("ContentType", "application/xml")])?;
    x.empty("Override", &[
        ("PartName", "/word/document.xml"),
        ("ContentType", "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"),
    ])?;
    x.empty("Override", &[
        ("PartName", "/word/styles.xml"),
        ("ContentType", "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"),
    ])?;
    if has_footer {
        x.empty("Override", &[
            ("PartName", "/word/footer1.xml"),
            ("ContentType", "application/vnd.openxmlformats-officedocument.wordprocessingml.footer+xml"),
        ])?;
    }
    x.empty("Override", &[
        ("PartName", "/docProps/core.xml"),
        ("ContentType", "application/vnd.openxmlformats-package.core-properties+xml"),
    ])?;
    x.end("Types")?;
    Ok(x.finish())
}

fn package_rels_xml() -> Result<Vec<u8>, DocxError> {
    let mut x = Xml::new()?;
    x.start("Relationships", &[("xmlns", NS_PKG_RELS)])?;
    x.empty("Relationship", &[
        ("Id", "rId1"),
        ("Type", REL_OFFICE_DOCUMENT),
        ("Target", "word/document.xml"),
    ])?;
    x.empty("Relationship", &[
        ("Id", "rId2"),
        ("Type", REL_CORE_PROPS),
        ("Target", "docProps/core.xml"),
    ])?;
    x.end("Relationships")?;
    Ok(x.finish())
}

fn document_rels_xml(has_footer: bool) -> Result<Vec<u8>, DocxError> {
    let mut x = Xml::new()?;
    x.start("Relationships", &[("xmlns", NS_PKG_RELS)])?;
    x.empty("Relationship", &[("Id", "rId1"), ("Type", REL_STYLES), ("Target", "styles.xml")])?;
    if has_footer {
        x.empty("Relationship", &[("Id", "rId2"), ("Type", REL_FOOTER), ("Target", "footer1.xml")])?;
    }
    x.end("Relationships")?;
    Ok(x.finish())
}

fn core_xml(document: &Document) -> Result<Vec<u8>, DocxError> {
    let mut x = Xml::new()?;
    x.start("cp:coreProperties", &[
        ("xmlns:cp", "http://schemas.openxmlformats.org/package/2006/metadata/core-properties"),
        ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
    ])?;
    if let Some(title) = &document.title {
        x.text_element("dc:title", &[], title)?;
    }
    x.text_element("dc:creator", &[], concat!("onepagers-core ", env!("CARGO_PKG_VERSION")))?;
    x.end("cp:coreProperties")?;
    Ok(x.finish())
}

pub(crate) fn document_xml(document: &Document) -> Result<Vec<u8>, DocxError> {
    let mut x = Xml::new()?;
    x.start("w:document", &[("xmlns:w", NS_W), ("xmlns:r", NS_R)])?;
    x.start("w:body", &[])?;
    for block in &document.body {
        write_block(&mut x, block)?;
    }

    let page = &document.page;
    x.start("w:sectPr", &[])?;
    if document.footer.is_some() {
        x.empty("w:footerReference", &[("w:type", "default"), ("r:id", "rId2")])?;
    }
    x.empty("w:pgSz", &[
        ("w:w", page.width.0.to_string().as_str()),
        ("w:h", page.height.0.to_string().as_str()),
    ])?;
    x.empty("w:pgMar", &[
        ("w:top", page.top.0.to_string().as_str()),
        ("w:right", page.right.0.to_string().as_str()),
        ("w:bottom", page.bottom.0.to_string().as_str()),
        ("w:left", page.left.0.to_string().as_str()),
        ("w:header", "720"),
        ("w:footer", "720"),
        ("w:gutter", "0"),
    ])?;
    x.end("w:sectPr")?;

    x.end("w:body")?;
    x.end("w:document")?;
    Ok(x.finish())
}

fn footer_xml(footer: &Paragraph) -> Result<Vec<u8>, DocxError> {
    let mut x = Xml::new()?;
    x.start("w:ftr", &[("xmlns:w", NS_W), ("xmlns:r", NS_R)])?;
    write_paragraph(&mut x, footer)?;
    x.end("w:ftr")?;
    Ok(x.finish())
}

fn write_block(x: &mut Xml, block: &Block) -> Result<(), DocxError> {
    match block {
        Block::Paragraph(p) => write_paragraph(x, p),
        Block::Table(t) => write_table(x, t),
        Block::PageBreak => {
            x.start("w:p", &[])?;
            x.start("w:r", &[])?;
            x.empty("w:br", &[("w:type", "page")])?;
            x.end("w:r")?;
            x.end("w:p")
        }
    }
}

fn alignment_value(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::Left => "left",
        Alignment::Center => "center",
        Alignment::Right => "right",
    }
}

fn write_paragraph(x: &mut Xml, p: &Paragraph) -> Result<(), DocxError> {
    x.start("w:p", &[])?;
    if p.style.is_some() || p.alignment.is_some() {
        x.start("w:pPr", &[])?;
        if let Some(style) = &p.style {
            x.val("w:pStyle", style)?;
        }
        if let Some(alignment) = p.alignment {
            x.val("w:jc", alignment_value(alignment))?;
        }
        x.end("w:pPr")?;
    }
    for run in &p.runs {
        write_run(x, run)?;
    }
    x.end("w:p")
}

fn write_run(x: &mut Xml, run: &Run) -> Result<(), DocxError> {
    x.start("w:r", &[])?;
    if run.bold || run.italic || run.size.is_some() {
        x.start("w:rPr", &[])?;
        if run.bold {
            x.empty("w:b", &[])?;
        }
        if run.italic {
            x.empty("w:i", &[])?;
        }
        if let Some(size) = run.size {
            let sz = size.0.to_string();
            x.val("w:sz", &sz)?;
            x.val("w:szCs", &sz)?;
        }
        x.end("w:rPr")?;
    }
    x.text_element("w:t", &[("xml:space", "preserve")], &run.text)?;
    x.end("w:r")
}

fn write_table(x: &mut Xml, table: &Table) -> Result<(), DocxError> {
    x.start("w:tbl", &[])?;
    x.start("w:tblPr", &[])?;
    x.val("w:tblStyle", &table.style)?;
    x.empty("w:tblW", &[("w:w", "0"), ("w:type", "auto")])?;
    if let Some(alignment) = table.alignment {
        x.val("w:jc", alignment_value(alignment))?;
    }
    x.empty("w:tblLook", &[
        ("w:val", "04A0"),
        ("w:firstRow", "1"),
        ("w:lastRow", "0"),
        ("w:firstColumn", "1"),
        ("w:lastColumn", "0"),
        ("w:noHBand", "0"),
        ("w:noVBand", "1"),
    ])?;
    x.end("w:tblPr")?;

    x.start("w:tblGrid", &[])?;
    for col in &table.grid {
        x.empty("w:gridCol", &[("w:w", col.0.to_string().as_str())])?;
    }
    x.end("w:tblGrid")?;

    for row in &table.rows {
        x.start("w:tr", &[])?;
        for cell in &row.cells {
            write_cell(x, cell)?;
        }
        x.end("w:tr")?;
    }
    x.end("w:tbl")
}

fn write_cell(x: &mut Xml, cell: &Cell) -> Result<(), DocxError> {
    x.start("w:tc", &[])?;
    x.start("w:tcPr", &[])?;
    x.empty("w:tcW", &[("w:w", cell.width.0.to_string().as_str()), ("w:type", "dxa")])?;
    if let Some(fill) = &cell.shading {
        x.empty("w:shd", &[("w:val", "clear"), ("w:color", "auto"), ("w:fill", fill.as_str())])?;
    }
    if let Some(margins) = &cell.margins {
        write_cell_margins(x, margins)?;
    }
    x.end("w:tcPr")?;
    for block in &cell.blocks {
        write_block(x, block)?;
    }
    x.end("w:tc")
}

fn write_cell_margins(x: &mut Xml, margins: &CellMargins) -> Result<(), DocxError> {
    x.start("w:tcMar", &[])?;
    let sides = [
        ("w:top", margins.top),
        ("w:start", margins.start),
        ("w:bottom", margins.bottom),
        ("w:end", margins.end),
    ];
    for (name, value) in sides {
        if let Some(v) = value {
            x.empty(name, &[("w:w", v.0.to_string().as_str()), ("w:type", "dxa")])?;
        }
    }
    x.end("w:tcMar")
}

fn styles_xml(document: &Document, template: &BaseTemplate) -> Result<Vec<u8>, DocxError> {
    let mut x = Xml::new()?;
    x.start("w:styles", &[("xmlns:w", NS_W)])?;

    let font = &document.font;
    let size = font.size.0.to_string();
    x.start("w:docDefaults", &[])?;
    x.start("w:rPrDefault", &[])?;
    x.start("w:rPr", &[])?;
    x.empty("w:rFonts", &[
        ("w:ascii", font.name.as_str()),
        ("w:hAnsi", font.name.as_str()),
        ("w:eastAsia", font.name.as_str()),
        ("w:cs", font.name.as_str()),
    ])?;
    x.val("w:sz", &size)?;
    x.val("w:szCs", &size)?;
    x.end("w:rPr")?;
    x.end("w:rPrDefault")?;
    x.end("w:docDefaults")?;

    x.start("w:style", &[("w:type", "paragraph"), ("w:default", "1"), ("w:styleId", "Normal")])?;
    x.val("w:name", "Normal")?;
    x.start("w:rPr", &[])?;
    x.empty("w:rFonts", &[("w:ascii", font.name.as_str()), ("w:hAnsi", font.name.as_str())])?;
    x.val("w:sz", &size)?;
    x.end("w:rPr")?;
    x.end("w:style")?;

    x.start("w:style", &[("w:type", "paragraph"), ("w:styleId", "Heading1")])?;
    x.val("w:name", "heading 1")?;
    x.val("w:basedOn", "Normal")?;
    x.val("w:next", "Normal")?;
    x.start("w:pPr", &[])?;
    x.empty("w:keepNext", &[])?;
    x.empty("w:spacing", &[("w:before", "480"), ("w:after", "0")])?;
    x.val("w:outlineLvl", "0")?;
    x.end("w:pPr")?;
    x.start("w:rPr", &[])?;
    x.empty("w:b", &[])?;
    x.val("w:color", "365F91")?;
    x.val("w:sz", "28")?;
    x.end("w:rPr")?;
    x.end("w:style")?;

    x.start("w:style", &[("w:type", "table"), ("w:default", "1"), ("w:styleId", "TableNormal")])?;
    x.val("w:name", "Normal Table")?;
    x.start("w:tblPr", &[])?;
    x.empty("w:tblInd", &[("w:w", "0"), ("w:type", "dxa")])?;
    x.start("w:tblCellMar", &[])?;
    x.empty("w:top", &[("w:w", "0"), ("w:type", "dxa")])?;
    x.empty("w:left", &[("w:w", "108"), ("w:type", "dxa")])?;
    x.empty("w:bottom", &[("w:w", "0"), ("w:type", "dxa")])?;
    x.empty("w:right", &[("w:w", "108"), ("w:type", "dxa")])?;
    x.end("w:tblCellMar")?;
    x.end("w:tblPr")?;
    x.end("w:style")?;

    for def in template.table_styles() {
        write_table_style(&mut x, def)?;
    }

    x.end("w:styles")?;
    Ok(x.finish())
}

fn write_table_style(x: &mut Xml, def: &TableStyleDef) -> Result<(), DocxError> {
    x.start("w:style", &[("w:type", "table"), ("w:styleId", def.id)])?;
    x.val("w:name", def.name)?;
    if let Some(based_on) = def.based_on {
        x.val("w:basedOn", based_on)?;
    }

    let border = &def.borders;
    let size = border.size.to_string();
    let attrs = [
        ("w:val", "single"),
        ("w:sz", size.as_str()),
        ("w:space", "0"),
        ("w:color", border.color),
    ];
    x.start("w:tblPr", &[])?;
    x.start("w:tblBorders", &[])?;
    for side in ["w:top", "w:left", "w:bottom", "w:right"] {
        x.empty(side, &attrs)?;
    }
    if border.inside {
        x.empty("w:insideH", &attrs)?;
        x.empty("w:insideV", &attrs)?;
    }
    x.end("w:tblBorders")?;
    x.end("w:tblPr")?;

    if let Some(color) = def.first_row_rule {
        x.start("w:tblStylePr", &[("w:type", "firstRow")])?;
        x.start("w:rPr", &[])?;
        x.empty("w:b", &[])?;
        x.end("w:rPr")?;
        x.start("w:tcPr", &[])?;
        x.start("w:tcBorders", &[])?;
        x.empty("w:bottom", &[
            ("w:val", "single"),
            ("w:sz", "8"),
            ("w:space", "0"),
            ("w:color", color),
        ])?;
        x.end("w:tcBorders")?;
        x.end("w:tcPr")?;
        x.end("w:tblStylePr")?;
    }
    x.end("w:style")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{BaseFont, HalfPoints, PageSetup, Twips};

    fn doc() -> Document {
        Document::new(
            PageSetup::default(),
            BaseFont { name: "Calibri".into(), size: HalfPoints(22) },
        )
    }

    #[test]
    fn test_text_is_escaped_and_preserved() {
        let mut d = doc();
        d.add_paragraph(Paragraph::text("  R&D <draft>  "));
        let xml = String::from_utf8(document_xml(&d).unwrap()).unwrap();
        assert!(xml.contains(r#"<w:t xml:space="preserve">  R&amp;D &lt;draft&gt;  </w:t>"#));
    }

    #[test]
    fn test_carriage_return_written_as_reference() {
        let mut d = doc();
        d.add_paragraph(Paragraph::text("line one\r"));
        let xml = String::from_utf8(document_xml(&d).unwrap()).unwrap();
        assert!(xml.contains(r#"<w:t xml:space="preserve">line one&#xD;</w:t>"#));
    }

    #[test]
    fn test_non_xml_character_is_rejected() {
        let mut d = doc();
        d.add_paragraph(Paragraph::text("page one\u{c}page two"));
        let err = document_xml(&d).unwrap_err();
        assert!(matches!(err, DocxError::Xml(msg) if msg.contains("U+000C")));

        let template = BaseTemplate::new();
        assert!(DocxWriter::new(&template).to_bytes(&d).is_err());
    }

    #[test]
    fn test_page_break_markup() {
        let mut d = doc();
        d.add_page_break();
        let xml = String::from_utf8(document_xml(&d).unwrap()).unwrap();
        assert!(xml.contains(r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#));
    }

    #[test]
    fn test_cell_margins_and_shading() {
        let mut d = doc();
        let mut table = Table::new(1, 1, Twips(2000), "TableGrid");
        table.rows[0].cells[0].set_margins(CellMargins::new(60, 60, 80, 80));
        table.shade_row(0, "EDEDED");
        d.add_table(table);
        let xml = String::from_utf8(document_xml(&d).unwrap()).unwrap();
        assert!(xml.contains(r#"<w:shd w:val="clear" w:color="auto" w:fill="EDEDED"/>"#));
        assert!(xml.contains(r#"<w:tcMar><w:top w:w="60" w:type="dxa"/><w:start w:w="80" w:type="dxa"/>"#));
    }

    #[test]
    fn test_footer_reference_only_with_footer() {
        let mut d = doc();
        let xml = String::from_utf8(document_xml(&d).unwrap()).unwrap();
        assert!(!xml.contains("w:footerReference"));

        d.footer = Some(Paragraph::text("footer"));
        let xml = String::from_utf8(document_xml(&d).unwrap()).unwrap();
        assert!(xml.contains(r#"<w:footerReference w:type="default" r:id="rId2"/>"#));
    }

    #[test]
    fn test_package_bytes_are_stable() {
        let template = BaseTemplate::new();
        let writer = DocxWriter::new(&template);
        let mut d = doc();
        d.add_paragraph(Paragraph::text("same"));
        assert_eq!(writer.to_bytes(&d).unwrap(), writer.to_bytes(&d).unwrap());
    }
}
