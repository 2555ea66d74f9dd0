//! Filing One-Pagers - Static Report Generation
//!
//! Three independent outputs from literal data:
//! 1. Report: one `.docx` section per jurisdiction
//! 2. Verbatim: the markdown source, one paragraph per line
//! 3. Maps: one highlighted-country figure per name

pub mod records;
pub mod dataset;
pub mod document;
pub mod style;
pub mod docx;
pub mod hashing;
pub mod report;
pub mod verbatim;
pub mod maps;

pub use records::{CoverPage, Dataset, JurisdictionRecord, RequirementRow, REQUIREMENT_HEADERS};
pub use document::{Block, Document, Paragraph, Table, WidthOutcome};
pub use style::{BaseTemplate, StyleConfig};
pub use docx::{DocxError, DocxWriter};
pub use hashing::{canonical_json, compute_content_hash, compute_job_hash};
pub use report::{RenderError, RenderManifest, ReportRenderer};
pub use verbatim::VerbatimRenderer;
pub use maps::{MapError, MapRenderer, MapStyle};

pub const GENERATOR_VERSION: &str = env!("CARGO_PKG_VERSION");
