//! Core entry point for the roi_report crate.
//!
//! Renders real-estate investment return reports: an [`record::InputRecord`] is mapped onto a
//! fixed document layout by [`builder`] and packed into a DOCX archive by [`docx`].

pub mod builder;
pub mod calc;
pub mod docx;
pub mod error;
pub mod model;
pub mod record;
pub mod richtext;
pub mod theme;

pub use builder::{build_report, RenderedDocument, ReportBuilder};
pub use error::ReportError;
pub use record::{InputRecord, YearRecord};

use std::path::Path;

/// Renders `record` and writes the DOCX archive to `path`, replacing any existing file.
pub fn write_report(record: &InputRecord, path: impl AsRef<Path>) -> Result<usize, ReportError> {
    let path = path.as_ref();
    let rendered = ReportBuilder::new(record).render()?;
    std::fs::write(path, &rendered.bytes).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Wrote {} ({} bytes)", path.display(), rendered.bytes.len());
    Ok(rendered.bytes.len())
}
