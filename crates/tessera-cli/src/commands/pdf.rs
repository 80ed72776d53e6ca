use std::path::PathBuf;
use tessera_core::error::TesseraError;
use tessera_core::extraction::pdftotext::PdftotextSource;
use tessera_core::extraction::ElementSource;
use tessera_core::BoundingBox;
use tracing::info;

use crate::commands::table::{emit, TableArgs};
use crate::output;

/// Fail before touching the input if pdftotext is not installed.
fn pdftotext() -> Result<PdftotextSource, TesseraError> {
    if !PdftotextSource::is_available() {
        return Err(TesseraError::PdftotextNotFound);
    }
    Ok(PdftotextSource::new())
}

pub fn run(
    pdf_file: PathBuf,
    page: usize,
    region: Option<BoundingBox>,
    args: &TableArgs,
) -> Result<(), TesseraError> {
    let source = pdftotext()?;
    let pdf_bytes = std::fs::read(&pdf_file)?;
    let options = args.table_options()?;
    info!(file = %pdf_file.display(), page, backend = source.backend_name(), "extracting table");

    let text = tessera_core::extract_pdf_table(
        &pdf_bytes,
        &source,
        page,
        region.as_ref(),
        args.mode(),
        &options,
    )?;
    emit(text, args)
}

pub fn elements(pdf_file: PathBuf, page: Option<usize>) -> Result<(), TesseraError> {
    let source = pdftotext()?;
    let pdf_bytes = std::fs::read(&pdf_file)?;
    let mut pages = source.extract_pages(&pdf_bytes)?;
    if let Some(page) = page {
        pages.retain(|p| p.page_number == page);
        if pages.is_empty() {
            return Err(TesseraError::Extraction(format!("page {page} not found")));
        }
    }

    println!("{}", output::json::to_string(&pages)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_pdftotext_reported_first() {
        let missing = PathBuf::from("does-not-exist.pdf");
        match elements(missing, None) {
            Err(TesseraError::PdftotextNotFound) => assert!(!PdftotextSource::is_available()),
            Err(TesseraError::Io(_)) => assert!(PdftotextSource::is_available()),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
