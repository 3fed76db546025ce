use mutasi_core::error::MutasiError;
use mutasi_core::extraction::pdftotext::PdftotextExtractor;
use mutasi_core::extraction::WordExtractor;
use std::path::Path;

use crate::output;

pub fn run(pdf_file: &Path, page: Option<usize>) -> Result<(), MutasiError> {
    let pdf_bytes = std::fs::read(pdf_file)?;
    let extractor = PdftotextExtractor::new();
    let mut pages = extractor.extract_pages(&pdf_bytes)?;

    if let Some(number) = page {
        pages.retain(|p| p.page_number == number);
        if pages.is_empty() {
            return Err(MutasiError::InvalidArgs(format!(
                "page {number} not found in {}",
                pdf_file.display()
            )));
        }
    }

    output::json::print(&pages)
}
