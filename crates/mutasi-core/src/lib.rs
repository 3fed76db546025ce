pub mod error;
pub mod extraction;
pub mod layout;
pub mod record;
pub mod template;

use error::MutasiError;
use extraction::{PageWords, WordExtractor};
use layout::region::{classify_row, scan_header_info, DocumentState};
use layout::rows::group_rows;
use record::{LineKind, LineRecord};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use template::StatementTemplate;
use tracing::{debug, info};

/// Counters collected while reconstructing one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    pub pages: usize,
    pub empty_pages: usize,
    pub rows: usize,
    pub dropped_rows: usize,
    pub header_info: usize,
    pub sentinels: usize,
    pub transactions: usize,
    pub continuations: usize,
    pub page_breaks: usize,
    pub summaries: usize,
    pub boundaries_detected: bool,
}

impl ConversionStats {
    fn count(&mut self, record: &LineRecord) {
        match record.kind() {
            LineKind::HeaderInfo => self.header_info += 1,
            LineKind::Sentinel => self.sentinels += 1,
            LineKind::Transaction => self.transactions += 1,
            LineKind::Continuation => self.continuations += 1,
            LineKind::PageBreak => self.page_breaks += 1,
            LineKind::Summary => self.summaries += 1,
        }
    }
}

/// Output of [`reconstruct_pages`].
#[derive(Debug, Clone)]
pub struct Reconstruction {
    pub records: Vec<LineRecord>,
    /// State after the last page.
    pub state: DocumentState,
    pub stats: ConversionStats,
}

/// Reconstruct the statement lines of one document, page by page.
///
/// Pages are consumed in order. Pages without words are skipped. Account
/// metadata is only taken from the first non-empty page, and column
/// boundaries are fixed by the first column-header row of the document.
pub fn reconstruct_pages<I>(pages: I, template: &StatementTemplate) -> Reconstruction
where
    I: IntoIterator<Item = PageWords>,
{
    let mut state = DocumentState::new(template);
    let mut records = Vec::new();
    let mut stats = ConversionStats::default();

    for page in pages {
        stats.pages += 1;
        if page.words.is_empty() {
            debug!(page = page.page_number, "skipping empty page");
            stats.empty_pages += 1;
            continue;
        }

        let rows = group_rows(&page.words, template.row_tolerance);
        stats.rows += rows.len();
        state = state.start_page();

        if !state.header_scan_done {
            let header = scan_header_info(&rows, template);
            debug!(
                page = page.page_number,
                lines = header.len(),
                "scanned account header"
            );
            records.extend(header);
            state = state.finish_header_scan();
        }

        for row in &rows {
            let (next, record) = classify_row(state, row, template);
            state = next;
            match record {
                Some(record) => records.push(record),
                None => stats.dropped_rows += 1,
            }
        }
    }

    for record in &records {
        stats.count(record);
    }
    stats.boundaries_detected = state.boundaries_detected;

    Reconstruction {
        records,
        state,
        stats,
    }
}

/// Render records to text lines in the downstream parser's format.
pub fn render_lines(records: &[LineRecord], template: &StatementTemplate) -> Vec<String> {
    records.iter().map(|r| r.render(template)).collect()
}

/// A converted document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversion {
    pub template: String,
    pub backend: String,
    pub lines: Vec<String>,
    pub records: Vec<LineRecord>,
    pub stats: ConversionStats,
}

impl Conversion {
    /// The document as text, one line per record, without a trailing newline.
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Main API entry point: convert a statement PDF into parser-ready lines.
pub fn convert_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn WordExtractor,
    template: &StatementTemplate,
) -> Result<Conversion, MutasiError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    let reconstruction = reconstruct_pages(pages, template);
    let lines = render_lines(&reconstruction.records, template);

    let stats = reconstruction.stats;
    info!(
        backend = extractor.backend_name(),
        template = %template.name,
        pages = stats.pages,
        transactions = stats.transactions,
        boundaries_detected = stats.boundaries_detected,
        "reconstructed statement"
    );
    if stats.sentinels == 0 {
        debug!("no column-header row found; output has no table lines");
    }

    Ok(Conversion {
        template: template.name.clone(),
        backend: extractor.backend_name().to_string(),
        lines,
        records: reconstruction.records,
        stats,
    })
}

/// Where the text output for `input` goes when no path is given: the same
/// path with a `.txt` extension.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("txt")
}

/// Write the converted text to `path` as UTF-8.
pub fn write_text(conversion: &Conversion, path: &Path) -> Result<(), MutasiError> {
    std::fs::write(path, conversion.to_text())?;
    Ok(())
}
