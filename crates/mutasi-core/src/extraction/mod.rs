pub mod pdftotext;

use crate::error::MutasiError;
use serde::{Deserialize, Serialize};

/// A single word positioned on a page.
///
/// Coordinates are in PDF points with the origin at the top-left corner,
/// so `top` grows downwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub text: String,
    pub x0: f64,
    pub x1: f64,
    pub top: f64,
}

impl Word {
    pub fn new(text: impl Into<String>, x0: f64, x1: f64, top: f64) -> Self {
        Word {
            text: text.into(),
            x0,
            x1,
            top,
        }
    }
}

/// All words extracted from a single page of a PDF, in no particular order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageWords {
    pub page_number: usize,
    pub words: Vec<Word>,
}

/// Trait for PDF word extraction backends.
pub trait WordExtractor: Send + Sync {
    /// Extract positioned words from PDF bytes, returning one PageWords per page.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageWords>, MutasiError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
