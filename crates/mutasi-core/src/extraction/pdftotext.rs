use crate::error::MutasiError;
use crate::extraction::{PageWords, Word, WordExtractor};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::Write;
use std::process::Command;

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Uses `pdftotext -bbox`, which emits one `<word>` element per word with its
/// bounding box, grouped into `<page>` elements.
pub struct PdftotextExtractor;

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl WordExtractor for PdftotextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageWords>, MutasiError> {
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| MutasiError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| MutasiError::Extraction(e.to_string()))?;

        let output = Command::new("pdftotext")
            .arg("-bbox")
            .arg(tmpfile.path())
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    MutasiError::PdftotextNotFound
                } else {
                    MutasiError::Extraction(format!("pdftotext -bbox failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(MutasiError::PdftotextFailed { code, stderr });
        }

        let xhtml = String::from_utf8_lossy(&output.stdout);
        parse_bbox_words(&xhtml)
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// Parse the XHTML document produced by `pdftotext -bbox`.
///
/// Pages are numbered from 1 in document order. Every `<page>` yields a
/// `PageWords`, including pages without any words.
fn parse_bbox_words(xhtml: &str) -> Result<Vec<PageWords>, MutasiError> {
    let mut reader = Reader::from_str(xhtml);
    reader.config_mut().trim_text(true);

    let mut pages: Vec<PageWords> = Vec::new();
    let mut current_word: Option<Word> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"page" => pages.push(PageWords {
                    page_number: pages.len() + 1,
                    words: Vec::new(),
                }),
                b"word" => current_word = parse_word_bbox(&e)?,
                _ => {}
            },
            Ok(Event::Empty(e)) if e.name().as_ref() == b"page" => pages.push(PageWords {
                page_number: pages.len() + 1,
                words: Vec::new(),
            }),
            Ok(Event::Text(t)) => {
                if let Some(word) = current_word.as_mut() {
                    let text = t
                        .unescape()
                        .map_err(|e| MutasiError::Extraction(format!("bad word text: {e}")))?;
                    word.text.push_str(&text);
                }
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"word" => {
                if let (Some(mut word), Some(page)) = (current_word.take(), pages.last_mut()) {
                    word.text = word.text.trim().to_string();
                    if !word.text.is_empty() {
                        page.words.push(word);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(MutasiError::Extraction(format!(
                    "malformed pdftotext output at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
    }

    Ok(pages)
}

fn parse_word_bbox(tag: &BytesStart<'_>) -> Result<Option<Word>, MutasiError> {
    let x0 = parse_attr_f64(tag, b"xMin")?;
    let x1 = parse_attr_f64(tag, b"xMax")?;
    let top = parse_attr_f64(tag, b"yMin")?;
    Ok(match (x0, x1, top) {
        (Some(x0), Some(x1), Some(top)) => Some(Word::new(String::new(), x0, x1, top)),
        _ => None,
    })
}

fn parse_attr_f64(tag: &BytesStart<'_>, name: &[u8]) -> Result<Option<f64>, MutasiError> {
    let attr = tag
        .try_get_attribute(name)
        .map_err(|e| MutasiError::Extraction(format!("bad attribute: {e}")))?;
    Ok(attr.and_then(|a| {
        a.unescape_value()
            .ok()
            .and_then(|v| v.trim().parse::<f64>().ok())
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">
<html xmlns="http://www.w3.org/1999/xhtml">
<head>
<title></title>
<meta name="Producer" content="iText"/>
<meta http-equiv="Content-Type" content="text/html; charset=UTF-8"/>
</head>
<body>
<doc>
  <page width="595.000000" height="842.000000">
    <word xMin="10.000000" yMin="120.400000" xMax="40.000000" yMax="128.000000">TANGGAL</word>
    <word xMin="90.000000" yMin="120.400000" xMax="140.000000" yMax="128.000000">KETERANGAN</word>
    <word xMin="95.000000" yMin="140.000000" xMax="120.000000" yMax="148.000000">A&amp;W</word>
  </page>
  <page width="595.000000" height="842.000000">
  </page>
  <page width="595.000000" height="842.000000">
    <word xMin="10.000000" yMin="50.000000" xMax="30.000000" yMax="58.000000">01/02</word>
  </page>
</doc>
</body>
</html>
"#;

    #[test]
    fn test_parse_bbox_words_pages() {
        let pages = parse_bbox_words(SAMPLE).unwrap();
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].page_number, 1);
        assert_eq!(pages[0].words.len(), 3);
        assert!(pages[1].words.is_empty());
        assert_eq!(pages[2].page_number, 3);
        assert_eq!(pages[2].words[0].text, "01/02");
    }

    #[test]
    fn test_parse_bbox_words_coordinates() {
        let pages = parse_bbox_words(SAMPLE).unwrap();
        let w = &pages[0].words[1];
        assert_eq!(w.text, "KETERANGAN");
        assert_eq!(w.x0, 90.0);
        assert_eq!(w.x1, 140.0);
        assert_eq!(w.top, 120.4);
    }

    #[test]
    fn test_parse_bbox_words_unescapes_entities() {
        let pages = parse_bbox_words(SAMPLE).unwrap();
        assert_eq!(pages[0].words[2].text, "A&W");
    }

    #[test]
    fn test_parse_bbox_words_empty_document() {
        let pages = parse_bbox_words("<doc></doc>").unwrap();
        assert!(pages.is_empty());
    }
}
