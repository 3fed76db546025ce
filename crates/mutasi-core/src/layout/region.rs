use crate::layout::columns::{detect_boundaries, ColumnBoundaries};
use crate::layout::rows::Row;
use crate::layout::zones::{is_page_number, reconstruct_row};
use crate::record::LineRecord;
use crate::template::StatementTemplate;
use tracing::debug;

/// Where the current row sits relative to the transaction table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Header block of the first page, before the column-header row.
    PreHeader,
    /// Header block of a later page, before its column-header row.
    AwaitingTable,
    /// Between the column-header row and the end of the page.
    InTable,
}

/// Reconstruction state for one document.
///
/// Transitions take the state by value and return the next one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentState {
    pub boundaries: ColumnBoundaries,
    /// Set once the first column-header row has been examined.
    pub boundaries_locked: bool,
    /// Whether `boundaries` came from a header row rather than defaults.
    pub boundaries_detected: bool,
    pub header_scan_done: bool,
    pub region: Region,
}

impl DocumentState {
    pub fn new(template: &StatementTemplate) -> Self {
        DocumentState {
            boundaries: template.default_boundaries,
            boundaries_locked: false,
            boundaries_detected: false,
            header_scan_done: false,
            region: Region::PreHeader,
        }
    }

    /// State at the top of the next non-empty page.
    pub fn start_page(self) -> Self {
        let region = if self.header_scan_done {
            Region::AwaitingTable
        } else {
            Region::PreHeader
        };
        DocumentState { region, ..self }
    }

    pub fn finish_header_scan(self) -> Self {
        DocumentState {
            header_scan_done: true,
            ..self
        }
    }

    pub fn in_table(&self) -> bool {
        self.region == Region::InTable
    }

    fn enter_table(self, row: &Row, template: &StatementTemplate) -> Self {
        let mut next = DocumentState {
            region: Region::InTable,
            ..self
        };
        if self.boundaries_locked {
            return next;
        }

        next.boundaries_locked = true;
        match detect_boundaries(row, &template.landmarks) {
            Some(boundaries) => {
                debug!(
                    date_max = boundaries.date_max,
                    mutasi_min = boundaries.mutasi_min,
                    saldo_min = boundaries.saldo_min,
                    "column boundaries detected from header row"
                );
                next.boundaries = boundaries;
                next.boundaries_detected = true;
            }
            None => {
                debug!("header row lacks column landmarks; keeping default boundaries");
            }
        }
        next
    }
}

/// Whether `row` is the table's column-header row.
pub fn is_sentinel(row: &Row, template: &StatementTemplate) -> bool {
    template
        .sentinel
        .tokens
        .iter()
        .all(|token| row.has_token(token))
}

/// Collect the account metadata rows that precede the first column-header
/// row of the document.
pub fn scan_header_info(rows: &[Row], template: &StatementTemplate) -> Vec<LineRecord> {
    rows.iter()
        .take_while(|row| !is_sentinel(row, template))
        .map(Row::text)
        .filter(|text| template.is_header_info(text))
        .map(|text| LineRecord::HeaderInfo { text })
        .collect()
}

/// Classify one row and produce the next state.
///
/// Returns `None` as the record when the row is dropped.
pub fn classify_row(
    state: DocumentState,
    row: &Row,
    template: &StatementTemplate,
) -> (DocumentState, Option<LineRecord>) {
    if is_sentinel(row, template) {
        return (state.enter_table(row, template), Some(LineRecord::Sentinel));
    }

    let text = row.text();

    if template.is_page_break(&text) {
        let record = state.in_table().then_some(LineRecord::PageBreak);
        return (state, record);
    }

    if !state.in_table() {
        return (state, None);
    }

    if template.is_summary(&text) {
        return (state, Some(LineRecord::Summary { text }));
    }

    if is_page_number(&text) {
        return (state, None);
    }

    (state, reconstruct_row(row, &state.boundaries, template))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::Word;
    use crate::template::load_preset;

    fn row(words: &[(&str, f64)]) -> Row {
        Row {
            key: 0,
            words: words
                .iter()
                .map(|(t, x)| Word::new(*t, *x, *x + 10.0, 0.0))
                .collect(),
        }
    }

    fn header_row() -> Row {
        row(&[
            ("TANGGAL", 10.0),
            ("KETERANGAN", 90.0),
            ("CBG", 340.0),
            ("MUTASI", 370.0),
            ("SALDO", 490.0),
        ])
    }

    fn in_table(template: &StatementTemplate) -> DocumentState {
        classify_row(DocumentState::new(template), &header_row(), template).0
    }

    #[test]
    fn test_sentinel_locks_boundaries() {
        let t = load_preset("bca").unwrap();
        let (state, rec) = classify_row(DocumentState::new(&t), &header_row(), &t);
        assert_eq!(rec, Some(LineRecord::Sentinel));
        assert_eq!(
            rec.unwrap().render(&t),
            "TANGGAL KETERANGAN CBG MUTASI SALDO"
        );
        assert!(state.in_table());
        assert!(state.boundaries_locked);
        assert!(state.boundaries_detected);
        assert_eq!(
            state.boundaries,
            ColumnBoundaries {
                date_max: 90.0,
                mutasi_min: 370.0,
                saldo_min: 490.0
            }
        );
    }

    #[test]
    fn test_later_sentinel_keeps_locked_boundaries() {
        let t = load_preset("bca").unwrap();
        let state = in_table(&t).start_page();
        let shifted = row(&[
            ("TANGGAL", 12.0),
            ("KETERANGAN", 100.0),
            ("CBG", 345.0),
            ("MUTASI", 380.0),
            ("SALDO", 500.0),
        ]);
        let (state, rec) = classify_row(state, &shifted, &t);
        assert_eq!(rec, Some(LineRecord::Sentinel));
        assert_eq!(state.boundaries.date_max, 90.0);
        assert_eq!(state.boundaries.saldo_min, 490.0);
    }

    #[test]
    fn test_sentinel_without_landmarks_uses_defaults() {
        let t = load_preset("bca").unwrap();
        let partial = row(&[("TANGGAL", 10.0), ("CBG", 340.0), ("SALDO", 490.0)]);
        let (state, rec) = classify_row(DocumentState::new(&t), &partial, &t);
        assert_eq!(rec, Some(LineRecord::Sentinel));
        assert!(state.boundaries_locked);
        assert!(!state.boundaries_detected);
        assert_eq!(state.boundaries, t.default_boundaries);

        // No second attempt on the next header row.
        let (state, _) = classify_row(state.start_page(), &header_row(), &t);
        assert_eq!(state.boundaries, t.default_boundaries);
    }

    #[test]
    fn test_page_break_gated_by_region() {
        let t = load_preset("bca").unwrap();
        let footer = row(&[("Bersambung", 200.0), ("ke", 260.0), ("halaman", 280.0)]);

        let (_, before) = classify_row(DocumentState::new(&t), &footer, &t);
        assert_eq!(before, None);

        let (_, after) = classify_row(in_table(&t), &footer, &t);
        assert_eq!(after, Some(LineRecord::PageBreak));
    }

    #[test]
    fn test_rows_outside_table_dropped() {
        let t = load_preset("bca").unwrap();
        let r = row(&[("01/02", 10.0), ("TRANSFER", 95.0)]);
        let (state, rec) = classify_row(DocumentState::new(&t), &r, &t);
        assert_eq!(rec, None);
        assert_eq!(state.region, Region::PreHeader);
    }

    #[test]
    fn test_summary_verbatim() {
        let t = load_preset("bca").unwrap();
        let r = row(&[
            ("SALDO", 10.0),
            ("AWAL", 50.0),
            (":", 120.0),
            ("1,234.00", 380.0),
        ]);
        let (_, rec) = classify_row(in_table(&t), &r, &t);
        assert_eq!(
            rec,
            Some(LineRecord::Summary {
                text: "SALDO AWAL : 1,234.00".into()
            })
        );
    }

    #[test]
    fn test_page_number_dropped() {
        let t = load_preset("bca").unwrap();
        let r = row(&[("2", 280.0), ("/", 290.0), ("5", 300.0)]);
        let (state, rec) = classify_row(in_table(&t), &r, &t);
        assert_eq!(rec, None);
        assert!(state.in_table());
    }

    #[test]
    fn test_body_row_reconstructed() {
        let t = load_preset("bca").unwrap();
        let r = row(&[
            ("01/02", 10.0),
            ("TRANSFER", 95.0),
            ("MASUK", 130.0),
            ("1,000.00", 375.0),
            ("CR", 440.0),
            ("5,000.00", 495.0),
        ]);
        let (_, rec) = classify_row(in_table(&t), &r, &t);
        assert_eq!(
            rec.unwrap().render(&t),
            "01/02 TRANSFER MASUK 1,000.00 CR 5,000.00"
        );
    }

    #[test]
    fn test_start_page_regions() {
        let t = load_preset("bca").unwrap();
        let state = DocumentState::new(&t);
        assert_eq!(state.start_page().region, Region::PreHeader);
        let state = in_table(&t).finish_header_scan().start_page();
        assert_eq!(state.region, Region::AwaitingTable);
        assert!(state.boundaries_locked);
    }

    #[test]
    fn test_scan_header_info_stops_at_sentinel() {
        let t = load_preset("bca").unwrap();
        let rows = vec![
            row(&[("REKENING", 10.0), ("TAHAPAN", 80.0)]),
            row(&[
                ("BUDI", 10.0),
                ("NO.", 300.0),
                ("REKENING", 320.0),
                (":", 380.0),
                ("1234567890", 390.0),
            ]),
            row(&[("JL.", 10.0), ("MERDEKA", 30.0)]),
            row(&[
                ("PERIODE", 300.0),
                (":", 340.0),
                ("JANUARI", 350.0),
                ("2024", 400.0),
            ]),
            row(&[
                ("MATA", 300.0),
                ("UANG", 330.0),
                (":", 370.0),
                ("IDR", 380.0),
            ]),
            header_row(),
            row(&[("PERIODE", 300.0), (":", 340.0), ("FEBRUARI", 350.0)]),
        ];
        let lines: Vec<String> = scan_header_info(&rows, &t)
            .iter()
            .map(|r| r.render(&t))
            .collect();
        assert_eq!(
            lines,
            vec![
                "BUDI NO. REKENING : 1234567890",
                "PERIODE : JANUARI 2024",
                "MATA UANG : IDR",
            ]
        );
    }
}
