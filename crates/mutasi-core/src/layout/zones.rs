use crate::extraction::Word;
use crate::layout::columns::ColumnBoundaries;
use crate::layout::rows::Row;
use crate::record::{LineRecord, RowFields};
use crate::template::StatementTemplate;

/// A table row's words split by column.
///
/// Every word of the row ends up in exactly one of the vectors. Words in the
/// amount x-range that are neither an amount nor a direction marker go to
/// `excluded`.
#[derive(Debug, Default)]
pub struct ZonedRow<'a> {
    pub date: Vec<&'a Word>,
    pub description: Vec<&'a Word>,
    pub amount: Vec<&'a Word>,
    pub direction: Vec<&'a Word>,
    pub balance: Vec<&'a Word>,
    pub excluded: Vec<&'a Word>,
}

impl ZonedRow<'_> {
    /// Number of words across all zones, `excluded` included.
    pub fn len(&self) -> usize {
        self.date.len()
            + self.description.len()
            + self.amount.len()
            + self.direction.len()
            + self.balance.len()
            + self.excluded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Assign each word of `row` to a column zone by its left edge.
pub fn partition_row<'a>(
    row: &'a Row,
    boundaries: &ColumnBoundaries,
    template: &StatementTemplate,
) -> ZonedRow<'a> {
    let mut zoned = ZonedRow::default();

    for w in &row.words {
        if w.x0 < boundaries.date_max {
            zoned.date.push(w);
        } else if w.x0 < boundaries.mutasi_min {
            // Description and branch code (CBG) share this zone; the
            // transaction parser looks for DB/CR keywords here too.
            zoned.description.push(w);
        } else if w.x0 < boundaries.saldo_min {
            if is_amount(&w.text) {
                zoned.amount.push(w);
            } else if template.is_direction_marker(&w.text) {
                zoned.direction.push(w);
            } else {
                zoned.excluded.push(w);
            }
        } else if w.x0 >= boundaries.saldo_min {
            zoned.balance.push(w);
        } else {
            // NaN coordinates
            zoned.excluded.push(w);
        }
    }

    zoned
}

/// Rebuild one table-body row as a transaction or continuation line.
///
/// Returns `None` when no zone holds any text.
pub fn reconstruct_row(
    row: &Row,
    boundaries: &ColumnBoundaries,
    template: &StatementTemplate,
) -> Option<LineRecord> {
    let zoned = partition_row(row, boundaries, template);

    let date = join(&zoned.date);
    let fields = RowFields {
        description: join(&zoned.description),
        amount: join(&zoned.amount),
        direction: join(&zoned.direction),
        balance: join(&zoned.balance),
    };

    if !date.is_empty() {
        Some(LineRecord::Transaction { date, fields })
    } else if !fields.is_empty() {
        Some(LineRecord::Continuation { fields })
    } else {
        None
    }
}

fn join(words: &[&Word]) -> String {
    words
        .iter()
        .map(|w| w.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Check whether a token is a formatted amount such as `1,234.00`.
///
/// Digits and thousands commas, a dot, then exactly two digits.
pub fn is_amount(token: &str) -> bool {
    let Some((int_part, frac)) = token.rsplit_once('.') else {
        return false;
    };
    !int_part.is_empty()
        && int_part.chars().all(|c| c.is_ascii_digit() || c == ',')
        && int_part.chars().any(|c| c.is_ascii_digit())
        && frac.len() == 2
        && frac.chars().all(|c| c.is_ascii_digit())
}

/// Check whether a row's text is a page counter such as `2 / 5`.
pub fn is_page_number(text: &str) -> bool {
    let Some((left, right)) = text.trim().split_once('/') else {
        return false;
    };
    is_integer(left.trim_end()) && is_integer(right.trim_start())
}

fn is_integer(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}
