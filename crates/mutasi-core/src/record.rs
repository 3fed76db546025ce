use crate::template::StatementTemplate;
use serde::{Deserialize, Serialize};

/// Text of the non-date columns of a table row. Empty strings mean the
/// column had no words.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowFields {
    pub description: String,
    pub amount: String,
    pub direction: String,
    pub balance: String,
}

impl RowFields {
    pub fn is_empty(&self) -> bool {
        self.parts().next().is_none()
    }

    /// Non-empty fields in output order.
    pub fn parts(&self) -> impl Iterator<Item = &str> {
        [
            self.description.as_str(),
            self.amount.as_str(),
            self.direction.as_str(),
            self.balance.as_str(),
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
    }
}

/// One reconstructed output line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LineRecord {
    /// Account metadata row from the first page header block, verbatim.
    HeaderInfo { text: String },
    /// Table column-header row.
    Sentinel,
    /// Table row starting with a date.
    Transaction { date: String, fields: RowFields },
    /// Table row without a date, wrapping the previous transaction.
    Continuation { fields: RowFields },
    /// "Continued on next page" footer inside the table.
    PageBreak,
    /// Opening/closing balance and totals footer, verbatim.
    Summary { text: String },
}

/// Variant of a [`LineRecord`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    HeaderInfo,
    Sentinel,
    Transaction,
    Continuation,
    PageBreak,
    Summary,
}

impl LineRecord {
    pub fn kind(&self) -> LineKind {
        match self {
            LineRecord::HeaderInfo { .. } => LineKind::HeaderInfo,
            LineRecord::Sentinel => LineKind::Sentinel,
            LineRecord::Transaction { .. } => LineKind::Transaction,
            LineRecord::Continuation { .. } => LineKind::Continuation,
            LineRecord::PageBreak => LineKind::PageBreak,
            LineRecord::Summary { .. } => LineKind::Summary,
        }
    }

    /// Render the record as one line of the downstream text format.
    pub fn render(&self, template: &StatementTemplate) -> String {
        match self {
            LineRecord::HeaderInfo { text } | LineRecord::Summary { text } => text.clone(),
            LineRecord::Sentinel => template.sentinel.text.clone(),
            LineRecord::PageBreak => template.page_break.text.clone(),
            LineRecord::Transaction { date, fields } => std::iter::once(date.as_str())
                .chain(fields.parts())
                .collect::<Vec<_>>()
                .join(" "),
            LineRecord::Continuation { fields } => fields.parts().collect::<Vec<_>>().join(" "),
        }
    }
}
