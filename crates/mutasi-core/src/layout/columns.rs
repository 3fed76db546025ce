use crate::layout::rows::Row;
use serde::{Deserialize, Serialize};

/// Three x-thresholds splitting a row into date, description, amount and
/// balance zones.
///
/// - date: `x0 < date_max`
/// - description: `date_max <= x0 < mutasi_min`
/// - amount / direction: `mutasi_min <= x0 < saldo_min`
/// - balance: `x0 >= saldo_min`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnBoundaries {
    pub date_max: f64,
    pub mutasi_min: f64,
    pub saldo_min: f64,
}

/// Header words whose left edges mark the column boundaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnLandmarks {
    /// Description column header; its x0 ends the date zone.
    pub description: String,
    /// Amount column header; its x0 starts the amount zone.
    pub amount: String,
    /// Balance column header; its x0 starts the balance zone.
    pub balance: String,
}

/// Derive column boundaries from the table header row.
///
/// Landmarks are matched case-insensitively against whole words. If a
/// landmark appears more than once the rightmost occurrence is used. Returns
/// `None` unless all three landmarks are present.
pub fn detect_boundaries(row: &Row, landmarks: &ColumnLandmarks) -> Option<ColumnBoundaries> {
    let mut description = None;
    let mut amount = None;
    let mut balance = None;

    for w in &row.words {
        let t = w.text.to_uppercase();
        if t == landmarks.description.to_uppercase() {
            description = Some(w.x0);
        } else if t == landmarks.amount.to_uppercase() {
            amount = Some(w.x0);
        } else if t == landmarks.balance.to_uppercase() {
            balance = Some(w.x0);
        }
    }

    Some(ColumnBoundaries {
        date_max: description?,
        mutasi_min: amount?,
        saldo_min: balance?,
    })
}
