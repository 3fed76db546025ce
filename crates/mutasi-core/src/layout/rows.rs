use crate::extraction::Word;
use std::collections::BTreeMap;

/// Words sharing one vertical bucket, sorted left-to-right.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Bucket index; the row's quantized top is `key * tolerance`.
    pub key: i64,
    pub words: Vec<Word>,
}

impl Row {
    /// Word texts joined with single spaces.
    pub fn text(&self) -> String {
        self.texts().collect::<Vec<_>>().join(" ")
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(|w| w.text.as_str())
    }

    pub fn has_token(&self, token: &str) -> bool {
        self.texts().any(|t| t == token)
    }
}

/// Group a page's words into visual rows.
///
/// A word lands in bucket `round(top / tolerance)` (ties to even), so with
/// the default tolerance of 2 points words whose tops differ by 1 point share
/// a row. Rows come back top-to-bottom.
pub fn group_rows(words: &[Word], tolerance: f64) -> Vec<Row> {
    let mut buckets: BTreeMap<i64, Vec<Word>> = BTreeMap::new();
    for w in words {
        let key = (w.top / tolerance).round_ties_even() as i64;
        buckets.entry(key).or_default().push(w.clone());
    }

    buckets
        .into_iter()
        .map(|(key, mut words)| {
            words.sort_by(|a, b| a.x0.total_cmp(&b.x0));
            Row { key, words }
        })
        .collect()
}
