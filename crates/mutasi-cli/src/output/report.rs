//! Per-file status lines for batch conversion.
//!
//! Printed on stdout with fixed prefixes (`OK:`, `ERROR:`, `DONE:`) so a
//! supervising process can follow progress line by line.

use mutasi_core::error::MutasiError;
use mutasi_core::ConversionStats;
use std::path::Path;
use tracing::warn;

pub fn converted(input: &Path, output: &Path, stats: &ConversionStats) {
    println!("{}", ok_line(input, output));
    if stats.sentinels == 0 {
        warn!(file = %input.display(), "no transaction table header found");
    }
}

pub fn failed(input: &Path, error: &MutasiError) {
    println!("{}", error_line(input, error));
}

pub fn done(ok: usize, failed: usize) {
    println!("{}", done_line(ok, failed));
}

fn ok_line(input: &Path, output: &Path) -> String {
    format!("OK: {} -> {}", input.display(), output.display())
}

fn error_line(input: &Path, error: &MutasiError) -> String {
    format!("ERROR: {}: {}", input.display(), error)
}

fn done_line(ok: usize, failed: usize) -> String {
    format!("DONE: {ok} converted, {failed} failed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_lines() {
        assert_eq!(
            ok_line(Path::new("a.pdf"), Path::new("a.txt")),
            "OK: a.pdf -> a.txt"
        );
        assert_eq!(
            error_line(Path::new("b.pdf"), &MutasiError::PdftotextNotFound),
            format!("ERROR: b.pdf: {}", MutasiError::PdftotextNotFound)
        );
        assert_eq!(done_line(2, 1), "DONE: 2 converted, 1 failed");
    }
}
