use mutasi_core::error::MutasiError;
use mutasi_core::extraction::pdftotext::PdftotextExtractor;
use mutasi_core::extraction::WordExtractor;
use mutasi_core::template::StatementTemplate;
use mutasi_core::Conversion;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::commands::select_template;
use crate::output::report;

pub struct BatchSummary {
    pub converted: usize,
    pub failed: usize,
}

pub fn run(
    inputs: Vec<PathBuf>,
    output_file: Option<PathBuf>,
    output_format: &str,
    preset: &str,
    template_file: Option<&Path>,
) -> Result<BatchSummary, MutasiError> {
    let template = select_template(preset, template_file)?;
    let format = match output_format {
        "text" | "json" => output_format,
        other => {
            return Err(MutasiError::InvalidArgs(format!(
                "unknown format '{other}' (expected 'text' or 'json')"
            )))
        }
    };

    let files = collect_inputs(&inputs)?;
    if output_file.is_some() && files.len() != 1 {
        return Err(MutasiError::InvalidArgs(format!(
            "--out needs exactly one PDF input, found {}",
            files.len()
        )));
    }

    info!(files = files.len(), template = %template.name, "converting statements");

    if !PdftotextExtractor::is_available() {
        return Err(MutasiError::PdftotextNotFound);
    }
    let extractor = PdftotextExtractor::new();
    let mut summary = BatchSummary {
        converted: 0,
        failed: 0,
    };

    for file in &files {
        let out = output_file
            .clone()
            .unwrap_or_else(|| default_output(file, format));
        match convert_one(file, &out, format, &extractor, &template) {
            Ok(conversion) => {
                report::converted(file, &out, &conversion.stats);
                summary.converted += 1;
            }
            Err(e) => {
                warn!(file = %file.display(), error = %e, "conversion failed");
                report::failed(file, &e);
                summary.failed += 1;
            }
        }
    }

    report::done(summary.converted, summary.failed);
    Ok(summary)
}

fn convert_one(
    input: &Path,
    output: &Path,
    format: &str,
    extractor: &dyn WordExtractor,
    template: &StatementTemplate,
) -> Result<Conversion, MutasiError> {
    let pdf_bytes = std::fs::read(input)?;
    let conversion = mutasi_core::convert_pdf(&pdf_bytes, extractor, template)?;

    match format {
        "json" => {
            let json = serde_json::to_string_pretty(&conversion)?;
            std::fs::write(output, json)?;
        }
        _ => mutasi_core::write_text(&conversion, output)?,
    }

    Ok(conversion)
}

fn default_output(input: &Path, format: &str) -> PathBuf {
    match format {
        "json" => input.with_extension("json"),
        _ => mutasi_core::default_output_path(input),
    }
}

/// Expand the command-line inputs into a list of PDF files.
///
/// Directories are searched recursively. Files are kept in argument order,
/// directory contents sorted by name, and duplicates (by canonical path)
/// dropped.
fn collect_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, MutasiError> {
    let mut found = Vec::new();

    for input in inputs {
        if input.is_dir() {
            for entry in WalkDir::new(input).sort_by_file_name() {
                let entry = entry.map_err(|e| MutasiError::Io(e.into()))?;
                if entry.file_type().is_file() && is_pdf(entry.path()) {
                    found.push(entry.into_path());
                }
            }
        } else if input.is_file() {
            if is_pdf(input) {
                found.push(input.clone());
            } else {
                warn!(file = %input.display(), "skipping non-PDF input");
            }
        } else {
            return Err(MutasiError::NoInput(format!(
                "{} does not exist",
                input.display()
            )));
        }
    }

    let mut seen = HashSet::new();
    found.retain(|p| seen.insert(p.canonicalize().unwrap_or_else(|_| p.clone())));

    if found.is_empty() {
        return Err(MutasiError::NoInput("no PDF files found".into()));
    }
    Ok(found)
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}
