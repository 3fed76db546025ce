pub mod convert;
pub mod template;
pub mod words;

use mutasi_core::error::MutasiError;
use mutasi_core::template::{self as tpl, StatementTemplate};
use std::path::Path;

/// Resolve the template selected on the command line.
pub fn select_template(
    preset: &str,
    file: Option<&Path>,
) -> Result<StatementTemplate, MutasiError> {
    match file {
        Some(path) => tpl::load_template(path),
        None => tpl::load_preset(preset),
    }
}
