use crate::error::MutasiError;
use crate::layout::columns::{ColumnBoundaries, ColumnLandmarks};
use serde::{Deserialize, Serialize};
use std::path::Path;

const BCA_TEMPLATE_JSON: &str = include_str!("../../../templates/bca.json");

/// Available predefined templates.
pub const PRESETS: &[&str] = &["bca"];

/// Layout description of one bank's statement table.
///
/// Holds every literal the reconstruction looks for (landmarks, markers,
/// prefixes) together with the canonical text emitted for fixed lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementTemplate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Fallback column thresholds, used until a header row yields real ones.
    pub default_boundaries: ColumnBoundaries,
    /// Height of a row bucket in points.
    #[serde(default = "default_row_tolerance")]
    pub row_tolerance: f64,
    pub sentinel: SentinelDef,
    pub landmarks: ColumnLandmarks,
    pub page_break: PageBreakDef,
    pub summary_prefixes: Vec<String>,
    pub header_markers: Vec<String>,
    pub direction_markers: Vec<String>,
}

/// Column-header row recognition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentinelDef {
    /// Tokens that must all appear (exact match) for a row to be the header.
    pub tokens: Vec<String>,
    /// Canonical text emitted in place of the header row.
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageBreakDef {
    /// Substring identifying the "continued on next page" footer.
    pub marker: String,
    pub text: String,
}

fn default_row_tolerance() -> f64 {
    2.0
}

impl StatementTemplate {
    pub fn is_summary(&self, text: &str) -> bool {
        self.summary_prefixes
            .iter()
            .any(|p| text.starts_with(p.as_str()))
    }

    pub fn is_header_info(&self, text: &str) -> bool {
        self.header_markers
            .iter()
            .any(|m| text.contains(m.as_str()))
    }

    pub fn is_page_break(&self, text: &str) -> bool {
        text.contains(self.page_break.marker.as_str())
    }

    pub fn is_direction_marker(&self, token: &str) -> bool {
        self.direction_markers.iter().any(|d| d == token)
    }
}

/// Load a predefined template by name.
pub fn load_preset(name: &str) -> Result<StatementTemplate, MutasiError> {
    match name {
        "bca" => {
            let template: StatementTemplate = serde_json::from_str(BCA_TEMPLATE_JSON)?;
            Ok(template)
        }
        _ => Err(MutasiError::TemplateInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}

/// Load a template from a JSON file.
pub fn load_template(path: &Path) -> Result<StatementTemplate, MutasiError> {
    let content = std::fs::read_to_string(path).map_err(|e| MutasiError::TemplateLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_template(&content, path)
}

/// Parse a template from a JSON string.
pub fn parse_template(json: &str, source: &Path) -> Result<StatementTemplate, MutasiError> {
    let template: StatementTemplate =
        serde_json::from_str(json).map_err(|e| MutasiError::TemplateLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_template(&template)?;
    Ok(template)
}

/// Validate that a template is well-formed.
pub fn validate_template(template: &StatementTemplate) -> Result<(), MutasiError> {
    if template.name.trim().is_empty() {
        return Err(MutasiError::TemplateInvalid("name must not be empty".into()));
    }

    let b = &template.default_boundaries;
    if !(b.date_max < b.mutasi_min && b.mutasi_min < b.saldo_min) {
        return Err(MutasiError::TemplateInvalid(format!(
            "default boundaries must be increasing, got ({}, {}, {})",
            b.date_max, b.mutasi_min, b.saldo_min
        )));
    }

    if template.row_tolerance.is_nan() || template.row_tolerance <= 0.0 {
        return Err(MutasiError::TemplateInvalid(format!(
            "row_tolerance must be positive, got {}",
            template.row_tolerance
        )));
    }

    if template.sentinel.tokens.is_empty() {
        return Err(MutasiError::TemplateInvalid("sentinel tokens must not be empty".into()));
    }

    let required = [
        ("sentinel.text", &template.sentinel.text),
        ("landmarks.description", &template.landmarks.description),
        ("landmarks.amount", &template.landmarks.amount),
        ("landmarks.balance", &template.landmarks.balance),
        ("page_break.marker", &template.page_break.marker),
        ("page_break.text", &template.page_break.text),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(MutasiError::TemplateInvalid(format!("{field} must not be empty")));
        }
    }

    let lists = [
        ("summary_prefixes", &template.summary_prefixes),
        ("header_markers", &template.header_markers),
        ("direction_markers", &template.direction_markers),
    ];
    for (field, values) in lists {
        if values.iter().any(|v| v.trim().is_empty()) {
            return Err(MutasiError::TemplateInvalid(format!(
                "{field} must not contain empty entries"
            )));
        }
    }

    Ok(())
}
