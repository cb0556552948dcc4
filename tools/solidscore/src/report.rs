use crate::errors::SolidscoreError;
use crate::logging::append_run_log;
use crate::runtime::FileSystem;
use serde::Deserialize;
use serde_json::json;
use std::path::Path;

// Records stay untyped serde_json values until normalization: producers disagree
// on field placement and a single malformed record must not reject the report.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawReport {
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
}

pub fn load_report(fs: &dyn FileSystem, path: &Path) -> Result<RawReport, SolidscoreError> {
    append_run_log(
        "info",
        "report.load.started",
        json!({ "path": path.display().to_string() }),
    );
    let text = fs.read_to_string(path).map_err(|e| {
        append_run_log(
            "error",
            "report.load.unreadable",
            json!({ "path": path.display().to_string(), "error": e.to_string() }),
        );
        SolidscoreError::Report(format!("cannot read report {}: {e}", path.display()))
    })?;
    let report: RawReport = serde_json::from_str(&text).map_err(|e| {
        append_run_log(
            "error",
            "report.load.invalid_json",
            json!({ "path": path.display().to_string(), "error": e.to_string() }),
        );
        SolidscoreError::Report(format!("invalid report json: {e}"))
    })?;
    append_run_log(
        "info",
        "report.load.completed",
        json!({
            "path": path.display().to_string(),
            "result_count": report.results.len()
        }),
    );
    Ok(report)
}
