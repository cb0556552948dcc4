use crate::errors::SolidscoreError;
use crate::finding::Finding;
use crate::logging::append_run_log;
use crate::runtime::FileSystem;
use serde_json::json;
use std::path::Path;

// Standalone artifact renders: every finding, untruncated, for the workflow
// artifact upload. Distinct from the bounded comment body.
pub fn render_html_report(findings: &[Finding]) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n");
    out.push_str("<title>SOLID Scan Report</title>\n<style>\n");
    out.push_str("body { font-family: sans-serif; margin: 2em; }\n");
    out.push_str("h1 { color: #2c3e50; }\n");
    out.push_str(
        ".finding { margin-bottom: 1em; padding: 1em; border: 1px solid #ddd; border-radius: 5px; }\n",
    );
    out.push_str(".severity-critical { background: #ffd6d6; }\n");
    out.push_str(".severity-error { background: #ffe5e5; }\n");
    out.push_str(".severity-warning { background: #fff8e5; }\n");
    out.push_str(".severity-info { background: #e5f3ff; }\n");
    out.push_str(".severity-unknown { background: #f0f0f0; }\n");
    out.push_str("</style>\n</head>\n<body>\n<h1>SOLID Scan Report</h1>\n");
    out.push_str(&format!(
        "<p><strong>Total Findings:</strong> {}</p>\n",
        findings.len()
    ));
    for finding in findings {
        out.push_str(&format!(
            "<div class=\"finding severity-{}\">\n",
            finding.severity.to_lowercase()
        ));
        out.push_str(&format!(
            "<strong>[{}]</strong> <code>{}:{}</code><br>\n",
            finding.severity, finding.path, finding.line
        ));
        out.push_str(&format!("<p>{}</p>\n", finding.message));
        out.push_str(&format!(
            "<small><em>Rule: {}</em></small>\n</div>\n",
            finding.rule_id
        ));
    }
    out.push_str("</body>\n</html>\n");
    out
}

pub fn write_html_report(
    fs: &dyn FileSystem,
    path: &Path,
    findings: &[Finding],
) -> Result<(), SolidscoreError> {
    let html = render_html_report(findings);
    if let Some(parent) = path.parent() {
        fs.create_dir_all(parent)?;
    }
    fs.write_string(path, &html)?;
    append_run_log(
        "info",
        "artifacts.html.written",
        json!({
            "path": path.display().to_string(),
            "finding_count": findings.len(),
            "output_bytes": html.len()
        }),
    );
    Ok(())
}

pub fn write_json_report(
    fs: &dyn FileSystem,
    path: &Path,
    findings: &[Finding],
) -> Result<(), SolidscoreError> {
    let text = serde_json::to_string_pretty(findings)
        .map_err(|e| SolidscoreError::Io(e.to_string()))?;
    if let Some(parent) = path.parent() {
        fs.create_dir_all(parent)?;
    }
    fs.write_string(path, &text)?;
    append_run_log(
        "info",
        "artifacts.json.written",
        json!({
            "path": path.display().to_string(),
            "finding_count": findings.len()
        }),
    );
    Ok(())
}
