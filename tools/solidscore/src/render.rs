use crate::finding::Finding;

pub const NO_VIOLATIONS_PLACEHOLDER: &str = "No violations found.";

// Order-preserving truncation to the first `max_findings` entries. No sorting,
// no deduplication.
pub fn render_findings(findings: &[Finding], max_findings: usize) -> Vec<String> {
    if findings.is_empty() {
        return vec![NO_VIOLATIONS_PLACEHOLDER.to_string()];
    }
    findings.iter().take(max_findings).map(render_line).collect()
}

pub fn render_line(finding: &Finding) -> String {
    format!(
        "- [{}] {} — `{}:{}` ({})",
        finding.severity, finding.message, finding.path, finding.line, finding.rule_id
    )
}
