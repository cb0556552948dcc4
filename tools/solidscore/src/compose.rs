use crate::scoring::ScoreSummary;

pub const COMMENT_TITLE: &str = "✅ **SOLID Scan Complete**";
pub const FINDINGS_HEADER: &str = "**Top Findings:**";

// Fixed-order plain-text assembly. Messages and paths are interpolated
// verbatim; the same inputs always produce a byte-identical body.
pub fn compose_comment(
    summary: &ScoreSummary,
    finding_lines: &[String],
    artifact_url: &str,
) -> String {
    let mut lines = Vec::new();
    lines.push(COMMENT_TITLE.to_string());
    lines.push(String::new());
    lines.push(format!("**Estimated SOLID Score:** {}", summary.overall));
    for (principle, score) in summary.board.entries() {
        lines.push(format!("- {}: {}", principle.as_str(), score));
    }
    lines.push(String::new());
    lines.push(FINDINGS_HEADER.to_string());
    lines.extend(finding_lines.iter().cloned());
    lines.push(String::new());
    lines.push(format!("[📎 Download report artifact]({artifact_url})"));
    lines.join("\n")
}
