use crate::finding::Finding;
use crate::logging::append_run_log;
use crate::principle::Principle;
use serde_json::json;

// Two classification paths. A structured hint is authoritative and selects
// exactly one principle; free text is a permissive substring fallback that can
// implicate several principles at once.
pub fn classify(finding: &Finding) -> Vec<Principle> {
    if let Some(principle) = finding.principle_hint {
        append_run_log(
            "debug",
            "classify.hint_selected",
            json!({
                "rule_id": finding.rule_id,
                "principle": principle.as_str()
            }),
        );
        return vec![principle];
    }

    let haystack = format!("{}{}", finding.rule_id, finding.message).to_lowercase();
    let matched: Vec<Principle> = Principle::ALL
        .iter()
        .copied()
        .filter(|principle| haystack.contains(principle.token()))
        .collect();

    if !matched.is_empty() {
        append_run_log(
            "debug",
            "classify.text_matched",
            json!({
                "rule_id": finding.rule_id,
                "principles": matched.iter().map(|p| p.as_str()).collect::<Vec<_>>()
            }),
        );
    }
    matched
}
