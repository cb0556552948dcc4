use crate::principle::Principle;
use serde::Serialize;
use serde_json::Value;

pub const UNKNOWN_RULE: &str = "unknown-rule";
pub const UNSPECIFIED_MESSAGE: &str = "Unspecified rule";
pub const UNKNOWN_SEVERITY: &str = "UNKNOWN";
pub const UNKNOWN_PATH: &str = "unknown";

// Severity stays a verbatim string: the configured high-severity set and the
// rendered lines both need the producer's original spelling, and comparisons
// are case-insensitive anyway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub rule_id: String,
    pub message: String,
    pub severity: String,
    pub path: String,
    pub line: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principle_hint: Option<Principle>,
}

// Repairs one raw record into a fully populated Finding. Never fails: a record
// of the wrong shape degrades field by field to the sentinels.
pub fn normalize(raw: &Value) -> Finding {
    let extra = raw.get("extra");

    let rule_id = string_field(raw, "check_id").unwrap_or_else(|| UNKNOWN_RULE.to_string());
    let message = string_field(raw, "message")
        .or_else(|| extra.and_then(|e| string_field(e, "message")))
        .unwrap_or_else(|| UNSPECIFIED_MESSAGE.to_string());
    let severity = string_field(raw, "severity")
        .or_else(|| extra.and_then(|e| string_field(e, "severity")))
        .unwrap_or_else(|| UNKNOWN_SEVERITY.to_string());
    let path = string_field(raw, "path").unwrap_or_else(|| UNKNOWN_PATH.to_string());
    let line = raw
        .get("start")
        .and_then(|start| start.get("line"))
        .and_then(Value::as_u64)
        .unwrap_or(0);
    let principle_hint = string_field(raw, "principle")
        .or_else(|| {
            extra
                .and_then(|e| e.get("metadata"))
                .and_then(|metadata| string_field(metadata, "principle"))
        })
        .and_then(|hint| Principle::parse_hint(&hint));

    Finding {
        rule_id,
        message,
        severity,
        path,
        line,
        principle_hint,
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}
