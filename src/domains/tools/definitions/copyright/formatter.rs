//! Plain-text rendering of registration search results.
//!
//! The payload is loosely typed and every field is optional. Lookups never
//! fail: anything missing, null, or blank renders as [`NOT_AVAILABLE`] and
//! the next field (or record) is processed as usual.

use serde_json::Value;

use super::fetcher::SearchResponse;

/// Fallback for any absent field.
pub const NOT_AVAILABLE: &str = "N/A";

/// Shown for a person or organization entry without a name.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Emitted in place of record sections when there is nothing to show.
pub const NO_DATA_NOTICE: &str = "No data to format.";

pub const REPORT_TITLE: &str = "COPYRIGHT SEARCH RESULTS";

const HEADER_RULE_WIDTH: usize = 60;
const RECORD_RULE_WIDTH: usize = 30;

/// Render `response` as a fixed-layout report, records in upstream order.
pub fn format_report(response: &SearchResponse) -> String {
    let mut lines = Vec::new();
    push_header(&mut lines, response.metadata());

    let records = response.records();
    if records.is_empty() {
        lines.push(NO_DATA_NOTICE.to_string());
        return lines.join("\n");
    }

    for (index, record) in records.iter().enumerate() {
        push_record(&mut lines, index + 1, record);
    }

    lines.join("\n")
}

fn push_header(lines: &mut Vec<String>, metadata: Option<&Value>) {
    let meta = |key: &str| or_na(text(metadata.and_then(|m| m.get(key))));

    lines.push("=".repeat(HEADER_RULE_WIDTH));
    lines.push(REPORT_TITLE.to_string());
    lines.push("=".repeat(HEADER_RULE_WIDTH));
    lines.push(format!("Search took: {} ms", meta("took_ms")));
    lines.push(format!("Total hits: {}", meta("hit_count")));
    lines.push(format!("Query: {}", meta("query")));
    lines.push(String::new());
}

fn push_record(lines: &mut Vec<String>, number: usize, record: &Value) {
    let hit = record.get("hit");
    let field = |key: &str| text(hit.and_then(|h| h.get(key)));

    lines.push(format!("RECORD {}", number));
    lines.push("-".repeat(RECORD_RULE_WIDTH));
    lines.push(format!(
        "Relevance Score: {}",
        or_na(text(record.get("score")))
    ));

    let title = field("title_concatenated").map(|t| t.replace('/', " / "));
    lines.push(format!("Title: {}", or_na(title)));

    lines.push(format!(
        "Registration: {} (Class: {})",
        or_na(field("registration_number")),
        or_na(field("registration_class"))
    ));
    lines.push(format!(
        "Registration Date: {}",
        or_na(field("registration_date"))
    ));

    let work_type = field("type_of_work_to_english").or_else(|| field("type_of_work"));
    lines.push(format!("Type of Work: {}", or_na(work_type)));

    let authors = names(hit, "persons", |person| has_role(person, "author"));
    lines.push(format!("Authors: {}", or_na(authors)));

    let organizations = names(hit, "organizations", |_| true);
    lines.push(format!("Organizations: {}", or_na(organizations)));

    let published = field("first_published_date").or_else(|| field("publication_date"));
    lines.push(format!("Publication Date: {}", or_na(published)));

    lines.push(format!("Status: {}", or_na(field("registration_status"))));

    if let Some(created) = field("date_creation_date") {
        lines.push(format!("Creation Date: {}", created));
    }

    lines.push(String::new());
}

/// Comma-joined names of `display_names.<group>` entries accepted by `keep`.
fn names(hit: Option<&Value>, group: &str, keep: impl Fn(&Value) -> bool) -> Option<String> {
    let entries = hit
        .and_then(|h| h.get("display_names"))
        .and_then(|d| d.get(group))
        .and_then(Value::as_array)?;

    let names: Vec<String> = entries
        .iter()
        .filter(|entry| keep(entry))
        .map(|entry| text(entry.get("name")).unwrap_or_else(|| UNKNOWN_NAME.to_string()))
        .collect();

    if names.is_empty() {
        None
    } else {
        Some(names.join(", "))
    }
}

fn has_role(entry: &Value, role: &str) -> bool {
    match entry.get("roles") {
        Some(Value::Array(roles)) => roles.iter().any(|r| r.as_str() == Some(role)),
        Some(Value::String(single)) => single == role,
        _ => false,
    }
}

/// Display form of a scalar; `None` for missing, null, or blank values.
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

fn or_na(value: Option<String>) -> String {
    value.unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
