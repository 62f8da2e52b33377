use clap::Args;
use serde_json::Value;
use zephyr_sdk::types::CustomFields;

/// `--max-results` / `--start-at`, shared by every list command.
#[derive(Debug, Clone, Copy, Args)]
pub struct PageArgs {
    /// Maximum number of results to return (1-1000).
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=1000))]
    pub max_results: u32,
    /// Zero-indexed position of the first result.
    #[arg(long, default_value_t = 0)]
    pub start_at: u32,
}

/// Parse `key=value` for `--custom-field`.
///
/// Values are typed: integers and decimals become numbers, `true`/`false`
/// (any case) booleans, `[...]`/`{...}` JSON, anything else a string.
pub fn parse_custom_field(input: &str) -> Result<(String, Value), String> {
    let (key, value) = input
        .split_once('=')
        .ok_or_else(|| format!("invalid custom field '{}', expected key=value", input))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("invalid custom field '{}', key is empty", input));
    }
    Ok((key.to_string(), custom_field_value(value)))
}

fn custom_field_value(raw: &str) -> Value {
    if is_number(raw) {
        if let Ok(n) = raw.parse::<i64>() {
            return Value::from(n);
        }
        if let Ok(f) = raw.parse::<f64>() {
            return Value::from(f);
        }
    }
    if raw.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if (raw.starts_with('[') && raw.ends_with(']')) || (raw.starts_with('{') && raw.ends_with('}'))
    {
        if let Ok(json) = serde_json::from_str(raw) {
            return json;
        }
    }
    Value::String(raw.to_string())
}

/// `-?\d+(\.\d+)?`
fn is_number(raw: &str) -> bool {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    let (int, frac) = match digits.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (digits, None),
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    all_digits(int) && frac.map_or(true, all_digits)
}

/// Collect repeated `--custom-field` values; later keys win.
pub fn custom_fields(pairs: Vec<(String, Value)>) -> Option<CustomFields> {
    if pairs.is_empty() {
        return None;
    }
    Some(pairs.into_iter().collect())
}

/// Accept an ISO 8601 timestamp (`2024-01-31T10:00:00Z`) or a plain date (`2024-01-31`).
pub fn parse_date(input: &str) -> Result<String, String> {
    if chrono::DateTime::parse_from_rfc3339(input).is_ok()
        || chrono::NaiveDate::parse_from_str(input, "%Y-%m-%d").is_ok()
    {
        Ok(input.to_string())
    } else {
        Err(format!(
            "invalid date '{}', expected ISO 8601 (e.g. 2024-01-31 or 2024-01-31T10:00:00Z)",
            input
        ))
    }
}

/// Overwrite `key` in a JSON object when `value` is set.
pub fn merge_field<T: Into<Value>>(target: &mut Value, key: &str, value: Option<T>) {
    if let (Some(object), Some(value)) = (target.as_object_mut(), value) {
        object.insert(key.to_string(), value.into());
    }
}

/// Merge custom fields into the object's existing `customFields`.
pub fn merge_custom_fields(target: &mut Value, fields: Option<CustomFields>) {
    let (Some(object), Some(fields)) = (target.as_object_mut(), fields) else {
        return;
    };
    let entry = object
        .entry("customFields")
        .or_insert_with(|| Value::Object(CustomFields::new()));
    match entry.as_object_mut() {
        Some(existing) => existing.extend(fields),
        None => *entry = Value::Object(fields),
    }
}
