use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::schema::Value;

/// Cell contents read as "no value", on top of the empty string.
static MISSING_TOKENS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
        "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
    ]
    .into_iter()
    .collect()
});

/// True when a raw cell stands for a missing value.
pub fn is_missing(raw: &str) -> bool {
    raw.is_empty() || MISSING_TOKENS.contains(raw)
}

/// Parse a cell as a plain float (`.` decimal point, surrounding whitespace allowed).
pub fn parse_plain_float(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Type one source column: if every non-missing cell is a plain float the
/// column becomes numeric, otherwise its cells stay text verbatim.
pub fn infer_column(raw: Vec<Option<String>>) -> Vec<Value> {
    let numeric = raw
        .iter()
        .flatten()
        .filter(|s| !is_missing(s))
        .all(|s| parse_plain_float(s).is_some());

    raw.into_iter()
        .map(|cell| match cell {
            None => Value::Null,
            Some(s) if is_missing(&s) => Value::Null,
            Some(s) if numeric => parse_plain_float(&s).map(Value::Number).unwrap_or(Value::Null),
            Some(s) => Value::Text(s),
        })
        .collect()
}

/// Coerce a `1.234,56`-style amount into `f64`.
///
/// `$` and spaces (including U+00A0) are dropped, `.` is a thousands
/// separator, `,` the decimal separator. Anything unparsable is `0.0`.
pub fn clean_number_str(raw: &str) -> f64 {
    let s: String = raw
        .replace('\u{a0}', " ")
        .replace('$', "")
        .replace(' ', "")
        .replace('.', "")
        .replace(',', ".");
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }
    s.parse::<f64>().unwrap_or(0.0)
}

/// Numeric coercion for a single cell. Null → 0.0, numbers pass through.
pub fn clean_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Number(n) => *n,
        Value::Text(s) => clean_number_str(s),
    }
}
