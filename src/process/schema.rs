use std::collections::HashMap;
use tracing::{debug, warn};

use crate::process::raw_table::RawTable;
use crate::process::utils::is_missing;
use crate::schema::{ColumnLayout, Value};

/// Name source header cells the way they will be looked up later:
/// empty cells become `Unnamed: <i>`, repeats get `.1`, `.2`, … suffixes.
pub fn unique_header_names(raw: &[String]) -> Vec<String> {
    let named = raw.iter().enumerate().map(|(i, cell)| {
        if cell.is_empty() {
            format!("Unnamed: {}", i)
        } else {
            cell.clone()
        }
    });
    dedupe_names(named)
}

/// Make names unique, keeping the first occurrence untouched.
pub fn dedupe_names(names: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::new();
    for mut name in names {
        let mut count = counts.get(&name).copied().unwrap_or(0);
        while count > 0 {
            counts.insert(name.clone(), count + 1);
            name = format!("{}.{}", name, count);
            count = counts.get(&name).copied().unwrap_or(0);
        }
        counts.insert(name.clone(), count + 1);
        out.push(name);
    }
    out
}

/// A header cell that is really a value: carries a currency symbol or a
/// comma, or is all digits once spaces are removed.
pub fn looks_like_data(name: &str) -> bool {
    if name.contains('$') || name.contains(',') {
        return true;
    }
    let compact: String = name.chars().filter(|c| *c != ' ').collect();
    !compact.is_empty() && compact.chars().all(|c| c.is_ascii_digit())
}

pub fn header_is_spurious(headers: &[String]) -> bool {
    headers.iter().any(|h| looks_like_data(h))
}

/// Strip U+00A0, collapse double spaces, trim, uppercase.
pub fn normalize_header_name(name: &str) -> String {
    name.replace('\u{a0}', " ")
        .replace("  ", " ")
        .trim()
        .to_uppercase()
}

/// Normalize every header name in place, re-deduplicating afterwards
/// since case folding can merge names.
pub fn normalize_headers(table: &mut RawTable) {
    let normalized = table.headers.iter().map(|h| normalize_header_name(h));
    table.headers = dedupe_names(normalized);
}

/// The parser took a data row for the header. Put it back as row 0 and
/// rename every column through `layout`.
///
/// Only the first field of that row is recovered; its other fields are
/// lost and left null.
pub fn recover_spurious_header(table: &mut RawTable, layout: &dyn ColumnLayout) {
    let first = table
        .raw_header
        .first()
        .filter(|cell| !is_missing(cell))
        .map(|cell| Value::Text(cell.clone()))
        .unwrap_or(Value::Null);

    warn!(
        recovered = %first,
        lost_fields = table.width().saturating_sub(1),
        "header row looks like data; reinserting it with only its first field"
    );

    table.prepend_row(vec![first]);
    table.headers = layout.column_names(table.width());
    debug!(headers = ?table.headers, "columns renamed by position");
}

/// Either recover a spurious header or normalize a genuine one.
/// Returns true when recovery ran.
pub fn resolve_column_names(table: &mut RawTable, layout: &dyn ColumnLayout) -> bool {
    if header_is_spurious(&table.headers) {
        recover_spurious_header(table, layout);
        true
    } else {
        normalize_headers(table);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::PositionalLayout;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn data_like_header_cells() {
        assert!(looks_like_data("$50,000"));
        assert!(looks_like_data("1.000,00"));
        assert!(looks_like_data("10 02"));
        assert!(looks_like_data("$"));
        assert!(!looks_like_data("EMPLOYEE"));
        assert!(!looks_like_data("40.5"));
        assert!(!looks_like_data("   "));
        assert!(!looks_like_data(""));
    }

    #[test]
    fn header_names_are_normalized() {
        assert_eq!(normalize_header_name(" hourly\u{a0}rate "), "HOURLY RATE");
        assert_eq!(normalize_header_name("Gross  Pay"), "GROSS PAY");
        // one non-overlapping pass, like a plain string replace
        assert_eq!(normalize_header_name("A   B"), "A  B");
    }

    #[test]
    fn unnamed_and_duplicate_headers() {
        let names = unique_header_names(&strings(&["A", "", "A", "A", "A.1"]));
        assert_eq!(names, vec!["A", "Unnamed: 1", "A.1", "A.2", "A.1.1"]);
    }

    #[test]
    fn case_folding_collisions_are_deduplicated() {
        let mut t = RawTable::from_records(strings(&["Status", "STATUS"]), Vec::new(), Vec::new());
        normalize_headers(&mut t);
        assert_eq!(t.headers, vec!["STATUS", "STATUS.1"]);
    }

    #[test]
    fn spurious_header_becomes_row_zero() {
        let raw = strings(&["$50,000", "J Doe", "Main St"]);
        let mut t = RawTable::from_records(
            unique_header_names(&raw),
            raw,
            vec![strings(&["1002", "Ann", "Elm St"])],
        );
        assert!(resolve_column_names(&mut t, &PositionalLayout));
        assert_eq!(t.headers, vec!["EMPLOYEE ID", "EMPLOYEE", "LOCATION"]);
        assert_eq!(t.num_rows, 2);
        assert_eq!(t.columns[0], vec![Value::from("$50,000"), Value::Number(1002.0)]);
        assert_eq!(t.columns[1], vec![Value::Null, Value::from("Ann")]);
    }
}
