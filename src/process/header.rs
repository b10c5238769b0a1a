// src/process/header.rs

use csv::ReaderBuilder;
use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{Result, SourceError};
use crate::process::raw_table::RawTable;
use crate::process::schema::unique_header_names;
use crate::schema::{headerless_column_name, HEADER_KEYWORDS};

/// Leading lines to skip before the header, tried in this order.
pub const SKIP_CANDIDATES: [usize; 3] = [0, 1, 2];

/// How the header row was located.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum HeaderStrategy {
    /// A recognized header after `skipped` preamble lines.
    Header { skipped: usize },
    /// No recognized header; every row is data.
    Headerless,
}

/// Locate the header row and parse the source into a [`RawTable`].
///
/// Each skip candidate is parsed in turn; the first one that parses and
/// whose header carries a payroll keyword wins. Failed or unrecognized
/// attempts are not errors. If none match, the whole source is read as
/// headerless data, and only that fallback can fail.
pub fn discover(data: &[u8]) -> Result<(HeaderStrategy, RawTable)> {
    let found = SKIP_CANDIDATES.iter().find_map(|&skip| {
        let table = parse_with_header(data, skip)?;
        if has_recognized_keyword(&table.headers) {
            debug!(skip, columns = table.width(), rows = table.num_rows, "header found");
            Some((HeaderStrategy::Header { skipped: skip }, table))
        } else {
            debug!(skip, headers = ?table.headers, "no payroll keyword in header");
            None
        }
    });

    match found {
        Some(hit) => Ok(hit),
        None => {
            debug!("no usable header; reading source as headerless");
            Ok((HeaderStrategy::Headerless, parse_headerless(data)?))
        }
    }
}

/// Case-insensitive substring match of any header name against the keywords.
pub fn has_recognized_keyword(headers: &[String]) -> bool {
    headers.iter().any(|h| {
        let upper = h.to_uppercase();
        HEADER_KEYWORDS.iter().any(|k| upper.contains(k))
    })
}

/// Drop the first `n` lines. Returns an empty slice if there are fewer.
fn skip_lines(data: &[u8], n: usize) -> &[u8] {
    let mut rest = data;
    for _ in 0..n {
        match rest.iter().position(|&b| b == b'\n') {
            Some(i) => rest = &rest[i + 1..],
            None => return &[],
        }
    }
    rest
}

fn read_records(data: &[u8]) -> std::result::Result<Vec<Vec<String>>, csv::Error> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true) // ragged rows are checked by the caller
        .from_reader(data);

    rdr.records()
        .map(|res| res.map(|record| record.iter().map(str::to_string).collect()))
        .collect()
}

/// One header attempt. `None` when the attempt does not parse: nothing
/// left after skipping, bad encoding, a header cell spanning lines, or a
/// row wider than the header.
fn parse_with_header(data: &[u8], skip: usize) -> Option<RawTable> {
    let body = skip_lines(data, skip);
    let mut records = match read_records(body) {
        Ok(records) => records,
        Err(e) => {
            debug!(skip, error = %e, "parse attempt failed");
            return None;
        }
    };
    if records.is_empty() {
        trace!(skip, "nothing left after skipping");
        return None;
    }

    let raw_header = records.remove(0);
    // an unclosed quote swallows the rest of the source into one cell
    if raw_header.iter().any(|cell| cell.contains(['\n', '\r'])) {
        debug!(skip, "header cell spans lines; unterminated quote");
        return None;
    }

    let width = raw_header.len();
    if let Some((idx, wide)) = records.iter().enumerate().find(|(_, r)| r.len() > width) {
        debug!(
            skip,
            expected = width,
            saw = wide.len(),
            row = idx + 1,
            "row wider than header"
        );
        return None;
    }

    let headers = unique_header_names(&raw_header);
    Some(RawTable::from_records(headers, raw_header, records))
}

/// Every row is data; width is the widest row, columns are `COL_<n>`.
fn parse_headerless(data: &[u8]) -> Result<RawTable> {
    let records = read_records(data).map_err(|e| {
        if matches!(e.kind(), csv::ErrorKind::Utf8 { .. }) {
            SourceError::Encoding(e.to_string())
        } else {
            SourceError::Parse(e)
        }
    })?;
    if records.is_empty() {
        return Err(SourceError::Empty);
    }

    let width = records.iter().map(Vec::len).max().unwrap_or(0);
    let headers = (0..width).map(headerless_column_name).collect();
    Ok(RawTable::from_records(headers, Vec::new(), records))
}
