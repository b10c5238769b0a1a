use crate::process::utils::infer_column;
use crate::schema::Value;

/// Intermediate, column-major table the normalizer works on before the
/// numeric coercion pass turns it into a [`crate::table::CanonicalTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    /// Column names, unique. From the header row, or positional.
    pub headers: Vec<String>,
    /// The header cells exactly as they appeared in the source.
    /// Empty when the file was read without a header.
    pub raw_header: Vec<String>,
    /// One `Vec<Value>` per column, each `num_rows` long.
    pub columns: Vec<Vec<Value>>,
    pub num_rows: usize,
}

impl RawTable {
    /// Build from row-major records. Rows shorter than `headers` are padded
    /// with nulls; every column is typed independently.
    pub fn from_records(
        headers: Vec<String>,
        raw_header: Vec<String>,
        records: Vec<Vec<String>>,
    ) -> Self {
        let width = headers.len();
        let num_rows = records.len();
        let mut raw_columns: Vec<Vec<Option<String>>> =
            (0..width).map(|_| Vec::with_capacity(num_rows)).collect();

        for record in records {
            let mut cells = record.into_iter();
            for col in raw_columns.iter_mut() {
                col.push(cells.next());
            }
        }

        Self {
            headers,
            raw_header,
            columns: raw_columns.into_iter().map(infer_column).collect(),
            num_rows,
        }
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Vec<Value>> {
        let idx = self.position(name)?;
        self.columns.get_mut(idx)
    }

    /// Append a column at the end.
    pub fn push_column(&mut self, name: impl Into<String>, cells: Vec<Value>) {
        debug_assert_eq!(cells.len(), self.num_rows);
        self.headers.push(name.into());
        self.columns.push(cells);
    }

    /// Insert a row before all others; `cells` shorter than the table width
    /// are padded with nulls.
    pub fn prepend_row(&mut self, cells: Vec<Value>) {
        let mut cells = cells.into_iter();
        for col in self.columns.iter_mut() {
            col.insert(0, cells.next().unwrap_or(Value::Null));
        }
        self.num_rows += 1;
    }
}
