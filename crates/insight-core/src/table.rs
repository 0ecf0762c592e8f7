use chrono::NaiveDate;

use crate::schema::{FieldRole, TableSchema};

// ── Value ─────────────────────────────────────────────────────────────────────

/// A single cell of a table.
///
/// Cells load as [`Value::Text`] (or [`Value::Missing`] for empty fields) and
/// are narrowed to typed variants by the cleaner and transformer.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Int(i64),
    Float(f64),
    Date(NaiveDate),
    /// A cell with no usable content. Distinct from an empty string: empty
    /// input fields load as `Missing`, and lenient numeric coercion turns
    /// unparseable numbers into `Missing` as well.
    Missing,
}

impl Value {
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view: `Float` directly, `Int` widened.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }
}

// ── Row ───────────────────────────────────────────────────────────────────────

/// Ordered cells aligned with the schema columns of the owning table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn get(&self, idx: usize) -> Option<&Value> {
        self.values.get(idx)
    }

    /// True when any cell is [`Value::Missing`].
    pub fn has_missing(&self) -> bool {
        self.values.iter().any(Value::is_missing)
    }

    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ── Table ─────────────────────────────────────────────────────────────────────

/// An ordered sequence of rows sharing one schema.
///
/// Every pipeline stage consumes a table and returns a new one; tables are
/// never shared between runs.
#[derive(Debug, Clone)]
pub struct Table {
    schema: TableSchema,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(schema: TableSchema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
        }
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn push_row(&mut self, row: Row) {
        debug_assert_eq!(row.len(), self.schema.len(), "row width must match schema");
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Delegates to [`TableSchema::index_of`].
    pub fn column_index(&self, role: FieldRole) -> Option<usize> {
        self.schema.index_of(role)
    }

    /// Cell at (`row`, `col`), if both are in range.
    pub fn value(&self, row: usize, col: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Append a derived column.
    ///
    /// `values` must hold exactly one cell per existing row.
    pub fn add_column(
        &mut self,
        name: impl Into<String>,
        role: Option<FieldRole>,
        values: Vec<Value>,
    ) {
        debug_assert_eq!(values.len(), self.rows.len(), "one cell per row required");
        self.schema.push_column(name, role);
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
