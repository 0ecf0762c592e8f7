use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{InsightError, Result};

// ── FieldRole ─────────────────────────────────────────────────────────────────

/// The closed set of columns the pipeline knows how to interpret.
///
/// Input files bind columns to roles by header name (see
/// [`FieldRole::from_header`]); the derived roles (`TotalSales`, `Month`,
/// `Year`) are appended by the cleaner and transformer rather than read from
/// the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldRole {
    /// Order identifier, used for counting when no sales total exists.
    OrderId,
    /// The order date column, mandatory for every dataset shape.
    OrderDate,
    /// Product category.
    Category,
    /// Number of units ordered.
    Quantity,
    /// Price per unit.
    UnitPrice,
    /// Derived `quantity × unit price` column.
    TotalSales,
    /// Derived calendar month (1–12).
    Month,
    /// Derived four-digit calendar year.
    Year,
}

impl FieldRole {
    /// Resolve a raw CSV header into a role.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace, and
    /// covers the header spellings of both supported dataset shapes (the
    /// report shape with `Order ID`/`Date` and the generic order shape with
    /// `Order Date`/`Quantity Ordered`/`Price Each`).
    pub fn from_header(header: &str) -> Option<Self> {
        let normalised = header.trim().to_lowercase();
        match normalised.as_str() {
            "order id" | "order_id" | "orderid" => Some(Self::OrderId),
            "date" | "order date" | "order_date" => Some(Self::OrderDate),
            "category" | "product category" => Some(Self::Category),
            "quantity ordered" | "quantity" | "qty" => Some(Self::Quantity),
            "price each" | "unit price" | "price" => Some(Self::UnitPrice),
            "total sales" | "total" => Some(Self::TotalSales),
            "month" => Some(Self::Month),
            "year" => Some(Self::Year),
            _ => None,
        }
    }

    /// Canonical column name used for display and derived columns.
    pub fn canonical_name(&self) -> &'static str {
        match self {
            Self::OrderId => "Order ID",
            Self::OrderDate => "Date",
            Self::Category => "Category",
            Self::Quantity => "Quantity Ordered",
            Self::UnitPrice => "Price Each",
            Self::TotalSales => "Total Sales",
            Self::Month => "Month",
            Self::Year => "Year",
        }
    }
}

impl fmt::Display for FieldRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

// ── Column / TableSchema ──────────────────────────────────────────────────────

/// One column of a table: the header it came from plus its recognised role,
/// if any. Unrecognised columns are carried through untouched.
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub role: Option<FieldRole>,
}

/// Ordered set of columns shared by every row of a [`crate::table::Table`].
#[derive(Debug, Clone, Default)]
pub struct TableSchema {
    columns: Vec<Column>,
}

impl TableSchema {
    /// Build a schema from a CSV header row.
    ///
    /// The header is the source of truth: roles are assigned by name, never
    /// by position. If two headers resolve to the same role the first one
    /// wins and the duplicate is kept as an unrecognised column.
    pub fn from_headers<'a, I>(headers: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut schema = Self::default();
        for header in headers {
            let role = FieldRole::from_header(header);
            let role = match role {
                Some(r) if schema.has(r) => {
                    warn!("Duplicate column for role {}: \"{}\"", r, header);
                    None
                }
                other => other,
            };
            schema.columns.push(Column {
                name: header.trim().to_string(),
                role,
            });
        }
        schema
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Index of the column bound to `role`, if present.
    pub fn index_of(&self, role: FieldRole) -> Option<usize> {
        self.columns.iter().position(|c| c.role == Some(role))
    }

    pub fn has(&self, role: FieldRole) -> bool {
        self.index_of(role).is_some()
    }

    /// Index of the column bound to `role`, or [`InsightError::MissingColumn`].
    pub fn require(&self, role: FieldRole) -> Result<usize> {
        self.index_of(role)
            .ok_or(InsightError::MissingColumn(role))
    }

    /// Append a column (used for derived fields).
    pub fn push_column(&mut self, name: impl Into<String>, role: Option<FieldRole>) {
        self.columns.push(Column {
            name: name.into(),
            role,
        });
    }
}

// ── Measure ───────────────────────────────────────────────────────────────────

/// The quantity summarised by the aggregator.
///
/// Resolved once from the cleaned schema so that aggregation itself carries
/// no implicit branching: datasets without a sales total fall back to
/// counting orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    /// One unit per row.
    OrderCount,
    /// Sum of the derived `Total Sales` column.
    SalesTotal,
}

impl Measure {
    /// Pick the measure for a cleaned table's schema.
    pub fn resolve(schema: &TableSchema) -> Self {
        if schema.has(FieldRole::TotalSales) {
            Self::SalesTotal
        } else {
            Self::OrderCount
        }
    }

    /// Human-readable axis label for charts and summaries.
    pub fn axis_label(&self) -> &'static str {
        match self {
            Self::OrderCount => "Number of Orders",
            Self::SalesTotal => "Total Sales (USD)",
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OrderCount => f.write_str("order count"),
            Self::SalesTotal => f.write_str("sales total"),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
