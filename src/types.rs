//! Core data model types.
//!
//! Loading produces a [`RawTable`] (text cells under canonical headers); normalization turns it
//! into a typed [`Table`] of [`Record`]s.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::calendar::{self, Month};

/// Columns of the canonical service schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Column {
    /// `Dia`: service day, `DD/MM/YYYY`.
    #[serde(rename = "Dia")]
    Day,
    /// `Mês`: textual month as typed in the sheet. Kept for reference; months are derived from
    /// [`Column::Day`].
    #[serde(rename = "Mês")]
    Month,
    /// `Serviço`: service description.
    #[serde(rename = "Serviço")]
    Service,
    /// `Preço`: locale-formatted currency text.
    #[serde(rename = "Preço")]
    Price,
    /// `Tipo`: service category.
    #[serde(rename = "Tipo")]
    Type,
}

impl Column {
    /// All canonical columns in sheet order.
    pub const ALL: [Column; 5] = [
        Column::Day,
        Column::Month,
        Column::Service,
        Column::Price,
        Column::Type,
    ];

    /// Canonical header name.
    pub fn canonical_name(self) -> &'static str {
        match self {
            Column::Day => "Dia",
            Column::Month => "Mês",
            Column::Service => "Serviço",
            Column::Price => "Preço",
            Column::Type => "Tipo",
        }
    }

    /// Column whose canonical header is exactly `name`.
    pub fn from_canonical_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.canonical_name() == name)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

/// A row of text cells. `None` marks a missing/empty cell.
pub type RawRow = Vec<Option<String>>;

/// Text table as read from a delimited source.
///
/// Rows are stored in the same order as `headers`. Every row has exactly `headers.len()` cells.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawTable {
    /// Column headers (canonicalized by the loader when an alias matched).
    pub headers: Vec<String>,
    /// Row-major cell storage.
    pub rows: Vec<RawRow>,
}

impl RawTable {
    /// Create a table from headers and rows.
    pub fn new(headers: Vec<String>, rows: Vec<RawRow>) -> Self {
        Self { headers, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Returns the index of a header by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Index of a canonical column, if present.
    pub fn column_index(&self, column: Column) -> Option<usize> {
        self.index_of(column.canonical_name())
    }

    /// Create a new table containing only rows that match `predicate`.
    pub fn filter_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&[Option<String>]) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|row| predicate(row.as_slice()))
            .cloned()
            .collect();
        Self {
            headers: self.headers.clone(),
            rows,
        }
    }

    /// Create a new table without the columns whose header matches `predicate`.
    pub fn drop_columns<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&str) -> bool,
    {
        let keep: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .filter(|(_, h)| !predicate(h))
            .map(|(i, _)| i)
            .collect();

        let headers = keep.iter().map(|&i| self.headers[i].clone()).collect();
        let rows = self
            .rows
            .iter()
            .map(|row| keep.iter().map(|&i| row.get(i).cloned().flatten()).collect())
            .collect();
        Self { headers, rows }
    }

    /// Concatenate tables, aligning columns by header name.
    ///
    /// The output headers are the union of all headers in first-seen order; cells a source table
    /// does not have are `None`.
    pub fn concat(tables: &[RawTable]) -> Self {
        let mut headers: Vec<String> = Vec::new();
        for t in tables {
            for h in &t.headers {
                if !headers.contains(h) {
                    headers.push(h.clone());
                }
            }
        }

        let total = tables.iter().map(|t| t.row_count()).sum();
        let mut rows = Vec::with_capacity(total);
        for t in tables {
            let mapping: Vec<Option<usize>> = headers.iter().map(|h| t.index_of(h)).collect();
            for row in &t.rows {
                rows.push(
                    mapping
                        .iter()
                        .map(|idx| idx.and_then(|i| row.get(i).cloned().flatten()))
                        .collect(),
                );
            }
        }

        Self { headers, rows }
    }
}

/// Price category of a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum CostBand {
    #[serde(rename = "Custo Baixo")]
    Low,
    #[serde(rename = "Custo Médio")]
    Medium,
    #[serde(rename = "Custo Alto")]
    High,
}

impl CostBand {
    /// Inclusive upper bound of [`CostBand::Low`].
    pub const LOW_MAX: f64 = 30.01;
    /// Inclusive upper bound of [`CostBand::Medium`].
    pub const MEDIUM_MAX: f64 = 80.01;

    /// Band for a price: `<= 30.01` Low, `<= 80.01` Medium, otherwise High.
    pub fn for_price(price: f64) -> Self {
        if price <= Self::LOW_MAX {
            CostBand::Low
        } else if price <= Self::MEDIUM_MAX {
            CostBand::Medium
        } else {
            CostBand::High
        }
    }

    /// Portuguese label used by the dashboard.
    pub fn label(self) -> &'static str {
        match self {
            CostBand::Low => "Custo Baixo",
            CostBand::Medium => "Custo Médio",
            CostBand::High => "Custo Alto",
        }
    }
}

/// One normalized service entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub day: Option<NaiveDate>,
    pub service_name: String,
    /// `Preço` exactly as it appeared in the source.
    pub raw_price: Option<String>,
    pub price: Option<f64>,
    pub service_type: Option<String>,
    pub month: Option<Month>,
    pub weekday: Option<Weekday>,
    pub cost_band: Option<CostBand>,
}

impl Record {
    pub fn month_name(&self) -> Option<&'static str> {
        self.month.map(Month::name)
    }

    pub fn month_number(&self) -> Option<u32> {
        self.month.map(Month::number)
    }

    pub fn weekday_name(&self) -> Option<&'static str> {
        self.weekday.map(calendar::weekday_name)
    }
}

/// Normalized, immutable collection of [`Record`]s for one loaded source.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    /// Canonical columns that were present in the source.
    pub columns: BTreeSet<Column>,
    /// Records in source order.
    pub records: Vec<Record>,
}

impl Table {
    pub fn new(columns: BTreeSet<Column>, records: Vec<Record>) -> Self {
        Self { columns, records }
    }

    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether `column` existed in the loaded source.
    pub fn has_column(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    /// Create a new table containing only records that match `predicate`.
    ///
    /// The returned table keeps the original column set.
    pub fn filter_records<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&Record) -> bool,
    {
        let records = self
            .records
            .iter()
            .filter(|r| predicate(r))
            .cloned()
            .collect();
        Self {
            columns: self.columns.clone(),
            records,
        }
    }
}
