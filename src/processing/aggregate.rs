//! Group-by aggregations behind the dashboard charts.
//!
//! Every function takes an already filtered [`Table`]. If a column the aggregation needs was not
//! in the loaded source, the result is empty ("no data for this view"), never an error.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::debug;

use crate::calendar::Month;
use crate::types::{Column, Table};

/// Mean price of one service type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeAverage {
    #[serde(rename = "Tipo")]
    pub service_type: String,
    /// `None` when no record of this type has a price.
    #[serde(rename = "Preço_Médio")]
    pub average_price: Option<f64>,
}

/// Number of records of one service type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeCount {
    #[serde(rename = "Tipo")]
    pub service_type: String,
    #[serde(rename = "Contagem")]
    pub count: usize,
}

/// Number of records in one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthCount {
    #[serde(rename = "Mês")]
    pub month: Month,
    #[serde(rename = "Contagem")]
    pub count: usize,
}

/// Mean price of one (month, service type) cell of the heatmap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthTypeAverage {
    #[serde(rename = "Mês")]
    pub month: Month,
    #[serde(rename = "Tipo")]
    pub service_type: String,
    #[serde(rename = "Preço_Médio")]
    pub average_price: Option<f64>,
}

/// Headline numbers for a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSummary {
    pub records: usize,
    pub priced_records: usize,
    pub mean_price: Option<f64>,
}

/// Running mean that skips null prices.
#[derive(Debug, Default, Clone, Copy)]
struct Mean {
    sum: f64,
    n: usize,
}

impl Mean {
    fn push(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.sum += v;
            self.n += 1;
        }
    }

    fn get(self) -> Option<f64> {
        (self.n > 0).then(|| self.sum / self.n as f64)
    }
}

/// Descending by value, nulls last.
fn cmp_desc_nulls_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn require(table: &Table, query: &str, needed: &[Column]) -> bool {
    let missing: Vec<Column> = needed.iter().copied().filter(|c| !table.has_column(*c)).collect();
    if missing.is_empty() {
        return true;
    }
    debug!(query, ?missing, "columns absent from source; returning empty result");
    false
}

/// Mean price per service type, sorted by mean descending (ties by type name).
///
/// Types with no priced record are kept with a `None` mean and sort last. Records without a type
/// are ignored.
pub fn average_price_by_type(table: &Table) -> Vec<TypeAverage> {
    if !require(table, "average_price_by_type", &[Column::Type, Column::Price]) {
        return Vec::new();
    }

    let mut groups: BTreeMap<&str, Mean> = BTreeMap::new();
    for r in &table.records {
        if let Some(t) = r.service_type.as_deref() {
            groups.entry(t).or_default().push(r.price);
        }
    }

    let mut out: Vec<TypeAverage> = groups
        .into_iter()
        .map(|(t, mean)| TypeAverage {
            service_type: t.to_string(),
            average_price: mean.get(),
        })
        .collect();
    out.sort_by(|a, b| cmp_desc_nulls_last(a.average_price, b.average_price));
    out
}

/// Record count per service type, sorted by count descending (ties by type name).
pub fn count_by_type(table: &Table) -> Vec<TypeCount> {
    if !require(table, "count_by_type", &[Column::Type]) {
        return Vec::new();
    }

    let mut groups: BTreeMap<&str, usize> = BTreeMap::new();
    for r in &table.records {
        if let Some(t) = r.service_type.as_deref() {
            *groups.entry(t).or_default() += 1;
        }
    }

    let mut out: Vec<TypeCount> = groups
        .into_iter()
        .map(|(t, count)| TypeCount {
            service_type: t.to_string(),
            count,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count));
    out
}

/// Record count per month, in canonical month order. Records without a day are ignored.
pub fn count_by_month(table: &Table) -> Vec<MonthCount> {
    if !require(table, "count_by_month", &[Column::Day]) {
        return Vec::new();
    }

    let mut groups: BTreeMap<Month, usize> = BTreeMap::new();
    for r in &table.records {
        if let Some(m) = r.month {
            *groups.entry(m).or_default() += 1;
        }
    }

    groups
        .into_iter()
        .map(|(month, count)| MonthCount { month, count })
        .collect()
}

/// Mean price per (month, service type), ordered by canonical month then type name.
pub fn average_price_by_type_and_month(table: &Table) -> Vec<MonthTypeAverage> {
    if !require(
        table,
        "average_price_by_type_and_month",
        &[Column::Day, Column::Type, Column::Price],
    ) {
        return Vec::new();
    }

    let mut groups: BTreeMap<(Month, &str), Mean> = BTreeMap::new();
    for r in &table.records {
        if let (Some(m), Some(t)) = (r.month, r.service_type.as_deref()) {
            groups.entry((m, t)).or_default().push(r.price);
        }
    }

    groups
        .into_iter()
        .map(|((month, t), mean)| MonthTypeAverage {
            month,
            service_type: t.to_string(),
            average_price: mean.get(),
        })
        .collect()
}

/// Distinct service types, sorted by name.
pub fn service_types(table: &Table) -> Vec<String> {
    let types: BTreeSet<&str> = table
        .records
        .iter()
        .filter_map(|r| r.service_type.as_deref())
        .collect();
    types.into_iter().map(str::to_string).collect()
}

/// Months that occur in the table, in canonical order.
pub fn months(table: &Table) -> Vec<Month> {
    let months: BTreeSet<Month> = table.records.iter().filter_map(|r| r.month).collect();
    months.into_iter().collect()
}

/// Record count and mean price over the whole table.
pub fn summary(table: &Table) -> TableSummary {
    let mut mean = Mean::default();
    for r in &table.records {
        mean.push(r.price);
    }
    TableSummary {
        records: table.row_count(),
        priced_records: mean.n,
        mean_price: mean.get(),
    }
}
