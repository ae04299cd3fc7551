//! Column normalization: [`RawTable`] → typed [`Table`].
//!
//! [`normalize`] is pure: it reads the raw table and returns a new one. Per-value failures
//! (unparseable day or price) become null fields; only rows without a service name are dropped.

pub mod price;

use std::collections::BTreeSet;

use chrono::Datelike;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::calendar::{parse_day, Month};
use crate::types::{Column, CostBand, RawTable, Record, Table};

pub use price::parse_price;

/// Raw-table positions of the columns the normalizer reads.
#[derive(Debug, Clone, Copy)]
struct ColumnIndexes {
    day: Option<usize>,
    service: Option<usize>,
    price: Option<usize>,
    service_type: Option<usize>,
}

impl ColumnIndexes {
    fn of(raw: &RawTable) -> Self {
        Self {
            day: raw.column_index(Column::Day),
            service: raw.column_index(Column::Service),
            price: raw.column_index(Column::Price),
            service_type: raw.column_index(Column::Type),
        }
    }
}

/// Build the typed service table from a raw table with canonical headers.
///
/// Rows are converted in parallel; record order matches raw row order.
pub fn normalize(raw: &RawTable) -> Table {
    let idx = ColumnIndexes::of(raw);
    let columns: BTreeSet<Column> = Column::ALL
        .into_iter()
        .filter(|c| raw.column_index(*c).is_some())
        .collect();

    if idx.service.is_none() {
        warn!(
            headers = ?raw.headers,
            "no '{}' column; every row is dropped",
            Column::Service
        );
    }

    let records: Vec<Record> = raw
        .rows
        .par_iter()
        .filter_map(|row| normalize_row(row, &idx))
        .collect();

    debug!(
        raw_rows = raw.row_count(),
        records = records.len(),
        dropped_without_service = raw.row_count() - records.len(),
        without_day = records.iter().filter(|r| r.day.is_none()).count(),
        unparsed_prices = records
            .iter()
            .filter(|r| r.raw_price.is_some() && r.price.is_none())
            .count(),
        "normalized table"
    );

    Table::new(columns, records)
}

fn cell(row: &[Option<String>], idx: Option<usize>) -> Option<&str> {
    idx.and_then(|i| row.get(i)).and_then(|c| c.as_deref())
}

fn normalize_row(row: &[Option<String>], idx: &ColumnIndexes) -> Option<Record> {
    let service_name = cell(row, idx.service)?.to_owned();

    let day = cell(row, idx.day).and_then(parse_day);
    let raw_price = cell(row, idx.price).map(str::to_owned);
    let price = raw_price.as_deref().and_then(parse_price);

    Some(Record {
        day,
        service_name,
        raw_price,
        price,
        service_type: cell(row, idx.service_type).map(str::to_owned),
        month: day.map(Month::of),
        weekday: day.map(|d| d.weekday()),
        cost_band: price.map(CostBand::for_price),
    })
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Weekday};

    use super::normalize;
    use crate::calendar::Month;
    use crate::types::{Column, CostBand, RawTable};

    fn cell(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    fn raw() -> RawTable {
        RawTable::new(
            vec!["Dia".into(), "Mês".into(), "Serviço".into(), "Preço".into(), "Tipo".into()],
            vec![
                vec![cell("04/03/2024"), cell("Março"), cell("Troca de óleo"), cell("R$ 120,00"), cell("Motor")],
                vec![cell("05/03/2024"), None, None, cell("R$ 10,00"), cell("Motor")],
                vec![cell("32/13/2024"), None, cell("Lavagem"), cell("grátis"), None],
                vec![None, None, cell("Calibragem"), cell("30,01"), cell("Pneus")],
            ],
        )
    }

    #[test]
    fn drops_rows_without_service_and_keeps_order() {
        let table = normalize(&raw());
        let names: Vec<&str> = table.records.iter().map(|r| r.service_name.as_str()).collect();
        assert_eq!(names, vec!["Troca de óleo", "Lavagem", "Calibragem"]);
    }

    #[test]
    fn derives_calendar_fields_and_cost_band() {
        let table = normalize(&raw());
        let first = &table.records[0];
        assert_eq!(first.day, NaiveDate::from_ymd_opt(2024, 3, 4));
        assert_eq!(first.month, Some(Month::March));
        assert_eq!(first.month_name(), Some("Março"));
        assert_eq!(first.month_number(), Some(3));
        assert_eq!(first.weekday, Some(Weekday::Mon));
        assert_eq!(first.weekday_name(), Some("Segunda-feira"));
        assert_eq!(first.price, Some(120.0));
        assert_eq!(first.cost_band, Some(CostBand::High));

        let calibragem = &table.records[2];
        assert_eq!(calibragem.cost_band, Some(CostBand::Low));
    }

    #[test]
    fn unparseable_values_become_null() {
        let table = normalize(&raw());
        let lavagem = &table.records[1];
        assert_eq!(lavagem.day, None);
        assert_eq!(lavagem.month, None);
        assert_eq!(lavagem.weekday, None);
        assert_eq!(lavagem.raw_price.as_deref(), Some("grátis"));
        assert_eq!(lavagem.price, None);
        assert_eq!(lavagem.cost_band, None);
        assert_eq!(lavagem.service_type, None);
    }

    #[test]
    fn cost_band_defined_iff_price_defined() {
        let table = normalize(&raw());
        for r in &table.records {
            assert_eq!(r.cost_band.is_some(), r.price.is_some());
        }
    }

    #[test]
    fn records_which_columns_were_present() {
        let raw = RawTable::new(vec!["Serviço".into(), "Preço".into()], vec![vec![cell("Freio"), cell("50,00")]]);
        let table = normalize(&raw);
        assert!(table.has_column(Column::Service));
        assert!(table.has_column(Column::Price));
        assert!(!table.has_column(Column::Type));
        assert!(!table.has_column(Column::Day));
    }

    #[test]
    fn missing_service_column_yields_empty_table() {
        let raw = RawTable::new(vec!["Preço".into()], vec![vec![cell("50,00")]]);
        assert!(normalize(&raw).is_empty());
    }

    #[test]
    fn does_not_mutate_input() {
        let input = raw();
        let copy = input.clone();
        let _ = normalize(&input);
        assert_eq!(input, copy);
    }
}
