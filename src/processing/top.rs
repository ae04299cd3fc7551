//! Ranked "most expensive services" table.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::types::{Column, Record, Table};

/// Default row count of the ranked table.
pub const DEFAULT_TOP_N: usize = 10;

/// How duplicate service names are treated when ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TopPriceMode {
    /// Rank every priced record; the same service may appear at several prices.
    #[default]
    AllRows,
    /// Collapse each service name to its highest-priced record before ranking.
    DistinctService,
}

/// One row of the ranked table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricedService {
    #[serde(rename = "Serviço")]
    pub service_name: String,
    #[serde(rename = "Preço_Unitário")]
    pub price: f64,
    #[serde(rename = "Tipo")]
    pub service_type: Option<String>,
    #[serde(rename = "Dia")]
    pub day: Option<NaiveDate>,
}

impl From<(&Record, f64)> for PricedService {
    fn from((r, price): (&Record, f64)) -> Self {
        Self {
            service_name: r.service_name.clone(),
            price,
            service_type: r.service_type.clone(),
            day: r.day,
        }
    }
}

/// The `n` highest-priced records, price descending.
///
/// The sort is stable, so equal prices keep source order. Records without a price are not
/// ranked. With [`TopPriceMode::DistinctService`] the first (highest) occurrence of each name
/// wins.
pub fn top_n_by_price(table: &Table, n: usize, mode: TopPriceMode) -> Vec<PricedService> {
    if !table.has_column(Column::Service) || !table.has_column(Column::Price) {
        debug!("top_n_by_price: columns absent from source; returning empty result");
        return Vec::new();
    }

    let mut priced: Vec<(&Record, f64)> = table
        .records
        .iter()
        .filter_map(|r| r.price.map(|p| (r, p)))
        .collect();
    priced.sort_by(|a, b| b.1.total_cmp(&a.1));

    match mode {
        TopPriceMode::AllRows => priced.into_iter().take(n).map(PricedService::from).collect(),
        TopPriceMode::DistinctService => {
            let mut seen: HashSet<&str> = HashSet::new();
            priced
                .into_iter()
                .filter(|&(r, _)| seen.insert(r.service_name.as_str()))
                .take(n)
                .map(PricedService::from)
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::test_support::{record, table};

    fn prices(out: &[PricedService]) -> Vec<(&str, f64)> {
        out.iter().map(|p| (p.service_name.as_str(), p.price)).collect()
    }

    #[test]
    fn ties_keep_source_order() {
        let t = table(vec![
            record("a", None, None, Some(50.0)),
            record("b", None, None, Some(200.0)),
            record("c", None, None, Some(10.0)),
            record("d", None, None, Some(200.0)),
            record("e", None, None, Some(30.0)),
        ]);
        let out = top_n_by_price(&t, 3, TopPriceMode::AllRows);
        assert_eq!(prices(&out), vec![("b", 200.0), ("d", 200.0), ("a", 50.0)]);
    }

    #[test]
    fn null_prices_are_not_ranked() {
        let t = table(vec![
            record("a", None, None, None),
            record("b", None, None, Some(5.0)),
        ]);
        let out = top_n_by_price(&t, DEFAULT_TOP_N, TopPriceMode::AllRows);
        assert_eq!(prices(&out), vec![("b", 5.0)]);
    }

    #[test]
    fn distinct_mode_keeps_highest_price_per_name() {
        let t = table(vec![
            record("Alinhamento", None, None, Some(80.0)),
            record("Freio", None, None, Some(150.0)),
            record("Alinhamento", None, None, Some(120.0)),
            record("Óleo", None, None, Some(100.0)),
        ]);

        let all = top_n_by_price(&t, 10, TopPriceMode::AllRows);
        assert_eq!(all.len(), 4);

        let distinct = top_n_by_price(&t, 10, TopPriceMode::DistinctService);
        assert_eq!(
            prices(&distinct),
            vec![("Freio", 150.0), ("Alinhamento", 120.0), ("Óleo", 100.0)]
        );
    }

    #[test]
    fn zero_n_is_empty() {
        let t = table(vec![record("a", None, None, Some(1.0))]);
        assert!(top_n_by_price(&t, 0, TopPriceMode::AllRows).is_empty());
    }
}
