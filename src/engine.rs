//! The engine behind the shop dashboard.

use crate::calendar::Month;
use crate::error::LoadResult;
use crate::ingestion::{load, LoadOptions, Source};
use crate::normalize::normalize;
use crate::processing::aggregate::{self, MonthCount, MonthTypeAverage, TableSummary, TypeAverage, TypeCount};
use crate::processing::{filter, top, PricedService, TopPriceMode};
use crate::types::{RawTable, Table};

/// Loads one source, normalizes it once, and answers read-only queries over the result.
///
/// Construction either fully succeeds or returns the load error; there is no partially loaded
/// state. Every query filters a copy of the table, so the engine can be shared across threads
/// (`&WorkshopEngine` is all a query needs).
///
/// Filter arguments: `service_type` and `month` (a Portuguese month name such as `"Março"`). `None`
/// or a blank string disables that filter; a value matching nothing yields an empty result.
#[derive(Debug, Clone)]
pub struct WorkshopEngine {
    table: Table,
}

impl WorkshopEngine {
    /// Load `source` and build the table.
    ///
    /// ```no_run
    /// use workshop_data_processing::ingestion::{LoadOptions, SourceConfig};
    /// use workshop_data_processing::WorkshopEngine;
    ///
    /// # fn main() -> Result<(), workshop_data_processing::LoadError> {
    /// let engine = WorkshopEngine::open(
    ///     "dados/servico.csv",
    ///     &LoadOptions::with_config(SourceConfig::service_sheet()),
    /// )?;
    /// for row in engine.count_by_month(None) {
    ///     println!("{}: {}", row.month, row.count);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn open(source: impl Into<Source>, options: &LoadOptions) -> LoadResult<Self> {
        let raw = load(source, options)?;
        Ok(Self::from_raw(&raw))
    }

    /// Build from an already loaded raw table.
    pub fn from_raw(raw: &RawTable) -> Self {
        Self::from_table(normalize(raw))
    }

    pub fn from_table(table: Table) -> Self {
        Self { table }
    }

    /// The normalized table.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Records matching the filters.
    pub fn filter(&self, service_type: Option<&str>, month: Option<&str>) -> Table {
        filter::filter(&self.table, service_type, month)
    }

    /// Mean price per service type, highest first.
    pub fn average_price_by_type(&self, service_type: Option<&str>, month: Option<&str>) -> Vec<TypeAverage> {
        aggregate::average_price_by_type(&self.filter(service_type, month))
    }

    /// Record count per service type, largest first.
    pub fn count_by_type(&self, service_type: Option<&str>, month: Option<&str>) -> Vec<TypeCount> {
        aggregate::count_by_type(&self.filter(service_type, month))
    }

    /// Record count per month in calendar order. Always spans all months.
    pub fn count_by_month(&self, service_type: Option<&str>) -> Vec<MonthCount> {
        aggregate::count_by_month(&self.filter(service_type, None))
    }

    /// The `n` most expensive records (every priced record is eligible).
    pub fn top_n_by_price(&self, service_type: Option<&str>, month: Option<&str>, n: usize) -> Vec<PricedService> {
        self.top_n_by_price_with(service_type, month, n, TopPriceMode::AllRows)
    }

    /// [`Self::top_n_by_price`] with an explicit duplicate-name policy.
    pub fn top_n_by_price_with(
        &self,
        service_type: Option<&str>,
        month: Option<&str>,
        n: usize,
        mode: TopPriceMode,
    ) -> Vec<PricedService> {
        top::top_n_by_price(&self.filter(service_type, month), n, mode)
    }

    /// Month × type mean prices for the heatmap. Always spans all months.
    pub fn average_price_by_type_and_month(&self, service_type: Option<&str>) -> Vec<MonthTypeAverage> {
        aggregate::average_price_by_type_and_month(&self.filter(service_type, None))
    }

    /// Options for the service-type dropdown.
    pub fn available_service_types(&self) -> Vec<String> {
        aggregate::service_types(&self.table)
    }

    /// Options for the month dropdown, in calendar order.
    pub fn available_months(&self) -> Vec<Month> {
        aggregate::months(&self.table)
    }

    pub fn summary(&self) -> TableSummary {
        aggregate::summary(&self.table)
    }
}
