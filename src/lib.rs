//! `workshop-data-processing` loads the dated spreadsheets of an auto-repair shop (services and
//! parts) into an in-memory [`types::Table`] and answers the aggregation queries behind the shop
//! dashboard.
//!
//! The pipeline has two pure phases and a query layer:
//!
//! 1. [`ingestion::load`] reads a local file or URL into a [`types::RawTable`] of text cells,
//!    using a per-source [`ingestion::SourceConfig`] (delimiter, encoding, header aliases).
//! 2. [`normalize::normalize`] turns it into typed [`types::Record`]s: dates, prices, month and
//!    weekday names, cost band.
//! 3. [`processing`] filters and aggregates the table.
//!
//! [`WorkshopEngine`] composes the three.
//!
//! ## Canonical schema
//!
//! | header    | aliases             | meaning                          |
//! |-----------|---------------------|----------------------------------|
//! | `Dia`     | `Data`              | service day, `DD/MM/YYYY`        |
//! | `Mês`     | `Mes`               | month as typed (informational)   |
//! | `Serviço` | `Servico`           | service description (required)   |
//! | `Preço`   | `Preco`             | price text, e.g. `R$ 1.234,56`   |
//! | `Tipo`    | `Categoria`         | service category                 |
//!
//! ## Values
//!
//! - Rows without `Serviço` are dropped.
//! - Unparseable days and prices become `None`; they never fail a load.
//! - Cost band: `<= 30.01` Low, `<= 80.01` Medium, otherwise High.
//! - Month names are Portuguese and always sorted Janeiro..Dezembro.
//! - Months come from `Dia` only. A sheet with `Mês` but no `Dia` (the staff sheets, for
//!   instance) loads fine, but its records carry no month: month queries and the month filter
//!   return nothing for it.
//!
//! ## Quick example
//!
//! ```rust
//! use workshop_data_processing::types::RawTable;
//! use workshop_data_processing::WorkshopEngine;
//!
//! let cell = |s: &str| Some(s.to_string());
//! let raw = RawTable::new(
//!     vec!["Dia".into(), "Serviço".into(), "Preço".into(), "Tipo".into()],
//!     vec![
//!         vec![cell("15/03/2024"), cell("Alinhamento"), cell("R$ 90,00"), cell("Suspensão")],
//!         vec![cell("02/01/2024"), cell("Troca de óleo"), cell("R$ 1.120,50"), cell("Motor")],
//!         vec![cell("03/01/2024"), None, cell("R$ 5,00"), cell("Motor")],
//!     ],
//! );
//! let engine = WorkshopEngine::from_raw(&raw);
//!
//! assert_eq!(engine.table().row_count(), 2);
//! let months: Vec<_> = engine.count_by_month(None).iter().map(|m| m.month.name()).collect();
//! assert_eq!(months, vec!["Janeiro", "Março"]);
//!
//! let top = engine.top_n_by_price(None, None, 1);
//! assert_eq!(top[0].price, 1120.5);
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: sources, per-source config, delimited reading, observers, multi-file unify
//! - [`normalize`]: raw → typed records
//! - [`processing`]: filters, aggregations, ranking
//! - [`calendar`]: month/weekday lookup tables and day parsing
//! - [`types`]: raw and normalized table types
//! - [`error`]: load errors

pub mod calendar;
pub mod engine;
pub mod error;
pub mod ingestion;
pub mod normalize;
pub mod processing;
pub mod types;

pub use engine::WorkshopEngine;
pub use error::{LoadError, LoadResult};
