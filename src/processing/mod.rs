//! Read-only queries over a normalized [`crate::types::Table`].
//!
//! Currently implemented:
//!
//! - [`filter()`]: service-type / month filtering
//! - [`aggregate`]: group-by summaries (mean price, counts, month × type heatmap)
//! - [`top_n_by_price()`]: ranked most-expensive services
//!
//! None of these mutate their input; most callers go through [`crate::WorkshopEngine`], which
//! filters first and then aggregates.
//!
//! ## Example: filter → aggregate
//!
//! ```rust
//! use workshop_data_processing::normalize::normalize;
//! use workshop_data_processing::processing::{aggregate, filter};
//! use workshop_data_processing::types::RawTable;
//!
//! let cell = |s: &str| Some(s.to_string());
//! let raw = RawTable::new(
//!     vec!["Dia".into(), "Serviço".into(), "Preço".into(), "Tipo".into()],
//!     vec![
//!         vec![cell("10/01/2024"), cell("Alinhamento"), cell("R$ 90,00"), cell("Suspensão")],
//!         vec![cell("12/01/2024"), cell("Troca de óleo"), cell("R$ 120,00"), cell("Motor")],
//!         vec![cell("02/03/2024"), cell("Balanceamento"), cell("R$ 60,00"), cell("Suspensão")],
//!     ],
//! );
//! let table = normalize(&raw);
//!
//! let january = filter(&table, None, Some("Janeiro"));
//! let by_type = aggregate::count_by_type(&january);
//! assert_eq!(by_type.len(), 2);
//!
//! let averages = aggregate::average_price_by_type(&table);
//! assert_eq!(averages[0].service_type, "Motor");
//! assert_eq!(averages[1].average_price, Some(75.0));
//! ```

pub mod aggregate;
pub mod filter;
pub mod top;

pub use aggregate::{
    average_price_by_type, average_price_by_type_and_month, count_by_month, count_by_type, MonthCount,
    MonthTypeAverage, TableSummary, TypeAverage, TypeCount,
};
pub use filter::filter;
pub use top::{top_n_by_price, PricedService, TopPriceMode, DEFAULT_TOP_N};
