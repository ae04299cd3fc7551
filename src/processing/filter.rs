//! Dashboard filters over a [`crate::types::Table`].

use crate::types::{Record, Table};

/// A filter value is active only when it is present and not blank.
fn active(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Whether `record` passes the service-type and month filters.
///
/// A record with a null field never matches an active filter on that field.
pub fn matches(record: &Record, service_type: Option<&str>, month: Option<&str>) -> bool {
    if let Some(t) = active(service_type) {
        if record.service_type.as_deref() != Some(t) {
            return false;
        }
    }
    if let Some(m) = active(month) {
        if record.month_name() != Some(m) {
            return false;
        }
    }
    true
}

/// Returns a new [`Table`] with the records whose `service_type` / `month_name` equal the given
/// filters. `None` (or a blank string) means no filter on that dimension.
///
/// The source table is never modified; with both filters absent the result is a full copy.
pub fn filter(table: &Table, service_type: Option<&str>, month: Option<&str>) -> Table {
    table.filter_records(|r| matches(r, service_type, month))
}
