//! Delimited-text reading and writing.

use std::io::{Read, Write};
use std::path::Path;

use tracing::debug;

use crate::error::{LoadError, LoadResult};
use crate::types::RawTable;

use super::config::{is_unnamed_header, SourceConfig};

/// Decode `bytes` with the configured encoding and read them as delimited text.
///
/// `source_name` only labels errors.
pub fn read_delimited(bytes: &[u8], source_name: &str, config: &SourceConfig) -> LoadResult<RawTable> {
    let text = config.encoding.decode(bytes).ok_or_else(|| LoadError::Decode {
        source_name: source_name.to_string(),
        encoding: config.encoding.label(),
    })?;

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(config.delimiter_byte()?)
        .flexible(true)
        .from_reader(text.as_bytes());
    read_delimited_from_reader(&mut rdr, config)
}

/// Read delimited text from an existing CSV reader.
///
/// Rules:
///
/// - The first record is the header; headers are trimmed and aliases canonicalized.
/// - Cells are trimmed; empty cells become `None`.
/// - Short rows are padded with `None`. Rows longer than the header are an error unless the
///   extra cells are empty (trailing delimiters).
/// - Unnamed columns and all-empty rows are dropped when the config says so.
pub fn read_delimited_from_reader<R: Read>(
    rdr: &mut csv::Reader<R>,
    config: &SourceConfig,
) -> LoadResult<RawTable> {
    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| config.canonical_header(h))
        .collect();
    let width = headers.len();

    let mut rows = Vec::new();
    for (row_idx0, result) in rdr.records().enumerate() {
        // 1-based, and the header is row 1.
        let user_row = row_idx0 + 2;
        let record = result?;

        if record.len() > width && record.iter().skip(width).any(|c| !c.trim().is_empty()) {
            return Err(LoadError::SchemaMismatch {
                message: format!(
                    "row {user_row} has {} fields but the header has {width}",
                    record.len()
                ),
            });
        }

        let row = (0..width)
            .map(|i| {
                record
                    .get(i)
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(str::to_owned)
            })
            .collect();
        rows.push(row);
    }

    let mut table = RawTable::new(headers, rows);
    if config.drop_unnamed_columns {
        table = table.drop_columns(is_unnamed_header);
    }
    if config.drop_empty_rows {
        let before = table.row_count();
        table = table.filter_rows(|row| row.iter().any(Option::is_some));
        if table.row_count() < before {
            debug!(dropped = before - table.row_count(), "dropped empty rows");
        }
    }
    Ok(table)
}

/// Write `table` as comma-separated UTF-8 with a header row.
pub fn write_csv(table: &RawTable, path: impl AsRef<Path>) -> LoadResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    write_csv_to_writer(table, &mut wtr)
}

/// Write `table` through an existing CSV writer. Null cells are written empty.
pub fn write_csv_to_writer<W: Write>(table: &RawTable, wtr: &mut csv::Writer<W>) -> LoadResult<()> {
    wtr.write_record(&table.headers)?;
    for row in &table.rows {
        wtr.write_record(row.iter().map(|c| c.as_deref().unwrap_or("")))?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn reads_semicolon_latin1_with_aliases() {
        let bytes = b"Dia;Mes;Servi\xe7o;Pre\xe7o;Tipo\n05/03/2024;Mar\xe7o;Alinhamento;R$ 90,00;Suspens\xe3o\n";
        let table = read_delimited(bytes, "mem", &SourceConfig::service_sheet()).unwrap();

        assert_eq!(table.headers, vec!["Dia", "Mês", "Serviço", "Preço", "Tipo"]);
        assert_eq!(
            table.rows[0],
            vec![
                cell("05/03/2024"),
                cell("Março"),
                cell("Alinhamento"),
                cell("R$ 90,00"),
                cell("Suspensão"),
            ]
        );
    }

    #[test]
    fn drops_unnamed_columns_and_empty_rows() {
        let input = "Dia,Servi\u{e7}o,Unnamed: 2,\n01/01/2024,Freio,,\n,,,\n";
        let table = read_delimited(input.as_bytes(), "mem", &SourceConfig::default()).unwrap();

        assert_eq!(table.headers, vec!["Dia", "Serviço"]);
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn pads_short_rows_and_tolerates_trailing_delimiters() {
        let input = "A,B,C\n1\n2,3,4,,\n";
        let cfg = SourceConfig {
            drop_empty_rows: false,
            ..Default::default()
        };
        let table = read_delimited(input.as_bytes(), "mem", &cfg).unwrap();
        assert_eq!(table.rows[0], vec![cell("1"), None, None]);
        assert_eq!(table.rows[1], vec![cell("2"), cell("3"), cell("4")]);
    }

    #[test]
    fn errors_on_rows_wider_than_header() {
        let input = "A,B\n1,2,3\n";
        let err = read_delimited(input.as_bytes(), "mem", &SourceConfig::default()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("schema mismatch"));
        assert!(msg.contains("row 2 has 3 fields"));
    }

    #[test]
    fn invalid_utf8_is_a_decode_error() {
        let err = read_delimited(b"Pre\xe7o\n1\n", "servico.csv", &SourceConfig::default()).unwrap_err();
        assert!(matches!(err, LoadError::Decode { encoding: "utf-8-sig", .. }));
        assert!(err.to_string().contains("servico.csv"));
    }

    #[test]
    fn writer_emits_header_and_empty_nulls() {
        let table = RawTable::new(
            vec!["Dia".into(), "Tipo".into()],
            vec![vec![cell("01/01/2024"), None]],
        );
        let mut wtr = csv::Writer::from_writer(Vec::new());
        write_csv_to_writer(&table, &mut wtr).unwrap();
        let out = String::from_utf8(wtr.into_inner().unwrap()).unwrap();
        assert_eq!(out, "Dia,Tipo\n01/01/2024,\n");
    }
}
