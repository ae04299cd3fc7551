//! Per-source read configuration: delimiter, text encoding and header aliases.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use encoding_rs::{UTF_8, WINDOWS_1252};
use serde::{Deserialize, Serialize};

use crate::error::{LoadError, LoadResult};
use crate::types::Column;

/// Text encoding of a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextEncoding {
    /// Plain UTF-8. A leading byte-order mark is kept in the text (and later stripped from the
    /// first header).
    Utf8,
    /// UTF-8 with an optional byte-order mark ("utf-8-sig").
    #[default]
    Utf8Sig,
    /// ISO-8859-1, decoded with the WHATWG `windows-1252` superset.
    Latin1,
}

impl TextEncoding {
    pub fn label(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Utf8Sig => "utf-8-sig",
            TextEncoding::Latin1 => "latin-1",
        }
    }

    /// Decode `bytes`. Returns `None` if they are malformed for this encoding.
    ///
    /// Latin-1 maps every byte, so it never fails.
    pub fn decode(self, bytes: &[u8]) -> Option<Cow<'_, str>> {
        match self {
            TextEncoding::Utf8 => UTF_8.decode_without_bom_handling_and_without_replacement(bytes),
            TextEncoding::Utf8Sig => {
                let (text, had_errors) = UTF_8.decode_with_bom_removal(bytes);
                (!had_errors).then_some(text)
            }
            TextEncoding::Latin1 => Some(WINDOWS_1252.decode_without_bom_handling(bytes).0),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Header spellings seen across the shop's sheets, mapped to the canonical schema.
pub fn default_column_aliases() -> BTreeMap<String, Column> {
    [
        ("Mes", Column::Month),
        ("Servico", Column::Service),
        ("Preco", Column::Price),
        ("Data", Column::Day),
        ("Categoria", Column::Type),
    ]
    .into_iter()
    .map(|(alias, column)| (alias.to_string(), column))
    .collect()
}

/// How to read one delimited source.
///
/// Use [`Default`] for the comma-separated, UTF-8-with-BOM sheets and
/// [`SourceConfig::service_sheet`] for the semicolon-separated Latin-1 service export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Field delimiter. Must be a single ASCII character.
    pub delimiter: char,
    /// Text encoding of the file.
    pub encoding: TextEncoding,
    /// Extra header spellings mapped to canonical columns.
    pub column_aliases: BTreeMap<String, Column>,
    /// Drop columns whose header is blank or starts with `Unnamed`.
    pub drop_unnamed_columns: bool,
    /// Drop rows where every cell is empty.
    pub drop_empty_rows: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            encoding: TextEncoding::Utf8Sig,
            column_aliases: default_column_aliases(),
            drop_unnamed_columns: true,
            drop_empty_rows: true,
        }
    }
}

impl SourceConfig {
    /// Preset for the service export: `;`-separated, Latin-1.
    pub fn service_sheet() -> Self {
        Self {
            delimiter: ';',
            encoding: TextEncoding::Latin1,
            ..Default::default()
        }
    }

    /// Parse a config from JSON. Missing keys take their [`Default`] values.
    ///
    /// ```rust
    /// use workshop_data_processing::ingestion::{SourceConfig, TextEncoding};
    ///
    /// let cfg = SourceConfig::from_json_str(r#"{"delimiter": ";", "encoding": "latin1"}"#).unwrap();
    /// assert_eq!(cfg.delimiter, ';');
    /// assert_eq!(cfg.encoding, TextEncoding::Latin1);
    /// assert!(cfg.drop_unnamed_columns);
    /// ```
    pub fn from_json_str(input: &str) -> LoadResult<Self> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| LoadError::Config {
            message: e.to_string(),
        })?;
        cfg.delimiter_byte()?;
        Ok(cfg)
    }

    /// The delimiter as the single byte the CSV reader expects.
    pub fn delimiter_byte(&self) -> LoadResult<u8> {
        let d = self.delimiter;
        if !d.is_ascii() || d == '"' || d == '\n' || d == '\r' {
            return Err(LoadError::Config {
                message: format!("delimiter must be a single ASCII character other than quote/newline, got {d:?}"),
            });
        }
        Ok(d as u8)
    }

    /// Clean a raw header and map known aliases to the canonical column name.
    pub fn canonical_header(&self, raw: &str) -> String {
        let name = raw.trim_start_matches('\u{feff}').trim();
        if let Some(column) = self.column_aliases.get(name) {
            return column.canonical_name().to_string();
        }
        name.to_string()
    }
}

/// Spreadsheet exports name blank header cells `Unnamed: N`.
pub fn is_unnamed_header(header: &str) -> bool {
    header.is_empty() || header.starts_with("Unnamed")
}
