//! Where a table comes from: a local file or a remote URL.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{LoadError, LoadResult};

/// Input location for [`super::load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Local file. Existence is checked before reading.
    Local(PathBuf),
    /// `http://` or `https://` URL. Fetched without a pre-check.
    Remote(String),
}

impl Source {
    /// Classify a path-or-URL string.
    pub fn parse(location: &str) -> Self {
        let lower = location.trim_start().to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Source::Remote(location.trim().to_string())
        } else {
            Source::Local(PathBuf::from(location))
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Source::Remote(_))
    }

    /// Read the whole source into memory.
    ///
    /// - Local: fails with [`LoadError::SourceNotFound`] if the path does not exist.
    /// - Remote: any transport or HTTP status failure surfaces here, at read time.
    pub fn read_bytes(&self) -> LoadResult<Vec<u8>> {
        match self {
            Source::Local(path) => {
                if !path.exists() {
                    return Err(LoadError::SourceNotFound { path: path.clone() });
                }
                let bytes = fs::read(path)?;
                debug!(path = %path.display(), bytes = bytes.len(), "read local source");
                Ok(bytes)
            }
            Source::Remote(url) => fetch_remote(url),
        }
    }
}

#[cfg(feature = "remote")]
fn fetch_remote(url: &str) -> LoadResult<Vec<u8>> {
    let response = reqwest::blocking::get(url)?.error_for_status()?;
    let bytes = response.bytes()?;
    debug!(url, bytes = bytes.len(), "fetched remote source");
    Ok(bytes.to_vec())
}

#[cfg(not(feature = "remote"))]
fn fetch_remote(url: &str) -> LoadResult<Vec<u8>> {
    Err(LoadError::Config {
        message: format!("remote sources not enabled (enable cargo feature 'remote'): {url}"),
    })
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Local(path) => write!(f, "{}", path.display()),
            Source::Remote(url) => f.write_str(url),
        }
    }
}

impl From<&str> for Source {
    fn from(location: &str) -> Self {
        Source::parse(location)
    }
}

impl From<String> for Source {
    fn from(location: String) -> Self {
        Source::parse(&location)
    }
}

impl From<PathBuf> for Source {
    fn from(path: PathBuf) -> Self {
        Source::Local(path)
    }
}

impl From<&Path> for Source {
    fn from(path: &Path) -> Self {
        Source::Local(path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_detects_urls() {
        assert!(Source::parse("https://example.com/servico.csv").is_remote());
        assert!(Source::parse("HTTP://example.com/a.csv").is_remote());
        assert_eq!(
            Source::parse("dados/servico.csv"),
            Source::Local(PathBuf::from("dados/servico.csv"))
        );
    }

    #[test]
    fn missing_local_file_reports_path() {
        let src = Source::from("definitely/not/here.csv");
        match src.read_bytes() {
            Err(LoadError::SourceNotFound { path }) => {
                assert_eq!(path, PathBuf::from("definitely/not/here.csv"));
            }
            other => panic!("expected SourceNotFound, got {other:?}"),
        }
    }

    #[cfg(not(feature = "remote"))]
    #[test]
    fn url_without_remote_feature_is_a_config_error() {
        let err = Source::from("https://example.com/servico.csv").read_bytes().unwrap_err();
        assert!(matches!(err, LoadError::Config { .. }));
        assert!(err.to_string().contains("remote sources not enabled"));
    }
}
