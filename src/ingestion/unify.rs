//! Merge several exported sheets into one table.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::LoadResult;
use crate::types::RawTable;

use super::csv::write_csv;
use super::load::{load, LoadOptions};

/// Expand glob patterns into a de-duplicated list of files.
///
/// Paths keep pattern order, and within a pattern the alphabetical order `glob` yields.
pub fn expand_patterns(patterns: &[&str]) -> LoadResult<Vec<PathBuf>> {
    Ok(expand_with_index(patterns)?.into_iter().map(|(path, _)| path).collect())
}

/// Like [`expand_patterns`], also returning the index of the first pattern that matched each path.
fn expand_with_index(patterns: &[&str]) -> LoadResult<Vec<(PathBuf, usize)>> {
    let mut paths: Vec<(PathBuf, usize)> = Vec::new();
    for (idx, pattern) in patterns.iter().enumerate() {
        let mut matched = 0usize;
        for entry in glob::glob(pattern)? {
            let path = entry?;
            matched += 1;
            if !paths.iter().any(|(p, _)| *p == path) {
                paths.push((path, idx));
            }
        }
        if matched == 0 {
            warn!(pattern, "pattern matched no files");
        }
    }
    Ok(paths)
}

/// Load every file matched by each pattern with that pattern's options, and concatenate them.
///
/// Each pattern brings its own [`LoadOptions`], so a `;`/Latin-1 service sheet can be merged with
/// `,`/UTF-8 parts sheets. A file matched by several patterns is loaded once, with the options of
/// the first pattern that matched it.
///
/// Files are read in parallel; the output row order is still the path order from
/// [`expand_patterns`]. Columns are aligned by (canonical) header name and the result carries the
/// union of all headers.
pub fn unify(sources: &[(&str, LoadOptions)]) -> LoadResult<RawTable> {
    let patterns: Vec<&str> = sources.iter().map(|(pattern, _)| *pattern).collect();
    let paths = expand_with_index(&patterns)?;
    let tables = paths
        .par_iter()
        .map(|(path, idx)| load(path.as_path(), &sources[*idx].1))
        .collect::<LoadResult<Vec<_>>>()?;

    let out = RawTable::concat(&tables);
    debug!(
        files = tables.len(),
        rows = out.row_count(),
        columns = out.column_count(),
        "unified sources"
    );
    Ok(out)
}

/// [`unify`], then write the merged sheet as comma-separated UTF-8.
pub fn unify_to_csv(sources: &[(&str, LoadOptions)], output: impl AsRef<Path>) -> LoadResult<RawTable> {
    let table = unify(sources)?;
    write_csv(&table, output)?;
    Ok(table)
}
