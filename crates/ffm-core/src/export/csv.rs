// CSV sink.

use std::path::{Path, PathBuf};

use tracing::info;

use super::Row;
use crate::error::FfmError;

/// Where a CSV file goes.
///
/// No request means `output_dir/default_name`. Absolute paths and paths that
/// start with `./` or `../` are used as given; anything else is rooted under
/// `output_dir`.
///
/// A relative path that already names the output directory is not rooted
/// twice: with `output_dir = /srv/ffm/output`, `output/mine.csv` resolves to
/// `/srv/ffm/output/mine.csv`.
pub fn resolve_output_path(
    requested: Option<&str>,
    default_name: &str,
    output_dir: &Path,
) -> PathBuf {
    let Some(requested) = requested.map(str::trim).filter(|r| !r.is_empty()) else {
        return output_dir.join(default_name);
    };
    let path = Path::new(requested);
    if path.is_absolute() || requested.starts_with("./") || requested.starts_with("../") {
        return path.to_path_buf();
    }
    // Longest leading directory first.
    for prefix in path.ancestors().skip(1) {
        if prefix.as_os_str().is_empty() {
            break;
        }
        if output_dir.ends_with(prefix) {
            if let Ok(rest) = path.strip_prefix(prefix) {
                return output_dir.join(rest);
            }
        }
    }
    output_dir.join(path)
}

/// Write `rows` under a header of `columns`. Missing cells are written empty
/// and every value is trimmed. Parent directories are created. Returns the
/// number of data rows written.
pub fn write_csv(path: &Path, columns: &[String], rows: &[Row]) -> Result<usize, FfmError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| FfmError::file(parent, e))?;
    }

    let mut writer = csv::Writer::from_path(path).map_err(|e| FfmError::file(path, e))?;
    writer
        .write_record(columns)
        .map_err(|e| FfmError::file(path, e))?;
    for row in rows {
        let record = columns
            .iter()
            .map(|c| row.get(c).map(|v| v.trim()).unwrap_or(""));
        writer
            .write_record(record)
            .map_err(|e| FfmError::file(path, e))?;
    }
    writer.flush().map_err(|e| FfmError::file(path, e))?;

    info!("wrote {} rows to {}", rows.len(), path.display());
    Ok(rows.len())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
