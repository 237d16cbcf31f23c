//! NDJSON table reader
//!
//! One JSON object per line. Blank lines are skipped. Errors carry the file
//! and 1-based line number of the offending line.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::observability::{log_event_with_fields, Event};
use crate::record::Record;

use super::errors::{LoadError, LoadResult};
use super::{Dataset, ITEMS_FILE, USERS_FILE};

/// Read records from any line-oriented source. `source` is only used for
/// error locations.
pub fn read_records<R: BufRead>(reader: R, source: &Path) -> LoadResult<Vec<Record>> {
    let mut records = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|e| LoadError::Io {
            path: source.to_path_buf(),
            source: e,
        })?;

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let json: serde_json::Value =
            serde_json::from_str(trimmed).map_err(|e| LoadError::Json {
                path: source.to_path_buf(),
                line: line_no,
                source: e,
            })?;

        let record = Record::from_json(&json).map_err(|e| LoadError::Record {
            path: source.to_path_buf(),
            line: line_no,
            source: e,
        })?;

        records.push(record);
    }

    Ok(records)
}

/// Load one table file
pub fn load_table(path: &Path) -> LoadResult<Vec<Record>> {
    let file = File::open(path).map_err(|e| LoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let records = read_records(BufReader::new(file), path)?;

    log_event_with_fields(
        Event::TableLoaded,
        &[
            ("path", path.display().to_string().as_str()),
            ("rows", records.len().to_string().as_str()),
        ],
    );

    Ok(records)
}

/// Load `users.json` and `items.json` from `data_dir`
pub fn load_dataset(data_dir: &Path) -> LoadResult<Dataset> {
    let users = load_table(&data_dir.join(USERS_FILE))?;
    let items = load_table(&data_dir.join(ITEMS_FILE))?;

    log_event_with_fields(
        Event::DatasetLoaded,
        &[
            ("data_dir", data_dir.display().to_string().as_str()),
            ("items", items.len().to_string().as_str()),
            ("users", users.len().to_string().as_str()),
        ],
    );

    Ok(Dataset { users, items })
}
