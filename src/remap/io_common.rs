use chrono::{DateTime, SecondsFormat, Utc};
use std::path::{Path, PathBuf};

use crate::remap::*;

pub fn simplify_file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Display width of every column: the longest text in the column plus 2.
///
/// Rows shorter than the widest row count as blank in the missing columns.
pub fn column_widths(table: &Table) -> Vec<usize> {
    let num_cols = table.iter().map(|r| r.len()).max().unwrap_or(0);
    (0..num_cols)
        .map(|col| {
            let longest = table
                .iter()
                .map(|r| r.get(col).map(|c| c.as_text().chars().count()).unwrap_or(0))
                .max()
                .unwrap_or(0);
            longest + 2
        })
        .collect()
}

/// `<prefix>_<timestamp>.xlsx`, where the timestamp is the ISO-8601 UTC time without
/// `:` and `.`, cut to 15 characters (`2024-05-01T1230`).
pub fn output_file_name(prefix: &str, now: DateTime<Utc>) -> String {
    let iso = now.to_rfc3339_opts(SecondsFormat::Millis, true);
    let stamp: String = iso
        .chars()
        .filter(|c| *c != ':' && *c != '.')
        .take(15)
        .collect();
    format!("{}_{}.xlsx", prefix, stamp)
}

pub fn output_path(target: &OutputTarget, prefix: &str, now: DateTime<Utc>) -> PathBuf {
    match target {
        OutputTarget::File(p) => p.clone(),
        OutputTarget::Directory(dir) => dir.join(output_file_name(prefix, now)),
    }
}
