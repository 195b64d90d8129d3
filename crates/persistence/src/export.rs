//! Writing exported rows to `<database>.csv` and `<database>.json`.

use std::path::{Path, PathBuf};

use domain::models::ExportRow;
use domain::services::{render_csv, render_json};

use crate::error::StoreError;

/// Outcome of an export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    pub rows: usize,
    pub csv_path: Option<PathBuf>,
    pub json_path: Option<PathBuf>,
}

impl ExportReport {
    /// Paths of every file written.
    pub fn written(&self) -> Vec<&Path> {
        self.csv_path
            .iter()
            .chain(self.json_path.iter())
            .map(PathBuf::as_path)
            .collect()
    }
}

/// Write the requested renderings of `rows` into `dir`, naming the files
/// after `database`.
pub async fn write_export(
    dir: &Path,
    database: &str,
    rows: &[ExportRow],
    to_csv: bool,
    to_json: bool,
) -> Result<ExportReport, StoreError> {
    let mut report = ExportReport {
        rows: rows.len(),
        ..Default::default()
    };

    if to_csv {
        let path = dir.join(format!("{}.csv", database));
        tokio::fs::write(&path, render_csv(rows)).await?;
        report.csv_path = Some(path);
    }

    if to_json {
        let path = dir.join(format!("{}.json", database));
        tokio::fs::write(&path, render_json(rows)?).await?;
        report.json_path = Some(path);
    }

    Ok(report)
}
