use std::path::Path;

use crate::survey::*;

/// The cells of a survey export, before splitting the columns.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Names the columns without a header after their position, starting at 0.
pub fn header_name(idx: usize, cell: Option<String>) -> String {
    match cell {
        Some(s) if !s.is_empty() => s,
        _ => format!("Unnamed: {}", idx),
    }
}

/// Builds the dataset out of a loaded table.
pub fn table_to_dataset(
    table: &RawTable,
    scale: &LikertScale,
    headers: &DemographicHeaders,
) -> SurveyResult<Dataset> {
    let mut builder = Builder::new(scale)
        .headers(headers)
        .columns(&table.columns)
        .context(EngineSnafu {})?;
    for row in table.rows.iter() {
        builder.add_row(row).context(EngineSnafu {})?;
    }
    debug!("table_to_dataset: {} rows", builder.num_rows());
    builder.build().context(EngineSnafu {})
}
