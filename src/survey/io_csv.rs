// Primitives for reading CSV files.

use crate::survey::{
    io_common::{header_name, simplify_file_name, RawTable},
    *,
};

pub fn read_csv_table(path: &str) -> SurveyResult<RawTable> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    let mut records = rdr.into_records();

    let header = match records.next() {
        Some(line_r) => line_r.context(CsvLineParseSnafu { lineno: 1usize })?,
        None => return EmptySheetSnafu { path }.fail(),
    };
    let columns: Vec<String> = header
        .iter()
        .enumerate()
        // Spreadsheet programs may start the file with a byte order mark.
        .map(|(idx, s)| header_name(idx, Some(s.trim_start_matches('\u{feff}').to_string())))
        .collect();
    debug!("read_csv_table: header: {:?}", columns);

    let mut rows: Vec<Vec<Option<String>>> = Vec::new();
    for (idx, line_r) in records.enumerate() {
        // The header is line 1.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        let mut row: Vec<Option<String>> = line
            .iter()
            .map(|s| {
                if s.is_empty() {
                    None
                } else {
                    Some(s.to_string())
                }
            })
            .collect();
        // Short lines are padded with missing cells. Long lines are left to the
        // dataset checks.
        if row.len() < columns.len() {
            row.resize(columns.len(), None);
        }
        debug!("read_csv_table: lineno: {:?} row: {:?}", lineno, &row);
        rows.push(row);
    }
    info!(
        "Read {} respondents and {} columns from {}",
        rows.len(),
        columns.len(),
        simplify_file_name(path)
    );
    Ok(RawTable { columns, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> String {
        format!("{}/tests/data/{}", env!("CARGO_MANIFEST_DIR"), name)
    }

    #[test]
    fn read_fixture() {
        let table = read_csv_table(&fixture("anket.csv")).unwrap();
        assert_eq!(table.columns.len(), 8);
        assert_eq!(table.columns[0], "1.Cinsiyetiniz nedir?");
        assert_eq!(table.columns[7], "Ekip arkadaşlarımla iletişimim iyi");
        assert_eq!(table.rows.len(), 10);
        assert!(table.rows.iter().all(|r| r.len() == 8));
        // The last line stops after the first question.
        assert_eq!(table.rows[9][6], None);
        assert_eq!(table.rows[9][7], None);
    }

    #[test]
    fn missing_file() {
        let res = read_csv_table(&fixture("yok.csv"));
        assert!(matches!(res, Err(SurveyError::CsvOpen { .. })));
    }
}
