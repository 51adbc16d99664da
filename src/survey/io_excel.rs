// Primitives for reading Excel workbooks.

use calamine::{open_workbook, DataType, Reader, Xlsx};
use chrono::Timelike;

use crate::survey::{
    io_common::{header_name, simplify_file_name, RawTable},
    *,
};

pub fn read_excel_table(path: &str, worksheet_name: Option<&str>) -> SurveyResult<RawTable> {
    let wrange = get_range(path, worksheet_name)?;

    let mut iter = wrange.rows();
    let header = iter.next().context(EmptySheetSnafu { path })?;
    debug!("read_excel_table: header: {:?}", header);
    let columns: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(idx, cell)| header_name(idx, read_cell(cell)))
        .collect();

    let mut rows: Vec<Vec<Option<String>>> = Vec::new();
    for (idx, row) in iter.enumerate() {
        debug!("read_excel_table: idx: {:?} row: {:?}", idx, row);
        rows.push(row.iter().map(read_cell).collect());
    }
    info!(
        "Read {} respondents and {} columns from {}",
        rows.len(),
        columns.len(),
        simplify_file_name(path)
    );
    Ok(RawTable { columns, rows })
}

/// The text of a cell. Empty cells and empty strings are missing.
pub fn read_cell(cell: &DataType) -> Option<String> {
    match cell {
        DataType::String(s) if s.is_empty() => None,
        DataType::String(s) => Some(s.clone()),
        DataType::Int(i) => Some(i.to_string()),
        DataType::Float(f) => Some(format_number(*f)),
        DataType::DateTime(f) => Some(format_datetime(cell).unwrap_or_else(|| format_number(*f))),
        DataType::Bool(b) => Some(b.to_string()),
        DataType::Empty => None,
        DataType::Error(e) => {
            warn!("read_cell: dropping cell with error {:?}", e);
            None
        }
        #[allow(unreachable_patterns)]
        _ => {
            warn!("read_cell: dropping unsupported cell {:?}", cell);
            None
        }
    }
}

// Whole numbers lose their decimal part: 5.0 -> "5"
fn format_number(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

// Dates without a time of day are written as 2023-07-16.
fn format_datetime(cell: &DataType) -> Option<String> {
    let dt = cell.as_datetime()?;
    if dt.time().num_seconds_from_midnight() == 0 {
        Some(dt.format("%Y-%m-%d").to_string())
    } else {
        Some(dt.format("%Y-%m-%d %H:%M:%S").to_string())
    }
}

fn get_range(
    path: &str,
    worksheet_name_o: Option<&str>,
) -> SurveyResult<calamine::Range<DataType>> {
    debug!("get_range: path: {:?} worksheet: {:?}", path, worksheet_name_o);
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it.
    if let Some(worksheet_name) = worksheet_name_o {
        let wrange = workbook
            .worksheet_range(worksheet_name)
            .context(MissingWorksheetSnafu {
                path,
                name: worksheet_name,
            })?
            .context(OpeningExcelSnafu { path })?;
        Ok(wrange)
    } else {
        let all_worksheets = workbook.worksheets();
        match all_worksheets.as_slice() {
            [] => EmptySheetSnafu { path }.fail(),
            [(worksheet_name, wrange)] => {
                debug!("get_range: path: {:?} worksheet: {:?}", path, worksheet_name);
                Ok(wrange.clone())
            }
            all => AmbiguousWorksheetSnafu {
                path,
                names: all.iter().map(|(n, _)| n.clone()).collect::<Vec<String>>(),
            }
            .fail(),
        }
    }
}
