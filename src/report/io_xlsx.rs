// Reader for Excel survey tables.

use calamine::{open_workbook, DataType, Reader, Xlsx};
use log::debug;

use likert_report::{QuestionRow, NUM_BUCKETS};

use crate::report::io_common::{parse_count, parse_prior, resolve_columns, simplify_file_name};
use crate::report::*;

pub fn read_xlsx_table(path: &str, worksheet_name: Option<&str>) -> ReportResult<ParsedSurveyTable> {
    let wrange = get_range(path, worksheet_name)?;

    let mut rows_iter = wrange.rows();
    let header = rows_iter.next().context(EmptyTableSnafu {})?;
    debug!("read_xlsx_table: header: {:?}", header);

    let remapped: Vec<Option<String>> = header
        .iter()
        .map(|dt| match dt {
            DataType::String(s) => Some(s.trim().to_string()),
            _ => None,
        })
        .collect();
    let columns = resolve_columns(&remapped)?;
    debug!("read_xlsx_table: columns: {:?}", columns);

    let labels = columns.scheme.bucket_labels();
    let mut rows: Vec<QuestionRow> = Vec::new();
    for (idx, row) in rows_iter.enumerate() {
        // The index is 1-based and the header occupies the first row.
        let lineno = idx + 2;
        // Ranges routinely extend past the data with empty rows.
        if row.iter().all(|c| matches!(c, DataType::Empty)) {
            continue;
        }
        debug!("read_xlsx_table: lineno: {:?} row: {:?}", lineno, row);

        let question = match row.first() {
            Some(DataType::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
            other => {
                return BadQuestionCellSnafu {
                    lineno,
                    content: format!("{:?}", other),
                }
                .fail()
            }
        };

        let mut counts = [0u64; NUM_BUCKETS];
        for (pos, col_idx) in columns.bucket_columns.iter().enumerate() {
            let cell = row.get(*col_idx).cloned().unwrap_or(DataType::Empty);
            counts[pos] = cell_to_count(&question, labels[pos], &cell)?;
        }

        let prior_average = match columns.prior_column {
            Some(col_idx) => {
                let cell = row.get(col_idx).cloned().unwrap_or(DataType::Empty);
                Some(cell_to_prior(&question, &cell)?)
            }
            None => None,
        };

        rows.push(QuestionRow {
            question,
            counts,
            prior_average,
        });
    }

    Ok(ParsedSurveyTable {
        scheme: columns.scheme,
        source: simplify_file_name(path),
        rows,
    })
}

fn cell_to_count(question: &str, column: &str, cell: &DataType) -> ReportResult<u64> {
    match cell {
        DataType::Int(i) if *i >= 0 => Ok(*i as u64),
        DataType::Float(f) if *f >= 0.0 && f.fract() == 0.0 => Ok(*f as u64),
        DataType::String(s) => parse_count(question, column, s),
        _ => BadCountCellSnafu {
            question,
            column,
            content: format!("{:?}", cell),
        }
        .fail(),
    }
}

fn cell_to_prior(question: &str, cell: &DataType) -> ReportResult<f64> {
    match cell {
        DataType::Int(i) => Ok(*i as f64),
        DataType::Float(f) => Ok(*f),
        DataType::String(s) => parse_prior(question, s),
        _ => BadPriorCellSnafu {
            question,
            content: format!("{:?}", cell),
        }
        .fail(),
    }
}

fn get_range(
    path: &str,
    worksheet_name: Option<&str>,
) -> ReportResult<calamine::Range<DataType>> {
    debug!(
        "get_range: path: {:?} worksheet: {:?}",
        path, worksheet_name
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it. Otherwise the first
    // worksheet of the workbook is taken.
    if let Some(name) = worksheet_name {
        let wrange = workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu { name, path })?
            .context(OpeningExcelSnafu { path })?;
        Ok(wrange)
    } else {
        let wrange = workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu { path })?
            .context(OpeningExcelSnafu { path })?;
        Ok(wrange)
    }
}
