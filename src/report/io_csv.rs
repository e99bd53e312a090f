// Primitives for reading the CSV flavor of the survey table.

use std::fs::File;

use csv::StringRecord;
use log::debug;

use likert_report::{QuestionRow, NUM_BUCKETS};

use crate::report::io_common::{parse_count, parse_prior, resolve_columns, simplify_file_name};
use crate::report::*;

pub fn read_csv_table(path: &str) -> ReportResult<ParsedSurveyTable> {
    let mut records = get_records(path)?;

    let header: StringRecord = records
        .next()
        .context(EmptyTableSnafu {})?
        .context(CsvLineParseSnafu {})?;
    debug!("read_csv_table: header: {:?}", header);

    let remapped: Vec<Option<String>> = header
        .iter()
        .map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect();
    let columns = resolve_columns(&remapped)?;
    debug!("read_csv_table: columns: {:?}", columns);

    let labels = columns.scheme.bucket_labels();
    let mut rows: Vec<QuestionRow> = Vec::new();
    for (idx, record_r) in records.enumerate() {
        // The index is 1-based and the header occupies the first row.
        let lineno = idx + 2;
        let record = record_r.context(CsvLineParseSnafu {})?;
        if record.iter().all(|s| s.trim().is_empty()) {
            continue;
        }
        debug!("read_csv_table: lineno: {:?} record: {:?}", lineno, record);

        let question = match record.get(0) {
            Some(s) if !s.trim().is_empty() => s.trim().to_string(),
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
            let content = record.get(*col_idx).unwrap_or("");
            counts[pos] = parse_count(&question, labels[pos], content)?;
        }

        let prior_average = match columns.prior_column {
            Some(col_idx) => Some(parse_prior(&question, record.get(col_idx).unwrap_or(""))?),
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

fn get_records(path: &str) -> ReportResult<csv::StringRecordsIntoIter<File>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    Ok(rdr.into_records())
}
