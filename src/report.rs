use log::{info, warn};

use likert_report::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

pub mod figure;
pub mod io_common;
pub mod io_csv;
pub mod io_xlsx;
pub mod sample;

#[derive(Debug, Snafu)]
pub enum ReportError {
    #[snafu(display("Error opening spreadsheet {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The workbook {path} contains no worksheet"))]
    EmptyExcel { path: String },
    #[snafu(display("No worksheet named {name:?} in {path}"))]
    MissingWorksheet { name: String, path: String },
    #[snafu(display("The spreadsheet contains no data"))]
    EmptyTable {},
    #[snafu(display(
        "The spreadsheet must contain the 5 Likert response columns (German or English labels)"
    ))]
    MissingLikertColumns {},
    #[snafu(display("Row {lineno}: the question cell is empty or not text: {content}"))]
    BadQuestionCell { lineno: usize, content: String },
    #[snafu(display(
        "Question {question:?}, column {column:?}: expected a non-negative whole count, found {content}"
    ))]
    BadCountCell {
        question: String,
        column: String,
        content: String,
    },
    #[snafu(display("Question {question:?}: expected a numeric prior average, found {content}"))]
    BadPriorCell { question: String, content: String },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading a CSV record"))]
    CsvLineParse { source: csv::Error },
    #[snafu(display("Error writing CSV file {path}"))]
    CsvWrite { source: csv::Error, path: String },
    #[snafu(display("Unknown input type {input_type:?} (expected xlsx or csv)"))]
    UnknownInputType { input_type: String },
    #[snafu(display("{source}"))]
    Tabulation { source: SurveyErrors },
    #[snafu(display("Error opening JSON file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error serializing or parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing output to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type ReportResult<T> = Result<T, ReportError>;

/// A survey table as parsed by the readers, before any metric is
/// computed.
#[derive(PartialEq, Debug, Clone)]
pub struct ParsedSurveyTable {
    pub scheme: ColumnScheme,
    /// Simplified name of the file the table was read from.
    pub source: String,
    pub rows: Vec<QuestionRow>,
}

/// One full report invocation, as assembled from the command line.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub input: String,
    pub input_type: Option<String>,
    pub worksheet_name: Option<String>,
    pub show_previous: bool,
    pub out: Option<String>,
    pub reference: Option<String>,
}

/// The report header echoed at the top of the output document.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    pub title: String,
    pub source: String,
    #[serde(rename = "comparisonActive")]
    pub comparison_active: bool,
    #[serde(rename = "sortedBy")]
    pub sorted_by: String,
}

pub fn read_survey_table(
    path: &str,
    input_type: Option<&str>,
    worksheet_name: Option<&str>,
) -> ReportResult<ParsedSurveyTable> {
    let kind = match input_type {
        Some(x) => x.to_lowercase(),
        None => Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase(),
    };
    info!("read_survey_table: reading {:?} as {:?}", path, kind);
    match kind.as_str() {
        "xlsx" | "xlsm" => io_xlsx::read_xlsx_table(path, worksheet_name),
        "csv" => io_csv::read_csv_table(path),
        _ => UnknownInputTypeSnafu { input_type: kind }.fail(),
    }
}

fn questions_to_json(report: &SurveyReport) -> Vec<JSValue> {
    let mut l: Vec<JSValue> = Vec::new();
    for q in report.questions.iter() {
        let mut counts: JSMap<String, JSValue> = JSMap::new();
        for (label, count) in CANONICAL_BUCKET_LABELS.iter().zip(q.counts.iter()) {
            counts.insert(label.to_string(), json!(count));
        }

        let mut js = json!({
            "question": q.question,
            "counts": counts,
            "total": q.total,
            "average": q.average,
            "averageDisplay": format!("{:.1}", q.average),
        });
        if report.comparison_active {
            if let (Some(prior), Some(delta)) = (q.prior_average, q.delta) {
                js["priorAverage"] = json!(prior);
                js["priorAverageDisplay"] = json!(format!("{:.1}", prior));
                js["change"] = json!(delta);
                js["changeDisplay"] = json!(figure::change_label(delta));
            }
        }
        l.push(js);
    }
    l
}

fn build_document(table: &ParsedSurveyTable, report: &SurveyReport) -> JSValue {
    let meta = ReportMeta {
        title: figure::chart_title(report.comparison_active),
        source: table.source.clone(),
        comparison_active: report.comparison_active,
        sorted_by: figure::sort_note(report.comparison_active),
    };
    json!({
        "config": meta,
        "figure": figure::build_figure(report),
        "questions": questions_to_json(report),
    })
}

pub fn read_reference(path: &str) -> ReportResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

fn check_reference(path: &str, produced: &str) -> ReportResult<()> {
    let reference = read_reference(path)?;
    let pretty_reference = serde_json::to_string_pretty(&reference).context(ParsingJsonSnafu {})?;
    if pretty_reference != produced {
        warn!("Found differences with the reference document");
        print_diff(pretty_reference.as_str(), produced, "\n");
        whatever!("Difference detected between the produced report and the reference document");
    }
    Ok(())
}

pub fn run_report(request: &ReportRequest) -> ReportResult<()> {
    let table = read_survey_table(
        &request.input,
        request.input_type.as_deref(),
        request.worksheet_name.as_deref(),
    )?;
    info!(
        "run_report: {} questions read from {}",
        table.rows.len(),
        table.source
    );

    let options = ReportOptions {
        compare_with_prior: request.show_previous,
    };
    let report = run_survey_stats(&table.rows, &options).context(TabulationSnafu {})?;

    let document = build_document(&table, &report);
    let pretty = serde_json::to_string_pretty(&document).context(ParsingJsonSnafu {})?;

    match request.out.as_deref() {
        None | Some("stdout") => println!("{}", pretty),
        Some(path) => {
            fs::write(path, &pretty).context(WritingOutputSnafu { path })?;
            info!("wrote report to {}", path);
        }
    }

    // The reference document, if provided for comparison.
    if let Some(reference_path) = &request.reference {
        check_reference(reference_path, &pretty)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::*;

    fn test_file(name: &str) -> String {
        let dir: PathBuf =
            std::env::temp_dir().join(format!("likertviz-tests-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir.join(name).display().to_string()
    }

    #[test]
    fn sample_file_round_trips() {
        let path = test_file("sample.csv");
        sample::write_sample_csv(&path).unwrap();

        let table = read_survey_table(&path, None, None).unwrap();
        assert_eq!(table.scheme, ColumnScheme::German);
        assert_eq!(table.rows.len(), 7);
        assert!(table.rows.iter().all(|r| r.prior_average.is_some()));

        let report = run_survey_stats(&table.rows, &ReportOptions::DEFAULT_OPTIONS).unwrap();
        assert!(report.comparison_active);
        // Largest improvement first: Q1 gained 0.62 over its prior 3.42.
        let first = &report.questions[0];
        assert!(first.question.starts_with("Q1:"));
        assert!((first.average - 4.04).abs() < 1e-9);
        assert!((first.delta.unwrap() - 0.62).abs() < 1e-9);
        // Q6 lost the most ground and comes last.
        assert!(report
            .questions
            .last()
            .unwrap()
            .question
            .starts_with("Q6:"));
    }

    #[test]
    fn both_vocabularies_produce_the_same_report() {
        let german_path = test_file("german.csv");
        let english_path = test_file("english.csv");
        sample::write_sample_csv(&german_path).unwrap();

        // Same data under the English header.
        let contents = fs::read_to_string(&german_path).unwrap();
        let mut lines: Vec<&str> = contents.lines().collect();
        let english_header =
            "Frage,Strongly Disagree,Disagree,Neutral,Agree,Strongly Agree,Vorheriger Durchschnitt";
        lines[0] = english_header;
        fs::write(&english_path, lines.join("\n")).unwrap();

        let german = read_survey_table(&german_path, None, None).unwrap();
        let english = read_survey_table(&english_path, None, None).unwrap();
        assert_eq!(german.scheme, ColumnScheme::German);
        assert_eq!(english.scheme, ColumnScheme::English);
        assert_eq!(german.rows, english.rows);

        let options = ReportOptions::DEFAULT_OPTIONS;
        let report_g = run_survey_stats(&german.rows, &options).unwrap();
        let report_e = run_survey_stats(&english.rows, &options).unwrap();
        assert_eq!(
            json!({
                "figure": figure::build_figure(&report_g),
                "questions": questions_to_json(&report_g),
            }),
            json!({
                "figure": figure::build_figure(&report_e),
                "questions": questions_to_json(&report_e),
            })
        );
    }

    #[test]
    fn malformed_count_is_rejected() {
        let path = test_file("bad_count.csv");
        let contents = "Frage,Stimme überhaupt nicht zu,Stimme eher nicht zu,Teils - Teils,\
                        Stimme eher zu,Stimme voll und ganz zu\nQ1,a few,2,3,4,5\n";
        fs::write(&path, contents).unwrap();
        let res = read_survey_table(&path, None, None);
        assert!(matches!(res, Err(ReportError::BadCountCell { .. })));
    }

    #[test]
    fn missing_columns_are_rejected() {
        let path = test_file("missing_columns.csv");
        fs::write(&path, "Frage,Stimme überhaupt nicht zu\nQ1,5\n").unwrap();
        let res = read_survey_table(&path, None, None);
        assert!(matches!(res, Err(ReportError::MissingLikertColumns { .. })));
    }

    #[test]
    fn unknown_input_type_is_rejected() {
        let res = read_survey_table("survey.dat", None, None);
        assert!(matches!(res, Err(ReportError::UnknownInputType { .. })));
    }

    #[test]
    fn hidden_previous_sorts_by_average() {
        let path = test_file("no_prev.csv");
        sample::write_sample_csv(&path).unwrap();
        let out_path = test_file("no_prev_report.json");
        let request = ReportRequest {
            input: path,
            input_type: None,
            worksheet_name: None,
            show_previous: false,
            out: Some(out_path.clone()),
            reference: None,
        };
        run_report(&request).unwrap();

        let doc: JSValue = serde_json::from_str(&fs::read_to_string(&out_path).unwrap()).unwrap();
        assert_eq!(doc["config"]["comparisonActive"], json!(false));
        let questions = doc["questions"].as_array().unwrap();
        assert_eq!(questions.len(), 7);
        // Worst average first: Q4 at 3.21.
        assert!(questions[0]["question"].as_str().unwrap().starts_with("Q4:"));
        assert!(questions[0]["changeDisplay"].is_null());
    }

    #[test]
    fn reference_check_detects_drift() {
        let path = test_file("ref_input.csv");
        sample::write_sample_csv(&path).unwrap();
        let out_path = test_file("ref_report.json");
        let request = ReportRequest {
            input: path,
            input_type: None,
            worksheet_name: None,
            show_previous: true,
            out: Some(out_path.clone()),
            reference: None,
        };
        run_report(&request).unwrap();

        // The produced document matches itself as a reference.
        let checked = ReportRequest {
            reference: Some(out_path.clone()),
            ..request.clone()
        };
        run_report(&checked).unwrap();

        // Any drift in the reference fails the run.
        let mut reference: JSValue =
            serde_json::from_str(&fs::read_to_string(&out_path).unwrap()).unwrap();
        reference["config"]["comparisonActive"] = json!(false);
        let drifted_path = test_file("ref_drifted.json");
        fs::write(
            &drifted_path,
            serde_json::to_string_pretty(&reference).unwrap(),
        )
        .unwrap();
        let drifted = ReportRequest {
            reference: Some(drifted_path),
            ..request
        };
        assert!(run_report(&drifted).is_err());
    }
}
