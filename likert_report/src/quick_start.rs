/*!

# Quick start

This example shows how to turn a spreadsheet of Likert survey responses into
a rendered chart, end to end. Any tool that exports survey results as a
table works (Excel, LibreOffice, Google Sheets, most online form services).

**Preparing the spreadsheet** The expected layout is one row per question:
the first column holds the question text, followed by the five response
columns. Both the German labels (`Stimme überhaupt nicht zu` ..
`Stimme voll und ganz zu`) and the English labels (`Strongly Disagree` ..
`Strongly Agree`) are accepted; the order of the columns in the file does
not matter. An optional `Vorheriger Durchschnitt` column carries the
average of the prior survey period for each question.

If you do not have data at hand, generate the reference example file:

```bash
likertviz --sample survey_example.csv
```

**Producing the report** Point the program at your file (`.xlsx` and
`.csv` are both understood):

```bash
likertviz -i survey_results.xlsx --out report.json
```

You should see a short log of the computed metrics on stderr:

```text
[2024-03-18T10:02:41Z INFO  likert_report] run_survey_stats: processing 7 questions
[2024-03-18T10:02:41Z INFO  likertviz] wrote report to report.json
```

The output is a single JSON document: the Plotly-compatible figure
(stacked horizontal bars, one per question, with the average annotated at
the right edge), plus a summary table with the average, the prior average
and the signed change of each question. Feed `figure` to any Plotly
renderer to obtain the chart.

When the input carries prior averages, the questions are sorted by their
change against the prior period (largest improvement first) and each
annotation shows a directional symbol (▲ improvement, ▼ decline, ○ no
change). Pass `--hide-previous` to ignore the prior column and sort by
the plain average instead.

**Using the library directly** The computation core is available without
the command line harness:

```
pub use likert_report::builder::Builder;
pub use likert_report::ReportOptions;
# use likert_report::SurveyErrors;

let mut builder = Builder::new(&ReportOptions::DEFAULT_OPTIONS)?;
builder.add_question_with_prior("The product is easy to use", &[5, 8, 15, 42, 30], 3.42)?;
let report = builder.tabulate()?;

let q = &report.questions[0];
assert!((q.average - 4.04).abs() < 1e-9);
assert!((q.delta.unwrap() - 0.62).abs() < 1e-9);
# Ok::<(), SurveyErrors>(())
```

*/
