pub mod builder;
mod config;
pub mod quick_start;

use log::{debug, info};

pub use crate::config::*;

/// Computes the survey report for the given rows.
///
/// Arguments:
/// * `rows` the survey table, one entry per question
/// * `options` the options that govern this report
///
/// The rows are validated (non-empty table, strictly positive response
/// totals), the per-question metrics are derived and the questions are
/// returned in display order: by change against the prior period
/// (largest improvement first) when the comparison is active, by average
/// (worst first) otherwise.
pub fn run_survey_stats(
    rows: &[QuestionRow],
    options: &ReportOptions,
) -> Result<SurveyReport, SurveyErrors> {
    info!(
        "run_survey_stats: processing {:?} questions, options: {:?}",
        rows.len(),
        options
    );

    if rows.is_empty() {
        return Err(SurveyErrors::EmptyTable);
    }

    // The comparison needs a prior average on every question. A table
    // with a partially filled prior column is rejected by the readers
    // before it reaches this point.
    let comparison_active =
        options.compare_with_prior && rows.iter().all(|r| r.prior_average.is_some());
    debug!("run_survey_stats: comparison_active: {:?}", comparison_active);

    let mut questions: Vec<QuestionStats> = Vec::new();
    for row in rows.iter() {
        let stats = question_stats(row, comparison_active)?;
        debug!(
            "run_survey_stats: {}: average {:.4} delta {:?}",
            stats.question, stats.average, stats.delta
        );
        questions.push(stats);
    }

    // Vec::sort_by is stable: ties keep the input order, so the report
    // is reproducible for identical input.
    if comparison_active {
        questions.sort_by(|a, b| {
            let da = a.delta.unwrap_or(0.0);
            let db = b.delta.unwrap_or(0.0);
            db.total_cmp(&da)
        });
    } else {
        questions.sort_by(|a, b| a.average.total_cmp(&b.average));
    }

    Ok(SurveyReport {
        questions,
        comparison_active,
    })
}

fn question_stats(
    row: &QuestionRow,
    comparison_active: bool,
) -> Result<QuestionStats, SurveyErrors> {
    let total: u64 = row.counts.iter().sum();
    // A question nobody answered has no distribution. This must fail
    // explicitly instead of dividing by zero.
    if total == 0 {
        return Err(SurveyErrors::NoResponses(row.question.clone()));
    }

    let average = weighted_average(&row.counts, total);
    let percentages = bucket_percentages(&row.counts, total);
    let delta = if comparison_active {
        row.prior_average.map(|prior| average - prior)
    } else {
        None
    };

    Ok(QuestionStats {
        question: row.question.clone(),
        counts: row.counts,
        total,
        average,
        percentages,
        prior_average: row.prior_average,
        delta,
    })
}

// Buckets are weighted by their 1-based semantic position.
fn weighted_average(counts: &[u64; NUM_BUCKETS], total: u64) -> f64 {
    let weighted: u64 = counts
        .iter()
        .enumerate()
        .map(|(idx, count)| (idx as u64 + 1) * count)
        .sum();
    weighted as f64 / total as f64
}

fn bucket_percentages(counts: &[u64; NUM_BUCKETS], total: u64) -> [f64; NUM_BUCKETS] {
    let mut percentages = [0.0; NUM_BUCKETS];
    for (idx, count) in counts.iter().enumerate() {
        percentages[idx] = 100.0 * *count as f64 / total as f64;
    }
    percentages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(question: &str, counts: [u64; NUM_BUCKETS]) -> QuestionRow {
        QuestionRow {
            question: question.to_string(),
            counts,
            prior_average: None,
        }
    }

    fn row_with_prior(
        question: &str,
        counts: [u64; NUM_BUCKETS],
        prior_average: f64,
    ) -> QuestionRow {
        QuestionRow {
            question: question.to_string(),
            counts,
            prior_average: Some(prior_average),
        }
    }

    #[test]
    fn example_row_metrics() {
        let rows = vec![row("Q1", [5, 8, 15, 42, 30])];
        let report = run_survey_stats(&rows, &ReportOptions::DEFAULT_OPTIONS).unwrap();
        let q = &report.questions[0];
        assert_eq!(q.total, 100);
        assert!((q.average - 4.04).abs() < 1e-9);
        let expected = [5.0, 8.0, 15.0, 42.0, 30.0];
        for (pct, exp) in q.percentages.iter().zip(expected.iter()) {
            assert!((pct - exp).abs() < 1e-9);
        }
        assert!(!report.comparison_active);
        assert_eq!(q.delta, None);
    }

    #[test]
    fn average_stays_on_scale() {
        let extremes = [
            [10, 0, 0, 0, 0],
            [0, 0, 0, 0, 10],
            [1, 2, 3, 4, 5],
            [7, 1, 1, 1, 90],
        ];
        for counts in extremes {
            let rows = vec![row("Q", counts)];
            let report = run_survey_stats(&rows, &ReportOptions::DEFAULT_OPTIONS).unwrap();
            let avg = report.questions[0].average;
            assert!((1.0..=5.0).contains(&avg), "average out of scale: {}", avg);
        }
        let all_low = run_survey_stats(
            &[row("Q", [10, 0, 0, 0, 0])],
            &ReportOptions::DEFAULT_OPTIONS,
        )
        .unwrap();
        assert!((all_low.questions[0].average - 1.0).abs() < 1e-9);
        let all_high = run_survey_stats(
            &[row("Q", [0, 0, 0, 0, 10])],
            &ReportOptions::DEFAULT_OPTIONS,
        )
        .unwrap();
        assert!((all_high.questions[0].average - 5.0).abs() < 1e-9);
    }

    #[test]
    fn percentages_sum_to_100() {
        // Totals that do not divide 100 evenly.
        let rows = vec![row("Q1", [1, 2, 3, 4, 5]), row("Q2", [0, 0, 7, 0, 0])];
        let report = run_survey_stats(&rows, &ReportOptions::DEFAULT_OPTIONS).unwrap();
        for q in report.questions.iter() {
            let sum: f64 = q.percentages.iter().sum();
            assert!((sum - 100.0).abs() < 0.01, "sum was {}", sum);
            for (idx, pct) in q.percentages.iter().enumerate() {
                let exact = 100.0 * q.counts[idx] as f64 / q.total as f64;
                assert!((pct - exact).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn zero_count_row_fails() {
        let rows = vec![row("Q1", [1, 1, 1, 1, 1]), row("Q2", [0, 0, 0, 0, 0])];
        let res = run_survey_stats(&rows, &ReportOptions::DEFAULT_OPTIONS);
        assert_eq!(res, Err(SurveyErrors::NoResponses("Q2".to_string())));
    }

    #[test]
    fn empty_table_fails() {
        let res = run_survey_stats(&[], &ReportOptions::DEFAULT_OPTIONS);
        assert_eq!(res, Err(SurveyErrors::EmptyTable));
    }

    #[test]
    fn delta_and_sort_order() {
        // Deltas: Q1 +0.3, Q2 -0.1, Q3 0.0. Expected order: Q1, Q3, Q2.
        let rows = vec![
            row_with_prior("Q2", [0, 0, 10, 0, 0], 3.1),
            row_with_prior("Q1", [0, 0, 10, 0, 0], 2.7),
            row_with_prior("Q3", [0, 0, 10, 0, 0], 3.0),
        ];
        let report = run_survey_stats(&rows, &ReportOptions::DEFAULT_OPTIONS).unwrap();
        assert!(report.comparison_active);
        let names: Vec<&str> = report
            .questions
            .iter()
            .map(|q| q.question.as_str())
            .collect();
        assert_eq!(names, vec!["Q1", "Q3", "Q2"]);
        assert!((report.questions[0].delta.unwrap() - 0.3).abs() < 1e-9);
    }

    #[test]
    fn sort_by_average_without_prior() {
        let rows = vec![
            row("best", [0, 0, 0, 0, 10]),
            row("worst", [10, 0, 0, 0, 0]),
            row("middle", [0, 0, 10, 0, 0]),
        ];
        let report = run_survey_stats(&rows, &ReportOptions::DEFAULT_OPTIONS).unwrap();
        let names: Vec<&str> = report
            .questions
            .iter()
            .map(|q| q.question.as_str())
            .collect();
        assert_eq!(names, vec!["worst", "middle", "best"]);
    }

    #[test]
    fn comparison_disabled_by_options() {
        let rows = vec![
            row_with_prior("Q1", [0, 0, 0, 0, 10], 3.0),
            row_with_prior("Q2", [10, 0, 0, 0, 0], 4.0),
        ];
        let options = ReportOptions {
            compare_with_prior: false,
        };
        let report = run_survey_stats(&rows, &options).unwrap();
        assert!(!report.comparison_active);
        // Without the comparison the sort falls back to the average.
        let names: Vec<&str> = report
            .questions
            .iter()
            .map(|q| q.question.as_str())
            .collect();
        assert_eq!(names, vec!["Q2", "Q1"]);
        assert!(report.questions.iter().all(|q| q.delta.is_none()));
        // The prior averages are still carried through untouched.
        assert!(report.questions.iter().all(|q| q.prior_average.is_some()));
    }

    #[test]
    fn comparison_needs_prior_on_every_row() {
        let rows = vec![
            row_with_prior("Q1", [0, 0, 10, 0, 0], 3.0),
            row("Q2", [0, 0, 10, 0, 0]),
        ];
        let report = run_survey_stats(&rows, &ReportOptions::DEFAULT_OPTIONS).unwrap();
        assert!(!report.comparison_active);
    }

    #[test]
    fn ties_keep_input_order() {
        let rows = vec![
            row("first", [0, 0, 10, 0, 0]),
            row("second", [0, 0, 20, 0, 0]),
            row("third", [0, 0, 5, 0, 0]),
        ];
        let report = run_survey_stats(&rows, &ReportOptions::DEFAULT_OPTIONS).unwrap();
        let names: Vec<&str> = report
            .questions
            .iter()
            .map(|q| q.question.as_str())
            .collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn trend_symbols() {
        assert_eq!(Trend::from_delta(0.62).symbol(), '▲');
        assert_eq!(Trend::from_delta(-0.05).symbol(), '▼');
        assert_eq!(Trend::from_delta(0.0).symbol(), '○');
    }

    #[test]
    fn scheme_detection() {
        let german: Vec<String> = CANONICAL_BUCKET_LABELS
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(ColumnScheme::detect(&german), Some(ColumnScheme::German));

        let mut english: Vec<String> = ColumnScheme::English
            .bucket_labels()
            .iter()
            .map(|s| s.to_string())
            .collect();
        // Order-independent existence check.
        english.reverse();
        english.push("Previous Average".to_string());
        assert_eq!(ColumnScheme::detect(&english), Some(ColumnScheme::English));

        let incomplete = vec!["Strongly Disagree".to_string(), "Agree".to_string()];
        assert_eq!(ColumnScheme::detect(&incomplete), None);
    }
}
