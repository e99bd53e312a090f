pub use crate::config::*;
use crate::run_survey_stats;

/// A builder for assembling a survey table row by row.
///
/// ```
/// pub use likert_report::builder::Builder;
/// pub use likert_report::ReportOptions;
/// # use likert_report::SurveyErrors;
///
/// let mut builder = Builder::new(&ReportOptions::DEFAULT_OPTIONS)?;
///
/// builder.add_question("The product is easy to use", &[5, 8, 15, 42, 30])?;
/// builder.add_question_with_prior("The interface is intuitive", &[8, 12, 22, 35, 23], 3.65)?;
///
/// let report = builder.tabulate()?;
/// assert_eq!(report.questions.len(), 2);
///
/// # Ok::<(), SurveyErrors>(())
/// ```
pub struct Builder {
    pub(crate) _options: ReportOptions,
    pub(crate) _rows: Vec<QuestionRow>,
}

impl Builder {
    pub fn new(options: &ReportOptions) -> Result<Builder, SurveyErrors> {
        Ok(Builder {
            _options: *options,
            _rows: Vec::new(),
        })
    }

    /// Adds a question without a prior-period average.
    ///
    /// The counts are given in semantic order, from strongly-disagree
    /// to strongly-agree.
    pub fn add_question(
        &mut self,
        question: &str,
        counts: &[u64; NUM_BUCKETS],
    ) -> Result<(), SurveyErrors> {
        self.add_row(&QuestionRow {
            question: question.to_string(),
            counts: *counts,
            prior_average: None,
        })
    }

    /// Adds a question carrying the average of the prior period.
    ///
    /// The comparison only becomes active when every question of the
    /// table carries one.
    pub fn add_question_with_prior(
        &mut self,
        question: &str,
        counts: &[u64; NUM_BUCKETS],
        prior_average: f64,
    ) -> Result<(), SurveyErrors> {
        self.add_row(&QuestionRow {
            question: question.to_string(),
            counts: *counts,
            prior_average: Some(prior_average),
        })
    }

    pub fn add_row(&mut self, row: &QuestionRow) -> Result<(), SurveyErrors> {
        self._rows.push(row.clone());
        Ok(())
    }

    /// Computes the report over the rows added so far.
    pub fn tabulate(&self) -> Result<SurveyReport, SurveyErrors> {
        run_survey_stats(&self._rows, &self._options)
    }
}
