// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// The number of response buckets on the Likert scale.
///
/// The whole pipeline is built around the fixed 1-5 agreement scale.
pub const NUM_BUCKETS: usize = 5;

/// The two naming vocabularies accepted for the bucket columns.
///
/// The German vocabulary is canonical: English-labeled input is renamed
/// on resolution, so equivalent data produces identical reports under
/// either vocabulary.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum ColumnScheme {
    German,
    English,
}

/// The canonical (German) bucket labels, in semantic order from
/// strongly-disagree to strongly-agree.
pub const CANONICAL_BUCKET_LABELS: [&str; NUM_BUCKETS] = [
    "Stimme überhaupt nicht zu",
    "Stimme eher nicht zu",
    "Teils - Teils",
    "Stimme eher zu",
    "Stimme voll und ganz zu",
];

const ENGLISH_BUCKET_LABELS: [&str; NUM_BUCKETS] = [
    "Strongly Disagree",
    "Disagree",
    "Neutral",
    "Agree",
    "Strongly Agree",
];

/// The canonical label of the optional prior-period average column.
pub const CANONICAL_PRIOR_LABEL: &str = "Vorheriger Durchschnitt";

const ENGLISH_PRIOR_LABEL: &str = "Previous Average";

impl ColumnScheme {
    /// The bucket labels of this vocabulary, in semantic order.
    /// Position 1..5 maps to strongly-disagree..strongly-agree.
    pub fn bucket_labels(&self) -> [&'static str; NUM_BUCKETS] {
        match self {
            ColumnScheme::German => CANONICAL_BUCKET_LABELS,
            ColumnScheme::English => ENGLISH_BUCKET_LABELS,
        }
    }

    /// The labels accepted for the prior-period average column under this
    /// vocabulary. The canonical label is accepted under both: the
    /// original file format only ever labeled this column in German.
    pub fn prior_labels(&self) -> Vec<&'static str> {
        match self {
            ColumnScheme::German => vec![CANONICAL_PRIOR_LABEL],
            ColumnScheme::English => vec![ENGLISH_PRIOR_LABEL, CANONICAL_PRIOR_LABEL],
        }
    }

    /// Finds the vocabulary for which all 5 bucket labels appear in the
    /// given column names. The existence check is order-independent.
    /// The German vocabulary is probed first.
    pub fn detect(column_names: &[String]) -> Option<ColumnScheme> {
        for scheme in [ColumnScheme::German, ColumnScheme::English] {
            let all_present = scheme
                .bucket_labels()
                .iter()
                .all(|label| column_names.iter().any(|c| c == label));
            if all_present {
                return Some(scheme);
            }
        }
        None
    }
}

/// One question of the survey, with the response counts per bucket in
/// semantic order and the optional prior-period average.
#[derive(PartialEq, Debug, Clone)]
pub struct QuestionRow {
    pub question: String,
    pub counts: [u64; NUM_BUCKETS],
    pub prior_average: Option<f64>,
}

// ******** Output data structures *********

/// Direction of the period-over-period change of a question.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Trend {
    Improved,
    Declined,
    Unchanged,
}

impl Trend {
    pub fn from_delta(delta: f64) -> Trend {
        if delta > 0.0 {
            Trend::Improved
        } else if delta < 0.0 {
            Trend::Declined
        } else {
            Trend::Unchanged
        }
    }

    /// The directional symbol shown next to the average.
    pub fn symbol(&self) -> char {
        match self {
            Trend::Improved => '▲',
            Trend::Declined => '▼',
            Trend::Unchanged => '○',
        }
    }
}

/// Derived metrics for one question.
#[derive(PartialEq, Debug, Clone)]
pub struct QuestionStats {
    pub question: String,
    pub counts: [u64; NUM_BUCKETS],
    /// Total number of responses. Strictly positive by construction.
    pub total: u64,
    /// Weighted average on the 1-5 scale.
    pub average: f64,
    /// Exact percentage of each bucket. Display sites round to one
    /// decimal without touching these values.
    pub percentages: [f64; NUM_BUCKETS],
    pub prior_average: Option<f64>,
    /// average - prior_average, present only when the comparison is
    /// active for the whole report.
    pub delta: Option<f64>,
}

impl QuestionStats {
    pub fn trend(&self) -> Option<Trend> {
        self.delta.map(Trend::from_delta)
    }
}

/// The full report: questions in display order plus the report-level
/// comparison flag.
#[derive(PartialEq, Debug, Clone)]
pub struct SurveyReport {
    pub questions: Vec<QuestionStats>,
    /// True when every question carried a prior average and the caller
    /// requested the comparison. Governs both the delta columns and the
    /// sort criterion.
    pub comparison_active: bool,
}

/// Errors that prevent the report from being computed.
#[derive(PartialEq, Debug, Clone)]
pub enum SurveyErrors {
    /// The table has no rows.
    EmptyTable,
    /// A question has a zero total count. Carries the question text.
    NoResponses(String),
}

impl Error for SurveyErrors {}

impl Display for SurveyErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurveyErrors::EmptyTable => write!(f, "the survey table contains no questions"),
            SurveyErrors::NoResponses(question) => {
                write!(f, "no responses recorded for question {:?}", question)
            }
        }
    }
}

// ********* Configuration **********

/// The options governing one report computation.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct ReportOptions {
    /// Compute and display the change against the prior-period averages
    /// when the input carries them.
    pub compare_with_prior: bool,
}

impl ReportOptions {
    pub const DEFAULT_OPTIONS: ReportOptions = ReportOptions {
        compare_with_prior: true,
    };
}
