// Primitives shared by the spreadsheet readers.

use std::collections::HashMap;
use std::path::Path;

use log::debug;

use likert_report::{ColumnScheme, NUM_BUCKETS};

use crate::report::*;

/// The resolved layout of a survey sheet: where each semantic column
/// lives in the raw header.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ResolvedColumns {
    pub scheme: ColumnScheme,
    /// Column index of each bucket, in semantic order from
    /// strongly-disagree to strongly-agree.
    pub bucket_columns: [usize; NUM_BUCKETS],
    pub prior_column: Option<usize>,
}

/// Given the header of a sheet (names of each of the columns), detects
/// the naming vocabulary and finds the column position of every bucket.
///
/// The existence check is order-independent; the semantic mapping is by
/// name. The first column always holds the question text and takes no
/// part in the resolution.
pub fn resolve_columns(header: &[Option<String>]) -> ReportResult<ResolvedColumns> {
    let names: Vec<String> = header.iter().filter_map(|x| x.clone()).collect();
    let scheme = ColumnScheme::detect(&names).context(MissingLikertColumnsSnafu {})?;

    let col_names: HashMap<String, usize> = header
        .iter()
        .enumerate()
        .filter_map(|(idx, x)| x.as_ref().map(|s| (s.clone(), idx)))
        .collect();
    debug!("resolve_columns: scheme: {:?} col_names: {:?}", scheme, col_names);

    let mut bucket_columns = [0usize; NUM_BUCKETS];
    for (pos, label) in scheme.bucket_labels().iter().enumerate() {
        let idx = col_names
            .get(*label)
            .context(MissingLikertColumnsSnafu {})?;
        bucket_columns[pos] = *idx;
    }

    let prior_column = scheme
        .prior_labels()
        .iter()
        .find_map(|label| col_names.get(*label).cloned());

    Ok(ResolvedColumns {
        scheme,
        bucket_columns,
        prior_column,
    })
}

/// Parses a response count from cell text. Excel exports routinely
/// render integers as "42.0", so whole floats are accepted.
pub fn parse_count(question: &str, column: &str, content: &str) -> ReportResult<u64> {
    let trimmed = content.trim();
    if let Ok(x) = trimmed.parse::<u64>() {
        return Ok(x);
    }
    match trimmed.parse::<f64>() {
        Ok(f) if f >= 0.0 && f.fract() == 0.0 => Ok(f as u64),
        _ => BadCountCellSnafu {
            question,
            column,
            content: trimmed,
        }
        .fail(),
    }
}

/// Parses a prior-period average from cell text.
pub fn parse_prior(question: &str, content: &str) -> ReportResult<f64> {
    let trimmed = content.trim();
    match trimmed.parse::<f64>() {
        Ok(f) => Ok(f),
        Err(_) => BadPriorCellSnafu {
            question,
            content: trimmed,
        }
        .fail(),
    }
}

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}
