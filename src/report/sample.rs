// The reference example survey, offered to users as a format template.

use log::info;

use likert_report::{QuestionRow, CANONICAL_BUCKET_LABELS, CANONICAL_PRIOR_LABEL};

use crate::report::*;

/// Header of the question column in the sample file.
const QUESTION_LABEL: &str = "Frage";

/// The example survey: 7 product questions with plausible response
/// distributions and the averages of a previous survey round.
pub fn example_rows() -> Vec<QuestionRow> {
    let data: [(&str, [u64; 5], f64); 7] = [
        (
            "Q1: Das Produkt ist einfach zu benutzen",
            [5, 8, 15, 42, 30],
            3.42,
        ),
        (
            "Q2: Die Benutzeroberfläche ist intuitiv",
            [8, 12, 22, 35, 23],
            3.65,
        ),
        (
            "Q3: Der Kundensupport ist hilfreich",
            [3, 7, 12, 38, 40],
            3.70,
        ),
        (
            "Q4: Das Produkt bietet einen guten Wert",
            [10, 18, 30, 25, 17],
            3.27,
        ),
        (
            "Q5: Ich würde dieses Produkt empfehlen",
            [7, 13, 20, 31, 29],
            3.20,
        ),
        (
            "Q6: Updates verbessern das Produkt",
            [9, 15, 28, 26, 22],
            3.75,
        ),
        (
            "Q7: Das Produkt erfüllt meine Bedürfnisse",
            [6, 9, 15, 35, 35],
            3.50,
        ),
    ];

    data.iter()
        .map(|(question, counts, prior)| QuestionRow {
            question: question.to_string(),
            counts: *counts,
            prior_average: Some(*prior),
        })
        .collect()
}

/// Writes the example survey under the canonical (German) header, so a
/// round trip through the csv reader reproduces the schema.
pub fn write_sample_csv(path: &str) -> ReportResult<()> {
    let mut writer = csv::Writer::from_path(path).context(CsvWriteSnafu { path })?;

    let mut header: Vec<String> = vec![QUESTION_LABEL.to_string()];
    header.extend(CANONICAL_BUCKET_LABELS.iter().map(|s| s.to_string()));
    header.push(CANONICAL_PRIOR_LABEL.to_string());
    writer.write_record(&header).context(CsvWriteSnafu { path })?;

    for row in example_rows() {
        let mut record: Vec<String> = vec![row.question.clone()];
        record.extend(row.counts.iter().map(|c| c.to_string()));
        if let Some(prior) = row.prior_average {
            record.push(format!("{:.2}", prior));
        }
        writer.write_record(&record).context(CsvWriteSnafu { path })?;
    }
    writer.flush().context(WritingOutputSnafu { path })?;

    info!("write_sample_csv: wrote the example survey to {}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_rows_are_well_formed() {
        let rows = example_rows();
        assert_eq!(rows.len(), 7);
        for row in rows.iter() {
            let total: u64 = row.counts.iter().sum();
            assert_eq!(total, 100);
            let prior = row.prior_average.unwrap();
            assert!((1.0..=5.0).contains(&prior));
        }
    }
}
