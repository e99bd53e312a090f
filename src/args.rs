use clap::Parser;

/// This is a Likert-scale survey visualization program.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The spreadsheet containing the survey responses (.xlsx or .csv).
    /// The first column holds the question text, followed by the 5 Likert response
    /// columns (German or English labels) and an optional prior-average column.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default: inferred from the file extension) The type of the input: xlsx or csv.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// When using an Excel file, indicates the name of the worksheet to use. Defaults
    /// to the first worksheet of the workbook.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the report will be written in JSON
    /// format to the given location instead of the standard output.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// If passed as an argument, the comparison against the prior-period averages is
    /// skipped even when the input carries them. The questions are then sorted by
    /// their average instead of their change.
    #[clap(long, takes_value = false)]
    pub hide_previous: bool,

    /// (file path) If specified, an example survey spreadsheet in CSV format is
    /// written to the given location and the program exits. Useful as a template
    /// for the expected input schema.
    #[clap(long, value_parser)]
    pub sample: Option<String>,

    /// (file path) A reference report in JSON format. If provided, likertviz will
    /// check that the produced document matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
