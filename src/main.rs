mod args;
mod report;

use clap::Parser;
use log::info;
use snafu::{whatever, ErrorCompat};

use crate::args::Args;
use crate::report::{run_report, sample, ReportRequest, ReportResult};

fn main() {
    let args = Args::parse();

    let mut log_builder = env_logger::Builder::from_default_env();
    if args.verbose {
        log_builder.filter_level(log::LevelFilter::Debug);
    }
    log_builder.init();

    info!("args: {:?}", args);

    if let Err(e) = run(&args) {
        eprintln!("An error occured: {}", e);
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            eprintln!("trace: {}", bt);
        }
        std::process::exit(1);
    }
}

fn run(args: &Args) -> ReportResult<()> {
    if let Some(sample_path) = &args.sample {
        return sample::write_sample_csv(sample_path);
    }

    let input = match &args.input {
        Some(x) => x.clone(),
        None => whatever!(
            "No input file provided. Use --input to point at a survey spreadsheet, \
             or --sample to generate an example file."
        ),
    };

    let request = ReportRequest {
        input,
        input_type: args.input_type.clone(),
        worksheet_name: args.excel_worksheet_name.clone(),
        show_previous: !args.hide_previous,
        out: args.out.clone(),
        reference: args.reference.clone(),
    };
    run_report(&request)
}
