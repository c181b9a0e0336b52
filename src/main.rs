use log::error;
use rates_analysis::Rates::errors::RateError;
use rates_analysis::cli::cli_main::run;
use rates_analysis::cli::usage_help::USAGE;
use std::process::exit;

pub fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = run(&args) {
        error!("{}", e);
        eprintln!("\x1b[31m{}\x1b[0m", e);
        if matches!(e, RateError::Usage(_)) {
            eprintln!("{}", USAGE);
        }
        exit(1);
    }
}
