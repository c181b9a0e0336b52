//! Output of the summed-rate mode: a whitespace-delimited table with header
//! `t <species>` and one `time net_rate` row per timestep.
use crate::Rates::errors::RateResult;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};

pub const DEFAULT_SUMMED_RATE_FILE: &str = "temp_total_rates";

pub fn write_summed_rate(file_name: &str, species: &str, net: &[(f64, f64)]) -> RateResult<()> {
    let mut out = BufWriter::new(File::create(file_name)?);
    writeln!(out, "t {}", species)?;
    for (time, rate) in net {
        writeln!(out, "{} {:e}", time, rate)?;
    }
    out.flush()?;
    info!("Summed net rate of {} written to '{}'", species, file_name);
    Ok(())
}
