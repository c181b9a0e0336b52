//! Start/end time selection. Bounds are resolved once against the time axis by
//! nearest match and then applied as an inclusive index slice to every series.
use super::errors::{RateError, RateResult};
use super::rate_reader::RateTable;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TimeBound {
    Start,
    End,
    At(f64),
}

impl FromStr for TimeBound {
    type Err = RateError;

    fn from_str(arg: &str) -> Result<Self, Self::Err> {
        let arg = arg.trim();
        if arg.eq_ignore_ascii_case("start") {
            return Ok(TimeBound::Start);
        }
        if arg.eq_ignore_ascii_case("end") {
            return Ok(TimeBound::End);
        }
        match arg.parse::<f64>() {
            Ok(t) if t.is_finite() => Ok(TimeBound::At(t)),
            _ => Err(RateError::Usage(format!(
                "time bound '{}' must be numeric, 'START' or 'END'",
                arg
            ))),
        }
    }
}

/// Inclusive index range into the time axis. `END` keeps the last timestep, unlike an
/// exclusive `[start:end]` slice with `end = -1`, which would drop it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: usize,
    pub end: usize,
}

/// index of the timestamp closest to `t`; ties go to the earlier timestamp
fn nearest_index(times: &[f64], t: f64) -> usize {
    let mut best = 0;
    for (i, time) in times.iter().enumerate() {
        if (time - t).abs() < (times[best] - t).abs() {
            best = i;
        }
    }
    best
}

impl TimeWindow {
    pub fn resolve(times: &[f64], start: TimeBound, end: TimeBound) -> RateResult<Self> {
        if times.is_empty() {
            return Err(RateError::Usage(
                "cannot select a time window on an empty time axis".to_string(),
            ));
        }
        let index = |bound: TimeBound| match bound {
            TimeBound::Start => 0,
            TimeBound::End => times.len() - 1,
            TimeBound::At(t) => nearest_index(times, t),
        };
        let window = TimeWindow {
            start: index(start),
            end: index(end),
        };
        if window.start > window.end {
            return Err(RateError::Usage(format!(
                "start time {} lies after end time {}",
                times[window.start], times[window.end]
            )));
        }
        Ok(window)
    }

    pub fn full(times: &[f64]) -> RateResult<Self> {
        Self::resolve(times, TimeBound::Start, TimeBound::End)
    }

    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn slice<'a>(&self, series: &'a [f64]) -> &'a [f64] {
        &series[self.start..=self.end]
    }
}

impl RateTable {
    /// copy of the table restricted to `window`
    pub fn windowed(&self, window: &TimeWindow) -> RateResult<RateTable> {
        self.check_alignment()?;
        if window.end >= self.times.len() {
            return Err(RateError::UnalignedSeries(format!(
                "window ends at index {} but the time axis has {} steps",
                window.end,
                self.times.len()
            )));
        }
        let mut sliced = RateTable::new(self.direction, window.slice(&self.times).to_vec());
        for (species, rates) in &self.species {
            let rates = rates
                .iter()
                .map(|(number, series)| (*number, window.slice(series).to_vec()))
                .collect();
            sliced.species.insert(species.clone(), rates);
        }
        Ok(sliced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rates::errors::Direction;
    use indexmap::IndexMap;

    #[test]
    fn test_parse_bounds() {
        assert_eq!("START".parse::<TimeBound>().unwrap(), TimeBound::Start);
        assert_eq!("end".parse::<TimeBound>().unwrap(), TimeBound::End);
        assert_eq!("3600".parse::<TimeBound>().unwrap(), TimeBound::At(3600.0));
        assert!("noon".parse::<TimeBound>().is_err());
    }

    #[test]
    fn test_nearest_match_and_clamping() {
        let times = vec![0.0, 600.0, 1200.0, 1800.0];
        let window = TimeWindow::resolve(&times, TimeBound::At(650.0), TimeBound::At(1e9)).unwrap();
        assert_eq!(window, TimeWindow { start: 1, end: 3 });
        let window = TimeWindow::resolve(&times, TimeBound::At(-50.0), TimeBound::At(900.0)).unwrap();
        assert_eq!(window, TimeWindow { start: 0, end: 1 });
        assert_eq!(window.len(), 2);
        assert!(TimeWindow::resolve(&times, TimeBound::End, TimeBound::Start).is_err());
        assert!(TimeWindow::resolve(&[], TimeBound::Start, TimeBound::End).is_err());
    }

    #[test]
    fn test_windowed_table() {
        let mut table = RateTable::new(Direction::Production, vec![0.0, 1.0, 2.0, 3.0]);
        let mut rates = IndexMap::new();
        rates.insert(4, vec![1.0, 2.0, 3.0, 4.0]);
        table.species.insert("O3".to_string(), rates);
        let window = TimeWindow::resolve(&table.times, TimeBound::At(1.0), TimeBound::End).unwrap();
        let sliced = table.windowed(&window).unwrap();
        assert_eq!(sliced.times, vec![1.0, 2.0, 3.0]);
        assert_eq!(sliced.get("O3", 4), Some(&vec![2.0, 3.0, 4.0]));
    }
}
