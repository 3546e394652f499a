//! Flat result table rows.
//!
//! One tab-separated row per algorithm, in the column order of [`HEADER`].
//! Rows from many runs can be concatenated into a single table for plotting.

use std::fmt;

use rendezvous_core::Algorithm;

use crate::stats::TtrMonitor;

/// Column header for report rows.
pub const HEADER: &str = "#alg\tM\tG\tnum_it\tnum_ok\tnum_nok\tTTRmin\tTTRmean\tTTRmax\tTTRstd";

/// TTR summary over successful trials.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TtrSummary {
    /// Fastest rendezvous.
    pub min: u64,
    /// Mean time to rendezvous.
    pub mean: f64,
    /// Slowest rendezvous.
    pub max: u64,
    /// Population standard deviation.
    pub std_dev: f64,
}

impl TtrSummary {
    /// Summarize a monitor; `None` if it holds no samples.
    pub fn from_monitor(monitor: &TtrMonitor) -> Option<Self> {
        Some(Self {
            min: monitor.min()?,
            mean: monitor.mean()?,
            max: monitor.max()?,
            std_dev: monitor.std_dev()?,
        })
    }
}

/// Outcome of all iterations for one algorithm.
#[derive(Debug, Clone, PartialEq)]
pub struct AlgorithmReport {
    /// Algorithm evaluated.
    pub algorithm: Algorithm,
    /// Pool size `M`.
    pub num_channels: u32,
    /// Common channels `G`.
    pub overlap: u32,
    /// Trials run.
    pub iterations: u32,
    /// Trials that reached rendezvous.
    pub succeeded: usize,
    /// Trials that hit the slot limit.
    pub failed: usize,
    /// Statistics over successful trials.
    pub ttr: Option<TtrSummary>,
}

#[allow(clippy::cast_precision_loss)]
impl fmt::Display for AlgorithmReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(ttr) = self.ttr else {
            return f.write_str("No statistics collected.");
        };
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{:.2}\t{:.2}\t{:.2}\t{:.2}",
            self.algorithm,
            self.num_channels,
            self.overlap,
            self.iterations,
            self.succeeded,
            self.failed,
            ttr.min as f64,
            ttr.mean,
            ttr.max as f64,
            ttr.std_dev,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(ttr: Option<TtrSummary>) -> AlgorithmReport {
        AlgorithmReport {
            algorithm: Algorithm::JumpStay,
            num_channels: 40,
            overlap: 5,
            iterations: 1000,
            succeeded: 998,
            failed: 2,
            ttr,
        }
    }

    #[test]
    fn row_format() {
        let ttr = TtrSummary { min: 1, mean: 37.25, max: 402, std_dev: 12.5 };
        assert_eq!(
            report(Some(ttr)).to_string(),
            "jumpstay\t40\t5\t1000\t998\t2\t1.00\t37.25\t402.00\t12.50"
        );
    }

    #[test]
    fn row_without_successes() {
        assert_eq!(report(None).to_string(), "No statistics collected.");
    }

    #[test]
    fn header_matches_row_columns() {
        let ttr = TtrSummary { min: 1, mean: 1.0, max: 1, std_dev: 0.0 };
        let row = report(Some(ttr)).to_string();
        assert_eq!(HEADER.split('\t').count(), row.split('\t').count());
    }

    #[test]
    fn summary_from_empty_monitor() {
        assert_eq!(TtrSummary::from_monitor(&TtrMonitor::new()), None);
    }
}
