//! Time-to-rendezvous statistics.

/// Collects TTR samples of successful trials.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TtrMonitor {
    values: Vec<u64>,
}

impl TtrMonitor {
    /// Create an empty monitor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one sample.
    pub fn tally(&mut self, ttr: u64) {
        self.values.push(ttr);
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Samples in recording order.
    pub fn values(&self) -> &[u64] {
        &self.values
    }

    /// Drop all samples.
    pub fn reset(&mut self) {
        self.values.clear();
    }

    /// Smallest sample.
    pub fn min(&self) -> Option<u64> {
        self.values.iter().copied().min()
    }

    /// Largest sample.
    pub fn max(&self) -> Option<u64> {
        self.values.iter().copied().max()
    }

    /// Arithmetic mean.
    #[allow(clippy::cast_precision_loss)]
    pub fn mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        let sum: f64 = self.values.iter().map(|&v| v as f64).sum();
        Some(sum / self.values.len() as f64)
    }

    /// Population variance (divides by `n`).
    #[allow(clippy::cast_precision_loss)]
    pub fn variance(&self) -> Option<f64> {
        let mean = self.mean()?;
        let squares: f64 = self.values.iter().map(|&v| (v as f64 - mean).powi(2)).sum();
        Some(squares / self.values.len() as f64)
    }

    /// Population standard deviation.
    pub fn std_dev(&self) -> Option<f64> {
        self.variance().map(f64::sqrt)
    }
}
