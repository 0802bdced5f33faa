use std::time::{Duration, Instant};

/// Runs `f` once and returns its output together with the elapsed wall-clock time.
///
/// # Example
///
/// ```
/// use jpegbench::timing::time_it;
///
/// let (value, elapsed) = time_it(|| 21 * 2);
/// assert_eq!(value, 42);
/// assert!(elapsed.as_secs_f64() >= 0.0);
/// ```
pub fn time_it<R>(f: impl FnOnce() -> R) -> (R, Duration) {
    let start = Instant::now();
    let res = f();
    (res, start.elapsed())
}

/// Converts a duration to fractional milliseconds.
#[inline]
pub fn as_millis_f64(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1e3
}

/// The timing samples of one decoding path, in execution order.
#[derive(Clone, Debug, Default)]
pub struct TimingSamples {
    samples: Vec<Duration>,
}

impl TimingSamples {
    /// Creates an empty set of samples with room for `capacity` runs.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
        }
    }

    /// Adds the duration of one run.
    pub fn push(&mut self, elapsed: Duration) {
        self.samples.push(elapsed);
    }

    /// Sum of all recorded durations.
    pub fn total(&self) -> Duration {
        self.samples.iter().sum()
    }

    /// Arithmetic mean of the recorded durations, zero when empty.
    pub fn mean(&self) -> Duration {
        mean_duration(self.total(), self.samples.len())
    }

    /// Consumes the samples and returns the durations.
    pub fn into_vec(self) -> Vec<Duration> {
        self.samples
    }
}

/// `total / n` without truncating `n` to the `u32` divisor `Duration` takes.
fn mean_duration(total: Duration, n: usize) -> Duration {
    match u32::try_from(n) {
        Ok(0) => Duration::ZERO,
        Ok(n) => total / n,
        Err(_) => Duration::from_secs_f64(total.as_secs_f64() / n as f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_samples() {
        let mut samples = TimingSamples::with_capacity(3);
        assert_eq!(samples.mean(), Duration::ZERO);

        samples.push(Duration::from_millis(10));
        samples.push(Duration::from_millis(20));
        samples.push(Duration::from_millis(30));

        assert_eq!(samples.total(), Duration::from_millis(60));
        assert_eq!(samples.mean(), Duration::from_millis(20));
        assert_eq!(samples.into_vec()[1], Duration::from_millis(20));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn mean_beyond_u32_runs() {
        let n = u32::MAX as usize + 1;
        let total = Duration::from_secs(n as u64);
        let mean = mean_duration(total, n);
        assert!((mean.as_secs_f64() - 1.0).abs() < 1e-6);
        assert_eq!(mean_duration(Duration::from_secs(1), 0), Duration::ZERO);
    }

    #[test]
    fn millis_conversion() {
        assert!((as_millis_f64(Duration::from_micros(2500)) - 2.5).abs() < 1e-9);
        assert_eq!(as_millis_f64(Duration::ZERO), 0.0);
    }

    #[test]
    fn time_it_measures() {
        let (_, elapsed) = time_it(|| std::thread::sleep(Duration::from_millis(2)));
        assert!(elapsed >= Duration::from_millis(2));
    }
}
