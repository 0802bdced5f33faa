use std::{fmt, io::Write, path::PathBuf, time::Duration};

use jpegbench_image::metrics::DiffStats;
use jpegbench_io::JpegInfo;

use crate::{strategy::Strategy, timing::as_millis_f64};

/// Width of the separator lines in the report.
pub const RULE_WIDTH: usize = 80;

/// The timing result of one decoding path.
#[derive(Clone, Debug)]
pub struct BenchRecord {
    /// The decoding path.
    pub strategy: Strategy,
    /// Duration of every run, in execution order.
    pub samples: Vec<Duration>,
    /// Arithmetic mean of the runs.
    pub mean: Duration,
}

/// The difference between the reference decode and another decoding path.
#[derive(Clone, Copy, Debug)]
pub struct DiffRecord {
    /// The decoding path compared against the reference.
    pub strategy: Strategy,
    /// Absolute difference statistics.
    pub stats: DiffStats,
}

/// One row of the ranking table.
#[derive(Clone, Debug)]
pub struct RankedRecord {
    /// 1-based position, fastest first.
    pub rank: usize,
    /// The decoding path.
    pub strategy: Strategy,
    /// Mean duration of the path.
    pub mean: Duration,
    /// `reference_mean / mean`; exactly `1.0` for the reference itself.
    pub speedup: f64,
}

impl RankedRecord {
    /// Medal marker printed in front of the first three rows.
    pub fn marker(&self) -> &'static str {
        match self.rank {
            1 => "[1st]",
            2 => "[2nd]",
            3 => "[3rd]",
            _ => "     ",
        }
    }
}

/// Speed of a decoding path relative to the reference.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Speed {
    /// Faster by the given factor.
    Faster(f64),
    /// Slower by the given factor.
    Slower(f64),
    /// Same mean duration.
    Same,
}

impl Speed {
    /// Classifies a `reference_mean / mean` ratio.
    pub fn from_speedup(speedup: f64) -> Self {
        if speedup > 1.0 {
            Speed::Faster(speedup)
        } else if speedup < 1.0 {
            Speed::Slower(1.0 / speedup)
        } else {
            Speed::Same
        }
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Speed::Faster(x) => format!("{:.2}x faster", x),
            Speed::Slower(x) => format!("{:.2}x slower", x),
            Speed::Same => "same".to_string(),
        };
        // pad the label so that it lines up in the ranking table
        f.pad(&label)
    }
}

/// Summary of the buffer reuse scenario.
#[derive(Clone, Copy, Debug)]
pub struct ReuseSummary {
    /// Number of decodes that completed successfully.
    pub completions: usize,
    /// Total time of all iterations.
    pub total: Duration,
    /// Mean time per decode.
    pub mean: Duration,
    /// Whether the buffer storage address was the same after every iteration.
    pub same_storage: bool,
}

impl ReuseSummary {
    /// Decoded images per second.
    pub fn throughput(&self) -> f64 {
        let secs = self.total.as_secs_f64();
        if secs > 0.0 {
            self.completions as f64 / secs
        } else {
            f64::INFINITY
        }
    }
}

/// Cost of the one-time decode and save that precedes the array load path.
#[derive(Clone, Debug)]
pub struct ArraySummary {
    /// Where the array file was written.
    pub path: PathBuf,
    /// Time spent writing the array file.
    pub save_time: Duration,
    /// Size of the array file.
    pub num_bytes: u64,
}

/// Everything measured in one benchmark run.
#[derive(Clone, Debug)]
pub struct BenchReport {
    /// The benchmarked image.
    pub image_path: PathBuf,
    /// Header information of the image.
    pub info: JpegInfo,
    /// Size of the image file.
    pub file_bytes: u64,
    /// The array file side artifact.
    pub array: ArraySummary,
    /// Timing results, in execution order.
    pub records: Vec<BenchRecord>,
    /// Differences against the reference decode.
    pub diffs: Vec<DiffRecord>,
    /// The buffer reuse scenario.
    pub reuse: ReuseSummary,
    /// Timing results sorted fastest first.
    pub ranking: Vec<RankedRecord>,
}

impl BenchReport {
    /// The timing record of a strategy.
    pub fn record(&self, strategy: Strategy) -> Option<&BenchRecord> {
        self.records.iter().find(|r| r.strategy == strategy)
    }

    /// The difference of a strategy against the reference decode.
    pub fn diff(&self, strategy: Strategy) -> Option<&DiffStats> {
        self.diffs
            .iter()
            .find(|d| d.strategy == strategy)
            .map(|d| &d.stats)
    }

    /// The fastest strategy.
    pub fn best(&self) -> Option<&RankedRecord> {
        self.ranking.first()
    }

    /// Mean duration of a strategy, zero if it was not measured.
    pub fn mean(&self, strategy: Strategy) -> Duration {
        self.record(strategy).map_or(Duration::ZERO, |r| r.mean)
    }
}

/// Ratio `baseline / mean`, infinite when `mean` is zero.
pub fn speedup(baseline: Duration, mean: Duration) -> f64 {
    if mean.is_zero() {
        f64::INFINITY
    } else {
        baseline.as_secs_f64() / mean.as_secs_f64()
    }
}

/// Sorts the records by mean duration, fastest first.
///
/// The sort is stable, so paths with the same mean keep their execution order.
pub fn rank(records: &[BenchRecord], baseline: Duration) -> Vec<RankedRecord> {
    let mut sorted = records.iter().collect::<Vec<_>>();
    sorted.sort_by_key(|r| r.mean);

    sorted
        .into_iter()
        .enumerate()
        .map(|(i, r)| RankedRecord {
            rank: i + 1,
            strategy: r.strategy,
            mean: r.mean,
            speedup: if r.strategy.is_baseline() {
                1.0
            } else {
                speedup(baseline, r.mean)
            },
        })
        .collect()
}

/// Writes a full-width separator line.
pub fn write_rule(out: &mut impl Write, c: char) -> std::io::Result<()> {
    writeln!(out, "{}", c.to_string().repeat(RULE_WIDTH))
}

/// Writes a section title framed by separator lines.
pub fn write_section(out: &mut impl Write, title: &str) -> std::io::Result<()> {
    writeln!(out)?;
    write_rule(out, '=')?;
    writeln!(out, "{}", title)?;
    write_rule(out, '=')
}

/// Writes the ranking table.
pub fn write_ranking(out: &mut impl Write, ranking: &[RankedRecord]) -> std::io::Result<()> {
    writeln!(out, "\nAll decoding paths, fastest first:")?;
    write_rule(out, '-')?;
    writeln!(
        out,
        "{:<6} {:<4} {:<30} {:<15} {:<15}",
        "", "Rank", "Method", "Time (ms)", "vs reference"
    )?;
    write_rule(out, '-')?;
    for row in ranking {
        writeln!(
            out,
            "{:<6} {:<4} {:<30} {:<15.2} {:<15}",
            row.marker(),
            row.rank,
            row.strategy.name(),
            as_millis_f64(row.mean),
            Speed::from_speedup(row.speedup),
        )?;
    }
    write_rule(out, '-')
}

/// Writes the best path and the recommended use case of every path.
pub fn write_conclusion(out: &mut impl Write, report: &BenchReport) -> std::io::Result<()> {
    write_section(out, "Conclusion")?;

    let reference = report.mean(Strategy::Reference);
    let ms = |s: Strategy| as_millis_f64(report.mean(s));
    let vs_reference = |s: Strategy| Speed::from_speedup(speedup(reference, report.mean(s)));
    let max_diff = |s: Strategy| report.diff(s).map_or(0.0, |d| d.max);

    if let Some(best) = report.best() {
        writeln!(out, "\nBest method: {}", best.strategy)?;
        writeln!(out, "Time: {:.2} ms", as_millis_f64(best.mean))?;
        writeln!(out, "vs reference: {}", Speed::from_speedup(best.speedup))?;
    }

    writeln!(out, "\nRecommended use cases:\n")?;

    writeln!(out, "0. [fastest] pre-decode + array load:")?;
    writeln!(out, "   -> decode once and store the samples as an image array")?;
    writeln!(
        out,
        "   -> first time: decode {:.0} ms + save {:.0} ms",
        ms(Strategy::ZeroCopy),
        as_millis_f64(report.array.save_time)
    )?;
    writeln!(
        out,
        "   -> afterwards: array load {:.2} ms ({})",
        ms(Strategy::ArrayLoad),
        vs_reference(Strategy::ArrayLoad)
    )?;
    writeln!(
        out,
        "   -> cost: {:.0} MB of storage",
        report.array.num_bytes as f64 / 1024.0 / 1024.0
    )?;
    writeln!(out, "   -> fits: fixed datasets that are read repeatedly\n")?;

    writeln!(out, "1. video streams / continuous processing:")?;
    writeln!(out, "   -> zero-copy + buffer reuse")?;
    writeln!(
        out,
        "   -> {:.2} ms/image, {:.2} images/s",
        as_millis_f64(report.reuse.mean),
        report.reuse.throughput()
    )?;
    writeln!(out, "   -> avoids a new allocation for every frame\n")?;

    writeln!(out, "2. single image decode:")?;
    writeln!(out, "   -> zero-copy decode_into()")?;
    writeln!(out, "   -> {:.2} ms", ms(Strategy::ZeroCopy))?;
    writeln!(
        out,
        "   -> {}, max_diff={}\n",
        vs_reference(Strategy::ZeroCopy),
        max_diff(Strategy::ZeroCopy)
    )?;

    writeln!(out, "3. speed over fidelity:")?;
    writeln!(out, "   -> fast decode_fast(), libjpeg fast integer IDCT")?;
    let vs_copying = speedup(report.mean(Strategy::Copying), report.mean(Strategy::Fast));
    writeln!(
        out,
        "   -> {:.2} ms, {} vs copying decode",
        ms(Strategy::Fast),
        Speed::from_speedup(vs_copying)
    )?;
    writeln!(
        out,
        "   -> quality loss: max_diff={}\n",
        max_diff(Strategy::Fast)
    )?;

    writeln!(out, "4. simple usage:")?;
    writeln!(out, "   -> copying decode()")?;
    writeln!(out, "   -> {:.2} ms", ms(Strategy::Copying))?;
    writeln!(out, "   -> returns a new image, easiest to use\n")?;

    writeln!(out, "5. fallback:")?;
    writeln!(out, "   -> image crate")?;
    writeln!(out, "   -> {:.2} ms", ms(Strategy::Reference))?;

    Ok(())
}
