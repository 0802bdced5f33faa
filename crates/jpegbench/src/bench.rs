use std::{
    io::Write,
    path::{Path, PathBuf},
};

use jpegbench_image::{metrics::abs_diff, Image};
use jpegbench_io::{
    array::{array_path_for, read_image_array, write_image_array},
    reference::read_image_reference,
    IoError, JpegDecoder, JpegInfo,
};

use crate::{
    error::BenchError,
    report::{
        rank, write_conclusion, write_ranking, write_section, ArraySummary, BenchRecord,
        BenchReport, DiffRecord, ReuseSummary,
    },
    strategy::Strategy,
    timing::{as_millis_f64, time_it, TimingSamples},
};

/// Parameters of a benchmark run.
#[derive(Clone, Debug)]
pub struct BenchConfig {
    /// The JPEG image to decode.
    pub image_path: PathBuf,
    /// Repetitions of every decoding path except the buffer reuse scenario.
    pub num_runs: usize,
    /// Iterations of the buffer reuse scenario.
    pub num_reuse_runs: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            image_path: PathBuf::from("test.jpg"),
            num_runs: 5,
            num_reuse_runs: 10,
        }
    }
}

/// Runs every decoding path on the configured image and writes the report to `out`.
///
/// The array file side artifact is written next to the image, see
/// [`jpegbench_io::array::array_path_for`].
///
/// # Arguments
///
/// * `config` - The image and the number of repetitions.
/// * `out` - Destination of the human readable report.
///
/// # Returns
///
/// Everything that was measured, including the ranking.
pub fn run_benchmark(
    config: &BenchConfig,
    out: &mut impl Write,
) -> Result<BenchReport, BenchError> {
    if !config.image_path.exists() {
        return Err(BenchError::ImageNotFound(config.image_path.clone()));
    }

    for num_runs in [config.num_runs, config.num_reuse_runs] {
        if num_runs == 0 {
            return Err(BenchError::InvalidRunCount(num_runs));
        }
    }

    let decoder = JpegDecoder::new();
    let info = decoder.read_info(&config.image_path)?;

    log::info!(
        "benchmarking {} ({}, {} channels)",
        config.image_path.display(),
        info.size,
        info.channels
    );

    match info.channels {
        1 => run_with::<1>(config, &decoder, info, out),
        3 => run_with::<3>(config, &decoder, info, out),
        c => Err(BenchError::UnsupportedChannels(c)),
    }
}

fn run_with<const C: usize>(
    config: &BenchConfig,
    decoder: &JpegDecoder,
    info: JpegInfo,
    out: &mut impl Write,
) -> Result<BenchReport, BenchError> {
    let image_path = config.image_path.as_path();
    let num_runs = config.num_runs;
    let file_bytes = std::fs::metadata(image_path).map_err(IoError::from)?.len();

    write_section(out, "JPEG decoding performance comparison")?;
    writeln!(out, "\nTest image: {}", image_path.display())?;
    writeln!(out, "File size: {:.2} KB", file_bytes as f64 / 1024.0)?;
    writeln!(
        out,
        "Image size: {} x {} x {}",
        info.size.width, info.size.height, C
    )?;
    writeln!(
        out,
        "Decoded size: {:.2} MB",
        (info.size.width * info.size.height * C) as f64 / 1024.0 / 1024.0
    )?;

    // pre-step: decode once and store the samples for the array load path
    write_section(out, "Pre-step: decode and save as an image array")?;
    let mut buffer_save = Image::<u8, C>::from_size_val(info.size, 0)?;
    decoder.decode_into(image_path, &mut buffer_save)?;

    let array_path = array_path_for(image_path);
    let (num_bytes, save_time) = time_it(|| write_image_array(&array_path, &buffer_save));
    let array = ArraySummary {
        path: array_path,
        save_time,
        num_bytes: num_bytes? as u64,
    };
    log::info!("wrote image array to {}", array.path.display());

    writeln!(
        out,
        "\nSaved to {}: {:.2} ms",
        array.path.display(),
        as_millis_f64(array.save_time)
    )?;
    writeln!(
        out,
        "Array file size: {:.2} MB",
        array.num_bytes as f64 / 1024.0 / 1024.0
    )?;

    let mut records = Vec::with_capacity(Strategy::ALL.len());

    write_section(out, "Test 0: array load (lower bound)")?;
    let (img_array, record) = measure(out, Strategy::ArrayLoad, num_runs, || {
        Ok(read_image_array::<C>(&array.path)?)
    })?;
    write_shape(out, &img_array)?;
    records.push(record);

    write_section(out, "Test 1: image crate decode (reference)")?;
    let (img_reference, record) = measure(out, Strategy::Reference, num_runs, || {
        Ok(read_image_reference::<C>(image_path)?)
    })?;
    write_shape(out, &img_reference)?;
    let baseline = record.mean;
    records.push(record);

    write_section(out, "Test 2: zero-copy decode into a caller supplied buffer")?;
    let mut buffer = Image::<u8, C>::from_size_val(info.size, 0)?;
    let ((), record) = measure(out, Strategy::ZeroCopy, num_runs, || {
        Ok(decoder.decode_into(image_path, &mut buffer)?)
    })?;
    write_shape(out, &buffer)?;
    records.push(record);

    write_section(out, "Test 3: copying decode")?;
    let (img_copy, record) = measure(out, Strategy::Copying, num_runs, || {
        Ok(decoder.decode::<C>(image_path)?)
    })?;
    write_shape(out, &img_copy)?;
    records.push(record);

    write_section(out, "Test 4: fast decode (reduced accuracy)")?;
    let (img_fast, record) = measure(out, Strategy::Fast, num_runs, || {
        Ok(decoder.decode_fast::<C>(image_path)?)
    })?;
    write_shape(out, &img_fast)?;
    records.push(record);

    write_section(
        out,
        &format!(
            "Test 5: zero-copy + buffer reuse ({} consecutive decodes)",
            config.num_reuse_runs
        ),
    )?;
    let mut buffer_reuse = Image::<u8, C>::from_size_val(info.size, 0)?;
    let (reuse, record) = measure_reuse(
        decoder,
        image_path,
        &mut buffer_reuse,
        config.num_reuse_runs,
    )?;
    writeln!(out, "  Total: {:.2} ms", as_millis_f64(reuse.total))?;
    writeln!(out, "  Mean: {:.2} ms/image", as_millis_f64(reuse.mean))?;
    writeln!(out, "  Throughput: {:.2} images/s", reuse.throughput())?;
    writeln!(
        out,
        "  Completed: {}/{}, same buffer: {}",
        reuse.completions,
        config.num_reuse_runs,
        if reuse.same_storage { "yes" } else { "no" }
    )?;
    records.push(record);

    write_section(out, "Correctness against the reference decode")?;
    let diffs = [
        (Strategy::ArrayLoad, &img_array),
        (Strategy::ZeroCopy, &buffer),
        (Strategy::Copying, &img_copy),
        (Strategy::Fast, &img_fast),
        (Strategy::ZeroCopyReuse, &buffer_reuse),
    ]
    .into_iter()
    .map(|(strategy, image)| -> Result<DiffRecord, BenchError> {
        Ok(DiffRecord {
            strategy,
            stats: abs_diff(&img_reference, image)?,
        })
    })
    .collect::<Result<Vec<_>, _>>()?;

    for diff in diffs.iter() {
        writeln!(
            out,
            "  {:<30} max_diff={}, mean_diff={:.4}",
            diff.strategy.name(),
            diff.stats.max,
            diff.stats.mean
        )?;
    }

    write_section(out, "Performance summary")?;
    let ranking = rank(&records, baseline);
    write_ranking(out, &ranking)?;

    let report = BenchReport {
        image_path: image_path.to_path_buf(),
        info,
        file_bytes,
        array,
        records,
        diffs,
        reuse,
        ranking,
    };

    write_conclusion(out, &report)?;

    if let Some(best) = report.best() {
        log::info!(
            "fastest path: {} ({:.2} ms)",
            best.strategy,
            as_millis_f64(best.mean)
        );
    }

    Ok(report)
}

/// Times `num_runs` invocations of `f` and prints every run.
///
/// Returns the output of the last invocation with the timing record.
fn measure<R>(
    out: &mut impl Write,
    strategy: Strategy,
    num_runs: usize,
    mut f: impl FnMut() -> Result<R, BenchError>,
) -> Result<(R, BenchRecord), BenchError> {
    let mut samples = TimingSamples::with_capacity(num_runs);
    let mut last = None;

    for i in 0..num_runs {
        let (result, elapsed) = time_it(&mut f);
        last = Some(result?);
        samples.push(elapsed);
        log::debug!("{} run {}: {:?}", strategy, i + 1, elapsed);
        writeln!(out, "  Run {}: {:.2} ms", i + 1, as_millis_f64(elapsed))?;
    }

    let mean = samples.mean();
    writeln!(out, "\n  {} mean: {:.2} ms", strategy, as_millis_f64(mean))?;

    let value = last.ok_or(BenchError::InvalidRunCount(num_runs))?;
    Ok((
        value,
        BenchRecord {
            strategy,
            samples: samples.into_vec(),
            mean,
        },
    ))
}

/// Decodes into the same buffer `num_runs` times and checks that its storage never moves.
fn measure_reuse<const C: usize>(
    decoder: &JpegDecoder,
    image_path: &Path,
    buffer: &mut Image<u8, C>,
    num_runs: usize,
) -> Result<(ReuseSummary, BenchRecord), BenchError> {
    let storage = buffer.as_ptr();
    let mut samples = TimingSamples::with_capacity(num_runs);
    let mut completions = 0;
    let mut same_storage = true;

    for _ in 0..num_runs {
        let (result, elapsed) = time_it(|| decoder.decode_into(image_path, &mut *buffer));
        result?;
        samples.push(elapsed);
        completions += 1;
        same_storage &= std::ptr::eq(buffer.as_ptr(), storage);
    }

    let total = samples.total();
    let mean = samples.mean();
    log::debug!(
        "buffer reuse: {} decodes in {:?}, same storage: {}",
        completions,
        total,
        same_storage
    );

    let summary = ReuseSummary {
        completions,
        total,
        mean,
        same_storage,
    };
    let record = BenchRecord {
        strategy: Strategy::ZeroCopyReuse,
        samples: samples.into_vec(),
        mean,
    };
    Ok((summary, record))
}

fn write_shape<const C: usize>(out: &mut impl Write, image: &Image<u8, C>) -> std::io::Result<()> {
    writeln!(
        out,
        "  Image shape: ({}, {}, {}), dtype: u8",
        image.height(),
        image.width(),
        image.num_channels()
    )
}
