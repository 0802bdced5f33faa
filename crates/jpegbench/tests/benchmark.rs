use std::path::{Path, PathBuf};
use std::process::Command;

use jpegbench::{run_benchmark, BenchConfig, BenchError, Strategy};
use jpegbench_image::Image;
use jpegbench_io::jpeg::{write_image_jpeg_gray8, write_image_jpeg_rgb8};

fn write_rgb_fixture(dir: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let (width, height) = (64, 48);
    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            data.push((x * 4) as u8);
            data.push((y * 5) as u8);
            data.push(((x + y) * 2) as u8);
        }
    }
    let file_path = dir.join("test.jpg");
    write_image_jpeg_rgb8(&file_path, &Image::new([width, height].into(), data)?, 90)?;
    Ok(file_path)
}

fn config_for(image_path: PathBuf) -> BenchConfig {
    BenchConfig {
        image_path,
        num_runs: 3,
        num_reuse_runs: 4,
    }
}

#[test]
fn benchmark_rgb_report() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempfile::tempdir()?;
    let image_path = write_rgb_fixture(tmp_dir.path())?;

    let mut out = Vec::new();
    let report = run_benchmark(&config_for(image_path), &mut out)?;

    assert_eq!(report.info.channels, 3);
    assert_eq!(report.records.len(), Strategy::ALL.len());

    for record in report.records.iter() {
        let ms = record.mean.as_secs_f64() * 1e3;
        assert!(ms.is_finite() && ms >= 0.0, "{}: {}", record.strategy, ms);
    }
    for strategy in Strategy::ALL {
        if strategy != Strategy::ZeroCopyReuse {
            assert_eq!(report.record(strategy).map(|r| r.samples.len()), Some(3));
        }
    }

    // ranking
    assert_eq!(report.ranking.len(), Strategy::ALL.len());
    assert!(report.ranking.windows(2).all(|w| w[0].mean <= w[1].mean));
    let reference = report
        .ranking
        .iter()
        .find(|r| r.strategy == Strategy::Reference)
        .ok_or("missing reference row")?;
    assert_eq!(reference.speedup, 1.0);

    // correctness
    for strategy in [
        Strategy::ArrayLoad,
        Strategy::ZeroCopy,
        Strategy::Copying,
        Strategy::ZeroCopyReuse,
    ] {
        let stats = report.diff(strategy).ok_or("missing diff")?;
        assert_eq!(stats.max, 0.0, "{}", strategy);
        assert_eq!(stats.mean, 0.0, "{}", strategy);
    }
    let fast = report.diff(Strategy::Fast).ok_or("missing diff")?;
    assert!(fast.max < 20.0, "fast max diff {}", fast.max);
    assert!(report.diff(Strategy::Reference).is_none());

    // buffer reuse
    assert_eq!(report.reuse.completions, 4);
    assert!(report.reuse.same_storage);

    // side artifact
    assert_eq!(report.array.path, tmp_dir.path().join("test.bin"));
    assert!(report.array.path.exists());
    assert_eq!(
        std::fs::metadata(&report.array.path)?.len(),
        report.array.num_bytes
    );

    let text = String::from_utf8(out)?;
    assert!(text.contains("Performance summary"));
    assert!(text.contains("Conclusion"));
    assert!(text.contains("[1st]"));
    assert!(text.contains("vs copying decode"));
    assert!(text.contains("Run 3:"));
    assert!(!text.contains("Run 4:"));
    for strategy in Strategy::ALL {
        assert!(text.contains(strategy.name()), "{}", strategy);
    }

    Ok(())
}

#[test]
fn benchmark_gray() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempfile::tempdir()?;
    let image_path = tmp_dir.path().join("gray.jpg");
    let data = (0..32 * 32).map(|i| (i % 251) as u8).collect::<Vec<_>>();
    write_image_jpeg_gray8(&image_path, &Image::new([32, 32].into(), data)?, 90)?;

    let report = run_benchmark(&config_for(image_path), &mut std::io::sink())?;

    assert_eq!(report.info.channels, 1);
    for strategy in [
        Strategy::ArrayLoad,
        Strategy::ZeroCopy,
        Strategy::Copying,
        Strategy::ZeroCopyReuse,
    ] {
        assert_eq!(report.diff(strategy).map(|d| d.max), Some(0.0), "{}", strategy);
    }
    let fast = report.diff(Strategy::Fast).ok_or("missing diff")?;
    assert!(fast.max < 20.0, "fast max diff {}", fast.max);
    Ok(())
}

#[test]
fn benchmark_missing_image() {
    let res = run_benchmark(
        &config_for(PathBuf::from("does_not_exist.jpg")),
        &mut std::io::sink(),
    );
    assert!(matches!(res, Err(BenchError::ImageNotFound(_))));
}

#[test]
fn benchmark_zero_runs() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempfile::tempdir()?;
    let image_path = write_rgb_fixture(tmp_dir.path())?;

    let config = BenchConfig {
        num_runs: 0,
        ..config_for(image_path)
    };
    let res = run_benchmark(&config, &mut std::io::sink());
    assert!(matches!(res, Err(BenchError::InvalidRunCount(0))));
    Ok(())
}

#[test]
fn cli_missing_image() -> Result<(), Box<dyn std::error::Error>> {
    let output = Command::new(env!("CARGO_BIN_EXE_jpegbench"))
        .arg("missing_image.jpg")
        .output()?;

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("Error: test image does not exist"));
    assert!(stdout.contains("missing_image.jpg"));
    Ok(())
}

#[test]
fn cli_valid_image() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempfile::tempdir()?;
    let image_path = write_rgb_fixture(tmp_dir.path())?;

    let output = Command::new(env!("CARGO_BIN_EXE_jpegbench"))
        .arg(&image_path)
        .args(["--num-runs", "2", "--num-reuse-runs", "3"])
        .output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("Performance summary"));
    assert!(tmp_dir.path().join("test.bin").exists());
    Ok(())
}

#[test]
fn cli_without_arguments_reads_test_jpg() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempfile::tempdir()?;
    write_rgb_fixture(tmp_dir.path())?;

    let output = Command::new(env!("CARGO_BIN_EXE_jpegbench"))
        .current_dir(tmp_dir.path())
        .output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("Test image: test.jpg"));
    assert_eq!(stdout.matches("  Run 5:").count(), 5);
    assert!(stdout.contains("(10 consecutive decodes)"));
    Ok(())
}
