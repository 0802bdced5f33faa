use argh::FromArgs;
use std::path::PathBuf;

use jpegbench::{run_benchmark, BenchConfig};

#[derive(FromArgs, Debug)]
/// Compare JPEG decoding paths on a single image.
struct Args {
    /// path to the JPEG image to benchmark
    #[argh(positional, default = "PathBuf::from(\"test.jpg\")")]
    image_path: PathBuf,

    /// repetitions of every decoding path
    #[argh(option, default = "5")]
    num_runs: usize,

    /// iterations of the buffer reuse scenario
    #[argh(option, default = "10")]
    num_reuse_runs: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    if !args.image_path.exists() {
        println!("Error: test image does not exist: {}", args.image_path.display());
        std::process::exit(1);
    }

    let config = BenchConfig {
        image_path: args.image_path,
        num_runs: args.num_runs,
        num_reuse_runs: args.num_reuse_runs,
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_benchmark(&config, &mut out)?;

    Ok(())
}
