use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use steady_core::frame::{FrameGeometry, PixelFormat};
use steady_core::io::image_seq::{image_frames, image_geometry, list_image_sequence};
use steady_core::io::raw_video::RawVideoReader;
use steady_core::io::trf::{default_result_path, save_transforms};
use steady_core::pipeline::config::{Algorithm, DetectOptions};
use steady_core::pipeline::{
    run_detection_reported, DetectionOutput, DetectionStage, ProgressReporter,
};
use tracing::info;

use crate::progress::BarReporter;
use crate::summary::print_detection_summary;

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Rgb24,
    Yuv420p,
    Yuv422p,
}

impl From<FormatArg> for PixelFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Rgb24 => PixelFormat::Rgb24,
            FormatArg::Yuv420p => PixelFormat::Yuv420p,
            FormatArg::Yuv422p => PixelFormat::Yuv422p,
        }
    }
}

#[derive(Args)]
pub struct DetectArgs {
    /// Raw video file, or a directory of image frames
    pub input: PathBuf,

    /// Frame width in pixels (raw video input)
    #[arg(long)]
    pub width: Option<usize>,

    /// Frame height in pixels (raw video input)
    #[arg(long)]
    pub height: Option<usize>,

    /// Pixel layout of the frames
    #[arg(long, value_enum, default_value = "yuv420p")]
    pub format: FormatArg,

    /// Detection options file (TOML); flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// How shaky the video is, 1 (little) to 10 (very strong)
    #[arg(long)]
    pub shakiness: Option<u32>,

    /// Detection accuracy, 1 (fast) to 15 (thorough), at least shakiness
    #[arg(long)]
    pub accuracy: Option<u32>,

    /// Coarse search step size
    #[arg(long)]
    pub step_size: Option<usize>,

    /// 0: brute force translation only; 1: measurement fields
    #[arg(long)]
    pub algo: Option<u32>,

    /// Fields below this contrast are discarded (0-1)
    #[arg(long)]
    pub min_contrast: Option<f64>,

    /// Trust shifts that reach the maximal search radius
    #[arg(long)]
    pub allow_max_shift: bool,

    /// Output transform file (default: <input>.trf)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

fn build_options(args: &DetectArgs) -> Result<DetectOptions> {
    let mut options = if let Some(ref path) = args.config {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&contents).context("Invalid detection config")?
    } else {
        DetectOptions::default()
    };

    if let Some(shakiness) = args.shakiness {
        options.shakiness = shakiness;
    }
    if let Some(accuracy) = args.accuracy {
        options.accuracy = accuracy;
    }
    if let Some(step_size) = args.step_size {
        options.step_size = step_size;
    }
    if let Some(code) = args.algo {
        options.algorithm = Algorithm::from_code(code)?;
    }
    if let Some(min_contrast) = args.min_contrast {
        options.min_contrast = min_contrast;
    }
    if args.allow_max_shift {
        options.allow_max_shift = true;
    }
    Ok(options.normalized())
}

/// List an image directory and read the frame geometry from the first file's header.
fn open_image_sequence(
    dir: &Path,
    format: PixelFormat,
    reporter: &dyn ProgressReporter,
) -> Result<(Vec<PathBuf>, FrameGeometry)> {
    reporter.begin_stage(DetectionStage::Reading, None);
    let paths = list_image_sequence(dir)
        .with_context(|| format!("Failed to list frames in {}", dir.display()))?;
    let geometry = image_geometry(&paths[0], format)
        .with_context(|| format!("Failed to read {}", paths[0].display()))?;
    reporter.finish_stage();
    Ok((paths, geometry))
}

fn open_raw_video(
    path: &Path,
    geometry: FrameGeometry,
    reporter: &dyn ProgressReporter,
) -> Result<RawVideoReader> {
    reporter.begin_stage(DetectionStage::Reading, None);
    let reader = RawVideoReader::open(path, geometry)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    reporter.finish_stage();
    Ok(reader)
}

fn detect_image_sequence(
    dir: &Path,
    format: PixelFormat,
    options: &DetectOptions,
    reporter: &BarReporter,
) -> Result<DetectionOutput> {
    let (paths, geometry) = open_image_sequence(dir, format, reporter)?;
    println!(
        "Reading {} image frames ({}x{}, {})",
        paths.len(),
        geometry.width,
        geometry.height,
        format
    );
    Ok(run_detection_reported(
        image_frames(&paths, format),
        geometry,
        options,
        reporter,
    )?)
}

fn detect_raw_video(
    path: &Path,
    args: &DetectArgs,
    format: PixelFormat,
    options: &DetectOptions,
    reporter: &BarReporter,
) -> Result<DetectionOutput> {
    let (Some(width), Some(height)) = (args.width, args.height) else {
        bail!("--width and --height are required for raw video input");
    };
    let geometry = FrameGeometry::new(width, height, format)?;
    let reader = open_raw_video(path, geometry, reporter)?;
    println!(
        "Reading {} raw frames ({}x{}, {})",
        reader.frame_count(),
        width,
        height,
        format
    );
    Ok(run_detection_reported(
        reader.frames(),
        geometry,
        options,
        reporter,
    )?)
}

pub fn run(args: &DetectArgs) -> Result<()> {
    let mut options = build_options(args)?;
    let format = PixelFormat::from(args.format);
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| default_result_path(&args.input));
    options.result = Some(output_path.clone());

    let reporter = BarReporter::new()?;
    let output = if args.input.is_dir() {
        detect_image_sequence(&args.input, format, &options, &reporter)?
    } else {
        detect_raw_video(&args.input, args, format, &options, &reporter)?
    };

    reporter.begin_stage(DetectionStage::Writing, None);
    save_transforms(&output_path, &output.header, &output.transforms)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;
    reporter.finish_stage();
    reporter.finish();
    info!(path = %output_path.display(), frames = output.transforms.len(), "Transforms written");

    print_detection_summary(&options, &output, &output_path);
    Ok(())
}
