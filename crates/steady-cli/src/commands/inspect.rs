use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use steady_core::io::trf::load_transforms;
use steady_core::transform::Transform;

#[derive(Args)]
pub struct InspectArgs {
    /// Transform file (.trf)
    pub file: PathBuf,

    /// Also list the N largest translations
    #[arg(long, default_value = "0")]
    pub top: usize,
}

fn magnitude(t: &Transform) -> f64 {
    t.dx.hypot(t.dy)
}

pub fn run(args: &InspectArgs) -> Result<()> {
    let (header, stream) = load_transforms(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    println!("File:         {}", args.file.display());
    println!("Frames:       {}", stream.len());
    println!("Shakiness:    {}", header.shakiness);
    println!("Accuracy:     {}", header.accuracy);
    println!("Step size:    {}", header.step_size);
    println!("Algorithm:    {}", header.algorithm);
    println!("Min contrast: {:.3}", header.min_contrast);

    if stream.is_empty() {
        return Ok(());
    }

    let n = stream.len() as f64;
    let transforms = stream.as_slice();
    let mean_dx = transforms.iter().map(|t| t.dx).sum::<f64>() / n;
    let mean_dy = transforms.iter().map(|t| t.dy).sum::<f64>() / n;
    let max_shift = transforms.iter().map(magnitude).fold(0.0, f64::max);
    let max_alpha = transforms.iter().map(|t| t.alpha.abs()).fold(0.0, f64::max);
    let rotated = transforms.iter().filter(|t| t.alpha != 0.0).count();
    let rejected = transforms.iter().filter(|t| t.is_rejected()).count();

    println!();
    println!("Mean shift:   ({:.4}, {:.4}) px", mean_dx, mean_dy);
    println!("Max shift:    {:.4} px", max_shift);
    println!("Max |alpha|:  {:.5} rad ({} frames rotated)", max_alpha, rotated);
    if rejected > 0 {
        println!("Rejected:     {}", rejected);
    }

    if args.top > 0 {
        let mut ranked: Vec<(usize, &Transform)> = stream.iter().collect();
        ranked.sort_by(|a, b| magnitude(b.1).total_cmp(&magnitude(a.1)));

        println!();
        println!("{:>5}  {:>8}  {:>9}  {:>9}  {:>9}", "Rank", "Frame #", "x", "y", "alpha");
        println!("{}", "-".repeat(48));
        for (rank, (frame, t)) in ranked.iter().take(args.top).enumerate() {
            println!(
                "{:>5}  {:>8}  {:>9.4}  {:>9.4}  {:>9.5}",
                rank + 1,
                frame,
                t.dx,
                t.dy,
                t.alpha
            );
        }
    }

    Ok(())
}
