use crate::transform::Transform;

/// Outlier-trimmed mean and the range of the samples it kept.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CleanMean {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub retained: usize,
}

/// Samples cut from each end of a sorted list of `len` values.
/// At least one sample always survives.
fn trim_count(len: usize, trim_fraction: f64) -> usize {
    let cut = (len as f64 * trim_fraction.clamp(0.0, 0.5)).floor() as usize;
    cut.min(len.saturating_sub(1) / 2)
}

/// Sort the values, drop `trim_fraction` of them from each end, and average the rest.
///
/// Returns `None` for an empty slice.
pub fn clean_mean(values: &[f64], trim_fraction: f64) -> Option<CleanMean> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let cut = trim_count(sorted.len(), trim_fraction);
    let kept = &sorted[cut..sorted.len() - cut];
    let mean = kept.iter().sum::<f64>() / kept.len() as f64;

    Some(CleanMean {
        mean,
        min: kept[0],
        max: kept[kept.len() - 1],
        retained: kept.len(),
    })
}

/// Cleaned mean of the translations; x and y are trimmed independently.
pub fn clean_mean_translation(transforms: &[Transform], trim_fraction: f64) -> Transform {
    let xs: Vec<f64> = transforms.iter().map(|t| t.dx).collect();
    let ys: Vec<f64> = transforms.iter().map(|t| t.dy).collect();
    match (clean_mean(&xs, trim_fraction), clean_mean(&ys, trim_fraction)) {
        (Some(x), Some(y)) => Transform::translation(x.mean, y.mean),
        _ => Transform::identity(),
    }
}
