use std::cmp::Ordering;

use crate::error::Result;
use crate::frame::Plane;
use crate::measure::field_contrast;

use super::FieldGrid;

/// Contrast score of one grid field, used only while selecting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoredField {
    pub contrast: f64,
    pub field_index: usize,
}

/// Highest contrast first; equal contrast falls back to grid order.
fn by_contrast_desc(a: &ScoredField, b: &ScoredField) -> Ordering {
    b.contrast
        .total_cmp(&a.contrast)
        .then(a.field_index.cmp(&b.field_index))
}

/// Score every field of the grid. Scores below `threshold` are forced to 0.
pub fn score_fields(plane: &Plane, grid: &FieldGrid, threshold: f64) -> Result<Vec<ScoredField>> {
    grid.fields()
        .iter()
        .enumerate()
        .map(|(field_index, field)| {
            let contrast = field_contrast(plane, field)?;
            Ok(ScoredField {
                contrast: if contrast < threshold { 0.0 } else { contrast },
                field_index,
            })
        })
        .collect()
}

/// Pick up to `max_fields` fields with non-zero contrast.
///
/// The fields are cut, in grid order, into `field_rows + 1` segments and each
/// segment contributes its best `max_fields / segments` fields, so that no single
/// region of the frame dominates. Any shortfall is filled with the best of the
/// remaining fields overall.
pub fn select_fields(scores: &[ScoredField], field_rows: usize, max_fields: usize) -> Vec<usize> {
    let segment_count = field_rows + 1;
    let segment_len = scores.len().div_ceil(segment_count).max(1);
    let quota = max_fields / segment_count;

    let mut pool = scores.to_vec();
    let mut selected = Vec::with_capacity(max_fields);

    for segment in pool.chunks_mut(segment_len) {
        segment.sort_by(by_contrast_desc);
        for entry in segment.iter_mut().take(quota) {
            if entry.contrast > 0.0 {
                selected.push(entry.field_index);
                // consumed
                entry.contrast = 0.0;
            }
        }
    }

    let remaining = max_fields.saturating_sub(selected.len());
    if remaining > 0 {
        pool.sort_by(by_contrast_desc);
        selected.extend(
            pool.iter()
                .take(remaining)
                .filter(|entry| entry.contrast > 0.0)
                .map(|entry| entry.field_index),
        );
    }

    selected
}

/// Score the grid on `plane` and select the fields to search.
pub fn select_by_contrast(
    plane: &Plane,
    grid: &FieldGrid,
    threshold: f64,
    max_fields: usize,
) -> Result<Vec<usize>> {
    let scores = score_fields(plane, grid, threshold)?;
    Ok(select_fields(&scores, grid.rows(), max_fields))
}
