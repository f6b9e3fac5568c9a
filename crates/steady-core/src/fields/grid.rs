use crate::consts::MIN_GRID_DIM;
use crate::error::{Result, StabilizeError};

/// A square measurement window centered on `(center_x, center_y)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    pub center_x: usize,
    pub center_y: usize,
    pub size: usize,
}

impl Field {
    /// Top-left corner of the field window.
    pub fn origin(&self) -> (isize, isize) {
        let half = (self.size / 2) as isize;
        (self.center_x as isize - half, self.center_y as isize - half)
    }
}

/// Rows and columns of the field lattice for a frame.
///
/// Both are floored at [`MIN_GRID_DIM`] so small frames still get a usable grid.
pub fn grid_dims(width: usize, height: usize, max_shift: usize, field_size: usize) -> (usize, usize) {
    let size = field_size.max(1);
    let rows = (height.saturating_sub(2 * max_shift) / size)
        .saturating_sub(1)
        .max(MIN_GRID_DIM);
    let cols = (width.saturating_sub(2 * max_shift) / size)
        .saturating_sub(1)
        .max(MIN_GRID_DIM);
    (rows, cols)
}

/// Regular lattice of measurement fields, stored row-major.
#[derive(Clone, Debug)]
pub struct FieldGrid {
    fields: Vec<Field>,
    rows: usize,
    cols: usize,
    field_size: usize,
    border: usize,
}

impl FieldGrid {
    /// Lay out the fields so that every field, displaced by up to
    /// `max_shift + step_size` in either axis, stays strictly inside the frame.
    pub fn build(
        width: usize,
        height: usize,
        max_shift: usize,
        step_size: usize,
        field_size: usize,
    ) -> Result<Self> {
        let (rows, cols) = grid_dims(width, height, max_shift, field_size);
        let border = field_size / 2 + max_shift + step_size;
        if width <= 2 * border || height <= 2 * border {
            return Err(StabilizeError::InvalidConfig(format!(
                "{width}x{height} frame is too small for a search border of {border} pixels"
            )));
        }

        let step_x = (width - 1 - 2 * border) / (cols - 1).max(1);
        let step_y = (height - 1 - 2 * border) / (rows - 1).max(1);

        let count = rows * cols;
        let mut fields = Vec::new();
        fields.try_reserve_exact(count).map_err(|e| {
            StabilizeError::Allocation(format!("field grid of {count} fields: {e}"))
        })?;

        for row in 0..rows {
            for col in 0..cols {
                fields.push(Field {
                    center_x: border + col * step_x,
                    center_y: border + row * step_y,
                    size: field_size,
                });
            }
        }

        Ok(Self {
            fields,
            rows,
            cols,
            field_size,
            border,
        })
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn get(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn field_size(&self) -> usize {
        self.field_size
    }

    /// Minimum distance between any field center and the frame edge.
    pub fn border(&self) -> usize {
        self.border
    }
}
