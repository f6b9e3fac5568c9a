pub mod grid;
pub mod select;

pub use grid::{grid_dims, Field, FieldGrid};
pub use select::{score_fields, select_by_contrast, select_fields, ScoredField};
