pub mod contrast;
pub mod sad;

pub use contrast::{field_contrast, window_contrast};
pub use sad::{field_sad, window_sad, windowed_sad};
