pub mod brute_force;
mod dispatcher;
pub mod field_search;

pub use dispatcher::{estimate_fields, estimate_frame_motion, MotionStrategy, SampleLayout};
pub use field_search::{search_field, SearchParams};
