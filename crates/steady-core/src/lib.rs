pub mod aggregate;
pub mod consts;
pub mod error;
pub mod fields;
pub mod frame;
pub mod io;
pub mod measure;
pub mod motion;
pub mod pipeline;
pub mod stream;
pub mod transform;
