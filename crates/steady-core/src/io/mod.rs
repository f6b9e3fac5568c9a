pub mod image_seq;
pub mod raw_video;
pub mod trf;
