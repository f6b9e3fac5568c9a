use std::path::{Path, PathBuf};

use crate::consts::NEUTRAL_CHROMA;
use crate::error::{Result, StabilizeError};
use crate::frame::{FrameGeometry, PixelFormat};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tif", "tiff", "bmp", "pgm", "ppm"];

/// A decoded image laid out in one of the engine's pixel formats.
#[derive(Clone, Debug)]
pub struct DecodedFrame {
    pub geometry: FrameGeometry,
    pub data: Vec<u8>,
}

/// Decode an image file into `format`.
///
/// RGB24 keeps the color channels. YUV layouts get the image's luma as their
/// luma plane and neutral chroma planes.
pub fn load_image_frame(path: &Path, format: PixelFormat) -> Result<DecodedFrame> {
    let img = image::open(path)?;
    let geometry = FrameGeometry::new(img.width() as usize, img.height() as usize, format)?;

    let data = match format {
        PixelFormat::Rgb24 => img.to_rgb8().into_raw(),
        PixelFormat::Yuv420p | PixelFormat::Yuv422p => {
            let mut data = img.to_luma8().into_raw();
            data.resize(geometry.frame_size(), NEUTRAL_CHROMA);
            data
        }
    };

    Ok(DecodedFrame { geometry, data })
}

/// Frame geometry of an image file, read from its header without decoding pixels.
pub fn image_geometry(path: &Path, format: PixelFormat) -> Result<FrameGeometry> {
    let (width, height) = image::image_dimensions(path)?;
    FrameGeometry::new(width as usize, height as usize, format)
}

fn is_image_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
            .unwrap_or(false)
}

/// Image files of a directory, sorted by file name.
pub fn list_image_sequence(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if is_image_file(&path) {
            paths.push(path);
        }
    }
    if paths.is_empty() {
        return Err(StabilizeError::EmptySequence);
    }
    paths.sort();
    Ok(paths)
}

/// Lazily decode a list of image files into frame buffers.
pub fn image_frames(
    paths: &[PathBuf],
    format: PixelFormat,
) -> impl ExactSizeIterator<Item = Result<Vec<u8>>> + '_ {
    paths
        .iter()
        .map(move |path| load_image_frame(path, format).map(|frame| frame.data))
}
