use serde::{Deserialize, Serialize};

use crate::error::{Result, StabilizeError};

/// Pixel layout of incoming frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelFormat {
    /// Packed 8-bit RGB, 3 bytes per pixel.
    Rgb24,
    /// Planar YUV 4:2:0, full-resolution luma plane first.
    Yuv420p,
    /// Planar YUV 4:2:2, full-resolution luma plane first.
    Yuv422p,
}

impl PixelFormat {
    /// Parse a format name such as `rgb24` or `yuv420p`.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "rgb24" | "rgb" => Ok(Self::Rgb24),
            "yuv420p" | "i420" => Ok(Self::Yuv420p),
            "yuv422p" => Ok(Self::Yuv422p),
            other => Err(StabilizeError::UnsupportedPixelFormat(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Rgb24 => "rgb24",
            Self::Yuv420p => "yuv420p",
            Self::Yuv422p => "yuv422p",
        }
    }

    /// Total bytes of one frame of this format.
    pub fn frame_size(&self, width: usize, height: usize) -> usize {
        let luma = width * height;
        let chroma_width = width.div_ceil(2);
        match self {
            Self::Rgb24 => luma * 3,
            Self::Yuv420p => luma + 2 * chroma_width * height.div_ceil(2),
            Self::Yuv422p => luma + 2 * chroma_width * height,
        }
    }

    /// Interleaved channels of the plane the motion search reads.
    /// YUV layouts only ever expose their luma plane.
    pub fn search_channels(&self) -> usize {
        match self {
            Self::Rgb24 => 3,
            Self::Yuv420p | Self::Yuv422p => 1,
        }
    }
}

impl std::fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Size and layout shared by every frame of a stabilization run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameGeometry {
    pub width: usize,
    pub height: usize,
    pub format: PixelFormat,
}

impl FrameGeometry {
    pub fn new(width: usize, height: usize, format: PixelFormat) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(StabilizeError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            format,
        })
    }

    pub fn frame_size(&self) -> usize {
        self.format.frame_size(self.width, self.height)
    }
}

/// A borrowed frame buffer whose length has been checked against its geometry.
#[derive(Clone, Copy, Debug)]
pub struct RawFrame<'a> {
    data: &'a [u8],
    geometry: FrameGeometry,
}

impl<'a> RawFrame<'a> {
    pub fn new(data: &'a [u8], geometry: FrameGeometry) -> Result<Self> {
        let expected = geometry.frame_size();
        if data.len() != expected {
            return Err(StabilizeError::FrameSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { data, geometry })
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn geometry(&self) -> FrameGeometry {
        self.geometry
    }

    /// The plane the motion search reads: the packed RGB buffer, or the YUV luma plane.
    pub fn search_plane(&self) -> Plane<'a> {
        let FrameGeometry {
            width,
            height,
            format,
        } = self.geometry;
        let channels = format.search_channels();
        Plane {
            data: &self.data[..width * height * channels],
            width,
            height,
            channels,
        }
    }
}

/// Bounds-checked 2-D view over an interleaved 8-bit pixel buffer.
#[derive(Clone, Copy, Debug)]
pub struct Plane<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    channels: usize,
}

impl<'a> Plane<'a> {
    pub fn new(data: &'a [u8], width: usize, height: usize, channels: usize) -> Result<Self> {
        if width == 0 || height == 0 || channels == 0 {
            return Err(StabilizeError::InvalidDimensions { width, height });
        }
        let expected = width * height * channels;
        if data.len() < expected {
            return Err(StabilizeError::FrameSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data: &data[..expected],
            width,
            height,
            channels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// A `width x height` window with its top-left corner at `(x, y)`,
    /// or `None` if any part of it falls outside the plane.
    pub fn window(&self, x: isize, y: isize, width: usize, height: usize) -> Option<Window<'a>> {
        if x < 0 || y < 0 || width == 0 || height == 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x + width > self.width || y + height > self.height {
            return None;
        }
        Some(Window {
            plane: *self,
            x,
            y,
            width,
            height,
        })
    }

    /// Like [`Plane::window`], reporting the rejected rectangle as an error.
    pub fn window_checked(
        &self,
        x: isize,
        y: isize,
        width: usize,
        height: usize,
    ) -> Result<Window<'a>> {
        self.window(x, y, width, height)
            .ok_or(StabilizeError::WindowOutOfBounds {
                x,
                y,
                width,
                height,
            })
    }
}

/// A validated rectangular region of a [`Plane`].
#[derive(Clone, Copy, Debug)]
pub struct Window<'a> {
    plane: Plane<'a>,
    x: usize,
    y: usize,
    width: usize,
    height: usize,
}

impl<'a> Window<'a> {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.plane.channels
    }

    /// Number of samples (pixels times channels) covered by the window.
    pub fn sample_count(&self) -> usize {
        self.width * self.height * self.plane.channels
    }

    /// Rows of the window as interleaved sample slices.
    pub fn rows(&self) -> impl Iterator<Item = &'a [u8]> + 'a {
        let data = self.plane.data;
        let channels = self.plane.channels;
        let stride = self.plane.width * channels;
        let start = self.x * channels;
        let len = self.width * channels;
        (self.y..self.y + self.height).map(move |row| {
            let offset = row * stride + start;
            &data[offset..offset + len]
        })
    }
}
